//! Section registry and fixed catalog data.
//!
//! This module defines the ordered wizard sections, their display names,
//! required fields and the static catalog item lists that seed a fresh
//! draft. Section order is significant: it drives wizard progression and
//! the progress fraction shown to the user.

use serde::{Deserialize, Serialize};

/// Identifier of one wizard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionId {
    /// Brigade identity and contact data.
    #[serde(rename = "info")]
    Info,
    /// Protective clothing, counted per garment and size.
    #[serde(rename = "equipment-clothing")]
    Clothing,
    /// Fire boots, counted per numeric size.
    #[serde(rename = "equipment-boots")]
    Boots,
    /// Protective gloves, counted per size bucket.
    #[serde(rename = "equipment-gloves")]
    Gloves,
    /// Other protective gear.
    #[serde(rename = "equipment-other-gear")]
    OtherGear,
    /// Hand tools and powered tools.
    #[serde(rename = "tools")]
    Tools,
    /// Vehicle parts and logistics expenses, recorded as costs.
    #[serde(rename = "logistics-parts")]
    Parts,
    /// Food and water supplies.
    #[serde(rename = "food")]
    Food,
    /// Camp and deployment gear.
    #[serde(rename = "field-gear")]
    FieldGear,
    /// Personal hygiene supplies.
    #[serde(rename = "personal-hygiene")]
    PersonalHygiene,
    /// Shared and station hygiene supplies.
    #[serde(rename = "general-hygiene")]
    GeneralHygiene,
    /// Medical supplies.
    #[serde(rename = "medicine")]
    Medicine,
    /// Animal rescue equipment.
    #[serde(rename = "animal-rescue")]
    AnimalRescue,
}

impl SectionId {
    /// The stable string id of this section, as used in draft files and
    /// remote endpoint paths.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Clothing => "equipment-clothing",
            Self::Boots => "equipment-boots",
            Self::Gloves => "equipment-gloves",
            Self::OtherGear => "equipment-other-gear",
            Self::Tools => "tools",
            Self::Parts => "logistics-parts",
            Self::Food => "food",
            Self::FieldGear => "field-gear",
            Self::PersonalHygiene => "personal-hygiene",
            Self::GeneralHygiene => "general-hygiene",
            Self::Medicine => "medicine",
            Self::AnimalRescue => "animal-rescue",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// A field of the brigade identity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Brigade name.
    BrigadeName,
    /// Number of active members.
    MemberCount,
    /// Commander name.
    CommanderName,
    /// Commander phone number.
    CommanderPhone,
    /// Logistics contact name.
    LogisticsName,
    /// Logistics contact phone number.
    LogisticsPhone,
    /// Free-text emergency numbers.
    EmergencyNumbers,
}

impl Field {
    /// Human-readable label for this field.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BrigadeName => "brigade name",
            Self::MemberCount => "active members",
            Self::CommanderName => "commander name",
            Self::CommanderPhone => "commander phone",
            Self::LogisticsName => "logistics contact",
            Self::LogisticsPhone => "logistics phone",
            Self::EmergencyNumbers => "emergency numbers",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The value shape a section's entries take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// Identity fields, persisted as one profile record.
    Profile,
    /// Catalog items counted per size (clothing).
    SizedItems,
    /// Fixed numeric size slots plus one free-text slot (boots).
    FixedSizeSlots,
    /// A single record of size buckets (gloves).
    SizeBuckets,
    /// Catalog items with a quantity and notes.
    QuantityItems,
    /// Catalog items with a cost and notes.
    CostItems,
}

/// Descriptor of one wizard section.
#[derive(Debug)]
pub struct Section {
    /// Section identifier.
    pub id: SectionId,
    /// Display name shown in navigation and the generated document.
    pub display_name: &'static str,
    /// Fields that must pass validation before leaving this section.
    pub required_fields: &'static [Field],
    /// The value shape of this section's entries.
    pub shape: SectionShape,
    /// Fixed catalog item names offered by this section, in display order.
    pub catalog: &'static [&'static str],
}

/// All wizard sections, in progression order.
pub const SECTIONS: &[Section] = &[
    Section {
        id: SectionId::Info,
        display_name: "Brigade information",
        required_fields: &[
            Field::BrigadeName,
            Field::MemberCount,
            Field::CommanderName,
            Field::CommanderPhone,
        ],
        shape: SectionShape::Profile,
        catalog: &[],
    },
    Section {
        id: SectionId::Clothing,
        display_name: "Protective clothing",
        required_fields: &[],
        shape: SectionShape::SizedItems,
        catalog: &[
            "Fire-resistant jacket",
            "Fire-resistant trousers",
            "Work coverall",
            "Station uniform shirt",
            "Thermal base layer",
            "High-visibility vest",
        ],
    },
    Section {
        id: SectionId::Boots,
        display_name: "Fire boots",
        required_fields: &[],
        shape: SectionShape::FixedSizeSlots,
        catalog: &[],
    },
    Section {
        id: SectionId::Gloves,
        display_name: "Protective gloves",
        required_fields: &[],
        shape: SectionShape::SizeBuckets,
        catalog: &[],
    },
    Section {
        id: SectionId::OtherGear,
        display_name: "Other protective gear",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Structural helmet",
            "Wildland helmet",
            "Protective goggles",
            "Smoke mask",
            "Headlamp",
            "Rescue harness",
            "Ear protection",
        ],
    },
    Section {
        id: SectionId::Tools,
        display_name: "Tools",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Pulaski axe",
            "McLeod rake",
            "Round-point shovel",
            "Chainsaw",
            "Backpack pump",
            "Drip torch",
            "Machete",
            "Pickaxe",
            "Wire cutter",
        ],
    },
    Section {
        id: SectionId::Parts,
        display_name: "Vehicle parts and logistics",
        required_fields: &[],
        shape: SectionShape::CostItems,
        catalog: &[
            "Tyre replacement",
            "Engine oil and filters",
            "Brake service",
            "Radio battery pack",
            "Pump repair",
            "Fuel",
            "Hose coupling",
        ],
    },
    Section {
        id: SectionId::Food,
        display_name: "Food and water",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Drinking water (litres)",
            "Canned rations",
            "Energy bars",
            "Electrolyte powder",
            "Instant coffee",
            "Long-life milk",
        ],
    },
    Section {
        id: SectionId::FieldGear,
        display_name: "Field gear",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Four-season tent",
            "Sleeping bag",
            "Insulated mat",
            "Field backpack",
            "Canteen",
            "Portable stove",
            "Thermal blanket",
        ],
    },
    Section {
        id: SectionId::PersonalHygiene,
        display_name: "Personal hygiene",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Soap bar",
            "Toothbrush and paste",
            "Deodorant",
            "Disposable razor",
            "Towel",
            "Sunscreen",
            "Lip balm",
        ],
    },
    Section {
        id: SectionId::GeneralHygiene,
        display_name: "General hygiene",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Laundry detergent",
            "Bleach (litres)",
            "Dish soap",
            "Trash bags",
            "Paper towels",
            "Hand sanitizer",
        ],
    },
    Section {
        id: SectionId::Medicine,
        display_name: "Medicine",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "First aid kit",
            "Burn dressing",
            "Saline solution",
            "Elastic bandage",
            "Analgesic tablets",
            "Antihistamine",
            "Oral rehydration salts",
        ],
    },
    Section {
        id: SectionId::AnimalRescue,
        display_name: "Animal rescue",
        required_fields: &[],
        shape: SectionShape::QuantityItems,
        catalog: &[
            "Leash and muzzle set",
            "Transport cage",
            "Handling gloves",
            "Pet food (kg)",
            "Microchip scanner",
            "Wound spray",
        ],
    },
];

/// Size axis for clothing items.
pub const CLOTHING_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];

/// Numeric size slots for boots.
pub const BOOT_SIZES: &[u8] = &[36, 37, 38, 39, 40, 41, 42, 43, 44, 45];

/// Get the descriptor for a section id.
#[must_use]
pub fn section(id: SectionId) -> &'static Section {
    // SECTIONS covers every SectionId variant; verified by tests.
    SECTIONS
        .iter()
        .find(|s| s.id == id)
        .expect("every section id has a descriptor")
}

/// Get the progression index of a section id.
#[must_use]
pub fn index_of(id: SectionId) -> usize {
    SECTIONS
        .iter()
        .position(|s| s.id == id)
        .expect("every section id has a descriptor")
}

/// Progress fraction after entering the section at `index`.
#[must_use]
pub fn progress(index: usize) -> f32 {
    let total = SECTIONS.len();
    let step = index.min(total - 1) + 1;
    // Small fixed n, precision loss is not a concern.
    #[allow(clippy::cast_precision_loss)]
    let fraction = step as f32 / total as f32;
    fraction
}
