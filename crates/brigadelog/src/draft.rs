//! Draft state for one brigade's answers.
//!
//! This module defines the in-memory draft that accumulates everything the
//! user enters across the wizard sections. The draft is one explicit
//! aggregate value: the validator, the persistence gateway and the document
//! renderer are all pure functions over it.
//!
//! Catalog-keyed records are stored as ordered vectors seeded from the
//! section registry, so iteration order is always catalog order. Every
//! catalog item always has a record; only custom rows come and go.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, SectionId, BOOT_SIZES, CLOTHING_SIZES};
use crate::error::{Error, Result};

/// Coerce raw user input to a non-negative integer quantity.
///
/// Anything unparseable or negative becomes 0.
#[must_use]
pub fn coerce_quantity(raw: &str) -> u32 {
    raw.trim().parse::<i64>().map_or(0, |n| {
        u32::try_from(n.max(0)).unwrap_or(u32::MAX)
    })
}

/// Coerce raw user input to a non-negative decimal cost.
///
/// Anything unparseable, non-finite or negative becomes 0.
#[must_use]
pub fn coerce_cost(raw: &str) -> f64 {
    let value = raw.trim().parse::<f64>().unwrap_or(0.0);
    clamp_cost(value)
}

/// Clamp an already-numeric cost to the non-negative finite range.
#[must_use]
pub fn clamp_cost(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Raw identity fields as entered by the user.
///
/// Values stay strings until validation; the gateway converts them to
/// their persisted shapes only after the info section validates clean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    /// Brigade name.
    pub name: String,
    /// Number of active members, as entered.
    pub member_count: String,
    /// Commander name.
    pub commander_name: String,
    /// Commander phone number, as entered.
    pub commander_phone: String,
    /// Logistics contact name (optional).
    pub logistics_name: String,
    /// Logistics contact phone (optional, as entered).
    pub logistics_phone: String,
    /// Free-text emergency numbers (optional).
    pub emergency_numbers: String,
}

/// One fixed catalog item with a recorded quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityEntry {
    /// Catalog item name.
    pub name: String,
    /// Recorded quantity.
    #[serde(default)]
    pub quantity: u32,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// One fixed catalog item with a recorded cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    /// Catalog item name.
    pub name: String,
    /// Recorded cost.
    #[serde(default)]
    pub cost: f64,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// A user-added row beyond the fixed catalog.
///
/// Rows with an empty name are not-yet-real: they are kept in the draft
/// (the user may still be typing) but excluded from persistence and
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomRow {
    /// User-entered item name.
    pub name: String,
    /// Recorded quantity.
    pub quantity: u32,
    /// Free-text notes.
    pub notes: String,
}

impl CustomRow {
    /// A custom row counts once it has a non-blank name.
    #[must_use]
    pub fn is_real(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A user-added cost row beyond the fixed catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRow {
    /// User-entered item name.
    pub name: String,
    /// Recorded cost.
    pub cost: f64,
    /// Free-text notes.
    pub notes: String,
}

impl CostRow {
    /// A custom row counts once it has a non-blank name.
    #[must_use]
    pub fn is_real(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Quantity recorded for one size of a sized catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCount {
    /// Size label.
    pub size: String,
    /// Recorded quantity.
    #[serde(default)]
    pub quantity: u32,
}

/// One sized catalog item (clothing) with per-size quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizedEntry {
    /// Catalog item name.
    pub name: String,
    /// Per-size quantities, in the fixed size-axis order.
    pub sizes: Vec<SizeCount>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// A section holding quantity-counted catalog items plus custom rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantitySection {
    /// Fixed catalog items, in catalog order.
    pub items: Vec<QuantityEntry>,
    /// User-added rows, in insertion order.
    pub custom: Vec<CustomRow>,
}

impl QuantitySection {
    /// Seed a section from a catalog item list.
    #[must_use]
    pub fn seeded(catalog: &[&str]) -> Self {
        Self {
            items: catalog
                .iter()
                .map(|name| QuantityEntry {
                    name: (*name).to_string(),
                    quantity: 0,
                    notes: String::new(),
                })
                .collect(),
            custom: Vec::new(),
        }
    }

    /// Look up a catalog item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QuantityEntry> {
        self.items.iter().find(|e| e.name == name)
    }

    /// Set the quantity of a catalog item. Returns false for unknown names.
    pub fn set_quantity(&mut self, name: &str, quantity: u32) -> bool {
        match self.items.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Set the notes of a catalog item. Returns false for unknown names.
    pub fn set_notes(&mut self, name: &str, notes: &str) -> bool {
        match self.items.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.notes = notes.to_string();
                true
            }
            None => false,
        }
    }

    /// Append an empty custom row and return its index.
    pub fn add_custom(&mut self) -> usize {
        self.custom.push(CustomRow::default());
        self.custom.len() - 1
    }

    /// Update a custom row in place. Returns false for out-of-range indexes.
    pub fn update_custom(&mut self, index: usize, f: impl FnOnce(&mut CustomRow)) -> bool {
        match self.custom.get_mut(index) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }

    /// Remove a custom row by index, preserving the order of the rest.
    pub fn remove_custom(&mut self, index: usize) -> bool {
        if index < self.custom.len() {
            self.custom.remove(index);
            true
        } else {
            false
        }
    }

    /// Iterate over custom rows that have a real (non-blank) name.
    pub fn real_custom(&self) -> impl Iterator<Item = &CustomRow> {
        self.custom.iter().filter(|row| row.is_real())
    }
}

/// A section holding cost-recorded catalog items plus custom rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSection {
    /// Fixed catalog items, in catalog order.
    pub items: Vec<CostEntry>,
    /// User-added rows, in insertion order.
    pub custom: Vec<CostRow>,
}

impl CostSection {
    /// Seed a section from a catalog item list.
    #[must_use]
    pub fn seeded(catalog: &[&str]) -> Self {
        Self {
            items: catalog
                .iter()
                .map(|name| CostEntry {
                    name: (*name).to_string(),
                    cost: 0.0,
                    notes: String::new(),
                })
                .collect(),
            custom: Vec::new(),
        }
    }

    /// Look up a catalog item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CostEntry> {
        self.items.iter().find(|e| e.name == name)
    }

    /// Set the cost of a catalog item, clamped non-negative.
    /// Returns false for unknown names.
    pub fn set_cost(&mut self, name: &str, cost: f64) -> bool {
        match self.items.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.cost = clamp_cost(cost);
                true
            }
            None => false,
        }
    }

    /// Set the notes of a catalog item. Returns false for unknown names.
    pub fn set_notes(&mut self, name: &str, notes: &str) -> bool {
        match self.items.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.notes = notes.to_string();
                true
            }
            None => false,
        }
    }

    /// Append an empty custom row and return its index.
    pub fn add_custom(&mut self) -> usize {
        self.custom.push(CostRow::default());
        self.custom.len() - 1
    }

    /// Update a custom row in place, clamping its cost non-negative.
    /// Returns false for out-of-range indexes.
    pub fn update_custom(&mut self, index: usize, f: impl FnOnce(&mut CostRow)) -> bool {
        match self.custom.get_mut(index) {
            Some(row) => {
                f(row);
                row.cost = clamp_cost(row.cost);
                true
            }
            None => false,
        }
    }

    /// Remove a custom row by index, preserving the order of the rest.
    pub fn remove_custom(&mut self, index: usize) -> bool {
        if index < self.custom.len() {
            self.custom.remove(index);
            true
        } else {
            false
        }
    }

    /// Iterate over custom rows that have a real (non-blank) name.
    pub fn real_custom(&self) -> impl Iterator<Item = &CostRow> {
        self.custom.iter().filter(|row| row.is_real())
    }
}

/// The clothing section: sized catalog items plus custom rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizedSection {
    /// Fixed catalog garments, in catalog order.
    pub items: Vec<SizedEntry>,
    /// User-added rows, in insertion order.
    pub custom: Vec<CustomRow>,
}

impl SizedSection {
    /// Seed the section from a catalog list and the fixed size axis.
    #[must_use]
    pub fn seeded(catalog: &[&str]) -> Self {
        Self {
            items: catalog
                .iter()
                .map(|name| SizedEntry {
                    name: (*name).to_string(),
                    sizes: CLOTHING_SIZES
                        .iter()
                        .map(|size| SizeCount {
                            size: (*size).to_string(),
                            quantity: 0,
                        })
                        .collect(),
                    notes: String::new(),
                })
                .collect(),
            custom: Vec::new(),
        }
    }

    /// Set the quantity of one garment in one size.
    /// Returns false for unknown garment or size names.
    pub fn set_size_quantity(&mut self, name: &str, size: &str, quantity: u32) -> bool {
        let Some(entry) = self.items.iter_mut().find(|e| e.name == name) else {
            return false;
        };
        match entry.sizes.iter_mut().find(|s| s.size == size) {
            Some(slot) => {
                slot.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Set the notes of a garment. Returns false for unknown names.
    pub fn set_notes(&mut self, name: &str, notes: &str) -> bool {
        match self.items.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.notes = notes.to_string();
                true
            }
            None => false,
        }
    }

    /// Append an empty custom row and return its index.
    pub fn add_custom(&mut self) -> usize {
        self.custom.push(CustomRow::default());
        self.custom.len() - 1
    }

    /// Update a custom row in place. Returns false for out-of-range indexes.
    pub fn update_custom(&mut self, index: usize, f: impl FnOnce(&mut CustomRow)) -> bool {
        match self.custom.get_mut(index) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }

    /// Remove a custom row by index, preserving the order of the rest.
    pub fn remove_custom(&mut self, index: usize) -> bool {
        if index < self.custom.len() {
            self.custom.remove(index);
            true
        } else {
            false
        }
    }

    /// Iterate over custom rows that have a real (non-blank) name.
    pub fn real_custom(&self) -> impl Iterator<Item = &CustomRow> {
        self.custom.iter().filter(|row| row.is_real())
    }
}

/// One numeric boot-size slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootSlot {
    /// European shoe size.
    pub size: u8,
    /// Recorded quantity.
    #[serde(default)]
    pub quantity: u32,
}

/// The boots section: fixed numeric slots plus one free-text slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootSection {
    /// Fixed numeric size slots, in ascending size order.
    pub slots: Vec<BootSlot>,
    /// Free-text description of an out-of-range size requirement.
    pub other_label: String,
    /// Quantity for the out-of-range slot (may stay 0).
    pub other_quantity: u32,
}

impl BootSection {
    /// Seed the section from the fixed boot-size axis.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            slots: BOOT_SIZES
                .iter()
                .map(|size| BootSlot {
                    size: *size,
                    quantity: 0,
                })
                .collect(),
            other_label: String::new(),
            other_quantity: 0,
        }
    }

    /// Set the quantity for a numeric size. Returns false for unknown sizes.
    pub fn set_quantity(&mut self, size: u8, quantity: u32) -> bool {
        match self.slots.iter_mut().find(|s| s.size == size) {
            Some(slot) => {
                slot.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

/// The gloves section: one record of size buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GloveSection {
    /// Quantity in size S.
    pub small: u32,
    /// Quantity in size M.
    pub medium: u32,
    /// Quantity in size L.
    pub large: u32,
    /// Quantity in size XL.
    pub extra_large: u32,
    /// Free-text description of any other size requirement.
    pub other_label: String,
    /// Free-text notes.
    pub notes: String,
}

impl GloveSection {
    /// True when every bucket is zero and the other-size text is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.small == 0
            && self.medium == 0
            && self.large == 0
            && self.extra_large == 0
            && self.other_label.trim().is_empty()
    }
}

/// The complete in-memory record of all sections' answers.
///
/// Created fresh when the wizard starts and discarded when the session
/// ends; the only durable form is the draft file the CLI loads and saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    /// Brigade identity fields.
    pub profile: ProfileDraft,
    /// Protective clothing.
    pub clothing: SizedSection,
    /// Fire boots.
    pub boots: BootSection,
    /// Protective gloves.
    pub gloves: GloveSection,
    /// Other protective gear.
    pub other_gear: QuantitySection,
    /// Tools.
    pub tools: QuantitySection,
    /// Vehicle parts and logistics.
    pub parts: CostSection,
    /// Food and water.
    pub food: QuantitySection,
    /// Field gear.
    pub field_gear: QuantitySection,
    /// Personal hygiene.
    pub personal_hygiene: QuantitySection,
    /// General hygiene.
    pub general_hygiene: QuantitySection,
    /// Medicine.
    pub medicine: QuantitySection,
    /// Animal rescue.
    pub animal_rescue: QuantitySection,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

impl Draft {
    /// Create a fresh draft with every catalog item seeded at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: ProfileDraft::default(),
            clothing: SizedSection::seeded(catalog::section(SectionId::Clothing).catalog),
            boots: BootSection::seeded(),
            gloves: GloveSection::default(),
            other_gear: QuantitySection::seeded(catalog::section(SectionId::OtherGear).catalog),
            tools: QuantitySection::seeded(catalog::section(SectionId::Tools).catalog),
            parts: CostSection::seeded(catalog::section(SectionId::Parts).catalog),
            food: QuantitySection::seeded(catalog::section(SectionId::Food).catalog),
            field_gear: QuantitySection::seeded(catalog::section(SectionId::FieldGear).catalog),
            personal_hygiene: QuantitySection::seeded(
                catalog::section(SectionId::PersonalHygiene).catalog,
            ),
            general_hygiene: QuantitySection::seeded(
                catalog::section(SectionId::GeneralHygiene).catalog,
            ),
            medicine: QuantitySection::seeded(catalog::section(SectionId::Medicine).catalog),
            animal_rescue: QuantitySection::seeded(
                catalog::section(SectionId::AnimalRescue).catalog,
            ),
        }
    }

    /// Load a draft from a JSON file and normalize it against the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::DraftRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut draft: Self =
            serde_json::from_str(&raw).map_err(|source| Error::DraftParse {
                path: path.to_path_buf(),
                source,
            })?;
        draft.normalize();
        Ok(draft)
    }

    /// Serialize the draft as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Re-align the draft with the fixed catalog.
    ///
    /// Rebuilds every catalog-keyed record list in catalog order, carrying
    /// over values for known item names, dropping unknown ones and clamping
    /// costs non-negative. Custom rows are kept as-is.
    pub fn normalize(&mut self) {
        let seeded = Self::new();

        self.clothing.items = merge_sized(&seeded.clothing.items, &self.clothing.items);
        self.boots.slots = merge_boots(&seeded.boots.slots, &self.boots.slots);

        for id in [
            SectionId::OtherGear,
            SectionId::Tools,
            SectionId::Food,
            SectionId::FieldGear,
            SectionId::PersonalHygiene,
            SectionId::GeneralHygiene,
            SectionId::Medicine,
            SectionId::AnimalRescue,
        ] {
            let fresh = QuantitySection::seeded(catalog::section(id).catalog).items;
            let section = self
                .quantity_section_mut(id)
                .expect("id list contains only quantity sections");
            section.items = merge_quantities(&fresh, &section.items);
        }

        let fresh = CostSection::seeded(catalog::section(SectionId::Parts).catalog).items;
        self.parts.items = merge_costs(&fresh, &self.parts.items);
        for row in &mut self.parts.custom {
            row.cost = clamp_cost(row.cost);
        }
    }

    /// Borrow a quantity-shaped section by id.
    #[must_use]
    pub fn quantity_section(&self, id: SectionId) -> Option<&QuantitySection> {
        match id {
            SectionId::OtherGear => Some(&self.other_gear),
            SectionId::Tools => Some(&self.tools),
            SectionId::Food => Some(&self.food),
            SectionId::FieldGear => Some(&self.field_gear),
            SectionId::PersonalHygiene => Some(&self.personal_hygiene),
            SectionId::GeneralHygiene => Some(&self.general_hygiene),
            SectionId::Medicine => Some(&self.medicine),
            SectionId::AnimalRescue => Some(&self.animal_rescue),
            _ => None,
        }
    }

    /// Mutably borrow a quantity-shaped section by id.
    #[must_use]
    pub fn quantity_section_mut(&mut self, id: SectionId) -> Option<&mut QuantitySection> {
        match id {
            SectionId::OtherGear => Some(&mut self.other_gear),
            SectionId::Tools => Some(&mut self.tools),
            SectionId::Food => Some(&mut self.food),
            SectionId::FieldGear => Some(&mut self.field_gear),
            SectionId::PersonalHygiene => Some(&mut self.personal_hygiene),
            SectionId::GeneralHygiene => Some(&mut self.general_hygiene),
            SectionId::Medicine => Some(&mut self.medicine),
            SectionId::AnimalRescue => Some(&mut self.animal_rescue),
            _ => None,
        }
    }
}

fn merge_quantities(fresh: &[QuantityEntry], old: &[QuantityEntry]) -> Vec<QuantityEntry> {
    fresh
        .iter()
        .map(|entry| {
            old.iter()
                .find(|o| o.name == entry.name)
                .cloned()
                .unwrap_or_else(|| entry.clone())
        })
        .collect()
}

fn merge_costs(fresh: &[CostEntry], old: &[CostEntry]) -> Vec<CostEntry> {
    fresh
        .iter()
        .map(|entry| {
            old.iter().find(|o| o.name == entry.name).map_or_else(
                || entry.clone(),
                |found| CostEntry {
                    name: found.name.clone(),
                    cost: clamp_cost(found.cost),
                    notes: found.notes.clone(),
                },
            )
        })
        .collect()
}

fn merge_sized(fresh: &[SizedEntry], old: &[SizedEntry]) -> Vec<SizedEntry> {
    fresh
        .iter()
        .map(|entry| {
            let Some(found) = old.iter().find(|o| o.name == entry.name) else {
                return entry.clone();
            };
            SizedEntry {
                name: entry.name.clone(),
                sizes: entry
                    .sizes
                    .iter()
                    .map(|slot| SizeCount {
                        size: slot.size.clone(),
                        quantity: found
                            .sizes
                            .iter()
                            .find(|s| s.size == slot.size)
                            .map_or(0, |s| s.quantity),
                    })
                    .collect(),
                notes: found.notes.clone(),
            }
        })
        .collect()
}

fn merge_boots(fresh: &[BootSlot], old: &[BootSlot]) -> Vec<BootSlot> {
    fresh
        .iter()
        .map(|slot| BootSlot {
            size: slot.size,
            quantity: old
                .iter()
                .find(|o| o.size == slot.size)
                .map_or(0, |o| o.quantity),
        })
        .collect()
}
