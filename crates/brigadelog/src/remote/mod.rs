//! Remote service integration.
//!
//! This module defines the interface to the brigade logistics backend:
//!
//! - [`RemoteApi`]: the async trait the rest of the crate talks to.
//! - [`client::ApiClient`]: the HTTP implementation over reqwest.
//! - [`gateway`]: the translation layer from draft sub-records to remote
//!   write calls, with the skip-empty filtering.
//!
//! The response shape of profile creation is not guaranteed consistent, so
//! the created id is located through an ordered list of extraction
//! strategies; see [`extract_brigade_id`].

pub mod client;
pub mod gateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::session::UserProfile;

pub use client::ApiClient;
pub use gateway::PersistReport;

/// Server-assigned identifier of one brigade profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrigadeId(String);

impl BrigadeId {
    /// Wrap a raw id value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BrigadeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key paths tried, in order, when locating the created brigade id.
///
/// The true response contract of the service is not pinned down anywhere,
/// so the first strategy that yields a value wins.
const ID_KEY_PATHS: &[&[&str]] = &[
    &["id"],
    &["brigade_id"],
    &["brigadeId"],
    &["data", "id"],
];

/// Locate the brigade id in a profile-creation response.
///
/// Accepts string and integer id values. Returns `None` when no candidate
/// key path holds one; callers turn that into a loud
/// [`crate::Error::MissingBrigadeId`] carrying the raw payload.
#[must_use]
pub fn extract_brigade_id(payload: &Value) -> Option<BrigadeId> {
    for path in ID_KEY_PATHS {
        let mut node = payload;
        for key in *path {
            match node.get(key) {
                Some(next) => node = next,
                None => {
                    node = &Value::Null;
                    break;
                }
            }
        }
        match node {
            Value::String(s) if !s.is_empty() => return Some(BrigadeId::new(s.clone())),
            Value::Number(n) => return Some(BrigadeId::new(n.to_string())),
            _ => {}
        }
    }
    None
}

/// Profile payload for brigade create/update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrigadeRequest {
    /// Brigade name.
    pub name: String,
    /// Number of active members.
    pub member_count: u32,
    /// Commander name.
    pub commander_name: String,
    /// Commander phone, as 8 digits.
    pub commander_phone: String,
    /// Logistics contact name, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_name: Option<String>,
    /// Logistics contact phone, as 8 digits, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_phone: Option<String>,
    /// Free-text emergency numbers, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_numbers: Option<String>,
}

/// One clothing upsert: a garment in one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingRequest {
    /// Garment name (catalog name, or the user-entered custom name).
    pub garment: String,
    /// Size label; absent for custom rows, which carry no size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Quantity needed.
    pub quantity: u32,
    /// Free-text notes.
    pub notes: String,
}

/// One boots upsert: a size slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootRequest {
    /// Numeric size, or the free-text description of the "other" slot.
    pub size: String,
    /// Quantity needed.
    pub quantity: u32,
}

/// The single gloves upsert carrying all size buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GloveRequest {
    /// Quantity in size S.
    pub small: u32,
    /// Quantity in size M.
    pub medium: u32,
    /// Quantity in size L.
    pub large: u32,
    /// Quantity in size XL.
    pub extra_large: u32,
    /// Free-text description of any other size requirement.
    pub other: String,
    /// Free-text notes.
    pub notes: String,
}

/// One simple-item add: `{name, quantity, notes}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRequest {
    /// Item name.
    pub name: String,
    /// Quantity needed.
    pub quantity: u32,
    /// Free-text notes.
    pub notes: String,
}

/// One cost-item add: `{name, cost, notes}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRequest {
    /// Item name.
    pub name: String,
    /// Estimated cost.
    pub cost: f64,
    /// Free-text notes.
    pub notes: String,
}

/// Remote endpoint category for simple-item sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplyCategory {
    /// Other protective gear.
    OtherGear,
    /// Tools.
    Tools,
    /// Food and water.
    Food,
    /// Field gear.
    FieldGear,
    /// Personal hygiene.
    PersonalHygiene,
    /// General hygiene.
    GeneralHygiene,
    /// Medicine.
    Medicine,
    /// Animal rescue.
    AnimalRescue,
}

impl SupplyCategory {
    /// Endpoint path segment for this category.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::OtherGear => "other-equipment",
            Self::Tools => "tools",
            Self::Food => "food",
            Self::FieldGear => "field-gear",
            Self::PersonalHygiene => "personal-hygiene",
            Self::GeneralHygiene => "general-hygiene",
            Self::Medicine => "medicine",
            Self::AnimalRescue => "animal-rescue",
        }
    }

    /// Map a quantity-shaped section to its endpoint category.
    #[must_use]
    pub fn for_section(id: crate::catalog::SectionId) -> Option<Self> {
        use crate::catalog::SectionId;
        match id {
            SectionId::OtherGear => Some(Self::OtherGear),
            SectionId::Tools => Some(Self::Tools),
            SectionId::Food => Some(Self::Food),
            SectionId::FieldGear => Some(Self::FieldGear),
            SectionId::PersonalHygiene => Some(Self::PersonalHygiene),
            SectionId::GeneralHygiene => Some(Self::GeneralHygiene),
            SectionId::Medicine => Some(Self::Medicine),
            SectionId::AnimalRescue => Some(Self::AnimalRescue),
            _ => None,
        }
    }
}

/// Summary of one brigade as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrigadeSummary {
    /// Server-assigned id.
    pub id: BrigadeId,
    /// Brigade name.
    pub name: String,
    /// Commander name, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander_name: Option<String>,
}

/// The interface to the brigade logistics service.
///
/// `ApiClient` is the production implementation; tests substitute an
/// in-memory recorder so the gateway and wizard can be exercised without a
/// network.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Authenticate and obtain a bearer token plus the user record.
    async fn login(&self, username: &str, password: &str) -> Result<(String, UserProfile)>;

    /// Create a brigade profile; returns the raw response payload.
    async fn create_brigade(&self, profile: &BrigadeRequest) -> Result<Value>;

    /// Update an existing brigade profile.
    async fn update_brigade(&self, id: &BrigadeId, profile: &BrigadeRequest) -> Result<()>;

    /// Upsert one clothing row.
    async fn add_clothing(&self, id: &BrigadeId, item: &ClothingRequest) -> Result<()>;

    /// Upsert one boots size slot.
    async fn add_boots(&self, id: &BrigadeId, item: &BootRequest) -> Result<()>;

    /// Set the gloves record in one call.
    async fn set_gloves(&self, id: &BrigadeId, item: &GloveRequest) -> Result<()>;

    /// Add one simple item in the given category.
    async fn add_supply(
        &self,
        id: &BrigadeId,
        category: SupplyCategory,
        item: &SupplyRequest,
    ) -> Result<()>;

    /// Add one cost item (vehicle parts and logistics).
    async fn add_part(&self, id: &BrigadeId, item: &PartRequest) -> Result<()>;

    /// List the brigades known to the service.
    async fn list_brigades(&self) -> Result<Vec<BrigadeSummary>>;

    /// Download the server-rendered summary for one brigade.
    async fn fetch_summary(&self, id: &BrigadeId) -> Result<Vec<u8>>;
}
