//! Translation from draft sub-records to remote write calls.
//!
//! Each section maps to one persistence strategy picked by its registered
//! shape. Payload building is pure and separately testable; the async
//! steps only fan the built payloads out. Items that are entirely empty
//! (zero quantity or cost, blank notes) are skipped so the service is not
//! flooded with no-op records.
//!
//! Within one section the calls are independent rows, so they are issued
//! concurrently and joined; a failure anywhere aborts the join and
//! surfaces the first error. A partial failure can leave some rows
//! persisted; re-submission upserts by item key, so the retry converges.

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::catalog::{self, SectionId, SectionShape};
use crate::draft::{
    BootSection, CostSection, Draft, GloveSection, ProfileDraft, QuantitySection, SizedSection,
};
use crate::error::{Error, Result};
use crate::validate::strip_non_digits;

use super::{
    extract_brigade_id, BootRequest, BrigadeId, BrigadeRequest, ClothingRequest, GloveRequest,
    PartRequest, RemoteApi, SupplyCategory, SupplyRequest,
};

/// Outcome of one section's persistence sub-step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport {
    /// The persisted section.
    pub section: SectionId,
    /// Number of remote calls issued.
    pub calls: usize,
}

/// The skip-empty rule: an item is persisted iff it records a quantity, a
/// cost, or non-blank notes.
#[must_use]
pub fn should_persist(quantity: u32, cost: f64, notes: &str) -> bool {
    quantity > 0 || cost > 0.0 || !notes.trim().is_empty()
}

/// Build the profile payload from the raw identity fields.
///
/// Assumes the info section validated clean: the member count parses and
/// the phones strip to 8 digits. Optional contact fields collapse to
/// `None` when blank.
#[must_use]
pub fn profile_request(profile: &ProfileDraft) -> BrigadeRequest {
    let optional = |raw: &str| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    BrigadeRequest {
        name: profile.name.trim().to_string(),
        member_count: crate::draft::coerce_quantity(&profile.member_count),
        commander_name: profile.commander_name.trim().to_string(),
        commander_phone: strip_non_digits(&profile.commander_phone),
        logistics_name: optional(&profile.logistics_name),
        logistics_phone: optional(&profile.logistics_phone).map(|p| strip_non_digits(&p)),
        emergency_numbers: optional(&profile.emergency_numbers),
    }
}

/// Build the clothing upserts: one per garment and size with quantity > 0,
/// plus one per real custom row, keyed by its user-entered name.
#[must_use]
pub fn clothing_requests(section: &SizedSection) -> Vec<ClothingRequest> {
    let mut requests = Vec::new();
    for entry in &section.items {
        for slot in &entry.sizes {
            if slot.quantity > 0 {
                requests.push(ClothingRequest {
                    garment: entry.name.clone(),
                    size: Some(slot.size.clone()),
                    quantity: slot.quantity,
                    notes: entry.notes.clone(),
                });
            }
        }
    }
    for row in section.real_custom() {
        if should_persist(row.quantity, 0.0, &row.notes) {
            requests.push(ClothingRequest {
                garment: row.name.trim().to_string(),
                size: None,
                quantity: row.quantity,
                notes: row.notes.clone(),
            });
        }
    }
    requests
}

/// Build the boots upserts: one per numeric size with quantity > 0; the
/// "other size" slot is sent only when its description is non-blank, and
/// then its quantity may be 0.
#[must_use]
pub fn boot_requests(section: &BootSection) -> Vec<BootRequest> {
    let mut requests: Vec<BootRequest> = section
        .slots
        .iter()
        .filter(|slot| slot.quantity > 0)
        .map(|slot| BootRequest {
            size: slot.size.to_string(),
            quantity: slot.quantity,
        })
        .collect();

    if !section.other_label.trim().is_empty() {
        requests.push(BootRequest {
            size: section.other_label.trim().to_string(),
            quantity: section.other_quantity,
        });
    }
    requests
}

/// Build the single gloves payload, or `None` when the whole record is
/// empty and the call should be skipped entirely.
#[must_use]
pub fn glove_request(section: &GloveSection) -> Option<GloveRequest> {
    if section.is_empty() {
        return None;
    }
    Some(GloveRequest {
        small: section.small,
        medium: section.medium,
        large: section.large,
        extra_large: section.extra_large,
        other: section.other_label.trim().to_string(),
        notes: section.notes.clone(),
    })
}

/// Build the simple-item adds for a quantity section.
#[must_use]
pub fn supply_requests(section: &QuantitySection) -> Vec<SupplyRequest> {
    let mut requests: Vec<SupplyRequest> = section
        .items
        .iter()
        .filter(|entry| should_persist(entry.quantity, 0.0, &entry.notes))
        .map(|entry| SupplyRequest {
            name: entry.name.clone(),
            quantity: entry.quantity,
            notes: entry.notes.clone(),
        })
        .collect();

    for row in section.real_custom() {
        if should_persist(row.quantity, 0.0, &row.notes) {
            requests.push(SupplyRequest {
                name: row.name.trim().to_string(),
                quantity: row.quantity,
                notes: row.notes.clone(),
            });
        }
    }
    requests
}

/// Build the cost-item adds for the parts section.
#[must_use]
pub fn part_requests(section: &CostSection) -> Vec<PartRequest> {
    let mut requests: Vec<PartRequest> = section
        .items
        .iter()
        .filter(|entry| should_persist(0, entry.cost, &entry.notes))
        .map(|entry| PartRequest {
            name: entry.name.clone(),
            cost: entry.cost,
            notes: entry.notes.clone(),
        })
        .collect();

    for row in section.real_custom() {
        if should_persist(0, row.cost, &row.notes) {
            requests.push(PartRequest {
                name: row.name.trim().to_string(),
                cost: row.cost,
                notes: row.notes.clone(),
            });
        }
    }
    requests
}

/// Create the brigade profile and extract the assigned id.
///
/// # Errors
///
/// Returns [`Error::MissingBrigadeId`] with the raw payload when the
/// response carries no id under any known key, and any transport or
/// service error otherwise.
pub async fn create_profile(api: &dyn RemoteApi, draft: &Draft) -> Result<BrigadeId> {
    let request = profile_request(&draft.profile);
    let payload = api.create_brigade(&request).await?;
    match extract_brigade_id(&payload) {
        Some(id) => {
            info!("Created brigade profile with id {id}");
            Ok(id)
        }
        None => Err(Error::MissingBrigadeId { payload }),
    }
}

/// Run one section's persistence sub-step against an existing brigade.
///
/// All calls of the sub-step are issued concurrently and awaited to
/// completion; their relative completion order carries no meaning.
///
/// # Errors
///
/// Returns the first error of the sub-step; the remaining calls may or may
/// not have persisted their rows.
pub async fn submit_section(
    api: &dyn RemoteApi,
    id: &BrigadeId,
    section: SectionId,
    draft: &Draft,
) -> Result<PersistReport> {
    let calls = match catalog::section(section).shape {
        SectionShape::Profile => {
            api.update_brigade(id, &profile_request(&draft.profile)).await?;
            1
        }
        SectionShape::SizedItems => {
            let requests = clothing_requests(&draft.clothing);
            let count = requests.len();
            try_join_all(requests.iter().map(|r| api.add_clothing(id, r))).await?;
            count
        }
        SectionShape::FixedSizeSlots => {
            let requests = boot_requests(&draft.boots);
            let count = requests.len();
            try_join_all(requests.iter().map(|r| api.add_boots(id, r))).await?;
            count
        }
        SectionShape::SizeBuckets => match glove_request(&draft.gloves) {
            Some(request) => {
                api.set_gloves(id, &request).await?;
                1
            }
            None => 0,
        },
        SectionShape::QuantityItems => {
            let category = SupplyCategory::for_section(section)
                .ok_or_else(|| Error::internal(format!("no supply category for {section}")))?;
            let quantities = draft
                .quantity_section(section)
                .ok_or_else(|| Error::internal(format!("no quantity section for {section}")))?;
            let requests = supply_requests(quantities);
            let count = requests.len();
            try_join_all(requests.iter().map(|r| api.add_supply(id, category, r))).await?;
            count
        }
        SectionShape::CostItems => {
            let requests = part_requests(&draft.parts);
            let count = requests.len();
            try_join_all(requests.iter().map(|r| api.add_part(id, r))).await?;
            count
        }
    };

    debug!("Section {section} persisted with {calls} call(s)");
    Ok(PersistReport { section, calls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::{RecordedCall, RecordingApi};

    fn draft_with_profile() -> Draft {
        let mut draft = Draft::new();
        draft.profile.name = "Brigada Test".to_string();
        draft.profile.member_count = "5".to_string();
        draft.profile.commander_name = "Juan Perez".to_string();
        draft.profile.commander_phone = "987-654-32".to_string();
        draft
    }

    #[test]
    fn test_should_persist_property() {
        assert!(!should_persist(0, 0.0, ""));
        assert!(!should_persist(0, 0.0, "   "));
        assert!(should_persist(1, 0.0, ""));
        assert!(should_persist(0, 0.5, ""));
        assert!(should_persist(0, 0.0, "urgent"));
    }

    #[test]
    fn test_skip_empty_filter_is_idempotent() {
        let mut draft = Draft::new();
        draft.tools.set_quantity("Chainsaw", 2);
        draft.tools.set_notes("Machete", "replace handles");

        let first = supply_requests(&draft.tools);
        let second = supply_requests(&draft.tools);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_profile_request_strips_and_parses() {
        let draft = draft_with_profile();
        let request = profile_request(&draft.profile);

        assert_eq!(request.name, "Brigada Test");
        assert_eq!(request.member_count, 5);
        assert_eq!(request.commander_phone, "98765432");
        assert!(request.logistics_name.is_none());
        assert!(request.logistics_phone.is_none());
        assert!(request.emergency_numbers.is_none());
    }

    #[test]
    fn test_profile_request_keeps_optional_contacts() {
        let mut draft = draft_with_profile();
        draft.profile.logistics_name = " Maria Soto ".to_string();
        draft.profile.logistics_phone = "11-22-33-44".to_string();

        let request = profile_request(&draft.profile);
        assert_eq!(request.logistics_name.as_deref(), Some("Maria Soto"));
        assert_eq!(request.logistics_phone.as_deref(), Some("11223344"));
    }

    #[test]
    fn test_clothing_requests_per_size() {
        let mut draft = Draft::new();
        draft
            .clothing
            .set_size_quantity("Fire-resistant jacket", "M", 4);
        draft
            .clothing
            .set_size_quantity("Fire-resistant jacket", "L", 2);
        draft.clothing.set_notes("Fire-resistant jacket", "worn out");

        let requests = clothing_requests(&draft.clothing);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].garment, "Fire-resistant jacket");
        assert_eq!(requests[0].size.as_deref(), Some("M"));
        assert_eq!(requests[0].quantity, 4);
        assert_eq!(requests[0].notes, "worn out");
        assert_eq!(requests[1].size.as_deref(), Some("L"));
    }

    #[test]
    fn test_clothing_requests_include_custom_rows() {
        let mut draft = Draft::new();
        let index = draft.clothing.add_custom();
        draft.clothing.update_custom(index, |row| {
            row.name = "Rain poncho".to_string();
            row.quantity = 6;
        });
        // A blank custom row stays invisible.
        draft.clothing.add_custom();

        let requests = clothing_requests(&draft.clothing);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].garment, "Rain poncho");
        assert!(requests[0].size.is_none());
    }

    #[test]
    fn test_boot_requests_sizes_and_other_slot() {
        let mut draft = Draft::new();
        draft.boots.set_quantity(41, 3);
        draft.boots.set_quantity(43, 1);

        let requests = boot_requests(&draft.boots);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].size, "41");
        assert_eq!(requests[0].quantity, 3);

        // The other slot joins only once it has a description, and may
        // carry quantity 0.
        draft.boots.other_label = "size 47, wide fit".to_string();
        let requests = boot_requests(&draft.boots);
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].size, "size 47, wide fit");
        assert_eq!(requests[2].quantity, 0);
    }

    #[test]
    fn test_glove_request_skipped_when_empty() {
        let draft = Draft::new();
        assert!(glove_request(&draft.gloves).is_none());
    }

    #[test]
    fn test_glove_request_single_payload() {
        let mut draft = Draft::new();
        draft.gloves.medium = 5;
        draft.gloves.other_label = " XXL pair ".to_string();

        let request = glove_request(&draft.gloves).unwrap();
        assert_eq!(request.medium, 5);
        assert_eq!(request.other, "XXL pair");
    }

    #[test]
    fn test_supply_requests_scenario_c() {
        // "Hammer" stays at zero with blank notes; only the custom row
        // "Rope" qualifies.
        let mut draft = Draft::new();
        let index = draft.tools.add_custom();
        draft.tools.update_custom(index, |row| {
            row.name = "Rope".to_string();
            row.quantity = 3;
        });

        let requests = supply_requests(&draft.tools);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "Rope");
        assert_eq!(requests[0].quantity, 3);
        assert_eq!(requests[0].notes, "");
    }

    #[test]
    fn test_supply_requests_notes_only_item_qualifies() {
        let mut draft = Draft::new();
        draft.food.set_notes("Canned rations", "prefer low sodium");

        let requests = supply_requests(&draft.food);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].quantity, 0);
        assert_eq!(requests[0].notes, "prefer low sodium");
    }

    #[test]
    fn test_part_requests_threshold_is_cost() {
        let mut draft = Draft::new();
        draft.parts.set_cost("Fuel", 120.0);
        let index = draft.parts.add_custom();
        draft.parts.update_custom(index, |row| {
            row.name = "Winch cable".to_string();
            row.cost = 45.5;
        });

        let requests = part_requests(&draft.parts);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name, "Fuel");
        assert!((requests[0].cost - 120.0).abs() < f64::EPSILON);
        assert_eq!(requests[1].name, "Winch cable");
    }

    #[tokio::test]
    async fn test_create_profile_extracts_id() {
        let api = RecordingApi::new();
        let draft = draft_with_profile();

        let id = create_profile(&api, &draft).await.unwrap();
        assert_eq!(id, BrigadeId::new("BRG-1"));

        let calls = api.recorded();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], RecordedCall::CreateBrigade(_)));
    }

    #[tokio::test]
    async fn test_create_profile_alternate_id_key() {
        let api =
            RecordingApi::with_create_response(serde_json::json!({"data": {"id": "BRG-77"}}));
        let draft = draft_with_profile();

        let id = create_profile(&api, &draft).await.unwrap();
        assert_eq!(id, BrigadeId::new("BRG-77"));
    }

    #[tokio::test]
    async fn test_create_profile_missing_id_is_loud() {
        let api = RecordingApi::with_create_response(serde_json::json!({"status": "created"}));
        let draft = draft_with_profile();

        let err = create_profile(&api, &draft).await.unwrap_err();
        assert!(err.is_missing_id());
        assert!(err.to_string().contains("created"));
    }

    #[tokio::test]
    async fn test_submit_section_tools() {
        let api = RecordingApi::new();
        let mut draft = Draft::new();
        draft.tools.set_quantity("Chainsaw", 2);
        let index = draft.tools.add_custom();
        draft.tools.update_custom(index, |row| {
            row.name = "Rope".to_string();
            row.quantity = 3;
        });

        let id = BrigadeId::new("BRG-1");
        let report = submit_section(&api, &id, SectionId::Tools, &draft)
            .await
            .unwrap();
        assert_eq!(report.calls, 2);

        let supplies: Vec<(SupplyCategory, String)> = api
            .recorded()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Supply(category, item) => Some((category, item.name)),
                _ => None,
            })
            .collect();
        assert_eq!(
            supplies,
            vec![
                (SupplyCategory::Tools, "Chainsaw".to_string()),
                (SupplyCategory::Tools, "Rope".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_section_empty_issues_no_calls() {
        let api = RecordingApi::new();
        let draft = Draft::new();
        let id = BrigadeId::new("BRG-1");

        for section in [
            SectionId::Clothing,
            SectionId::Boots,
            SectionId::Gloves,
            SectionId::Tools,
            SectionId::Parts,
            SectionId::Medicine,
        ] {
            let report = submit_section(&api, &id, section, &draft).await.unwrap();
            assert_eq!(report.calls, 0, "section {section} issued calls");
        }
        assert!(api.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_submit_section_info_updates_profile() {
        let api = RecordingApi::new();
        let draft = draft_with_profile();
        let id = BrigadeId::new("BRG-1");

        let report = submit_section(&api, &id, SectionId::Info, &draft)
            .await
            .unwrap();
        assert_eq!(report.calls, 1);

        let calls = api.recorded();
        assert!(
            matches!(&calls[0], RecordedCall::UpdateBrigade(updated, _) if *updated == id)
        );
    }

    #[tokio::test]
    async fn test_submit_section_failure_surfaces() {
        let api = RecordingApi::new();
        api.fail_items();

        let mut draft = Draft::new();
        draft.medicine.set_quantity("First aid kit", 1);
        let id = BrigadeId::new("BRG-1");

        let err = submit_section(&api, &id, SectionId::Medicine, &draft)
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("injected failure"));
    }
}
