//! Field validation for wizard sections.
//!
//! Validation is a pure function of `(section, draft)`. Only the rules for
//! the given section's required fields run, so every section without
//! required fields validates clean regardless of draft content.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Field, SectionId};
use crate::draft::Draft;

/// Error message for a blank required field.
pub const MSG_REQUIRED: &str = "required";

/// Error message for a member count below one.
pub const MSG_MIN_MEMBERS: &str = "must have at least one";

/// Error message for a phone number that does not strip to 8 digits.
pub const MSG_PHONE: &str = "must be 8 digits";

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The failing field.
    pub field: Field,
    /// The message to show next to it.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    #[must_use]
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Strip every non-digit character from a raw phone entry.
#[must_use]
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validate one section of the draft.
///
/// Returns the field errors in rule order; an empty list means the section
/// may be left.
#[must_use]
pub fn validate(section: SectionId, draft: &Draft) -> Vec<FieldError> {
    let descriptor = catalog::section(section);
    let mut errors = Vec::new();

    for field in descriptor.required_fields {
        let value = profile_value(draft, *field);
        if value.trim().is_empty() {
            errors.push(FieldError::new(*field, MSG_REQUIRED));
            continue;
        }
        match field {
            Field::MemberCount => {
                let parsed = value.trim().parse::<i64>().unwrap_or(0);
                if parsed < 1 {
                    errors.push(FieldError::new(*field, MSG_MIN_MEMBERS));
                }
            }
            Field::CommanderPhone | Field::LogisticsPhone => {
                if strip_non_digits(value).len() != 8 {
                    errors.push(FieldError::new(*field, MSG_PHONE));
                }
            }
            _ => {}
        }
    }

    // The logistics phone is never mandatory, but its format is still
    // checked whenever the user entered one.
    if section == SectionId::Info
        && !descriptor.required_fields.contains(&Field::LogisticsPhone)
    {
        let value = &draft.profile.logistics_phone;
        if !value.trim().is_empty() && strip_non_digits(value).len() != 8 {
            errors.push(FieldError::new(Field::LogisticsPhone, MSG_PHONE));
        }
    }

    errors
}

/// Convenience wrapper: true when the section has no field errors.
#[must_use]
pub fn is_valid(section: SectionId, draft: &Draft) -> bool {
    validate(section, draft).is_empty()
}

fn profile_value(draft: &Draft, field: Field) -> &str {
    match field {
        Field::BrigadeName => &draft.profile.name,
        Field::MemberCount => &draft.profile.member_count,
        Field::CommanderName => &draft.profile.commander_name,
        Field::CommanderPhone => &draft.profile.commander_phone,
        Field::LogisticsName => &draft.profile.logistics_name,
        Field::LogisticsPhone => &draft.profile.logistics_phone,
        Field::EmergencyNumbers => &draft.profile.emergency_numbers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SECTIONS;

    fn valid_info_draft() -> Draft {
        let mut draft = Draft::new();
        draft.profile.name = "Brigada Test".to_string();
        draft.profile.member_count = "5".to_string();
        draft.profile.commander_name = "Juan Perez".to_string();
        draft.profile.commander_phone = "987-654-32".to_string();
        draft
    }

    #[test]
    fn test_valid_info_draft_passes() {
        let draft = valid_info_draft();
        let errors = validate(SectionId::Info, &draft);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert!(is_valid(SectionId::Info, &draft));
    }

    #[test]
    fn test_strip_non_digits() {
        assert_eq!(strip_non_digits("987-654-32"), "98765432");
        assert_eq!(strip_non_digits("+56 9 8765 432"), "98765432");
        assert_eq!(strip_non_digits("no digits"), "");
    }

    #[test]
    fn test_blank_required_fields() {
        let draft = Draft::new();
        let errors = validate(SectionId::Info, &draft);

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::BrigadeName,
                Field::MemberCount,
                Field::CommanderName,
                Field::CommanderPhone,
            ]
        );
        for error in &errors {
            assert_eq!(error.message, MSG_REQUIRED);
        }
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let mut draft = valid_info_draft();
        draft.profile.commander_name = "   ".to_string();
        let errors = validate(SectionId::Info, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::CommanderName);
        assert_eq!(errors[0].message, MSG_REQUIRED);
    }

    #[test]
    fn test_member_count_below_one() {
        let mut draft = valid_info_draft();
        draft.profile.member_count = "0".to_string();
        let errors = validate(SectionId::Info, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, MSG_MIN_MEMBERS);
    }

    #[test]
    fn test_member_count_unparseable() {
        let mut draft = valid_info_draft();
        draft.profile.member_count = "many".to_string();
        let errors = validate(SectionId::Info, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::MemberCount);
        assert_eq!(errors[0].message, MSG_MIN_MEMBERS);
    }

    #[test]
    fn test_commander_phone_too_short() {
        let mut draft = valid_info_draft();
        draft.profile.commander_phone = "987-65".to_string();
        let errors = validate(SectionId::Info, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::CommanderPhone);
        assert_eq!(errors[0].message, MSG_PHONE);
    }

    #[test]
    fn test_commander_phone_strips_separators() {
        // "987-654-32" strips to 8 digits and passes.
        let draft = valid_info_draft();
        assert!(is_valid(SectionId::Info, &draft));
    }

    #[test]
    fn test_logistics_phone_optional() {
        let draft = valid_info_draft();
        assert!(draft.profile.logistics_phone.is_empty());
        assert!(is_valid(SectionId::Info, &draft));
    }

    #[test]
    fn test_logistics_phone_format_checked_when_present() {
        let mut draft = valid_info_draft();
        draft.profile.logistics_phone = "123".to_string();
        let errors = validate(SectionId::Info, &draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::LogisticsPhone);
        assert_eq!(errors[0].message, MSG_PHONE);

        draft.profile.logistics_phone = "11 22 33 44".to_string();
        assert!(is_valid(SectionId::Info, &draft));
    }

    #[test]
    fn test_catalog_sections_always_valid() {
        // Even a loud draft passes sections without required fields.
        let mut draft = Draft::new();
        draft.tools.set_quantity("Chainsaw", 999);
        let index = draft.tools.add_custom();
        draft.tools.update_custom(index, |row| row.name = "Rope".to_string());

        for s in SECTIONS {
            if s.id == SectionId::Info {
                continue;
            }
            assert!(is_valid(s.id, &draft), "section {} should be valid", s.id);
        }
    }

    #[test]
    fn test_field_error_display() {
        let error = FieldError::new(Field::CommanderPhone, MSG_PHONE);
        assert_eq!(error.to_string(), "commander phone: must be 8 digits");
    }
}
