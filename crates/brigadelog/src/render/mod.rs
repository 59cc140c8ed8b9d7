//! Printable document generation.
//!
//! Renders the full draft into a paginated plain-text document: a header
//! band with the title and date, the brigade identity fields, one numbered
//! table per non-empty catalog section and a footer disclaimer on every
//! page. Rendering is a pure function of the draft: it never mutates it,
//! needs no network, and may run any number of times, including before
//! anything was submitted.

mod document;
mod tables;

use chrono::NaiveDate;

use crate::catalog::SECTIONS;
use crate::draft::Draft;

pub use document::{
    sanitize_filename, suggested_filename, Document, Page, RenderOptions, FILENAME_PLACEHOLDER,
    FILENAME_PREFIX, FOOTER,
};

use document::PageBuilder;

/// Document title shown in the header band.
const TITLE: &str = "BRIGADE SUPPLY NEEDS";

/// Placeholder for identity fields the user left blank.
const NOT_SPECIFIED: &str = "not specified";

/// Render the draft into a paginated document.
#[must_use]
pub fn render(draft: &Draft, date: NaiveDate, options: &RenderOptions) -> Document {
    let mut builder = PageBuilder::new(options);
    let width = builder.width();

    // Header band.
    builder.push_line("=".repeat(width));
    builder.push_line(center(TITLE, width));
    builder.push_line(center(&date.format("%Y-%m-%d").to_string(), width));
    builder.push_line("=".repeat(width));
    builder.push_spacer();

    // Identity block; blank fields keep their row with a placeholder.
    let profile = &draft.profile;
    for (label, value) in [
        ("Brigade", profile.name.as_str()),
        ("Active members", profile.member_count.as_str()),
        ("Commander", profile.commander_name.as_str()),
        ("Commander phone", profile.commander_phone.as_str()),
        ("Logistics contact", profile.logistics_name.as_str()),
        ("Logistics phone", profile.logistics_phone.as_str()),
        ("Emergency numbers", profile.emergency_numbers.as_str()),
    ] {
        builder.push_line(identity_line(label, value, width));
    }

    // Numbered tables, skipping sections with nothing to show.
    let mut number = 0;
    for section in SECTIONS {
        if let Some(table) = tables::section_table(draft, section, number + 1, width) {
            number += 1;
            table.render_into(&mut builder);
        }
    }

    builder.finish()
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{text}", " ".repeat(pad))
}

fn identity_line(label: &str, value: &str, width: usize) -> String {
    let shown = if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value.trim()
    };
    document::truncate(&format!("{label:<20}{shown}"), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SectionId;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn all_lines(doc: &Document) -> Vec<String> {
        doc.pages()
            .iter()
            .flat_map(|p| p.lines().to_vec())
            .collect()
    }

    #[test]
    fn test_empty_draft_renders_header_only() {
        let draft = Draft::new();
        let doc = render(&draft, test_date(), &RenderOptions::default());

        assert_eq!(doc.pages().len(), 1);
        let lines = all_lines(&doc);
        assert!(lines.iter().any(|l| l.contains(TITLE)));
        assert!(lines.iter().any(|l| l.contains("2026-03-14")));
        // Identity fields appear with placeholders, no tables follow.
        let placeholders = lines
            .iter()
            .filter(|l| l.contains(NOT_SPECIFIED))
            .count();
        assert_eq!(placeholders, 7);
        assert!(!lines.iter().any(|l| l.contains("1.")));
    }

    #[test]
    fn test_identity_fields_rendered() {
        let mut draft = Draft::new();
        draft.profile.name = "Brigada Test".to_string();
        draft.profile.commander_name = "Juan Perez".to_string();

        let doc = render(&draft, test_date(), &RenderOptions::default());
        let lines = all_lines(&doc);
        assert!(lines.iter().any(|l| l.contains("Brigada Test")));
        assert!(lines.iter().any(|l| l.contains("Juan Perez")));
    }

    #[test]
    fn test_sections_numbered_sequentially() {
        let mut draft = Draft::new();
        draft.tools.set_quantity("Chainsaw", 1);
        draft.medicine.set_quantity("First aid kit", 2);

        let doc = render(&draft, test_date(), &RenderOptions::default());
        let lines = all_lines(&doc);

        // Clothing and boots are empty, so tools comes first.
        assert!(lines.iter().any(|l| l.starts_with("1. Tools")));
        assert!(lines.iter().any(|l| l.starts_with("2. Medicine")));
    }

    #[test]
    fn test_render_does_not_mutate_draft() {
        let mut draft = Draft::new();
        draft.profile.name = "Brigada Test".to_string();
        draft.gloves.medium = 2;
        let before = draft.clone();

        let _ = render(&draft, test_date(), &RenderOptions::default());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut draft = Draft::new();
        draft.tools.set_quantity("Chainsaw", 1);

        let first = render(&draft, test_date(), &RenderOptions::default());
        let second = render(&draft, test_date(), &RenderOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_footer_on_every_page_of_long_document() {
        let mut draft = Draft::new();
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
            let names: Vec<String> = crate::catalog::section(id)
                .catalog
                .iter()
                .map(|n| (*n).to_string())
                .collect();
            let section = draft.quantity_section_mut(id).unwrap();
            for name in names {
                section.set_quantity(&name, 1);
            }
        }

        let options = RenderOptions {
            page_height: 24,
            page_width: 80,
        };
        let doc = render(&draft, test_date(), &options);
        assert!(doc.pages().len() > 1);
        for page in doc.pages() {
            assert_eq!(page.lines().len(), 24);
            assert!(page.lines().last().unwrap().contains("resupply"));
        }
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab");
        assert_eq!(center("toolong", 4), "toolong");
    }
}
