//! Tabular blocks for the generated document.
//!
//! Each catalog section renders as one table whose columns depend on the
//! section shape. Only rows with at least one non-zero or non-blank cell
//! are included; a section with no such rows is omitted entirely. Custom
//! rows append after the catalog rows with a "(custom)" suffix on their
//! name. Tables manage their own pagination: the header row is re-emitted
//! after every page break.

use crate::catalog::{Section, SectionShape};
use crate::draft::Draft;
use crate::remote::gateway::should_persist;

use super::document::{truncate, PageBuilder};

/// Suffix appended to user-added row names.
const CUSTOM_SUFFIX: &str = " (custom)";

/// One column of a table block.
#[derive(Debug, Clone)]
pub(crate) struct Column {
    label: &'static str,
    width: usize,
    right_align: bool,
}

impl Column {
    fn left(label: &'static str, width: usize) -> Self {
        Self {
            label,
            width,
            right_align: false,
        }
    }

    fn right(label: &'static str, width: usize) -> Self {
        Self {
            label,
            width,
            right_align: true,
        }
    }
}

/// A titled table with a header row and data rows.
#[derive(Debug, Clone)]
pub(crate) struct TableBlock {
    title: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl TableBlock {
    fn new(title: String, columns: Vec<Column>) -> Self {
        Self {
            title,
            columns,
            rows: Vec::new(),
        }
    }

    fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Emit the block, re-emitting the header after page breaks.
    pub(crate) fn render_into(&self, builder: &mut PageBuilder) {
        // Title, rule, header, separator and at least two data rows should
        // start together.
        builder.push_spacer();
        builder.ensure_room(6);

        builder.push_line(self.title.clone());
        builder.push_line("-".repeat(self.title.chars().count().min(builder.width())));
        self.emit_header(builder);

        for row in &self.rows {
            if builder.remaining() == 0 {
                builder.break_page();
                self.emit_header(builder);
            }
            builder.push_line(self.format_row(row));
        }
    }

    fn emit_header(&self, builder: &mut PageBuilder) {
        let labels: Vec<String> = self.columns.iter().map(|c| c.label.to_string()).collect();
        builder.push_line(self.format_row(&labels));
        let rule: Vec<String> = self
            .columns
            .iter()
            .map(|c| "-".repeat(c.width))
            .collect();
        builder.push_line(rule.join("  "));
    }

    fn format_row(&self, cells: &[String]) -> String {
        let formatted: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| {
                let text = truncate(cell, column.width);
                if column.right_align {
                    format!("{text:>width$}", width = column.width)
                } else {
                    format!("{text:<width$}", width = column.width)
                }
            })
            .collect();
        formatted.join("  ").trim_end().to_string()
    }
}

/// Build the table for one catalog section, or `None` when every row is
/// empty (the identity section renders separately and never tables).
pub(crate) fn section_table(
    draft: &Draft,
    section: &Section,
    number: usize,
    page_width: usize,
) -> Option<TableBlock> {
    let title = format!("{number}. {}", section.display_name);
    let table = match section.shape {
        SectionShape::Profile => return None,
        SectionShape::SizedItems => clothing_table(draft, title, page_width),
        SectionShape::FixedSizeSlots => boots_table(draft, title),
        SectionShape::SizeBuckets => gloves_table(draft, title),
        SectionShape::QuantityItems => quantity_table(draft, section, title, page_width),
        SectionShape::CostItems => cost_table(draft, title, page_width),
    };
    if table.is_empty() {
        None
    } else {
        Some(table)
    }
}

fn name_width(page_width: usize, fixed: usize) -> usize {
    page_width.saturating_sub(fixed).clamp(16, 40)
}

fn notes_width(page_width: usize, used: usize) -> usize {
    page_width.saturating_sub(used).max(16)
}

fn clothing_table(draft: &Draft, title: String, page_width: usize) -> TableBlock {
    let name = name_width(page_width, 8 + 10 + 6 + 16);
    let mut table = TableBlock::new(
        title,
        vec![
            Column::left("Garment", name),
            Column::left("Size", 8),
            Column::right("Quantity", 10),
            Column::left("Notes", notes_width(page_width, name + 8 + 10 + 6)),
        ],
    );

    for entry in &draft.clothing.items {
        for slot in &entry.sizes {
            if slot.quantity > 0 {
                table.add_row(vec![
                    entry.name.clone(),
                    slot.size.clone(),
                    slot.quantity.to_string(),
                    entry.notes.clone(),
                ]);
            }
        }
    }
    for row in draft.clothing.real_custom() {
        if should_persist(row.quantity, 0.0, &row.notes) {
            table.add_row(vec![
                format!("{}{CUSTOM_SUFFIX}", row.name.trim()),
                String::new(),
                row.quantity.to_string(),
                row.notes.clone(),
            ]);
        }
    }
    table
}

fn boots_table(draft: &Draft, title: String) -> TableBlock {
    let mut table = TableBlock::new(
        title,
        vec![Column::left("Size", 24), Column::right("Quantity", 10)],
    );

    for slot in &draft.boots.slots {
        if slot.quantity > 0 {
            table.add_row(vec![slot.size.to_string(), slot.quantity.to_string()]);
        }
    }
    if !draft.boots.other_label.trim().is_empty() {
        table.add_row(vec![
            draft.boots.other_label.trim().to_string(),
            draft.boots.other_quantity.to_string(),
        ]);
    }
    table
}

fn gloves_table(draft: &Draft, title: String) -> TableBlock {
    let mut table = TableBlock::new(
        title,
        vec![Column::left("Size", 24), Column::left("Quantity", 40)],
    );

    let gloves = &draft.gloves;
    for (label, quantity) in [
        ("S", gloves.small),
        ("M", gloves.medium),
        ("L", gloves.large),
        ("XL", gloves.extra_large),
    ] {
        if quantity > 0 {
            table.add_row(vec![label.to_string(), quantity.to_string()]);
        }
    }
    if !gloves.other_label.trim().is_empty() {
        table.add_row(vec![
            "Other".to_string(),
            gloves.other_label.trim().to_string(),
        ]);
    }
    if !gloves.notes.trim().is_empty() {
        table.add_row(vec!["Notes".to_string(), gloves.notes.trim().to_string()]);
    }
    table
}

fn quantity_table(
    draft: &Draft,
    section: &Section,
    title: String,
    page_width: usize,
) -> TableBlock {
    let name = name_width(page_width, 10 + 4 + 16);
    let mut table = TableBlock::new(
        title,
        vec![
            Column::left("Item", name),
            Column::right("Quantity", 10),
            Column::left("Notes", notes_width(page_width, name + 10 + 4)),
        ],
    );

    let Some(quantities) = draft.quantity_section(section.id) else {
        return table;
    };
    for entry in &quantities.items {
        if should_persist(entry.quantity, 0.0, &entry.notes) {
            table.add_row(vec![
                entry.name.clone(),
                entry.quantity.to_string(),
                entry.notes.clone(),
            ]);
        }
    }
    for row in quantities.real_custom() {
        if should_persist(row.quantity, 0.0, &row.notes) {
            table.add_row(vec![
                format!("{}{CUSTOM_SUFFIX}", row.name.trim()),
                row.quantity.to_string(),
                row.notes.clone(),
            ]);
        }
    }
    table
}

fn cost_table(draft: &Draft, title: String, page_width: usize) -> TableBlock {
    let name = name_width(page_width, 12 + 4 + 16);
    let mut table = TableBlock::new(
        title,
        vec![
            Column::left("Item", name),
            Column::right("Cost", 12),
            Column::left("Notes", notes_width(page_width, name + 12 + 4)),
        ],
    );

    for entry in &draft.parts.items {
        if should_persist(0, entry.cost, &entry.notes) {
            table.add_row(vec![
                entry.name.clone(),
                format!("{:.2}", entry.cost),
                entry.notes.clone(),
            ]);
        }
    }
    for row in draft.parts.real_custom() {
        if should_persist(0, row.cost, &row.notes) {
            table.add_row(vec![
                format!("{}{CUSTOM_SUFFIX}", row.name.trim()),
                format!("{:.2}", row.cost),
                row.notes.clone(),
            ]);
        }
    }
    table
}
