//! Active/obsolete function counts per API category.

use super::{write_heading, Report};
use crate::descriptor::NullRegistry;
use crate::errors::Result;
use crate::header::SignatureTable;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use serde::Serialize;
use std::io::Write;

/// Category prefixes, checked in this order; first match wins.
pub const API_CATEGORIES: &[&str] = &[
    "FDwfAnalogOut",
    "FDwfDevice",
    "FDwfAnalogIn",
    "FDwfDigitalSpi",
    "FDwfDigitalI2c",
    "FDwfDigitalCan",
    "FDwfDigitalUart",
    "FDwfDigitalIn",
    "FDwfDigitalOut",
    "FDwfAnalogIO",
    "FDwfEnum",
    "FDwfDigitalIO",
    "FDwfAnalogImpedance",
];

pub const MISCELLANEOUS: &str = "(miscellaneous)";

#[must_use]
pub fn api_category(function: &str) -> &'static str {
    API_CATEGORIES
        .iter()
        .copied()
        .find(|prefix| function.starts_with(prefix))
        .unwrap_or(MISCELLANEOUS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub active: usize,
    pub obsolete: usize,
}

impl CategoryCount {
    #[must_use]
    pub fn total(&self) -> usize {
        self.active + self.obsolete
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSummary {
    pub version: String,
    /// Categories in first-seen order.
    pub categories: Vec<CategoryCount>,
    pub active: usize,
    pub obsolete: usize,
}

pub fn summarize_api(table: &SignatureTable) -> Result<ApiSummary> {
    let mut categories: Vec<CategoryCount> = Vec::new();

    for function in table.resolve_with(&mut NullRegistry)? {
        let category = api_category(&function.name);
        let slot = match categories.iter().position(|c| c.category == category) {
            Some(slot) => slot,
            None => {
                categories.push(CategoryCount {
                    category: category.to_string(),
                    active: 0,
                    obsolete: 0,
                });
                categories.len() - 1
            }
        };
        if function.obsolete {
            categories[slot].obsolete += 1;
        } else {
            categories[slot].active += 1;
        }
    }

    Ok(ApiSummary {
        version: table.provenance().version.clone(),
        active: categories.iter().map(|c| c.active).sum(),
        obsolete: categories.iter().map(|c| c.obsolete).sum(),
        categories,
    })
}

impl Report for ApiSummary {
    fn write_terminal(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        write_heading(writer, "DWF API summary: functions by category")?;
        writeln!(writer, "DWF version: {}", self.version)?;
        writeln!(writer)?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Category", "Active", "Obsolete", "Total"]);
        let count = |n: usize| Cell::new(n).set_alignment(CellAlignment::Right);
        for category in &self.categories {
            table.add_row(vec![
                Cell::new(&category.category),
                count(category.active),
                count(category.obsolete),
                count(category.total()),
            ]);
        }
        table.add_row(vec![
            Cell::new("total"),
            count(self.active),
            count(self.obsolete),
            count(self.active + self.obsolete),
        ]);

        writeln!(writer, "{table}")
    }
}
