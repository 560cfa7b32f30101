//! Descriptor usage census.

use super::{write_heading, Report};
use crate::descriptor::{CensusRegistry, TypeDescriptor};
use crate::errors::Result;
use crate::header::SignatureTable;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CensusRow {
    pub rank: usize,
    /// Descriptor expression, e.g. `c_int_ptr`.
    pub descriptor: String,
    /// C spelling, e.g. `int *`.
    pub c_type: String,
    pub uses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CensusReport {
    pub version: String,
    pub total: usize,
    pub rows: Vec<CensusRow>,
}

pub fn census_report(table: &SignatureTable) -> Result<CensusReport> {
    let mut census = CensusRegistry::new();
    table.resolve_with(&mut census)?;

    let rows = census
        .most_common()
        .into_iter()
        .enumerate()
        .map(|(index, (descriptor, uses))| -> Result<CensusRow> {
            let c_type = descriptor.parse::<TypeDescriptor>()?.to_string();
            Ok(CensusRow {
                rank: index + 1,
                descriptor,
                c_type,
                uses,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CensusReport {
        version: table.provenance().version.clone(),
        total: census.total(),
        rows,
    })
}

impl Report for CensusReport {
    fn write_terminal(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        write_heading(writer, "API summary: types used in API function signatures")?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["#", "Descriptor", "C type", "Uses"]);
        for row in &self.rows {
            table.add_row(vec![
                Cell::new(row.rank).set_alignment(CellAlignment::Right),
                Cell::new(&row.descriptor),
                Cell::new(&row.c_type),
                Cell::new(row.uses).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(writer, "{table}")?;
        writeln!(
            writer,
            "{} descriptor uses across {} distinct descriptors (DWF version {})",
            self.total,
            self.rows.len(),
            self.version
        )
    }
}
