//! The generated signature artifact.
//!
//! The artifact is a TOML document: a comment banner restating where the
//! signatures came from, a `[provenance]` table, and one `[[function]]`
//! record per declaration in header order. It is written by hand so the
//! layout stays stable and diff-friendly between regenerations, and read back
//! through serde.

use super::signature::{DuplicateFunction, FunctionSignature, Provenance, SignatureTable};
use serde::Deserialize;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ArtifactError {
    #[error("malformed signature artifact: {0}")]
    Malformed(#[from] toml::de::Error),

    #[error("signature artifact is inconsistent: {0}")]
    Duplicate(#[from] DuplicateFunction),
}

#[derive(Debug, Deserialize)]
struct ArtifactDocument {
    provenance: Provenance,
    #[serde(rename = "function", default)]
    functions: Vec<FunctionSignature>,
}

fn quoted(text: &str) -> String {
    toml::Value::String(text.to_string()).to_string()
}

/// Banner lines are comments; a control character would end the comment early.
fn banner_value(text: &str) -> String {
    let mut value = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            value.extend(c.escape_default());
        } else {
            value.push(c);
        }
    }
    value
}

/// Render a signature table as artifact text.
#[must_use]
pub fn emit_artifact(table: &SignatureTable) -> String {
    let provenance = table.provenance();
    let mut out = String::new();

    let _ = writeln!(out, "# Native function signatures generated by dwfbind.");
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# header file ....... : {}", banner_value(&provenance.file));
    let _ = writeln!(out, "# header size ....... : {} bytes", provenance.size);
    let _ = writeln!(out, "# header sha256 ..... : {}", provenance.sha256);
    let _ = writeln!(out, "# library version ... : {}", banner_value(&provenance.version));
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# Do not edit. Regenerate with `dwfbind generate`.");
    let _ = writeln!(out);
    let _ = writeln!(out, "[provenance]");
    let _ = writeln!(out, "file = {}", quoted(&provenance.file));
    let _ = writeln!(out, "size = {}", provenance.size);
    let _ = writeln!(out, "sha256 = {}", quoted(&provenance.sha256));
    let _ = writeln!(out, "version = {}", quoted(&provenance.version));

    for function in table.iter() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[[function]]");
        let _ = writeln!(out, "name = {}", quoted(&function.name));
        let _ = writeln!(out, "returns = {}", quoted(&function.returns.expression()));
        if function.parameters.is_empty() {
            let _ = writeln!(out, "parameters = []");
        } else {
            let _ = writeln!(out, "parameters = [");
            for parameter in &function.parameters {
                let _ = writeln!(
                    out,
                    "    {{ name = {}, type = {} }},",
                    quoted(&parameter.name),
                    quoted(&parameter.descriptor.expression())
                );
            }
            let _ = writeln!(out, "]");
        }
        let _ = writeln!(out, "obsolete = {}", function.obsolete);
    }

    out
}

/// Read artifact text back into a signature table.
pub fn load_artifact(text: &str) -> Result<SignatureTable, ArtifactError> {
    let document: ArtifactDocument = toml::from_str(text)?;
    Ok(SignatureTable::new(document.provenance, document.functions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BaseType, TypeDescriptor};
    use crate::header::parser::parse_header;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const HEADER: &str = indoc! {r#"
        // excerpt
        DWFAPI int FDwfGetVersion(char szVersion[32]);
        DWFAPI int FDwfDeviceCloseAll();
        // OBSOLETE
        DWFAPI int FDwfAnalogInTriggerSourceInfo(HDWF hdwf, int *pfstrigsrc);
    "#};

    #[test]
    fn test_emitted_artifact_loads_back_identically() {
        let table = parse_header("dwf.h", HEADER.as_bytes(), Some("3.14.3")).unwrap();
        let text = emit_artifact(&table);
        let loaded = load_artifact(&text).unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded.obsolete_count(), 1);
    }

    #[test]
    fn test_control_characters_in_provenance_survive_round_trip() {
        let table = parse_header(
            "dw\nf.h",
            b"DWFAPI int FDwfA();\n",
            Some("3.14.3\n[oops]\r"),
        )
        .unwrap();
        let text = emit_artifact(&table);

        assert!(text.contains("# header file ....... : dw\\nf.h\n"));
        assert!(text.contains("# library version ... : 3.14.3\\n[oops]\\r\n"));
        assert!(!text.lines().any(|line| line.starts_with("[oops]")));
        assert_eq!(load_artifact(&text).unwrap(), table);
    }

    #[test]
    fn test_artifact_layout() {
        let table = parse_header("dwf.h", HEADER.as_bytes(), None).unwrap();
        let text = emit_artifact(&table);

        assert!(text.starts_with("# Native function signatures generated by dwfbind."));
        assert!(text.contains("# library version ... : (not specified)"));
        assert!(text.contains(indoc! {r#"
            [[function]]
            name = "FDwfGetVersion"
            returns = "c_int"
            parameters = [
                { name = "szVersion", type = "c_char_array_32" },
            ]
            obsolete = false
        "#}));
        assert!(text.contains("name = \"FDwfDeviceCloseAll\"\nreturns = \"c_int\"\nparameters = []"));
    }

    #[test]
    fn test_unknown_descriptor_in_artifact_is_rejected() {
        let text = indoc! {r#"
            [provenance]
            file = "dwf.h"
            size = 0
            sha256 = ""
            version = "3.14.3"

            [[function]]
            name = "FDwfX"
            returns = "c_long"
        "#};
        assert!(matches!(load_artifact(text), Err(ArtifactError::Malformed(_))));
    }

    #[test]
    fn test_duplicate_function_in_artifact_is_rejected() {
        let text = indoc! {r#"
            [provenance]
            file = "dwf.h"
            size = 0
            sha256 = ""
            version = "3.14.3"

            [[function]]
            name = "FDwfX"
            returns = "c_int"

            [[function]]
            name = "FDwfX"
            returns = "c_int"
        "#};
        assert!(matches!(load_artifact(text), Err(ArtifactError::Duplicate(_))));
    }

    #[test]
    fn test_missing_parameters_default_to_empty() {
        let text = indoc! {r#"
            [provenance]
            file = "dwf.h"
            size = 0
            sha256 = ""
            version = "3.14.3"

            [[function]]
            name = "FDwfDeviceCloseAll"
            returns = "c_int"
        "#};
        let table = load_artifact(text).unwrap();
        let function = table.get("FDwfDeviceCloseAll").unwrap();
        assert!(function.parameters.is_empty());
        assert!(!function.obsolete);
        assert_eq!(function.returns, TypeDescriptor::value(BaseType::Int));
    }
}
