//! Declaration parser for the native header.
//!
//! The header is scanned line by line. Lines starting with `DWFAPI` are
//! function declarations and must match the grammar exactly:
//!
//! ```text
//! DWFAPI <returnType> <name>(<baseType> [*]<name>[[<size>]], ...);  // comment
//! ```
//!
//! Every other line is ignored, except that the first line containing the
//! obsolete marker switches the parser into the obsolete region for the rest
//! of the file.

use super::signature::{FunctionSignature, ParameterSpec, Provenance, SignatureTable};
use crate::descriptor::{BaseType, TypeDescriptor, ARRAY_SIZES};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

pub const DECLARATION_PREFIX: &str = "DWFAPI";
pub const OBSOLETE_MARKER: &str = "OBSOLETE";

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: `{text}`")]
pub struct ParseError {
    /// 1-based line number; 0 when the error is not tied to a line.
    pub line: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("declaration does not match `DWFAPI <type> <name>(<parameters>);`")]
    MalformedDeclaration,

    #[error("unknown return type `{0}`")]
    UnknownReturnType(String),

    #[error("parameter `{0}` does not match `<type> [*]<name>[[<size>]]`")]
    MalformedParameter(String),

    #[error("function `{0}` is declared more than once")]
    DuplicateFunction(String),

    #[error("header is not valid UTF-8")]
    InvalidEncoding,
}

impl ParseError {
    fn new(line: usize, text: &str, kind: ParseErrorKind) -> Self {
        Self {
            line,
            text: text.to_string(),
            kind,
        }
    }
}

struct DeclarationPatterns {
    declaration: Regex,
    parameter: Regex,
}

impl DeclarationPatterns {
    fn new() -> Self {
        // Longest spelling first so `unsigned char` is tried before `char`.
        let mut vocabulary: Vec<&str> = BaseType::ALL.iter().map(|b| b.c_name()).collect();
        vocabulary.sort_by_key(|name| std::cmp::Reverse(name.len()));
        let base_types = vocabulary
            .iter()
            .map(|name| regex::escape(name).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        let sizes = ARRAY_SIZES
            .iter()
            .map(|size| size.to_string())
            .collect::<Vec<_>>()
            .join("|");

        Self {
            declaration: Regex::new(&format!(
                r"^{DECLARATION_PREFIX}\s+(?P<returns>[A-Za-z_][A-Za-z0-9_ ]*?)\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<parameters>[^()]*)\)\s*;"
            ))
            .unwrap(),
            parameter: Regex::new(&format!(
                r"^(?P<base>{base_types})(?:\s*(?P<pointer>\*)\s*|\s+)(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?:\[(?P<size>{sizes})\])?$"
            ))
            .unwrap(),
        }
    }
}

static PATTERNS: Lazy<DeclarationPatterns> = Lazy::new(DeclarationPatterns::new);

/// Parser state: once the obsolete marker is seen, it stays obsolete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Normal,
    Obsolete,
}

impl Region {
    fn advance(self, line: &str) -> Region {
        match self {
            Region::Normal if line.contains(OBSOLETE_MARKER) => Region::Obsolete,
            region => region,
        }
    }
}

/// Parse header text into signatures, in source order.
pub fn parse_declarations(text: &str) -> Result<Vec<FunctionSignature>, ParseError> {
    let mut region = Region::Normal;
    let mut seen = HashSet::new();
    let mut functions = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        region = region.advance(raw_line);

        if !raw_line.starts_with(DECLARATION_PREFIX) {
            continue;
        }

        let function = parse_declaration(raw_line, line_number, region == Region::Obsolete)?;
        if !seen.insert(function.name.clone()) {
            return Err(ParseError::new(
                line_number,
                raw_line,
                ParseErrorKind::DuplicateFunction(function.name),
            ));
        }
        functions.push(function);
    }

    Ok(functions)
}

/// Parse a header snapshot and attach its provenance.
pub fn parse_header(
    file: &str,
    bytes: &[u8],
    version: Option<&str>,
) -> Result<SignatureTable, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ParseError::new(0, file, ParseErrorKind::InvalidEncoding))?;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let functions = parse_declarations(text)?;
    if version.is_none() {
        tracing::warn!(file, "No library version given for header; recording it as unspecified");
    }
    let table = SignatureTable::new(Provenance::of_header(file, bytes, version), functions)
        .map_err(|duplicate| {
            ParseError::new(0, file, ParseErrorKind::DuplicateFunction(duplicate.0))
        })?;

    tracing::info!(
        file,
        functions = table.len(),
        obsolete = table.obsolete_count(),
        "Parsed header declarations"
    );
    Ok(table)
}

fn parse_declaration(
    line: &str,
    line_number: usize,
    obsolete: bool,
) -> Result<FunctionSignature, ParseError> {
    let captures = PATTERNS
        .declaration
        .captures(line)
        .ok_or_else(|| ParseError::new(line_number, line, ParseErrorKind::MalformedDeclaration))?;

    let returns_text = &captures["returns"];
    let returns = BaseType::from_c_name(returns_text)
        .map(TypeDescriptor::value)
        .ok_or_else(|| {
            ParseError::new(
                line_number,
                line,
                ParseErrorKind::UnknownReturnType(returns_text.trim().to_string()),
            )
        })?;

    let parameters = split_parameters(&captures["parameters"])
        .map(|text| {
            parse_parameter(text).ok_or_else(|| {
                ParseError::new(
                    line_number,
                    line,
                    ParseErrorKind::MalformedParameter(text.to_string()),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FunctionSignature {
        name: captures["name"].to_string(),
        returns,
        parameters,
        obsolete,
    })
}

/// Naive comma split; no vocabulary type contains a comma. A lone `void`
/// means an empty list.
fn split_parameters(list: &str) -> impl Iterator<Item = &str> {
    let list = list.trim();
    let list = if list == "void" { "" } else { list };
    list.split(',').map(str::trim).filter(|p| !p.is_empty())
}

fn parse_parameter(text: &str) -> Option<ParameterSpec> {
    let captures = PATTERNS.parameter.captures(text)?;
    let base = BaseType::from_c_name(&captures["base"])?;
    let descriptor = match (captures.name("pointer"), captures.name("size")) {
        (Some(_), Some(_)) => return None,
        (Some(_), None) => TypeDescriptor::pointer(base),
        (None, Some(size)) => TypeDescriptor::array(base, size.as_str().parse().ok()?).ok()?,
        (None, None) => TypeDescriptor::value(base),
    };

    Some(ParameterSpec {
        name: captures["name"].to_string(),
        descriptor,
    })
}
