//! Offline half of the binding pipeline: header declarations in, signature
//! table out, and the generated artifact that carries it into the crate.

pub mod artifact;
pub mod parser;
pub mod signature;

pub use artifact::{emit_artifact, load_artifact, ArtifactError};
pub use parser::{parse_declarations, parse_header, ParseError, ParseErrorKind};
pub use signature::{
    DuplicateFunction, FunctionSignature, ParameterSpec, Provenance, ResolvedSignature,
    SignatureTable, UNSPECIFIED_VERSION,
};

use crate::descriptor::TypeRegistry;
use crate::errors::Result;
use once_cell::sync::Lazy;

/// The artifact generated from the native header, embedded at build time.
pub const EMBEDDED_ARTIFACT: &str = include_str!("dwf_function_signatures.toml");

static EMBEDDED_TABLE: Lazy<std::result::Result<SignatureTable, ArtifactError>> =
    Lazy::new(|| load_artifact(EMBEDDED_ARTIFACT));

/// The embedded signature table, loaded on first use.
pub fn embedded_table() -> std::result::Result<&'static SignatureTable, ArtifactError> {
    EMBEDDED_TABLE.as_ref().map_err(Clone::clone)
}

/// Every embedded signature with its descriptors resolved through `registry`.
///
/// This is the one place the rest of the crate consumes the artifact; what a
/// descriptor becomes depends only on the registry handed in.
pub fn dwf_function_signatures<R: TypeRegistry>(
    registry: &mut R,
) -> Result<Vec<ResolvedSignature<R::Repr>>> {
    let table = embedded_table()?;
    let resolved = table.resolve_with(registry)?;
    tracing::debug!(
        functions = resolved.len(),
        version = %table.provenance().version,
        "Resolved embedded signatures"
    );
    Ok(resolved)
}
