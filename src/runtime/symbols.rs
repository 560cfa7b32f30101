//! Symbol sources and the annotated symbol table.

use super::native_fn::{AbiSignature, NativeFn};
use crate::descriptor::{MarshalType, RegistryError, TypeRegistry};
use crate::header::SignatureTable;
use crate::protocol::DwfError;
use libloading::Library;
use std::collections::HashMap;
use std::ffi::{c_void, CString};
use std::ptr::NonNull;

/// Address of an exported native function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolAddress(NonNull<c_void>);

// SAFETY: the address is an immutable code location; it is never written
// through, only turned into a function pointer after its ABI is checked.
unsafe impl Send for SymbolAddress {}
unsafe impl Sync for SymbolAddress {}

impl SymbolAddress {
    #[must_use]
    pub fn new(address: *const c_void) -> Option<Self> {
        NonNull::new(address.cast_mut()).map(Self)
    }

    #[must_use]
    pub fn as_ptr(self) -> *const c_void {
        self.0.as_ptr().cast_const()
    }
}

/// Anything that can look up exported symbols by name.
pub trait SymbolSource {
    fn lookup(&self, name: &str) -> Option<SymbolAddress>;
}

impl SymbolSource for Library {
    fn lookup(&self, name: &str) -> Option<SymbolAddress> {
        let name = CString::new(name).ok()?;
        // SAFETY: the symbol is only read as an address here.
        let symbol = unsafe { self.get::<*mut c_void>(name.as_bytes_with_nul()) }.ok()?;
        SymbolAddress::new(*symbol)
    }
}

/// Explicit name to address map, for statically linked builds and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbols {
    symbols: HashMap<String, SymbolAddress>,
}

impl StaticSymbols {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `address` under `name`. Null addresses are ignored.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, address: *const c_void) -> Self {
        self.insert(name, address);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, address: *const c_void) {
        if let Some(address) = SymbolAddress::new(address) {
            self.symbols.insert(name.into(), address);
        }
    }
}

impl SymbolSource for StaticSymbols {
    fn lookup(&self, name: &str) -> Option<SymbolAddress> {
        self.symbols.get(name).copied()
    }
}

/// A resolved native function with its marshaling types attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSymbol {
    pub name: String,
    pub address: SymbolAddress,
    pub returns: MarshalType,
    pub parameters: Vec<(String, MarshalType)>,
    pub obsolete: bool,
}

impl AnnotatedSymbol {
    /// What crosses the C boundary for this symbol.
    #[must_use]
    pub fn abi_signature(&self) -> AbiSignature {
        AbiSignature {
            returns: self.returns.abi(),
            parameters: self.parameters.iter().map(|(_, ty)| ty.abi()).collect(),
        }
    }

    /// Hand out the symbol as `F`, provided `F` has the annotated ABI signature.
    pub fn bind<F: NativeFn>(&self) -> Result<F, DwfError> {
        let expected = self.abi_signature();
        let found = F::signature();
        if expected != found {
            return Err(DwfError::SignatureMismatch {
                function: self.name.clone(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        // SAFETY: the address was exported under this name and `F` has the
        // ABI the header declares for it.
        Ok(unsafe { F::from_address(self.address) })
    }

    /// Element count of the fixed-size buffer parameter at `index`.
    pub fn buffer_len(&self, index: usize) -> Result<usize, DwfError> {
        self.parameters
            .get(index)
            .and_then(|(_, ty)| ty.buffer_len())
            .ok_or_else(|| DwfError::NotABuffer {
                function: self.name.clone(),
                index,
            })
    }
}

/// Read-only table of the symbols the loaded library actually exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedSymbolTable {
    symbols: Vec<AnnotatedSymbol>,
    index: HashMap<String, usize>,
}

impl AnnotatedSymbolTable {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnnotatedSymbol> {
        self.index.get(name).map(|&slot| &self.symbols[slot])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedSymbol> {
        self.symbols.iter()
    }

    fn push(&mut self, symbol: AnnotatedSymbol) {
        self.index.insert(symbol.name.clone(), self.symbols.len());
        self.symbols.push(symbol);
    }
}

/// Attach marshaling types to every symbol of `table` that `source` exports.
///
/// Every descriptor is resolved before any lookup, so a descriptor the
/// registry cannot handle fails the pass even when the library lacks that
/// function. Functions the library does not export are left out.
pub fn annotate<S, R>(
    source: &S,
    table: &SignatureTable,
    registry: &mut R,
) -> Result<AnnotatedSymbolTable, RegistryError>
where
    S: SymbolSource + ?Sized,
    R: TypeRegistry<Repr = MarshalType>,
{
    let resolved = table.resolve_with(registry)?;

    let mut annotated = AnnotatedSymbolTable::default();
    for signature in resolved {
        let Some(address) = source.lookup(&signature.name) else {
            continue;
        };
        annotated.push(AnnotatedSymbol {
            name: signature.name,
            address,
            returns: signature.returns,
            parameters: signature.parameters,
            obsolete: signature.obsolete,
        });
    }

    tracing::debug!(
        declared = table.len(),
        annotated = annotated.len(),
        missing = table.len() - annotated.len(),
        "Annotated native symbols"
    );
    Ok(annotated)
}
