//! Runtime half of the binding pipeline: annotating the symbols a loaded
//! library exports and calling them through checked function pointers.

pub mod library;
pub mod native_fn;
pub mod symbols;

pub use library::{default_library_path, DwfLibrary, LibraryConfig};
pub use native_fn::{AbiSignature, Marshal, NativeFn};
pub use symbols::{
    annotate, AnnotatedSymbol, AnnotatedSymbolTable, StaticSymbols, SymbolAddress, SymbolSource,
};
