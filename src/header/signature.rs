use crate::descriptor::{RegistryError, TypeDescriptor, TypeRegistry};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub descriptor: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub returns: TypeDescriptor,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default)]
    pub obsolete: bool,
}

impl FunctionSignature {
    /// Every descriptor of the signature: the return type first, then the
    /// parameters in order.
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        std::iter::once(&self.returns).chain(self.parameters.iter().map(|p| &p.descriptor))
    }
}

/// Where a signature table came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub file: String,
    /// Header size in bytes.
    pub size: u64,
    /// Hex SHA-256 of the header bytes.
    pub sha256: String,
    pub version: String,
}

pub const UNSPECIFIED_VERSION: &str = "(not specified)";

impl Provenance {
    pub fn of_header(file: impl Into<String>, bytes: &[u8], version: Option<&str>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            file: file.into(),
            size: bytes.len() as u64,
            sha256: format!("{:x}", hasher.finalize()),
            version: version.unwrap_or(UNSPECIFIED_VERSION).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("function `{0}` is declared more than once")]
pub struct DuplicateFunction(pub String);

/// Ordered, immutable table of the signatures parsed from one header snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTable {
    provenance: Provenance,
    functions: Vec<FunctionSignature>,
    index: HashMap<String, usize>,
}

impl SignatureTable {
    pub fn new(
        provenance: Provenance,
        functions: Vec<FunctionSignature>,
    ) -> Result<Self, DuplicateFunction> {
        let mut index = HashMap::with_capacity(functions.len());
        for (slot, function) in functions.iter().enumerate() {
            if index.insert(function.name.clone(), slot).is_some() {
                return Err(DuplicateFunction(function.name.clone()));
            }
        }
        Ok(Self {
            provenance,
            functions,
            index,
        })
    }

    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    #[must_use]
    pub fn functions(&self) -> &[FunctionSignature] {
        &self.functions
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionSignature> {
        self.index.get(name).map(|&slot| &self.functions[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.functions.iter()
    }

    #[must_use]
    pub fn obsolete_count(&self) -> usize {
        self.functions.iter().filter(|f| f.obsolete).count()
    }

    /// Visit every descriptor of every signature through `registry`, in table
    /// order, and collect the results.
    pub fn resolve_with<R: TypeRegistry>(
        &self,
        registry: &mut R,
    ) -> Result<Vec<ResolvedSignature<R::Repr>>, RegistryError> {
        self.functions
            .iter()
            .map(|function| ResolvedSignature::resolve(function, &mut *registry))
            .collect()
    }
}

/// A signature whose descriptors went through a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSignature<T> {
    pub name: String,
    pub returns: T,
    pub parameters: Vec<(String, T)>,
    pub obsolete: bool,
}

impl<T> ResolvedSignature<T> {
    fn resolve<R: TypeRegistry<Repr = T>>(
        function: &FunctionSignature,
        registry: &mut R,
    ) -> Result<Self, RegistryError> {
        let returns = registry.resolve(&function.returns)?;
        let parameters = function
            .parameters
            .iter()
            .map(|p| -> Result<(String, T), RegistryError> {
                Ok((p.name.clone(), registry.resolve(&p.descriptor)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: function.name.clone(),
            returns,
            parameters,
            obsolete: function.obsolete,
        })
    }
}
