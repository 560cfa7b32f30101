//! Pluggable descriptor registries.
//!
//! A registry is a visitor over [`TypeDescriptor`]s. The signature table is
//! walked once per registry, and what each descriptor turns into depends only
//! on the registry supplied: the binding registry produces marshaling types,
//! the census registry counts usage, the null registry produces nothing.

use super::marshal::{MarshalType, Scalar};
use super::{BaseType, Modifier, TypeDescriptor};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry cannot resolve descriptor `{}`: {reason}", .descriptor.expression())]
    Unsupported {
        descriptor: TypeDescriptor,
        reason: &'static str,
    },
}

pub trait TypeRegistry {
    type Repr;

    fn resolve(&mut self, descriptor: &TypeDescriptor) -> Result<Self::Repr, RegistryError>;
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &mut R {
    type Repr = R::Repr;

    fn resolve(&mut self, descriptor: &TypeDescriptor) -> Result<Self::Repr, RegistryError> {
        (**self).resolve(descriptor)
    }
}

/// Maps descriptors to the marshaling types used at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingRegistry;

impl BindingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TypeRegistry for BindingRegistry {
    type Repr = MarshalType;

    fn resolve(&mut self, descriptor: &TypeDescriptor) -> Result<MarshalType, RegistryError> {
        let base = base_marshal_type(descriptor.base);
        match descriptor.modifier {
            Modifier::Value => Ok(base),
            Modifier::Pointer => Ok(MarshalType::Pointer {
                pointee: Box::new(base),
            }),
            Modifier::Array(_) if base == MarshalType::Void => Err(RegistryError::Unsupported {
                descriptor: *descriptor,
                reason: "arrays of void have no element size",
            }),
            Modifier::Array(len) => Ok(MarshalType::Buffer {
                element: Box::new(base),
                len,
            }),
        }
    }
}

fn scalar(scalar: Scalar) -> MarshalType {
    MarshalType::Scalar { scalar }
}

fn enumeration(base: BaseType, repr: Scalar) -> MarshalType {
    MarshalType::Enum {
        name: base.c_name(),
        repr,
    }
}

fn base_marshal_type(base: BaseType) -> MarshalType {
    match base {
        BaseType::Void => MarshalType::Void,
        BaseType::UnsignedChar => scalar(Scalar::UnsignedChar),
        BaseType::UnsignedShort => scalar(Scalar::UnsignedShort),
        BaseType::UnsignedInt => scalar(Scalar::UnsignedInt),
        BaseType::UnsignedLongLong => scalar(Scalar::UnsignedLongLong),
        BaseType::Bool => scalar(Scalar::Bool),
        BaseType::Char => scalar(Scalar::Char),
        BaseType::Short => scalar(Scalar::Short),
        BaseType::Int => scalar(Scalar::Int),
        BaseType::Double => scalar(Scalar::Double),
        BaseType::Hdwf => MarshalType::Handle,
        BaseType::TrigSrc | BaseType::Func | BaseType::AnalogIo | BaseType::DwfState => {
            enumeration(base, Scalar::UnsignedChar)
        }
        BaseType::EnumFilter
        | BaseType::DevId
        | BaseType::DevVer
        | BaseType::DwfErc
        | BaseType::TrigLen
        | BaseType::Filter
        | BaseType::TrigType
        | BaseType::AcqMode
        | BaseType::DwfParam
        | BaseType::AnalogOutMode
        | BaseType::AnalogOutIdle
        | BaseType::AnalogOutNode
        | BaseType::DigitalInClockSource
        | BaseType::DigitalInSampleMode
        | BaseType::EnumConfigInfo
        | BaseType::DigitalOutOutput
        | BaseType::DigitalOutIdle
        | BaseType::DigitalOutType
        | BaseType::AnalogImpedance
        | BaseType::TriggerSlope => enumeration(base, Scalar::Int),
    }
}

/// Counts how often each descriptor expression is requested.
#[derive(Debug, Clone, Default)]
pub struct CensusRegistry {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CensusRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn count(&self, expression: &str) -> usize {
        self.index
            .get(expression)
            .map_or(0, |&slot| self.counts[slot].1)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Descriptor expressions by descending use; ties keep first-seen order.
    #[must_use]
    pub fn most_common(&self) -> Vec<(String, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl TypeRegistry for CensusRegistry {
    type Repr = ();

    fn resolve(&mut self, descriptor: &TypeDescriptor) -> Result<(), RegistryError> {
        let expression = descriptor.expression();
        match self.index.get(&expression) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(expression.clone(), self.counts.len());
                self.counts.push((expression, 1));
            }
        }
        Ok(())
    }
}

/// Resolves every descriptor to `()`; for walks that only need names and flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRegistry;

impl TypeRegistry for NullRegistry {
    type Repr = ();

    fn resolve(&mut self, _descriptor: &TypeDescriptor) -> Result<(), RegistryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AbiType;

    #[test]
    fn test_binding_registry_maps_byte_enums_to_unsigned_char() {
        let mut registry = BindingRegistry::new();
        let resolved = registry
            .resolve(&TypeDescriptor::value(BaseType::TrigSrc))
            .unwrap();
        assert_eq!(
            resolved,
            MarshalType::Enum {
                name: "TRIGSRC",
                repr: Scalar::UnsignedChar
            }
        );
        assert_eq!(resolved.abi(), AbiType::U8);
    }

    #[test]
    fn test_binding_registry_maps_handle_pointer() {
        let mut registry = BindingRegistry::new();
        let resolved = registry
            .resolve(&TypeDescriptor::pointer(BaseType::Hdwf))
            .unwrap();
        assert_eq!(
            resolved,
            MarshalType::Pointer {
                pointee: Box::new(MarshalType::Handle)
            }
        );
    }

    #[test]
    fn test_binding_registry_rejects_void_arrays() {
        let mut registry = BindingRegistry::new();
        let descriptor = TypeDescriptor::array(BaseType::Void, 16).unwrap();
        let error = registry.resolve(&descriptor).unwrap_err();
        assert_eq!(
            error.to_string(),
            "registry cannot resolve descriptor `c_void_array_16`: arrays of void have no element size"
        );
    }

    #[test]
    fn test_binding_registry_resolves_every_scalar_value() {
        let mut registry = BindingRegistry::new();
        for &base in BaseType::ALL {
            assert!(registry.resolve(&TypeDescriptor::value(base)).is_ok());
            assert!(registry.resolve(&TypeDescriptor::pointer(base)).is_ok());
        }
    }

    #[test]
    fn test_census_ranks_by_count_then_first_seen() {
        let mut census = CensusRegistry::new();
        let int = TypeDescriptor::value(BaseType::Int);
        let handle = TypeDescriptor::value(BaseType::Hdwf);
        let double_ptr = TypeDescriptor::pointer(BaseType::Double);

        for descriptor in [&int, &handle, &double_ptr, &handle, &double_ptr] {
            census.resolve(descriptor).unwrap();
        }

        assert_eq!(census.total(), 5);
        assert_eq!(census.count("HDWF"), 2);
        assert_eq!(census.count("c_long"), 0);
        assert_eq!(
            census.most_common(),
            vec![
                ("HDWF".to_string(), 2),
                ("c_double_ptr".to_string(), 2),
                ("c_int".to_string(), 1),
            ]
        );
    }
}
