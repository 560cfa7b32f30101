//! Type descriptors for the native header vocabulary.
//!
//! A [`TypeDescriptor`] is a base type from the closed header vocabulary plus
//! a [`Modifier`]: a plain value, a pointer, or a fixed-size array. The
//! vocabulary is closed on purpose: a header that starts using a type not
//! listed here fails to parse instead of being bound with a guessed layout.
//!
//! Descriptors have two textual forms:
//!
//! - the C form used in the header (`unsigned char data[16]`, `int *pValue`)
//! - the descriptor expression used in the generated artifact
//!   (`c_unsigned_char_array_16`, `c_int_ptr`, `HDWF`)

pub mod marshal;
pub mod registry;

pub use marshal::{AbiType, MarshalType, Scalar};
pub use registry::{BindingRegistry, CensusRegistry, NullRegistry, RegistryError, TypeRegistry};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Array lengths the header is allowed to use for fixed-size buffers.
pub const ARRAY_SIZES: &[usize] = &[16, 32, 512];

macro_rules! base_types {
    ($($(#[$meta:meta])* $variant:ident => $c_name:literal),* $(,)?) => {
        /// Base types of the header vocabulary, in vocabulary order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BaseType {
            $($(#[$meta])* $variant),*
        }

        impl BaseType {
            /// Every base type, in vocabulary order.
            pub const ALL: &'static [BaseType] = &[$(BaseType::$variant),*];

            /// The spelling used in the C header.
            #[must_use]
            pub const fn c_name(self) -> &'static str {
                match self {
                    $(BaseType::$variant => $c_name),*
                }
            }
        }
    };
}

base_types! {
    Void => "void",
    UnsignedChar => "unsigned char",
    UnsignedShort => "unsigned short",
    UnsignedInt => "unsigned int",
    UnsignedLongLong => "unsigned long long",
    /// Not a C89 type, but the header uses it for one parameter.
    Bool => "bool",
    Char => "char",
    Short => "short",
    Int => "int",
    Double => "double",
    /// Device handle.
    Hdwf => "HDWF",
    Func => "FUNC",
    AnalogIo => "ANALOGIO",
    EnumFilter => "ENUMFILTER",
    DevId => "DEVID",
    DevVer => "DEVVER",
    DwfErc => "DWFERC",
    TrigSrc => "TRIGSRC",
    TrigLen => "TRIGLEN",
    Filter => "FILTER",
    TrigType => "TRIGTYPE",
    AcqMode => "ACQMODE",
    DwfState => "DwfState",
    DwfParam => "DwfParam",
    AnalogOutMode => "DwfAnalogOutMode",
    AnalogOutIdle => "DwfAnalogOutIdle",
    AnalogOutNode => "AnalogOutNode",
    DigitalInClockSource => "DwfDigitalInClockSource",
    DigitalInSampleMode => "DwfDigitalInSampleMode",
    EnumConfigInfo => "DwfEnumConfigInfo",
    DigitalOutOutput => "DwfDigitalOutOutput",
    DigitalOutIdle => "DwfDigitalOutIdle",
    DigitalOutType => "DwfDigitalOutType",
    AnalogImpedance => "DwfAnalogImpedance",
    TriggerSlope => "DwfTriggerSlope",
}

impl BaseType {
    /// Look up a base type by its C spelling. Internal runs of whitespace are
    /// treated as a single space.
    pub fn from_c_name(name: &str) -> Option<BaseType> {
        let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .iter()
            .copied()
            .find(|base| base.c_name() == normalized)
    }

    /// The base part of a descriptor expression: spaces become underscores and
    /// lowercase C names get a `c_` prefix (`unsigned char` -> `c_unsigned_char`).
    #[must_use]
    pub fn expression_name(self) -> String {
        let name = self.c_name().replace(' ', "_");
        if name.starts_with(|c: char| c.is_ascii_lowercase()) {
            format!("c_{name}")
        } else {
            name
        }
    }

    pub fn from_expression_name(name: &str) -> Option<BaseType> {
        Self::ALL
            .iter()
            .copied()
            .find(|base| base.expression_name() == name)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

/// How a base type is used: by value, through a pointer, or as a fixed array.
///
/// Pointer and array are alternatives, never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Value,
    Pointer,
    Array(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TypeDescriptor {
    pub base: BaseType,
    pub modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("unknown base type `{0}`")]
    UnknownBaseType(String),

    #[error("illegal array size {0} (expected one of 16, 32, 512)")]
    IllegalArraySize(usize),

    #[error("malformed descriptor expression `{0}`")]
    Malformed(String),
}

impl TypeDescriptor {
    #[must_use]
    pub const fn value(base: BaseType) -> Self {
        Self {
            base,
            modifier: Modifier::Value,
        }
    }

    #[must_use]
    pub const fn pointer(base: BaseType) -> Self {
        Self {
            base,
            modifier: Modifier::Pointer,
        }
    }

    /// A fixed-size array descriptor; only the sizes in [`ARRAY_SIZES`] are legal.
    pub fn array(base: BaseType, size: usize) -> Result<Self, DescriptorError> {
        if !ARRAY_SIZES.contains(&size) {
            return Err(DescriptorError::IllegalArraySize(size));
        }
        Ok(Self {
            base,
            modifier: Modifier::Array(size),
        })
    }

    #[must_use]
    pub fn is_pointer(&self) -> bool {
        self.modifier == Modifier::Pointer
    }

    #[must_use]
    pub fn array_size(&self) -> Option<usize> {
        match self.modifier {
            Modifier::Array(size) => Some(size),
            _ => None,
        }
    }

    /// The artifact spelling of this descriptor.
    #[must_use]
    pub fn expression(&self) -> String {
        let base = self.base.expression_name();
        match self.modifier {
            Modifier::Value => base,
            Modifier::Pointer => format!("{base}_ptr"),
            Modifier::Array(size) => format!("{base}_array_{size}"),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        let base_of = |name: &str| {
            BaseType::from_expression_name(name)
                .ok_or_else(|| DescriptorError::UnknownBaseType(name.to_string()))
        };

        if let Some(base) = expression.strip_suffix("_ptr") {
            return Ok(Self::pointer(base_of(base)?));
        }

        if let Some((base, size)) = expression.rsplit_once("_array_") {
            let size = size
                .parse::<usize>()
                .map_err(|_| DescriptorError::Malformed(expression.to_string()))?;
            return Self::array(base_of(base)?, size);
        }

        Ok(Self::value(base_of(expression)?))
    }
}

impl From<TypeDescriptor> for String {
    fn from(descriptor: TypeDescriptor) -> Self {
        descriptor.expression()
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = DescriptorError;

    fn try_from(expression: String) -> Result<Self, Self::Error> {
        expression.parse()
    }
}

/// C spelling: `int`, `int *`, `unsigned char[16]`.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Modifier::Value => write!(f, "{}", self.base),
            Modifier::Pointer => write!(f, "{} *", self.base),
            Modifier::Array(size) => write!(f, "{}[{}]", self.base, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_names_follow_c_prefix_rule() {
        assert_eq!(BaseType::UnsignedChar.expression_name(), "c_unsigned_char");
        assert_eq!(BaseType::Int.expression_name(), "c_int");
        assert_eq!(BaseType::Hdwf.expression_name(), "HDWF");
        assert_eq!(BaseType::DwfState.expression_name(), "DwfState");
    }

    #[test]
    fn test_expression_parses_back_for_every_base_type() {
        for &base in BaseType::ALL {
            for descriptor in [
                TypeDescriptor::value(base),
                TypeDescriptor::pointer(base),
                TypeDescriptor::array(base, 32).unwrap(),
            ] {
                let parsed: TypeDescriptor = descriptor.expression().parse().unwrap();
                assert_eq!(parsed, descriptor);
            }
        }
    }

    #[test]
    fn test_from_c_name_normalizes_whitespace() {
        assert_eq!(
            BaseType::from_c_name("unsigned   long  long"),
            Some(BaseType::UnsignedLongLong)
        );
        assert_eq!(BaseType::from_c_name("long"), None);
    }

    #[test]
    fn test_illegal_array_size_is_rejected() {
        assert_eq!(
            TypeDescriptor::array(BaseType::Char, 64),
            Err(DescriptorError::IllegalArraySize(64))
        );
        assert_eq!(
            "c_char_array_64".parse::<TypeDescriptor>(),
            Err(DescriptorError::IllegalArraySize(64))
        );
    }

    #[test]
    fn test_unknown_expression_is_rejected() {
        assert!(matches!(
            "c_long_ptr".parse::<TypeDescriptor>(),
            Err(DescriptorError::UnknownBaseType(name)) if name == "c_long"
        ));
        assert!(matches!(
            "c_char_array_x".parse::<TypeDescriptor>(),
            Err(DescriptorError::Malformed(_))
        ));
    }

    #[test]
    fn test_pointer_and_array_are_exclusive() {
        let pointer = TypeDescriptor::pointer(BaseType::Double);
        assert!(pointer.is_pointer());
        assert_eq!(pointer.array_size(), None);

        let array = TypeDescriptor::array(BaseType::Double, 32).unwrap();
        assert!(!array.is_pointer());
        assert_eq!(array.array_size(), Some(32));
    }

    #[test]
    fn test_display_uses_c_spelling() {
        assert_eq!(TypeDescriptor::pointer(BaseType::Int).to_string(), "int *");
        assert_eq!(
            TypeDescriptor::array(BaseType::UnsignedChar, 16)
                .unwrap()
                .to_string(),
            "unsigned char[16]"
        );
    }
}
