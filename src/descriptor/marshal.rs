//! Marshaling types attached to annotated native symbols.

use serde::Serialize;
use std::fmt;

/// Fixed-width C scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    Bool,
    Char,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    UnsignedLongLong,
    Double,
}

impl Scalar {
    #[must_use]
    pub const fn abi(self) -> AbiType {
        match self {
            Scalar::Bool => AbiType::Bool,
            Scalar::Char => AbiType::I8,
            Scalar::UnsignedChar => AbiType::U8,
            Scalar::Short => AbiType::I16,
            Scalar::UnsignedShort => AbiType::U16,
            Scalar::Int => AbiType::I32,
            Scalar::UnsignedInt => AbiType::U32,
            Scalar::UnsignedLongLong => AbiType::U64,
            Scalar::Double => AbiType::F64,
        }
    }

    /// Size in bytes on every platform the native library ships for.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Scalar::Bool | Scalar::Char | Scalar::UnsignedChar => 1,
            Scalar::Short | Scalar::UnsignedShort => 2,
            Scalar::Int | Scalar::UnsignedInt => 4,
            Scalar::UnsignedLongLong | Scalar::Double => 8,
        }
    }
}

/// What physically crosses the C call boundary.
///
/// Distinct marshaling types can share an ABI type: handles and `int`-backed
/// enums are both `I32`, and every pointer or buffer is `Pointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiType {
    Void,
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F64,
    Pointer,
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbiType::Void => "()",
            AbiType::Bool => "bool",
            AbiType::I8 => "i8",
            AbiType::U8 => "u8",
            AbiType::I16 => "i16",
            AbiType::U16 => "u16",
            AbiType::I32 => "i32",
            AbiType::U32 => "u32",
            AbiType::I64 => "i64",
            AbiType::U64 => "u64",
            AbiType::F64 => "f64",
            AbiType::Pointer => "ptr",
        };
        f.write_str(name)
    }
}

/// Concrete marshaling type of a parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarshalType {
    Void,
    Scalar { scalar: Scalar },
    /// A native enumeration passed as its underlying integer.
    Enum { name: &'static str, repr: Scalar },
    /// Opaque device handle (`HDWF`), an `int` at the boundary.
    Handle,
    Pointer { pointee: Box<MarshalType> },
    /// Caller-allocated fixed-size buffer, passed as a pointer to its first element.
    Buffer { element: Box<MarshalType>, len: usize },
}

impl MarshalType {
    #[must_use]
    pub fn abi(&self) -> AbiType {
        match self {
            MarshalType::Void => AbiType::Void,
            MarshalType::Scalar { scalar } => scalar.abi(),
            MarshalType::Enum { repr, .. } => repr.abi(),
            MarshalType::Handle => AbiType::I32,
            MarshalType::Pointer { .. } | MarshalType::Buffer { .. } => AbiType::Pointer,
        }
    }

    /// Element count of a fixed-size buffer.
    #[must_use]
    pub fn buffer_len(&self) -> Option<usize> {
        match self {
            MarshalType::Buffer { len, .. } => Some(*len),
            _ => None,
        }
    }

    /// Byte size of a buffer, or of a single by-value element.
    #[must_use]
    pub fn byte_size(&self) -> Option<usize> {
        match self {
            MarshalType::Void => None,
            MarshalType::Scalar { scalar } => Some(scalar.size()),
            MarshalType::Enum { repr, .. } => Some(repr.size()),
            MarshalType::Handle => Some(Scalar::Int.size()),
            MarshalType::Pointer { .. } => Some(std::mem::size_of::<*const ()>()),
            MarshalType::Buffer { element, len } => element.byte_size().map(|size| size * len),
        }
    }
}

impl fmt::Display for MarshalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarshalType::Void => f.write_str("void"),
            MarshalType::Scalar { scalar } => write!(f, "{}", scalar.abi()),
            MarshalType::Enum { name, repr } => write!(f, "{}({})", name, repr.abi()),
            MarshalType::Handle => f.write_str("HDWF"),
            MarshalType::Pointer { pointee } => write!(f, "*mut {pointee}"),
            MarshalType::Buffer { element, len } => write!(f, "[{element}; {len}]"),
        }
    }
}
