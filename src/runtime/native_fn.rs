//! Typed function pointers checked against annotated symbols.

use super::symbols::SymbolAddress;
use crate::descriptor::AbiType;
use std::ffi::c_void;
use std::fmt;

/// Rust types that cross the C boundary unchanged.
///
/// # Safety
///
/// `ABI` must describe the type's C representation exactly.
pub unsafe trait Marshal: Copy {
    const ABI: AbiType;
}

macro_rules! impl_marshal {
    ($($ty:ty => $abi:ident),* $(,)?) => {
        $(
            unsafe impl Marshal for $ty {
                const ABI: AbiType = AbiType::$abi;
            }
        )*
    };
}

impl_marshal! {
    () => Void,
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f64 => F64,
}

unsafe impl<T> Marshal for *mut T {
    const ABI: AbiType = AbiType::Pointer;
}

unsafe impl<T> Marshal for *const T {
    const ABI: AbiType = AbiType::Pointer;
}

/// Return and parameter ABI types of a native function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiSignature {
    pub returns: AbiType,
    pub parameters: Vec<AbiType>,
}

impl fmt::Display for AbiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({parameters}) -> {}", self.returns)
    }
}

/// `unsafe extern "C" fn` pointer types that can be bound to a symbol.
///
/// # Safety
///
/// `signature` must describe the function pointer type exactly.
pub unsafe trait NativeFn: Copy {
    fn signature() -> AbiSignature;

    /// # Safety
    ///
    /// `address` must be a function with the ABI reported by `signature`.
    unsafe fn from_address(address: SymbolAddress) -> Self;
}

macro_rules! impl_native_fn {
    ($($arg:ident),*) => {
        unsafe impl<Ret: Marshal, $($arg: Marshal),*> NativeFn
            for unsafe extern "C" fn($($arg),*) -> Ret
        {
            fn signature() -> AbiSignature {
                AbiSignature {
                    returns: Ret::ABI,
                    parameters: vec![$($arg::ABI),*],
                }
            }

            unsafe fn from_address(address: SymbolAddress) -> Self {
                let pointer = address.as_ptr();
                debug_assert_eq!(
                    std::mem::size_of::<Self>(),
                    std::mem::size_of::<*const c_void>()
                );
                std::mem::transmute_copy::<*const c_void, Self>(&pointer)
            }
        }
    };
}

impl_native_fn!();
impl_native_fn!(A1);
impl_native_fn!(A1, A2);
impl_native_fn!(A1, A2, A3);
impl_native_fn!(A1, A2, A3, A4);
impl_native_fn!(A1, A2, A3, A4, A5);
impl_native_fn!(A1, A2, A3, A4, A5, A6);
impl_native_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_native_fn!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_native_fn!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_native_fn!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_native_fn!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_native_fn!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
