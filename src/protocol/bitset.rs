//! Capability bitsets.
//!
//! Many `...Info` calls report the supported members of an enumeration as an
//! integer mask: bit `n` is set when the member whose native value is `n` is
//! supported.

use super::enums::NativeEnum;

/// Integer types a native call may hand back as a mask.
pub trait Bitmask: Copy {
    const BITS: u32;

    fn bit(self, index: u32) -> bool;
}

macro_rules! impl_bitmask {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl Bitmask for $ty {
                const BITS: u32 = <$ty>::BITS;

                fn bit(self, index: u32) -> bool {
                    index < Self::BITS && ((self as $unsigned) >> index) & 1 == 1
                }
            }
        )*
    };
}

impl_bitmask! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    i32 => u32,
}

fn bit_index<E: NativeEnum, M: Bitmask>(member: E) -> Option<u32> {
    let ordinal = member.ordinal();
    (0..i64::from(M::BITS))
        .contains(&ordinal)
        .then_some(ordinal as u32)
}

/// Members of `E` whose bit is set in `mask`, in declaration order.
///
/// Members whose native value does not fit the mask width are never included.
/// A value shared by several members (`InstrumentState::Triggered` and
/// `Running`, for one) sets a single bit, which decodes to the first declared
/// of them only; the later ones are aliases and never appear.
pub fn decode_bitset<E: NativeEnum, M: Bitmask>(mask: M) -> Vec<E> {
    let members = E::members();
    members
        .iter()
        .enumerate()
        .filter(|&(position, member)| {
            !members[..position]
                .iter()
                .any(|earlier| earlier.ordinal() == member.ordinal())
        })
        .map(|(_, &member)| member)
        .filter(|&member| bit_index::<E, M>(member).is_some_and(|index| mask.bit(index)))
        .collect()
}

/// Inverse of [`decode_bitset`] for members that fit in 64 bits.
pub fn encode_bitset<E: NativeEnum>(members: impl IntoIterator<Item = E>) -> u64 {
    members
        .into_iter()
        .filter_map(bit_index::<E, u64>)
        .fold(0, |mask, index| mask | (1u64 << index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::enums::{
        AcquisitionMode, DeviceVersion, Func, InstrumentState, TriggerSlope, TriggerSource,
    };

    #[test]
    fn test_decode_follows_declaration_order() {
        assert_eq!(
            decode_bitset::<TriggerSlope, i32>(0b0000_0110),
            vec![TriggerSlope::Fall, TriggerSlope::Either]
        );
        assert!(decode_bitset::<TriggerSlope, u8>(0).is_empty());
    }

    #[test]
    fn test_members_beyond_mask_width_are_unreachable() {
        // Custom = 30 and Play = 31 never fit in a byte.
        let decoded = decode_bitset::<Func, u8>(u8::MAX);
        assert_eq!(decoded.len(), 8);
        assert!(!decoded.contains(&Func::Custom));

        let decoded = decode_bitset::<Func, u32>(u32::MAX);
        assert!(decoded.contains(&Func::Play));
    }

    #[test]
    fn test_negative_i32_mask_sets_high_bit() {
        let decoded = decode_bitset::<Func, i32>(i32::MIN);
        assert_eq!(decoded, vec![Func::Play]);
    }

    #[test]
    fn test_encode_is_inverse_of_decode() {
        let members = vec![
            TriggerSource::PC,
            TriggerSource::AnalogIn,
            TriggerSource::External2,
        ];
        let mask = encode_bitset(members.iter().copied());
        assert_eq!(mask, (1 << 1) | (1 << 4) | (1 << 12));
        assert_eq!(decode_bitset::<TriggerSource, u64>(mask), members);
    }

    #[test]
    fn test_acquisition_mode_info() {
        let decoded = decode_bitset::<AcquisitionMode, i32>(0b1001);
        assert_eq!(decoded, vec![AcquisitionMode::Single, AcquisitionMode::Record]);
    }

    #[test]
    fn test_aliased_values_decode_to_first_declared_member() {
        assert_eq!(
            decode_bitset::<InstrumentState, u8>(1 << 3),
            vec![InstrumentState::Triggered]
        );
        assert_eq!(
            decode_bitset::<DeviceVersion, i32>(0b0110),
            vec![DeviceVersion::EExplorerC, DeviceVersion::DiscoveryA]
        );
        assert_eq!(
            decode_bitset::<InstrumentState, u64>(encode_bitset([InstrumentState::Running])),
            vec![InstrumentState::Triggered]
        );
    }
}
