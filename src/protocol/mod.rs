//! Cross-cutting protocols every native call relies on: the success-sentinel
//! error protocol, native enumerations and capability bitsets.

pub mod bitset;
pub mod enums;
pub mod error;

pub use bitset::{decode_bitset, encode_bitset, Bitmask};
pub use enums::{
    AcquisitionMode, AnalogImpedance, AnalogIo, AnalogOutIdle, AnalogOutMode, AnalogOutNode,
    DeviceId, DeviceVersion, DigitalInClockSource, DigitalInSampleMode, DigitalOutIdle,
    DigitalOutOutput, DigitalOutType, DwfParam, EnumConfigInfo, EnumDecodeError, EnumFilter,
    ErrorCode, Filter, Func, InstrumentState, NativeEnum, TriggerLength, TriggerSlope,
    TriggerSource, TriggerType,
};
pub use error::{DwfError, LAST_ERROR_FAILED, LAST_ERROR_MSG_FAILED, RESULT_SUCCESS};
