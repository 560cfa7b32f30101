// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod header;
pub mod io;
pub mod observability;
pub mod protocol;
pub mod report;
pub mod runtime;

// Re-export commonly used types
pub use crate::descriptor::{
    BaseType, BindingRegistry, CensusRegistry, MarshalType, Modifier, NullRegistry,
    RegistryError, TypeDescriptor, TypeRegistry,
};

pub use crate::errors::{Error, Result, ResultExt};

pub use crate::header::{
    dwf_function_signatures, embedded_table, emit_artifact, load_artifact, parse_header,
    FunctionSignature, ParseError, SignatureTable,
};

pub use crate::protocol::{
    decode_bitset, encode_bitset, AcquisitionMode, AnalogImpedance, AnalogIo, AnalogOutIdle,
    AnalogOutMode, AnalogOutNode, DeviceId, DeviceVersion, DigitalInClockSource,
    DigitalInSampleMode, DigitalOutIdle, DigitalOutOutput, DigitalOutType, DwfError, DwfParam,
    EnumConfigInfo, EnumDecodeError, EnumFilter, ErrorCode, Filter, Func, InstrumentState,
    NativeEnum, TriggerLength, TriggerSlope, TriggerSource, TriggerType,
};

pub use crate::runtime::{DwfLibrary, LibraryConfig, NativeFn};
