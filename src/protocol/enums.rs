//! Native enumerations of the dwf library.
//!
//! Every enumeration is declared through [`native_enum!`], which keeps the
//! native values out of the Rust discriminants. Two enumerations reuse a value
//! for distinct members, so reverse mapping goes through [`from_raw`] and
//! reports ambiguity instead of picking a member.
//!
//! [`from_raw`]: TriggerSource::from_raw

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumDecodeError {
    #[error("{raw} is not a valid {enumeration} value")]
    Unknown { enumeration: &'static str, raw: i64 },

    #[error("{raw} is ambiguous for {enumeration}: could be any of {}", .candidates.join(", "))]
    Ambiguous {
        enumeration: &'static str,
        raw: i64,
        candidates: Vec<&'static str>,
    },
}

/// Common view of the generated enumerations, used by the bitset decoder.
pub trait NativeEnum: Copy + fmt::Debug + 'static {
    /// Rust name of the enumeration.
    const NAME: &'static str;

    /// Members in declaration order.
    fn members() -> &'static [Self];

    /// The member's native value, widened.
    fn ordinal(self) -> i64;

    fn member_name(self) -> &'static str;
}

macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),*
        }

        impl $name {
            pub const MEMBERS: &'static [$name] = &[$($name::$variant),*];

            #[must_use]
            pub const fn raw(self) -> $repr {
                match self {
                    $($name::$variant => $value),*
                }
            }

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }

            /// Every member carrying `raw`, in declaration order.
            #[must_use]
            pub fn candidates(raw: $repr) -> Vec<$name> {
                Self::MEMBERS
                    .iter()
                    .copied()
                    .filter(|member| member.raw() == raw)
                    .collect()
            }

            pub fn from_raw(raw: $repr) -> Result<$name, EnumDecodeError> {
                decide(stringify!($name), i64::from(raw), Self::candidates(raw))
            }
        }

        impl NativeEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                Self::MEMBERS
            }

            fn ordinal(self) -> i64 {
                i64::from(self.raw())
            }

            fn member_name(self) -> &'static str {
                self.name()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

fn decide<E: NativeEnum>(
    enumeration: &'static str,
    raw: i64,
    candidates: Vec<E>,
) -> Result<E, EnumDecodeError> {
    match candidates.as_slice() {
        [] => Err(EnumDecodeError::Unknown { enumeration, raw }),
        [member] => Ok(*member),
        _ => Err(EnumDecodeError::Ambiguous {
            enumeration,
            raw,
            candidates: candidates.iter().map(|m| m.member_name()).collect(),
        }),
    }
}

native_enum! {
    /// Device enumeration filter (`ENUMFILTER`).
    pub enum EnumFilter: i32 {
        All = 0,
        EExplorer = 1,
        Discovery = 2,
        Discovery2 = 3,
        DDiscovery = 4,
    }
}

native_enum! {
    /// Device type (`DEVID`).
    pub enum DeviceId: i32 {
        EExplorer = 1,
        Discovery = 2,
        Discovery2 = 3,
        DDiscovery = 4,
    }
}

native_enum! {
    /// Device revision (`DEVVER`). Value 2 is shared by two device families;
    /// use [`DeviceVersion::resolve`] when the device is known.
    pub enum DeviceVersion: i32 {
        EExplorerC = 2,
        EExplorerE = 4,
        EExplorerF = 5,
        DiscoveryA = 1,
        DiscoveryB = 2,
        DiscoveryC = 3,
    }
}

impl DeviceVersion {
    #[must_use]
    pub fn is_electronics_explorer(self) -> bool {
        matches!(
            self,
            DeviceVersion::EExplorerC | DeviceVersion::EExplorerE | DeviceVersion::EExplorerF
        )
    }

    /// Decode a revision reported for `device`. Candidates from the other
    /// device family are discarded first; a value only the other family
    /// defines still decodes to that member.
    pub fn resolve(device: DeviceId, raw: i32) -> Result<DeviceVersion, EnumDecodeError> {
        let explorer = device == DeviceId::EExplorer;
        let candidates = Self::candidates(raw);
        let matching: Vec<_> = candidates
            .iter()
            .copied()
            .filter(|version| version.is_electronics_explorer() == explorer)
            .collect();

        if matching.is_empty() {
            decide(Self::NAME, i64::from(raw), candidates)
        } else {
            decide(Self::NAME, i64::from(raw), matching)
        }
    }
}

native_enum! {
    /// Trigger source (`TRIGSRC`), an `unsigned char`.
    pub enum TriggerSource: u8 {
        None = 0,
        PC = 1,
        DetectorAnalogIn = 2,
        DetectorDigitalIn = 3,
        AnalogIn = 4,
        DigitalIn = 5,
        DigitalOut = 6,
        AnalogOut1 = 7,
        AnalogOut2 = 8,
        AnalogOut3 = 9,
        AnalogOut4 = 10,
        External1 = 11,
        External2 = 12,
        External3 = 13,
        External4 = 14,
        High = 15,
        Low = 16,
    }
}

native_enum! {
    /// Instrument state (`DwfState`), an `unsigned char`. `Triggered` and
    /// `Running` share value 3 and cannot be told apart.
    pub enum InstrumentState: u8 {
        Ready = 0,
        Config = 4,
        Prefill = 5,
        Armed = 1,
        Wait = 7,
        Triggered = 3,
        Running = 3,
        Done = 2,
    }
}

native_enum! {
    pub enum EnumConfigInfo: i32 {
        AnalogInChannelCount = 1,
        AnalogOutChannelCount = 2,
        AnalogIOChannelCount = 3,
        DigitalInChannelCount = 4,
        DigitalOutChannelCount = 5,
        DigitalIOChannelCount = 6,
        AnalogInBufferSize = 7,
        AnalogOutBufferSize = 8,
        DigitalInBufferSize = 9,
        DigitalOutBufferSize = 10,
    }
}

native_enum! {
    pub enum AcquisitionMode: i32 {
        Single = 0,
        ScanShift = 1,
        ScanScreen = 2,
        Record = 3,
        Overs = 4,
        Single1 = 5,
    }
}

native_enum! {
    pub enum Filter: i32 {
        Decimate = 0,
        Average = 1,
        MinMax = 2,
    }
}

native_enum! {
    pub enum TriggerType: i32 {
        Edge = 0,
        Pulse = 1,
        Transition = 2,
    }
}

native_enum! {
    pub enum TriggerSlope: i32 {
        Rise = 0,
        Fall = 1,
        Either = 2,
    }
}

native_enum! {
    pub enum TriggerLength: i32 {
        Less = 0,
        Timeout = 1,
        More = 2,
    }
}

native_enum! {
    /// Error codes reported by `FDwfGetLastError` (`DWFERC`).
    pub enum ErrorCode: i32 {
        NoErc = 0,
        UnknownError = 1,
        ApiLockTimeout = 2,
        AlreadyOpened = 3,
        NotSupported = 4,
        InvalidParameter0 = 0x10,
        InvalidParameter1 = 0x11,
        InvalidParameter2 = 0x12,
        InvalidParameter3 = 0x13,
        InvalidParameter4 = 0x14,
    }
}

native_enum! {
    /// Analog out waveform (`FUNC`), an `unsigned char`.
    pub enum Func: u8 {
        DC = 0,
        Sine = 1,
        Square = 2,
        Triangle = 3,
        RampUp = 4,
        RampDown = 5,
        Noise = 6,
        Pulse = 7,
        Trapezium = 8,
        SinePower = 9,
        Custom = 30,
        Play = 31,
    }
}

native_enum! {
    /// Analog I/O channel node type (`ANALOGIO`), an `unsigned char`.
    pub enum AnalogIo: u8 {
        Enable = 1,
        Voltage = 2,
        Current = 3,
        Power = 4,
        Temperature = 5,
        Dmm = 6,
        Range = 7,
        Measure = 8,
        Time = 9,
        Frequency = 10,
    }
}

native_enum! {
    pub enum AnalogOutNode: i32 {
        Carrier = 0,
        FM = 1,
        AM = 2,
    }
}

native_enum! {
    pub enum AnalogOutMode: i32 {
        Voltage = 0,
        Current = 1,
    }
}

native_enum! {
    pub enum AnalogOutIdle: i32 {
        Disable = 0,
        Offset = 1,
        Initial = 2,
    }
}

native_enum! {
    pub enum DigitalInClockSource: i32 {
        Internal = 0,
        External = 1,
    }
}

native_enum! {
    pub enum DigitalInSampleMode: i32 {
        Simple = 0,
        /// Alternating noise and sample words.
        Noise = 1,
    }
}

native_enum! {
    pub enum DigitalOutOutput: i32 {
        PushPull = 0,
        OpenDrain = 1,
        OpenSource = 2,
        /// Custom and random outputs only.
        ThreeState = 3,
    }
}

native_enum! {
    pub enum DigitalOutType: i32 {
        Pulse = 0,
        Custom = 1,
        Random = 2,
        ROM = 3,
    }
}

native_enum! {
    pub enum DigitalOutIdle: i32 {
        Init = 0,
        Low = 1,
        High = 2,
        Zet = 3,
    }
}

native_enum! {
    /// Impedance analyzer measurement.
    pub enum AnalogImpedance: i32 {
        Impedance = 0,
        ImpedancePhase = 1,
        Resistance = 2,
        Reactance = 3,
        Admittance = 4,
        AdmittancePhase = 5,
        Conductance = 6,
        Susceptance = 7,
        SeriesCapacitance = 8,
        ParallelCapacitance = 9,
        SeriesInductance = 10,
        ParallelInductance = 11,
        Dissipation = 12,
        Quality = 13,
    }
}

native_enum! {
    /// Library and device parameters for `FDwfParamSet`/`FDwfParamGet`.
    pub enum DwfParam: i32 {
        /// Keep USB power enabled while AUX is connected.
        UsbPower = 2,
        /// LED brightness, 0 to 100 percent.
        LedBrightness = 3,
        /// Action on close: 0 continue, 1 stop, 2 shutdown.
        OnClose = 4,
        AudioOut = 5,
        /// USB power limit in mA, -1 for none.
        UsbLimit = 6,
    }
}
