//! Capture fidelity and minidump flag types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// How much of the target process ends up in the dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFidelity {
    /// Handles, threads and module lists only
    #[default]
    Mini,
    /// Mini plus static and global data segments
    Data,
    /// Full process memory
    Full,
}

impl CaptureFidelity {
    pub const ALL: [CaptureFidelity; 3] = [
        CaptureFidelity::Mini,
        CaptureFidelity::Data,
        CaptureFidelity::Full,
    ];

    /// Lowercase name, as accepted by the config file and the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureFidelity::Mini => "mini",
            CaptureFidelity::Data => "data",
            CaptureFidelity::Full => "full",
        }
    }
}

impl fmt::Display for CaptureFidelity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureFidelity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mini" => Ok(CaptureFidelity::Mini),
            "data" => Ok(CaptureFidelity::Data),
            "full" => Ok(CaptureFidelity::Full),
            other => Err(format!(
                "invalid capture fidelity '{}', expected one of: mini, data, full",
                other
            )),
        }
    }
}

/// `MINIDUMP_TYPE` bit set passed to the snapshot writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DumpFlags {
    value: u32,
}

impl DumpFlags {
    pub const NORMAL: Self = Self { value: 0x0000_0000 };
    pub const WITH_DATA_SEGS: Self = Self { value: 0x0000_0001 };
    pub const WITH_FULL_MEMORY: Self = Self { value: 0x0000_0002 };
    pub const WITH_HANDLE_DATA: Self = Self { value: 0x0000_0004 };
    pub const WITH_UNLOADED_MODULES: Self = Self { value: 0x0000_0020 };
    pub const WITH_PROCESS_THREAD_DATA: Self = Self { value: 0x0000_0100 };

    /// Flags every dump carries regardless of fidelity
    pub const BASE: Self = Self {
        value: Self::NORMAL.value
            | Self::WITH_HANDLE_DATA.value
            | Self::WITH_UNLOADED_MODULES.value
            | Self::WITH_PROCESS_THREAD_DATA.value,
    };

    /// Computes the flag set for a capture fidelity
    pub fn for_fidelity(fidelity: CaptureFidelity) -> Self {
        match fidelity {
            CaptureFidelity::Mini => Self::BASE,
            CaptureFidelity::Data => Self::BASE | Self::WITH_DATA_SEGS,
            CaptureFidelity::Full => Self::BASE | Self::WITH_FULL_MEMORY,
        }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Whether every bit of `other` is set in `self`
    pub fn contains(&self, other: Self) -> bool {
        self.value & other.value == other.value
    }

    /// Whether `self` is contained in `other` and differs from it
    pub fn is_strict_subset_of(&self, other: Self) -> bool {
        other.contains(*self) && *self != other
    }
}

impl BitOr for DumpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            value: self.value | rhs.value,
        }
    }
}

impl fmt::Display for DumpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.value)
    }
}
