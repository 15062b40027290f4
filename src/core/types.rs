/*!
 * Core Types
 * Common types used across the kernel
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Stable process handle into the process arena
///
/// Handles are never reused within one kernel lifetime, so a stale handle
/// simply fails to resolve instead of aliasing a newer process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resource units (requested, held or available)
pub type Units = u32;

/// Process name, usually a single character
pub type ProcessName = SmartString;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;

/// Priority class
///
/// Ordinals match the textual command vocabulary: `0` is reserved for the
/// init process, user processes are created at `1` or `2`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Init = 0,
    Low = 1,
    High = 2,
}

impl Priority {
    /// Every class, highest first (scheduler scan order)
    pub const DESCENDING: [Priority; 3] = [Priority::High, Priority::Low, Priority::Init];

    /// Time-sliced classes, highest first
    pub const PREEMPTIBLE: [Priority; 2] = [Priority::High, Priority::Low];

    /// Resolve a numeric ordinal
    #[inline]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Init),
            1 => Some(Self::Low),
            2 => Some(Self::High),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn level(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether user processes may be created at this class
    #[inline(always)]
    pub const fn is_user(self) -> bool {
        matches!(self, Self::Low | Self::High)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.level())
    }
}
