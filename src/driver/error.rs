//! Error types for the Meson DWMAC glue driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Board configuration that does not match the hardware
//! - [`ClockError`]: TX clock tree and external clock failures
//!
//! The unified [`Error`] enum wraps both and is returned by most driver
//! methods. [`InitError`] additionally records which initialization step
//! failed.
//!
//! None of these are transient: they describe a mismatch between the
//! configuration and the board wiring, so nothing in the driver retries.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// These are detected while validating the resolved board configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PHY interface mode not handled by this glue block
    UnsupportedPhyMode,
    /// TX delay not in {0, 2, 4, 6} ns or RX delay not in {0, 2} ns
    InvalidDelayValue,
    /// RX delay needs the timing-adjustment clock, but none was supplied
    MissingTimingAdjustmentClock,
    /// One of the two TX clock mux parents was not supplied
    MissingParentClock,
    /// Compatible string does not name a supported chip family
    UnknownChipFamily,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::UnsupportedPhyMode => "unsupported phy-mode",
            ConfigError::InvalidDelayValue => "invalid delay value",
            ConfigError::MissingTimingAdjustmentClock => {
                "timing-adjustment clock is mandatory for RX delay re-timing"
            }
            ConfigError::MissingParentClock => "missing TX clock mux parent",
            ConfigError::UnknownChipFamily => "unknown chip family",
        }
    }
}

// =============================================================================
// Clock Errors
// =============================================================================

/// Clock tree errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// No mux/divider combination produces the requested rate exactly
    UnachievableRate,
    /// Gate enable requested before a rate was selected
    ClockNotConfigured,
    /// An external clock refused to start
    EnableFailed,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClockError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClockError::UnachievableRate => "requested clock rate not achievable",
            ClockError::ClockNotConfigured => "clock rate not configured",
            ClockError::EnableFailed => "failed to enable clock",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidDelayValue)) => { /* ... */ }
///     Err(Error::Clock(ClockError::UnachievableRate)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Clock error
    Clock(ClockError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Clock(e) => write!(f, "clock: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Error::Clock(e)
    }
}

// =============================================================================
// Initialization Errors
// =============================================================================

/// Initialization step of a device session, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Building the TX clock graph
    ClockGraph,
    /// Resolving the interface mode bits
    PhyMode,
    /// Computing the delay/adjust register plan
    TimingPlan,
    /// Starting the timing-adjustment clock
    TimingAdjustmentClock,
    /// Selecting the 125 MHz TX clock rate
    TxClockRate,
    /// Gating on the TX clock
    TxClockEnable,
}

impl InitStep {
    /// Returns a human-readable name of the step
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            InitStep::ClockGraph => "clock graph",
            InitStep::PhyMode => "phy mode",
            InitStep::TimingPlan => "timing plan",
            InitStep::TimingAdjustmentClock => "timing-adjustment clock",
            InitStep::TxClockRate => "TX clock rate",
            InitStep::TxClockEnable => "TX clock enable",
        }
    }
}

/// First error of a failed initialization and the step that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitError {
    /// Step that failed
    pub step: InitStep,
    /// Error reported by that step
    pub error: Error,
}

impl InitError {
    /// Create an initialization error
    pub fn new(step: InitStep, error: impl Into<Error>) -> Self {
        Self {
            step,
            error: error.into(),
        }
    }
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.step.as_str(), self.error)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for clock operations
pub type ClockResult<T> = core::result::Result<T, ClockError>;

// =============================================================================
// Unit Tests
// =============================================================================
