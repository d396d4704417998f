//! Register bitfield codec.
//!
//! Pure helpers to pack values into masked register fields and back, plus
//! the ns <-> bits conversion of the RGMII TX delay field.

use super::constants::TX_DELAY_STEP_NS;

/// Contiguous mask covering bits `high..=low` (both inclusive).
///
/// `high` must be in `low..32`; this is checked at compile time for the
/// register layout constants that use it.
#[must_use]
pub const fn genmask(high: u32, low: u32) -> u32 {
    (u32::MAX >> (31 - high)) & (u32::MAX << low)
}

/// Shift `value` into the field described by `mask` and drop the excess bits.
///
/// A zero mask packs to zero.
#[inline(always)]
#[must_use]
pub const fn field_prep(mask: u32, value: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    (value << mask.trailing_zeros()) & mask
}

/// Extract the field described by `mask` from a register value.
///
/// A zero mask unpacks to zero.
#[inline(always)]
#[must_use]
pub const fn field_get(mask: u32, reg: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    (reg & mask) >> mask.trailing_zeros()
}

/// Convert a TX delay in ns to its 2-bit register encoding (2 ns per step).
///
/// Only 0, 2, 4 and 6 ns are meaningful; callers validate the value before
/// getting here.
#[inline(always)]
#[must_use]
pub const fn encode_tx_delay(ns: u32) -> u32 {
    ns / TX_DELAY_STEP_NS
}

/// Convert the 2-bit TX delay encoding back to ns.
#[inline(always)]
#[must_use]
pub const fn decode_tx_delay(bits: u32) -> u32 {
    bits * TX_DELAY_STEP_NS
}

// =============================================================================
// Unit Tests
// =============================================================================
