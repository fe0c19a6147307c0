//! Chip and seat primitives: small, total-ordered newtypes that keep chip
//! quantities and seat numbers from being confused with plain integers.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A non-negative quantity of chips.
///
/// `Chip` never represents a fractional or negative amount. Addition
/// saturates rather than panics (chip totals never approach `u32::MAX` in
/// practice); subtraction is fallible because the caller must prove
/// `a >= b` and an underflow indicates a programming error upstream.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Chip(u32);

impl Chip {
    pub const ZERO: Chip = Chip(0);

    pub fn new(amount: u32) -> Self {
        Chip(amount)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked subtraction. The caller must ensure `self >= rhs`; an
    /// underflow is reported as `InvalidGameState` rather than panicking,
    /// since it can only happen if an earlier validation step was skipped.
    pub fn checked_sub(self, rhs: Chip) -> Result<Chip, EngineError> {
        self.0
            .checked_sub(rhs.0)
            .map(Chip)
            .ok_or_else(|| EngineError::InvalidGameState {
                state: "chip_arithmetic".to_string(),
                reason: format!("cannot subtract {} from {}", rhs.0, self.0),
            })
    }

    pub fn min(self, other: Chip) -> Chip {
        Chip(self.0.min(other.0))
    }
}

impl Add for Chip {
    type Output = Chip;
    fn add(self, rhs: Chip) -> Chip {
        Chip(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Chip {
    fn sum<I: Iterator<Item = Chip>>(iter: I) -> Chip {
        iter.fold(Chip::ZERO, Add::add)
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Chip {
    fn from(v: u32) -> Self {
        Chip(v)
    }
}

/// A seat number in `[0, 9]`, ordered by its numeric value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct SeatIndex(u8);

impl SeatIndex {
    pub const MAX: u8 = 9;

    pub fn new(seat: u8) -> Result<Self, EngineError> {
        if seat > Self::MAX {
            return Err(EngineError::InvalidConfig {
                reason: format!("seat {seat} is out of range [0, {}]", Self::MAX),
            });
        }
        Ok(SeatIndex(seat))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rotates a sorted seat order so that `pivot` (or the first seat after it,
/// if `pivot` isn't itself a member) comes first. Used both for "button
/// first" and "first seat clockwise after the button" rotations.
pub fn rotate_from(seat_order: &[SeatIndex], pivot: SeatIndex) -> Vec<SeatIndex> {
    if seat_order.is_empty() {
        return Vec::new();
    }
    let start = seat_order
        .iter()
        .position(|s| *s >= pivot)
        .unwrap_or(0);
    let mut rotated = Vec::with_capacity(seat_order.len());
    rotated.extend_from_slice(&seat_order[start..]);
    rotated.extend_from_slice(&seat_order[..start]);
    rotated
}

/// Returns the seat immediately clockwise of `from` in `seat_order`
/// (wrapping around). If `from` isn't present, returns the first seat.
pub fn seat_after(seat_order: &[SeatIndex], from: SeatIndex) -> SeatIndex {
    if seat_order.is_empty() {
        return from;
    }
    match seat_order.iter().position(|s| *s == from) {
        Some(i) => seat_order[(i + 1) % seat_order.len()],
        None => seat_order[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_index_rejects_out_of_range() {
        assert!(SeatIndex::new(10).is_err());
        assert!(SeatIndex::new(9).is_ok());
    }

    #[test]
    fn chip_sub_underflow_is_an_error() {
        let a = Chip::new(5);
        let b = Chip::new(10);
        assert!(a.checked_sub(b).is_err());
        assert_eq!(b.checked_sub(a).unwrap(), Chip::new(5));
    }

    #[test]
    fn rotate_from_wraps_around() {
        let order = [0, 1, 2, 3].map(|n| SeatIndex::new(n).unwrap());
        let rotated = rotate_from(&order, SeatIndex::new(2).unwrap());
        let values: Vec<u8> = rotated.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![2, 3, 0, 1]);
    }

    #[test]
    fn rotate_from_picks_next_seat_when_pivot_absent() {
        let order = [0, 2, 3].map(|n| SeatIndex::new(n).unwrap());
        let rotated = rotate_from(&order, SeatIndex::new(1).unwrap());
        let values: Vec<u8> = rotated.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![2, 3, 0]);
    }

    #[test]
    fn seat_after_wraps_to_the_start() {
        let order = [0, 1, 2].map(|n| SeatIndex::new(n).unwrap());
        assert_eq!(seat_after(&order, SeatIndex::new(2).unwrap()).value(), 0);
        assert_eq!(seat_after(&order, SeatIndex::new(0).unwrap()).value(), 1);
    }
}
