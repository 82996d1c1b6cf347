//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! A battle always has exactly two sides, `A` and `B`. Side A acts first
//! in every turn-order slot.
//!
//! ## SideMap
//!
//! Per-side storage with O(1) access, indexable by `Side`.
//!
//! ## CombatantRef
//!
//! Addresses one combatant: its side plus its index in that side's roster.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Raw index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "Side A"),
            Side::B => write!(f, "Side B"),
        }
    }
}

/// Per-side data storage.
///
/// ```
/// use rust_skirmish::core::{Side, SideMap};
///
/// let mut hits: SideMap<u32> = SideMap::new(0, 0);
/// hits[Side::B] += 3;
/// assert_eq!(hits[Side::A], 0);
/// assert_eq!(hits[Side::B], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    a: T,
    b: T,
}

impl<T> SideMap<T> {
    /// Create from the value for each side.
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Borrow both entries mutably: `(side, side.opponent())`.
    pub fn pair_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        match side {
            Side::A => (&mut self.a, &mut self.b),
            Side::B => (&mut self.b, &mut self.a),
        }
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::A, &self.a), (Side::B, &self.b)].into_iter()
    }

    /// Iterate over (Side, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        [(Side::A, &mut self.a), (Side::B, &mut self.b)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

/// Address of a combatant: side plus roster index.
///
/// The index is the member's position in its roster, which is also its
/// turn-order slot when it falls inside the active slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantRef {
    pub side: Side,
    pub index: usize,
}

impl CombatantRef {
    #[must_use]
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

impl std::fmt::Display for CombatantRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.side, self.index)
    }
}
