//! Directional neighbor derivation across the macro grid.
//!
//! Neighbors are computed on the flat table address: up and down step by ten
//! with a ±90 wrap at the top and bottom rows, left and right step by one
//! with a ±99 wrap at a bank's first and last slot. The edge tests look only
//! at the bank-relative position, so the arithmetic never leaves the
//! executing slot's bank: up and down wrap within the column, while left and
//! right treat the bank as a single 100-slot ring in reading order (left from
//! row 1 column 0 lands on row 0 column 9, not on the same row).

use crate::slot::{BANK_SLOTS, GRID_COLUMNS, Slot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chaining direction on the macro grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in grid order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction that undoes this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// The slot reached by stepping one grid cell from `slot`.
///
/// Total over the whole table: every slot has a neighbor in every direction,
/// and the result is always in the same bank as the start.
pub fn neighbor(slot: Slot, direction: Direction) -> Slot {
    let flat = slot.flat();
    // Edge tests run on the bank-relative position.
    let pos = flat % BANK_SLOTS;
    let stepped = match direction {
        Direction::Up => {
            if pos < GRID_COLUMNS {
                flat + 90
            } else {
                flat - 10
            }
        }
        Direction::Down => {
            if pos >= BANK_SLOTS - GRID_COLUMNS {
                flat - 90
            } else {
                flat + 10
            }
        }
        Direction::Left => {
            if pos == 0 {
                flat + 99
            } else {
                flat - 1
            }
        }
        Direction::Right => {
            if pos == BANK_SLOTS - 1 {
                flat - 99
            } else {
                flat + 1
            }
        }
    };
    debug_assert_eq!(stepped / BANK_SLOTS, flat / BANK_SLOTS);
    Slot::from_parts(slot.bank(), stepped % BANK_SLOTS)
}

/// The four neighbors of one slot, derived together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborSet {
    pub up: Slot,
    pub down: Slot,
    pub left: Slot,
    pub right: Slot,
}

impl NeighborSet {
    /// Derives all four directional neighbors of `slot`.
    pub fn around(slot: Slot) -> NeighborSet {
        NeighborSet {
            up: neighbor(slot, Direction::Up),
            down: neighbor(slot, Direction::Down),
            left: neighbor(slot, Direction::Left),
            right: neighbor(slot, Direction::Right),
        }
    }

    /// The neighbor in `direction`.
    pub fn get(&self, direction: Direction) -> Slot {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}
