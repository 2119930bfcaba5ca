//! Slot addressing and neighbor derivation for the macro grid.
//!
//! The game client stores macros in two banks (individual and shared) of 100
//! slots each, presented as a 10×10 grid per bank. This crate provides the
//! addressing vocabulary for that table, the directional neighbor arithmetic
//! used to chain macros across the grid, and the token parsing for the chat
//! command grammar.
//!
//! Neighbor derivation is total and bank-preserving: every slot has a
//! neighbor in every direction, edges wrap, and a step never crosses from
//! one bank into the other. Stepping in a direction and then in its opposite
//! always returns to the starting slot.

mod neighbors;
pub mod parser;
mod slot;

pub use neighbors::{Direction, NeighborSet, neighbor};
pub use parser::{RunArgsError, parse_bank, parse_direction, parse_run_args};
pub use slot::{BANK_SLOTS, Bank, GRID_COLUMNS, Slot, TABLE_SLOTS};
