//! Macro slot addressing.
//!
//! The host's macro table holds two banks of 100 slots each, shown in the
//! game UI as a 10×10 grid per bank. A slot is addressed either bank-relative
//! (bank plus index 0–99) or by its flat table address 0–199, with the
//! individual bank occupying the first hundred entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slots in one macro bank.
pub const BANK_SLOTS: u8 = 100;

/// Number of columns (and rows) in a bank's macro grid.
pub const GRID_COLUMNS: u8 = 10;

/// Total number of addressable slots across both banks.
pub const TABLE_SLOTS: u8 = 200;

/// One of the two macro banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    /// Character-specific macros (bank 0 in the host table).
    Individual,
    /// Account-wide macros (bank 1 in the host table).
    Shared,
}

impl Bank {
    /// Numeric bank id used by the host macro table.
    pub fn id(self) -> u8 {
        match self {
            Bank::Individual => 0,
            Bank::Shared => 1,
        }
    }

    /// Bank for a host table id, if valid.
    pub fn from_id(id: u8) -> Option<Bank> {
        match id {
            0 => Some(Bank::Individual),
            1 => Some(Bank::Shared),
            _ => None,
        }
    }

    /// Flat table address of this bank's first slot.
    fn base(self) -> u8 {
        self.id() * BANK_SLOTS
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bank::Individual => write!(f, "individual"),
            Bank::Shared => write!(f, "shared"),
        }
    }
}

/// A single macro slot: a bank plus a position inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    bank: Bank,
    index: u8,
}

impl Slot {
    /// Slot at a bank-relative index. `None` if the index is outside 0–99.
    pub fn new(bank: Bank, index: u8) -> Option<Slot> {
        (index < BANK_SLOTS).then_some(Slot { bank, index })
    }

    /// Slot at a flat table address. `None` if the address is outside 0–199.
    pub fn from_flat(flat: u8) -> Option<Slot> {
        if flat >= TABLE_SLOTS {
            return None;
        }
        let bank = Bank::from_id(flat / BANK_SLOTS)?;
        Some(Slot {
            bank,
            index: flat % BANK_SLOTS,
        })
    }

    /// Internal constructor for indices already proven in range.
    pub(crate) fn from_parts(bank: Bank, index: u8) -> Slot {
        debug_assert!(index < BANK_SLOTS);
        Slot { bank, index }
    }

    /// Iterates every slot of both banks in flat-address order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..TABLE_SLOTS).map(|flat| Slot {
            bank: if flat < BANK_SLOTS {
                Bank::Individual
            } else {
                Bank::Shared
            },
            index: flat % BANK_SLOTS,
        })
    }

    /// The bank this slot belongs to.
    pub fn bank(self) -> Bank {
        self.bank
    }

    /// Bank-relative index (0–99).
    pub fn index(self) -> u8 {
        self.index
    }

    /// Flat table address (0–199).
    pub fn flat(self) -> u8 {
        self.bank.base() + self.index
    }

    /// Grid row (0–9).
    pub fn row(self) -> u8 {
        self.index / GRID_COLUMNS
    }

    /// Grid column (0–9).
    pub fn column(self) -> u8 {
        self.index % GRID_COLUMNS
    }

    /// The same index in another bank.
    pub fn in_bank(self, bank: Bank) -> Slot {
        Slot { bank, ..self }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{:02}", self.bank, self.index)
    }
}
