//! Token parsing for the chaining command grammar.
//!
//! Direction tokens accept the long and single-letter spellings in any ASCII
//! case. Bank tokens are matched exactly against their lowercase spellings;
//! a capitalized bank name has never been accepted. Run arguments are parsed
//! from the raw argument string with whitespace runs collapsed.

use crate::neighbors::Direction;
use crate::slot::{Bank, Slot};
use std::fmt;

/// Why a run-command argument string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunArgsError {
    /// The argument string was empty; the caller should show usage help.
    Empty,
    /// The slot token was missing, non-numeric, or above 99.
    InvalidSlot,
    /// The bank token was missing or not a recognized spelling.
    UnknownBank,
}

impl fmt::Display for RunArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunArgsError::Empty => write!(f, "empty run arguments"),
            RunArgsError::InvalidSlot => write!(f, "invalid macro number"),
            RunArgsError::UnknownBank => write!(f, "unrecognized bank token"),
        }
    }
}

impl std::error::Error for RunArgsError {}

/// Parses a direction token, long or single-letter, ASCII case-insensitive.
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_direction(token: &str) -> Option<Direction> {
    match token.trim().to_ascii_lowercase().as_str() {
        "up" | "u" => Some(Direction::Up),
        "down" | "d" => Some(Direction::Down),
        "left" | "l" => Some(Direction::Left),
        "right" | "r" => Some(Direction::Right),
        _ => None,
    }
}

/// Parses a bank token. Matching is exact: the recognized spellings are
/// `shared`, `share`, `s`, `individual`, and `i`.
pub fn parse_bank(token: &str) -> Option<Bank> {
    match token {
        "shared" | "share" | "s" => Some(Bank::Shared),
        "individual" | "i" => Some(Bank::Individual),
        _ => None,
    }
}

/// Parses the run-command argument string into a target slot.
///
/// The first whitespace-separated token must be an unsigned number no greater
/// than 99, the second must name a bank. Tokens after the second are ignored.
/// The slot number is validated before the bank token is looked at.
///
/// # Errors
///
/// [`RunArgsError::Empty`] for the exactly-empty string, [`RunArgsError::InvalidSlot`]
/// for a missing or out-of-range number, [`RunArgsError::UnknownBank`] for a
/// missing or unrecognized bank token.
pub fn parse_run_args(args: &str) -> Result<Slot, RunArgsError> {
    if args.is_empty() {
        return Err(RunArgsError::Empty);
    }
    let mut tokens = args.split_whitespace();
    let index = tokens
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .filter(|number| *number <= 99)
        .ok_or(RunArgsError::InvalidSlot)?;
    let bank = tokens
        .next()
        .and_then(parse_bank)
        .ok_or(RunArgsError::UnknownBank)?;
    // Index is proven ≤ 99 above.
    Slot::new(bank, index as u8).ok_or(RunArgsError::InvalidSlot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction_long_and_short_forms() {
        assert_eq!(parse_direction("up"), Some(Direction::Up));
        assert_eq!(parse_direction("u"), Some(Direction::Up));
        assert_eq!(parse_direction("down"), Some(Direction::Down));
        assert_eq!(parse_direction("d"), Some(Direction::Down));
        assert_eq!(parse_direction("left"), Some(Direction::Left));
        assert_eq!(parse_direction("l"), Some(Direction::Left));
        assert_eq!(parse_direction("right"), Some(Direction::Right));
        assert_eq!(parse_direction("r"), Some(Direction::Right));
    }

    #[test]
    fn test_parse_direction_is_case_insensitive() {
        assert_eq!(parse_direction("UP"), Some(Direction::Up));
        assert_eq!(parse_direction("Right"), Some(Direction::Right));
        assert_eq!(parse_direction("L"), Some(Direction::Left));
    }

    #[test]
    fn test_parse_direction_trims_padding() {
        assert_eq!(parse_direction("  down "), Some(Direction::Down));
    }

    #[test]
    fn test_parse_direction_rejects_unknown_tokens() {
        assert_eq!(parse_direction(""), None);
        assert_eq!(parse_direction("north"), None);
        assert_eq!(parse_direction("up down"), None);
    }

    #[test]
    fn test_parse_bank_is_case_sensitive() {
        assert_eq!(parse_bank("shared"), Some(Bank::Shared));
        assert_eq!(parse_bank("share"), Some(Bank::Shared));
        assert_eq!(parse_bank("s"), Some(Bank::Shared));
        assert_eq!(parse_bank("individual"), Some(Bank::Individual));
        assert_eq!(parse_bank("i"), Some(Bank::Individual));
        assert_eq!(parse_bank("Shared"), None);
        assert_eq!(parse_bank("INDIVIDUAL"), None);
        assert_eq!(parse_bank("ind"), None);
    }

    #[test]
    fn test_parse_run_args_accepts_number_and_bank() {
        let slot = parse_run_args("5 shared").unwrap();
        assert_eq!(slot.bank(), Bank::Shared);
        assert_eq!(slot.index(), 5);

        let slot = parse_run_args("99 i").unwrap();
        assert_eq!(slot.bank(), Bank::Individual);
        assert_eq!(slot.index(), 99);
    }

    #[test]
    fn test_parse_run_args_collapses_whitespace() {
        let slot = parse_run_args("  12   share  ").unwrap();
        assert_eq!(slot.bank(), Bank::Shared);
        assert_eq!(slot.index(), 12);
    }

    #[test]
    fn test_parse_run_args_ignores_trailing_tokens() {
        let slot = parse_run_args("7 individual extra words").unwrap();
        assert_eq!(slot.bank(), Bank::Individual);
        assert_eq!(slot.index(), 7);
    }

    #[test]
    fn test_parse_run_args_empty_string_asks_for_help() {
        assert_eq!(parse_run_args(""), Err(RunArgsError::Empty));
    }

    #[test]
    fn test_parse_run_args_whitespace_only_is_an_invalid_slot() {
        // Not the help path: a non-empty string commits to slot validation.
        assert_eq!(parse_run_args("   "), Err(RunArgsError::InvalidSlot));
    }

    #[test]
    fn test_parse_run_args_rejects_bad_numbers() {
        assert_eq!(parse_run_args("100 shared"), Err(RunArgsError::InvalidSlot));
        assert_eq!(parse_run_args("-1 shared"), Err(RunArgsError::InvalidSlot));
        assert_eq!(parse_run_args("abc shared"), Err(RunArgsError::InvalidSlot));
    }

    #[test]
    fn test_parse_run_args_slot_checked_before_bank() {
        // An out-of-range number is reported even when the bank is also bad.
        assert_eq!(parse_run_args("150 nowhere"), Err(RunArgsError::InvalidSlot));
    }

    #[test]
    fn test_parse_run_args_missing_or_unknown_bank() {
        assert_eq!(parse_run_args("5"), Err(RunArgsError::UnknownBank));
        assert_eq!(parse_run_args("5 Shared"), Err(RunArgsError::UnknownBank));
        assert_eq!(parse_run_args("5 both"), Err(RunArgsError::UnknownBank));
    }
}
