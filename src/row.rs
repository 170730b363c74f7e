//! Per-row command records and their rendered results.

use std::fmt;

use tracing::debug;

use crate::crc::{DEFAULT_INITIAL, crc16_ccitt};
use crate::hex::{HexError, decode_hex};

/// Command prefilled into the first row (the 031 application note example).
pub const DEFAULT_COMMAND: &str = "34 1E 08 AC 0D";

/// Number of rows in a fresh table.
pub const ROW_COUNT: usize = 10;

/// Parse a hex initial register value such as `"FFFF"` or `"0x1D0F"`.
pub fn parse_initial(text: &str) -> Option<u16> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Like [`parse_initial`], falling back to [`DEFAULT_INITIAL`].
pub fn initial_or_default(text: &str) -> u16 {
    parse_initial(text).unwrap_or(DEFAULT_INITIAL)
}

/// One line of user input together with its own register seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRow {
    pub input: String,
    pub initial: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowResult {
    /// Nothing was entered.
    Null,
    Crc(u16),
    Error(HexError),
}

impl RowResult {
    pub fn is_error(&self) -> bool {
        matches!(self, RowResult::Error(_))
    }
}

impl fmt::Display for RowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowResult::Null => f.write_str("NULL"),
            RowResult::Crc(crc) => write!(f, "{crc:04X}"),
            RowResult::Error(err) => write!(f, "Error: {err}"),
        }
    }
}

impl CommandRow {
    pub fn new(input: impl Into<String>) -> Self {
        Self::with_initial(input, DEFAULT_INITIAL)
    }

    pub fn with_initial(input: impl Into<String>, initial: u16) -> Self {
        Self {
            input: input.into(),
            initial,
        }
    }

    /// Decode the input and checksum it with this row's initial value.
    pub fn evaluate(&self) -> RowResult {
        let text = self.input.trim();
        if text.is_empty() {
            return RowResult::Null;
        }

        match decode_hex(text) {
            Ok(bytes) => RowResult::Crc(crc16_ccitt(&bytes, self.initial)),
            Err(err) => RowResult::Error(err),
        }
    }
}

/// Caller-owned collection of rows, evaluated on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    rows: Vec<CommandRow>,
}

impl CommandTable {
    /// [`ROW_COUNT`] rows, the first one holding [`DEFAULT_COMMAND`].
    pub fn new() -> Self {
        let mut rows = vec![CommandRow::new(""); ROW_COUNT];
        rows[0].input = DEFAULT_COMMAND.to_string();
        Self { rows }
    }

    pub fn from_inputs<I, S>(inputs: I, initial: u16) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: inputs
                .into_iter()
                .map(|input| CommandRow::with_initial(input, initial))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[CommandRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [CommandRow] {
        &mut self.rows
    }

    pub fn calculate(&self) -> Vec<RowResult> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let result = row.evaluate();
                debug!(index, initial = row.initial, %result, "evaluated row");
                result
            })
            .collect()
    }

    /// Restore the first row to [`DEFAULT_COMMAND`] and empty the rest.
    /// Initial values are left alone.
    pub fn clear(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.input.clear();
            if index == 0 {
                row.input.push_str(DEFAULT_COMMAND);
            }
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}
