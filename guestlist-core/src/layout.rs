//! Fixed column layout of the guest sheet and A1 addressing.
//!
//! Row 1 is a header and is never read or written. Data starts at row 2:
//!
//! | A | B | C | D | E |
//! |---|---|---|---|---|
//! | group id | party size | name | confirmation | preferences |

use std::fmt;

/// First row holding guest data (row 1 is the header).
pub const FIRST_DATA_ROW: u32 = 2;

/// A column of the guest sheet. The order is part of the contract with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Group,
    PartySize,
    Name,
    Confirmation,
    Preferences,
}

impl Column {
    /// Zero-based offset of this column within a fetched row.
    pub fn index(self) -> usize {
        match self {
            Column::Group => 0,
            Column::PartySize => 1,
            Column::Name => 2,
            Column::Confirmation => 3,
            Column::Preferences => 4,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Column::Group => 'A',
            Column::PartySize => 'B',
            Column::Name => 'C',
            Column::Confirmation => 'D',
            Column::Preferences => 'E',
        }
    }

    /// Whether this system is allowed to write to the column.
    pub fn is_writable(self) -> bool {
        matches!(self, Column::Confirmation | Column::Preferences)
    }
}

/// A 1-based row number in the sheet. Data rows start at [`FIRST_DATA_ROW`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowPosition(u32);

impl RowPosition {
    /// Convert a 0-based index into a fetched data span into a sheet row.
    ///
    /// This is the only place that knows data spans start after the header.
    pub fn from_scan_index(index: usize) -> Self {
        RowPosition(index as u32 + FIRST_DATA_ROW)
    }

    /// Returns `None` for the header row or row 0.
    pub fn new(row: u32) -> Option<Self> {
        (row >= FIRST_DATA_ROW).then_some(RowPosition(row))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Inverse of [`RowPosition::from_scan_index`].
    pub fn scan_index(self) -> usize {
        (self.0 - FIRST_DATA_ROW) as usize
    }
}

impl fmt::Display for RowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rectangular range within one sheet, without the sheet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRange {
    /// A single cell, e.g. `D5`.
    Cell { column: Column, row: RowPosition },
    /// Columns `first..=last` from the first data row to the end of the sheet,
    /// e.g. `A2:E` or `C2:C`.
    Span { first: Column, last: Column },
}

impl CellRange {
    /// Every data column of every guest row.
    pub const ALL_GUESTS: CellRange = CellRange::Span {
        first: Column::Group,
        last: Column::Preferences,
    };

    pub fn column(column: Column) -> Self {
        CellRange::Span {
            first: column,
            last: column,
        }
    }

    pub fn cell(column: Column, row: RowPosition) -> Self {
        CellRange::Cell { column, row }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRange::Cell { column, row } => write!(f, "{}{}", column.letter(), row),
            CellRange::Span { first, last } => write!(
                f,
                "{}{}:{}",
                first.letter(),
                FIRST_DATA_ROW,
                last.letter()
            ),
        }
    }
}
