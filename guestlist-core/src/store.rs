//! Boundary to the spreadsheet that holds the guest list.
//!
//! Implementations own authentication and the target spreadsheet; callers
//! only name a sheet and a range within it.

use std::future::Future;

use crate::error::GuestListResult;
use crate::layout::CellRange;

/// A range-addressable tabular store of strings.
pub trait SheetStore: Clone + Send + Sync + 'static {
    /// Read `range` of `sheet` as rows of cells.
    ///
    /// Trailing empty cells and trailing empty rows may be omitted, so rows
    /// can be shorter than the range and the result may be empty.
    fn fetch(
        &self,
        sheet: &str,
        range: CellRange,
    ) -> impl Future<Output = GuestListResult<Vec<Vec<String>>>> + Send;

    /// Overwrite `range` of `sheet` with `values`, stored verbatim.
    fn write(
        &self,
        sheet: &str,
        range: CellRange,
        values: Vec<Vec<String>>,
    ) -> impl Future<Output = GuestListResult<()>> + Send;
}
