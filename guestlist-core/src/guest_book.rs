//! Guest lookup and RSVP updates against a [`SheetStore`].
//!
//! Lookups fetch a single column and compare cells exactly (no trimming or
//! case folding). Updates only ever touch the confirmation and preferences
//! cells, one cell per write, and are not rolled back on failure.

use tracing::debug;

use crate::error::{GuestListError, GuestListResult};
use crate::guest::{GuestRecord, RsvpUpdate, guests_from_rows};
use crate::layout::{CellRange, Column, RowPosition};
use crate::store::SheetStore;

/// The guest list held in one sheet of a store.
#[derive(Clone)]
pub struct GuestBook<S> {
    store: S,
    sheet: String,
}

fn first_cell_is(row: &[String], key: &str) -> bool {
    row.first().is_some_and(|cell| cell == key)
}

impl<S: SheetStore> GuestBook<S> {
    pub fn new(store: S, sheet: impl Into<String>) -> Self {
        GuestBook {
            store,
            sheet: sheet.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every guest row, in sheet order.
    pub async fn guests(&self) -> GuestListResult<Vec<GuestRecord>> {
        let rows = self.store.fetch(&self.sheet, CellRange::ALL_GUESTS).await?;
        Ok(guests_from_rows(&rows))
    }

    /// Row of the first guest whose name equals `name`.
    pub async fn find_guest_row(&self, name: &str) -> GuestListResult<RowPosition> {
        let rows = self
            .store
            .fetch(&self.sheet, CellRange::column(Column::Name))
            .await?;

        let row = rows
            .iter()
            .position(|row| first_cell_is(row, name))
            .map(RowPosition::from_scan_index)
            .ok_or_else(|| GuestListError::GuestNotFound(name.to_string()))?;

        debug!(guest = name, %row, "resolved guest");
        Ok(row)
    }

    /// Rows of every guest in group `group_id`, in sheet order.
    pub async fn find_group_rows(&self, group_id: &str) -> GuestListResult<Vec<RowPosition>> {
        let rows = self
            .store
            .fetch(&self.sheet, CellRange::column(Column::Group))
            .await?;

        let matches: Vec<RowPosition> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| first_cell_is(row, group_id))
            .map(|(index, _)| RowPosition::from_scan_index(index))
            .collect();

        if matches.is_empty() {
            return Err(GuestListError::GroupNotFound(group_id.to_string()));
        }

        debug!(group_id, rows = matches.len(), "resolved group");
        Ok(matches)
    }

    /// Write the RSVP into each row in turn.
    ///
    /// The confirmation cell is always written. The preferences cell is
    /// written only when the update carries non-empty preferences. A failed
    /// write stops the loop; rows already written stay written.
    pub async fn apply_update(
        &self,
        rows: &[RowPosition],
        update: &RsvpUpdate,
    ) -> GuestListResult<()> {
        for &row in rows {
            self.write_cell(Column::Confirmation, row, update.confirmation_text())
                .await?;

            if let Some(preferences) = update.preferences_text() {
                self.write_cell(Column::Preferences, row, preferences).await?;
            }
        }
        Ok(())
    }

    /// Confirm attendance for the guest called `name`.
    pub async fn confirm_guest(&self, name: &str, update: &RsvpUpdate) -> GuestListResult<()> {
        let row = self.find_guest_row(name).await?;
        self.apply_update(&[row], update).await
    }

    /// Confirm attendance for every guest in group `group_id`.
    pub async fn confirm_group(&self, group_id: &str, update: &RsvpUpdate) -> GuestListResult<()> {
        let rows = self.find_group_rows(group_id).await?;
        self.apply_update(&rows, update).await
    }

    async fn write_cell(&self, column: Column, row: RowPosition, value: &str) -> GuestListResult<()> {
        debug_assert!(column.is_writable());

        let range = CellRange::cell(column, row);
        debug!(sheet = %self.sheet, %range, "writing cell");
        self.store
            .write(&self.sheet, range, vec![vec![value.to_string()]])
            .await
    }
}
