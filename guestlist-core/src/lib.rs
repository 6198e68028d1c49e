//! Core types for the guest list gateway.
//!
//! This crate holds everything that does not depend on a particular store or
//! HTTP framework:
//! - `GuestRecord` and the row mapper
//! - `layout` for the fixed column layout and row addressing
//! - `SheetStore`, the boundary to the spreadsheet backing the list
//! - `GuestBook`, which resolves guests by name or group and applies RSVPs

pub mod error;
pub mod guest;
pub mod guest_book;
pub mod layout;
pub mod memory;
pub mod store;

pub use error::{GuestListError, GuestListResult};
pub use guest::{GuestRecord, RsvpUpdate, DEFAULT_CONFIRMATION};
pub use guest_book::GuestBook;
pub use layout::{CellRange, Column, RowPosition};
pub use store::SheetStore;
