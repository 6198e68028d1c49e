//! guestlist-sheets - Google Sheets backend for the guest list gateway
//!
//! Implements `SheetStore` on top of the Sheets v4 REST API, authenticating
//! as a service account. Access tokens are cached in the client and
//! refreshed shortly before they expire.

mod client;
mod credentials;
mod session;

pub use client::{DEFAULT_API_URL, SheetsClient, a1_range};
pub use credentials::ServiceAccountKey;
