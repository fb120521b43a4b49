//! Request handling
//!
//! Dispatch, path translation, range-aware file serving, and directory
//! listings.

pub mod listing;
pub mod router;
pub mod static_files;

pub use router::{handle_request, RequestContext};
