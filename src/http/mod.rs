//! HTTP protocol layer
//!
//! Range window math, MIME detection, and response builders, kept free of
//! filesystem and routing concerns so each piece is testable on its own.

pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::{resolve_request_range, RangeOutcome};
pub use response::{
    build_404_response, build_405_response, build_416_response, build_500_response,
    build_full_response, build_html_response, build_options_response, build_partial_response,
    build_redirect_response,
};
