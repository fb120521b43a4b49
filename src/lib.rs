//! rangehttpd: a local static file server with HTTP Range support
//!
//! Serves a directory over HTTP and honors `Range: bytes=start-end`
//! requests so browsers can seek in audio and video files. The range
//! window math lives in [`http::range`]; everything else is the plumbing
//! around it: path translation, directory listings, MIME detection, and
//! the tokio/hyper connection layer.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
