//! Static file serving
//!
//! Translates URL paths to filesystem paths under the document root and
//! serves regular files with byte-range support. Directories fall through
//! to index files or the generated listing.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, mime, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Serve the request path from the document root.
///
/// Resolution order: sanitize and decode the URL path, canonicalize and
/// check containment, then 404 for missing paths, directory handling for
/// directories, and range-aware serving for regular files.
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(relative) = sanitize_request_path(ctx.path) else {
        logger::log_warning(&format!("Rejected request path: {}", ctx.path));
        return http::build_404_response();
    };

    // Canonicalize resolves symlinks before the containment check; a path
    // that fails to resolve does not exist.
    let Ok(resolved) = state.doc_root.join(relative).canonicalize() else {
        return http::build_404_response();
    };

    if !resolved.starts_with(&state.doc_root) {
        logger::log_warning(&format!(
            "Path escapes document root: {} -> {}",
            ctx.path,
            resolved.display()
        ));
        return http::build_404_response();
    }

    let meta = match fs::metadata(&resolved).await {
        Ok(m) => m,
        Err(_) => return http::build_404_response(),
    };

    if meta.is_dir() {
        return serve_directory(ctx, state, &resolved).await;
    }

    serve_file(ctx, &resolved, meta.len()).await
}

/// Decode the URL path and turn it into a relative filesystem path.
///
/// Parent-directory segments are rejected outright; the canonicalize
/// containment check in `serve_path` backstops anything that slips
/// through via symlinks.
fn sanitize_request_path(url_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(url_path).decode_utf8().ok()?;

    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            segment => relative.push(segment),
        }
    }
    Some(relative)
}

/// Directory handling: trailing-slash redirect, index files, listing.
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    // Relative links in a listing only resolve against the directory
    // itself when the URL ends with a slash.
    if !ctx.path.ends_with('/') {
        return http::build_redirect_response(&format!("{}/", ctx.path));
    }

    for index in &state.config.files.index_files {
        let candidate = dir.join(index);
        if let Ok(meta) = fs::metadata(&candidate).await {
            if meta.is_file() {
                return serve_file(ctx, &candidate, meta.len()).await;
            }
        }
    }

    if !state.config.files.auto_index {
        return http::build_404_response();
    }

    match listing::render(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list {}: {e}", dir.display()));
            http::build_500_response()
        }
    }
}

/// Serve a regular file, honoring the request's byte window.
async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    file_size: u64,
) -> Response<Full<Bytes>> {
    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));

    match http::resolve_request_range(ctx.range_header.as_deref(), file_size) {
        RangeOutcome::Full => match read_span(path, 0, file_size).await {
            Ok(body) => http::build_full_response(body, content_type, ctx.is_head),
            Err(e) => {
                logger::log_error(&format!("Failed to read {}: {e}", path.display()));
                http::build_500_response()
            }
        },
        RangeOutcome::Partial { start, end } => {
            match read_span(path, start, end - start + 1).await {
                Ok(body) => {
                    http::build_partial_response(body, content_type, start, end, file_size, ctx.is_head)
                }
                Err(e) => {
                    logger::log_error(&format!(
                        "Failed to read {}-{} of {}: {e}",
                        start,
                        end,
                        path.display()
                    ));
                    http::build_500_response()
                }
            }
        }
        RangeOutcome::NotSatisfiable => http::build_416_response(file_size),
    }
}

/// Open the file, seek to `start`, and read exactly `len` bytes.
///
/// A short read (file truncated since the size was stat'd) surfaces as an
/// error here, before any header is written, so `Content-Length` can never
/// disagree with the bytes sent.
async fn read_span(path: &Path, start: u64, len: u64) -> std::io::Result<Bytes> {
    let mut file = fs::File::open(path).await?;
    if start > 0 {
        file.seek(SeekFrom::Start(start)).await?;
    }

    let len = usize::try_from(len).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "window exceeds memory")
    })?;
    let mut buf = vec![0u8; len];
    file.read_exact(&mut buf).await?;
    Ok(Bytes::from(buf))
}
