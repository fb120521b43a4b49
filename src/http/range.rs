//! HTTP Range request resolution
//!
//! Computes the byte window a `Range` header selects from a file of known
//! size. Parsing is deliberately permissive: only the single-range
//! `bytes=<start>-<end>` form (digits optional on either side) is
//! recognized, and anything else is ignored rather than rejected with a
//! `400`.

/// Outcome of resolving a `Range` header against a file's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header, or one that does not match the recognized pattern;
    /// serve the whole file with `200 OK`.
    Full,
    /// Serve the inclusive window `[start, end]` with `206 Partial Content`.
    Partial { start: u64, end: u64 },
    /// The window cannot be satisfied; respond `416 Range Not Satisfiable`.
    NotSatisfiable,
}

/// Resolve an optional `Range` header into a serving window.
///
/// Omitted start digits default to `0` and omitted end digits default to
/// `file_size - 1`. This means `bytes=-500` selects `[0, 500]`, not the
/// last 500 bytes as RFC 7233 suffix ranges would; callers relying on
/// suffix semantics get the head of the file instead.
///
/// An explicit end past the last valid offset is clamped to
/// `file_size - 1` so the subsequent read never runs past EOF.
///
/// # Examples
/// ```
/// use rangehttpd::http::range::{resolve_request_range, RangeOutcome};
///
/// let outcome = resolve_request_range(Some("bytes=100-199"), 1000);
/// assert_eq!(outcome, RangeOutcome::Partial { start: 100, end: 199 });
///
/// assert_eq!(resolve_request_range(None, 1000), RangeOutcome::Full);
/// ```
pub fn resolve_request_range(header: Option<&str>, file_size: u64) -> RangeOutcome {
    let Some((start, end)) = header.and_then(parse_bytes_spec) else {
        return RangeOutcome::Full;
    };

    let last = file_size.saturating_sub(1);
    let start = start.unwrap_or(0);
    let end = end.map_or(last, |e| e.min(last));

    if start > end || start >= file_size {
        return RangeOutcome::NotSatisfiable;
    }

    RangeOutcome::Partial { start, end }
}

/// Parse the header value against `bytes=<start?>-<end?>`.
///
/// Returns `None` for anything that does not match the pattern: a different
/// unit, non-numeric offsets, trailing garbage, or a multi-range list
/// (unsupported, treated like any other unrecognized header).
fn parse_bytes_spec(header: &str) -> Option<(Option<u64>, Option<u64>)> {
    let spec = header.strip_prefix("bytes=")?;

    if spec.contains(',') {
        return None;
    }

    let (start_str, end_str) = spec.split_once('-')?;
    let start = parse_offset(start_str.trim())?;
    let end = parse_offset(end_str.trim())?;

    Some((start, end))
}

/// Empty digits are a valid omission; anything non-numeric is not.
fn parse_offset(digits: &str) -> Option<Option<u64>> {
    if digits.is_empty() {
        return Some(None);
    }
    digits.parse().ok().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_serves_full_file() {
        assert_eq!(resolve_request_range(None, 1000), RangeOutcome::Full);
    }

    #[test]
    fn bounded_range() {
        assert_eq!(
            resolve_request_range(Some("bytes=100-199"), 1000),
            RangeOutcome::Partial {
                start: 100,
                end: 199
            }
        );
    }

    #[test]
    fn open_ended_range_runs_to_last_byte() {
        assert_eq!(
            resolve_request_range(Some("bytes=950-"), 1000),
            RangeOutcome::Partial {
                start: 950,
                end: 999
            }
        );
    }

    #[test]
    fn suffix_form_reads_from_file_start() {
        // Deviates from RFC 7233: `bytes=-500` is an absolute end offset
        // with the start defaulting to 0, not "the last 500 bytes".
        assert_eq!(
            resolve_request_range(Some("bytes=-500"), 1000),
            RangeOutcome::Partial { start: 0, end: 500 }
        );
    }

    #[test]
    fn bare_dash_selects_whole_file_as_partial() {
        // Both offsets omitted still matches the pattern, so the default
        // window is served with a 206 rather than a 200.
        assert_eq!(
            resolve_request_range(Some("bytes=-"), 1000),
            RangeOutcome::Partial { start: 0, end: 999 }
        );
    }

    #[test]
    fn end_past_eof_is_clamped() {
        assert_eq!(
            resolve_request_range(Some("bytes=900-1000"), 1000),
            RangeOutcome::Partial {
                start: 900,
                end: 999
            }
        );
    }

    #[test]
    fn start_at_or_past_eof_is_not_satisfiable() {
        assert_eq!(
            resolve_request_range(Some("bytes=1000-"), 1000),
            RangeOutcome::NotSatisfiable
        );
        assert_eq!(
            resolve_request_range(Some("bytes=5000-6000"), 1000),
            RangeOutcome::NotSatisfiable
        );
    }

    #[test]
    fn inverted_range_is_not_satisfiable() {
        assert_eq!(
            resolve_request_range(Some("bytes=500-400"), 1000),
            RangeOutcome::NotSatisfiable
        );
    }

    #[test]
    fn malformed_headers_are_ignored() {
        for header in [
            "banana",
            "bytes=",
            "bytes=abc-def",
            "bytes=12x-30",
            "bytes=10-20xyz",
            "chunks=0-99",
        ] {
            assert_eq!(
                resolve_request_range(Some(header), 1000),
                RangeOutcome::Full,
                "header {header:?} should be ignored"
            );
        }
    }

    #[test]
    fn multi_range_is_ignored() {
        assert_eq!(
            resolve_request_range(Some("bytes=0-10,20-30"), 1000),
            RangeOutcome::Full
        );
    }

    #[test]
    fn single_byte_range() {
        assert_eq!(
            resolve_request_range(Some("bytes=0-0"), 1000),
            RangeOutcome::Partial { start: 0, end: 0 }
        );
    }

    #[test]
    fn empty_file() {
        assert_eq!(resolve_request_range(None, 0), RangeOutcome::Full);
        assert_eq!(
            resolve_request_range(Some("bytes=0-"), 0),
            RangeOutcome::NotSatisfiable
        );
        assert_eq!(
            resolve_request_range(Some("bytes=-"), 0),
            RangeOutcome::NotSatisfiable
        );
    }
}
