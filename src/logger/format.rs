//! Access log formatting
//!
//! Supported formats:
//! - `common` (Common Log Format)
//! - `json` (structured, one object per line)
//! - custom patterns with `$variable` substitution

use chrono::Local;

/// One served request, as recorded in the access log.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client socket address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method
    pub method: String,
    /// Request URI path
    pub path: String,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes (0 for HEAD)
    pub bytes_sent: u64,
    /// `Content-Range` header of the response, when a byte window was served
    pub served_range: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Format the entry according to the named format; unknown names are
    /// treated as custom `$variable` patterns.
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Common Log Format, extended with the served byte window when one
    /// was requested:
    /// `$remote_addr - - [$time_local] "$request" $status $bytes_sent`
    fn format_common(&self) -> String {
        let mut line = format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.http_version,
            self.status,
            self.bytes_sent,
        );
        if let Some(range) = &self.served_range {
            line.push_str(&format!(" \"{range}\""));
        }
        line
    }

    /// JSON structured log format, one object per line.
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "http_version": self.http_version,
            "status": self.status,
            "bytes_sent": self.bytes_sent,
            "served_range": self.served_range,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution.
    ///
    /// Supported variables: `$remote_addr`, `$time_local`, `$request`,
    /// `$request_method`, `$request_uri`, `$request_time`, `$status`,
    /// `$bytes_sent`, `$served_range`, `$http_user_agent`.
    fn format_custom(&self, pattern: &str) -> String {
        let request_line = format!("{} {} HTTP/{}", self.method, self.path, self.http_version);
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        // Longer variables first so $request does not eat $request_time.
        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace(
                "$time_local",
                &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            )
            .replace("$request_time", &format!("{request_time:.3}"))
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.path)
            .replace("$request", &request_line)
            .replace("$status", &self.status.to_string())
            .replace("$bytes_sent", &self.bytes_sent.to_string())
            .replace("$served_range", self.served_range.as_deref().unwrap_or("-"))
            .replace(
                "$http_user_agent",
                self.user_agent.as_deref().unwrap_or("-"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        AccessLogEntry {
            remote_addr: "127.0.0.1:52100".to_string(),
            time: Local::now(),
            method: "GET".to_string(),
            path: "/video.mp4".to_string(),
            http_version: "1.1".to_string(),
            status: 206,
            bytes_sent: 100,
            served_range: Some("bytes 100-199/1000".to_string()),
            user_agent: Some("curl/8.0".to_string()),
            request_time_us: 1500,
        }
    }

    #[test]
    fn common_format_includes_request_line_and_window() {
        let line = sample_entry().format("common");
        assert!(line.contains("127.0.0.1:52100"));
        assert!(line.contains("GET /video.mp4 HTTP/1.1"));
        assert!(line.contains("206 100"));
        assert!(line.contains("bytes 100-199/1000"));
    }

    #[test]
    fn common_format_omits_window_for_full_responses() {
        let mut entry = sample_entry();
        entry.status = 200;
        entry.served_range = None;
        let line = entry.format("common");
        assert!(line.contains("200 100"));
        assert!(!line.contains("bytes "));
    }

    #[test]
    fn json_format_is_parseable() {
        let line = sample_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(value["method"], "GET");
        assert_eq!(value["status"], 206);
        assert_eq!(value["served_range"], "bytes 100-199/1000");
    }

    #[test]
    fn custom_format_substitutes_variables() {
        let line = sample_entry().format("$remote_addr $status $served_range $request_time");
        assert!(line.contains("127.0.0.1:52100"));
        assert!(line.contains("206"));
        assert!(line.contains("bytes 100-199/1000"));
        // 1500us rounds to 0.002 seconds at 3 decimal places
        assert!(line.contains("0.00"));
    }
}
