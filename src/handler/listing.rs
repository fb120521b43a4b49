//! Directory listing generation
//!
//! Renders the HTML page served for directories that have no index file.
//! Entry names are HTML-escaped for display and percent-encoded in hrefs.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::Path;
use tokio::fs;

/// Characters escaped inside generated hrefs beyond controls. `/` stays
/// literal so subdirectory links keep their trailing slash.
const HREF_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

/// Render the listing for `dir`, displayed under the request's URL path.
pub async fn render(dir: &Path, url_path: &str) -> std::io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let display_path = percent_encoding::percent_decode_str(url_path).decode_utf8_lossy();
    let title = format!("Directory listing for {}", escape_html(&display_path));

    let mut items = String::new();
    for name in &names {
        let href = utf8_percent_encode(name, HREF_ESCAPE).to_string();
        let label = escape_html(name);
        items.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>\n"));
    }

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <hr>\n\
         <ul>\n{items}</ul>\n\
         <hr>\n\
         </body>\n\
         </html>\n"
    ))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_sorted_entries_with_directory_slash() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.mp3"), b"x").expect("write");
        std::fs::write(dir.path().join("a.mp4"), b"x").expect("write");
        std::fs::create_dir(dir.path().join("clips")).expect("mkdir");

        let html = render(dir.path(), "/").await.expect("renders");
        assert!(html.contains("Directory listing for /"));
        assert!(html.contains("<a href=\"a.mp4\">a.mp4</a>"));
        assert!(html.contains("<a href=\"clips/\">clips/</a>"));

        let a = html.find("a.mp4").expect("a.mp4 listed");
        let b = html.find("b.mp3").expect("b.mp3 listed");
        assert!(a < b, "entries should be sorted");
    }

    #[tokio::test]
    async fn names_are_escaped_and_hrefs_encoded() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a <b>.txt"), b"x").expect("write");

        let html = render(dir.path(), "/").await.expect("renders");
        assert!(html.contains("a &lt;b&gt;.txt"));
        assert!(html.contains("href=\"a%20%3Cb%3E.txt\""));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("gone");
        assert!(render(&gone, "/gone/").await.is_err());
    }
}
