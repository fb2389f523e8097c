use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::AsciiSink;

/// Writes the character grid as a standalone HTML page.
///
/// The grid lands in a `<pre>` block styled with the configured font
/// family; characters are HTML-escaped so `<`, `>`, and `&` render as
/// themselves.
pub struct HtmlSink {
    path: PathBuf,
    font_family: String,
}

impl HtmlSink {
    /// Creates a sink writing to `path` with the given font family.
    pub fn new(path: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            font_family: font_family.into(),
        }
    }

    fn render(&self, art: &[Vec<char>]) -> String {
        let mut body = String::new();
        for row in art {
            for &ch in row {
                match ch {
                    '&' => body.push_str("&amp;"),
                    '<' => body.push_str("&lt;"),
                    '>' => body.push_str("&gt;"),
                    other => body.push(other),
                }
            }
            body.push('\n');
        }

        let mut page = String::new();
        // write! into a String cannot fail.
        let _ = write!(
            page,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>glyphgrid</title>\n<style>\n\
             body {{ background: #ffffff; }}\n\
             pre {{ font-family: \"{}\", monospace; line-height: 1.0; letter-spacing: 0.1em; }}\n\
             </style>\n</head>\n<body>\n<pre>\n{body}</pre>\n</body>\n</html>\n",
            self.font_family
        );
        page
    }
}

impl AsciiSink for HtmlSink {
    fn emit(&mut self, art: &[Vec<char>]) -> Result<()> {
        let page = self.render(art);
        std::fs::write(&self.path, page)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        log::info!("wrote {}", self.path.display());
        Ok(())
    }
}
