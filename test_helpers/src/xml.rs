//! Builder for `appSettings` documents used as test fixtures.
//!
//! # Examples
//!
//! ```
//! use test_helpers::xml::SettingsXml;
//!
//! let doc = SettingsXml::new().add("Port", "8080").render();
//! assert!(doc.contains(r#"<add key="Port" value="8080" />"#));
//! ```

/// In-memory settings document.
#[derive(Debug, Clone, Default)]
pub struct SettingsXml {
    lines: Vec<String>,
}

impl SettingsXml {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an `<add key=".." value=".." />` entry.
    #[must_use]
    pub fn add(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!(
            r#"<add key="{}" value="{}" />"#,
            escape(key),
            escape(value)
        ));
        self
    }

    /// Appends a verbatim line inside the `appSettings` element, for
    /// malformed entries and comments.
    #[must_use]
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_owned());
        self
    }

    /// Renders the document wrapped in a `<configuration>` root.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<configuration>\n  <appSettings>\n");
        for line in &self.lines {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("  </appSettings>\n</configuration>\n");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
