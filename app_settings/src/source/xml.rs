//! Parser for the `appSettings` document layout.
//!
//! ```xml
//! <configuration>
//!   <appSettings>
//!     <add key="Port" value="8080" />
//!   </appSettings>
//! </configuration>
//! ```

use roxmltree::{Document, Node, ParsingOptions};

use super::{ConfigRecord, SourceId};
use crate::{SettingsError, SettingsResult};

/// Name of the element whose children hold the settings.
pub const SECTION_ELEMENT: &str = "appSettings";

const EXPECTED_SHAPE: &str = r#"expected '<add key="KeyName" value="Value" />'"#;

/// Parse the records of the first `appSettings` element in `text`.
///
/// Every child element must carry `key` and `value` attributes; text and
/// comment nodes are ignored. A `<!DOCTYPE>` declaration is accepted. A document without an `appSettings` element
/// yields no records.
///
/// # Errors
///
/// Returns [`SettingsError::MalformedSource`] when `text` is not well-formed
/// XML or a child element lacks a non-empty `key` or a `value`.
///
/// # Examples
///
/// ```rust
/// use app_settings::ConfigSource;
/// use app_settings::source::parse_records;
///
/// let source = ConfigSource::document("inline", "");
/// let records = parse_records(
///     source.id(),
///     r#"<appSettings><add key="Mode" value="fast" /></appSettings>"#,
/// )?;
/// assert_eq!(records[0].key, "Mode");
/// # Ok::<(), std::sync::Arc<app_settings::SettingsError>>(())
/// ```
pub fn parse_records(origin: &SourceId, text: &str) -> SettingsResult<Vec<ConfigRecord>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| SettingsError::malformed_arc(origin, format!("invalid XML: {e}")))?;
    let Some(section) = doc
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == SECTION_ELEMENT)
    else {
        return Ok(Vec::new());
    };
    section
        .children()
        .filter(Node::is_element)
        .map(|child| record_from(origin, &doc, child))
        .collect()
}

fn record_from(origin: &SourceId, doc: &Document<'_>, node: Node<'_, '_>) -> SettingsResult<ConfigRecord> {
    let attribute = |name: &str| {
        node.attribute(name).ok_or_else(|| {
            let pos = doc.text_pos_at(node.range().start);
            SettingsError::malformed_arc(
                origin,
                format!(
                    "<{}> at line {} has no '{name}' attribute; {EXPECTED_SHAPE}",
                    node.tag_name().name(),
                    pos.row
                ),
            )
        })
    };
    let key = attribute("key")?;
    let value = attribute("value")?;
    if key.trim().is_empty() {
        let pos = doc.text_pos_at(node.range().start);
        return Err(SettingsError::malformed_arc(
            origin,
            format!("<{}> at line {} has an empty key", node.tag_name().name(), pos.row),
        ));
    }
    Ok(ConfigRecord::new(key, value))
}
