use serde::Serialize;

use crate::release::ReleaseRecord;

/// Tags that survive sanitizing, only in their attribute-free form.
const ALLOWED_TAGS: &[&str] = &[
    "p",
    "br",
    "hr",
    "strong",
    "b",
    "em",
    "i",
    "code",
    "pre",
    "ul",
    "ol",
    "li",
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

/// Release details ready for a "view details" surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayInfo {
    pub version: String,
    pub source_url: String,
    pub download_url: String,
    pub published_at: String,
    /// Sanitized HTML.
    pub changelog: String,
}

impl DisplayInfo {
    #[must_use]
    pub fn from_record(record: &ReleaseRecord) -> Self {
        Self {
            version: record.version.clone(),
            source_url: record.source_url.clone(),
            download_url: record.download_url.clone(),
            published_at: record.published_at.clone(),
            changelog: sanitize_changelog(&record.description),
        }
    }
}

/// Turn untrusted release notes into display-safe HTML.
///
/// Everything is escaped, then a small set of attribute-free tags is restored
/// and line breaks become `<br />`.
#[must_use]
pub fn sanitize_changelog(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let escaped = htmlescape::encode_minimal(raw);
    let restored = restore_allowed_tags(&escaped);
    convert_line_breaks(&restored)
}

fn restore_allowed_tags(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;

    while let Some(start) = rest.find("&lt;") {
        out.push_str(&rest[..start]);
        let after = &rest[start + "&lt;".len()..];
        match parse_allowed_tag(after) {
            Some((tag, consumed)) => {
                out.push_str(&tag);
                rest = &after[consumed..];
            }
            None => {
                out.push_str("&lt;");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parse `[/]name[ ][/]&gt;` right after an escaped `<`.
fn parse_allowed_tag(input: &str) -> Option<(String, usize)> {
    let (closing, body) = match input.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, input),
    };
    let name_len = body.len() - body.trim_start_matches(|c: char| c.is_ascii_alphanumeric()).len();
    if name_len == 0 {
        return None;
    }
    let name = body[..name_len].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }

    let tail = body[name_len..].trim_start_matches(' ');
    let (self_closing, tail) = match tail.strip_prefix('/') {
        Some(tail) => (true, tail),
        None => (false, tail),
    };
    if !tail.starts_with("&gt;") || (closing && self_closing) {
        return None;
    }

    let consumed = input.len() - tail.len() + "&gt;".len();
    let tag = match (closing, self_closing) {
        (true, _) => format!("</{name}>"),
        (false, true) => format!("<{name} />"),
        (false, false) => format!("<{name}>"),
    };
    Some((tag, consumed))
}

fn convert_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br />\n")
}
