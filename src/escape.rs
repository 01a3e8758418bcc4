use crate::autoescape::DEFAULT_CONTENT_TYPE;
use crate::error::{Result, TsutaError};
use crate::value::Value;
use std::collections::HashMap;

/// An encoding function mapping raw text to text safe for one content type
pub type Escaper = fn(&str) -> String;

/// Mapping from content-type label to encoder.
///
/// The mapping is instance state, constructed once and passed explicitly to
/// whatever resolves the `escape` filter; it is never process-wide.
pub struct Escapers {
    map: HashMap<String, Escaper>,
}

impl Escapers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Register an encoder for a content-type label, replacing any existing
    /// one
    pub fn register(&mut self, content_type: impl Into<String>, escaper: Escaper) {
        self.map.insert(content_type.into(), escaper);
    }

    /// Look up the encoder for a content-type label
    pub fn get(&self, content_type: &str) -> Option<Escaper> {
        self.map.get(content_type).copied()
    }

    /// Apply the `escape` filter: `escape(value, content_type?)`.
    ///
    /// The content type defaults to `html` when no argument is supplied. A
    /// value already marked safe for the requested type is returned
    /// unchanged; an unregistered content type is a reported error, never a
    /// silent empty value.
    pub fn escape(&self, value: &Value, args: &[Value]) -> Result<Value> {
        let content_type = match args.first() {
            Some(arg) => arg.stringify()?,
            None => DEFAULT_CONTENT_TYPE.to_string(),
        };

        if value.is_safe(&content_type) {
            return Ok(value.clone());
        }

        let escaper = self
            .map
            .get(content_type.as_str())
            .ok_or_else(|| TsutaError::UnknownContentType {
                name: content_type.clone(),
            })?;

        Ok(Value::safe(escaper(&value.stringify()?), content_type))
    }
}

impl Default for Escapers {
    /// Registry with the standard encoders: `html`, `html_attr`, `js`,
    /// `css`, `url`
    fn default() -> Self {
        let mut escapers = Self::new();
        escapers.register("html", escape_html);
        escapers.register("html_attr", escape_html_attr);
        escapers.register("js", escape_js);
        escapers.register("css", escape_css);
        escapers.register("url", escape_url);
        escapers
    }
}

/// Escape HTML special characters: & < > " '
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
    output
}

/// Escape text for an HTML attribute context.
///
/// ASCII alphanumerics and `, . - _` pass through; everything else becomes
/// a hexadecimal character reference.
pub fn escape_html_attr(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '-' | '_') {
            output.push(c);
        } else {
            output.push_str(&format!("&#x{:X};", c as u32));
        }
    }
    output
}

/// Escape text for a JavaScript string context.
///
/// ASCII alphanumerics and `, . _` pass through; other characters become
/// `\xHH` below U+0100 and `\uHHHH` above.
pub fn escape_js(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '_') {
            output.push(c);
        } else if (c as u32) < 0x100 {
            output.push_str(&format!("\\x{:02X}", c as u32));
        } else {
            output.push_str(&format!("\\u{:04X}", c as u32));
        }
    }
    output
}

/// Escape text for a CSS context.
///
/// ASCII alphanumerics pass through; everything else becomes a hexadecimal
/// escape with a terminating space.
pub fn escape_css(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            output.push(c);
        } else {
            output.push_str(&format!("\\{:X} ", c as u32));
        }
    }
    output
}

/// Percent-encode text for a URL query parameter context.
///
/// RFC 3986 unreserved characters pass through; every other byte of the
/// UTF-8 encoding is percent-encoded.
pub fn escape_url(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                output.push(byte as char);
            }
            _ => output.push_str(&format!("%{:02X}", byte)),
        }
    }
    output
}
