//! A small escaping HTML writer.
//!
//! Every piece of user text goes through `text` or an attribute value, both of
//! which escape. `raw` is reserved for markup and CSS produced by the renderer.

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

#[derive(Debug, Default)]
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        encode_text_to_string(text, &mut self.buf);
        self
    }

    /// Opens `<tag class="…">`; an empty class emits a bare tag.
    pub fn open(&mut self, tag: &str, class: &str) -> &mut Self {
        if class.is_empty() {
            self.open_with(tag, &[])
        } else {
            self.open_with(tag, &[("class", class)])
        }
    }

    pub fn open_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            encode_double_quoted_attribute_to_string(value, &mut self.buf);
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// `<tag class="…">text</tag>`.
    pub fn element(&mut self, tag: &str, class: &str, text: &str) -> &mut Self {
        self.open(tag, class).text(text).close(tag)
    }

    /// A link when `href` is safe to follow, plain text otherwise.
    pub fn link(&mut self, class: &str, href: Option<&str>, text: &str) -> &mut Self {
        match href {
            Some(href) => self
                .open_with("a", &[("class", class), ("href", href)])
                .text(text)
                .close("a"),
            None => self.element("span", class, text),
        }
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Normalizes a user-entered URL into an `href`.
///
/// Only web, mail and phone links survive; bare domains get `https://`.
pub fn safe_href(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let lower = raw.to_ascii_lowercase();
    if ["http://", "https://", "mailto:", "tel:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return Some(raw.to_string());
    }
    if lower.contains(':') {
        return None;
    }
    Some(format!("https://{raw}"))
}
