//! Profile image encoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Embeds raw image bytes as a `data:` URL typed with the MIME essence.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_essence(mime), STANDARD.encode(bytes))
}

/// Accepts `image/*` MIME types, ignoring parameters (`image/png; q=1`).
pub fn is_image_mime(mime: &str) -> bool {
    mime_essence(mime)
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// `type/subtype` without parameters, lowercased.
fn mime_essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
