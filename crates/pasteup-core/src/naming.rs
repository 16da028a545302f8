//! Generated file names for pasted images.
//!
//! Names look like `{prefix}{unix-millis}_{suffix}.{ext}` where the suffix is six
//! random base-36 characters, so two pastes in the same millisecond still differ.

use rand::Rng;

use crate::constants::{FALLBACK_EXTENSION, FILE_SUFFIX_LEN};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Extension for a clipboard MIME type. Unknown types get `png`.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    match essence.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/webp" => "webp",
        _ => FALLBACK_EXTENSION,
    }
}

/// Whether a declared clipboard type is an image.
pub fn is_image_type(mime_type: &str) -> bool {
    mime_type.trim_start().to_lowercase().starts_with("image")
}

pub fn generate_file_name(prefix: &str, mime_type: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    generate_file_name_at(prefix, mime_type, millis, &mut rand::rng())
}

/// Deterministic core of [`generate_file_name`].
pub fn generate_file_name_at<R: Rng + ?Sized>(
    prefix: &str,
    mime_type: &str,
    millis: i64,
    rng: &mut R,
) -> String {
    let suffix: String = (0..FILE_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!(
        "{}{}_{}.{}",
        prefix,
        millis,
        suffix,
        extension_for_mime(mime_type)
    )
}
