use super::strategy::ImageFormat;

/// Derive a download file name from a card title.
///
/// Every character outside `[A-Za-z0-9]` becomes `-` and the result is
/// lower-cased. Blank titles use `fallback_stem`.
pub fn file_name(title: &str, fallback_stem: &str, format: ImageFormat) -> String {
    format!("{}.{}", file_stem(title, fallback_stem), format.extension())
}

pub fn file_stem(title: &str, fallback_stem: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return fallback_stem.to_string();
    }
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
