//! Cover thumbnail URL cleanup

/// Normalize a thumbnail URL for download.
///
/// Returns `None` for missing, blank, or `N/A` values (the card then shows the
/// "Sem Capa" placeholder). Protocol-relative and `http://` URLs become
/// `https://`; Google Books links lose the page-curl effect and ask for the
/// largest zoom.
pub fn sanitize_thumbnail_url(thumbnail: Option<&str>) -> Option<String> {
    let trimmed = thumbnail?.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        return None;
    }

    let mut url = if let Some(rest) = trimmed.strip_prefix("//") {
        format!("https://{}", rest)
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("https://{}", rest)
    } else {
        trimmed.to_string()
    };

    if url.contains("books.google.com") {
        url = url.replace("&edge=curl", "");
        url = reset_zoom(&url);
    }

    Some(url)
}

/// Rewrite every `zoom=<digits>` query value to `zoom=0`
fn reset_zoom(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(pos) = rest.find("zoom=") {
        let after = &rest[pos + 5..];
        let digits = after.chars().take_while(char::is_ascii_digit).count();
        out.push_str(&rest[..pos]);
        out.push_str("zoom=");
        if digits > 0 {
            out.push('0');
        }
        rest = &after[digits..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        assert_eq!(sanitize_thumbnail_url(None), None);
        assert_eq!(sanitize_thumbnail_url(Some("   ")), None);
        assert_eq!(sanitize_thumbnail_url(Some("N/A")), None);
    }

    #[test]
    fn test_upgrades_to_https() {
        assert_eq!(
            sanitize_thumbnail_url(Some("http://covers.example.com/a.jpg")).as_deref(),
            Some("https://covers.example.com/a.jpg")
        );
        assert_eq!(
            sanitize_thumbnail_url(Some("//covers.example.com/a.jpg")).as_deref(),
            Some("https://covers.example.com/a.jpg")
        );
    }

    #[test]
    fn test_google_books_cleanup() {
        let raw = "http://books.google.com/books/content?id=abc&printsec=frontcover&img=1&zoom=1&edge=curl&source=gbs_api";
        assert_eq!(
            sanitize_thumbnail_url(Some(raw)).as_deref(),
            Some("https://books.google.com/books/content?id=abc&printsec=frontcover&img=1&zoom=0&source=gbs_api")
        );
    }

    #[test]
    fn test_other_hosts_keep_zoom() {
        let raw = "https://example.com/cover?zoom=3";
        assert_eq!(sanitize_thumbnail_url(Some(raw)).as_deref(), Some(raw));
    }
}
