//! Cover image URLs from the Open Library covers service

/// Derive the Open Library cover URL for an ISBN. The URL is constructed
/// and stored as-is; no request is ever made to verify it resolves.
pub fn cover_url(isbn: Option<&str>) -> Option<String> {
    let isbn = isbn?.trim();
    if isbn.is_empty() {
        return None;
    }
    Some(format!(
        "https://covers.openlibrary.org/b/isbn/{}-L.jpg",
        isbn
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_url_from_isbn() {
        assert_eq!(
            cover_url(Some("9780441013593")).as_deref(),
            Some("https://covers.openlibrary.org/b/isbn/9780441013593-L.jpg")
        );
    }

    #[test]
    fn missing_or_blank_isbn_has_no_cover() {
        assert_eq!(cover_url(None), None);
        assert_eq!(cover_url(Some("")), None);
        assert_eq!(cover_url(Some("   ")), None);
    }
}
