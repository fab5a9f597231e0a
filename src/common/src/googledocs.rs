use once_cell::sync::Lazy;
use regex::Regex;

static GOOGLEDOCS_URL: Lazy<Regex> = Lazy::new(|| {
    // ASCII-only case folding, so non-ASCII lookalikes never match the host
    Regex::new(r".*://(?i-u:docs\.google\.com/document/d/)([^/]*)/.*")
        .expect("Google Docs URL pattern is valid")
});

/// Given a URL like:
///   https://docs.google.com/document/d/jkldfhjklhdkljer8934789468976sduiyui34778dey/edit/foo/bar
/// extract the associated document ID:
///   jkldfhjklhdkljer8934789468976sduiyui34778dey
///
/// Returns `None` if the URL is not a Google Docs document URL. The ID is returned as-is,
/// without decoding or validation.
pub fn googledocs_id_from_url(url: &str) -> Option<&str> {
    GOOGLEDOCS_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
