/// Rebases an anchor href onto the base URL, or drops it
///
/// Only two shapes of href are followed:
/// - site-relative (`/path`): rebased onto `base_url`
/// - absolute and already under `base_url`: kept as-is
///
/// Anything else (external links, page-relative paths, `mailto:` and friends)
/// yields `None`.
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::rebase_href;
///
/// let base = "https://example.com/";
/// assert_eq!(rebase_href("/a/b", base), Some("https://example.com/a/b".to_string()));
/// assert_eq!(rebase_href("https://example.com/c", base), Some("https://example.com/c".to_string()));
/// assert_eq!(rebase_href("https://other.com/c", base), None);
/// ```
pub fn rebase_href(href: &str, base_url: &str) -> Option<String> {
    let href = href.trim();

    if let Some(path) = href.strip_prefix('/') {
        return Some(format!("{}{}", base_url, path.trim_start_matches('/')));
    }

    if href.starts_with(base_url) {
        return Some(href.to_string());
    }

    None
}
