use crate::ConfigError;
use url::Url;

/// Normalizes a base URL so that it ends in exactly one slash
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://example.com"), "https://example.com/");
/// assert_eq!(normalize_base_url("https://example.com///"), "https://example.com/");
/// assert_eq!(normalize_base_url("https://example.com/shop/"), "https://example.com/shop/");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}

/// Joins a path onto a normalized base URL
///
/// Leading slashes on `path` are dropped so the result never contains a
/// doubled separator. Trailing slashes are preserved since they are
/// significant to most target patterns.
pub fn join_path(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url, path.trim_start_matches('/'))
}

/// Parses and validates a base URL from configuration
///
/// Only absolute `http` and `https` URLs with a host are accepted.
pub fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https, got '{}'",
            base_url,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            base_url
        )));
    }

    Ok(url)
}
