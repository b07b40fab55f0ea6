//! HTTP client setup and URL helpers.

use reqwest::Client;

use crate::config::Config;
use crate::error::DeskError;

/// Build the shared HTTP client with the configured request timeout.
pub fn build_client(config: &Config) -> Result<Client, DeskError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("order-desk/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Full URL for a stored image path. Absolute URLs pass through; relative
/// paths are served from the API host without its `/api` prefix.
pub fn resolve_image_url(api_url: &str, image_path: &str) -> String {
    if image_path.is_empty() {
        return String::new();
    }
    if image_path.starts_with("http://") || image_path.starts_with("https://") {
        return image_path.to_string();
    }

    let trimmed = api_url.trim_end_matches('/');
    let base = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    if image_path.starts_with('/') {
        format!("{base}{image_path}")
    } else {
        format!("{base}/{image_path}")
    }
}
