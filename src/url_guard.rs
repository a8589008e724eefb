// SSRF guard: validates user-supplied URLs before any network access.

use url::Url;

use crate::error::ScrapeError;

/// Parse and validate a scrape target. Rejections carry the specific reason
/// and guarantee that no network request will be attempted.
pub fn validate(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw).map_err(|e| ScrapeError::InvalidUrl {
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ScrapeError::InvalidUrl {
                reason: format!("unsupported scheme '{}'; only http and https are allowed", other),
            })
        }
    }

    let host = url
        .host_str()
        .ok_or_else(|| ScrapeError::InvalidUrl {
            reason: "missing host".to_string(),
        })?
        .to_lowercase();

    if is_private_host(&host) {
        return Err(ScrapeError::InvalidUrl {
            reason: format!("access to local/private networks is not allowed ({})", host),
        });
    }

    Ok(url)
}

/// Blocks localhost and the RFC 1918 private ranges.
fn is_private_host(host: &str) -> bool {
    if host == "localhost" || host == "127.0.0.1" {
        return true;
    }
    if host.starts_with("192.168.") || host.starts_with("10.") {
        return true;
    }
    // 172.16.0.0 - 172.31.255.255
    if let Some(rest) = host.strip_prefix("172.") {
        if let Some(second) = rest.split('.').next() {
            if let Ok(octet) = second.parse::<u8>() {
                return (16..=31).contains(&octet);
            }
        }
    }
    false
}
