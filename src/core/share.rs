use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareLinkError {
    #[error("fragment does not start with '!'")]
    MissingBang,
    #[error("fragment has no audio url")]
    EmptyUrl,
}

/// Location fragment (without `#`) that reopens the page on `url`.
pub fn format_fragment(url: &str) -> String {
    format!("!{}", url.trim())
}

/// Audio url from a `#!<url>` / `!<url>` fragment.
pub fn parse_fragment(hash: &str) -> Result<String, ShareLinkError> {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    let url = hash.strip_prefix('!').ok_or(ShareLinkError::MissingBang)?.trim();
    if url.is_empty() {
        return Err(ShareLinkError::EmptyUrl);
    }
    Ok(url.to_string())
}
