//! Request URL validation and vendor resolution.

use reqwest::Url;
use ringdesign_core::{Vendor, VendorRegistry};

use crate::error::ImportError;

/// Validate a caller-supplied URL before any network access.
///
/// # Errors
///
/// - [`ImportError::MissingUrl`] — blank input.
/// - [`ImportError::InvalidUrl`] — not an absolute `http`/`https` URL with a host.
pub fn validate_import_url(raw: &str) -> Result<Url, ImportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ImportError::MissingUrl);
    }

    let url = Url::parse(trimmed).map_err(|e| ImportError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ImportError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ImportError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

/// Map a raw URL to its vendor. Unparseable URLs resolve to `None`.
#[must_use]
pub fn resolve_vendor<'a>(registry: &'a VendorRegistry, raw_url: &str) -> Option<&'a Vendor> {
    let url = Url::parse(raw_url.trim()).ok()?;
    resolve_vendor_for_url(registry, &url)
}

/// Substring match of the lower-cased hostname against each vendor's
/// `www.`-stripped domain, so regional subdomains (`uk.tiffany.com`) still
/// match. First entry in registry order wins.
#[must_use]
pub fn resolve_vendor_for_url<'a>(registry: &'a VendorRegistry, url: &Url) -> Option<&'a Vendor> {
    let host = url.host_str()?.to_lowercase();
    registry
        .vendors()
        .iter()
        .find(|vendor| host.contains(&vendor.match_pattern()))
}
