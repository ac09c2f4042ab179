use thiserror::Error;

/// Every way an import can fail.
///
/// `Display` carries diagnostic detail for logs. Callers that answer end
/// users must use [`ImportError::code`] and [`ImportError::user_message`]
/// instead, which never leak upstream bodies or internal errors.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("request did not include a url")]
    MissingUrl,

    #[error("invalid url \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("host {host} is not a supported vendor")]
    UnsupportedVendor { host: String },

    #[error("origin blocked the request to {url} (HTTP 403)")]
    AccessBlocked { url: String },

    #[error("bot protection detected at {url}: {reason}")]
    BotProtectionDetected { url: String, reason: String },

    #[error("origin rate limited the request to {url} (HTTP 429)")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    FetchFailed { status: u16, url: String },

    #[error("no product images found at {url}")]
    NoImagesFound { url: String },

    #[error("fetching {url} did not complete within {secs}s")]
    RequestTimeout { url: String, secs: u64 },

    #[error("connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("import failed: {reason}")]
    Internal { reason: String },
}

impl ImportError {
    /// Stable machine-readable error kind used in response bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingUrl => "missing_url",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::UnsupportedVendor { .. } => "unsupported_vendor",
            Self::AccessBlocked { .. } => "access_blocked",
            Self::BotProtectionDetected { .. } => "bot_protection",
            Self::RateLimited { .. } => "rate_limited",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::NoImagesFound { .. } => "no_images_found",
            Self::RequestTimeout { .. } => "request_timeout",
            Self::ConnectionFailed { .. } => "connection_failed",
            Self::Internal { .. } => "import_failed",
        }
    }

    /// HTTP status the error maps to. `FetchFailed` passes the origin's
    /// status through when it is an error status, else 502.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingUrl | Self::InvalidUrl { .. } | Self::UnsupportedVendor { .. } => 400,
            Self::AccessBlocked { .. } | Self::BotProtectionDetected { .. } => 403,
            Self::RateLimited { .. } => 429,
            Self::FetchFailed { status, .. } => {
                if (400..=599).contains(status) {
                    *status
                } else {
                    502
                }
            }
            Self::NoImagesFound { .. } => 404,
            Self::RequestTimeout { .. } => 504,
            Self::ConnectionFailed { .. } => 502,
            Self::Internal { .. } => 500,
        }
    }

    /// Non-technical text suitable for showing to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingUrl => "Please provide a ring product URL.".to_string(),
            Self::InvalidUrl { .. } => {
                "Please enter a valid URL (e.g., https://www.tiffany.com/...).".to_string()
            }
            Self::UnsupportedVendor { .. } => {
                "This store is not yet supported. Try major retailers like Tiffany, Blue Nile, or James Allen.".to_string()
            }
            Self::AccessBlocked { .. } => {
                "This retailer is blocking automated access. Try saving the ring image and uploading it instead.".to_string()
            }
            Self::BotProtectionDetected { .. } => {
                "This retailer's bot protection prevented the import. Try again later or upload the image directly.".to_string()
            }
            Self::RateLimited { .. } => {
                "This retailer is receiving too many requests. Please wait a moment and try again.".to_string()
            }
            Self::FetchFailed { status, .. } => {
                format!("Could not load the product page (the retailer responded with status {status}).")
            }
            Self::NoImagesFound { .. } => {
                "We couldn't find any ring images on that page. Make sure the link points to a single product.".to_string()
            }
            Self::RequestTimeout { .. } => {
                "The retailer took too long to respond. Please try again.".to_string()
            }
            Self::ConnectionFailed { .. } => {
                "Could not connect to the retailer's website. Check the link and try again.".to_string()
            }
            Self::Internal { .. } => {
                "Something went wrong while importing this ring. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_bad_request() {
        assert_eq!(ImportError::MissingUrl.status_code(), 400);
        let invalid = ImportError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(invalid.status_code(), 400);
        let unsupported = ImportError::UnsupportedVendor {
            host: "example.com".to_string(),
        };
        assert_eq!(unsupported.status_code(), 400);
        assert_eq!(unsupported.code(), "unsupported_vendor");
    }

    #[test]
    fn fetch_failed_passes_origin_error_status_through() {
        let err = ImportError::FetchFailed {
            status: 503,
            url: "https://www.kay.com/ring".to_string(),
        };
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn fetch_failed_with_non_error_status_maps_to_bad_gateway() {
        let err = ImportError::FetchFailed {
            status: 304,
            url: "https://www.kay.com/ring".to_string(),
        };
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn upstream_classifications_have_distinct_statuses() {
        let url = "https://www.zales.com/p".to_string();
        assert_eq!(ImportError::AccessBlocked { url: url.clone() }.status_code(), 403);
        assert_eq!(ImportError::RateLimited { url: url.clone() }.status_code(), 429);
        assert_eq!(ImportError::NoImagesFound { url: url.clone() }.status_code(), 404);
        assert_eq!(
            ImportError::RequestTimeout { url: url.clone(), secs: 20 }.status_code(),
            504
        );
        assert_eq!(
            ImportError::ConnectionFailed {
                url,
                reason: "dns".to_string()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn internal_message_hides_detail() {
        let err = ImportError::Internal {
            reason: "stack overflow in parser at line 42".to_string(),
        };
        assert_eq!(err.code(), "import_failed");
        assert_eq!(err.status_code(), 500);
        assert!(!err.user_message().contains("line 42"));
    }
}
