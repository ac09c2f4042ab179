//! End-to-end import: URL in, [`ImportedRing`] out.

use std::sync::Arc;

use ringdesign_core::{AppConfig, Vendor, VendorRegistry};

use crate::document::ProductDocument;
use crate::error::ImportError;
use crate::fetch::{FetchSettings, PageFetcher};
use crate::guard::detect_bot_protection;
use crate::images::extract_images;
use crate::metadata::extract_metadata;
use crate::types::{FetchedPage, ImportedRing};
use crate::vendor::{resolve_vendor_for_url, validate_import_url};

/// Thresholds applied after the page has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_images: usize,
    pub min_image_dimension: u32,
    pub min_body_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_images: 10,
            min_image_dimension: 300,
            min_body_chars: 1000,
        }
    }
}

impl ExtractionLimits {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_images: config.max_images,
            min_image_dimension: config.min_image_dimension,
            min_body_chars: config.min_body_chars,
        }
    }
}

/// Turn a fetched page into an [`ImportedRing`].
///
/// Synchronous on purpose: the parsed document is not `Send` and must not
/// live across an `.await`.
///
/// # Errors
///
/// - [`ImportError::BotProtectionDetected`] — the body looks like a challenge page.
/// - [`ImportError::NoImagesFound`] — no stage produced an image.
pub fn extract_ring(
    vendor: &Vendor,
    requested_url: &str,
    page: &FetchedPage,
    limits: &ExtractionLimits,
) -> Result<ImportedRing, ImportError> {
    if let Some(reason) = detect_bot_protection(&page.html, limits.min_body_chars) {
        tracing::warn!(url = %page.final_url, %reason, "bot protection detected");
        return Err(ImportError::BotProtectionDetected {
            url: page.final_url.to_string(),
            reason,
        });
    }

    let doc = ProductDocument::parse(&page.html);
    let images = extract_images(
        &doc,
        &page.final_url,
        limits.max_images,
        limits.min_image_dimension,
    );
    if images.is_empty() {
        tracing::warn!(url = %page.final_url, "no product images found");
        return Err(ImportError::NoImagesFound {
            url: page.final_url.to_string(),
        });
    }
    let metadata = extract_metadata(&doc);

    tracing::debug!(
        vendor = %vendor.name,
        status = page.status,
        images = images.len(),
        json_ld_blocks = doc.json_ld().len(),
        has_title = metadata.title.is_some(),
        has_price = metadata.price.is_some(),
        "extracted product page"
    );

    Ok(ImportedRing {
        vendor: vendor.match_pattern(),
        url: requested_url.to_string(),
        images,
        metadata,
    })
}

/// Validates, resolves, fetches and extracts a ring product page.
///
/// Cloning is cheap: the registry is shared and the fetcher shares its
/// connection pool.
#[derive(Debug, Clone)]
pub struct RingImporter {
    registry: Arc<VendorRegistry>,
    fetcher: PageFetcher,
    limits: ExtractionLimits,
}

impl RingImporter {
    #[must_use]
    pub fn new(registry: VendorRegistry, fetcher: PageFetcher, limits: ExtractionLimits) -> Self {
        Self {
            registry: Arc::new(registry),
            fetcher,
            limits,
        }
    }

    /// Build an importer from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Internal`] if the HTTP client cannot be built.
    pub fn from_app_config(
        config: &AppConfig,
        registry: VendorRegistry,
    ) -> Result<Self, ImportError> {
        let fetcher = PageFetcher::new(&FetchSettings::from_app_config(config))?;
        Ok(Self::new(
            registry,
            fetcher,
            ExtractionLimits::from_app_config(config),
        ))
    }

    #[must_use]
    pub fn registry(&self) -> &VendorRegistry {
        &self.registry
    }

    /// Import the product at `raw_url`.
    ///
    /// Validation and vendor resolution happen before any network access.
    ///
    /// # Errors
    ///
    /// Any [`ImportError`]; see the variant docs for when each applies.
    pub async fn import(&self, raw_url: &str) -> Result<ImportedRing, ImportError> {
        let url = validate_import_url(raw_url)?;

        let Some(vendor) = resolve_vendor_for_url(&self.registry, &url) else {
            let host = url.host_str().unwrap_or_default().to_string();
            tracing::debug!(%host, "rejecting unsupported vendor");
            return Err(ImportError::UnsupportedVendor { host });
        };

        tracing::info!(vendor = %vendor.name, url = %url, "importing ring");

        let page = self.fetcher.fetch(&url).await.inspect_err(|e| {
            tracing::warn!(vendor = %vendor.name, url = %url, error = %e, "page fetch failed");
        })?;

        extract_ring(vendor, raw_url.trim(), &page, &self.limits)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Url;

    use super::*;

    fn vendor() -> Vendor {
        Vendor {
            domain: "www.bluenile.com".to_string(),
            name: "Blue Nile".to_string(),
        }
    }

    fn page(html: String) -> FetchedPage {
        FetchedPage {
            html,
            status: 200,
            final_url: Url::parse("https://www.bluenile.com/ring/123").expect("valid url"),
        }
    }

    fn product_html(body: &str) -> String {
        format!(
            r#"<html><head>
                 <meta property="og:title" content="Platinum Solitaire">
                 <meta property="og:description" content="A platinum solitaire with a 1 ct oval diamond.">
               </head><body>{body}<p>{}</p></body></html>"#,
            "Timeless engagement ring. ".repeat(50)
        )
    }

    #[test]
    fn assembles_ring_from_page() {
        let html = product_html(r#"<img src="/media/ring.jpg">"#);
        let ring = extract_ring(
            &vendor(),
            "https://www.bluenile.com/ring/123?utm=x",
            &page(html),
            &ExtractionLimits::default(),
        )
        .expect("import should succeed");

        assert_eq!(ring.vendor, "bluenile.com");
        assert_eq!(ring.url, "https://www.bluenile.com/ring/123?utm=x");
        assert_eq!(ring.images, vec!["https://www.bluenile.com/media/ring.jpg"]);
        assert_eq!(ring.metadata.title.as_deref(), Some("Platinum Solitaire"));
        assert_eq!(ring.metadata.metal_type.as_deref(), Some("platinum"));
        assert_eq!(ring.metadata.carat_weight.as_deref(), Some("1 ct"));
    }

    #[test]
    fn page_without_images_is_an_error() {
        let err = extract_ring(
            &vendor(),
            "https://www.bluenile.com/ring/123",
            &page(product_html("")),
            &ExtractionLimits::default(),
        )
        .expect_err("no images should fail");
        assert!(matches!(err, ImportError::NoImagesFound { .. }));
    }

    #[test]
    fn short_body_is_bot_protection() {
        let err = extract_ring(
            &vendor(),
            "https://www.bluenile.com/ring/123",
            &page("<html><body><img src=\"/a.jpg\"></body></html>".to_string()),
            &ExtractionLimits::default(),
        )
        .expect_err("short body should fail");
        assert_eq!(err.code(), "bot_protection");
    }

    #[test]
    fn image_cap_follows_limits() {
        let imgs: String = (0..5)
            .map(|i| format!(r#"<img src="/media/{i}.jpg">"#))
            .collect();
        let limits = ExtractionLimits {
            max_images: 2,
            ..ExtractionLimits::default()
        };
        let ring = extract_ring(
            &vendor(),
            "https://www.bluenile.com/ring/123",
            &page(product_html(&imgs)),
            &limits,
        )
        .expect("import should succeed");
        assert_eq!(ring.images.len(), 2);
    }

    #[tokio::test]
    async fn unsupported_vendor_is_rejected_before_fetch() {
        let fetcher = PageFetcher::new(&FetchSettings {
            timeout: std::time::Duration::from_secs(1),
            user_agent: "test".to_string(),
        })
        .expect("fetcher");
        let importer = RingImporter::new(
            VendorRegistry::default(),
            fetcher,
            ExtractionLimits::default(),
        );
        let err = importer
            .import("https://shop.example.org/ring")
            .await
            .expect_err("unknown host should fail");
        assert!(matches!(
            err,
            ImportError::UnsupportedVendor { ref host } if host == "shop.example.org"
        ));
    }

    #[tokio::test]
    async fn blank_url_is_missing() {
        let fetcher = PageFetcher::new(&FetchSettings {
            timeout: std::time::Duration::from_secs(1),
            user_agent: "test".to_string(),
        })
        .expect("fetcher");
        let importer = RingImporter::new(
            VendorRegistry::default(),
            fetcher,
            ExtractionLimits::default(),
        );
        let err = importer.import("   ").await.expect_err("blank should fail");
        assert!(matches!(err, ImportError::MissingUrl));
    }
}
