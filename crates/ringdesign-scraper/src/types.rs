use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Raw page as returned by the origin, after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    /// Final 2xx status. Logged with the extraction; never changes the result.
    pub status: u16,
    /// Effective URL after redirects; relative image paths resolve against it.
    pub final_url: Url,
}

/// Best-effort product attributes. `None` means "not found"; nothing is
/// guessed beyond the pattern matching in [`crate::attributes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Decimal string without thousands separators, e.g. `"3499.00"`.
    pub price: Option<String>,
    /// ISO 4217 code; defaults to `"USD"`.
    pub currency: Option<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub metal_type: Option<String>,
    pub gemstone: Option<String>,
    pub setting: Option<String>,
    pub carat_weight: Option<String>,
    pub availability: Option<String>,
}

/// A successful import. `images` always holds at least one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRing {
    /// Vendor identifier (domain pattern, e.g. `tiffany.com`).
    pub vendor: String,
    /// The URL the caller asked for, not the post-redirect URL.
    pub url: String,
    pub images: Vec<String>,
    pub metadata: ProductMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_serializes_camel_case_with_nulls() {
        let metadata = ProductMetadata {
            metal_type: Some("platinum".to_string()),
            carat_weight: Some("1.5 ct".to_string()),
            ..ProductMetadata::default()
        };
        let json = serde_json::to_value(&metadata).expect("serialize");
        assert_eq!(json["metalType"], "platinum");
        assert_eq!(json["caratWeight"], "1.5 ct");
        assert!(json["title"].is_null());
        assert!(json.get("availability").is_some());
    }
}
