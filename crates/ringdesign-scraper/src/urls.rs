//! Image URL resolution and validity filtering.

use reqwest::Url;

/// Keywords that mark site chrome rather than product photography.
const EXCLUDED_KEYWORDS: [&str; 8] = [
    "logo",
    "icon",
    "sprite",
    "pixel",
    "tracking",
    "analytics",
    "placeholder",
    "loading",
];

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".avif"];

/// Image CDNs and path segments that reliably hold product photography.
const IMAGE_CDN_HINTS: [&str; 6] = [
    "cloudinary",
    "imgix",
    "shopify",
    "scene7",
    "/images/",
    "/product/",
];

/// Resolve a raw `src`-style value against the page it was found on.
///
/// - `//host/path` → `https://host/path`
/// - `/path` → page origin + `/path`
/// - absolute `http(s)` URLs pass through unchanged
/// - anything else is joined onto the page URL
///
/// Returns `None` for blank input, `data:` URIs and values that cannot be
/// resolved.
#[must_use]
pub fn resolve_image_url(page_url: &Url, raw: &str) -> Option<String> {
    let candidate = raw.trim().replace("&amp;", "&");
    if candidate.is_empty() {
        return None;
    }

    let lower = candidate.to_ascii_lowercase();
    if lower.starts_with("data:") || lower.starts_with("javascript:") {
        return None;
    }

    if candidate.starts_with("//") {
        return Some(format!("https:{candidate}"));
    }

    if candidate.starts_with('/') {
        let origin = page_url.origin();
        if !origin.is_tuple() {
            return None;
        }
        return Some(format!("{}{candidate}", origin.ascii_serialization()));
    }

    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(candidate);
    }

    page_url.join(&candidate).ok().map(String::from)
}

/// Validity predicate applied to gallery and fallback `<img>` candidates.
///
/// URLs containing a chrome keyword are rejected unless an image extension
/// or a known image-CDN hint vouches for them. URLs without any keyword are
/// accepted.
#[must_use]
pub fn is_valid_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }

    let excluded = EXCLUDED_KEYWORDS.iter().any(|k| lower.contains(k));
    if !excluded {
        return true;
    }

    has_image_extension(&lower) || IMAGE_CDN_HINTS.iter().any(|h| lower.contains(h))
}

fn has_image_extension(lower: &str) -> bool {
    let path = lower
        .split(['?', '#'])
        .next()
        .unwrap_or(lower);
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
