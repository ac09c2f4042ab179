//! Product image extraction.
//!
//! Stages run in priority order and only ever add to the result:
//!
//! 1. Open Graph `og:image` meta
//! 2. Twitter card `twitter:image` meta
//! 3. JSON-LD `image` fields anywhere in any block
//! 4. Known product-gallery markup
//! 5. Any sufficiently large (or unsized) `<img>`
//!
//! Stages 1–3 come from metadata the vendor declared for the product and
//! are trusted as-is. Stages 4–5 pass through [`is_valid_image_url`].

use std::collections::HashSet;

use reqwest::Url;
use scraper::ElementRef;

use crate::document::ProductDocument;
use crate::jsonld;
use crate::selectors::{GALLERY, IMG};
use crate::urls::{is_valid_image_url, resolve_image_url};

const OG_IMAGE_KEYS: [&str; 3] = ["og:image", "og:image:secure_url", "og:image:url"];
const TWITTER_IMAGE_KEYS: [&str; 2] = ["twitter:image", "twitter:image:src"];

/// Attributes that may hold an image URL, most specific first. Lazy-load
/// attributes come before `src`, which is often a placeholder.
const SOURCE_ATTRS: [&str; 6] = [
    "data-zoom-image",
    "data-large-image",
    "data-src",
    "data-lazy-src",
    "data-original",
    "src",
];
const SRCSET_ATTRS: [&str; 2] = ["srcset", "data-srcset"];

/// Insertion-ordered, deduplicating, capped set of absolute image URLs.
#[derive(Debug)]
pub(crate) struct ImageSet {
    urls: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl ImageSet {
    pub(crate) fn new(cap: usize) -> Self {
        Self {
            urls: Vec::with_capacity(cap),
            seen: HashSet::with_capacity(cap),
            cap,
        }
    }

    /// Adds `url` unless it is a duplicate or the set is full.
    pub(crate) fn insert(&mut self, url: String) {
        if self.is_full() || self.seen.contains(&url) {
            return;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
    }

    pub(crate) fn is_full(&self) -> bool {
        self.urls.len() >= self.cap
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Collect up to `max_images` absolute product image URLs from `doc`.
///
/// `page_url` is the effective (post-redirect) URL used to resolve
/// relative paths. An `<img>` is a fallback candidate when its declared
/// width or height is at least `min_dimension`, or when it declares
/// neither.
#[must_use]
pub fn extract_images(
    doc: &ProductDocument,
    page_url: &Url,
    max_images: usize,
    min_dimension: u32,
) -> Vec<String> {
    let mut set = ImageSet::new(max_images);

    let trusted = OG_IMAGE_KEYS
        .iter()
        .chain(TWITTER_IMAGE_KEYS.iter())
        .flat_map(|key| doc.meta_contents(key))
        .chain(doc.json_ld().iter().flat_map(jsonld::image_urls));
    for raw in trusted {
        if let Some(url) = resolve_image_url(page_url, &raw) {
            set.insert(url);
        }
        if set.is_full() {
            return set.into_vec();
        }
    }

    for selector in GALLERY.iter() {
        for el in doc.select(selector) {
            add_checked(&mut set, page_url, el);
            if set.is_full() {
                return set.into_vec();
            }
        }
    }

    for el in doc.select(&IMG) {
        if !is_large_enough(el, min_dimension) {
            continue;
        }
        add_checked(&mut set, page_url, el);
        if set.is_full() {
            break;
        }
    }

    set.into_vec()
}

fn add_checked(set: &mut ImageSet, page_url: &Url, el: ElementRef<'_>) {
    let Some(url) = element_image_source(el).and_then(|raw| resolve_image_url(page_url, &raw))
    else {
        return;
    };
    if is_valid_image_url(&url) {
        set.insert(url);
    }
}

/// The best image URL an element declares, before resolution.
fn element_image_source(el: ElementRef<'_>) -> Option<String> {
    let attrs = el.value();

    let direct = SOURCE_ATTRS.iter().find_map(|name| {
        attrs
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.starts_with("data:"))
    });
    if let Some(value) = direct {
        return Some(value.to_string());
    }

    SRCSET_ATTRS
        .iter()
        .filter_map(|name| attrs.attr(name))
        .find_map(first_srcset_candidate)
}

/// First URL of a `srcset` list (`"a.jpg 1x, b.jpg 2x"` → `"a.jpg"`).
fn first_srcset_candidate(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .find(|url| !url.starts_with("data:"))
        .map(str::to_string)
}

fn is_large_enough(el: ElementRef<'_>, min_dimension: u32) -> bool {
    let width = el.value().attr("width").and_then(parse_dimension);
    let height = el.value().attr("height").and_then(parse_dimension);
    match (width, height) {
        (None, None) => true,
        (w, h) => w.is_some_and(|w| w >= min_dimension) || h.is_some_and(|h| h >= min_dimension),
    }
}

/// Leading integer of a dimension attribute (`"300"`, `"300px"`).
fn parse_dimension(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
