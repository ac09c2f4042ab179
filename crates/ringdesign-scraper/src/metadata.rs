//! Product metadata extraction.
//!
//! HTML tags are read first through ordered fallback chains; JSON-LD
//! `Product` nodes then fill whatever is still missing. Ring attributes are
//! inferred last, from the final description only.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::attributes::infer_ring_attributes;
use crate::document::{element_text, ProductDocument};
use crate::jsonld::{self, scalar_string};
use crate::selectors::{DESCRIPTION, H1, PRICE, TITLE};
use crate::types::ProductMetadata;

const DEFAULT_CURRENCY: &str = "USD";

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*\.?\d*").expect("valid price regex"));

/// First non-blank value produced by `sources`, evaluated lazily in order.
#[must_use]
pub fn first_match(sources: &[&dyn Fn() -> Option<String>]) -> Option<String> {
    sources
        .iter()
        .find_map(|source| source().filter(|v| !v.trim().is_empty()))
}

/// Extract every metadata field the page offers.
#[must_use]
pub fn extract_metadata(doc: &ProductDocument) -> ProductMetadata {
    let mut metadata = ProductMetadata {
        title: first_match(&[
            &|| doc.meta_content("og:title"),
            &|| doc.meta_content("twitter:title"),
            &|| doc.first_text(&H1),
            &|| doc.first_text(&TITLE),
        ]),
        description: first_match(&[
            &|| doc.meta_content("og:description"),
            &|| doc.meta_content("description"),
            &|| doc.first_text_in(&DESCRIPTION),
        ]),
        price: html_price(doc),
        currency: first_match(&[
            &|| doc.meta_content("product:price:currency"),
            &|| doc.meta_content("og:price:currency"),
            &|| doc.itemprop_value("priceCurrency"),
        ]),
        brand: first_match(&[
            &|| doc.meta_content("og:brand"),
            &|| doc.meta_content("product:brand"),
            &|| doc.itemprop_value("brand"),
            &|| doc.meta_content("og:site_name"),
        ]),
        ..ProductMetadata::default()
    };

    fill_from_json_ld(doc.json_ld(), &mut metadata);

    metadata
        .currency
        .get_or_insert_with(|| DEFAULT_CURRENCY.to_string());

    if let Some(description) = metadata.description.clone() {
        infer_ring_attributes(&description, &mut metadata);
    }

    metadata
}

/// Digits of the first price-looking value, thousands separators removed:
/// `"$3,499.00"` → `"3499.00"`.
#[must_use]
pub fn normalize_price(raw: &str) -> Option<String> {
    PRICE_RE
        .find(raw)
        .map(|m| m.as_str().replace(',', ""))
}

fn html_price(doc: &ProductDocument) -> Option<String> {
    PRICE.iter().find_map(|selector| {
        doc.select(selector)
            .filter(|el| {
                !el.value()
                    .attr("class")
                    .is_some_and(|class| class.to_ascii_lowercase().contains("compare"))
            })
            .find_map(|el| {
                el.value()
                    .attr("content")
                    .and_then(normalize_price)
                    .or_else(|| normalize_price(&element_text(el)))
            })
    })
}

fn fill_from_json_ld(blocks: &[Value], metadata: &mut ProductMetadata) {
    for product in blocks.iter().flat_map(jsonld::product_nodes) {
        fill(&mut metadata.title, || product.get("name").and_then(scalar_string));
        fill(&mut metadata.description, || {
            product.get("description").and_then(scalar_string)
        });
        fill(&mut metadata.sku, || product.get("sku").and_then(scalar_string));
        fill(&mut metadata.brand, || product.get("brand").and_then(brand_name));

        let Some(offer) = product.get("offers").and_then(first_offer) else {
            continue;
        };
        fill(&mut metadata.price, || {
            offer
                .get("price")
                .or_else(|| offer.get("lowPrice"))
                .and_then(scalar_string)
                .and_then(|p| normalize_price(&p))
        });
        fill(&mut metadata.currency, || {
            offer.get("priceCurrency").and_then(scalar_string)
        });
        fill(&mut metadata.availability, || {
            offer
                .get("availability")
                .and_then(scalar_string)
                .and_then(|a| availability_label(&a))
        });
    }
}

fn fill(slot: &mut Option<String>, value: impl FnOnce() -> Option<String>) {
    if slot.is_none() {
        *slot = value();
    }
}

fn brand_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("name").and_then(scalar_string),
        other => scalar_string(other),
    }
}

/// `offers` as a single object, or the first object of an array.
fn first_offer(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }
}

/// `"https://schema.org/InStock"` → `"InStock"`.
fn availability_label(raw: &str) -> Option<String> {
    raw.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
