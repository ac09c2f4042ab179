//! CSS selector tables for product-page extraction.
//!
//! Each table is an ordered list: earlier entries win. Extend the string
//! lists to support new storefront markup; extraction logic does not need
//! to change.

use std::sync::LazyLock;

use scraper::Selector;

/// Product gallery markup across common e-commerce platforms.
pub(crate) const GALLERY_SELECTORS: &[&str] = &[
    r#"[class*="product-image"] img"#,
    r#"[class*="product__media"] img"#,
    r#"[class*="product-gallery"] img"#,
    r#"[class*="pdp-image"] img"#,
    r#"[class*="gallery"] img"#,
    r#"[class*="carousel"] img"#,
    r#"[class*="slider"] img"#,
    r#"[id*="gallery"] img"#,
    r#"[id*="product-image"] img"#,
    r#"img[class*="product-image"]"#,
    r#"img[class*="pdp-image"]"#,
    "[data-zoom-image]",
    "[data-large-image]",
    "picture source",
];

/// Price-bearing elements. Compare-at / was prices are excluded.
pub(crate) const PRICE_SELECTORS: &[&str] = &[
    r#"[itemprop="price"]"#,
    r#"meta[property="product:price:amount"]"#,
    r#"meta[property="og:price:amount"]"#,
    r#"[data-testid*="price"]:not([data-testid*="compare"])"#,
    r#"[class*="sale-price"]"#,
    r#"[class*="product-price"]:not([class*="compare"])"#,
    r#"[class*="price__current"]"#,
    r#".price:not([class*="compare"])"#,
    r#"[class*="price"]:not([class*="compare"])"#,
];

/// Long-form product description containers.
pub(crate) const DESCRIPTION_SELECTORS: &[&str] = &[
    r#"[class*="product-description"]"#,
    r#"[class*="product__description"]"#,
    r#"[itemprop="description"]"#,
    "#product-description",
    r#"[class*="pdp-description"]"#,
    r#"[data-testid*="description"]"#,
];

pub(crate) static GALLERY: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(GALLERY_SELECTORS));
pub(crate) static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(PRICE_SELECTORS));
pub(crate) static DESCRIPTION: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(DESCRIPTION_SELECTORS));

pub(crate) static META: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("valid meta selector"));
pub(crate) static ITEMPROP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[itemprop]").expect("valid itemprop selector"));
pub(crate) static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid json-ld selector")
});
pub(crate) static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid img selector"));
pub(crate) static H1: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));
pub(crate) static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));

fn compile(list: &[&str]) -> Vec<Selector> {
    list.iter()
        .map(|s| Selector::parse(s).unwrap_or_else(|e| panic!("invalid selector {s}: {e:?}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_compile() {
        assert_eq!(GALLERY.len(), GALLERY_SELECTORS.len());
        assert_eq!(PRICE.len(), PRICE_SELECTORS.len());
        assert_eq!(DESCRIPTION.len(), DESCRIPTION_SELECTORS.len());
        LazyLock::force(&META);
        LazyLock::force(&ITEMPROP);
        LazyLock::force(&JSON_LD);
        LazyLock::force(&IMG);
        LazyLock::force(&H1);
        LazyLock::force(&TITLE);
    }
}
