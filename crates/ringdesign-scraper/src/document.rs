//! Parsed product page with the tag and attribute queries the extractors need.

use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::selectors::{ITEMPROP, JSON_LD, META};

/// A parsed HTML document plus its decoded JSON-LD blocks.
///
/// `scraper::Html` is not `Send`; a `ProductDocument` is built and dropped
/// within one synchronous extraction call.
pub struct ProductDocument {
    html: Html,
    json_ld: Vec<Value>,
}

impl ProductDocument {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        let json_ld = decode_json_ld(&html);
        Self { html, json_ld }
    }

    /// Every `<script type="application/ld+json">` body that decoded as JSON,
    /// in document order.
    #[must_use]
    pub fn json_ld(&self) -> &[Value] {
        &self.json_ld
    }

    #[must_use]
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// `content` of the first `<meta>` whose `property` or `name` equals
    /// `key` (case-insensitive) and whose content is non-blank.
    #[must_use]
    pub fn meta_content(&self, key: &str) -> Option<String> {
        self.meta_contents(key).into_iter().next()
    }

    /// `content` of every matching `<meta>`, in document order.
    #[must_use]
    pub fn meta_contents(&self, key: &str) -> Vec<String> {
        self.html
            .select(&META)
            .filter(|el| {
                let attrs = el.value();
                attrs
                    .attr("property")
                    .or_else(|| attrs.attr("name"))
                    .is_some_and(|k| k.trim().eq_ignore_ascii_case(key))
            })
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Microdata value for `itemprop=prop`: the `content` attribute when
    /// present, else the element text.
    #[must_use]
    pub fn itemprop_value(&self, prop: &str) -> Option<String> {
        self.html
            .select(&ITEMPROP)
            .filter(|el| {
                el.value()
                    .attr("itemprop")
                    .is_some_and(|p| p.split_whitespace().any(|p| p.eq_ignore_ascii_case(prop)))
            })
            .find_map(|el| {
                el.value()
                    .attr("content")
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .or_else(|| non_empty(element_text(el)))
            })
    }

    /// Whitespace-collapsed text of the first element matching `selector`
    /// that has any text.
    #[must_use]
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.html
            .select(selector)
            .find_map(|el| non_empty(element_text(el)))
    }

    /// [`Self::first_text`] over an ordered list of selectors.
    #[must_use]
    pub fn first_text_in(&self, selectors: &[Selector]) -> Option<String> {
        selectors.iter().find_map(|s| self.first_text(s))
    }
}

/// Element text with runs of whitespace collapsed to single spaces.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn decode_json_ld(html: &Html) -> Vec<Value> {
    html.select(&JSON_LD)
        .filter_map(|script| {
            let raw = script.text().collect::<String>();
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping undecodable json-ld block");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{H1, TITLE};

    const PAGE: &str = r#"
        <html>
          <head>
            <title>  Oval Halo Ring |  Vendor </title>
            <meta property="og:title" content="Oval Halo Ring">
            <meta property="og:image" content="https://cdn.example.com/a.jpg">
            <meta property="og:image" content="https://cdn.example.com/b.jpg">
            <meta name="Description" content="  A lovely ring. ">
            <meta property="og:site_name" content="   ">
            <script type="application/ld+json">{"@type": "Product", "name": "Oval"}</script>
            <script type="application/ld+json">{ not json </script>
          </head>
          <body>
            <h1>
              Oval   Halo
              Ring
            </h1>
            <span itemprop="price" content="2,150.00">$2,150</span>
            <div itemprop="brand"><span>Vendor Co</span></div>
          </body>
        </html>
    "#;

    #[test]
    fn meta_content_matches_property_and_name_case_insensitively() {
        let doc = ProductDocument::parse(PAGE);
        assert_eq!(doc.meta_content("og:title").as_deref(), Some("Oval Halo Ring"));
        assert_eq!(doc.meta_content("description").as_deref(), Some("A lovely ring."));
    }

    #[test]
    fn meta_content_skips_blank_values() {
        let doc = ProductDocument::parse(PAGE);
        assert!(doc.meta_content("og:site_name").is_none());
    }

    #[test]
    fn meta_contents_returns_all_in_order() {
        let doc = ProductDocument::parse(PAGE);
        assert_eq!(
            doc.meta_contents("og:image"),
            vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "https://cdn.example.com/b.jpg".to_string()
            ]
        );
    }

    #[test]
    fn first_text_collapses_whitespace() {
        let doc = ProductDocument::parse(PAGE);
        assert_eq!(doc.first_text(&H1).as_deref(), Some("Oval Halo Ring"));
        assert_eq!(doc.first_text(&TITLE).as_deref(), Some("Oval Halo Ring | Vendor"));
    }

    #[test]
    fn itemprop_prefers_content_attribute_then_text() {
        let doc = ProductDocument::parse(PAGE);
        assert_eq!(doc.itemprop_value("price").as_deref(), Some("2,150.00"));
        assert_eq!(doc.itemprop_value("brand").as_deref(), Some("Vendor Co"));
        assert!(doc.itemprop_value("sku").is_none());
    }

    #[test]
    fn invalid_json_ld_blocks_are_skipped() {
        let doc = ProductDocument::parse(PAGE);
        assert_eq!(doc.json_ld().len(), 1);
        assert_eq!(doc.json_ld()[0]["name"], "Oval");
    }
}
