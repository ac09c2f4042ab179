use super::*;

fn page_url() -> Url {
    Url::parse("https://www.vendor.com/rings/oval-halo").expect("valid page url")
}

fn extract(html: &str) -> Vec<String> {
    extract_images(&ProductDocument::parse(html), &page_url(), 10, 300)
}

#[test]
fn stages_keep_priority_order() {
    let html = r#"
        <html><head>
          <meta property="og:image" content="https://cdn.vendor.com/og.jpg">
          <meta name="twitter:image" content="https://cdn.vendor.com/tw.jpg">
          <script type="application/ld+json">
            {"@type": "Product", "image": ["https://cdn.vendor.com/ld.jpg"]}
          </script>
        </head><body>
          <img src="/media/fallback.jpg">
          <div class="product-gallery"><img data-src="/media/gallery.jpg" src="/blank.gif"></div>
        </body></html>
    "#;
    assert_eq!(
        extract(html),
        vec![
            "https://cdn.vendor.com/og.jpg",
            "https://cdn.vendor.com/tw.jpg",
            "https://cdn.vendor.com/ld.jpg",
            "https://www.vendor.com/media/gallery.jpg",
            "https://www.vendor.com/media/fallback.jpg",
        ]
    );
}

#[test]
fn duplicates_across_stages_are_dropped() {
    let html = r#"
        <html><head>
          <meta property="og:image" content="https://www.vendor.com/media/a.jpg">
          <script type="application/ld+json">{"image": "/media/a.jpg"}</script>
        </head><body>
          <div class="gallery"><img src="https://www.vendor.com/media/a.jpg"></div>
        </body></html>
    "#;
    assert_eq!(extract(html), vec!["https://www.vendor.com/media/a.jpg"]);
}

#[test]
fn result_is_capped_in_insertion_order() {
    let imgs: String = (0..25)
        .map(|i| format!(r#"<img src="/media/ring-{i}.jpg">"#))
        .collect();
    let html = format!("<html><body>{imgs}</body></html>");
    let images = extract(&html);
    assert_eq!(images.len(), 10);
    assert_eq!(images[0], "https://www.vendor.com/media/ring-0.jpg");
    assert_eq!(images[9], "https://www.vendor.com/media/ring-9.jpg");
}

#[test]
fn small_declared_images_are_skipped_in_fallback() {
    let html = r#"
        <html><body>
          <img src="/media/thumb.jpg" width="80" height="80">
          <img src="/media/wide.jpg" width="600px" height="40">
          <img src="/media/unsized.jpg">
        </body></html>
    "#;
    assert_eq!(
        extract(html),
        vec![
            "https://www.vendor.com/media/wide.jpg",
            "https://www.vendor.com/media/unsized.jpg",
        ]
    );
}

#[test]
fn chrome_images_are_filtered_outside_trusted_stages() {
    let html = r#"
        <html><head>
          <meta property="og:image" content="https://www.vendor.com/brand/logo">
        </head><body>
          <img src="/assets/site-logo">
          <img src="/assets/loading-spinner">
          <img src="/media/ring.jpg">
        </body></html>
    "#;
    assert_eq!(
        extract(html),
        vec![
            "https://www.vendor.com/brand/logo",
            "https://www.vendor.com/media/ring.jpg",
        ]
    );
}

#[test]
fn srcset_first_candidate_is_used() {
    let html = r#"
        <html><body>
          <picture>
            <source srcset="//img.vendor.com/r-800.webp 800w, //img.vendor.com/r-1600.webp 1600w">
          </picture>
        </body></html>
    "#;
    assert_eq!(extract(html), vec!["https://img.vendor.com/r-800.webp"]);
}

#[test]
fn data_uri_src_falls_through_to_lazy_attribute() {
    let html = r#"
        <html><body>
          <div class="carousel">
            <img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" data-srcset="/media/lazy.jpg 1x">
          </div>
        </body></html>
    "#;
    assert_eq!(extract(html), vec!["https://www.vendor.com/media/lazy.jpg"]);
}

#[test]
fn page_without_images_yields_empty() {
    assert!(extract("<html><body><p>No pictures here.</p></body></html>").is_empty());
}

#[test]
fn image_set_rejects_when_full() {
    let mut set = ImageSet::new(1);
    set.insert("https://a.com/1.jpg".to_string());
    assert!(set.is_full());
    set.insert("https://a.com/2.jpg".to_string());
    assert_eq!(set.into_vec(), vec!["https://a.com/1.jpg"]);
}

#[test]
fn image_set_skips_duplicates() {
    let mut set = ImageSet::new(3);
    set.insert("https://a.com/1.jpg".to_string());
    set.insert("https://a.com/1.jpg".to_string());
    set.insert("https://a.com/2.jpg".to_string());
    assert_eq!(
        set.into_vec(),
        vec!["https://a.com/1.jpg", "https://a.com/2.jpg"]
    );
}

#[test]
fn dimension_parser_reads_leading_digits() {
    assert_eq!(parse_dimension("300"), Some(300));
    assert_eq!(parse_dimension(" 450px"), Some(450));
    assert_eq!(parse_dimension("auto"), None);
}
