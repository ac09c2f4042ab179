//! Ring attribute inference from free-text product descriptions.
//!
//! Plain substring matching against ordered vocabularies; the first entry
//! found wins, so more specific phrases sit above the phrases they contain.
//! Ambiguous copy ("pairs well with a platinum band") yields false
//! positives. Missing attributes stay `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ProductMetadata;

const METALS: &[&str] = &[
    "platinum",
    "18k white gold",
    "18k yellow gold",
    "18k rose gold",
    "14k white gold",
    "14k yellow gold",
    "14k rose gold",
    "white gold",
    "yellow gold",
    "rose gold",
    "18k gold",
    "14k gold",
    "palladium",
    "sterling silver",
    "titanium",
];

const SHAPES: &[&str] = &[
    "round", "princess", "cushion", "oval", "emerald", "pear", "marquise", "radiant", "asscher",
    "heart",
];

const GEMSTONES_AFTER_SHAPES: &[&str] = &["lab grown diamond", "moissanite", "sapphire", "diamond"];

/// `(pattern, reported value)`; `pave` reports the accented form.
const SETTINGS: &[(&str, &str)] = &[
    ("hidden halo", "hidden halo"),
    ("split shank", "split shank"),
    ("three stone", "three stone"),
    ("solitaire", "solitaire"),
    ("halo", "halo"),
    ("pavé", "pavé"),
    ("pave", "pavé"),
    ("bezel", "bezel"),
    ("channel", "channel"),
    ("cathedral", "cathedral"),
    ("tension", "tension"),
    ("prong", "prong"),
    ("vintage", "vintage"),
];

/// `<shape> cut diamond` and `<shape> diamond` for every shape, then the
/// shapeless stones.
static GEMSTONES: LazyLock<Vec<String>> = LazyLock::new(|| {
    SHAPES
        .iter()
        .flat_map(|shape| [format!("{shape} cut diamond"), format!("{shape} diamond")])
        .chain(GEMSTONES_AFTER_SHAPES.iter().map(|g| (*g).to_string()))
        .collect()
});

/// The weight must start at a token boundary, so fractions (`1/2 ct`) and
/// dotted numbers are never read from their tail.
static CARAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d./])(\d*\.?\d+)\s*(?:carats?|ctw|ct|tcw)\b")
        .expect("valid carat regex")
});

/// Fill `metal_type`, `gemstone`, `setting` and `carat_weight` on
/// `metadata` from `description`. Fields already set are left alone.
pub fn infer_ring_attributes(description: &str, metadata: &mut ProductMetadata) {
    let text = description.to_lowercase();

    if metadata.metal_type.is_none() {
        metadata.metal_type = METALS
            .iter()
            .find(|m| text.contains(*m))
            .map(|m| (*m).to_string());
    }
    if metadata.gemstone.is_none() {
        metadata.gemstone = GEMSTONES.iter().find(|g| text.contains(g.as_str())).cloned();
    }
    if metadata.setting.is_none() {
        metadata.setting = SETTINGS
            .iter()
            .find(|(pattern, _)| text.contains(pattern))
            .map(|(_, label)| (*label).to_string());
    }
    if metadata.carat_weight.is_none() {
        metadata.carat_weight = carat_weight(&text);
    }
}

/// `"1.50 ctw"` → `"1.50 ct"`, `".75 ct"` → `"0.75 ct"`.
fn carat_weight(text: &str) -> Option<String> {
    let weight = CARAT_RE.captures(text)?.get(1)?.as_str();
    if weight.starts_with('.') {
        Some(format!("0{weight} ct"))
    } else {
        Some(format!("{weight} ct"))
    }
}
