//! Ring product-page import pipeline.
//!
//! Resolver → fetcher → bot-protection guard → document parser →
//! {image extractor, metadata extractor} → assembled [`ImportedRing`].
//! Every stage is terminal on failure; nothing retries.

pub mod attributes;
pub mod document;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod images;
mod jsonld;
pub mod metadata;
pub mod pipeline;
mod selectors;
pub mod types;
pub mod urls;
pub mod vendor;

pub use document::ProductDocument;
pub use error::ImportError;
pub use fetch::{FetchSettings, PageFetcher};
pub use pipeline::{extract_ring, ExtractionLimits, RingImporter};
pub use types::{FetchedPage, ImportedRing, ProductMetadata};
pub use vendor::{resolve_vendor, validate_import_url};
