//! Sale-price derivation and listing draft assembly.

pub mod draft;
pub mod optimizer;

pub use draft::{generate_sku, generate_tags, ListingDraft};
pub use optimizer::PriceOptimizer;
