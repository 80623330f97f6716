//! Listing draft assembly — the marketplace-neutral payload handed to a
//! platform renderer. HTML generation belongs to that renderer, not here.

use serde::{Deserialize, Serialize};

use common::ProductCandidate;

/// Fixed tags appended to every listing.
const TRENDY_TAGS: [&str; 4] = ["Premium", "Quality", "New", "Bestseller"];

/// A priced, tagged listing candidate ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub price: f64,
    pub sku: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl ListingDraft {
    /// Assemble a draft from a researched candidate and its derived price.
    pub fn build(product: &ProductCandidate, price: f64) -> Self {
        Self {
            title: product.product_name.clone(),
            price,
            sku: generate_sku(&product.product_name),
            tags: generate_tags(product),
            images: product
                .details
                .as_ref()
                .map(|d| d.images.clone())
                .unwrap_or_default(),
        }
    }
}

/// Generate a stock-keeping unit for a product name: a fixed prefix, the
/// first ten alphanumeric characters, and a hash-derived numeric suffix.
/// Deterministic — the same name always maps to the same SKU.
pub fn generate_sku(product_name: &str) -> String {
    let compact: String = product_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect();

    let mut hash: u32 = 2166136261;
    for byte in product_name.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(16777619);
    }

    format!("DS-{}-{}", compact, 1000 + hash % 9000)
}

/// Derive listing tags: the keyword itself, its longer words, longer
/// string specification values, and the fixed trendy tags. Duplicates are
/// dropped keeping the first occurrence.
pub fn generate_tags(product: &ProductCandidate) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    };

    if !product.keyword.is_empty() {
        push(&product.keyword);
        for word in product.keyword.split_whitespace() {
            if word.len() > 3 {
                push(word);
            }
        }
    }

    if let Some(details) = &product.details {
        for value in details.specifications.values() {
            if value.len() > 3 {
                push(value);
            }
        }
    }

    for tag in TRENDY_TAGS {
        push(tag);
    }

    tags
}
