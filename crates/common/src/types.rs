//! Domain types shared across the engine crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A candidate supplier for a product. Value object — scoring never
/// mutates these fields, it wraps a copy in [`ScoredSupplier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    /// Unit price charged by the supplier, in the shop currency.
    pub price: f64,
    /// Marketplace rating in [0, 5].
    pub rating: f64,
    /// Quoted delivery window in days.
    pub delivery_days: u32,
}

/// A supplier together with its 0–100 sub-scores and weighted total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSupplier {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub price_score: u32,
    pub rating_score: u32,
    pub delivery_score: u32,
    pub total_score: u32,
    /// Attached on request (see `SupplierScorer::compare`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability: Option<SupplierReliability>,
}

/// Aggregated reliability profile derived from delivery history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierReliability {
    /// Fraction of orders delivered on time, in [0, 1].
    pub on_time_delivery_rate: f64,
    /// Fraction of orders fulfilled exactly as ordered, in [0, 1].
    pub order_accuracy_rate: f64,
    /// Mean product quality rating in [0, 5].
    pub quality_consistency: f64,
    /// Mean communication rating in [0, 5].
    pub communication_rating: f64,
    /// Mean shipping delay in days.
    pub avg_shipping_delay: f64,
    /// Weighted 0–100 summary score.
    pub reliability_score: u32,
}

/// One fulfilled order used as input to the reliability analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub on_time: bool,
    pub accurate: bool,
    /// Quality rating for the delivered goods, in [0, 5].
    pub quality_rating: f64,
    /// Communication rating for the order, in [0, 5].
    pub communication_rating: f64,
    /// Days late (0 when on time).
    pub delay_days: f64,
}

/// Aggregated popularity signal for one keyword, in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub keyword: String,
    pub trend_score: f64,
}

/// Supplier cost and observed market price for a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub supplier_price: f64,
    pub market_price: f64,
}

/// Coarse competition intensity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionLevel::Low => "low",
            CompetitionLevel::Medium => "medium",
            CompetitionLevel::High => "high",
        }
    }
}

/// A competitor listing observed for a keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorQuote {
    pub name: String,
    pub price: f64,
}

/// Competition landscape for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSnapshot {
    pub num_competitors: u32,
    pub avg_price: f64,
    /// (min, max) observed listing price.
    pub price_range: (f64, f64),
    pub competition_level: CompetitionLevel,
    pub top_competitors: Vec<CompetitorQuote>,
}

/// Descriptive product detail bundle for listing creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    /// Ordered so rendered listings are reproducible.
    pub specifications: BTreeMap<String, String>,
    pub images: Vec<String>,
}

/// A fully researched product candidate, ready for pricing and listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub keyword: String,
    pub product_name: String,
    /// Aggregate trend score in [0, 100].
    pub trend_score: f64,
    /// Reference supplier cost from market data.
    pub supplier_price: f64,
    /// Externally observed sale price, when one exists.
    pub market_price: Option<f64>,
    /// (market − supplier) / market, in [0, 1]. Zero when no market price.
    pub profit_margin: f64,
    pub suppliers: Vec<Supplier>,
    pub competition: Option<CompetitionSnapshot>,
    pub details: Option<ProductDetails>,
    /// trend_score × profit_margin — ranking key only, never persisted.
    pub combined_score: f64,
}

/// Round to 2 decimal places (prices, margins).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (trend scores).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(42.8835), 42.88);
        assert_eq!(round2(31.188), 31.19);
        assert_eq!(round2(49.99), 49.99);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(84.96), 85.0);
        assert_eq!(round1(70.04), 70.0);
    }

    #[test]
    fn test_competition_level_str() {
        assert_eq!(CompetitionLevel::Medium.as_str(), "medium");
    }
}
