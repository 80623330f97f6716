//! Bot configuration types.
//!
//! Every threshold and weight the engines use is read from here and passed
//! explicitly into the component constructors. Missing fields fall back to
//! the documented defaults, so an empty (or absent) config file is valid.

use serde::{Deserialize, Serialize};

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Research pipeline thresholds.
    #[serde(default)]
    pub research: ResearchConfig,

    /// Supplier scoring weights.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Sale-price derivation parameters.
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Thresholds for the product research pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Minimum aggregate trend score to keep a keyword, in [0, 100].
    #[serde(default = "default_min_trend_score")]
    pub min_trend_score: f64,

    /// Minimum profit margin to keep a product, in [0, 1].
    #[serde(default = "default_min_profit_margin")]
    pub min_profit_margin: f64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            min_trend_score: default_min_trend_score(),
            min_profit_margin: default_min_profit_margin(),
        }
    }
}

/// Weights for the multi-criteria supplier score. By convention they sum
/// to 1, but nothing enforces that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_price_weight")]
    pub price_weight: f64,

    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,

    #[serde(default = "default_delivery_weight")]
    pub delivery_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            price_weight: default_price_weight(),
            rating_weight: default_rating_weight(),
            delivery_weight: default_delivery_weight(),
        }
    }
}

/// Sale-price derivation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Target profit margin used for cost-based pricing, in [0, 1).
    #[serde(default = "default_target_margin")]
    pub target_margin: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            target_margin: default_target_margin(),
        }
    }
}

fn default_min_trend_score() -> f64 {
    70.0
}

fn default_min_profit_margin() -> f64 {
    0.3
}

fn default_price_weight() -> f64 {
    0.4
}

fn default_rating_weight() -> f64 {
    0.3
}

fn default_delivery_weight() -> f64 {
    0.3
}

fn default_target_margin() -> f64 {
    0.4
}
