//! Optimal sale-price derivation.

use tracing::debug;

use common::{
    config::{PricingConfig, ScoringConfig},
    round2, ProductCandidate,
};
use scoring_engine::SupplierScorer;

/// Charm-pricing multiplier: 43.32 becomes 42.89.
const PSYCHOLOGICAL_DISCOUNT: f64 = 0.99;
/// The sale price never undercuts this markup over supplier cost.
const MIN_MARKUP: f64 = 1.2;

pub struct PriceOptimizer {
    config: PricingConfig,
    scorer: SupplierScorer,
}

impl PriceOptimizer {
    pub fn new(config: PricingConfig, scoring: ScoringConfig) -> Self {
        Self {
            config,
            scorer: SupplierScorer::new(scoring),
        }
    }

    /// Derive the sale price for a product.
    ///
    /// An observed market price takes precedence over any cost-based
    /// derivation. Otherwise the supplier cost (the best-scored candidate
    /// supplier's price when a list is present) is marked up to the target
    /// margin, charm-discounted, and floored at `MIN_MARKUP` × cost. An
    /// unknown cost prices at 0.
    pub fn optimal_price(&self, product: &ProductCandidate) -> f64 {
        if let Some(market_price) = product.market_price {
            return round2(market_price);
        }

        let mut supplier_price = product.supplier_price;
        if let Some(best) = self.scorer.find_best(product, None) {
            supplier_price = best.supplier.price;
        }
        if supplier_price <= 0.0 {
            return 0.0;
        }

        let raw = supplier_price / (1.0 - self.config.target_margin);
        let discounted = round2(raw * PSYCHOLOGICAL_DISCOUNT);
        let floored = discounted.max(supplier_price * MIN_MARKUP);

        debug!(
            "priced '{}': cost={} raw={:.2} final={:.2}",
            product.product_name, supplier_price, raw, floored
        );
        round2(floored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Supplier;

    fn make_product(
        supplier_price: f64,
        market_price: Option<f64>,
        suppliers: Vec<Supplier>,
    ) -> ProductCandidate {
        ProductCandidate {
            keyword: "smart watch".into(),
            product_name: "Smart Watch - Premium Edition".into(),
            trend_score: 85.0,
            supplier_price,
            market_price,
            profit_margin: 0.45,
            suppliers,
            competition: None,
            details: None,
            combined_score: 0.0,
        }
    }

    fn make_optimizer() -> PriceOptimizer {
        PriceOptimizer::new(PricingConfig::default(), ScoringConfig::default())
    }

    #[test]
    fn test_market_price_takes_precedence() {
        let optimizer = make_optimizer();
        let product = make_product(25.99, Some(49.99), Vec::new());
        assert_eq!(optimizer.optimal_price(&product), 49.99);
    }

    #[test]
    fn test_market_price_wins_even_with_suppliers() {
        let optimizer = make_optimizer();
        let product = make_product(
            25.99,
            Some(49.99),
            vec![Supplier {
                name: "Supplier-A".into(),
                price: 22.99,
                rating: 4.2,
                delivery_days: 7,
            }],
        );
        assert_eq!(optimizer.optimal_price(&product), 49.99);
    }

    #[test]
    fn test_cost_based_price_respects_floor() {
        let optimizer = make_optimizer();
        let product = make_product(25.99, None, Vec::new());

        let price = optimizer.optimal_price(&product);

        // 25.99 / 0.6 × 0.99 = 42.88, comfortably above the 31.19 floor.
        assert_eq!(price, 42.88);
        assert!(price >= round2(25.99 * 1.2));
    }

    #[test]
    fn test_floor_kicks_in_for_low_target_margin() {
        let optimizer = PriceOptimizer::new(
            PricingConfig { target_margin: 0.1 },
            ScoringConfig::default(),
        );
        let product = make_product(25.99, None, Vec::new());

        // 25.99 / 0.9 × 0.99 = 28.59, below 25.99 × 1.2 = 31.188.
        assert_eq!(optimizer.optimal_price(&product), 31.19);
    }

    #[test]
    fn test_best_supplier_price_overrides_recorded_cost() {
        let optimizer = make_optimizer();
        let product = make_product(
            25.99,
            None,
            vec![
                Supplier {
                    name: "Supplier-A".into(),
                    price: 22.99,
                    rating: 4.2,
                    delivery_days: 7,
                },
                Supplier {
                    name: "Supplier-B".into(),
                    price: 24.99,
                    rating: 4.7,
                    delivery_days: 5,
                },
            ],
        );

        // Supplier-B wins the scoring, so its price is the cost basis:
        // 24.99 / 0.6 × 0.99 = 41.23.
        assert_eq!(optimizer.optimal_price(&product), 41.23);
    }

    #[test]
    fn test_unknown_cost_prices_at_zero() {
        let optimizer = make_optimizer();
        let product = make_product(0.0, None, Vec::new());
        assert_eq!(optimizer.optimal_price(&product), 0.0);
    }
}
