//! Weighted multi-criteria supplier scoring.
//!
//! Each supplier gets three sub-scores — price against the reference
//! average, marketplace rating, and delivery window — combined into a
//! weighted 0–100 total. Scoring operates on copies; caller-provided
//! suppliers are never mutated.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use common::{config::ScoringConfig, ProductCandidate, ScoredSupplier, Supplier};

use crate::reliability::{analyze_reliability, DeliveryHistory};

/// Delivery windows at or beyond this many days score zero.
const MAX_DELIVERY_DAYS: f64 = 30.0;

/// One factor of the comparison weight table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonFactor {
    pub name: String,
    pub weight: f64,
}

/// Result of comparing the top suppliers for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierComparison {
    pub product: String,
    pub suppliers: Vec<ScoredSupplier>,
    pub comparison_factors: Vec<ComparisonFactor>,
    pub recommendation: Option<ScoredSupplier>,
}

pub struct SupplierScorer {
    config: ScoringConfig,
}

impl SupplierScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score the given suppliers (or the product's own candidate list) and
    /// return them sorted by total score, best first. Ties keep input
    /// order. An empty supplier set yields an empty result.
    pub fn score(
        &self,
        product: &ProductCandidate,
        suppliers: Option<&[Supplier]>,
    ) -> Vec<ScoredSupplier> {
        let suppliers = suppliers.unwrap_or(&product.suppliers);
        if suppliers.is_empty() {
            warn!("no suppliers to score for '{}'", product.product_name);
            return Vec::new();
        }

        info!(
            "scoring {} suppliers for '{}'",
            suppliers.len(),
            product.product_name
        );

        // Reference price: the product's recorded cost when it has one,
        // otherwise the mean of the candidate prices.
        let avg_price = if product.supplier_price > 0.0 {
            product.supplier_price
        } else {
            suppliers.iter().map(|s| s.price).sum::<f64>() / suppliers.len() as f64
        };

        let mut scored: Vec<ScoredSupplier> = suppliers
            .iter()
            .map(|supplier| {
                // Priced exactly 20% below average scores 1.0; at or above
                // 180% of average scores 0.
                let price_score = if avg_price > 0.0 {
                    let price_ratio = supplier.price / avg_price;
                    (1.0 - (price_ratio - 0.8)).max(0.0)
                } else {
                    0.0
                };
                let rating_score = supplier.rating / 5.0;
                let delivery_score =
                    (1.0 - f64::from(supplier.delivery_days) / MAX_DELIVERY_DAYS).max(0.0);

                let total = self.config.price_weight * price_score
                    + self.config.rating_weight * rating_score
                    + self.config.delivery_weight * delivery_score;

                ScoredSupplier {
                    supplier: supplier.clone(),
                    price_score: (price_score * 100.0).round() as u32,
                    rating_score: (rating_score * 100.0).round() as u32,
                    delivery_score: (delivery_score * 100.0).round() as u32,
                    total_score: (total * 100.0).round() as u32,
                    reliability: None,
                }
            })
            .collect();

        // Stable sort keeps input order for equal totals.
        scored.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        scored
    }

    /// Best-ranked supplier, or `None` when there are no candidates.
    pub fn find_best(
        &self,
        product: &ProductCandidate,
        suppliers: Option<&[Supplier]>,
    ) -> Option<ScoredSupplier> {
        let best = self.score(product, suppliers).into_iter().next();
        match &best {
            Some(supplier) => info!(
                "best supplier for '{}': {} (score {})",
                product.product_name, supplier.supplier.name, supplier.total_score
            ),
            None => warn!("no supplier found for '{}'", product.product_name),
        }
        best
    }

    /// Compare the top `top_n` suppliers, attaching reliability profiles
    /// from the given delivery history.
    pub fn compare(
        &self,
        product: &ProductCandidate,
        top_n: usize,
        history: &DeliveryHistory,
    ) -> SupplierComparison {
        let mut top: Vec<ScoredSupplier> = self
            .score(product, None)
            .into_iter()
            .take(top_n)
            .collect();

        for scored in &mut top {
            let records = history
                .get(&scored.supplier.name)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            scored.reliability = Some(analyze_reliability(&scored.supplier.name, records));
        }

        SupplierComparison {
            product: product.product_name.clone(),
            recommendation: top.first().cloned(),
            suppliers: top,
            comparison_factors: vec![
                ComparisonFactor {
                    name: "price".into(),
                    weight: self.config.price_weight,
                },
                ComparisonFactor {
                    name: "rating".into(),
                    weight: self.config.rating_weight,
                },
                ComparisonFactor {
                    name: "delivery".into(),
                    weight: self.config.delivery_weight,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::DeliveryRecord;

    fn make_supplier(name: &str, price: f64, rating: f64, delivery_days: u32) -> Supplier {
        Supplier {
            name: name.into(),
            price,
            rating,
            delivery_days,
        }
    }

    fn make_product(supplier_price: f64, suppliers: Vec<Supplier>) -> ProductCandidate {
        ProductCandidate {
            keyword: "smart watch".into(),
            product_name: "Smart Watch - Premium Edition".into(),
            trend_score: 85.0,
            supplier_price,
            market_price: None,
            profit_margin: 0.45,
            suppliers,
            competition: None,
            details: None,
            combined_score: 0.0,
        }
    }

    fn abc_suppliers() -> Vec<Supplier> {
        vec![
            make_supplier("Supplier-A", 22.99, 4.2, 7),
            make_supplier("Supplier-B", 24.99, 4.7, 5),
            make_supplier("Supplier-C", 19.99, 3.8, 12),
        ]
    }

    #[test]
    fn test_reference_scenario_ranks_b_first_c_last() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.99, abc_suppliers());

        let scored = scorer.score(&product, None);

        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].supplier.name, "Supplier-B");
        assert_eq!(scored[1].supplier.name, "Supplier-A");
        assert_eq!(scored[2].supplier.name, "Supplier-C");

        assert_eq!(scored[0].total_score, 87);
        assert_eq!(scored[1].total_score, 85);
        assert_eq!(scored[2].total_score, 82);

        // Spot-check sub-scores for the winner.
        assert_eq!(scored[0].price_score, 84);
        assert_eq!(scored[0].rating_score, 94);
        assert_eq!(scored[0].delivery_score, 83);
    }

    #[test]
    fn test_output_is_sorted_non_increasing() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.99, abc_suppliers());

        let scored = scorer.score(&product, None);
        assert!(scored.windows(2).all(|w| w[0].total_score >= w[1].total_score));
    }

    #[test]
    fn test_input_suppliers_are_not_mutated() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let suppliers = abc_suppliers();
        let product = make_product(25.99, suppliers.clone());

        let scored = scorer.score(&product, None);

        assert_eq!(product.suppliers, suppliers);
        for original in &suppliers {
            let copy = scored
                .iter()
                .find(|s| s.supplier.name == original.name)
                .unwrap();
            assert_eq!(&copy.supplier, original);
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.99, abc_suppliers());

        let first = scorer.score(&product, None);
        let second = scorer.score(&product, None);

        let names = |scored: &[ScoredSupplier]| -> Vec<String> {
            scored.iter().map(|s| s.supplier.name.clone()).collect()
        };
        assert_eq!(names(&first), names(&second));
        assert_eq!(
            first.iter().map(|s| s.total_score).collect::<Vec<_>>(),
            second.iter().map(|s| s.total_score).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_average_falls_back_to_supplier_mean() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        // No recorded cost: reference is the mean of 20 and 30.
        let product = make_product(
            0.0,
            vec![
                make_supplier("Cheap", 20.0, 4.0, 7),
                make_supplier("Dear", 30.0, 4.0, 7),
            ],
        );

        let scored = scorer.score(&product, None);

        // price ratios 0.8 and 1.2 against the 25.0 mean.
        assert_eq!(scored[0].supplier.name, "Cheap");
        assert_eq!(scored[0].price_score, 100);
        assert_eq!(scored[1].price_score, 60);
    }

    #[test]
    fn test_zero_average_price_guards_price_score() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(0.0, vec![make_supplier("Free", 0.0, 4.0, 7)]);

        let scored = scorer.score(&product, None);
        assert_eq!(scored[0].price_score, 0);
    }

    #[test]
    fn test_slow_delivery_scores_zero() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.0, vec![make_supplier("Slow", 25.0, 4.0, 45)]);

        let scored = scorer.score(&product, None);
        assert_eq!(scored[0].delivery_score, 0);
    }

    #[test]
    fn test_explicit_suppliers_override_product_list() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.99, abc_suppliers());
        let replacement = vec![make_supplier("Other", 24.0, 4.9, 4)];

        let scored = scorer.score(&product, Some(&replacement));

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].supplier.name, "Other");
    }

    #[test]
    fn test_find_best_empty_is_none() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.99, Vec::new());
        assert!(scorer.find_best(&product, None).is_none());
    }

    #[test]
    fn test_compare_attaches_reliability_and_recommendation() {
        let scorer = SupplierScorer::new(ScoringConfig::default());
        let product = make_product(25.99, abc_suppliers());

        let mut history = DeliveryHistory::new();
        history.insert(
            "Supplier-B".to_string(),
            vec![DeliveryRecord {
                on_time: true,
                accurate: true,
                quality_rating: 5.0,
                communication_rating: 5.0,
                delay_days: 0.0,
            }],
        );

        let comparison = scorer.compare(&product, 2, &history);

        assert_eq!(comparison.product, "Smart Watch - Premium Edition");
        assert_eq!(comparison.suppliers.len(), 2);
        assert_eq!(
            comparison.recommendation.as_ref().unwrap().supplier.name,
            "Supplier-B"
        );

        let weights: Vec<(&str, f64)> = comparison
            .comparison_factors
            .iter()
            .map(|f| (f.name.as_str(), f.weight))
            .collect();
        assert_eq!(
            weights,
            vec![("price", 0.4), ("rating", 0.3), ("delivery", 0.3)]
        );

        // With history: a perfect record; without: zeroed default.
        let b = &comparison.suppliers[0];
        assert_eq!(b.reliability.as_ref().unwrap().reliability_score, 100);
        let a = &comparison.suppliers[1];
        assert_eq!(a.reliability.as_ref().unwrap().reliability_score, 0);
    }

    #[test]
    fn test_custom_weights_change_ranking() {
        // Delivery-only weighting makes the fastest supplier win.
        let scorer = SupplierScorer::new(ScoringConfig {
            price_weight: 0.0,
            rating_weight: 0.0,
            delivery_weight: 1.0,
        });
        let product = make_product(25.99, abc_suppliers());

        let scored = scorer.score(&product, None);
        assert_eq!(scored[0].supplier.name, "Supplier-B");
        assert_eq!(scored[2].supplier.name, "Supplier-C");
        assert_eq!(scored[0].total_score, 83);
    }
}
