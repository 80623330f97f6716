//! Supplier reliability analysis over delivery history.

use std::collections::HashMap;

use tracing::info;

use common::{round1, round2, DeliveryRecord, SupplierReliability};

/// Delivery records keyed by supplier name.
pub type DeliveryHistory = HashMap<String, Vec<DeliveryRecord>>;

const ON_TIME_WEIGHT: f64 = 0.35;
const ACCURACY_WEIGHT: f64 = 0.25;
const QUALITY_WEIGHT: f64 = 0.2;
const COMMUNICATION_WEIGHT: f64 = 0.2;

/// Aggregate a supplier's delivery history into a reliability profile.
///
/// An empty history yields the zeroed default — callers that have no data
/// get a neutral record instead of an error.
pub fn analyze_reliability(supplier_name: &str, history: &[DeliveryRecord]) -> SupplierReliability {
    if history.is_empty() {
        info!("no delivery history for {}, using defaults", supplier_name);
        return SupplierReliability::default();
    }

    let n = history.len() as f64;
    let on_time_delivery_rate =
        round2(history.iter().filter(|r| r.on_time).count() as f64 / n);
    let order_accuracy_rate =
        round2(history.iter().filter(|r| r.accurate).count() as f64 / n);
    let quality_consistency =
        round1(history.iter().map(|r| r.quality_rating).sum::<f64>() / n);
    let communication_rating =
        round1(history.iter().map(|r| r.communication_rating).sum::<f64>() / n);
    let avg_shipping_delay = round1(history.iter().map(|r| r.delay_days).sum::<f64>() / n);

    let weighted = ON_TIME_WEIGHT * on_time_delivery_rate
        + ACCURACY_WEIGHT * order_accuracy_rate
        + QUALITY_WEIGHT * quality_consistency / 5.0
        + COMMUNICATION_WEIGHT * communication_rating / 5.0;

    SupplierReliability {
        on_time_delivery_rate,
        order_accuracy_rate,
        quality_consistency,
        communication_rating,
        avg_shipping_delay,
        reliability_score: (weighted * 100.0).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(on_time: bool, quality: f64, delay: f64) -> DeliveryRecord {
        DeliveryRecord {
            on_time,
            accurate: true,
            quality_rating: quality,
            communication_rating: 4.0,
            delay_days: delay,
        }
    }

    #[test]
    fn test_empty_history_is_default() {
        let reliability = analyze_reliability("Supplier-A", &[]);
        assert_eq!(reliability, SupplierReliability::default());
        assert_eq!(reliability.reliability_score, 0);
    }

    #[test]
    fn test_aggregates_over_history() {
        let history = vec![
            make_record(true, 5.0, 0.0),
            make_record(true, 4.0, 0.0),
            make_record(false, 3.0, 2.0),
            make_record(true, 4.0, 0.0),
        ];

        let reliability = analyze_reliability("Supplier-A", &history);

        assert_eq!(reliability.on_time_delivery_rate, 0.75);
        assert_eq!(reliability.order_accuracy_rate, 1.0);
        assert_eq!(reliability.quality_consistency, 4.0);
        assert_eq!(reliability.communication_rating, 4.0);
        assert_eq!(reliability.avg_shipping_delay, 0.5);
        // 0.35·0.75 + 0.25·1.0 + 0.2·0.8 + 0.2·0.8 = 0.8325 → 83
        assert_eq!(reliability.reliability_score, 83);
    }

    #[test]
    fn test_is_deterministic() {
        let history = vec![make_record(true, 4.5, 0.0)];
        assert_eq!(
            analyze_reliability("Supplier-A", &history),
            analyze_reliability("Supplier-A", &history)
        );
    }
}
