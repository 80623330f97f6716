//! Multi-criteria supplier scoring.

pub mod reliability;
pub mod scorer;

pub use reliability::{analyze_reliability, DeliveryHistory};
pub use scorer::{ComparisonFactor, SupplierComparison, SupplierScorer};
