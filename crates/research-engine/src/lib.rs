//! Keyword-driven product research pipeline.

pub mod pipeline;
pub mod sources;

pub use pipeline::ResearchPipeline;
pub use sources::{
    CompetitionSource, DetailSource, MarketDataSource, SyntheticCatalog, TrendSource,
};
