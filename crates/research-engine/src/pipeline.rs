//! The product research pipeline.
//!
//! Turns raw keywords into ranked product candidates in five stages:
//! trend scoring, profitability filtering, competition enrichment, detail
//! enrichment, and ranking by combined score. Each stage is independently
//! callable; `full_research` chains them and never lets a source error
//! escape — a failed early stage yields an empty result, a failed
//! enrichment stage degrades to candidates without that data.

use std::collections::HashMap;

use tracing::{error, info, warn};

use common::{
    config::ResearchConfig, round1, round2, CompetitionSnapshot, ProductCandidate, ProductDetails,
    Result, TrendRecord,
};

use crate::sources::{
    title_case, CompetitionSource, DetailSource, MarketDataSource, TrendSource,
};

/// Suffix appended to the title-cased keyword to form the product name.
const PRODUCT_NAME_SUFFIX: &str = "Premium Edition";

pub struct ResearchPipeline<T, M, C, D> {
    trends: T,
    market: M,
    competition: C,
    details: D,
    config: ResearchConfig,
}

impl<T, M, C, D> ResearchPipeline<T, M, C, D>
where
    T: TrendSource,
    M: MarketDataSource,
    C: CompetitionSource,
    D: DetailSource,
{
    pub fn new(trends: T, market: M, competition: C, details: D, config: ResearchConfig) -> Self {
        Self {
            trends,
            market,
            competition,
            details,
            config,
        }
    }

    /// Stage 1 — aggregate the trend window per keyword and keep only
    /// keywords at or above `min_trend_score`.
    pub fn find_trending(&self, keywords: &[String]) -> Result<Vec<TrendRecord>> {
        info!("scoring trends for {} keywords", keywords.len());

        let mut trending = Vec::new();
        for keyword in keywords {
            let window = self.trends.trend_window(keyword)?;
            if window.is_empty() {
                warn!("no trend data for '{}'", keyword);
                continue;
            }

            let mean = window.iter().sum::<f64>() / window.len() as f64;
            let trend_score = round1(mean);
            if trend_score >= self.config.min_trend_score {
                trending.push(TrendRecord {
                    keyword: keyword.clone(),
                    trend_score,
                });
            }
        }

        info!("found {} trending keywords", trending.len());
        Ok(trending)
    }

    /// Stage 2 — attach prices, compute the profit margin, and keep only
    /// products at or above the minimum margin. `min_margin` overrides the
    /// configured threshold when given.
    pub fn find_profitable(
        &self,
        trending: &[TrendRecord],
        min_margin: Option<f64>,
    ) -> Result<Vec<ProductCandidate>> {
        let min_margin = min_margin.unwrap_or(self.config.min_profit_margin);
        info!("filtering for profit margin >= {}", min_margin);

        let mut products = Vec::new();
        for record in trending {
            let quote = self.market.market_quote(&record.keyword)?;
            let supplier_price = round2(quote.supplier_price);
            let market_price = round2(quote.market_price);

            let profit_margin = if market_price > 0.0 {
                round2((market_price - supplier_price) / market_price)
            } else {
                0.0
            };
            if profit_margin < min_margin {
                continue;
            }

            let suppliers = self.market.candidate_suppliers(&record.keyword)?;
            products.push(ProductCandidate {
                keyword: record.keyword.clone(),
                product_name: format!("{} - {}", title_case(&record.keyword), PRODUCT_NAME_SUFFIX),
                trend_score: record.trend_score,
                supplier_price,
                market_price: Some(market_price),
                profit_margin,
                suppliers,
                competition: None,
                details: None,
                combined_score: 0.0,
            });
        }

        info!("found {} profitable products", products.len());
        Ok(products)
    }

    /// Stage 3 — competition snapshot per keyword.
    pub fn analyze_competition(
        &self,
        keywords: &[String],
    ) -> Result<HashMap<String, CompetitionSnapshot>> {
        let mut snapshots = HashMap::new();
        for keyword in keywords {
            snapshots.insert(keyword.clone(), self.competition.competition(keyword)?);
        }
        info!("analyzed competition for {} keywords", snapshots.len());
        Ok(snapshots)
    }

    /// Stage 4 — detail bundle for one keyword.
    pub fn product_details(&self, keyword: &str) -> Result<ProductDetails> {
        self.details.details(keyword)
    }

    /// Run every stage and rank the survivors by combined score.
    ///
    /// Never returns an error: a failure in trend scoring or profitability
    /// filtering empties the run; a failure in an enrichment stage only
    /// drops that stage's data.
    pub fn full_research(&self, keywords: &[String]) -> Vec<ProductCandidate> {
        info!("starting full research for {} keywords", keywords.len());

        let trending = match self.find_trending(keywords) {
            Ok(trending) => trending,
            Err(e) => {
                error!("trend scoring failed: {}", e);
                return Vec::new();
            }
        };
        if trending.is_empty() {
            warn!("no trending keywords survived filtering");
            return Vec::new();
        }

        let mut products = match self.find_profitable(&trending, None) {
            Ok(products) => products,
            Err(e) => {
                error!("profitability filtering failed: {}", e);
                return Vec::new();
            }
        };
        if products.is_empty() {
            warn!("no profitable products survived filtering");
            return Vec::new();
        }

        let surviving: Vec<String> = products.iter().map(|p| p.keyword.clone()).collect();
        match self.analyze_competition(&surviving) {
            Ok(mut snapshots) => {
                for product in &mut products {
                    product.competition = snapshots.remove(&product.keyword);
                }
            }
            Err(e) => warn!("competition enrichment failed, continuing without: {}", e),
        }

        for product in &mut products {
            match self.product_details(&product.keyword) {
                Ok(details) => product.details = Some(details),
                Err(e) => warn!("detail enrichment failed for '{}': {}", product.keyword, e),
            }
        }

        for product in &mut products {
            product.combined_score = product.trend_score * product.profit_margin;
        }
        // Stable sort: equal combined scores keep their input order.
        products.sort_by(|a, b| {
            b.combined_score
                .partial_cmp(&a.combined_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!("research complete: {} products ranked", products.len());
        products
    }
}
