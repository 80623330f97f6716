//! Data source traits and the built-in synthetic provider.
//!
//! The pipeline never talks to an API directly. Each external concern is a
//! trait taking a keyword and returning an already-resolved data bundle, so
//! tests inject fixed fixtures and the binary injects whatever backend is
//! wired up. [`SyntheticCatalog`] is the default backend: it derives every
//! value from a hash of the keyword, so repeated runs see identical data.

use std::collections::BTreeMap;

use common::{
    round1, round2, CompetitionLevel, CompetitionSnapshot, CompetitorQuote, MarketQuote,
    ProductDetails, Result, Supplier,
};

// ── Source traits ─────────────────────────────────────────────────────

/// Popularity samples for a keyword over the observation window.
pub trait TrendSource {
    fn trend_window(&self, keyword: &str) -> Result<Vec<f64>>;
}

/// Supplier cost, observed market price, and candidate suppliers.
pub trait MarketDataSource {
    fn market_quote(&self, keyword: &str) -> Result<MarketQuote>;
    fn candidate_suppliers(&self, keyword: &str) -> Result<Vec<Supplier>>;
}

/// Competition landscape for a keyword.
pub trait CompetitionSource {
    fn competition(&self, keyword: &str) -> Result<CompetitionSnapshot>;
}

/// Descriptive detail bundle for a keyword.
pub trait DetailSource {
    fn details(&self, keyword: &str) -> Result<ProductDetails>;
}

// ── Synthetic catalog ─────────────────────────────────────────────────

/// Deterministic stand-in for the real trend/market/competition feeds.
///
/// Every value is derived from an FNV hash of the keyword: the same
/// keyword always produces the same trend window, quote, suppliers, and
/// competition snapshot.
#[derive(Debug, Clone, Default)]
pub struct SyntheticCatalog;

/// Splitmix-style stream seeded from a keyword hash.
struct SeedStream(u64);

impl SeedStream {
    fn for_keyword(keyword: &str, salt: u64) -> Self {
        // FNV-1a over the lowercased keyword.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325 ^ salt;
        for byte in keyword.to_lowercase().bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self(hash)
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }
}

/// Title-case each whitespace-separated word.
pub fn title_case(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn slug(keyword: &str) -> String {
    keyword.to_lowercase().replace(' ', "_")
}

impl TrendSource for SyntheticCatalog {
    fn trend_window(&self, keyword: &str) -> Result<Vec<f64>> {
        let mut seed = SeedStream::for_keyword(keyword, 0x7472_656e_64); // "trend"
        let samples = (0..12).map(|_| round1(seed.range(35.0, 100.0))).collect();
        Ok(samples)
    }
}

impl MarketDataSource for SyntheticCatalog {
    fn market_quote(&self, keyword: &str) -> Result<MarketQuote> {
        let mut seed = SeedStream::for_keyword(keyword, 0x6d61_726b_6574); // "market"
        let supplier_price = round2(seed.range(5.0, 50.0));
        let markup = seed.range(1.2, 2.0);
        Ok(MarketQuote {
            supplier_price,
            market_price: round2(supplier_price * markup),
        })
    }

    fn candidate_suppliers(&self, keyword: &str) -> Result<Vec<Supplier>> {
        let mut seed = SeedStream::for_keyword(keyword, 0x7375_7070_6c79); // "supply"
        let base_price = self.market_quote(keyword)?.supplier_price;

        let count = 1 + (seed.next() % 3) as usize;
        let suppliers = (0..count)
            .map(|_| Supplier {
                name: format!("Supplier-{}", 1 + seed.next() % 99),
                price: round2(base_price * seed.range(0.9, 1.1)),
                rating: round1(seed.range(3.0, 5.0)),
                delivery_days: 3 + (seed.next() % 12) as u32,
            })
            .collect();
        Ok(suppliers)
    }
}

impl CompetitionSource for SyntheticCatalog {
    fn competition(&self, keyword: &str) -> Result<CompetitionSnapshot> {
        let mut seed = SeedStream::for_keyword(keyword, 0x636f_6d70); // "comp"

        let num_competitors = 5 + (seed.next() % 45) as u32;
        let avg_price = round2(seed.range(20.0, 200.0));
        let price_range = (round2(seed.range(10.0, 100.0)), round2(seed.range(100.0, 300.0)));
        let competition_level = match seed.next() % 3 {
            0 => CompetitionLevel::Low,
            1 => CompetitionLevel::Medium,
            _ => CompetitionLevel::High,
        };
        let top_competitors = (1..=3)
            .map(|i| CompetitorQuote {
                name: format!("Competitor-{i}"),
                price: round2(seed.range(20.0, 200.0)),
            })
            .collect();

        Ok(CompetitionSnapshot {
            num_competitors,
            avg_price,
            price_range,
            competition_level,
            top_competitors,
        })
    }
}

impl DetailSource for SyntheticCatalog {
    fn details(&self, keyword: &str) -> Result<ProductDetails> {
        let mut seed = SeedStream::for_keyword(keyword, 0x6465_7461_696c); // "detail"
        let title = title_case(keyword);

        let material = ["plastic", "metal", "wood", "textile"][(seed.next() % 4) as usize];
        let mut specifications = BTreeMap::new();
        specifications.insert("material".to_string(), material.to_string());
        specifications.insert(
            "weight".to_string(),
            format!("{} kg", round1(seed.range(0.1, 5.0))),
        );
        specifications.insert(
            "dimensions".to_string(),
            format!(
                "{}x{}x{} cm",
                10 + seed.next() % 40,
                10 + seed.next() % 40,
                5 + seed.next() % 25
            ),
        );

        Ok(ProductDetails {
            name: format!("{title} - Premium Edition"),
            description: format!(
                "High-quality {title} with first-class features. \
                 Designed for daily use and built to last."
            ),
            features: vec![
                format!("Premium {title} quality"),
                "Durable materials".to_string(),
                "Easy handling".to_string(),
                "Modern design".to_string(),
            ],
            specifications,
            images: vec![
                format!("https://example.com/images/{}_1.jpg", slug(keyword)),
                format!("https://example.com/images/{}_2.jpg", slug(keyword)),
            ],
        })
    }
}
