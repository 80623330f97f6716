//! The automation bot.
//!
//! Wires the research pipeline, supplier scoring, price optimization and
//! the job scheduler into one workflow: schedule a research job per
//! keyword, drain the queue, and journal what happened.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use automation_engine::{Job, JobExecutor, JobParams, JobScheduler, JobType};
use common::config::BotConfig;
use listing_engine::{ListingDraft, PriceOptimizer};
use research_engine::{ResearchPipeline, SyntheticCatalog};

use crate::journal::{now_iso, resolve_journal_dir, RunJournal};

type Pipeline =
    ResearchPipeline<SyntheticCatalog, SyntheticCatalog, SyntheticCatalog, SyntheticCatalog>;

pub struct Bot {
    config: BotConfig,
    scheduler: JobScheduler,
    pipeline: Pipeline,
    optimizer: PriceOptimizer,
    journal: RunJournal,
}

impl Bot {
    pub fn new(config: BotConfig) -> Result<Self> {
        Self::with_journal_dir(config, resolve_journal_dir())
    }

    pub fn with_journal_dir(config: BotConfig, journal_dir: PathBuf) -> Result<Self> {
        let journal = RunJournal::open(journal_dir.clone())
            .with_context(|| format!("opening journal at {}", journal_dir.display()))?;

        let catalog = SyntheticCatalog::default();
        let pipeline = ResearchPipeline::new(
            catalog.clone(),
            catalog.clone(),
            catalog.clone(),
            catalog,
            config.research.clone(),
        );
        let optimizer = PriceOptimizer::new(config.pricing.clone(), config.scoring.clone());

        Ok(Self {
            config,
            scheduler: JobScheduler::new(),
            pipeline,
            optimizer,
            journal,
        })
    }

    /// Run the full workflow: one research job per keyword, then drain.
    /// Returns the number of jobs executed.
    pub fn full_automation(&mut self, keywords: &[String]) -> usize {
        let run_id = Uuid::new_v4().to_string();
        info!("starting automation run {} ({} keywords)", run_id, keywords.len());

        self.journal.write_event(json!({
            "ts": now_iso(),
            "kind": "run_start",
            "run_id": run_id,
            "keywords": keywords,
        }));

        for keyword in keywords {
            let mut params = JobParams::new();
            params.insert("keyword".into(), json!(keyword));
            params.insert(
                "min_trend_score".into(),
                json!(self.config.research.min_trend_score),
            );
            params.insert(
                "min_profit_margin".into(),
                json!(self.config.research.min_profit_margin),
            );
            self.scheduler.schedule(JobType::ProductResearch, params);
        }

        let mut executor = ResearchExecutor {
            pipeline: &self.pipeline,
            optimizer: &self.optimizer,
            journal: &mut self.journal,
            run_id: &run_id,
        };
        let executed = self.scheduler.drain(&mut executor);

        self.journal.write_event(json!({
            "ts": now_iso(),
            "kind": "run_summary",
            "run_id": run_id,
            "executed": executed,
            "history_total": self.scheduler.history().len(),
        }));

        info!("automation run {} finished: {} jobs executed", run_id, executed);
        executed
    }

    pub fn job_status(&self, job_id: &str) -> Option<&Job> {
        self.scheduler.get_status(job_id)
    }

    pub fn cancel_job(&mut self, job_id: &str) -> bool {
        self.scheduler.cancel(job_id)
    }

    /// Jobs still waiting in the queue.
    pub fn active_jobs(&self) -> usize {
        self.scheduler.active_count()
    }

    /// Jobs that have finished or been cancelled.
    pub fn finished_jobs(&self) -> usize {
        self.scheduler.history().len()
    }
}

/// Drain-time worker: researches the job's keyword and prices the results
/// into listing drafts.
struct ResearchExecutor<'a> {
    pipeline: &'a Pipeline,
    optimizer: &'a PriceOptimizer,
    journal: &'a mut RunJournal,
    run_id: &'a str,
}

impl JobExecutor for ResearchExecutor<'_> {
    fn execute(&mut self, job: &Job) -> anyhow::Result<Value> {
        let keyword = job
            .param_str("keyword")
            .context("job is missing the 'keyword' parameter")?;

        let products = self.pipeline.full_research(&[keyword.to_string()]);
        if products.is_empty() {
            warn!("no viable products for '{}'", keyword);
        }

        let mut drafts: Vec<ListingDraft> = Vec::with_capacity(products.len());
        for product in &products {
            let price = self.optimizer.optimal_price(product);
            drafts.push(ListingDraft::build(product, price));
        }

        self.journal.write_event(json!({
            "ts": now_iso(),
            "kind": "research_job",
            "run_id": self.run_id,
            "job_id": job.id,
            "keyword": keyword,
            "products": products.len(),
            "top_listing": drafts.first().map(|d| json!({
                "title": d.title,
                "price": d.price,
                "sku": d.sku,
            })),
        }));

        Ok(json!({
            "keyword": keyword,
            "products_found": products.len(),
            "listings": serde_json::to_value(&drafts)?,
        }))
    }
}
