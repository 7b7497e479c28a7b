use log::{debug, info, trace};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use super::config::{MergeConfig, ProviderOrder};
use super::metrics::{MergeMetrics, RunTimer};
use crate::modules::anime::RawAnime;
use crate::modules::matching::{MatchingProbabilityCalculator, MatchingProbabilityResult};
use crate::modules::merge_lock::{MergeLockRegistry, MergeLockStore};
use crate::modules::merging::domain::{GoldenRecord, GoldenRecordId, GoldenRecordIndex};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};

/// Turns raw per-provider records into golden records.
///
/// Providers are merged one after another. Records that find no confident match in
/// runs 2 to `max_runs - 1` wait in the re-check queue because a better candidate may
/// still be created by a later provider. Run 1 and the last run create a golden record
/// instead.
///
/// Locks are read once per batch. A lock written while a batch runs takes effect
/// with the next batch.
pub struct MergeOrchestrator {
    lock_store: Arc<MergeLockStore>,
    locks: MergeLockRegistry,
    index: GoldenRecordIndex,
    calculator: MatchingProbabilityCalculator,
    config: MergeConfig,
    recheck_queue: Vec<RawAnime>,
    run: u8,
    metrics: MergeMetrics,
    last_metrics: Option<MergeMetrics>,
}

/// Outcome of handling one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeDecision {
    MergedViaLock(GoldenRecordId),
    MergedViaSource(GoldenRecordId),
    MergedViaProbability(GoldenRecordId),
    Created(GoldenRecordId),
    Requeued,
}

impl MergeOrchestrator {
    pub fn new(lock_store: Arc<MergeLockStore>) -> Self {
        let config = MergeConfig::default();
        Self {
            lock_store,
            locks: MergeLockRegistry::new(),
            index: GoldenRecordIndex::new(&config.matching),
            calculator: MatchingProbabilityCalculator::default(),
            config,
            recheck_queue: Vec::new(),
            run: 1,
            metrics: MergeMetrics::new(),
            last_metrics: None,
        }
    }

    pub fn with_config(lock_store: Arc<MergeLockStore>, config: MergeConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::ValidationError)?;
        let calculator = MatchingProbabilityCalculator::new(config.matching.clone())?;
        Self::with_calculator(lock_store, config, calculator)
    }

    /// Use a prebuilt calculator. Its matching config replaces `config.matching`.
    pub fn with_calculator(
        lock_store: Arc<MergeLockStore>,
        mut config: MergeConfig,
        calculator: MatchingProbabilityCalculator,
    ) -> AppResult<Self> {
        config.matching = calculator.config().clone();
        config.validate().map_err(AppError::ValidationError)?;

        Ok(Self {
            lock_store,
            locks: MergeLockRegistry::new(),
            index: GoldenRecordIndex::new(&config.matching),
            calculator,
            config,
            recheck_queue: Vec::new(),
            run: 1,
            metrics: MergeMetrics::new(),
            last_metrics: None,
        })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Metrics of the last successful merge
    pub fn last_metrics(&self) -> Option<&MergeMetrics> {
        self.last_metrics.as_ref()
    }

    /// Golden records of the last successful merge, including their canonical scores
    pub fn golden_records(&self) -> &[GoldenRecord] {
        self.index.all_golden_records()
    }

    /// Merge `records` into golden records.
    ///
    /// Any lock store error aborts the whole batch and nothing is returned.
    pub async fn merge(&mut self, records: Vec<RawAnime>) -> AppResult<Vec<RawAnime>> {
        let result = self.run_merge(records).await;

        if let Err(e) = &result {
            LogContext::error_with_context(e, "MERGE: Aborting merge");
            self.index.clear();
            self.recheck_queue.clear();
            self.locks = MergeLockRegistry::new();
        }
        result
    }

    async fn run_merge(&mut self, records: Vec<RawAnime>) -> AppResult<Vec<RawAnime>> {
        if let Some(record) = records.iter().find(|r| r.sources.is_empty()) {
            return Err(AppError::InvalidInput(format!(
                "Record [{}] has no source",
                record.title
            )));
        }

        let timer = TimedOperation::new("MERGE: merge");
        let started = Instant::now();
        self.locks = self.lock_store.snapshot().await?;
        self.index.clear();
        self.recheck_queue.clear();
        self.run = 1;
        self.metrics = MergeMetrics {
            input_count: records.len(),
            ..MergeMetrics::default()
        };

        let groups = self.group_by_provider(records);
        self.metrics.provider_count = groups.len();
        info!(
            "MERGE: Merging {} records from {} providers",
            self.metrics.input_count, self.metrics.provider_count
        );
        debug!(
            "MERGE: Provider order {:?}",
            groups.iter().map(|(provider, _)| provider.as_str()).collect::<Vec<_>>()
        );

        let mut remaining = groups.into_iter();

        if let Some((provider, first)) = remaining.next() {
            debug!("MERGE: Seeding index with {} ({} records)", provider, first.len());
            LogContext::run_progress(self.run, self.config.max_runs, first.len());
            let run_timer = RunTimer::start(self.run);
            for record in first {
                self.merge_entry(record);
            }
            run_timer.stop(&mut self.metrics);
        }

        self.run = 2;
        let run_timer = RunTimer::start(self.run);
        for (provider, group) in remaining {
            debug!("MERGE: Merging {} ({} records)", provider, group.len());
            LogContext::run_progress(self.run, self.config.max_runs, group.len());
            for record in group {
                self.merge_entry(record);
            }
        }
        run_timer.stop(&mut self.metrics);

        while self.run <= self.config.max_runs {
            let queued = std::mem::take(&mut self.recheck_queue);
            LogContext::run_progress(self.run, self.config.max_runs, queued.len());

            let run_timer = RunTimer::start(self.run);
            for record in queued {
                self.merge_entry(record);
            }
            run_timer.stop(&mut self.metrics);

            self.run += 1;
        }

        let entries = self.index.all_entries();
        self.metrics.golden_record_count = entries.len();
        self.metrics.total_duration = started.elapsed();
        timer.finish_with_info(&format!("{} golden records", entries.len()));
        info!("MERGE: Finished\n{}", self.metrics.report());

        self.last_metrics = Some(self.metrics.clone());
        Ok(entries)
    }

    /// Provider groups in processing order, each sorted by title
    fn group_by_provider(&self, records: Vec<RawAnime>) -> Vec<(String, Vec<RawAnime>)> {
        let mut by_provider: BTreeMap<String, Vec<RawAnime>> = BTreeMap::new();
        for record in records {
            by_provider
                .entry(record.provider().to_string())
                .or_default()
                .push(record);
        }

        let mut groups: Vec<(String, Vec<RawAnime>)> = by_provider.into_iter().collect();
        for (_, group) in groups.iter_mut() {
            group.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.sources.cmp(&b.sources)));
        }

        // BTreeMap order already sorts hostnames, the stable sort keeps it for ties
        match self.config.provider_order {
            ProviderOrder::Descending => groups.sort_by(|a, b| b.1.len().cmp(&a.1.len())),
            ProviderOrder::Ascending => groups.sort_by(|a, b| a.1.len().cmp(&b.1.len())),
        }
        groups
    }

    fn merge_entry(&mut self, record: RawAnime) {
        let decision = if self.locks.has_merge_lock(&record.sources) {
            self.merge_locked(record)
        } else if let Some(id) = self
            .index
            .find_golden_record_by_source(&record.sources)
            .map(|golden| golden.id())
        {
            self.index.merge(id, &record);
            MergeDecision::MergedViaSource(id)
        } else {
            self.merge_by_probability(record)
        };

        match decision {
            MergeDecision::MergedViaLock(_) => self.metrics.merged_via_lock += 1,
            MergeDecision::MergedViaSource(_) => self.metrics.merged_via_source += 1,
            MergeDecision::MergedViaProbability(_) => self.metrics.merged_via_probability += 1,
            MergeDecision::Created(_) => self.metrics.created += 1,
            MergeDecision::Requeued => self.metrics.record_requeue(self.run),
        }
    }

    fn merge_locked(&mut self, record: RawAnime) -> MergeDecision {
        let mut lock: BTreeSet<Url> = BTreeSet::new();
        for source in &record.sources {
            if let Some(found) = self.locks.get(source) {
                lock.extend(found.uris().iter().cloned());
            }
        }

        let target = self
            .index
            .find_golden_record_by_source(&lock)
            .map(|golden| golden.id());

        match target {
            Some(id) => {
                debug!("MERGE: [{}] merged into {} via merge lock", record.title, id);
                self.index.merge(id, &record);
                MergeDecision::MergedViaLock(id)
            }
            None => self.re_check_or_create(record),
        }
    }

    fn merge_by_probability(&mut self, record: RawAnime) -> MergeDecision {
        let threshold = self.config.matching_threshold;
        let mut best: Option<(GoldenRecordId, MatchingProbabilityResult)> = None;

        // candidates come ordered by id, so ties keep the oldest golden record
        for candidate in self.index.find_possible_golden_records(&record) {
            let result = self.calculator.calculate(&record, candidate.anime());
            trace!(
                "MERGE: [{}] vs {} [{}] = {:.4}",
                record.title,
                candidate.id(),
                candidate.anime().title,
                result.probability
            );

            if !result.is_match(threshold) {
                continue;
            }
            if best.map_or(true, |(_, b)| result.probability > b.probability) {
                best = Some((candidate.id(), result));
            }
        }

        match best {
            Some((id, result)) => {
                debug!(
                    "MERGE: [{}] merged into {} with probability {:.4}",
                    record.title, id, result.probability
                );
                self.index.merge(id, &record);
                MergeDecision::MergedViaProbability(id)
            }
            None => self.re_check_or_create(record),
        }
    }

    fn re_check_or_create(&mut self, record: RawAnime) -> MergeDecision {
        if self.run == 1 || self.run >= self.config.max_runs {
            let id = self.index.create_golden_record(record);
            MergeDecision::Created(id)
        } else {
            trace!("MERGE: [{}] queued for run {}", record.title, self.run + 1);
            self.recheck_queue.push(record);
            MergeDecision::Requeued
        }
    }
}
