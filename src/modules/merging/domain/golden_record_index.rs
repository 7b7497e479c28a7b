use log::trace;
use std::collections::{BTreeSet, HashMap};
use url::Url;

use super::golden_record::{GoldenRecord, GoldenRecordId};
use crate::modules::anime::{RawAnime, ScoreAggregator};
use crate::modules::matching::{MatchingConfig, TitleNormalizer, TitleTokenizer};

/// In-memory store of golden records for one merge run.
///
/// Records live in an arena addressed by [`GoldenRecordId`]. Two side tables keep
/// lookups sub-linear: title token -> record ids and source URI -> record id.
pub struct GoldenRecordIndex {
    records: Vec<GoldenRecord>,
    tokens: HashMap<String, BTreeSet<GoldenRecordId>>,
    sources: HashMap<Url, GoldenRecordId>,
    normalizer: TitleNormalizer,
    tokenizer: TitleTokenizer,
    score_aggregator: ScoreAggregator,
}

impl GoldenRecordIndex {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            records: Vec::new(),
            tokens: HashMap::new(),
            sources: HashMap::new(),
            normalizer: TitleNormalizer::matching_pipeline(),
            tokenizer: TitleTokenizer::new(config.stop_words.clone(), config.min_token_length),
            score_aggregator: ScoreAggregator::new(),
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.tokens.clear();
        self.sources.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: GoldenRecordId) -> Option<&GoldenRecord> {
        self.records.get(id.value())
    }

    /// Golden records sharing at least one title token with `record`, ordered by id
    pub fn find_possible_golden_records(&self, record: &RawAnime) -> Vec<&GoldenRecord> {
        let mut ids = BTreeSet::new();

        for title in record.titles() {
            for token in self.tokens_of(title) {
                if let Some(matches) = self.tokens.get(&token) {
                    ids.extend(matches.iter().copied());
                }
            }
        }

        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }

    /// Golden record holding any of `uris`. With several hits the oldest record wins.
    pub fn find_golden_record_by_source(&self, uris: &BTreeSet<Url>) -> Option<&GoldenRecord> {
        uris.iter()
            .filter_map(|uri| self.sources.get(uri))
            .min()
            .and_then(|id| self.get(*id))
    }

    pub fn create_golden_record(&mut self, record: RawAnime) -> GoldenRecordId {
        let id = GoldenRecordId::new(self.records.len());
        let score = self.score_aggregator.aggregate(&record.scores);
        let titles: Vec<String> = record.titles().map(str::to_string).collect();
        let sources: Vec<Url> = record.sources.iter().cloned().collect();

        self.records.push(GoldenRecord::new(id, record, score));
        self.index_titles(id, titles.iter().map(String::as_str));
        self.index_sources(id, sources);

        trace!("MERGE: Created {} with {} titles", id, titles.len());
        id
    }

    /// Merge `record` into the golden record `id`. Returns `None` for an unknown id.
    pub fn merge(&mut self, id: GoldenRecordId, record: &RawAnime) -> Option<&GoldenRecord> {
        let golden = self.records.get_mut(id.value())?;

        let added_synonyms = golden.anime_mut().merge_with(record);
        let score = self.score_aggregator.aggregate(&golden.anime().scores);
        golden.set_score(score);

        self.index_titles(id, added_synonyms.iter().map(String::as_str));
        self.index_sources(id, record.sources.iter().cloned());

        self.get(id)
    }

    /// Snapshot of all golden records as plain anime, in creation order
    pub fn all_entries(&self) -> Vec<RawAnime> {
        self.records.iter().map(|r| r.anime().clone()).collect()
    }

    pub fn all_golden_records(&self) -> &[GoldenRecord] {
        &self.records
    }

    fn tokens_of(&self, title: &str) -> BTreeSet<String> {
        self.tokenizer.tokenize(&self.normalizer.normalize(title))
    }

    fn index_titles<'a>(&mut self, id: GoldenRecordId, titles: impl Iterator<Item = &'a str>) {
        for title in titles {
            for token in self.tokens_of(title) {
                self.tokens.entry(token).or_default().insert(id);
            }
        }
    }

    fn index_sources(&mut self, id: GoldenRecordId, sources: impl IntoIterator<Item = Url>) {
        for source in sources {
            self.sources.entry(source).or_insert(id);
        }
    }
}

impl Default for GoldenRecordIndex {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}
