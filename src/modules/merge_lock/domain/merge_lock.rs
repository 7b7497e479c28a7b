use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

use crate::shared::errors::{AppError, AppResult};

/// Source URIs that must always end up in the same golden record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MergeLock(BTreeSet<Url>);

impl MergeLock {
    pub fn new(uris: impl IntoIterator<Item = Url>) -> Self {
        Self(uris.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.0.contains(uri)
    }

    pub fn uris(&self) -> &BTreeSet<Url> {
        &self.0
    }

    pub fn into_uris(self) -> BTreeSet<Url> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Url> {
        self.0.iter().next()
    }
}

impl FromIterator<Url> for MergeLock {
    fn from_iter<I: IntoIterator<Item = Url>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// In-memory view of all merge locks, keyed by every member URI.
///
/// Invariant: every URI maps to exactly one lock and that lock contains the URI.
/// All mutating methods check before they touch the map, so an `Err` leaves the
/// registry unchanged.
#[derive(Debug, Clone, Default)]
pub struct MergeLockRegistry {
    entries: BTreeMap<Url, MergeLock>,
}

impl MergeLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted locks. A URI listed in two locks is malformed state.
    pub fn from_locks(locks: Vec<MergeLock>) -> AppResult<Self> {
        let mut entries = BTreeMap::new();

        for lock in locks.into_iter().filter(|l| !l.is_empty()) {
            for uri in lock.uris() {
                if entries.insert(uri.clone(), lock.clone()).is_some() {
                    return Err(AppError::MalformedStateError(format!(
                        "URI [{}] is part of more than one merge lock",
                        uri
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn is_part_of_merge_lock(&self, uri: &Url) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn get(&self, uri: &Url) -> Option<&MergeLock> {
        self.entries.get(uri)
    }

    /// True if one single lock contains every given URI.
    pub fn has_merge_lock(&self, uris: &BTreeSet<Url>) -> bool {
        let Some(first) = uris.iter().next() else {
            return false;
        };

        match self.entries.get(first) {
            Some(lock) => uris.iter().all(|uri| lock.contains(uri)),
            None => false,
        }
    }

    /// Returns `false` if the identical lock already exists.
    pub fn add(&mut self, lock: MergeLock) -> AppResult<bool> {
        if lock.is_empty() {
            return Ok(false);
        }

        let mut identical = true;
        for uri in lock.uris() {
            match self.entries.get(uri) {
                Some(existing) if existing != &lock => {
                    return Err(AppError::ConsistencyError(format!(
                        "URI [{}] already belongs to merge lock {:?}",
                        uri,
                        existing.uris().iter().map(Url::as_str).collect::<Vec<_>>()
                    )));
                }
                Some(_) => {}
                None => identical = false,
            }
        }

        if identical {
            return Ok(false);
        }

        for uri in lock.uris() {
            self.entries.insert(uri.clone(), lock.clone());
        }
        Ok(true)
    }

    /// Swap `old` for `new` inside the lock containing `old`.
    pub fn replace_uri(&mut self, old: &Url, new: &Url) -> AppResult<bool> {
        if old == new {
            return Ok(false);
        }
        let Some(lock) = self.entries.get(old).cloned() else {
            return Ok(false);
        };
        if let Some(existing) = self.entries.get(new) {
            return Err(AppError::ConsistencyError(format!(
                "Cannot replace [{}] with [{}]: target already belongs to merge lock {:?}",
                old,
                new,
                existing.uris().iter().map(Url::as_str).collect::<Vec<_>>()
            )));
        }

        let updated: MergeLock = lock
            .uris()
            .iter()
            .filter(|uri| *uri != old)
            .cloned()
            .chain(std::iter::once(new.clone()))
            .collect();

        self.entries.remove(old);
        for uri in updated.uris() {
            self.entries.insert(uri.clone(), updated.clone());
        }
        Ok(true)
    }

    /// Remove `uri` from its lock. A lock left with fewer than two URIs is dropped.
    pub fn remove_entry(&mut self, uri: &Url) -> AppResult<bool> {
        let Some(lock) = self.entries.remove(uri) else {
            return Ok(false);
        };

        let remaining: MergeLock = lock.uris().iter().filter(|u| *u != uri).cloned().collect();

        if remaining.len() < 2 {
            for member in remaining.uris() {
                self.entries.remove(member);
            }
        } else {
            for member in remaining.uris() {
                self.entries.insert(member.clone(), remaining.clone());
            }
        }
        Ok(true)
    }

    pub fn all_sources(&self) -> BTreeSet<Url> {
        self.entries.keys().cloned().collect()
    }

    /// Distinct locks ordered by their first URI
    pub fn locks(&self) -> Vec<MergeLock> {
        let distinct: BTreeSet<&MergeLock> = self.entries.values().collect();
        let mut locks: Vec<MergeLock> = distinct.into_iter().cloned().collect();
        locks.sort_by(|a, b| a.first().cmp(&b.first()));
        locks
    }

    pub fn len(&self) -> usize {
        self.locks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
