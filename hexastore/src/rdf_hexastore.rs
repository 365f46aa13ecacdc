/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, info};
use rayon::prelude::*;
use shared::dictionary::Dictionary;
use shared::index_manager::UnifiedIndex;
use shared::terms::TriplePattern;
use shared::triple::Triple;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::pattern_matcher::PatternMatches;
use crate::star_query::{StarMatches, StarQuery};
use crate::substitution::Substitution;

/// In-memory RDF store indexing every fact under all six orderings of
/// (subject, predicate, object).
///
/// Facts are only ever added or cleared all at once; there is no removal of
/// single facts. Matching borrows the store immutably, so any number of
/// queries can run in parallel once loading is done.
#[derive(Debug, Clone, Default)]
pub struct RdfHexaStore {
    dictionary: Dictionary,
    index: UnifiedIndex,
    config: StoreConfig,
}

impl RdfHexaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(RdfHexaStore {
            dictionary: Dictionary::new(),
            index: UnifiedIndex::new(),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn index(&self) -> &UnifiedIndex {
        &self.index
    }

    /// Add one fact. Returns `false` if it was already stored.
    pub fn add(&mut self, fact: Triple) -> bool {
        self.index.insert(&fact)
    }

    /// Add a ground pattern as a fact.
    pub fn add_pattern(&mut self, pattern: &TriplePattern) -> Result<bool> {
        let fact = Triple::try_from(*pattern)?;
        Ok(self.add(fact))
    }

    /// Intern the three values and add the resulting fact.
    pub fn add_strings(&mut self, subject: &str, predicate: &str, object: &str) -> bool {
        let fact = self.dictionary.encode_triple(subject, predicate, object);
        self.add(fact)
    }

    /// Add a batch of facts, returning how many were new.
    ///
    /// Batches reaching `parallel_load_threshold` are indexed on the rayon
    /// pool; smaller ones are inserted one by one.
    pub fn add_all<I>(&mut self, facts: I) -> usize
    where
        I: IntoIterator<Item = Triple>,
    {
        let facts: Vec<Triple> = facts.into_iter().collect();
        let added = if facts.len() >= self.config.parallel_load_threshold {
            self.index.bulk_insert(&facts)
        } else {
            facts.iter().filter(|fact| self.index.insert(fact)).count()
        };
        info!(
            "loaded {} new facts out of {} ({} stored)",
            added,
            facts.len(),
            self.index.len()
        );
        added
    }

    /// Number of distinct facts.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, fact: &Triple) -> bool {
        self.index.contains(fact)
    }

    /// Every stored fact. Each call starts a fresh enumeration.
    pub fn facts(&self) -> impl Iterator<Item = Triple> + '_ {
        self.index.iter()
    }

    /// Empty all six indexes. The dictionary is kept.
    pub fn clear(&mut self) {
        debug!("clearing {} facts", self.index.len());
        self.index.clear();
    }

    /// One substitution per stored fact consistent with `pattern`.
    pub fn match_pattern(&self, pattern: TriplePattern) -> PatternMatches<'_> {
        PatternMatches::new(&self.index, &pattern)
    }

    /// Answers of `query`, projected onto its answer variables.
    pub fn match_star(&self, query: &StarQuery) -> StarMatches<'_> {
        StarMatches::new(&self.index, query, self.config.join_order)
    }

    /// Evaluate a batch of queries concurrently on the rayon pool. Results are
    /// returned in the order of `queries`.
    pub fn match_star_all(&self, queries: &[StarQuery]) -> Vec<Vec<Substitution>> {
        queries
            .par_iter()
            .map(|query| self.match_star(query).collect())
            .collect()
    }

    /// Whether `query` has at least one answer. Stops at the first one.
    pub fn has_match(&self, query: &StarQuery) -> bool {
        self.match_star(query).next().is_some()
    }

    /// Number of facts matching the constant positions of `pattern`.
    /// Repeated variables are not taken into account.
    pub fn estimate_cardinality(&self, pattern: &TriplePattern) -> usize {
        let (s, p, o) = pattern.bound_values();
        self.index.estimate(s, p, o)
    }
}
