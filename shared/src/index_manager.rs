/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::debug;
use serde::{Serialize, Deserialize};
use std::collections::{BTreeMap, BTreeSet};
use std::iter;
use crate::terms::Position;
use crate::triple::Triple;

/// first key -> second key -> set of third values
pub type PermutationIndex = BTreeMap<u32, BTreeMap<u32, BTreeSet<u32>>>;

/// One of the six orderings of (subject, predicate, object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permutation {
    Spo,
    Sop,
    Pso,
    Pos,
    Osp,
    Ops,
}

impl Permutation {
    pub const ALL: [Permutation; 6] = [
        Permutation::Spo,
        Permutation::Sop,
        Permutation::Pso,
        Permutation::Pos,
        Permutation::Osp,
        Permutation::Ops,
    ];

    /// Pick the permutation whose leading positions are exactly the bound ones.
    pub fn select(subject: bool, predicate: bool, object: bool) -> Self {
        match (subject, predicate, object) {
            (true, true, _) => Permutation::Spo,
            (true, false, true) => Permutation::Sop,
            (true, false, false) => Permutation::Spo,
            (false, true, true) => Permutation::Pos,
            (false, true, false) => Permutation::Pso,
            (false, false, true) => Permutation::Ops,
            (false, false, false) => Permutation::Spo,
        }
    }

    /// Positions in key order.
    pub fn order(self) -> [Position; 3] {
        use Position::*;
        match self {
            Permutation::Spo => [Subject, Predicate, Object],
            Permutation::Sop => [Subject, Object, Predicate],
            Permutation::Pso => [Predicate, Subject, Object],
            Permutation::Pos => [Predicate, Object, Subject],
            Permutation::Osp => [Object, Subject, Predicate],
            Permutation::Ops => [Object, Predicate, Subject],
        }
    }

    #[inline]
    pub fn keys(self, triple: &Triple) -> (u32, u32, u32) {
        let [a, b, c] = self.order();
        (a.of(triple), b.of(triple), c.of(triple))
    }

    /// Rebuild a triple from keys given in this permutation's order.
    #[inline]
    pub fn triple(self, k1: u32, k2: u32, k3: u32) -> Triple {
        let mut triple = Triple::new(0, 0, 0);
        for (position, value) in self.order().into_iter().zip([k1, k2, k3]) {
            match position {
                Position::Subject => triple.subject = value,
                Position::Predicate => triple.predicate = value,
                Position::Object => triple.object = value,
            }
        }
        triple
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UnifiedIndex {
    // The six permutations, using BTreeMap of BTreeMap of BTreeSet.
    spo: PermutationIndex,
    sop: PermutationIndex,
    pso: PermutationIndex,
    pos: PermutationIndex,
    osp: PermutationIndex,
    ops: PermutationIndex,
    fact_count: usize,
}

impl UnifiedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permutation(&self, perm: Permutation) -> &PermutationIndex {
        match perm {
            Permutation::Spo => &self.spo,
            Permutation::Sop => &self.sop,
            Permutation::Pso => &self.pso,
            Permutation::Pos => &self.pos,
            Permutation::Osp => &self.osp,
            Permutation::Ops => &self.ops,
        }
    }

    /// Insert a single triple into all six indexes
    pub fn insert(&mut self, triple: &Triple) -> bool {
        if self.contains(triple) {
            return false; // triple already stored
        }
        let Triple { subject: s, predicate: p, object: o } = *triple;
        self.spo.entry(s).or_default().entry(p).or_default().insert(o);
        self.sop.entry(s).or_default().entry(o).or_default().insert(p);
        self.pso.entry(p).or_default().entry(s).or_default().insert(o);
        self.pos.entry(p).or_default().entry(o).or_default().insert(s);
        self.osp.entry(o).or_default().entry(s).or_default().insert(p);
        self.ops.entry(o).or_default().entry(p).or_default().insert(s);
        self.fact_count += 1;
        true
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.spo
            .get(&triple.subject)
            .and_then(|pred_map| pred_map.get(&triple.predicate))
            .map_or(false, |objects| objects.contains(&triple.object))
    }

    /// Number of distinct facts, not index entries.
    pub fn len(&self) -> usize {
        self.fact_count
    }

    pub fn is_empty(&self) -> bool {
        self.fact_count == 0
    }

    /// Clear all data in the indexes
    pub fn clear(&mut self) {
        self.spo.clear();
        self.sop.clear();
        self.pso.clear();
        self.pos.clear();
        self.osp.clear();
        self.ops.clear();
        self.fact_count = 0;
    }

    /// Every stored fact, in SPO order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Triple> + '_> {
        self.scan(None, None, None)
    }

    /// Lazily enumerate the facts matching the bound positions.
    ///
    /// The permutation is chosen so that the bound positions form its key
    /// prefix: the descent is at most two ordered lookups, after which only
    /// matching facts are visited.
    pub fn scan(
        &self,
        s: Option<u32>,
        p: Option<u32>,
        o: Option<u32>,
    ) -> Box<dyn Iterator<Item = Triple> + '_> {
        let perm = Permutation::select(s.is_some(), p.is_some(), o.is_some());
        let index = self.permutation(perm);

        match prefix_keys(perm, s, p, o) {
            (Some(k1), Some(k2), Some(k3)) => {
                let found = index
                    .get(&k1)
                    .and_then(|inner| inner.get(&k2))
                    .map_or(false, |leaf| leaf.contains(&k3));
                Box::new(found.then(|| perm.triple(k1, k2, k3)).into_iter())
            }
            (Some(k1), Some(k2), None) => match index.get(&k1).and_then(|inner| inner.get(&k2)) {
                Some(leaf) => Box::new(leaf.iter().map(move |&k3| perm.triple(k1, k2, k3))),
                None => Box::new(iter::empty()),
            },
            (Some(k1), None, None) => match index.get(&k1) {
                Some(inner) => Box::new(inner.iter().flat_map(move |(&k2, leaf)| {
                    leaf.iter().map(move |&k3| perm.triple(k1, k2, k3))
                })),
                None => Box::new(iter::empty()),
            },
            (None, None, None) => Box::new(index.iter().flat_map(move |(&k1, inner)| {
                inner.iter().flat_map(move |(&k2, leaf)| {
                    leaf.iter().map(move |&k3| perm.triple(k1, k2, k3))
                })
            })),
            _ => unreachable!("bound positions are always a prefix of the selected permutation"),
        }
    }

    /// Exact number of facts `scan` would yield, without building triples.
    pub fn estimate(&self, s: Option<u32>, p: Option<u32>, o: Option<u32>) -> usize {
        let perm = Permutation::select(s.is_some(), p.is_some(), o.is_some());
        let index = self.permutation(perm);

        match prefix_keys(perm, s, p, o) {
            (Some(k1), Some(k2), Some(k3)) => index
                .get(&k1)
                .and_then(|inner| inner.get(&k2))
                .map_or(0, |leaf| leaf.contains(&k3) as usize),
            (Some(k1), Some(k2), None) => index
                .get(&k1)
                .and_then(|inner| inner.get(&k2))
                .map_or(0, |leaf| leaf.len()),
            (Some(k1), None, None) => index
                .get(&k1)
                .map_or(0, |inner| inner.values().map(|leaf| leaf.len()).sum()),
            (None, None, None) => self.fact_count,
            _ => unreachable!("bound positions are always a prefix of the selected permutation"),
        }
    }

    /// Bulk-insert a batch of triples, returning how many were new.
    ///
    /// Chunks are indexed in parallel into partial indexes which are then
    /// merged into `self` one after the other.
    pub fn bulk_insert(&mut self, triples: &[Triple]) -> usize {
        use rayon::prelude::*;

        if triples.is_empty() {
            return 0;
        }

        let num_threads = rayon::current_num_threads();
        let chunk_size = (triples.len() / num_threads).max(10_000);

        let partial_indexes: Vec<UnifiedIndex> = triples
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut local_index = UnifiedIndex::new();
                for triple in chunk {
                    local_index.insert(triple);
                }
                local_index
            })
            .collect();

        debug!(
            "bulk insert: {} triples indexed in {} partial indexes",
            triples.len(),
            partial_indexes.len()
        );

        partial_indexes
            .into_iter()
            .map(|partial_index| self.merge_from(partial_index))
            .sum()
    }

    /// Merge another index into this one, returning how many of its facts
    /// were not already present.
    pub fn merge_from(&mut self, other: UnifiedIndex) -> usize {
        let added = other.iter().filter(|triple| !self.contains(triple)).count();

        let UnifiedIndex { spo, sop, pso, pos, osp, ops, .. } = &mut *self;
        rayon::scope(|scope| {
            scope.spawn(move |_| merge_permutation(spo, other.spo));
            scope.spawn(move |_| merge_permutation(sop, other.sop));
            scope.spawn(move |_| merge_permutation(pso, other.pso));
            scope.spawn(move |_| merge_permutation(pos, other.pos));
            scope.spawn(move |_| merge_permutation(osp, other.osp));
            scope.spawn(move |_| merge_permutation(ops, other.ops));
        });

        self.fact_count += added;
        added
    }
}

/// Lookup keys in `perm` order.
#[inline]
fn prefix_keys(
    perm: Permutation,
    s: Option<u32>,
    p: Option<u32>,
    o: Option<u32>,
) -> (Option<u32>, Option<u32>, Option<u32>) {
    let pick = |position: Position| match position {
        Position::Subject => s,
        Position::Predicate => p,
        Position::Object => o,
    };
    let [a, b, c] = perm.order();
    (pick(a), pick(b), pick(c))
}

fn merge_permutation(target: &mut PermutationIndex, source: PermutationIndex) {
    for (k1, inner) in source {
        let entry = target.entry(k1).or_default();
        for (k2, leaf) in inner {
            entry.entry(k2).or_default().extend(leaf);
        }
    }
}
