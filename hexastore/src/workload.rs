/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Curation of star-query workloads before they are run against a store.

use log::{debug, warn};
use rand::Rng;
use rustc_hash::FxHashSet;
use crate::rdf_hexastore::RdfHexaStore;
use crate::star_query::StarQuery;

/// Share of empty-result queries kept by default.
pub const DEFAULT_KEEP_EMPTY_RATIO: f64 = 0.05;

#[derive(Debug, Clone, Default)]
pub struct CurationReport {
    pub valid: Vec<StarQuery>,
    pub duplicates: usize,
    pub empty_dropped: usize,
    pub empty_kept: usize,
}

/// Drop duplicate queries (same patterns and answer variables, any label),
/// keep every query with at least one answer, and keep each query without
/// answers with probability `keep_empty_ratio`.
pub fn curate<R: Rng>(
    store: &RdfHexaStore,
    queries: impl IntoIterator<Item = StarQuery>,
    keep_empty_ratio: f64,
    rng: &mut R,
) -> CurationReport {
    let keep_empty_ratio = if (0.0..=1.0).contains(&keep_empty_ratio) {
        keep_empty_ratio
    } else {
        warn!("keep_empty_ratio {} is not a probability, using 0", keep_empty_ratio);
        0.0
    };

    let mut report = CurationReport::default();
    let mut seen = FxHashSet::default();

    for query in queries {
        let shape = (query.patterns().to_vec(), query.answer_variables().to_vec());
        if !seen.insert(shape) {
            report.duplicates += 1;
            continue;
        }

        if store.has_match(&query) {
            report.valid.push(query);
        } else if rng.gen_bool(keep_empty_ratio) {
            report.valid.push(query);
            report.empty_kept += 1;
        } else {
            report.empty_dropped += 1;
        }
    }

    debug!(
        "curated workload: {} valid, {} duplicates, {} empty dropped, {} empty kept",
        report.valid.len(),
        report.duplicates,
        report.empty_dropped,
        report.empty_kept
    );
    report
}

/// Split `queries` into consecutive groups of `group_size`; the last group
/// may be shorter. A zero group size yields a single group.
pub fn split_into_groups(queries: &[StarQuery], group_size: usize) -> Vec<Vec<StarQuery>> {
    if queries.is_empty() {
        return Vec::new();
    }
    let group_size = if group_size == 0 { queries.len() } else { group_size };
    queries.chunks(group_size).map(|chunk| chunk.to_vec()).collect()
}
