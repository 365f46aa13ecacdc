/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Serialize, Deserialize};
use crate::error::{HexaStoreError, Result};

/// How the star-query evaluator orders a query's patterns before joining.
///
/// The order never changes the result set, only the size of the intermediate
/// substitution sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOrder {
    /// Join in the order the patterns were declared.
    #[default]
    Declared,
    /// Start from the pattern with the fewest matching facts.
    MostSelectiveFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub join_order: JoinOrder,

    /// Batches at least this large are indexed on the rayon pool.
    pub parallel_load_threshold: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            join_order: JoinOrder::Declared,
            parallel_load_threshold: 100_000,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_join_order(mut self, join_order: JoinOrder) -> Self {
        self.join_order = join_order;
        self
    }

    pub fn with_parallel_load_threshold(mut self, threshold: usize) -> Self {
        self.parallel_load_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_load_threshold == 0 {
            return Err(HexaStoreError::InvalidConfig(
                "parallel_load_threshold must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
