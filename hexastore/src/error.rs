/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use shared::terms::TriplePattern;
use shared::triple::NotGround;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HexaStoreError {
    /// A pattern with variables was offered as a fact.
    #[error("cannot store {0:?}: facts must not contain variables")]
    NotGround(TriplePattern),

    #[error("star query `{label}` has no patterns")]
    EmptyStarQuery { label: String },

    /// No single variable occurs in every pattern of the query.
    #[error("star query `{label}` has no variable shared by all of its patterns")]
    NoCentralVariable { label: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<NotGround> for HexaStoreError {
    fn from(err: NotGround) -> Self {
        HexaStoreError::NotGround(err.0)
    }
}

pub type Result<T> = std::result::Result<T, HexaStoreError>;
