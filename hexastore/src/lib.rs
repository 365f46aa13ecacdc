/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod config;
pub mod error;
pub mod pattern_matcher;
pub mod rdf_hexastore;
pub mod star_query;
pub mod substitution;
pub mod workload;

pub use config::{JoinOrder, StoreConfig};
pub use error::{HexaStoreError, Result};
pub use rdf_hexastore::RdfHexaStore;
pub use star_query::StarQuery;
pub use substitution::Substitution;
