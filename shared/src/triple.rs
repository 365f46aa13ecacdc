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
use std::fmt;
use crate::terms::{Term, TriplePattern};

/// A stored fact: three dictionary-encoded constants.
#[derive(PartialEq, Debug, Clone, Copy, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: u32,
    pub predicate: u32,
    pub object: u32,
}

impl Triple {
    pub fn new(subject: u32, predicate: u32, object: u32) -> Self {
        Triple { subject, predicate, object }
    }
}

/// Returned when a pattern with a variable position is used where a fact is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotGround(pub TriplePattern);

impl fmt::Display for NotGround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern {:?} has variable positions and cannot be stored as a fact", self.0)
    }
}

impl std::error::Error for NotGround {}

impl TryFrom<TriplePattern> for Triple {
    type Error = NotGround;

    fn try_from(pattern: TriplePattern) -> Result<Self, Self::Error> {
        match (pattern.subject, pattern.predicate, pattern.object) {
            (Term::Constant(s), Term::Constant(p), Term::Constant(o)) => Ok(Triple::new(s, p, o)),
            _ => Err(NotGround(pattern)),
        }
    }
}
