/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use shared::index_manager::UnifiedIndex;
use shared::terms::{Position, Term, TriplePattern, Variable};
use shared::triple::Triple;
use crate::substitution::Substitution;

/// A triple pattern compiled for matching against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    pub subject: Option<u32>,
    pub predicate: Option<u32>,
    pub object: Option<u32>,
    /// First occurrence of each distinct variable.
    pub outputs: Vec<(Variable, Position)>,
    /// Positions holding the same variable; a fact must agree on both.
    pub equalities: Vec<(Position, Position)>,
}

impl MatchPlan {
    pub fn compile(pattern: &TriplePattern) -> Self {
        let (subject, predicate, object) = pattern.bound_values();
        let mut outputs: Vec<(Variable, Position)> = Vec::with_capacity(3);
        let mut equalities = Vec::new();

        for position in Position::ALL {
            if let Term::Variable(var) = pattern.term(position) {
                let first = outputs
                    .iter()
                    .find(|(seen, _)| *seen == var)
                    .map(|&(_, first)| first);
                match first {
                    Some(first) => equalities.push((first, position)),
                    None => outputs.push((var, position)),
                }
            }
        }

        MatchPlan { subject, predicate, object, outputs, equalities }
    }

    #[inline]
    pub fn accepts(&self, triple: &Triple) -> bool {
        self.equalities
            .iter()
            .all(|&(left, right)| left.of(triple) == right.of(triple))
    }

    #[inline]
    pub fn bindings(&self, triple: &Triple) -> Substitution {
        self.outputs
            .iter()
            .map(|&(var, position)| (var, position.of(triple)))
            .collect()
    }
}

/// Lazy stream of the substitutions produced by matching one pattern.
pub struct PatternMatches<'a> {
    facts: Box<dyn Iterator<Item = Triple> + 'a>,
    plan: MatchPlan,
}

impl<'a> PatternMatches<'a> {
    pub fn new(index: &'a UnifiedIndex, pattern: &TriplePattern) -> Self {
        let plan = MatchPlan::compile(pattern);
        let facts = index.scan(plan.subject, plan.predicate, plan.object);
        PatternMatches { facts, plan }
    }

    pub fn plan(&self) -> &MatchPlan {
        &self.plan
    }
}

impl<'a> Iterator for PatternMatches<'a> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Self::Item> {
        let plan = &self.plan;
        self.facts
            .find(|triple| plan.accepts(triple))
            .map(|triple| plan.bindings(&triple))
    }
}
