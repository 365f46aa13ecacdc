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
use rustc_hash::FxHashSet;
use shared::dictionary::Dictionary;
use shared::index_manager::UnifiedIndex;
use shared::terms::{Term, TriplePattern, Variable};
use std::iter;
use crate::config::JoinOrder;
use crate::error::{HexaStoreError, Result};
use crate::pattern_matcher::PatternMatches;
use crate::substitution::Substitution;

/// A conjunction of triple patterns that all mention one central variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StarQuery {
    label: String,
    patterns: Vec<TriplePattern>,
    answer_variables: Vec<Variable>,
    central: Variable,
}

impl StarQuery {
    /// Build a star query, checking that it has at least one pattern and a
    /// variable occurring in all of them.
    pub fn new(
        label: impl Into<String>,
        patterns: Vec<TriplePattern>,
        answer_variables: Vec<Variable>,
    ) -> Result<Self> {
        let label = label.into();
        let first = match patterns.first() {
            Some(first) => first,
            None => return Err(HexaStoreError::EmptyStarQuery { label }),
        };
        let central = first
            .variables()
            .into_iter()
            .find(|&var| patterns.iter().all(|pattern| pattern.contains_variable(var)));

        match central {
            Some(central) => Ok(StarQuery { label, patterns, answer_variables, central }),
            None => Err(HexaStoreError::NoCentralVariable { label }),
        }
    }

    /// For producers that already guarantee the star shape.
    pub fn new_unchecked(
        label: impl Into<String>,
        patterns: Vec<TriplePattern>,
        answer_variables: Vec<Variable>,
        central: Variable,
    ) -> Self {
        StarQuery {
            label: label.into(),
            patterns,
            answer_variables,
            central,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    pub fn answer_variables(&self) -> &[Variable] {
        &self.answer_variables
    }

    pub fn central_variable(&self) -> Variable {
        self.central
    }

    pub fn to_sparql(&self, dictionary: &Dictionary) -> String {
        let select = self
            .answer_variables
            .iter()
            .map(|&var| format!("?{}", dictionary.variable_name(var).unwrap_or("unknown")))
            .collect::<Vec<_>>()
            .join(" ");
        let body = self
            .patterns
            .iter()
            .map(|pattern| {
                format!(
                    "{} {} {} .",
                    sparql_term(dictionary, pattern.subject),
                    sparql_term(dictionary, pattern.predicate),
                    sparql_term(dictionary, pattern.object)
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("SELECT {} WHERE {{ {} }}", select, body)
    }
}

/// Full IRIs are written as `<iri>`; prefixed names, literals and
/// already-bracketed IRIs are written as stored.
fn sparql_term(dictionary: &Dictionary, term: Term) -> String {
    match term {
        Term::Constant(id) => {
            let value = dictionary.decode(id).unwrap_or("unknown");
            if value.contains("://") && !value.starts_with('<') && !value.starts_with('"') {
                format!("<{}>", value)
            } else {
                value.to_string()
            }
        }
        Term::Variable(_) => dictionary.decode_term(&term),
    }
}

/// Lazy stream of the answers of a star query.
///
/// Patterns are joined as an index nested-loop: each partial substitution is
/// applied to the next pattern, the result is matched against the index and
/// every match is merged back in. Answers are projected onto the answer
/// variables and deduplicated as they are pulled.
pub struct StarMatches<'a> {
    joined: Box<dyn Iterator<Item = Substitution> + 'a>,
    answer_variables: Vec<Variable>,
    seen: FxHashSet<Substitution>,
}

impl<'a> StarMatches<'a> {
    pub fn new(index: &'a UnifiedIndex, query: &StarQuery, join_order: JoinOrder) -> Self {
        let ordered = order_patterns(index, query.patterns(), join_order);
        debug!(
            "star query `{}`: joining {} patterns on variable id {} ({:?})",
            query.label(),
            ordered.len(),
            query.central_variable().0,
            join_order
        );

        let mut joined: Box<dyn Iterator<Item = Substitution> + 'a> =
            Box::new(iter::once(Substitution::new()));
        for pattern in ordered {
            joined = Box::new(joined.flat_map(move |partial| {
                let bound = partial.apply(&pattern);
                PatternMatches::new(index, &bound).map(move |found| partial.merged(&found))
            }));
        }

        StarMatches {
            joined,
            answer_variables: query.answer_variables().to_vec(),
            seen: FxHashSet::default(),
        }
    }
}

impl<'a> Iterator for StarMatches<'a> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Self::Item> {
        for full in self.joined.by_ref() {
            let projected = full.project(&self.answer_variables);
            if self.seen.insert(projected.clone()) {
                return Some(projected);
            }
        }
        None
    }
}

fn order_patterns(
    index: &UnifiedIndex,
    patterns: &[TriplePattern],
    join_order: JoinOrder,
) -> Vec<TriplePattern> {
    let mut ordered = patterns.to_vec();
    if join_order == JoinOrder::MostSelectiveFirst {
        ordered.sort_by_cached_key(|pattern| {
            let (s, p, o) = pattern.bound_values();
            index.estimate(s, p, o)
        });
    }
    ordered
}
