/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use shared::dictionary::Dictionary;
use shared::terms::{Term, TriplePattern, Variable};
use std::collections::BTreeMap;

/// A mapping from variables to constant ids, representing one match.
///
/// Backed by an ordered map, so two substitutions binding the same variables
/// to the same values are equal and hash the same regardless of the order
/// the bindings were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Substitution {
    bindings: BTreeMap<Variable, u32>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `var` to `value`, returning the previous value if any.
    pub fn bind(&mut self, var: Variable, value: u32) -> Option<u32> {
        self.bindings.insert(var, value)
    }

    pub fn get(&self, var: Variable) -> Option<u32> {
        self.bindings.get(&var).copied()
    }

    pub fn contains(&self, var: Variable) -> bool {
        self.bindings.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, u32)> + '_ {
        self.bindings.iter().map(|(&var, &value)| (var, value))
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.bindings.keys().copied()
    }

    pub fn apply_term(&self, term: Term) -> Term {
        match term {
            Term::Variable(var) => self.get(var).map_or(term, Term::Constant),
            constant => constant,
        }
    }

    /// Replace every bound variable of `pattern` by its value.
    pub fn apply(&self, pattern: &TriplePattern) -> TriplePattern {
        TriplePattern {
            subject: self.apply_term(pattern.subject),
            predicate: self.apply_term(pattern.predicate),
            object: self.apply_term(pattern.object),
        }
    }

    /// Union of both binding sets. On a shared variable `other` wins; callers
    /// only merge substitutions over disjoint variables.
    pub fn merged(&self, other: &Substitution) -> Substitution {
        let mut bindings = self.bindings.clone();
        bindings.extend(other.iter());
        Substitution { bindings }
    }

    /// Keep only the bindings of `vars`.
    pub fn project(&self, vars: &[Variable]) -> Substitution {
        vars.iter()
            .filter_map(|&var| self.get(var).map(|value| (var, value)))
            .collect()
    }

    /// Readable form: variable name to decoded constant.
    pub fn decode(&self, dictionary: &Dictionary) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .map(|(&var, &value)| {
                (
                    dictionary.variable_name(var).unwrap_or("unknown").to_string(),
                    dictionary.decode(value).unwrap_or("unknown").to_string(),
                )
            })
            .collect()
    }
}

impl FromIterator<(Variable, u32)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, u32)>>(iter: I) -> Self {
        Substitution {
            bindings: iter.into_iter().collect(),
        }
    }
}
