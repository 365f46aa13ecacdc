/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rustc_hash::FxHashMap;
use crate::terms::{Term, TriplePattern, Variable};
use crate::triple::Triple;

// Dictionary for encoding and decoding strings.
// Constants and variables are interned in separate tables, so a constant id
// and a variable id never collide even if their numbers do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dictionary {
    string_to_id: FxHashMap<String, u32>,
    id_to_string: Vec<String>,
    variable_to_id: FxHashMap<String, u32>,
    id_to_variable: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            string_to_id: FxHashMap::default(),
            id_to_string: Vec::new(),
            variable_to_id: FxHashMap::default(),
            id_to_variable: Vec::new(),
        }
    }

    /// Intern a constant (URI, literal or blank node label).
    pub fn encode(&mut self, value: &str) -> u32 {
        if let Some(&id) = self.string_to_id.get(value) {
            id
        } else {
            let id = self.id_to_string.len() as u32;
            self.string_to_id.insert(value.to_string(), id);
            self.id_to_string.push(value.to_string());
            id
        }
    }

    /// Intern a variable name. `?x` and `x` name the same variable.
    pub fn encode_variable(&mut self, name: &str) -> Variable {
        let name = name.strip_prefix('?').unwrap_or(name);
        if let Some(&id) = self.variable_to_id.get(name) {
            Variable(id)
        } else {
            let id = self.id_to_variable.len() as u32;
            self.variable_to_id.insert(name.to_string(), id);
            self.id_to_variable.push(name.to_string());
            Variable(id)
        }
    }

    /// Id of an already interned constant. Never grows the table.
    pub fn lookup(&self, value: &str) -> Option<u32> {
        self.string_to_id.get(value).copied()
    }

    pub fn decode(&self, id: u32) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_str())
    }

    pub fn variable_name(&self, var: Variable) -> Option<&str> {
        self.id_to_variable.get(var.0 as usize).map(|s| s.as_str())
    }

    pub fn encode_triple(&mut self, subject: &str, predicate: &str, object: &str) -> Triple {
        Triple {
            subject: self.encode(subject),
            predicate: self.encode(predicate),
            object: self.encode(object),
        }
    }

    pub fn decode_triple(&self, triple: &Triple) -> String {
        let s = self.decode(triple.subject).unwrap_or("unknown");
        let p = self.decode(triple.predicate).unwrap_or("unknown");
        let o = self.decode(triple.object).unwrap_or("unknown");
        format!("{} {} {} .", s, p, o)
    }

    pub fn decode_term(&self, term: &Term) -> String {
        match term {
            Term::Constant(id) => self.decode(*id).unwrap_or("unknown").to_string(),
            Term::Variable(var) => format!("?{}", self.variable_name(*var).unwrap_or("unknown")),
        }
    }

    pub fn decode_pattern(&self, pattern: &TriplePattern) -> String {
        format!(
            "{} {} {} .",
            self.decode_term(&pattern.subject),
            self.decode_term(&pattern.predicate),
            self.decode_term(&pattern.object)
        )
    }

    /// Number of interned constants.
    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }

    pub fn variable_count(&self) -> usize {
        self.id_to_variable.len()
    }

    /// Import every constant and variable of `other`, returning the tables
    /// that translate ids of `other` into ids of `self`.
    pub fn merge(&mut self, other: &Dictionary) -> DictionaryRemap {
        let constants = other
            .id_to_string
            .iter()
            .map(|value| self.encode(value))
            .collect();
        let variables = other
            .id_to_variable
            .iter()
            .map(|name| self.encode_variable(name))
            .collect();
        DictionaryRemap { constants, variables }
    }
}

/// Id translation produced by [`Dictionary::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryRemap {
    /// `constants[old_id] == new_id`
    pub constants: Vec<u32>,
    /// `variables[old.0] == new`
    pub variables: Vec<Variable>,
}

impl DictionaryRemap {
    pub fn constant(&self, id: u32) -> Option<u32> {
        self.constants.get(id as usize).copied()
    }

    pub fn variable(&self, var: Variable) -> Option<Variable> {
        self.variables.get(var.0 as usize).copied()
    }

    /// Rewrite a pattern built against the merged-in dictionary.
    pub fn pattern(&self, pattern: &TriplePattern) -> Option<TriplePattern> {
        let term = |term: Term| match term {
            Term::Constant(id) => self.constant(id).map(Term::Constant),
            Term::Variable(var) => self.variable(var).map(Term::Variable),
        };
        Some(TriplePattern::new(
            term(pattern.subject)?,
            term(pattern.predicate)?,
            term(pattern.object)?,
        ))
    }
}
