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
use crate::triple::Triple;

/// Handle of an interned variable name. Lives in its own namespace, separate
/// from constant ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(u32),
}

impl Term {
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_constant(&self) -> Option<u32> {
        match self {
            Term::Constant(id) => Some(*id),
            Term::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<Variable> {
        match self {
            Term::Variable(var) => Some(*var),
            Term::Constant(_) => None,
        }
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Self {
        Term::Variable(var)
    }
}

/// One of the three slots of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Subject,
    Predicate,
    Object,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Subject, Position::Predicate, Position::Object];

    #[inline]
    pub fn of(self, triple: &Triple) -> u32 {
        match self {
            Position::Subject => triple.subject,
            Position::Predicate => triple.predicate,
            Position::Object => triple.object,
        }
    }
}

/// A triple whose positions may hold variables. A pattern without variables
/// is a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        TriplePattern { subject, predicate, object }
    }

    pub fn term(&self, position: Position) -> Term {
        match position {
            Position::Subject => self.subject,
            Position::Predicate => self.predicate,
            Position::Object => self.object,
        }
    }

    pub fn terms(&self) -> [Term; 3] {
        [self.subject, self.predicate, self.object]
    }

    /// Distinct variables in subject, predicate, object order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::with_capacity(3);
        for term in self.terms() {
            if let Term::Variable(var) = term {
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
        }
        vars
    }

    pub fn contains_variable(&self, var: Variable) -> bool {
        self.terms().contains(&Term::Variable(var))
    }

    pub fn bound_count(&self) -> usize {
        self.terms().iter().filter(|term| !term.is_var()).count()
    }

    pub fn is_ground(&self) -> bool {
        self.bound_count() == 3
    }

    /// Constant values as index lookup keys, `None` for variable positions.
    pub fn bound_values(&self) -> (Option<u32>, Option<u32>, Option<u32>) {
        (
            self.subject.as_constant(),
            self.predicate.as_constant(),
            self.object.as_constant(),
        )
    }
}

impl From<Triple> for TriplePattern {
    fn from(triple: Triple) -> Self {
        TriplePattern {
            subject: Term::Constant(triple.subject),
            predicate: Term::Constant(triple.predicate),
            object: Term::Constant(triple.object),
        }
    }
}
