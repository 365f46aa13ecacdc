/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

extern crate hexastore;
use hexastore::{JoinOrder, RdfHexaStore, StarQuery, StoreConfig, Substitution};
use shared::terms::{Term, TriplePattern, Variable};
use std::collections::HashSet;

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: u32) -> Term {
        Term::Constant(id)
    }

    fn v(var: Variable) -> Term {
        Term::Variable(var)
    }

    /// A small social graph:
    /// alice knows bob, carol; bob knows carol; alice, bob are persons;
    /// carol is a robot; alice likes pizza; bob likes pizza, sushi.
    fn setup_social_store(config: StoreConfig) -> RdfHexaStore {
        let mut store = RdfHexaStore::with_config(config).unwrap();
        for (s, p, o) in [
            ("ex:alice", "ex:knows", "ex:bob"),
            ("ex:alice", "ex:knows", "ex:carol"),
            ("ex:bob", "ex:knows", "ex:carol"),
            ("ex:alice", "rdf:type", "ex:Person"),
            ("ex:bob", "rdf:type", "ex:Person"),
            ("ex:carol", "rdf:type", "ex:Robot"),
            ("ex:alice", "ex:likes", "ex:pizza"),
            ("ex:bob", "ex:likes", "ex:pizza"),
            ("ex:bob", "ex:likes", "ex:sushi"),
        ] {
            store.add_strings(s, p, o);
        }
        store
    }

    fn id(store: &RdfHexaStore, value: &str) -> u32 {
        store.dictionary().lookup(value).unwrap()
    }

    fn answers(store: &RdfHexaStore, query: &StarQuery) -> HashSet<Substitution> {
        store.match_star(query).collect()
    }

    #[test]
    fn test_star_query_join() {
        let mut store = RdfHexaStore::new();
        for (s, p, o) in [
            ("subject1", "predicate1", "object2"),
            ("subject1", "predicate1", "object3"),
            ("subject2", "predicate1", "object1"),
        ] {
            store.add_strings(s, p, o);
        }
        let x = store.dictionary_mut().encode_variable("?x");
        let p1 = id(&store, "predicate1");

        let query = StarQuery::new(
            "TestStarQuery",
            vec![
                TriplePattern::new(v(x), c(p1), c(id(&store, "object2"))),
                TriplePattern::new(v(x), c(p1), c(id(&store, "object3"))),
            ],
            vec![x],
        )
        .unwrap();

        let results: Vec<Substitution> = store.match_star(&query).collect();
        let expected: Substitution = [(x, id(&store, "subject1"))].into_iter().collect();
        assert_eq!(results, vec![expected]);
    }

    #[test]
    fn test_projection_deduplicates() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let friend = store.dictionary_mut().encode_variable("friend");
        let knows = id(&store, "ex:knows");
        let rdf_type = id(&store, "rdf:type");
        let person = id(&store, "ex:Person");

        // alice knows two people, but is reported once
        let query = StarQuery::new(
            "persons who know someone",
            vec![
                TriplePattern::new(v(x), c(rdf_type), c(person)),
                TriplePattern::new(v(x), c(knows), v(friend)),
            ],
            vec![x],
        )
        .unwrap();

        let results: Vec<Substitution> = store.match_star(&query).collect();
        assert_eq!(results.len(), 2);
        let subjects: HashSet<u32> = results.iter().map(|s| s.get(x).unwrap()).collect();
        assert_eq!(subjects, HashSet::from([id(&store, "ex:alice"), id(&store, "ex:bob")]));
        assert!(results.iter().all(|s| s.len() == 1));
    }

    #[test]
    fn test_non_central_answer_variables() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let food = store.dictionary_mut().encode_variable("food");
        let likes = id(&store, "ex:likes");
        let knows = id(&store, "ex:knows");
        let carol = id(&store, "ex:carol");

        let query = StarQuery::new(
            "what do carol's acquaintances like",
            vec![
                TriplePattern::new(v(x), c(knows), c(carol)),
                TriplePattern::new(v(x), c(likes), v(food)),
            ],
            vec![x, food],
        )
        .unwrap();

        let alice = id(&store, "ex:alice");
        let bob = id(&store, "ex:bob");
        let pizza = id(&store, "ex:pizza");
        let sushi = id(&store, "ex:sushi");
        let expected: HashSet<Substitution> = [
            [(x, alice), (food, pizza)].into_iter().collect::<Substitution>(),
            [(x, bob), (food, pizza)].into_iter().collect::<Substitution>(),
            [(x, bob), (food, sushi)].into_iter().collect::<Substitution>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(answers(&store, &query), expected);

        // Only the non-central variable: pizza is liked twice, reported once
        let foods_only = StarQuery::new("foods", query.patterns().to_vec(), vec![food]).unwrap();
        let foods: Vec<Substitution> = store.match_star(&foods_only).collect();
        assert_eq!(foods.len(), 2);
    }

    #[test]
    fn test_empty_result_short_circuits() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let robot = id(&store, "ex:Robot");
        let rdf_type = id(&store, "rdf:type");
        let likes = id(&store, "ex:likes");
        let sushi = id(&store, "ex:sushi");

        // carol is the only robot and likes nothing
        let query = StarQuery::new(
            "robots liking sushi",
            vec![
                TriplePattern::new(v(x), c(rdf_type), c(robot)),
                TriplePattern::new(v(x), c(likes), c(sushi)),
            ],
            vec![x],
        )
        .unwrap();
        assert_eq!(store.match_star(&query).count(), 0);
        assert!(!store.has_match(&query));
    }

    #[test]
    fn test_single_pattern_query() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let y = store.dictionary_mut().encode_variable("y");
        let likes = id(&store, "ex:likes");

        let query = StarQuery::new(
            "likers",
            vec![TriplePattern::new(v(x), c(likes), v(y))],
            vec![x],
        )
        .unwrap();
        assert_eq!(answers(&store, &query).len(), 2);

        let direct: HashSet<Substitution> = store
            .match_pattern(query.patterns()[0])
            .map(|s| s.project(&[x]))
            .collect();
        assert_eq!(answers(&store, &query), direct);
    }

    #[test]
    fn test_pattern_order_does_not_change_results() {
        for join_order in [JoinOrder::Declared, JoinOrder::MostSelectiveFirst] {
            let mut store = setup_social_store(StoreConfig::default().with_join_order(join_order));
            let x = store.dictionary_mut().encode_variable("x");
            let who = store.dictionary_mut().encode_variable("who");
            let knows = id(&store, "ex:knows");
            let likes = id(&store, "ex:likes");
            let rdf_type = id(&store, "rdf:type");
            let person = id(&store, "ex:Person");
            let pizza = id(&store, "ex:pizza");

            let patterns = vec![
                TriplePattern::new(v(x), c(knows), v(who)),
                TriplePattern::new(v(x), c(rdf_type), c(person)),
                TriplePattern::new(v(x), c(likes), c(pizza)),
            ];
            let forward = StarQuery::new("forward", patterns.clone(), vec![x, who]).unwrap();
            let mut reversed_patterns = patterns;
            reversed_patterns.reverse();
            let reversed = StarQuery::new("reversed", reversed_patterns, vec![x, who]).unwrap();

            let forward_answers = answers(&store, &forward);
            assert_eq!(forward_answers.len(), 3, "{:?}", join_order);
            assert_eq!(forward_answers, answers(&store, &reversed), "{:?}", join_order);

            // Running the same query twice gives the same set
            assert_eq!(forward_answers, answers(&store, &forward));
        }
    }

    #[test]
    fn test_central_variable_in_object_position() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let knows = id(&store, "ex:knows");
        let rdf_type = id(&store, "rdf:type");
        let alice = id(&store, "ex:alice");
        let bob = id(&store, "ex:bob");
        let robot = id(&store, "ex:Robot");

        let query = StarQuery::new(
            "known by alice and bob, a robot",
            vec![
                TriplePattern::new(c(alice), c(knows), v(x)),
                TriplePattern::new(c(bob), c(knows), v(x)),
                TriplePattern::new(v(x), c(rdf_type), c(robot)),
            ],
            vec![x],
        )
        .unwrap();
        let carol = id(&store, "ex:carol");
        assert_eq!(
            answers(&store, &query),
            HashSet::from([[(x, carol)].into_iter().collect::<Substitution>()])
        );
    }

    #[test]
    fn test_to_sparql() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let knows = id(&store, "ex:knows");
        let bob = id(&store, "ex:bob");
        let query = StarQuery::new("q", vec![TriplePattern::new(v(x), c(knows), c(bob))], vec![x]).unwrap();
        assert_eq!(
            query.to_sparql(store.dictionary()),
            "SELECT ?x WHERE { ?x ex:knows ex:bob . }"
        );
    }

    #[test]
    fn test_to_sparql_brackets_full_iris() {
        let mut store = RdfHexaStore::new();
        store.add_strings("http://example.org/alice", "http://xmlns.com/foaf/0.1/name", "\"Alice\"");
        let x = store.dictionary_mut().encode_variable("?who");
        let name = id(&store, "http://xmlns.com/foaf/0.1/name");
        let alice = id(&store, "\"Alice\"");
        let query = StarQuery::new("q", vec![TriplePattern::new(v(x), c(name), c(alice))], vec![x]).unwrap();
        assert_eq!(
            query.to_sparql(store.dictionary()),
            "SELECT ?who WHERE { ?who <http://xmlns.com/foaf/0.1/name> \"Alice\" . }"
        );
    }

    #[test]
    fn test_match_star_all_preserves_order() {
        let mut store = setup_social_store(StoreConfig::default());
        let x = store.dictionary_mut().encode_variable("x");
        let likes = id(&store, "ex:likes");
        let pizza = id(&store, "ex:pizza");
        let sushi = id(&store, "ex:sushi");

        let queries = vec![
            StarQuery::new("pizza", vec![TriplePattern::new(v(x), c(likes), c(pizza))], vec![x]).unwrap(),
            StarQuery::new("sushi", vec![TriplePattern::new(v(x), c(likes), c(sushi))], vec![x]).unwrap(),
        ];
        let results = store.match_star_all(&queries);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].len(), 2);
        assert_eq!(results[1].len(), 1);
        for (query, batch) in queries.iter().zip(&results) {
            let sequential: HashSet<Substitution> = store.match_star(query).collect();
            assert_eq!(batch.iter().cloned().collect::<HashSet<_>>(), sequential);
        }
    }
}
