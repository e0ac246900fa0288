// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Name index: lemma sets of product names → baseline suggestions.
//!
//! A second set-trie, keyed by the interned lemma-id set of each product
//! name. Distinct products can share a lemma set ("Cream" and "Creams"
//! both lemmatize to {cream}), so values are sorted vectors. Only
//! products that have a baseline suggestion are indexed — a product the
//! rule miner never saw cannot be suggested, so indexing its name would
//! only produce dead ends.
//!
//! The query operation is `iter_supersets({lemma})`: every product whose
//! name contains the lemma, regardless of what else the name contains.

use crate::catalog::{Catalog, Vocabulary};
use crate::set_trie::SetTrie;
use crate::types::Suggestion;
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Immutable lemma-set → baseline suggestions index.
#[derive(Debug)]
pub struct NameIndex {
    trie: SetTrie<u32, Vec<Suggestion>>,
}

impl NameIndex {
    /// Index the baseline suggestion of every catalog product that has
    /// one, keyed by the product's lemma-id set.
    pub fn build(catalog: &Catalog, vocabulary: &Vocabulary, baseline: &[Suggestion]) -> Self {
        let mut groups: BTreeMap<Vec<u32>, Vec<Suggestion>> = BTreeMap::new();
        for suggestion in baseline {
            let Some(product) = catalog.get(suggestion.consequent_item()) else {
                continue;
            };
            let lemma_ids = vocabulary.lemma_ids(product);
            if lemma_ids.is_empty() {
                // A nameless lemma set can never match a query term.
                continue;
            }
            groups.entry(lemma_ids).or_default().push(suggestion.clone());
        }

        let mut groups: Vec<(Vec<u32>, Vec<Suggestion>)> = groups.into_iter().collect();
        sort_groups(&mut groups);

        let mut trie = SetTrie::new();
        for (lemma_ids, group) in groups {
            trie.insert(&lemma_ids, group);
        }
        debug!(lemma_sets = trie.len(), "name index built");
        NameIndex { trie }
    }

    /// Number of distinct lemma sets.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Baseline suggestions of every product whose lemma set contains
    /// `lemma_id`, in depth-first order.
    pub fn suggestions_containing(&self, lemma_id: u32) -> impl Iterator<Item = &Suggestion> {
        self.trie
            .iter_supersets(&[lemma_id])
            .flat_map(|group| group.iter())
    }
}

#[cfg(feature = "parallel")]
fn sort_groups(groups: &mut [(Vec<u32>, Vec<Suggestion>)]) {
    groups.par_iter_mut().for_each(|(_, group)| group.sort());
}

#[cfg(not(feature = "parallel"))]
fn sort_groups(groups: &mut [(Vec<u32>, Vec<Suggestion>)]) {
    for (_, group) in groups.iter_mut() {
        group.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LemmaPair, Measure, Product};

    fn product(name: &str, lemmas: &[&str]) -> Product {
        Product {
            id: 0,
            name: name.to_string(),
            lemma_pairs: lemmas
                .iter()
                .map(|lemma| LemmaPair {
                    lemma: (*lemma).to_string(),
                    word: None,
                })
                .collect(),
        }
    }

    fn baseline(item: u32, support: f64) -> Suggestion {
        Suggestion::new(item, Measure::new(1.0, support).unwrap(), Vec::new()).unwrap()
    }

    fn sample() -> (Catalog, Vocabulary, Vec<Suggestion>) {
        let catalog = Catalog::new(vec![
            product("Light Cream", &["cream", "light"]),
            product("Mushroom Cream Sauce", &["cream", "mushroom", "sauce"]),
            product("Whole Milk", &["milk", "whole"]),
            product("Unmined", &["unmined"]),
        ]);
        let vocabulary = Vocabulary::from_catalog(&catalog);
        // Product 3 has no baseline on purpose.
        let baselines = vec![baseline(0, 0.00773), baseline(1, 0.00573), baseline(2, 0.04)];
        (catalog, vocabulary, baselines)
    }

    #[test]
    fn lemma_lookup_finds_every_containing_product() {
        let (catalog, vocabulary, baselines) = sample();
        let index = NameIndex::build(&catalog, &vocabulary, &baselines);

        let cream = vocabulary.id_of("cream").unwrap();
        let mut items: Vec<u32> = index
            .suggestions_containing(cream)
            .map(Suggestion::consequent_item)
            .collect();
        items.sort_unstable();
        assert_eq!(items, vec![0, 1]);

        let milk = vocabulary.id_of("milk").unwrap();
        let items: Vec<u32> = index
            .suggestions_containing(milk)
            .map(Suggestion::consequent_item)
            .collect();
        assert_eq!(items, vec![2]);
    }

    #[test]
    fn products_without_baselines_are_not_indexed() {
        let (catalog, vocabulary, baselines) = sample();
        let index = NameIndex::build(&catalog, &vocabulary, &baselines);
        let unmined = vocabulary.id_of("unmined").unwrap();
        assert_eq!(index.suggestions_containing(unmined).count(), 0);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn shared_lemma_sets_group_sorted() {
        let catalog = Catalog::new(vec![
            product("Cream", &["cream"]),
            product("Creams", &["cream"]),
        ]);
        let vocabulary = Vocabulary::from_catalog(&catalog);
        let baselines = vec![baseline(0, 0.01), baseline(1, 0.02)];
        let index = NameIndex::build(&catalog, &vocabulary, &baselines);

        let cream = vocabulary.id_of("cream").unwrap();
        let items: Vec<u32> = index
            .suggestions_containing(cream)
            .map(Suggestion::consequent_item)
            .collect();
        // One shared lemma set, sorted best-first inside the group.
        assert_eq!(index.len(), 1);
        assert_eq!(items, vec![1, 0]);
    }
}
