// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typo-tolerant expansion of query terms into vocabulary lemmas.
//!
//! A query term rarely equals an indexed lemma: shoppers type prefixes
//! ("cre"), surface forms the lemmatizer absorbed ("apples" for the lemma
//! "apple"), and misspellings ("bier"). Expansion runs three tiers and
//! stops at the first one that produces anything:
//!
//! 1. **prefix** — lemmas starting with the term, which covers exact
//!    matches too;
//! 2. **synonym** — exact match against the surface forms the training
//!    lemmatizer collapsed into a lemma;
//! 3. **fuzzy** — bounded edit distance against every surface form
//!    (lemmas and synonyms alike), closest matches first.
//!
//! Results are interned lemma ids, deduplicated, best tier first. The
//! caller resolves them against the same [`Vocabulary`] the index was
//! built with.

use crate::catalog::{Catalog, Vocabulary};
use crate::levenshtein::distance_within;
use tracing::debug;

/// Fuzzy-matching knobs.
///
/// The defaults forgive one edit on terms of at least four characters;
/// shorter terms get no fuzzy expansion at all (a single edit on "ber"
/// reaches too much of the vocabulary to be useful).
#[derive(Debug, Clone, Copy)]
pub struct FuzzyPolicy {
    pub max_distance: usize,
    pub min_term_len: usize,
}

impl Default for FuzzyPolicy {
    fn default() -> Self {
        FuzzyPolicy {
            max_distance: 1,
            min_term_len: 4,
        }
    }
}

/// Query-term → lemma expansion over a fixed vocabulary.
#[derive(Debug)]
pub struct Autocompleter {
    /// Synonym surface forms, sorted by `(text, lemma id)`. A surface
    /// form can map to several lemmas when different product names
    /// lemmatized it differently.
    synonyms: Vec<(String, u32)>,
    policy: FuzzyPolicy,
}

impl Autocompleter {
    /// Collect the synonym table from the catalog's lemma pairs.
    pub fn build(catalog: &Catalog, vocabulary: &Vocabulary, policy: FuzzyPolicy) -> Self {
        let mut synonyms: Vec<(String, u32)> = catalog
            .iter()
            .flat_map(|product| product.lemma_pairs.iter())
            .filter_map(|pair| {
                let word = pair.word.as_ref()?;
                let id = vocabulary.id_of(&pair.lemma)?;
                Some((word.clone(), id))
            })
            .collect();
        synonyms.sort_unstable();
        synonyms.dedup();
        debug!(synonyms = synonyms.len(), "autocompleter built");
        Autocompleter { synonyms, policy }
    }

    /// Expand `term` into ranked lemma ids.
    pub fn search(&self, vocabulary: &Vocabulary, term: &str) -> Vec<u32> {
        if term.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<u32> = Vec::new();
        let mut push = |id: u32, hits: &mut Vec<u32>| {
            if !hits.contains(&id) {
                hits.push(id);
            }
        };

        for id in vocabulary.ids_with_prefix(term) {
            push(id, &mut hits);
        }
        for id in self.exact_synonyms(term) {
            push(id, &mut hits);
        }
        if !hits.is_empty() {
            return hits;
        }

        // Nothing matched literally; fall back to edit distance over
        // every surface form, closest first.
        if term.chars().count() < self.policy.min_term_len || self.policy.max_distance == 0 {
            return hits;
        }
        let mut fuzzy: Vec<(usize, &str, u32)> = Vec::new();
        for (id, lemma) in vocabulary.iter().enumerate() {
            if let Some(distance) = distance_within(term, lemma, self.policy.max_distance) {
                fuzzy.push((distance, lemma, id as u32));
            }
        }
        for (word, id) in &self.synonyms {
            if let Some(distance) = distance_within(term, word, self.policy.max_distance) {
                fuzzy.push((distance, word.as_str(), *id));
            }
        }
        fuzzy.sort_unstable();
        for (_, _, id) in fuzzy {
            push(id, &mut hits);
        }
        hits
    }

    fn exact_synonyms<'a>(&'a self, term: &'a str) -> impl Iterator<Item = u32> + 'a {
        let start = self
            .synonyms
            .partition_point(|(word, _)| word.as_str() < term);
        self.synonyms[start..]
            .iter()
            .take_while(move |(word, _)| word == term)
            .map(|(_, id)| *id)
    }
}
