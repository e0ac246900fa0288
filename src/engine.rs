// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The suggestion engine: query expansion, basket lookup, fusion, top-K.
//!
//! `get_suggestions` runs a fixed pipeline over immutable indexes:
//!
//! ```text
//! query ──▶ tokenize ──▶ autocomplete ──▶ name index ──┐ (Q: AND terms,
//!                                                      │     OR synonyms)
//! basket ──▶ rule index subset walk ──▶ k-way merge ───┤ (B: best-first)
//!                                                      ▼
//!                    fuse (4 cases) ▶ uniquify ▶ drop basket ▶ take 10
//! ```
//!
//! The fusion table, with `null` meaning "input absent":
//!
//! | Q      | B      | fused stream                                        |
//! |--------|--------|-----------------------------------------------------|
//! | null   | null   | baseline                                            |
//! | null   | some   | B then baseline                                     |
//! | some   | null   | Q, sorted                                           |
//! | some   | some   | B then baseline, filtered to Q's products           |
//!
//! The some/some case deliberately *ranks by basket and filters by
//! query*: a shopper typing "cheese" with bacon in the basket wants the
//! cheese that goes with bacon first, not the most popular cheese.
//!
//! Q is `null` when the query is blank (or tokenizes to nothing), but
//! `some`-and-empty when terms existed and matched nothing — that case
//! must produce an empty result, never a fallback to popularity.
//!
//! After construction the engine is immutable: `get_suggestions` takes
//! `&self`, never blocks, and is safe to call from any number of threads.

use crate::artifact;
use crate::autocomplete::{Autocompleter, FuzzyPolicy};
use crate::catalog::{Catalog, Vocabulary};
use crate::error::{Error, Result};
use crate::merge::KWayMerge;
use crate::name_index::NameIndex;
use crate::rule_index::RuleIndex;
use crate::tokenize::tokenize;
use crate::types::Suggestion;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::io::BufRead;
use tracing::{info, trace};

/// Suggestions returned per call, at most.
pub const MAX_SUGGESTIONS: usize = 10;

/// One entry of the public suggestion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedProduct {
    pub identifier: u32,
    pub name: String,
    pub lift: f64,
    pub support: f64,
    /// Names of the basket products that triggered the suggestion;
    /// empty for popularity (baseline) suggestions.
    pub antecedent_items: Vec<String>,
}

/// Immutable suggestion engine. Build once, query from anywhere.
#[derive(Debug)]
pub struct SuggestionEngine {
    catalog: Catalog,
    vocabulary: Vocabulary,
    rules: RuleIndex,
    names: NameIndex,
    autocompleter: Autocompleter,
}

impl SuggestionEngine {
    /// Build from an already-loaded catalog and flattened suggestion
    /// list, with the default fuzzy policy.
    pub fn new(catalog: Catalog, suggestions: Vec<Suggestion>) -> Result<Self> {
        Self::with_policy(catalog, suggestions, FuzzyPolicy::default())
    }

    /// Build with an explicit fuzzy policy.
    pub fn with_policy(
        catalog: Catalog,
        suggestions: Vec<Suggestion>,
        policy: FuzzyPolicy,
    ) -> Result<Self> {
        for suggestion in &suggestions {
            check_catalog_bounds(&catalog, suggestion)?;
        }
        let vocabulary = Vocabulary::from_catalog(&catalog);
        let rules = RuleIndex::build(suggestions);
        let names = NameIndex::build(&catalog, &vocabulary, rules.baseline());
        let autocompleter = Autocompleter::build(&catalog, &vocabulary, policy);
        info!(
            products = catalog.len(),
            lemmas = vocabulary.len(),
            antecedents = rules.len(),
            "suggestion engine ready"
        );
        Ok(SuggestionEngine {
            catalog,
            vocabulary,
            rules,
            names,
            autocompleter,
        })
    }

    /// Build straight from artifact data: the product TSV (decompressed)
    /// and the two arrays of the suggestion artifact.
    pub fn from_artifacts(
        products: impl BufRead,
        array: &[u32],
        indices: &[u32],
    ) -> Result<Self> {
        let catalog = artifact::read_products(products)?;
        let suggestions = artifact::read_suggestions(array, indices)?;
        Self::new(catalog, suggestions)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Core lookup: at most [`MAX_SUGGESTIONS`] suggestions for a basket
    /// of product ids and/or a free-text query.
    ///
    /// Basket ids outside the catalog are ignored (they cannot match any
    /// antecedent). A query that matches no products yields an empty
    /// vector.
    pub fn get_suggestions(&self, basket: &[u32], query: &str) -> Vec<Suggestion> {
        let query_hits = self.expand_query(query);
        let basket_set: BTreeSet<u32> = basket.iter().copied().collect();
        let sorted_basket: Vec<u32> = basket_set.iter().copied().collect();

        let basket_stream = if !sorted_basket.is_empty() && self.rules.has_subset(&sorted_basket) {
            Some(KWayMerge::new(self.rules.subset_streams(&sorted_basket)))
        } else {
            None
        };
        trace!(
            basket = sorted_basket.len(),
            query_matched = ?query_hits.as_ref().map(HashSet::len),
            "fusing suggestion streams"
        );

        let baseline = self.rules.baseline();
        let fused: Box<dyn Iterator<Item = &Suggestion> + '_> = match (query_hits, basket_stream) {
            (None, None) => Box::new(baseline.iter()),
            (None, Some(merged)) => Box::new(merged.chain(baseline.iter())),
            (Some(hits), None) => {
                let mut ranked: Vec<&Suggestion> = hits.into_iter().collect();
                ranked.sort();
                Box::new(ranked.into_iter())
            }
            (Some(hits), Some(merged)) => {
                let products: HashSet<u32> =
                    hits.iter().map(|s| s.consequent_item()).collect();
                Box::new(
                    merged
                        .chain(baseline.iter())
                        .filter(move |s| products.contains(&s.consequent_item())),
                )
            }
        };

        let mut seen: HashSet<u32> = HashSet::new();
        let mut results: Vec<Suggestion> = Vec::with_capacity(MAX_SUGGESTIONS);
        for suggestion in fused {
            if !seen.insert(suggestion.consequent_item()) {
                continue;
            }
            if basket_set.contains(&suggestion.consequent_item()) {
                continue;
            }
            results.push(suggestion.clone());
            if results.len() == MAX_SUGGESTIONS {
                break;
            }
        }
        results
    }

    /// Public response form: suggestions with product and antecedent
    /// names resolved against the catalog.
    pub fn suggest(&self, basket: &[u32], query: &str) -> Vec<SuggestedProduct> {
        self.get_suggestions(basket, query)
            .into_iter()
            .map(|suggestion| SuggestedProduct {
                identifier: suggestion.consequent_item(),
                name: self.product_name(suggestion.consequent_item()),
                lift: suggestion.measure().lift,
                support: suggestion.measure().support,
                antecedent_items: suggestion
                    .antecedent_items()
                    .iter()
                    .map(|&id| self.product_name(id))
                    .collect(),
            })
            .collect()
    }

    fn product_name(&self, id: u32) -> String {
        // Construction validated every rule id against the catalog.
        self.catalog
            .get(id)
            .map_or_else(String::new, |product| product.name.clone())
    }

    /// Expand the query into the set of matching baseline suggestions.
    ///
    /// `None` means "no usable query" (blank, or nothing tokenized).
    /// `Some(empty)` means the query asked for something and found
    /// nothing; the caller must not fall back to popularity.
    ///
    /// Terms AND together; the synonym expansions of a single term OR
    /// together.
    fn expand_query(&self, query: &str) -> Option<HashSet<&Suggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return None;
        }

        let mut intersection: Option<HashSet<&Suggestion>> = None;
        for token in &tokens {
            let mut term_hits: HashSet<&Suggestion> = HashSet::new();
            for lemma_id in self.autocompleter.search(&self.vocabulary, token) {
                term_hits.extend(self.names.suggestions_containing(lemma_id));
            }
            match intersection.as_mut() {
                None => intersection = Some(term_hits),
                Some(hits) => hits.retain(|s| term_hits.contains(s)),
            }
            if intersection.as_ref().is_some_and(HashSet::is_empty) {
                break;
            }
        }
        intersection
    }
}

fn check_catalog_bounds(catalog: &Catalog, suggestion: &Suggestion) -> Result<()> {
    let bound = catalog.len() as u32;
    let out_of_range = std::iter::once(suggestion.consequent_item())
        .chain(suggestion.antecedent_items().iter().copied())
        .find(|&id| id >= bound);
    match out_of_range {
        Some(id) => Err(Error::malformed(
            "suggestion",
            id as usize,
            format!("product id {} outside catalog of {}", id, bound),
        )),
        None => Ok(()),
    }
}
