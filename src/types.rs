// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the suggestion engine.
//!
//! These types define how products, association measures, and suggestions
//! fit together. Everything here is a plain value: comparison is a single
//! total-order function, equality and hashing cover all fields, and the
//! constructors validate the invariants so the rest of the crate can rely
//! on them without re-checking.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Measure**: `lift ≥ 0`, `support ∈ [0, 1]`, both finite. The loader
//!   guarantees this, which is what makes bitwise f64 equality and hashing
//!   sound (no NaN ever reaches a comparison).
//!
//! - **Suggestion**: `antecedent_items` is strictly ascending and never
//!   contains `consequent_item`.
//!
//! - **Ordering is DESCENDING**: `a < b` iff `(a.lift, a.support,
//!   a.consequent_item, a.antecedent_items) > (b.…)` pointwise. A sorted
//!   vector therefore presents the best suggestion first, and a min-first
//!   k-way merge yields best-first output. Don't "fix" the direction — the
//!   whole query path depends on it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

// =============================================================================
// MEASURE
// =============================================================================

/// The statistical strength of an association rule.
///
/// Total order is lexicographic by `(lift, support)` via `f64::total_cmp`.
/// Baseline (popularity) rules have lift exactly 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Measure {
    pub lift: f64,
    pub support: f64,
}

impl Measure {
    /// Validate and build a measure.
    pub fn new(lift: f64, support: f64) -> Result<Self> {
        if !lift.is_finite() || lift < 0.0 {
            return Err(Error::invariant(format!("lift {} out of range", lift)));
        }
        if !support.is_finite() || !(0.0..=1.0).contains(&support) {
            return Err(Error::invariant(format!("support {} out of range", support)));
        }
        Ok(Measure { lift, support })
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.lift.to_bits() == other.lift.to_bits()
            && self.support.to_bits() == other.support.to_bits()
    }
}

impl Eq for Measure {}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Measure {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lift
            .total_cmp(&other.lift)
            .then_with(|| self.support.total_cmp(&other.support))
    }
}

impl Hash for Measure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lift.to_bits().hash(state);
        self.support.to_bits().hash(state);
    }
}

// =============================================================================
// SUGGESTION
// =============================================================================

/// One suggested product: the consequent of a rule, the rule's measure,
/// and the antecedent itemset that triggered it (empty for baseline).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    consequent_item: u32,
    measure: Measure,
    antecedent_items: Box<[u32]>,
}

impl Suggestion {
    /// Validate and build a suggestion.
    ///
    /// `antecedent_items` must be strictly ascending and must not contain
    /// `consequent_item`.
    pub fn new(consequent_item: u32, measure: Measure, antecedent_items: Vec<u32>) -> Result<Self> {
        if !antecedent_items.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::invariant(format!(
                "antecedent {:?} is not strictly ascending",
                antecedent_items
            )));
        }
        if antecedent_items.binary_search(&consequent_item).is_ok() {
            return Err(Error::invariant(format!(
                "antecedent {:?} contains consequent {}",
                antecedent_items, consequent_item
            )));
        }
        Ok(Suggestion {
            consequent_item,
            measure,
            antecedent_items: antecedent_items.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn consequent_item(&self) -> u32 {
        self.consequent_item
    }

    #[inline]
    pub fn measure(&self) -> Measure {
        self.measure
    }

    #[inline]
    pub fn antecedent_items(&self) -> &[u32] {
        &self.antecedent_items
    }

    /// Baseline suggestions come from empty-antecedent rules.
    #[inline]
    pub fn is_baseline(&self) -> bool {
        self.antecedent_items.is_empty()
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suggestion {
    /// Descending on every field: the "smallest" suggestion is the best one.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .measure
            .cmp(&self.measure)
            .then_with(|| other.consequent_item.cmp(&self.consequent_item))
            .then_with(|| other.antecedent_items.cmp(&self.antecedent_items))
    }
}

// =============================================================================
// PRODUCT
// =============================================================================

/// One `(lemma, surface form)` pair from the training-time lemmatizer.
///
/// `word` is present only when lemmatization changed the surface form,
/// in which case the lemma has that word as a synonym.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LemmaPair {
    pub lemma: String,
    pub word: Option<String>,
}

/// A catalog entry: the product's display name plus the precomputed
/// lemma pairs of its name. `id` equals the product's position in the
/// catalog array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Sorted, deduplicated by the loader.
    pub lemma_pairs: Vec<LemmaPair>,
}

impl Product {
    /// Distinct lemmas of the product name, ascending.
    ///
    /// `lemma_pairs` is sorted by `(lemma, word)`, so consecutive pairs
    /// with equal lemmas collapse to one entry.
    pub fn lemma_set(&self) -> Vec<&str> {
        let mut lemmas: Vec<&str> = Vec::with_capacity(self.lemma_pairs.len());
        for pair in &self.lemma_pairs {
            if lemmas.last() != Some(&pair.lemma.as_str()) {
                lemmas.push(&pair.lemma);
            }
        }
        lemmas
    }
}
