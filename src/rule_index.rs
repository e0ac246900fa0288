// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Antecedent index: basket itemsets → ranked suggestions.
//!
//! Construction groups the flattened rule suggestions by antecedent
//! itemset, sorts each group best-first, and attaches the sorted vector
//! to the set-trie node addressed by the antecedent path. The empty path
//! carries the baseline (empty antecedent, lift 1.0) suggestions, which
//! double as the popularity fallback at query time.
//!
//! Queries walk the trie against a sorted basket: every stored antecedent
//! that is a subset of the basket contributes its already-sorted vector,
//! and the engine k-way-merges those streams.

use crate::set_trie::SetTrie;
use crate::types::Suggestion;
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Immutable antecedent → suggestions index.
#[derive(Debug)]
pub struct RuleIndex {
    trie: SetTrie<u32, Vec<Suggestion>>,
}

impl RuleIndex {
    /// Group, sort, and index a flattened suggestion list.
    pub fn build(suggestions: Vec<Suggestion>) -> Self {
        let mut groups: BTreeMap<Vec<u32>, Vec<Suggestion>> = BTreeMap::new();
        for suggestion in suggestions {
            groups
                .entry(suggestion.antecedent_items().to_vec())
                .or_default()
                .push(suggestion);
        }

        let mut groups: Vec<(Vec<u32>, Vec<Suggestion>)> = groups.into_iter().collect();
        sort_groups(&mut groups);

        let mut trie = SetTrie::new();
        for (antecedent, group) in groups {
            trie.insert(&antecedent, group);
        }
        debug!(antecedents = trie.len(), "rule index built");
        RuleIndex { trie }
    }

    /// Number of distinct antecedent itemsets (including the empty one).
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// The empty-antecedent suggestions, best-first. Empty when the
    /// artifact carried no baseline records.
    pub fn baseline(&self) -> &[Suggestion] {
        self.trie.get(&[]).map_or(&[], Vec::as_slice)
    }

    /// Does any stored antecedent fit inside `basket`? `basket` must be
    /// sorted ascending. Short-circuits on the first hit.
    pub fn has_subset(&self, basket: &[u32]) -> bool {
        self.trie.has_subset(basket)
    }

    /// All suggestion streams whose antecedent fits inside `basket`, in
    /// depth-first order. Each stream is individually sorted best-first;
    /// callers merge them. `basket` must be sorted ascending.
    pub fn subset_streams(&self, basket: &[u32]) -> Vec<&[Suggestion]> {
        self.trie
            .iter_subsets(basket)
            .map(Vec::as_slice)
            .collect()
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
