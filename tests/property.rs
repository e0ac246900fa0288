//! Property-based tests for the engine's quantified invariants.

mod common;

use basketeer::{tokenize, SetTrie, Suggestion};
use common::{grocery_engine, names};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn query_pool() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        String::new(),
        "cream".to_string(),
        "cre".to_string(),
        "sauce".to_string(),
        "pasta".to_string(),
        "oil".to_string(),
        "wheat pasta".to_string(),
        "olive oil".to_string(),
        "zzyzzx".to_string(),
        "  cream  ".to_string(),
    ])
}

fn basket_pool() -> impl Strategy<Value = Vec<u32>> {
    // Ids beyond the 13-product catalog are deliberately included; the
    // engine must shrug them off.
    prop::collection::vec(0u32..16, 0..6)
}

proptest! {
    #[test]
    fn at_most_ten_suggestions(basket in basket_pool(), query in query_pool()) {
        let engine = grocery_engine();
        prop_assert!(engine.get_suggestions(&basket, &query).len() <= 10);
    }

    #[test]
    fn consequents_are_distinct(basket in basket_pool(), query in query_pool()) {
        let engine = grocery_engine();
        let suggestions = engine.get_suggestions(&basket, &query);
        let distinct: BTreeSet<u32> =
            suggestions.iter().map(Suggestion::consequent_item).collect();
        prop_assert_eq!(distinct.len(), suggestions.len());
    }

    #[test]
    fn basket_items_are_excluded(basket in basket_pool(), query in query_pool()) {
        let engine = grocery_engine();
        for suggestion in engine.get_suggestions(&basket, &query) {
            prop_assert!(!basket.contains(&suggestion.consequent_item()));
        }
    }

    #[test]
    fn output_is_deterministic(basket in basket_pool(), query in query_pool()) {
        let engine = grocery_engine();
        let first = engine.get_suggestions(&basket, &query);
        let second = engine.get_suggestions(&basket, &query);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn results_are_ranked_best_first(basket in basket_pool(), query in query_pool()) {
        // Every fusion case feeds pre-sorted streams whose later
        // duplicates are dropped, so the output is ascending under the
        // descending-quality suggestion order.
        let engine = grocery_engine();
        let suggestions = engine.get_suggestions(&basket, &query);
        prop_assert!(suggestions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn query_filters_and_basket_ranks(basket in basket_pool()) {
        // The some/some fusion keeps only products the query matched.
        let engine = grocery_engine();
        let query_products: BTreeSet<String> =
            names(engine.suggest(&[], "cream")).into_iter().collect();
        for name in names(engine.suggest(&basket, "cream")) {
            prop_assert!(query_products.contains(&name));
        }
    }

    #[test]
    fn tokenizer_is_idempotent_on_plain_words(
        words in prop::collection::vec("[a-z]{2,8}", 1..6)
    ) {
        let text = words.join(" ");
        let first = tokenize(&text);
        let second = tokenize(&first.join(" "));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn set_trie_subset_superset_duality(
        keys in prop::collection::vec(prop::collection::btree_set(0u8..8, 0..5), 1..8),
        query in prop::collection::btree_set(0u8..8, 0..6)
    ) {
        let mut trie: SetTrie<u8, BTreeSet<u8>> = SetTrie::new();
        let mut stored: BTreeSet<BTreeSet<u8>> = BTreeSet::new();
        for key in keys {
            let sorted: Vec<u8> = key.iter().copied().collect();
            trie.insert(&sorted, key.clone());
            stored.insert(key);
        }
        let query_vec: Vec<u8> = query.iter().copied().collect();

        let subsets: BTreeSet<BTreeSet<u8>> =
            trie.iter_subsets(&query_vec).cloned().collect();
        let expected_subsets: BTreeSet<BTreeSet<u8>> = stored
            .iter()
            .filter(|key| key.is_subset(&query))
            .cloned()
            .collect();
        prop_assert_eq!(&subsets, &expected_subsets);
        prop_assert_eq!(trie.has_subset(&query_vec), !expected_subsets.is_empty());

        let supersets: BTreeSet<BTreeSet<u8>> =
            trie.iter_supersets(&query_vec).cloned().collect();
        let expected_supersets: BTreeSet<BTreeSet<u8>> = stored
            .iter()
            .filter(|key| key.is_superset(&query))
            .cloned()
            .collect();
        prop_assert_eq!(&supersets, &expected_supersets);
    }
}
