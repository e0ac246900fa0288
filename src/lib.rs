//! Market-basket suggestion engine.
//!
//! Given a basket of product ids and/or a free-text query, produce up to
//! ten ranked product suggestions from two evidence sources: pre-mined
//! association rules and a lemma-normalized product-name index with
//! typo-tolerant autocompletion.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌──────────────────┐
//! │ artifact.rs  │───▶│ rule_index.rs │───▶│                  │
//! │ (product TSV,│    │ (antecedents → │    │    engine.rs     │
//! │  rule array) │    │  suggestions)  │    │ (expand, fuse,   │
//! └──────┬───────┘    └───────────────┘    │  uniquify, top-K)│
//!        │            ┌───────────────┐    │                  │
//!        ├───────────▶│ name_index.rs │───▶│                  │
//!        │            │ (lemma sets →  │    └────────▲─────────┘
//!        │            │  baselines)    │             │
//!        │            └───────▲───────┘    ┌─────────┴────────┐
//!        │            ┌───────┴───────┐    │   tokenize.rs    │
//!        └───────────▶│autocomplete.rs│◀───│ (query → tokens) │
//!                     │(term → lemmas) │    └──────────────────┘
//!                     └───────────────┘
//! ```
//!
//! Both indexes are [`SetTrie`]s — tries over sorted key sets supporting
//! pruned subset and superset walks. The rule index is keyed by
//! antecedent itemsets and queried with `iter_subsets(basket)`; the name
//! index is keyed by the lemma sets of product names and queried with
//! `iter_supersets({lemma})`.
//!
//! # Usage
//!
//! ```no_run
//! use basketeer::{read_products_path, read_suggestions, SuggestionEngine};
//!
//! # fn main() -> basketeer::Result<()> {
//! let catalog = read_products_path("products.tsv")?;
//! # let (array, indices): (Vec<u32>, Vec<u32>) = (vec![], vec![]);
//! let suggestions = read_suggestions(&array, &indices)?;
//! let engine = SuggestionEngine::new(catalog, suggestions)?;
//!
//! for suggested in engine.suggest(&[42], "cream") {
//!     println!("{} (lift {:.2})", suggested.name, suggested.lift);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The engine is immutable after construction and `get_suggestions` is
//! re-entrant; share it across request threads freely.

// Module declarations
mod autocomplete;
mod catalog;
mod engine;
mod error;
mod levenshtein;
mod merge;
mod name_index;
mod rule_index;
mod set_trie;
mod tokenize;
mod types;

pub mod artifact;

// Re-exports for public API
pub use artifact::{read_products, read_products_path, read_suggestions, RuleRecord};
pub use autocomplete::{Autocompleter, FuzzyPolicy};
pub use catalog::{Catalog, Vocabulary};
pub use engine::{SuggestedProduct, SuggestionEngine, MAX_SUGGESTIONS};
pub use error::{Error, Result};
pub use merge::KWayMerge;
pub use name_index::NameIndex;
pub use rule_index::RuleIndex;
pub use set_trie::SetTrie;
pub use tokenize::tokenize;
pub use types::{LemmaPair, Measure, Product, Suggestion};

#[cfg(test)]
mod tests {
    //! Crate-level smoke tests: artifacts in, ranked suggestions out.
    //! The scenario and property suites live under `tests/`.

    use super::*;
    use std::io::Cursor;

    const PRODUCTS_TSV: &str = "\
Espresso\t[('espresso', None)]
Milk\t[('milk', None)]
Biscotti\t[('biscotti', None), ('biscotto', 'biscotti')]
";

    fn arrays() -> (Vec<u32>, Vec<u32>) {
        let records: Vec<Vec<u32>> = vec![
            vec![1, 100, 12, 20, 30, 0], // espresso → milk, lift 2.0
            vec![2, 100, 3, 20, 10, 0],  // espresso → biscotti, lift 1.5
            vec![0, 100, 20, 100, 20],
            vec![1, 100, 30, 100, 30],
            vec![2, 100, 10, 100, 10],
        ];
        let mut array = Vec::new();
        let mut indices = Vec::new();
        for record in &records {
            array.extend_from_slice(record);
            indices.push(array.len() as u32);
        }
        indices.pop();
        (array, indices)
    }

    fn engine() -> SuggestionEngine {
        let (array, indices) = arrays();
        SuggestionEngine::from_artifacts(Cursor::new(PRODUCTS_TSV), &array, &indices).unwrap()
    }

    #[test]
    fn end_to_end_baseline() {
        let names: Vec<String> = engine().suggest(&[], "").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Milk", "Espresso", "Biscotti"]);
    }

    #[test]
    fn end_to_end_basket() {
        // Espresso in the basket: rule lifts beat baseline supports.
        let names: Vec<String> = engine().suggest(&[0], "").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Milk", "Biscotti"]);
    }

    #[test]
    fn end_to_end_query_and_synonym() {
        let engine = engine();
        let names: Vec<String> = engine.suggest(&[], "biscotti").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Biscotti"]);

        // The surface form the lemmatizer absorbed works too.
        let names: Vec<String> = engine.suggest(&[], "biscotto").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Biscotti"]);
    }

    #[test]
    fn response_serializes_with_stable_field_names() {
        let suggested = engine().suggest(&[0], "");
        let value = serde_json::to_value(&suggested[0]).unwrap();
        assert_eq!(value["identifier"], 1);
        assert_eq!(value["name"], "Milk");
        assert_eq!(value["antecedent_items"][0], "Espresso");
        assert!(value["lift"].as_f64().unwrap() > 1.0);
        assert!(value["support"].as_f64().unwrap() > 0.0);
    }
}
