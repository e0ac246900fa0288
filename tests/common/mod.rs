//! Shared fixtures: two small catalogs with hand-checked rule sets.

#![allow(dead_code)]

use basketeer::{SuggestedProduct, SuggestionEngine};
use std::io::Cursor;

/// The 13-product grocery catalog. Transaction count 7501; baseline
/// supports descend Olive Oil (494) → Honey (24), and the olive-oil
/// antecedent carries five rules with descending lift.
pub const GROCERY_TSV: &str = "\
Chicken\t[('chicken', None)]
Light Cream\t[('light', None), ('cream', None)]
Escalope\t[('escalope', None)]
Mushroom Cream Sauce\t[('mushroom', None), ('cream', None), ('sauce', None)]
Pasta\t[('pasta', None)]
Fromage Blanc\t[('fromage', None), ('blanc', None)]
Honey\t[('honey', None)]
Ground Beef\t[('ground', None), ('beef', None)]
Herb & Pepper\t[('herb', None), ('pepper', None)]
Tomato Sauce\t[('tomato', None), ('sauce', None)]
Olive Oil\t[('olive', None), ('oil', None)]
Whole Wheat Pasta\t[('whole', None), ('wheat', None), ('pasta', None)]
Shrimp\t[('shrimp', None)]
";

/// Grocery rule records: `[consequent, transactions, itemset, antecedent
/// count, consequent count, antecedent...]`.
pub fn grocery_records() -> Vec<Vec<u32>> {
    vec![
        // Baselines: antecedent count equals transaction count, lift 1.
        vec![0, 7501, 35, 7501, 35],
        vec![1, 7501, 58, 7501, 58],
        vec![2, 7501, 59, 7501, 59],
        vec![3, 7501, 43, 7501, 43],
        vec![4, 7501, 118, 7501, 118],
        vec![5, 7501, 25, 7501, 25],
        vec![6, 7501, 24, 7501, 24],
        vec![7, 7501, 74, 7501, 74],
        vec![8, 7501, 37, 7501, 37],
        vec![9, 7501, 40, 7501, 40],
        vec![10, 7501, 494, 7501, 494],
        vec![11, 7501, 44, 7501, 44],
        vec![12, 7501, 38, 7501, 38],
        // Olive oil antecedent, lifts 4.14 down to 3.09.
        vec![11, 7501, 12, 494, 44, 10],
        vec![1, 7501, 15, 494, 58, 10],
        vec![7, 7501, 17, 494, 74, 10],
        vec![8, 7501, 8, 494, 37, 10],
        vec![2, 7501, 12, 494, 59, 10],
        // Escalope and mushroom cream sauce imply each other.
        vec![3, 7501, 2, 59, 43, 2],
        vec![2, 7501, 2, 43, 59, 3],
        // Assorted single-antecedent rules.
        vec![0, 7501, 1, 58, 35, 1],
        vec![7, 7501, 1, 37, 74, 8],
        vec![12, 7501, 3, 118, 38, 4],
        // One two-item antecedent for trie depth.
        vec![11, 7501, 1, 9, 44, 4, 10],
    ]
}

/// The deli catalog used for the acceptance scenarios: synonyms
/// ("apples" → apple) and fuzzy matching ("bier" → beer).
pub const DELI_TSV: &str = "\
Bacon\t[('bacon', None)]
Mozzarella Cheese\t[('mozzarella', None), ('cheese', None)]
Cheddar Cheese\t[('cheddar', None), ('cheese', None)]
Beer\t[('beer', None)]
Kimchi\t[('kimchi', None)]
Rice\t[('rice', None)]
Apples\t[('apple', 'apples')]
";

pub fn deli_records() -> Vec<Vec<u32>> {
    vec![
        vec![0, 1000, 100, 1000, 100],
        vec![1, 1000, 80, 1000, 80],
        vec![2, 1000, 60, 1000, 60],
        vec![3, 1000, 150, 1000, 150],
        vec![4, 1000, 40, 1000, 40],
        vec![5, 1000, 90, 1000, 90],
        vec![6, 1000, 70, 1000, 70],
        // Bacon → cheddar (lift 5.0), kimchi → rice (lift 5.56).
        vec![2, 1000, 30, 100, 60, 0],
        vec![5, 1000, 20, 40, 90, 4],
    ]
}

pub fn ragged(records: &[Vec<u32>]) -> (Vec<u32>, Vec<u32>) {
    let mut array = Vec::new();
    let mut indices = Vec::new();
    for record in records {
        array.extend_from_slice(record);
        indices.push(array.len() as u32);
    }
    indices.pop();
    (array, indices)
}

pub fn grocery_engine() -> SuggestionEngine {
    let (array, indices) = ragged(&grocery_records());
    SuggestionEngine::from_artifacts(Cursor::new(GROCERY_TSV), &array, &indices).unwrap()
}

pub fn deli_engine() -> SuggestionEngine {
    let (array, indices) = ragged(&deli_records());
    SuggestionEngine::from_artifacts(Cursor::new(DELI_TSV), &array, &indices).unwrap()
}

pub fn names(suggested: Vec<SuggestedProduct>) -> Vec<String> {
    suggested.into_iter().map(|s| s.name).collect()
}

/// Index of a product by display name, mirroring how a host would turn
/// user selections back into ids.
pub fn product_id(engine: &SuggestionEngine, name: &str) -> u32 {
    engine
        .catalog()
        .iter()
        .find(|product| product.name == name)
        .map(|product| product.id)
        .unwrap()
}
