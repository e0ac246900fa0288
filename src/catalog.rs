//! The immutable product catalog and the interned lemma vocabulary.
//!
//! Products are stored in a plain vector where the id *is* the index, so
//! lookup is an array access and the dense `[0, N)` id range is true by
//! construction. The vocabulary interns every distinct lemma across the
//! catalog as a dense `u32` in lexicographic order; the name index keys
//! its trie with those ids and the autocompleter resolves matched lemmas
//! through the same table, so the two always agree.

use crate::types::{LemmaPair, Product};

/// Immutable, id-indexed product array.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap a product vector. Ids are assigned from positions, so any
    /// ids already present in the input are overwritten.
    pub fn new(mut products: Vec<Product>) -> Self {
        for (position, product) in products.iter_mut().enumerate() {
            product.id = position as u32;
        }
        Catalog { products }
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.get(id as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// The precomputed `(lemma, surface form)` pairs of a product name.
    pub fn lemma_pairs(&self, id: u32) -> impl Iterator<Item = &LemmaPair> {
        self.get(id).into_iter().flat_map(|p| p.lemma_pairs.iter())
    }
}

/// Dense lemma interning table, lexicographically ordered.
///
/// Ordering by id is therefore ordering by lemma, which keeps the name
/// index's trie paths deterministic.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    lemmas: Vec<String>,
}

impl Vocabulary {
    /// Collect every distinct lemma in the catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut lemmas: Vec<String> = catalog
            .iter()
            .flat_map(|p| p.lemma_pairs.iter().map(|pair| pair.lemma.clone()))
            .collect();
        lemmas.sort_unstable();
        lemmas.dedup();
        Vocabulary { lemmas }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Interned id of `lemma`, if it occurs in the catalog.
    pub fn id_of(&self, lemma: &str) -> Option<u32> {
        self.lemmas
            .binary_search_by(|candidate| candidate.as_str().cmp(lemma))
            .ok()
            .map(|pos| pos as u32)
    }

    pub fn lemma(&self, id: u32) -> Option<&str> {
        self.lemmas.get(id as usize).map(String::as_str)
    }

    /// Ids of every lemma starting with `prefix`, ascending (which is
    /// lexicographic, since ids follow lemma order).
    pub fn ids_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = u32> + 'a {
        let start = self.lemmas.partition_point(|lemma| lemma.as_str() < prefix);
        self.lemmas[start..]
            .iter()
            .take_while(move |lemma| lemma.starts_with(prefix))
            .enumerate()
            .map(move |(offset, _)| (start + offset) as u32)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lemmas.iter().map(String::as_str)
    }

    /// Interned ids of a product's lemma set, ascending and distinct.
    ///
    /// Lemmas are interned from the same catalog, so the lookup cannot
    /// miss for a product of that catalog.
    pub fn lemma_ids(&self, product: &Product) -> Vec<u32> {
        let mut ids: Vec<u32> = product
            .lemma_set()
            .into_iter()
            .filter_map(|lemma| self.id_of(lemma))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
