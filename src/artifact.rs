//! Artifact loading: the product TSV and the ragged rule array.
//!
//! Both artifacts are produced by the offline training pipeline; this
//! module validates their schemas and turns them into crate values. XZ
//! decompression is the host's problem — readers here consume plain
//! bytes, with a path convenience for uncompressed files.
//!
//! # Product artifact
//!
//! Tab-delimited UTF-8, no header, one product per line, line number =
//! product id:
//!
//! ```text
//! Light Cream⇥[('light', None), ('cream', None)]
//! ```
//!
//! The second column is the training pipeline's tuple-literal form. The
//! parser below handles exactly that shape (single- or double-quoted
//! strings, backslash escapes, `None` for an absent surface form) rather
//! than pulling in a general-purpose parser for a fixed format.
//!
//! # Suggestion artifact
//!
//! A flat `u32` sequence `array` plus inner split offsets `indices`
//! (`n` offsets delimit `n + 1` records). Record layout:
//!
//! ```text
//! [consequent_item, transaction_count, item_set_count,
//!  antecedent_count, consequent_count, antecedent_item...]
//! ```
//!
//! Derived measures: `support = item_set_count / transaction_count`,
//! `lift = transaction_count·item_set_count / (antecedent_count·consequent_count)`.
//! Baseline records have `antecedent_count == transaction_count`, which
//! makes their lift exactly 1.0.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::types::{LemmaPair, Measure, Product, Suggestion};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

// =============================================================================
// PRODUCT TSV
// =============================================================================

/// Parse the product artifact from a reader of decompressed TSV.
pub fn read_products(reader: impl BufRead) -> Result<Catalog> {
    let mut products = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::malformed("product", line_number, e.to_string()))?;
        let (name, literal) = line
            .split_once('\t')
            .ok_or_else(|| Error::malformed("product", line_number, "missing tab delimiter"))?;
        let mut lemma_pairs = parse_lemma_pairs(literal, line_number)?;
        lemma_pairs.sort_unstable();
        lemma_pairs.dedup();
        products.push(Product {
            id: products.len() as u32,
            name: name.to_string(),
            lemma_pairs,
        });
    }
    debug!(products = products.len(), "product artifact loaded");
    Ok(Catalog::new(products))
}

/// Parse the product artifact from an uncompressed file.
pub fn read_products_path(path: impl AsRef<Path>) -> Result<Catalog> {
    let file = File::open(path.as_ref())
        .map_err(|e| Error::malformed("product", 0, format!("cannot open file: {}", e)))?;
    read_products(BufReader::new(file))
}

/// Parser for the `[('lemma', None), ('lemma', 'word')]` literal form.
struct LiteralParser<'a> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    literal: &'a str,
}

impl<'a> LiteralParser<'a> {
    fn new(literal: &'a str, line: usize) -> Self {
        LiteralParser {
            chars: literal.chars().collect(),
            pos: 0,
            line,
            literal,
        }
    }

    fn error(&self, detail: impl Into<String>) -> Error {
        Error::malformed(
            "product",
            self.line,
            format!("{} in lemma pairs {:?}", detail.into(), self.literal),
        )
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected)))
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse(&mut self) -> Result<Vec<LemmaPair>> {
        self.skip_whitespace();
        self.expect('[')?;
        let mut pairs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat(']') {
                break;
            }
            pairs.push(self.parse_pair()?);
            self.skip_whitespace();
            if !self.eat(',') {
                self.skip_whitespace();
                self.expect(']')?;
                break;
            }
        }
        self.skip_whitespace();
        if self.pos != self.chars.len() {
            return Err(self.error("trailing characters"));
        }
        Ok(pairs)
    }

    fn parse_pair(&mut self) -> Result<LemmaPair> {
        self.expect('(')?;
        self.skip_whitespace();
        let lemma = self.parse_string()?;
        self.skip_whitespace();
        self.expect(',')?;
        self.skip_whitespace();
        let word = if self.eat('N') {
            if !(self.eat('o') && self.eat('n') && self.eat('e')) {
                return Err(self.error("expected 'None'"));
            }
            None
        } else {
            Some(self.parse_string()?)
        };
        self.skip_whitespace();
        self.eat(','); // tolerate the 1-tuple style trailing comma
        self.skip_whitespace();
        self.expect(')')?;
        Ok(LemmaPair { lemma, word })
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted string")),
        };
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some('\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(escaped @ ('\\' | '\'' | '"')) => {
                            value.push(escaped);
                            self.pos += 1;
                        }
                        Some(other) => {
                            // Python repr leaves most characters alone.
                            value.push('\\');
                            value.push(other);
                            self.pos += 1;
                        }
                        None => return Err(self.error("unterminated escape")),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }
}

fn parse_lemma_pairs(literal: &str, line: usize) -> Result<Vec<LemmaPair>> {
    LiteralParser::new(literal, line).parse()
}

// =============================================================================
// SUGGESTION RECORDS
// =============================================================================

/// One raw record from the suggestion artifact, counts and all. The
/// engine works with derived [`Suggestion`]s; the counts stay available
/// here for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub consequent_item: u32,
    pub transaction_count: u32,
    pub item_set_count: u32,
    pub antecedent_count: u32,
    pub consequent_count: u32,
    pub antecedent_items: Vec<u32>,
}

impl RuleRecord {
    /// Validate one split-out record.
    pub fn from_slice(record: &[u32], index: usize) -> Result<Self> {
        if record.len() < 5 {
            return Err(Error::malformed(
                "suggestion",
                index,
                format!("record has {} fields, need at least 5", record.len()),
            ));
        }
        let [consequent_item, transaction_count, item_set_count, antecedent_count, consequent_count] =
            [record[0], record[1], record[2], record[3], record[4]];
        if transaction_count == 0 || antecedent_count == 0 || consequent_count == 0 {
            return Err(Error::malformed(
                "suggestion",
                index,
                "zero count in record",
            ));
        }
        if item_set_count > transaction_count {
            return Err(Error::malformed(
                "suggestion",
                index,
                format!(
                    "item set count {} exceeds transaction count {}",
                    item_set_count, transaction_count
                ),
            ));
        }
        Ok(RuleRecord {
            consequent_item,
            transaction_count,
            item_set_count,
            antecedent_count,
            consequent_count,
            antecedent_items: record[5..].to_vec(),
        })
    }

    pub fn support(&self) -> f64 {
        f64::from(self.item_set_count) / f64::from(self.transaction_count)
    }

    pub fn lift(&self) -> f64 {
        let joint = u64::from(self.transaction_count) * u64::from(self.item_set_count);
        let marginals = u64::from(self.antecedent_count) * u64::from(self.consequent_count);
        joint as f64 / marginals as f64
    }

    /// Convert to the engine's value form, validating the §3-style
    /// invariants (ascending antecedent, consequent excluded).
    pub fn into_suggestion(self) -> Result<Suggestion> {
        let measure = Measure::new(self.lift(), self.support())?;
        Suggestion::new(self.consequent_item, measure, self.antecedent_items)
    }
}

/// Split and validate the ragged suggestion artifact.
pub fn read_suggestions(array: &[u32], indices: &[u32]) -> Result<Vec<Suggestion>> {
    let records = split_records(array, indices)?;
    debug!(records = records.len(), "suggestion artifact loaded");
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RuleRecord::from_slice(record, index)?.into_suggestion())
        .collect()
}

/// `n` inner offsets delimit `n + 1` records (the NumPy split convention).
fn split_records<'a>(array: &'a [u32], indices: &[u32]) -> Result<Vec<&'a [u32]>> {
    if array.is_empty() && indices.is_empty() {
        return Ok(Vec::new());
    }
    let mut records = Vec::with_capacity(indices.len() + 1);
    let mut start = 0usize;
    for (position, &offset) in indices.iter().enumerate() {
        let offset = offset as usize;
        if offset <= start || offset > array.len() {
            return Err(Error::malformed(
                "suggestion",
                position,
                format!(
                    "split offset {} out of order for array of {}",
                    offset,
                    array.len()
                ),
            ));
        }
        records.push(&array[start..offset]);
        start = offset;
    }
    records.push(&array[start..]);
    Ok(records)
}
