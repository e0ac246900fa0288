//! Domain-tuned tokenizer for product names and shopper queries.
//!
//! Grocery text is not prose. "No. 2 Pencils", "6\" Sub", "1,000 ct", and
//! "Half & Half" all need to survive tokenization with their quantity
//! phrases intact, while punctuation-heavy names shed their delimiters.
//! The scanner lower-cases the input, then at each position tries three
//! branches in order and emits the first match:
//!
//! 1. **numbered item** — `#` or `no.` (optionally spaced) plus a numeric
//!    literal, optional `+` suffix;
//! 2. **quantity** — a numeric literal with an optional `'s`/`"`/`'`/`+`
//!    suffix or an optionally-spaced unit from a closed set;
//! 3. **word** — a run of at least two non-delimiter characters whose
//!    first and last characters satisfy stricter classes than the middle.
//!
//! The numbered and quantity branches only fire after start-of-input,
//! whitespace, or `(`, and only when followed by `,?\s`, `)`, or the end
//! of input. Numeric literals are `\d+` or thousands-grouped
//! `\d{1,3}(,\d{3})+` with an optional `.`- or `,`-decimal.
//!
//! Tokens come out in source order with no deduplication. Empty input
//! yields an empty vector.

/// Units accepted after a quantity, in match-priority order. Longer
/// spellings of the same unit come first so greedy matching picks them.
/// `fl oz` is handled separately (it spans a whitespace character).
const UNITS: &[&str] = &[
    "%", "count.", "count", "ct.", "ct", "cups", "cup", "oz.", "oz", "in.", "inches", "inch",
    "in", "lbs.", "lbs", "lb.", "lb", "mgs.", "mgs", "mg.", "mg", "only", "ounces", "ounce",
    "pack", "pk", "pcs.", "pcs", "pc.", "pc", "pieces", "piece", "pounds", "pound", "size", "x",
];

/// Split `text` into normalized tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let matched = match_numbered_item(&chars, i)
            .or_else(|| match_quantity(&chars, i))
            .or_else(|| match_word(&chars, i));
        match matched {
            Some(end) => {
                tokens.push(chars[i..end].iter().collect());
                i = end;
            }
            None => i += 1,
        }
    }
    tokens
}

// =============================================================================
// BRANCH 1: NUMBERED ITEM  ("#2", "no. 5", "no.10+")
// =============================================================================

fn match_numbered_item(chars: &[char], i: usize) -> Option<usize> {
    if !numeric_left_boundary(chars, i) {
        return None;
    }
    let mut j = i;
    if chars[j] == '#' {
        j += 1;
    } else if starts_with(chars, j, "no") {
        j += 2;
        if chars.get(j) == Some(&'.') {
            j += 1;
        }
        while chars.get(j).is_some_and(|c| c.is_whitespace()) {
            j += 1;
        }
    } else {
        return None;
    }
    for num_end in numeric_literal_ends(chars, j) {
        // Optional '+', greedy: try with it before without.
        if chars.get(num_end) == Some(&'+') && numeric_right_boundary(chars, num_end + 1) {
            return Some(num_end + 1);
        }
        if numeric_right_boundary(chars, num_end) {
            return Some(num_end);
        }
    }
    None
}

// =============================================================================
// BRANCH 2: QUANTITY  ("3 pound", "6\"", "1,000 ct", "50%", "12pk")
// =============================================================================

fn match_quantity(chars: &[char], i: usize) -> Option<usize> {
    if !numeric_left_boundary(chars, i) {
        return None;
    }
    for num_end in numeric_literal_ends(chars, i) {
        // Suffix alternatives in priority order: 's, then one of "'+,
        // then an optionally-spaced unit, then no suffix at all.
        if starts_with(chars, num_end, "'s") && numeric_right_boundary(chars, num_end + 2) {
            return Some(num_end + 2);
        }
        if matches!(chars.get(num_end).copied(), Some('"' | '\'' | '+'))
            && numeric_right_boundary(chars, num_end + 1)
        {
            return Some(num_end + 1);
        }
        let mut unit_start = num_end;
        while chars.get(unit_start).is_some_and(|c| c.is_whitespace()) {
            unit_start += 1;
        }
        for unit_end in unit_ends(chars, unit_start) {
            if numeric_right_boundary(chars, unit_end) {
                return Some(unit_end);
            }
        }
        if numeric_right_boundary(chars, num_end) {
            return Some(num_end);
        }
    }
    None
}

/// Candidate end positions of a unit starting at `j`, in priority order.
fn unit_ends(chars: &[char], j: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    for unit in &UNITS[..7] {
        if starts_with(chars, j, unit) {
            ends.push(j + unit.chars().count());
        }
    }
    // "fl oz" variants: fl + optional dot + one whitespace + oz + optional dot.
    for fl in ["fl.", "fl"] {
        if starts_with(chars, j, fl) {
            let k = j + fl.len();
            if chars.get(k).is_some_and(|c| c.is_whitespace()) && starts_with(chars, k + 1, "oz") {
                let oz_end = k + 3;
                if chars.get(oz_end) == Some(&'.') {
                    ends.push(oz_end + 1);
                }
                ends.push(oz_end);
            }
        }
    }
    for unit in &UNITS[7..] {
        if starts_with(chars, j, unit) {
            ends.push(j + unit.chars().count());
        }
    }
    ends
}

// =============================================================================
// NUMERIC LITERALS
// =============================================================================

/// Left context required by the numbered and quantity branches:
/// start of input, whitespace, or an opening parenthesis.
fn numeric_left_boundary(chars: &[char], i: usize) -> bool {
    i == 0 || chars[i - 1].is_whitespace() || chars[i - 1] == '('
}

/// Right context required by the numbered and quantity branches:
/// `,?\s`, `)`, or end of input.
fn numeric_right_boundary(chars: &[char], i: usize) -> bool {
    match chars.get(i).copied() {
        None => true,
        Some(')') => true,
        Some(',') => chars.get(i + 1).is_some_and(|c| c.is_whitespace()),
        Some(c) => c.is_whitespace(),
    }
}

/// Candidate end positions of a numeric literal at `i`, in backtracking
/// order: plain digit run (with, then without, a decimal part), then
/// thousands-grouped runs from most to fewest groups (each with, then
/// without, a decimal part).
fn numeric_literal_ends(chars: &[char], i: usize) -> Vec<usize> {
    let run = digit_run_end(chars, i);
    if run == i {
        return Vec::new();
    }
    let mut ends = Vec::new();
    let mut push = |end: usize, ends: &mut Vec<usize>| {
        if !ends.contains(&end) {
            ends.push(end);
        }
    };
    if let Some(dec) = decimal_end(chars, run) {
        push(dec, &mut ends);
    }
    push(run, &mut ends);
    // Grouped form needs a leading run of at most three digits.
    if run - i <= 3 {
        let mut group_ends = Vec::new();
        let mut g = run;
        while chars.get(g) == Some(&',') && digit_run_end(chars, g + 1) >= g + 4 {
            g += 4;
            group_ends.push(g);
        }
        for end in group_ends.into_iter().rev() {
            if let Some(dec) = decimal_end(chars, end) {
                push(dec, &mut ends);
            }
            push(end, &mut ends);
        }
    }
    ends
}

/// End of the optional decimal part (`.` or `,` plus digits) at `p`.
fn decimal_end(chars: &[char], p: usize) -> Option<usize> {
    if matches!(chars.get(p).copied(), Some('.' | ',')) {
        let digits = digit_run_end(chars, p + 1);
        if digits > p + 1 {
            return Some(digits);
        }
    }
    None
}

fn digit_run_end(chars: &[char], i: usize) -> usize {
    let mut j = i;
    while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        j += 1;
    }
    j
}

// =============================================================================
// BRANCH 3: GENERIC WORD
// =============================================================================

// The three character classes below mirror each other but are not equal:
// the first character additionally excludes `&`, the last additionally
// excludes `'`, `,`, `.`, and `/`. Trademark glyphs never appear at all.

fn word_first(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '!' | '"' | '&' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | ';' | '?'
                | '[' | ']' | '{' | '}' | '®' | '™'
        )
}

fn word_middle(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '!' | '"' | '(' | ')' | '+' | '-' | '/' | ':' | ';' | '?' | '[' | ']' | '{' | '}'
                | '®' | '™'
        )
}

fn word_last(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '!' | '"' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | ';' | '?' | '['
                | ']' | '{' | '}' | '®' | '™'
        )
}

/// A word is first + middle* + last, so at least two characters. The
/// middle run is greedy and backtracks until a valid last character is
/// found (every valid last character is also a valid middle character,
/// which keeps this a simple backwards scan).
fn match_word(chars: &[char], i: usize) -> Option<usize> {
    if !word_first(chars[i]) {
        return None;
    }
    let mut run = i + 1;
    while run < chars.len() && word_middle(chars[run]) {
        run += 1;
    }
    (i + 1..run)
        .rev()
        .find(|&last| word_last(chars[last]))
        .map(|last| last + 1)
}

fn starts_with(chars: &[char], i: usize, literal: &str) -> bool {
    let mut j = i;
    for expected in literal.chars() {
        if chars.get(j) != Some(&expected) {
            return false;
        }
        j += 1;
    }
    true
}
