// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded edit distance with early-exit optimizations.
//!
//! The autocompleter needs the actual distance (to rank closer matches
//! first), but only when it is within a small threshold. Two exits avoid
//! the O(nm) table for most non-matches: `|len(a) - len(b)|` is a lower
//! bound on the distance, and once every cell in a DP row exceeds the
//! threshold no later row can come back under it.

/// Edit distance between `a` and `b` if it is at most `max`, else `None`.
pub fn distance_within(a: &str, b: &str, max: usize) -> Option<usize> {
    // Character counts, not byte lengths: the vocabulary is lowercased
    // but not ASCII-only.
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len().abs_diff(b_chars.len()) > max {
        return None;
    }
    if a_chars.is_empty() {
        return Some(b_chars.len());
    }

    let mut dp: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ac) in a_chars.iter().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return None;
        }
    }

    (dp[b_chars.len()] <= max).then_some(dp[b_chars.len()])
}
