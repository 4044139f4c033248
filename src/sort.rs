//! Sort engine for directory listings.
//!
//! Ordering rules:
//! - name based keys put directories first, independent of the direction
//! - `Size` ranks directories with a `-1` sentinel
//! - for `Size` and the date keys an absent value always sorts last
//! - everything else is inverted by [`SortDirection::Desc`]
//!
//! All orderings are total and the underlying sort is stable, so equal items
//! keep the order the backend delivered them in.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::types::{Item, SortDirection, SortKey};

/// One run of a tokenised name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    /// Digit run with leading zeros stripped, so `007` and `7` compare equal.
    Number(String),
}

fn tokenize(name: &str) -> Vec<Token> {
    let lower = name.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;
    for ch in lower.chars() {
        let is_digit = ch.is_ascii_digit();
        if !current.is_empty() && is_digit != in_digits {
            tokens.push(finish_token(std::mem::take(&mut current), in_digits));
        }
        in_digits = is_digit;
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(finish_token(current, in_digits));
    }
    tokens
}

fn finish_token(run: String, digits: bool) -> Token {
    if digits {
        let trimmed = run.trim_start_matches('0');
        Token::Number(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() })
    } else {
        Token::Text(run)
    }
}

fn token_text(token: &Token) -> &str {
    match token {
        Token::Text(s) | Token::Number(s) => s,
    }
}

fn cmp_tokens(a: &Token, b: &Token) -> Ordering {
    match (a, b) {
        // Arbitrary length integers: fewer digits is smaller, same length compares lexically.
        (Token::Number(x), Token::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        _ => token_text(a).cmp(token_text(b)),
    }
}

fn cmp_token_seqs(a: &[Token], b: &[Token]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = cmp_tokens(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Case-insensitive alphanumeric comparison: `file2` < `file10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    cmp_token_seqs(&tokenize(a), &tokenize(b))
}

/// Absent values sort after present ones regardless of `direction`.
fn cmp_optional<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
    }
}

fn size_value(item: &Item) -> Option<i128> {
    if item.is_dir() {
        Some(-1)
    } else {
        item.size.map(i128::from)
    }
}

fn date_value(item: &Item, key: SortKey) -> Option<DateTime<Utc>> {
    match key {
        SortKey::Created => item.created_at(),
        _ => item.modified_at(),
    }
}

/// Precomputed comparison key, so names are lowercased/tokenised once per item.
enum KeyValue {
    Name(String),
    Natural(Vec<Token>),
    Size(Option<i128>),
    Date(Option<DateTime<Utc>>),
}

impl KeyValue {
    fn of(item: &Item, key: SortKey) -> Self {
        match key {
            SortKey::Name => KeyValue::Name(item.name.to_lowercase()),
            SortKey::NaturalName => KeyValue::Natural(tokenize(&item.name)),
            SortKey::Size => KeyValue::Size(size_value(item)),
            SortKey::Modified | SortKey::Created => KeyValue::Date(date_value(item, key)),
        }
    }

    fn cmp(&self, other: &Self, direction: SortDirection) -> Ordering {
        match (self, other) {
            (KeyValue::Name(a), KeyValue::Name(b)) => direction.apply(a.cmp(b)),
            (KeyValue::Natural(a), KeyValue::Natural(b)) => direction.apply(cmp_token_seqs(a, b)),
            (KeyValue::Size(a), KeyValue::Size(b)) => cmp_optional(*a, *b, direction),
            (KeyValue::Date(a), KeyValue::Date(b)) => cmp_optional(*a, *b, direction),
            // Both sides are always built from the same key.
            _ => Ordering::Equal,
        }
    }
}

fn dirs_first(a_is_dir: bool, b_is_dir: bool) -> Ordering {
    match (a_is_dir, b_is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Compare two items under `key` / `direction`.
pub fn compare(a: &Item, b: &Item, key: SortKey, direction: SortDirection) -> Ordering {
    if key.is_name_based() {
        let ord = dirs_first(a.is_dir(), b.is_dir());
        if ord != Ordering::Equal {
            return ord;
        }
    }
    KeyValue::of(a, key).cmp(&KeyValue::of(b, key), direction)
}

/// Positions of `items` in display order.
pub fn sorted_indices(items: &[Item], key: SortKey, direction: SortDirection) -> Vec<usize> {
    let mut keyed: Vec<(usize, bool, KeyValue)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (i, item.is_dir(), KeyValue::of(item, key)))
        .collect();
    let name_based = key.is_name_based();
    // `sort_by` is stable.
    keyed.sort_by(|(_, a_dir, a), (_, b_dir, b)| {
        let ord = if name_based { dirs_first(*a_dir, *b_dir) } else { Ordering::Equal };
        ord.then_with(|| a.cmp(b, direction))
    });
    keyed.into_iter().map(|(i, _, _)| i).collect()
}

/// Sorted copy of `items`.
pub fn sort_items(items: &[Item], key: SortKey, direction: SortDirection) -> Vec<Item> {
    sorted_indices(items, key, direction).into_iter().map(|i| items[i].clone()).collect()
}
