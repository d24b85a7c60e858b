//! Display-key collation.
//!
//! Names and labels are ordered the way a reader expects from a locale-aware
//! sort, without pulling in ICU data:
//!
//! 1. primary: NFD with combining marks removed, lowercased, by code point
//! 2. secondary: NFD lowercased (accents break primary ties)
//! 3. tertiary: case, lowercase first at the first differing character
//!
//! Keys equal on all three levels compare `Equal`; callers sort stably so such
//! items keep their load order.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two display keys.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary(a)
        .cmp(primary(b))
        .then_with(|| secondary(a).cmp(secondary(b)))
        .then_with(|| tertiary(a, b))
}

/// Stable in-place sort by a display key.
pub fn sort_by_display_key<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare(key(a), key(b)));
}

fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn secondary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn tertiary(a: &str, b: &str) -> Ordering {
    for (x, y) in a.nfd().zip(b.nfd()) {
        if x != y {
            return case_rank(x)
                .cmp(&case_rank(y))
                .then_with(|| x.cmp(&y));
        }
    }
    a.nfd().count().cmp(&b.nfd().count())
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
