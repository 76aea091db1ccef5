//! Canonical matching keys for raw labels.

use std::collections::BTreeSet;
use std::fmt;

use unicode_normalization::UnicodeNormalization;

/// Punctuation removed from labels before matching: ASCII brackets, slashes,
/// dash, dot and comma, plus the CJK full stop, middle dot, bullet and quote.
pub const DEFAULT_STRIP_CHARS: &str = "()[]\\/-.,。·•\"";

/// A normalized label used only as a matching key, never for display.
///
/// The empty key means "unmatchable": it is produced for missing labels and for
/// labels that consist only of whitespace and stripped punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns raw labels into canonical keys.
///
/// The pipeline is fixed; only the set of stripped characters is configurable:
/// NFKC normalization, whitespace trim and collapse, removal of the strip set,
/// NFKC again, whitespace collapse, lowercase. The result is a fixed point, so
/// `canonicalize(canonicalize(x)) == canonicalize(x)`.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    strip: BTreeSet<char>,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::with_strip_chars(DEFAULT_STRIP_CHARS)
    }
}

impl Canonicalizer {
    /// Build a canonicalizer that removes every character of `strip_chars`.
    ///
    /// Whitespace in `strip_chars` is ignored: whitespace runs are always
    /// collapsed to a single space, never removed.
    ///
    /// Characters are stored in normalized form (see [`normalized_strip_char`]);
    /// ones NFKC expands are dropped.
    pub fn with_strip_chars(strip_chars: &str) -> Self {
        let strip = strip_chars
            .chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(normalized_strip_char)
            .collect();
        Self { strip }
    }

    /// The characters this canonicalizer removes.
    pub fn strip_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.strip.iter().copied()
    }

    /// Canonicalize an optional label; a missing label gives the empty key.
    pub fn canonicalize(&self, raw: Option<&str>) -> CanonicalKey {
        match raw {
            Some(label) => self.canonicalize_str(label),
            None => CanonicalKey::default(),
        }
    }

    /// Canonicalize a present label.
    ///
    /// Stripping can leave a combining mark next to a new base character, and
    /// lowercasing can produce non-normalized text, so the pass is repeated
    /// until the key is stable.
    pub fn canonicalize_str(&self, raw: &str) -> CanonicalKey {
        let mut key = self.pass(raw);
        for _ in 0..MAX_PASSES {
            let next = self.pass(&key);
            if next == key {
                break;
            }
            key = next;
        }
        CanonicalKey(key)
    }

    fn pass(&self, raw: &str) -> String {
        let normalized: String = raw.nfkc().collect();
        let stripped: String = collapse_whitespace(&normalized)
            .chars()
            .filter(|c| !self.strip.contains(c))
            .collect();
        let recomposed: String = stripped.nfkc().collect();
        collapse_whitespace(&recomposed).to_lowercase()
    }
}

/// Upper bound on extra passes; real labels settle after one.
const MAX_PASSES: usize = 4;

/// The form a strip character takes after NFKC, if it is a single character.
///
/// Labels are normalized before stripping, so `（` must be matched as `(`.
/// Characters NFKC expands (`…` becomes `...`) never appear in normalized text.
pub fn normalized_strip_char(c: char) -> Option<char> {
    let mut normalized = std::iter::once(c).nfkc();
    match (normalized.next(), normalized.next()) {
        (Some(n), None) => Some(n),
        _ => None,
    }
}

/// Trim and replace each run of whitespace with one ASCII space.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
