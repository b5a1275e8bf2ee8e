//! Quality assessment of the CSS fallback.
//!
//! Both scores are independent of which candidate is elected primary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::descriptor::ElementDescriptor;

/// Weight of an id token
pub const ID_WEIGHT: u32 = 100;

/// Weight of a class, pseudo-class or attribute token
pub const CLASS_WEIGHT: u32 = 10;

/// Weight of a bare tag-name token
pub const TAG_WEIGHT: u32 = 1;

/// Coarse reliability class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    /// No id, class, name or type
    Low,
    /// Has a class, or a `name` / `type` attribute
    Medium,
    /// Has an id, or both a class and a `name` attribute
    High,
}

impl Reliability {
    /// Lower-case name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Heuristic weight of a CSS path: 100 per `#`, 10 per `.`, `:` or `[`,
/// 1 per compound selector that starts with a tag name.
///
/// Backslash-escaped characters are skipped, as is anything inside
/// attribute brackets, so `div.md\:flex` scores 11 and
/// `[data-x="a.b"]` scores 10.
#[must_use]
pub fn specificity(path: &str) -> u32 {
    let mut score = 0;
    let mut chars = path.chars().peekable();
    let mut at_compound_start = true;
    let mut quote: Option<char> = None;
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            skip_escape(&mut chars);
            at_compound_start = false;
            continue;
        }
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        if bracket_depth > 0 {
            match ch {
                '"' | '\'' => quote = Some(ch),
                ']' => bracket_depth -= 1,
                _ => {}
            }
            continue;
        }
        if paren_depth > 0 {
            match ch {
                '(' => paren_depth += 1,
                ')' => paren_depth -= 1,
                _ => {}
            }
            continue;
        }

        match ch {
            '#' => score += ID_WEIGHT,
            '.' => score += CLASS_WEIGHT,
            ':' => {
                // `::before` is one token
                if chars.peek() == Some(&':') {
                    chars.next();
                }
                score += CLASS_WEIGHT;
            }
            '[' => {
                score += CLASS_WEIGHT;
                bracket_depth += 1;
            }
            '(' => paren_depth += 1,
            ' ' | '>' | '+' | '~' | ',' => {
                at_compound_start = true;
                continue;
            }
            c if at_compound_start && (c.is_ascii_alphabetic() || c == '*') => {
                if c != '*' {
                    score += TAG_WEIGHT;
                }
            }
            _ => {}
        }
        at_compound_start = false;
    }
    score
}

/// Consume the body of a CSS escape: one character, or up to six hex
/// digits plus one terminating whitespace
fn skip_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    let mut hex_digits = 0;
    while hex_digits < 6 && chars.peek().is_some_and(char::is_ascii_hexdigit) {
        chars.next();
        hex_digits += 1;
    }
    if hex_digits == 0 {
        chars.next();
    } else if chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
        chars.next();
    }
}

/// Reliability class; rules are checked in order, first match wins
#[must_use]
pub fn reliability(descriptor: &ElementDescriptor) -> Reliability {
    let has_id = descriptor.id().is_some_and(|id| !id.is_empty());
    let has_class = !descriptor.classes().is_empty();
    let has_name = descriptor.has_attribute("name");
    let has_type = descriptor.has_attribute("type");

    if has_id || (has_class && has_name) {
        Reliability::High
    } else if has_class || has_name || has_type {
        Reliability::Medium
    } else {
        Reliability::Low
    }
}
