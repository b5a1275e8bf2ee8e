//! CSS-path and XPath generation from an ancestor chain.
//!
//! Both walks start at the element and stop below `<body>`. Sibling
//! positions count only siblings sharing the element's tag, so the CSS
//! `:nth-child(k)` emitted here carries `:nth-of-type` semantics. Existing
//! locator fixtures depend on that spelling, so it is kept.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;

use crate::descriptor::AncestorSegment;

/// Ids matching this pattern are trusted as stopping anchors.
///
/// The check is lexical only: framework-generated ids such as `ember123`
/// or `radix-r1` pass it too and will be used as anchors.
pub const SAFE_ID_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_-]*$";

/// Separator between CSS path segments
pub const CSS_COMBINATOR: &str = " > ";

static SAFE_ID: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(SAFE_ID_PATTERN).ok());

/// Whether an id looks hand-authored enough to anchor a CSS path
#[must_use]
pub fn is_safe_id(id: &str) -> bool {
    SAFE_ID.as_ref().is_some_and(|re| re.is_match(id))
}

/// Build the CSS path for a chain (element first).
///
/// Each level contributes `#id` when the id is safe (and the walk stops
/// there), otherwise `tag.class1.class2` plus `:nth-child(k)` when two or
/// more siblings share the tag. Segments are joined ancestor first.
#[must_use]
pub fn css_path(chain: &[AncestorSegment]) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(chain.len());

    for segment in chain {
        if let Some(id) = segment.id.as_deref().filter(|id| is_safe_id(id)) {
            segments.push(format!("#{id}"));
            break;
        }

        let mut part = segment.tag.clone();
        for class in &segment.classes {
            part.push('.');
            part.push_str(&css_escape_ident(class));
        }
        if segment.same_tag_count >= 2 {
            let _ = write!(part, ":nth-child({})", segment.index);
        }
        segments.push(part);
    }

    segments.reverse();
    segments.join(CSS_COMBINATOR)
}

/// Build the XPath for a chain (element first): `/tag[k]/tag[k]...`
#[must_use]
pub fn xpath(chain: &[AncestorSegment]) -> String {
    if chain.is_empty() {
        return String::new();
    }
    let segments: Vec<String> = chain
        .iter()
        .rev()
        .map(|segment| format!("{}[{}]", segment.tag, segment.index))
        .collect();
    format!("/{}", segments.join("/"))
}

/// Escape a class token for use as a CSS identifier.
///
/// ASCII letters, digits, `-`, `_` and non-ASCII characters pass through;
/// anything else is backslash-escaped. A digit that leads the token, or
/// follows a leading `-`, uses the hexadecimal form (`\31 ` for `1`). A
/// lone `-` is escaped as `\-`.
#[must_use]
pub fn css_escape_ident(ident: &str) -> String {
    if ident == "-" {
        return "\\-".to_string();
    }
    let leading_dash = ident.starts_with('-');
    let mut out = String::with_capacity(ident.len());
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_ascii_digit() && (i == 0 || (i == 1 && leading_dash)) {
            let _ = write!(out, "\\{:x} ", u32::from(ch));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Escape a value for a double-quoted CSS attribute selector
#[must_use]
pub fn css_escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(ch),
        }
    }
    out
}
