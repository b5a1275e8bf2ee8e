//! Locator strategy generators.
//!
//! Eight independent, total functions. Each one reads an
//! [`ElementDescriptor`] and either produces a [`LocatorCandidate`] or
//! abstains with `None`. None of them looks at another generator's output.
//!
//! Payload strings are escaped once here (see [`Literal`]); emitters
//! splice the escaped form into their quoted literals verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::descriptor::ElementDescriptor;
use crate::paths::{self, css_escape_string};

/// Visible text longer than this is too fragile for the text strategy
pub const MAX_TEXT_LOCATOR_CHARS: usize = 50;

/// Test-id attributes, in lookup order
pub const TEST_ID_ATTRIBUTES: &[&str] = &["data-testid", "data-test-id", "data-cy", "data-test"];

/// Locator strategy, carrying its fixed priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyType {
    /// ARIA role with optional accessible name
    Role,
    /// Test-id attribute
    TestId,
    /// Input placeholder
    Placeholder,
    /// Short visible text
    Text,
    /// Associated label
    Label,
    /// Image alt text
    AltText,
    /// Title attribute
    Title,
    /// CSS path fallback
    Css,
}

impl StrategyType {
    /// All strategies, highest priority first
    pub const ALL: [Self; 8] = [
        Self::Role,
        Self::TestId,
        Self::Placeholder,
        Self::Text,
        Self::Label,
        Self::AltText,
        Self::Title,
        Self::Css,
    ];

    /// Fixed priority: 1 (highest) through 8 (lowest)
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Role => 1,
            Self::TestId => 2,
            Self::Placeholder => 3,
            Self::Text => 4,
            Self::Label => 5,
            Self::AltText => 6,
            Self::Title => 7,
            Self::Css => 8,
        }
    }

    /// Stable name used in output
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::TestId => "testId",
            Self::Placeholder => "placeholder",
            Self::Text => "text",
            Self::Label => "label",
            Self::AltText => "altText",
            Self::Title => "title",
            Self::Css => "css",
        }
    }

    /// Run this strategy's generator
    #[must_use]
    pub fn generate(self, descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
        match self {
            Self::Role => by_role(descriptor),
            Self::TestId => by_test_id(descriptor),
            Self::Placeholder => by_placeholder(descriptor),
            Self::Text => by_text(descriptor),
            Self::Label => by_label(descriptor),
            Self::AltText => by_alt_text(descriptor),
            Self::Title => by_title(descriptor),
            Self::Css => Some(by_css(descriptor)),
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string payload kept alongside its quoted-literal escaping.
///
/// The escaped form is valid inside both single- and double-quoted
/// JavaScript string literals: backslash, both quote characters and
/// line breaks are backslash-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Literal {
    raw: String,
    escaped: String,
}

impl Literal {
    /// Escape a raw value
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let escaped = escape_literal(&raw);
        Self { raw, escaped }
    }

    /// The unescaped value
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The value ready to splice between quotes
    #[must_use]
    pub fn escaped(&self) -> &str {
        &self.escaped
    }
}

impl From<String> for Literal {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Literal> for String {
    fn from(literal: Literal) -> Self {
        literal.raw
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Escape a value for a quoted string literal
#[must_use]
pub fn escape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

/// Dialect-agnostic locator payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LocatorExpression {
    /// ARIA role, optionally filtered by accessible name
    Role {
        /// Role name
        role: Literal,
        /// Accessible name filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<Literal>,
    },
    /// Test-id attribute
    TestId {
        /// Attribute that matched
        attribute: String,
        /// Attribute value
        value: Literal,
        /// Equivalent CSS attribute selector
        selector: Literal,
    },
    /// Placeholder text
    Placeholder {
        /// Placeholder value
        value: Literal,
    },
    /// Visible text
    Text {
        /// Text value
        value: Literal,
    },
    /// Label text
    Label {
        /// Label value
        value: Literal,
    },
    /// Alt text
    AltText {
        /// Alt value
        value: Literal,
    },
    /// Title attribute
    Title {
        /// Title value
        value: Literal,
    },
    /// CSS selector
    Css {
        /// Selector
        selector: Literal,
    },
}

impl LocatorExpression {
    /// Strategy that produces this kind of payload
    #[must_use]
    pub const fn strategy(&self) -> StrategyType {
        match self {
            Self::Role { .. } => StrategyType::Role,
            Self::TestId { .. } => StrategyType::TestId,
            Self::Placeholder { .. } => StrategyType::Placeholder,
            Self::Text { .. } => StrategyType::Text,
            Self::Label { .. } => StrategyType::Label,
            Self::AltText { .. } => StrategyType::AltText,
            Self::Title { .. } => StrategyType::Title,
            Self::Css { .. } => StrategyType::Css,
        }
    }
}

impl fmt::Display for LocatorExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name={name:?}]", name = name.raw()),
            Self::TestId { selector, .. } => write!(f, "{selector}"),
            Self::Placeholder { value } => write!(f, "placeholder={value}"),
            Self::Text { value } => write!(f, "text={value}"),
            Self::Label { value } => write!(f, "label={value}"),
            Self::AltText { value } => write!(f, "alt={value}"),
            Self::Title { value } => write!(f, "title={value}"),
            Self::Css { selector } => write!(f, "{selector}"),
        }
    }
}

/// One strategy's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorCandidate {
    /// Producing strategy
    pub strategy_type: StrategyType,
    /// Payload
    pub expression: LocatorExpression,
    /// Fixed strategy priority
    pub priority: u8,
}

impl LocatorCandidate {
    /// Wrap a payload; strategy and priority follow from its kind
    #[must_use]
    pub fn new(expression: LocatorExpression) -> Self {
        let strategy_type = expression.strategy();
        Self {
            strategy_type,
            expression,
            priority: strategy_type.priority(),
        }
    }
}

/// Run all eight generators; successful candidates in priority order
#[must_use]
pub fn generate_all(descriptor: &ElementDescriptor) -> Vec<LocatorCandidate> {
    StrategyType::ALL
        .iter()
        .filter_map(|strategy| {
            let candidate = strategy.generate(descriptor);
            if candidate.is_none() {
                trace!(strategy = %strategy, tag = descriptor.tag(), "strategy abstained");
            }
            candidate
        })
        .collect()
}

/// Implicit ARIA role of an element without a `role` attribute
#[must_use]
pub fn implicit_role(descriptor: &ElementDescriptor) -> Option<&'static str> {
    match descriptor.tag() {
        "button" => Some("button"),
        "a" if descriptor.has_attribute("href") => Some("link"),
        "textarea" => Some("textbox"),
        "select" => Some("combobox"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some("heading"),
        "input" => {
            let input_type = descriptor
                .attribute("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .unwrap_or_default();
            match input_type.as_str() {
                "" | "text" | "email" | "tel" | "url" | "password" => Some("textbox"),
                "search" => Some("searchbox"),
                "button" | "submit" | "reset" | "image" => Some("button"),
                "checkbox" => Some("checkbox"),
                "radio" => Some("radio"),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Accessible name: aria-label, then label text, then visible text for
/// buttons and links, then alt for images, then title
#[must_use]
pub fn accessible_name(descriptor: &ElementDescriptor, role: &str) -> Option<String> {
    if let Some(label) = descriptor.non_blank_attribute("aria-label") {
        return Some(label.trim().to_string());
    }
    if let Some(label) = descriptor.label_text().filter(|t| !t.trim().is_empty()) {
        return Some(label.trim().to_string());
    }
    if matches!(role, "button" | "link") {
        let text = descriptor.visible_text().trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
        if descriptor.tag() == "input" {
            if let Some(value) = descriptor.non_blank_attribute("value") {
                return Some(value.trim().to_string());
            }
        }
    }
    if descriptor.tag() == "img" || role == "img" {
        if let Some(alt) = descriptor.non_blank_attribute("alt") {
            return Some(alt.trim().to_string());
        }
    }
    descriptor
        .non_blank_attribute("title")
        .map(|t| t.trim().to_string())
}

/// Priority 1: explicit or implicit ARIA role, with a name when derivable
#[must_use]
pub fn by_role(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    let role = match descriptor.non_blank_attribute("role") {
        // Only the first token of a role list is the effective role
        Some(explicit) => explicit.split_whitespace().next()?.to_ascii_lowercase(),
        None => implicit_role(descriptor)?.to_string(),
    };
    let name = accessible_name(descriptor, &role).map(Literal::new);
    Some(LocatorCandidate::new(LocatorExpression::Role {
        role: Literal::new(role),
        name,
    }))
}

/// Priority 2: first non-blank test-id attribute in lookup order
#[must_use]
pub fn by_test_id(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    TEST_ID_ATTRIBUTES.iter().find_map(|attribute| {
        let value = descriptor.non_blank_attribute(attribute)?;
        let selector = format!("[{attribute}=\"{}\"]", css_escape_string(value));
        Some(LocatorCandidate::new(LocatorExpression::TestId {
            attribute: (*attribute).to_string(),
            value: Literal::new(value),
            selector: Literal::new(selector),
        }))
    })
}

/// Priority 3: placeholder of an input or textarea
#[must_use]
pub fn by_placeholder(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    if !matches!(descriptor.tag(), "input" | "textarea") {
        return None;
    }
    let value = descriptor.non_blank_attribute("placeholder")?;
    Some(LocatorCandidate::new(LocatorExpression::Placeholder {
        value: Literal::new(value.trim()),
    }))
}

/// Priority 4: visible text of at most [`MAX_TEXT_LOCATOR_CHARS`] characters
#[must_use]
pub fn by_text(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    let text = descriptor.visible_text().trim();
    if text.is_empty() || text.chars().count() > MAX_TEXT_LOCATOR_CHARS {
        return None;
    }
    Some(LocatorCandidate::new(LocatorExpression::Text {
        value: Literal::new(text),
    }))
}

/// Priority 5: text of the associated or enclosing label
#[must_use]
pub fn by_label(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    let text = descriptor.label_text()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(LocatorCandidate::new(LocatorExpression::Label {
        value: Literal::new(text),
    }))
}

/// Priority 6: alt text of an image
#[must_use]
pub fn by_alt_text(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    if descriptor.tag() != "img" {
        return None;
    }
    let alt = descriptor.non_blank_attribute("alt")?;
    Some(LocatorCandidate::new(LocatorExpression::AltText {
        value: Literal::new(alt.trim()),
    }))
}

/// Priority 7: title attribute
#[must_use]
pub fn by_title(descriptor: &ElementDescriptor) -> Option<LocatorCandidate> {
    let title = descriptor.non_blank_attribute("title")?;
    Some(LocatorCandidate::new(LocatorExpression::Title {
        value: Literal::new(title.trim()),
    }))
}

/// Priority 8: always succeeds.
///
/// A safe id short-circuits to `#id`; otherwise the full CSS path; for
/// `<body>` (empty path) the bare tag name.
#[must_use]
pub fn by_css(descriptor: &ElementDescriptor) -> LocatorCandidate {
    LocatorCandidate::new(LocatorExpression::Css {
        selector: Literal::new(css_fallback(descriptor)),
    })
}

/// The raw selector the CSS strategy uses
#[must_use]
pub fn css_fallback(descriptor: &ElementDescriptor) -> String {
    if let Some(id) = descriptor.id().filter(|id| paths::is_safe_id(id)) {
        return format!("#{id}");
    }
    let path = descriptor.css_path();
    if path.is_empty() {
        descriptor.tag().to_string()
    } else {
        path
    }
}
