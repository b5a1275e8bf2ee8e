//! Dialect emitters: concrete call syntax for external query APIs.
//!
//! Emitters format only. Payloads arrive already escaped (see
//! [`crate::strategy::Literal`]) and are spliced between single quotes
//! without being re-validated.

mod cypress;
mod playwright;
mod testing_library;

pub use cypress::Cypress;
pub use playwright::Playwright;
pub use testing_library::TestingLibrary;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ranker::LocatorSet;
use crate::result::{PinpointError, PinpointResult};
use crate::strategy::{Literal, LocatorCandidate, StrategyType};

/// Renders candidates for one query API
pub trait DialectEmitter {
    /// Call expression that resolves the candidate
    fn locator(&self, candidate: &LocatorCandidate) -> String;

    /// Generic XPath locator call
    fn xpath(&self, xpath: &Literal) -> String;

    /// Click/interact statement wrapping a locator expression
    fn click(&self, locator: &str) -> String;

    /// Wait/assert statement wrapping a locator expression
    fn wait(&self, locator: &str) -> String;
}

/// Supported dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Playwright test (`page.getByRole(...)`)
    Playwright,
    /// Cypress with Testing Library commands (`cy.findByRole(...)`)
    Cypress,
    /// DOM Testing Library (`screen.getByRole(...)`)
    TestingLibrary,
}

impl Dialect {
    /// All dialects in display order
    pub const ALL: [Self; 3] = [Self::Playwright, Self::Cypress, Self::TestingLibrary];

    /// Canonical name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Playwright => "playwright",
            Self::Cypress => "cypress",
            Self::TestingLibrary => "testing-library",
        }
    }

    /// Emitter for this dialect
    #[must_use]
    pub fn emitter(self) -> &'static dyn DialectEmitter {
        match self {
            Self::Playwright => &Playwright,
            Self::Cypress => &Cypress,
            Self::TestingLibrary => &TestingLibrary,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = PinpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playwright" | "pw" => Ok(Self::Playwright),
            "cypress" | "cy" => Ok(Self::Cypress),
            "testing-library" | "testinglibrary" | "testing_library" | "rtl" => {
                Ok(Self::TestingLibrary)
            }
            _ => Err(PinpointError::unsupported_dialect(s)),
        }
    }
}

/// One alternative rendered in a dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedAlternative {
    /// Producing strategy
    pub strategy: StrategyType,
    /// Ready-to-paste expression
    pub expression: String,
}

/// Everything a dialect renders for one locator set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectRendering {
    /// Dialect used
    pub dialect: Dialect,
    /// Rendering of the primary candidate
    pub recommended: String,
    /// Renderings of every alternative, ascending priority
    pub alternatives: Vec<RenderedAlternative>,
    /// XPath locator call, absent when the path is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,
    /// Click statement on the recommended locator
    pub click: String,
    /// Wait/assert statement on the recommended locator
    pub wait: String,
}

/// Render a locator set in one dialect
#[must_use]
pub fn render(set: &LocatorSet, dialect: Dialect) -> DialectRendering {
    let emitter = dialect.emitter();
    let recommended = emitter.locator(&set.primary);
    let alternatives = set
        .alternatives
        .iter()
        .map(|candidate| RenderedAlternative {
            strategy: candidate.strategy_type,
            expression: emitter.locator(candidate),
        })
        .collect();
    let xpath = (!set.xpath.raw().is_empty()).then(|| emitter.xpath(&set.xpath));

    DialectRendering {
        dialect,
        click: emitter.click(&recommended),
        wait: emitter.wait(&recommended),
        recommended,
        alternatives,
        xpath,
    }
}

/// Render in a dialect given by name
///
/// # Errors
///
/// Returns [`PinpointError::UnsupportedDialect`] for unknown names, so the
/// caller can fall back to the abstract candidate list.
pub fn render_named(set: &LocatorSet, name: &str) -> PinpointResult<DialectRendering> {
    Ok(render(set, name.parse()?))
}

/// Render in every supported dialect
#[must_use]
pub fn render_all(set: &LocatorSet) -> Vec<DialectRendering> {
    Dialect::ALL.iter().map(|&d| render(set, d)).collect()
}

/// `, { name: '...' }` options suffix shared by the role queries
pub(crate) fn name_option(name: Option<&Literal>) -> String {
    name.map_or_else(String::new, |name| {
        format!(", {{ name: '{}' }}", name.escaped())
    })
}
