//! Cypress commands, with `@testing-library/cypress` queries for the
//! semantic strategies and `cypress-xpath` for XPath.

use super::{name_option, DialectEmitter};
use crate::strategy::{Literal, LocatorCandidate, LocatorExpression};

/// `cy.findBy*` / `cy.get` emitter
#[derive(Debug, Clone, Copy, Default)]
pub struct Cypress;

impl DialectEmitter for Cypress {
    fn locator(&self, candidate: &LocatorCandidate) -> String {
        match &candidate.expression {
            LocatorExpression::Role { role, name } => format!(
                "cy.findByRole('{}'{})",
                role.escaped(),
                name_option(name.as_ref())
            ),
            LocatorExpression::TestId { selector, .. } | LocatorExpression::Css { selector } => {
                format!("cy.get('{}')", selector.escaped())
            }
            LocatorExpression::Placeholder { value } => {
                format!("cy.findByPlaceholderText('{}')", value.escaped())
            }
            LocatorExpression::Text { value } => format!("cy.contains('{}')", value.escaped()),
            LocatorExpression::Label { value } => {
                format!("cy.findByLabelText('{}')", value.escaped())
            }
            LocatorExpression::AltText { value } => {
                format!("cy.findByAltText('{}')", value.escaped())
            }
            LocatorExpression::Title { value } => format!("cy.findByTitle('{}')", value.escaped()),
        }
    }

    fn xpath(&self, xpath: &Literal) -> String {
        format!("cy.xpath('{}')", xpath.escaped())
    }

    fn click(&self, locator: &str) -> String {
        format!("{locator}.click();")
    }

    fn wait(&self, locator: &str) -> String {
        format!("{locator}.should('be.visible');")
    }
}
