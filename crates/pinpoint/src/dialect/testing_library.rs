//! DOM Testing Library queries (`screen.*`), with plain DOM calls for the
//! selectors Testing Library has no query for.

use super::{name_option, DialectEmitter};
use crate::strategy::{Literal, LocatorCandidate, LocatorExpression};

/// `screen.getBy*` / `document.querySelector` emitter
#[derive(Debug, Clone, Copy, Default)]
pub struct TestingLibrary;

impl DialectEmitter for TestingLibrary {
    fn locator(&self, candidate: &LocatorCandidate) -> String {
        match &candidate.expression {
            LocatorExpression::Role { role, name } => format!(
                "screen.getByRole('{}'{})",
                role.escaped(),
                name_option(name.as_ref())
            ),
            LocatorExpression::TestId {
                attribute, value, ..
            } if attribute == "data-testid" => {
                format!("screen.getByTestId('{}')", value.escaped())
            }
            LocatorExpression::TestId { selector, .. } | LocatorExpression::Css { selector } => {
                format!("document.querySelector('{}')", selector.escaped())
            }
            LocatorExpression::Placeholder { value } => {
                format!("screen.getByPlaceholderText('{}')", value.escaped())
            }
            LocatorExpression::Text { value } => {
                format!("screen.getByText('{}')", value.escaped())
            }
            LocatorExpression::Label { value } => {
                format!("screen.getByLabelText('{}')", value.escaped())
            }
            LocatorExpression::AltText { value } => {
                format!("screen.getByAltText('{}')", value.escaped())
            }
            LocatorExpression::Title { value } => {
                format!("screen.getByTitle('{}')", value.escaped())
            }
        }
    }

    fn xpath(&self, xpath: &Literal) -> String {
        format!(
            "document.evaluate('{}', document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            xpath.escaped()
        )
    }

    fn click(&self, locator: &str) -> String {
        format!("await userEvent.click({locator});")
    }

    fn wait(&self, locator: &str) -> String {
        format!("await waitFor(() => expect({locator}).toBeInTheDocument());")
    }
}
