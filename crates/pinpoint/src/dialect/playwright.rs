//! Playwright Test locators.

use super::{name_option, DialectEmitter};
use crate::strategy::{Literal, LocatorCandidate, LocatorExpression};

/// `page.getBy*` / `page.locator` emitter
#[derive(Debug, Clone, Copy, Default)]
pub struct Playwright;

impl DialectEmitter for Playwright {
    fn locator(&self, candidate: &LocatorCandidate) -> String {
        match &candidate.expression {
            LocatorExpression::Role { role, name } => format!(
                "page.getByRole('{}'{})",
                role.escaped(),
                name_option(name.as_ref())
            ),
            LocatorExpression::TestId {
                attribute, value, ..
            } if attribute == "data-testid" => {
                format!("page.getByTestId('{}')", value.escaped())
            }
            LocatorExpression::TestId { selector, .. } | LocatorExpression::Css { selector } => {
                format!("page.locator('{}')", selector.escaped())
            }
            LocatorExpression::Placeholder { value } => {
                format!("page.getByPlaceholder('{}')", value.escaped())
            }
            LocatorExpression::Text { value } => format!("page.getByText('{}')", value.escaped()),
            LocatorExpression::Label { value } => {
                format!("page.getByLabel('{}')", value.escaped())
            }
            LocatorExpression::AltText { value } => {
                format!("page.getByAltText('{}')", value.escaped())
            }
            LocatorExpression::Title { value } => {
                format!("page.getByTitle('{}')", value.escaped())
            }
        }
    }

    fn xpath(&self, xpath: &Literal) -> String {
        format!("page.locator('xpath={}')", xpath.escaped())
    }

    fn click(&self, locator: &str) -> String {
        format!("await {locator}.click();")
    }

    fn wait(&self, locator: &str) -> String {
        format!("await expect({locator}).toBeVisible();")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(expression: LocatorExpression) -> String {
        Playwright.locator(&LocatorCandidate::new(expression))
    }

    #[test]
    fn test_role_with_and_without_name() {
        assert_eq!(
            render(LocatorExpression::Role {
                role: Literal::new("button"),
                name: Some(Literal::new("Submit")),
            }),
            "page.getByRole('button', { name: 'Submit' })"
        );
        assert_eq!(
            render(LocatorExpression::Role {
                role: Literal::new("textbox"),
                name: None,
            }),
            "page.getByRole('textbox')"
        );
    }

    #[test]
    fn test_data_testid_uses_get_by_test_id() {
        assert_eq!(
            render(LocatorExpression::TestId {
                attribute: "data-testid".to_string(),
                value: Literal::new("save"),
                selector: Literal::new("[data-testid=\"save\"]"),
            }),
            "page.getByTestId('save')"
        );
    }

    #[test]
    fn test_other_test_id_attribute_uses_locator() {
        assert_eq!(
            render(LocatorExpression::TestId {
                attribute: "data-cy".to_string(),
                value: Literal::new("save"),
                selector: Literal::new("[data-cy=\"save\"]"),
            }),
            "page.locator('[data-cy=\\\"save\\\"]')"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            render(LocatorExpression::Text {
                value: Literal::new("It's done"),
            }),
            "page.getByText('It\\'s done')"
        );
    }

    #[test]
    fn test_xpath_and_actions() {
        assert_eq!(
            Playwright.xpath(&Literal::new("/div[1]/span[3]")),
            "page.locator('xpath=/div[1]/span[3]')"
        );
        assert_eq!(Playwright.click("page.getByText('Go')"), "await page.getByText('Go').click();");
        assert_eq!(
            Playwright.wait("page.getByText('Go')"),
            "await expect(page.getByText('Go')).toBeVisible();"
        );
    }
}
