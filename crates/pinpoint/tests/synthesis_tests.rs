//! End-to-end synthesis tests
//!
//! Snapshots go through the full path: JSON tree, extraction, the eight
//! strategies, ranking, scoring and dialect rendering.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pinpoint::prelude::*;

const PAGE: &str = r#"{
    "tag": "html",
    "children": [{
        "tag": "body",
        "children": [
            {"tag": "button", "attributes": {"id": "submit-btn"}, "text": "Submit"},
            {"tag": "div", "attributes": {"class": "card"}, "text": "Loading…"},
            {"tag": "span"},
            {"tag": "span"},
            {"tag": "span"},
            {"tag": "input", "attributes": {"type": "email", "placeholder": "you@example.com"}},
            {"tag": "img", "attributes": {"src": "/logo.png", "alt": "Company logo", "data-testid": "logo"}},
            {"tag": "a", "attributes": {"href": "/docs", "title": "Read the docs"},
             "children": [{"text": "Docs "}, {"tag": "em", "text": "v2"}]}
        ]
    }]
}"#;

fn page() -> DomTree {
    DomTree::from_json(PAGE).expect("fixture parses")
}

fn synth(path: &[usize]) -> LocatorSet {
    let tree = page();
    let element = tree.at_path(path).expect("node exists");
    synthesize_element(&element).expect("synthesis succeeds")
}

// ============================================================================
// Worked examples
// ============================================================================

mod worked_examples {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_button_with_id_elects_named_role() {
        let set = synth(&[0, 0]);

        assert_eq!(set.primary.strategy_type, StrategyType::Role);
        assert_eq!(set.primary.priority, 1);
        assert_eq!(
            set.primary.expression,
            LocatorExpression::Role {
                role: Literal::new("button"),
                name: Some(Literal::new("Submit")),
            }
        );
        assert_eq!(set.css().unwrap().expression.to_string(), "#submit-btn");
        assert_eq!(set.reliability, Reliability::High);
        assert_eq!(set.specificity, 100);
    }

    #[test]
    fn test_card_div_elects_text() {
        let set = synth(&[0, 1]);

        assert_eq!(set.primary.strategy_type, StrategyType::Text);
        assert_eq!(set.primary.priority, 4);
        assert_eq!(set.strategies(), [StrategyType::Text, StrategyType::Css]);
        assert_eq!(set.css().unwrap().expression.to_string(), "div.card");
        assert_eq!(set.reliability, Reliability::Medium);
    }

    #[test]
    fn test_anonymous_span_falls_back_to_css() {
        let set = synth(&[0, 4]);

        assert_eq!(set.primary.strategy_type, StrategyType::Css);
        assert_eq!(set.alternatives.len(), 1);
        assert_eq!(set.primary.expression.to_string(), "span:nth-child(3)");
        assert_eq!(set.reliability, Reliability::Low);
        assert_eq!(set.specificity, 11);
        assert_eq!(set.xpath.raw(), "/span[3]");
    }

    #[test]
    fn test_email_input_elects_bare_role_over_placeholder() {
        let set = synth(&[0, 5]);

        assert_eq!(set.primary.strategy_type, StrategyType::Role);
        assert_eq!(
            set.primary.expression,
            LocatorExpression::Role {
                role: Literal::new("textbox"),
                name: None,
            }
        );
        let placeholder = set.candidate(StrategyType::Placeholder).unwrap();
        assert_eq!(placeholder.priority, 3);
        assert_eq!(placeholder.expression.to_string(), "placeholder=you@example.com");
        assert_eq!(set.reliability, Reliability::Medium);
    }
}

// ============================================================================
// Strategy interplay
// ============================================================================

mod strategy_interplay {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_prefers_test_id_then_alt() {
        let set = synth(&[0, 6]);

        assert_eq!(
            set.strategies(),
            [StrategyType::TestId, StrategyType::AltText, StrategyType::Css]
        );
        assert_eq!(set.primary.expression.to_string(), "[data-testid=\"logo\"]");
    }

    #[test]
    fn test_link_uses_descendant_text_as_name() {
        let set = synth(&[0, 7]);

        assert_eq!(
            set.primary.expression,
            LocatorExpression::Role {
                role: Literal::new("link"),
                name: Some(Literal::new("Docs v2")),
            }
        );
        assert_eq!(
            set.strategies(),
            [
                StrategyType::Role,
                StrategyType::Text,
                StrategyType::Title,
                StrategyType::Css
            ]
        );
    }

    #[test]
    fn test_alternatives_ascend_by_priority() {
        for index in 0..8 {
            let set = synth(&[0, index]);
            let priorities: Vec<u8> = set.alternatives.iter().map(|c| c.priority).collect();
            let mut sorted = priorities.clone();
            sorted.sort_unstable();
            assert_eq!(priorities, sorted);
            assert_eq!(set.alternatives.first(), Some(&set.primary));
            assert!(set.css().is_some());
        }
    }
}

// ============================================================================
// Dialect rendering
// ============================================================================

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_button_in_every_dialect() {
        let set = synth(&[0, 0]);
        let recommended: Vec<String> = render_all(&set)
            .into_iter()
            .map(|r| r.recommended)
            .collect();

        assert_eq!(
            recommended,
            [
                "page.getByRole('button', { name: 'Submit' })",
                "cy.findByRole('button', { name: 'Submit' })",
                "screen.getByRole('button', { name: 'Submit' })",
            ]
        );
    }

    #[test]
    fn test_playwright_actions_wrap_recommended() {
        let rendering = render(&synth(&[0, 1]), Dialect::Playwright);

        assert_eq!(rendering.recommended, "page.getByText('Loading…')");
        assert_eq!(rendering.click, "await page.getByText('Loading…').click();");
        assert_eq!(
            rendering.wait,
            "await expect(page.getByText('Loading…')).toBeVisible();"
        );
        assert_eq!(
            rendering.xpath.as_deref(),
            Some("page.locator('xpath=/div[1]')")
        );
    }

    #[test]
    fn test_render_named_unknown_dialect() {
        let set = synth(&[0, 0]);
        let err = render_named(&set, "selenium").unwrap_err();
        assert!(err.is_unsupported_dialect());
        assert!(render_named(&set, "cypress").is_ok());
    }

    #[test]
    fn test_hostile_text_stays_inside_literal() {
        let descriptor = ElementDescriptor::builder("button")
            .text("Say \"hi\" it's\nnow")
            .build()
            .unwrap();
        let rendering = render(&synthesize(&descriptor).unwrap(), Dialect::Cypress);

        assert_eq!(
            rendering.recommended,
            "cy.findByRole('button', { name: 'Say \\\"hi\\\" it\\'s now' })"
        );
    }
}

// ============================================================================
// Boundary cases
// ============================================================================

mod boundaries {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_descriptor_json_roundtrip_synthesizes_identically() {
        let tree = page();
        let descriptor = extract(&tree.at_path(&[0, 7]).unwrap()).unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed = ElementDescriptor::from_json(&json).unwrap();

        assert_eq!(
            synthesize(&descriptor).unwrap(),
            synthesize(&parsed).unwrap()
        );
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let err = ElementDescriptor::from_json(r#"{"tag": ""}"#).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_text_node_cannot_be_synthesized() {
        let tree = DomTree::from_json(r#"{"tag": "body", "children": [{"text": "loose"}]}"#)
            .unwrap();
        let body = tree.root().unwrap();
        assert!(tree.at_path(&[0]).is_none());

        let text = body.child_nodes().next().unwrap();
        let err = synthesize_element(&text).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_wire_descriptor_derives_id_and_classes() {
        let descriptor = ElementDescriptor::from_json(
            r#"{"tag": "div", "attributes": {"id": "main", "class": "card"}}"#,
        )
        .unwrap();
        let set = synthesize(&descriptor).unwrap();

        assert_eq!(descriptor.id(), Some("main"));
        assert_eq!(descriptor.classes(), ["card"]);
        assert_eq!(set.reliability, Reliability::High);
        assert_eq!(set.css().unwrap().expression.to_string(), "#main");
    }

    #[test]
    fn test_wire_descriptor_tag_is_lower_cased() {
        let descriptor =
            ElementDescriptor::from_json(r#"{"tag": "BUTTON", "visibleText": "Go"}"#).unwrap();
        let set = synthesize(&descriptor).unwrap();

        assert_eq!(descriptor.tag(), "button");
        assert_eq!(
            set.primary.expression,
            LocatorExpression::Role {
                role: Literal::new("button"),
                name: Some(Literal::new("Go")),
            }
        );
        assert_eq!(set.css().unwrap().expression.to_string(), "button");
    }
}
