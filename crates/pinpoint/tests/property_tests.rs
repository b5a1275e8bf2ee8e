//! Property tests over arbitrary descriptors

#![allow(clippy::unwrap_used)]

use pinpoint::prelude::*;
use pinpoint::{render_all, TEST_ID_ATTRIBUTES};
use proptest::prelude::*;

const TAGS: &[&str] = &[
    "div", "span", "button", "a", "input", "textarea", "select", "img", "h2", "li", "label",
    "section",
];

const OPTIONAL_ATTRIBUTES: &[&str] = &[
    "id",
    "class",
    "role",
    "aria-label",
    "placeholder",
    "alt",
    "title",
    "type",
    "name",
    "href",
    "value",
    "data-testid",
    "data-cy",
];

/// Text biased towards characters that break naive quoting
fn hostile_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,60}",
        "[a-z'\"\\\\\n\t ]{0,20}",
        any::<String>(),
    ]
}

fn segment() -> impl Strategy<Value = AncestorSegment> {
    (
        prop::sample::select(TAGS),
        prop::option::of("[a-z][a-z0-9-]{0,8}|[0-9][a-z]{0,4}|:r[0-9]:"),
        prop::collection::vec("[a-z][a-z0-9:-]{0,6}", 0..3),
        1usize..4,
        0usize..3,
    )
        .prop_map(|(tag, id, classes, index, extra)| {
            let mut segment = AncestorSegment::new(tag)
                .with_classes(classes)
                .at(index, index + extra);
            if let Some(id) = id {
                segment = segment.with_id(id);
            }
            segment
        })
}

fn descriptor() -> impl Strategy<Value = ElementDescriptor> {
    (
        prop::sample::select(TAGS),
        prop::collection::btree_map(
            prop::sample::select(OPTIONAL_ATTRIBUTES),
            hostile_text(),
            0..6,
        ),
        hostile_text(),
        prop::option::of(hostile_text()),
        prop::collection::vec(segment(), 0..4),
        (1usize..5, 0usize..3),
    )
        .prop_map(|(tag, attributes, text, label, ancestors, (index, extra))| {
            let mut builder = ElementDescriptor::builder(tag)
                .text(text)
                .position(index, index + extra);
            for (name, value) in attributes {
                builder = builder.attribute(name, value);
            }
            if let Some(label) = label {
                builder = builder.label_text(label);
            }
            for segment in ancestors {
                builder = builder.ancestor(segment);
            }
            builder.build().unwrap()
        })
}

/// Every quote and line break in `escaped` is preceded by an odd run of
/// backslashes, so it cannot terminate the surrounding literal
fn stays_inside_literal(escaped: &str) -> bool {
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            '\'' | '"' | '\n' | '\r' | '\u{2028}' | '\u{2029}' => return false,
            _ => {}
        }
    }
    true
}

fn literals(expression: &LocatorExpression) -> Vec<&Literal> {
    match expression {
        LocatorExpression::Role { role, name } => {
            let mut out = vec![role];
            out.extend(name.as_ref());
            out
        }
        LocatorExpression::TestId {
            value, selector, ..
        } => vec![value, selector],
        LocatorExpression::Placeholder { value }
        | LocatorExpression::Text { value }
        | LocatorExpression::Label { value }
        | LocatorExpression::AltText { value }
        | LocatorExpression::Title { value } => vec![value],
        LocatorExpression::Css { selector } => vec![selector],
    }
}

proptest! {
    #[test]
    fn prop_synthesis_is_total(d in descriptor()) {
        let set = synthesize(&d).unwrap();
        prop_assert!(set.css().is_some());
        prop_assert_eq!(set.alternatives.first(), Some(&set.primary));
    }

    #[test]
    fn prop_primary_has_lowest_priority(d in descriptor()) {
        let set = synthesize(&d).unwrap();
        let min = set.alternatives.iter().map(|c| c.priority).min().unwrap();
        prop_assert_eq!(set.primary.priority, min);
        prop_assert!(set.alternatives.windows(2).all(|w| w[0].priority < w[1].priority));
    }

    #[test]
    fn prop_synthesis_is_idempotent(d in descriptor()) {
        let first = synthesize(&d).unwrap().to_json().unwrap();
        let second = synthesize(&d).unwrap().to_json().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_escaped_payloads_stay_inside_literals(d in descriptor()) {
        let set = synthesize(&d).unwrap();
        for candidate in &set.alternatives {
            for literal in literals(&candidate.expression) {
                prop_assert!(
                    stays_inside_literal(literal.escaped()),
                    "unescaped payload: {:?}",
                    literal.escaped()
                );
            }
        }
        prop_assert!(stays_inside_literal(set.xpath.escaped()));
    }

    #[test]
    fn prop_every_dialect_renders_every_alternative(d in descriptor()) {
        let set = synthesize(&d).unwrap();
        for rendering in render_all(&set) {
            prop_assert_eq!(rendering.alternatives.len(), set.alternatives.len());
            prop_assert!(rendering.click.contains(&rendering.recommended));
            prop_assert!(rendering.wait.contains(&rendering.recommended));
        }
    }

    #[test]
    fn prop_id_implies_high_reliability(d in descriptor()) {
        let set = synthesize(&d).unwrap();
        if d.id().is_some() {
            prop_assert_eq!(set.reliability, Reliability::High);
        }
        if set.reliability == Reliability::Low {
            prop_assert!(d.classes().is_empty());
            prop_assert!(!d.has_attribute("name") && !d.has_attribute("type"));
        }
    }

    #[test]
    fn prop_test_id_wins_without_role(d in descriptor()) {
        let set = synthesize(&d).unwrap();
        let has_test_id = TEST_ID_ATTRIBUTES
            .iter()
            .any(|a| d.non_blank_attribute(a).is_some());
        if has_test_id && set.candidate(StrategyType::Role).is_none() {
            prop_assert_eq!(set.primary.strategy_type, StrategyType::TestId);
        }
    }
}
