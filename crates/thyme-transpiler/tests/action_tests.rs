//! Action rules: wait, navigation, click, submit, wait-for and set.

use thyme_source::{CompilableSource, DependencySet, PlaceholderSet};
use thyme_transpiler::{TranspileError, Transpiler};
use thyme_types::{Action, Category, DomIdentifier, Identifier, NavigationKind, Value};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn transpile(action: &Action) -> CompilableSource {
    let source = Transpiler::new()
        .transpile_action(action)
        .unwrap_or_else(|e| panic!("transpile failed for {action}: {e}"));
    assert!(
        source.dangling_placeholders().is_empty(),
        "dangling placeholders {:?} in\n{source}",
        source.dangling_placeholders()
    );
    source
}

fn non_transpilable(action: &Action) -> TranspileError {
    TranspileError::NonTranspilableModel {
        category: Category::Action,
        node: action.to_string(),
    }
}

fn element(selector: &str) -> Identifier {
    Identifier::Element(DomIdentifier::css(selector))
}

const LOOKUP_ONE: [&str; 4] = [
    "{{ ELEMENT_LOCATOR }} = new ElementLocator(LocatorType::CSS_SELECTOR, '.selector', 1)",
    "{{ HAS }} = {{ NAVIGATOR }}->hasOne({{ ELEMENT_LOCATOR }})",
    "{{ TEST_CONTEXT }}->assertTrue({{ HAS }})",
    "{{ ELEMENT }} = {{ NAVIGATOR }}->findOne({{ ELEMENT_LOCATOR }})",
];

// ══════════════════════════════════════════════════════════════════════════════
// Wait
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wait_literal() {
    let source = transpile(&Action::wait(Value::literal("5")));
    assert_eq!(
        source.statements(),
        [
            "{{ DURATION }} = '5'",
            "{{ DURATION }} = (int) {{ DURATION }}",
            "usleep({{ DURATION }} * 1000)",
        ]
    );
    assert_eq!(source.exports(), &PlaceholderSet::from_names(["DURATION"]));
}

#[test]
fn test_wait_environment_parameter_defaults_to_zero() {
    let source = transpile(&Action::wait(Value::environment("DURATION")));
    assert_eq!(
        source.statements()[0],
        "{{ DURATION }} = {{ ENV_ARRAY }}['DURATION'] ?? 0"
    );
}

#[test]
fn test_wait_data_parameter_unhandled() {
    let action = Action::wait(Value::data_parameter("duration"));
    let transpiler = Transpiler::new();
    assert!(!transpiler.actions().handles(&action));
    assert_eq!(transpiler.transpile_action(&action), Err(non_transpilable(&action)));
}

// ══════════════════════════════════════════════════════════════════════════════
// Navigation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_navigation() {
    for (kind, expected) in [
        (NavigationKind::Back, "{{ CRAWLER }} = {{ CLIENT }}->back()"),
        (NavigationKind::Forward, "{{ CRAWLER }} = {{ CLIENT }}->forward()"),
        (NavigationKind::Reload, "{{ CRAWLER }} = {{ CLIENT }}->reload()"),
    ] {
        let source = transpile(&Action::navigation(kind));
        assert_eq!(source.statements(), [expected]);
        assert_eq!(source.exports(), &PlaceholderSet::from_names(["CRAWLER", "CLIENT"]));
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Click / submit
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_click() {
    let source = transpile(&Action::click(element(".selector")));
    let mut expected = LOOKUP_ONE.to_vec();
    expected.push("{{ ELEMENT }}->click()");
    assert_eq!(source.statements(), expected.as_slice());
    assert_eq!(
        source.dependencies(),
        &DependencySet::from_names(["ElementLocator", "LocatorType"])
    );
    assert_eq!(
        source.exports(),
        &PlaceholderSet::from_names(["ELEMENT", "ELEMENT_LOCATOR", "HAS", "NAVIGATOR", "TEST_CONTEXT"])
    );
}

#[test]
fn test_submit() {
    let source = transpile(&Action::submit(element(".selector")));
    assert_eq!(&source.statements()[..4], LOOKUP_ONE.as_slice());
    assert_eq!(source.final_statement(), Some("{{ ELEMENT }}->submit()"));
}

#[test]
fn test_click_attribute_unhandled() {
    let action = Action::click(Identifier::Attribute(
        DomIdentifier::css(".selector").attribute("href"),
    ));
    assert_eq!(Transpiler::new().transpile_action(&action), Err(non_transpilable(&action)));
}

// ══════════════════════════════════════════════════════════════════════════════
// Wait-for
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wait_for() {
    let source = transpile(&Action::wait_for(element(".selector")));
    assert_eq!(
        source.statements(),
        ["{{ CRAWLER }} = {{ CLIENT }}->waitFor('.selector')"]
    );
}

#[test]
fn test_wait_for_scoped_identifier_unhandled() {
    let action = Action::wait_for(Identifier::Element(
        DomIdentifier::css(".child").with_parent(DomIdentifier::css(".parent")),
    ));
    assert_eq!(Transpiler::new().transpile_action(&action), Err(non_transpilable(&action)));
}

#[test]
fn test_wait_for_non_default_position_unhandled() {
    let action = Action::wait_for(Identifier::Element(DomIdentifier::css(".selector").with_position(3)));
    assert!(!Transpiler::new().actions().handles(&action));
    assert_eq!(Transpiler::new().transpile_action(&action), Err(non_transpilable(&action)));
}

#[test]
fn test_wait_for_locator_template_opener_is_split() {
    let source = transpile(&Action::wait_for(element("[data-x='{{ Y }}']")));
    assert_eq!(
        source.statements(),
        ["{{ CRAWLER }} = {{ CLIENT }}->waitFor('[data-x=\\'{' . '{ Y }}\\']')"]
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Set
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_set_literal() {
    let source = transpile(&Action::set(element(".selector"), Value::literal("hello")));
    assert_eq!(
        source.statements(),
        [
            "{{ ELEMENT_LOCATOR }} = new ElementLocator(LocatorType::CSS_SELECTOR, '.selector', 1)",
            "{{ HAS }} = {{ NAVIGATOR }}->has({{ ELEMENT_LOCATOR }})",
            "{{ TEST_CONTEXT }}->assertTrue({{ HAS }})",
            "{{ COLLECTION }} = {{ NAVIGATOR }}->find({{ ELEMENT_LOCATOR }})",
            "{{ VALUE }} = 'hello'",
            "{{ VALUE }} = (string) {{ VALUE }}",
            "{{ MUTATOR }}->setValue({{ COLLECTION }}, {{ VALUE }})",
        ]
    );
    assert_eq!(
        source.dependencies(),
        &DependencySet::from_names(["ElementLocator", "LocatorType"])
    );
}

#[test]
fn test_set_literal_template_opener_is_split() {
    let source = transpile(&Action::set(element(".selector"), Value::literal("{{ SECRET }}")));
    assert_eq!(source.statements()[4], "{{ VALUE }} = '{' . '{ SECRET }}'");
    assert!(source.exports().get("SECRET").is_none());
}

#[test]
fn test_set_from_element_uses_fresh_lookup_placeholders() {
    let source = transpile(&Action::set(
        element(".selector"),
        Value::element(DomIdentifier::css(".source")),
    ));
    let statements = source.statements();
    assert_eq!(
        &statements[4..],
        [
            "{{ ELEMENT_LOCATOR:2 }} = new ElementLocator(LocatorType::CSS_SELECTOR, '.source', 1)",
            "{{ HAS:2 }} = {{ NAVIGATOR }}->has({{ ELEMENT_LOCATOR:2 }})",
            "{{ TEST_CONTEXT }}->assertTrue({{ HAS:2 }})",
            "{{ COLLECTION:2 }} = {{ NAVIGATOR }}->find({{ ELEMENT_LOCATOR:2 }})",
            "{{ VALUE }} = {{ INSPECTOR }}->getValue({{ COLLECTION:2 }})",
            "{{ VALUE }} = (string) {{ VALUE }}",
            "{{ MUTATOR }}->setValue({{ COLLECTION }}, {{ VALUE }})",
        ]
    );
}

#[test]
fn test_set_environment_value_is_coalesced() {
    let source = transpile(&Action::set(element(".selector"), Value::environment("KEY")));
    assert!(source
        .statements()
        .contains(&"{{ VALUE }} = {{ ENV_ARRAY }}['KEY'] ?? null".to_string()));
}

#[test]
fn test_set_attribute_target_unhandled() {
    let action = Action::set(
        Identifier::Attribute(DomIdentifier::css(".selector").attribute("value")),
        Value::literal("hello"),
    );
    let transpiler = Transpiler::new();
    assert!(!transpiler.actions().handles(&action));
    assert_eq!(transpiler.transpile_action(&action), Err(non_transpilable(&action)));
}

#[test]
fn test_set_unsupported_value_unhandled() {
    let action = Action::set(element(".selector"), Value::data_parameter("name"));
    assert_eq!(Transpiler::new().transpile_action(&action), Err(non_transpilable(&action)));
}

#[test]
fn test_set_unknown_property_is_not_swallowed() {
    let action = Action::set(element(".selector"), Value::page("colour"));
    assert!(matches!(
        Transpiler::new().transpile_action(&action),
        Err(TranspileError::UnknownObjectProperty { .. })
    ));
}

// ══════════════════════════════════════════════════════════════════════════════
// Unrecognised
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_unrecognised_action() {
    let action = Action::unrecognised("do something");
    assert_eq!(Transpiler::new().transpile_action(&action), Err(non_transpilable(&action)));
}
