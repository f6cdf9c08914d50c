//! VariableAssignment rendering and its interaction with CompilableSource
//! composition.

use thyme_source::{
    CompilableSource, CompilationMetadata, DependencySet, PlaceholderSet, VariableAssignment,
};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn source(statements: &[&str], dependencies: &[&str], exports: &[&str]) -> CompilableSource {
    CompilableSource::new(
        statements.iter().map(|s| s.to_string()).collect(),
        CompilationMetadata::new()
            .with_dependencies(DependencySet::from_names(dependencies.iter().copied()))
            .with_exports(PlaceholderSet::from_names(exports.iter().copied())),
    )
}

// ══════════════════════════════════════════════════════════════════════════════
// Ordering
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_predecessors_render_in_list_order() {
    let mut scope = PlaceholderSet::new();
    let target = scope.create("ELEMENT");

    let assignment = VariableAssignment::new(
        target,
        source(&["{{ NAVIGATOR }}->findOne({{ ELEMENT_LOCATOR }})"], &[], &["NAVIGATOR"]),
    )
    .with_predecessors([
        source(&["{{ ELEMENT_LOCATOR }} = locate()"], &["ElementLocator"], &["ELEMENT_LOCATOR"]),
        source(&["check()"], &[], &[]),
    ]);

    assert_eq!(
        assignment.statements(),
        vec![
            "{{ ELEMENT_LOCATOR }} = locate()",
            "check()",
            "{{ ELEMENT }} = {{ NAVIGATOR }}->findOne({{ ELEMENT_LOCATOR }})",
        ]
    );
}

#[test]
fn test_wrapped_setup_statements_are_preserved() {
    let mut scope = PlaceholderSet::new();
    let assignment = VariableAssignment::new(
        scope.create("BROWSER_SIZE"),
        source(
            &[
                "{{ WEBDRIVER_DIMENSION }} = size()",
                "{{ WEBDRIVER_DIMENSION }}->getWidth()",
            ],
            &[],
            &["WEBDRIVER_DIMENSION"],
        ),
    )
    .with_predecessors([source(&["before()"], &[], &[])]);

    assert_eq!(
        assignment.statements(),
        vec![
            "before()",
            "{{ WEBDRIVER_DIMENSION }} = size()",
            "{{ BROWSER_SIZE }} = {{ WEBDRIVER_DIMENSION }}->getWidth()",
        ]
    );
}

#[test]
fn test_repeated_with_predecessors_appends() {
    let mut scope = PlaceholderSet::new();
    let assignment = VariableAssignment::new(scope.create("X"), source(&["x()"], &[], &[]))
        .with_predecessors([source(&["a()"], &[], &[])])
        .with_predecessors([source(&["b()"], &[], &[])]);
    assert_eq!(assignment.statements(), vec!["a()", "b()", "{{ X }} = x()"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// Metadata
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_into_source_merges_all_metadata() {
    let mut scope = PlaceholderSet::new();
    let target = scope.create("VALUE");
    let combined: CompilableSource = VariableAssignment::new(
        target.clone(),
        source(&["{{ ENV_ARRAY }}['KEY']"], &[], &["ENV_ARRAY"]),
    )
    .with_predecessors([source(&["a()"], &["LocatorType"], &["HAS"])])
    .into();

    assert_eq!(combined.dependencies(), &DependencySet::from_names(["LocatorType"]));
    assert_eq!(
        combined.exports(),
        &PlaceholderSet::from_names(["ENV_ARRAY", "HAS", "VALUE"])
    );
    assert!(combined.dangling_placeholders().is_empty());
}

#[test]
fn test_assignment_as_predecessor_of_source() {
    let mut scope = PlaceholderSet::new();
    let value = scope.create("VALUE");
    let assignment = VariableAssignment::new(value, source(&["'hello'"], &[], &[]));

    let combined = source(&["{{ MUTATOR }}->setValue({{ VALUE }})"], &[], &["MUTATOR"])
        .with_predecessors([assignment.into_source()]);

    assert_eq!(
        combined.statements(),
        ["{{ VALUE }} = 'hello'", "{{ MUTATOR }}->setValue({{ VALUE }})"]
    );
    assert!(combined.dangling_placeholders().is_empty());
}

#[test]
fn test_assignment_serializes_to_json() {
    let mut scope = PlaceholderSet::new();
    let assignment = VariableAssignment::new(scope.create("X"), source(&["1"], &[], &[]));
    let json = serde_json::to_value(&assignment).unwrap();
    assert_eq!(json["target"]["name"], "X");
    assert_eq!(json["wrapped"]["statements"][0], "1");
    assert_eq!(json["predecessors"].as_array().map(Vec::len), Some(0));
}
