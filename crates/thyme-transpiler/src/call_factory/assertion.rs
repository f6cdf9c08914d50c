//! Test-context assertion calls.

use thyme_source::{CompilableSource, CompilationMetadata, PlaceholderSet, VariableAssignment, VariablePlaceholder};

use super::exporting;
use crate::names::TEST_CONTEXT;

/// The assignment followed by `{{ TEST_CONTEXT }}-><method>(<target>)`.
fn assert_assigned(
    method: &str,
    assignment: VariableAssignment,
    scope: &mut PlaceholderSet,
) -> CompilableSource {
    let test_context = scope.create(TEST_CONTEXT);
    let target = assignment.target().clone();
    let call = exporting(
        format!("{test_context}->{method}({target})"),
        [&test_context, &target],
    );
    CompilableSource::concat([assignment.into_source(), call])
}

/// `{{ TEST_CONTEXT }}-><method>(<expression>)` with the expression inlined.
fn assert_expression(
    method: &str,
    expression: CompilableSource,
    scope: &mut PlaceholderSet,
) -> CompilableSource {
    let test_context = scope.create(TEST_CONTEXT);
    let extra = CompilationMetadata::new().with_additional_exports([&test_context]);
    expression.extend(
        |expression| format!("{test_context}->{method}({expression})"),
        &extra,
    )
}

pub fn value_is_true(assignment: VariableAssignment, scope: &mut PlaceholderSet) -> CompilableSource {
    assert_assigned("assertTrue", assignment, scope)
}

pub fn value_is_false(assignment: VariableAssignment, scope: &mut PlaceholderSet) -> CompilableSource {
    assert_assigned("assertFalse", assignment, scope)
}

pub fn value_is_null(assignment: VariableAssignment, scope: &mut PlaceholderSet) -> CompilableSource {
    assert_assigned("assertNull", assignment, scope)
}

pub fn value_is_not_null(assignment: VariableAssignment, scope: &mut PlaceholderSet) -> CompilableSource {
    assert_assigned("assertNotNull", assignment, scope)
}

pub fn expression_is_true(expression: CompilableSource, scope: &mut PlaceholderSet) -> CompilableSource {
    assert_expression("assertTrue", expression, scope)
}

pub fn expression_is_false(expression: CompilableSource, scope: &mut PlaceholderSet) -> CompilableSource {
    assert_expression("assertFalse", expression, scope)
}

/// `{{ TEST_CONTEXT }}-><method>(<expected>, <examined>)`
pub fn comparison(
    method: &str,
    expected: &VariablePlaceholder,
    examined: &VariablePlaceholder,
    scope: &mut PlaceholderSet,
) -> CompilableSource {
    let test_context = scope.create(TEST_CONTEXT);
    exporting(
        format!("{test_context}->{method}({expected}, {examined})"),
        [&test_context, expected, examined],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_null_follows_assignment() {
        let mut scope = PlaceholderSet::new();
        let target = scope.create("EXAMINED_VALUE");
        let assignment = VariableAssignment::new(target, CompilableSource::statement("'x'"));
        let source = value_is_null(assignment, &mut scope);
        assert_eq!(
            source.statements(),
            [
                "{{ EXAMINED_VALUE }} = 'x'",
                "{{ TEST_CONTEXT }}->assertNull({{ EXAMINED_VALUE }})",
            ]
        );
        assert!(source.dangling_placeholders().is_empty());
    }

    #[test]
    fn test_expression_is_false_inlines() {
        let mut scope = PlaceholderSet::new();
        let source = expression_is_false(CompilableSource::statement("check()"), &mut scope);
        assert_eq!(source.statements(), ["{{ TEST_CONTEXT }}->assertFalse(check())"]);
        assert_eq!(source.exports(), &PlaceholderSet::from_names(["TEST_CONTEXT"]));
    }

    #[test]
    fn test_comparison_argument_order() {
        let mut scope = PlaceholderSet::new();
        let expected = scope.create("EXPECTED_VALUE");
        let examined = scope.create("EXAMINED_VALUE");
        let source = comparison("assertEquals", &expected, &examined, &mut scope);
        assert_eq!(
            source.statements(),
            ["{{ TEST_CONTEXT }}->assertEquals({{ EXPECTED_VALUE }}, {{ EXAMINED_VALUE }})"]
        );
    }
}
