//! Scalar value rules.

use thyme_source::{CompilableSource, PlaceholderSet};
use thyme_types::{ObjectValue, Value};

use crate::call_factory::exporting;
use crate::dispatch::{Dispatcher, NodeTranspiler};
use crate::error::{TranspileError, TranspileResult};
use crate::escape::single_quoted;
use crate::names::{CLIENT, ENV_ARRAY, WEBDRIVER_DIMENSION};

/// The value rules in priority order.
///
/// The literal rule comes first so a literal never reaches an object rule.
pub fn dispatcher() -> Dispatcher<Value> {
    Dispatcher::new(vec![
        Box::new(LiteralValueTranspiler),
        Box::new(BrowserPropertyTranspiler),
        Box::new(PagePropertyTranspiler),
        Box::new(EnvironmentParameterTranspiler),
    ])
}

/// `'<escaped literal>'`
pub struct LiteralValueTranspiler;

impl NodeTranspiler<Value> for LiteralValueTranspiler {
    fn name(&self) -> &'static str {
        "literal-value"
    }

    fn handles(&self, node: &Value) -> bool {
        matches!(node, Value::Literal(_))
    }

    fn transpile(&self, node: &Value) -> TranspileResult<CompilableSource> {
        match node {
            Value::Literal(literal) => Ok(CompilableSource::statement(format!(
                "'{}'",
                single_quoted(&literal.value)
            ))),
            _ => Err(TranspileError::non_transpilable_model(node)),
        }
    }
}

/// `$browser.size` as a `<width>x<height>` string.
pub struct BrowserPropertyTranspiler;

impl NodeTranspiler<Value> for BrowserPropertyTranspiler {
    fn name(&self) -> &'static str {
        "browser-property"
    }

    fn handles(&self, node: &Value) -> bool {
        matches!(node, Value::BrowserProperty(_))
    }

    fn transpile(&self, node: &Value) -> TranspileResult<CompilableSource> {
        let Value::BrowserProperty(ObjectValue { property, .. }) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        if property != "size" {
            return Err(TranspileError::unknown_object_property(property, node));
        }

        let mut scope = PlaceholderSet::new();
        let client = scope.create(CLIENT);
        let dimension = scope.create(WEBDRIVER_DIMENSION);

        let statements = vec![
            format!("{dimension} = {client}->getWebDriver()->manage()->window()->getSize()"),
            format!("(string) {dimension}->getWidth() . 'x' . (string) {dimension}->getHeight()"),
        ];
        Ok(CompilableSource::new(statements, Default::default()).with_additional_exports(&scope))
    }
}

/// `$page.title` and `$page.url`.
pub struct PagePropertyTranspiler;

impl NodeTranspiler<Value> for PagePropertyTranspiler {
    fn name(&self) -> &'static str {
        "page-property"
    }

    fn handles(&self, node: &Value) -> bool {
        matches!(node, Value::PageProperty(_))
    }

    fn transpile(&self, node: &Value) -> TranspileResult<CompilableSource> {
        let Value::PageProperty(ObjectValue { property, .. }) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let method = match property.as_str() {
            "title" => "getTitle",
            "url" => "getCurrentURL",
            _ => return Err(TranspileError::unknown_object_property(property, node)),
        };

        let mut scope = PlaceholderSet::new();
        let client = scope.create(CLIENT);
        Ok(exporting(format!("{client}->{method}()"), [&client]))
    }
}

/// `$env.KEY` read from the environment array. May be absent at runtime.
pub struct EnvironmentParameterTranspiler;

impl NodeTranspiler<Value> for EnvironmentParameterTranspiler {
    fn name(&self) -> &'static str {
        "environment-parameter"
    }

    fn handles(&self, node: &Value) -> bool {
        matches!(node, Value::EnvironmentParameter(_))
    }

    fn transpile(&self, node: &Value) -> TranspileResult<CompilableSource> {
        let Value::EnvironmentParameter(ObjectValue { property, .. }) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };

        let mut scope = PlaceholderSet::new();
        let env = scope.create(ENV_ARRAY);
        Ok(exporting(format!("{env}['{}']", single_quoted(property)), [&env]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_first() {
        assert_eq!(
            dispatcher().names(),
            vec!["literal-value", "browser-property", "page-property", "environment-parameter"]
        );
    }

    #[test]
    fn test_rules_reject_other_variants() {
        let literal = Value::literal("x");
        assert!(!BrowserPropertyTranspiler.handles(&literal));
        assert!(!PagePropertyTranspiler.handles(&literal));
        assert!(!EnvironmentParameterTranspiler.handles(&literal));
        assert!(matches!(
            PagePropertyTranspiler.transpile(&literal),
            Err(TranspileError::NonTranspilableModel { .. })
        ));
    }
}
