//! Transpiler configuration: enabled rules and value coercion.

use serde::Deserialize;

use crate::error::{TranspileError, TranspileResult};

/// Configuration for which transpilation rules are active and how values
/// are coerced.
///
/// All rules are enabled by default. Disable individual rules by setting
/// their fields to `false`, or use `from_skip_list` with rule name strings.
/// A disabled rule behaves as if it were never registered: nodes it would
/// have claimed fall through to later rules or fail with
/// `NonTranspilableModel`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TranspilerConfig {
    pub literal_value: bool,
    pub browser_property: bool,
    pub page_property: bool,
    pub environment_parameter: bool,
    pub element_identifier: bool,
    pub attribute_identifier: bool,
    pub wait_action: bool,
    pub navigation_action: bool,
    pub click_action: bool,
    pub submit_action: bool,
    pub wait_for_action: bool,
    pub set_action: bool,
    pub exists_assertion: bool,
    pub comparison_assertion: bool,
    /// Cast applied to a value assigned for use, e.g. `(string) {{ VALUE }}`.
    pub value_cast: String,
    /// Fallback for environment parameters that may be absent.
    pub absent_default: String,
    /// Cast applied to a wait duration.
    pub duration_cast: String,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            literal_value: true,
            browser_property: true,
            page_property: true,
            environment_parameter: true,
            element_identifier: true,
            attribute_identifier: true,
            wait_action: true,
            navigation_action: true,
            click_action: true,
            submit_action: true,
            wait_for_action: true,
            set_action: true,
            exists_assertion: true,
            comparison_assertion: true,
            value_cast: "string".to_string(),
            absent_default: "null".to_string(),
            duration_cast: "int".to_string(),
        }
    }
}

impl TranspilerConfig {
    /// Create a config with all rules enabled except those in the skip list.
    ///
    /// Rule names correspond to `NodeTranspiler::name()` values:
    /// - `"literal-value"`, `"browser-property"`, `"page-property"`,
    ///   `"environment-parameter"`
    /// - `"element-identifier"`, `"attribute-identifier"`
    /// - `"wait"`, `"navigation"`, `"click"`, `"submit"`, `"wait-for"`, `"set"`
    /// - `"exists-comparison"`, `"value-comparison"`
    pub fn from_skip_list(skip: &[&str]) -> TranspileResult<Self> {
        let mut config = Self::default();
        for name in skip {
            *config.rule_mut(name)? = false;
        }
        Ok(config)
    }

    /// Whether the rule called `name` is active. Unknown names are inactive.
    pub fn is_enabled(&self, name: &str) -> bool {
        match name {
            "literal-value" => self.literal_value,
            "browser-property" => self.browser_property,
            "page-property" => self.page_property,
            "environment-parameter" => self.environment_parameter,
            "element-identifier" => self.element_identifier,
            "attribute-identifier" => self.attribute_identifier,
            "wait" => self.wait_action,
            "navigation" => self.navigation_action,
            "click" => self.click_action,
            "submit" => self.submit_action,
            "wait-for" => self.wait_for_action,
            "set" => self.set_action,
            "exists-comparison" => self.exists_assertion,
            "value-comparison" => self.comparison_assertion,
            _ => false,
        }
    }

    fn rule_mut(&mut self, name: &str) -> TranspileResult<&mut bool> {
        let flag = match name {
            "literal-value" => &mut self.literal_value,
            "browser-property" => &mut self.browser_property,
            "page-property" => &mut self.page_property,
            "environment-parameter" => &mut self.environment_parameter,
            "element-identifier" => &mut self.element_identifier,
            "attribute-identifier" => &mut self.attribute_identifier,
            "wait" => &mut self.wait_action,
            "navigation" => &mut self.navigation_action,
            "click" => &mut self.click_action,
            "submit" => &mut self.submit_action,
            "wait-for" => &mut self.wait_for_action,
            "set" => &mut self.set_action,
            "exists-comparison" => &mut self.exists_assertion,
            "value-comparison" => &mut self.comparison_assertion,
            _ => {
                return Err(TranspileError::UnknownItem {
                    kind: "rule",
                    name: name.to_string(),
                })
            }
        };
        Ok(flag)
    }
}
