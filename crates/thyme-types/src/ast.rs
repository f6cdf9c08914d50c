//! Model node types for thyme test specifications.
//!
//! Nodes are produced by the upstream parser and are never mutated here.
//! Each category is a closed enum so that rule predicates become matches.
//! `Display` renders a node back to its source form for diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default ordinal position of an element identifier (the first match).
pub const DEFAULT_POSITION: i32 = 1;

// ══════════════════════════════════════════════════════════════════════════════
// Values
// ══════════════════════════════════════════════════════════════════════════════

/// A value appearing in an action or assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    /// `"hello"`
    Literal(LiteralValue),
    /// `".selector"` used as a value: the element (or element collection) itself.
    ElementReference(DomIdentifier),
    /// `".selector".attribute_name`
    AttributeReference(AttributeIdentifier),
    /// `$env.KEY`
    EnvironmentParameter(ObjectValue),
    /// `$browser.size`
    BrowserProperty(ObjectValue),
    /// `$page.title`, `$page.url`
    PageProperty(ObjectValue),
    /// `$data.key`. Resolved before transpilation; no rule accepts it.
    DataParameter(ObjectValue),
    /// `$elements.name`. Resolved before transpilation; no rule accepts it.
    ElementParameter(ObjectValue),
    /// `import_name.elements.element_name`, an unresolved page element reference.
    PageElementReference(ObjectValue),
}

impl Value {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(LiteralValue {
            value: value.into(),
        })
    }

    pub fn element(identifier: DomIdentifier) -> Self {
        Self::ElementReference(identifier)
    }

    pub fn attribute(identifier: AttributeIdentifier) -> Self {
        Self::AttributeReference(identifier)
    }

    pub fn environment(key: impl Into<String>) -> Self {
        Self::EnvironmentParameter(ObjectValue::new("env", key))
    }

    pub fn browser(property: impl Into<String>) -> Self {
        Self::BrowserProperty(ObjectValue::new("browser", property))
    }

    pub fn page(property: impl Into<String>) -> Self {
        Self::PageProperty(ObjectValue::new("page", property))
    }

    pub fn data_parameter(key: impl Into<String>) -> Self {
        Self::DataParameter(ObjectValue::new("data", key))
    }

    pub fn element_parameter(name: impl Into<String>) -> Self {
        Self::ElementParameter(ObjectValue::new("elements", name))
    }

    pub fn page_element_reference(import_name: impl Into<String>, element: impl Into<String>) -> Self {
        let import_name = import_name.into();
        let element = element.into();
        Self::PageElementReference(ObjectValue {
            reference: format!("{import_name}.elements.{element}"),
            object: import_name,
            property: element,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::ElementReference(identifier) => write!(f, "{identifier}"),
            Self::AttributeReference(identifier) => write!(f, "{identifier}"),
            Self::EnvironmentParameter(object)
            | Self::BrowserProperty(object)
            | Self::PageProperty(object)
            | Self::DataParameter(object)
            | Self::ElementParameter(object)
            | Self::PageElementReference(object) => write!(f, "{object}"),
        }
    }
}

/// A quoted literal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralValue {
    pub value: String,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value.replace('"', "\\\""))
    }
}

/// `$object.property`, e.g. `$env.KEY` or `$page.title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectValue {
    /// The reference exactly as written in the source.
    pub reference: String,
    pub object: String,
    pub property: String,
}

impl ObjectValue {
    pub fn new(object: impl Into<String>, property: impl Into<String>) -> Self {
        let object = object.into();
        let property = property.into();
        Self {
            reference: format!("${object}.{property}"),
            object,
            property,
        }
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ══════════════════════════════════════════════════════════════════════════════

/// How an element locator string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    CssSelector,
    XpathExpression,
}

impl LocatorKind {
    /// XPath expressions start with `/` or `(/`; anything else is CSS.
    pub fn detect(locator: &str) -> Self {
        if locator.starts_with('/') || locator.starts_with("(/") {
            Self::XpathExpression
        } else {
            Self::CssSelector
        }
    }
}

/// Locates one element (or collection) in the DOM.
///
/// `".selector"`, `".selector":2`, `{{ ".parent" }} ".child"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomIdentifier {
    pub locator: String,
    pub kind: LocatorKind,
    /// 1-based; negative values count from the last match.
    #[serde(default = "default_position")]
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<DomIdentifier>>,
}

fn default_position() -> i32 {
    DEFAULT_POSITION
}

impl DomIdentifier {
    /// Create an identifier, detecting the locator kind.
    pub fn new(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        let kind = LocatorKind::detect(&locator);
        Self {
            locator,
            kind,
            position: DEFAULT_POSITION,
            name: None,
            parent: None,
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::CssSelector,
            ..Self::new(selector)
        }
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::XpathExpression,
            ..Self::new(expression)
        }
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: DomIdentifier) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Qualify this identifier with an attribute name.
    pub fn attribute(self, attribute_name: impl Into<String>) -> AttributeIdentifier {
        AttributeIdentifier {
            element: self,
            attribute_name: attribute_name.into(),
        }
    }

    /// This identifier followed by each of its ancestors, innermost first.
    pub fn lineage(&self) -> impl Iterator<Item = &DomIdentifier> {
        std::iter::successors(Some(self), |identifier| identifier.parent.as_deref())
    }
}

impl fmt::Display for DomIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{{{{ {parent} }}}} ")?;
        }
        write!(f, "\"{}\"", self.locator.replace('"', "\\\""))?;
        if self.position != DEFAULT_POSITION {
            write!(f, ":{}", self.position)?;
        }
        Ok(())
    }
}

/// `".selector".attribute_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeIdentifier {
    pub element: DomIdentifier,
    pub attribute_name: String,
}

impl fmt::Display for AttributeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.element, self.attribute_name)
    }
}

/// The target of an interaction or input action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Identifier {
    Element(DomIdentifier),
    Attribute(AttributeIdentifier),
    PageElementReference(ObjectValue),
    ElementParameter(ObjectValue),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(identifier) => write!(f, "{identifier}"),
            Self::Attribute(identifier) => write!(f, "{identifier}"),
            Self::PageElementReference(object) | Self::ElementParameter(object) => {
                write!(f, "{object}")
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Actions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// `wait 5`
    Wait(WaitAction),
    /// `back`, `forward`, `reload`
    NoArguments(NoArgumentsAction),
    /// `click ".selector"`, `submit ".form"`, `wait-for ".selector"`
    Interaction(InteractionAction),
    /// `set ".selector" to "value"`
    Input(InputAction),
    /// Anything the parser could not classify.
    Unrecognised(UnrecognisedAction),
}

impl Action {
    pub fn wait(duration: Value) -> Self {
        Self::Wait(WaitAction { duration })
    }

    pub fn navigation(kind: NavigationKind) -> Self {
        Self::NoArguments(NoArgumentsAction { kind })
    }

    pub fn click(identifier: Identifier) -> Self {
        Self::Interaction(InteractionAction {
            kind: InteractionKind::Click,
            identifier,
        })
    }

    pub fn submit(identifier: Identifier) -> Self {
        Self::Interaction(InteractionAction {
            kind: InteractionKind::Submit,
            identifier,
        })
    }

    pub fn wait_for(identifier: Identifier) -> Self {
        Self::Interaction(InteractionAction {
            kind: InteractionKind::WaitFor,
            identifier,
        })
    }

    pub fn set(identifier: Identifier, value: Value) -> Self {
        Self::Input(InputAction { identifier, value })
    }

    pub fn unrecognised(source: impl Into<String>) -> Self {
        Self::Unrecognised(UnrecognisedAction {
            source: source.into(),
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wait(action) => write!(f, "wait {}", action.duration),
            Self::NoArguments(action) => write!(f, "{}", action.kind),
            Self::Interaction(action) => write!(f, "{} {}", action.kind, action.identifier),
            Self::Input(action) => write!(f, "set {} to {}", action.identifier, action.value),
            Self::Unrecognised(action) => f.write_str(&action.source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitAction {
    pub duration: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoArgumentsAction {
    pub kind: NavigationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    Back,
    Forward,
    Reload,
}

impl NavigationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Reload => "reload",
        }
    }
}

impl fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionAction {
    pub kind: InteractionKind,
    pub identifier: Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    Click,
    Submit,
    WaitFor,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => write!(f, "click"),
            Self::Submit => write!(f, "submit"),
            Self::WaitFor => write!(f, "wait-for"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAction {
    pub identifier: Identifier,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognisedAction {
    pub source: String,
}

// ══════════════════════════════════════════════════════════════════════════════
// Assertions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    Is,
    IsNot,
    Exists,
    NotExists,
    Includes,
    Excludes,
    Matches,
}

impl Comparison {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::IsNot => "is-not",
            Self::Exists => "exists",
            Self::NotExists => "not-exists",
            Self::Includes => "includes",
            Self::Excludes => "excludes",
            Self::Matches => "matches",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// `<examined> exists`, `<examined> not-exists`
    Examination(ExaminationAssertion),
    /// `<examined> is <expected>` and friends.
    Comparison(ComparisonAssertion),
}

impl Assertion {
    pub fn exists(examined: Value) -> Self {
        Self::Examination(ExaminationAssertion {
            examined,
            comparison: Comparison::Exists,
        })
    }

    pub fn not_exists(examined: Value) -> Self {
        Self::Examination(ExaminationAssertion {
            examined,
            comparison: Comparison::NotExists,
        })
    }

    pub fn compare(examined: Value, comparison: Comparison, expected: Value) -> Self {
        Self::Comparison(ComparisonAssertion {
            examined,
            comparison,
            expected,
        })
    }

    pub fn comparison(&self) -> Comparison {
        match self {
            Self::Examination(assertion) => assertion.comparison,
            Self::Comparison(assertion) => assertion.comparison,
        }
    }

    pub fn examined(&self) -> &Value {
        match self {
            Self::Examination(assertion) => &assertion.examined,
            Self::Comparison(assertion) => &assertion.examined,
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Examination(assertion) => {
                write!(f, "{} {}", assertion.examined, assertion.comparison)
            }
            Self::Comparison(assertion) => write!(
                f,
                "{} {} {}",
                assertion.examined, assertion.comparison, assertion.expected
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationAssertion {
    pub examined: Value,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonAssertion {
    pub examined: Value,
    pub comparison: Comparison,
    pub expected: Value,
}

// ══════════════════════════════════════════════════════════════════════════════
// Steps
// ══════════════════════════════════════════════════════════════════════════════

/// One test step: actions run first, then assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self
            .actions
            .iter()
            .map(ToString::to_string)
            .chain(self.assertions.iter().map(ToString::to_string));
        if let Some(first) = lines.next() {
            f.write_str(&first)?;
        }
        for line in lines {
            write!(f, "; {line}")?;
        }
        Ok(())
    }
}
