//! Shared types for the thyme transpiler.
//!
//! This crate defines the test-specification model handed over by the
//! upstream parser: actions, assertions, identifiers and values, grouped
//! into steps. The transpiler only ever reads these nodes.

pub mod ast;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use ast::{
    Action, Assertion, AttributeIdentifier, Comparison, ComparisonAssertion, DomIdentifier,
    ExaminationAssertion, Identifier, InputAction, InteractionAction, InteractionKind,
    LiteralValue, LocatorKind, NavigationKind, NoArgumentsAction, ObjectValue, Step,
    UnrecognisedAction, Value, WaitAction,
};

/// The model category a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Action,
    Assertion,
    Identifier,
    Value,
    Step,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Assertion => write!(f, "assertion"),
            Self::Identifier => write!(f, "identifier"),
            Self::Value => write!(f, "value"),
            Self::Step => write!(f, "step"),
        }
    }
}

/// A model node that can be described in error messages and logs.
///
/// `Display` renders the node back to its source form.
pub trait ModelNode: fmt::Display {
    const CATEGORY: Category;
}

impl ModelNode for Action {
    const CATEGORY: Category = Category::Action;
}

impl ModelNode for Assertion {
    const CATEGORY: Category = Category::Assertion;
}

impl ModelNode for Identifier {
    const CATEGORY: Category = Category::Identifier;
}

impl ModelNode for Value {
    const CATEGORY: Category = Category::Value;
}

impl ModelNode for Step {
    const CATEGORY: Category = Category::Step;
}
