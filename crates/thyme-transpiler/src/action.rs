//! Action rules.

use std::sync::Arc;

use thyme_source::{CompilableSource, PlaceholderSet};
use thyme_types::ast::DEFAULT_POSITION;
use thyme_types::{Action, Identifier, InteractionKind};

use crate::call_factory::variable_assignment::is_assignable;
use crate::call_factory::{element, exporting, VariableAssignmentFactory};
use crate::dispatch::{Dispatcher, NodeTranspiler};
use crate::error::{TranspileError, TranspileResult};
use crate::escape::single_quoted;
use crate::names::{CLIENT, COLLECTION, CRAWLER, DURATION, ELEMENT, VALUE};

pub fn dispatcher(factory: Arc<VariableAssignmentFactory>) -> Dispatcher<Action> {
    Dispatcher::new(vec![
        Box::new(WaitActionTranspiler::new(factory.clone())),
        Box::new(NavigationActionTranspiler),
        Box::new(InteractionActionTranspiler::click(factory.clone())),
        Box::new(InteractionActionTranspiler::submit(factory.clone())),
        Box::new(WaitForActionTranspiler),
        Box::new(SetActionTranspiler::new(factory)),
    ])
}

// ══════════════════════════════════════════════════════════════════════════════
// Wait
// ══════════════════════════════════════════════════════════════════════════════

/// `usleep({{ DURATION }} * 1000)` with the duration in milliseconds.
pub struct WaitActionTranspiler {
    factory: Arc<VariableAssignmentFactory>,
}

impl WaitActionTranspiler {
    pub fn new(factory: Arc<VariableAssignmentFactory>) -> Self {
        Self { factory }
    }
}

impl NodeTranspiler<Action> for WaitActionTranspiler {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn handles(&self, node: &Action) -> bool {
        matches!(node, Action::Wait(wait) if is_assignable(&wait.duration))
    }

    fn transpile(&self, node: &Action) -> TranspileResult<CompilableSource> {
        let Action::Wait(wait) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };

        let mut scope = PlaceholderSet::new();
        let duration = scope.create_fresh(DURATION);
        let assignment = self
            .factory
            .create_for_value_as(
                &wait.duration,
                duration.clone(),
                &self.factory.config().duration_cast,
                "0",
                &mut scope,
            )
            .map_err(|err| err.into_model_error(node))?;

        let sleep = exporting(format!("usleep({duration} * 1000)"), [&duration]);
        Ok(CompilableSource::concat([assignment.into_source(), sleep]))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Back / forward / reload
// ══════════════════════════════════════════════════════════════════════════════

/// `{{ CRAWLER }} = {{ CLIENT }}->back()`
pub struct NavigationActionTranspiler;

impl NodeTranspiler<Action> for NavigationActionTranspiler {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn handles(&self, node: &Action) -> bool {
        matches!(node, Action::NoArguments(_))
    }

    fn transpile(&self, node: &Action) -> TranspileResult<CompilableSource> {
        let Action::NoArguments(action) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let method = action.kind.as_str();

        let mut scope = PlaceholderSet::new();
        let crawler = scope.create(CRAWLER);
        let client = scope.create(CLIENT);
        Ok(exporting(format!("{crawler} = {client}->{method}()"), &scope))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Click / submit
// ══════════════════════════════════════════════════════════════════════════════

/// Element lookup followed by `{{ ELEMENT }}->click()` or `->submit()`.
pub struct InteractionActionTranspiler {
    kind: InteractionKind,
    method: &'static str,
    factory: Arc<VariableAssignmentFactory>,
}

impl InteractionActionTranspiler {
    pub fn click(factory: Arc<VariableAssignmentFactory>) -> Self {
        Self {
            kind: InteractionKind::Click,
            method: "click",
            factory,
        }
    }

    pub fn submit(factory: Arc<VariableAssignmentFactory>) -> Self {
        Self {
            kind: InteractionKind::Submit,
            method: "submit",
            factory,
        }
    }
}

impl NodeTranspiler<Action> for InteractionActionTranspiler {
    fn name(&self) -> &'static str {
        self.method
    }

    fn handles(&self, node: &Action) -> bool {
        matches!(
            node,
            Action::Interaction(action)
                if action.kind == self.kind && matches!(action.identifier, Identifier::Element(_))
        )
    }

    fn transpile(&self, node: &Action) -> TranspileResult<CompilableSource> {
        let Action::Interaction(action) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let Identifier::Element(identifier) = &action.identifier else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        if action.kind != self.kind {
            return Err(TranspileError::non_transpilable_model(node));
        }

        let mut scope = PlaceholderSet::new();
        let element = scope.create_fresh(ELEMENT);
        let lookup = self.factory.create_for_element(identifier, element.clone(), &mut scope);
        let call = exporting(format!("{element}->{}()", self.method), [&element]);
        Ok(CompilableSource::concat([lookup.into_source(), call]))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Wait-for
// ══════════════════════════════════════════════════════════════════════════════

/// `{{ CRAWLER }} = {{ CLIENT }}->waitFor('<locator>')`
///
/// The client waits on a bare locator, so scoped identifiers and
/// identifiers with a non-default position are rejected.
pub struct WaitForActionTranspiler;

impl NodeTranspiler<Action> for WaitForActionTranspiler {
    fn name(&self) -> &'static str {
        "wait-for"
    }

    fn handles(&self, node: &Action) -> bool {
        matches!(
            node,
            Action::Interaction(action)
                if action.kind == InteractionKind::WaitFor
                    && matches!(
                        &action.identifier,
                        Identifier::Element(identifier)
                            if identifier.parent.is_none() && identifier.position == DEFAULT_POSITION
                    )
        )
    }

    fn transpile(&self, node: &Action) -> TranspileResult<CompilableSource> {
        if !self.handles(node) {
            return Err(TranspileError::non_transpilable_model(node));
        }
        let Action::Interaction(action) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let Identifier::Element(identifier) = &action.identifier else {
            return Err(TranspileError::non_transpilable_model(node));
        };

        let mut scope = PlaceholderSet::new();
        let crawler = scope.create(CRAWLER);
        let client = scope.create(CLIENT);
        Ok(exporting(
            format!("{crawler} = {client}->waitFor('{}')", single_quoted(&identifier.locator)),
            &scope,
        ))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Set
// ══════════════════════════════════════════════════════════════════════════════

/// Collection lookup, value assignment, then
/// `{{ MUTATOR }}->setValue({{ COLLECTION }}, {{ VALUE }})`.
pub struct SetActionTranspiler {
    factory: Arc<VariableAssignmentFactory>,
}

impl SetActionTranspiler {
    pub fn new(factory: Arc<VariableAssignmentFactory>) -> Self {
        Self { factory }
    }
}

impl NodeTranspiler<Action> for SetActionTranspiler {
    fn name(&self) -> &'static str {
        "set"
    }

    fn handles(&self, node: &Action) -> bool {
        matches!(
            node,
            Action::Input(action)
                if matches!(action.identifier, Identifier::Element(_)) && is_assignable(&action.value)
        )
    }

    fn transpile(&self, node: &Action) -> TranspileResult<CompilableSource> {
        let Action::Input(action) = node else {
            return Err(TranspileError::non_transpilable_model(node));
        };
        let Identifier::Element(identifier) = &action.identifier else {
            return Err(TranspileError::non_transpilable_model(node));
        };

        let mut scope = PlaceholderSet::new();
        let collection = scope.create_fresh(COLLECTION);
        let value = scope.create_fresh(VALUE);

        let collection_assignment =
            self.factory
                .create_for_element_collection(identifier, collection.clone(), &mut scope);
        let value_assignment = self
            .factory
            .create_for_value(&action.value, value.clone(), &mut scope)
            .map_err(|err| err.into_model_error(node))?;
        let mutation = element::set_value(&collection, &value, &mut scope);

        Ok(CompilableSource::concat([
            collection_assignment.into_source(),
            value_assignment.into_source(),
            mutation,
        ]))
    }
}
