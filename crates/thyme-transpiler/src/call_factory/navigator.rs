//! Element navigator calls: `find`, `findOne`, `has`, `hasOne`.

use thyme_source::{CompilableSource, CompilationMetadata, PlaceholderSet};
use thyme_types::DomIdentifier;

use super::element_locator;
use crate::names::NAVIGATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorMethod {
    /// Every matching element.
    Find,
    /// Exactly one element; fails if the lookup is ambiguous.
    FindOne,
    Has,
    HasOne,
}

impl NavigatorMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::FindOne => "findOne",
            Self::Has => "has",
            Self::HasOne => "hasOne",
        }
    }
}

/// `{{ NAVIGATOR }}-><method>(<arguments>)` over already-transpiled arguments.
pub fn call(
    method: NavigatorMethod,
    arguments: CompilableSource,
    scope: &mut PlaceholderSet,
) -> CompilableSource {
    let navigator = scope.create(NAVIGATOR);
    let extra = CompilationMetadata::new().with_additional_exports([&navigator]);
    arguments.extend(
        |arguments| format!("{navigator}->{}({arguments})", method.as_str()),
        &extra,
    )
}

/// A navigator call with the identifier's locators constructed inline.
pub fn call_for_identifier(
    method: NavigatorMethod,
    identifier: &DomIdentifier,
    scope: &mut PlaceholderSet,
) -> CompilableSource {
    call(method, element_locator::arguments(identifier), scope)
}
