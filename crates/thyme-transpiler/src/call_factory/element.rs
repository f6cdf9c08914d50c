//! Element inspector and mutator calls.

use thyme_source::{CompilableSource, PlaceholderSet, VariablePlaceholder};

use super::exporting;
use crate::names::{INSPECTOR, MUTATOR};

/// `{{ INSPECTOR }}->getValue(<collection>)`
pub fn get_value(collection: &VariablePlaceholder, scope: &mut PlaceholderSet) -> CompilableSource {
    let inspector = scope.create(INSPECTOR);
    exporting(
        format!("{inspector}->getValue({collection})"),
        [&inspector, collection],
    )
}

/// `{{ MUTATOR }}->setValue(<collection>, <value>)`
pub fn set_value(
    collection: &VariablePlaceholder,
    value: &VariablePlaceholder,
    scope: &mut PlaceholderSet,
) -> CompilableSource {
    let mutator = scope.create(MUTATOR);
    exporting(
        format!("{mutator}->setValue({collection}, {value})"),
        [&mutator, collection, value],
    )
}
