//! `new ElementLocator(...)` constructor calls.

use thyme_source::{CompilableSource, CompilationMetadata, DependencySet, VariablePlaceholder};
use thyme_types::{DomIdentifier, LocatorKind};

use crate::escape::single_quoted;
use crate::names::{ELEMENT_LOCATOR_CLASS, LOCATOR_TYPE_CLASS};

fn locator_type(kind: LocatorKind) -> &'static str {
    match kind {
        LocatorKind::CssSelector => "CSS_SELECTOR",
        LocatorKind::XpathExpression => "XPATH_EXPRESSION",
    }
}

fn render(identifier: &DomIdentifier) -> String {
    format!(
        "new ElementLocator(LocatorType::{}, '{}', {})",
        locator_type(identifier.kind),
        single_quoted(&identifier.locator),
        identifier.position
    )
}

fn dependencies() -> CompilationMetadata {
    CompilationMetadata::new()
        .with_dependencies(DependencySet::from_names([ELEMENT_LOCATOR_CLASS, LOCATOR_TYPE_CLASS]))
}

/// The locator for `identifier` alone, ignoring any parent.
pub fn constructor(identifier: &DomIdentifier) -> CompilableSource {
    CompilableSource::statement(render(identifier)).with_metadata(dependencies())
}

/// Navigator arguments: the locator of `identifier` followed by the locator
/// of each ancestor, innermost first.
pub fn arguments(identifier: &DomIdentifier) -> CompilableSource {
    let rendered: Vec<String> = identifier.lineage().map(render).collect();
    CompilableSource::statement(rendered.join(", ")).with_metadata(dependencies())
}

/// Navigator arguments where the identifier's own locator has already been
/// bound to `locator`. Ancestors are still constructed inline.
pub fn arguments_for_placeholder(
    locator: &VariablePlaceholder,
    identifier: &DomIdentifier,
) -> CompilableSource {
    let mut rendered = vec![locator.to_string()];
    rendered.extend(identifier.lineage().skip(1).map(render));

    let mut metadata = CompilationMetadata::new().with_additional_exports([locator]);
    if identifier.parent.is_some() {
        metadata = metadata.merge([&dependencies()]);
    }
    CompilableSource::statement(rendered.join(", ")).with_metadata(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_constructor() {
        let source = constructor(&DomIdentifier::css(".selector"));
        assert_eq!(
            source.statements(),
            ["new ElementLocator(LocatorType::CSS_SELECTOR, '.selector', 1)"]
        );
        assert_eq!(
            source.dependencies(),
            &DependencySet::from_names(["ElementLocator", "LocatorType"])
        );
    }

    #[test]
    fn test_xpath_constructor_escapes_quotes() {
        let source = constructor(&DomIdentifier::xpath("//input[@name='q']").with_position(-1));
        assert_eq!(
            source.statements(),
            ["new ElementLocator(LocatorType::XPATH_EXPRESSION, '//input[@name=\\'q\\']', -1)"]
        );
    }

    #[test]
    fn test_arguments_include_every_ancestor() {
        let identifier = DomIdentifier::css(".child").with_parent(
            DomIdentifier::css(".parent").with_parent(DomIdentifier::css(".root")),
        );
        assert_eq!(
            arguments(&identifier).statements(),
            ["new ElementLocator(LocatorType::CSS_SELECTOR, '.child', 1), \
              new ElementLocator(LocatorType::CSS_SELECTOR, '.parent', 1), \
              new ElementLocator(LocatorType::CSS_SELECTOR, '.root', 1)"]
        );
    }

    #[test]
    fn test_arguments_for_placeholder() {
        let locator = VariablePlaceholder::new("ELEMENT_LOCATOR");

        let plain = arguments_for_placeholder(&locator, &DomIdentifier::css(".a"));
        assert_eq!(plain.statements(), ["{{ ELEMENT_LOCATOR }}"]);
        assert!(plain.dependencies().is_empty());
        assert!(plain.exports().contains(&locator));

        let nested = arguments_for_placeholder(
            &locator,
            &DomIdentifier::css(".a").with_parent(DomIdentifier::css(".b")),
        );
        assert_eq!(
            nested.statements(),
            ["{{ ELEMENT_LOCATOR }}, new ElementLocator(LocatorType::CSS_SELECTOR, '.b', 1)"]
        );
        assert_eq!(nested.dependencies().len(), 2);
    }
}
