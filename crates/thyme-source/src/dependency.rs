//! External symbol dependencies.

use std::fmt;

use indexmap::IndexSet;
use serde::{Serialize, Serializer};

/// An opaque external symbol the generated code needs declared or imported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClassDependency(String);

impl ClassDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An insertion-ordered set of [`ClassDependency`].
///
/// Merging is set union; equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    items: IndexSet<ClassDependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().map(ClassDependency::new).collect()
    }

    /// Returns `false` if the dependency was already present.
    pub fn insert(&mut self, dependency: ClassDependency) -> bool {
        self.items.insert(dependency)
    }

    pub fn contains(&self, dependency: &ClassDependency) -> bool {
        self.items.contains(dependency)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDependency> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn merge<'a>(mut self, others: impl IntoIterator<Item = &'a DependencySet>) -> Self {
        for other in others {
            self.items.extend(other.items.iter().cloned());
        }
        self
    }
}

impl FromIterator<ClassDependency> for DependencySet {
    fn from_iter<I: IntoIterator<Item = ClassDependency>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a ClassDependency;
    type IntoIter = indexmap::set::Iter<'a, ClassDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for DependencySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_union() {
        let a = DependencySet::from_names(["ElementLocator"]);
        let b = DependencySet::from_names(["LocatorType", "ElementLocator"]);
        let merged = a.merge([&b]);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&ClassDependency::new("LocatorType")));
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let a = DependencySet::from_names(["B"]);
        let b = DependencySet::from_names(["A", "B"]);
        let names: Vec<_> = a.merge([&b]).iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_serializes_as_name_list() {
        let set = DependencySet::from_names(["ElementLocator", "LocatorType"]);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["ElementLocator","LocatorType"]"#
        );
    }
}
