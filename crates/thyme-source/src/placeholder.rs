//! Variable placeholders and the placeholder registry.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexSet;
use serde::{Serialize, Serializer};

/// A named forward reference to a variable.
///
/// Identity is `(name, disambiguator)`. A placeholder names a role, not a
/// storage cell: two fragments that both ask for `ELEMENT` share it unless
/// one of them explicitly asked for a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariablePlaceholder {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    disambiguator: Option<u32>,
}

impl VariablePlaceholder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disambiguator: None,
        }
    }

    fn disambiguated(name: &str, disambiguator: u32) -> Self {
        Self {
            name: name.to_string(),
            disambiguator: Some(disambiguator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn disambiguator(&self) -> Option<u32> {
        self.disambiguator
    }
}

/// Renders the template token, e.g. `{{ ELEMENT }}` or `{{ ELEMENT:2 }}`.
impl fmt::Display for VariablePlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.disambiguator {
            Some(n) => write!(f, "{{{{ {}:{} }}}}", self.name, n),
            None => write!(f, "{{{{ {} }}}}", self.name),
        }
    }
}

/// Every placeholder token appearing in a statement, in order of appearance.
pub fn placeholder_tokens(statement: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = statement;
    while let Some(start) = rest.find("{{ ") {
        let candidate = &rest[start..];
        let Some(end) = candidate.find(" }}") else {
            break;
        };
        tokens.push(&candidate[..end + 3]);
        rest = &candidate[end + 3..];
    }
    tokens
}

// ══════════════════════════════════════════════════════════════════════════════
// PlaceholderSet
// ══════════════════════════════════════════════════════════════════════════════

/// An insertion-ordered set of placeholders that also allocates them.
///
/// Equality ignores insertion order and the allocation counters.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSet {
    items: IndexSet<VariablePlaceholder>,
    /// Last disambiguator handed out per name.
    counters: HashMap<String, u32>,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding the canonical placeholder for each name.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::new();
        for name in names {
            set.create(name);
        }
        set
    }

    /// The canonical placeholder for `name`, inserting it if absent.
    ///
    /// Idempotent: repeated calls return equal placeholders.
    pub fn create(&mut self, name: &str) -> VariablePlaceholder {
        let placeholder = VariablePlaceholder::new(name);
        self.items.insert(placeholder.clone());
        placeholder
    }

    /// A placeholder for `name` that is distinct from every one already in
    /// the set. The first allocation of a name is the canonical placeholder.
    pub fn create_fresh(&mut self, name: &str) -> VariablePlaceholder {
        let canonical = VariablePlaceholder::new(name);
        if self.items.insert(canonical.clone()) {
            return canonical;
        }

        let counter = self.counters.entry(name.to_string()).or_insert(1);
        loop {
            *counter += 1;
            let candidate = VariablePlaceholder::disambiguated(name, *counter);
            if self.items.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Insert an existing placeholder. Returns `false` if it was present.
    pub fn insert(&mut self, placeholder: VariablePlaceholder) -> bool {
        self.items.insert(placeholder)
    }

    pub fn contains(&self, placeholder: &VariablePlaceholder) -> bool {
        self.items.contains(placeholder)
    }

    /// The canonical placeholder for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&VariablePlaceholder> {
        self.items.get(&VariablePlaceholder::new(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariablePlaceholder> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Union with `others`, keeping first-seen order.
    pub fn merge<'a>(mut self, others: impl IntoIterator<Item = &'a PlaceholderSet>) -> Self {
        for other in others {
            self.items.extend(other.items.iter().cloned());
            for (name, &count) in &other.counters {
                let counter = self.counters.entry(name.clone()).or_insert(count);
                *counter = (*counter).max(count);
            }
        }
        self
    }
}

impl PartialEq for PlaceholderSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for PlaceholderSet {}

impl FromIterator<VariablePlaceholder> for PlaceholderSet {
    fn from_iter<I: IntoIterator<Item = VariablePlaceholder>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            counters: HashMap::new(),
        }
    }
}

impl<'a> IntoIterator for &'a PlaceholderSet {
    type Item = &'a VariablePlaceholder;
    type IntoIter = indexmap::set::Iter<'a, VariablePlaceholder>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for PlaceholderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}
