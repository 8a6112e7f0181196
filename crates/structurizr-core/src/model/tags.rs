//! Ordered tag sets and the well-known tags applied to new model items.

use std::fmt;

use indexmap::IndexSet;

pub const ELEMENT: &str = "Element";
pub const RELATIONSHIP: &str = "Relationship";

pub const PERSON: &str = "Person";
pub const SOFTWARE_SYSTEM: &str = "Software System";
pub const CONTAINER: &str = "Container";
pub const COMPONENT: &str = "Component";

pub const DEPLOYMENT_NODE: &str = "Deployment Node";
pub const CONTAINER_INSTANCE: &str = "Container Instance";
pub const SOFTWARE_SYSTEM_INSTANCE: &str = "Software System Instance";
pub const INFRASTRUCTURE_NODE: &str = "Infrastructure Node";

/// An ordered set of tags.
///
/// Tags keep the order in which they were first added; adding a tag that is
/// already present is a no-op and does not move it. In documents a tag set is
/// written as a single comma-separated string. Two tag sets are equal only if
/// they hold the same tags in the same order.
///
/// # Examples
///
/// ```
/// use structurizr_core::model::Tags;
///
/// let mut tags = Tags::parse("Element, Person,External");
/// assert!(!tags.add("Person"));
/// assert!(tags.add("Customer"));
/// assert_eq!(tags.to_string(), "Element,Person,External,Customer");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tags(IndexSet<String>);

impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Tags {}

impl Tags {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated tag list, trimming whitespace around each tag
    /// and skipping empty entries.
    pub fn parse(value: &str) -> Self {
        value.split(',').collect()
    }

    /// Add a tag, returning `false` if it was already present.
    pub fn add(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.0.insert(tag.to_owned())
    }

    /// Remove a tag while keeping the order of the remaining ones.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.shift_remove(tag)
    }

    /// Returns `true` if the tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterate over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        tags.extend(iter);
        tags
    }
}

impl<S: Into<String>> Extend<S> for Tags {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.add(tag);
        }
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tag) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let tags = Tags::parse("Zeta,Alpha,Mu");
        let collected: Vec<_> = tags.iter().collect();
        assert_eq!(collected, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_parse_skips_blank_entries() {
        let tags = Tags::parse(" Element ,, Person ,");
        assert_eq!(tags.to_string(), "Element,Person");
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let tags: Tags = ["b", "a", "b", "c"].into_iter().collect();
        assert_eq!(tags.to_string(), "b,a,c");
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut tags = Tags::parse("a,b,c");
        assert!(tags.remove("b"));
        assert!(!tags.remove("b"));
        assert_eq!(tags.to_string(), "a,c");
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert_ne!(Tags::parse("a,b"), Tags::parse("b,a"));
        assert_eq!(Tags::parse("a, b"), Tags::parse("a,b"));
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(Tags::new().to_string(), "");
        assert!(Tags::parse("").is_empty());
    }
}
