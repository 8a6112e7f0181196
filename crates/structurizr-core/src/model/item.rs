//! Capabilities shared by elements and relationships.

use indexmap::IndexMap;

use crate::{identifier::Id, model::Tags};

/// Arbitrary name-value properties attached to a model item, in document order.
pub type Properties = IndexMap<String, String>;

/// An architectural perspective (e.g. "Security") applied to a model item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perspective {
    name: String,
    description: String,
}

impl Perspective {
    /// Create a new Perspective.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Common behaviour of every element and relationship in a model.
///
/// Each model item carries an ID that is unique across the whole model, an
/// ordered set of tags, free-form properties and perspectives.
pub trait ModelItem {
    /// The item's unique identifier.
    fn id(&self) -> Id;

    /// The item's tags, in insertion order.
    fn tags(&self) -> &Tags;

    /// Mutable access to the item's tags.
    fn tags_mut(&mut self) -> &mut Tags;

    /// The item's name-value properties.
    fn properties(&self) -> &Properties;

    /// Mutable access to the item's properties.
    fn properties_mut(&mut self) -> &mut Properties;

    /// The perspectives applied to this item.
    fn perspectives(&self) -> &[Perspective];

    /// Returns `true` if the item carries the given tag.
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(tag)
    }

    /// Add a tag, keeping existing order.
    fn add_tag(&mut self, tag: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        self.tags_mut().add(tag)
    }

    /// Set or replace a property.
    fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>)
    where
        Self: Sized,
    {
        self.properties_mut().insert(name.into(), value.into());
    }
}
