//! Filtered views: a static view shown with elements and relationships
//! included or excluded by tag.

use indexmap::IndexSet;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{Model, ModelItem, Tags},
    view::View,
};

named_enum! {
    /// Whether a filter keeps or drops the items carrying its tags.
    FilterMode { Include, Exclude }
}

/// A view based on another view, showing only some of its items.
///
/// The base view is referenced by key and resolved through the
/// [`ViewSet`](crate::view::ViewSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    key: String,
    description: String,
    title: String,
    base_view_key: String,
    mode: FilterMode,
    tags: IndexSet<String>,
}

impl FilteredView {
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the key or the base view key is
    /// blank.
    pub fn new<I, S>(
        key: impl Into<String>,
        description: impl Into<String>,
        base_view_key: impl Into<String>,
        mode: FilterMode,
        tags: I,
    ) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        let base_view_key = base_view_key.into();
        if key.trim().is_empty() {
            return Err(ModelError::validation("filtered view", "key", "must not be blank"));
        }
        if base_view_key.trim().is_empty() {
            return Err(ModelError::validation(
                "filtered view",
                "baseViewKey",
                "must not be blank",
            ));
        }
        Ok(Self {
            key,
            description: description.into(),
            title: String::new(),
            base_view_key,
            mode,
            tags: tags.into_iter().map(Into::into).collect(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn base_view_key(&self) -> &str {
        &self.base_view_key
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Returns `true` if an item with these tags passes the filter.
    pub fn accepts(&self, tags: &Tags) -> bool {
        let tagged = tags.iter().any(|tag| self.tags.contains(tag));
        match self.mode {
            FilterMode::Include => tagged,
            FilterMode::Exclude => !tagged,
        }
    }

    /// The elements of the base view that pass the filter, in view order.
    pub fn visible_elements(&self, model: &Model, base: &View) -> Vec<Id> {
        base.element_views()
            .filter_map(|element_view| model.get_element(element_view.id()))
            .filter(|element| self.accepts(element.tags()))
            .map(ModelItem::id)
            .collect()
    }

    /// The relationships of the base view that pass the filter and connect
    /// two visible elements.
    pub fn visible_relationships(&self, model: &Model, base: &View) -> Vec<Id> {
        let elements = self.visible_elements(model, base);
        base.relationship_views()
            .filter_map(|relationship_view| model.get_relationship(relationship_view.id()))
            .filter(|relationship| {
                elements.contains(&relationship.source_id())
                    && elements.contains(&relationship.destination_id())
                    && self.accepts(relationship.tags())
            })
            .map(ModelItem::id)
            .collect()
    }
}
