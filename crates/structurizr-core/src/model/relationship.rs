//! Relationships between model elements.

use std::{fmt, str::FromStr};

use crate::{
    error::ModelError,
    identifier::Id,
    model::{
        ModelItem, Tags,
        item::{Perspective, Properties},
        tags,
    },
};

/// How the source of a relationship interacts with its destination.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionStyle {
    #[default]
    Synchronous,
    Asynchronous,
}

impl InteractionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synchronous => "Synchronous",
            Self::Asynchronous => "Asynchronous",
        }
    }
}

impl FromStr for InteractionStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Synchronous" => Ok(Self::Synchronous),
            "Asynchronous" => Ok(Self::Asynchronous),
            _ => Err("expected one of `Synchronous`, `Asynchronous`"),
        }
    }
}

impl fmt::Display for InteractionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed relationship from a source element to a destination element.
///
/// Both endpoints are weak references: they are plain [`Id`]s resolved
/// against the owning [`Model`](crate::model::Model) on lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    id: Id,
    source_id: Id,
    destination_id: Id,
    description: String,
    technology: String,
    interaction_style: InteractionStyle,
    linked_relationship_id: Option<Id>,
    tags: Tags,
    properties: Properties,
    perspectives: Vec<Perspective>,
}

impl Relationship {
    /// Create a relationship carrying the default `Relationship` tag.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the ID or either endpoint is blank.
    pub fn new(id: Id, source_id: Id, destination_id: Id) -> Result<Self, ModelError> {
        if id.is_blank() {
            return Err(ModelError::validation(
                "relationship",
                "id",
                "must not be blank",
            ));
        }
        if source_id.is_blank() {
            return Err(ModelError::validation(
                "relationship",
                "sourceId",
                format!("must not be blank (relationship `{id}`)"),
            ));
        }
        if destination_id.is_blank() {
            return Err(ModelError::validation(
                "relationship",
                "destinationId",
                format!("must not be blank (relationship `{id}`)"),
            ));
        }

        Ok(Self {
            id,
            source_id,
            destination_id,
            description: String::new(),
            technology: String::new(),
            interaction_style: InteractionStyle::default(),
            linked_relationship_id: None,
            tags: Tags::from_iter([tags::RELATIONSHIP]),
            properties: Properties::new(),
            perspectives: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn with_interaction_style(mut self, interaction_style: InteractionStyle) -> Self {
        self.interaction_style = interaction_style;
        self
    }

    pub fn with_linked_relationship_id(mut self, linked: Option<Id>) -> Self {
        self.linked_relationship_id = linked;
        self
    }

    /// Replace the relationship's tags.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_perspectives(mut self, perspectives: Vec<Perspective>) -> Self {
        self.perspectives = perspectives;
        self
    }

    pub fn source_id(&self) -> Id {
        self.source_id
    }

    pub fn destination_id(&self) -> Id {
        self.destination_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn technology(&self) -> &str {
        &self.technology
    }

    pub fn interaction_style(&self) -> InteractionStyle {
        self.interaction_style
    }

    /// The relationship this one was replicated from, if any.
    pub fn linked_relationship_id(&self) -> Option<Id> {
        self.linked_relationship_id
    }

    /// Returns `true` if the relationship connects `element` in either direction.
    pub fn touches(&self, element: Id) -> bool {
        self.source_id == element || self.destination_id == element
    }
}

impl ModelItem for Relationship {
    fn id(&self) -> Id {
        self.id
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn perspectives(&self) -> &[Perspective] {
        &self.perspectives
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} `{}` ({})",
            self.source_id, self.destination_id, self.description, self.id
        )
    }
}

/// Options for [`Model::add_relationship`](crate::model::Model::add_relationship).
///
/// # Examples
///
/// ```
/// use structurizr_core::model::{InteractionStyle, NewRelationship};
///
/// let options = NewRelationship::new("Reads from")
///     .with_technology("SQL")
///     .with_interaction_style(InteractionStyle::Asynchronous);
/// assert_eq!(options.description(), "Reads from");
/// ```
#[derive(Debug, Default, Clone)]
pub struct NewRelationship {
    description: String,
    technology: String,
    interaction_style: InteractionStyle,
    tags: Vec<String>,
    properties: Properties,
    suppress_implied: bool,
}

impl NewRelationship {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn with_interaction_style(mut self, interaction_style: InteractionStyle) -> Self {
        self.interaction_style = interaction_style;
        self
    }

    /// Add tags applied after the default `Relationship` tag.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Do not derive implied relationships from this one.
    pub fn without_implied(mut self) -> Self {
        self.suppress_implied = true;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn suppress_implied(&self) -> bool {
        self.suppress_implied
    }

    /// Build a relationship from these options.
    pub(crate) fn build(self, id: Id, source: Id, destination: Id) -> Result<Relationship, ModelError> {
        let mut relationship = Relationship::new(id, source, destination)?
            .with_description(self.description)
            .with_technology(self.technology)
            .with_interaction_style(self.interaction_style)
            .with_properties(self.properties);
        relationship.tags_mut().extend(self.tags);
        Ok(relationship)
    }

    /// Options that reproduce `relationship` between a different pair of
    /// elements, without deriving further implied relationships.
    pub(crate) fn cloned_from(relationship: &Relationship) -> Self {
        Self {
            description: relationship.description.clone(),
            technology: relationship.technology.clone(),
            interaction_style: relationship.interaction_style,
            tags: relationship.tags.iter().map(str::to_owned).collect(),
            properties: relationship.properties.clone(),
            suppress_implied: true,
        }
    }
}
