//! The software architecture model of a workspace.
//!
//! A [`Model`] owns every element and relationship of a workspace, keyed by
//! [`Id`] in insertion order. Structure is expressed by parent IDs stored on
//! child elements and by the endpoint IDs of relationships; nothing in the
//! model holds a reference to another item, so lookups always go through the
//! model.
//!
//! The module is organized into several layers:
//! - **Model items**: [`Element`] with its [`ElementKind`] variants and
//!   [`Relationship`], both implementing [`ModelItem`]
//! - **Mutation**: the `add_*` methods validate names and parents, and
//!   [`Model::add_relationship`] avoids duplicates and derives implied
//!   relationships according to the [`ImpliedRelationshipStrategy`]
//! - **Deployment**: container and software system instances with optional
//!   relationship replication (see [`deployment`])

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{error::ModelError, identifier::Id};

pub mod deployment;
mod element;
mod id_generator;
mod implied;
mod item;
mod relationship;
pub mod tags;

pub use element::{
    DEFAULT_DEPLOYMENT_ENVIRONMENT, DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS,
    DEFAULT_HEALTH_CHECK_TIMEOUT_MILLISECONDS, Element, ElementKind, ElementType, HttpHealthCheck,
    Instance, Location,
};
pub use id_generator::SequentialIdGenerator;
pub use implied::ImpliedRelationshipStrategy;
pub use item::{ModelItem, Perspective, Properties};
pub use relationship::{InteractionStyle, NewRelationship, Relationship};
pub use tags::Tags;

/// The enterprise boundary drawn around internal people and software systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enterprise {
    name: String,
}

impl Enterprise {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Elements and relationships of a workspace.
///
/// # Examples
///
/// ```
/// use structurizr_core::model::{Model, ModelItem};
///
/// let mut model = Model::new();
/// let user = model.add_person("User", "A user").unwrap();
/// let system = model.add_software_system("Shop", "Sells things").unwrap();
///
/// let uses = model.uses(user, system, "Buys from").unwrap();
/// assert!(uses.is_some());
///
/// // Adding the same relationship again is a no-op.
/// assert_eq!(model.uses(user, system, "Buys from").unwrap(), None);
/// assert_eq!(model.relationships().count(), 1);
///
/// assert_eq!(model.element(user).unwrap().name(), "User");
/// assert!(model.element("404".into()).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Model {
    enterprise: Option<Enterprise>,
    elements: IndexMap<Id, Element>,
    relationships: IndexMap<Id, Relationship>,
    id_generator: SequentialIdGenerator,
    implied_relationship_strategy: ImpliedRelationshipStrategy,
}

impl PartialEq for Model {
    /// Models are equal when they hold the same enterprise, elements and
    /// relationships; the ID generator state and strategy are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.enterprise == other.enterprise
            && self.elements == other.elements
            && self.relationships == other.relationships
    }
}

impl Eq for Model {}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enterprise(&self) -> Option<&Enterprise> {
        self.enterprise.as_ref()
    }

    pub fn set_enterprise(&mut self, enterprise: Option<Enterprise>) {
        self.enterprise = enterprise;
    }

    pub fn implied_relationship_strategy(&self) -> ImpliedRelationshipStrategy {
        self.implied_relationship_strategy
    }

    /// Set the strategy applied by [`add_relationship`](Self::add_relationship).
    pub fn set_implied_relationship_strategy(&mut self, strategy: ImpliedRelationshipStrategy) {
        self.implied_relationship_strategy = strategy;
    }

    /// Returns `true` if the model has neither elements nor relationships.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.relationships.is_empty()
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// All relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    /// Elements of one type, in insertion order.
    pub fn elements_of_type(&self, element_type: ElementType) -> impl Iterator<Item = &Element> {
        self.elements
            .values()
            .filter(move |element| element.element_type() == element_type)
    }

    pub fn people(&self) -> impl Iterator<Item = &Element> {
        self.elements_of_type(ElementType::Person)
    }

    pub fn software_systems(&self) -> impl Iterator<Item = &Element> {
        self.elements_of_type(ElementType::SoftwareSystem)
    }

    /// Returns `true` if an element or relationship uses the ID.
    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id) || self.relationships.contains_key(&id)
    }

    /// Resolve an element reference.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if no element has this ID.
    pub fn element(&self, id: Id) -> Result<&Element, ModelError> {
        self.elements.get(&id).ok_or(ModelError::NotFound { id })
    }

    /// Mutable variant of [`element`](Self::element).
    pub fn element_mut(&mut self, id: Id) -> Result<&mut Element, ModelError> {
        self.elements.get_mut(&id).ok_or(ModelError::NotFound { id })
    }

    pub fn get_element(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Resolve a relationship reference.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if no relationship has this ID.
    pub fn relationship(&self, id: Id) -> Result<&Relationship, ModelError> {
        self.relationships
            .get(&id)
            .ok_or(ModelError::NotFound { id })
    }

    pub fn relationship_mut(&mut self, id: Id) -> Result<&mut Relationship, ModelError> {
        self.relationships
            .get_mut(&id)
            .ok_or(ModelError::NotFound { id })
    }

    pub fn get_relationship(&self, id: Id) -> Option<&Relationship> {
        self.relationships.get(&id)
    }

    /// Issue a fresh ID that is not used by any element or relationship.
    pub fn next_id(&mut self) -> Id {
        loop {
            let id = self.id_generator.generate();
            if !self.contains(id) {
                return id;
            }
        }
    }

    /// Insert a fully built element.
    ///
    /// The element's ID must be unused, and its parent (or the element an
    /// instance refers to) must already be in the model with the right type.
    /// Use [`next_id`](Self::next_id) to obtain an ID for a new element.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if the ID is taken,
    /// [`ModelError::NotFound`] if a referenced element is missing and
    /// [`ModelError::InvalidReference`] if it has the wrong type.
    pub fn insert_element(&mut self, element: Element) -> Result<Id, ModelError> {
        let id = element.id();
        if self.contains(id) {
            return Err(ModelError::DuplicateId { id });
        }
        self.check_references(&element)?;

        trace!(id:%, kind = element.element_type().name(); "Inserting element");
        self.id_generator.found(id);
        self.elements.insert(id, element);
        Ok(id)
    }

    /// Insert a fully built relationship.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if the ID is taken and
    /// [`ModelError::NotFound`] if either endpoint or the linked relationship
    /// does not exist.
    pub fn insert_relationship(&mut self, relationship: Relationship) -> Result<Id, ModelError> {
        let id = relationship.id();
        if self.contains(id) {
            return Err(ModelError::DuplicateId { id });
        }
        self.element(relationship.source_id())?;
        self.element(relationship.destination_id())?;
        if let Some(linked) = relationship.linked_relationship_id() {
            self.relationship(linked)?;
        }

        trace!(
            id:%,
            source:% = relationship.source_id(),
            destination:% = relationship.destination_id();
            "Inserting relationship"
        );
        self.id_generator.found(id);
        self.relationships.insert(id, relationship);
        Ok(id)
    }

    /// Add a person.
    ///
    /// # Errors
    ///
    /// Fails if the name is blank or another person has the same name.
    pub fn add_person(&mut self, name: &str, description: &str) -> Result<Id, ModelError> {
        self.ensure_unique_name(None, ElementType::Person, name)?;
        self.add_element(
            name,
            description,
            ElementKind::Person {
                location: Location::default(),
            },
        )
    }

    /// Add a software system.
    ///
    /// # Errors
    ///
    /// Fails if the name is blank or another software system has the same
    /// name.
    pub fn add_software_system(&mut self, name: &str, description: &str) -> Result<Id, ModelError> {
        self.ensure_unique_name(None, ElementType::SoftwareSystem, name)?;
        self.add_element(
            name,
            description,
            ElementKind::SoftwareSystem {
                location: Location::default(),
            },
        )
    }

    /// Add a container to a software system.
    ///
    /// # Errors
    ///
    /// Fails if the parent is not a software system, the name is blank or a
    /// sibling container has the same name.
    pub fn add_container(
        &mut self,
        software_system: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        self.ensure_unique_name(Some(software_system), ElementType::Container, name)?;
        self.add_element(
            name,
            description,
            ElementKind::Container {
                parent: software_system,
                technology: technology.to_owned(),
            },
        )
    }

    /// Add a component to a container.
    ///
    /// # Errors
    ///
    /// Fails if the parent is not a container, the name is blank or a sibling
    /// component has the same name.
    pub fn add_component(
        &mut self,
        container: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        self.ensure_unique_name(Some(container), ElementType::Component, name)?;
        self.add_element(
            name,
            description,
            ElementKind::Component {
                parent: container,
                technology: technology.to_owned(),
                size: None,
            },
        )
    }

    /// Build and insert an element with a generated ID.
    pub(crate) fn add_element(
        &mut self,
        name: &str,
        description: &str,
        kind: ElementKind,
    ) -> Result<Id, ModelError> {
        let element = Element::new(self.next_id(), name, kind)?.with_description(description);
        let id = self.insert_element(element)?;
        debug!(id:%, name; "Added element");
        Ok(id)
    }

    /// Add a relationship unless an identical one already exists.
    ///
    /// An existing relationship with the same source, destination and
    /// description makes this call a no-op returning `Ok(None)`. Otherwise the
    /// relationship is inserted with a generated ID and, unless the options
    /// say [`without_implied`](NewRelationship::without_implied), implied
    /// relationships are derived with the model's strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if either endpoint does not exist.
    pub fn add_relationship(
        &mut self,
        source: Id,
        destination: Id,
        options: NewRelationship,
    ) -> Result<Option<Id>, ModelError> {
        self.element(source)?;
        self.element(destination)?;

        if self.has_relationship(source, destination, Some(options.description())) {
            trace!(source:%, destination:%; "Skipping duplicate relationship");
            return Ok(None);
        }

        let suppress_implied = options.suppress_implied();
        let relationship = options.build(self.next_id(), source, destination)?;
        let id = self.insert_relationship(relationship)?;
        debug!(id:%, source:%, destination:%; "Added relationship");

        if !suppress_implied {
            self.create_implied_relationships(id)?;
        }
        Ok(Some(id))
    }

    /// Shorthand for a relationship with only a description.
    pub fn uses(
        &mut self,
        source: Id,
        destination: Id,
        description: &str,
    ) -> Result<Option<Id>, ModelError> {
        self.add_relationship(source, destination, NewRelationship::new(description))
    }

    /// Returns `true` if a relationship from `source` to `destination`
    /// exists, optionally restricted to the given description.
    pub fn has_relationship(&self, source: Id, destination: Id, description: Option<&str>) -> bool {
        self.efferent_relationships(source).any(|relationship| {
            relationship.destination_id() == destination
                && description.is_none_or(|description| relationship.description() == description)
        })
    }

    /// Relationships starting or ending at the element.
    pub fn relationships_of(&self, id: Id) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .values()
            .filter(move |relationship| relationship.touches(id))
    }

    /// Relationships whose source is the element.
    pub fn efferent_relationships(&self, id: Id) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .values()
            .filter(move |relationship| relationship.source_id() == id)
    }

    /// Relationships whose destination is the element.
    pub fn afferent_relationships(&self, id: Id) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .values()
            .filter(move |relationship| relationship.destination_id() == id)
    }

    /// Direct children of the element, in insertion order.
    pub fn children(&self, id: Id) -> impl Iterator<Item = &Element> {
        self.elements
            .values()
            .filter(move |element| element.parent() == Some(id))
    }

    /// The parent chain of an element, nearest first, excluding the element.
    pub fn ancestors(&self, id: Id) -> Vec<Id> {
        let mut ancestors = Vec::new();
        let mut current = self.get_element(id).and_then(Element::parent);
        while let Some(parent) = current {
            if ancestors.contains(&parent) {
                break;
            }
            ancestors.push(parent);
            current = self.get_element(parent).and_then(Element::parent);
        }
        ancestors
    }

    /// Returns `true` if `ancestor` appears in the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: Id, id: Id) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    fn ensure_unique_name(
        &self,
        parent: Option<Id>,
        element_type: ElementType,
        name: &str,
    ) -> Result<(), ModelError> {
        let taken = self.elements.values().any(|element| {
            element.element_type() == element_type
                && element.parent() == parent
                && element.name() == name
        });
        if taken {
            return Err(ModelError::DuplicateName {
                kind: element_type.name(),
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    fn check_references(&self, element: &Element) -> Result<(), ModelError> {
        let expected_parent = match element.kind() {
            ElementKind::Person { .. } | ElementKind::SoftwareSystem { .. } => None,
            ElementKind::Container { .. } => Some(ElementType::SoftwareSystem),
            ElementKind::Component { .. } => Some(ElementType::Container),
            ElementKind::DeploymentNode { .. }
            | ElementKind::InfrastructureNode { .. }
            | ElementKind::ContainerInstance(_)
            | ElementKind::SoftwareSystemInstance(_) => Some(ElementType::DeploymentNode),
        };
        if let (Some(expected), Some(parent)) = (expected_parent, element.parent()) {
            self.check_reference(element, parent, expected)?;
        }

        match element.kind() {
            ElementKind::ContainerInstance(instance) => {
                self.check_reference(element, instance.element_id(), ElementType::Container)
            }
            ElementKind::SoftwareSystemInstance(instance) => self.check_reference(
                element,
                instance.element_id(),
                ElementType::SoftwareSystem,
            ),
            _ => Ok(()),
        }
    }

    fn check_reference(
        &self,
        element: &Element,
        target: Id,
        expected: ElementType,
    ) -> Result<(), ModelError> {
        let found = self.element(target)?;
        if found.element_type() != expected {
            return Err(ModelError::InvalidReference {
                kind: element.element_type().name(),
                id: element.id(),
                target,
                expected: expected.name(),
            });
        }
        Ok(())
    }
}
