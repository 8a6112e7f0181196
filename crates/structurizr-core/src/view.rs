//! Views: named projections of model elements into diagrams.
//!
//! A [`View`] holds the settings shared by every diagram (key, description,
//! paper size, layout) and the IDs of the elements and relationships it
//! shows. What the diagram is about is captured by the closed [`ViewKind`]
//! variant. Views never own model items; every operation that needs to know
//! about an element takes the [`Model`] it resolves against.

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{ElementKind, ElementType, Model, ModelItem},
};

/// A fieldless enum written in documents as the name of its variant.
macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident { $first:ident $(, $rest:ident)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $first,
            $($rest,)*
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$rest => stringify!($rest),)*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    stringify!($first) => Ok(Self::$first),
                    $(stringify!($rest) => Ok(Self::$rest),)*
                    _ => Err(concat!(
                        "expected one of `",
                        stringify!($first),
                        "`",
                        $(", `", stringify!($rest), "`",)*
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod configuration;
mod dynamic_view;
mod element_view;
mod filtered_view;
mod layout;
mod styles;
mod view_set;

pub use configuration::{Branding, Configuration, Font, Terminology, ViewSortOrder};
pub use dynamic_view::{DynamicView, SequenceNumber};
pub use element_view::{Animation, ElementView, RelationshipView};
pub use filtered_view::{FilterMode, FilteredView};
pub use layout::{AutomaticLayout, Orientation, PaperSize, RankDirection, Routing, Vertex};
pub use styles::{Border, Color, ElementStyle, RelationshipStyle, Shape, Styles};
pub use view_set::ViewSet;

/// Fieldless discriminant of [`ViewKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    SystemLandscape,
    SystemContext,
    Container,
    Component,
    Deployment,
}

impl ViewType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SystemLandscape => "system landscape view",
            Self::SystemContext => "system context view",
            Self::Container => "container view",
            Self::Component => "component view",
            Self::Deployment => "deployment view",
        }
    }
}

/// What a view shows.
///
/// Boundary flags are `None` when a document did not specify them, so that
/// they are not written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// People and software systems across the enterprise.
    SystemLandscape {
        enterprise_boundary_visible: Option<bool>,
    },
    /// A software system and the people and systems around it.
    SystemContext {
        software_system_id: Id,
        enterprise_boundary_visible: Option<bool>,
    },
    /// The containers of a software system.
    Container {
        software_system_id: Id,
        external_software_system_boundaries_visible: Option<bool>,
    },
    /// The components of a container.
    Component {
        container_id: Id,
        external_container_boundaries_visible: Option<bool>,
    },
    /// Deployment nodes and instances, optionally scoped to one software
    /// system and one environment.
    Deployment {
        software_system_id: Option<Id>,
        environment: Option<String>,
    },
}

impl ViewKind {
    pub fn view_type(&self) -> ViewType {
        match self {
            Self::SystemLandscape { .. } => ViewType::SystemLandscape,
            Self::SystemContext { .. } => ViewType::SystemContext,
            Self::Container { .. } => ViewType::Container,
            Self::Component { .. } => ViewType::Component,
            Self::Deployment { .. } => ViewType::Deployment,
        }
    }
}

/// A diagram definition.
///
/// # Examples
///
/// ```
/// use structurizr_core::model::Model;
/// use structurizr_core::view::{View, ViewKind};
///
/// let mut model = Model::new();
/// let user = model.add_person("User", "").unwrap();
/// let shop = model.add_software_system("Shop", "").unwrap();
/// model.uses(user, shop, "Buys from").unwrap();
///
/// let mut view = View::new(
///     "context",
///     "",
///     ViewKind::SystemContext {
///         software_system_id: shop,
///         enterprise_boundary_visible: None,
///     },
/// )
/// .unwrap();
/// view.add_default_elements(&model).unwrap();
///
/// assert!(view.contains_element(user));
/// assert_eq!(view.relationship_views().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    key: String,
    description: String,
    title: String,
    paper_size: Option<PaperSize>,
    automatic_layout: Option<AutomaticLayout>,
    elements: IndexMap<Id, ElementView>,
    relationships: IndexMap<Id, RelationshipView>,
    animations: Vec<Animation>,
    kind: ViewKind,
}

impl View {
    /// Create an empty view.
    ///
    /// The description may be blank.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the key is blank.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        kind: ViewKind,
    ) -> Result<Self, ModelError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ModelError::validation(
                kind.view_type().name(),
                "key",
                "must not be blank",
            ));
        }
        Ok(Self {
            key,
            description: description.into(),
            title: String::new(),
            paper_size: None,
            automatic_layout: None,
            elements: IndexMap::new(),
            relationships: IndexMap::new(),
            animations: Vec::new(),
            kind,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_paper_size(mut self, paper_size: Option<PaperSize>) -> Self {
        self.paper_size = paper_size;
        self
    }

    pub fn with_automatic_layout(mut self, automatic_layout: Option<AutomaticLayout>) -> Self {
        self.automatic_layout = automatic_layout;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn paper_size(&self) -> Option<PaperSize> {
        self.paper_size
    }

    pub fn set_paper_size(&mut self, paper_size: Option<PaperSize>) {
        self.paper_size = paper_size;
    }

    pub fn automatic_layout(&self) -> Option<&AutomaticLayout> {
        self.automatic_layout.as_ref()
    }

    pub fn set_automatic_layout(&mut self, automatic_layout: Option<AutomaticLayout>) {
        self.automatic_layout = automatic_layout;
    }

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    pub fn view_type(&self) -> ViewType {
        self.kind.view_type()
    }

    /// The software system the view is about, if any.
    pub fn software_system_id(&self) -> Option<Id> {
        match &self.kind {
            ViewKind::SystemContext {
                software_system_id, ..
            }
            | ViewKind::Container {
                software_system_id, ..
            } => Some(*software_system_id),
            ViewKind::Deployment {
                software_system_id, ..
            } => *software_system_id,
            ViewKind::SystemLandscape { .. } | ViewKind::Component { .. } => None,
        }
    }

    pub fn element_views(&self) -> impl Iterator<Item = &ElementView> {
        self.elements.values()
    }

    pub fn relationship_views(&self) -> impl Iterator<Item = &RelationshipView> {
        self.relationships.values()
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn contains_element(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn contains_relationship(&self, id: Id) -> bool {
        self.relationships.contains_key(&id)
    }

    /// Insert or replace an element view without consulting the model.
    pub fn insert_element_view(&mut self, element_view: ElementView) {
        self.elements.insert(element_view.id(), element_view);
    }

    /// Insert or replace a relationship view without consulting the model.
    pub fn insert_relationship_view(&mut self, relationship_view: RelationshipView) {
        self.relationships
            .insert(relationship_view.id(), relationship_view);
    }

    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Returns `true` if the element may appear in this kind of view.
    pub fn is_element_allowed(&self, model: &Model, id: Id) -> bool {
        let Some(element) = model.get_element(id) else {
            return false;
        };
        let element_type = element.element_type();
        match &self.kind {
            ViewKind::SystemLandscape { .. } | ViewKind::SystemContext { .. } => matches!(
                element_type,
                ElementType::Person | ElementType::SoftwareSystem
            ),
            ViewKind::Container {
                software_system_id, ..
            } => match element_type {
                ElementType::Person | ElementType::Container => true,
                ElementType::SoftwareSystem => id != *software_system_id,
                _ => false,
            },
            ViewKind::Component { container_id, .. } => match element_type {
                ElementType::Person | ElementType::SoftwareSystem | ElementType::Component => {
                    true
                }
                ElementType::Container => id != *container_id,
                _ => false,
            },
            ViewKind::Deployment {
                software_system_id,
                environment,
            } => {
                if !element_type.is_deployment() {
                    return false;
                }
                let other_environment = environment
                    .as_deref()
                    .is_some_and(|environment| element.environment() != Some(environment));
                if other_environment {
                    return false;
                }
                match (software_system_id, element.kind()) {
                    (Some(system), ElementKind::ContainerInstance(instance)) => model
                        .get_element(instance.element_id())
                        .and_then(|container| container.parent())
                        == Some(*system),
                    _ => true,
                }
            }
        }
    }

    /// Add an element, optionally with its relationships to the elements
    /// already in the view. Adding an element twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] for an unknown ID and
    /// [`ModelError::ElementNotAllowed`] if the element cannot appear in this
    /// kind of view.
    pub fn add_element(
        &mut self,
        model: &Model,
        id: Id,
        add_relationships: bool,
    ) -> Result<(), ModelError> {
        model.element(id)?;
        if !self.is_element_allowed(model, id) {
            return Err(ModelError::ElementNotAllowed {
                view: self.key.clone(),
                id,
            });
        }
        if !self.elements.contains_key(&id) {
            trace!(view = self.key.as_str(), id:%; "Adding element to view");
            self.elements.insert(id, ElementView::new(id));
        }
        if add_relationships {
            self.add_relationships_of(model, id);
        }
        Ok(())
    }

    /// Remove an element and every relationship view touching it.
    ///
    /// Returns `false` if the element was not in the view.
    pub fn remove_element(&mut self, model: &Model, id: Id) -> bool {
        if self.elements.shift_remove(&id).is_none() {
            return false;
        }
        self.relationships.retain(|relationship_id, _| {
            model
                .get_relationship(*relationship_id)
                .is_some_and(|relationship| !relationship.touches(id))
        });
        true
    }

    /// Add a relationship whose endpoints are both in the view.
    ///
    /// Returns `Ok(false)` if an endpoint is missing from the view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] for an unknown relationship ID.
    pub fn add_relationship(&mut self, model: &Model, id: Id) -> Result<bool, ModelError> {
        let relationship = model.relationship(id)?;
        if !self.contains_element(relationship.source_id())
            || !self.contains_element(relationship.destination_id())
        {
            return Ok(false);
        }
        self.relationships
            .entry(id)
            .or_insert_with(|| RelationshipView::new(id));
        Ok(true)
    }

    /// Add an element together with every element of the given types it has
    /// a relationship with, in either direction.
    ///
    /// Neighbours that cannot appear in this kind of view are skipped.
    /// Calling this again with the same arguments changes nothing.
    ///
    /// # Errors
    ///
    /// Fails if the element itself cannot be added.
    pub fn add_nearest_neighbours(
        &mut self,
        model: &Model,
        id: Id,
        element_types: &[ElementType],
    ) -> Result<(), ModelError> {
        self.add_element(model, id, true)?;

        let neighbours: Vec<Id> = model
            .relationships_of(id)
            .map(|relationship| {
                if relationship.source_id() == id {
                    relationship.destination_id()
                } else {
                    relationship.source_id()
                }
            })
            .collect();
        for neighbour in neighbours {
            let wanted = model
                .get_element(neighbour)
                .is_some_and(|element| element_types.contains(&element.element_type()));
            if wanted && self.is_element_allowed(model, neighbour) {
                self.add_element(model, neighbour, true)?;
            }
        }
        Ok(())
    }

    /// Populate the view with the elements it shows by default.
    ///
    /// - system landscape: every person and software system
    /// - system context: the software system and its nearest people and
    ///   software systems
    /// - container: every person, every other software system and the
    ///   containers of the software system
    /// - component: the components of the container
    /// - deployment: see [`add_all_deployment_nodes`](Self::add_all_deployment_nodes)
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the element in scope is missing.
    pub fn add_default_elements(&mut self, model: &Model) -> Result<(), ModelError> {
        match self.kind.clone() {
            ViewKind::SystemLandscape { .. } => {
                let ids = ids_of(model, &[ElementType::Person, ElementType::SoftwareSystem]);
                self.add_all(model, ids)
            }
            ViewKind::SystemContext {
                software_system_id, ..
            } => self.add_nearest_neighbours(
                model,
                software_system_id,
                &[ElementType::Person, ElementType::SoftwareSystem],
            ),
            ViewKind::Container {
                software_system_id, ..
            } => {
                model.element(software_system_id)?;
                let mut ids: Vec<Id> =
                    ids_of(model, &[ElementType::Person, ElementType::SoftwareSystem])
                        .into_iter()
                        .filter(|id| *id != software_system_id)
                        .collect();
                ids.extend(child_ids(model, software_system_id, ElementType::Container));
                self.add_all(model, ids)
            }
            ViewKind::Component { container_id, .. } => {
                model.element(container_id)?;
                let ids = child_ids(model, container_id, ElementType::Component);
                self.add_all(model, ids)
            }
            ViewKind::Deployment { .. } => self.add_all_deployment_nodes(model),
        }
    }

    /// Add every top-level deployment node of the view's environment that
    /// hosts something shown in this view, together with the nested nodes,
    /// infrastructure nodes and instances.
    ///
    /// In a deployment view scoped to a software system only container
    /// instances of that system are shown, and nodes left empty are skipped.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`add_element`](Self::add_element).
    pub fn add_all_deployment_nodes(&mut self, model: &Model) -> Result<(), ModelError> {
        let top_level: Vec<Id> = model
            .elements_of_type(ElementType::DeploymentNode)
            .filter(|node| node.parent().is_none())
            .map(ModelItem::id)
            .collect();
        for node in top_level {
            if self.is_element_allowed(model, node) {
                self.add_node_contents(model, node)?;
            }
        }
        Ok(())
    }

    fn add_node_contents(&mut self, model: &Model, node: Id) -> Result<bool, ModelError> {
        let children: Vec<(Id, ElementType)> = model
            .children(node)
            .map(|child| (child.id(), child.element_type()))
            .collect();

        let mut has_content = false;
        for (child, element_type) in children {
            let shown = match element_type {
                ElementType::DeploymentNode => self.add_node_contents(model, child)?,
                _ if self.is_element_allowed(model, child) => {
                    self.add_element(model, child, true)?;
                    true
                }
                _ => false,
            };
            has_content |= shown;
        }

        if has_content {
            self.add_element(model, node, true)?;
        }
        Ok(has_content)
    }

    /// Copy the paper size (when this view has none), element positions and
    /// relationship vertices from another view, matching items by ID.
    pub fn copy_layout_information_from(&mut self, source: &View) {
        if self.paper_size.is_none() {
            self.paper_size = source.paper_size;
        }
        for (id, element_view) in &mut self.elements {
            if let Some(source_view) = source.elements.get(id) {
                element_view.copy_layout_information_from(source_view);
            }
        }
        for (id, relationship_view) in &mut self.relationships {
            if let Some(source_view) = source.relationships.get(id) {
                relationship_view.copy_layout_information_from(source_view);
            }
        }
    }

    fn add_all(&mut self, model: &Model, ids: Vec<Id>) -> Result<(), ModelError> {
        for id in ids {
            self.add_element(model, id, true)?;
        }
        Ok(())
    }

    fn add_relationships_of(&mut self, model: &Model, id: Id) {
        for relationship in model.relationships_of(id) {
            let other = if relationship.source_id() == id {
                relationship.destination_id()
            } else {
                relationship.source_id()
            };
            if self.elements.contains_key(&other) {
                self.relationships
                    .entry(relationship.id())
                    .or_insert_with(|| RelationshipView::new(relationship.id()));
            }
        }
    }
}

fn ids_of(model: &Model, element_types: &[ElementType]) -> Vec<Id> {
    model
        .elements()
        .filter(|element| element_types.contains(&element.element_type()))
        .map(ModelItem::id)
        .collect()
}

fn child_ids(model: &Model, parent: Id, element_type: ElementType) -> Vec<Id> {
    model
        .children(parent)
        .filter(|child| child.element_type() == element_type)
        .map(ModelItem::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        model: Model,
        user: Id,
        admin: Id,
        shop: Id,
        bank: Id,
        web: Id,
        db: Id,
    }

    fn fixture() -> Fixture {
        let mut model = Model::new();
        let user = model.add_person("User", "").unwrap();
        let admin = model.add_person("Admin", "").unwrap();
        let shop = model.add_software_system("Shop", "").unwrap();
        let bank = model.add_software_system("Bank", "").unwrap();
        let web = model.add_container(shop, "Web", "", "").unwrap();
        let db = model.add_container(shop, "Database", "", "").unwrap();
        model.uses(user, shop, "Buys from").unwrap();
        model.uses(shop, bank, "Takes payments").unwrap();
        model.uses(user, web, "Browses").unwrap();
        model.uses(web, db, "Reads").unwrap();
        Fixture {
            model,
            user,
            admin,
            shop,
            bank,
            web,
            db,
        }
    }

    fn context_view(shop: Id) -> View {
        View::new(
            "context",
            "",
            ViewKind::SystemContext {
                software_system_id: shop,
                enterprise_boundary_visible: None,
            },
        )
        .unwrap()
    }

    fn element_ids(view: &View) -> Vec<Id> {
        view.element_views().map(ElementView::id).collect()
    }

    #[test]
    fn test_blank_key_rejected_blank_description_allowed() {
        let kind = ViewKind::SystemLandscape {
            enterprise_boundary_visible: None,
        };
        assert!(View::new(" ", "", kind.clone()).is_err());
        let view = View::new("landscape", "", kind).unwrap();
        assert_eq!(view.description(), "");
    }

    #[test]
    fn test_context_default_elements() {
        let Fixture {
            model,
            user,
            admin,
            shop,
            bank,
            ..
        } = fixture();
        let mut view = context_view(shop);
        view.add_default_elements(&model).unwrap();

        assert_eq!(element_ids(&view), vec![shop, user, bank]);
        assert!(!view.contains_element(admin));
        assert_eq!(view.relationship_views().count(), 2);
    }

    #[test]
    fn test_nearest_neighbours_is_idempotent() {
        let Fixture { model, shop, .. } = fixture();
        let mut view = context_view(shop);
        let types = [ElementType::Person, ElementType::SoftwareSystem];
        view.add_nearest_neighbours(&model, shop, &types).unwrap();
        let once = view.clone();
        view.add_nearest_neighbours(&model, shop, &types).unwrap();
        assert_eq!(view, once);
    }

    #[test]
    fn test_container_view_rejects_system_in_scope() {
        let Fixture {
            model, shop, web, ..
        } = fixture();
        let mut view = View::new(
            "containers",
            "",
            ViewKind::Container {
                software_system_id: shop,
                external_software_system_boundaries_visible: None,
            },
        )
        .unwrap();
        let err = view.add_element(&model, shop, true).unwrap_err();
        assert!(matches!(err, ModelError::ElementNotAllowed { .. }));

        view.add_default_elements(&model).unwrap();
        assert!(view.contains_element(web));
        assert!(!view.contains_element(shop));
    }

    #[test]
    fn test_add_element_unknown_id() {
        let Fixture { model, shop, .. } = fixture();
        let mut view = context_view(shop);
        assert!(view.add_element(&model, Id::new("999"), true).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_element_drops_relationship_views() {
        let Fixture {
            model,
            user,
            shop,
            bank,
            ..
        } = fixture();
        let mut view = context_view(shop);
        view.add_default_elements(&model).unwrap();

        assert!(view.remove_element(&model, bank));
        assert!(!view.remove_element(&model, bank));
        assert_eq!(view.relationship_views().count(), 1);
        assert!(view.contains_element(user));
    }

    #[test]
    fn test_add_relationship_requires_endpoints() {
        let Fixture {
            model,
            user,
            shop,
            ..
        } = fixture();
        let relationship = model.efferent_relationships(user).next().unwrap().id();
        let mut view = context_view(shop);
        assert!(!view.add_relationship(&model, relationship).unwrap());

        view.add_element(&model, user, false).unwrap();
        view.add_element(&model, shop, false).unwrap();
        assert!(view.add_relationship(&model, relationship).unwrap());
    }

    #[test]
    fn test_component_view_default_elements() {
        let Fixture { mut model, web, db, .. } = fixture();
        let api = model.add_component(web, "Api", "", "").unwrap();
        let mut view = View::new(
            "components",
            "",
            ViewKind::Component {
                container_id: web,
                external_container_boundaries_visible: None,
            },
        )
        .unwrap();
        view.add_default_elements(&model).unwrap();
        assert_eq!(element_ids(&view), vec![api]);
        assert!(view.is_element_allowed(&model, db));
        assert!(!view.is_element_allowed(&model, web));
    }

    #[test]
    fn test_deployment_nodes_without_content_are_skipped() {
        let Fixture {
            mut model,
            shop,
            bank,
            web,
            ..
        } = fixture();
        let live = model.add_deployment_node("Live", "Cluster", "", "").unwrap();
        let node = model.add_child_deployment_node(live, "Pod", "", "").unwrap();
        let instance = model.add_container_instance(node, web, false).unwrap();
        let empty = model.add_deployment_node("Live", "Spare", "", "").unwrap();
        let dev = model.add_deployment_node("Dev", "Laptop", "", "").unwrap();
        model.add_software_system_instance(dev, bank, false).unwrap();

        let mut view = View::new(
            "live",
            "",
            ViewKind::Deployment {
                software_system_id: Some(shop),
                environment: Some("Live".to_string()),
            },
        )
        .unwrap();
        view.add_default_elements(&model).unwrap();

        assert!(view.contains_element(live));
        assert!(view.contains_element(node));
        assert!(view.contains_element(instance));
        assert!(!view.contains_element(empty));
        assert!(!view.contains_element(dev));
    }

    #[test]
    fn test_copy_layout_information() {
        let Fixture {
            model, user, shop, ..
        } = fixture();
        let mut source = context_view(shop).with_paper_size(Some(PaperSize::A5_Portrait));
        source.add_default_elements(&model).unwrap();
        source.insert_element_view(ElementView::new(user).with_position(Some(10), Some(20)));
        let relationship = model.efferent_relationships(user).next().unwrap().id();
        source.insert_relationship_view(
            RelationshipView::new(relationship)
                .with_vertices(vec![Vertex::new(5, 5)])
                .with_routing(Some(Routing::Orthogonal)),
        );

        let mut target = context_view(shop);
        target.add_default_elements(&model).unwrap();
        target.copy_layout_information_from(&source);

        assert_eq!(target.paper_size(), Some(PaperSize::A5_Portrait));
        let user_view = target.element_views().find(|v| v.id() == user).unwrap();
        assert_eq!((user_view.x(), user_view.y()), (Some(10), Some(20)));
        let relationship_view = target
            .relationship_views()
            .find(|v| v.id() == relationship)
            .unwrap();
        assert_eq!(relationship_view.vertices(), &[Vertex::new(5, 5)]);
        assert_eq!(relationship_view.routing(), Some(Routing::Orthogonal));
    }

    #[test]
    fn test_copy_layout_keeps_own_paper_size() {
        let Fixture { shop, .. } = fixture();
        let source = context_view(shop).with_paper_size(Some(PaperSize::A5_Portrait));
        let mut target = context_view(shop).with_paper_size(Some(PaperSize::A3_Landscape));
        target.copy_layout_information_from(&source);
        assert_eq!(target.paper_size(), Some(PaperSize::A3_Landscape));
    }
}
