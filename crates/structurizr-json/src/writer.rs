//! Writing a [`Workspace`] as a Structurizr JSON document.
//!
//! The workspace is mapped onto borrowed document structs that mirror the
//! JSON layout: containers nested in software systems, components in
//! containers, deployment elements in their deployment node, and every
//! relationship under its source element. Fields that hold no value are left
//! out, so a document read and written again keeps its shape.

use log::debug;
use serde::Serialize;
use serde_json::Value;
use structurizr_core::{
    Id, Workspace,
    model::{
        Element, ElementKind, ElementType, HttpHealthCheck, InteractionStyle, Location, Model,
        ModelItem, Perspective, Properties, Relationship,
    },
    view::{
        Animation, AutomaticLayout, Branding, Color, Configuration, DynamicView, ElementStyle,
        ElementView, FilteredView, RelationshipStyle, RelationshipView, Terminology, View,
        ViewKind, ViewSet, ViewType,
    },
};

/// Write a workspace as compact JSON.
///
/// # Errors
///
/// Returns an error if serialisation fails, which only happens for opaque
/// sections that cannot be represented as JSON.
pub fn write_workspace(workspace: &Workspace) -> Result<String, serde_json::Error> {
    let text = serde_json::to_string(&WorkspaceDoc::new(workspace))?;
    debug!(workspace_id = workspace.id(), bytes = text.len(); "Wrote workspace document");
    Ok(text)
}

/// Write a workspace as indented JSON.
///
/// # Errors
///
/// See [`write_workspace`].
pub fn write_workspace_pretty(workspace: &Workspace) -> Result<String, serde_json::Error> {
    let text = serde_json::to_string_pretty(&WorkspaceDoc::new(workspace))?;
    debug!(workspace_id = workspace.id(), bytes = text.len(); "Wrote workspace document");
    Ok(text)
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|value| !value.is_empty())
}

fn non_empty_map(map: &Properties) -> Option<&Properties> {
    Some(map).filter(|map| !map.is_empty())
}

fn non_empty_slice<T>(items: &[T]) -> Option<&[T]> {
    Some(items).filter(|items| !items.is_empty())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceDoc<'a> {
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified_user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified_agent: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<ModelDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    views: Option<ViewSetDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documentation: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    configuration: Option<&'a Value>,
}

impl<'a> WorkspaceDoc<'a> {
    fn new(workspace: &'a Workspace) -> Self {
        let model = workspace.model();
        let views = workspace.views();
        Self {
            id: workspace.id(),
            name: non_empty(workspace.name()),
            description: non_empty(workspace.description()),
            version: workspace.version(),
            revision: workspace.revision(),
            thumbnail: workspace.thumbnail(),
            last_modified_date: workspace.last_modified_date(),
            last_modified_user: workspace.last_modified_user(),
            last_modified_agent: workspace.last_modified_agent(),
            model: (!model.is_empty() || model.enterprise().is_some())
                .then(|| ModelDoc::new(model)),
            views: (!views.is_empty()).then(|| ViewSetDoc::new(model, views)),
            documentation: workspace.documentation(),
            configuration: workspace.configuration(),
        }
    }
}

// =============================================================================
// Model
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelDoc<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    enterprise: Option<EnterpriseDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    people: Vec<PersonDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    software_systems: Vec<SoftwareSystemDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    deployment_nodes: Vec<DeploymentNodeDoc<'a>>,
}

impl<'a> ModelDoc<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            enterprise: model
                .enterprise()
                .map(|enterprise| EnterpriseDoc { name: enterprise.name() }),
            people: model
                .people()
                .map(|person| PersonDoc {
                    base: ElementBase::new(model, person),
                    location: location(person),
                })
                .collect(),
            software_systems: model
                .software_systems()
                .map(|system| SoftwareSystemDoc::new(model, system))
                .collect(),
            deployment_nodes: model
                .elements_of_type(ElementType::DeploymentNode)
                .filter(|node| node.parent().is_none())
                .map(|node| DeploymentNodeDoc::new(model, node))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct EnterpriseDoc<'a> {
    name: &'a str,
}

/// The fields every element shares, flattened into the element's object.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementBase<'a> {
    id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Properties>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    perspectives: Vec<PerspectiveDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<RelationshipDoc<'a>>,
}

impl<'a> ElementBase<'a> {
    fn new(model: &'a Model, element: &'a Element) -> Self {
        // Instances are named after the element they instantiate.
        let name = match element.kind() {
            ElementKind::ContainerInstance(_) | ElementKind::SoftwareSystemInstance(_) => None,
            _ => Some(element.name()),
        };
        Self {
            id: element.id(),
            name,
            description: non_empty(element.description()),
            url: element.url(),
            group: element.group(),
            tags: Some(element.tags().to_string()).filter(|tags| !tags.is_empty()),
            properties: non_empty_map(element.properties()),
            perspectives: perspectives(element.perspectives()),
            relationships: model
                .efferent_relationships(element.id())
                .map(RelationshipDoc::new)
                .collect(),
        }
    }
}

fn location(element: &Element) -> Option<&'static str> {
    element
        .kind()
        .location()
        .filter(|location| *location != Location::Unspecified)
        .map(|location| location.as_str())
}

fn technology(element: &Element) -> Option<&str> {
    element.technology().and_then(non_empty)
}

#[derive(Serialize)]
struct PerspectiveDoc<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

fn perspectives(perspectives: &[Perspective]) -> Vec<PerspectiveDoc<'_>> {
    perspectives
        .iter()
        .map(|perspective| PerspectiveDoc {
            name: perspective.name(),
            description: non_empty(perspective.description()),
        })
        .collect()
}

#[derive(Serialize)]
struct PersonDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'static str>,
}

#[derive(Serialize)]
struct SoftwareSystemDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    containers: Vec<ContainerDoc<'a>>,
}

impl<'a> SoftwareSystemDoc<'a> {
    fn new(model: &'a Model, system: &'a Element) -> Self {
        Self {
            base: ElementBase::new(model, system),
            location: location(system),
            containers: model
                .children(system.id())
                .filter(|child| child.element_type() == ElementType::Container)
                .map(|container| ContainerDoc::new(model, container))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct ContainerDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technology: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<ComponentDoc<'a>>,
}

impl<'a> ContainerDoc<'a> {
    fn new(model: &'a Model, container: &'a Element) -> Self {
        Self {
            base: ElementBase::new(model, container),
            technology: technology(container),
            components: model
                .children(container.id())
                .filter(|child| child.element_type() == ElementType::Component)
                .map(|component| ComponentDoc {
                    base: ElementBase::new(model, component),
                    technology: technology(component),
                    size: match component.kind() {
                        ElementKind::Component { size, .. } => *size,
                        _ => None,
                    },
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct ComponentDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technology: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentNodeDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technology: Option<&'a str>,
    instances: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<DeploymentNodeDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    infrastructure_nodes: Vec<InfrastructureNodeDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    container_instances: Vec<InstanceDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    software_system_instances: Vec<InstanceDoc<'a>>,
}

impl<'a> DeploymentNodeDoc<'a> {
    fn new(model: &'a Model, node: &'a Element) -> Self {
        let children_of_type = |element_type: ElementType| {
            model
                .children(node.id())
                .filter(move |child| child.element_type() == element_type)
        };
        Self {
            base: ElementBase::new(model, node),
            environment: node.environment(),
            technology: technology(node),
            instances: match node.kind() {
                ElementKind::DeploymentNode { instances, .. } => *instances,
                _ => 1,
            },
            children: children_of_type(ElementType::DeploymentNode)
                .map(|child| DeploymentNodeDoc::new(model, child))
                .collect(),
            infrastructure_nodes: children_of_type(ElementType::InfrastructureNode)
                .map(|infrastructure| InfrastructureNodeDoc {
                    base: ElementBase::new(model, infrastructure),
                    environment: infrastructure.environment(),
                    technology: technology(infrastructure),
                })
                .collect(),
            container_instances: children_of_type(ElementType::ContainerInstance)
                .filter_map(|instance| InstanceDoc::new(model, instance))
                .collect(),
            software_system_instances: children_of_type(ElementType::SoftwareSystemInstance)
                .filter_map(|instance| InstanceDoc::new(model, instance))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct InfrastructureNodeDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technology: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstanceDoc<'a> {
    #[serde(flatten)]
    base: ElementBase<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    software_system_id: Option<Id>,
    instance_id: u32,
    environment: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    health_checks: Vec<HealthCheckDoc<'a>>,
}

impl<'a> InstanceDoc<'a> {
    fn new(model: &'a Model, element: &'a Element) -> Option<Self> {
        let instance = element.kind().instance()?;
        let target = instance.element_id();
        let (container_id, software_system_id) = match element.element_type() {
            ElementType::ContainerInstance => (Some(target), None),
            _ => (None, Some(target)),
        };
        Some(Self {
            base: ElementBase::new(model, element),
            container_id,
            software_system_id,
            instance_id: instance.instance_id(),
            environment: instance.environment(),
            health_checks: instance
                .health_checks()
                .iter()
                .map(HealthCheckDoc::new)
                .collect(),
        })
    }
}

#[derive(Serialize)]
struct HealthCheckDoc<'a> {
    name: &'a str,
    url: &'a str,
    interval: u32,
    timeout: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<&'a Properties>,
}

impl<'a> HealthCheckDoc<'a> {
    fn new(health_check: &'a HttpHealthCheck) -> Self {
        Self {
            name: health_check.name(),
            url: health_check.url(),
            interval: health_check.interval(),
            timeout: health_check.timeout(),
            headers: non_empty_map(health_check.headers()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipDoc<'a> {
    id: Id,
    source_id: Id,
    destination_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technology: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interaction_style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linked_relationship_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Properties>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    perspectives: Vec<PerspectiveDoc<'a>>,
}

impl<'a> RelationshipDoc<'a> {
    fn new(relationship: &'a Relationship) -> Self {
        Self {
            id: relationship.id(),
            source_id: relationship.source_id(),
            destination_id: relationship.destination_id(),
            description: non_empty(relationship.description()),
            technology: non_empty(relationship.technology()),
            interaction_style: match relationship.interaction_style() {
                InteractionStyle::Synchronous => None,
                style => Some(style.as_str()),
            },
            linked_relationship_id: relationship.linked_relationship_id(),
            tags: Some(relationship.tags().to_string()).filter(|tags| !tags.is_empty()),
            properties: non_empty_map(relationship.properties()),
            perspectives: perspectives(relationship.perspectives()),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewSetDoc<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    system_landscape_views: Vec<ViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    system_context_views: Vec<ViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    container_views: Vec<ViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    component_views: Vec<ViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    deployment_views: Vec<ViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dynamic_views: Vec<DynamicViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    filtered_views: Vec<FilteredViewDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    configuration: Option<ConfigurationDoc<'a>>,
}

impl<'a> ViewSetDoc<'a> {
    fn new(model: &'a Model, views: &'a ViewSet) -> Self {
        let of_type = |view_type: ViewType| -> Vec<ViewDoc<'a>> {
            views
                .views()
                .filter(|view| view.view_type() == view_type)
                .map(|view| ViewDoc::new(model, view))
                .collect()
        };
        Self {
            system_landscape_views: of_type(ViewType::SystemLandscape),
            system_context_views: of_type(ViewType::SystemContext),
            container_views: of_type(ViewType::Container),
            component_views: of_type(ViewType::Component),
            deployment_views: of_type(ViewType::Deployment),
            dynamic_views: views.dynamic_views().map(DynamicViewDoc::new).collect(),
            filtered_views: views.filtered_views().map(FilteredViewDoc::new).collect(),
            configuration: views.configuration().map(ConfigurationDoc::new),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewDoc<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    software_system_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enterprise_boundary_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_software_system_boundaries_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_container_boundaries_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paper_size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    automatic_layout: Option<AutomaticLayoutDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    elements: Vec<ElementViewDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<RelationshipViewDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    animations: Vec<AnimationDoc<'a>>,
}

impl<'a> ViewDoc<'a> {
    fn new(model: &'a Model, view: &'a View) -> Self {
        let mut doc = Self {
            key: view.key(),
            description: non_empty(view.description()),
            title: non_empty(view.title()),
            software_system_id: None,
            container_id: None,
            environment: None,
            enterprise_boundary_visible: None,
            external_software_system_boundaries_visible: None,
            external_container_boundaries_visible: None,
            paper_size: view.paper_size().map(|paper_size| paper_size.as_str()),
            automatic_layout: view.automatic_layout().map(AutomaticLayoutDoc::new),
            elements: view.element_views().map(ElementViewDoc::new).collect(),
            relationships: view
                .relationship_views()
                .map(RelationshipViewDoc::new)
                .collect(),
            animations: view.animations().iter().map(AnimationDoc::new).collect(),
        };
        match view.kind() {
            ViewKind::SystemLandscape {
                enterprise_boundary_visible,
            } => {
                doc.enterprise_boundary_visible = *enterprise_boundary_visible;
            }
            ViewKind::SystemContext {
                software_system_id,
                enterprise_boundary_visible,
            } => {
                doc.software_system_id = Some(*software_system_id);
                doc.enterprise_boundary_visible = *enterprise_boundary_visible;
            }
            ViewKind::Container {
                software_system_id,
                external_software_system_boundaries_visible,
            } => {
                doc.software_system_id = Some(*software_system_id);
                doc.external_software_system_boundaries_visible =
                    *external_software_system_boundaries_visible;
            }
            ViewKind::Component {
                container_id,
                external_container_boundaries_visible,
            } => {
                doc.software_system_id = model
                    .get_element(*container_id)
                    .and_then(Element::parent);
                doc.container_id = Some(*container_id);
                doc.external_container_boundaries_visible = *external_container_boundaries_visible;
            }
            ViewKind::Deployment {
                software_system_id,
                environment,
            } => {
                doc.software_system_id = *software_system_id;
                doc.environment = environment.as_deref();
            }
        }
        doc
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DynamicViewDoc<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    element_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paper_size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    automatic_layout: Option<AutomaticLayoutDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    elements: Vec<ElementViewDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<RelationshipViewDoc<'a>>,
}

impl<'a> DynamicViewDoc<'a> {
    fn new(view: &'a DynamicView) -> Self {
        Self {
            key: view.key(),
            element_id: view.element_id(),
            description: non_empty(view.description()),
            title: non_empty(view.title()),
            paper_size: view.paper_size().map(|paper_size| paper_size.as_str()),
            automatic_layout: view.automatic_layout().map(AutomaticLayoutDoc::new),
            elements: view.element_views().map(ElementViewDoc::new).collect(),
            relationships: view
                .relationship_views()
                .map(RelationshipViewDoc::new)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilteredViewDoc<'a> {
    key: &'a str,
    base_view_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    mode: &'static str,
    tags: Vec<&'a str>,
}

impl<'a> FilteredViewDoc<'a> {
    fn new(view: &'a FilteredView) -> Self {
        Self {
            key: view.key(),
            base_view_key: view.base_view_key(),
            description: non_empty(view.description()),
            title: non_empty(view.title()),
            mode: view.mode().as_str(),
            tags: view.tags().collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AutomaticLayoutDoc {
    rank_direction: &'static str,
    rank_separation: i64,
    node_separation: i64,
    edge_separation: i64,
    vertices: bool,
}

impl AutomaticLayoutDoc {
    fn new(layout: &AutomaticLayout) -> Self {
        Self {
            rank_direction: layout.rank_direction.as_str(),
            rank_separation: layout.rank_separation,
            node_separation: layout.node_separation,
            edge_separation: layout.edge_separation,
            vertices: layout.vertices,
        }
    }
}

#[derive(Serialize)]
struct ElementViewDoc {
    id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<i64>,
}

impl ElementViewDoc {
    fn new(element_view: &ElementView) -> Self {
        Self {
            id: element_view.id(),
            x: element_view.x(),
            y: element_view.y(),
        }
    }
}

#[derive(Serialize)]
struct RelationshipViewDoc<'a> {
    id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    vertices: Vec<VertexDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<i64>,
}

impl<'a> RelationshipViewDoc<'a> {
    fn new(relationship_view: &'a RelationshipView) -> Self {
        Self {
            id: relationship_view.id(),
            description: relationship_view.description(),
            order: relationship_view.order(),
            response: relationship_view.is_response().then_some(true),
            vertices: relationship_view
                .vertices()
                .iter()
                .map(|vertex| VertexDoc {
                    x: vertex.x,
                    y: vertex.y,
                })
                .collect(),
            routing: relationship_view.routing().map(|routing| routing.as_str()),
            position: relationship_view.position(),
        }
    }
}

#[derive(Serialize)]
struct VertexDoc {
    x: i64,
    y: i64,
}

#[derive(Serialize)]
struct AnimationDoc<'a> {
    order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    elements: Option<&'a [Id]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationships: Option<&'a [Id]>,
}

impl<'a> AnimationDoc<'a> {
    fn new(animation: &'a Animation) -> Self {
        Self {
            order: animation.order(),
            elements: non_empty_slice(animation.elements()),
            relationships: non_empty_slice(animation.relationships()),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationDoc<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    styles: Option<StylesDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branding: Option<BrandingDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    terminology: Option<TerminologyDoc<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_view: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_saved_view: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    view_sort_order: Option<&'static str>,
}

impl<'a> ConfigurationDoc<'a> {
    fn new(configuration: &'a Configuration) -> Self {
        let styles = configuration.styles();
        Self {
            styles: (!styles.is_empty()).then(|| StylesDoc {
                elements: styles
                    .element_styles()
                    .iter()
                    .map(ElementStyleDoc::new)
                    .collect(),
                relationships: styles
                    .relationship_styles()
                    .iter()
                    .map(RelationshipStyleDoc::new)
                    .collect(),
            }),
            branding: configuration.branding.as_ref().map(BrandingDoc::new),
            terminology: configuration.terminology.as_ref().map(TerminologyDoc::new),
            theme: configuration.theme.as_deref(),
            default_view: configuration.default_view.as_deref(),
            last_saved_view: configuration.last_saved_view.as_deref(),
            view_sort_order: configuration.view_sort_order.map(|order| order.as_str()),
        }
    }
}

#[derive(Serialize)]
struct StylesDoc<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    elements: Vec<ElementStyleDoc<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<RelationshipStyleDoc<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementStyleDoc<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opacity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<bool>,
}

impl<'a> ElementStyleDoc<'a> {
    fn new(style: &'a ElementStyle) -> Self {
        Self {
            tag: &style.tag,
            width: style.width,
            height: style.height,
            background: style.background.as_ref().map(Color::to_string),
            stroke: style.stroke.as_ref().map(Color::to_string),
            color: style.color.as_ref().map(Color::to_string),
            font_size: style.font_size,
            shape: style.shape.map(|shape| shape.as_str()),
            icon: style.icon.as_deref(),
            border: style.border.map(|border| border.as_str()),
            opacity: style.opacity,
            metadata: style.metadata,
            description: style.description,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipStyleDoc<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thickness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dashed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opacity: Option<u8>,
}

impl<'a> RelationshipStyleDoc<'a> {
    fn new(style: &'a RelationshipStyle) -> Self {
        Self {
            tag: &style.tag,
            thickness: style.thickness,
            width: style.width,
            color: style.color.as_ref().map(Color::to_string),
            font_size: style.font_size,
            dashed: style.dashed,
            routing: style.routing.map(|routing| routing.as_str()),
            position: style.position,
            opacity: style.opacity,
        }
    }
}

#[derive(Serialize)]
struct BrandingDoc<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font: Option<FontDoc<'a>>,
}

impl<'a> BrandingDoc<'a> {
    fn new(branding: &'a Branding) -> Self {
        Self {
            logo: branding.logo.as_deref(),
            font: branding.font.as_ref().map(|font| FontDoc {
                name: &font.name,
                url: font.url.as_deref(),
            }),
        }
    }
}

#[derive(Serialize)]
struct FontDoc<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TerminologyDoc<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    enterprise: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    software_system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deployment_node: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationship: Option<&'a str>,
}

impl<'a> TerminologyDoc<'a> {
    fn new(terminology: &'a Terminology) -> Self {
        Self {
            enterprise: terminology.enterprise.as_deref(),
            person: terminology.person.as_deref(),
            software_system: terminology.software_system.as_deref(),
            container: terminology.container.as_deref(),
            component: terminology.component.as_deref(),
            code: terminology.code.as_deref(),
            deployment_node: terminology.deployment_node.as_deref(),
            relationship: terminology.relationship.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use structurizr_core::{
        model::NewRelationship,
        view::{FilterMode, PaperSize, Shape, ViewSortOrder},
    };

    use super::*;

    fn to_value(workspace: &Workspace) -> Value {
        serde_json::from_str(&write_workspace(workspace).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_workspace_omits_unset_fields() {
        let workspace = Workspace::new(3, "", "");
        assert_eq!(to_value(&workspace), json!({"id": 3}));
    }

    #[test]
    fn test_relationships_nested_under_source() {
        let mut workspace = Workspace::new(1, "Shop", "");
        let model = workspace.model_mut();
        let user = model.add_person("User", "").unwrap();
        let shop = model.add_software_system("Shop", "Sells things").unwrap();
        model
            .add_relationship(
                user,
                shop,
                NewRelationship::new("Buys from").with_technology("HTTPS"),
            )
            .unwrap();

        let value = to_value(&workspace);
        assert_eq!(
            value["model"]["people"][0],
            json!({
                "id": "1",
                "name": "User",
                "tags": "Element,Person",
                "relationships": [{
                    "id": "3",
                    "sourceId": "1",
                    "destinationId": "2",
                    "description": "Buys from",
                    "technology": "HTTPS",
                    "tags": "Relationship"
                }]
            })
        );
        assert_eq!(value["model"]["softwareSystems"][0]["description"], "Sells things");
        assert!(value["model"]["softwareSystems"][0].get("relationships").is_none());
    }

    #[test]
    fn test_tag_order_preserved() {
        let mut workspace = Workspace::new(1, "", "");
        let model = workspace.model_mut();
        let user = model.add_person("User", "").unwrap();
        let element = model.element_mut(user).unwrap();
        element.add_tag("Zeta");
        element.add_tag("Alpha");

        let value = to_value(&workspace);
        assert_eq!(value["model"]["people"][0]["tags"], "Element,Person,Zeta,Alpha");
    }

    #[test]
    fn test_deployment_nesting() {
        let mut workspace = Workspace::new(1, "", "");
        let model = workspace.model_mut();
        let shop = model.add_software_system("Shop", "").unwrap();
        let web = model.add_container(shop, "Web", "", "Rust").unwrap();
        let server = model.add_deployment_node("Live", "Server", "", "Linux").unwrap();
        let docker = model
            .add_child_deployment_node(server, "Docker", "", "")
            .unwrap();
        model.add_container_instance(docker, web, true).unwrap();

        let value = to_value(&workspace);
        let node = &value["model"]["deploymentNodes"][0];
        assert_eq!(node["environment"], "Live");
        assert_eq!(node["technology"], "Linux");
        assert_eq!(node["instances"], 1);
        let instance = &node["children"][0]["containerInstances"][0];
        assert_eq!(instance["containerId"], web.to_string());
        assert_eq!(instance["instanceId"], 1);
        assert!(instance.get("name").is_none());
    }

    #[test]
    fn test_views_grouped_by_type() {
        let mut workspace = Workspace::new(1, "", "");
        let (model, views) = workspace.model_and_views_mut();
        let shop = model.add_software_system("Shop", "").unwrap();
        let web = model.add_container(shop, "Web", "", "").unwrap();
        views
            .create_component_view(model, web, "components", "")
            .unwrap();
        views
            .create_system_landscape_view("landscape", "Everything")
            .unwrap()
            .set_paper_size(Some(PaperSize::A4_Landscape));

        let value = to_value(&workspace);
        let component_view = &value["views"]["componentViews"][0];
        assert_eq!(component_view["containerId"], web.to_string());
        assert_eq!(component_view["softwareSystemId"], shop.to_string());
        assert!(component_view.get("description").is_none());

        let landscape = &value["views"]["systemLandscapeViews"][0];
        assert_eq!(landscape["paperSize"], "A4_Landscape");
        assert_eq!(landscape["description"], "Everything");
    }

    #[test]
    fn test_dynamic_and_filtered_views_written() {
        let mut workspace = Workspace::new(1, "", "");
        let (model, views) = workspace.model_and_views_mut();
        let user = model.add_person("User", "").unwrap();
        let shop = model.add_software_system("Shop", "").unwrap();
        model.uses(user, shop, "Buys from").unwrap();

        let dynamic = views.create_dynamic_view(model, None, "buy", "").unwrap();
        dynamic.add(model, user, shop, None, None).unwrap();
        dynamic
            .add(model, shop, user, Some("Sends receipt to"), None)
            .unwrap();
        views.create_system_landscape_view("landscape", "").unwrap();
        views
            .create_filtered_view("landscape", "people", "", FilterMode::Include, ["Person"])
            .unwrap();

        let value = to_value(&workspace);
        let relationships = &value["views"]["dynamicViews"][0]["relationships"];
        assert_eq!(relationships[0]["order"], "1");
        assert_eq!(relationships[0]["description"], "Buys from");
        assert!(relationships[0].get("response").is_none());
        assert_eq!(relationships[1]["order"], "2");
        assert_eq!(relationships[1]["response"], true);
        assert!(value["views"]["dynamicViews"][0].get("elementId").is_none());

        assert_eq!(
            value["views"]["filteredViews"][0],
            json!({"key": "people", "baseViewKey": "landscape", "mode": "Include", "tags": ["Person"]})
        );
    }

    #[test]
    fn test_configuration_written() {
        let mut workspace = Workspace::new(1, "", "");
        let configuration = workspace.views_mut().configuration_mut();
        configuration.styles_mut().add_element_style(ElementStyle {
            background: Some(Color::rgb(0x11, 0x68, 0xbd)),
            shape: Some(Shape::RoundedBox),
            ..ElementStyle::new("Software System")
        });
        configuration.branding_mut();
        configuration.view_sort_order = Some(ViewSortOrder::Type);

        let value = to_value(&workspace);
        assert_eq!(
            value["views"]["configuration"],
            json!({
                "styles": {"elements": [
                    {"tag": "Software System", "background": "#1168bd", "shape": "RoundedBox"}
                ]},
                "branding": {},
                "viewSortOrder": "Type"
            })
        );
    }
}
