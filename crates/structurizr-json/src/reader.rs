//! Reading Structurizr JSON documents into a [`Workspace`].
//!
//! The document is first parsed into a [`serde_json::Value`] tree and then
//! walked by hand so that every problem can be reported against the JSON
//! path it was found at, together with the element it belongs to. Reading
//! never stops at the first problem: all diagnostics of a document are
//! collected and returned together.
//!
//! Elements are inserted before relationships, and software systems before
//! deployment nodes, so that references can be resolved regardless of their
//! order in the document.

use std::str::FromStr;

use log::{debug, warn};
use serde_json::{Map, Value};
use structurizr_core::{
    Id, ModelError, Workspace,
    model::{
        DEFAULT_DEPLOYMENT_ENVIRONMENT, DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS,
        DEFAULT_HEALTH_CHECK_TIMEOUT_MILLISECONDS, Element, ElementKind, ElementType, Enterprise,
        HttpHealthCheck, Instance, InteractionStyle, Location, Model, Perspective, Properties,
        Relationship, Tags,
    },
    view::{
        Animation, AutomaticLayout, Border, Branding, Color, Configuration, DynamicView,
        ElementStyle, ElementView, FilterMode, FilteredView, Font, PaperSize, RankDirection,
        RelationshipStyle, RelationshipView, Routing, Shape, Terminology, Vertex, View, ViewKind,
        ViewSet, ViewSortOrder, ViewType,
    },
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, DocumentError, ErrorCode},
    path::JsonPath,
};

/// The view arrays of a `views` object, in the order they are read and
/// written.
pub(crate) const VIEW_SECTIONS: [(&str, ViewType); 5] = [
    ("systemLandscapeViews", ViewType::SystemLandscape),
    ("systemContextViews", ViewType::SystemContext),
    ("containerViews", ViewType::Container),
    ("componentViews", ViewType::Component),
    ("deploymentViews", ViewType::Deployment),
];

/// Read a workspace from JSON text.
///
/// # Errors
///
/// Returns a [`DocumentError`] holding every error found in the document:
/// malformed JSON, values of the wrong type, missing or invalid fields,
/// duplicate IDs or view keys, and references to elements or relationships
/// that do not exist.
pub fn read_workspace(text: &str) -> Result<Workspace, DocumentError> {
    let document: Value = serde_json::from_str(text).map_err(syntax_error)?;

    let mut reader = Reader::default();
    let workspace = reader.workspace(&document);

    match reader.collector.finish() {
        Ok(warnings) => {
            for warning in &warnings {
                warn!(path:? = warning.primary_path().map(ToString::to_string); "{}", warning);
            }
            debug!(
                workspace_id = workspace.id(),
                elements = workspace.model().elements().count(),
                relationships = workspace.model().relationships().count(),
                views = workspace.views().views().count();
                "Read workspace document"
            );
            Ok(workspace)
        }
        Err(err) => {
            debug!(errors = err.diagnostics().len(); "Workspace document rejected");
            Err(err)
        }
    }
}

fn syntax_error(err: serde_json::Error) -> Diagnostic {
    Diagnostic::error(format!("the document is not valid JSON: {err}"))
        .with_code(ErrorCode::E001)
        .with_label(
            JsonPath::root(),
            format!("line {}, column {}", err.line(), err.column()),
        )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Describe a document object for diagnostics, e.g. "person `User` (ID `1`)".
fn describe(kind: &str, object: &Map<String, Value>) -> String {
    let name = object
        .get("name")
        .or_else(|| object.get("key"))
        .or_else(|| object.get("tag"))
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty());
    let id = object.get("id").and_then(id_text);
    match (name, id) {
        (Some(name), Some(id)) => format!("{kind} `{name}` (ID `{id}`)"),
        (Some(name), None) => format!("{kind} `{name}`"),
        (None, Some(id)) => format!("{kind} with ID `{id}`"),
        (None, None) => kind.to_owned(),
    }
}

/// The text of a string or non-negative integer ID.
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(number) if number.is_u64() => Some(number.to_string()),
        _ => None,
    }
}

/// A JSON object being read, with its location and a description of what
/// it represents.
struct Fields<'v> {
    object: &'v Map<String, Value>,
    path: JsonPath,
    subject: String,
}

impl<'v> Fields<'v> {
    /// The value of a member; `null` counts as absent.
    fn get(&self, key: &str) -> Option<&'v Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// A relationship nested under an element, read once all elements exist.
struct PendingRelationship<'v> {
    value: &'v Value,
    path: JsonPath,
    owner: Id,
}

#[derive(Default)]
struct Reader<'v> {
    collector: DiagnosticCollector,
    relationships: Vec<PendingRelationship<'v>>,
}

impl<'v> Reader<'v> {
    // =========================================================================
    // Workspace
    // =========================================================================

    fn workspace(&mut self, value: &'v Value) -> Workspace {
        let mut workspace = Workspace::default();
        let Some(fields) = self.fields(value, JsonPath::root(), "workspace") else {
            return workspace;
        };

        if let Some(id) = self.required(&fields, "id", Self::integer) {
            workspace.set_id(id);
        }
        workspace.set_name(self.string(&fields, "name").unwrap_or_default());
        workspace.set_description(self.string(&fields, "description").unwrap_or_default());
        workspace.set_version(self.string(&fields, "version").map(str::to_owned));
        workspace.set_revision(self.integer(&fields, "revision"));
        workspace.set_thumbnail(self.string(&fields, "thumbnail").map(str::to_owned));
        workspace.set_last_modified_date(
            self.string(&fields, "lastModifiedDate").map(str::to_owned),
        );
        workspace.set_last_modified_user(
            self.string(&fields, "lastModifiedUser").map(str::to_owned),
        );
        workspace.set_last_modified_agent(
            self.string(&fields, "lastModifiedAgent").map(str::to_owned),
        );

        if let Some(model) = self.nested(&fields, "model", "model") {
            *workspace.model_mut() = self.model(&model);
        }
        if let Some(views) = self.nested(&fields, "views", "views") {
            let views = self.views(workspace.model(), &views);
            *workspace.views_mut() = views;
        }

        workspace.set_documentation(fields.get("documentation").cloned());
        workspace.set_configuration(fields.get("configuration").cloned());
        workspace
    }

    // =========================================================================
    // Model
    // =========================================================================

    fn model(&mut self, fields: &Fields<'v>) -> Model {
        let mut model = Model::new();

        if let Some(enterprise) = self.nested(fields, "enterprise", "enterprise") {
            if let Some(name) = self.required(&enterprise, "name", Self::string) {
                model.set_enterprise(Some(Enterprise::new(name)));
            }
        }

        let people = fields.path.key("people");
        for (index, value) in self.array(fields, "people").iter().enumerate() {
            self.person(&mut model, value, people.index(index));
        }
        let systems = fields.path.key("softwareSystems");
        for (index, value) in self.array(fields, "softwareSystems").iter().enumerate() {
            self.software_system(&mut model, value, systems.index(index));
        }
        let nodes = fields.path.key("deploymentNodes");
        for (index, value) in self.array(fields, "deploymentNodes").iter().enumerate() {
            self.deployment_node(&mut model, value, nodes.index(index), None);
        }

        // Copies of replicated relationships point at their original.
        let (linked, plain): (Vec<_>, Vec<_>) = std::mem::take(&mut self.relationships)
            .into_iter()
            .partition(|pending| {
                pending
                    .value
                    .get("linkedRelationshipId")
                    .is_some_and(|linked| !linked.is_null())
            });
        for pending in plain.into_iter().chain(linked) {
            self.relationship(&mut model, pending);
        }

        model
    }

    fn person(&mut self, model: &mut Model, value: &'v Value, path: JsonPath) {
        let Some(fields) = self.fields(value, path, ElementType::Person.name()) else {
            return;
        };
        let location = self.location(&fields);
        let name = self.required(&fields, "name", Self::string);
        let element = self.element(&fields, name, Some(ElementKind::Person { location }));
        self.add(model, &fields, element);
    }

    fn software_system(&mut self, model: &mut Model, value: &'v Value, path: JsonPath) {
        let Some(fields) = self.fields(value, path, ElementType::SoftwareSystem.name()) else {
            return;
        };
        let location = self.location(&fields);
        let name = self.required(&fields, "name", Self::string);
        let element = self.element(
            &fields,
            name,
            Some(ElementKind::SoftwareSystem { location }),
        );
        let Some(id) = self.add(model, &fields, element) else {
            return;
        };

        let containers = fields.path.key("containers");
        for (index, value) in self.array(&fields, "containers").iter().enumerate() {
            self.container(model, value, containers.index(index), id);
        }
    }

    fn container(&mut self, model: &mut Model, value: &'v Value, path: JsonPath, parent: Id) {
        let Some(fields) = self.fields(value, path, ElementType::Container.name()) else {
            return;
        };
        let name = self.required(&fields, "name", Self::string);
        let technology = self.string(&fields, "technology").unwrap_or_default();
        let kind = ElementKind::Container {
            parent,
            technology: technology.to_owned(),
        };
        let element = self.element(&fields, name, Some(kind));
        let Some(id) = self.add(model, &fields, element) else {
            return;
        };

        let components = fields.path.key("components");
        for (index, value) in self.array(&fields, "components").iter().enumerate() {
            self.component(model, value, components.index(index), id);
        }
    }

    fn component(&mut self, model: &mut Model, value: &'v Value, path: JsonPath, parent: Id) {
        let Some(fields) = self.fields(value, path, ElementType::Component.name()) else {
            return;
        };
        let name = self.required(&fields, "name", Self::string);
        let technology = self.string(&fields, "technology").unwrap_or_default();
        let size = self.integer(&fields, "size");
        let kind = ElementKind::Component {
            parent,
            technology: technology.to_owned(),
            size,
        };
        let element = self.element(&fields, name, Some(kind));
        self.add(model, &fields, element);
    }

    /// Read a deployment node and everything nested in it. `parent` is the
    /// enclosing node and its environment.
    fn deployment_node(
        &mut self,
        model: &mut Model,
        value: &'v Value,
        path: JsonPath,
        parent: Option<(Id, &str)>,
    ) {
        let Some(fields) = self.fields(value, path, ElementType::DeploymentNode.name()) else {
            return;
        };
        let name = self.required(&fields, "name", Self::string);
        let environment = self.environment(&fields, parent.map(|(_, environment)| environment));
        let technology = self.string(&fields, "technology").unwrap_or_default();
        let instances = self.count(&fields, "instances").unwrap_or(1);
        let kind = ElementKind::DeploymentNode {
            parent: parent.map(|(id, _)| id),
            environment: environment.clone(),
            technology: technology.to_owned(),
            instances,
        };
        let element = self.element(&fields, name, Some(kind));
        let Some(id) = self.add(model, &fields, element) else {
            return;
        };

        let children = fields.path.key("children");
        for (index, value) in self.array(&fields, "children").iter().enumerate() {
            self.deployment_node(model, value, children.index(index), Some((id, environment.as_str())));
        }
        let nodes = fields.path.key("infrastructureNodes");
        for (index, value) in self.array(&fields, "infrastructureNodes").iter().enumerate() {
            self.infrastructure_node(model, value, nodes.index(index), id, environment.as_str());
        }
        let instances = fields.path.key("containerInstances");
        for (index, value) in self.array(&fields, "containerInstances").iter().enumerate() {
            self.instance(
                model,
                value,
                instances.index(index),
                (id, environment.as_str()),
                ElementType::ContainerInstance,
            );
        }
        let instances = fields.path.key("softwareSystemInstances");
        for (index, value) in self.array(&fields, "softwareSystemInstances").iter().enumerate() {
            self.instance(
                model,
                value,
                instances.index(index),
                (id, environment.as_str()),
                ElementType::SoftwareSystemInstance,
            );
        }
    }

    fn infrastructure_node(
        &mut self,
        model: &mut Model,
        value: &'v Value,
        path: JsonPath,
        parent: Id,
        parent_environment: &str,
    ) {
        let Some(fields) = self.fields(value, path, ElementType::InfrastructureNode.name()) else {
            return;
        };
        let name = self.required(&fields, "name", Self::string);
        let environment = self.environment(&fields, Some(parent_environment));
        let technology = self.string(&fields, "technology").unwrap_or_default();
        let kind = ElementKind::InfrastructureNode {
            parent,
            environment,
            technology: technology.to_owned(),
        };
        let element = self.element(&fields, name, Some(kind));
        self.add(model, &fields, element);
    }

    /// Read a container or software system instance. Instances carry no name
    /// of their own; they are named after the element they instantiate.
    fn instance(
        &mut self,
        model: &mut Model,
        value: &'v Value,
        path: JsonPath,
        (parent, parent_environment): (Id, &str),
        element_type: ElementType,
    ) {
        let Some(fields) = self.fields(value, path, element_type.name()) else {
            return;
        };
        let target_key = match element_type {
            ElementType::ContainerInstance => "containerId",
            _ => "softwareSystemId",
        };
        let target = self.required(&fields, target_key, Self::id);
        let instance_id = self.required(&fields, "instanceId", Self::count);
        let environment = self.environment(&fields, Some(parent_environment));
        let health_checks = self.health_checks(&fields);

        let name = target.and_then(|target| {
            let exists = model.get_element(target).is_some();
            self.reference(&fields, target_key, target, exists, "element")
                .then(|| model.get_element(target).map(|element| element.name().to_owned()))
                .flatten()
        });
        let kind = target.zip(instance_id).map(|(target, instance_id)| {
            let instance = Instance::new(parent, target, instance_id, environment)
                .with_health_checks(health_checks);
            match element_type {
                ElementType::ContainerInstance => ElementKind::ContainerInstance(instance),
                _ => ElementKind::SoftwareSystemInstance(instance),
            }
        });
        let element = self.element(&fields, name.as_deref(), kind);
        self.add(model, &fields, element);
    }

    fn health_checks(&mut self, fields: &Fields<'v>) -> Vec<HttpHealthCheck> {
        let path = fields.path.key("healthChecks");
        let mut health_checks = Vec::new();
        for (index, value) in self.array(fields, "healthChecks").iter().enumerate() {
            let Some(check) = self.fields(value, path.index(index), "health check") else {
                continue;
            };
            let name = self.required(&check, "name", Self::string);
            let url = self.required(&check, "url", Self::string);
            let interval = self
                .count(&check, "interval")
                .unwrap_or(DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS);
            let timeout = self
                .count(&check, "timeout")
                .unwrap_or(DEFAULT_HEALTH_CHECK_TIMEOUT_MILLISECONDS);
            let headers = self.string_map(&check, "headers");
            let (Some(name), Some(url)) = (name, url) else {
                continue;
            };
            let health_check = headers.into_iter().fold(
                HttpHealthCheck::new(name, url)
                    .with_interval(interval)
                    .with_timeout(timeout),
                |health_check, (name, value)| health_check.with_header(name, value),
            );
            health_checks.push(health_check);
        }
        health_checks
    }

    /// Read the fields shared by every element and build it.
    ///
    /// All fields are read before giving up so that every problem with the
    /// element is reported.
    fn element(
        &mut self,
        fields: &Fields<'v>,
        name: Option<&str>,
        kind: Option<ElementKind>,
    ) -> Option<Element> {
        let id = self.required(fields, "id", Self::id);
        let description = self.string(fields, "description").unwrap_or_default();
        let url = self.string(fields, "url").map(str::to_owned);
        let group = self.string(fields, "group").map(str::to_owned);
        let tags = self.tags(fields);
        let properties = self.string_map(fields, "properties");
        let perspectives = self.perspectives(fields);

        let element = match Element::new(id?, name?, kind?) {
            Ok(element) => element,
            Err(err) => {
                self.model_error(fields, err);
                return None;
            }
        };
        let element = element
            .with_description(description)
            .with_url(url)
            .with_group(group)
            .with_properties(properties)
            .with_perspectives(perspectives);
        Some(match tags {
            Some(tags) => element.with_tags(tags),
            None => element,
        })
    }

    /// Insert an element and queue its nested relationships.
    fn add(&mut self, model: &mut Model, fields: &Fields<'v>, element: Option<Element>) -> Option<Id> {
        match model.insert_element(element?) {
            Ok(id) => {
                let path = fields.path.key("relationships");
                for (index, value) in self.array(fields, "relationships").iter().enumerate() {
                    self.relationships.push(PendingRelationship {
                        value,
                        path: path.index(index),
                        owner: id,
                    });
                }
                Some(id)
            }
            Err(err) => {
                self.model_error(fields, err);
                None
            }
        }
    }

    fn relationship(&mut self, model: &mut Model, pending: PendingRelationship<'v>) {
        let Some(fields) = self.fields(pending.value, pending.path, "relationship") else {
            return;
        };
        let id = self.required(&fields, "id", Self::id);
        let source = self.id(&fields, "sourceId").unwrap_or(pending.owner);
        let destination = self.required(&fields, "destinationId", Self::id);
        let description = self.string(&fields, "description").unwrap_or_default();
        let technology = self.string(&fields, "technology").unwrap_or_default();
        let interaction_style = self
            .enumeration::<InteractionStyle>(&fields, "interactionStyle")
            .unwrap_or_default();
        let linked = self.id(&fields, "linkedRelationshipId");
        let tags = self.tags(&fields);
        let properties = self.string_map(&fields, "properties");
        let perspectives = self.perspectives(&fields);

        let source_exists = model.get_element(source).is_some();
        let source_found = self.reference(&fields, "sourceId", source, source_exists, "element");
        let destination_found = destination.is_some_and(|destination| {
            let exists = model.get_element(destination).is_some();
            self.reference(&fields, "destinationId", destination, exists, "element")
        });
        let linked_found = linked.is_none_or(|linked| {
            let exists = model.get_relationship(linked).is_some();
            self.reference(&fields, "linkedRelationshipId", linked, exists, "relationship")
        });
        let (Some(id), Some(destination)) = (id, destination) else {
            return;
        };
        if !(source_found && destination_found && linked_found) {
            return;
        }

        let relationship = match Relationship::new(id, source, destination) {
            Ok(relationship) => relationship,
            Err(err) => {
                self.model_error(&fields, err);
                return;
            }
        };
        let relationship = relationship
            .with_description(description)
            .with_technology(technology)
            .with_interaction_style(interaction_style)
            .with_linked_relationship_id(linked)
            .with_properties(properties)
            .with_perspectives(perspectives);
        let relationship = match tags {
            Some(tags) => relationship.with_tags(tags),
            None => relationship,
        };
        if let Err(err) = model.insert_relationship(relationship) {
            self.model_error(&fields, err);
        }
    }

    fn location(&mut self, fields: &Fields<'v>) -> Location {
        self.enumeration(fields, "location").unwrap_or_default()
    }

    /// The environment of a deployment element, inherited from its parent
    /// when absent or blank.
    fn environment(&mut self, fields: &Fields<'v>, inherited: Option<&str>) -> String {
        self.string(fields, "environment")
            .filter(|environment| !environment.trim().is_empty())
            .or(inherited)
            .unwrap_or(DEFAULT_DEPLOYMENT_ENVIRONMENT)
            .to_owned()
    }

    /// Read the `tags` string. An empty list keeps the default tags.
    fn tags(&mut self, fields: &Fields<'v>) -> Option<Tags> {
        let tags = Tags::parse(self.string(fields, "tags")?);
        if tags.is_empty() {
            self.collector.emit(
                Diagnostic::warning(format!("{} has an empty tag list", fields.subject))
                    .with_label(fields.path.key("tags"), "keeping the default tags"),
            );
            return None;
        }
        Some(tags)
    }

    fn perspectives(&mut self, fields: &Fields<'v>) -> Vec<Perspective> {
        let path = fields.path.key("perspectives");
        let mut perspectives = Vec::new();
        for (index, value) in self.array(fields, "perspectives").iter().enumerate() {
            let Some(perspective) = self.fields(value, path.index(index), "perspective") else {
                continue;
            };
            let name = self.required(&perspective, "name", Self::string);
            let description = self.string(&perspective, "description").unwrap_or_default();
            if let Some(name) = name {
                perspectives.push(Perspective::new(name, description));
            }
        }
        perspectives
    }

    // =========================================================================
    // Views
    // =========================================================================

    fn views(&mut self, model: &Model, fields: &Fields<'v>) -> ViewSet {
        let mut views = ViewSet::new();

        for (section, view_type) in VIEW_SECTIONS {
            let path = fields.path.key(section);
            for (index, value) in self.array(fields, section).iter().enumerate() {
                let Some(view_fields) = self.fields(value, path.index(index), view_type.name())
                else {
                    continue;
                };
                let Some(view) = self.view(model, &view_fields, view_type) else {
                    continue;
                };
                if let Err(err) = views.insert_view(view) {
                    self.model_error(&view_fields, err);
                }
            }
        }

        let path = fields.path.key("dynamicViews");
        for (index, value) in self.array(fields, "dynamicViews").iter().enumerate() {
            let Some(view_fields) = self.fields(value, path.index(index), "dynamic view") else {
                continue;
            };
            let Some(view) = self.dynamic_view(model, &view_fields) else {
                continue;
            };
            if let Err(err) = views.insert_dynamic_view(view) {
                self.model_error(&view_fields, err);
            }
        }

        // Filtered views come last: their base views must already be known.
        let path = fields.path.key("filteredViews");
        for (index, value) in self.array(fields, "filteredViews").iter().enumerate() {
            let Some(view_fields) = self.fields(value, path.index(index), "filtered view") else {
                continue;
            };
            let Some(view) = self.filtered_view(&view_fields, &views) else {
                continue;
            };
            if let Err(err) = views.insert_filtered_view(view) {
                self.model_error(&view_fields, err);
            }
        }

        if let Some(configuration) = self.nested(fields, "configuration", "view configuration") {
            let configuration = self.configuration(&configuration, &views);
            views.set_configuration(Some(configuration));
        }
        views
    }

    fn view(&mut self, model: &Model, fields: &Fields<'v>, view_type: ViewType) -> Option<View> {
        let key = self.required(fields, "key", Self::string);
        // A blank or absent description is allowed.
        let description = self.string(fields, "description").unwrap_or_default();
        let title = self.string(fields, "title").unwrap_or_default();
        let paper_size = self.enumeration::<PaperSize>(fields, "paperSize");
        let automatic_layout = self.automatic_layout(fields);
        let kind = self.view_kind(model, fields, view_type);
        let elements = self.element_views(model, fields);
        let relationships = self.relationship_views(model, fields);
        let animations = self.animations(model, fields);

        let view = match View::new(key?, description, kind?) {
            Ok(view) => view,
            Err(err) => {
                self.model_error(fields, err);
                return None;
            }
        };
        let mut view = view
            .with_title(title)
            .with_paper_size(paper_size)
            .with_automatic_layout(automatic_layout);
        for element_view in elements {
            view.insert_element_view(element_view);
        }
        for relationship_view in relationships {
            view.insert_relationship_view(relationship_view);
        }
        for animation in animations {
            view.add_animation(animation);
        }
        Some(view)
    }

    fn view_kind(
        &mut self,
        model: &Model,
        fields: &Fields<'v>,
        view_type: ViewType,
    ) -> Option<ViewKind> {
        match view_type {
            ViewType::SystemLandscape => Some(ViewKind::SystemLandscape {
                enterprise_boundary_visible: self.boolean(fields, "enterpriseBoundaryVisible"),
            }),
            ViewType::SystemContext => {
                let scope = self.required(fields, "softwareSystemId", Self::id);
                let enterprise_boundary_visible =
                    self.boolean(fields, "enterpriseBoundaryVisible");
                let software_system_id = self.scope(
                    model,
                    fields,
                    "softwareSystemId",
                    scope?,
                    &[ElementType::SoftwareSystem],
                )?;
                Some(ViewKind::SystemContext {
                    software_system_id,
                    enterprise_boundary_visible,
                })
            }
            ViewType::Container => {
                let scope = self.required(fields, "softwareSystemId", Self::id);
                let external_software_system_boundaries_visible =
                    self.boolean(fields, "externalSoftwareSystemBoundariesVisible");
                let software_system_id = self.scope(
                    model,
                    fields,
                    "softwareSystemId",
                    scope?,
                    &[ElementType::SoftwareSystem],
                )?;
                Some(ViewKind::Container {
                    software_system_id,
                    external_software_system_boundaries_visible,
                })
            }
            ViewType::Component => {
                // `softwareSystemId` is derived from the container and ignored here.
                let scope = self.required(fields, "containerId", Self::id);
                let external_container_boundaries_visible =
                    self.boolean(fields, "externalContainerBoundariesVisible");
                let container_id =
                    self.scope(model, fields, "containerId", scope?, &[ElementType::Container])?;
                Some(ViewKind::Component {
                    container_id,
                    external_container_boundaries_visible,
                })
            }
            ViewType::Deployment => {
                let scope = self.id(fields, "softwareSystemId");
                let environment = self.string(fields, "environment").map(str::to_owned);
                let software_system_id = match scope {
                    Some(scope) => Some(self.scope(
                        model,
                        fields,
                        "softwareSystemId",
                        scope,
                        &[ElementType::SoftwareSystem],
                    )?),
                    None => None,
                };
                Some(ViewKind::Deployment {
                    software_system_id,
                    environment,
                })
            }
        }
    }

    /// Resolve the element a view is scoped to.
    fn scope(
        &mut self,
        model: &Model,
        fields: &Fields<'v>,
        key: &str,
        id: Id,
        expected: &[ElementType],
    ) -> Option<Id> {
        let element = model.get_element(id);
        if !self.reference(fields, key, id, element.is_some(), "element") {
            return None;
        }
        let actual = element?.element_type();
        if !expected.contains(&actual) {
            let expected = expected
                .iter()
                .map(ElementType::name)
                .collect::<Vec<_>>()
                .join(" or ");
            self.collector.emit(
                Diagnostic::error(format!(
                    "{} must be scoped to a {expected}, but `{id}` is a {}",
                    fields.subject,
                    actual.name(),
                ))
                .with_code(ErrorCode::E301)
                .with_label(fields.path.key(key), format!("expected a {expected}")),
            );
            return None;
        }
        Some(id)
    }

    fn dynamic_view(&mut self, model: &Model, fields: &Fields<'v>) -> Option<DynamicView> {
        let key = self.required(fields, "key", Self::string);
        let description = self.string(fields, "description").unwrap_or_default();
        let title = self.string(fields, "title").unwrap_or_default();
        let paper_size = self.enumeration::<PaperSize>(fields, "paperSize");
        let automatic_layout = self.automatic_layout(fields);
        let element_id = match self.id(fields, "elementId") {
            Some(id) => Some(self.scope(
                model,
                fields,
                "elementId",
                id,
                &[ElementType::SoftwareSystem, ElementType::Container],
            )?),
            None => None,
        };
        let elements = self.element_views(model, fields);
        let relationships = self.relationship_views(model, fields);

        let view = match DynamicView::new(key?, description, element_id) {
            Ok(view) => view,
            Err(err) => {
                self.model_error(fields, err);
                return None;
            }
        };
        let mut view = view
            .with_title(title)
            .with_paper_size(paper_size)
            .with_automatic_layout(automatic_layout);
        for element_view in elements {
            view.insert_element_view(element_view);
        }
        for relationship_view in relationships {
            view.insert_relationship_view(relationship_view);
        }
        Some(view)
    }

    fn filtered_view(&mut self, fields: &Fields<'v>, views: &ViewSet) -> Option<FilteredView> {
        let key = self.required(fields, "key", Self::string);
        let description = self.string(fields, "description").unwrap_or_default();
        let title = self.string(fields, "title").unwrap_or_default();
        let base_view_key = self.required(fields, "baseViewKey", Self::string);
        let mode = self.required(fields, "mode", Self::enumeration::<FilterMode>);
        let tags = self.string_list(fields, "tags");

        let base_view_key = base_view_key?;
        if views.view(base_view_key).is_none() {
            self.collector.emit(
                Diagnostic::error(format!(
                    "{} refers to unknown view `{base_view_key}`",
                    fields.subject
                ))
                .with_code(ErrorCode::E300)
                .with_label(
                    fields.path.key("baseViewKey"),
                    "no static view with this key exists",
                ),
            );
            return None;
        }
        match FilteredView::new(key?, description, base_view_key, mode?, tags) {
            Ok(view) => Some(view.with_title(title)),
            Err(err) => {
                self.model_error(fields, err);
                None
            }
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    fn configuration(&mut self, fields: &Fields<'v>, views: &ViewSet) -> Configuration {
        let mut configuration = Configuration::new();
        if let Some(styles) = self.nested(fields, "styles", "styles") {
            let path = styles.path.key("elements");
            for (index, value) in self.array(&styles, "elements").iter().enumerate() {
                let Some(item) = self.fields(value, path.index(index), "element style") else {
                    continue;
                };
                if let Some(style) = self.element_style(&item) {
                    configuration.styles.add_element_style(style);
                }
            }
            let path = styles.path.key("relationships");
            for (index, value) in self.array(&styles, "relationships").iter().enumerate() {
                let Some(item) = self.fields(value, path.index(index), "relationship style")
                else {
                    continue;
                };
                if let Some(style) = self.relationship_style(&item) {
                    configuration.styles.add_relationship_style(style);
                }
            }
        }
        configuration.branding = self
            .nested(fields, "branding", "branding")
            .map(|branding| self.branding(&branding));
        configuration.terminology = self
            .nested(fields, "terminology", "terminology")
            .map(|terminology| self.terminology(&terminology));
        configuration.theme = self.string(fields, "theme").map(str::to_owned);
        configuration.last_saved_view = self.string(fields, "lastSavedView").map(str::to_owned);
        configuration.view_sort_order = self.enumeration::<ViewSortOrder>(fields, "viewSortOrder");

        configuration.default_view = self.string(fields, "defaultView").map(str::to_owned);
        if let Some(key) = configuration.default_view.as_deref() {
            if !views.contains_key(key) {
                self.collector.emit(
                    Diagnostic::warning(format!("the default view `{key}` does not exist"))
                        .with_code(ErrorCode::E300)
                        .with_label(fields.path.key("defaultView"), "no view with this key"),
                );
            }
        }
        configuration
    }

    fn element_style(&mut self, fields: &Fields<'v>) -> Option<ElementStyle> {
        let tag = self.required(fields, "tag", Self::string);
        let style = ElementStyle {
            tag: String::new(),
            width: self.integer(fields, "width"),
            height: self.integer(fields, "height"),
            background: self.color(fields, "background"),
            stroke: self.color(fields, "stroke"),
            color: self.color(fields, "color"),
            font_size: self.integer(fields, "fontSize"),
            shape: self.enumeration::<Shape>(fields, "shape"),
            icon: self.string(fields, "icon").map(str::to_owned),
            border: self.enumeration::<Border>(fields, "border"),
            opacity: self.percentage(fields, "opacity"),
            metadata: self.boolean(fields, "metadata"),
            description: self.boolean(fields, "description"),
        };
        Some(ElementStyle {
            tag: tag?.to_owned(),
            ..style
        })
    }

    fn relationship_style(&mut self, fields: &Fields<'v>) -> Option<RelationshipStyle> {
        let tag = self.required(fields, "tag", Self::string);
        let style = RelationshipStyle {
            tag: String::new(),
            thickness: self.integer(fields, "thickness"),
            width: self.integer(fields, "width"),
            color: self.color(fields, "color"),
            font_size: self.integer(fields, "fontSize"),
            dashed: self.boolean(fields, "dashed"),
            routing: self.enumeration::<Routing>(fields, "routing"),
            position: self.percentage(fields, "position"),
            opacity: self.percentage(fields, "opacity"),
        };
        Some(RelationshipStyle {
            tag: tag?.to_owned(),
            ..style
        })
    }

    fn branding(&mut self, fields: &Fields<'v>) -> Branding {
        let logo = self.string(fields, "logo").map(str::to_owned);
        let font = self.nested(fields, "font", "font").and_then(|font| {
            let name = self.required(&font, "name", Self::string)?;
            Some(Font {
                name: name.to_owned(),
                url: self.string(&font, "url").map(str::to_owned),
            })
        });
        Branding { logo, font }
    }

    fn terminology(&mut self, fields: &Fields<'v>) -> Terminology {
        let mut term = |key: &str| self.string(fields, key).map(str::to_owned);
        Terminology {
            enterprise: term("enterprise"),
            person: term("person"),
            software_system: term("softwareSystem"),
            container: term("container"),
            component: term("component"),
            code: term("code"),
            deployment_node: term("deploymentNode"),
            relationship: term("relationship"),
        }
    }


    fn automatic_layout(&mut self, fields: &Fields<'v>) -> Option<AutomaticLayout> {
        let layout = self.nested(fields, "automaticLayout", "automatic layout")?;
        let defaults = AutomaticLayout::default();
        Some(AutomaticLayout {
            rank_direction: self
                .enumeration::<RankDirection>(&layout, "rankDirection")
                .unwrap_or(defaults.rank_direction),
            rank_separation: self
                .integer(&layout, "rankSeparation")
                .unwrap_or(defaults.rank_separation),
            node_separation: self
                .integer(&layout, "nodeSeparation")
                .unwrap_or(defaults.node_separation),
            edge_separation: self
                .integer(&layout, "edgeSeparation")
                .unwrap_or(defaults.edge_separation),
            vertices: self.boolean(&layout, "vertices").unwrap_or(defaults.vertices),
        })
    }

    fn element_views(&mut self, model: &Model, fields: &Fields<'v>) -> Vec<ElementView> {
        let path = fields.path.key("elements");
        let mut element_views = Vec::new();
        for (index, value) in self.array(fields, "elements").iter().enumerate() {
            let Some(item) = self.fields(value, path.index(index), "element view") else {
                continue;
            };
            let id = self.required(&item, "id", Self::id);
            let x = self.integer(&item, "x");
            let y = self.integer(&item, "y");
            let Some(id) = id else {
                continue;
            };
            let exists = model.get_element(id).is_some();
            if self.reference(&item, "id", id, exists, "element") {
                element_views.push(ElementView::new(id).with_position(x, y));
            }
        }
        element_views
    }

    fn relationship_views(&mut self, model: &Model, fields: &Fields<'v>) -> Vec<RelationshipView> {
        let path = fields.path.key("relationships");
        let mut relationship_views = Vec::new();
        for (index, value) in self.array(fields, "relationships").iter().enumerate() {
            let Some(item) = self.fields(value, path.index(index), "relationship view") else {
                continue;
            };
            let id = self.required(&item, "id", Self::id);
            let description = self.string(&item, "description").map(str::to_owned);
            let order = self.string(&item, "order").map(str::to_owned);
            let vertices = self.vertices(&item);
            let routing = self.enumeration::<Routing>(&item, "routing");
            let position = self.integer(&item, "position");
            let response = self.boolean(&item, "response").unwrap_or(false);
            let Some(id) = id else {
                continue;
            };
            let exists = model.get_relationship(id).is_some();
            if self.reference(&item, "id", id, exists, "relationship") {
                relationship_views.push(
                    RelationshipView::new(id)
                        .with_description(description)
                        .with_order(order)
                        .with_response(response)
                        .with_vertices(vertices)
                        .with_routing(routing)
                        .with_position(position),
                );
            }
        }
        relationship_views
    }

    fn vertices(&mut self, fields: &Fields<'v>) -> Vec<Vertex> {
        let path = fields.path.key("vertices");
        let mut vertices = Vec::new();
        for (index, value) in self.array(fields, "vertices").iter().enumerate() {
            let Some(vertex) = self.fields(value, path.index(index), "vertex") else {
                continue;
            };
            let x = self.required(&vertex, "x", Self::integer);
            let y = self.required(&vertex, "y", Self::integer);
            if let (Some(x), Some(y)) = (x, y) {
                vertices.push(Vertex::new(x, y));
            }
        }
        vertices
    }

    fn animations(&mut self, model: &Model, fields: &Fields<'v>) -> Vec<Animation> {
        let path = fields.path.key("animations");
        let mut animations = Vec::new();
        for (index, value) in self.array(fields, "animations").iter().enumerate() {
            let Some(step) = self.fields(value, path.index(index), "animation step") else {
                continue;
            };
            let order = self.required(&step, "order", Self::integer);
            let elements = self.id_list(
                &step,
                "elements",
                |id| model.get_element(id).is_some(),
                "element",
            );
            let relationships = self.id_list(
                &step,
                "relationships",
                |id| model.get_relationship(id).is_some(),
                "relationship",
            );
            if let Some(order) = order {
                animations.push(Animation::new(order, elements, relationships));
            }
        }
        animations
    }

    /// Read an array of ID strings, keeping those that resolve.
    fn id_list(
        &mut self,
        fields: &Fields<'v>,
        key: &str,
        exists: impl Fn(Id) -> bool,
        target: &str,
    ) -> Vec<Id> {
        let path = fields.path.key(key);
        let mut ids = Vec::new();
        for (index, value) in self.array(fields, key).iter().enumerate() {
            let Some(id) = value.as_str().map(Id::new) else {
                self.collector.emit(
                    Diagnostic::error(format!(
                        "`{key}` of {} must list string IDs, found {}",
                        fields.subject,
                        json_type(value),
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(path.index(index), "expected a string"),
                );
                continue;
            };
            if exists(id) {
                ids.push(id);
            } else {
                self.unknown_reference(&fields.subject, path.index(index), id, target);
            }
        }
        ids
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Treat a value as an object, reporting it otherwise.
    fn fields(&mut self, value: &'v Value, path: JsonPath, kind: &str) -> Option<Fields<'v>> {
        match value.as_object() {
            Some(object) => Some(Fields {
                object,
                subject: describe(kind, object),
                path,
            }),
            None => {
                self.collector.emit(
                    Diagnostic::error(format!(
                        "expected {kind} to be an object, found {}",
                        json_type(value)
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(path, "expected an object"),
                );
                None
            }
        }
    }

    /// The object stored under `key`, if present.
    fn nested(&mut self, fields: &Fields<'v>, key: &str, kind: &str) -> Option<Fields<'v>> {
        let value = fields.get(key)?;
        self.fields(value, fields.path.key(key), kind)
    }

    /// Read a field that must be present.
    fn required<T>(
        &mut self,
        fields: &Fields<'v>,
        key: &str,
        read: impl FnOnce(&mut Self, &Fields<'v>, &str) -> Option<T>,
    ) -> Option<T> {
        if fields.has(key) {
            return read(self, fields, key);
        }
        let mut diagnostic = Diagnostic::error(format!(
            "missing required field `{key}` on {}",
            fields.subject
        ))
        .with_code(ErrorCode::E200)
        .with_label(fields.path.clone(), format!("`{key}` is required here"));
        if key == "id" {
            diagnostic = diagnostic
                .with_help("every element and relationship needs an ID that is unique within the model");
        }
        self.collector.emit(diagnostic);
        None
    }

    fn string(&mut self, fields: &Fields<'v>, key: &str) -> Option<&'v str> {
        let value = fields.get(key)?;
        let string = value.as_str();
        if string.is_none() {
            self.type_error(fields, key, "a string", value);
        }
        string
    }

    /// Read an ID. IDs are strings, although plain integers are accepted.
    fn id(&mut self, fields: &Fields<'v>, key: &str) -> Option<Id> {
        let value = fields.get(key)?;
        let id = id_text(value).map(|id| Id::new(&id));
        if id.is_none() {
            self.type_error(fields, key, "a string ID", value);
        }
        id
    }

    fn integer(&mut self, fields: &Fields<'v>, key: &str) -> Option<i64> {
        let value = fields.get(key)?;
        let integer = value.as_i64();
        if integer.is_none() {
            self.type_error(fields, key, "an integer", value);
        }
        integer
    }

    fn count(&mut self, fields: &Fields<'v>, key: &str) -> Option<u32> {
        let value = fields.get(key)?;
        let count = value.as_u64().and_then(|count| u32::try_from(count).ok());
        if count.is_none() {
            self.type_error(fields, key, "a non-negative integer", value);
        }
        count
    }

    fn boolean(&mut self, fields: &Fields<'v>, key: &str) -> Option<bool> {
        let value = fields.get(key)?;
        let boolean = value.as_bool();
        if boolean.is_none() {
            self.type_error(fields, key, "a boolean", value);
        }
        boolean
    }

    /// Read a CSS color such as `#08427b` or `white`.
    fn color(&mut self, fields: &Fields<'v>, key: &str) -> Option<Color> {
        let value = self.string(fields, key)?;
        match value.parse() {
            Ok(color) => Some(color),
            Err(message) => {
                self.invalid_value(fields, key, value, message);
                None
            }
        }
    }

    /// Read an integer from 0 to 100.
    fn percentage(&mut self, fields: &Fields<'v>, key: &str) -> Option<u8> {
        let value = self.integer(fields, key)?;
        match u8::try_from(value) {
            Ok(percentage) if percentage <= 100 => Some(percentage),
            _ => {
                self.invalid_value(fields, key, &value.to_string(), "expected 0 to 100");
                None
            }
        }
    }

    /// Read an array of strings.
    fn string_list(&mut self, fields: &Fields<'v>, key: &str) -> Vec<String> {
        let path = fields.path.key(key);
        let mut strings = Vec::new();
        for (index, value) in self.array(fields, key).iter().enumerate() {
            match value.as_str() {
                Some(string) => strings.push(string.to_owned()),
                None => self.collector.emit(
                    Diagnostic::error(format!(
                        "`{key}` of {} must list strings, found {}",
                        fields.subject,
                        json_type(value),
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(path.index(index), "expected a string"),
                ),
            }
        }
        strings
    }

    /// Read a string naming one of a fixed set of values.
    fn enumeration<T>(&mut self, fields: &Fields<'v>, key: &str) -> Option<T>
    where
        T: FromStr<Err = &'static str>,
    {
        let value = self.string(fields, key)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(expected) => {
                self.collector.emit(
                    Diagnostic::error(format!(
                        "unrecognised value `{value}` for field `{key}` on {}",
                        fields.subject
                    ))
                    .with_code(ErrorCode::E101)
                    .with_label(fields.path.key(key), expected),
                );
                None
            }
        }
    }

    fn array(&mut self, fields: &Fields<'v>, key: &str) -> &'v [Value] {
        let Some(value) = fields.get(key) else {
            return &[];
        };
        match value.as_array() {
            Some(array) => array,
            None => {
                self.type_error(fields, key, "an array", value);
                &[]
            }
        }
    }

    /// Read an object whose members are all strings.
    fn string_map(&mut self, fields: &Fields<'v>, key: &str) -> Properties {
        let mut map = Properties::new();
        let Some(value) = fields.get(key) else {
            return map;
        };
        let Some(object) = value.as_object() else {
            self.type_error(fields, key, "an object", value);
            return map;
        };
        let path = fields.path.key(key);
        for (name, value) in object {
            match value.as_str() {
                Some(value) => {
                    map.insert(name.clone(), value.to_owned());
                }
                None => self.collector.emit(
                    Diagnostic::error(format!(
                        "`{key}` of {} must map names to strings, found {} for `{name}`",
                        fields.subject,
                        json_type(value),
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(path.key(name), "expected a string"),
                ),
            }
        }
        map
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    fn type_error(&mut self, fields: &Fields<'v>, key: &str, expected: &str, found: &Value) {
        self.collector.emit(
            Diagnostic::error(format!(
                "field `{key}` on {} must be {expected}, found {}",
                fields.subject,
                json_type(found),
            ))
            .with_code(ErrorCode::E100)
            .with_label(fields.path.key(key), format!("expected {expected}")),
        );
    }

    fn invalid_value(
        &mut self,
        fields: &Fields<'v>,
        key: &str,
        value: &str,
        message: impl Into<String>,
    ) {
        self.collector.emit(
            Diagnostic::error(format!(
                "invalid value `{value}` for field `{key}` on {}",
                fields.subject
            ))
            .with_code(ErrorCode::E201)
            .with_label(fields.path.key(key), message),
        );
    }

    /// Report `id` under `key` unless it exists. Returns whether it exists.
    fn reference(
        &mut self,
        fields: &Fields<'v>,
        key: &str,
        id: Id,
        exists: bool,
        target: &str,
    ) -> bool {
        if !exists {
            self.unknown_reference(&fields.subject, fields.path.key(key), id, target);
        }
        exists
    }

    fn unknown_reference(&mut self, subject: &str, path: JsonPath, id: Id, target: &str) {
        self.collector.emit(
            Diagnostic::error(format!("{subject} refers to unknown {target} `{id}`"))
                .with_code(ErrorCode::E300)
                .with_label(path, format!("no {target} with this ID exists in the model")),
        );
    }

    fn model_error(&mut self, fields: &Fields<'v>, err: ModelError) {
        let code = match &err {
            ModelError::NotFound { .. }
            | ModelError::UnknownView { .. }
            | ModelError::NoRelationship { .. } => ErrorCode::E300,
            ModelError::DuplicateId { .. } => ErrorCode::E202,
            ModelError::DuplicateName { .. } | ModelError::Validation { .. } => ErrorCode::E201,
            ModelError::InvalidReference { .. } | ModelError::ElementNotAllowed { .. } => {
                ErrorCode::E301
            }
            ModelError::DuplicateViewKey { .. } => ErrorCode::E203,
        };
        self.collector.emit(
            Diagnostic::error(err.to_string())
                .with_code(code)
                .with_label(fields.path.clone(), format!("while reading {}", fields.subject)),
        );
    }
}

#[cfg(test)]
mod tests {
    use structurizr_core::model::ModelItem;

    use super::*;

    fn read_err(text: &str) -> DocumentError {
        read_workspace(text).expect_err("document should be rejected")
    }

    fn messages(err: &DocumentError) -> Vec<String> {
        err.diagnostics().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_minimal_workspace() {
        let workspace = read_workspace(r#"{"id": 7, "name": "Empty"}"#).unwrap();
        assert_eq!(workspace.id(), 7);
        assert_eq!(workspace.name(), "Empty");
        assert!(workspace.model().is_empty());
        assert!(workspace.views().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = read_err(r#"{"id": 1,"#);
        assert!(err.has_code(ErrorCode::E001));
        assert_eq!(err.diagnostics().len(), 1);
    }

    #[test]
    fn test_workspace_id_required() {
        let err = read_err(r#"{"name": "No ID"}"#);
        assert!(err.has_code(ErrorCode::E200));
        assert_eq!(
            err.diagnostics()[0].message(),
            "missing required field `id` on workspace `No ID`"
        );
    }

    #[test]
    fn test_missing_element_id_names_the_element() {
        let err = read_err(
            r#"{"id": 1, "model": {"people": [{"name": "User"}, {"id": "2", "name": "Admin"}]}}"#,
        );
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E200));
        assert_eq!(diagnostic.message(), "missing required field `id` on person `User`");
        assert_eq!(
            diagnostic.primary_path().map(ToString::to_string).as_deref(),
            Some("$.model.people[0]")
        );
        assert!(diagnostic.help().is_some());
    }

    #[test]
    fn test_all_problems_reported_together() {
        let err = read_err(
            r#"{"id": 1, "model": {
                "people": [{"id": "1"}],
                "softwareSystems": [{"id": "2", "name": "Shop", "location": "Nowhere"}]
            }}"#,
        );
        assert_eq!(
            messages(&err),
            vec![
                "error[E200]: missing required field `name` on person with ID `1`",
                "error[E101]: unrecognised value `Nowhere` for field `location` on software system `Shop` (ID `2`)",
            ]
        );
    }

    #[test]
    fn test_wrong_type() {
        let err = read_err(r#"{"id": 1, "model": {"people": [{"id": "1", "name": 3}]}}"#);
        assert!(err.has_code(ErrorCode::E100));
        assert_eq!(
            err.diagnostics()[0].primary_path().map(ToString::to_string).as_deref(),
            Some("$.model.people[0].name")
        );
    }

    #[test]
    fn test_nested_elements_and_relationships() {
        let workspace = read_workspace(
            r#"{"id": 1, "model": {
                "people": [{"id": "1", "name": "User", "location": "External",
                    "relationships": [{"id": "5", "destinationId": "3", "description": "Uses"}]}],
                "softwareSystems": [{"id": "2", "name": "Shop", "tags": "Element,Software System,Web",
                    "containers": [{"id": "3", "name": "Web", "technology": "Rust",
                        "components": [{"id": "4", "name": "Router", "size": 12}]}]}]
            }}"#,
        )
        .unwrap();
        let model = workspace.model();

        let component = model.element(Id::new("4")).unwrap();
        assert_eq!(component.parent(), Some(Id::new("3")));
        assert_eq!(
            component.kind(),
            &ElementKind::Component {
                parent: Id::new("3"),
                technology: String::new(),
                size: Some(12),
            }
        );

        let relationship = model.relationship(Id::new("5")).unwrap();
        assert_eq!(relationship.source_id(), Id::new("1"));
        assert_eq!(relationship.destination_id(), Id::new("3"));
        assert_eq!(relationship.tags().to_string(), "Relationship");

        let shop = model.element(Id::new("2")).unwrap();
        assert_eq!(shop.tags().to_string(), "Element,Software System,Web");
    }

    #[test]
    fn test_dangling_relationship_destination() {
        let err = read_err(
            r#"{"id": 1, "model": {"people": [{"id": "1", "name": "User",
                "relationships": [{"id": "2", "destinationId": "99"}]}]}}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.diagnostics()[0].message(),
            "relationship with ID `2` refers to unknown element `99`"
        );
        assert_eq!(
            err.diagnostics()[0].primary_path().map(ToString::to_string).as_deref(),
            Some("$.model.people[0].relationships[0].destinationId")
        );
    }

    #[test]
    fn test_duplicate_id() {
        let err = read_err(
            r#"{"id": 1, "model": {
                "people": [{"id": "1", "name": "User"}],
                "softwareSystems": [{"id": "1", "name": "Shop"}]}}"#,
        );
        assert!(err.has_code(ErrorCode::E202));
    }

    #[test]
    fn test_instances_take_their_element_name() {
        let workspace = read_workspace(
            r#"{"id": 1, "model": {
                "softwareSystems": [{"id": "1", "name": "Shop",
                    "containers": [{"id": "2", "name": "Web"}]}],
                "deploymentNodes": [{"id": "3", "name": "Server", "environment": "Live",
                    "children": [{"id": "4", "name": "Docker",
                        "containerInstances": [{"id": "5", "containerId": "2", "instanceId": 1,
                            "healthChecks": [{"name": "ping", "url": "http://localhost/ping",
                                "headers": {"X-Check": "1"}}]}]}]}]
            }}"#,
        )
        .unwrap();
        let model = workspace.model();

        let docker = model.element(Id::new("4")).unwrap();
        assert_eq!(docker.environment(), Some("Live"));

        let instance = model.element(Id::new("5")).unwrap();
        assert_eq!(instance.name(), "Web");
        assert_eq!(instance.environment(), Some("Live"));
        let health_check = &instance.kind().instance().unwrap().health_checks()[0];
        assert_eq!(health_check.interval(), DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS);
        assert_eq!(health_check.headers().get("X-Check").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_instance_of_wrong_type() {
        let err = read_err(
            r#"{"id": 1, "model": {
                "people": [{"id": "1", "name": "User"}],
                "deploymentNodes": [{"id": "2", "name": "Server",
                    "containerInstances": [{"id": "3", "containerId": "1", "instanceId": 1}]}]
            }}"#,
        );
        assert!(err.has_code(ErrorCode::E301));
    }

    #[test]
    fn test_view_description_may_be_blank_or_absent() {
        let workspace = read_workspace(
            r#"{"id": 1,
                "model": {"softwareSystems": [{"id": "1", "name": "Shop"}]},
                "views": {
                    "systemContextViews": [
                        {"key": "a", "softwareSystemId": "1"},
                        {"key": "b", "softwareSystemId": "1", "description": ""}
                    ]
                }}"#,
        )
        .unwrap();
        assert_eq!(workspace.views().view("a").unwrap().description(), "");
        assert_eq!(workspace.views().view("b").unwrap().description(), "");
    }

    #[test]
    fn test_view_references_checked() {
        let err = read_err(
            r#"{"id": 1,
                "model": {"people": [{"id": "1", "name": "User"}]},
                "views": {
                    "systemContextViews": [{"key": "a", "softwareSystemId": "1"}],
                    "systemLandscapeViews": [{"key": "b", "elements": [{"id": "8"}]}]
                }}"#,
        );
        assert!(err.has_code(ErrorCode::E301));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_relationship_id_is_not_an_element_reference() {
        let err = read_err(
            r#"{"id": 1,
                "model": {
                    "people": [{"id": "1", "name": "User",
                        "relationships": [{"id": "3", "destinationId": "2"}]}],
                    "softwareSystems": [{"id": "2", "name": "Shop"}]
                },
                "views": {"systemLandscapeViews": [{"key": "landscape",
                    "elements": [{"id": "1"}, {"id": "3"}],
                    "animations": [{"order": 1, "elements": ["3"]}]}]}}"#,
        );
        assert_eq!(
            messages(&err),
            vec![
                "error[E300]: element view with ID `3` refers to unknown element `3`",
                "error[E300]: animation step refers to unknown element `3`",
            ]
        );
    }

    #[test]
    fn test_relationship_endpoint_must_be_an_element() {
        let err = read_err(
            r#"{"id": 1, "model": {"people": [{"id": "1", "name": "User",
                "relationships": [
                    {"id": "2", "destinationId": "1"},
                    {"id": "3", "destinationId": "2"}
                ]}]}}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.diagnostics()[0].message(),
            "relationship with ID `3` refers to unknown element `2`"
        );
    }

    #[test]
    fn test_numeric_ids_named_in_diagnostics() {
        let err = read_err(r#"{"id": 1, "model": {"people": [{"id": 5}]}}"#);
        assert_eq!(
            err.diagnostics()[0].message(),
            "missing required field `name` on person with ID `5`"
        );

        let err = read_err(
            r#"{"id": 1, "model": {"softwareSystems": [{"id": 7, "name": "Shop", "location": "Moon"}]}}"#,
        );
        assert_eq!(
            err.diagnostics()[0].message(),
            "unrecognised value `Moon` for field `location` on software system `Shop` (ID `7`)"
        );
    }

    #[test]
    fn test_duplicate_view_key() {
        let err = read_err(
            r#"{"id": 1, "views": {
                "systemLandscapeViews": [{"key": "a"}],
                "dynamicViews": [{"key": "a"}]}}"#,
        );
        assert!(err.has_code(ErrorCode::E203));
    }

    #[test]
    fn test_empty_tags_keep_defaults_with_warning() {
        let workspace =
            read_workspace(r#"{"id": 1, "model": {"people": [{"id": "1", "name": "User", "tags": ""}]}}"#)
                .unwrap();
        let user = workspace.model().element(Id::new("1")).unwrap();
        assert_eq!(user.tags().to_string(), "Element,Person");
    }

    #[test]
    fn test_opaque_sections_kept() {
        let workspace = read_workspace(
            r#"{"id": 1,
                "documentation": {"sections": [{"title": "Intro"}]},
                "configuration": {"visibility": "Public"}}"#,
        )
        .unwrap();
        assert!(workspace.documentation().is_some());
        assert_eq!(
            workspace.configuration().and_then(|c| c.get("visibility")),
            Some(&Value::from("Public"))
        );
    }

    const SHOP_MODEL: &str = r#""model": {
        "people": [{"id": "1", "name": "User", "relationships": [
            {"id": "5", "sourceId": "1", "destinationId": "3", "description": "Visits"}]}],
        "softwareSystems": [{"id": "2", "name": "Shop", "containers": [
            {"id": "3", "name": "Web", "relationships": [
                {"id": "6", "sourceId": "3", "destinationId": "4", "description": "Reads"}]},
            {"id": "4", "name": "DB"}]}]}"#;

    fn shop_document(views: &str) -> String {
        format!(r#"{{"id": 1, {SHOP_MODEL}, "views": {views}}}"#)
    }

    #[test]
    fn test_dynamic_view_read() {
        let workspace = read_workspace(&shop_document(
            r#"{"dynamicViews": [{"key": "visit", "elementId": "2",
                "elements": [{"id": "1"}, {"id": "3"}, {"id": "4"}],
                "relationships": [
                    {"id": "5", "order": "1"},
                    {"id": "6", "order": "1.1", "description": "Loads page"},
                    {"id": "5", "order": "2", "description": "Renders page", "response": true}
                ]}]}"#,
        ))
        .unwrap();

        let view = workspace.views().dynamic_view("visit").unwrap();
        assert_eq!(view.element_id(), Some(Id::new("2")));
        let orders: Vec<_> = view
            .relationship_views()
            .map(|r| (r.id().to_string(), r.order().unwrap_or_default().to_owned(), r.is_response()))
            .collect();
        assert_eq!(
            orders,
            vec![
                ("5".to_string(), "1".to_string(), false),
                ("6".to_string(), "1.1".to_string(), false),
                ("5".to_string(), "2".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_dynamic_view_dangling_ids() {
        let err = read_err(&shop_document(
            r#"{"dynamicViews": [{"key": "visit",
                "elements": [{"id": "9"}],
                "relationships": [{"id": "3", "order": "1"}]}]}"#,
        ));
        assert_eq!(
            messages(&err),
            vec![
                "error[E300]: element view with ID `9` refers to unknown element `9`",
                "error[E300]: relationship view with ID `3` refers to unknown relationship `3`",
            ]
        );
    }

    #[test]
    fn test_dynamic_view_scope_must_be_system_or_container() {
        let err = read_err(&shop_document(
            r#"{"dynamicViews": [{"key": "visit", "elementId": "1"}]}"#,
        ));
        assert!(err.has_code(ErrorCode::E301));
        assert_eq!(
            err.diagnostics()[0].message(),
            "dynamic view `visit` must be scoped to a software system or container, but `1` is a person"
        );
    }

    #[test]
    fn test_filtered_view_read() {
        let workspace = read_workspace(&shop_document(
            r#"{"systemLandscapeViews": [{"key": "landscape"}],
                "filteredViews": [{"key": "current", "baseViewKey": "landscape",
                    "mode": "Exclude", "tags": ["Legacy", "Deprecated"]}]}"#,
        ))
        .unwrap();

        let view = workspace.views().filtered_view("current").unwrap();
        assert_eq!(view.base_view_key(), "landscape");
        assert_eq!(view.mode(), FilterMode::Exclude);
        assert_eq!(view.tags().collect::<Vec<_>>(), vec!["Legacy", "Deprecated"]);
    }

    #[test]
    fn test_filtered_view_problems() {
        let err = read_err(&shop_document(
            r#"{"systemLandscapeViews": [{"key": "landscape"}],
                "filteredViews": [
                    {"key": "a", "baseViewKey": "missing", "mode": "Include", "tags": []},
                    {"key": "b", "baseViewKey": "landscape", "mode": "Both", "tags": [1]},
                    {"key": "landscape", "baseViewKey": "landscape", "mode": "Include"}
                ]}"#,
        ));
        assert_eq!(
            messages(&err),
            vec![
                "error[E300]: filtered view `a` refers to unknown view `missing`",
                "error[E101]: unrecognised value `Both` for field `mode` on filtered view `b`",
                "error[E100]: `tags` of filtered view `b` must list strings, found a number",
                "error[E203]: a view with the key `landscape` already exists",
            ]
        );
    }

    #[test]
    fn test_configuration_read() {
        let workspace = read_workspace(
            r##"{"id": 1, "views": {"configuration": {
                "styles": {
                    "elements": [{"tag": "Person", "shape": "Person", "background": "#08427B",
                                  "opacity": 80, "border": "Dashed"}],
                    "relationships": [{"tag": "Relationship", "dashed": false, "routing": "Curved"}]
                },
                "branding": {"logo": "logo.png", "font": {"name": "Open Sans"}},
                "terminology": {"container": "Service"},
                "viewSortOrder": "Key"}}}"##,
        )
        .unwrap();

        let configuration = workspace.views().configuration().unwrap();
        let person = configuration.styles().element_style("Person").unwrap();
        assert_eq!(person.shape, Some(Shape::Person));
        assert_eq!(person.background.map(|c| c.to_string()).as_deref(), Some("#08427b"));
        assert_eq!(person.opacity, Some(80));
        assert_eq!(person.border, Some(Border::Dashed));

        let relationship = configuration.styles().relationship_style("Relationship").unwrap();
        assert_eq!(relationship.routing, Some(Routing::Curved));
        assert_eq!(relationship.dashed, Some(false));

        let branding = configuration.branding.as_ref().unwrap();
        assert_eq!(branding.font.as_ref().map(|f| f.name.as_str()), Some("Open Sans"));
        assert_eq!(
            configuration.terminology.as_ref().and_then(|t| t.container.as_deref()),
            Some("Service")
        );
        assert_eq!(configuration.view_sort_order, Some(ViewSortOrder::Key));
    }

    #[test]
    fn test_style_problems() {
        let err = read_err(
            r#"{"id": 1, "views": {"configuration": {"styles": {
                "elements": [
                    {"tag": "Person", "shape": "Blob", "color": "not-a-color"},
                    {"opacity": 150}
                ]}}}}"#,
        );
        let messages = messages(&err);
        assert_eq!(
            messages[0],
            "error[E201]: invalid value `not-a-color` for field `color` on element style `Person`"
        );
        assert_eq!(
            messages[1],
            "error[E101]: unrecognised value `Blob` for field `shape` on element style `Person`"
        );
        assert_eq!(messages[2], "error[E200]: missing required field `tag` on element style");
        assert_eq!(
            messages[3],
            "error[E201]: invalid value `150` for field `opacity` on element style"
        );
    }

    #[test]
    fn test_unknown_default_view_warns() {
        let workspace = read_workspace(
            r#"{"id": 1, "views": {"configuration": {"defaultView": "nowhere"}}}"#,
        )
        .unwrap();
        assert_eq!(
            workspace
                .views()
                .configuration()
                .and_then(|c| c.default_view.as_deref()),
            Some("nowhere")
        );
    }
}
