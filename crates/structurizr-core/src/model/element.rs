//! Model element types.
//!
//! Every element shares the same identifying fields (ID, name, description,
//! tags, properties); what differs between people, software systems,
//! containers and the deployment topology is captured by the closed
//! [`ElementKind`] variant. Parent/child structure is stored as the parent's
//! [`Id`] on the child.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{
        ModelItem, Tags,
        item::{Perspective, Properties},
        tags,
    },
};

/// Environment assigned to deployment elements when none is given.
pub const DEFAULT_DEPLOYMENT_ENVIRONMENT: &str = "Default";

pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS: u32 = 30;
pub const DEFAULT_HEALTH_CHECK_TIMEOUT_MILLISECONDS: u32 = 5000;

/// Whether a person or software system sits inside or outside the enterprise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Internal,
    External,
    #[default]
    Unspecified,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::External => "External",
            Self::Unspecified => "Unspecified",
        }
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Internal" => Ok(Self::Internal),
            "External" => Ok(Self::External),
            "Unspecified" => Ok(Self::Unspecified),
            _ => Err("expected one of `Internal`, `External`, `Unspecified`"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fieldless discriminant of [`ElementKind`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Person,
    SoftwareSystem,
    Container,
    Component,
    DeploymentNode,
    InfrastructureNode,
    ContainerInstance,
    SoftwareSystemInstance,
}

impl ElementType {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::SoftwareSystem => "software system",
            Self::Container => "container",
            Self::Component => "component",
            Self::DeploymentNode => "deployment node",
            Self::InfrastructureNode => "infrastructure node",
            Self::ContainerInstance => "container instance",
            Self::SoftwareSystemInstance => "software system instance",
        }
    }

    /// Returns `true` for people, software systems, containers and components.
    pub fn is_static_structure(&self) -> bool {
        matches!(
            self,
            Self::Person | Self::SoftwareSystem | Self::Container | Self::Component
        )
    }

    /// Returns `true` for elements that only exist in deployment views.
    pub fn is_deployment(&self) -> bool {
        !self.is_static_structure()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An HTTP health check attached to a deployed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHealthCheck {
    name: String,
    url: String,
    interval: u32,
    timeout: u32,
    headers: IndexMap<String, String>,
}

impl HttpHealthCheck {
    /// Create a health check with the default interval and timeout.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            interval: DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS,
            timeout: DEFAULT_HEALTH_CHECK_TIMEOUT_MILLISECONDS,
            headers: IndexMap::new(),
        }
    }

    /// Set the polling interval, in seconds.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Set the timeout, in milliseconds.
    pub fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an HTTP header sent with the health check request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }
}

/// A deployed instance of a container or software system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    parent: Id,
    element_id: Id,
    instance_id: u32,
    environment: String,
    health_checks: Vec<HttpHealthCheck>,
}

impl Instance {
    /// Create an instance of `element_id` hosted on the deployment node `parent`.
    pub fn new(
        parent: Id,
        element_id: Id,
        instance_id: u32,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            parent,
            element_id,
            instance_id,
            environment: environment.into(),
            health_checks: Vec::new(),
        }
    }

    pub fn with_health_checks(mut self, health_checks: Vec<HttpHealthCheck>) -> Self {
        self.health_checks = health_checks;
        self
    }

    /// The deployment node hosting this instance.
    pub fn parent(&self) -> Id {
        self.parent
    }

    /// The container or software system this is an instance of.
    pub fn element_id(&self) -> Id {
        self.element_id
    }

    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn health_checks(&self) -> &[HttpHealthCheck] {
        &self.health_checks
    }

    pub fn add_health_check(&mut self, health_check: HttpHealthCheck) {
        self.health_checks.push(health_check);
    }
}

/// The kind-specific part of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Person {
        location: Location,
    },
    SoftwareSystem {
        location: Location,
    },
    Container {
        parent: Id,
        technology: String,
    },
    Component {
        parent: Id,
        technology: String,
        size: Option<i64>,
    },
    DeploymentNode {
        parent: Option<Id>,
        environment: String,
        technology: String,
        instances: u32,
    },
    InfrastructureNode {
        parent: Id,
        environment: String,
        technology: String,
    },
    ContainerInstance(Instance),
    SoftwareSystemInstance(Instance),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Person { .. } => ElementType::Person,
            Self::SoftwareSystem { .. } => ElementType::SoftwareSystem,
            Self::Container { .. } => ElementType::Container,
            Self::Component { .. } => ElementType::Component,
            Self::DeploymentNode { .. } => ElementType::DeploymentNode,
            Self::InfrastructureNode { .. } => ElementType::InfrastructureNode,
            Self::ContainerInstance(_) => ElementType::ContainerInstance,
            Self::SoftwareSystemInstance(_) => ElementType::SoftwareSystemInstance,
        }
    }

    /// The structural parent: software system for containers, container for
    /// components, deployment node for nested deployment elements.
    pub fn parent(&self) -> Option<Id> {
        match self {
            Self::Person { .. } | Self::SoftwareSystem { .. } => None,
            Self::Container { parent, .. }
            | Self::Component { parent, .. }
            | Self::InfrastructureNode { parent, .. } => Some(*parent),
            Self::DeploymentNode { parent, .. } => *parent,
            Self::ContainerInstance(instance) | Self::SoftwareSystemInstance(instance) => {
                Some(instance.parent)
            }
        }
    }

    pub fn environment(&self) -> Option<&str> {
        match self {
            Self::DeploymentNode { environment, .. }
            | Self::InfrastructureNode { environment, .. } => Some(environment),
            Self::ContainerInstance(instance) | Self::SoftwareSystemInstance(instance) => {
                Some(&instance.environment)
            }
            _ => None,
        }
    }

    pub fn technology(&self) -> Option<&str> {
        match self {
            Self::Container { technology, .. }
            | Self::Component { technology, .. }
            | Self::DeploymentNode { technology, .. }
            | Self::InfrastructureNode { technology, .. } => Some(technology),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Person { location } | Self::SoftwareSystem { location } => Some(*location),
            _ => None,
        }
    }

    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Self::ContainerInstance(instance) | Self::SoftwareSystemInstance(instance) => {
                Some(instance)
            }
            _ => None,
        }
    }

    fn default_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Person { .. } => &[tags::ELEMENT, tags::PERSON],
            Self::SoftwareSystem { .. } => &[tags::ELEMENT, tags::SOFTWARE_SYSTEM],
            Self::Container { .. } => &[tags::ELEMENT, tags::CONTAINER],
            Self::Component { .. } => &[tags::ELEMENT, tags::COMPONENT],
            Self::DeploymentNode { .. } => &[tags::ELEMENT, tags::DEPLOYMENT_NODE],
            Self::InfrastructureNode { .. } => &[tags::ELEMENT, tags::INFRASTRUCTURE_NODE],
            Self::ContainerInstance(_) => &[tags::CONTAINER_INSTANCE],
            Self::SoftwareSystemInstance(_) => &[tags::SOFTWARE_SYSTEM_INSTANCE],
        }
    }
}

/// A model element: person, software system, container, component or a
/// piece of deployment topology.
///
/// # Examples
///
/// ```
/// use structurizr_core::identifier::Id;
/// use structurizr_core::model::{Element, ElementKind, Location, ModelItem};
///
/// let user = Element::new(
///     Id::new("1"),
///     "User",
///     ElementKind::Person { location: Location::External },
/// )
/// .expect("valid person")
/// .with_description("A user of the system");
///
/// assert_eq!(user.name(), "User");
/// assert_eq!(user.tags().to_string(), "Element,Person");
///
/// // Elements must be identifiable.
/// assert!(Element::new(Id::new("2"), "  ", ElementKind::Person {
///     location: Location::Unspecified,
/// }).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: Id,
    name: String,
    description: String,
    url: Option<String>,
    group: Option<String>,
    tags: Tags,
    properties: Properties,
    perspectives: Vec<Perspective>,
    kind: ElementKind,
}

impl Element {
    /// Create a new element with the default tags for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the ID or the name is blank.
    pub fn new(id: Id, name: impl Into<String>, kind: ElementKind) -> Result<Self, ModelError> {
        let element_type = kind.element_type();
        if id.is_blank() {
            return Err(ModelError::validation(
                element_type.name(),
                "id",
                "must not be blank",
            ));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::validation(
                element_type.name(),
                "name",
                format!("must not be blank (element `{id}`)"),
            ));
        }

        Ok(Self {
            id,
            name,
            description: String::new(),
            url: None,
            group: None,
            tags: kind.default_tags().iter().copied().collect(),
            properties: Properties::new(),
            perspectives: Vec::new(),
            kind,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Set the group; blank group names are treated as no group.
    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.set_group(group);
        self
    }

    /// Replace the element's tags.
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group
            .map(|group| group.trim().to_owned())
            .filter(|group| !group.is_empty());
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn parent(&self) -> Option<Id> {
        self.kind.parent()
    }

    pub fn environment(&self) -> Option<&str> {
        self.kind.environment()
    }

    pub fn technology(&self) -> Option<&str> {
        self.kind.technology()
    }
}

impl ModelItem for Element {
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

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` ({})", self.element_type(), self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(parent: &str) -> ElementKind {
        ElementKind::Container {
            parent: Id::new(parent),
            technology: "Rust".to_string(),
        }
    }

    #[test]
    fn test_new_applies_default_tags() {
        let element = Element::new(Id::new("2"), "API", container("1")).expect("valid");
        assert_eq!(element.tags().to_string(), "Element,Container");
        assert_eq!(element.parent(), Some(Id::new("1")));
        assert_eq!(element.technology(), Some("Rust"));
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let err = Element::new(Id::new("2"), "", container("1")).unwrap_err();
        assert!(matches!(
            err,
            ModelError::Validation {
                kind: "container",
                field: "name",
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_blank_id() {
        let err = Element::new(
            Id::new(""),
            "User",
            ElementKind::Person {
                location: Location::Unspecified,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Validation { field: "id", .. }));
    }

    #[test]
    fn test_blank_group_is_none() {
        let element = Element::new(Id::new("3"), "DB", container("1"))
            .expect("valid")
            .with_group(Some("   ".to_string()));
        assert_eq!(element.group(), None);

        let element = element.with_group(Some(" Storage ".to_string()));
        assert_eq!(element.group(), Some("Storage"));
    }

    #[test]
    fn test_location_from_str() {
        assert_eq!("External".parse::<Location>(), Ok(Location::External));
        assert!("external".parse::<Location>().is_err());
    }

    #[test]
    fn test_instance_kind_accessors() {
        let kind = ElementKind::ContainerInstance(Instance::new(
            Id::new("10"),
            Id::new("2"),
            1,
            "Live",
        ));
        assert_eq!(kind.element_type(), ElementType::ContainerInstance);
        assert_eq!(kind.parent(), Some(Id::new("10")));
        assert_eq!(kind.environment(), Some("Live"));
        assert_eq!(kind.instance().map(Instance::element_id), Some(Id::new("2")));
        assert!(kind.element_type().is_deployment());
    }

    #[test]
    fn test_health_check_defaults() {
        let check = HttpHealthCheck::new("Ping", "https://example.com/health")
            .with_header("X-Health-Check", "1");
        assert_eq!(check.interval(), DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS);
        assert_eq!(check.timeout(), DEFAULT_HEALTH_CHECK_TIMEOUT_MILLISECONDS);
        assert_eq!(check.headers().get("X-Health-Check").map(String::as_str), Some("1"));
    }
}
