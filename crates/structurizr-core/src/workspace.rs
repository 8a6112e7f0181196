//! The workspace: root aggregate of a Structurizr document.

use serde_json::Value;

use crate::{model::Model, view::ViewSet};

/// A software architecture workspace: its metadata, model and views.
///
/// Documentation and workspace-level configuration are not interpreted and
/// are carried as raw JSON.
///
/// # Examples
///
/// ```
/// use structurizr_core::Workspace;
///
/// let mut workspace = Workspace::new(42, "Shop", "The online shop");
/// let (model, views) = workspace.model_and_views_mut();
/// let shop = model.add_software_system("Shop", "").unwrap();
/// views.create_system_context_view(model, shop, "context", "").unwrap();
///
/// assert_eq!(workspace.views().views().count(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workspace {
    id: i64,
    name: String,
    description: String,
    version: Option<String>,
    revision: Option<i64>,
    thumbnail: Option<String>,
    last_modified_date: Option<String>,
    last_modified_user: Option<String>,
    last_modified_agent: Option<String>,
    model: Model,
    views: ViewSet,
    documentation: Option<Value>,
    configuration: Option<Value>,
}

impl Workspace {
    /// Create a workspace with an empty model and no views.
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn revision(&self) -> Option<i64> {
        self.revision
    }

    pub fn set_revision(&mut self, revision: Option<i64>) {
        self.revision = revision;
    }

    /// Base64 PNG preview as stored by the server.
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn set_thumbnail(&mut self, thumbnail: Option<String>) {
        self.thumbnail = thumbnail;
    }

    pub fn last_modified_date(&self) -> Option<&str> {
        self.last_modified_date.as_deref()
    }

    pub fn set_last_modified_date(&mut self, date: Option<String>) {
        self.last_modified_date = date;
    }

    pub fn last_modified_user(&self) -> Option<&str> {
        self.last_modified_user.as_deref()
    }

    pub fn set_last_modified_user(&mut self, user: Option<String>) {
        self.last_modified_user = user;
    }

    pub fn last_modified_agent(&self) -> Option<&str> {
        self.last_modified_agent.as_deref()
    }

    pub fn set_last_modified_agent(&mut self, agent: Option<String>) {
        self.last_modified_agent = agent;
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut ViewSet {
        &mut self.views
    }

    /// Borrow the model and the views at the same time, for populating
    /// views from the model.
    pub fn model_and_views_mut(&mut self) -> (&mut Model, &mut ViewSet) {
        (&mut self.model, &mut self.views)
    }

    pub fn documentation(&self) -> Option<&Value> {
        self.documentation.as_ref()
    }

    pub fn set_documentation(&mut self, documentation: Option<Value>) {
        self.documentation = documentation;
    }

    pub fn configuration(&self) -> Option<&Value> {
        self.configuration.as_ref()
    }

    pub fn set_configuration(&mut self, configuration: Option<Value>) {
        self.configuration = configuration;
    }
}
