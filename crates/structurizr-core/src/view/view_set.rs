//! The collection of views in a workspace.

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{ElementType, Model},
    view::{Configuration, DynamicView, FilterMode, FilteredView, View, ViewKind},
};

/// All views of a workspace and their rendering configuration.
///
/// Static, dynamic and filtered views share one key space: a key used by a
/// view of one sort cannot be used by another.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewSet {
    views: IndexMap<String, View>,
    dynamic_views: IndexMap<String, DynamicView>,
    filtered_views: IndexMap<String, FilteredView>,
    configuration: Option<Configuration>,
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no views of any kind and no configuration.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
            && self.dynamic_views.is_empty()
            && self.filtered_views.is_empty()
            && self.configuration.is_none()
    }

    /// Views in insertion order.
    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.values()
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut View> {
        self.views.values_mut()
    }

    pub fn view(&self, key: &str) -> Option<&View> {
        self.views.get(key)
    }

    pub fn view_mut(&mut self, key: &str) -> Option<&mut View> {
        self.views.get_mut(key)
    }

    /// Returns `true` if any view, including dynamic and filtered ones, uses
    /// the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.views.contains_key(key)
            || self.dynamic_views.contains_key(key)
            || self.filtered_views.contains_key(key)
    }

    fn check_key(&self, key: &str) -> Result<(), ModelError> {
        if self.contains_key(key) {
            return Err(ModelError::DuplicateViewKey {
                key: key.to_owned(),
            });
        }
        Ok(())
    }

    /// Add a view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateViewKey`] if the key is already used.
    pub fn insert_view(&mut self, view: View) -> Result<&mut View, ModelError> {
        self.check_key(view.key())?;
        debug!(key = view.key(), kind = view.view_type().name(); "Adding view");
        let entry = self.views.entry(view.key().to_owned());
        Ok(entry.or_insert(view))
    }

    pub fn create_system_landscape_view(
        &mut self,
        key: &str,
        description: &str,
    ) -> Result<&mut View, ModelError> {
        let view = View::new(
            key,
            description,
            ViewKind::SystemLandscape {
                enterprise_boundary_visible: None,
            },
        )?;
        self.insert_view(view)
    }

    /// Create a system context view of a software system.
    ///
    /// # Errors
    ///
    /// Fails if `software_system` is not a software system of the model, the
    /// key is blank or already used.
    pub fn create_system_context_view(
        &mut self,
        model: &Model,
        software_system: Id,
        key: &str,
        description: &str,
    ) -> Result<&mut View, ModelError> {
        check_scope(model, "system context view", software_system, ElementType::SoftwareSystem)?;
        let view = View::new(
            key,
            description,
            ViewKind::SystemContext {
                software_system_id: software_system,
                enterprise_boundary_visible: None,
            },
        )?;
        self.insert_view(view)
    }

    /// Create a container view of a software system.
    ///
    /// # Errors
    ///
    /// Fails if `software_system` is not a software system of the model, the
    /// key is blank or already used.
    pub fn create_container_view(
        &mut self,
        model: &Model,
        software_system: Id,
        key: &str,
        description: &str,
    ) -> Result<&mut View, ModelError> {
        check_scope(model, "container view", software_system, ElementType::SoftwareSystem)?;
        let view = View::new(
            key,
            description,
            ViewKind::Container {
                software_system_id: software_system,
                external_software_system_boundaries_visible: None,
            },
        )?;
        self.insert_view(view)
    }

    /// Create a component view of a container.
    ///
    /// # Errors
    ///
    /// Fails if `container` is not a container of the model, the key is blank
    /// or already used.
    pub fn create_component_view(
        &mut self,
        model: &Model,
        container: Id,
        key: &str,
        description: &str,
    ) -> Result<&mut View, ModelError> {
        check_scope(model, "component view", container, ElementType::Container)?;
        let view = View::new(
            key,
            description,
            ViewKind::Component {
                container_id: container,
                external_container_boundaries_visible: None,
            },
        )?;
        self.insert_view(view)
    }

    /// Create a deployment view, optionally scoped to a software system and
    /// an environment.
    ///
    /// # Errors
    ///
    /// Fails if `software_system` is given but is not a software system of
    /// the model, or the key is blank or already used.
    pub fn create_deployment_view(
        &mut self,
        model: &Model,
        software_system: Option<Id>,
        environment: Option<&str>,
        key: &str,
        description: &str,
    ) -> Result<&mut View, ModelError> {
        if let Some(software_system) = software_system {
            check_scope(model, "deployment view", software_system, ElementType::SoftwareSystem)?;
        }
        let view = View::new(
            key,
            description,
            ViewKind::Deployment {
                software_system_id: software_system,
                environment: environment.map(str::to_owned),
            },
        )?;
        self.insert_view(view)
    }

    /// Create a dynamic view, optionally scoped to a software system or a
    /// container.
    ///
    /// # Errors
    ///
    /// Fails if `element` is given but is neither a software system nor a
    /// container of the model, or the key is blank or already used.
    pub fn create_dynamic_view(
        &mut self,
        model: &Model,
        element: Option<Id>,
        key: &str,
        description: &str,
    ) -> Result<&mut DynamicView, ModelError> {
        if let Some(element) = element {
            let element_type = model.element(element)?.element_type();
            if !matches!(element_type, ElementType::SoftwareSystem | ElementType::Container) {
                return Err(ModelError::InvalidReference {
                    kind: "dynamic view",
                    id: element,
                    target: element,
                    expected: "software system or container",
                });
            }
        }
        let view = DynamicView::new(key, description, element)?;
        self.insert_dynamic_view(view)
    }

    /// Add a dynamic view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateViewKey`] if the key is already used.
    pub fn insert_dynamic_view(&mut self, view: DynamicView) -> Result<&mut DynamicView, ModelError> {
        self.check_key(view.key())?;
        debug!(key = view.key(), kind = "dynamic view"; "Adding view");
        let entry = self.dynamic_views.entry(view.key().to_owned());
        Ok(entry.or_insert(view))
    }

    pub fn dynamic_views(&self) -> impl Iterator<Item = &DynamicView> {
        self.dynamic_views.values()
    }

    pub fn dynamic_view(&self, key: &str) -> Option<&DynamicView> {
        self.dynamic_views.get(key)
    }

    pub fn dynamic_view_mut(&mut self, key: &str) -> Option<&mut DynamicView> {
        self.dynamic_views.get_mut(key)
    }

    /// Create a filtered view of an existing static view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownView`] if no static view has the base
    /// key, or fails if the key is blank or already used.
    pub fn create_filtered_view<I, S>(
        &mut self,
        base_view_key: &str,
        key: &str,
        description: &str,
        mode: FilterMode,
        tags: I,
    ) -> Result<&mut FilteredView, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let view = FilteredView::new(key, description, base_view_key, mode, tags)?;
        self.insert_filtered_view(view)
    }

    /// Add a filtered view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownView`] if its base view is not a static
    /// view of this set, or [`ModelError::DuplicateViewKey`] if the key is
    /// already used.
    pub fn insert_filtered_view(
        &mut self,
        view: FilteredView,
    ) -> Result<&mut FilteredView, ModelError> {
        if !self.views.contains_key(view.base_view_key()) {
            return Err(ModelError::UnknownView {
                key: view.base_view_key().to_owned(),
            });
        }
        self.check_key(view.key())?;
        debug!(key = view.key(), base = view.base_view_key(); "Adding filtered view");
        let entry = self.filtered_views.entry(view.key().to_owned());
        Ok(entry.or_insert(view))
    }

    pub fn filtered_views(&self) -> impl Iterator<Item = &FilteredView> {
        self.filtered_views.values()
    }

    pub fn filtered_view(&self, key: &str) -> Option<&FilteredView> {
        self.filtered_views.get(key)
    }

    /// The rendering configuration, if one was set or read.
    pub fn configuration(&self) -> Option<&Configuration> {
        self.configuration.as_ref()
    }

    /// The rendering configuration, created empty on first use.
    pub fn configuration_mut(&mut self) -> &mut Configuration {
        self.configuration.get_or_insert_with(Configuration::default)
    }

    pub fn set_configuration(&mut self, configuration: Option<Configuration>) {
        self.configuration = configuration;
    }

    /// Copy layout information from the views of another view set that have
    /// the same key and type. Filtered views carry no layout.
    pub fn copy_layout_information_from(&mut self, source: &ViewSet) {
        for view in self.views.values_mut() {
            let Some(source_view) = source.views.get(view.key()) else {
                continue;
            };
            if source_view.view_type() == view.view_type() {
                debug!(key = view.key(); "Copying layout information");
                view.copy_layout_information_from(source_view);
            }
        }
        for view in self.dynamic_views.values_mut() {
            if let Some(source_view) = source.dynamic_views.get(view.key()) {
                debug!(key = view.key(); "Copying layout information");
                view.copy_layout_information_from(source_view);
            }
        }
    }
}

fn check_scope(
    model: &Model,
    view: &'static str,
    id: Id,
    expected: ElementType,
) -> Result<(), ModelError> {
    if model.element(id)?.element_type() != expected {
        return Err(ModelError::InvalidReference {
            kind: view,
            id,
            target: id,
            expected: expected.name(),
        });
    }
    Ok(())
}
