//! Rendering configuration shared by all views: styles, branding and
//! terminology.

use crate::view::Styles;

named_enum! {
    /// How views are listed by renderers.
    ViewSortOrder { Default, Type, Key }
}

/// A web font used for diagram text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub name: String,
    pub url: Option<String>,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// A logo and font applied to every diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branding {
    /// URL or data URI of the logo image.
    pub logo: Option<String>,
    pub font: Option<Font>,
}

/// Replacement names for the C4 abstractions, e.g. "Service" for
/// "Container".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terminology {
    pub enterprise: Option<String>,
    pub person: Option<String>,
    pub software_system: Option<String>,
    pub container: Option<String>,
    pub component: Option<String>,
    pub code: Option<String>,
    pub deployment_node: Option<String>,
    pub relationship: Option<String>,
}

/// How the views of a workspace are rendered.
///
/// Branding and terminology are `None` when a document did not mention
/// them, so that they are not written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub styles: Styles,
    pub branding: Option<Branding>,
    pub terminology: Option<Terminology>,
    /// URL of a theme to import styles from.
    pub theme: Option<String>,
    /// Key of the view shown first.
    pub default_view: Option<String>,
    pub last_saved_view: Option<String>,
    pub view_sort_order: Option<ViewSortOrder>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut Styles {
        &mut self.styles
    }

    pub fn branding_mut(&mut self) -> &mut Branding {
        self.branding.get_or_insert_with(Branding::default)
    }

    pub fn terminology_mut(&mut self) -> &mut Terminology {
        self.terminology.get_or_insert_with(Terminology::default)
    }

    pub fn set_default_view(&mut self, key: impl Into<String>) {
        self.default_view = Some(key.into());
    }
}
