//! Element and relationship styles, matched against tags when a diagram is
//! rendered.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

use crate::view::Routing;

/// An sRGB color, written as `#rrggbb` (or `#rrggbbaa` when translucent).
///
/// Any CSS color notation is accepted when parsing.
///
/// # Examples
///
/// ```
/// use structurizr_core::view::Color;
///
/// let color: Color = "white".parse().unwrap();
/// assert_eq!(color.to_string(), "#ffffff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl Color {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color =
            DynamicColor::from_str(s).map_err(|err| format!("invalid color `{s}`: {err}"))?;
        let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self {
            red: rgba.r,
            green: rgba.g,
            blue: rgba.b,
            alpha: rgba.a,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)?;
        if self.alpha != u8::MAX {
            write!(f, "{:02x}", self.alpha)?;
        }
        Ok(())
    }
}

named_enum! {
    /// The shape an element is drawn as.
    Shape {
        Box,
        RoundedBox,
        Circle,
        Ellipse,
        Hexagon,
        Diamond,
        Cylinder,
        Bucket,
        Pipe,
        Person,
        Robot,
        Folder,
        WebBrowser,
        Window,
        MobileDevicePortrait,
        MobileDeviceLandscape,
        Component,
    }
}

named_enum! {
    /// Line style of an element border.
    Border { Solid, Dashed, Dotted }
}

/// How elements carrying a tag are drawn.
///
/// Unset fields fall back to the styles of other tags, then to the
/// renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyle {
    pub tag: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub background: Option<Color>,
    pub stroke: Option<Color>,
    pub color: Option<Color>,
    pub font_size: Option<i64>,
    pub shape: Option<Shape>,
    pub icon: Option<String>,
    pub border: Option<Border>,
    /// Percentage from 0 (transparent) to 100 (opaque).
    pub opacity: Option<u8>,
    pub metadata: Option<bool>,
    pub description: Option<bool>,
}

impl ElementStyle {
    pub const DEFAULT_WIDTH: i64 = 450;
    pub const DEFAULT_HEIGHT: i64 = 300;

    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set every field of `other` that is set, leaving the rest untouched.
    fn overlay(&mut self, other: &ElementStyle) {
        macro_rules! take {
            ($($field:ident),+) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })+
            };
        }
        take!(
            width,
            height,
            background,
            stroke,
            color,
            font_size,
            shape,
            icon,
            border,
            opacity,
            metadata,
            description
        );
    }
}

/// How relationships carrying a tag are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipStyle {
    pub tag: String,
    pub thickness: Option<i64>,
    pub width: Option<i64>,
    pub color: Option<Color>,
    pub font_size: Option<i64>,
    pub dashed: Option<bool>,
    pub routing: Option<Routing>,
    /// Label position along the line, from 0 (start) to 100 (end).
    pub position: Option<u8>,
    pub opacity: Option<u8>,
}

impl RelationshipStyle {
    pub const START_OF_LINE: u8 = 0;
    pub const END_OF_LINE: u8 = 100;

    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

/// The element and relationship styles of a workspace, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styles {
    elements: Vec<ElementStyle>,
    relationships: Vec<RelationshipStyle>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.relationships.is_empty()
    }

    pub fn element_styles(&self) -> &[ElementStyle] {
        &self.elements
    }

    pub fn relationship_styles(&self) -> &[RelationshipStyle] {
        &self.relationships
    }

    pub fn add_element_style(&mut self, style: ElementStyle) -> &mut ElementStyle {
        self.elements.push(style);
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    pub fn add_relationship_style(&mut self, style: RelationshipStyle) -> &mut RelationshipStyle {
        self.relationships.push(style);
        let last = self.relationships.len() - 1;
        &mut self.relationships[last]
    }

    pub fn clear_element_styles(&mut self) {
        self.elements.clear();
    }

    pub fn clear_relationship_styles(&mut self) {
        self.relationships.clear();
    }

    /// The first element style declared for the tag.
    pub fn element_style(&self, tag: &str) -> Option<&ElementStyle> {
        self.elements.iter().find(|style| style.tag == tag)
    }

    /// The first relationship style declared for the tag.
    pub fn relationship_style(&self, tag: &str) -> Option<&RelationshipStyle> {
        self.relationships.iter().find(|style| style.tag == tag)
    }

    /// Combine the styles of every tag an element carries.
    ///
    /// Tags are applied in order, so a later tag overrides the fields an
    /// earlier one set. The returned style carries the last matching tag.
    ///
    /// ```
    /// use structurizr_core::view::{Color, ElementStyle, Shape, Styles};
    ///
    /// let mut styles = Styles::new();
    /// styles.add_element_style(ElementStyle {
    ///     shape: Some(Shape::Person),
    ///     background: Some(Color::rgb(0, 0, 0)),
    ///     ..ElementStyle::new("Person")
    /// });
    /// styles.add_element_style(ElementStyle {
    ///     background: Some(Color::rgb(255, 255, 255)),
    ///     ..ElementStyle::new("External")
    /// });
    ///
    /// let style = styles.resolve_element_style(["Element", "Person", "External"]);
    /// assert_eq!(style.shape, Some(Shape::Person));
    /// assert_eq!(style.background, Some(Color::rgb(255, 255, 255)));
    /// ```
    pub fn resolve_element_style<'t>(
        &self,
        tags: impl IntoIterator<Item = &'t str>,
    ) -> ElementStyle {
        let mut resolved = ElementStyle::default();
        for tag in tags {
            for style in self.elements.iter().filter(|style| style.tag == tag) {
                resolved.overlay(style);
                resolved.tag = tag.to_owned();
            }
        }
        resolved
    }
}
