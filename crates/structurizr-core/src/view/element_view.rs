//! Placement of model items inside a view.

use crate::{
    identifier::Id,
    view::layout::{Routing, Vertex},
};

/// An element shown in a view, with its optional position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
    id: Id,
    x: Option<i64>,
    y: Option<i64>,
}

impl ElementView {
    pub fn new(id: Id) -> Self {
        Self { id, x: None, y: None }
    }

    pub fn with_position(mut self, x: Option<i64>, y: Option<i64>) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn x(&self) -> Option<i64> {
        self.x
    }

    pub fn y(&self) -> Option<i64> {
        self.y
    }

    pub fn copy_layout_information_from(&mut self, source: &Self) {
        self.x = source.x;
        self.y = source.y;
    }
}

/// A relationship shown in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipView {
    id: Id,
    description: Option<String>,
    order: Option<String>,
    response: bool,
    vertices: Vec<Vertex>,
    routing: Option<Routing>,
    position: Option<i64>,
}

impl RelationshipView {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            description: None,
            order: None,
            response: false,
            vertices: Vec::new(),
            routing: None,
            position: None,
        }
    }

    /// Override the relationship's description in this view.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_order(mut self, order: Option<String>) -> Self {
        self.order = order;
        self
    }

    /// Mark the view as an interaction running against the direction of its
    /// relationship.
    pub fn with_response(mut self, response: bool) -> Self {
        self.response = response;
        self
    }

    pub fn with_vertices(mut self, vertices: Vec<Vertex>) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn with_routing(mut self, routing: Option<Routing>) -> Self {
        self.routing = routing;
        self
    }

    /// Set the label position along the line, from 0 (start) to 100 (end).
    pub fn with_position(mut self, position: Option<i64>) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn is_response(&self) -> bool {
        self.response
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn routing(&self) -> Option<Routing> {
        self.routing
    }

    pub fn position(&self) -> Option<i64> {
        self.position
    }

    /// Copy vertices, routing and label position.
    pub fn copy_layout_information_from(&mut self, source: &Self) {
        self.vertices = source.vertices.clone();
        self.routing = source.routing;
        self.position = source.position;
    }
}

/// One step of a view animation: the items revealed at that step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    order: i64,
    elements: Vec<Id>,
    relationships: Vec<Id>,
}

impl Animation {
    pub fn new(order: i64, elements: Vec<Id>, relationships: Vec<Id>) -> Self {
        Self {
            order,
            elements,
            relationships,
        }
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn elements(&self) -> &[Id] {
        &self.elements
    }

    pub fn relationships(&self) -> &[Id] {
        &self.relationships
    }
}
