//! Dynamic views: numbered interactions between elements at runtime.
//!
//! A dynamic view is scoped to nothing (people and software systems), a
//! software system (its containers and the people and systems around it) or
//! a container (its components and their neighbours). Unlike static views,
//! the same relationship may appear several times, each time as a separate
//! interaction with its own order.

use std::cmp::Ordering;

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{ElementType, Model, ModelItem, Relationship},
    view::{AutomaticLayout, ElementView, PaperSize, RelationshipView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Counter {
    prefix: Option<String>,
    sequence: u32,
}

impl Counter {
    fn label(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}.{}", self.sequence),
            None => self.sequence.to_string(),
        }
    }
}

/// Issues interaction orders: `1`, `2`, ... at the top level and `1.1`,
/// `1.2`, ... inside a subsequence.
///
/// A parallel sequence starts from the current number and, when it ends,
/// either rewinds so that the next parallel sequence reuses the same
/// numbers or continues from where it stopped.
///
/// ```
/// use structurizr_core::view::SequenceNumber;
///
/// let mut sequence = SequenceNumber::new();
/// assert_eq!(sequence.next_order(), "1");
/// sequence.start_subsequence();
/// assert_eq!(sequence.next_order(), "1.1");
/// sequence.end_subsequence();
/// assert_eq!(sequence.next_order(), "2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNumber {
    counters: Vec<Counter>,
}

impl Default for SequenceNumber {
    fn default() -> Self {
        Self {
            counters: vec![Counter {
                prefix: None,
                sequence: 0,
            }],
        }
    }
}

impl SequenceNumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_order(&mut self) -> String {
        let counter = self.current_mut();
        counter.sequence += 1;
        counter.label()
    }

    pub fn start_subsequence(&mut self) {
        let prefix = self.current().label();
        self.counters.push(Counter {
            prefix: Some(prefix),
            sequence: 0,
        });
    }

    /// Return to the enclosing sequence. Does nothing at the top level.
    pub fn end_subsequence(&mut self) {
        if self.counters.len() > 1 {
            self.counters.pop();
        }
    }

    pub fn start_parallel_sequence(&mut self) {
        let current = self.current().clone();
        self.counters.push(current);
    }

    /// End a parallel sequence, keeping its last number when
    /// `continue_numbering` is set.
    pub fn end_parallel_sequence(&mut self, continue_numbering: bool) {
        if self.counters.len() < 2 {
            return;
        }
        if let Some(ended) = self.counters.pop() {
            if continue_numbering {
                self.current_mut().sequence = ended.sequence;
            }
        }
    }

    /// Make sure the next top-level order comes after `order`.
    fn advance_past(&mut self, order: &str) {
        let Some(first) = order.split('.').next().and_then(|s| s.parse::<u32>().ok()) else {
            return;
        };
        let root = &mut self.counters[0];
        root.sequence = root.sequence.max(first);
    }

    fn current(&self) -> &Counter {
        &self.counters[self.counters.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Counter {
        let last = self.counters.len() - 1;
        &mut self.counters[last]
    }
}

/// Compare interaction orders segment by segment, numerically where the
/// segments are numbers, so that `1.2 < 1.10 < 2`.
pub(crate) fn compare_orders(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) => {
                let ordering = l.len().cmp(&r.len()).then_with(|| l.cmp(r));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// A diagram of numbered interactions.
///
/// # Examples
///
/// ```
/// use structurizr_core::model::Model;
/// use structurizr_core::view::DynamicView;
///
/// let mut model = Model::new();
/// let user = model.add_person("User", "").unwrap();
/// let shop = model.add_software_system("Shop", "").unwrap();
/// model.uses(user, shop, "Places order with").unwrap();
///
/// let mut view = DynamicView::new("checkout", "", None).unwrap();
/// view.add(&model, user, shop, None, None).unwrap();
/// view.add(&model, shop, user, Some("Confirms order to"), None).unwrap();
///
/// let orders: Vec<_> = view.relationship_views().filter_map(|r| r.order()).collect();
/// assert_eq!(orders, vec!["1", "2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicView {
    key: String,
    description: String,
    title: String,
    paper_size: Option<PaperSize>,
    automatic_layout: Option<AutomaticLayout>,
    element_id: Option<Id>,
    elements: IndexMap<Id, ElementView>,
    relationships: Vec<RelationshipView>,
    sequence: SequenceNumber,
}

impl DynamicView {
    /// Create an empty dynamic view, scoped to a software system or
    /// container when `element_id` is given.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the key is blank.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        element_id: Option<Id>,
    ) -> Result<Self, ModelError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ModelError::validation("dynamic view", "key", "must not be blank"));
        }
        Ok(Self {
            key,
            description: description.into(),
            title: String::new(),
            paper_size: None,
            automatic_layout: None,
            element_id,
            elements: IndexMap::new(),
            relationships: Vec::new(),
            sequence: SequenceNumber::new(),
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

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn paper_size(&self) -> Option<PaperSize> {
        self.paper_size
    }

    pub fn automatic_layout(&self) -> Option<&AutomaticLayout> {
        self.automatic_layout.as_ref()
    }

    /// The software system or container in scope, if any.
    pub fn element_id(&self) -> Option<Id> {
        self.element_id
    }

    pub fn element_views(&self) -> impl Iterator<Item = &ElementView> {
        self.elements.values()
    }

    /// Interactions in the order they were added.
    pub fn relationship_views(&self) -> impl Iterator<Item = &RelationshipView> {
        self.relationships.iter()
    }

    /// Interactions sorted by their order, e.g. `1`, `1.1`, `2`, `10`.
    pub fn ordered_relationship_views(&self) -> Vec<&RelationshipView> {
        let mut ordered: Vec<_> = self.relationships.iter().collect();
        ordered.sort_by(|a, b| compare_orders(a.order().unwrap_or(""), b.order().unwrap_or("")));
        ordered
    }

    pub fn contains_element(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    /// Insert or replace an element view without consulting the model.
    pub fn insert_element_view(&mut self, element_view: ElementView) {
        self.elements.insert(element_view.id(), element_view);
    }

    /// Append an interaction without consulting the model.
    ///
    /// Interactions added later with [`add`](Self::add) are numbered after
    /// the highest top-level order seen here.
    pub fn insert_relationship_view(&mut self, relationship_view: RelationshipView) {
        if let Some(order) = relationship_view.order() {
            self.sequence.advance_past(order);
        }
        self.relationships.push(relationship_view);
    }

    /// Returns `true` if the element may appear in this view.
    pub fn is_element_allowed(&self, model: &Model, id: Id) -> bool {
        let Some(element) = model.get_element(id) else {
            return false;
        };
        let element_type = element.element_type();
        if !element_type.is_static_structure() {
            return false;
        }
        if element_type == ElementType::Person {
            return true;
        }
        let Some(scope) = self.element_id else {
            return element_type == ElementType::SoftwareSystem;
        };
        let scope_type = model.get_element(scope).map(|scope| scope.element_type());
        let in_scope = match scope_type {
            Some(ElementType::SoftwareSystem) => {
                id != scope && element_type != ElementType::Component
            }
            Some(ElementType::Container) => {
                id != scope && model.get_element(scope).and_then(|s| s.parent()) != Some(id)
            }
            _ => false,
        };
        in_scope && !self.has_parent_or_child_of(model, id)
    }

    /// Add an element without any relationships.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] for an unknown ID and
    /// [`ModelError::ElementNotAllowed`] if the element cannot appear in this
    /// view.
    pub fn add_element(&mut self, model: &Model, id: Id) -> Result<(), ModelError> {
        model.element(id)?;
        if !self.is_element_allowed(model, id) {
            return Err(ModelError::ElementNotAllowed {
                view: self.key.clone(),
                id,
            });
        }
        self.elements.entry(id).or_insert_with(|| ElementView::new(id));
        Ok(())
    }

    /// Add an interaction from `source` to `destination` with the next
    /// order.
    ///
    /// The relationship is looked up in the model: first one in the same
    /// direction with the given description, then one in the same direction
    /// with any description, and finally one in the opposite direction, in
    /// which case the interaction is marked as a response. A technology, if
    /// given, must match. The description defaults to the relationship's.
    ///
    /// # Errors
    ///
    /// Fails if either element cannot appear in this view, or with
    /// [`ModelError::NoRelationship`] if no relationship connects them.
    pub fn add(
        &mut self,
        model: &Model,
        source: Id,
        destination: Id,
        description: Option<&str>,
        technology: Option<&str>,
    ) -> Result<&RelationshipView, ModelError> {
        for id in [source, destination] {
            model.element(id)?;
            if !self.is_element_allowed(model, id) && !self.contains_element(id) {
                return Err(ModelError::ElementNotAllowed {
                    view: self.key.clone(),
                    id,
                });
            }
        }
        let (relationship, response) =
            find_relationship(model, source, destination, description, technology)
                .ok_or(ModelError::NoRelationship {
                    source_id: source,
                    destination_id: destination,
                })?;

        for id in [source, destination] {
            self.elements.entry(id).or_insert_with(|| ElementView::new(id));
        }
        let order = self.sequence.next_order();
        trace!(view = self.key.as_str(), relationship:% = relationship.id(), order = order.as_str(); "Adding interaction");
        let description = description.unwrap_or(relationship.description()).to_owned();
        self.relationships.push(
            RelationshipView::new(relationship.id())
                .with_description(Some(description))
                .with_order(Some(order))
                .with_response(response),
        );
        let last = self.relationships.len() - 1;
        Ok(&self.relationships[last])
    }

    /// Number the interactions added by `f` as a subsequence of the current
    /// interaction.
    pub fn subsequence<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.sequence.start_subsequence();
        let result = f(self);
        self.sequence.end_subsequence();
        result
    }

    /// Number the interactions added by `f` in parallel with those of the
    /// next parallel sequence.
    pub fn parallel_sequence<R>(
        &mut self,
        continue_numbering: bool,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.sequence.start_parallel_sequence();
        let result = f(self);
        self.sequence.end_parallel_sequence(continue_numbering);
        result
    }

    /// Copy the paper size (when this view has none), element positions and
    /// the vertices of interactions with the same relationship and order.
    pub fn copy_layout_information_from(&mut self, source: &DynamicView) {
        if self.paper_size.is_none() {
            self.paper_size = source.paper_size;
        }
        for (id, element_view) in &mut self.elements {
            if let Some(source_view) = source.elements.get(id) {
                element_view.copy_layout_information_from(source_view);
            }
        }
        for relationship_view in &mut self.relationships {
            let matching = source.relationships.iter().find(|candidate| {
                candidate.id() == relationship_view.id()
                    && candidate.order() == relationship_view.order()
            });
            if let Some(source_view) = matching {
                relationship_view.copy_layout_information_from(source_view);
            }
        }
    }

    fn has_parent_or_child_of(&self, model: &Model, id: Id) -> bool {
        let ancestors = model.ancestors(id);
        self.elements.keys().any(|shown| {
            *shown != id && (ancestors.contains(shown) || model.is_ancestor(id, *shown))
        })
    }
}

fn find_relationship<'m>(
    model: &'m Model,
    source: Id,
    destination: Id,
    description: Option<&str>,
    technology: Option<&str>,
) -> Option<(&'m Relationship, bool)> {
    let technology_matches = |relationship: &Relationship| {
        technology.is_none_or(|technology| relationship.technology() == technology)
    };
    let forward = || {
        model
            .efferent_relationships(source)
            .filter(move |relationship| relationship.destination_id() == destination)
            .filter(move |relationship| technology_matches(*relationship))
    };

    let described = forward().find(|relationship| {
        description.is_none_or(|description| relationship.description() == description)
    });
    if let Some(relationship) = described.or_else(|| forward().next()) {
        return Some((relationship, false));
    }
    model
        .afferent_relationships(source)
        .filter(|relationship| relationship.source_id() == destination)
        .find(|relationship| technology_matches(*relationship))
        .map(|relationship| (relationship, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewRelationship;

    struct Fixture {
        model: Model,
        user: Id,
        shop: Id,
        web: Id,
        api: Id,
        db: Id,
    }

    fn fixture() -> Fixture {
        let mut model = Model::new();
        let user = model.add_person("User", "").unwrap();
        let shop = model.add_software_system("Shop", "").unwrap();
        let web = model.add_container(shop, "Web", "", "").unwrap();
        let api = model.add_container(shop, "API", "", "").unwrap();
        let db = model.add_container(shop, "DB", "", "").unwrap();
        model.uses(user, web, "Visits").unwrap();
        model.uses(web, api, "Calls").unwrap();
        model
            .add_relationship(api, db, NewRelationship::new("Reads from").with_technology("SQL"))
            .unwrap();
        Fixture {
            model,
            user,
            shop,
            web,
            api,
            db,
        }
    }

    fn orders(view: &DynamicView) -> Vec<&str> {
        view.relationship_views().filter_map(RelationshipView::order).collect()
    }

    #[test]
    fn test_sequence_numbers() {
        let mut sequence = SequenceNumber::new();
        assert_eq!(sequence.next_order(), "1");
        sequence.start_subsequence();
        assert_eq!(sequence.next_order(), "1.1");
        sequence.start_subsequence();
        assert_eq!(sequence.next_order(), "1.1.1");
        sequence.end_subsequence();
        assert_eq!(sequence.next_order(), "1.2");
        sequence.end_subsequence();
        sequence.end_subsequence();
        assert_eq!(sequence.next_order(), "2");
    }

    #[test]
    fn test_parallel_sequences_share_numbers() {
        let mut sequence = SequenceNumber::new();
        assert_eq!(sequence.next_order(), "1");

        sequence.start_parallel_sequence();
        assert_eq!(sequence.next_order(), "2");
        assert_eq!(sequence.next_order(), "3");
        sequence.end_parallel_sequence(false);

        sequence.start_parallel_sequence();
        assert_eq!(sequence.next_order(), "2");
        assert_eq!(sequence.next_order(), "3");
        sequence.end_parallel_sequence(true);

        assert_eq!(sequence.next_order(), "4");
    }

    #[test]
    fn test_compare_orders_numeric_segments() {
        let mut orders = vec!["10", "2", "1.10", "1.2", "1", "1.2.1"];
        orders.sort_by(|a, b| compare_orders(a, b));
        assert_eq!(orders, vec!["1", "1.2", "1.2.1", "1.10", "2", "10"]);
    }

    #[test]
    fn test_add_numbers_interactions() {
        let f = fixture();
        let mut view = DynamicView::new("request", "", Some(f.shop)).unwrap();
        view.add(&f.model, f.user, f.web, None, None).unwrap();
        view.subsequence(|view| {
            view.add(&f.model, f.web, f.api, None, None).unwrap();
            view.add(&f.model, f.api, f.db, None, Some("SQL")).unwrap();
        });
        view.add(&f.model, f.web, f.user, Some("Shows results to"), None)
            .unwrap();

        assert_eq!(orders(&view), vec!["1", "1.1", "1.2", "2"]);
        let last = view.relationship_views().last().unwrap();
        assert!(last.is_response());
        assert_eq!(last.description(), Some("Shows results to"));
        assert_eq!(view.element_views().count(), 4);
    }

    #[test]
    fn test_same_relationship_twice() {
        let f = fixture();
        let mut view = DynamicView::new("retry", "", Some(f.shop)).unwrap();
        let first = view.add(&f.model, f.web, f.api, None, None).unwrap().id();
        let second = view
            .add(&f.model, f.web, f.api, Some("Retries"), None)
            .unwrap()
            .id();

        assert_eq!(first, second);
        assert_eq!(orders(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_add_without_relationship() {
        let f = fixture();
        let mut view = DynamicView::new("bad", "", Some(f.shop)).unwrap();
        let err = view.add(&f.model, f.user, f.db, None, None).unwrap_err();
        assert_eq!(
            err,
            ModelError::NoRelationship {
                source_id: f.user,
                destination_id: f.db,
            }
        );

        let err = view.add(&f.model, f.api, f.db, None, Some("HTTP")).unwrap_err();
        assert!(matches!(err, ModelError::NoRelationship { .. }));
        assert!(view.relationship_views().next().is_none());
    }

    #[test]
    fn test_scope_rules() {
        let f = fixture();
        let unscoped = DynamicView::new("landscape", "", None).unwrap();
        assert!(unscoped.is_element_allowed(&f.model, f.user));
        assert!(unscoped.is_element_allowed(&f.model, f.shop));
        assert!(!unscoped.is_element_allowed(&f.model, f.web));

        let scoped = DynamicView::new("containers", "", Some(f.shop)).unwrap();
        assert!(!scoped.is_element_allowed(&f.model, f.shop));
        assert!(scoped.is_element_allowed(&f.model, f.web));

        let container = DynamicView::new("components", "", Some(f.api)).unwrap();
        assert!(!container.is_element_allowed(&f.model, f.api));
        assert!(!container.is_element_allowed(&f.model, f.shop));
        assert!(container.is_element_allowed(&f.model, f.db));
    }

    #[test]
    fn test_parent_and_child_not_shown_together() {
        let mut model = Model::new();
        let shop = model.add_software_system("Shop", "").unwrap();
        let bank = model.add_software_system("Bank", "").unwrap();
        let ledger = model.add_container(bank, "Ledger", "", "").unwrap();

        let mut view = DynamicView::new("payments", "", Some(shop)).unwrap();
        view.add_element(&model, bank).unwrap();
        let err = view.add_element(&model, ledger).unwrap_err();
        assert!(matches!(err, ModelError::ElementNotAllowed { .. }));
    }

    #[test]
    fn test_loaded_orders_continue_numbering() {
        let f = fixture();
        let mut view = DynamicView::new("loaded", "", Some(f.shop)).unwrap();
        let existing = f.model.efferent_relationships(f.user).next().unwrap().id();
        view.insert_relationship_view(
            RelationshipView::new(existing).with_order(Some("3".to_string())),
        );

        view.add(&f.model, f.web, f.api, None, None).unwrap();
        assert_eq!(orders(&view), vec!["3", "4"]);
    }
}
