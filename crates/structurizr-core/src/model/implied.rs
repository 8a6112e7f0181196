//! Implied relationship derivation.
//!
//! When a relationship is added between two nested elements, their parents
//! can be related too: if container `A1` of system `A` uses container `B1` of
//! system `B`, then `A` uses `B`, `A` uses `B1` and `A1` uses `B`. The
//! [`ImpliedRelationshipStrategy`] of a [`Model`] decides which of these are
//! created.

use std::str::FromStr;

use log::debug;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{ElementType, Model, NewRelationship},
};

/// How implied relationships are derived when a relationship is added.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpliedRelationshipStrategy {
    /// Never create implied relationships.
    #[default]
    Ignore,
    /// Create an implied relationship between two ancestors unless any
    /// relationship already connects them in that direction.
    CreateUnlessAnyExist,
    /// Create an implied relationship between two ancestors unless one with
    /// the same description already connects them in that direction.
    CreateUnlessSameExists,
}

impl FromStr for ImpliedRelationshipStrategy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "create-unless-any-exist" => Ok(Self::CreateUnlessAnyExist),
            "create-unless-same-exists" => Ok(Self::CreateUnlessSameExists),
            _ => Err(
                "expected one of `ignore`, `create-unless-any-exist`, `create-unless-same-exists`",
            ),
        }
    }
}

impl Model {
    /// Derive the implied relationships of one relationship using the model's
    /// strategy, returning the IDs of the relationships created.
    ///
    /// Every combination of the source's and the destination's ancestors
    /// (each including the element itself and stopping at its software
    /// system) is considered. Pairs that are the same element, or where one
    /// is an ancestor of the other, are skipped. Implied relationships copy
    /// the description, technology, interaction style, tags and properties
    /// of the original and do not imply further relationships. Deriving twice
    /// creates nothing new the second time.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the relationship does not exist.
    pub fn create_implied_relationships(
        &mut self,
        relationship_id: Id,
    ) -> Result<Vec<Id>, ModelError> {
        let strategy = self.implied_relationship_strategy();
        if strategy == ImpliedRelationshipStrategy::Ignore {
            return Ok(Vec::new());
        }

        let relationship = self.relationship(relationship_id)?.clone();
        let sources = self.implied_ancestors(relationship.source_id());
        let destinations = self.implied_ancestors(relationship.destination_id());

        let mut created = Vec::new();
        for &source in &sources {
            for &destination in &destinations {
                if !self.implied_relationship_is_allowed(source, destination) {
                    continue;
                }
                let description = match strategy {
                    ImpliedRelationshipStrategy::CreateUnlessSameExists => {
                        Some(relationship.description())
                    }
                    _ => None,
                };
                if self.has_relationship(source, destination, description) {
                    continue;
                }

                let options = NewRelationship::cloned_from(&relationship);
                if let Some(id) = self.add_relationship(source, destination, options)? {
                    debug!(
                        id:%,
                        source:%,
                        destination:%,
                        implied_by:% = relationship_id;
                        "Created implied relationship"
                    );
                    created.push(id);
                }
            }
        }
        Ok(created)
    }

    /// Derive implied relationships for every relationship currently in the
    /// model, returning the IDs of the relationships created.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`create_implied_relationships`](Self::create_implied_relationships).
    pub fn create_all_implied_relationships(&mut self) -> Result<Vec<Id>, ModelError> {
        let existing: Vec<Id> = self
            .relationships()
            .map(crate::model::ModelItem::id)
            .collect();
        let mut created = Vec::new();
        for id in existing {
            created.extend(self.create_implied_relationships(id)?);
        }
        Ok(created)
    }

    /// The element followed by its parents, stopping at a software system.
    fn implied_ancestors(&self, id: Id) -> Vec<Id> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(element) = self.get_element(current) {
            if element.element_type() == ElementType::SoftwareSystem {
                break;
            }
            match element.parent() {
                Some(parent) if !chain.contains(&parent) => {
                    chain.push(parent);
                    current = parent;
                }
                _ => break,
            }
        }
        chain
    }

    fn implied_relationship_is_allowed(&self, source: Id, destination: Id) -> bool {
        source != destination
            && !self.implied_ancestors(destination).contains(&source)
            && !self.implied_ancestors(source).contains(&destination)
    }
}
