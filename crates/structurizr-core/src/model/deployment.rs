//! Deployment topology: deployment nodes, infrastructure nodes and instances.
//!
//! Deployment elements live in a named environment (`"Default"` unless
//! given). Nested deployment nodes, infrastructure nodes and instances take
//! the environment of the deployment node that hosts them.
//!
//! Adding an instance with replication enabled copies the relationships
//! between the underlying containers or software systems onto the instances
//! deployed in the same environment. Each copy records the relationship it
//! was replicated from in its `linked_relationship_id`.

use log::debug;

use crate::{
    error::ModelError,
    identifier::Id,
    model::{
        DEFAULT_DEPLOYMENT_ENVIRONMENT, Element, ElementKind, ElementType, Instance, Model,
        ModelItem, NewRelationship, Relationship,
    },
};

fn normalize_environment(environment: &str) -> String {
    let environment = environment.trim();
    if environment.is_empty() {
        DEFAULT_DEPLOYMENT_ENVIRONMENT.to_owned()
    } else {
        environment.to_owned()
    }
}

impl Model {
    /// Add a top-level deployment node to an environment.
    ///
    /// A blank environment means [`DEFAULT_DEPLOYMENT_ENVIRONMENT`].
    ///
    /// # Errors
    ///
    /// Fails if the name is blank or another top-level node in the same
    /// environment has the same name.
    pub fn add_deployment_node(
        &mut self,
        environment: &str,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let environment = normalize_environment(environment);
        self.ensure_unique_deployment_name(None, &environment, name)?;
        self.add_element(
            name,
            description,
            ElementKind::DeploymentNode {
                parent: None,
                environment,
                technology: technology.to_owned(),
                instances: 1,
            },
        )
    }

    /// Add a deployment node nested in another one, in the parent's
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails if the parent is not a deployment node, the name is blank or a
    /// sibling node has the same name.
    pub fn add_child_deployment_node(
        &mut self,
        parent: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let environment = self.deployment_node_environment(parent)?;
        self.ensure_unique_deployment_name(Some(parent), &environment, name)?;
        self.add_element(
            name,
            description,
            ElementKind::DeploymentNode {
                parent: Some(parent),
                environment,
                technology: technology.to_owned(),
                instances: 1,
            },
        )
    }

    /// Add an infrastructure node (load balancer, firewall, DNS, ...) to a
    /// deployment node.
    ///
    /// # Errors
    ///
    /// Fails if the parent is not a deployment node or the name is blank.
    pub fn add_infrastructure_node(
        &mut self,
        deployment_node: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let environment = self.deployment_node_environment(deployment_node)?;
        self.add_element(
            name,
            description,
            ElementKind::InfrastructureNode {
                parent: deployment_node,
                environment,
                technology: technology.to_owned(),
            },
        )
    }

    /// Deploy a container onto a deployment node.
    ///
    /// With `replicate`, relationships between the container and the
    /// elements of other instances in the same environment are copied onto
    /// the new instance.
    ///
    /// # Errors
    ///
    /// Fails if `deployment_node` is not a deployment node or `container` is
    /// not a container.
    pub fn add_container_instance(
        &mut self,
        deployment_node: Id,
        container: Id,
        replicate: bool,
    ) -> Result<Id, ModelError> {
        self.add_instance(deployment_node, container, ElementType::Container, replicate)
    }

    /// Deploy a software system onto a deployment node.
    ///
    /// # Errors
    ///
    /// Fails if `deployment_node` is not a deployment node or
    /// `software_system` is not a software system.
    pub fn add_software_system_instance(
        &mut self,
        deployment_node: Id,
        software_system: Id,
        replicate: bool,
    ) -> Result<Id, ModelError> {
        self.add_instance(
            deployment_node,
            software_system,
            ElementType::SoftwareSystem,
            replicate,
        )
    }

    /// Container and software system instances deployed in an environment.
    pub fn instances_in(&self, environment: &str) -> impl Iterator<Item = &Element> {
        self.elements().filter(move |element| {
            element
                .kind()
                .instance()
                .is_some_and(|instance| instance.environment() == environment)
        })
    }

    /// Copy the relationships of the instantiated element onto an instance.
    ///
    /// For every other instance in the same environment, each relationship
    /// between the two underlying elements is reproduced between the two
    /// instances, linked to the original. Copies that already exist are
    /// skipped, so replicating twice has no further effect. Returns the IDs
    /// of the relationships created.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the instance does not exist.
    pub fn replicate_relationships(&mut self, instance_id: Id) -> Result<Vec<Id>, ModelError> {
        let instance = match self.element(instance_id)?.kind().instance() {
            Some(instance) => instance.clone(),
            None => return Ok(Vec::new()),
        };

        let others: Vec<(Id, Id)> = self
            .instances_in(instance.environment())
            .filter(|other| other.id() != instance_id)
            .filter_map(|other| {
                other
                    .kind()
                    .instance()
                    .map(|other_instance| (other.id(), other_instance.element_id()))
            })
            .collect();

        let mut created = Vec::new();
        for (other_id, other_element) in others {
            let outgoing: Vec<Relationship> = self
                .efferent_relationships(instance.element_id())
                .filter(|r| r.destination_id() == other_element)
                .cloned()
                .collect();
            for relationship in outgoing {
                created.extend(self.replicate(&relationship, instance_id, other_id)?);
            }

            let incoming: Vec<Relationship> = self
                .efferent_relationships(other_element)
                .filter(|r| r.destination_id() == instance.element_id())
                .cloned()
                .collect();
            for relationship in incoming {
                created.extend(self.replicate(&relationship, other_id, instance_id)?);
            }
        }
        Ok(created)
    }

    fn add_instance(
        &mut self,
        deployment_node: Id,
        element_id: Id,
        expected: ElementType,
        replicate: bool,
    ) -> Result<Id, ModelError> {
        let environment = self.deployment_node_environment(deployment_node)?;
        let target = self.element(element_id)?;
        if target.element_type() != expected {
            return Err(ModelError::InvalidReference {
                kind: match expected {
                    ElementType::Container => ElementType::ContainerInstance.name(),
                    _ => ElementType::SoftwareSystemInstance.name(),
                },
                id: deployment_node,
                target: element_id,
                expected: expected.name(),
            });
        }
        let name = target.name().to_owned();

        let instance_number = self
            .instances_in(&environment)
            .filter_map(|element| element.kind().instance())
            .filter(|instance| instance.element_id() == element_id)
            .count()
            + 1;
        let instance = Instance::new(
            deployment_node,
            element_id,
            u32::try_from(instance_number).unwrap_or(u32::MAX),
            environment,
        );
        let kind = match expected {
            ElementType::Container => ElementKind::ContainerInstance(instance),
            _ => ElementKind::SoftwareSystemInstance(instance),
        };

        let id = self.add_element(&name, "", kind)?;
        debug!(id:%, element:% = element_id, deployment_node:%; "Added instance");

        if replicate {
            self.replicate_relationships(id)?;
        }
        Ok(id)
    }

    fn replicate(
        &mut self,
        original: &Relationship,
        source: Id,
        destination: Id,
    ) -> Result<Option<Id>, ModelError> {
        let already_linked = self.efferent_relationships(source).any(|r| {
            r.destination_id() == destination
                && r.linked_relationship_id() == Some(original.id())
        });
        if already_linked {
            return Ok(None);
        }

        let copy = NewRelationship::cloned_from(original)
            .build(self.next_id(), source, destination)?
            .with_linked_relationship_id(Some(original.id()));
        let id = self.insert_relationship(copy)?;
        debug!(id:%, linked:% = original.id(); "Replicated relationship");
        Ok(Some(id))
    }

    fn deployment_node_environment(&self, id: Id) -> Result<String, ModelError> {
        match self.element(id)?.kind() {
            ElementKind::DeploymentNode { environment, .. } => Ok(environment.clone()),
            other => Err(ModelError::InvalidReference {
                kind: other.element_type().name(),
                id,
                target: id,
                expected: ElementType::DeploymentNode.name(),
            }),
        }
    }

    fn ensure_unique_deployment_name(
        &self,
        parent: Option<Id>,
        environment: &str,
        name: &str,
    ) -> Result<(), ModelError> {
        let taken = self
            .elements_of_type(ElementType::DeploymentNode)
            .any(|node| {
                node.parent() == parent
                    && node.environment() == Some(environment)
                    && node.name() == name
            });
        if taken {
            return Err(ModelError::DuplicateName {
                kind: ElementType::DeploymentNode.name(),
                name: name.to_owned(),
            });
        }
        Ok(())
    }
}
