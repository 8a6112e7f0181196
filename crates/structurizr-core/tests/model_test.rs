//! Integration tests for building a workspace through the public API.

use structurizr_core::{
    Id, ModelError, Workspace,
    model::{ElementType, ImpliedRelationshipStrategy, ModelItem, NewRelationship},
    view::ViewType,
};

fn relationship_set(workspace: &Workspace) -> Vec<(Id, Id, String)> {
    let mut set: Vec<_> = workspace
        .model()
        .relationships()
        .map(|r| (r.source_id(), r.destination_id(), r.description().to_owned()))
        .collect();
    set.sort_by_key(|(source, destination, description)| {
        (source.to_string(), destination.to_string(), description.clone())
    });
    set
}

#[test]
fn test_big_bank_style_workspace() {
    let mut workspace = Workspace::new(1, "Internet Banking", "An example workspace");
    let (model, views) = workspace.model_and_views_mut();
    model.set_implied_relationship_strategy(ImpliedRelationshipStrategy::CreateUnlessAnyExist);

    let customer = model.add_person("Personal Banking Customer", "").unwrap();
    let banking = model.add_software_system("Internet Banking System", "").unwrap();
    let mainframe = model.add_software_system("Mainframe Banking System", "").unwrap();
    let web = model
        .add_container(banking, "Web Application", "", "Java and Spring MVC")
        .unwrap();
    let api = model
        .add_container(banking, "API Application", "", "Java and Spring MVC")
        .unwrap();

    model.uses(customer, web, "Visits").unwrap();
    model
        .add_relationship(
            api,
            mainframe,
            NewRelationship::new("Makes API calls to").with_technology("XML/HTTPS"),
        )
        .unwrap();

    // Implied: customer -> banking, banking -> mainframe.
    assert!(model.has_relationship(customer, banking, None));
    assert!(model.has_relationship(banking, mainframe, Some("Makes API calls to")));

    views
        .create_system_context_view(model, banking, "SystemContext", "")
        .unwrap()
        .add_default_elements(model)
        .unwrap();
    views
        .create_container_view(model, banking, "Containers", "")
        .unwrap()
        .add_default_elements(model)
        .unwrap();

    let context = workspace.views().view("SystemContext").unwrap();
    assert_eq!(context.view_type(), ViewType::SystemContext);
    assert_eq!(context.element_views().count(), 3);

    let containers = workspace.views().view("Containers").unwrap();
    assert!(containers.contains_element(web));
    assert!(containers.contains_element(mainframe));
    assert!(!containers.contains_element(banking));
}

#[test]
fn test_implied_derivation_twice_equals_once() {
    let mut workspace = Workspace::new(2, "Twice", "");
    let model = workspace.model_mut();
    model.set_implied_relationship_strategy(ImpliedRelationshipStrategy::CreateUnlessSameExists);

    let a = model.add_software_system("A", "").unwrap();
    let b = model.add_software_system("B", "").unwrap();
    let a1 = model.add_container(a, "A1", "", "").unwrap();
    let b1 = model.add_container(b, "B1", "", "").unwrap();
    let a11 = model.add_component(a1, "A11", "", "").unwrap();
    model.uses(a11, b1, "Calls").unwrap();

    let once = relationship_set(&workspace);
    workspace
        .model_mut()
        .create_all_implied_relationships()
        .unwrap();
    assert_eq!(relationship_set(&workspace), once);

    // a11 -> b1, a11 -> b, a1 -> b1, a1 -> b, a -> b1, a -> b
    assert_eq!(once.len(), 6);
}

#[test]
fn test_deployment_workflow() {
    let mut workspace = Workspace::new(3, "Deploy", "");
    let (model, views) = workspace.model_and_views_mut();

    let shop = model.add_software_system("Shop", "").unwrap();
    let web = model.add_container(shop, "Web", "", "").unwrap();
    let db = model.add_container(shop, "DB", "", "").unwrap();
    model.uses(web, db, "Reads").unwrap();

    let live = model.add_deployment_node("Live", "AWS", "", "").unwrap();
    let ec2 = model.add_child_deployment_node(live, "EC2", "", "").unwrap();
    let rds = model.add_child_deployment_node(live, "RDS", "", "").unwrap();
    let db_instance = model.add_container_instance(rds, db, true).unwrap();
    let web_instance = model.add_container_instance(ec2, web, true).unwrap();

    let view = views
        .create_deployment_view(model, Some(shop), Some("Live"), "LiveDeployment", "")
        .unwrap();
    view.add_default_elements(model).unwrap();

    assert!(view.contains_element(live));
    assert!(view.contains_element(web_instance));
    assert!(view.contains_element(db_instance));
    // Only the replicated relationship connects two shown elements.
    assert_eq!(view.relationship_views().count(), 1);

    let instances: Vec<_> = model
        .elements_of_type(ElementType::ContainerInstance)
        .map(ModelItem::id)
        .collect();
    assert_eq!(instances, vec![db_instance, web_instance]);
}

#[test]
fn test_errors_are_descriptive() {
    let mut workspace = Workspace::new(4, "Errors", "");
    let model = workspace.model_mut();
    let err = model.add_person("", "").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid person: field `name` must not be blank (element `1`)"
    );

    let missing = model.element(Id::new("missing")).unwrap_err();
    assert!(matches!(missing, ModelError::NotFound { .. }));
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Container counts per software system, and relationships between
    /// containers as index pairs into the flattened container list.
    fn nested_model_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<(usize, usize)>)> {
        prop::collection::vec(1..4usize, 2..5).prop_flat_map(|systems| {
            let containers: usize = systems.iter().sum();
            (
                Just(systems),
                prop::collection::vec((0..containers, 0..containers), 0..10),
            )
        })
    }

    fn build_workspace(
        strategy: ImpliedRelationshipStrategy,
        systems: &[usize],
        relationships: &[(usize, usize)],
    ) -> Workspace {
        let mut workspace = Workspace::new(1, "Generated", "");
        let model = workspace.model_mut();
        model.set_implied_relationship_strategy(strategy);

        let mut containers = Vec::new();
        for (index, count) in systems.iter().enumerate() {
            let system = model
                .add_software_system(&format!("System {index}"), "")
                .expect("valid system");
            for container in 0..*count {
                containers.push(
                    model
                        .add_container(system, &format!("Container {container}"), "", "")
                        .expect("valid container"),
                );
            }
        }
        for (source, destination) in relationships {
            model
                .uses(containers[*source], containers[*destination], "Uses")
                .expect("valid relationship");
        }
        workspace
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Deriving implied relationships again adds nothing.
    fn check_implied_derivation_idempotent(
        strategy: ImpliedRelationshipStrategy,
        systems: &[usize],
        relationships: &[(usize, usize)],
    ) -> Result<(), TestCaseError> {
        let mut workspace = build_workspace(strategy, systems, relationships);
        let once = relationship_set(&workspace);

        let created = workspace
            .model_mut()
            .create_all_implied_relationships()
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert!(created.is_empty());
        prop_assert_eq!(relationship_set(&workspace), once);
        Ok(())
    }

    /// Adding the nearest neighbours twice leaves the view as after once.
    fn check_nearest_neighbours_idempotent(
        systems: &[usize],
        relationships: &[(usize, usize)],
    ) -> Result<(), TestCaseError> {
        let mut workspace = build_workspace(
            ImpliedRelationshipStrategy::CreateUnlessAnyExist,
            systems,
            relationships,
        );
        let (model, views) = workspace.model_and_views_mut();
        let focus = model
            .software_systems()
            .next()
            .map(ModelItem::id)
            .ok_or_else(|| TestCaseError::fail("no software system"))?;
        let kinds = [ElementType::Person, ElementType::SoftwareSystem];

        let view = views
            .create_system_landscape_view("landscape", "")
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        view.add_nearest_neighbours(model, focus, &kinds)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let once = view.clone();

        view.add_nearest_neighbours(model, focus, &kinds)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(&*view, &once);
        Ok(())
    }

    fn strategy_strategy() -> impl Strategy<Value = ImpliedRelationshipStrategy> {
        prop_oneof![
            Just(ImpliedRelationshipStrategy::Ignore),
            Just(ImpliedRelationshipStrategy::CreateUnlessAnyExist),
            Just(ImpliedRelationshipStrategy::CreateUnlessSameExists),
        ]
    }

    proptest! {
        #[test]
        fn implied_derivation_idempotent(
            strategy in strategy_strategy(),
            (systems, relationships) in nested_model_strategy(),
        ) {
            check_implied_derivation_idempotent(strategy, &systems, &relationships)?;
        }

        #[test]
        fn nearest_neighbours_idempotent((systems, relationships) in nested_model_strategy()) {
            check_nearest_neighbours_idempotent(&systems, &relationships)?;
        }
    }
}
