//! Properties of path resolution and component dispatch

use site_blueprint::blueprint::normalize_path;
use site_blueprint::dispatch::{resolve, ComponentRegistry, RenderNode, Resolution};
use site_blueprint::{parse, Blueprint, BlueprintError};

fn fixture() -> Blueprint {
    parse(include_str!("fixtures/logistics.json")).expect("Fixture should parse")
}

#[test]
fn test_declared_order_preserved_on_every_page() {
    let blueprint = fixture();
    let registry = ComponentRegistry::builtin();

    for page in &blueprint.pages {
        let resolution = resolve(&blueprint, &registry, &page.page_path);
        let resolved: Vec<&str> = resolution.nodes().iter().map(|n| n.name()).collect();
        let declared: Vec<&str> = page.components().map(|c| c.component_name.as_str()).collect();
        assert_eq!(resolved, declared, "page {}", page.page_name);
    }
}

#[test]
fn test_placeholders_carry_exact_name_and_later_nodes_resolve() {
    let blueprint = fixture();
    let registry = ComponentRegistry::builtin();

    let resolution = resolve(&blueprint, &registry, "/contact");
    let nodes = resolution.nodes();
    assert_eq!(nodes.len(), 2);
    assert!(matches!(
        nodes[0],
        RenderNode::Placeholder {
            name: "ContactForm",
            ..
        }
    ));
    assert!(matches!(nodes[1], RenderNode::Component { .. }));
}

#[test]
fn test_unknown_path_is_not_found() {
    let blueprint = fixture();
    let registry = ComponentRegistry::builtin();

    let resolution = resolve(&blueprint, &registry, "/does-not-exist");
    assert!(!resolution.is_found());
    assert_eq!(resolution.path(), "/does-not-exist");
    assert!(resolution.nodes().is_empty());
}

#[test]
fn test_resolution_is_idempotent_and_read_only() {
    let blueprint = fixture();
    let snapshot = blueprint.clone();
    let registry = ComponentRegistry::builtin();

    let first = resolve(&blueprint, &registry, "/services");
    let second = resolve(&blueprint, &registry, "/services");
    assert_eq!(first, second);
    assert_eq!(blueprint, snapshot);
}

#[test]
fn test_pricing_button_and_mystery() {
    let blueprint = parse(
        r#"{
            "client_name": "Acme",
            "pages": [{
                "page_name": "Pricing",
                "page_path": "/pricing",
                "sections": [{
                    "section_name": "Plans",
                    "components": [
                        { "component_name": "Button", "props": { "label": "Buy", "href": "/buy" } },
                        { "component_name": "Mystery", "props": { "anything": [1, 2, 3] } }
                    ]
                }]
            }]
        }"#,
    )
    .unwrap();
    let registry = ComponentRegistry::builtin();

    match resolve(&blueprint, &registry, "/pricing") {
        Resolution::Found(page) => {
            let nodes: Vec<_> = page.nodes().collect();
            assert_eq!(nodes.len(), 2);
            match nodes[0] {
                RenderNode::Component { entry, component } => {
                    assert_eq!(entry.name(), "Button");
                    assert_eq!(component.props["href"], "/buy");
                }
                other => panic!("expected Button, got {:?}", other),
            }
            assert_eq!(nodes[1].name(), "Mystery");
            assert!(nodes[1].is_placeholder());
            assert!(page.header.is_none());
            assert!(page.footer.is_none());
        }
        other => panic!("expected a page, got {:?}", other),
    }

    assert!(matches!(
        resolve(&blueprint, &registry, "/does-not-exist"),
        Resolution::NotFound { .. }
    ));
}

#[test]
fn test_path_normalization_table() {
    let cases = [
        ("", "/"),
        ("/", "/"),
        ("//", "/"),
        ("/?x=1", "/"),
        ("/about/", "/about"),
        ("about", "/about"),
        ("/our%20fleet/", "/our fleet"),
        ("/services/index.html", "/services"),
    ];
    for (raw, expected) in cases {
        assert_eq!(normalize_path(raw), expected, "input {:?}", raw);
    }
}

#[test]
fn test_request_variants_reach_the_same_page() {
    let blueprint = fixture();
    let registry = ComponentRegistry::builtin();

    for path in ["/services", "services", "/services/", "/services?from=nav"] {
        let resolution = resolve(&blueprint, &registry, path);
        match resolution {
            Resolution::Found(page) => assert_eq!(page.page.page_name, "Services"),
            other => panic!("{:?} did not resolve: {:?}", path, other),
        }
    }
}

#[test]
fn test_duplicate_normalized_paths_fail_to_load() {
    let result = parse(
        r#"{
            "client_name": "Acme",
            "pages": [
                { "page_name": "Home", "page_path": "" },
                { "page_name": "Index", "page_path": "/index.html" }
            ]
        }"#,
    );
    assert!(matches!(result, Err(BlueprintError::DuplicatePath { .. })));
}
