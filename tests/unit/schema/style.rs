use super::*;
use crate::schema::{validators, ClassSpec};
use serde_json::json;

fn classes() -> (ClassRegistry, ClassId, ClassId) {
    let mut classes = ClassRegistry::new();
    let root = classes
        .register(ClassSpec::root("Drawable").style("hidden").style("top"))
        .unwrap();
    let para = classes
        .register(
            ClassSpec::new("Para")
                .validated_style("size", validators::one_of(&["small", "large"]))
                .descriptor(StyleDescriptor::new("html_class").with_feature("html"))
                .style("stroke"),
        )
        .unwrap();
    (classes, root, para)
}

#[test]
fn test_resolve_names_orders_ancestors_first() {
    let (classes, _, para) = classes();
    let names = classes.resolve_names(para, FeatureFilter::All);
    assert_eq!(names, vec!["hidden", "top", "size", "html_class", "stroke"]);
}

#[test]
fn test_resolve_names_filters_gated_styles() {
    let (classes, _, para) = classes();
    let none = FeatureSet::empty();
    let html = FeatureSet::with(["html"]);

    let without = classes.resolve_names(para, FeatureFilter::Only(&none));
    assert!(!without.iter().any(|n| n == "html_class"));

    let with = classes.resolve_names(para, FeatureFilter::Only(&html));
    assert!(with.iter().any(|n| n == "html_class"));
}

#[test]
fn test_redeclare_is_noop() {
    let (mut classes, root, para) = classes();
    assert!(!classes.declare_style(
        para,
        StyleDescriptor::new("size").with_validator(validators::integer())
    ));
    // first declaration still validates
    assert!(classes.validate_style(para, "size", &json!("small")).is_ok());

    // an ancestor's name is visible, so redeclaring it on a child is a no-op too
    assert!(!classes.declare_style(para, StyleDescriptor::new("hidden")));
    assert!(classes.declare_style(root, StyleDescriptor::new("left")));
    assert!(classes.is_style(para, "left"));
}

#[test]
fn test_validate_walks_ancestors() {
    let (classes, _, para) = classes();
    assert_eq!(
        classes.validate_style(para, "top", &json!(10)).unwrap(),
        json!(10)
    );
}

#[test]
fn test_validate_unknown_style() {
    let (classes, root, para) = classes();
    assert!(matches!(
        classes.validate_style(para, "colour", &json!("red")),
        Err(DrawError::NoSuchStyle { .. })
    ));
    assert!(matches!(
        classes.validate_style(root, "size", &json!("small")),
        Err(DrawError::NoSuchStyle { .. })
    ));
}

#[test]
fn test_validator_rejects() {
    let (classes, _, para) = classes();
    assert!(matches!(
        classes.validate_style(para, "size", &json!("huge")),
        Err(DrawError::InvalidAttributeValue(_))
    ));
}

#[test]
fn test_feature_gate_on_validate_with() {
    let (classes, _, para) = classes();
    let none = FeatureSet::empty();
    let html = FeatureSet::with(["html"]);

    assert!(matches!(
        classes.validate_style_with(para, "html_class", &json!("x"), &none),
        Err(DrawError::UnsupportedFeature { .. })
    ));
    assert_eq!(
        classes
            .validate_style_with(para, "html_class", &json!("x"), &html)
            .unwrap(),
        json!("x")
    );
}

#[test]
fn test_gated_styles_register_known_features() {
    let (classes, _, _) = classes();
    assert!(classes.known_features().contains("html"));
}
