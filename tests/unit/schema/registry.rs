use super::*;
use serde_json::json;

fn base() -> ClassRegistry {
    let mut classes = ClassRegistry::new();
    classes
        .register(
            ClassSpec::root("Drawable")
                .style("hidden")
                .events(&["parent", "destroy", "prop_change"]),
        )
        .unwrap();
    classes
}

#[test]
fn test_snake_case() {
    assert_eq!(snake_case("DocumentRoot"), "document_root");
    assert_eq!(snake_case("Para"), "para");
    assert_eq!(snake_case("TextDrawable"), "text_drawable");
    assert_eq!(snake_case("Html5Video"), "html5_video");
}

#[test]
fn test_register_and_lookup() {
    let mut classes = base();
    let para = classes.register(ClassSpec::new("Para")).unwrap();

    assert_eq!(classes.by_name("Para").unwrap(), para);
    assert_eq!(classes.by_dsl_name("para").unwrap(), para);
    assert_eq!(classes.get(para).dsl_name(), "para");
    assert_eq!(
        classes.get(para).parent(),
        Some(classes.by_name("Drawable").unwrap())
    );
}

#[test]
fn test_unknown_names_fail_closed() {
    let classes = base();
    assert!(matches!(
        classes.by_dsl_name("banana"),
        Err(DrawError::UnknownDrawableClass(name)) if name == "banana"
    ));
}

#[test]
fn test_duplicate_class_rejected() {
    let mut classes = base();
    classes.register(ClassSpec::new("Para")).unwrap();
    let result = classes.register(ClassSpec::new("Para"));
    assert!(matches!(result, Err(DrawError::InvalidAttributeValue(_))));
}

#[test]
fn test_unknown_parent_rejected() {
    let mut classes = base();
    let result = classes.register(ClassSpec::new("Span").parent("TextDrawable"));
    assert!(matches!(result, Err(DrawError::UnknownDrawableClass(_))));
}

#[test]
fn test_events_are_inherited() {
    let mut classes = base();
    let slot = classes
        .register(ClassSpec::new("Slot").slot(true).event("click"))
        .unwrap();
    let stack = classes
        .register(ClassSpec::new("Stack").parent("Slot").event("scroll"))
        .unwrap();

    assert!(classes.knows_event(stack, "destroy"));
    assert!(classes.knows_event(stack, "click"));
    assert!(classes.knows_event(stack, "scroll"));
    assert!(!classes.knows_event(slot, "scroll"));
    assert!(matches!(
        classes.check_event(slot, "scroll"),
        Err(DrawError::UnregisteredEvent { .. })
    ));
}

#[test]
fn test_declare_event_reaches_descendants() {
    let mut classes = base();
    let slot = classes.register(ClassSpec::new("Slot")).unwrap();
    let flow = classes.register(ClassSpec::new("Flow").parent("Slot")).unwrap();

    assert!(classes.declare_event(slot, "wheel"));
    assert!(!classes.declare_event(slot, "wheel"));
    assert!(classes.knows_event(flow, "wheel"));
    assert!(!classes.knows_event(classes.by_name("Drawable").unwrap(), "wheel"));
}

#[test]
fn test_flags_inherit() {
    let mut classes = base();
    classes
        .register(ClassSpec::new("Slot").slot(true))
        .unwrap();
    let flow = classes.register(ClassSpec::new("Flow").parent("Slot")).unwrap();
    let span = classes
        .register(ClassSpec::new("Span").attaches(false))
        .unwrap();
    let widget = classes.register(ClassSpec::new("Widget")).unwrap();
    let custom = classes
        .register(ClassSpec::new("Counter").parent("Widget"))
        .unwrap();

    assert!(classes.get(flow).is_slot());
    assert!(classes.get(flow).attaches());
    assert!(!classes.get(span).attaches());
    assert!(classes.get(widget).is_widget());
    assert!(classes.get(custom).is_widget());
    assert!(!classes.get(flow).is_widget());
}

#[test]
fn test_defaults_walk_ancestors() {
    let mut classes = base();
    let drawable = classes.by_name("Drawable").unwrap();
    classes.set_default(drawable, "hidden", json!(false)).unwrap();
    let para = classes
        .register(ClassSpec::new("Para").style("size"))
        .unwrap();

    assert_eq!(classes.default_for(para, "hidden"), Some(&json!(false)));
    classes.set_default(para, "hidden", json!(true)).unwrap();
    assert_eq!(classes.default_for(para, "hidden"), Some(&json!(true)));
    assert_eq!(classes.default_for(drawable, "hidden"), Some(&json!(false)));
    assert!(matches!(
        classes.set_default(para, "colour", json!("red")),
        Err(DrawError::NoSuchStyle { .. })
    ));
}

#[test]
fn test_is_a_and_ancestors() {
    let mut classes = base();
    let slot = classes.register(ClassSpec::new("Slot")).unwrap();
    let flow = classes.register(ClassSpec::new("Flow").parent("Slot")).unwrap();
    let chain: Vec<_> = classes.ancestors(flow).collect();

    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0], flow);
    assert_eq!(chain[1], slot);
    assert!(classes.is_a(flow, slot));
    assert!(!classes.is_a(slot, flow));
}

#[test]
fn test_foreign_class_id_fails_closed() {
    let mut larger = base();
    let mut last = larger.by_name("Drawable").unwrap();
    for name in ["A", "B", "C"] {
        last = larger
            .register(ClassSpec::new(name).parent("Drawable"))
            .unwrap();
    }
    let mut classes = base();

    assert!(classes.try_get(last).is_none());
    assert!(matches!(
        classes.check_class(last),
        Err(DrawError::UnknownDrawableClass(_))
    ));
    assert!(matches!(
        classes.check_event(last, "destroy"),
        Err(DrawError::UnknownDrawableClass(_))
    ));
    assert!(matches!(
        classes.set_default(last, "hidden", json!(true)),
        Err(DrawError::UnknownDrawableClass(_))
    ));
    assert!(matches!(
        classes.validate_style(last, "hidden", &json!(true)),
        Err(DrawError::UnknownDrawableClass(_))
    ));
    assert!(larger.check_event(last, "destroy").is_ok());
}
