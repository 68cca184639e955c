use super::*;
use crate::app::{App, AppConfig, RunMode};
use crate::core::DrawError;
use serde_json::json;

fn app_with(bridge: HeadlessBridge) -> (App, HeadlessView) {
    let view = bridge.view();
    let app = App::new(AppConfig::default(), Box::new(bridge)).unwrap();
    (app, view)
}

#[test]
fn mirrors_app_and_document_root() {
    let _lock = crate::test_support::app_lock();
    let (app, view) = app_with(HeadlessBridge::new());

    assert_eq!(view.mirrored(), 2);
    assert_eq!(&*view.created(), &[app.app_handle().id(), app.root().id()]);
    let root = view.mirror(app.root().id()).unwrap();
    assert_eq!(root.class_name, "DocumentRoot");
    assert_eq!(root.styles.get("width"), Some(&json!("100%")));
    assert!(!root.is_widget);
}

#[test]
fn new_drawables_get_parent_link() {
    let _lock = crate::test_support::app_lock();
    let (mut app, view) = app_with(HeadlessBridge::new());
    let flow = app.create("flow", vec![], StyleMap::new()).unwrap();

    let mirror = view.mirror(flow.id()).unwrap();
    assert_eq!(mirror.class_name, "Flow");
    assert_eq!(mirror.parent, Some(app.root().id()));
}

#[test]
fn prop_changes_are_mirrored() {
    let _lock = crate::test_support::app_lock();
    let (mut app, view) = app_with(HeadlessBridge::new());
    let flow = app.create("flow", vec![], StyleMap::new()).unwrap();

    app.set_style(flow, "width", "40px").unwrap();
    app.hide(flow).unwrap();

    let mirror = view.mirror(flow.id()).unwrap();
    assert_eq!(mirror.styles.get("width"), Some(&json!(40)));
    assert_eq!(mirror.styles.get("hidden"), Some(&json!(true)));
    assert_eq!(view.prop_changes(), 2);
}

#[test]
fn destroy_drops_mirror() {
    let _lock = crate::test_support::app_lock();
    let (mut app, view) = app_with(HeadlessBridge::new());
    let flow = app.create("flow", vec![], StyleMap::new()).unwrap();

    app.destroy(flow).unwrap();
    assert!(view.mirror(flow.id()).is_none());
    assert_eq!(&*view.destroyed(), &[flow.id()]);
}

#[test]
fn sender_is_available_after_connect() {
    let _lock = crate::test_support::app_lock();
    let bridge = HeadlessBridge::new();
    assert!(bridge.sender().is_none());
    let (app, _view) = app_with(bridge);
    assert!(app.sender().send_event("click", None, vec![]).is_ok());
}

#[test]
fn answers_run_with_configured_mode() {
    let _lock = crate::test_support::app_lock();
    let (mut app, view) = app_with(
        HeadlessBridge::new()
            .with_run_mode("wait")
            .shutdown_after_heartbeats(3),
    );

    assert_eq!(app.run().unwrap(), RunMode::Wait);
    assert_eq!(view.heartbeats(), 3);
    assert_eq!(view.mirrored(), 0);
}

#[test]
fn requested_feature_must_be_supported() {
    let _lock = crate::test_support::app_lock();
    let config = AppConfig::default().with_features(&["html"]);
    let result = App::new(config, Box::new(HeadlessBridge::new().with_features(&[])));
    assert!(matches!(result, Err(DrawError::UnsupportedFeature { .. })));
}
