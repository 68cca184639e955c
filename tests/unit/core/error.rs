use super::*;

#[test]
fn test_kind_names() {
    assert_eq!(DrawError::TooManyInstances.kind(), "TooManyInstances");
    assert_eq!(DrawError::NotFound(DrawableId::raw(3)).kind(), "NotFound");
    assert_eq!(
        DrawError::bad_args("Widget", "missing").kind(),
        "BadArgumentList"
    );
    assert_eq!(DrawError::Config("x".into()).kind(), "Config");
}

#[test]
fn test_display_mentions_class_and_style() {
    let err = DrawError::NoSuchStyle {
        class: "Para".to_string(),
        style: "colour".to_string(),
    };
    let text = err.to_string();
    assert!(text.contains("Para"));
    assert!(text.contains("colour"));
}

#[test]
fn test_json_errors_convert() {
    let err: DrawError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, DrawError::Json(_)));
    assert_eq!(err.kind(), "Config");
}
