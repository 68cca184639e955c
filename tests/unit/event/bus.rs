use super::*;
use crate::core::DrawError;
use crate::schema::ClassSpec;

struct Ctx {
    bus: EventBus<Ctx>,
    classes: ClassRegistry,
    log: Vec<String>,
}

impl DispatchContext for Ctx {
    fn bus(&self) -> &EventBus<Self> {
        &self.bus
    }

    fn classes(&self) -> &ClassRegistry {
        &self.classes
    }
}

fn ctx() -> (Ctx, ClassId) {
    let mut classes = ClassRegistry::new();
    let class = classes
        .register(ClassSpec::root("Drawable").events(&["click", "destroy", "ping"]))
        .unwrap();
    (
        Ctx {
            bus: EventBus::new(),
            classes,
            log: Vec::new(),
        },
        class,
    )
}

fn id(n: u64) -> DrawableId {
    DrawableId::raw(n)
}

fn record(tag: &'static str) -> impl Fn(&mut Ctx, &Event) -> Result<()> + 'static {
    move |ctx: &mut Ctx, _event: &Event| {
        ctx.log.push(tag.to_string());
        Ok(())
    }
}

#[test]
fn test_targeted_and_untargeted_click() {
    let (mut ctx, class) = ctx();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", Some(id(5)), None, record("at5"))
        .unwrap();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, record("any"))
        .unwrap();

    let fired = dispatch(&mut ctx, class, Event::new("click", Some(id(5)), vec![])).unwrap();
    assert_eq!(fired, 2);
    assert_eq!(ctx.log, vec!["at5", "any"]);

    ctx.log.clear();
    let fired = dispatch(&mut ctx, class, Event::new("click", Some(id(7)), vec![])).unwrap();
    assert_eq!(fired, 1);
    assert_eq!(ctx.log, vec!["any"]);

    ctx.log.clear();
    dispatch(&mut ctx, class, Event::new("click", None, vec![])).unwrap();
    assert_eq!(ctx.log, vec!["any"]);
}

#[test]
fn test_subscribe_unknown_event() {
    let (mut ctx, class) = ctx();
    let result = ctx
        .bus
        .subscribe(&ctx.classes, class, "teleport", None, None, record("x"));
    assert!(matches!(result, Err(DrawError::UnregisteredEvent { .. })));
    assert!(ctx.bus.is_empty());
}

#[test]
fn test_dispatch_unknown_event() {
    let (mut ctx, class) = ctx();
    let result = dispatch(&mut ctx, class, Event::new("teleport", None, vec![]));
    assert!(matches!(result, Err(DrawError::UnregisteredEvent { .. })));
}

#[test]
fn test_no_subscribers_is_not_an_error() {
    let (mut ctx, class) = ctx();
    assert_eq!(
        dispatch(&mut ctx, class, Event::new("ping", None, vec![])).unwrap(),
        0
    );
}

#[test]
fn test_cancel() {
    let (mut ctx, class) = ctx();
    let sub = ctx
        .bus
        .subscribe(&ctx.classes, class, "click", None, None, record("a"))
        .unwrap();

    assert!(ctx.bus.cancel(sub));
    assert!(!ctx.bus.cancel(sub));
    assert!(!ctx.bus.is_live(sub));
    dispatch(&mut ctx, class, Event::new("click", None, vec![])).unwrap();
    assert!(ctx.log.is_empty());
}

#[test]
fn test_cancel_all_only_touches_owner() {
    let (mut ctx, class) = ctx();
    for tag in ["a", "b"] {
        ctx.bus
            .subscribe(&ctx.classes, class, "click", None, Some(id(3)), record(tag))
            .unwrap();
    }
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, Some(id(4)), record("c"))
        .unwrap();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, record("d"))
        .unwrap();

    assert_eq!(ctx.bus.owned_by(id(3)), 2);
    assert_eq!(ctx.bus.cancel_all(id(3)), 2);
    assert_eq!(ctx.bus.cancel_all(id(3)), 0);
    assert_eq!(ctx.bus.len(), 2);

    dispatch(&mut ctx, class, Event::new("click", None, vec![])).unwrap();
    assert_eq!(ctx.log, vec!["c", "d"]);
}

#[test]
fn test_handler_cancelled_mid_dispatch_is_skipped() {
    let (mut ctx, class) = ctx();
    // First handler cancels everything owned by #9, including the second one.
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, |ctx: &mut Ctx, _: &Event| {
            ctx.log.push("first".into());
            ctx.bus.cancel_all(id(9));
            Ok(())
        })
        .unwrap();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, Some(id(9)), record("second"))
        .unwrap();

    let fired = dispatch(&mut ctx, class, Event::new("click", None, vec![])).unwrap();
    assert_eq!(fired, 1);
    assert_eq!(ctx.log, vec!["first"]);
}

#[test]
fn test_nested_dispatch() {
    let (mut ctx, class) = ctx();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, move |ctx: &mut Ctx, _: &Event| {
            ctx.log.push("click".into());
            dispatch(ctx, class, Event::new("ping", None, vec![]))?;
            Ok(())
        })
        .unwrap();
    ctx.bus
        .subscribe(&ctx.classes, class, "ping", None, None, record("ping"))
        .unwrap();

    dispatch(&mut ctx, class, Event::new("click", None, vec![])).unwrap();
    assert_eq!(ctx.log, vec!["click", "ping"]);
}

#[test]
fn test_handler_reenters_itself() {
    let (mut ctx, class) = ctx();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, move |ctx: &mut Ctx, _: &Event| {
            ctx.log.push(format!("click{}", ctx.log.len()));
            if ctx.log.len() < 5 {
                dispatch(ctx, class, Event::new("click", None, vec![]))?;
            }
            Ok(())
        })
        .unwrap();

    let fired = dispatch(&mut ctx, class, Event::new("click", None, vec![])).unwrap();
    assert_eq!(fired, 1);
    assert_eq!(ctx.log, vec!["click0", "click1", "click2", "click3", "click4"]);
}

#[test]
fn test_cancel_targeting_ignores_owner() {
    let (mut ctx, class) = ctx();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", Some(id(6)), None, record("a"))
        .unwrap();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", Some(id(6)), Some(id(2)), record("b"))
        .unwrap();
    let other = ctx
        .bus
        .subscribe(&ctx.classes, class, "click", Some(id(7)), None, record("c"))
        .unwrap();

    assert_eq!(ctx.bus.targeting(id(6)), 2);
    assert_eq!(ctx.bus.cancel_targeting(id(6)), 2);
    assert_eq!(ctx.bus.cancel_targeting(id(6)), 0);
    assert_eq!(ctx.bus.targeting(id(6)), 0);
    assert_eq!(ctx.bus.owned_by(id(2)), 0);
    assert_eq!(ctx.bus.len(), 1);
    assert!(ctx.bus.is_live(other));

    dispatch(&mut ctx, class, Event::new("click", Some(id(6)), vec![])).unwrap();
    assert!(ctx.log.is_empty());
}

#[test]
fn test_cancel_clears_target_index() {
    let (mut ctx, class) = ctx();
    let sub = ctx
        .bus
        .subscribe(&ctx.classes, class, "click", Some(id(8)), Some(id(8)), record("a"))
        .unwrap();
    assert_eq!(ctx.bus.targeting(id(8)), 1);

    assert_eq!(ctx.bus.cancel_all(id(8)), 1);
    assert_eq!(ctx.bus.targeting(id(8)), 0);
    assert!(!ctx.bus.is_live(sub));
}

#[test]
fn test_handler_error_propagates() {
    let (mut ctx, class) = ctx();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, |_: &mut Ctx, _: &Event| {
            Err(DrawError::invalid_value("boom"))
        })
        .unwrap();
    ctx.bus
        .subscribe(&ctx.classes, class, "click", None, None, record("after"))
        .unwrap();

    let result = dispatch(&mut ctx, class, Event::new("click", None, vec![]));
    assert!(matches!(result, Err(DrawError::InvalidAttributeValue(_))));
    assert!(ctx.log.is_empty());
}

#[test]
fn test_event_args() {
    let event = Event::new("click", Some(id(2)), vec![Value::from(1), Value::from(2)]);
    assert_eq!(event.arg(1), Some(&Value::from(2)));
    assert_eq!(event.arg(2), None);
}
