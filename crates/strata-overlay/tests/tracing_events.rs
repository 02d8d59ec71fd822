//! Lifecycle transitions are observable through `tracing`.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use strata_core::testing::{BODY, MockHost};
use strata_overlay::{OverlayConfig, OverlayContext, OverlayId};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    message: String,
    overlay: Option<String>,
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    overlay: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "overlay" => self.overlay = Some(format!("{value:?}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "overlay" => self.overlay = Some(value.to_string()),
            _ => {}
        }
    }
}

#[derive(Clone, Default)]
struct RecordingLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl RecordingLayer {
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message,
            overlay: visitor.overlay,
        });
    }
}

#[test]
fn lifecycle_emits_debug_events() {
    let layer = RecordingLayer::default();
    let subscriber = Registry::default().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let host = Rc::new(MockHost::new());
        let ctx = OverlayContext::new(Rc::clone(&host));
        let trigger = host.add_focusable(BODY);
        host.set_focus(trigger);
        let root = host.add_container(BODY);
        host.add_focusable(root);

        let mut modal = ctx.controller(OverlayId::from("traced"), root, OverlayConfig::modal());
        modal.attach().unwrap();
        modal.detach().unwrap();
    });

    let messages = layer.messages();
    for expected in [
        "overlay registered",
        "background scroll locked",
        "background marked inert",
        "overlay attached",
        "overlay deregistered",
        "background scroll unlocked",
        "overlay detached",
    ] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }

    let attached = layer
        .events()
        .into_iter()
        .find(|e| e.message == "overlay attached")
        .unwrap();
    assert_eq!(attached.level, Level::DEBUG);
    assert_eq!(attached.overlay.as_deref(), Some("traced"));

    let registered = messages.iter().position(|m| m == "overlay registered").unwrap();
    let detached = messages.iter().position(|m| m == "overlay detached").unwrap();
    assert!(registered < detached);
}

#[test]
fn redundant_register_is_traced_not_debugged() {
    let layer = RecordingLayer::default();
    let subscriber = Registry::default().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let stack = strata_overlay::OverlayStack::new();
        stack.register(OverlayId::from("once"));
        stack.register(OverlayId::from("once"));
    });

    let events = layer.events();
    let registered = events
        .iter()
        .filter(|e| e.message == "overlay registered")
        .count();
    assert_eq!(registered, 1);
    let repeat = events
        .iter()
        .find(|e| e.message == "overlay already registered")
        .unwrap();
    assert_eq!(repeat.level, Level::TRACE);
}
