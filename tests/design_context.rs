//! Integration tests for identifier bookkeeping, class resolution and
//! creation listeners

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use design_context::component::{Button, Label};
use design_context::context::ListenerError;
use design_context::{
    design, ClassError, Component, ComponentClass, ComponentCreatedEvent,
    ComponentCreationListener, ComponentRef, ComponentRegistry, DefaultInstanceCache,
    DesignConfig, DesignContext, DesignError, Element,
};

#[derive(Debug, Default)]
struct StarRating {
    id: Option<String>,
    stars: u8,
}

impl Component for StarRating {
    fn class(&self) -> ComponentClass {
        ComponentClass::new("com.example.widgets", "StarRating")
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn caption(&self) -> Option<&str> {
        None
    }

    fn read_design(
        &mut self,
        design: &Element,
        _context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        self.id = design.attr("id").map(str::to_owned);
        if let Some(stars) = design.attr("stars") {
            self.stars = stars.parse().map_err(|e: std::num::ParseIntError| {
                DesignError::invalid_attribute(design.tag(), "stars", stars, e.to_string())
            })?;
        }
        Ok(())
    }

    fn write_design(
        &self,
        design: &mut Element,
        _context: &mut DesignContext,
    ) -> Result<(), DesignError> {
        if let Some(id) = &self.id {
            design.set_attr("id", id.clone());
        }
        if self.stars != 0 {
            design.set_attr("stars", self.stars.to_string());
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn context_with_star_rating() -> DesignContext {
    let mut classes = ComponentRegistry::with_builtins();
    classes.register::<StarRating>().expect("Should register");
    DesignContext::with_services(Rc::new(classes), Arc::new(DefaultInstanceCache::new()))
}

struct Recorder {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl ComponentCreationListener for Recorder {
    fn component_created(&self, event: &ComponentCreatedEvent<'_>) -> Result<(), ListenerError> {
        let local_id = event.local_id().unwrap_or("-");
        if let Some(id) = event.local_id() {
            assert_eq!(event.context().component_by_local_id(id), Some(event.component()));
        }
        self.log.borrow_mut().push(format!("{}:{}", self.name, local_id));
        Ok(())
    }
}

struct Failing;

impl ComponentCreationListener for Failing {
    fn component_created(&self, _event: &ComponentCreatedEvent<'_>) -> Result<(), ListenerError> {
        Err("listener refused".into())
    }
}

fn recorder(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Rc<dyn ComponentCreationListener> {
    Rc::new(Recorder {
        name,
        log: Rc::clone(log),
    })
}

const LISTENED: &str = r#"
    <v-vertical-layout _id="root">
        <v-button _id="a">A</v-button>
        <v-label>no local id</v-label>
        <v-button _id="b">B</v-button>
    </v-vertical-layout>
"#;

#[test]
fn test_identifiers_registered_on_read() {
    let context = design::read(
        r#"
        <v-vertical-layout id="main">
            <v-button id="ok" _id="okButton">OK</v-button>
            <v-text-field _id="name" caption="Name" placeholder="Your name"></v-text-field>
        </v-vertical-layout>
    "#,
    )
    .expect("Should read");

    let ok = context.component_by_id("ok").expect("global id");
    assert_eq!(context.component_by_local_id("okButton"), Some(ok));
    assert_eq!(context.component_by_caption("OK"), Some(ok));
    assert_eq!(context.local_id_of(ok), Some("okButton"));

    let name = context.component_by_local_id("name").expect("local id");
    assert_eq!(name.class().simple_name, "TextField");
    assert_eq!(context.component_by_caption("Name"), Some(name));

    let root = context.component_root().expect("root");
    assert_eq!(context.component_by_id("main"), Some(root));
    assert_eq!(root.children().len(), 2);
}

#[test]
fn test_duplicate_global_id_rejected() {
    let mut context = DesignContext::new();
    let button = context
        .create_child(&Element::new("v-button").with_attr("id", "x"))
        .expect("first component");

    let result = context.create_child(
        &Element::new("v-label")
            .with_attr("id", "x")
            .with_attr("_id", "second"),
    );
    match result {
        Err(DesignError::DuplicateId { id }) => assert_eq!(id, "x"),
        other => panic!("Expected DuplicateId, got {:?}", other),
    }

    assert_eq!(context.component_by_id("x"), Some(&button));
    assert!(context.component_by_local_id("second").is_none());
}

#[test]
fn test_duplicate_global_id_aborts_read() {
    let result = design::read(
        r#"<v-vertical-layout><v-button id="x"></v-button><v-label id="x"></v-label></v-vertical-layout>"#,
    );
    assert!(matches!(result, Err(DesignError::DuplicateId { .. })));
}

#[test]
fn test_caption_last_registration_wins() {
    let context = design::read(
        r#"
        <v-horizontal-layout>
            <v-button _id="first">Same</v-button>
            <v-button _id="second">Same</v-button>
        </v-horizontal-layout>
    "#,
    )
    .expect("Should read");

    let second = context.component_by_local_id("second").expect("second");
    assert_eq!(context.component_by_caption("Same"), Some(second));
}

#[test]
fn test_map_id_evicts_previous_holder() {
    let mut context = DesignContext::new();
    let first = ComponentRef::new(Button::new("first"));
    let second = ComponentRef::new(Label::with_value("second"));

    assert!(!context.map_id("shared", &first));
    assert!(context.map_id("shared", &second));
    assert_eq!(context.component_by_id("shared"), Some(&second));
}

#[test]
fn test_local_id_remap_keeps_one_to_one() {
    let mut context = DesignContext::new();
    let a = ComponentRef::new(Button::default());
    let b = ComponentRef::new(Button::default());

    context.map_local_id("x", &a);
    context.map_local_id("y", &b);
    assert!(context.map_local_id("x", &b));

    assert_eq!(context.component_by_local_id("x"), Some(&b));
    assert!(context.component_by_local_id("y").is_none());
    assert_eq!(context.local_id_of(&a), None);
    assert_eq!(context.local_id_of(&b), Some("x"));
}

#[test]
fn test_listeners_fire_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut context = DesignContext::new();
    context.add_component_creation_listener(recorder("first", &log));
    context.add_component_creation_listener(recorder("second", &log));

    design::read_with_context(LISTENED, context).expect("Should read");

    assert_eq!(
        *log.borrow(),
        vec![
            "first:a",
            "second:a",
            "first:-",
            "second:-",
            "first:b",
            "second:b",
            "first:root",
            "second:root",
        ]
    );
}

#[test]
fn test_remove_listener_removes_one_registration() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let listener = recorder("l", &log);
    let mut context = DesignContext::new();
    context.add_component_creation_listener(Rc::clone(&listener));
    context.add_component_creation_listener(Rc::clone(&listener));

    assert!(context.remove_component_creation_listener(&listener));
    design::read_with_context("<v-button _id=\"only\"></v-button>", context).expect("Should read");
    assert_eq!(*log.borrow(), vec!["l:only"]);
}

#[test]
fn test_removed_listener_misses_later_creations() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let listener = recorder("l", &log);
    let mut context = DesignContext::new();
    context.add_component_creation_listener(Rc::clone(&listener));

    context
        .create_child(&Element::new("v-button").with_attr("_id", "before"))
        .expect("first component");
    assert!(context.remove_component_creation_listener(&listener));
    context
        .create_child(&Element::new("v-button").with_attr("_id", "after"))
        .expect("second component");

    assert_eq!(*log.borrow(), vec!["l:before"]);
    assert!(context.component_by_local_id("after").is_some());
}

#[test]
fn test_remove_unknown_listener() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut context = DesignContext::new();
    context.add_component_creation_listener(recorder("kept", &log));

    let other = recorder("other", &log);
    assert!(!context.remove_component_creation_listener(&other));
}

#[test]
fn test_failing_listener_aborts_read() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut context = DesignContext::new();
    context.add_component_creation_listener(Rc::new(Failing));
    context.add_component_creation_listener(recorder("after", &log));

    let result = design::read_with_context(LISTENED, context);
    assert!(matches!(result, Err(DesignError::Listener(_))));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_addon_tag_resolves_registered_class() {
    let context = design::read_with_context(
        r#"<v-addon class="com.example.widgets.StarRating" stars="4"></v-addon>"#,
        context_with_star_rating(),
    )
    .expect("Should read");

    let root = context.component_root().expect("root");
    assert_eq!(root.with(|rating: &StarRating| rating.stars), Some(4));
}

#[test]
fn test_addon_without_class_attribute() {
    let result = design::read("<v-addon></v-addon>");
    match result {
        Err(DesignError::NoComponentClass { tag, source }) => {
            assert_eq!(tag, "v-addon");
            assert!(matches!(source, ClassError::NotFound { .. }));
        }
        other => panic!("Expected NoComponentClass, got {:?}", other),
    }
}

#[test]
fn test_unregistered_class() {
    let result = design::read("<v-grid-layout></v-grid-layout>");
    match result {
        Err(DesignError::NoComponentClass { source, .. }) => match source {
            ClassError::NotFound { name } => assert_eq!(name, "com.vaadin.ui.GridLayout"),
            other => panic!("Expected NotFound, got {:?}", other),
        },
        other => panic!("Expected NoComponentClass, got {:?}", other),
    }
}

#[test]
fn test_constructor_of_wrong_class() {
    let mut classes = ComponentRegistry::with_builtins();
    classes
        .register_with("com.example.widgets.Fake", || Ok(ComponentRef::new(Button::default())))
        .expect("Should register");
    let context = DesignContext::with_services(Rc::new(classes), Arc::new(DefaultInstanceCache::new()));

    let result = design::read_with_context(
        r#"<v-addon class="com.example.widgets.Fake"></v-addon>"#,
        context,
    );
    assert!(matches!(
        result,
        Err(DesignError::NoComponentClass {
            source: ClassError::Mismatch { .. },
            ..
        })
    ));
}

#[test]
fn test_custom_prefix_from_meta() {
    let context = design::read_with_context(
        r#"
        <html>
            <head>
                <meta name="package-mapping" content="ex:com.example.widgets">
            </head>
            <body>
                <ex-star-rating id="rating" stars="2"></ex-star-rating>
            </body>
        </html>
    "#,
        context_with_star_rating(),
    )
    .expect("Should read");

    assert_eq!(context.namespaces().package_for("ex"), Some("com.example.widgets"));
    let rating = context.component_by_id("rating").expect("rating");
    assert_eq!(rating.with(|r: &StarRating| r.stars), Some(2));
}

#[test]
fn test_custom_prefix_without_wrappers() {
    let context = design::read(
        r#"<meta name="package-mapping" content="my:com.vaadin.ui"><my-button id="b"></my-button>"#,
    )
    .expect("Should read");

    let root = context.component_root().expect("root");
    assert_eq!(root.class().qualified_name(), "com.vaadin.ui.Button");
    assert_eq!(context.component_by_id("b"), Some(root));
}

#[test]
fn test_malformed_meta_rejected() {
    let result = design::read(
        r#"<html><head><meta name="package-mapping" content="ex:com.example:extra"></head><body></body></html>"#,
    );
    match result {
        Err(DesignError::MalformedPackageMapping { markup }) => {
            assert!(markup.contains("ex:com.example:extra"));
        }
        other => panic!("Expected MalformedPackageMapping, got {:?}", other),
    }
}

#[test]
fn test_unknown_prefix() {
    let result = design::read("<ex-star-rating></ex-star-rating>");
    assert!(matches!(result, Err(DesignError::UnknownTag { tag }) if tag == "ex-star-rating"));
}

#[test]
fn test_missing_prefix() {
    let result = design::read("<button></button>");
    assert!(matches!(result, Err(DesignError::MissingPrefix { .. })));
}

#[test]
fn test_trailing_hyphen_follows_config() {
    let lenient = design::read("<v-button->OK</v-button->").expect("Should read");
    assert_eq!(
        lenient.component_root().map(|root| root.class().simple_name),
        Some("Button")
    );

    let strict = DesignConfig::new().with_strict_tag_names(true);
    let result = design::read_with_config("<v-button->OK</v-button->", &strict);
    assert!(matches!(result, Err(DesignError::MalformedTag { .. })));
}

#[test]
fn test_invalid_attribute_value() {
    let result = design::read(r#"<v-button enabled="maybe"></v-button>"#);
    match result {
        Err(DesignError::InvalidAttribute { attribute, value, .. }) => {
            assert_eq!(attribute, "enabled");
            assert_eq!(value, "maybe");
        }
        other => panic!("Expected InvalidAttribute, got {:?}", other),
    }
}

#[test]
fn test_default_instances_shared_between_contexts() {
    let cache = Arc::new(DefaultInstanceCache::new());
    let classes = Rc::new(ComponentRegistry::with_builtins());
    let first = DesignContext::with_services(Rc::clone(&classes), Arc::clone(&cache));
    let second = DesignContext::with_services(classes, Arc::clone(&cache));

    let a = first.default_instance::<Button>();
    let b = second.default_instance::<Button>();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(*a, Button::default());
    assert_eq!(cache.len(), 1);
}
