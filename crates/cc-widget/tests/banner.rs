//! Mounted banner behaviour

use std::cell::RefCell;
use std::rc::Rc;

use cc_consent::{
    ConsentConfig, ConsentEvent, ConsentManager, ConsentManagerOptions, ConsentPreferences,
    DataLayer, EventBus, Payload, PreferenceStore, Storage,
};
use cc_dom::{Document, NodeId};
use cc_runtime::RenderError;
use cc_widget::{categories, mount, toggle_checkbox};

struct Page {
    doc: Document,
    app: NodeId,
    bus: EventBus,
    manager: ConsentManager,
    data_layer: DataLayer,
}

fn page_with(storage: impl PreferenceStore + 'static) -> Page {
    let mut doc = Document::new();
    let app = doc.tree.create_element("div");
    doc.tree.set_attribute(app, "id", "app").unwrap();
    let body = doc.body();
    doc.tree.append_child(body, app).unwrap();

    let bus = EventBus::new();
    let data_layer = DataLayer::new();
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(categories(), bus.clone())
            .with_storage(storage)
            .with_signaler(data_layer.clone()),
    );
    mount(&mut doc, &manager).unwrap();

    Page { doc, app, bus, manager, data_layer }
}

fn page() -> Page {
    page_with(Storage::session())
}

fn class_node(page: &Page, class: &str) -> NodeId {
    page.doc.query_class(class).unwrap()
}

// ============================================================================
// MOUNTING
// ============================================================================

#[test]
fn test_mount_renders_control_and_dialog() {
    let page = page();
    let children = page.doc.tree.child_ids(page.app);
    assert_eq!(children.len(), 2);

    let control = class_node(&page, "cb-control");
    let dialog = class_node(&page, "cb-dialog");
    assert_eq!(children, vec![control, dialog]);
    assert_eq!(page.doc.tree.get_attribute(dialog, "data-open"), Some("false"));
    assert!(page.doc.tree.text_content(dialog).contains("This website uses cookies"));
}

#[test]
fn test_mount_missing_target() {
    let mut doc = Document::new();
    let manager = ConsentManager::new(ConsentManagerOptions::new(categories(), EventBus::new()));
    assert_eq!(mount(&mut doc, &manager).unwrap_err(), RenderError::MountTargetMissing);
}

#[test]
fn test_mount_custom_id() {
    let mut doc = Document::new();
    let host = doc.tree.create_element("section");
    doc.tree.set_attribute(host, "id", "consent").unwrap();
    let body = doc.body();
    doc.tree.append_child(body, host).unwrap();

    let config = ConsentConfig::from_json(r#"{"mountId": "consent"}"#).unwrap();
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(categories(), EventBus::new()).with_config(config),
    );
    mount(&mut doc, &manager).unwrap();
    assert_eq!(doc.tree.child_ids(host).len(), 2);
}

#[test]
fn test_checkboxes_reflect_preferences() {
    let page = page();
    let necessary = page.doc.get_element_by_id("strictly-necessary").unwrap();
    let targeting = page.doc.get_element_by_id("targeting").unwrap();

    assert_eq!(page.doc.tree.get_attribute(necessary, "checked"), Some("true"));
    assert_eq!(page.doc.tree.get_attribute(necessary, "disabled"), Some("true"));
    assert_eq!(page.doc.tree.get_attribute(targeting, "checked"), Some("false"));
}

// ============================================================================
// INTERACTION
// ============================================================================

#[test]
fn test_open_and_close_dialog() {
    let mut page = page();
    let control = class_node(&page, "cb-control");
    let dialog = class_node(&page, "cb-dialog");

    page.doc.click(control).unwrap();
    assert_eq!(page.doc.tree.get_attribute(dialog, "data-open"), Some("true"));
    assert_eq!(page.doc.tree.get_attribute(control, "data-open"), Some("true"));

    let close = page.doc.query_class("flex-shrink-0").unwrap();
    page.doc.click(close).unwrap();
    assert_eq!(page.doc.tree.get_attribute(dialog, "data-open"), Some("false"));
}

#[test]
fn test_checkbox_publishes_update() {
    let mut page = page();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let _sub = page
        .bus
        .subscribe(ConsentEvent::Updated, move |p| s.borrow_mut().push(p.clone()));

    assert_eq!(toggle_checkbox(&mut page.doc, "performance").unwrap(), Some(true));

    assert_eq!(
        *seen.borrow(),
        vec![Payload::Preferences(ConsentPreferences::from([("performance", true)]))]
    );
    assert!(page.manager.preferences().is_granted("performance"));
    assert_eq!(page.data_layer.len(), 1);
}

#[test]
fn test_required_checkbox_cannot_toggle() {
    let mut page = page();
    assert_eq!(toggle_checkbox(&mut page.doc, "strictly-necessary").unwrap(), None);
    assert_eq!(toggle_checkbox(&mut page.doc, "no-such-box").unwrap(), None);
    assert!(page.data_layer.is_empty());
}

#[test]
fn test_accept_all_button() {
    let mut page = page();
    let accepted = Rc::new(RefCell::new(0));
    let a = Rc::clone(&accepted);
    let _sub = page.bus.subscribe(ConsentEvent::AllAccepted, move |_| *a.borrow_mut() += 1);

    let control = class_node(&page, "cb-control");
    page.doc.click(control).unwrap();
    let accept = class_node(&page, "cb-accept");
    page.doc.click(accept).unwrap();

    assert_eq!(*accepted.borrow(), 1);
    assert!(page.manager.preferences().iter().all(|(_, granted)| granted));
    let dialog = class_node(&page, "cb-dialog");
    assert_eq!(page.doc.tree.get_attribute(dialog, "data-open"), Some("false"));

    let targeting = page.doc.get_element_by_id("targeting").unwrap();
    assert_eq!(page.doc.tree.get_attribute(targeting, "checked"), Some("true"));

    let last = page.data_layer.last().unwrap();
    assert_eq!(last[2]["ad_storage"], "granted");
    assert_eq!(last[2]["analytics_storage"], "granted");
}

#[test]
fn test_decline_all_button() {
    let storage = Rc::new(RefCell::new(Storage::session()));
    let mut page = page_with(Rc::clone(&storage));

    let decline = class_node(&page, "cb-decline");
    page.doc.click(decline).unwrap();

    let saved = storage.borrow().get_item("cookiePreferences").unwrap().unwrap();
    let saved = ConsentPreferences::from_json(&saved).unwrap();
    assert!(saved.is_granted("strictly-necessary"));
    assert!(!saved.is_granted("performance"));
    assert_eq!(page.manager.preferences(), saved);
}
