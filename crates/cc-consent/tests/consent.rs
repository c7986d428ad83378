//! Event bus and consent manager behaviour

use std::cell::RefCell;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::rc::Rc;

use cc_consent::{
    ConsentCategory, ConsentConfig, ConsentEvent, ConsentManager, ConsentManagerOptions,
    ConsentPreferences, DataLayer, EventBus, Payload, PreferenceStore, Storage,
};

fn ab_categories() -> Vec<ConsentCategory> {
    vec![
        ConsentCategory::required("a"),
        ConsentCategory::new("b").checked(false),
    ]
}

fn recorder(bus: &EventBus, event: ConsentEvent) -> Rc<RefCell<Vec<Payload>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let _sub = bus.subscribe(event, move |payload| s.borrow_mut().push(payload.clone()));
    seen
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cc-consent-it-{}-{name}.db", std::process::id()))
}

// ============================================================================
// EVENT BUS
// ============================================================================

#[test]
fn test_subscribers_called_in_order() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l1 = Rc::clone(&log);
    let _first = bus.subscribe(ConsentEvent::Updated, move |p| l1.borrow_mut().push((1, p.clone())));
    let l2 = Rc::clone(&log);
    let _second = bus.subscribe(ConsentEvent::Updated, move |p| l2.borrow_mut().push((2, p.clone())));

    let payload = Payload::from(ConsentPreferences::from([("a", false)]));
    bus.publish(ConsentEvent::Updated, payload.clone());

    assert_eq!(*log.borrow(), vec![(1, payload.clone()), (2, payload)]);
}

#[test]
fn test_unsubscribe_removes_only_that_callback() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l1 = Rc::clone(&log);
    let first = bus.subscribe(ConsentEvent::Updated, move |_| l1.borrow_mut().push(1));
    let l2 = Rc::clone(&log);
    let _second = bus.subscribe(ConsentEvent::Updated, move |_| l2.borrow_mut().push(2));

    first.unsubscribe();
    bus.publish(ConsentEvent::Updated, ConsentPreferences::from([("a", false)]));

    assert_eq!(*log.borrow(), vec![2]);
    assert_eq!(bus.subscriber_count(ConsentEvent::Updated), 1);
}

#[test]
fn test_late_subscriber_gets_no_replay() {
    let bus = EventBus::new();
    bus.publish(ConsentEvent::AllAccepted, ());
    let seen = recorder(&bus, ConsentEvent::AllAccepted);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_subscribe_during_publish_applies_next_time() {
    let bus = EventBus::new();
    let hits = Rc::new(RefCell::new(0));

    let inner_bus = bus.clone();
    let h = Rc::clone(&hits);
    let _sub = bus.subscribe("e", move |_| {
        let h = Rc::clone(&h);
        let _nested = inner_bus.subscribe("e", move |_| *h.borrow_mut() += 1);
    });

    bus.publish("e", ());
    assert_eq!(*hits.borrow(), 0);
    bus.publish("e", ());
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn test_panicking_subscriber_stops_delivery() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l1 = Rc::clone(&log);
    let _first = bus.subscribe("e", move |_| l1.borrow_mut().push(1));
    let _second = bus.subscribe("e", |_| panic!("subscriber failed"));
    let l3 = Rc::clone(&log);
    let _third = bus.subscribe("e", move |_| l3.borrow_mut().push(3));

    let result = panic::catch_unwind(AssertUnwindSafe(|| bus.publish("e", ())));

    assert!(result.is_err());
    assert_eq!(*log.borrow(), vec![1]);
    assert_eq!(bus.subscriber_count("e"), 3);
}

// ============================================================================
// CONSENT MANAGER: CONSTRUCTION
// ============================================================================

#[test]
fn test_construction_map() {
    let manager = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), EventBus::new()));
    assert_eq!(manager.preferences(), ConsentPreferences::from([("a", true), ("b", false)]));
}

#[test]
fn test_required_granted_even_when_unchecked() {
    let categories = vec![
        ConsentCategory::required("necessary").checked(false),
        ConsentCategory::new("extra"),
    ];
    let manager = ConsentManager::new(ConsentManagerOptions::new(categories, EventBus::new()));
    assert!(manager.preferences().is_granted("necessary"));
}

#[test]
fn test_load_on_init() {
    let mut storage = Storage::session();
    storage
        .set_item("cookiePreferences", r#"{"a":true,"b":true}"#)
        .unwrap();

    let config = ConsentConfig {
        load_on_init: true,
        ..ConsentConfig::default()
    };
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new())
            .with_storage(storage)
            .with_config(config),
    );
    assert!(manager.preferences().is_granted("b"));
}

#[test]
fn test_no_load_by_default() {
    let mut storage = Storage::session();
    storage.set_item("cookiePreferences", r#"{"b":true}"#).unwrap();

    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new()).with_storage(storage),
    );
    assert!(!manager.preferences().is_granted("b"));
}

// ============================================================================
// CONSENT MANAGER: UPDATES
// ============================================================================

#[test]
fn test_empty_update_is_noop() {
    let manager = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), EventBus::new()));
    let before = manager.preferences();
    manager.update_preferences(&ConsentPreferences::new());
    assert_eq!(manager.preferences(), before);
}

#[test]
fn test_repeated_update_is_idempotent() {
    let partial = ConsentPreferences::from([("b", true)]);

    let once = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), EventBus::new()));
    once.update_preferences(&partial);

    let twice = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), EventBus::new()));
    twice.update_preferences(&partial);
    twice.update_preferences(&partial);

    assert_eq!(once.preferences(), twice.preferences());
}

#[test]
fn test_required_not_reenforced_by_default() {
    let manager = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), EventBus::new()));
    manager.update_preferences(&ConsentPreferences::from([("a", false)]));
    assert!(!manager.preferences().is_granted("a"));
}

#[test]
fn test_required_reenforced_when_configured() {
    let config = ConsentConfig {
        enforce_required_on_update: true,
        ..ConsentConfig::default()
    };
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new()).with_config(config),
    );
    manager.update_preferences(&ConsentPreferences::from([("a", false), ("b", true)]));
    assert_eq!(manager.preferences(), ConsentPreferences::from([("a", true), ("b", true)]));
}

#[test]
fn test_updates_arrive_over_bus() {
    let bus = EventBus::new();
    let layer = DataLayer::new();
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ConsentCategory::defaults(), bus.clone())
            .with_signaler(layer.clone()),
    );

    bus.publish(ConsentEvent::Updated, ConsentPreferences::from([("performance", true)]));

    assert!(manager.preferences().is_granted("performance"));
    assert_eq!(layer.last().unwrap()[2]["analytics_storage"], "granted");
}

#[test]
fn test_non_preference_payload_ignored() {
    let bus = EventBus::new();
    let manager = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), bus.clone()));
    bus.publish(ConsentEvent::Updated, "garbage");
    assert_eq!(manager.preferences(), ConsentPreferences::from([("a", true), ("b", false)]));
}

// ============================================================================
// CONSENT MANAGER: ACCEPT / REJECT
// ============================================================================

#[test]
fn test_accept_all_publishes_once() {
    let bus = EventBus::new();
    let accepted = recorder(&bus, ConsentEvent::AllAccepted);
    let manager = ConsentManager::new(ConsentManagerOptions::new(ConsentCategory::defaults(), bus));

    let all = manager.accept_all(manager.categories());

    assert!(all.iter().all(|(_, granted)| granted));
    assert_eq!(all.len(), 5);
    assert_eq!(*accepted.borrow(), vec![Payload::Preferences(all.clone())]);
    assert_eq!(manager.preferences(), all);
}

#[test]
fn test_reject_all_keeps_required() {
    let bus = EventBus::new();
    let rejected = recorder(&bus, ConsentEvent::AllRejected);
    let manager = ConsentManager::new(ConsentManagerOptions::new(ConsentCategory::defaults(), bus));
    manager.accept_all(manager.categories());

    let map = manager.reject_all(manager.categories());

    assert!(map.is_granted("strictly-necessary"));
    assert!(!map.is_granted("targeting"));
    assert_eq!(rejected.borrow().len(), 1);
    assert_eq!(manager.preferences(), map);
}

#[test]
fn test_accept_all_handler_reads_state() {
    let bus = EventBus::new();
    let manager = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), bus.clone()));

    let seen = Rc::new(RefCell::new(None));
    let s = Rc::clone(&seen);
    let m = manager.clone();
    let _sub = bus.subscribe(ConsentEvent::AllAccepted, move |_| {
        *s.borrow_mut() = Some(m.preferences());
    });

    manager.accept_all(&ab_categories());
    assert_eq!(*seen.borrow(), Some(ConsentPreferences::from([("a", true), ("b", true)])));
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_round_trip_through_storage() {
    let storage = Rc::new(RefCell::new(Storage::session()));
    let writer = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new()).with_storage(Rc::clone(&storage)),
    );
    writer.update_preferences(&ConsentPreferences::from([("b", true)]));

    let reader = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new()).with_storage(storage),
    );
    assert_eq!(
        reader.load_preferences(),
        Some(ConsentPreferences::from([("a", true), ("b", true)]))
    );
}

#[test]
fn test_load_replaces_wholesale() {
    let mut storage = Storage::session();
    storage.set_item("cookiePreferences", r#"{"z":true}"#).unwrap();
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new()).with_storage(storage),
    );

    manager.load_preferences();
    assert_eq!(manager.preferences(), ConsentPreferences::from([("z", true)]));
}

#[test]
fn test_load_nothing_stored() {
    let manager = ConsentManager::new(ConsentManagerOptions::new(ab_categories(), EventBus::new()));
    assert_eq!(manager.load_preferences(), None);
    assert_eq!(manager.preferences(), ConsentPreferences::from([("a", true), ("b", false)]));
}

#[test]
fn test_full_storage_keeps_memory_state() {
    let storage = Storage::session().with_quota(4);
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new()).with_storage(storage),
    );

    let merged = manager.update_preferences(&ConsentPreferences::from([("b", true)]));
    assert!(merged.is_granted("b"));
    assert_eq!(manager.load_preferences(), None);
    assert!(manager.preferences().is_granted("b"));
}

#[test]
fn test_custom_storage_key_on_disk() {
    let path = temp_path("custom-key");
    let _ = fs::remove_file(&path);

    let config = ConsentConfig::from_json(r#"{"storageKey": "consent"}"#).unwrap();
    let manager = ConsentManager::new(
        ConsentManagerOptions::new(ab_categories(), EventBus::new())
            .with_storage(Storage::local(&path).unwrap())
            .with_config(config),
    );
    manager.update_preferences(&ConsentPreferences::from([("b", true)]));

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "consent\t{\"a\":true,\"b\":true}");
    let _ = fs::remove_file(&path);
}
