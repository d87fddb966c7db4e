//! Integration Tests: Callback Relay
//!
//! Host callbacks arrive as single string payloads and must reach every live
//! subscriber exactly once, and nobody after they unsubscribe.

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tma_bridge::{CallbackKind, CallbackRelay, RelayFailure, RequestedContact, User};

const CONTACT_JSON: &str = r#"{"contact":{"userId":1,"phoneNumber":"+10000000000","firstName":"A","lastName":"B"},"authDate":"1700000000","hash":"deadbeef"}"#;

fn collect<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static)
where
    T: Sync,
{
    let store = Arc::new(Mutex::new(Vec::new()));
    let sink = store.clone();
    (store, move |value: &T| sink.lock().push(value.clone()))
}

/// Test: the sample contact payload raises exactly one event with unmodified fields
#[test]
fn test_contact_callback_delivers_exact_fields() {
    let relay = CallbackRelay::new();
    let (received, handler) = collect::<RequestedContact>();
    let _sub = relay.contact().subscribe(handler);

    let delivered = relay.on_request_contact(CONTACT_JSON).expect("valid payload");
    assert_eq!(delivered, 1);

    let received = received.lock();
    assert_eq!(received.len(), 1);

    let contact = &received[0];
    assert_eq!(contact.contact.user_id, 1);
    assert_eq!(contact.contact.phone_number, "+10000000000");
    assert_eq!(contact.contact.first_name, "A");
    assert_eq!(contact.contact.last_name, "B");
    assert_eq!(contact.auth_date, "1700000000");
    assert_eq!(contact.hash, "deadbeef");
}

/// Test: a malformed contact payload is reported and raises no contact event
#[test]
fn test_malformed_contact_reported_not_raised() {
    let relay = CallbackRelay::new();
    let (contacts, on_contact) = collect::<RequestedContact>();
    let (failures, on_failure) = collect::<RelayFailure>();
    let _c = relay.contact().subscribe(on_contact);
    let _f = relay.errors().subscribe(on_failure);

    for payload in ["", "{", r#"{"contact":{"userId":"one"}}"#, "null"] {
        let result = relay.on_request_contact(payload);
        assert!(result.is_err(), "payload {:?} should fail", payload);
    }

    assert!(contacts.lock().is_empty());

    let failures = failures.lock();
    assert_eq!(failures.len(), 4);
    assert!(failures
        .iter()
        .all(|f| f.callback == Some(CallbackKind::Contact) && f.error.code() == "TMA_PARSE"));
    assert_eq!(failures[1].payload, "{");
}

/// Test: relay keeps working after a bad payload
#[test]
fn test_relay_survives_bad_payload() {
    let relay = CallbackRelay::new();
    let (contacts, handler) = collect::<RequestedContact>();
    let _sub = relay.contact().subscribe(handler);

    assert!(relay.on_request_contact("garbage").is_err());
    assert_eq!(relay.on_request_contact(CONTACT_JSON).unwrap(), 1);
    assert_eq!(contacts.lock().len(), 1);
}

/// Test: every subscriber sees each event, in subscription order
#[test]
fn test_fan_out_to_many_subscribers() {
    let relay = CallbackRelay::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let subs: Vec<_> = (0..3)
        .map(|i| {
            let order = order.clone();
            relay
                .write_access()
                .subscribe(move |status: &String| order.lock().push(format!("{}:{}", i, status)))
        })
        .collect();

    assert_eq!(relay.on_request_write_access("allowed"), 3);
    assert_eq!(*order.lock(), vec!["0:allowed", "1:allowed", "2:allowed"]);
    drop(subs);
}

/// Test: no delivery after unsubscribe, on any channel
#[test]
fn test_no_delivery_after_unsubscribe() {
    let relay = CallbackRelay::new();
    let (statuses, handler) = collect::<String>();

    let sub = relay.emoji_status_access().subscribe(handler);
    relay.on_request_emoji_status_access("allowed");
    assert!(sub.is_active());

    sub.unsubscribe();
    relay.on_request_emoji_status_access("cancelled");
    relay.dispatch("OnRequestEmojiStatusAccess", "allowed").unwrap();

    assert_eq!(*statuses.lock(), vec!["allowed".to_string()]);
    assert_eq!(relay.emoji_status_access().subscriber_count(), 0);
}

/// Test: a subscriber that unsubscribes itself mid-dispatch gets no further events
#[test]
fn test_self_unsubscribe_from_handler() {
    let relay = Arc::new(CallbackRelay::new());
    let hits = Arc::new(Mutex::new(0));
    let slot: Arc<Mutex<Option<tma_bridge::Subscription>>> = Arc::new(Mutex::new(None));

    let sub = {
        let hits = hits.clone();
        let slot = slot.clone();
        relay.clipboard_text().subscribe(move |_text: &String| {
            *hits.lock() += 1;
            if let Some(me) = slot.lock().take() {
                me.unsubscribe();
            }
        })
    };
    *slot.lock() = Some(sub);

    relay.on_read_text_from_clipboard("one");
    relay.on_read_text_from_clipboard("two");

    assert_eq!(*hits.lock(), 1);
}

/// Test: dispatch by host callback name reaches the typed channels
#[test]
fn test_dispatch_all_callback_names() {
    let relay = CallbackRelay::new();
    let (phone, h1) = collect::<String>();
    let (clip, h2) = collect::<String>();
    let (contacts, h3) = collect::<RequestedContact>();
    let _a = relay.phone_access().subscribe(h1);
    let _b = relay.clipboard_text().subscribe(h2);
    let _c = relay.contact().subscribe(h3);

    relay.dispatch("OnRequestPhoneAccess", "sent").unwrap();
    relay.dispatch("OnReadTextFromClipboard", "hello").unwrap();
    relay.dispatch("OnRequestContact", CONTACT_JSON).unwrap();
    relay.dispatch("OnRequestWriteAccess", "allowed").unwrap();

    assert_eq!(*phone.lock(), vec!["sent".to_string()]);
    assert_eq!(*clip.lock(), vec!["hello".to_string()]);
    assert_eq!(contacts.lock().len(), 1);
    assert!(relay.dispatch("OnRequestPayment", "{}").is_err());
}

/// Test: user info JSON survives a parse/serialize cycle field-for-field
#[test]
fn test_user_info_roundtrip() {
    let samples = [
        serde_json::json!({"firstName": "A", "id": 1, "lastName": "B"}),
        serde_json::json!({
            "firstName": "A", "id": 2, "lastName": "", "username": "a",
            "isPremium": false, "languageCode": "ru"
        }),
        serde_json::json!({
            "addedToAttachmentMenu": true, "allowsWriteToPm": true, "firstName": "A",
            "id": 5_123_456_789_i64, "isBot": false, "isPremium": true, "lastName": "B",
            "languageCode": "en", "photoUrl": "https://t.me/i/userpic/a.jpg", "username": "a"
        }),
    ];

    for json in samples {
        let user: User = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), json);
    }
}
