//! Integration Tests: Bridge Actions
//!
//! Game code calls the facade, the host records the command, and the result
//! comes back later through the relay.

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tma_bridge::{
    init, BridgeActions, CallbackKind, CallbackRelay, HapticStyle, HostCall, OpenLinkOptions,
    RecordingHost, RequestedContact, ShareStoryParams,
};

const CONTACT_JSON: &str = r#"{"contact":{"userId":1,"phoneNumber":"+10000000000","firstName":"A","lastName":"B"},"authDate":"1700000000","hash":"deadbeef"}"#;

fn launched_host() -> Arc<RecordingHost> {
    Arc::new(
        RecordingHost::new()
            .with_user_info(
                r#"{"id":42,"firstName":"Ada","lastName":"L","username":"ada","isPremium":true}"#,
            )
            .with_launch_params(r#"{"platform":"ios","version":"8.0","startParam":"ref_7"}"#)
            .with_start_param("ref_7")
            .with_init_data_raw("user=%7B%22id%22%3A42%7D&hash=ff"),
    )
}

/// Test: attach logs and returns the launch snapshot the host provided
#[test]
fn test_attach_reads_launch_snapshot() {
    let host = launched_host();
    let (_relay, mut actions) = init(host);

    let snapshot = actions.attach();
    let user = snapshot.user.expect("user");
    assert_eq!(user.id, 42);
    assert_eq!(user.display_name(), "@ada");
    assert!(user.is_premium());
    assert_eq!(snapshot.launch_params.map(|p| p.platform), Some("ios".to_string()));
    assert_eq!(snapshot.start_param.as_deref(), Some("ref_7"));
    assert!(snapshot.init_data_raw.is_some());
}

/// Test: request contact, then the host answers through the relay
#[test]
fn test_contact_request_roundtrip() {
    let host = Arc::new(RecordingHost::new());
    let (relay, actions) = init(host.clone());

    let received = Arc::new(Mutex::new(Vec::<RequestedContact>::new()));
    let _sub = relay.contact().subscribe({
        let received = received.clone();
        move |c: &RequestedContact| received.lock().push(c.clone())
    });

    actions.request_contact().unwrap();
    assert_eq!(host.last_call(), Some(HostCall::RequestContact));
    assert!(actions.is_pending(CallbackKind::Contact));

    relay.dispatch("OnRequestContact", CONTACT_JSON).unwrap();

    assert!(!actions.is_pending(CallbackKind::Contact));
    assert_eq!(received.lock().len(), 1);
    assert_eq!(received.lock()[0].contact.phone_number, "+10000000000");
}

/// Test: a second request of the same kind is rejected until the callback arrives
#[test]
fn test_overlapping_request_rejected() {
    let host = Arc::new(RecordingHost::new());
    let (relay, actions) = init(host.clone());

    actions.request_phone_access().unwrap();
    let err = actions.request_phone_access().unwrap_err();
    assert_eq!(err.code(), "TMA_REQUEST_PENDING");
    assert!(err.is_recoverable());

    // Other kinds are independent
    actions.request_write_access().unwrap();

    relay.on_request_phone_access("sent");
    actions.request_phone_access().unwrap();

    let phone_requests = host
        .calls()
        .into_iter()
        .filter(|c| *c == HostCall::RequestPhoneAccess)
        .count();
    assert_eq!(phone_requests, 2);
}

/// Test: a malformed contact callback frees the pending slot
#[test]
fn test_malformed_contact_clears_pending() {
    let (relay, actions) = init(Arc::new(RecordingHost::new()));

    actions.request_contact().unwrap();
    assert!(relay.on_request_contact("{\"contact\":").is_err());

    assert!(!actions.is_pending(CallbackKind::Contact));
    actions.request_contact().unwrap();
}

/// Test: a missing host surfaces as a recoverable error and holds no slot
#[test]
fn test_missing_host_fails_request() {
    let host = Arc::new(RecordingHost::new());
    let (_relay, actions) = init(host.clone());
    host.set_available(false);

    let err = actions.request_contact().unwrap_err();
    assert_eq!(err.code(), "TMA_BRIDGE_UNAVAILABLE");
    assert!(!actions.is_pending(CallbackKind::Contact));

    assert!(!actions.wallet_connected());
    assert_eq!(actions.wallet_address(), None);

    host.set_available(true);
    actions.request_contact().unwrap();
}

/// Test: dropping the facade removes every subscription it made
#[test]
fn test_drop_unsubscribes() {
    let relay = Arc::new(CallbackRelay::new());
    {
        let mut actions = BridgeActions::new(Arc::new(RecordingHost::new()), relay.clone());
        actions.attach();
        assert_eq!(relay.subscriber_count(), 5);
        assert_eq!(relay.errors().subscriber_count(), 1);
    }
    assert_eq!(relay.subscriber_count(), 0);
    assert_eq!(relay.errors().subscriber_count(), 0);
    assert_eq!(relay.on_request_write_access("allowed"), 0);
}

/// Test: UI and sharing commands reach the host in call order
#[test]
fn test_commands_forwarded_in_order() {
    let host = Arc::new(RecordingHost::new());
    let (_relay, actions) = init(host.clone());

    actions.set_header_color("#000000").unwrap();
    actions.expand_viewport().unwrap();
    actions.request_vibration(HapticStyle::Rigid).unwrap();
    actions
        .open_link(
            "https://www.yescoin.gold",
            OpenLinkOptions {
                try_browser: true,
                try_instant_view: false,
            },
        )
        .unwrap();
    actions
        .share_story(&ShareStoryParams {
            media_url: "https://cdn.example/story.png".to_string(),
            text: "Join me".to_string(),
            widget_link_url: "https://t.me/theYescoin_bot/Yescoin".to_string(),
            widget_link_name: "Play".to_string(),
        })
        .unwrap();
    actions.set_emoji_status("5368324170671202286", 3600).unwrap();

    let calls = host.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0], HostCall::SetHeaderColor("#000000".to_string()));
    assert_eq!(calls[1], HostCall::ExpandViewport);
    assert_eq!(calls[2], HostCall::RequestVibration(HapticStyle::Rigid));
    assert!(matches!(&calls[3], HostCall::OpenLink { options, .. } if options.try_browser));
    assert!(matches!(&calls[4], HostCall::ShareStory(s) if s.text == "Join me"));
    assert_eq!(
        calls[5],
        HostCall::RequestSetEmojiStatus {
            custom_emoji_id: "5368324170671202286".to_string(),
            duration_secs: 3600,
        }
    );
}

/// Test: invalid arguments never reach the host
#[test]
fn test_invalid_arguments_rejected_locally() {
    let host = Arc::new(RecordingHost::new());
    let (_relay, actions) = init(host.clone());

    assert!(actions.pay_with_ton(None, 0.0, "").is_err());
    assert!(actions.pay_with_ton(None, f64::NAN, "").is_err());
    assert!(actions.pay_with_ton(Some(""), 0.5, "").is_err());
    assert!(actions.set_emoji_status("", 60).is_err());
    assert!(host.calls().is_empty());

    actions.pay_with_ton(None, 0.5, "order-1").unwrap();
    assert_eq!(
        host.last_call(),
        Some(HostCall::PayWithTon {
            address: None,
            amount: 0.5,
            comment: "order-1".to_string()
        })
    );
}

/// Test: an explicit recipient reaches the host verbatim
#[test]
fn test_pay_with_ton_explicit_recipient() {
    let host = Arc::new(RecordingHost::new());
    let (_relay, actions) = init(host.clone());

    let recipient = "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t";
    actions
        .pay_with_ton(Some(recipient), 1.25, "shop: sword")
        .unwrap();

    assert_eq!(
        host.calls(),
        vec![HostCall::PayWithTon {
            address: Some(recipient.to_string()),
            amount: 1.25,
            comment: "shop: sword".to_string()
        }]
    );
}

/// Test: wallet queries follow the host's connection state
#[test]
fn test_wallet_state_through_facade() {
    let host = Arc::new(RecordingHost::new().with_wallet_address("UQ_test"));
    let (_relay, actions) = init(host);

    assert!(!actions.wallet_connected());
    actions.connect_wallet().unwrap();
    assert!(actions.wallet_connected());
    assert_eq!(actions.wallet_address().as_deref(), Some("UQ_test"));

    actions.disconnect_wallet().unwrap();
    assert_eq!(actions.wallet_address(), None);
}
