mod common;

use std::sync::Arc;

use common::{init_logging, network_error, MockVerdictClient};
use phishguard_client::VerdictKind;
use phishguard_core::{Label, Msg};
use phishguard_runtime::{
    spawn_coordinator, CoordinatorError, InProcessPlatform, PHISHING_DIALOG_TEXT,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn legitimate_verdict_replies_success_and_pushes_nothing() {
    init_logging();
    let client = Arc::new(MockVerdictClient::legitimate());
    let platform = Arc::new(InProcessPlatform::new());
    let (tab, mut inbox) = platform.open_tab("http://safe.example");
    let mut alerts = platform.subscribe_alerts();
    let handle = spawn_coordinator(client, platform.clone());

    let verdict = handle
        .check_url("http://safe.example", Some(tab))
        .await
        .expect("check ok");

    assert_eq!(verdict.kind, VerdictKind::Legitimate);
    assert!(inbox.try_recv().is_err());
    assert!(alerts.try_recv().is_err());
    assert!(platform.take_dialogs().is_empty());
}

#[tokio::test]
async fn phishing_verdict_pushes_exactly_one_block_and_an_alert() {
    init_logging();
    let client = Arc::new(MockVerdictClient::phishing());
    let platform = Arc::new(InProcessPlatform::new());
    let (tab, mut inbox) = platform.open_tab("http://evil.example");
    let mut alerts = platform.subscribe_alerts();
    let handle = spawn_coordinator(client, platform.clone());

    let verdict = handle
        .check_url("http://evil.example", Some(tab))
        .await
        .expect("check ok");

    assert_eq!(verdict.kind, VerdictKind::Phishing);
    assert_eq!(
        inbox.try_recv().expect("block instruction delivered"),
        Msg::BlockPage {
            url: "http://evil.example".to_string(),
        }
    );
    // One checkURL that came back phishing means one blockPage, no more.
    assert!(inbox.try_recv().is_err());
    assert_eq!(
        alerts.try_recv().expect("alert broadcast"),
        Msg::ShowPhishingAlert {
            url: "http://evil.example".to_string(),
        }
    );
}

#[tokio::test]
async fn classification_failure_replies_error_and_pushes_nothing() {
    init_logging();
    let client = Arc::new(MockVerdictClient::failing());
    let platform = Arc::new(InProcessPlatform::new());
    let (tab, mut inbox) = platform.open_tab("http://odd.example");
    let handle = spawn_coordinator(client, platform.clone());

    let err = handle
        .check_url("http://odd.example", Some(tab))
        .await
        .unwrap_err();

    assert!(matches!(err, CoordinatorError::Api(_)));
    assert!(inbox.try_recv().is_err());
    assert!(platform.take_dialogs().is_empty());
}

#[tokio::test]
async fn refused_popup_falls_back_to_warning_dialog() {
    init_logging();
    let client = Arc::new(MockVerdictClient::phishing());
    let platform = Arc::new(InProcessPlatform::new());
    platform.set_popup_openable(false);
    let (tab, _inbox) = platform.open_tab("http://evil.example");
    let mut alerts = platform.subscribe_alerts();
    let handle = spawn_coordinator(client, platform.clone());

    handle
        .check_url("http://evil.example", Some(tab))
        .await
        .expect("check ok");

    assert_eq!(
        platform.take_dialogs(),
        vec![PHISHING_DIALOG_TEXT.to_string()]
    );
    assert!(alerts.try_recv().is_err());
}

#[tokio::test]
async fn delivery_failure_to_a_gone_tab_is_non_fatal() {
    init_logging();
    let client = Arc::new(MockVerdictClient::phishing());
    let platform = Arc::new(InProcessPlatform::new());
    let (tab, inbox) = platform.open_tab("http://evil.example");
    // The page context goes away before the push arrives.
    drop(inbox);
    let handle = spawn_coordinator(client, platform.clone());

    let verdict = handle
        .check_url("http://evil.example", Some(tab))
        .await
        .expect("check still resolves");
    assert_eq!(verdict.kind, VerdictKind::Phishing);
}

#[tokio::test]
async fn push_to_a_closed_tab_is_logged_and_the_check_completes() {
    init_logging();
    let client = Arc::new(MockVerdictClient::phishing());
    let platform = Arc::new(InProcessPlatform::new());
    let (tab, _inbox) = platform.open_tab("http://evil.example");
    platform.close_tab(tab.id);
    let handle = spawn_coordinator(client, platform.clone());

    let verdict = handle
        .check_url("http://evil.example", Some(tab))
        .await
        .expect("check still resolves");
    assert_eq!(verdict.kind, VerdictKind::Phishing);
}

#[tokio::test]
async fn fallback_resolution_targets_the_currently_active_tab() {
    init_logging();
    let client = Arc::new(MockVerdictClient::phishing());
    let platform = Arc::new(InProcessPlatform::new());
    let (first, mut first_inbox) = platform.open_tab("http://evil.example");
    let (_second, mut second_inbox) = platform.open_tab("http://other.example");
    platform.activate_tab(first.id);
    let handle = spawn_coordinator(client, platform.clone());

    // No sender tab on the message, so the active tab takes the push.
    handle
        .check_url("http://evil.example", None)
        .await
        .expect("check ok");

    assert!(first_inbox.try_recv().is_ok());
    assert!(second_inbox.try_recv().is_err());
}

#[tokio::test]
async fn no_resolvable_tab_is_logged_and_the_check_completes() {
    init_logging();
    let client = Arc::new(MockVerdictClient::phishing());
    let platform = Arc::new(InProcessPlatform::new());
    let mut alerts = platform.subscribe_alerts();
    let handle = spawn_coordinator(client, platform.clone());

    // No sender tab and no active tab at all.
    let verdict = handle
        .check_url("http://evil.example", None)
        .await
        .expect("check ok");

    assert_eq!(verdict.kind, VerdictKind::Phishing);
    // The alert pathway still runs even without a target tab.
    assert_eq!(
        alerts.try_recv().expect("alert broadcast"),
        Msg::ShowPhishingAlert {
            url: "http://evil.example".to_string(),
        }
    );
}

#[tokio::test]
async fn report_passes_the_wire_label_and_returns_the_confirmation() {
    init_logging();
    let client = Arc::new(MockVerdictClient::legitimate());
    let platform = Arc::new(InProcessPlatform::new());
    let handle = spawn_coordinator(client.clone(), platform);

    let message = handle
        .report_phishing("http://x", Label::Phishing)
        .await
        .expect("report ok");

    assert_eq!(message, "URL reported, thanks!");
    assert_eq!(
        client.reports.lock().unwrap().as_slice(),
        &[("http://x".to_string(), 1)]
    );
}

#[tokio::test]
async fn report_failure_surfaces_as_an_api_error() {
    init_logging();
    let client =
        Arc::new(MockVerdictClient::legitimate().with_report_reply(Err(network_error())));
    let platform = Arc::new(InProcessPlatform::new());
    let handle = spawn_coordinator(client, platform);

    let err = handle
        .report_phishing("http://x", Label::Legitimate)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::Api(_)));
}

#[tokio::test]
async fn concurrent_checks_each_resolve_their_own_reply() {
    init_logging();
    let client = Arc::new(MockVerdictClient::legitimate());
    let platform = Arc::new(InProcessPlatform::new());
    let handle = spawn_coordinator(client.clone(), platform);
    let other = handle.clone();

    let (first, second) = tokio::join!(
        handle.check_url("http://a.example", None),
        other.check_url("http://b.example", None),
    );

    assert_eq!(first.expect("first ok").kind, VerdictKind::Legitimate);
    assert_eq!(second.expect("second ok").kind, VerdictKind::Legitimate);
    assert_eq!(
        client
            .classify_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        2
    );
}
