//! Integration tests for the settings page and option persistence.

use plugworks_host::phase::RequestKind;
use plugworks_host::users::UserContext;
use plugworks_sdk::form::FormData;

use crate::helpers::{example_settings, TestHost};

#[tokio::test]
async fn test_save_round_trips_through_snapshot() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();
    let settings = example_settings();
    let admin = UserContext::administrator("alice");

    let form = FormData::from_pairs(&[
        ("default_capacity", "250"),
        ("date_format", "d/m/Y H:i"),
        ("show_virtual_badge", "on"),
    ]);
    settings
        .save_settings(services, &admin, &form)
        .await
        .expect("save");

    let snapshot = settings.snapshot(services).await.expect("snapshot");
    assert_eq!(snapshot.default_capacity, 250);
    assert_eq!(snapshot.date_format, "d/m/Y H:i");
    assert!(snapshot.show_virtual_badge);

    // Booleans keep the legacy string encoding in storage.
    let raw = services
        .options
        .get("example_plugin_show_virtual_badge")
        .await
        .expect("get")
        .expect("stored");
    assert_eq!(raw.storage_repr(), "true");
}

#[tokio::test]
async fn test_unchecked_checkbox_saves_false() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();
    let settings = example_settings();
    let admin = UserContext::administrator("alice");

    let form = FormData::from_pairs(&[
        ("default_capacity", "50"),
        ("date_format", "Y-m-d"),
    ]);
    settings
        .save_settings(services, &admin, &form)
        .await
        .expect("save");

    let snapshot = settings.snapshot(services).await.expect("snapshot");
    assert!(!snapshot.show_virtual_badge);
}

#[tokio::test]
async fn test_unauthorized_render_generates_no_option_traffic() {
    let test = TestHost::with_active_plugin().await;
    let settings = example_settings();
    let editor = UserContext::editor("bob");

    test.store.reset_counters();

    let page = settings
        .render_settings_page(test.services(), &editor)
        .await
        .expect("render");

    assert_eq!(page, "<p>Not authorized</p>");
    assert_eq!(test.store.read_count(), 0);
    assert_eq!(test.store.write_count(), 0);
}

#[tokio::test]
async fn test_authorized_render_shows_current_values() {
    let test = TestHost::with_active_plugin().await;
    let settings = example_settings();
    let admin = UserContext::administrator("alice");

    let page = settings
        .render_settings_page(test.services(), &admin)
        .await
        .expect("render");

    assert!(page.contains("<h1>Example Plugin</h1>"));
    assert!(page.contains(r#"value="50""#));
    assert!(page.contains(r#"value="Y-m-d""#));
    assert!(page.contains("Save Changes"));
}

#[tokio::test]
async fn test_unauthorized_save_is_rejected_without_writes() {
    let test = TestHost::with_active_plugin().await;
    let settings = example_settings();
    let visitor = UserContext::anonymous();

    test.store.reset_counters();

    let form = FormData::from_pairs(&[
        ("default_capacity", "10"),
        ("date_format", "Y-m-d"),
    ]);
    let err = settings
        .save_settings(test.services(), &visitor, &form)
        .await
        .expect_err("save should fail");

    assert!(err.to_string().contains("Not authorized"));
    assert_eq!(test.store.write_count(), 0);
}

#[tokio::test]
async fn test_invalid_submissions_write_nothing() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();
    let settings = example_settings();
    let admin = UserContext::administrator("alice");

    test.store.reset_counters();

    // Out-of-range capacity.
    let form = FormData::from_pairs(&[
        ("default_capacity", "0"),
        ("date_format", "Y-m-d"),
    ]);
    settings
        .save_settings(services, &admin, &form)
        .await
        .expect_err("zero capacity rejected");

    // Blank date format.
    let form = FormData::from_pairs(&[
        ("default_capacity", "50"),
        ("date_format", "   "),
    ]);
    settings
        .save_settings(services, &admin, &form)
        .await
        .expect_err("blank format rejected");

    assert_eq!(test.store.write_count(), 0);

    let snapshot = settings.snapshot(services).await.expect("snapshot");
    assert_eq!(snapshot.default_capacity, 50);
    assert_eq!(snapshot.date_format, "Y-m-d");
}

#[tokio::test]
async fn test_quota_email_default_derives_from_admin_email() {
    let test = TestHost::with_active_plugin().await;
    let settings = example_settings();

    let quota_email = settings
        .controller()
        .string_option(test.services(), "quota_email")
        .await
        .expect("read");
    assert_eq!(quota_email.as_deref(), Some("admin@example.com"));

    // The computed default is read-time only; nothing extra is stored.
    assert_eq!(test.store.len(), 3);
}

#[tokio::test]
async fn test_successful_save_posts_admin_notice() {
    let test = TestHost::with_active_plugin().await;
    let settings = example_settings();
    let admin = UserContext::administrator("alice");

    let form = FormData::from_pairs(&[
        ("default_capacity", "75"),
        ("date_format", "Y-m-d"),
        ("show_virtual_badge", "on"),
    ]);
    settings
        .save_settings(test.services(), &admin, &form)
        .await
        .expect("save");

    let report = test
        .host
        .dispatch_request(RequestKind::Admin, admin)
        .await;
    assert!(report
        .notices
        .iter()
        .any(|n| n.message == "Settings saved."));
}
