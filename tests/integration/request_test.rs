//! Integration tests for request dispatch, phases, assets, and notices.

use std::sync::Arc;

use async_trait::async_trait;

use plugworks_core::{AppError, AppResult};
use plugworks_host::notices::{Notice, NoticeLevel};
use plugworks_host::phase::{Phase, RequestKind};
use plugworks_host::plugin::{Plugin, PluginExportBuilder, PluginInfo};
use plugworks_host::registry::PhaseHandler;
use plugworks_host::request::RequestContext;
use plugworks_host::services::HostServices;
use plugworks_host::users::UserContext;

use crate::helpers::TestHost;

#[tokio::test]
async fn test_admin_request_runs_all_four_phases_once() {
    let test = TestHost::with_active_plugin().await;

    let report = test
        .host
        .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
        .await;

    assert_eq!(
        report.phases_run,
        vec![
            Phase::PluginsLoaded,
            Phase::Init,
            Phase::AdminInit,
            Phase::QueryReady
        ]
    );
    assert_eq!(report.handlers_run, 4);
    assert!(report.is_clean());

    assert_eq!(report.styles.len(), 1);
    assert_eq!(report.scripts.len(), 1);
    assert_eq!(report.styles[0].handle, "example-plugin-admin");
}

#[tokio::test]
async fn test_frontend_request_skips_admin_init() {
    let test = TestHost::with_active_plugin().await;

    let report = test
        .host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;

    assert_eq!(
        report.phases_run,
        vec![Phase::PluginsLoaded, Phase::Init, Phase::QueryReady]
    );
    assert_eq!(report.handlers_run, 3);
    assert_eq!(report.styles[0].handle, "example-plugin-public");
    assert_eq!(report.scripts[0].handle, "example-plugin-public");
}

#[tokio::test]
async fn test_asset_queue_is_request_scoped() {
    let test = TestHost::with_active_plugin().await;

    let admin_report = test
        .host
        .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
        .await;
    assert_eq!(admin_report.asset_handles(), vec!["example-plugin-admin"; 2]);

    // The next request starts from an empty queue; no admin leftovers.
    let frontend_report = test
        .host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;
    assert_eq!(
        frontend_report.asset_handles(),
        vec!["example-plugin-public"; 2]
    );
}

#[tokio::test]
async fn test_repeat_requests_fire_each_phase_once() {
    let test = TestHost::with_active_plugin().await;

    for _ in 0..3 {
        let report = test
            .host
            .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
            .await;
        assert_eq!(report.handlers_run, 4);
        assert_eq!(report.styles.len(), 1);
    }

    assert!(test.services().i18n.is_loaded("example-plugin"));
}

#[tokio::test]
async fn test_transient_notice_renders_once() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();

    services
        .notices
        .post(Notice::new(
            NoticeLevel::Warning,
            "example-plugin",
            "Heads up",
        ))
        .await;

    let first = test
        .host
        .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
        .await;
    assert_eq!(first.notices.len(), 1);
    assert_eq!(first.notices[0].message, "Heads up");

    let second = test
        .host
        .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
        .await;
    assert!(second.notices.is_empty());
}

#[tokio::test]
async fn test_persistent_notice_survives_admin_renders() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();

    services
        .notices
        .post(
            Notice::new(
                NoticeLevel::Error,
                "example-plugin",
                "Still broken",
            )
            .persistent(),
        )
        .await;

    for _ in 0..2 {
        let report = test
            .host
            .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
            .await;
        assert_eq!(report.notices.len(), 1);
        assert!(report.notices[0].persistent);
    }
}

#[tokio::test]
async fn test_frontend_request_renders_no_notices() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();

    services
        .notices
        .post(Notice::new(
            NoticeLevel::Info,
            "example-plugin",
            "Admin eyes only",
        ))
        .await;

    let frontend = test
        .host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;
    assert!(frontend.notices.is_empty());

    // The transient notice was not consumed by the front-end request.
    let admin = test
        .host
        .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
        .await;
    assert_eq!(admin.notices.len(), 1);
}

#[derive(Debug)]
struct FailingPlugin;

#[async_trait]
impl Plugin for FailingPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "failing-probe".to_string(),
            name: "Failing Probe".to_string(),
            version: "0.1.0".to_string(),
            description: "Fails during init".to_string(),
            author: "tests".to_string(),
        }
    }

    async fn activate(&self, _services: &HostServices) -> AppResult<()> {
        Ok(())
    }

    async fn deactivate(&self, _services: &HostServices) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Debug)]
struct FailingHandler;

#[async_trait]
impl PhaseHandler for FailingHandler {
    async fn run(&self, _services: &HostServices, _request: &RequestContext) -> AppResult<()> {
        Err(AppError::internal("deliberate failure"))
    }

    fn plugin_id(&self) -> &str {
        "failing-probe"
    }

    fn name(&self) -> &str {
        "broken_init"
    }

    fn priority(&self) -> i32 {
        // Run before the example plugin's handlers.
        1
    }
}

#[tokio::test]
async fn test_handler_failure_does_not_stop_other_handlers() {
    let test = TestHost::with_active_plugin().await;

    let export = PluginExportBuilder::new(Arc::new(FailingPlugin))
        .on(Phase::Init, Arc::new(FailingHandler))
        .build();
    test.host.install(export).await;
    test.host.activate("failing-probe").await.expect("activate");

    let report = test
        .host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].plugin_id, "failing-probe");
    assert_eq!(report.failures[0].handler, "broken_init");
    assert_eq!(report.failures[0].phase, Phase::Init);

    // The example plugin's init handler still ran after the failure.
    assert_eq!(report.styles[0].handle, "example-plugin-public");
    assert!(test.services().content.post_type("event").await.is_some());
}
