//! Plugworks demo host.
//!
//! Boots a host, installs and activates the example plugin, then walks one
//! admin and one front-end request through the phase cycle, printing what
//! each side of the framework produced along the way.

use tracing_subscriber::{EnvFilter, fmt};

use plugin_example::{ExampleSettings, PLUGIN_ID, PLUGIN_VERSION};
use plugworks_core::config::HostConfig;
use plugworks_core::{AppError, AppResult, ComponentInfo};
use plugworks_host::host::Host;
use plugworks_host::phase::RequestKind;
use plugworks_host::request::RequestReport;
use plugworks_host::users::UserContext;
use plugworks_sdk::form::FormData;
use plugworks_sdk::framework::register_services;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<HostConfig, AppError> {
    let env = std::env::var("PLUGWORKS_ENV").unwrap_or_else(|_| "development".to_string());
    HostConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &HostConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main demo run function
async fn run(config: HostConfig) -> AppResult<()> {
    tracing::info!("Starting Plugworks demo v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Build the host ───────────────────────────────────
    let host = Host::builder(config).build();
    let services = host.services().clone();

    // ── Step 2: Register framework services ──────────────────────
    register_services(&services.catalog);
    tracing::info!(
        services = services.catalog.len(),
        "Framework services registered"
    );

    // ── Step 3: Install and activate the example plugin ──────────
    let export = plugin_example::bootstrap(&services).await?;
    let plugin = host.install(export).await;
    host.activate(&plugin.info().id).await?;

    // ── Step 4: Admin request ────────────────────────────────────
    let admin = UserContext::administrator("alice");
    let report = host
        .dispatch_request(RequestKind::Admin, admin.clone())
        .await;
    print_report("Admin request", &report);

    // ── Step 5: Front-end request ────────────────────────────────
    let report = host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;
    print_report("Front-end request", &report);

    // ── Step 6: Settings page, authorized and not ────────────────
    let settings = ExampleSettings::new(ComponentInfo::new(PLUGIN_ID, PLUGIN_VERSION));

    println!("\nSettings page (administrator):");
    println!("{}", settings.render_settings_page(&services, &admin).await?);

    let subscriber = UserContext::subscriber("bob");
    println!("\nSettings page (subscriber):");
    println!(
        "{}",
        settings.render_settings_page(&services, &subscriber).await?
    );

    // ── Step 7: Save a settings form ─────────────────────────────
    let form = FormData::from_pairs(&[
        ("default_capacity", "120"),
        ("date_format", "d/m/Y"),
        ("show_virtual_badge", "on"),
    ]);
    settings.save_settings(&services, &admin, &form).await?;

    let snapshot = settings.snapshot(&services).await?;
    println!("\nSaved settings:");
    println!("  default_capacity:   {}", snapshot.default_capacity);
    println!("  date_format:        {}", snapshot.date_format);
    println!("  show_virtual_badge: {}", snapshot.show_virtual_badge);
    println!(
        "  date preview:       {}",
        plugin_example::date_format::preview(&snapshot.date_format, chrono::Utc::now())
    );

    // ── Step 8: Routing table ────────────────────────────────────
    let rules = services.routes.rules(&services.content).await;
    println!("\nRouting table ({} rules):", rules.len());
    for rule in &rules {
        println!("  {} -> {}", rule.pattern, rule.target);
    }

    // ── Step 9: Deactivate ───────────────────────────────────────
    host.deactivate(PLUGIN_ID).await?;
    tracing::info!("Demo complete, options preserved for next activation");

    Ok(())
}

/// Print a one-request summary
fn print_report(label: &str, report: &RequestReport) {
    println!("\n{} {}:", label, report.request_id);
    let phases: Vec<String> = report.phases_run.iter().map(|p| p.to_string()).collect();
    println!("  phases:   {}", phases.join(" -> "));
    println!("  handlers: {}", report.handlers_run);
    println!("  assets:   {:?}", report.asset_handles());
    for notice in &report.notices {
        println!("  notice:   [{}] {}", notice.level, notice.message);
    }
    if !report.is_clean() {
        for failure in &report.failures {
            println!(
                "  failure:  {} ({}): {}",
                failure.handler, failure.phase, failure.message
            );
        }
    }
}
