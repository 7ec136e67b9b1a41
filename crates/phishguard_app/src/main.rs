//! Demo harness: stands up the coordinator, an in-process platform and the
//! HTTP client, then drives one simulated navigation, popup open or report
//! from the command line.

mod config;
mod logging;
mod surface;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use context_logging::in_context;
use phishguard_client::{ClientSettings, HttpVerdictClient};
use phishguard_core::PopupStatus;
use phishguard_runtime::{spawn_coordinator, InProcessPlatform, PageAgent, PopupController};

use crate::surface::TerminalSurface;

const USAGE: &str = "usage: phishguard_app check <url>
       phishguard_app status <url>
       phishguard_app report <url> <phishing|legitimate>";

fn main() -> ExitCode {
    logging::initialize(false);
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let settings = config::load_client_settings();
    let runtime = tokio::runtime::Runtime::new().map_err(|err| err.to_string())?;

    match args {
        [cmd, url] if cmd == "check" => runtime.block_on(simulate_navigation(settings, url)),
        [cmd, url] if cmd == "status" => runtime.block_on(simulate_popup(settings, url, None)),
        [cmd, url, category] if cmd == "report" => {
            runtime.block_on(simulate_popup(settings, url, Some(category)))
        }
        _ => Err(USAGE.to_string()),
    }
}

/// A page loads `url`: the page agent checks it and blocks on a phishing
/// verdict, exactly as the content script would at document_start.
async fn simulate_navigation(settings: ClientSettings, url: &str) -> Result<(), String> {
    let client = Arc::new(HttpVerdictClient::new(settings).map_err(|err| err.to_string())?);
    let platform = Arc::new(InProcessPlatform::new());
    let (tab, mut inbox) = platform.open_tab(url);
    let coordinator = spawn_coordinator(client, platform.clone());

    let mut agent = PageAgent::new(tab, Box::new(TerminalSurface));
    in_context("page", agent.check(&coordinator)).await;
    agent.drain_inbox(&mut inbox);

    if !agent.is_blocked() {
        println!("{url} was not blocked");
    }
    for dialog in platform.take_dialogs() {
        println!("{dialog}");
    }
    Ok(())
}

/// The user opens the popup over a tab showing `url`; optionally submits a
/// report for it afterwards.
async fn simulate_popup(
    settings: ClientSettings,
    url: &str,
    report_category: Option<&str>,
) -> Result<(), String> {
    let client = Arc::new(HttpVerdictClient::new(settings).map_err(|err| err.to_string())?);
    let platform = Arc::new(InProcessPlatform::new());
    platform.open_tab(url);
    let coordinator = spawn_coordinator(client.clone(), platform.clone());

    let popup = in_context(
        "popup",
        PopupController::open(client, coordinator, platform.as_ref()),
    )
    .await;

    println!("URL: {}", popup.url().unwrap_or("(none)"));
    println!("{}", popup.status().headline());
    if let PopupStatus::Error(reason) = popup.status() {
        println!("  {reason}");
    }

    if let Some(category) = report_category {
        let shown = in_context("popup", popup.submit_report(category)).await;
        println!("{shown}");
    }
    Ok(())
}
