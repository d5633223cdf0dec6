use std::path::Path;

use anyhow::{Context, Result};
use tracing::info_span;

use pageguard_cli::render::{
    borders_table, messages_table, replay_table, stats_table, wiring_table,
};
use pageguard_core::{PageController, replay};
use pageguard_model::{GuardSettings, PageFixture, settings_path};

use crate::cli::{PageArgs, ReplayArgs};

fn load_page(path: &Path) -> Result<PageFixture> {
    PageFixture::load(path).with_context(|| format!("load page {}", path.display()))
}

pub fn run_wire(args: &PageArgs, settings: GuardSettings) -> Result<()> {
    let fixture = load_page(&args.page)?;
    let page = fixture.build_page();
    let controller = PageController::wire(&page, settings);
    let summary = controller.summary();

    println!("Page: {}", args.page.display());
    println!("{}", wiring_table(&page, controller.listeners()));
    println!(
        "{} edit links, {} cancel controls, {} forms ({} destructive)",
        summary.edit_links, summary.cancel_controls, summary.forms, summary.destructive_forms
    );
    Ok(())
}

pub fn run_replay(args: &ReplayArgs, settings: GuardSettings) -> Result<()> {
    let fixture = load_page(&args.page)?;
    let span = info_span!("replay", page = %args.page.display());
    let _guard = span.enter();
    let log = replay(&fixture, settings).context("replay gestures")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&log).context("serialize replay log")?
        );
        return Ok(());
    }

    println!("Page: {}", args.page.display());
    if log.steps.is_empty() {
        println!("No gestures to replay.");
    } else {
        println!("{}", replay_table(&log));
    }
    if !log.borders.is_empty() {
        println!("{}", borders_table(&log));
    }
    println!("{}", stats_table(&log.stats));
    Ok(())
}

pub fn run_settings(config: Option<&Path>, settings: &GuardSettings) -> Result<()> {
    match config.map(Path::to_path_buf).or_else(settings_path) {
        Some(path) if path.exists() => println!("Settings file: {}", path.display()),
        Some(path) => println!(
            "Settings file: {} (not found, using defaults)",
            path.display()
        ),
        None => println!("Settings file: no config directory, using defaults"),
    }
    println!();
    println!(
        "{}",
        settings
            .to_toml_string()
            .context("serialize settings")?
    );
    println!("{}", messages_table(&settings.resolved_messages()));
    Ok(())
}
