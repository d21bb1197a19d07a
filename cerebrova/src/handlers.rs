use anyhow::{Context, Result, anyhow, bail};
use cerebrova_client::client::REPORT_PATH;
use cerebrova_client::upload::is_accepted;
use cerebrova_client::{PredictClient, PredictionResult};
use cerebrova_core::dom::{Bindings, Document, ElementId};
use cerebrova_core::page::{Page, PageEvent};
use cerebrova_core::predict::SUBMITTING_LABEL;
use cerebrova_core::{Config, SubmitState, Viewport};
use cerebrova_tui::html::fragment_lines;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_arg(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("Unknown output format: {}", other),
        }
    }
}

/// Expand `~` in a path given on the command line.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Apply `--server` and `--timeout` on top of the environment.
pub fn config_from_matches(base: Config, matches: &ArgMatches) -> Config {
    let mut config = base;
    if let Some(server) = matches.get_one::<Url>("server") {
        config = config.with_server_url(server.as_str().trim_end_matches('/'));
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(*timeout);
    }
    config
}

/// The result panel, flattened for the console.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub message: String,
    pub confidence: Option<String>,
    pub image: Option<String>,
    pub report: Option<String>,
}

impl ResultView {
    /// Read the panel back out of the page. `None` while the panel is hidden.
    pub fn from_bindings(bindings: &Bindings) -> Option<Self> {
        if !bindings.result_box.active {
            return None;
        }

        let confidence = Some(bindings.confidence_value.text.clone()).filter(|c| !c.is_empty());
        let report = bindings
            .download_report_btn
            .href
            .clone()
            .filter(|_| bindings.download_report_btn.active);

        Some(Self {
            message: bindings.detection_result_text.text.clone(),
            confidence,
            image: bindings.detection_image.src.clone(),
            report,
        })
    }
}

/// JSON document printed by `predict --format json`.
pub fn prediction_json(view: &ResultView, result: Option<&PredictionResult>) -> serde_json::Value {
    serde_json::json!({
        "message": view.message,
        "confidence": view.confidence,
        "image": view.image,
        "report": view.report,
        "response": result,
    })
}

/// Render the tumor descriptions fragment as plain text.
pub fn descriptions_text(html: &str) -> String {
    fragment_lines(html)
        .into_iter()
        .map(|line| {
            if line.heading {
                format!("\n{}", line.text.to_uppercase())
            } else {
                line.text
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_start()
        .to_string()
}

/// Write a downloaded report, creating parent directories as needed.
pub fn save_report(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write report to {}", path.display()))
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn print_result(view: &ResultView) {
    print_divider();
    println!("{}", "  DETECTION RESULT".bright_white().bold());
    print_divider();
    println!();
    println!("{}", view.message);
    println!();

    if let Some(confidence) = &view.confidence {
        println!("{} Confidence: {}%", "→".blue(), confidence.bright_white().bold());
    }
    if let Some(image) = &view.image {
        println!("{} Image:      {}", "→".blue(), image.bright_cyan());
    }
    if let Some(report) = &view.report {
        println!("{} Report:     {}", "→".blue(), report.bright_cyan().underline());
    }
}

fn client_for(config: &Config) -> Result<PredictClient> {
    PredictClient::with_timeout(&config.server_url, config.timeout_secs)
        .with_context(|| format!("Invalid server URL {}", config.server_url))
}

/// A page without the decorative background, for one-shot commands.
fn headless_page(client: &PredictClient) -> Result<Page> {
    let mut document = Document::standard();
    document.remove(ElementId::NeuralNetwork);

    let page = Page::new(
        document,
        client.endpoint(REPORT_PATH)?,
        Viewport::new(0.0, 0.0),
        &mut rand::thread_rng(),
    )?;
    Ok(page)
}

pub async fn handle_predict(args: &ArgMatches, config: &Config, quiet: bool) -> Result<()> {
    let image = args
        .get_one::<String>("IMAGE")
        .ok_or_else(|| anyhow!("An image path is required"))?;
    let format = OutputFormat::from_arg(
        args.get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("text"),
    )?;

    let path = expand_path(image);
    if !is_accepted(&path) {
        bail!(
            "Unsupported file type: {} (use JPG, JPEG or PNG)",
            path.display()
        );
    }

    let client = client_for(config)?;
    let mut page = headless_page(&client)?;

    page.dispatch(PageEvent::FileSelected(Some(path.clone())), &client)
        .await;
    if page.selected_file().is_none() {
        bail!("Could not read {}", path.display());
    }

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("{} {}", SUBMITTING_LABEL, path.display()));

    page.dispatch(PageEvent::Submit, &client).await;
    spinner.finish_and_clear();

    let view = ResultView::from_bindings(page.bindings())
        .ok_or_else(|| anyhow!("The submission produced no result"))?;

    match format {
        OutputFormat::Text => print_result(&view),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&prediction_json(&view, page.last_result()))?
        ),
    }

    if page.state() == SubmitState::Error || page.last_result().is_none() {
        bail!("{}", view.message);
    }

    if let Some(destination) = args.get_one::<String>("save-report")
        && let Some(report) = &view.report
    {
        let destination = expand_path(destination);
        let report_url = Url::parse(report)?;
        let bytes = client.download_report(&report_url).await?;
        save_report(&destination, &bytes)?;
        info!("Report saved to {}", destination.display());
        if !quiet {
            println!(
                "\n{} Report saved to {}",
                "✓".green().bold(),
                destination.display().to_string().bright_white()
            );
        }
    }

    Ok(())
}

pub async fn handle_descriptions(config: &Config) -> Result<()> {
    let client = client_for(config)?;
    let html = client
        .tumor_descriptions()
        .await
        .context("Failed to load tumor descriptions")?;

    println!("{}", descriptions_text(&html));
    Ok(())
}

pub fn handle_show(args: &ArgMatches, config: &Config) -> Result<()> {
    let page_url = args
        .get_one::<Url>("PAGE_URL")
        .ok_or_else(|| anyhow!("A page URL is required"))?;

    let client = client_for(config)?;
    let mut page = headless_page(&client)?;
    if !page.restore_from_query(page_url) {
        bail!("{} carries no result parameter", page_url);
    }

    let view = ResultView::from_bindings(page.bindings())
        .ok_or_else(|| anyhow!("Nothing to show for {}", page_url))?;
    print_result(&view);
    Ok(())
}

pub async fn handle_ui(args: &ArgMatches, config: Config) -> Result<()> {
    let page_url = args.get_one::<Url>("PAGE_URL").cloned();
    let runtime = tokio::runtime::Handle::current();

    tokio::task::spawn_blocking(move || cerebrova_tui::run(&config, runtime, page_url.as_ref()))
        .await
        .context("Terminal UI task panicked")?
}
