//! Command handlers: thin glue between the CLI and the two state machines,
//! plus terminal rendering of the result view.

use std::path::Path;

use anyhow::{bail, Result};

use crate::api_client::{ApiClient, RoastApi};
use crate::models::RoastResult;
use crate::retrieve::{ResultRetriever, RetrievalState};
use crate::share;
use crate::submit::{CandidateFile, SubmissionController, SubmissionOutcome};

/// `roast upload <path>`: select, validate, submit, then render the fresh
/// roast — the CLI's version of navigating to the result view.
pub async fn upload(api: &ApiClient, path: &Path) -> Result<()> {
    let file = CandidateFile::from_path(path)
        .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display()))?;

    let name = file.name.clone();
    let size = file.size;

    let mut controller = SubmissionController::new();
    if let Err(notice) = controller.select_file(file) {
        bail!("{notice}");
    }

    println!("Uploading {name} ({:.2} MB)...", size as f64 / 1024.0 / 1024.0);

    match controller.submit(api).await {
        Some(SubmissionOutcome::Success { roast_id }) => {
            println!("Roast ready: {roast_id}\n");
            show(api, &roast_id).await
        }
        Some(SubmissionOutcome::Failure { message }) => {
            bail!("Error uploading file. {message}")
        }
        None => bail!("No file selected"),
    }
}

/// `roast show <id>`: fetch and render, or surface the failure in place of
/// the result view.
pub async fn show(api: &ApiClient, roast_id: &str) -> Result<()> {
    let mut retriever = ResultRetriever::new();
    retriever.load(roast_id, api).await;

    match retriever.state() {
        RetrievalState::Loaded(roast) => {
            render_roast(roast);
            Ok(())
        }
        RetrievalState::Failed(message) => bail!("{message}"),
        RetrievalState::Idle => bail!("a roast id is required"),
        RetrievalState::Pending => unreachable!("load settles before returning"),
    }
}

/// `roast stats <id>`: print the extra numbers from the stats endpoint.
pub async fn stats(api: &ApiClient, roast_id: &str) -> Result<()> {
    let stats = api.fetch_stats(roast_id).await?;

    println!("Roast {}", stats.roast_id);
    println!("  Brutality:       {}%", stats.brutality_level);
    println!("  Processing time: {}s", stats.processing_time);
    println!("  Feedback points: {}", stats.feedback_count);
    if let Some(len) = stats.cv_length {
        println!("  CV length:       {len} chars");
    }
    if let Some(cached) = stats.from_cache {
        println!("  From cache:      {cached}");
    }
    Ok(())
}

/// `roast share <id>`: print the prefilled message and the compose link.
pub async fn share(api: &ApiClient, roast_id: &str) -> Result<()> {
    let roast = api.fetch_roast(roast_id).await?;
    let message = share::share_message(Some(&roast.roast_text));

    println!("{message}");
    println!();
    println!("Open to share: {}", share::compose_url(&message));
    Ok(())
}

fn render_roast(roast: &RoastResult) {
    println!("Your CV got roasted (id: {})", roast.roast_id);
    println!();
    println!("  \"{}\"", roast.roast_text);
    println!();

    if !roast.feedback_points.is_empty() {
        println!("How to fix this mess:");
        for (i, point) in roast.feedback_points.iter().enumerate() {
            println!("  {}. {point}", i + 1);
        }
        println!();
    }

    println!(
        "Brutality: {}   Roast time: {}   Created: {}",
        roast.brutality_display(),
        roast.processing_time_display(),
        roast.created_at
    );
}
