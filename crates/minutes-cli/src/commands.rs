//! Command implementations.

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input;
use colored::Colorize;
use minutes_domain::ExtractionResult;
use minutes_extractor::Extractor;
use minutes_glossary::TermMatch;
use minutes_llm::{resolve_base_url, GatewayProvider};
use minutes_memory::{pipe_to_memory, MemorySettings, PipeOutcome};
use minutes_output::{
    add_glossary_section, append_session_log, update_index, write_session_markdown, SessionMeta,
};
use minutes_store::{DedupStore, SCHEMA_VERSION};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Process one transcript end to end.
pub async fn execute_process(args: ProcessArgs, config: &Config) -> Result<()> {
    let (transcript, metadata) = input::parse_file(&args.input)?;
    let content_metric = metadata.content_metric();
    let input_name = input_display_name(&args.input);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));

    let mut store = DedupStore::open(&output_dir)?;
    let file_hash = DedupStore::content_hash(&args.input)?;

    if !args.force {
        if let Some(prior_output) = store.is_processed(&file_hash, SCHEMA_VERSION) {
            println!(
                "{} Already processed, notes at {}",
                "✓".green(),
                prior_output
            );
            append_session_log(
                &output_dir,
                &input_name,
                &content_metric,
                &ExtractionResult::default(),
                &file_hash,
                true,
            )?;
            return Ok(());
        }
        if let Some(prior_output) = store.find_by_input(&args.input) {
            info!(prior = prior_output, "input changed since last run, reprocessing");
        }
    }

    let base_url = resolve_base_url(&config.gateway_url);
    println!(
        "{} Using gateway ({} via {})",
        "✓".green(),
        config.gateway_model,
        base_url
    );

    let provider = GatewayProvider::new(base_url, &config.gateway_model);
    let extractor = Extractor::new(provider, config.extractor_config())?;
    let result = extractor.process_transcript(&transcript).await?;

    // Glossary cross-reference, when configured.
    let glossary_path = args.glossary.clone().or_else(|| {
        if config.glossary_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&config.glossary_path))
        }
    });
    let glossary_report = glossary_path.map(|path| {
        let glossary = minutes_glossary::load_glossary(&path);
        minutes_glossary::match_terms(&result, &glossary)
    });

    let meta = SessionMeta {
        input_file: &input_name,
        backend_name: &config.gateway_model,
        content_metric: &content_metric,
    };
    let notes_path = write_session_markdown(&result, &meta, &output_dir, &file_hash)?;

    if let Some((matched, unknown)) = &glossary_report {
        add_glossary_section(&notes_path, matched, unknown)?;
    }

    append_session_log(
        &output_dir,
        &input_name,
        &content_metric,
        &result,
        &file_hash,
        false,
    )?;

    let notes_name = input_display_name(&notes_path);
    let (glossary_matches, glossary_unknown) = glossary_counts(&glossary_report);
    update_index(
        &output_dir,
        &input_name,
        &result,
        &file_hash,
        &notes_name,
        glossary_matches,
        glossary_unknown,
    )?;

    store.record(
        &file_hash,
        &notes_path.display().to_string(),
        SCHEMA_VERSION,
        &args.input,
    )?;

    println!(
        "{} Extracted {} decisions, {} ideas, {} questions, {} action items",
        "✓".green(),
        result.decisions.len(),
        result.ideas.len(),
        result.questions.len(),
        result.action_items.len(),
    );
    println!("{} Notes written to {}", "✓".green(), notes_path.display());

    if args.pipe_memory {
        let session_id = args
            .session
            .clone()
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        let settings = MemorySettings {
            endpoint: config.automem_endpoint.clone(),
            api_key: config.automem_api_key.clone(),
        };

        match pipe_to_memory(&result, &session_id, &args.project, &settings).await {
            PipeOutcome::Skipped { reason } => {
                println!("{} Memory pipe skipped ({})", "-".yellow(), reason);
            }
            PipeOutcome::Complete { stored, errors } => {
                println!(
                    "{} Memory pipe complete: {} stored, {} errors",
                    "✓".green(),
                    stored,
                    errors
                );
            }
        }
    }

    Ok(())
}

fn input_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn glossary_counts(report: &Option<(Vec<TermMatch>, Vec<TermMatch>)>) -> (usize, usize) {
    report
        .as_ref()
        .map(|(matched, unknown)| (matched.len(), unknown.len()))
        .unwrap_or((0, 0))
}
