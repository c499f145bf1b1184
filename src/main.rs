use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use transcript_topics::{
    default_targets, normalize_script, run_batch, PipelineContext, PosTag, RunParams,
};
use walkdir::WalkDir;

/// Topic discovery over dialogue transcripts: one LDA model for the
/// full corpus and one per named speaker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the transcript *.txt files
    input_dir: PathBuf,

    /// Number of topics to fit
    #[arg(short = 'n', long, default_value_t = 15)]
    num_topics: usize,

    /// Collocation score threshold; higher accepts fewer phrases
    #[arg(short = 't', long, default_value_t = 100.0)]
    phrase_threshold: f64,

    /// Part of speech kept by the lexical filter (NOUN, ADJ, VERB, ADV)
    #[arg(short, long, default_value = "NOUN")]
    pos: String,

    /// Directory the tables and visualizations are written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Keep running remaining targets when one fails
    #[arg(long)]
    keep_going: bool,
}

/// Read and concatenate every *.txt file under the input directory
fn load_scripts(dir: &PathBuf) -> Result<String> {
    if !dir.is_dir() {
        anyhow::bail!("input directory {} does not exist", dir.display());
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        anyhow::bail!("no *.txt transcript files found in {}", dir.display());
    }
    debug!("Found {} transcript files", paths.len());

    let mut script = String::new();
    for path in &paths {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        script.push_str(&content);
        script.push('\n');
    }
    Ok(script)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let params = RunParams::default()
        .with_num_topics(args.num_topics)
        .with_phrase_threshold(args.phrase_threshold)
        .with_allowed_pos(PosTag::from_universal(&args.pos));
    params.validate()?;

    let script = load_scripts(&args.input_dir)?;
    let utterances = normalize_script(&script);
    info!(
        "Loaded {} utterances from {}",
        utterances.len(),
        args.input_dir.display()
    );

    let ctx = PipelineContext::new();
    let targets = default_targets();
    let report = run_batch(
        &ctx,
        &utterances,
        &targets,
        &params,
        &args.output_dir,
        args.keep_going,
    )?;

    for (name, err) in &report.failed {
        eprintln!("target '{name}' failed: {err}");
    }
    if !report.all_succeeded() {
        anyhow::bail!(
            "{} of {} targets failed",
            report.failed.len(),
            targets.len()
        );
    }

    info!(
        "All {} targets completed; outputs in {}",
        report.completed.len(),
        args.output_dir.display()
    );
    Ok(())
}
