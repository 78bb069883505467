use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use persona::io::DEFAULT_TEXT_COLUMN;
use persona::{
    execute_stage3, read_records_file, run_pipeline, CorpusReport, DocumentOutcome, HttpTagger,
    PipelineConfig, PretaggedTagger, RecordConfig, Stage3Config, Tagger, TaggerConfig,
};

#[derive(Parser)]
#[command(name = "persona")]
#[command(author, version, about = "First/third person shares of Spanish essays", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Input CSV file with one essay per row
    #[arg(short, long)]
    input: PathBuf,

    /// Pre-tagged documents (JSON) used instead of the tagging service
    #[arg(long)]
    tagged: Option<PathBuf>,

    /// Column holding the essay text
    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    text_column: String,

    /// Column used as the document id (rows are numbered otherwise)
    #[arg(long)]
    id_column: Option<String>,

    /// Columns left out of the output, besides the text column
    #[arg(long = "drop-column", default_value = "treat")]
    drop_columns: Vec<String>,

    /// Maximum number of documents tagged at the same time
    #[arg(long, default_value = "8")]
    concurrency: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every essay and write the augmented table
    Process {
        #[command(flatten)]
        source: SourceArgs,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the JSON report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Classify every essay and print corpus statistics without writing files
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            source,
            output,
            report,
        } => {
            setup_logging(source.verbose);
            match &source.tagged {
                Some(path) => {
                    let tagger = load_pretagged(path)?;
                    process_corpus(tagger, &source, &output, report.as_deref()).await
                }
                None => {
                    let tagger = HttpTagger::new(TaggerConfig::from_env()?);
                    process_corpus(tagger, &source, &output, report.as_deref()).await
                }
            }
        }
        Commands::Analyze { source } => {
            setup_logging(source.verbose);
            match &source.tagged {
                Some(path) => analyze_corpus(load_pretagged(path)?, &source).await,
                None => {
                    let tagger = HttpTagger::new(TaggerConfig::from_env()?);
                    analyze_corpus(tagger, &source).await
                }
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_pretagged(path: &Path) -> Result<PretaggedTagger> {
    info!("Loading pre-tagged documents from {:?}", path);
    let tagger = PretaggedTagger::from_file(path).context("Failed to load pre-tagged documents")?;
    info!("Loaded {} pre-tagged documents", tagger.len());
    Ok(tagger)
}

fn record_config(source: &SourceArgs) -> RecordConfig {
    RecordConfig {
        text_column: source.text_column.clone(),
        id_column: source.id_column.clone(),
        dropped_columns: source.drop_columns.clone(),
    }
}

async fn process_corpus<T: Tagger + 'static>(
    tagger: T,
    source: &SourceArgs,
    output: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    let started_at = Utc::now();
    let run_id = uuid::Uuid::new_v4().to_string();

    info!("Loading essays from {:?}", source.input);
    let record_set = read_records_file(&source.input, &record_config(source))
        .context("Failed to read input table")?;
    info!(
        "Loaded {} essays, {} passthrough columns",
        record_set.records.len(),
        record_set.passthrough_columns.len()
    );

    let config = PipelineConfig {
        concurrency: source.concurrency,
    };
    let outcomes = run_pipeline(Arc::new(tagger), record_set.records, &config).await;

    let report = report_path.map(|_| CorpusReport::new(run_id.clone(), started_at, &outcomes));
    let result = execute_stage3(
        &outcomes,
        &record_set.passthrough_columns,
        report,
        Some(output),
        report_path,
        &Stage3Config::default(),
    )?;

    if let Some(path) = result.table_path {
        info!("Results written to {:?}", path);
    }
    if let Some(path) = result.report_path {
        info!("Report written to {:?}", path);
    }

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    info!(
        "Run {} complete: {} documents, {} failed",
        run_id,
        outcomes.len(),
        failed
    );

    Ok(())
}

async fn analyze_corpus<T: Tagger + 'static>(tagger: T, source: &SourceArgs) -> Result<()> {
    info!("Analyzing essays from {:?}", source.input);
    let record_set = read_records_file(&source.input, &record_config(source))
        .context("Failed to read input table")?;

    let config = PipelineConfig {
        concurrency: source.concurrency,
    };
    let outcomes = run_pipeline(Arc::new(tagger), record_set.records, &config).await;
    let report = CorpusReport::new(uuid::Uuid::new_v4().to_string(), Utc::now(), &outcomes);
    let meta = &report.metadata;

    println!("Corpus Analysis");
    println!("===============");
    println!("Documents: {}", meta.total_documents);
    println!("Failed: {}", meta.failed_documents);
    println!("Informative tokens: {}", meta.totals.total);
    println!("First person tokens: {}", meta.totals.first);
    println!("Third person tokens: {}", meta.totals.third);
    println!("Rule/model conflicts: {}", meta.totals.conflicts);
    println!(
        "Mean shares: first {:.2}, third {:.2}",
        meta.mean_first_person_percent, meta.mean_third_person_percent
    );
    println!();

    println!("Documents");
    println!("---------");
    for outcome in &outcomes {
        match outcome {
            DocumentOutcome::Classified(doc) => println!(
                "{}: first {:.2}, third {:.2} ({} informative, {} conflicts)",
                doc.id,
                doc.first_person_percent,
                doc.third_person_percent,
                doc.counts.total,
                doc.counts.conflicts
            ),
            DocumentOutcome::Failed { record, error } => {
                println!("{}: failed ({})", record.id, error)
            }
        }
    }

    Ok(())
}
