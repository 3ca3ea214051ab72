use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use talentscope::dashboard::view;
use talentscope::{
    build_provider, Config, Dashboard, EmbeddingBackend, PipelineConfig, RecruitmentPipeline,
    ReportStore, SkillExtractor, SkillOntology,
};

#[derive(Parser, Debug)]
#[command(name = "talentscope")]
#[command(version = "0.1.0")]
#[command(about = "Generate recruitment analytics reports and browse them")]
struct Args {
    /// Directory holding candidates.json, market_data.json and conversations.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Root of the generated report tree
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Embedding backend (fastembed, http, none)
    #[arg(long, global = true)]
    embeddings: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every agent and write reports (the default)
    Run {
        /// Skip PDF rendering of talent reports
        #[arg(long)]
        skip_pdfs: bool,
    },
    /// Summaries over previously generated reports
    Dashboard {
        #[command(subcommand)]
        view: Option<DashboardView>,
    },
}

#[derive(Subcommand, Debug)]
enum DashboardView {
    /// Skill frequency, salary spread and demand per role
    Overview,
    /// One candidate's talent, assessment and behavioral reports
    Candidate {
        /// File key (Ada_Lovelace) or name (Ada Lovelace)
        key: String,
    },
    /// Market report for one role, or all roles
    Market { role: Option<String> },
    /// Write skill_frequency.csv and market_data.csv
    Export {
        /// Defaults to <OUTPUT_DIR>/exports
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("talentscope=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = load_config(&args)?;

    match args.command.unwrap_or(Command::Run { skip_pdfs: false }) {
        Command::Run { skip_pdfs } => run_pipeline(&config, skip_pdfs).await,
        Command::Dashboard { view } => {
            show_dashboard(&config, view.unwrap_or(DashboardView::Overview))
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(ref backend) = args.embeddings {
        config.embedding_backend = EmbeddingBackend::parse(backend)?;
        if config.embedding_backend == EmbeddingBackend::Http && config.embedding_url.is_none() {
            anyhow::bail!("--embeddings http requires EMBEDDING_URL to be set");
        }
    }
    if let Some(ref dir) = args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(ref dir) = args.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

async fn run_pipeline(config: &Config, skip_pdfs: bool) -> anyhow::Result<()> {
    let ontology = match config.ontology_path {
        Some(ref path) => SkillOntology::from_file(path)?,
        None => SkillOntology::builtin()?,
    };
    tracing::info!("Loaded skill ontology with {} skills", ontology.len());

    let provider = build_provider(config).await;
    let extractor = Arc::new(SkillExtractor::new(Arc::new(ontology), provider));
    match extractor.embedding_backend() {
        Some(name) => tracing::info!("Embedding backend: {}", name),
        None => tracing::info!("Embedding backend: none (literal matching only)"),
    }

    let mut pipeline_config = PipelineConfig::from(config);
    pipeline_config.render_pdfs = !skip_pdfs;

    let pipeline = RecruitmentPipeline::new(extractor, pipeline_config)?;
    let summary = pipeline.run().await;

    println!(
        "Reports written to {}: {} talent, {} assessments, {} behavioral, {} market, {} PDFs",
        config.output_dir.display(),
        summary.talent_reports,
        summary.assessments,
        summary.behavioral_reports,
        summary.market_reports,
        summary.pdfs_written
    );
    if summary.skipped_records > 0 {
        println!("Skipped {} malformed input records", summary.skipped_records);
    }
    if summary.write_failures > 0 {
        println!("{} reports could not be written", summary.write_failures);
    }
    if summary.pdf_failures > 0 {
        println!("{} PDFs failed to render", summary.pdf_failures);
    }

    if !summary.is_success() {
        anyhow::bail!("Agents failed: {}", summary.failed_agents.join(", "));
    }
    Ok(())
}

fn show_dashboard(config: &Config, view_kind: DashboardView) -> anyhow::Result<()> {
    let store = ReportStore::new(config.layout());
    let dashboard = Dashboard::load(&store);

    match view_kind {
        DashboardView::Overview => print!("{}", view::format_overview(&dashboard)),
        DashboardView::Candidate { key } => {
            let candidate = dashboard.candidate(&key)?;
            print!("{}", view::format_candidate(&candidate));
        }
        DashboardView::Market { role: Some(role) } => {
            print!("{}", view::format_market(dashboard.market_report(&role)?));
        }
        DashboardView::Market { role: None } => {
            if dashboard.market.is_empty() {
                println!("No market reports found.");
            }
            for report in dashboard.market.values() {
                print!("{}", view::format_market(report));
            }
        }
        DashboardView::Export { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| store.layout().exports.clone());
            let summary = dashboard.export(&out_dir)?;
            for path in summary.skill_csv.iter().chain(summary.market_csv.iter()) {
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
