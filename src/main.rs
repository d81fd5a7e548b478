use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Instrument;

use cliniio::{
    check_compliance, create_workflow_span, generate_correlation_id, init_telemetry,
    validate_batch_code, validate_phase_transition, BatchCodeGenerator, BatchLifecycle,
    CliniioConfig, JsonFileStore, PackageInfo, PackagingSessionManager, SterilizationBatch,
    WorkflowPhase, WorkflowStore, WorkflowTelemetry,
};

#[derive(Parser)]
#[command(name = "cliniio")]
#[command(about = "Sterilization workflow and batch tracking for Cliniio")]
struct Cli {
    /// Configuration file (defaults to ./cliniio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch code
    GenerateCode {
        #[arg(long)]
        operator: String,
        #[arg(long, default_value = "1")]
        tools: usize,
    },
    /// Check a batch code's format
    ValidateCode { code: String },
    /// Check whether a phase transition is allowed
    CheckTransition { from: WorkflowPhase, to: WorkflowPhase },
    /// Check cycle telemetry (JSON file) for monitoring gaps
    CheckCompliance { file: PathBuf },
    /// Scan tools into a packaging session and store the resulting batch
    Package {
        #[arg(long)]
        operator: String,
        /// Tool id to scan; repeat for several tools
        #[arg(long = "tool", required = true)]
        tools: Vec<String>,
        #[arg(long)]
        batch_mode: bool,
        #[arg(long, default_value = "pouch")]
        package_type: String,
        #[arg(long, default_value = "standard")]
        package_size: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Look a stored batch up by its code
    ShowBatch { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_loaded = CliniioConfig::load_env_file()?;
    let config = CliniioConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.observability)?;
    if env_loaded {
        tracing::info!("Loaded environment variables from .env file");
    }

    let store = JsonFileStore::new(config.storage.data_dir.clone());

    match cli.command {
        Commands::GenerateCode { operator, tools } => {
            let mut generator = BatchCodeGenerator::new();
            println!("{}", generator.generate_batch_code(&operator, tools));
        }
        Commands::ValidateCode { code } => {
            if validate_batch_code(&code) {
                println!("✅ {code} is a valid batch code");
            } else {
                bail!("{code} is not a valid batch code (expected YYYYMMDD-HHMM-XXX)");
            }
        }
        Commands::CheckTransition { from, to } => {
            let result = validate_phase_transition(from, to);
            match result.error {
                None => println!("✅ {from} -> {to} is allowed"),
                Some(error) => bail!(error),
            }
        }
        Commands::CheckCompliance { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let telemetry: WorkflowTelemetry = serde_json::from_str(&contents)
                .with_context(|| format!("Invalid telemetry JSON in {}", file.display()))?;

            let report = check_compliance(&telemetry);
            if report.compliant {
                println!("✅ Cycle telemetry is compliant");
            } else {
                for issue in &report.issues {
                    println!("❌ {issue}");
                }
                bail!("{} compliance issue(s) found", report.issues.len());
            }
        }
        Commands::Package {
            operator,
            tools,
            batch_mode,
            package_type,
            package_size,
            notes,
        } => {
            let correlation_id = generate_correlation_id();
            let span = create_workflow_span("package", Some(&operator), None, &correlation_id);
            let package_info = PackageInfo {
                package_type,
                package_size,
                notes,
            };
            let batch = package_tools(&store, &operator, &tools, batch_mode, package_info)
                .instrument(span)
                .await?;
            println!("📦 Batch {} ready with {} tool(s)", batch.batch_code, batch.tool_count());
        }
        Commands::ShowBatch { code } => match store.find_batch_by_code(&code).await? {
            Some(batch) => println!("{}", serde_json::to_string_pretty(&batch)?),
            None => bail!("No batch found with code {code}"),
        },
    }

    Ok(())
}

async fn package_tools(
    store: &JsonFileStore,
    operator: &str,
    tools: &[String],
    batch_mode: bool,
    package_info: PackageInfo,
) -> Result<SterilizationBatch> {
    let mut sessions = PackagingSessionManager::new();
    sessions.start_packaging_session(operator, batch_mode, None);
    for tool in tools {
        sessions.add_tool_to_session(tool);
    }

    let Some(session) = sessions.end_packaging_session() else {
        bail!("Packaging session was lost before it could be finalized");
    };

    let mut codes = BatchCodeGenerator::new();
    let code = codes.generate_batch_code(operator, session.tools.len());

    let mut batch = SterilizationBatch::from_session(&session, &code, Utc::now());
    batch.package_info = package_info;

    let mut lifecycle = BatchLifecycle::new(batch, operator);
    lifecycle.mark_ready();
    let batch = lifecycle.snapshot();

    store.save_session(&session).await?;
    store.save_batch(&batch).await?;
    Ok(batch)
}
