//! CLI entry point for the CRM data layer.
//!
//! # Responsibility
//! - Open a store from bundled or on-disk seed data and print its views.
//! - Provide a scripted CRUD walk-through for quick local sanity checks.

use clap::{Parser, Subcommand, ValueEnum};
use crm_core::query::filters::pipeline;
use crm_core::{
    core_version, default_log_level, init_logging, ContactDraft, ContactPatch, ContactStatus,
    CrmStore, DealPatch, DealStage, SeedData, StoreConfig, TaskPatch, TaskStatus,
};
use log::error;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "crm", version, about = "Inspect the in-memory CRM store")]
struct Cli {
    /// JSON latency config; missing keys keep their defaults.
    #[arg(long, env = "CRM_CONFIG")]
    config: Option<PathBuf>,

    /// Uniform latency for every call, overriding --config.
    #[arg(long, env = "CRM_LATENCY_MS")]
    latency_ms: Option<u64>,

    /// Directory with contacts.json, deals.json, ... instead of the bundled snapshot.
    #[arg(long)]
    seed_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CRM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files; stderr when omitted.
    #[arg(long, env = "CRM_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print dashboard metrics and panels.
    Dashboard,
    /// Print one whole collection.
    List {
        #[arg(value_enum)]
        entity: EntityKind,
    },
    /// Print a contact with its deals, tasks and activities.
    Contact { id: i64 },
    /// Print deal count and value per pipeline stage.
    Pipeline,
    /// Create, update and delete a contact, then move a deal and a task.
    Demo,
    /// Print the core crate version.
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EntityKind {
    Contacts,
    Deals,
    Tasks,
    Activities,
    Notifications,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, cli.log_dir.as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli.command.unwrap_or(Command::Dashboard);
    if let Command::Version = command {
        println!("crm_core version={}", core_version());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => StoreConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => StoreConfig::default(),
    };
    if let Some(latency_ms) = cli.latency_ms {
        config = StoreConfig::uniform(Duration::from_millis(latency_ms));
    }
    let seed = match &cli.seed_dir {
        Some(dir) => SeedData::from_dir(dir)?,
        None => SeedData::bundled()?,
    };
    let store = CrmStore::with_seed(seed, config)?;

    match command {
        Command::Dashboard => print_json(&store.dashboard().await?),
        Command::List { entity } => match entity {
            EntityKind::Contacts => print_json(&store.contacts().get_all().await?),
            EntityKind::Deals => print_json(&store.deals().get_all().await?),
            EntityKind::Tasks => print_json(&store.tasks().get_all().await?),
            EntityKind::Activities => print_json(&store.activities().get_all().await?),
            EntityKind::Notifications => print_json(&store.notifications().get_all().await?),
        },
        Command::Contact { id } => print_json(&store.contact_detail(id).await?),
        Command::Pipeline => {
            let deals = store.deals().get_all().await?;
            for column in pipeline(&deals) {
                println!(
                    "{:<12} deals={} value={:.2}",
                    column.stage.as_str(),
                    column.deals.len(),
                    column.total_value
                );
            }
            Ok(())
        }
        Command::Demo => demo(&store).await,
        Command::Version => Ok(()),
    }
}

async fn demo(store: &CrmStore) -> Result<(), Box<dyn std::error::Error>> {
    let contacts = store.contacts();

    let mut draft = ContactDraft::new("Demo Contact", ContactStatus::Lead);
    draft.company = "Demo Co".to_string();
    let created = contacts.create(draft).await?;
    println!("created contact id={}", created.id);

    let updated = contacts
        .update(
            created.id,
            ContactPatch {
                status: Some(ContactStatus::Customer),
                ..ContactPatch::default()
            },
        )
        .await?;
    println!("updated contact id={} status={}", updated.id, updated.status.as_str());

    contacts.delete(created.id).await?;
    match contacts.get_by_id(created.id).await {
        Ok(_) => println!("contact id={} still present", created.id),
        Err(err) => println!("after delete: {err}"),
    }

    if let Some(deal) = store.deals().get_all().await?.into_iter().next() {
        let moved = store
            .deals()
            .update(
                deal.id,
                DealPatch {
                    stage: Some(DealStage::ClosedWon),
                    ..DealPatch::default()
                },
            )
            .await?;
        println!(
            "deal id={} stage {} -> {}",
            moved.id,
            deal.stage.as_str(),
            moved.stage.as_str()
        );
    }

    if let Some(task) = store.tasks().get_all().await?.into_iter().next() {
        let moved = store
            .tasks()
            .update(
                task.id,
                TaskPatch {
                    status: Some(TaskStatus::InProgress),
                    ..TaskPatch::default()
                },
            )
            .await?;
        println!(
            "task id={} status {} -> {}",
            moved.id,
            task.status.as_str(),
            moved.status.as_str()
        );
    }

    let marked = store.notifications().mark_all_as_read().await?;
    println!("marked {} notifications read", marked.len());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
