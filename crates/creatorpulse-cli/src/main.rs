use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "creatorpulse-cli")]
#[command(about = "Creator engagement analytics and content generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stored creators with derived classification
    Creators,
    /// Show the derived categories for one creator
    Classify { creator_id: String },
    /// Compute the engagement insight for a category
    Insight {
        category: String,
        #[arg(long)]
        target_followers: Option<u64>,
    },
    /// Generate content in one creator's measured voice
    Style {
        creator_id: String,
        topic: String,
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        length: Option<String>,
        #[arg(long)]
        format: Option<String>,
    },
    /// Generate data-grounded content for a category
    Trend {
        category: String,
        topic: Option<String>,
        #[arg(long)]
        target_followers: Option<u64>,
        #[arg(long)]
        tone: Option<String>,
        #[arg(long)]
        length: Option<String>,
        #[arg(long)]
        format: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = creatorpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let categories = Arc::new(creatorpulse_core::load_categories(&config.categories_path)?);
    let store = Arc::new(creatorpulse_store::SnapshotStore::load(&config.data_dir)?);
    let orchestrator =
        creatorpulse_generate::Orchestrator::from_config(store, categories, &config)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Creators => {
            print_json(&orchestrator.creators())?;
        }
        Commands::Classify { creator_id } => {
            let categories = orchestrator.classify_creator(&creator_id)?;
            print_json(&categories)?;
        }
        Commands::Insight {
            category,
            target_followers,
        } => {
            let category = category
                .parse()
                .map_err(|err: String| anyhow::anyhow!(err))?;
            require_positive_target(target_followers)?;
            let insight = orchestrator.category_insight(category, target_followers);
            if !insight.has_data() {
                tracing::warn!(category = %category, "no qualifying engagement data");
            }
            print_json(&insight)?;
        }
        Commands::Style {
            creator_id,
            topic,
            tone,
            length,
            format,
        } => {
            let request = creatorpulse_generate::StyleRequest::new(
                &creator_id,
                &topic,
                tone.as_deref(),
                length.as_deref(),
                format.as_deref(),
            )?;
            let result = orchestrator.generate_style(&request).await?;
            print_json(&result)?;
        }
        Commands::Trend {
            category,
            topic,
            target_followers,
            tone,
            length,
            format,
        } => {
            let request = creatorpulse_generate::TrendRequest::new(
                &category,
                topic.as_deref(),
                target_followers,
                tone.as_deref(),
                length.as_deref(),
                format.as_deref(),
            )?;
            let result = orchestrator.generate_trend(&request).await?;
            print_json(&result)?;
        }
    }

    Ok(())
}

fn require_positive_target(target: Option<u64>) -> anyhow::Result<()> {
    if target == Some(0) {
        anyhow::bail!("target-followers must be positive");
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
