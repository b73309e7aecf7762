//! CLI interface for the AptX engine

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::engine::Engine;
use crate::types::{
    ChatMessageRequest, ContentRequest, ContentType, PerformanceSample, RemediationRequest,
    StudentProfile,
};

#[derive(Parser)]
#[command(name = "aptx-engine")]
#[command(about = "Adaptive content decision engine for the AptX learning platform", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (default: ./aptx.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContentKind {
    Lesson,
    Activity,
    Game,
    Assessment,
    Video,
}

impl From<ContentKind> for ContentType {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Lesson => ContentType::Lesson,
            ContentKind::Activity => ContentType::Activity,
            ContentKind::Game => ContentType::Game,
            ContentKind::Assessment => ContentType::Assessment,
            ContentKind::Video => ContentType::Video,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the bind address from the config file
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Generate learning content once and print it as JSON
    Generate {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "6-8 years")]
        age_group: String,
        #[arg(long, value_enum, default_value = "lesson")]
        content_type: ContentKind,
        #[arg(long)]
        learning_objective: String,
        #[arg(long, default_value = "10 minutes")]
        duration: String,
    },
    /// Decide whether a remediation lesson is needed and print the decision
    Remediate {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        lesson_id: String,
        #[arg(long)]
        score: f64,
        /// Seconds spent on the lesson
        #[arg(long)]
        time_spent: f64,
        #[arg(long, default_value = "medium")]
        engagement: String,
    },
    /// Ask the assistant a question and print the reply
    Chat {
        message: String,
    },
    /// Print the effective configuration
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { addr } => {
            let mut config = config;
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            crate::server::serve(config).await
        }
        Commands::Generate {
            topic,
            age_group,
            content_type,
            learning_objective,
            duration,
        } => {
            let engine = Engine::from_config(&config);
            let request = ContentRequest {
                topic,
                age_group,
                content_type: content_type.into(),
                learning_objective,
                duration,
                special_needs: StudentProfile::default(),
            };
            let resolved = engine.generate_content(&request).await?;
            print_json(&resolved.value)
        }
        Commands::Remediate {
            student_id,
            lesson_id,
            score,
            time_spent,
            engagement,
        } => {
            let engine = Engine::from_config(&config);
            let request = RemediationRequest {
                student_id,
                current_lesson_id: lesson_id,
                performance_data: PerformanceSample {
                    score,
                    time_spent,
                    engagement_level: engagement,
                },
            };
            let resolved = engine.remediate(&request).await?;
            print_json(&resolved.value)
        }
        Commands::Chat { message } => {
            let engine = Engine::from_config(&config);
            let resolved = engine.chat(&ChatMessageRequest { message }).await?;
            print_json(&resolved.value)
        }
        Commands::Status => {
            println!("server addr:  {}", config.server.addr);
            println!("backend:      {}", config.generation.base_url);
            println!("model:        {}", config.generation.model);
            println!("timeout:      {}s", config.generation.timeout_secs);
            println!(
                "api key:      {}",
                if config.generation.resolve_api_key().is_some() {
                    "configured"
                } else {
                    "missing"
                }
            );
            println!(
                "path cache:   {}",
                if config.cache.enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
