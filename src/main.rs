use clap::Parser;
use quiz_seeder::catalog::GENERATION_PLAN;
use quiz_seeder::config::{Config, ConfigArgs};
use quiz_seeder::db::MongoStore;
use quiz_seeder::generator::{GeminiClient, QuestionGenerator};
use quiz_seeder::seeder::seed_database;
use std::process::ExitCode;
use tracing::{error, info};

const DOTENV_FILE: &str = ".env";

/// Wipes the quiz database and seeds it with curated and generated questions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

async fn run(config: Config) -> anyhow::Result<()> {
    // The client is built before connecting so a bad setup fails before any
    // database work happens.
    let generator = QuestionGenerator::new(GeminiClient::new(&config)?);

    let store = MongoStore::connect(&config.mongo_uri).await?;
    let summary = seed_database(&store, &generator, &GENERATION_PLAN).await?;

    info!(
        "Seeded {} quizzes and {} questions ({} curated, {} generated, {} rejected).",
        summary.quizzes,
        summary.total_questions(),
        summary.curated_questions,
        summary.generated_questions,
        summary.rejected_questions
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // --- Environment ---
    // Only the working directory's .env; parent directories are not searched.
    let dotenv = dotenvy::from_path(DOTENV_FILE);

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "quiz_seeder=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if dotenv.is_ok() {
        info!("Loaded environment from {}", DOTENV_FILE);
    }

    // --- Configuration ---
    let cli = Cli::parse();
    let config = match Config::from_args(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // --- Seeding run ---
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
