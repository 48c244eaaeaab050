use crate::questions::Question;
use crate::quizzes::Quiz;
use anyhow::Context;
use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Database};
use tracing::info;

pub const QUIZZES: &str = "quizzes";
pub const QUESTIONS: &str = "questions";

/// The document-store operations a seeding run needs.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Drops a collection. Dropping one that doesn't exist is not an error.
    async fn drop_collection(&self, name: &str) -> anyhow::Result<()>;

    async fn insert_quizzes(&self, quizzes: &[Quiz]) -> anyhow::Result<()>;

    async fn insert_questions(&self, questions: &[Question]) -> anyhow::Result<()>;

    /// Releases the connection. Called exactly once per run.
    async fn close(&self);
}

pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connects to the server, selects the database named in the URI and
    /// pings it so an unreachable server fails here rather than mid-run.
    pub async fn connect(uri: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        let db = client
            .default_database()
            .context("MongoDB connection string does not name a database")?;

        db.run_command(doc! { "ping": 1 })
            .await
            .with_context(|| format!("Could not reach MongoDB database '{}'", db.name()))?;

        info!(
            "Successfully connected to MongoDB. Target database: '{}'",
            db.name()
        );
        Ok(MongoStore { client, db })
    }
}

#[async_trait]
impl QuizStore for MongoStore {
    async fn drop_collection(&self, name: &str) -> anyhow::Result<()> {
        self.db
            .collection::<Document>(name)
            .drop()
            .await
            .with_context(|| format!("Failed to drop collection '{}'", name))?;
        Ok(())
    }

    async fn insert_quizzes(&self, quizzes: &[Quiz]) -> anyhow::Result<()> {
        self.db
            .collection::<Quiz>(QUIZZES)
            .insert_many(quizzes)
            .await
            .with_context(|| format!("Failed to insert {} quizzes", quizzes.len()))?;
        Ok(())
    }

    async fn insert_questions(&self, questions: &[Question]) -> anyhow::Result<()> {
        self.db
            .collection::<Question>(QUESTIONS)
            .insert_many(questions)
            .await
            .with_context(|| format!("Failed to insert {} questions", questions.len()))?;
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}
