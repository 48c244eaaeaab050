use crate::catalog::CURATED_QUESTIONS;
use crate::db::{QUESTIONS, QUIZZES, QuizStore};
use crate::generator::{QuestionGenerator, TextGenerator};
use crate::parser::{parse_response, validate_records};
use crate::questions::Question;
use crate::quizzes::{curated_quizzes, title_index};
use anyhow::Context;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub quizzes: usize,
    pub curated_questions: usize,
    pub generated_questions: usize,
    pub rejected_questions: usize,
}

impl SeedSummary {
    pub fn total_questions(&self) -> usize {
        self.curated_questions + self.generated_questions
    }
}

/// Wipes both collections and fills them with curated and generated content.
///
/// `store` must already be connected. It is closed before this returns,
/// whether or not seeding succeeded.
pub async fn seed_database<S, G>(
    store: &S,
    generator: &QuestionGenerator<G>,
    plan: &[(&str, usize)],
) -> anyhow::Result<SeedSummary>
where
    S: QuizStore,
    G: TextGenerator,
{
    let result = populate(store, generator, plan).await;
    store.close().await;
    if result.is_ok() {
        info!("Database seeding complete. Connection closed.");
    }
    result
}

async fn populate<S, G>(
    store: &S,
    generator: &QuestionGenerator<G>,
    plan: &[(&str, usize)],
) -> anyhow::Result<SeedSummary>
where
    S: QuizStore,
    G: TextGenerator,
{
    let mut summary = SeedSummary::default();

    store.drop_collection(QUIZZES).await?;
    store.drop_collection(QUESTIONS).await?;
    info!("Cleared '{}' and '{}' collections.", QUIZZES, QUESTIONS);

    // Step 1: quizzes, and the title -> id map everything else joins on.
    let quizzes = curated_quizzes();
    let quiz_ids = title_index(&quizzes)?;
    store.insert_quizzes(&quizzes).await?;
    summary.quizzes = quizzes.len();
    info!("Inserted {} quizzes.", quizzes.len());

    // Step 2: curated image questions.
    let mut all_questions: Vec<Question> = Vec::new();
    for curated in CURATED_QUESTIONS {
        let quiz_id = quiz_ids
            .get(curated.quiz_title)
            .copied()
            .with_context(|| format!("No quiz titled '{}'", curated.quiz_title))?;
        all_questions.push(curated.into_question(quiz_id));
    }
    summary.curated_questions = all_questions.len();

    // Step 3: generated text questions. Failures here only shrink the batch.
    for &(title, num) in plan {
        let Some(&quiz_id) = quiz_ids.get(title) else {
            warn!("Skipping generation for unknown quiz '{}'", title);
            continue;
        };

        let response = generator.generate_text_questions(title, num).await;
        let records = parse_response(response.as_deref());
        if records.is_empty() {
            continue;
        }

        let batch = validate_records(title, records);
        summary.rejected_questions += batch.rejected;
        let generated = batch.into_questions(quiz_id);
        if generated.is_empty() {
            continue;
        }
        info!(
            "Successfully parsed and added {} questions for '{}'.",
            generated.len(),
            title
        );
        summary.generated_questions += generated.len();
        all_questions.extend(generated);
    }

    // Step 4: one bulk insert for everything.
    if !all_questions.is_empty() {
        store.insert_questions(&all_questions).await?;
        info!(
            "Total of {} questions inserted into the database.",
            all_questions.len()
        );
    }

    Ok(summary)
}
