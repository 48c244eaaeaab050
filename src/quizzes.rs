use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const WORLD_LANDMARKS: &str = "World Landmarks & Statues";
pub const WORLD_CAPITALS: &str = "World Capitals Challenge";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: QuizDifficulty,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: &str,
        category: &str,
        difficulty: QuizDifficulty,
    ) -> Self {
        Quiz {
            id: ObjectId::new(),
            title: title.to_owned(),
            description: description.to_owned(),
            category: category.to_owned(),
            difficulty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// The quizzes every seeding run starts from. Ids are fresh on each call.
pub fn curated_quizzes() -> Vec<Quiz> {
    vec![
        Quiz::new(
            WORLD_LANDMARKS,
            "Identify iconic structures from around the globe.",
            "Art & History",
            QuizDifficulty::Intermediate,
        ),
        Quiz::new(
            WORLD_CAPITALS,
            "A comprehensive test of your geography knowledge.",
            "Geography",
            QuizDifficulty::Beginner,
        ),
    ]
}

/// Maps quiz titles to their ids. Titles are the join key between quizzes,
/// curated questions and generated batches, so a duplicate is an error.
pub fn title_index(quizzes: &[Quiz]) -> anyhow::Result<HashMap<String, ObjectId>> {
    let mut index = HashMap::with_capacity(quizzes.len());
    for quiz in quizzes {
        if index.insert(quiz.title.clone(), quiz.id).is_some() {
            anyhow::bail!("Duplicate quiz title: '{}'", quiz.title);
        }
    }
    Ok(index)
}
