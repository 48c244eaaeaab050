use async_trait::async_trait;
use quiz_seeder::db::QuizStore;
use quiz_seeder::generator::{GenerationError, TextGenerator};
use quiz_seeder::questions::Question;
use quiz_seeder::quizzes::Quiz;
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every call so tests can check both the data and the order of operations.
#[derive(Default)]
pub struct MemoryStore {
    pub quizzes: Mutex<Vec<Quiz>>,
    pub questions: Mutex<Vec<Question>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_question_insert: bool,
}

impl MemoryStore {
    pub fn failing_question_insert() -> Self {
        MemoryStore {
            fail_question_insert: true,
            ..MemoryStore::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn quizzes(&self) -> Vec<Quiz> {
        self.quizzes.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<Question> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn drop_collection(&self, name: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(format!("drop:{}", name));
        match name {
            "quizzes" => self.quizzes.lock().unwrap().clear(),
            "questions" => self.questions.lock().unwrap().clear(),
            _ => {}
        }
        Ok(())
    }

    async fn insert_quizzes(&self, quizzes: &[Quiz]) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("insert_quizzes:{}", quizzes.len()));
        self.quizzes.lock().unwrap().extend_from_slice(quizzes);
        Ok(())
    }

    async fn insert_questions(&self, questions: &[Question]) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("insert_questions:{}", questions.len()));
        if self.fail_question_insert {
            anyhow::bail!("write concern failed");
        }
        self.questions.lock().unwrap().extend_from_slice(questions);
        Ok(())
    }

    async fn close(&self) {
        self.calls.lock().unwrap().push("close".to_string());
    }
}

/// Replies per topic; topics without a reply fail like an unreachable API.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub replies: HashMap<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn failing() -> Self {
        ScriptedGenerator::default()
    }

    pub fn with_reply(mut self, topic: &str, reply: &str) -> Self {
        self.replies.insert(topic.to_string(), reply.to_string());
        self
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .iter()
            .find(|(topic, _)| prompt.contains(&format!("'{}'", topic)))
            .map(|(_, reply)| reply.clone())
            .ok_or(GenerationError::EmptyCompletion)
    }
}

pub fn question_json(text: &str, correct: usize, timer: i64) -> serde_json::Value {
    let options: Vec<_> = (0..4)
        .map(|i| serde_json::json!({"text": format!("{} option {}", text, i), "isCorrect": i == correct}))
        .collect();
    serde_json::json!({
        "questionText": text,
        "options": options,
        "explanation": format!("Because of {}.", text),
        "timer": timer,
    })
}
