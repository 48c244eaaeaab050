pub mod catalog;
pub mod config;
pub mod db;
pub mod generator;
pub mod parser;
pub mod questions;
pub mod quizzes;
pub mod seeder;
