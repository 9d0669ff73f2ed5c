use serde::{Deserialize, Serialize};

use super::Difficulty;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: u32,
    pub difficulty: Difficulty,
    pub category: String,
    pub video_url: String,
    pub rating: f64,
    pub enrolled_count: u32,
    pub chapters: Vec<Chapter>,
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Quiz>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<Demo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Offset into the tutorial video, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_timestamp: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Pdf,
    Code,
    Template,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub kind: ResourceKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Answer key. Never sent to clients; only grading reveals it.
    #[serde(skip_serializing)]
    pub correct_answer: usize,
    #[serde(skip_serializing)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demo {
    pub title: String,
    pub description: String,
    pub code_snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}
