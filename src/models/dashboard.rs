use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgress {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub progress: u8,
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub last_accessed: NaiveDate,
    pub next_lesson: String,
    /// Minutes left.
    pub estimated_time: u32,
}

impl CourseProgress {
    pub fn is_completed(&self) -> bool {
        self.progress >= 100
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: NaiveDate,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_hours: f64,
    pub courses_completed: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub certificates_earned: u32,
    pub skill_points: u32,
}
