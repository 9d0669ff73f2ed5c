pub mod course;
pub mod dashboard;
pub mod tutorial;

pub use course::{format_duration, Category, Course, Difficulty};
pub use dashboard::{Achievement, CourseProgress, LearningStats, Rarity};
pub use tutorial::{Chapter, Demo, Quiz, QuizQuestion, Resource, ResourceKind, Tutorial};
