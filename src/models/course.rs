use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    /// Length in minutes.
    pub duration: u32,
    pub difficulty: Difficulty,
    pub category: Category,
    pub rating: f64,
    #[serde(alias = "studentsCount")]
    pub students_count: u32,
    pub price: f64,
    #[serde(alias = "isFree")]
    pub is_free: bool,
    pub thumbnail: String,
    pub tags: Vec<String>,
    /// Only present for a signed-in learner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl Course {
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }

    /// Lowercased substring match against title, description and tags.
    /// `needle` must already be lowercase.
    pub fn mentions(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn all() -> [Difficulty; 3] {
        [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|d| d.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Python,
    Rpa,
    AiIntegration,
    WebScraping,
    DataAutomation,
}

impl Category {
    pub const fn all() -> [Category; 5] {
        [
            Category::Python,
            Category::Rpa,
            Category::AiIntegration,
            Category::WebScraping,
            Category::DataAutomation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Python => "python",
            Category::Rpa => "rpa",
            Category::AiIntegration => "ai-integration",
            Category::WebScraping => "web-scraping",
            Category::DataAutomation => "data-automation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Python => "Python Automation",
            Category::Rpa => "RPA",
            Category::AiIntegration => "AI Integrations",
            Category::WebScraping => "Web Scraping",
            Category::DataAutomation => "Data Automation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == value)
    }
}

/// Renders minutes as `8h`, `1h 30m` or `45m`.
pub fn format_duration(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
