use chrono::NaiveDate;
use serde::Serialize;

use crate::identity::UserProfile;
use crate::models::{Achievement, CourseProgress, LearningStats, Rarity};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Overview,
    Courses,
    Achievements,
    Profile,
}

impl DashboardTab {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "overview" => Some(DashboardTab::Overview),
            "courses" => Some(DashboardTab::Courses),
            "achievements" => Some(DashboardTab::Achievements),
            "profile" => Some(DashboardTab::Profile),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Courses => "My Courses",
            DashboardTab::Achievements => "Achievements",
            DashboardTab::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityBar {
    pub day: &'static str,
    pub hours: f64,
    /// Height relative to the busiest day.
    pub percent: u8,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: UserProfile,
    pub courses: Vec<CourseProgress>,
    pub achievements: Vec<Achievement>,
    pub stats: LearningStats,
    /// Hours per day, Monday first.
    pub weekly_activity: [f64; 7],
}

#[derive(Debug, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum DashboardSection<'a> {
    Overview {
        continue_learning: Vec<&'a CourseProgress>,
        weekly_activity: Vec<ActivityBar>,
        recent_achievements: Vec<&'a Achievement>,
    },
    Courses {
        in_progress: Vec<&'a CourseProgress>,
        completed: Vec<&'a CourseProgress>,
    },
    Achievements {
        achievements: &'a [Achievement],
    },
    Profile {
        user: &'a UserProfile,
    },
}

#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub greeting: String,
    pub stats: &'a LearningStats,
    pub section: DashboardSection<'a>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl Dashboard {
    pub fn for_user(user: UserProfile) -> Self {
        Self {
            user,
            courses: vec![
                CourseProgress {
                    id: "1".to_string(),
                    title: "Python Automation Fundamentals".to_string(),
                    thumbnail: "https://images.unsplash.com/photo-1526379095098-d400fd0bf935?auto=format&fit=crop&w=300&q=80".to_string(),
                    progress: 65,
                    total_lessons: 12,
                    completed_lessons: 8,
                    last_accessed: date(2024, 1, 15),
                    next_lesson: "Working with APIs".to_string(),
                    estimated_time: 45,
                },
                CourseProgress {
                    id: "2".to_string(),
                    title: "AI-Powered Web Scraping".to_string(),
                    thumbnail: "https://images.unsplash.com/photo-1555949963-aa79dcee981c?auto=format&fit=crop&w=300&q=80".to_string(),
                    progress: 30,
                    total_lessons: 10,
                    completed_lessons: 3,
                    last_accessed: date(2024, 1, 10),
                    next_lesson: "Advanced Scraping Techniques".to_string(),
                    estimated_time: 60,
                },
                CourseProgress {
                    id: "4".to_string(),
                    title: "Excel Automation with AI".to_string(),
                    thumbnail: "https://images.unsplash.com/photo-1611224923853-80b023f02d71?auto=format&fit=crop&w=300&q=80".to_string(),
                    progress: 100,
                    total_lessons: 8,
                    completed_lessons: 8,
                    last_accessed: date(2024, 1, 12),
                    next_lesson: "Course Completed".to_string(),
                    estimated_time: 0,
                },
            ],
            achievements: vec![
                achievement("1", "First Steps", "Complete your first lesson", "🎯", date(2024, 1, 1), Rarity::Common),
                achievement("2", "Week Warrior", "Learn for 7 consecutive days", "🔥", date(2024, 1, 8), Rarity::Rare),
                achievement("3", "Course Master", "Complete your first course", "🏆", date(2024, 1, 12), Rarity::Epic),
            ],
            stats: LearningStats {
                total_hours: 24.5,
                courses_completed: 1,
                current_streak: 5,
                longest_streak: 12,
                certificates_earned: 1,
                skill_points: 1250,
            },
            weekly_activity: [2.0, 1.5, 3.0, 2.5, 1.0, 4.0, 2.0],
        }
    }

    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.user.greeting_name())
    }

    pub fn in_progress(&self) -> Vec<&CourseProgress> {
        self.courses.iter().filter(|c| !c.is_completed()).collect()
    }

    pub fn completed(&self) -> Vec<&CourseProgress> {
        self.courses.iter().filter(|c| c.is_completed()).collect()
    }

    /// Most recent first.
    pub fn recent_achievements(&self, limit: usize) -> Vec<&Achievement> {
        let mut recent: Vec<&Achievement> = self.achievements.iter().collect();
        recent.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
        recent.truncate(limit);
        recent
    }

    pub fn weekly_activity_bars(&self) -> Vec<ActivityBar> {
        let peak = self.weekly_activity.iter().copied().fold(0.0_f64, f64::max);
        WEEKDAYS
            .iter()
            .zip(self.weekly_activity.iter())
            .map(|(&day, &hours)| ActivityBar {
                day,
                hours,
                percent: if peak > 0.0 {
                    ((hours / peak) * 100.0).round().clamp(0.0, 100.0) as u8
                } else {
                    0
                },
            })
            .collect()
    }

    pub fn view(&self, tab: DashboardTab) -> DashboardView<'_> {
        let section = match tab {
            DashboardTab::Overview => DashboardSection::Overview {
                continue_learning: self.in_progress(),
                weekly_activity: self.weekly_activity_bars(),
                recent_achievements: self.recent_achievements(3),
            },
            DashboardTab::Courses => DashboardSection::Courses {
                in_progress: self.in_progress(),
                completed: self.completed(),
            },
            DashboardTab::Achievements => DashboardSection::Achievements {
                achievements: &self.achievements,
            },
            DashboardTab::Profile => DashboardSection::Profile { user: &self.user },
        };

        DashboardView {
            greeting: self.greeting(),
            stats: &self.stats,
            section,
        }
    }
}

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    unlocked_at: NaiveDate,
    rarity: Rarity,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        unlocked_at,
        rarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::for_user(UserProfile {
            uid: "u1".to_string(),
            email: "sarah@academy.dev".to_string(),
            display_name: Some("Sarah".to_string()),
        })
    }

    #[test]
    fn test_weekly_bars_scale_to_peak() {
        let bars = dashboard().weekly_activity_bars();
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[5], ActivityBar { day: "Sat", hours: 4.0, percent: 100 });
        assert_eq!(bars[0].percent, 50);
        assert_eq!(bars[4].percent, 25);
    }

    #[test]
    fn test_idle_week_has_flat_bars() {
        let mut d = dashboard();
        d.weekly_activity = [0.0; 7];
        assert!(d.weekly_activity_bars().iter().all(|b| b.percent == 0));
    }

    #[test]
    fn test_progress_split() {
        let d = dashboard();
        assert_eq!(d.in_progress().len(), 2);
        assert_eq!(d.completed()[0].title, "Excel Automation with AI");
        assert_eq!(d.greeting(), "Welcome back, Sarah!");
    }

    #[test]
    fn test_overview_lists_recent_achievements_first() {
        let d = dashboard();
        match d.view(DashboardTab::Overview).section {
            DashboardSection::Overview { recent_achievements, .. } => {
                assert_eq!(recent_achievements[0].title, "Course Master");
            }
            other => panic!("unexpected section: {:?}", other),
        }
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!(DashboardTab::parse("achievements"), Some(DashboardTab::Achievements));
        assert_eq!(DashboardTab::parse("settings"), None);
    }
}
