use crate::models::{Category, Course, Difficulty};

fn course(
    id: &str,
    title: &str,
    description: &str,
    instructor: &str,
    duration: u32,
    difficulty: Difficulty,
    category: Category,
    rating: f64,
    students_count: u32,
    price: f64,
    thumbnail: &str,
    tags: &[&str],
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        instructor: instructor.to_string(),
        duration,
        difficulty,
        category,
        rating,
        students_count,
        price,
        is_free: price == 0.0,
        thumbnail: format!("https://images.unsplash.com/{}?auto=format&fit=crop&w=1000&q=80", thumbnail),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        progress: None,
    }
}

/// The catalog shipped with the site.
pub fn sample_courses() -> Vec<Course> {
    let mut fundamentals = course(
        "1",
        "Python Automation Fundamentals",
        "Learn the basics of automation using Python. Perfect for beginners with no prior programming experience.",
        "Sarah Chen",
        480,
        Difficulty::Beginner,
        Category::Python,
        4.8,
        3420,
        99.0,
        "photo-1526379095098-d400fd0bf935",
        &["Python", "Automation", "Beginner-Friendly"],
    );
    fundamentals.progress = Some(65);

    vec![
        fundamentals,
        course(
            "2",
            "AI-Powered Web Scraping",
            "Master intelligent web scraping techniques using AI to extract data from dynamic websites.",
            "Marcus Rodriguez",
            360,
            Difficulty::Intermediate,
            Category::WebScraping,
            4.9,
            2180,
            149.0,
            "photo-1555949963-aa79dcee981c",
            &["Web Scraping", "AI", "Data Extraction"],
        ),
        course(
            "3",
            "RPA with UiPath and AI",
            "Combine robotic process automation with artificial intelligence for enterprise-level automation solutions.",
            "Dr. Emily Watson",
            720,
            Difficulty::Advanced,
            Category::Rpa,
            4.7,
            1560,
            249.0,
            "photo-1485827404703-89b55fcc595e",
            &["RPA", "UiPath", "Enterprise", "AI Integration"],
        ),
        course(
            "4",
            "Excel Automation with AI",
            "Automate Excel tasks using AI-powered tools and Python. Transform your spreadsheet workflows.",
            "James Thompson",
            240,
            Difficulty::Beginner,
            Category::DataAutomation,
            4.6,
            4210,
            0.0,
            "photo-1611224923853-80b023f02d71",
            &["Excel", "Python", "Data Processing", "Free"],
        ),
        course(
            "5",
            "Advanced AI Workflows",
            "Build complex automation workflows using LangChain, OpenAI API, and modern AI frameworks.",
            "Lisa Park",
            600,
            Difficulty::Advanced,
            Category::AiIntegration,
            4.9,
            890,
            299.0,
            "photo-1677442136019-21780ecad995",
            &["LangChain", "OpenAI", "Workflows", "Advanced"],
        ),
        course(
            "6",
            "Chatbot Development with AI",
            "Create intelligent chatbots that can handle customer service, lead generation, and more.",
            "Alex Kumar",
            420,
            Difficulty::Intermediate,
            Category::AiIntegration,
            4.8,
            2340,
            179.0,
            "photo-1676277791608-ac54c4ece78c",
            &["Chatbots", "AI", "Customer Service"],
        ),
    ]
}
