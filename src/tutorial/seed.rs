use crate::models::{Chapter, Demo, Difficulty, Quiz, QuizQuestion, Resource, ResourceKind, Tutorial};

pub const EXCEL_SLUG: &str = "automate-excel-with-ai";

const INTRO: &str = r#"# Introduction to Excel Automation

Welcome to the world of Excel automation! In this chapter, we'll cover the fundamentals of automating Excel tasks using AI and Python.

## What You'll Learn

- Understanding Excel automation concepts
- Setting up your development environment
- Introduction to Python libraries for Excel
- AI-powered data processing techniques

## Why Automate Excel?

Excel automation saves time, reduces errors, and enables you to process large datasets efficiently. With AI integration, you can:

- Automatically categorize data
- Generate insights from spreadsheets
- Create dynamic reports
- Perform complex calculations
"#;

const SETUP: &str = r#"# Setting Up Python Environment

In this chapter, we'll prepare your development environment for Excel automation.

## Required Tools

1. **Python 3.8+**
2. **pandas** - For data manipulation
3. **openpyxl** - For Excel file handling
4. **xlsxwriter** - For creating Excel files
5. **openai** - For AI integration

## Installation Steps

```bash
pip install pandas openpyxl xlsxwriter openai
python -c "import pandas; print('Setup complete!')"
```
"#;

const READ_WRITE: &str = r#"# Reading and Writing Excel Files

Learn how to programmatically read from and write to Excel files using Python.

## Reading Excel Files

```python
import pandas as pd

df = pd.read_excel('data/input/sample.xlsx')
df = pd.read_excel('data/input/sample.xlsx', sheet_name='Sheet1')
```

## Writing Excel Files

```python
df.to_excel('data/output/result.xlsx', index=False)
```

## Best Practices

- Always handle file paths properly
- Use context managers when possible
- Validate data before processing
- Include error handling
"#;

const DEMO_SNIPPET: &str = r#"import pandas as pd

def automate_excel_with_ai(file_path):
    df = pd.read_excel(file_path)
    for column in df.columns:
        if df[column].dtype == 'object':
            df[f'{column}_category'] = categorize_with_ai(df[column].tolist())
    summary = df.describe()
    with pd.ExcelWriter('output.xlsx') as writer:
        df.to_excel(writer, sheet_name='Processed_Data')
        summary.to_excel(writer, sheet_name='Summary')
    return df
"#;

fn chapter(id: &str, title: &str, content: &str, video_timestamp: u32) -> Chapter {
    Chapter {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        video_timestamp: Some(video_timestamp),
    }
}

fn resource(id: &str, title: &str, kind: ResourceKind, url: &str, size: &str) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        url: url.to_string(),
        size: Some(size.to_string()),
    }
}

pub fn excel_tutorial() -> Tutorial {
    Tutorial {
        id: EXCEL_SLUG.to_string(),
        title: "Automate Excel with AI: Complete Beginner's Guide".to_string(),
        description: "Learn how to automate Excel tasks using AI-powered tools and Python. Transform your spreadsheet workflows with practical examples.".to_string(),
        instructor: "Sarah Chen".to_string(),
        duration: 480,
        difficulty: Difficulty::Beginner,
        category: "Data Automation".to_string(),
        video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        rating: 4.8,
        enrolled_count: 3420,
        chapters: vec![
            chapter("1", "Introduction to Excel Automation", INTRO, 0),
            chapter("2", "Setting Up Python Environment", SETUP, 120),
            chapter("3", "Reading and Writing Excel Files", READ_WRITE, 300),
        ],
        resources: vec![
            resource("1", "Excel Automation Cheat Sheet", ResourceKind::Pdf, "/resources/excel-automation-cheat-sheet.pdf", "2.3 MB"),
            resource("2", "Python Code Templates", ResourceKind::Code, "/resources/excel-automation-templates.zip", "1.1 MB"),
            resource("3", "Sample Excel Files", ResourceKind::Template, "/resources/sample-excel-files.zip", "856 KB"),
        ],
        quiz: Some(Quiz {
            questions: vec![
                QuizQuestion {
                    id: "1".to_string(),
                    question: "Which Python library is most commonly used for Excel automation?".to_string(),
                    options: vec!["pandas", "numpy", "matplotlib", "requests"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                    correct_answer: 0,
                    explanation: "pandas is the most popular library for Excel automation as it provides powerful data manipulation and Excel integration capabilities.".to_string(),
                },
                QuizQuestion {
                    id: "2".to_string(),
                    question: "What is the advantage of using AI in Excel automation?".to_string(),
                    options: vec![
                        "Faster file processing",
                        "Automatic data categorization and insights",
                        "Better file compression",
                        "Improved security",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    correct_answer: 1,
                    explanation: "AI enables automatic data categorization, pattern recognition, and intelligent insights that would be difficult to achieve with traditional automation.".to_string(),
                },
            ],
        }),
        demo: Some(Demo {
            title: "Interactive Excel Automation Demo".to_string(),
            description: "Upload a CSV file and watch as AI automatically categorizes and processes your data.".to_string(),
            code_snippet: DEMO_SNIPPET.to_string(),
            live_url: Some("/demo/excel-automation".to_string()),
        }),
    }
}
