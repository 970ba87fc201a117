//! Student records shown by the list and detail views

use serde::{Deserialize, Serialize};

/// Row in the students list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub visa_lodged: bool,
    pub phone_number: String,
}

impl Student {
    pub fn visa_lodged_label(&self) -> &'static str {
        if self.visa_lodged {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Academic qualification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Academic {
    pub degree: String,
    pub institution: String,
    pub gpa: String,
    pub year: u16,
}

/// Language test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageTest {
    pub name: String,
    pub score: String,
}

/// Full profile shown on the detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub personal_note: String,
    pub city: String,
    pub country: String,
    pub academics: Vec<Academic>,
    pub language_tests: Vec<LanguageTest>,
}

/// Section headings, spacers and single-line entries on the profile page
const PROFILE_FIXED_LINES: usize = 14;

impl StudentProfile {
    /// Number of lines the profile page renders before wrapping
    pub fn line_count(&self) -> usize {
        PROFILE_FIXED_LINES + self.academics.len() + self.language_tests.len()
    }
}

fn student(id: u32, name: &str, visa_lodged: bool) -> Student {
    Student {
        id,
        name: name.to_string(),
        visa_lodged,
        phone_number: "+64-288-222-222".to_string(),
    }
}

/// In-memory student list
pub fn mock_students() -> Vec<Student> {
    vec![
        student(1, "Alice Alice", true),
        student(2, "Bob Charlie", false),
        student(3, "Charlie Alice", true),
        student(4, "Bob Charlie", false),
        student(5, "Charlie Alice", true),
    ]
}

/// In-memory profile; every student currently shares it
pub fn mock_profile() -> StudentProfile {
    let academic = |degree: &str, institution: &str, gpa: &str, year| Academic {
        degree: degree.to_string(),
        institution: institution.to_string(),
        gpa: gpa.to_string(),
        year,
    };

    StudentProfile {
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "+64-288-555-555".to_string(),
        address: "123 Green Street".to_string(),
        personal_note: "Type and save any personal note required for the student".to_string(),
        city: "Auckland".to_string(),
        country: "New Zealand".to_string(),
        academics: vec![
            academic("High School", "ABC High School", "4.0", 2015),
            academic("Bachelor's", "XYZ University", "3.8", 2019),
            academic("Master's", "LMN University", "3.9", 2023),
        ],
        language_tests: vec![LanguageTest {
            name: "IELTS".to_string(),
            score: "7.5".to_string(),
        }],
    }
}
