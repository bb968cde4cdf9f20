// Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use lwazi_match::models::{EmployerProfile, InternProfile, Location, Posting};

pub const PYTHON: i64 = 1;
pub const DJANGO: i64 = 2;
pub const SQL: i64 = 3;
pub const EXCEL: i64 = 4;

pub const IT: i64 = 10;
pub const FINANCE: i64 = 11;

pub fn create_test_posting(
    id: i64,
    skills: &[i64],
    industry: Option<i64>,
    municipality: &str,
    province: &str,
) -> Posting {
    Posting {
        id,
        employer_id: 100 + id,
        company_name: format!("Company {}", id),
        title: format!("Internship {}", id),
        description: "Join our team".to_string(),
        requirements: String::new(),
        responsibilities: String::new(),
        required_skill_ids: skills.iter().copied().collect(),
        industry_id: industry,
        municipality: municipality.to_string(),
        province: province.to_string(),
        duration_months: 6,
        stipend: Some(4500.0),
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        application_deadline: NaiveDate::from_ymd_opt(2099, 1, 15).unwrap(),
        is_active: true,
        is_published: true,
    }
}

pub fn create_test_intern(id: i64, skills: &[i64], industries: &[i64]) -> InternProfile {
    InternProfile {
        id,
        username: format!("intern{}", id),
        email: format!("intern{}@example.com", id),
        email_confirmed: true,
        full_name: format!("Intern {}", id),
        phone: String::new(),
        bio: String::new(),
        current_municipality: "Cape Town".to_string(),
        current_province: "Western Cape".to_string(),
        skill_ids: skills.iter().copied().collect(),
        industry_ids: industries.iter().copied().collect(),
        preferred_locations: vec![Location {
            id: 1,
            municipality: "Durban".to_string(),
            province: "KwaZulu-Natal".to_string(),
        }],
        education_count: 1,
        experience_count: 0,
    }
}

pub fn create_test_employer(id: i64, industries: &[i64]) -> EmployerProfile {
    EmployerProfile {
        id,
        company_name: format!("Employer {}", id),
        municipality: "Cape Town".to_string(),
        province: "Western Cape".to_string(),
        industry_ids: industries.iter().copied().collect(),
    }
}
