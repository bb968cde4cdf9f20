use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Skills, industries and locations are compared by id
pub type SkillId = i64;
pub type IndustryId = i64;
pub type LocationId = i64;

/// Named municipality/province pair an intern would relocate to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub municipality: String,
    pub province: String,
}

/// Intern profile as read from the marketplace store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "emailConfirmed", default)]
    pub email_confirmed: bool,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "currentMunicipality", default)]
    pub current_municipality: String,
    #[serde(rename = "currentProvince", default)]
    pub current_province: String,
    #[serde(rename = "skillIds", default)]
    pub skill_ids: HashSet<SkillId>,
    #[serde(rename = "industryIds", default)]
    pub industry_ids: HashSet<IndustryId>,
    #[serde(rename = "preferredLocations", default)]
    pub preferred_locations: Vec<Location>,
    #[serde(rename = "educationCount", default)]
    pub education_count: u32,
    #[serde(rename = "experienceCount", default)]
    pub experience_count: u32,
}

impl InternProfile {
    pub fn has_education(&self) -> bool {
        self.education_count > 0
    }

    pub fn has_experience(&self) -> bool {
        self.experience_count > 0
    }
}

/// Employer (company) profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub id: i64,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub municipality: String,
    pub province: String,
    #[serde(rename = "industryIds", default)]
    pub industry_ids: HashSet<IndustryId>,
}

/// Internship posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub id: i64,
    #[serde(rename = "employerId")]
    pub employer_id: i64,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(rename = "requiredSkillIds", default)]
    pub required_skill_ids: HashSet<SkillId>,
    #[serde(rename = "industryId", default)]
    pub industry_id: Option<IndustryId>,
    pub municipality: String,
    pub province: String,
    #[serde(rename = "durationMonths")]
    pub duration_months: u32,
    #[serde(default)]
    pub stipend: Option<f64>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "applicationDeadline")]
    pub application_deadline: NaiveDate,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "isPublished")]
    pub is_published: bool,
}

impl Posting {
    /// Active and published postings form the browse/search universe
    pub fn is_listed(&self) -> bool {
        self.is_active && self.is_published
    }

    pub fn is_deadline_passed(&self, today: NaiveDate) -> bool {
        today > self.application_deadline
    }

    /// Days left to apply, 0 once the deadline has passed
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        if self.is_deadline_passed(today) {
            return 0;
        }
        (self.application_deadline - today).num_days()
    }

    pub fn is_accepting_applications(&self, today: NaiveDate) -> bool {
        self.is_listed() && !self.is_deadline_passed(today)
    }
}

/// The four factor values behind an overall score, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub industry: f64,
    pub location: f64,
    pub qualification: f64,
}

/// A scored candidate. Rank is its position in the ranking it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult<C> {
    pub candidate: C,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Errors raised while building a weight vector from configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("missing scoring weight: {0}")]
    MissingKey(&'static str),

    #[error("unknown scoring weight: {0}")]
    UnknownKey(String),

    #[error("invalid value {value} for scoring weight {key}")]
    InvalidValue { key: &'static str, value: f64 },
}

/// Scoring weights, expected to sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub industry: f64,
    pub location: f64,
    pub qualification: f64,
}

impl ScoringWeights {
    pub const KEYS: [&'static str; 4] = ["skills", "industry", "location", "qualification"];

    /// Build weights from an optional configuration table.
    ///
    /// A missing table yields the defaults. A present table must carry all
    /// four keys; weights are never defaulted one factor at a time.
    pub fn from_table(table: Option<&HashMap<String, f64>>) -> Result<Self, WeightsError> {
        let Some(table) = table else {
            return Ok(Self::default());
        };

        if let Some(unknown) = table.keys().find(|k| !Self::KEYS.contains(&k.as_str())) {
            return Err(WeightsError::UnknownKey(unknown.clone()));
        }

        let read = |key: &'static str| -> Result<f64, WeightsError> {
            let value = *table.get(key).ok_or(WeightsError::MissingKey(key))?;
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidValue { key, value });
            }
            Ok(value)
        };

        Ok(Self {
            skills: read("skills")?,
            industry: read("industry")?,
            location: read("location")?,
            qualification: read("qualification")?,
        })
    }

    pub fn sum(&self) -> f64 {
        self.skills + self.industry + self.location + self.qualification
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            industry: 0.25,
            location: 0.20,
            qualification: 0.15,
        }
    }
}
