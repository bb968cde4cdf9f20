use crate::core::{InternFilters, PostingFilters};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Errors raised while turning request parameters into search filters
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{lower} must not exceed {upper}")]
    InvertedRange {
        lower: &'static str,
        upper: &'static str,
    },
}

/// Posting search parameters, as sent by the intern explore page
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostingSearchParams {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub skills: Vec<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub industry: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub municipality: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 0.0))]
    pub stipend_min: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 0.0))]
    pub stipend_max: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(max = 120))]
    pub duration_min: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(max = 120))]
    pub duration_max: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date_to: Option<NaiveDate>,
}

impl PostingSearchParams {
    /// Validate and split into the text query and the filter set
    pub fn into_filters(self) -> Result<(String, PostingFilters), ParamError> {
        self.validate()?;
        ordered(self.stipend_min, self.stipend_max, "stipend_min", "stipend_max")?;
        ordered(self.duration_min, self.duration_max, "duration_min", "duration_max")?;
        ordered(
            self.start_date_from,
            self.start_date_to,
            "start_date_from",
            "start_date_to",
        )?;

        let filters = PostingFilters {
            skills: self.skills,
            industry: self.industry,
            province: self.province,
            municipality: self.municipality,
            stipend_min: self.stipend_min,
            stipend_max: self.stipend_max,
            duration_min: self.duration_min,
            duration_max: self.duration_max,
            start_date_from: self.start_date_from,
            start_date_to: self.start_date_to,
        };

        Ok((self.query.unwrap_or_default(), filters))
    }
}

/// Intern search parameters, as sent by the employer explore page
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InternSearchParams {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub skills: Vec<i64>,
    #[serde(default, deserialize_with = "id_list")]
    pub industries: Vec<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub municipality: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub has_experience: bool,
    #[serde(default, deserialize_with = "flag")]
    pub has_education: bool,
}

impl InternSearchParams {
    pub fn into_filters(self) -> Result<(String, InternFilters), ParamError> {
        self.validate()?;

        let filters = InternFilters {
            skills: self.skills,
            industries: self.industries,
            province: self.province,
            municipality: self.municipality,
            has_experience: self.has_experience,
            has_education: self.has_education,
        };

        Ok((self.query.unwrap_or_default(), filters))
    }
}

fn ordered<T: PartialOrd>(
    lower: Option<T>,
    upper: Option<T>,
    lower_name: &'static str,
    upper_name: &'static str,
) -> Result<(), ParamError> {
    match (lower, upper) {
        (Some(lo), Some(hi)) if lo > hi => Err(ParamError::InvertedRange {
            lower: lower_name,
            upper: upper_name,
        }),
        _ => Ok(()),
    }
}

/// Parse an optional value, treating an empty string as absent
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parse a comma-separated id list such as `3,7,12`
fn id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.parse().map_err(serde::de::Error::custom))
        .collect()
}

/// Parse a checkbox-style flag
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_lowercase().as_str() {
        "" | "false" | "off" | "0" | "no" => Ok(false),
        "true" | "on" | "1" | "yes" => Ok(true),
        other => Err(serde::de::Error::custom(format!("invalid flag: {}", other))),
    }
}
