// Unit tests for Lwazi Match

mod common;

use common::*;
use lwazi_match::core::{
    location::location_score,
    filters::{matches_intern_filters, matches_posting_filters, InternFilters, PostingFilters},
    mode::{select_mode, ExploreMode},
    scoring::{score_intern_for_employer, score_posting_for_intern},
};
use lwazi_match::models::{Location, ScoringWeights, WeightsError};
use chrono::NaiveDate;
use std::collections::HashMap;

fn durban() -> Vec<Location> {
    vec![Location {
        id: 1,
        municipality: "Durban".to_string(),
        province: "KwaZulu-Natal".to_string(),
    }]
}

#[test]
fn test_location_current_place() {
    let score = location_score("Cape Town", "Western Cape", "Cape Town", "Western Cape", &durban());
    assert_eq!(score, 100.0);
}

#[test]
fn test_location_current_place_ignores_case() {
    let score = location_score("CAPE TOWN", "western cape", "Cape Town", "Western Cape", &[]);
    assert_eq!(score, 100.0);
}

#[test]
fn test_location_preferred_place() {
    let score = location_score("Durban", "KwaZulu-Natal", "Cape Town", "Western Cape", &durban());
    assert_eq!(score, 80.0);
}

#[test]
fn test_location_current_province_only() {
    let score = location_score("Stellenbosch", "Western Cape", "Cape Town", "Western Cape", &durban());
    assert_eq!(score, 40.0);
}

#[test]
fn test_location_preferred_province_only() {
    let score = location_score("Pietermaritzburg", "KwaZulu-Natal", "Cape Town", "Western Cape", &durban());
    assert_eq!(score, 30.0);
}

#[test]
fn test_location_no_overlap() {
    let score = location_score("Polokwane", "Limpopo", "Cape Town", "Western Cape", &durban());
    assert_eq!(score, 0.0);
}

#[test]
fn test_reference_score() {
    let intern = create_test_intern(1, &[PYTHON, DJANGO], &[IT]);
    let posting = create_test_posting(1, &[PYTHON, DJANGO, SQL], Some(IT), "Cape Town", "Western Cape");

    let (score, breakdown) = score_posting_for_intern(&posting, &intern, &ScoringWeights::default());

    assert_eq!(breakdown.industry, 100.0);
    assert_eq!(breakdown.location, 100.0);
    assert_eq!(breakdown.qualification, 50.0);
    assert_eq!(score, 79.17);
}

#[test]
fn test_score_stays_in_range() {
    let mut intern = create_test_intern(1, &[], &[]);
    intern.education_count = 0;
    let posting = create_test_posting(1, &[PYTHON, SQL], Some(FINANCE), "Polokwane", "Limpopo");

    let (score, _) = score_posting_for_intern(&posting, &intern, &ScoringWeights::default());
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(score, 0.0);
}

#[test]
fn test_missing_posting_attributes_are_neutral() {
    let intern = create_test_intern(1, &[PYTHON], &[IT]);
    let posting = create_test_posting(1, &[], None, "Cape Town", "Western Cape");

    let (_, breakdown) = score_posting_for_intern(&posting, &intern, &ScoringWeights::default());
    assert_eq!(breakdown.skills, 50.0);
    assert_eq!(breakdown.industry, 50.0);
}

#[test]
fn test_intern_score_for_employer() {
    let intern = create_test_intern(1, &[PYTHON, DJANGO], &[IT]);
    let employer = create_test_employer(1, &[IT]);

    // 2 skills -> 20, IT shared -> 100, same city -> 100, one education record -> 30
    let (score, breakdown) = score_intern_for_employer(&intern, &employer, &ScoringWeights::default());
    assert_eq!(breakdown.skills, 20.0);
    assert_eq!(breakdown.qualification, 30.0);
    assert_eq!(score, 8.0 + 25.0 + 20.0 + 4.5);
}

#[test]
fn test_weights_from_table() {
    assert_eq!(ScoringWeights::from_table(None).unwrap(), ScoringWeights::default());

    let mut table = HashMap::new();
    table.insert("skills".to_string(), 0.7);
    assert_eq!(
        ScoringWeights::from_table(Some(&table)),
        Err(WeightsError::MissingKey("industry"))
    );

    table.insert("industry".to_string(), 0.1);
    table.insert("location".to_string(), 0.1);
    table.insert("qualification".to_string(), 0.1);
    let weights = ScoringWeights::from_table(Some(&table)).unwrap();
    assert_eq!(weights.skills, 0.7);
    assert!((weights.sum() - 1.0).abs() < 1e-9);

    table.insert("distance".to_string(), 0.0);
    assert!(matches!(
        ScoringWeights::from_table(Some(&table)),
        Err(WeightsError::UnknownKey(_))
    ));
}

#[test]
fn test_posting_filter_skills_superset() {
    let posting = create_test_posting(1, &[PYTHON, DJANGO, SQL], Some(IT), "Cape Town", "Western Cape");

    let filters = PostingFilters {
        skills: vec![PYTHON, SQL],
        ..Default::default()
    };
    assert!(matches_posting_filters(&posting, &filters));

    let filters = PostingFilters {
        skills: vec![PYTHON, EXCEL],
        ..Default::default()
    };
    assert!(!matches_posting_filters(&posting, &filters));
}

#[test]
fn test_posting_filter_stipend_without_value() {
    let mut posting = create_test_posting(1, &[], None, "Cape Town", "Western Cape");
    posting.stipend = None;

    let min_only = PostingFilters {
        stipend_min: Some(3000.0),
        ..Default::default()
    };
    assert!(matches_posting_filters(&posting, &min_only));

    let max_only = PostingFilters {
        stipend_max: Some(8000.0),
        ..Default::default()
    };
    assert!(!matches_posting_filters(&posting, &max_only));
}

#[test]
fn test_posting_filter_zero_bound_ignored() {
    let posting = create_test_posting(1, &[], None, "Cape Town", "Western Cape");
    let filters = PostingFilters {
        stipend_max: Some(0.0),
        duration_min: Some(0),
        ..Default::default()
    };
    assert!(matches_posting_filters(&posting, &filters));
}

#[test]
fn test_posting_filter_location_and_dates() {
    let posting = create_test_posting(1, &[], None, "City of Cape Town", "Western Cape");

    let filters = PostingFilters {
        province: Some("Western Cape".to_string()),
        municipality: Some("cape town".to_string()),
        start_date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        start_date_to: NaiveDate::from_ymd_opt(2024, 3, 1),
        ..Default::default()
    };
    assert!(matches_posting_filters(&posting, &filters));

    let filters = PostingFilters {
        province: Some("western cape".to_string()),
        ..Default::default()
    };
    assert!(!matches_posting_filters(&posting, &filters));

    let filters = PostingFilters {
        start_date_from: NaiveDate::from_ymd_opt(2024, 2, 2),
        ..Default::default()
    };
    assert!(!matches_posting_filters(&posting, &filters));
}

#[test]
fn test_intern_filters() {
    let intern = create_test_intern(1, &[PYTHON, SQL], &[IT, FINANCE]);

    let filters = InternFilters {
        skills: vec![SQL],
        industries: vec![IT, FINANCE],
        has_education: true,
        ..Default::default()
    };
    assert!(matches_intern_filters(&intern, &filters));

    let filters = InternFilters {
        has_experience: true,
        ..Default::default()
    };
    assert!(!matches_intern_filters(&intern, &filters));
}

#[test]
fn test_mode_selection() {
    let none: [&str; 0] = [];
    assert_eq!(select_mode(none), ExploreMode::Ranked);
    assert_eq!(select_mode(["", ""]), ExploreMode::Ranked);
    assert_eq!(select_mode(["", "Gauteng"]), ExploreMode::Filtered);
}
