use crate::models::{IndustryId, InternProfile, Posting, SkillId};
use chrono::NaiveDate;

/// Optional narrowing filters for posting search. Filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingFilters {
    /// Posting must require every listed skill
    pub skills: Vec<SkillId>,
    pub industry: Option<IndustryId>,
    /// Exact province
    pub province: Option<String>,
    /// Case-insensitive substring of the municipality
    pub municipality: Option<String>,
    /// Postings without a stipend pass this bound
    pub stipend_min: Option<f64>,
    /// Postings without a stipend fail this bound
    pub stipend_max: Option<f64>,
    pub duration_min: Option<u32>,
    pub duration_max: Option<u32>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
}

/// Optional narrowing filters for intern search. Filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternFilters {
    pub skills: Vec<SkillId>,
    pub industries: Vec<IndustryId>,
    pub province: Option<String>,
    pub municipality: Option<String>,
    pub has_experience: bool,
    pub has_education: bool,
}

/// Case-insensitive substring test
#[inline]
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Zero bounds do not constrain a search
#[inline]
fn bound<T: PartialEq + Default + Copy>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

#[inline]
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Check if a posting matches the free-text query
///
/// The query is matched against title, description, requirements,
/// responsibilities and company name.
#[inline]
pub fn matches_posting_query(posting: &Posting, query_lower: &str) -> bool {
    [
        posting.title.as_str(),
        posting.description.as_str(),
        posting.requirements.as_str(),
        posting.responsibilities.as_str(),
        posting.company_name.as_str(),
    ]
    .iter()
    .any(|field| contains_ci(field, query_lower))
}

/// Check if a posting satisfies every supplied filter
pub fn matches_posting_filters(posting: &Posting, filters: &PostingFilters) -> bool {
    if !filters
        .skills
        .iter()
        .all(|skill| posting.required_skill_ids.contains(skill))
    {
        return false;
    }

    if let Some(industry) = bound(filters.industry) {
        if posting.industry_id != Some(industry) {
            return false;
        }
    }

    if let Some(province) = non_empty(&filters.province) {
        if posting.province != province {
            return false;
        }
    }

    if let Some(municipality) = non_empty(&filters.municipality) {
        if !contains_ci(&posting.municipality, &municipality.to_lowercase()) {
            return false;
        }
    }

    if let Some(min) = bound(filters.stipend_min) {
        if matches!(posting.stipend, Some(stipend) if stipend < min) {
            return false;
        }
    }

    if let Some(max) = bound(filters.stipend_max) {
        match posting.stipend {
            Some(stipend) if stipend <= max => {}
            _ => return false,
        }
    }

    if let Some(min) = bound(filters.duration_min) {
        if posting.duration_months < min {
            return false;
        }
    }

    if let Some(max) = bound(filters.duration_max) {
        if posting.duration_months > max {
            return false;
        }
    }

    if let Some(from) = filters.start_date_from {
        if posting.start_date < from {
            return false;
        }
    }

    if let Some(to) = filters.start_date_to {
        if posting.start_date > to {
            return false;
        }
    }

    true
}

/// Check if an intern matches the free-text query
///
/// The query is matched against full name, username, email, bio and phone.
#[inline]
pub fn matches_intern_query(intern: &InternProfile, query_lower: &str) -> bool {
    [
        intern.full_name.as_str(),
        intern.username.as_str(),
        intern.email.as_str(),
        intern.bio.as_str(),
        intern.phone.as_str(),
    ]
    .iter()
    .any(|field| contains_ci(field, query_lower))
}

/// Check if an intern satisfies every supplied filter
pub fn matches_intern_filters(intern: &InternProfile, filters: &InternFilters) -> bool {
    if !filters.skills.iter().all(|id| intern.skill_ids.contains(id)) {
        return false;
    }

    if !filters
        .industries
        .iter()
        .all(|id| intern.industry_ids.contains(id))
    {
        return false;
    }

    if let Some(province) = non_empty(&filters.province) {
        if intern.current_province != province {
            return false;
        }
    }

    if let Some(municipality) = non_empty(&filters.municipality) {
        if !contains_ci(&intern.current_municipality, &municipality.to_lowercase()) {
            return false;
        }
    }

    if filters.has_experience && !intern.has_experience() {
        return false;
    }

    if filters.has_education && !intern.has_education() {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_posting(skills: &[i64], stipend: Option<f64>) -> Posting {
        Posting {
            id: 1,
            employer_id: 7,
            company_name: "Umoya Labs".to_string(),
            title: "Data Engineering Intern".to_string(),
            description: "Build pipelines".to_string(),
            requirements: "Python and SQL".to_string(),
            responsibilities: "Maintain ETL jobs".to_string(),
            required_skill_ids: skills.iter().copied().collect(),
            industry_id: Some(10),
            municipality: "City of Cape Town".to_string(),
            province: "Western Cape".to_string(),
            duration_months: 6,
            stipend,
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            application_deadline: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            is_active: true,
            is_published: true,
        }
    }

    fn create_test_intern() -> InternProfile {
        InternProfile {
            id: 1,
            username: "sipho_d".to_string(),
            email: "sipho@example.com".to_string(),
            email_confirmed: true,
            full_name: "Sipho Dlamini".to_string(),
            phone: "0821234567".to_string(),
            bio: "Aspiring data analyst".to_string(),
            current_municipality: "eThekwini".to_string(),
            current_province: "KwaZulu-Natal".to_string(),
            skill_ids: [1, 2, 3].into_iter().collect(),
            industry_ids: [10, 11].into_iter().collect(),
            preferred_locations: vec![],
            education_count: 1,
            experience_count: 0,
        }
    }

    #[test]
    fn test_skills_filter_requires_all() {
        let filters = PostingFilters {
            skills: vec![1, 2],
            ..Default::default()
        };

        assert!(matches_posting_filters(&create_test_posting(&[1, 2, 3], None), &filters));
        assert!(!matches_posting_filters(&create_test_posting(&[1], None), &filters));
        assert!(!matches_posting_filters(&create_test_posting(&[2], None), &filters));
    }

    #[test]
    fn test_stipend_bounds_with_missing_stipend() {
        let posting = create_test_posting(&[], None);

        let min = PostingFilters {
            stipend_min: Some(5000.0),
            ..Default::default()
        };
        assert!(matches_posting_filters(&posting, &min));

        let max = PostingFilters {
            stipend_max: Some(5000.0),
            ..Default::default()
        };
        assert!(!matches_posting_filters(&posting, &max));
    }

    #[test]
    fn test_stipend_bounds_with_stipend() {
        let posting = create_test_posting(&[], Some(4000.0));

        let min = PostingFilters {
            stipend_min: Some(5000.0),
            ..Default::default()
        };
        assert!(!matches_posting_filters(&posting, &min));

        let max = PostingFilters {
            stipend_max: Some(4000.0),
            ..Default::default()
        };
        assert!(matches_posting_filters(&posting, &max));
    }

    #[test]
    fn test_zero_bounds_are_ignored() {
        let posting = create_test_posting(&[], Some(4000.0));
        let filters = PostingFilters {
            stipend_max: Some(0.0),
            duration_max: Some(0),
            ..Default::default()
        };
        assert!(matches_posting_filters(&posting, &filters));
    }

    #[test]
    fn test_location_and_range_filters() {
        let posting = create_test_posting(&[], Some(4000.0));

        let ok = PostingFilters {
            industry: Some(10),
            province: Some("Western Cape".to_string()),
            municipality: Some("cape town".to_string()),
            duration_min: Some(3),
            duration_max: Some(6),
            start_date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            start_date_to: NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        };
        assert!(matches_posting_filters(&posting, &ok));

        let wrong_province = PostingFilters {
            province: Some("western cape".to_string()),
            ..Default::default()
        };
        assert!(!matches_posting_filters(&posting, &wrong_province));

        let too_late = PostingFilters {
            start_date_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        assert!(!matches_posting_filters(&posting, &too_late));

        let wrong_industry = PostingFilters {
            industry: Some(11),
            ..Default::default()
        };
        assert!(!matches_posting_filters(&posting, &wrong_industry));
    }

    #[test]
    fn test_zero_industry_is_ignored() {
        let filters = PostingFilters {
            industry: Some(0),
            ..Default::default()
        };

        assert!(matches_posting_filters(&create_test_posting(&[], None), &filters));

        let mut untagged = create_test_posting(&[], None);
        untagged.industry_id = None;
        assert!(matches_posting_filters(&untagged, &filters));
    }

    #[test]
    fn test_posting_query_fields() {
        let posting = create_test_posting(&[], None);
        assert!(matches_posting_query(&posting, "data engineering"));
        assert!(matches_posting_query(&posting, "umoya"));
        assert!(matches_posting_query(&posting, "etl"));
        assert!(matches_posting_query(&posting, "sql"));
        assert!(!matches_posting_query(&posting, "marketing"));
    }

    #[test]
    fn test_intern_query_fields() {
        let intern = create_test_intern();
        assert!(matches_intern_query(&intern, "dlamini"));
        assert!(matches_intern_query(&intern, "sipho_d"));
        assert!(matches_intern_query(&intern, "@example.com"));
        assert!(matches_intern_query(&intern, "analyst"));
        assert!(matches_intern_query(&intern, "082"));
        assert!(!matches_intern_query(&intern, "welder"));
    }

    #[test]
    fn test_intern_filters() {
        let intern = create_test_intern();

        let ok = InternFilters {
            skills: vec![1, 3],
            industries: vec![10],
            province: Some("KwaZulu-Natal".to_string()),
            municipality: Some("thekwini".to_string()),
            has_education: true,
            ..Default::default()
        };
        assert!(matches_intern_filters(&intern, &ok));

        let missing_industry = InternFilters {
            industries: vec![10, 12],
            ..Default::default()
        };
        assert!(!matches_intern_filters(&intern, &missing_industry));

        let needs_experience = InternFilters {
            has_experience: true,
            ..Default::default()
        };
        assert!(!matches_intern_filters(&intern, &needs_experience));
    }
}
