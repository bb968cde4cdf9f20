use crate::core::location::location_score;
use crate::models::{EmployerProfile, InternProfile, Posting, ScoreBreakdown, ScoringWeights};

/// Sub-score used when a factor's defining attribute is absent on one side
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Skill count at which the intern-for-employer skills factor saturates
const SKILL_VOLUME_CAP: f64 = 10.0;

/// Calculate the match score (0-100) of a posting for an intern
///
/// Scoring formula:
/// score = round2(
///     skills_score * w.skills +               # share of required skills the intern has
///     industry_score * w.industry +           # posting industry among intern's industries
///     location_score * w.location +           # current/preferred location ladder
///     qualification_score * w.qualification   # education and experience records
/// )
pub fn score_posting_for_intern(
    posting: &Posting,
    intern: &InternProfile,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        skills: posting_skills_score(posting, intern),
        industry: posting_industry_score(posting, intern),
        location: location_score(
            &posting.municipality,
            &posting.province,
            &intern.current_municipality,
            &intern.current_province,
            &intern.preferred_locations,
        ),
        qualification: qualification_score(intern),
    };

    (combine(&breakdown, weights), breakdown)
}

/// Calculate the match score (0-100) of an intern for an employer
///
/// There is no posting in scope here, so the skills factor rewards skill
/// volume and the qualification factor weighs education and experience
/// records evenly.
pub fn score_intern_for_employer(
    intern: &InternProfile,
    employer: &EmployerProfile,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        skills: skill_volume_score(intern),
        industry: employer_industry_score(intern, employer),
        location: location_score(
            &employer.municipality,
            &employer.province,
            &intern.current_municipality,
            &intern.current_province,
            &intern.preferred_locations,
        ),
        qualification: experience_score(intern),
    };

    (combine(&breakdown, weights), breakdown)
}

/// Weighted sum of the four sub-scores, clamped to [0, 100] and rounded to 2 decimals
#[inline]
pub fn combine(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    let total = breakdown.skills * weights.skills
        + breakdown.industry * weights.industry
        + breakdown.location * weights.location
        + breakdown.qualification * weights.qualification;

    round2(total.clamp(0.0, 100.0))
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of the posting's required skills the intern has (0-100)
#[inline]
fn posting_skills_score(posting: &Posting, intern: &InternProfile) -> f64 {
    let required = &posting.required_skill_ids;
    if required.is_empty() {
        return NEUTRAL_SCORE;
    }

    let matching = required.intersection(&intern.skill_ids).count();
    matching as f64 / required.len() as f64 * 100.0
}

/// Skill volume proxy, 10 or more skills scores 100
#[inline]
fn skill_volume_score(intern: &InternProfile) -> f64 {
    let count = intern.skill_ids.len();
    if count == 0 {
        return 0.0;
    }

    (count as f64 / SKILL_VOLUME_CAP * 100.0).min(100.0)
}

#[inline]
fn posting_industry_score(posting: &Posting, intern: &InternProfile) -> f64 {
    match posting.industry_id {
        None => NEUTRAL_SCORE,
        Some(id) if intern.industry_ids.contains(&id) => 100.0,
        Some(_) => 0.0,
    }
}

/// Share of the employer's industries the intern is interested in (0-100)
#[inline]
fn employer_industry_score(intern: &InternProfile, employer: &EmployerProfile) -> f64 {
    if intern.industry_ids.is_empty() || employer.industry_ids.is_empty() {
        return NEUTRAL_SCORE;
    }

    let shared = intern.industry_ids.intersection(&employer.industry_ids).count();
    (shared as f64 / employer.industry_ids.len() as f64 * 100.0).min(100.0)
}

/// Qualification score against a posting
///
/// 50 for any education, 20 more for a second record, 30 for any work
/// experience, capped at 100.
#[inline]
fn qualification_score(intern: &InternProfile) -> f64 {
    let mut score = 0.0;

    if intern.education_count >= 1 {
        score += 50.0;
        if intern.education_count >= 2 {
            score += 20.0;
        }
    }

    if intern.experience_count >= 1 {
        score += 30.0;
    }

    f64::min(score, 100.0)
}

/// Experience score without a posting in scope
///
/// Education and work experience each contribute up to 50: 30 for the first
/// record and 20 for a second one.
#[inline]
fn experience_score(intern: &InternProfile) -> f64 {
    let tier = |count: u32| -> f64 {
        match count {
            0 => 0.0,
            1 => 30.0,
            _ => 50.0,
        }
    };

    f64::min(tier(intern.education_count) + tier(intern.experience_count), 100.0)
}
