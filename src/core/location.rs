use crate::models::Location;

/// Score for an exact match on the subject's current location
pub const CURRENT_PLACE_SCORE: f64 = 100.0;
/// Score for an exact match on one of the subject's preferred locations
pub const PREFERRED_PLACE_SCORE: f64 = 80.0;
/// Score for sharing only the subject's current province
pub const CURRENT_PROVINCE_SCORE: f64 = 40.0;
/// Score for sharing only a preferred location's province
pub const PREFERRED_PROVINCE_SCORE: f64 = 30.0;

/// Case-insensitive comparison of free-text location fields
#[inline]
pub fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Calculate location score (0-100) for a target place against a subject
///
/// Rules are evaluated in priority order and the first one that holds wins:
/// 1. municipality and province equal the subject's current location
/// 2. municipality and province equal any preferred location
/// 3. province equals the subject's current province
/// 4. province equals any preferred location's province
pub fn location_score(
    target_municipality: &str,
    target_province: &str,
    current_municipality: &str,
    current_province: &str,
    preferred: &[Location],
) -> f64 {
    let same_province = |province: &str| same_text(province, target_province);
    let same_place =
        |municipality: &str, province: &str| same_text(municipality, target_municipality) && same_province(province);

    if same_place(current_municipality, current_province) {
        return CURRENT_PLACE_SCORE;
    }

    if preferred
        .iter()
        .any(|loc| same_place(&loc.municipality, &loc.province))
    {
        return PREFERRED_PLACE_SCORE;
    }

    if same_province(current_province) {
        return CURRENT_PROVINCE_SCORE;
    }

    if preferred.iter().any(|loc| same_province(&loc.province)) {
        return PREFERRED_PROVINCE_SCORE;
    }

    0.0
}
