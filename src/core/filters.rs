use crate::core::distance::haversine_distance;
use crate::models::{MatchFilters, UserProfile};

/// Check a candidate against every supplied hard filter.
///
/// Unset filter fields impose no constraint. Filters that need data the
/// candidate lacks (age, coordinates) keep the candidate rather than
/// excluding it.
pub fn passes_filters(user: &UserProfile, candidate: &UserProfile, filters: &MatchFilters) -> bool {
    // Inclusive age range
    if let (Some((min_age, max_age)), Some(age)) = (filters.age_range, candidate.age) {
        if age < min_age || age > max_age {
            return false;
        }
    }

    // Distance cap applies only when both sides have coordinates
    if let Some(max_km) = filters.max_distance_km {
        if let (Some(a), Some(b)) = (user.coordinates, candidate.coordinates) {
            if haversine_distance(a, b) > max_km {
                return false;
            }
        }
    }

    if filters.verified_only && !candidate.verified {
        return false;
    }

    // Travel styles: candidate must share at least one required style
    if !filters.travel_styles.is_empty() {
        let shares_style = filters
            .travel_styles
            .iter()
            .any(|style| candidate.travel_style.contains(style));
        if !shares_style {
            return false;
        }
    }

    // Destinations: any keyword as case-insensitive substring of the
    // candidate's next destination or home location
    if !filters.destinations.is_empty() {
        let destination = candidate.next_destination.to_lowercase();
        let location = candidate.location.to_lowercase();
        let mentions_destination = filters.destinations.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            destination.contains(&keyword) || location.contains(&keyword)
        });
        if !mentions_destination {
            return false;
        }
    }

    true
}
