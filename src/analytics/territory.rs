//! # Territory Resolver
//!
//! Maps a free-text origin such as `"Los Angeles, CA"` to a coarse sales
//! territory. Both steps are total: malformed origins and unmapped states
//! land in `Territory::Other` instead of erroring.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Territory;

/// Trailing `, ST` token. Whitespace after the comma is optional.
static STATE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r",\s*([A-Z]{2})$").expect("state suffix pattern is valid")
});

/// Served states only. Anything missing here resolves to `Other`.
static STATE_TERRITORIES: Lazy<HashMap<&'static str, Territory>> = Lazy::new(|| {
    let regions: [(Territory, &[&str]); 6] = [
        (Territory::Pacific, &["CA", "OR", "WA"]),
        (Territory::Mountain, &["CO", "UT", "NV", "ID", "MT", "WY"]),
        (Territory::Southwest, &["AZ", "NM", "TX", "OK"]),
        (Territory::Midwest, &["IL", "OH", "MI", "IN", "WI", "MN", "MO", "IA"]),
        (Territory::Northeast, &["NY", "NJ", "PA", "MA", "CT"]),
        (Territory::Southeast, &["FL", "GA", "NC", "SC", "TN", "VA", "AL"]),
    ];

    regions
        .iter()
        .flat_map(|(territory, states)| states.iter().map(move |state| (*state, *territory)))
        .collect()
});

/// Extract the two-letter state code from an origin city string.
///
/// Returns `None` for absent or empty input, or when the string does not end
/// in a comma-separated uppercase state code.
pub fn extract_state(origin_city: Option<&str>) -> Option<String> {
    let origin = origin_city?;
    STATE_SUFFIX
        .captures(origin)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve a state code to its territory. Unknown or missing codes are `Other`.
pub fn resolve_territory(state: Option<&str>) -> Territory {
    match state.and_then(|code| STATE_TERRITORIES.get(code)) {
        Some(territory) => *territory,
        None => Territory::Other,
    }
}

/// Territory for a deal origin, composing [`extract_state`] and [`resolve_territory`].
pub fn territory_for(origin_city: Option<&str>) -> Territory {
    resolve_territory(extract_state(origin_city).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_state_with_or_without_space() {
        assert_eq!(extract_state(Some("Los Angeles, CA")), Some("CA".to_string()));
        assert_eq!(extract_state(Some("Portland,OR")), Some("OR".to_string()));
        assert_eq!(extract_state(Some("Dallas,  TX")), Some("TX".to_string()));
    }

    #[test]
    fn extract_state_rejects_malformed_origins() {
        assert_eq!(extract_state(Some("Los Angeles")), None);
        assert_eq!(extract_state(Some("")), None);
        assert_eq!(extract_state(None), None);
        assert_eq!(extract_state(Some("Seattle, wa")), None);
        assert_eq!(extract_state(Some("Austin, TEX")), None);
        assert_eq!(extract_state(Some("Austin TX")), None);
    }

    #[test]
    fn resolves_mapped_states() {
        assert_eq!(resolve_territory(Some("CA")), Territory::Pacific);
        assert_eq!(resolve_territory(Some("CO")), Territory::Mountain);
        assert_eq!(resolve_territory(Some("TX")), Territory::Southwest);
        assert_eq!(resolve_territory(Some("IL")), Territory::Midwest);
        assert_eq!(resolve_territory(Some("NY")), Territory::Northeast);
        assert_eq!(resolve_territory(Some("FL")), Territory::Southeast);
    }

    #[test]
    fn unmapped_or_missing_state_is_other() {
        assert_eq!(resolve_territory(Some("HI")), Territory::Other);
        assert_eq!(resolve_territory(Some("ZZ")), Territory::Other);
        assert_eq!(resolve_territory(None), Territory::Other);
    }

    #[test]
    fn territory_for_degrades_gracefully() {
        assert_eq!(territory_for(Some("Chicago, IL")), Territory::Midwest);
        assert_eq!(territory_for(Some("Honolulu, HI")), Territory::Other);
        assert_eq!(territory_for(Some("somewhere")), Territory::Other);
        assert_eq!(territory_for(None), Territory::Other);
    }
}
