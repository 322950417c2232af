use crate::models::normalize_code;
use crate::models::schedule::parse_departure_date;
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FlightSearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: Option<String>,
}

impl FlightSearchQuery {
    pub fn new(origin: &str, destination: &str, departure_date: Option<&str>) -> Self {
        FlightSearchQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: departure_date.map(str::to_string),
        }
    }
}

/// Normalized, validated search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: Option<NaiveDate>,
}

impl TryFrom<&FlightSearchQuery> for SearchCriteria {
    type Error = AppError;

    fn try_from(query: &FlightSearchQuery) -> AppResult<Self> {
        let origin = normalize_code(&query.origin);
        let destination = normalize_code(&query.destination);

        let valid_code = |code: &str| !code.is_empty() && code.chars().count() <= 8;
        if !valid_code(&origin) || !valid_code(&destination) || origin == destination {
            return Err(AppError::validation("invalid route airports"));
        }

        // A blank date means "any day"
        let departure_date = match query.departure_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_departure_date(raw)?),
            _ => None,
        };

        Ok(SearchCriteria {
            origin,
            destination,
            departure_date,
        })
    }
}

/// A bookable direct schedule with its live seat inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FlightOption {
    pub schedule_id: i64,
    pub route_code: String,
    pub origin_code: String,
    pub destination_code: String,
    pub airplane_code: String,
    pub departure_date: NaiveDate,
    pub seats_available: i64,
    pub total_seats: i32,
}

/// Two legs connected through `intermediate_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TransitOption {
    pub first_leg: FlightOption,
    pub second_leg: FlightOption,
    pub intermediate_code: String,
    pub total_available: i64,
}

impl TransitOption {
    pub fn connect(first_leg: FlightOption, second_leg: FlightOption) -> Self {
        TransitOption {
            intermediate_code: first_leg.destination_code.clone(),
            total_available: first_leg.seats_available.min(second_leg.seats_available),
            first_leg,
            second_leg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_normalizes_codes_and_date() {
        let query = FlightSearchQuery::new(" cgk", "dps ", Some(" 2025-01-01 "));
        let criteria = SearchCriteria::try_from(&query).unwrap();
        assert_eq!(criteria.origin, "CGK");
        assert_eq!(criteria.destination, "DPS");
        assert_eq!(criteria.departure_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_blank_date_means_any_day() {
        let query = FlightSearchQuery::new("CGK", "DPS", Some("   "));
        assert_eq!(SearchCriteria::try_from(&query).unwrap().departure_date, None);
    }

    #[test]
    fn test_invalid_criteria() {
        let same = FlightSearchQuery::new("cgk", "CGK", None);
        assert_eq!(
            SearchCriteria::try_from(&same),
            Err(AppError::validation("invalid route airports"))
        );
        let long = FlightSearchQuery::new("ABCDEFGHI", "CGK", None);
        assert!(SearchCriteria::try_from(&long).is_err());
        let blank = FlightSearchQuery::new(" ", "CGK", None);
        assert!(SearchCriteria::try_from(&blank).is_err());
        let bad_date = FlightSearchQuery::new("CGK", "DPS", Some("2025/01/01"));
        assert_eq!(
            SearchCriteria::try_from(&bad_date),
            Err(AppError::validation("invalid departure date"))
        );
    }
}
