//! Location and venue aggregation service
//!
//! Turns flat rows into the grouped views the lookup endpoints serve:
//! venues grouped by city, the distinct city list, and the states /
//! cities-by-state / popular-cities summary.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::error;

use crate::database::{LocationRepository, VenueRepository};
use crate::models::location::Location;
use crate::models::venue::Venue;
use crate::utils::errors::AppError;

/// Number of cities reported as "popular". Popularity is defined as the
/// first N distinct cities in ascending alphabetical order, matching the
/// ordering rule of the sibling city list endpoint.
pub const POPULAR_CITY_LIMIT: usize = 15;

/// Response payload of the locations summary endpoint.
///
/// On a data-store failure the collections are empty and `error` carries
/// the message; the request is answered rather than failed.
#[derive(Debug, Clone, Serialize)]
pub struct LocationsView {
    pub states: Vec<String>,
    pub cities_by_state: BTreeMap<String, Vec<String>>,
    pub popular_cities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LocationsView {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct AggregationService {
    venues: VenueRepository,
    locations: LocationRepository,
}

impl AggregationService {
    pub fn new(venues: VenueRepository, locations: LocationRepository) -> Self {
        Self { venues, locations }
    }

    /// All venues grouped by city. Keys are city names in ascending order;
    /// each value keeps the by-name ordering of the query. Cities without
    /// venues do not appear.
    pub async fn venues_by_city(&self) -> Result<BTreeMap<String, Vec<Venue>>, AppError> {
        let venues = self.venues.list_ordered_by_city_name().await?;
        Ok(group_venues_by_city(venues))
    }

    /// Distinct city values from the venue table, sorted ascending.
    pub async fn cities_list(&self) -> Result<Vec<String>, AppError> {
        self.venues.distinct_cities().await
    }

    /// States, cities grouped by state, and the popular-cities prefix.
    ///
    /// A store failure is absorbed here: the caller gets the empty
    /// fallback view with the error message instead of an `Err`.
    pub async fn locations(&self) -> LocationsView {
        match self.locations.list_all().await {
            Ok(rows) => build_locations_view(&rows),
            Err(err) => {
                error!(error = %err, "Failed to fetch locations");
                LocationsView {
                    states: Vec::new(),
                    cities_by_state: BTreeMap::new(),
                    popular_cities: Vec::new(),
                    error: Some(format!("Failed to fetch locations: {err}")),
                }
            }
        }
    }
}

/// Group venues by city in a single linear pass.
///
/// The input is expected in (city, name) order; the map preserves that
/// per-city ordering and the BTreeMap keeps keys sorted.
pub fn group_venues_by_city(venues: Vec<Venue>) -> BTreeMap<String, Vec<Venue>> {
    let mut grouped: BTreeMap<String, Vec<Venue>> = BTreeMap::new();
    for venue in venues {
        grouped.entry(venue.city.clone()).or_default().push(venue);
    }
    grouped
}

/// Group location rows into state -> sorted city list.
pub fn group_cities_by_state(locations: &[Location]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for location in locations {
        grouped
            .entry(location.state.clone())
            .or_default()
            .push(location.city.clone());
    }
    for cities in grouped.values_mut() {
        cities.sort();
    }
    grouped
}

/// First `limit` distinct cities in ascending alphabetical order.
pub fn popular_cities(locations: &[Location], limit: usize) -> Vec<String> {
    let mut cities: Vec<String> = locations.iter().map(|l| l.city.clone()).collect();
    cities.sort();
    cities.dedup();
    cities.truncate(limit);
    cities
}

fn build_locations_view(rows: &[Location]) -> LocationsView {
    let cities_by_state = group_cities_by_state(rows);
    let states = cities_by_state.keys().cloned().collect();
    let popular = popular_cities(rows, POPULAR_CITY_LIMIT);

    LocationsView {
        states,
        cities_by_state,
        popular_cities: popular,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn venue(id: i64, name: &str, city: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            venue_type: "Banquet Hall".to_string(),
            location: format!("Central {city}"),
            city: city.to_string(),
            price: "₹30,000 - ₹60,000".to_string(),
            rating: 4.5,
            reviews: 100,
            image: "https://example.com/venue.jpg".to_string(),
            suitability: Json(vec!["Weddings".to_string()]),
            badges: Json(vec!["AC".to_string()]),
            created_at: Utc::now(),
        }
    }

    fn location(id: i64, state: &str, city: &str) -> Location {
        Location {
            id,
            state: state.to_string(),
            city: city.to_string(),
        }
    }

    #[test]
    fn groups_venues_by_city_keeping_order() {
        // Rows arrive in (city, name) order, as the query produces them.
        let venues = vec![
            venue(1, "Grand Ballroom Palace", "Mumbai"),
            venue(2, "Sunset Garden Resort", "Mumbai"),
            venue(3, "Royal Gardens", "Pune"),
        ];

        let grouped = group_venues_by_city(venues);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["Mumbai"].len(), 2);
        assert_eq!(grouped["Pune"].len(), 1);
        assert_eq!(grouped["Mumbai"][0].name, "Grand Ballroom Palace");
        assert_eq!(grouped["Mumbai"][1].name, "Sunset Garden Resort");
    }

    #[test]
    fn grouped_keys_equal_distinct_cities() {
        let venues = vec![
            venue(1, "A", "Mumbai"),
            venue(2, "B", "Pune"),
            venue(3, "C", "Mumbai"),
            venue(4, "D", "Chennai"),
        ];

        let grouped = group_venues_by_city(venues);
        let keys: Vec<&String> = grouped.keys().collect();

        assert_eq!(keys, ["Chennai", "Mumbai", "Pune"]);
    }

    #[test]
    fn empty_venue_table_groups_to_empty_map() {
        assert!(group_venues_by_city(Vec::new()).is_empty());
    }

    #[test]
    fn cities_by_state_sorts_cities_within_state() {
        let rows = vec![
            location(1, "Maharashtra", "Pune"),
            location(2, "Maharashtra", "Mumbai"),
            location(3, "Delhi", "Delhi"),
        ];

        let grouped = group_cities_by_state(&rows);

        assert_eq!(grouped["Maharashtra"], ["Mumbai", "Pune"]);
        assert_eq!(grouped["Delhi"], ["Delhi"]);
        let states: Vec<&String> = grouped.keys().collect();
        assert_eq!(states, ["Delhi", "Maharashtra"]);
    }

    #[test]
    fn popular_cities_is_prefix_of_sorted_distinct_cities() {
        let kerala = [
            "Thiruvananthapuram", "Kochi", "Kozhikode", "Thrissur", "Kollam",
            "Kannur", "Kottayam", "Alappuzha", "Palakkad", "Pathanamthitta",
            "Idukki", "Wayanad", "Kasaragod", "Malappuram", "Ernakulam",
        ];
        let mut rows: Vec<Location> = kerala
            .iter()
            .enumerate()
            .map(|(i, city)| location(i as i64 + 1, "Kerala", city))
            .collect();
        rows.push(location(100, "Delhi", "Delhi"));

        let popular = popular_cities(&rows, POPULAR_CITY_LIMIT);

        assert_eq!(popular.len(), POPULAR_CITY_LIMIT);

        let mut all_sorted: Vec<String> = rows.iter().map(|l| l.city.clone()).collect();
        all_sorted.sort();
        all_sorted.dedup();
        assert_eq!(popular, all_sorted[..POPULAR_CITY_LIMIT]);
        // "Delhi" sorts ahead of most Kerala cities, so it makes the cut.
        assert!(popular.contains(&"Delhi".to_string()));
    }

    #[test]
    fn popular_cities_dedups_across_states() {
        let rows = vec![
            location(1, "Delhi", "Delhi"),
            location(2, "Goa", "Goa"),
            location(3, "Maharashtra", "Mumbai"),
        ];

        let popular = popular_cities(&rows, POPULAR_CITY_LIMIT);

        assert_eq!(popular, ["Delhi", "Goa", "Mumbai"]);
    }

    #[test]
    fn locations_view_reports_sorted_states() {
        let rows = vec![
            location(1, "Kerala", "Kochi"),
            location(2, "Delhi", "Delhi"),
            location(3, "Kerala", "Thrissur"),
        ];

        let view = build_locations_view(&rows);

        assert_eq!(view.states, ["Delhi", "Kerala"]);
        assert_eq!(view.cities_by_state["Kerala"], ["Kochi", "Thrissur"]);
        assert!(view.error.is_none());
        assert!(!view.is_fallback());
    }

    #[test]
    fn fallback_view_serializes_with_error_and_empty_collections() {
        let view = LocationsView {
            states: Vec::new(),
            cities_by_state: BTreeMap::new(),
            popular_cities: Vec::new(),
            error: Some("Failed to fetch locations: connection refused".to_string()),
        };

        let body = serde_json::to_value(&view).unwrap();
        assert_eq!(body["states"], serde_json::json!([]));
        assert_eq!(body["cities_by_state"], serde_json::json!({}));
        assert_eq!(body["popular_cities"], serde_json::json!([]));
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }

    #[test]
    fn healthy_view_omits_error_field() {
        let view = build_locations_view(&[location(1, "Goa", "Goa")]);
        let body = serde_json::to_value(&view).unwrap();
        assert!(body.get("error").is_none());
    }
}
