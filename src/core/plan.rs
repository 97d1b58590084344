use serde::{Deserialize, Serialize};

/// A generated itinerary.
///
/// The backend assembles this from several agents, so nested fields are kept
/// optional and unknown fields are ignored; only the identity of the trip is
/// required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub travel_days: u32,

    /// Short summary of the whole trip
    pub overview: Option<String>,

    #[serde(default)]
    pub days: Vec<DayPlan>,

    /// General advice (packing, local customs, ...)
    pub tips: Option<Vec<String>>,
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,

    /// Calendar date (YYYY-MM-DD)
    pub date: String,

    /// Forecast summary for the day
    pub weather: Option<String>,

    #[serde(default)]
    pub attractions: Vec<Attraction>,

    #[serde(default)]
    pub meals: Meals,

    /// Recommended hotel for the night
    pub hotel: Option<Hotel>,

    /// How to move between the day's stops
    pub transport_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Suggested time to spend (e.g. "2h")
    pub visit_duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub address: Option<String>,
    pub price_range: Option<String>,
    /// Why this hotel was picked
    pub reason: Option<String>,
}

impl TripPlan {
    /// Total number of attractions across all days
    pub fn attraction_count(&self) -> usize {
        self.days.iter().map(|d| d.attractions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_planner_payload() {
        let json = r#"{
            "city": "Beijing",
            "start_date": "2026-01-19",
            "end_date": "2026-01-21",
            "travel_days": 3,
            "overview": "Three days of history and food",
            "days": [
                {
                    "day": 1,
                    "date": "2026-01-19",
                    "weather": "Sunny, -2 to 6 C",
                    "attractions": [
                        {
                            "name": "Forbidden City",
                            "description": "Ming and Qing imperial palace",
                            "latitude": 39.9163,
                            "longitude": 116.3972,
                            "visit_duration": "3h"
                        },
                        {
                            "name": "Jingshan Park",
                            "latitude": 39.9250,
                            "longitude": 116.3955
                        }
                    ],
                    "meals": {
                        "breakfast": "Hotel breakfast",
                        "lunch": "Siji Minfu roast duck",
                        "dinner": "Donghuamen snacks"
                    },
                    "hotel": {
                        "name": "Wangfujing Courtyard Inn",
                        "address": "12 Dengshikou St",
                        "price_range": "350-450 CNY",
                        "reason": "Walking distance to day 2 sights"
                    },
                    "transport_note": "Metro line 1, then walk"
                }
            ],
            "tips": ["Book palace tickets a week ahead"]
        }"#;

        let plan: TripPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.city, "Beijing");
        assert_eq!(plan.travel_days, 3);
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.attraction_count(), 2);

        let day = &plan.days[0];
        assert_eq!(day.attractions[0].name, "Forbidden City");
        assert_eq!(day.attractions[1].description, None);
        assert_eq!(day.meals.lunch.as_deref(), Some("Siji Minfu roast duck"));
        assert_eq!(
            day.hotel.as_ref().map(|h| h.name.as_str()),
            Some("Wangfujing Courtyard Inn")
        );
    }

    #[test]
    fn tolerates_sparse_days_and_unknown_fields() {
        let json = r#"{
            "city": "Xiamen",
            "start_date": "2026-05-01",
            "end_date": "2026-05-01",
            "travel_days": 1,
            "days": [
                {"day": 1, "date": "2026-05-01", "mood": "relaxed"}
            ],
            "budget_estimate": "1200 CNY"
        }"#;

        let plan: TripPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.attraction_count(), 0);
        assert!(plan.days[0].meals.breakfast.is_none());
        assert!(plan.days[0].hotel.is_none());
        assert!(plan.overview.is_none());
    }
}
