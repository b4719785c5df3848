//! Recommendation records and the generator capability.
//!
//! Generation itself is external; the core only defines the data it gets
//! back and the [`RecommendationSource`] seam a real generator plugs into.

use std::future::Future;

use foundation::ids::PlaceId;
use serde::{Deserialize, Serialize};

use crate::preferences::TravelPreferences;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedPlace {
    pub id: PlaceId,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub places: Vec<RecommendedPlace>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub places: Vec<RecommendedPlace>,
    pub itinerary: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationError {
    pub message: String,
}

impl RecommendationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RecommendationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "recommendation failed: {}", self.message)
    }
}

impl std::error::Error for RecommendationError {}

/// Anything that can turn preferences into a travel plan.
///
/// The call may take arbitrarily long; the planner session stays usable
/// while it is outstanding and matches the result back by ticket.
pub trait RecommendationSource {
    fn generate(
        &self,
        preferences: &TravelPreferences,
    ) -> impl Future<Output = Result<Recommendation, RecommendationError>> + Send;
}

/// Serves a fixed sample plan trimmed to the requested duration.
#[derive(Debug, Clone)]
pub struct CatalogRecommendationSource {
    plan: Recommendation,
}

impl Default for CatalogRecommendationSource {
    fn default() -> Self {
        Self {
            plan: sample_japan_plan(),
        }
    }
}

impl CatalogRecommendationSource {
    pub fn new(plan: Recommendation) -> Self {
        Self { plan }
    }

    pub fn plan_for(&self, preferences: &TravelPreferences) -> Recommendation {
        let days = preferences.duration_days as usize;
        Recommendation {
            places: self.plan.places.clone(),
            itinerary: self.plan.itinerary.iter().take(days).cloned().collect(),
        }
    }
}

impl RecommendationSource for CatalogRecommendationSource {
    fn generate(
        &self,
        preferences: &TravelPreferences,
    ) -> impl Future<Output = Result<Recommendation, RecommendationError>> + Send {
        let plan = self.plan_for(preferences);
        async move { Ok(plan) }
    }
}

fn place(id: &str, name: &str, description: &str, image: &str, tags: &[&str]) -> RecommendedPlace {
    RecommendedPlace {
        id: PlaceId::new(id),
        name: name.to_string(),
        country: "Japan".to_string(),
        description: description.to_string(),
        image: image.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn day(n: u32, place: &RecommendedPlace, activities: &[&str]) -> ItineraryDay {
    ItineraryDay {
        day: n,
        places: vec![place.clone()],
        activities: activities.iter().map(|a| a.to_string()).collect(),
    }
}

/// A seven-day Tokyo / Kyoto / Hakone loop.
pub fn sample_japan_plan() -> Recommendation {
    let kyoto = place(
        "kyoto",
        "Kyoto",
        "Ancient temples, traditional gardens, and cultural experiences in Japan's former capital.",
        "https://images.unsplash.com/photo-1493976040374-85c8e12f0c0e?w=600&q=80",
        &["cultural", "historical", "temples"],
    );
    let hakone = place(
        "hakone",
        "Hakone",
        "Hot springs resort town with views of Mount Fuji and Lake Ashi.",
        "https://images.unsplash.com/photo-1492571350019-22de08371fd3?w=600&q=80",
        &["nature", "hot springs", "relaxation"],
    );
    let tokyo = place(
        "tokyo",
        "Tokyo",
        "Ultramodern metropolis with historic temples, shopping districts, and vibrant nightlife.",
        "https://images.unsplash.com/photo-1503899036084-c55cdd92da26?w=600&q=80",
        &["urban", "shopping", "nightlife"],
    );

    let itinerary = vec![
        day(
            1,
            &tokyo,
            &[
                "Arrive in Tokyo",
                "Check-in at hotel",
                "Visit Shibuya Crossing",
                "Dinner at local izakaya",
            ],
        ),
        day(
            2,
            &tokyo,
            &[
                "Morning visit to Tsukiji Outer Market",
                "Explore Asakusa and Senso-ji Temple",
                "Afternoon in Akihabara",
                "Tokyo Tower at sunset",
            ],
        ),
        day(
            3,
            &kyoto,
            &[
                "Bullet train to Kyoto",
                "Check-in at ryokan",
                "Afternoon visit to Kinkaku-ji (Golden Pavilion)",
                "Evening stroll in Gion district",
            ],
        ),
        day(
            4,
            &kyoto,
            &[
                "Full day exploring Arashiyama area",
                "Bamboo Grove",
                "Monkey Park",
                "Traditional kaiseki dinner",
            ],
        ),
        day(
            5,
            &hakone,
            &[
                "Travel to Hakone",
                "Check-in at onsen resort",
                "Lake Ashi cruise",
                "Relax in hot springs",
            ],
        ),
        day(
            6,
            &hakone,
            &[
                "Hakone Open Air Museum",
                "Hakone Shrine",
                "Owakudani volcanic valley",
                "Final night in onsen",
            ],
        ),
        day(
            7,
            &tokyo,
            &[
                "Return to Tokyo",
                "Last-minute shopping",
                "Farewell dinner",
                "Prepare for departure",
            ],
        ),
    ];

    Recommendation {
        places: vec![kyoto, hakone, tokyo],
        itinerary,
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogRecommendationSource, RecommendationSource, sample_japan_plan};
    use crate::preferences::TravelPreferences;

    #[test]
    fn sample_plan_has_a_week_of_days() {
        let plan = sample_japan_plan();
        assert_eq!(plan.itinerary.len(), 7);
        assert!(plan.itinerary.iter().all(|d| d.places.len() == 1));
    }

    #[test]
    fn catalog_source_trims_to_duration() {
        let source = CatalogRecommendationSource::default();
        let prefs = TravelPreferences {
            duration_days: 3,
            ..TravelPreferences::default()
        };
        let plan = pollster::block_on(source.generate(&prefs)).unwrap();
        let days: Vec<u32> = plan.itinerary.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(plan.places.len(), 3);
    }

    #[test]
    fn long_trips_get_the_whole_plan() {
        let source = CatalogRecommendationSource::default();
        let prefs = TravelPreferences {
            duration_days: 30,
            ..TravelPreferences::default()
        };
        assert_eq!(source.plan_for(&prefs).itinerary.len(), 7);
    }
}
