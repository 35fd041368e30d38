use jiff::civil::Time;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::location::Location;
use crate::utils::time;

/// One published opening span. Days follow the Google convention,
/// 0 = Sunday through 6 = Saturday.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct OpeningPeriod {
    pub day: i8,

    #[serde(with = "time::hhmm")]
    pub open: Time,

    #[serde(with = "time::hhmm")]
    pub close: Time,
}

type OpeningPeriods = SmallVec<[OpeningPeriod; 7]>;

/// A place as returned by discovery, before it is scheduled.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PlaceCandidate {
    place_id: String,
    name: String,
    address: String,
    location: Location,
    types: Vec<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    price_level: Option<u8>,
    opening_hours: OpeningPeriods,
    photo_reference: Option<String>,
    business_status: Option<String>,
    website: Option<String>,
    editorial_summary: Option<String>,
    suggested_duration_minutes: Option<i64>,
}

impl PlaceCandidate {
    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn user_ratings_total(&self) -> Option<u32> {
        self.user_ratings_total
    }

    pub fn price_level(&self) -> Option<u8> {
        self.price_level
    }

    pub fn opening_hours(&self) -> &[OpeningPeriod] {
        &self.opening_hours
    }

    pub fn photo_reference(&self) -> Option<&str> {
        self.photo_reference.as_deref()
    }

    pub fn business_status(&self) -> Option<&str> {
        self.business_status.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn editorial_summary(&self) -> Option<&str> {
        self.editorial_summary.as_deref()
    }

    pub fn suggested_duration_minutes(&self) -> Option<i64> {
        self.suggested_duration_minutes
    }

    /// Written once by the enrichment step, after discovery.
    pub fn set_suggested_duration_minutes(&mut self, minutes: i64) {
        self.suggested_duration_minutes = Some(minutes);
    }

    pub fn hours_for_day(&self, day: i8) -> Option<&OpeningPeriod> {
        self.opening_hours.iter().find(|period| period.day == day)
    }
}

#[derive(Default)]
pub struct PlaceCandidateBuilder {
    place_id: Option<String>,
    name: Option<String>,
    address: Option<String>,
    location: Option<Location>,
    types: Option<Vec<String>>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    price_level: Option<u8>,
    opening_hours: Option<Vec<OpeningPeriod>>,
    photo_reference: Option<String>,
    business_status: Option<String>,
    website: Option<String>,
    editorial_summary: Option<String>,
    suggested_duration_minutes: Option<i64>,
}

impl PlaceCandidateBuilder {
    pub fn set_place_id(&mut self, place_id: String) -> &mut PlaceCandidateBuilder {
        self.place_id = Some(place_id);
        self
    }

    pub fn set_name(&mut self, name: String) -> &mut PlaceCandidateBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_address(&mut self, address: String) -> &mut PlaceCandidateBuilder {
        self.address = Some(address);
        self
    }

    pub fn set_location(&mut self, location: Location) -> &mut PlaceCandidateBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_types(&mut self, types: Vec<String>) -> &mut PlaceCandidateBuilder {
        self.types = Some(types);
        self
    }

    pub fn set_rating(&mut self, rating: f64) -> &mut PlaceCandidateBuilder {
        self.rating = Some(rating);
        self
    }

    pub fn set_user_ratings_total(&mut self, total: u32) -> &mut PlaceCandidateBuilder {
        self.user_ratings_total = Some(total);
        self
    }

    pub fn set_price_level(&mut self, price_level: u8) -> &mut PlaceCandidateBuilder {
        self.price_level = Some(price_level);
        self
    }

    pub fn set_opening_period(&mut self, period: OpeningPeriod) -> &mut PlaceCandidateBuilder {
        if let Some(opening_hours) = &mut self.opening_hours {
            opening_hours.push(period);
        } else {
            self.opening_hours = Some(vec![period]);
        }

        self
    }

    pub fn set_opening_hours(&mut self, periods: Vec<OpeningPeriod>) -> &mut PlaceCandidateBuilder {
        self.opening_hours = Some(periods);
        self
    }

    pub fn set_photo_reference(&mut self, reference: String) -> &mut PlaceCandidateBuilder {
        self.photo_reference = Some(reference);
        self
    }

    pub fn set_business_status(&mut self, status: String) -> &mut PlaceCandidateBuilder {
        self.business_status = Some(status);
        self
    }

    pub fn set_website(&mut self, website: String) -> &mut PlaceCandidateBuilder {
        self.website = Some(website);
        self
    }

    pub fn set_editorial_summary(&mut self, summary: String) -> &mut PlaceCandidateBuilder {
        self.editorial_summary = Some(summary);
        self
    }

    pub fn set_suggested_duration_minutes(&mut self, minutes: i64) -> &mut PlaceCandidateBuilder {
        self.suggested_duration_minutes = Some(minutes);
        self
    }

    pub fn build(self) -> PlaceCandidate {
        PlaceCandidate {
            place_id: self.place_id.expect("Expected place id"),
            name: self.name.expect("Expected place name"),
            address: self.address.unwrap_or_default(),
            location: self.location.expect("Expected place location"),
            types: self.types.unwrap_or_default(),
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            price_level: self.price_level,
            opening_hours: SmallVec::from_vec(self.opening_hours.unwrap_or_default()),
            photo_reference: self.photo_reference,
            business_status: self.business_status,
            website: self.website,
            editorial_summary: self.editorial_summary,
            suggested_duration_minutes: self.suggested_duration_minutes,
        }
    }
}
