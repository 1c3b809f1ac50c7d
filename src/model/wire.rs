// File: ./src/model/wire.rs
// Typed view of the GraphQL response; decoded once, never field-probed downstream.
use crate::model::date::{Conversion, DateTriple, Direction};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DatesResponse {
    #[serde(default)]
    pub data: Option<DatesData>,
}

#[derive(Debug, Deserialize)]
pub struct DatesData {
    #[serde(default)]
    pub dates: Vec<DateRecord>,
}

/// One record from the `dates` array. The service only returns the fields the
/// query asked for, so everything is optional here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRecord {
    pub ad_year: Option<i32>,
    pub ad_month: Option<u32>,
    pub ad_day: Option<u32>,
    pub bs_year: Option<i32>,
    pub bs_month: Option<u32>,
    pub bs_day: Option<u32>,
}

impl DateRecord {
    /// The converted date for the given direction, if all its fields are present.
    pub fn converted(&self, direction: Direction) -> Option<DateTriple> {
        let (year, month, day) = match direction {
            Direction::AdToBs => (self.bs_year, self.bs_month, self.bs_day),
            Direction::BsToAd => (self.ad_year, self.ad_month, self.ad_day),
        };
        Some(DateTriple::new(year?, month?, day?))
    }
}

impl DatesResponse {
    /// First matching record wins; an empty or missing array is a clean NoMatch.
    pub fn into_conversion(self, direction: Direction) -> Conversion {
        match self.data.and_then(|d| d.dates.into_iter().next()) {
            Some(record) => match record.converted(direction) {
                Some(date) => Conversion::Matched(date),
                None => Conversion::NoMatch,
            },
            None => Conversion::NoMatch,
        }
    }
}
