//! View models handed to the templates.
//!
//! Snapshot text (city, condition, day names) is passed through untouched
//! and escaped by the template engine. Measurement strings come from the
//! [`Formatter`] and are trusted.

use serde::Serialize;
use skyglass_weather::{ForecastDay, WeatherSnapshot};

use crate::Formatter;

/// Element id of the drill-down back control
pub const BACK_ID: &str = "forecast-back";

pub fn day_tile_id(index: usize) -> String {
    format!("forecast-day-{index}")
}

/// What a click on a bound element does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open the hourly view for the forecast day at this position
    SelectDay(usize),
    /// Return to the daily view
    Back,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentView {
    pub icon_url: Option<String>,
    pub temperature: String,
    pub feels_like: Option<String>,
    pub pressure: String,
    pub humidity: String,
    pub wind_speed: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayTile {
    pub id: String,
    pub index: usize,
    pub name: String,
    pub condition: Option<String>,
    pub icon_url: Option<String>,
    pub max_temp: String,
    pub min_temp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyView {
    pub city: String,
    pub condition: String,
    pub current: CurrentView,
    pub days: Vec<DayTile>,
}

impl DailyView {
    pub fn build(snapshot: &WeatherSnapshot, fmt: &Formatter) -> Self {
        let current = CurrentView {
            icon_url: fmt.icon_url(&snapshot.icon),
            temperature: fmt.temperature(snapshot.temperature),
            feels_like: snapshot
                .feels_like
                .filter(|v| v.is_finite())
                .map(|v| fmt.temperature(Some(v))),
            pressure: fmt.pressure(snapshot.pressure),
            humidity: fmt.humidity(snapshot.humidity),
            wind_speed: fmt.wind_speed(snapshot.wind_speed),
            visibility: fmt.visibility(snapshot.visibility),
            sunrise: fmt.time(snapshot.sunrise),
            sunset: fmt.time(snapshot.sunset),
        };

        let days = snapshot
            .forecast
            .iter()
            .enumerate()
            .map(|(index, day)| DayTile {
                id: day_tile_id(index),
                index,
                name: day.name.clone(),
                condition: day.condition.clone().filter(|c| !c.is_empty()),
                icon_url: fmt.icon_url(&day.icon),
                max_temp: fmt.temperature(day.max_temp),
                min_temp: fmt.temperature(day.min_temp),
            })
            .collect();

        Self {
            city: snapshot.city.clone(),
            condition: snapshot.condition.clone(),
            current,
            days,
        }
    }

    /// One `SelectDay` per tile, by position
    pub fn bindings(&self) -> Vec<(String, Action)> {
        self.days
            .iter()
            .map(|d| (d.id.clone(), Action::SelectDay(d.index)))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HourTile {
    pub time: String,
    pub icon_url: Option<String>,
    pub temperature: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlyView {
    pub back_id: &'static str,
    pub day_name: String,
    pub hours: Vec<HourTile>,
}

impl HourlyView {
    pub fn build(day: &ForecastDay, fmt: &Formatter) -> Self {
        let hours = day
            .sorted_hours()
            .into_iter()
            .map(|h| HourTile {
                time: fmt.time(h.dt),
                icon_url: fmt.icon_url(&h.icon),
                temperature: fmt.temperature(h.temperature),
            })
            .collect();

        Self {
            back_id: BACK_ID,
            day_name: day.name.clone(),
            hours,
        }
    }

    pub fn bindings(&self) -> Vec<(String, Action)> {
        vec![(self.back_id.to_string(), Action::Back)]
    }
}
