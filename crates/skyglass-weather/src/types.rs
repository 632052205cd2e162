use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete weather payload as delivered by the data warehouse.
///
/// Every field is optional on the wire; missing measurements stay `None`
/// and are shown as placeholders instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherSnapshot {
    pub city: String,
    pub condition: String,
    /// Icon code, e.g. `10d`
    pub icon: String,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    /// hPa
    pub pressure: Option<f64>,
    /// Percent
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Meters
    pub visibility: Option<f64>,
    /// Epoch seconds
    #[serde(deserialize_with = "crate::timestamp::deserialize_opt")]
    pub sunrise: Option<i64>,
    /// Epoch seconds
    #[serde(deserialize_with = "crate::timestamp::deserialize_opt")]
    pub sunset: Option<i64>,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One day of the forecast strip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastDay {
    /// Day label, e.g. `Mon`
    pub name: String,
    pub icon: String,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub condition: Option<String>,
    /// Hour entries keyed by an upstream-defined key; order is not meaningful
    pub hours: BTreeMap<String, HourEntry>,
}

impl ForecastDay {
    /// Hour entries ascending by timestamp.
    ///
    /// Entries without a timestamp go last; ties keep key order.
    pub fn sorted_hours(&self) -> Vec<&HourEntry> {
        let mut hours: Vec<&HourEntry> = self.hours.values().collect();
        hours.sort_by_key(|h| (h.dt.is_none(), h.dt));
        hours
    }
}

/// Forecast for a single hour slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourEntry {
    /// Epoch seconds
    #[serde(deserialize_with = "crate::timestamp::deserialize_opt")]
    pub dt: Option<i64>,
    pub icon: String,
    pub temperature: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "city": "Lisbon",
        "condition": "Clouds",
        "icon": "03d",
        "temperature": 21.6,
        "feelsLike": 20.9,
        "pressure": 1015,
        "humidity": 64,
        "windSpeed": 4.1,
        "visibility": 8000,
        "sunrise": 1700000000,
        "sunset": 1700036000000,
        "forecast": [
            {
                "name": "Tue",
                "icon": "10d",
                "maxTemp": 22.4,
                "minTemp": 15.5,
                "hours": {
                    "b": {"dt": 1700010800, "icon": "10d", "temperature": 19.2},
                    "a": {"dt": 1700000000, "icon": "03d", "temperature": 17.0}
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_full_snapshot() {
        let snapshot = WeatherSnapshot::from_json(SAMPLE).unwrap();
        assert_eq!(snapshot.city, "Lisbon");
        assert_eq!(snapshot.wind_speed, Some(4.1));
        assert_eq!(snapshot.feels_like, Some(20.9));
        assert_eq!(snapshot.sunrise, Some(1_700_000_000));
        // milliseconds normalized
        assert_eq!(snapshot.sunset, Some(1_700_036_000));
        assert_eq!(snapshot.forecast.len(), 1);
        assert_eq!(snapshot.forecast[0].max_temp, Some(22.4));
    }

    #[test]
    fn test_partial_snapshot_uses_defaults() {
        let snapshot = WeatherSnapshot::from_json(r#"{"city": "Oslo"}"#).unwrap();
        assert_eq!(snapshot.city, "Oslo");
        assert!(snapshot.temperature.is_none());
        assert!(snapshot.forecast.is_empty());
    }

    #[test]
    fn test_sorted_hours_by_timestamp() {
        let snapshot = WeatherSnapshot::from_json(SAMPLE).unwrap();
        let hours = snapshot.forecast[0].sorted_hours();
        let stamps: Vec<_> = hours.iter().map(|h| h.dt).collect();
        assert_eq!(stamps, vec![Some(1_700_000_000), Some(1_700_010_800)]);
    }

    #[test]
    fn test_sorted_hours_missing_timestamp_last() {
        let mut day = ForecastDay::default();
        day.hours.insert(
            "0".into(),
            HourEntry {
                dt: None,
                icon: "01n".into(),
                temperature: Some(9.0),
            },
        );
        day.hours.insert(
            "1".into(),
            HourEntry {
                dt: Some(5),
                icon: "01d".into(),
                temperature: Some(10.0),
            },
        );
        let hours = day.sorted_hours();
        assert_eq!(hours[0].dt, Some(5));
        assert_eq!(hours[1].dt, None);
    }
}
