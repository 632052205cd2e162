//! Display formatting for measurements, times and icon URLs.

use chrono::DateTime;
use chrono_tz::Tz;
use skyglass_core::{ConfigError, Units, WidgetConfig};
use url::Url;

use crate::RenderError;

/// Shown in place of a missing or non-numeric value
pub const MISSING: &str = "–";

/// Time-zone aware wall clock for epoch timestamps
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    tz: Tz,
}

impl Clock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
    }

    /// 24-hour `HH:MM` for epoch seconds
    pub fn hour_minute(&self, epoch_seconds: i64) -> Option<String> {
        DateTime::from_timestamp(epoch_seconds, 0)
            .map(|t| t.with_timezone(&self.tz).format("%H:%M").to_string())
    }
}

/// Turns raw snapshot values into display strings
#[derive(Debug, Clone)]
pub struct Formatter {
    units: Units,
    clock: Clock,
    icon_base: Url,
}

impl Formatter {
    pub fn new(config: &WidgetConfig) -> Result<Self, RenderError> {
        let clock = Clock::from_name(&config.timezone)?;
        let icon_base = Url::parse(&config.icon_base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidIconUrl(config.icon_base_url.clone()))?;

        Ok(Self {
            units: config.units,
            clock,
            icon_base,
        })
    }

    /// Rounded to the nearest degree, e.g. `22°C`
    pub fn temperature(&self, value: Option<f64>) -> String {
        let suffix = match self.units {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        };
        finite(value)
            .map(|v| format!("{}{}", rounded(v), suffix))
            .unwrap_or_else(missing)
    }

    pub fn pressure(&self, value: Option<f64>) -> String {
        finite(value)
            .map(|v| format!("{} hPa", rounded(v)))
            .unwrap_or_else(missing)
    }

    pub fn humidity(&self, value: Option<f64>) -> String {
        finite(value)
            .map(|v| format!("{}%", rounded(v)))
            .unwrap_or_else(missing)
    }

    pub fn wind_speed(&self, value: Option<f64>) -> String {
        let suffix = match self.units {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        };
        finite(value)
            .map(|v| format!("{} {}", one_decimal(v), suffix))
            .unwrap_or_else(missing)
    }

    /// Meters in, kilometers out: `8000` → `8 km`, `8450` → `8.5 km`
    pub fn visibility(&self, meters: Option<f64>) -> String {
        finite(meters)
            .map(|v| format!("{} km", one_decimal(v / 1000.0)))
            .unwrap_or_else(missing)
    }

    pub fn time(&self, epoch_seconds: Option<i64>) -> String {
        epoch_seconds
            .and_then(|s| self.clock.hour_minute(s))
            .unwrap_or_else(missing)
    }

    /// Icon image URL for an icon code; `None` when there is no code
    pub fn icon_url(&self, code: &str) -> Option<String> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        let mut url = self.icon_base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(&format!("{code}.png"));
        Some(url.to_string())
    }
}

fn missing() -> String {
    MISSING.to_string()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Halves round up toward positive infinity: `2.5` → `3`, `-3.5` → `-3`
fn rounded(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn one_decimal(value: f64) -> String {
    let r = (value * 10.0).round() / 10.0;
    if r.fract() == 0.0 {
        format!("{}", r as i64)
    } else {
        format!("{:.1}", r)
    }
}
