//! Tera-backed markup rendering for the widget's shadow root.

use skyglass_core::WidgetConfig;
use skyglass_weather::{ForecastDay, WeatherSnapshot};
use tera::{Context, Tera};

use crate::view::{Action, DailyView, HourlyView};
use crate::{Formatter, RenderError};

const DAILY: &str = "widget/daily.html";
const HOURLY: &str = "widget/hourly.html";

/// Shown before the first snapshot and whenever rendering fails
pub const PLACEHOLDER_MARKUP: &str = r#"<div class="weather-widget weather-widget-empty"></div>"#;

/// Embedded templates - compiled into the binary
mod embedded {
    pub const DAILY: &str = r#"<div class="weather-widget">
  <header class="weather-header">
    <span class="weather-city">{{ city }}</span>
    <span class="weather-condition">{{ condition }}</span>
  </header>
  <section class="weather-current">
    {%- if current.icon_url %}
    <img class="weather-icon" src="{{ current.icon_url | safe }}" alt="{{ condition }}">
    {%- endif %}
    <span class="weather-temperature">{{ current.temperature | safe }}</span>
    <ul class="weather-details">
      {%- if current.feels_like %}
      <li class="weather-feels-like">Feels like {{ current.feels_like | safe }}</li>
      {%- endif %}
      <li class="weather-pressure">{{ current.pressure | safe }}</li>
      <li class="weather-humidity">{{ current.humidity | safe }}</li>
      <li class="weather-wind">{{ current.wind_speed | safe }}</li>
      <li class="weather-visibility">{{ current.visibility | safe }}</li>
      <li class="weather-sunrise">{{ current.sunrise | safe }}</li>
      <li class="weather-sunset">{{ current.sunset | safe }}</li>
    </ul>
  </section>
  <section class="weather-forecast">
    {%- for day in days %}
    <div class="forecast-day" id="{{ day.id }}" data-index="{{ day.index }}"{% if day.condition %} title="{{ day.condition }}"{% endif %}>
      <span class="forecast-name">{{ day.name }}</span>
      {%- if day.icon_url %}
      <img class="forecast-icon" src="{{ day.icon_url | safe }}" alt="{{ day.name }}">
      {%- endif %}
      <span class="forecast-max">{{ day.max_temp | safe }}</span>
      <span class="forecast-min">{{ day.min_temp | safe }}</span>
    </div>
    {%- endfor %}
  </section>
  <footer class="weather-footer">
    <span class="footer-temperature">{{ current.temperature | safe }}</span>
    <span class="footer-humidity">{{ current.humidity | safe }}</span>
    <span class="footer-wind">{{ current.wind_speed | safe }}</span>
  </footer>
</div>
"#;

    pub const HOURLY: &str = r#"<div class="weather-widget weather-widget-hourly">
  <button class="forecast-back" id="{{ back_id }}" type="button">&larr; {{ day_name }}</button>
  <section class="forecast-hours">
    {%- for hour in hours %}
    <div class="forecast-hour">
      <span class="forecast-hour-time">{{ hour.time | safe }}</span>
      {%- if hour.icon_url %}
      <img class="forecast-icon" src="{{ hour.icon_url | safe }}" alt="{{ hour.time | safe }}">
      {%- endif %}
      <span class="forecast-hour-temp">{{ hour.temperature | safe }}</span>
    </div>
    {%- endfor %}
  </section>
</div>
"#;
}

/// Markup plus the click bindings that belong to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub markup: String,
    pub bindings: Vec<(String, Action)>,
}

/// Renders snapshots into widget markup
pub struct Renderer {
    tera: Tera,
    formatter: Formatter,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(config: &WidgetConfig) -> Result<Self, RenderError> {
        let formatter = Formatter::new(config)?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(vec![(DAILY, embedded::DAILY), (HOURLY, embedded::HOURLY)])?;

        tracing::debug!("Widget templates loaded");
        Ok(Self { tera, formatter })
    }

    /// Current conditions plus the forecast strip
    pub fn render_daily(&self, snapshot: &WeatherSnapshot) -> Result<Rendered, RenderError> {
        let view = DailyView::build(snapshot, &self.formatter);
        let markup = self.tera.render(DAILY, &Context::from_serialize(&view)?)?;
        Ok(Rendered {
            markup,
            bindings: view.bindings(),
        })
    }

    /// Hourly drill-down for one forecast day
    pub fn render_hourly(&self, day: &ForecastDay) -> Result<Rendered, RenderError> {
        let view = HourlyView::build(day, &self.formatter);
        let markup = self.tera.render(HOURLY, &Context::from_serialize(&view)?)?;
        Ok(Rendered {
            markup,
            bindings: view.bindings(),
        })
    }

    pub fn placeholder(&self) -> Rendered {
        Rendered {
            markup: PLACEHOLDER_MARKUP.to_string(),
            bindings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(&WidgetConfig::default()).unwrap()
    }

    #[test]
    fn text_fields_are_escaped() {
        let snapshot = WeatherSnapshot {
            city: "<script>alert(1)</script>".into(),
            condition: "Rain & \"wind\"".into(),
            ..Default::default()
        };
        let rendered = renderer().render_daily(&snapshot).unwrap();
        assert!(!rendered.markup.contains("<script>"));
        assert!(rendered.markup.contains("&lt;script&gt;"));
        assert!(rendered.markup.contains("Rain &amp; &quot;wind&quot;"));
    }

    #[test]
    fn measurements_are_not_escaped() {
        let snapshot = WeatherSnapshot {
            icon: "04n".into(),
            wind_speed: Some(3.0),
            ..Default::default()
        };
        let markup = renderer().render_daily(&snapshot).unwrap().markup;
        assert!(markup.contains("3 m/s"));
        assert!(markup.contains(r#"src="https://openweathermap.org/img/wn/04n.png""#));
    }

    #[test]
    fn missing_icon_renders_no_image() {
        let markup = renderer()
            .render_daily(&WeatherSnapshot::default())
            .unwrap()
            .markup;
        assert!(!markup.contains("<img"));
    }

    #[test]
    fn hourly_markup_has_back_control() {
        let day = ForecastDay {
            name: "Fri".into(),
            ..Default::default()
        };
        let rendered = renderer().render_hourly(&day).unwrap();
        assert!(rendered.markup.contains(r#"id="forecast-back""#));
        assert!(rendered.markup.contains("Fri</button>"));
        assert_eq!(rendered.bindings.len(), 1);
    }
}
