//! The `<weather-widget>` element.
//!
//! Renders current conditions and a daily forecast from the host's data
//! warehouse, with a drill-down into the hourly forecast of one day.

pub mod component;
pub mod error;
pub mod format;
pub mod shadow;
pub mod templates;
pub mod view;
pub mod widget;

pub use component::{bootstrap, TAG_NAME};
pub use error::{RenderError, WidgetError};
pub use format::{Clock, Formatter};
pub use shadow::{NodeRef, ShadowRoot};
pub use templates::{Rendered, Renderer};
pub use view::Action;
pub use widget::WeatherWidget;
