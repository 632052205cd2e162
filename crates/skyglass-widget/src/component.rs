use std::sync::Arc;

use skyglass_core::{CustomElement, ElementRegistry, RegistryError};

use crate::{Renderer, WeatherWidget};

/// Tag the widget is registered under
pub const TAG_NAME: &str = "weather-widget";

/// Define `<weather-widget>` in `registry`.
///
/// Call once per registry at host startup; a second call fails with
/// [`RegistryError::AlreadyDefined`].
pub fn bootstrap(
    registry: &mut ElementRegistry<WeatherWidget>,
    renderer: Arc<Renderer>,
) -> Result<(), RegistryError> {
    registry.define(TAG_NAME, "Weather widget", move || {
        WeatherWidget::new(renderer.clone())
    })
}

impl CustomElement for WeatherWidget {
    fn tag_name(&self) -> &str {
        TAG_NAME
    }

    fn disconnected(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyglass_core::WidgetConfig;

    fn renderer() -> Arc<Renderer> {
        Arc::new(Renderer::new(&WidgetConfig::default()).unwrap())
    }

    #[test]
    fn bootstrap_defines_tag_once() {
        let mut registry = ElementRegistry::new();
        bootstrap(&mut registry, renderer()).unwrap();
        assert!(registry.is_defined(TAG_NAME));

        let err = bootstrap(&mut registry, renderer()).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyDefined(_)));
    }

    #[test]
    fn registry_creates_independent_widgets() {
        let mut registry = ElementRegistry::new();
        bootstrap(&mut registry, renderer()).unwrap();

        let a = registry.create(TAG_NAME).unwrap();
        let b = registry.create(TAG_NAME).unwrap();
        assert_eq!(a.tag_name(), TAG_NAME);
        assert!(!a.is_connected());
        assert_eq!(a.markup(), b.markup());
    }
}
