use anyhow::Result;

use crate::{AppError, Config, CustomElement, ElementRegistry};

/// Host-side application state: configuration, element definitions and
/// the elements currently attached.
pub struct App<E: CustomElement> {
    config: Config,
    registry: ElementRegistry<E>,
    mounted: Vec<E>,
}

impl<E: CustomElement> App<E> {
    /// Create a new application instance from the default config file
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated(None)?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            registry: ElementRegistry::new(),
            mounted: Vec::new(),
        }
    }

    /// Registry used by bootstrap routines to define their elements
    pub fn registry_mut(&mut self) -> &mut ElementRegistry<E> {
        &mut self.registry
    }

    /// Create an element by tag and attach it to the application
    pub fn mount(&mut self, tag_name: &str) -> Result<&mut E, AppError> {
        let element = self.registry.create(tag_name)?;
        tracing::info!("Mounted <{}>", tag_name);
        self.mounted.push(element);
        let index = self.mounted.len() - 1;
        Ok(&mut self.mounted[index])
    }

    /// Elements currently attached
    pub fn elements(&self) -> &[E] {
        &self.mounted
    }

    /// Detach every mounted element
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application ({} elements)", self.mounted.len());

        for mut element in self.mounted.drain(..) {
            tracing::debug!("Disconnecting <{}>", element.tag_name());
            element.disconnected();
        }

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Probe {
        disconnects: Arc<AtomicUsize>,
    }

    impl CustomElement for Probe {
        fn tag_name(&self) -> &str {
            "probe-element"
        }

        fn disconnected(&mut self) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_mount_and_shutdown_disconnects() {
        let disconnects = Arc::new(AtomicUsize::new(0));
        let mut app: App<Probe> = App::with_config(Config::default());
        let counter = disconnects.clone();
        app.registry_mut()
            .define("probe-element", "Probe", move || Probe {
                disconnects: counter.clone(),
            })
            .unwrap();

        app.mount("probe-element").unwrap();
        app.mount("probe-element").unwrap();
        assert_eq!(app.elements().len(), 2);

        app.shutdown().unwrap();
        assert!(app.elements().is_empty());
        assert_eq!(disconnects.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_with_config_keeps_settings() {
        let mut config = Config::default();
        config.widget.timezone = "Europe/Lisbon".to_string();
        let app: App<Probe> = App::with_config(config);
        assert_eq!(app.config().widget.timezone, "Europe/Lisbon");
    }

    #[test]
    fn test_mount_unknown_tag() {
        let mut app: App<Probe> = App::with_config(Config::default());
        assert!(matches!(
            app.mount("probe-element"),
            Err(AppError::Registry(_))
        ));
    }
}
