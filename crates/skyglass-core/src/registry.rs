use std::collections::BTreeMap;

use crate::RegistryError;

/// Names the host reserves; they can never be defined as custom elements.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// An element the host can attach to and detach from its document
pub trait CustomElement: Send {
    /// Tag the element was defined under
    fn tag_name(&self) -> &str;

    /// Called when the host removes the element; must release host resources
    fn disconnected(&mut self);
}

type ElementFactory<E> = Box<dyn Fn() -> E + Send + Sync>;

struct ElementDefinition<E> {
    name: String,
    factory: ElementFactory<E>,
}

/// Registry mapping custom tag names to element constructors.
///
/// Each tag can be defined once. Instances are owned by the caller, so
/// tests can build a fresh registry instead of sharing a global one.
pub struct ElementRegistry<E> {
    definitions: BTreeMap<String, ElementDefinition<E>>,
}

impl<E> ElementRegistry<E> {
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Define a new element under `tag_name`
    pub fn define<F>(&mut self, tag_name: &str, name: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        if !is_valid_element_name(tag_name) {
            return Err(RegistryError::InvalidName(tag_name.to_string()));
        }
        if self.definitions.contains_key(tag_name) {
            return Err(RegistryError::AlreadyDefined(tag_name.to_string()));
        }

        tracing::info!("Defining element <{}> ({})", tag_name, name);
        self.definitions.insert(
            tag_name.to_string(),
            ElementDefinition {
                name: name.to_string(),
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    pub fn is_defined(&self, tag_name: &str) -> bool {
        self.definitions.contains_key(tag_name)
    }

    /// Human-readable name given at definition time
    pub fn display_name(&self, tag_name: &str) -> Option<&str> {
        self.definitions.get(tag_name).map(|d| d.name.as_str())
    }

    /// Construct a new instance of a defined element
    pub fn create(&self, tag_name: &str) -> Result<E, RegistryError> {
        let definition = self
            .definitions
            .get(tag_name)
            .ok_or_else(|| RegistryError::NotDefined(tag_name.to_string()))?;
        tracing::debug!("Creating element <{}>", tag_name);
        Ok((definition.factory)())
    }
}

impl<E> Default for ElementRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ElementRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("tags", &self.definitions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Custom element naming rules: lowercase ASCII start, at least one hyphen,
/// no uppercase, not a reserved name.
fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_lower = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_lower
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
        && !RESERVED_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_create() {
        let mut registry: ElementRegistry<u32> = ElementRegistry::new();
        registry.define("answer-box", "Answer", || 42).unwrap();

        assert!(registry.is_defined("answer-box"));
        assert_eq!(registry.display_name("answer-box"), Some("Answer"));
        assert_eq!(registry.create("answer-box").unwrap(), 42);
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut registry: ElementRegistry<u32> = ElementRegistry::new();
        registry.define("answer-box", "Answer", || 1).unwrap();
        let err = registry.define("answer-box", "Again", || 2).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyDefined(_)));
        assert_eq!(registry.create("answer-box").unwrap(), 1);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut registry: ElementRegistry<u32> = ElementRegistry::new();
        for name in ["widget", "Weather-widget", "1-widget", "font-face", "weather widget"] {
            let err = registry.define(name, "bad", || 0).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidName(_)), "{name} accepted");
        }
    }

    #[test]
    fn test_create_undefined() {
        let registry: ElementRegistry<u32> = ElementRegistry::new();
        assert!(matches!(
            registry.create("weather-widget"),
            Err(RegistryError::NotDefined(_))
        ));
    }
}
