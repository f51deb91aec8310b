//! Component registry mapping blueprint names to typed implementations

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::blueprint::Props;
use crate::renderer::{Element, RenderContext};

/// Errors that can occur while building a registry
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// Two implementations claim the same name
    #[error("duplicate component registration: {name}")]
    Duplicate { name: String },
}

/// A property bag that does not fit the component's typed configuration
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid props for '{component}': {message}")]
pub struct PropsError {
    pub component: String,
    pub message: String,
}

/// A renderable component with a typed configuration
///
/// The implementing type *is* the configuration: it is deserialized from the
/// blueprint's property bag at the boundary, then rendered.
pub trait Component: DeserializeOwned {
    /// Name used in blueprints
    const NAME: &'static str;

    fn render(&self, ctx: &RenderContext<'_>) -> Element;

    /// Convert an opaque property bag into the typed configuration
    fn from_props(props: &Props) -> Result<Self, PropsError> {
        serde_json::from_value(Value::Object(props.clone())).map_err(|e| PropsError {
            component: Self::NAME.to_string(),
            message: e.to_string(),
        })
    }
}

type ValidateFn = fn(&Props) -> Result<(), PropsError>;
type RenderFn = fn(&Props, &RenderContext<'_>) -> Result<Element, PropsError>;

/// A registered implementation, erased over its configuration type
#[derive(Clone, Copy)]
pub struct ComponentEntry {
    name: &'static str,
    validate: ValidateFn,
    render: RenderFn,
}

impl ComponentEntry {
    fn of<C: Component>() -> Self {
        Self {
            name: C::NAME,
            validate: validate_typed::<C>,
            render: render_typed::<C>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check that a property bag converts into the typed configuration
    pub fn validate(&self, props: &Props) -> Result<(), PropsError> {
        (self.validate)(props)
    }

    /// Convert the bag and render it
    pub fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> Result<Element, PropsError> {
        (self.render)(props, ctx)
    }
}

fn validate_typed<C: Component>(props: &Props) -> Result<(), PropsError> {
    C::from_props(props).map(|_| ())
}

fn render_typed<C: Component>(
    props: &Props,
    ctx: &RenderContext<'_>,
) -> Result<Element, PropsError> {
    Ok(C::from_props(props)?.render(ctx))
}

impl fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ComponentEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Registry of component implementations, keyed by blueprint name
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<&'static str, ComponentEntry>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in components
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::components::register_builtins(&mut registry)
            .expect("Built-in component names should be unique");
        registry
    }

    /// Register a component type under its name
    pub fn register<C: Component>(&mut self) -> Result<(), RegistryError> {
        if self.components.contains_key(C::NAME) {
            return Err(RegistryError::Duplicate {
                name: C::NAME.to_string(),
            });
        }
        self.components.insert(C::NAME, ComponentEntry::of::<C>());
        Ok(())
    }

    /// Builder-style registration
    pub fn with<C: Component>(mut self) -> Result<Self, RegistryError> {
        self.register::<C>()?;
        Ok(self)
    }

    /// Get an implementation by exact name
    pub fn get(&self, name: &str) -> Option<&ComponentEntry> {
        self.components.get(name)
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.components.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
