//! Component dispatch
//!
//! This module provides the static registry that maps blueprint component
//! names to typed implementations, and the resolver that walks a page and
//! pairs every declared component with its implementation.
//!
//! # Example
//!
//! ```rust
//! use site_blueprint::dispatch::{resolve, ComponentRegistry, Resolution};
//!
//! let blueprint = site_blueprint::parse(r#"{
//!     "client_name": "Acme Freight",
//!     "pages": [{
//!         "page_name": "Pricing",
//!         "page_path": "/pricing",
//!         "sections": [{
//!             "section_name": "Plans",
//!             "components": [
//!                 { "component_name": "Button", "props": { "label": "Buy" } },
//!                 { "component_name": "Mystery" }
//!             ]
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let registry = ComponentRegistry::builtin();
//! let resolution = resolve(&blueprint, &registry, "/pricing");
//! let nodes = resolution.nodes();
//! assert_eq!(nodes.len(), 2);
//! assert!(nodes[1].is_placeholder());
//!
//! assert!(matches!(
//!     resolve(&blueprint, &registry, "/does-not-exist"),
//!     Resolution::NotFound { .. }
//! ));
//! ```

mod registry;
mod resolver;

pub use registry::{Component, ComponentEntry, ComponentRegistry, PropsError, RegistryError};
pub use resolver::{dispatch, resolve, RenderNode, Resolution, ResolvedPage, ResolvedSection};
