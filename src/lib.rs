//! Design Context - binding between UI component trees and HTML templates
//!
//! This library reads HTML-like templates into trees of components and
//! writes component trees back as templates. A [`DesignContext`] tracks the
//! identifiers and tag prefixes involved in one such read or write.
//!
//! # Example
//!
//! ```rust
//! use design_context::design;
//!
//! let context = design::read(r#"
//!     <v-vertical-layout>
//!         <v-label _id="greeting">Hello</v-label>
//!         <v-button id="submit">Send</v-button>
//!     </v-vertical-layout>
//! "#).unwrap();
//!
//! assert!(context.component_by_local_id("greeting").is_some());
//! assert!(context.component_by_id("submit").is_some());
//!
//! let root = context.component_root().unwrap();
//! let html = design::write(root).unwrap();
//! assert!(html.contains("<v-vertical-layout>"));
//! ```

pub mod component;
pub mod config;
pub mod context;
pub mod design;
pub mod error;
pub mod markup;

pub use component::{Component, ComponentClass, ComponentRef};
pub use config::{ConfigError, DesignConfig};
pub use context::{
    ClassError, ComponentCreatedEvent, ComponentCreationListener, ComponentRegistry,
    DefaultInstanceCache, DesignContext, DesignError,
};
pub use design::{read, read_with_config, read_with_context, write, write_with_context};
pub use error::ParseError;
pub use markup::{Document, Element};
