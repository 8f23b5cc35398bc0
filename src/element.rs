//! Immutable elements and the element factories
//!
//! This module provides access to reinhardt-element, the construction layer
//! that turns markup into [`Element`] values for a reconciler.
//!
//! ## Architecture
//!
//! - **Entry Points**: `jsx`/`jsxs` for compiled markup, `create_element` for
//!   hand-written trees, `clone_element` for derived elements
//! - **Factories**: an instrumented development factory and a bare production
//!   factory behind [`ElementFactory`]
//! - **Diagnostics**: once-only reports routed through a [`DiagnosticSink`]
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use reinhardt_jsx::element::{
//!     BuildMode, ElementType, JsxSettings, NullSink, PropValue, Props, create_factory,
//! };
//!
//! let factory = create_factory(
//!     JsxSettings::new().with_mode(BuildMode::Production),
//!     Arc::new(NullSink),
//! );
//! let item = factory.create_element(
//!     ElementType::host("li"),
//!     Some(Props::new().prop("key", 1)),
//!     vec![PropValue::from("first")],
//! );
//!
//! assert_eq!(item.key(), Some("1"));
//! assert!(!item.is_instrumented());
//! ```

// Re-export all reinhardt-element functionality
pub use reinhardt_element::*;
