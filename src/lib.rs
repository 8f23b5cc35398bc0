//! # Reinhardt JSX
//!
//! JSX-style element construction for Reinhardt.
//!
//! Markup is turned into lightweight, immutable element values that an
//! external reconciler consumes. This crate covers construction only: key and
//! ref extraction, props normalization, default props and the development
//! diagnostics that catch misuse early. Rendering, diffing and scheduling are
//! left to the renderer.
//!
//! ## Feature Flags
//!
//! - `macros` (default) - the [`jsx!`] markup macro
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reinhardt_jsx::prelude::*;
//!
//! let factory = create_factory(JsxSettings::default(), Arc::new(TracingSink));
//! let list = jsx!(factory => ul {
//!     class: "todo",
//!     li { key: "docs", "Write docs" },
//!     li { key: "tests", "Write tests" },
//! });
//!
//! assert_eq!(list.props().children().and_then(|c| c.as_array()).map(|c| c.len()), Some(2));
//! ```
//!
//! ## Choosing a Factory
//!
//! [`create_factory`](element::create_factory) reads [`JsxSettings`](element::JsxSettings)
//! once. Development builds get instrumented elements and diagnostics through a
//! [`DiagnosticSink`](element::DiagnosticSink); production builds get bare elements.

pub mod element;

#[cfg(feature = "macros")]
pub use reinhardt_element_macros::jsx;

pub use element::{Element, ElementFactory, ElementType, PropValue, Props};

/// Commonly used types and functions.
pub mod prelude {
	pub use crate::element::{
		BuildMode, Callback, Component, DevElementFactory, Diagnostic, DiagnosticKind,
		DiagnosticSink, DispatcherSlot, Element, ElementError, ElementFactory, ElementType,
		JsxSettings, NodeRef, NullSink, Owner, OwnerStack, ProdElementFactory, PropValue, Props,
		RecordingSink, TracingSink, create_factory, is_valid_element,
	};

	#[cfg(feature = "macros")]
	pub use crate::jsx;
}
