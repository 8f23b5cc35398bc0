//! Reinhardt Element - element construction for JSX-style markup
//!
//! This crate turns markup into lightweight, immutable [`Element`] values that
//! a reconciler consumes later. It does not render, diff or schedule anything.
//!
//! ## Features
//!
//! - **Three entry points**: the compiler form (`jsx`/`jsxs`), the legacy
//!   `create_element` form and `clone_element`
//! - **Props normalization**: key extraction, reserved-entry stripping and
//!   default props
//! - **Development diagnostics**: unkeyed list children, deprecated `key` and
//!   `ref` reads, key spread, invalid types and outdated transforms
//! - **Two factories**: instrumented for development, bare for production,
//!   chosen once at startup
//!
//! ## Architecture
//!
//! - [`value`]: dynamic prop values
//! - [`props`]: ordered prop mappings
//! - [`element_type`]: component designators
//! - [`element`]: the element value and [`is_valid_element`]
//! - [`owner`] and [`dispatcher`]: owner handles and the current-owner slot
//! - [`factory`]: the [`ElementFactory`] trait and its implementations
//! - [`validation`]: child key validation
//! - [`diagnostics`]: once-only reporting through a [`DiagnosticSink`]
//! - [`settings`]: [`JsxSettings`], loadable from TOML
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_element::{ElementType, JsxSettings, PropValue, Props, TracingSink, create_factory};
//!
//! let factory = create_factory(JsxSettings::default(), Arc::new(TracingSink));
//! let element = factory.jsx(
//!     ElementType::host("button"),
//!     Props::new().prop("children", "Save"),
//!     Some("save".into()),
//! );
//!
//! assert_eq!(element.key(), Some("save"));
//! assert_eq!(element.props().children(), Some(&PropValue::from("Save")));
//! ```

#![warn(missing_docs)]

pub mod compat;
pub mod debug;
pub mod diagnostics;
pub mod dispatcher;
pub mod element;
pub mod element_type;
pub mod error;
pub mod factory;
pub mod owner;
pub mod props;
pub mod settings;
pub mod validation;
pub mod value;

pub use compat::{has_valid_key, has_valid_ref};
pub use debug::{DebugMetadata, DebugStack, DebugTask, SourceLocation, task_name};
pub use diagnostics::{
	Diagnostic, DiagnosticKind, DiagnosticLevel, DiagnosticSink, Diagnostics, NullSink,
	RecordingSink, TracingSink, WarningRegistry,
};
pub use dispatcher::{DispatcherGuard, DispatcherSlot, OwnerDispatcher, OwnerScope, OwnerStack};
pub use element::{ELEMENT_TAG, Element, ValidationState, is_valid_element};
pub use element_type::{
	Component, ComponentKind, ElementType, ForwardRefType, InvalidType, LazyType, MemoType,
};
pub use error::{ElementError, ElementResult, SettingsError};
pub use factory::{
	DevElementFactory, ElementFactory, ElementParts, ProdElementFactory, create_factory,
};
pub use owner::Owner;
pub use props::Props;
pub use settings::{BuildMode, JsxSettings};
pub use validation::KeyValidator;
pub use value::{Callback, ChildIterable, IterationProtocol, NodeRef, PropValue};
