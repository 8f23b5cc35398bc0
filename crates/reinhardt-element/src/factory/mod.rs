//! Element factories.
//!
//! [`ElementFactory`] is the one interface every entry point goes through.
//! Two implementations exist: [`DevElementFactory`] builds instrumented
//! elements and raises diagnostics, [`ProdElementFactory`] builds bare
//! elements and never looks at owners or registries. [`create_factory`]
//! picks one from [`JsxSettings::mode`] once, at startup.

mod dev;
mod prod;
pub(crate) mod shared;

pub use dev::DevElementFactory;
pub use prod::ProdElementFactory;

use std::sync::Arc;

use crate::debug::{DebugStack, DebugTask, SourceLocation};
use crate::diagnostics::DiagnosticSink;
use crate::dispatcher::DispatcherSlot;
use crate::element::Element;
use crate::element_type::ElementType;
use crate::error::ElementResult;
use crate::owner::Owner;
use crate::props::Props;
use crate::settings::JsxSettings;
use crate::value::PropValue;

/// API name used in diagnostics raised by [`ElementFactory::jsx`].
pub const API_JSX: &str = "jsx";
/// API name used in diagnostics raised by [`ElementFactory::jsxs`].
pub const API_JSXS: &str = "jsxs";
/// API name used in diagnostics raised by [`ElementFactory::create_element`].
pub const API_CREATE_ELEMENT: &str = "create_element";

/// Everything the element core needs to build one element.
#[derive(Debug, Clone)]
pub struct ElementParts {
	/// Component designator.
	pub element_type: ElementType,
	/// Already-coerced key.
	pub key: Option<String>,
	/// Component that called the factory, as reported by the markup transform.
	pub self_token: Option<Owner>,
	/// Source annotation from the markup transform.
	pub source: Option<SourceLocation>,
	/// Owner to record on the element.
	pub owner: Option<Owner>,
	/// Normalized props, including any `ref`.
	pub props: Props,
	/// Creation call site.
	pub debug_stack: Option<DebugStack>,
	/// Task handle.
	pub debug_task: Option<DebugTask>,
}

impl ElementParts {
	/// Parts with no owner and no debug metadata.
	pub fn new(element_type: ElementType, key: Option<String>, props: Props) -> Self {
		Self {
			element_type,
			key,
			self_token: None,
			source: None,
			owner: None,
			props,
			debug_stack: None,
			debug_task: None,
		}
	}
}

/// The element construction entry points.
pub trait ElementFactory: Send + Sync {
	/// Settings this factory was created with.
	fn settings(&self) -> &JsxSettings;

	/// The owner slot consulted by this factory, if it tracks owners.
	fn dispatcher(&self) -> Option<&Arc<DispatcherSlot>> {
		None
	}

	/// Builds an element from fully normalized parts. Never fails.
	fn build_element(&self, parts: ElementParts) -> Element;

	/// Compiler entry point for elements with dynamic children.
	///
	/// `config.children` is a single value. `maybe_key` is the key written
	/// explicitly after any spread and wins over a `key` inside `config`.
	#[track_caller]
	fn jsx(&self, element_type: ElementType, config: Props, maybe_key: Option<PropValue>) -> Element;

	/// Compiler entry point for elements with static children.
	///
	/// `config.children` is an array whose items are each in a static position.
	#[track_caller]
	fn jsxs(&self, element_type: ElementType, config: Props, maybe_key: Option<PropValue>) -> Element;

	/// Legacy entry point with children passed as trailing arguments.
	///
	/// One child is stored bare, several as an array, none leaves
	/// `children` unset. Default props are always applied.
	#[track_caller]
	fn create_element(
		&self,
		element_type: ElementType,
		config: Option<Props>,
		children: Vec<PropValue>,
	) -> Element;

	/// Returns a copy of `element` with `config` merged over its props.
	///
	/// # Errors
	///
	/// Returns [`ElementError::InvalidArgument`](crate::ElementError::InvalidArgument)
	/// if `element` is `None`.
	fn clone_element(
		&self,
		element: Option<&Element>,
		config: Option<Props>,
		children: Vec<PropValue>,
	) -> ElementResult<Element>;

	/// Returns a copy of `element` with a different key and everything else kept.
	fn clone_and_replace_key(&self, element: &Element, new_key: Option<String>) -> Element;
}

/// Creates the factory selected by `settings.mode`.
///
/// Development factories report to `sink`; production factories ignore it.
pub fn create_factory(settings: JsxSettings, sink: Arc<dyn DiagnosticSink>) -> Arc<dyn ElementFactory> {
	tracing::debug!(
		target: "reinhardt_element",
		mode = ?settings.mode,
		owner_stacks = settings.enable_owner_stacks,
		"creating element factory"
	);
	if settings.is_development() {
		Arc::new(DevElementFactory::new(settings, sink))
	} else {
		Arc::new(ProdElementFactory::new(settings))
	}
}
