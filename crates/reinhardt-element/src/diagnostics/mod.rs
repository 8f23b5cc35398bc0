//! Development diagnostics.
//!
//! Every warning the factories and the key validator can raise goes through
//! [`Diagnostics`], which applies the once-only rules kept in a
//! [`WarningRegistry`] and hands the result to a [`DiagnosticSink`]. Nothing
//! here is global: each development factory owns its own `Diagnostics`.

mod registry;
mod sink;

pub use registry::WarningRegistry;
pub use sink::{DiagnosticSink, NullSink, RecordingSink, TracingSink};

use std::fmt;
use std::sync::Arc;

use crate::element::AccessObserver;
use crate::element_type::InvalidType;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
	/// Suspicious but harmless usage.
	Warn,
	/// Usage that is a bug or will stop working.
	Error,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
	/// Component code read `key` from its props.
	KeyPropAccess,
	/// Code read the element-level `ref`.
	ElementRefAccess,
	/// Elements were built by an outdated markup transform.
	OldJsxRuntime,
	/// A props mapping containing `key` was spread into markup.
	KeySpread,
	/// A child in a list has no key.
	MissingListKey,
	/// The element type cannot be rendered.
	InvalidElementType,
	/// The static-children entry point received non-array children.
	StaticChildrenNotArray,
	/// A key of an unsupported type was coerced to a string.
	KeyCoercion,
}

impl DiagnosticKind {
	/// Stable identifier used as a structured logging field.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::KeyPropAccess => "key_prop_access",
			Self::ElementRefAccess => "element_ref_access",
			Self::OldJsxRuntime => "old_jsx_runtime",
			Self::KeySpread => "key_spread",
			Self::MissingListKey => "missing_list_key",
			Self::InvalidElementType => "invalid_element_type",
			Self::StaticChildrenNotArray => "static_children_not_array",
			Self::KeyCoercion => "key_coercion",
		}
	}
}

impl fmt::Display for DiagnosticKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Category.
	pub kind: DiagnosticKind,
	/// Severity.
	pub level: DiagnosticLevel,
	/// Human-readable text.
	pub message: String,
	/// Component the diagnostic is attributed to, when known.
	pub component: Option<String>,
	/// Component stack frames, each starting with a newline.
	pub component_stack: Option<String>,
}

impl Diagnostic {
	fn new(kind: DiagnosticKind, level: DiagnosticLevel, message: String) -> Self {
		Self {
			kind,
			level,
			message,
			component: None,
			component_stack: None,
		}
	}

	fn for_component(mut self, component: Option<&str>) -> Self {
		self.component = component.map(str::to_string);
		self
	}
}

/// Applies once-only rules and forwards diagnostics to a sink.
pub struct Diagnostics {
	sink: Arc<dyn DiagnosticSink>,
	registry: WarningRegistry,
}

impl Diagnostics {
	/// Creates a diagnostics channel with an empty registry.
	pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
		Self {
			sink,
			registry: WarningRegistry::new(),
		}
	}

	/// The destination sink.
	pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
		&self.sink
	}

	/// The once-only registry.
	pub fn registry(&self) -> &WarningRegistry {
		&self.registry
	}

	fn emit(&self, diagnostic: Diagnostic) {
		self.sink.emit(&diagnostic);
	}

	/// Component code read `key` from props. Reported once per registry.
	pub fn warn_key_prop_access(&self, display_name: &str) {
		if !self.registry.first_key_prop_access() {
			return;
		}
		self.emit(
			Diagnostic::new(
				DiagnosticKind::KeyPropAccess,
				DiagnosticLevel::Error,
				format!(
					"{display_name}: `key` is not a prop. Trying to access it will result in \
					 nothing being returned. If you need to access the same value within the \
					 child component, you should pass it as a different prop."
				),
			)
			.for_component(Some(display_name)),
		);
	}

	/// Code read the element-level `ref`. Reported once per component name.
	pub fn warn_element_ref_access(&self, component: Option<&str>) {
		if !self
			.registry
			.first_element_ref_access(component.unwrap_or("Unknown"))
		{
			return;
		}
		self.emit(
			Diagnostic::new(
				DiagnosticKind::ElementRefAccess,
				DiagnosticLevel::Error,
				"Accessing element.ref is no longer supported. ref is now a regular prop. \
				 It will be removed from the element type in a future release."
					.to_string(),
			)
			.for_component(component),
		);
	}

	/// `create_element` was called by an outdated transform. Reported once.
	pub fn warn_old_jsx_runtime(&self) {
		if !self.registry.first_old_jsx_runtime() {
			return;
		}
		self.emit(Diagnostic::new(
			DiagnosticKind::OldJsxRuntime,
			DiagnosticLevel::Warn,
			"Your app (or one of its dependencies) is using an outdated JSX transform. \
			 Update to the modern JSX transform for faster performance."
				.to_string(),
		));
	}

	/// A mapping with `key` was spread into markup.
	///
	/// `other_props` lists the remaining prop names in order; the report is
	/// deduplicated on the component name together with those names.
	pub fn warn_key_spread(&self, component: &str, other_props: &[&str]) {
		let (before, after) = if other_props.is_empty() {
			("{key: someKey}".to_string(), "{}".to_string())
		} else {
			let listed = other_props.join(": ..., ");
			(
				format!("{{key: someKey, {listed}: ...}}"),
				format!("{{{listed}: ...}}"),
			)
		};
		if !self.registry.first_key_spread(&format!("{component}{before}")) {
			return;
		}
		self.emit(
			Diagnostic::new(
				DiagnosticKind::KeySpread,
				DiagnosticLevel::Error,
				format!(
					"A props object containing a \"key\" prop is being spread into JSX:\n  \
					 let props = {before};\n  <{component} {{...props}} />\n\
					 Keys must be passed directly to JSX without using spread:\n  \
					 let props = {after};\n  <{component} key={{someKey}} {{...props}} />"
				),
			)
			.for_component(Some(component)),
		);
	}

	/// A list child has no key.
	///
	/// `error_info` is the "check the render method" addendum and doubles as
	/// the deduplication signature. Returns `true` if the diagnostic was
	/// emitted.
	pub fn warn_missing_key(
		&self,
		error_info: &str,
		child_owner: &str,
		component: Option<&str>,
		component_stack: Option<String>,
	) -> bool {
		if !self.registry.first_missing_key(error_info) {
			return false;
		}
		let mut diagnostic = Diagnostic::new(
			DiagnosticKind::MissingListKey,
			DiagnosticLevel::Error,
			format!("Each child in a list should have a unique \"key\" prop.{error_info}{child_owner}"),
		)
		.for_component(component);
		diagnostic.component_stack = component_stack;
		self.emit(diagnostic);
		true
	}

	/// The element type cannot be rendered. Reported on every occurrence.
	pub fn warn_invalid_type(&self, api: &str, invalid: &InvalidType) {
		self.emit(Diagnostic::new(
			DiagnosticKind::InvalidElementType,
			DiagnosticLevel::Error,
			format!(
				"{api}: type is invalid -- expected a string (for built-in components) or a \
				 class/function (for composite components) but got: {}.{}",
				invalid.type_string(),
				invalid.hint()
			),
		));
	}

	/// Static children were not an array. Reported on every occurrence.
	pub fn warn_static_children_not_array(&self, api: &str) {
		self.emit(Diagnostic::new(
			DiagnosticKind::StaticChildrenNotArray,
			DiagnosticLevel::Error,
			format!(
				"{api}: Static children should always be an array. You are likely explicitly \
				 calling jsxs or jsx_dev. Use the jsx! macro instead."
			),
		));
	}

	/// A key of an unsupported type was coerced. Reported on every occurrence.
	pub fn warn_key_coercion(&self, type_name: &str) {
		self.emit(Diagnostic::new(
			DiagnosticKind::KeyCoercion,
			DiagnosticLevel::Error,
			format!(
				"The provided `key` is an unsupported type {type_name}. This value must be \
				 coerced to a string before using it here."
			),
		));
	}
}

impl AccessObserver for Diagnostics {
	fn element_ref_accessed(&self, component: Option<&str>) {
		self.warn_element_ref_access(component);
	}

	fn props_key_accessed(&self, display_name: &str) {
		self.warn_key_prop_access(display_name);
	}
}

impl fmt::Debug for Diagnostics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Diagnostics")
			.field("registry", &self.registry)
			.finish_non_exhaustive()
	}
}
