//! Debug metadata attached to development elements.
//!
//! None of this affects behavior. It exists to attribute diagnostics and
//! runtime errors to the place an element was written.

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

use crate::element_type::ElementType;
use crate::owner::{Owner, WeakOwner};

/// The call site that created an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugStack {
	location: &'static Location<'static>,
}

impl DebugStack {
	/// Captures the caller's location.
	#[track_caller]
	pub fn capture() -> Self {
		Self {
			location: Location::caller(),
		}
	}

	/// The captured location.
	pub fn location(&self) -> &'static Location<'static> {
		self.location
	}
}

impl fmt::Display for DebugStack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "    at {}", self.location)
	}
}

/// A named task grouping the work spawned from one element, e.g. `<Button>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugTask {
	name: String,
}

impl DebugTask {
	/// Creates a task named after `element_type`.
	pub fn for_type(element_type: &ElementType) -> Self {
		Self {
			name: task_name(element_type),
		}
	}

	/// The task name.
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Task name for a type: `<>` for fragments, `<...>` when the name is unknown.
pub fn task_name(element_type: &ElementType) -> String {
	match element_type {
		ElementType::Fragment => "<>".to_string(),
		ElementType::Lazy(_) => "<...>".to_string(),
		other => match other.component_name() {
			Some(name) => format!("<{name}>"),
			None => "<...>".to_string(),
		},
	}
}

/// Source annotation supplied by a markup transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
	/// File the element was written in.
	pub file_name: String,
	/// 1-based line.
	pub line_number: u32,
	/// 1-based column.
	pub column_number: u32,
}

impl SourceLocation {
	/// Builds an annotation from a captured caller location.
	pub fn from_location(location: &Location<'_>) -> Self {
		Self {
			file_name: location.file().to_string(),
			line_number: location.line(),
			column_number: location.column(),
		}
	}
}

impl fmt::Display for SourceLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file_name, self.line_number, self.column_number)
	}
}

/// Everything a development element records about its origin.
#[derive(Debug, Clone, Default)]
pub struct DebugMetadata {
	pub(crate) stack: Option<DebugStack>,
	pub(crate) task: Option<DebugTask>,
	pub(crate) source: Option<SourceLocation>,
	pub(crate) self_token: Option<WeakOwner>,
}

impl DebugMetadata {
	/// The captured call site.
	pub fn stack(&self) -> Option<&DebugStack> {
		self.stack.as_ref()
	}

	/// The task handle.
	pub fn task(&self) -> Option<&DebugTask> {
		self.task.as_ref()
	}

	/// The transform-supplied source annotation.
	pub fn source(&self) -> Option<&SourceLocation> {
		self.source.as_ref()
	}

	/// The component that called the factory, when the transform reported one.
	pub fn self_token(&self) -> Option<Owner> {
		self.self_token.as_ref().and_then(WeakOwner::upgrade)
	}
}
