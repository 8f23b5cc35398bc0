//! Diagnostic sinks.

use parking_lot::Mutex;

use super::{Diagnostic, DiagnosticKind, DiagnosticLevel};

/// Destination for development diagnostics.
pub trait DiagnosticSink: Send + Sync {
	/// Delivers one diagnostic.
	fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` under the `reinhardt_element` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn emit(&self, diagnostic: &Diagnostic) {
		let kind = diagnostic.kind.as_str();
		let component = diagnostic.component.as_deref().unwrap_or("");
		let stack = diagnostic.component_stack.as_deref().unwrap_or("");
		match diagnostic.level {
			DiagnosticLevel::Error => tracing::error!(
				target: "reinhardt_element",
				kind,
				component,
				"{}{}",
				diagnostic.message,
				stack
			),
			DiagnosticLevel::Warn => tracing::warn!(
				target: "reinhardt_element",
				kind,
				component,
				"{}{}",
				diagnostic.message,
				stack
			),
		}
	}
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
	records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of the recorded diagnostics, oldest first.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		self.records.lock().clone()
	}

	/// Number of recorded diagnostics of `kind`.
	pub fn count(&self, kind: DiagnosticKind) -> usize {
		self.records
			.lock()
			.iter()
			.filter(|diagnostic| diagnostic.kind == kind)
			.count()
	}

	/// Recorded diagnostics of `kind`.
	pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<Diagnostic> {
		self.records
			.lock()
			.iter()
			.filter(|diagnostic| diagnostic.kind == kind)
			.cloned()
			.collect()
	}

	/// Total number of recorded diagnostics.
	pub fn len(&self) -> usize {
		self.records.lock().len()
	}

	/// Returns `true` if nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.records.lock().is_empty()
	}

	/// Forgets everything recorded so far.
	pub fn clear(&self) {
		self.records.lock().clear();
	}
}

impl DiagnosticSink for RecordingSink {
	fn emit(&self, diagnostic: &Diagnostic) {
		self.records.lock().push(diagnostic.clone());
	}
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
	fn emit(&self, _diagnostic: &Diagnostic) {}
}
