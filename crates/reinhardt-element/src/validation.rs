//! Child key validation.
//!
//! Children passed as lists must carry keys so the reconciler can match them
//! across renders. The validator walks the children handed to an entry point,
//! reports unkeyed list items once per rendering context and marks every
//! element it has looked at as validated.

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::dispatcher::DispatcherSlot;
use crate::element::Element;
use crate::element_type::ElementType;
use crate::value::{IterationProtocol, PropValue};

/// Validates child keys for a development factory.
#[derive(Debug, Clone)]
pub struct KeyValidator {
	diagnostics: Arc<Diagnostics>,
	dispatcher: Arc<DispatcherSlot>,
	owner_stacks: bool,
}

impl KeyValidator {
	/// Creates a validator.
	///
	/// With `owner_stacks` enabled the validator only marks direct element
	/// children; key reporting is left to the renderer.
	pub fn new(
		diagnostics: Arc<Diagnostics>,
		dispatcher: Arc<DispatcherSlot>,
		owner_stacks: bool,
	) -> Self {
		Self {
			diagnostics,
			dispatcher,
			owner_stacks,
		}
	}

	/// Checks one children value passed to an element of `parent_type`.
	pub fn validate_child_keys(&self, node: &PropValue, parent_type: &ElementType) {
		if self.owner_stacks {
			if let PropValue::Element(element) = node {
				element.mark_validated();
			}
			return;
		}
		match node {
			PropValue::Array(items) => {
				for item in items {
					if let PropValue::Element(element) = item {
						self.validate_explicit_key(element, parent_type);
					}
				}
			}
			PropValue::Element(element) => element.mark_validated(),
			PropValue::Iterable(iterable) if iterable.protocol() == IterationProtocol::Collection => {
				for item in iterable.iter() {
					if let PropValue::Element(element) = item {
						self.validate_explicit_key(element, parent_type);
					}
				}
			}
			_ => {}
		}
	}

	/// Reports `element` if it sits in a list without a key.
	///
	/// Returns `true` if a diagnostic was emitted.
	pub fn validate_explicit_key(&self, element: &Element, parent_type: &ElementType) -> bool {
		if self.owner_stacks || !element.is_instrumented() {
			return false;
		}
		if element.is_validated() || element.key().is_some() {
			return false;
		}
		element.mark_validated();

		let error_info = self.current_component_error_info(parent_type);
		let current_owner = self.dispatcher.get_owner();
		let element_owner = element.owner();

		let child_owner = match &element_owner {
			Some(owner) if !current_owner.as_ref().is_some_and(|current| current.ptr_eq(owner)) => {
				format!(
					" It was passed a child from {}.",
					owner.name().unwrap_or_else(|| "Unknown".to_string())
				)
			}
			_ => String::new(),
		};

		let component = element.element_type().component_name();
		let stack = component_frame(element, element_owner.as_ref().and_then(|o| o.name()));
		let emitted = self.diagnostics.warn_missing_key(
			&error_info,
			&child_owner,
			component.as_deref(),
			stack,
		);
		if emitted {
			tracing::trace!(
				target: "reinhardt_element",
				component = component.as_deref().unwrap_or(""),
				"reported unkeyed list child"
			);
		}
		emitted
	}

	/// "Check the render method of ..." addendum for the current context.
	pub fn current_component_error_info(&self, parent_type: &ElementType) -> String {
		if let Some(name) = self.dispatcher.get_owner().and_then(|owner| owner.name()) {
			return format!("\n\nCheck the render method of `{name}`.");
		}
		match parent_type.component_name() {
			Some(parent) => format!("\n\nCheck the top-level render call using <{parent}>."),
			None => String::new(),
		}
	}
}

/// One component-stack frame describing `element`.
fn component_frame(element: &Element, owner_name: Option<String>) -> Option<String> {
	let name = element.element_type().component_name()?;
	Some(match owner_name {
		Some(owner) => format!("\n    in {name} (created by {owner})"),
		None => format!("\n    in {name}"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagnostics::{DiagnosticKind, RecordingSink};
	use crate::dispatcher::OwnerStack;
	use crate::element::ValidationState;
	use crate::factory::{DevElementFactory, ElementFactory};
	use crate::owner::Owner;
	use crate::props::Props;
	use crate::settings::JsxSettings;
	use crate::value::ChildIterable;
	use rstest::{fixture, rstest};

	#[fixture]
	fn factory() -> (Arc<RecordingSink>, DevElementFactory) {
		let sink = Arc::new(RecordingSink::new());
		let factory = DevElementFactory::new(JsxSettings::new(), sink.clone());
		(sink, factory)
	}

	fn item(factory: &DevElementFactory, key: Option<&'static str>) -> Element {
		factory.jsx(ElementType::host("li"), Props::new(), key.map(PropValue::from))
	}

	#[rstest]
	fn test_unkeyed_array_items_are_reported_once(factory: (Arc<RecordingSink>, DevElementFactory)) {
		let (sink, factory) = factory;
		let children = PropValue::Array(vec![
			item(&factory, None).into(),
			item(&factory, None).into(),
		]);

		factory
			.validator()
			.validate_child_keys(&children, &ElementType::host("ul"));

		let reported = sink.of_kind(DiagnosticKind::MissingListKey);
		assert_eq!(reported.len(), 1);
		assert!(
			reported[0]
				.message
				.contains("Check the top-level render call using <ul>.")
		);
		assert_eq!(reported[0].component_stack.as_deref(), Some("\n    in li"));
	}

	#[rstest]
	fn test_keyed_items_are_not_reported(factory: (Arc<RecordingSink>, DevElementFactory)) {
		let (sink, factory) = factory;
		let keyed = item(&factory, Some("a"));
		let children = PropValue::Array(vec![keyed.clone().into()]);

		factory
			.validator()
			.validate_child_keys(&children, &ElementType::host("ul"));

		assert!(sink.is_empty());
		assert_eq!(keyed.validation_state(), Some(ValidationState::Unconfirmed));
	}

	#[rstest]
	fn test_single_element_is_marked_validated(factory: (Arc<RecordingSink>, DevElementFactory)) {
		let (sink, factory) = factory;
		let child = item(&factory, None);

		factory
			.validator()
			.validate_child_keys(&child.clone().into(), &ElementType::host("ul"));

		assert!(sink.is_empty());
		assert_eq!(child.validation_state(), Some(ValidationState::Validated));
	}

	#[rstest]
	fn test_validated_child_is_skipped(factory: (Arc<RecordingSink>, DevElementFactory)) {
		let (sink, factory) = factory;
		let child = item(&factory, None);
		child.mark_validated();

		assert!(
			!factory
				.validator()
				.validate_explicit_key(&child, &ElementType::host("ul"))
		);
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_only_reusable_iterables_are_walked(factory: (Arc<RecordingSink>, DevElementFactory)) {
		let (sink, factory) = factory;
		let one_shot = ChildIterable::with_protocol(
			IterationProtocol::OneShot,
			vec![PropValue::from(item(&factory, None))],
		);
		let collection = ChildIterable::collection(vec![PropValue::from(item(&factory, None))]);

		factory
			.validator()
			.validate_child_keys(&one_shot.into(), &ElementType::host("ul"));
		assert!(sink.is_empty());

		factory
			.validator()
			.validate_child_keys(&collection.into(), &ElementType::host("ul"));
		assert_eq!(sink.count(DiagnosticKind::MissingListKey), 1);
	}

	#[rstest]
	fn test_error_info_names_current_owner_and_child_owner() {
		let sink = Arc::new(RecordingSink::new());
		let slot = Arc::new(DispatcherSlot::new());
		let stack = Arc::new(OwnerStack::new());
		let _guard = slot.install(stack.clone());
		let factory =
			DevElementFactory::with_dispatcher(JsxSettings::new(), sink.clone(), slot.clone());
		let row = Owner::named("Row");

		let child = {
			let _scope = stack.enter(row.clone());
			item(&factory, None)
		};
		let _scope = stack.enter(Owner::named("Table"));
		factory.validator().validate_child_keys(
			&PropValue::Array(vec![child.into()]),
			&ElementType::host("tbody"),
		);

		let message = &sink.of_kind(DiagnosticKind::MissingListKey)[0].message;
		assert!(message.contains("Check the render method of `Table`."));
		assert!(message.ends_with(" It was passed a child from Row."));
		assert_eq!(
			sink.of_kind(DiagnosticKind::MissingListKey)[0]
				.component_stack
				.as_deref(),
			Some("\n    in li (created by Row)")
		);
	}

	#[rstest]
	fn test_dropped_child_owner_is_not_named() {
		let sink = Arc::new(RecordingSink::new());
		let slot = Arc::new(DispatcherSlot::new());
		let stack = Arc::new(OwnerStack::new());
		let _guard = slot.install(stack.clone());
		let factory =
			DevElementFactory::with_dispatcher(JsxSettings::new(), sink.clone(), slot.clone());

		let child = {
			let _scope = stack.enter(Owner::named("Transient"));
			item(&factory, None)
		};
		factory.validator().validate_child_keys(
			&PropValue::Array(vec![child.into()]),
			&ElementType::host("ul"),
		);

		let message = &sink.of_kind(DiagnosticKind::MissingListKey)[0].message;
		assert!(!message.contains("It was passed a child from"));
	}

	#[rstest]
	fn test_owner_stacks_mode_only_marks() {
		let sink = Arc::new(RecordingSink::new());
		let factory = DevElementFactory::new(JsxSettings::new().with_owner_stacks(true), sink.clone());
		let direct = item(&factory, None);
		let listed = item(&factory, None);

		factory
			.validator()
			.validate_child_keys(&direct.clone().into(), &ElementType::host("ul"));
		factory.validator().validate_child_keys(
			&PropValue::Array(vec![listed.clone().into()]),
			&ElementType::host("ul"),
		);

		assert!(sink.is_empty());
		assert_eq!(direct.validation_state(), Some(ValidationState::Validated));
		assert_eq!(listed.validation_state(), Some(ValidationState::Unconfirmed));
	}
}
