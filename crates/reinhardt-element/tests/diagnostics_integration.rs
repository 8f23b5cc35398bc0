//! Development Diagnostics Integration Tests
//!
//! Tests for the diagnostics raised while elements are built, validated and
//! read.
//!
//! Success Criteria:
//! 1. Each diagnostic fires under exactly the documented conditions
//! 2. Once-only diagnostics are reported once per signature
//! 3. Production factories never report anything
//!
//! Test Categories:
//! - Category 1: List Keys
//! - Category 2: Deprecated Reads
//! - Category 3: Misuse of the Entry Points
//! - Category 4: Production Silence

use std::sync::Arc;

use reinhardt_element::{
	BuildMode, Component, DevElementFactory, DiagnosticKind, DiagnosticLevel, DispatcherSlot,
	ElementFactory, ElementType, InvalidType, JsxSettings, NodeRef, Owner, OwnerStack, PropValue,
	Props, RecordingSink, create_factory,
};
use rstest::*;

#[fixture]
fn recorded() -> (Arc<RecordingSink>, DevElementFactory) {
	let sink = Arc::new(RecordingSink::new());
	let factory = DevElementFactory::new(JsxSettings::new(), sink.clone());
	(sink, factory)
}

fn unkeyed_items(factory: &DevElementFactory, count: usize) -> PropValue {
	PropValue::Array(
		(0..count)
			.map(|_| PropValue::from(factory.jsx(ElementType::host("li"), Props::new(), None)))
			.collect(),
	)
}

// ============================================================================
// Category 1: List Keys
// ============================================================================

/// Tests that a duplicate missing-key situation is logged once
#[rstest]
fn test_missing_key_logged_once(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;

	for _ in 0..3 {
		let children = unkeyed_items(&factory, 2);
		factory.jsx(ElementType::host("ul"), Props::new().prop("children", children), None);
	}

	let reported = sink.of_kind(DiagnosticKind::MissingListKey);
	assert_eq!(reported.len(), 1);
	assert_eq!(reported[0].level, DiagnosticLevel::Error);
	assert!(reported[0].message.starts_with("Each child in a list should have a unique \"key\" prop."));
	assert!(reported[0].message.contains("<ul>"));
}

/// Tests that keyed list items are accepted
#[rstest]
fn test_keyed_list_is_silent(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let children = PropValue::Array(
		["a", "b"]
			.into_iter()
			.map(|key| PropValue::from(factory.jsx(ElementType::host("li"), Props::new(), Some(key.into()))))
			.collect(),
	);

	factory.jsx(ElementType::host("ul"), Props::new().prop("children", children), None);

	assert!(sink.is_empty());
}

/// Tests that static children are individually in static positions
#[rstest]
fn test_static_children_need_no_keys(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let children = unkeyed_items(&factory, 2);

	factory.jsxs(ElementType::host("ul"), Props::new().prop("children", children), None);

	assert!(sink.is_empty());
}

/// Tests that a list nested inside static children is still checked
#[rstest]
fn test_list_inside_static_children(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let header = factory.jsx(ElementType::host("li"), Props::new(), None);
	let children = PropValue::Array(vec![header.into(), unkeyed_items(&factory, 2)]);

	factory.jsxs(ElementType::host("ul"), Props::new().prop("children", children), None);

	assert_eq!(sink.count(DiagnosticKind::MissingListKey), 1);
}

/// Tests the render-method addendum for different owners
#[rstest]
fn test_missing_key_reported_per_owner() {
	let sink = Arc::new(RecordingSink::new());
	let slot = Arc::new(DispatcherSlot::new());
	let stack = Arc::new(OwnerStack::new());
	let _guard = slot.install(stack.clone());
	let factory = DevElementFactory::with_dispatcher(JsxSettings::new(), sink.clone(), slot.clone());

	for name in ["TodoList", "TodoList", "Menu"] {
		let owner = Owner::component(Component::function(name));
		let _scope = stack.enter(owner);
		let children = unkeyed_items(&factory, 2);
		factory.create_element(ElementType::host("ul"), None, vec![children]);
	}

	let messages: Vec<String> = sink
		.of_kind(DiagnosticKind::MissingListKey)
		.into_iter()
		.map(|d| d.message)
		.collect();
	assert_eq!(messages.len(), 2);
	assert!(messages[0].contains("Check the render method of `TodoList`."));
	assert!(messages[1].contains("Check the render method of `Menu`."));
}

/// Tests that only trailing clone children are validated
#[rstest]
fn test_clone_validates_only_trailing_children(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let original = factory.create_element(
		ElementType::from(Component::function("Panel")),
		Some(Props::new().prop("children", unkeyed_items(&factory, 2))),
		vec![],
	);
	assert!(sink.is_empty());

	factory
		.clone_element(Some(&original), None, vec![])
		.unwrap();
	assert!(sink.is_empty());

	factory
		.clone_element(Some(&original), None, vec![unkeyed_items(&factory, 2)])
		.unwrap();
	let reported = sink.of_kind(DiagnosticKind::MissingListKey);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.contains("<Panel>"));
}

/// Tests that owner stacks mode leaves list keys to the renderer
#[rstest]
fn test_owner_stacks_mode_skips_key_reports() {
	let sink = Arc::new(RecordingSink::new());
	let factory = DevElementFactory::new(JsxSettings::new().with_owner_stacks(true), sink.clone());

	let children = unkeyed_items(&factory, 2);
	factory.jsx(ElementType::host("ul"), Props::new().prop("children", children), None);

	assert!(sink.is_empty());
}

// ============================================================================
// Category 2: Deprecated Reads
// ============================================================================

/// Tests that reading the element-level ref warns once per component type
#[rstest]
fn test_element_ref_read_warns_once_per_type(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let input = factory.jsx(
		ElementType::host("input"),
		Props::new().prop("ref", NodeRef::new()),
		None,
	);
	let other_input = factory.jsx(
		ElementType::host("input"),
		Props::new().prop("ref", NodeRef::new()),
		None,
	);
	let select = factory.jsx(
		ElementType::host("select"),
		Props::new().prop("ref", NodeRef::new()),
		None,
	);

	input.legacy_ref();
	input.legacy_ref();
	other_input.legacy_ref();
	select.legacy_ref();

	let reported = sink.of_kind(DiagnosticKind::ElementRefAccess);
	assert_eq!(reported.len(), 2);
	assert_eq!(reported[0].component.as_deref(), Some("input"));
	assert_eq!(reported[1].component.as_deref(), Some("select"));
}

/// Tests that reading a null ref is silent
#[rstest]
fn test_null_ref_read_is_silent(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let element = factory.jsx(ElementType::host("input"), Props::new(), None);

	assert_eq!(element.legacy_ref(), PropValue::Null);
	assert!(sink.is_empty());
}

/// Tests that reading key from props warns once and yields nothing
#[rstest]
fn test_key_read_from_props_warns_once(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let row = ElementType::from(Component::function("Row"));
	let first = factory.jsx(row.clone(), Props::new(), Some("1".into()));
	let second = factory.create_element(row, Some(Props::new().prop("key", "2")), vec![]);

	assert!(first.props().read_key().is_none());
	assert!(second.props().read_key().is_none());

	let reported = sink.of_kind(DiagnosticKind::KeyPropAccess);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.starts_with("Row: `key` is not a prop."));
}

/// Tests that props of unkeyed elements carry no key shim
#[rstest]
fn test_empty_key_installs_no_shim(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let unkeyed = factory.jsx(ElementType::host("div"), Props::new(), None);
	let empty_key = factory.jsx(ElementType::host("div"), Props::new(), Some("".into()));

	assert!(!unkeyed.props().has_key_shim());
	assert!(!empty_key.props().has_key_shim());
	assert!(unkeyed.props().read_key().is_none());
	assert!(sink.is_empty());
}

// ============================================================================
// Category 3: Misuse of the Entry Points
// ============================================================================

/// Tests the outdated transform warning
#[rstest]
fn test_old_jsx_runtime_warns_once(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let legacy = || Props::new().prop("__self", PropValue::Null);

	factory.create_element(ElementType::host("div"), Some(legacy()), vec![]);
	factory.create_element(ElementType::host("div"), Some(legacy()), vec![]);

	let reported = sink.of_kind(DiagnosticKind::OldJsxRuntime);
	assert_eq!(reported.len(), 1);
	assert_eq!(reported[0].level, DiagnosticLevel::Warn);
}

/// Tests that a keyed legacy call is not mistaken for an outdated transform
#[rstest]
fn test_old_jsx_runtime_ignores_keyed_config(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let config = Props::new().prop("__self", PropValue::Null).prop("key", "k");

	factory.create_element(ElementType::host("div"), Some(config), vec![]);

	assert_eq!(sink.count(DiagnosticKind::OldJsxRuntime), 0);
}

/// Tests key spread reporting and deduplication
#[rstest]
fn test_key_spread_warns_once_per_shape(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let spread = || Props::new().prop("key", "k").prop("id", "x");

	factory.jsx(ElementType::host("div"), spread(), None);
	factory.jsx(ElementType::host("div"), spread(), None);
	factory.jsx(ElementType::host("span"), spread(), None);

	let reported = sink.of_kind(DiagnosticKind::KeySpread);
	assert_eq!(reported.len(), 2);
	assert!(reported[0].message.contains("<div {...props} />"));
	assert!(reported[1].message.contains("<span key={someKey} {...props} />"));
}

/// Tests that props taken from a keyed element are copied without the key shim
#[rstest]
fn test_reused_keyed_props_drop_key_shim(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let keyed = factory.jsx(
		ElementType::host("li"),
		Props::new().prop("title", "t"),
		Some("a".into()),
	);
	assert!(keyed.props().has_key_shim());

	let fresh = factory.jsx(ElementType::host("span"), keyed.props().clone(), None);

	assert_eq!(fresh.key(), None);
	assert!(!fresh.props().has_key_shim());
	assert_eq!(fresh.props().get("title"), Some(&PropValue::from("t")));
	assert_eq!(fresh.props().read_key(), None);
	assert_eq!(sink.count(DiagnosticKind::KeyPropAccess), 0);
	let reported = sink.of_kind(DiagnosticKind::KeySpread);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.contains("<span {...props} />"));
}

/// Tests the invalid type report and the skipped child validation
#[rstest]
#[case(InvalidType::Undefined, "undefined", true)]
#[case(InvalidType::Null, "null", false)]
#[case(InvalidType::Array, "array", false)]
#[case(InvalidType::EmptyObject, "object", true)]
fn test_invalid_type_reported(
	recorded: (Arc<RecordingSink>, DevElementFactory),
	#[case] invalid: InvalidType,
	#[case] type_string: &str,
	#[case] export_hint: bool,
) {
	let (sink, factory) = recorded;
	let children = unkeyed_items(&factory, 2);

	factory.jsx(
		ElementType::from(invalid),
		Props::new().prop("children", children),
		None,
	);

	let reported = sink.of_kind(DiagnosticKind::InvalidElementType);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.starts_with("jsx: type is invalid"));
	assert!(reported[0].message.contains(&format!("but got: {type_string}.")));
	assert_eq!(reported[0].message.contains("forgot to export"), export_hint);
	assert_eq!(sink.count(DiagnosticKind::MissingListKey), 0);
}

/// Tests the invalid type report for an element literal
#[rstest]
fn test_invalid_type_element_literal(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let literal = factory.jsx(ElementType::from(Component::function("Header")), Props::new(), None);

	factory.create_element(ElementType::from(InvalidType::Element(literal)), None, vec![]);

	let message = &sink.of_kind(DiagnosticKind::InvalidElementType)[0].message;
	assert!(message.starts_with("create_element: type is invalid"));
	assert!(message.contains("but got: <Header />."));
	assert!(message.contains("JSX literal instead of a component"));
}

/// Tests that owner stacks mode defers invalid types to the renderer
#[rstest]
fn test_invalid_type_silent_with_owner_stacks() {
	let sink = Arc::new(RecordingSink::new());
	let factory = DevElementFactory::new(JsxSettings::new().with_owner_stacks(true), sink.clone());

	factory.jsx(ElementType::from(InvalidType::Null), Props::new(), None);

	assert!(sink.is_empty());
}

/// Tests that static children must be an array
#[rstest]
fn test_static_children_not_array(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;

	factory.jsxs(ElementType::host("p"), Props::new().prop("children", "text"), None);

	let reported = sink.of_kind(DiagnosticKind::StaticChildrenNotArray);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.starts_with("jsxs: Static children should always be an array."));
}

/// Tests that keys of unsupported types are coerced with a report
#[rstest]
fn test_object_key_is_coerced_with_report(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;

	let element = factory.jsx(
		ElementType::host("div"),
		Props::new(),
		Some(Props::new().prop("id", 1).into()),
	);
	let numeric = factory.jsx(ElementType::host("div"), Props::new(), Some(3.5.into()));

	assert_eq!(element.key(), Some("[object Object]"));
	assert_eq!(numeric.key(), Some("3.5"));
	let reported = sink.of_kind(DiagnosticKind::KeyCoercion);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.contains("unsupported type object"));
}

/// Tests that a spread key is checked even when the positional key wins
#[rstest]
fn test_discarded_spread_key_is_still_checked(recorded: (Arc<RecordingSink>, DevElementFactory)) {
	let (sink, factory) = recorded;
	let config = Props::new().prop("key", vec![PropValue::from(1)]).prop("id", "x");

	let element = factory.jsx(ElementType::host("div"), config, Some("a".into()));

	assert_eq!(element.key(), Some("a"));
	let reported = sink.of_kind(DiagnosticKind::KeyCoercion);
	assert_eq!(reported.len(), 1);
	assert!(reported[0].message.contains("unsupported type"));
}

// ============================================================================
// Category 4: Production Silence
// ============================================================================

/// Tests that the production factory reports nothing
#[rstest]
fn test_production_reports_nothing() {
	let sink = Arc::new(RecordingSink::new());
	let factory = create_factory(
		JsxSettings::new().with_mode(BuildMode::Production),
		sink.clone(),
	);

	let items = PropValue::Array(
		(0..2)
			.map(|_| PropValue::from(factory.jsx(ElementType::host("li"), Props::new(), None)))
			.collect(),
	);
	let list = factory.jsx(
		ElementType::host("ul"),
		Props::new()
			.prop("children", items)
			.prop("key", "spread")
			.prop("ref", NodeRef::new()),
		None,
	);
	factory.create_element(
		ElementType::from(InvalidType::Null),
		Some(Props::new().prop("__self", PropValue::Null)),
		vec![],
	);
	list.legacy_ref();
	list.props().read_key();

	assert!(sink.is_empty());
}
