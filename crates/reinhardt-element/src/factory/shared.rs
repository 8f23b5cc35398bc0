//! Prop normalization shared by both factory implementations.

use crate::compat::has_valid_key;
use crate::diagnostics::Diagnostics;
use crate::element::Element;
use crate::element_type::ElementType;
use crate::props::{CHILDREN, KEY, Props, REF, SELF_MARKER, SOURCE_MARKER};
use crate::value::PropValue;

/// Entries the factories never copy into an element's props.
pub(crate) const RESERVED: [&str; 3] = [KEY, SELF_MARKER, SOURCE_MARKER];

/// Converts a key value to its string form.
///
/// Values without a well-defined string form are still converted, but a
/// diagnostic is raised when `diagnostics` is given.
pub(crate) fn coerce_key(value: &PropValue, diagnostics: Option<&Diagnostics>) -> String {
	if let Some(diagnostics) = diagnostics.filter(|_| !value.is_primitive()) {
		diagnostics.warn_key_coercion(value.type_name());
	}
	value.coerce_to_string()
}

/// Key for the compiler entry points: the positional key wins over a `key`
/// spread into `config`. An `Undefined` positional key counts as absent.
/// A spread key is coerced, and reported if unsupported, even when discarded.
pub(crate) fn compiler_key(
	config: &Props,
	maybe_key: Option<&PropValue>,
	diagnostics: Option<&Diagnostics>,
) -> Option<String> {
	let spread = config_key(config, diagnostics);
	match maybe_key {
		Some(value) if !value.is_undefined() => Some(coerce_key(value, diagnostics)),
		_ => spread,
	}
}

/// Key taken from a configuration mapping, if one was validly provided.
pub(crate) fn config_key(config: &Props, diagnostics: Option<&Diagnostics>) -> Option<String> {
	if !has_valid_key(config) {
		return None;
	}
	config.get(KEY).map(|value| coerce_key(value, diagnostics))
}

/// Props for the compiler entry points.
///
/// The configuration is reused as-is unless it carries a reserved entry or an
/// extracted key, in which case every other entry is copied, in order, into a
/// fresh mapping.
pub(crate) fn compiler_props(config: Props) -> Props {
	if config.has_key_shim() || RESERVED.iter().any(|name| config.contains(name)) {
		config.into_without(&RESERVED)
	} else {
		config
	}
}

/// Props for the legacy entry point: reserved entries are always stripped.
pub(crate) fn legacy_props(config: Option<Props>) -> Props {
	config
		.map(|config| config.into_without(&RESERVED))
		.unwrap_or_default()
}

/// Packs trailing children: none, one bare value, or an array.
pub(crate) fn collect_children(mut children: Vec<PropValue>) -> Option<PropValue> {
	match children.len() {
		0 => None,
		1 => children.pop(),
		_ => Some(PropValue::Array(children)),
	}
}

/// Fills entries that are missing or `Undefined` from the type's defaults.
pub(crate) fn resolve_default_props(props: &mut Props, element_type: &ElementType) {
	let Some(defaults) = element_type.default_props() else {
		return;
	};
	for (name, value) in defaults.iter() {
		if matches!(props.get(name), None | Some(PropValue::Undefined)) {
			props.insert(name.to_string(), value.clone());
		}
	}
}

/// Result of merging a clone configuration into a source element.
pub(crate) struct CloneMerge {
	pub(crate) key: Option<String>,
	pub(crate) props: Props,
	pub(crate) ref_overridden: bool,
}

/// Merges `config` and `children` over `element`'s props and key.
pub(crate) fn merge_clone(
	element: &Element,
	config: Option<Props>,
	children: Vec<PropValue>,
	apply_defaults: bool,
	diagnostics: Option<&Diagnostics>,
) -> CloneMerge {
	let mut props = element.props().shallow_copy();
	let mut key = element.key().map(str::to_string);
	let mut ref_overridden = false;

	if let Some(config) = config {
		ref_overridden = crate::compat::has_valid_ref(&config);
		if let Some(new_key) = config_key(&config, diagnostics) {
			key = Some(new_key);
		}
		let defaults = element.element_type().default_props();
		for (name, value) in config {
			if RESERVED.contains(&&*name) || (name == REF && value.is_undefined()) {
				continue;
			}
			let value = match defaults {
				Some(defaults) if apply_defaults && value.is_undefined() => {
					defaults.get(&name).cloned().unwrap_or_default()
				}
				_ => value,
			};
			props.insert(name, value);
		}
	}

	if let Some(children) = collect_children(children) {
		props.insert(CHILDREN, children);
	}

	CloneMerge {
		key,
		props,
		ref_overridden,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	use crate::diagnostics::NullSink;
	use crate::element::AccessObserver;
	use crate::element_type::Component;
	use crate::props::KeyAccessShim;
	use rstest::rstest;

	#[rstest]
	#[case(vec![], None)]
	#[case(vec![PropValue::from("a")], Some(PropValue::from("a")))]
	#[case(
		vec![PropValue::from("a"), PropValue::from("b")],
		Some(PropValue::Array(vec![PropValue::from("a"), PropValue::from("b")]))
	)]
	fn test_collect_children(#[case] children: Vec<PropValue>, #[case] expected: Option<PropValue>) {
		assert_eq!(collect_children(children), expected);
	}

	#[rstest]
	fn test_compiler_key_prefers_positional() {
		let config = Props::new().prop(KEY, "a");

		assert_eq!(
			compiler_key(&config, Some(&PropValue::from("b")), None).as_deref(),
			Some("b")
		);
		assert_eq!(
			compiler_key(&config, Some(&PropValue::Undefined), None).as_deref(),
			Some("a")
		);
		assert_eq!(compiler_key(&Props::new(), None, None), None);
	}

	#[rstest]
	#[case(PropValue::from(42), "42")]
	#[case(PropValue::from(1.5), "1.5")]
	#[case(PropValue::from(true), "true")]
	#[case(PropValue::Null, "null")]
	#[case(PropValue::from("x"), "x")]
	fn test_coerce_key(#[case] value: PropValue, #[case] expected: &str) {
		assert_eq!(coerce_key(&value, None), expected);
	}

	#[rstest]
	fn test_compiler_props_reuses_config_without_reserved_entries() {
		let config = Props::new().prop("title", "t");

		assert_eq!(compiler_props(config.clone()), config);
	}

	#[rstest]
	fn test_compiler_props_drops_key_shim() {
		let observer: Arc<dyn AccessObserver> = Arc::new(Diagnostics::new(Arc::new(NullSink)));
		let mut config = Props::new().prop("title", "t");
		config.install_key_shim(KeyAccessShim::new("li".to_string(), observer));

		let props = compiler_props(config);

		assert!(!props.has_key_shim());
		assert_eq!(props.names().collect::<Vec<_>>(), vec!["title"]);
	}

	#[rstest]
	fn test_compiler_props_copies_when_reserved_entries_present() {
		let config = Props::new()
			.prop("a", 1)
			.prop(KEY, "k")
			.prop(SOURCE_MARKER, PropValue::Null)
			.prop("b", 2);

		let props = compiler_props(config);

		assert_eq!(props.names().collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[rstest]
	fn test_resolve_default_props_fills_missing_and_undefined() {
		let button = Component::function("Button").with_default_props(
			Props::new()
				.prop("size", "md")
				.prop("variant", "plain")
				.prop("disabled", false),
		);
		let mut props = Props::new()
			.prop("size", PropValue::Undefined)
			.prop("variant", "primary")
			.prop("disabled", PropValue::Null);

		resolve_default_props(&mut props, &ElementType::from(button));

		assert_eq!(props.get("size"), Some(&PropValue::from("md")));
		assert_eq!(props.get("variant"), Some(&PropValue::from("primary")));
		assert_eq!(props.get("disabled"), Some(&PropValue::Null));
	}
}
