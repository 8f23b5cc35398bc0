//! Bare production factory.

use crate::element::Element;
use crate::element_type::ElementType;
use crate::error::{ElementError, ElementResult};
use crate::props::{CHILDREN, Props};
use crate::settings::{BuildMode, JsxSettings};
use crate::value::PropValue;

use super::shared::{
	collect_children, compiler_key, compiler_props, config_key, legacy_props, merge_clone,
	resolve_default_props,
};
use super::{ElementFactory, ElementParts};

/// Builds bare elements: no owner, no validation state, no diagnostics.
#[derive(Debug, Clone)]
pub struct ProdElementFactory {
	settings: JsxSettings,
}

impl ProdElementFactory {
	/// Creates a production factory. The mode in `settings` is forced to
	/// [`BuildMode::Production`].
	pub fn new(settings: JsxSettings) -> Self {
		Self {
			settings: settings.with_mode(BuildMode::Production),
		}
	}

	fn compiler_element(
		&self,
		element_type: ElementType,
		config: Props,
		maybe_key: Option<PropValue>,
	) -> Element {
		let key = compiler_key(&config, maybe_key.as_ref(), None);
		let mut props = compiler_props(config);
		if !self.settings.disable_default_props_except_for_classes {
			resolve_default_props(&mut props, &element_type);
		}
		self.build_element(ElementParts::new(element_type, key, props))
	}
}

impl Default for ProdElementFactory {
	fn default() -> Self {
		Self::new(JsxSettings::default())
	}
}

impl ElementFactory for ProdElementFactory {
	fn settings(&self) -> &JsxSettings {
		&self.settings
	}

	fn build_element(&self, parts: ElementParts) -> Element {
		Element::bare(parts.element_type, parts.key, parts.props)
	}

	fn jsx(&self, element_type: ElementType, config: Props, maybe_key: Option<PropValue>) -> Element {
		self.compiler_element(element_type, config, maybe_key)
	}

	fn jsxs(&self, element_type: ElementType, config: Props, maybe_key: Option<PropValue>) -> Element {
		self.compiler_element(element_type, config, maybe_key)
	}

	fn create_element(
		&self,
		element_type: ElementType,
		config: Option<Props>,
		children: Vec<PropValue>,
	) -> Element {
		let key = config
			.as_ref()
			.and_then(|config| config_key(config, None));
		let mut props = legacy_props(config);
		if let Some(children) = collect_children(children) {
			props.insert(CHILDREN, children);
		}
		resolve_default_props(&mut props, &element_type);
		self.build_element(ElementParts::new(element_type, key, props))
	}

	fn clone_element(
		&self,
		element: Option<&Element>,
		config: Option<Props>,
		children: Vec<PropValue>,
	) -> ElementResult<Element> {
		let element =
			element.ok_or_else(|| ElementError::InvalidArgument("None".to_string()))?;
		let merged = merge_clone(
			element,
			config,
			children,
			!self.settings.disable_default_props_except_for_classes,
			None,
		);
		Ok(self.build_element(ElementParts::new(
			element.element_type().clone(),
			merged.key,
			merged.props,
		)))
	}

	fn clone_and_replace_key(&self, element: &Element, new_key: Option<String>) -> Element {
		self.build_element(ElementParts::new(
			element.element_type().clone(),
			new_key,
			element.props().clone(),
		))
	}
}
