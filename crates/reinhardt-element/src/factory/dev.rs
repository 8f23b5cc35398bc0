//! Instrumented development factory.

use std::sync::Arc;

use crate::debug::{DebugMetadata, DebugStack, DebugTask, SourceLocation};
use crate::diagnostics::{DiagnosticSink, Diagnostics};
use crate::dispatcher::DispatcherSlot;
use crate::element::{AccessObserver, DevStore, Element};
use crate::element_type::ElementType;
use crate::error::{ElementError, ElementResult};
use crate::owner::Owner;
use crate::props::{CHILDREN, KEY, KeyAccessShim, Props, SELF_MARKER};
use crate::settings::{BuildMode, JsxSettings};
use crate::validation::KeyValidator;
use crate::value::PropValue;

use super::shared::{
	collect_children, compiler_key, compiler_props, config_key, legacy_props, merge_clone,
	resolve_default_props,
};
use super::{API_CREATE_ELEMENT, API_JSX, API_JSXS, ElementFactory, ElementParts};

/// Builds instrumented elements and reports misuse.
///
/// Each factory owns its diagnostics registry and its owner slot, so two
/// factories never share once-only state.
#[derive(Debug)]
pub struct DevElementFactory {
	settings: JsxSettings,
	diagnostics: Arc<Diagnostics>,
	dispatcher: Arc<DispatcherSlot>,
	validator: KeyValidator,
}

impl DevElementFactory {
	/// Creates a development factory reporting to `sink`, with its own empty
	/// owner slot. The mode in `settings` is forced to
	/// [`BuildMode::Development`].
	pub fn new(settings: JsxSettings, sink: Arc<dyn DiagnosticSink>) -> Self {
		Self::with_dispatcher(settings, sink, Arc::new(DispatcherSlot::new()))
	}

	/// Creates a development factory consulting an existing owner slot.
	pub fn with_dispatcher(
		settings: JsxSettings,
		sink: Arc<dyn DiagnosticSink>,
		dispatcher: Arc<DispatcherSlot>,
	) -> Self {
		let settings = settings.with_mode(BuildMode::Development);
		let diagnostics = Arc::new(Diagnostics::new(sink));
		let validator = KeyValidator::new(
			diagnostics.clone(),
			dispatcher.clone(),
			settings.enable_owner_stacks,
		);
		Self {
			settings,
			diagnostics,
			dispatcher,
			validator,
		}
	}

	/// The diagnostics channel.
	pub fn diagnostics(&self) -> &Arc<Diagnostics> {
		&self.diagnostics
	}

	/// The child key validator.
	pub fn validator(&self) -> &KeyValidator {
		&self.validator
	}

	fn observer(&self) -> Arc<dyn AccessObserver> {
		self.diagnostics.clone()
	}

	fn owner_stacks(&self) -> bool {
		self.settings.enable_owner_stacks
	}

	/// Debug metadata for a fresh element; empty unless owner stacks are on.
	#[track_caller]
	fn debug_parts(&self, element_type: &ElementType) -> (Option<DebugStack>, Option<DebugTask>) {
		if self.owner_stacks() {
			(
				Some(DebugStack::capture()),
				Some(DebugTask::for_type(element_type)),
			)
		} else {
			(None, None)
		}
	}

	/// Reports an invalid type. Returns `false` when children must not be
	/// validated.
	fn check_type(&self, api: &str, element_type: &ElementType) -> bool {
		match element_type {
			ElementType::Invalid(invalid) if !self.owner_stacks() => {
				self.diagnostics.warn_invalid_type(api, invalid);
				false
			}
			_ => true,
		}
	}

	fn install_key_shim(&self, props: &mut Props, element_type: &ElementType, key: Option<&str>) {
		if key.is_some_and(|key| !key.is_empty()) {
			props.install_key_shim(KeyAccessShim::new(
				element_type.key_warning_display_name(),
				self.observer(),
			));
		}
	}

	/// The compiler entry point with transform-supplied debug information.
	///
	/// `jsx` and `jsxs` are this function with `is_static_children` set
	/// accordingly and no source or self token.
	#[track_caller]
	pub fn jsx_dev(
		&self,
		element_type: ElementType,
		config: Props,
		maybe_key: Option<PropValue>,
		is_static_children: bool,
		source: Option<SourceLocation>,
		self_token: Option<Owner>,
	) -> Element {
		let api = if is_static_children { API_JSXS } else { API_JSX };

		if self.check_type(api, &element_type) {
			match config.children() {
				None | Some(PropValue::Undefined) => {}
				Some(children) if is_static_children => match children.as_array() {
					Some(items) => {
						for item in items {
							self.validator.validate_child_keys(item, &element_type);
						}
					}
					None => self.diagnostics.warn_static_children_not_array(api),
				},
				Some(children) => self.validator.validate_child_keys(children, &element_type),
			}
		}

		if config.contains(KEY) || config.has_key_shim() {
			let component = element_type
				.component_name()
				.unwrap_or_else(|| "Unknown".to_string());
			let others: Vec<&str> = config.names().filter(|name| *name != KEY).collect();
			self.diagnostics.warn_key_spread(&component, &others);
		}

		let key = compiler_key(&config, maybe_key.as_ref(), Some(&self.diagnostics));
		let mut props = compiler_props(config);
		if !self.settings.disable_default_props_except_for_classes {
			resolve_default_props(&mut props, &element_type);
		}
		self.install_key_shim(&mut props, &element_type, key.as_deref());

		let (debug_stack, debug_task) = self.debug_parts(&element_type);
		self.build_element(ElementParts {
			element_type,
			key,
			self_token,
			source,
			owner: self.dispatcher.get_owner(),
			props,
			debug_stack,
			debug_task,
		})
	}
}

impl ElementFactory for DevElementFactory {
	fn settings(&self) -> &JsxSettings {
		&self.settings
	}

	fn dispatcher(&self) -> Option<&Arc<DispatcherSlot>> {
		Some(&self.dispatcher)
	}

	fn build_element(&self, parts: ElementParts) -> Element {
		let debug = DebugMetadata {
			stack: parts.debug_stack,
			task: parts.debug_task,
			source: parts.source,
			self_token: parts.self_token.as_ref().map(Owner::downgrade),
		};
		Element::instrumented(
			parts.element_type,
			parts.key,
			parts.props,
			DevStore::new(parts.owner.as_ref(), debug),
			self.observer(),
		)
	}

	fn jsx(&self, element_type: ElementType, config: Props, maybe_key: Option<PropValue>) -> Element {
		self.jsx_dev(element_type, config, maybe_key, false, None, None)
	}

	fn jsxs(&self, element_type: ElementType, config: Props, maybe_key: Option<PropValue>) -> Element {
		self.jsx_dev(element_type, config, maybe_key, true, None, None)
	}

	fn create_element(
		&self,
		element_type: ElementType,
		config: Option<Props>,
		children: Vec<PropValue>,
	) -> Element {
		if self.check_type(API_CREATE_ELEMENT, &element_type) {
			for child in &children {
				self.validator.validate_child_keys(child, &element_type);
			}
		}

		let key = match &config {
			Some(config) => {
				if config.contains(SELF_MARKER) && !config.contains(KEY) {
					self.diagnostics.warn_old_jsx_runtime();
				}
				config_key(config, Some(&self.diagnostics))
			}
			None => None,
		};

		let mut props = legacy_props(config);
		if let Some(children) = collect_children(children) {
			props.insert(CHILDREN, children);
		}
		resolve_default_props(&mut props, &element_type);
		self.install_key_shim(&mut props, &element_type, key.as_deref());

		let (debug_stack, debug_task) = self.debug_parts(&element_type);
		self.build_element(ElementParts {
			owner: self.dispatcher.get_owner(),
			debug_stack,
			debug_task,
			..ElementParts::new(element_type, key, props)
		})
	}

	fn clone_element(
		&self,
		element: Option<&Element>,
		config: Option<Props>,
		children: Vec<PropValue>,
	) -> ElementResult<Element> {
		let element =
			element.ok_or_else(|| ElementError::InvalidArgument("None".to_string()))?;
		let trailing = children.clone();
		let merged = merge_clone(
			element,
			config,
			children,
			!self.settings.disable_default_props_except_for_classes,
			Some(&self.diagnostics),
		);

		let owner = if merged.ref_overridden {
			self.dispatcher.get_owner()
		} else {
			element.owner()
		};
		let inherited = element.debug();
		let cloned = self.build_element(ElementParts {
			owner,
			debug_stack: inherited.and_then(|debug| debug.stack().copied()),
			debug_task: inherited.and_then(|debug| debug.task().cloned()),
			..ElementParts::new(element.element_type().clone(), merged.key, merged.props)
		});
		if element.is_validated() {
			cloned.mark_validated();
		}

		for child in &trailing {
			self.validator
				.validate_child_keys(child, cloned.element_type());
		}
		Ok(cloned)
	}

	fn clone_and_replace_key(&self, element: &Element, new_key: Option<String>) -> Element {
		let inherited = element.debug();
		let cloned = self.build_element(ElementParts {
			owner: element.owner(),
			debug_stack: inherited.and_then(|debug| debug.stack().copied()),
			debug_task: inherited.and_then(|debug| debug.task().cloned()),
			..ElementParts::new(element.element_type().clone(), new_key, element.props().clone())
		});
		if element.is_validated() {
			cloned.mark_validated();
		}
		cloned
	}
}
