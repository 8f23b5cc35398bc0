//! The element value.
//!
//! An [`Element`] describes "render this type with these props". It is an
//! immutable, cheaply cloneable handle: factories build it once and nothing
//! hands out mutable access afterwards, which is how elements and their props
//! stay frozen.
//!
//! Development elements additionally carry a [`DevStore`] holding diagnostic
//! state (owner, validation flag, debug metadata). Production elements have no
//! store at all.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::debug::DebugMetadata;
use crate::element_type::ElementType;
use crate::owner::{Owner, WeakOwner};
use crate::props::Props;
use crate::value::PropValue;

/// Tag carried by every element; distinguishes elements from look-alike maps.
pub const ELEMENT_TAG: &str = "reinhardt.transitional.element";

/// Receives reports of deprecated reads performed through accessor shims.
pub(crate) trait AccessObserver: Send + Sync {
	/// `element.legacy_ref()` was read on an element of `component`.
	fn element_ref_accessed(&self, component: Option<&str>);

	/// `props.read_key()` was called on props whose key was extracted.
	fn props_key_accessed(&self, display_name: &str);
}

/// Whether an element's position has been confirmed as not needing a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
	/// Not yet seen by the key validator.
	Unconfirmed,
	/// Seen in a static position, or already reported.
	Validated,
}

/// Mutable diagnostic state of a development element.
pub(crate) struct DevStore {
	pub(crate) owner: Option<WeakOwner>,
	pub(crate) validated: AtomicBool,
	pub(crate) debug: DebugMetadata,
}

impl DevStore {
	pub(crate) fn new(owner: Option<&Owner>, debug: DebugMetadata) -> Self {
		Self {
			owner: owner.map(Owner::downgrade),
			validated: AtomicBool::new(false),
			debug,
		}
	}
}

/// The `ref` slot: the normalized value plus the observer told about reads.
struct RefSlot {
	value: PropValue,
	on_access: Option<Arc<dyn AccessObserver>>,
}

struct ElementInner {
	tag: &'static str,
	element_type: ElementType,
	key: Option<String>,
	props: Props,
	ref_slot: RefSlot,
	dev: Option<Box<DevStore>>,
}

/// An immutable description of what to render.
#[derive(Clone)]
pub struct Element(Arc<ElementInner>);

fn normalized_ref(props: &Props) -> PropValue {
	match props.ref_value() {
		None | Some(PropValue::Undefined) => PropValue::Null,
		Some(value) => value.clone(),
	}
}

impl Element {
	/// Builds a production element: plain `ref` field, no diagnostic state.
	pub(crate) fn bare(element_type: ElementType, key: Option<String>, props: Props) -> Self {
		let ref_slot = RefSlot {
			value: normalized_ref(&props),
			on_access: None,
		};
		Self(Arc::new(ElementInner {
			tag: ELEMENT_TAG,
			element_type,
			key,
			props,
			ref_slot,
			dev: None,
		}))
	}

	/// Builds a development element. A non-null `ref` is reported to
	/// `observer` whenever it is read through [`Element::legacy_ref`].
	pub(crate) fn instrumented(
		element_type: ElementType,
		key: Option<String>,
		props: Props,
		store: DevStore,
		observer: Arc<dyn AccessObserver>,
	) -> Self {
		let value = normalized_ref(&props);
		let on_access = if matches!(value, PropValue::Null) {
			None
		} else {
			Some(observer)
		};
		Self(Arc::new(ElementInner {
			tag: ELEMENT_TAG,
			element_type,
			key,
			props,
			ref_slot: RefSlot { value, on_access },
			dev: Some(Box::new(store)),
		}))
	}

	/// The tag identifying this value as an element.
	pub fn kind_tag(&self) -> &'static str {
		self.0.tag
	}

	/// The component designator.
	pub fn element_type(&self) -> &ElementType {
		&self.0.element_type
	}

	/// The identity key, if one was given.
	pub fn key(&self) -> Option<&str> {
		self.0.key.as_deref()
	}

	/// The frozen props.
	pub fn props(&self) -> &Props {
		&self.0.props
	}

	/// Reads the element-level `ref`.
	///
	/// This accessor is kept for compatibility only: `props().ref_value()` is
	/// the source of truth. In development builds a non-null read is
	/// reported once per component type.
	pub fn legacy_ref(&self) -> PropValue {
		if let Some(observer) = &self.0.ref_slot.on_access {
			observer.element_ref_accessed(self.0.element_type.component_name().as_deref());
		}
		self.0.ref_slot.value.clone()
	}

	/// The component that created this element, when known and still alive.
	pub fn owner(&self) -> Option<Owner> {
		self.dev_store()
			.and_then(|store| store.owner.as_ref())
			.and_then(WeakOwner::upgrade)
	}

	/// Debug metadata; `None` for production elements.
	pub fn debug(&self) -> Option<&DebugMetadata> {
		self.dev_store().map(|store| &store.debug)
	}

	/// Validation state; `None` for production elements.
	pub fn validation_state(&self) -> Option<ValidationState> {
		self.dev_store().map(|store| {
			if store.validated.load(Ordering::Relaxed) {
				ValidationState::Validated
			} else {
				ValidationState::Unconfirmed
			}
		})
	}

	/// Returns `true` if this element carries development instrumentation.
	pub fn is_instrumented(&self) -> bool {
		self.0.dev.is_some()
	}

	/// Returns `true` if both handles refer to the same element value.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	pub(crate) fn dev_store(&self) -> Option<&DevStore> {
		self.0.dev.as_deref()
	}

	pub(crate) fn is_validated(&self) -> bool {
		self.dev_store()
			.is_some_and(|store| store.validated.load(Ordering::Relaxed))
	}

	pub(crate) fn mark_validated(&self) {
		if let Some(store) = self.dev_store() {
			store.validated.store(true, Ordering::Relaxed);
		}
	}
}

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
			|| (self.0.element_type == other.0.element_type
				&& self.0.key == other.0.key
				&& self.0.props == other.0.props)
	}
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Element")
			.field("type", &self.0.element_type)
			.field("key", &self.0.key)
			.field("props", &self.0.props)
			.finish()
	}
}

/// Returns `true` only for values carrying the element tag.
pub fn is_valid_element(value: &PropValue) -> bool {
	matches!(value, PropValue::Element(element) if element.kind_tag() == ELEMENT_TAG)
}
