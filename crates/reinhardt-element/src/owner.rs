//! Owner handles.
//!
//! An owner is the component that was being evaluated when an element was
//! created. It exists for diagnostics only: elements keep a weak reference so
//! that a long-lived element never extends the life of its creator.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::element_type::ElementType;

#[derive(Debug)]
enum OwnerInfo {
	/// A component instance tracked by the renderer.
	Component(ElementType),
	/// An owner known only by name, such as a server-rendered component.
	Named(Cow<'static, str>),
}

/// An opaque handle to the component that owns newly created elements.
#[derive(Clone)]
pub struct Owner(Arc<OwnerInfo>);

impl Owner {
	/// Creates an owner for a rendering component instance.
	pub fn component(element_type: impl Into<ElementType>) -> Self {
		Self(Arc::new(OwnerInfo::Component(element_type.into())))
	}

	/// Creates an owner known only by its name.
	pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
		Self(Arc::new(OwnerInfo::Named(name.into())))
	}

	/// The owner's display name.
	pub fn name(&self) -> Option<String> {
		match &*self.0 {
			OwnerInfo::Component(element_type) => element_type.component_name(),
			OwnerInfo::Named(name) => Some(name.to_string()),
		}
	}

	/// The owner's component type, when it is a component instance.
	pub fn element_type(&self) -> Option<&ElementType> {
		match &*self.0 {
			OwnerInfo::Component(element_type) => Some(element_type),
			OwnerInfo::Named(_) => None,
		}
	}

	/// Returns `true` if both handles refer to the same owner.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	pub(crate) fn downgrade(&self) -> WeakOwner {
		WeakOwner(Arc::downgrade(&self.0))
	}
}

impl PartialEq for Owner {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Owner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Owner").field(&self.name()).finish()
	}
}

/// Weak counterpart of [`Owner`] stored on elements.
#[derive(Clone)]
pub(crate) struct WeakOwner(Weak<OwnerInfo>);

impl WeakOwner {
	pub(crate) fn upgrade(&self) -> Option<Owner> {
		self.0.upgrade().map(Owner)
	}
}

impl fmt::Debug for WeakOwner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("WeakOwner")
			.field(&self.upgrade().and_then(|owner| owner.name()))
			.finish()
	}
}
