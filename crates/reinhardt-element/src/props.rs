//! Ordered prop mappings.
//!
//! [`Props`] is used both for the raw configuration handed to the factories
//! and for the normalized props stored on an element. Entries keep their
//! insertion order; inserting an existing name replaces the value in place.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::element::AccessObserver;
use crate::value::PropValue;

/// Name of the identity prop extracted by the factories.
pub const KEY: &str = "key";
/// Name of the reference prop.
pub const REF: &str = "ref";
/// Name of the children prop.
pub const CHILDREN: &str = "children";
/// Transpiler-only marker carrying the calling component.
pub const SELF_MARKER: &str = "__self";
/// Transpiler-only marker carrying the source location.
pub const SOURCE_MARKER: &str = "__source";

/// An ordered mapping from prop name to value.
#[derive(Clone, Default)]
pub struct Props {
	entries: Vec<(Cow<'static, str>, PropValue)>,
	key_shim: Option<KeyAccessShim>,
}

/// Replacement for a `key` entry that was extracted from props.
///
/// Reading `key` through [`Props::read_key`] reports the access instead of
/// returning a value. The shim is never an entry, so it is invisible to
/// [`Props::get`] and to the key compatibility predicates.
#[derive(Clone)]
pub(crate) struct KeyAccessShim {
	display_name: String,
	observer: Arc<dyn AccessObserver>,
}

impl KeyAccessShim {
	pub(crate) fn new(display_name: String, observer: Arc<dyn AccessObserver>) -> Self {
		Self {
			display_name,
			observer,
		}
	}
}

impl Props {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces an entry (builder style).
	pub fn prop(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Adds or replaces an entry.
	///
	/// A replaced entry keeps its original position.
	pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<PropValue>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	/// Copies every entry of `other` into `self`, in order.
	pub fn extend(&mut self, other: Props) {
		for (name, value) in other.entries {
			self.insert(name, value);
		}
	}

	/// Returns the value for `name`, if an entry exists.
	pub fn get(&self, name: &str) -> Option<&PropValue> {
		self.entries
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v)
	}

	/// Returns `true` if an entry named `name` exists, even when it is `Undefined`.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|(n, _)| n == name)
	}

	/// Returns the `children` entry.
	pub fn children(&self) -> Option<&PropValue> {
		self.get(CHILDREN)
	}

	/// Returns the `ref` entry. This is the source of truth for an element's ref.
	pub fn ref_value(&self) -> Option<&PropValue> {
		self.get(REF)
	}

	/// Reads `key` the way component code would.
	///
	/// On props whose key was extracted by a factory this reports the
	/// unsupported access (once per process) and returns `None`.
	pub fn read_key(&self) -> Option<&PropValue> {
		match &self.key_shim {
			Some(shim) => {
				shim.observer.props_key_accessed(&shim.display_name);
				None
			}
			None => self.get(KEY),
		}
	}

	/// Returns `true` when `key` reads are intercepted.
	pub fn has_key_shim(&self) -> bool {
		self.key_shim.is_some()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.entries.iter().map(|(n, v)| (&**n, v))
	}

	/// Iterates entry names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(n, _)| &**n)
	}

	/// Returns a fresh mapping holding every entry except those named in
	/// `excluded`. Order is preserved and any key shim is dropped.
	pub fn without(&self, excluded: &[&str]) -> Props {
		Self {
			entries: self
				.entries
				.iter()
				.filter(|(n, _)| !excluded.contains(&&**n))
				.cloned()
				.collect(),
			key_shim: None,
		}
	}

	/// Consuming variant of [`Props::without`].
	pub fn into_without(self, excluded: &[&str]) -> Props {
		Self {
			entries: self
				.entries
				.into_iter()
				.filter(|(n, _)| !excluded.contains(&&**n))
				.collect(),
			key_shim: None,
		}
	}

	/// Copies the entries only, leaving interceptors behind.
	pub fn shallow_copy(&self) -> Props {
		self.without(&[])
	}

	pub(crate) fn install_key_shim(&mut self, shim: KeyAccessShim) {
		self.key_shim = Some(shim);
	}
}

impl PartialEq for Props {
	fn eq(&self, other: &Self) -> bool {
		self.entries == other.entries
	}
}

impl fmt::Debug for Props {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.entries.iter().map(|(n, v)| (n, v)))
			.finish()
	}
}

impl<N, V> FromIterator<(N, V)> for Props
where
	N: Into<Cow<'static, str>>,
	V: Into<PropValue>,
{
	fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
		let mut props = Props::new();
		for (name, value) in iter {
			props.insert(name, value);
		}
		props
	}
}

impl IntoIterator for Props {
	type Item = (Cow<'static, str>, PropValue);
	type IntoIter = std::vec::IntoIter<(Cow<'static, str>, PropValue)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
