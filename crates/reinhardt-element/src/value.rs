//! Dynamic prop values.
//!
//! Props handed to an element factory are untyped: a single element may carry
//! strings, numbers, callbacks, refs, nested elements and child lists side by
//! side. [`PropValue`] is the value representation shared by every entry point.
//!
//! `Undefined` and `Null` are distinct. `Undefined` marks an entry that is
//! present but carries no value; it takes part in default-prop resolution and
//! in the "absent override" rules of `clone_element`.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::element::Element;
use crate::props::Props;

/// A dynamically typed prop value.
#[derive(Clone, Default)]
pub enum PropValue {
	/// Present but without a value.
	#[default]
	Undefined,
	/// An explicit empty value.
	Null,
	/// A boolean.
	Bool(bool),
	/// A number. Integers are stored as `f64`.
	Number(f64),
	/// A string.
	String(Cow<'static, str>),
	/// A nested element.
	Element(Element),
	/// An ordered list of values, typically children.
	Array(Vec<PropValue>),
	/// A child container traversed through the iteration protocol.
	Iterable(ChildIterable),
	/// A nested mapping (for example a style object).
	Object(Props),
	/// A callable value such as an event handler.
	Callback(Callback),
	/// A mutable reference slot.
	Ref(NodeRef),
}

impl PropValue {
	/// Creates a string value.
	pub fn string(value: impl Into<Cow<'static, str>>) -> Self {
		Self::String(value.into())
	}

	/// Returns `true` for [`PropValue::Undefined`].
	pub fn is_undefined(&self) -> bool {
		matches!(self, Self::Undefined)
	}

	/// Returns `true` for `Undefined` and `Null`.
	pub fn is_nullish(&self) -> bool {
		matches!(self, Self::Undefined | Self::Null)
	}

	/// Returns the element if this value is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}

	/// Returns the string slice if this value is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the list if this value is an array.
	pub fn as_array(&self) -> Option<&[PropValue]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Returns the number if this value is one.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Name of the value's runtime category, as used in diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Callback(_) => "function",
			Self::Array(_) => "array",
			Self::Element(_) | Self::Iterable(_) | Self::Object(_) | Self::Ref(_) => "object",
		}
	}

	/// Returns `true` when converting this value to a string is lossless and
	/// well defined (strings, numbers, booleans, `null`, `undefined`).
	pub fn is_primitive(&self) -> bool {
		matches!(
			self,
			Self::Undefined | Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_)
		)
	}

	/// Converts the value to a string with the markup runtime's coercion rules.
	///
	/// Numbers drop a zero fraction (`42.0` becomes `"42"`), arrays are joined
	/// with commas, and objects collapse to `"[object Object]"`.
	pub fn coerce_to_string(&self) -> String {
		match self {
			Self::Undefined => "undefined".to_string(),
			Self::Null => "null".to_string(),
			Self::Bool(b) => b.to_string(),
			Self::Number(n) => format_number(*n),
			Self::String(s) => s.to_string(),
			Self::Array(items) => items
				.iter()
				.map(|item| {
					if item.is_nullish() {
						String::new()
					} else {
						item.coerce_to_string()
					}
				})
				.collect::<Vec<_>>()
				.join(","),
			Self::Callback(callback) => format!("function {}", callback.name().unwrap_or("")),
			Self::Element(_) | Self::Iterable(_) | Self::Object(_) | Self::Ref(_) => {
				"[object Object]".to_string()
			}
		}
	}
}

/// Formats a number the way the markup runtime prints it.
pub(crate) fn format_number(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_string()
	} else if n.is_infinite() {
		let sign = if n > 0.0 { "" } else { "-" };
		format!("{sign}Infinity")
	} else if n == 0.0 {
		"0".to_string()
	} else if n.abs() >= 1e21 || n.abs() < 1e-6 {
		let formatted = format!("{n:e}");
		match formatted.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => {
				format!("{mantissa}e+{exponent}")
			}
			_ => formatted,
		}
	} else {
		format!("{n}")
	}
}

impl PartialEq for PropValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Element(a), Self::Element(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => a == b,
			(Self::Iterable(a), Self::Iterable(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a == b,
			(Self::Callback(a), Self::Callback(b)) => a == b,
			(Self::Ref(a), Self::Ref(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Debug for PropValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Undefined => write!(f, "Undefined"),
			Self::Null => write!(f, "Null"),
			Self::Bool(b) => write!(f, "{b:?}"),
			Self::Number(n) => write!(f, "{}", format_number(*n)),
			Self::String(s) => write!(f, "{s:?}"),
			Self::Element(element) => fmt::Debug::fmt(element, f),
			Self::Array(items) => f.debug_list().entries(items).finish(),
			Self::Iterable(iterable) => fmt::Debug::fmt(iterable, f),
			Self::Object(props) => fmt::Debug::fmt(props, f),
			Self::Callback(callback) => fmt::Debug::fmt(callback, f),
			Self::Ref(node_ref) => fmt::Debug::fmt(node_ref, f),
		}
	}
}

impl From<&'static str> for PropValue {
	fn from(value: &'static str) -> Self {
		Self::String(Cow::Borrowed(value))
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::String(Cow::Owned(value))
	}
}

impl From<Cow<'static, str>> for PropValue {
	fn from(value: Cow<'static, str>) -> Self {
		Self::String(value)
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! impl_from_number {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for PropValue {
				fn from(value: $ty) -> Self {
					Self::Number(value as f64)
				}
			}
		)*
	};
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<Element> for PropValue {
	fn from(value: Element) -> Self {
		Self::Element(value)
	}
}

impl From<Vec<PropValue>> for PropValue {
	fn from(value: Vec<PropValue>) -> Self {
		Self::Array(value)
	}
}

impl From<Props> for PropValue {
	fn from(value: Props) -> Self {
		Self::Object(value)
	}
}

impl From<Callback> for PropValue {
	fn from(value: Callback) -> Self {
		Self::Callback(value)
	}
}

impl From<NodeRef> for PropValue {
	fn from(value: NodeRef) -> Self {
		Self::Ref(value)
	}
}

impl From<ChildIterable> for PropValue {
	fn from(value: ChildIterable) -> Self {
		Self::Iterable(value)
	}
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// A cloneable callable prop value.
///
/// Identity is pointer identity: two callbacks are equal only when they wrap
/// the same closure allocation.
#[derive(Clone)]
pub struct Callback {
	name: Option<Cow<'static, str>>,
	inner: Arc<dyn Fn(PropValue) -> PropValue + Send + Sync + 'static>,
}

impl Callback {
	/// Wraps a closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(PropValue) -> PropValue + Send + Sync + 'static,
	{
		Self {
			name: None,
			inner: Arc::new(f),
		}
	}

	/// Wraps a closure under a name shown in diagnostics.
	pub fn named<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
	where
		F: Fn(PropValue) -> PropValue + Send + Sync + 'static,
	{
		Self {
			name: Some(name.into()),
			inner: Arc::new(f),
		}
	}

	/// Invokes the callback.
	pub fn call(&self, arg: PropValue) -> PropValue {
		(self.inner)(arg)
	}

	/// Returns the callback's name, if it has one.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}

impl PartialEq for Callback {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Callback {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback")
			.field("name", &self.name)
			.field("inner", &"<closure>")
			.finish()
	}
}

/// A shared, externally settable reference slot (the value behind `ref`).
#[derive(Clone, Default)]
pub struct NodeRef {
	current: Arc<Mutex<PropValue>>,
}

impl NodeRef {
	/// Creates an empty reference slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the current value.
	pub fn current(&self) -> PropValue {
		self.current.lock().clone()
	}

	/// Replaces the current value.
	pub fn set(&self, value: impl Into<PropValue>) {
		*self.current.lock() = value.into();
	}
}

impl PartialEq for NodeRef {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.current, &other.current)
	}
}

impl fmt::Debug for NodeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeRef").finish_non_exhaustive()
	}
}

/// How a [`ChildIterable`] yields its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationProtocol {
	/// A reusable collection; iterating it does not consume it.
	Collection,
	/// An entries iterator yielding `[key, value]` pairs.
	Entries,
	/// An iterator that is its own iterable; iterating consumes it.
	OneShot,
}

/// A non-array child container.
///
/// Key validation only walks [`IterationProtocol::Collection`] containers:
/// walking a one-shot iterator would consume the children before the
/// renderer sees them.
#[derive(Clone)]
pub struct ChildIterable {
	protocol: IterationProtocol,
	items: Arc<[PropValue]>,
}

impl ChildIterable {
	/// Creates a reusable collection.
	pub fn collection(items: impl IntoIterator<Item = PropValue>) -> Self {
		Self::with_protocol(IterationProtocol::Collection, items)
	}

	/// Creates a container with an explicit iteration protocol.
	pub fn with_protocol(
		protocol: IterationProtocol,
		items: impl IntoIterator<Item = PropValue>,
	) -> Self {
		Self {
			protocol,
			items: items.into_iter().collect(),
		}
	}

	/// Returns the iteration protocol.
	pub fn protocol(&self) -> IterationProtocol {
		self.protocol
	}

	/// Iterates the items.
	pub fn iter(&self) -> std::slice::Iter<'_, PropValue> {
		self.items.iter()
	}

	/// Returns the number of items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns `true` if the container has no items.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl PartialEq for ChildIterable {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.items, &other.items)
	}
}

impl fmt::Debug for ChildIterable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChildIterable")
			.field("protocol", &self.protocol)
			.field("len", &self.items.len())
			.finish()
	}
}
