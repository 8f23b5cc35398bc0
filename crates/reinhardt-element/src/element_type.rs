//! Component designators.
//!
//! An [`ElementType`] says *what* an element renders: a host tag, a composite
//! component, or one of the special markers understood by the renderer.
//! Composite and wrapper types carry reference identity; two components are
//! the same type only if they are the same allocation.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::element::Element;
use crate::props::Props;

/// How a composite component is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
	/// A render function.
	Function,
	/// A legacy class-style component.
	Class,
}

#[derive(Debug, Clone)]
struct ComponentDef {
	name: Cow<'static, str>,
	display_name: Option<Cow<'static, str>>,
	kind: ComponentKind,
	default_props: Option<Props>,
}

/// A composite component reference.
#[derive(Clone)]
pub struct Component(Arc<ComponentDef>);

impl Component {
	/// Declares a function component.
	pub fn function(name: impl Into<Cow<'static, str>>) -> Self {
		Self::with_kind(name, ComponentKind::Function)
	}

	/// Declares a class-style component.
	pub fn class(name: impl Into<Cow<'static, str>>) -> Self {
		Self::with_kind(name, ComponentKind::Class)
	}

	fn with_kind(name: impl Into<Cow<'static, str>>, kind: ComponentKind) -> Self {
		Self(Arc::new(ComponentDef {
			name: name.into(),
			display_name: None,
			kind,
			default_props: None,
		}))
	}

	/// Returns a new component with a display name. The result is a distinct type.
	pub fn with_display_name(self, display_name: impl Into<Cow<'static, str>>) -> Self {
		let mut def = (*self.0).clone();
		def.display_name = Some(display_name.into());
		Self(Arc::new(def))
	}

	/// Returns a new component with default props. The result is a distinct type.
	pub fn with_default_props(self, default_props: Props) -> Self {
		let mut def = (*self.0).clone();
		def.default_props = Some(default_props);
		Self(Arc::new(def))
	}

	/// The declared name.
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// The display name, if one was set.
	pub fn display_name(&self) -> Option<&str> {
		self.0.display_name.as_deref()
	}

	/// The implementation kind.
	pub fn kind(&self) -> ComponentKind {
		self.0.kind
	}

	/// The default props.
	pub fn default_props(&self) -> Option<&Props> {
		self.0.default_props.as_ref()
	}

	/// Display name, else declared name, else `None` for anonymous components.
	pub fn resolved_name(&self) -> Option<&str> {
		self.display_name()
			.or_else(|| Some(self.name()).filter(|n| !n.is_empty()))
	}

	/// Returns `true` if both references point at the same component.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Component {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Component")
			.field("name", &self.0.name)
			.field("display_name", &self.0.display_name)
			.field("kind", &self.0.kind)
			.finish_non_exhaustive()
	}
}

/// A lazily loaded component. Its target is unknown until the renderer resolves it.
#[derive(Clone)]
pub struct LazyType(Arc<Cow<'static, str>>);

impl LazyType {
	/// Declares a lazy reference identified by `id` (a module path, for instance).
	pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
		Self(Arc::new(id.into()))
	}

	/// The identifier given at declaration.
	pub fn id(&self) -> &str {
		&self.0
	}
}

impl PartialEq for LazyType {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for LazyType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("LazyType").field(&self.0).finish()
	}
}

#[derive(Debug)]
struct MemoDef {
	inner: ElementType,
	display_name: Option<Cow<'static, str>>,
}

/// A memoizing wrapper around another type.
#[derive(Clone)]
pub struct MemoType(Arc<MemoDef>);

impl MemoType {
	/// Wraps `inner`.
	pub fn new(inner: impl Into<ElementType>) -> Self {
		Self(Arc::new(MemoDef {
			inner: inner.into(),
			display_name: None,
		}))
	}

	/// Wraps `inner` under an explicit display name.
	pub fn named(inner: impl Into<ElementType>, display_name: impl Into<Cow<'static, str>>) -> Self {
		Self(Arc::new(MemoDef {
			inner: inner.into(),
			display_name: Some(display_name.into()),
		}))
	}

	/// The wrapped type.
	pub fn inner(&self) -> &ElementType {
		&self.0.inner
	}
}

impl PartialEq for MemoType {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for MemoType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.0, f)
	}
}

#[derive(Debug)]
struct ForwardRefDef {
	render: Component,
	display_name: Option<Cow<'static, str>>,
}

/// A wrapper forwarding its `ref` prop to a render function.
#[derive(Clone)]
pub struct ForwardRefType(Arc<ForwardRefDef>);

impl ForwardRefType {
	/// Wraps `render`.
	pub fn new(render: Component) -> Self {
		Self(Arc::new(ForwardRefDef {
			render,
			display_name: None,
		}))
	}

	/// Wraps `render` under an explicit display name.
	pub fn named(render: Component, display_name: impl Into<Cow<'static, str>>) -> Self {
		Self(Arc::new(ForwardRefDef {
			render,
			display_name: Some(display_name.into()),
		}))
	}

	/// The render function.
	pub fn render(&self) -> &Component {
		&self.0.render
	}
}

impl PartialEq for ForwardRefType {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for ForwardRefType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.0, f)
	}
}

/// A value passed where an element type was expected but which cannot be rendered.
///
/// Factories accept these and still produce an element; the renderer is
/// the stage that rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidType {
	/// Nothing was passed, usually a missing export.
	Undefined,
	/// An explicit null.
	Null,
	/// A list.
	Array,
	/// An object without any fields, usually a mixed-up default/named import.
	EmptyObject,
	/// Some other object.
	Object,
	/// A number.
	Number,
	/// A boolean.
	Boolean,
	/// An element literal used as a type.
	Element(Element),
}

impl InvalidType {
	/// Describes the offending value for diagnostics.
	pub fn type_string(&self) -> String {
		match self {
			Self::Undefined => "undefined".to_string(),
			Self::Null => "null".to_string(),
			Self::Array => "array".to_string(),
			Self::EmptyObject | Self::Object => "object".to_string(),
			Self::Number => "number".to_string(),
			Self::Boolean => "boolean".to_string(),
			Self::Element(element) => format!(
				"<{} />",
				element
					.element_type()
					.component_name()
					.unwrap_or_else(|| "Unknown".to_string())
			),
		}
	}

	/// A hint appended to the invalid-type diagnostic.
	pub fn hint(&self) -> &'static str {
		match self {
			Self::Undefined | Self::EmptyObject => {
				" You likely forgot to export your component from the file it's defined in, \
				 or you might have mixed up default and named imports."
			}
			Self::Element(_) => " Did you accidentally export a JSX literal instead of a component?",
			_ => "",
		}
	}
}

/// The component designator of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
	/// A primitive markup tag such as `div`.
	Host(Cow<'static, str>),
	/// A composite component.
	Component(Component),
	/// Several children without a wrapping node.
	Fragment,
	/// A lazily resolved component.
	Lazy(LazyType),
	/// A memoizing wrapper.
	Memo(MemoType),
	/// A ref-forwarding wrapper.
	ForwardRef(ForwardRefType),
	/// A component living on the other side of a server/client boundary.
	ClientReference(Cow<'static, str>),
	/// Something that is not a valid type.
	Invalid(InvalidType),
}

impl ElementType {
	/// Creates a host type.
	pub fn host(tag: impl Into<Cow<'static, str>>) -> Self {
		Self::Host(tag.into())
	}

	/// Returns `false` only for [`ElementType::Invalid`].
	pub fn is_valid(&self) -> bool {
		!matches!(self, Self::Invalid(_))
	}

	/// Default props carried by a composite component type.
	pub fn default_props(&self) -> Option<&Props> {
		match self {
			Self::Component(component) => component.default_props(),
			_ => None,
		}
	}

	/// Human-readable name of the type, used in diagnostics.
	///
	/// Lazy types are never resolved here; they, client references and
	/// invalid types have no name.
	pub fn component_name(&self) -> Option<String> {
		match self {
			Self::Host(tag) => Some(tag.to_string()),
			Self::Component(component) => component.resolved_name().map(str::to_string),
			Self::Fragment => Some("Fragment".to_string()),
			Self::Memo(memo) => memo
				.0
				.display_name
				.as_ref()
				.map(|n| n.to_string())
				.or_else(|| memo.inner().component_name())
				.or_else(|| Some("Memo".to_string())),
			Self::ForwardRef(forward_ref) => {
				if let Some(display_name) = &forward_ref.0.display_name {
					return Some(display_name.to_string());
				}
				match forward_ref.render().resolved_name() {
					Some(inner) => Some(format!("ForwardRef({inner})")),
					None => Some("ForwardRef".to_string()),
				}
			}
			Self::Lazy(_) | Self::ClientReference(_) | Self::Invalid(_) => None,
		}
	}

	/// Name used when reporting `key` reads on this type's props.
	pub(crate) fn key_warning_display_name(&self) -> String {
		match self {
			Self::Host(tag) => tag.to_string(),
			Self::Component(component) => component
				.resolved_name()
				.unwrap_or("Unknown")
				.to_string(),
			other => other
				.component_name()
				.unwrap_or_else(|| "Unknown".to_string()),
		}
	}
}

impl From<&'static str> for ElementType {
	fn from(tag: &'static str) -> Self {
		Self::Host(Cow::Borrowed(tag))
	}
}

impl From<String> for ElementType {
	fn from(tag: String) -> Self {
		Self::Host(Cow::Owned(tag))
	}
}

impl From<Component> for ElementType {
	fn from(component: Component) -> Self {
		Self::Component(component)
	}
}

impl From<LazyType> for ElementType {
	fn from(lazy: LazyType) -> Self {
		Self::Lazy(lazy)
	}
}

impl From<MemoType> for ElementType {
	fn from(memo: MemoType) -> Self {
		Self::Memo(memo)
	}
}

impl From<ForwardRefType> for ElementType {
	fn from(forward_ref: ForwardRefType) -> Self {
		Self::ForwardRef(forward_ref)
	}
}

impl From<InvalidType> for ElementType {
	fn from(invalid: InvalidType) -> Self {
		Self::Invalid(invalid)
	}
}
