//! Procedural macros for Reinhardt element construction
//!
//! This crate provides the `jsx!` markup macro. It lowers markup to calls of
//! the compiler entry points (`jsx`/`jsxs`) of an `ElementFactory`.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod codegen;
mod crate_paths;
mod parse;

/// Builds an element tree through an element factory.
///
/// # Example
///
/// ```ignore
/// use reinhardt_jsx::jsx;
///
/// let element = jsx!(factory => ul {
///     class: "todo",
///     li { key: "a", "Write docs" },
///     li { key: "b", {format!("{} left", remaining)} },
/// });
/// ```
///
/// # Syntax
///
/// - `tag { .. }` - a lower-case identifier is a host tag
/// - `Path { .. }` - a capitalized path is a component value, cloned into the element type
/// - `(expr) { .. }` - any expression convertible into an element type
/// - `Fragment { .. }` - the fragment marker
/// - `name: expr` - a prop; `key: expr` becomes the element key
/// - `..expr` - spreads a `Props` value, in order
/// - `"text"` and `{expr}` - children
///
/// One child is passed bare through `jsx`; several are passed as an array
/// through `jsxs`.
#[proc_macro]
pub fn jsx(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as parse::JsxInput);

	codegen::expand(input)
		.unwrap_or_else(|e| e.to_compile_error())
		.into()
}
