//! Helper functions for dynamic crate path resolution using proc_macro_crate
//!
//! Generated code must name the element crate whichever way the caller
//! depends on it: directly, renamed, or through the facade crate.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

/// Resolves the path to the reinhardt_element crate.
///
/// # Strategy
///
/// 1. `reinhardt-element` is a dependency: use it (honouring renames)
/// 2. `reinhardt-jsx` is a dependency: use `::reinhardt_jsx::element`
/// 3. Inside `reinhardt-jsx` itself (its tests and doctests): `::reinhardt_jsx::element`
/// 4. Fallback: `::reinhardt_element`
pub(crate) fn get_reinhardt_element_crate() -> TokenStream {
	use proc_macro_crate::{FoundCrate, crate_name};

	if let Ok(FoundCrate::Name(name)) = crate_name("reinhardt-element") {
		let ident = Ident::new(&name, Span::call_site());
		return quote!(::#ident);
	}

	match crate_name("reinhardt-jsx") {
		Ok(FoundCrate::Name(name)) => {
			let ident = Ident::new(&name, Span::call_site());
			quote!(::#ident::element)
		}
		Ok(FoundCrate::Itself) => quote!(::reinhardt_jsx::element),
		Err(_) => quote!(::reinhardt_element),
	}
}
