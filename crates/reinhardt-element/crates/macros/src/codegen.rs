//! Lowering of the markup tree to factory calls.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::Result;
use syn::ext::IdentExt;

use crate::crate_paths::get_reinhardt_element_crate;
use crate::parse::{JsxAttr, JsxChild, JsxElement, JsxInput, TagKind};

pub(crate) fn expand(input: JsxInput) -> Result<TokenStream> {
	let krate = get_reinhardt_element_crate();
	let factory = &input.factory;
	let root = element(&krate, &input.root);

	Ok(quote! {
		{
			#[allow(unused_imports)]
			use #krate::ElementFactory as _;
			let __jsx_factory = &(#factory);
			#root
		}
	})
}

fn element_type(krate: &TokenStream, tag: &TagKind) -> TokenStream {
	match tag {
		TagKind::Host(ident) => {
			let name = ident.to_string();
			quote_spanned!(ident.span()=> #krate::ElementType::host(#name))
		}
		TagKind::Fragment(span) => quote_spanned!(*span=> #krate::ElementType::Fragment),
		TagKind::Component(path) => quote! {
			::core::convert::Into::<#krate::ElementType>::into(::core::clone::Clone::clone(&#path))
		},
		TagKind::Expr(expr) => quote! {
			::core::convert::Into::<#krate::ElementType>::into(#expr)
		},
	}
}

fn child(krate: &TokenStream, node: &JsxChild) -> TokenStream {
	match node {
		JsxChild::Text(text) => quote!(#krate::PropValue::from(#text)),
		JsxChild::Expr(expr) => quote!(::core::convert::Into::<#krate::PropValue>::into(#expr)),
		JsxChild::Element(nested) => {
			let built = element(krate, nested);
			quote!(#krate::PropValue::from(#built))
		}
	}
}

fn element(krate: &TokenStream, node: &JsxElement) -> TokenStream {
	let element_type = element_type(krate, &node.tag);

	let attrs = node.attrs.iter().map(|attr| match attr {
		JsxAttr::Prop { name, value } => {
			let name = name.unraw().to_string();
			quote!(__jsx_props.insert(#name, ::core::convert::Into::<#krate::PropValue>::into(#value));)
		}
		JsxAttr::Spread(expr) => quote!(__jsx_props.extend(#expr);),
	});

	let children: Vec<TokenStream> = node.children.iter().map(|c| child(krate, c)).collect();
	let (set_children, entry) = match children.len() {
		0 => (quote!(), quote!(jsx)),
		1 => {
			let only = &children[0];
			(quote!(__jsx_props.insert("children", #only);), quote!(jsx))
		}
		_ => (
			quote! {
				__jsx_props.insert(
					"children",
					#krate::PropValue::Array(::std::vec![#(#children),*]),
				);
			},
			quote!(jsxs),
		),
	};

	let key = match &node.key {
		Some(key) => quote! {
			::core::option::Option::Some(::core::convert::Into::<#krate::PropValue>::into(#key))
		},
		None => quote!(::core::option::Option::None),
	};

	let span = node.span();
	quote_spanned! {span=>
		{
			let mut __jsx_props = #krate::Props::new();
			#(#attrs)*
			#set_children
			__jsx_factory.#entry(#element_type, __jsx_props, #key)
		}
	}
}
