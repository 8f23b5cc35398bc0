//! Markup syntax tree for `jsx!`.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{Expr, Ident, LitStr, Path, Result, Token, braced, parenthesized};

/// `factory => root`
pub(crate) struct JsxInput {
	pub factory: Expr,
	pub root: JsxElement,
}

/// What an element renders.
pub(crate) enum TagKind {
	/// `div`
	Host(Ident),
	/// `Fragment`
	Fragment(Span),
	/// `Button`, `ui::Button`
	Component(Path),
	/// `(expr)`
	Expr(Expr),
}

/// One markup element with its attributes and children, in source order.
pub(crate) struct JsxElement {
	pub tag: TagKind,
	pub key: Option<Expr>,
	pub attrs: Vec<JsxAttr>,
	pub children: Vec<JsxChild>,
}

/// A prop assignment or a spread.
pub(crate) enum JsxAttr {
	Prop { name: Ident, value: Expr },
	Spread(Expr),
}

/// A child node.
pub(crate) enum JsxChild {
	Text(LitStr),
	Expr(Expr),
	Element(JsxElement),
}

impl Parse for JsxInput {
	fn parse(input: ParseStream) -> Result<Self> {
		let factory = input.parse()?;
		input.parse::<Token![=>]>()?;
		let root = input.parse()?;
		if !input.is_empty() {
			return Err(input.error("jsx! takes exactly one root element"));
		}
		Ok(Self { factory, root })
	}
}

fn parse_tag(input: ParseStream) -> Result<TagKind> {
	if input.peek(syn::token::Paren) {
		let content;
		parenthesized!(content in input);
		return Ok(TagKind::Expr(content.parse()?));
	}
	let path: Path = input.parse()?;
	if let Some(ident) = path.get_ident() {
		if ident == "Fragment" {
			return Ok(TagKind::Fragment(ident.span()));
		}
		let is_host = ident
			.to_string()
			.chars()
			.next()
			.is_some_and(|c| c.is_ascii_lowercase());
		if is_host {
			return Ok(TagKind::Host(ident.clone()));
		}
	}
	Ok(TagKind::Component(path))
}

fn is_prop_start(input: ParseStream) -> bool {
	input.peek(Ident::peek_any) && input.peek2(Token![:]) && !input.peek2(Token![::])
}

impl Parse for JsxElement {
	fn parse(input: ParseStream) -> Result<Self> {
		let tag = parse_tag(input)?;
		let content;
		braced!(content in input);

		let mut element = JsxElement {
			tag,
			key: None,
			attrs: Vec::new(),
			children: Vec::new(),
		};

		while !content.is_empty() {
			if content.peek(Token![..]) {
				content.parse::<Token![..]>()?;
				element.attrs.push(JsxAttr::Spread(content.parse()?));
			} else if is_prop_start(&content) {
				let name = Ident::parse_any(&content)?;
				content.parse::<Token![:]>()?;
				let value: Expr = content.parse()?;
				if name == "key" {
					if element.key.is_some() {
						return Err(syn::Error::new(name.span(), "duplicate `key` attribute"));
					}
					element.key = Some(value);
				} else {
					element.attrs.push(JsxAttr::Prop { name, value });
				}
			} else if content.peek(LitStr) {
				element.children.push(JsxChild::Text(content.parse()?));
			} else if content.peek(syn::token::Brace) {
				let inner;
				braced!(inner in content);
				let expr: Expr = inner.parse()?;
				if !inner.is_empty() {
					return Err(inner.error("expected a single expression"));
				}
				element.children.push(JsxChild::Expr(expr));
			} else {
				let child: JsxElement = content.parse()?;
				element.children.push(JsxChild::Element(child));
			}

			if content.is_empty() {
				break;
			}
			content.parse::<Token![,]>()?;
		}

		Ok(element)
	}
}

impl JsxElement {
	pub(crate) fn span(&self) -> Span {
		match &self.tag {
			TagKind::Host(ident) => ident.span(),
			TagKind::Fragment(span) => *span,
			TagKind::Component(path) => path.span(),
			TagKind::Expr(expr) => expr.span(),
		}
	}
}
