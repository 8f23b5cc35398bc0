//! Compatibility predicates over raw configuration.
//!
//! These decide whether `key` and `ref` in a configuration mapping count as
//! explicitly provided. An entry holding [`PropValue::Undefined`] does not,
//! and neither does a key access shim, since a shim is never an entry.

use crate::props::{KEY, Props, REF};
use crate::value::PropValue;

fn has_valid(config: &Props, name: &str) -> bool {
	config
		.get(name)
		.is_some_and(|value| !matches!(value, PropValue::Undefined))
}

/// Returns `true` if `config` carries a usable `key`.
pub fn has_valid_key(config: &Props) -> bool {
	has_valid(config, KEY)
}

/// Returns `true` if `config` carries a usable `ref`.
pub fn has_valid_ref(config: &Props) -> bool {
	has_valid(config, REF)
}
