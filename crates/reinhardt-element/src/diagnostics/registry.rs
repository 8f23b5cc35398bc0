//! Once-only bookkeeping for diagnostics.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// Remembers which diagnostics were already reported.
///
/// Each check-and-set is atomic, so concurrent factories sharing one
/// registry report a signature exactly once.
#[derive(Debug, Default)]
pub struct WarningRegistry {
	special_prop_key: AtomicBool,
	old_jsx_runtime: AtomicBool,
	element_ref: Mutex<HashSet<String>>,
	key_spread: Mutex<HashSet<String>>,
	owner_key_use: Mutex<HashSet<String>>,
}

fn first_time(flag: &AtomicBool) -> bool {
	!flag.swap(true, Ordering::AcqRel)
}

fn first_time_for(set: &Mutex<HashSet<String>>, signature: &str) -> bool {
	let mut seen = set.lock();
	if seen.contains(signature) {
		return false;
	}
	seen.insert(signature.to_string())
}

impl WarningRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn first_key_prop_access(&self) -> bool {
		first_time(&self.special_prop_key)
	}

	pub(crate) fn first_old_jsx_runtime(&self) -> bool {
		first_time(&self.old_jsx_runtime)
	}

	pub(crate) fn first_element_ref_access(&self, component: &str) -> bool {
		first_time_for(&self.element_ref, component)
	}

	pub(crate) fn first_key_spread(&self, signature: &str) -> bool {
		first_time_for(&self.key_spread, signature)
	}

	pub(crate) fn first_missing_key(&self, error_info: &str) -> bool {
		first_time_for(&self.owner_key_use, error_info)
	}
}
