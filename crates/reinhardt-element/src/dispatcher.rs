//! Owner lookup.
//!
//! The renderer knows which component is being evaluated; the factories only
//! ask. A [`DispatcherSlot`] holds the currently installed
//! [`OwnerDispatcher`], and development factories consult it when they stamp
//! an owner on a new element. Production factories never look at it.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::owner::Owner;

/// Answers "which component is being evaluated right now?".
pub trait OwnerDispatcher: Send + Sync {
	/// The current owner, or `None` outside of any component.
	fn owner(&self) -> Option<Owner>;
}

/// The swappable "current dispatcher" slot.
#[derive(Default)]
pub struct DispatcherSlot {
	current: RwLock<Option<Arc<dyn OwnerDispatcher>>>,
}

impl DispatcherSlot {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs `dispatcher` until the returned guard is dropped, at which
	/// point the previously installed dispatcher comes back.
	#[must_use = "dropping the guard immediately uninstalls the dispatcher"]
	pub fn install(&self, dispatcher: Arc<dyn OwnerDispatcher>) -> DispatcherGuard<'_> {
		let previous = self.replace(Some(dispatcher));
		DispatcherGuard {
			slot: self,
			previous: Some(previous),
		}
	}

	/// Swaps the installed dispatcher, returning the old one.
	pub fn replace(
		&self,
		dispatcher: Option<Arc<dyn OwnerDispatcher>>,
	) -> Option<Arc<dyn OwnerDispatcher>> {
		std::mem::replace(&mut *self.current.write(), dispatcher)
	}

	/// The current owner; `None` when no dispatcher is installed.
	pub fn get_owner(&self) -> Option<Owner> {
		let dispatcher = self.current.read().clone();
		dispatcher.and_then(|dispatcher| dispatcher.owner())
	}

	/// Returns `true` if a dispatcher is installed.
	pub fn is_installed(&self) -> bool {
		self.current.read().is_some()
	}
}

impl fmt::Debug for DispatcherSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DispatcherSlot")
			.field("installed", &self.is_installed())
			.finish()
	}
}

/// Restores the previous dispatcher when dropped.
pub struct DispatcherGuard<'a> {
	slot: &'a DispatcherSlot,
	previous: Option<Option<Arc<dyn OwnerDispatcher>>>,
}

impl Drop for DispatcherGuard<'_> {
	fn drop(&mut self) {
		if let Some(previous) = self.previous.take() {
			self.slot.replace(previous);
		}
	}
}

/// A dispatcher backed by a stack of owners.
///
/// Renderers push the component they are about to evaluate and pop it when
/// done; the top of the stack is the current owner.
#[derive(Debug, Default)]
pub struct OwnerStack {
	stack: Mutex<Vec<Owner>>,
}

impl OwnerStack {
	/// Creates an empty stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Pushes `owner`.
	pub fn push_owner(&self, owner: Owner) {
		self.stack.lock().push(owner);
	}

	/// Pops the most recently pushed owner.
	pub fn pop_owner(&self) -> Option<Owner> {
		self.stack.lock().pop()
	}

	/// Pushes `owner` and pops it again when the returned scope is dropped.
	#[must_use = "dropping the scope immediately pops the owner"]
	pub fn enter(&self, owner: Owner) -> OwnerScope<'_> {
		self.push_owner(owner);
		OwnerScope { stack: self }
	}

	/// Number of owners on the stack.
	pub fn depth(&self) -> usize {
		self.stack.lock().len()
	}
}

impl OwnerDispatcher for OwnerStack {
	fn owner(&self) -> Option<Owner> {
		self.stack.lock().last().cloned()
	}
}

/// Scope returned by [`OwnerStack::enter`].
pub struct OwnerScope<'a> {
	stack: &'a OwnerStack,
}

impl Drop for OwnerScope<'_> {
	fn drop(&mut self) {
		self.stack.pop_owner();
	}
}
