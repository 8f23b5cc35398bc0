//! Element layer settings.
//!
//! Settings are read once when a factory is created. They can be built in
//! code or loaded from a TOML document such as:
//!
//! ```toml
//! mode = "development"
//! disable_default_props_except_for_classes = false
//! enable_owner_stacks = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Which factory implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
	/// Instrumented elements with diagnostics.
	Development,
	/// Bare elements, no diagnostics.
	Production,
}

impl Default for BuildMode {
	fn default() -> Self {
		if cfg!(debug_assertions) {
			Self::Development
		} else {
			Self::Production
		}
	}
}

/// Settings consumed by the element factories.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsxSettings {
	/// Factory implementation.
	pub mode: BuildMode,

	/// Skip default props in the compiler entry points.
	///
	/// Class components still receive them from the renderer.
	pub disable_default_props_except_for_classes: bool,

	/// Record debug stacks and tasks, and leave key validation to the renderer.
	pub enable_owner_stacks: bool,
}

impl JsxSettings {
	/// Create settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from a TOML document. Missing fields take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		tracing::debug!(
			target: "reinhardt_element",
			mode = ?settings.mode,
			owner_stacks = settings.enable_owner_stacks,
			"loaded JSX settings"
		);
		Ok(settings)
	}

	/// Sets the build mode.
	pub fn with_mode(mut self, mode: BuildMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets `disable_default_props_except_for_classes`.
	pub fn with_disable_default_props_except_for_classes(mut self, disable: bool) -> Self {
		self.disable_default_props_except_for_classes = disable;
		self
	}

	/// Sets `enable_owner_stacks`.
	pub fn with_owner_stacks(mut self, enable: bool) -> Self {
		self.enable_owner_stacks = enable;
		self
	}

	/// Returns `true` in development mode.
	pub fn is_development(&self) -> bool {
		self.mode == BuildMode::Development
	}
}
