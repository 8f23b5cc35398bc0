//! Error types for the element layer.
//!
//! Construction itself never fails: problems with the input are reported as
//! diagnostics and an element is produced anyway. Only misuse of the clone
//! entry point and malformed settings surface as errors.

use thiserror::Error;

/// Errors returned by the element factories.
#[derive(Debug, Error)]
pub enum ElementError {
	/// An argument that must be an element was not one.
	#[error("the argument must be an element, but you passed {0}")]
	InvalidArgument(String),
}

/// Errors raised while loading [`JsxSettings`](crate::settings::JsxSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The TOML document could not be parsed.
	#[error("failed to parse JSX settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Result alias for factory operations.
pub type ElementResult<T> = Result<T, ElementError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_invalid_argument_message() {
		let error = ElementError::InvalidArgument("None".to_string());

		assert_eq!(
			error.to_string(),
			"the argument must be an element, but you passed None"
		);
	}
}
