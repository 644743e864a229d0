//! Staff toolbar error types.

use std::sync::Arc;
use thiserror::Error;

/// Boxed error raised by code living behind a registered module or factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for toolbar operations.
pub type ToolbarResult<T> = Result<T, ToolbarError>;

/// Staff toolbar errors.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ToolbarError {
	/// A configuration reference does not point to a usable toolbar item.
	#[error("{setting} does not point to a valid toolbar item: {path} ({reason})")]
	ImproperlyConfigured {
		/// Setting the reference was read from.
		setting: String,
		/// Offending reference.
		path: String,
		/// What went wrong.
		reason: ConfigIssue,
	},

	/// A module was located but failed while initializing itself.
	///
	/// The original error is passed through untouched.
	#[error(transparent)]
	Import(Arc<dyn std::error::Error + Send + Sync + 'static>),

	/// A toolbar item rejected its constructor arguments.
	#[error("invalid arguments for {path}: {message}")]
	InvalidArguments {
		/// Item path or name.
		path: String,
		/// Error message.
		message: String,
	},

	/// A named route could not be reversed.
	#[error("cannot reverse URL '{name}': {message}")]
	UrlReverse {
		/// Route name.
		name: String,
		/// Error message.
		message: String,
	},

	/// Settings could not be read or parsed.
	#[error("settings error: {0}")]
	Settings(String),

	/// The toolbar wrapper template failed.
	#[error("template error: {0}")]
	Template(String),
}

/// Reason attached to [`ToolbarError::ImproperlyConfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
	/// The module part of a dotted path is unknown.
	ModuleNotFound,
	/// The module exists but has no such symbol.
	SymbolNotFound,
	/// The reference resolved to something that cannot be rendered.
	NotCallable,
	/// The dotted path has no module part.
	MalformedPath,
}

impl std::fmt::Display for ConfigIssue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let msg = match self {
			ConfigIssue::ModuleNotFound => "module not found",
			ConfigIssue::SymbolNotFound => "does not point to an existing class",
			ConfigIssue::NotCallable => "is not callable",
			ConfigIssue::MalformedPath => "not a dotted path",
		};
		f.write_str(msg)
	}
}

impl ToolbarError {
	/// Build an [`ToolbarError::ImproperlyConfigured`] error.
	pub fn improperly_configured(
		setting: impl Into<String>,
		path: impl Into<String>,
		reason: ConfigIssue,
	) -> Self {
		ToolbarError::ImproperlyConfigured {
			setting: setting.into(),
			path: path.into(),
			reason,
		}
	}

	/// Wrap a failure raised inside a module initializer or factory.
	pub fn import(err: BoxError) -> Self {
		ToolbarError::Import(Arc::from(err))
	}

	/// Build an [`ToolbarError::InvalidArguments`] error.
	pub fn invalid_arguments(path: impl Into<String>, message: impl Into<String>) -> Self {
		ToolbarError::InvalidArguments {
			path: path.into(),
			message: message.into(),
		}
	}

	/// Returns `true` for configuration errors.
	pub fn is_configuration(&self) -> bool {
		matches!(self, ToolbarError::ImproperlyConfigured { .. })
	}
}

impl From<toml::de::Error> for ToolbarError {
	fn from(err: toml::de::Error) -> Self {
		ToolbarError::Settings(err.to_string())
	}
}

impl From<serde_json::Error> for ToolbarError {
	fn from(err: serde_json::Error) -> Self {
		ToolbarError::Settings(err.to_string())
	}
}

impl From<tera::Error> for ToolbarError {
	fn from(err: tera::Error) -> Self {
		ToolbarError::Template(err.to_string())
	}
}
