//! Domain objects the toolbar can link to

use std::fmt;
use std::sync::Arc;

/// Model metadata needed to build admin links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
	/// Application label, e.g. `blog`.
	pub app_label: String,
	/// Lowercase model name, e.g. `post`.
	pub model_name: String,
	/// Human readable name, e.g. `blog post`.
	pub verbose_name: String,
}

impl ModelMeta {
	/// Create model metadata.
	pub fn new(
		app_label: impl Into<String>,
		model_name: impl Into<String>,
		verbose_name: impl Into<String>,
	) -> Self {
		Self {
			app_label: app_label.into(),
			model_name: model_name.into(),
			verbose_name: verbose_name.into(),
		}
	}
}

/// An object that has an admin change page.
pub trait StaffObject: fmt::Debug + Send + Sync {
	/// Metadata of the object's model.
	fn meta(&self) -> ModelMeta;

	/// Primary key, as used in URLs.
	fn pk(&self) -> String;

	/// Language currently active on a translatable object.
	///
	/// Returns `None` for objects without translated content.
	fn current_language(&self) -> Option<String> {
		None
	}
}

/// Shared handle to a [`StaffObject`].
pub type ObjectRef = Arc<dyn StaffObject>;
