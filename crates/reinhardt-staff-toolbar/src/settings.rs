//! Toolbar settings
//!
//! Settings are read from TOML or JSON, using the same keys as the project
//! settings file:
//!
//! ```toml
//! STAFF_TOOLBAR_ITEMS = [
//!     "staff_toolbar.items.AdminIndexLink",
//!     "staff_toolbar.items.ChangeObjectLink",
//!     "staff_toolbar.items.LogoutLink",
//! ]
//! STAFF_TOOLBAR_TEMPLATE = "<nav class=\"staff-toolbar\">{{ toolbar | safe }}</nav>"
//! ```
//!
//! Call [`configure`] at startup, before the toolbar is first rendered.
//! Without it the defaults are used.

use crate::error::{ToolbarError, ToolbarResult};
use crate::reference::ItemRef;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Name of the setting holding the toolbar items.
pub const STAFF_TOOLBAR_ITEMS: &str = "STAFF_TOOLBAR_ITEMS";

/// Items shown when nothing is configured.
pub const DEFAULT_ITEMS: [&str; 3] = [
	"staff_toolbar.items.AdminIndexLink",
	"staff_toolbar.items.ChangeObjectLink",
	"staff_toolbar.items.LogoutLink",
];

static CONFIGURED: Lazy<RwLock<Option<Arc<StaffToolbarSettings>>>> = Lazy::new(|| RwLock::new(None));

/// Staff toolbar settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffToolbarSettings {
	/// Top-level toolbar entries.
	#[serde(rename = "STAFF_TOOLBAR_ITEMS", alias = "items", default = "default_items")]
	pub items: Vec<ItemRef>,

	/// Tera source of the wrapper template; the template receives the
	/// rendered toolbar as `toolbar`.
	#[serde(rename = "STAFF_TOOLBAR_TEMPLATE", alias = "template", default)]
	pub template: Option<String>,
}

fn default_items() -> Vec<ItemRef> {
	DEFAULT_ITEMS.iter().map(|path| ItemRef::from(*path)).collect()
}

impl Default for StaffToolbarSettings {
	fn default() -> Self {
		Self {
			items: default_items(),
			template: None,
		}
	}
}

impl StaffToolbarSettings {
	/// Settings with the given items and the default template.
	pub fn with_items(items: impl IntoIterator<Item = ItemRef>) -> Self {
		Self {
			items: items.into_iter().collect(),
			template: None,
		}
	}

	/// Use a custom wrapper template.
	pub fn with_template(mut self, template: impl Into<String>) -> Self {
		self.template = Some(template.into());
		self
	}

	/// Parse TOML settings. Unknown keys are ignored.
	pub fn from_toml_str(content: &str) -> ToolbarResult<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Parse JSON settings. Unknown keys are ignored.
	pub fn from_json_str(content: &str) -> ToolbarResult<Self> {
		Ok(serde_json::from_str(content)?)
	}

	/// Read settings from a `.toml` or `.json` file.
	pub fn from_file(path: impl AsRef<Path>) -> ToolbarResult<Self> {
		let path = path.as_ref();
		let content = fs::read_to_string(path).map_err(|e| {
			ToolbarError::Settings(format!("cannot read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => Self::from_toml_str(&content),
			Some("json") => Self::from_json_str(&content),
			_ => Err(ToolbarError::Settings(format!(
				"unsupported settings file: {}",
				path.display()
			))),
		}
	}
}

/// Install the process-wide settings.
///
/// A toolbar root built from earlier settings is discarded and rebuilt on
/// the next render.
pub fn configure(settings: StaffToolbarSettings) {
	tracing::debug!(items = settings.items.len(), "configuring staff toolbar");
	*CONFIGURED.write() = Some(Arc::new(settings));
	crate::loading::reset_toolbar_root();
}

/// The process-wide settings, or the defaults.
pub fn configured() -> Arc<StaffToolbarSettings> {
	CONFIGURED
		.read()
		.clone()
		.unwrap_or_else(|| Arc::new(StaffToolbarSettings::default()))
}
