//! Toolbar root
//!
//! The root is built once per process, from the configured settings, on the
//! first render. Building resolves every configured reference, so a broken
//! configuration fails the first render instead of producing a partial
//! toolbar. A failed build is not remembered and is retried on the next call.
//!
//! Hosts serving several sites can build independent toolbars with
//! [`Toolbar::from_settings`].

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::SafeString;
use crate::items::{Group, ItemHandle, RenderItem, RootNode};
use crate::reference::{ItemArgs, ItemRef};
use crate::registry::ItemRegistry;
use crate::settings::{self, StaffToolbarSettings};
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::fmt;
use std::sync::Arc;
use tera::Tera;

/// Name of the wrapper template.
pub const TOOLBAR_TEMPLATE_NAME: &str = "staff_toolbar/toolbar.html";

const DEFAULT_TOOLBAR_TEMPLATE: &str = include_str!("../templates/staff_toolbar/toolbar.html");

static TOOLBAR: Lazy<RwLock<Option<Arc<Toolbar>>>> = Lazy::new(|| RwLock::new(None));

/// Load a single toolbar item through the global registry.
pub fn load_toolbar_item(reference: &ItemRef, args: &ItemArgs) -> ToolbarResult<ItemHandle> {
	ItemRegistry::global().load(reference, args)
}

/// Build a root node from settings, resolving every reference.
pub fn build_root(
	settings: &StaffToolbarSettings,
	registry: Arc<ItemRegistry>,
) -> ToolbarResult<RootNode> {
	let root = RootNode::new(Group::with_registry(registry, settings.items.iter().cloned()));
	if let Err(err) = root.preload() {
		tracing::warn!(error = %err, "staff toolbar configuration is invalid");
		return Err(err);
	}
	tracing::debug!(items = root.len(), "built staff toolbar root");
	Ok(root)
}

/// A built toolbar: the root node and its wrapper template.
pub struct Toolbar {
	root: Arc<RootNode>,
	tera: Tera,
}

impl Toolbar {
	/// Build a toolbar from settings.
	pub fn from_settings(
		settings: &StaffToolbarSettings,
		registry: Arc<ItemRegistry>,
	) -> ToolbarResult<Self> {
		let root = build_root(settings, registry)?;

		let mut tera = Tera::default();
		let template = settings.template.as_deref().unwrap_or(DEFAULT_TOOLBAR_TEMPLATE);
		tera.add_raw_template(TOOLBAR_TEMPLATE_NAME, template)?;

		Ok(Self {
			root: Arc::new(root),
			tera,
		})
	}

	/// The root node.
	pub fn root(&self) -> &Arc<RootNode> {
		&self.root
	}

	/// Render the root node. Empty if no item produced output.
	pub fn render_root(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<SafeString> {
		Ok(self.root.render(request, context)?.unwrap_or_default())
	}

	/// Render the root node inside the wrapper template.
	pub fn render_toolbar(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<SafeString> {
		let toolbar = self.render_root(request, context)?;
		if toolbar.is_empty() {
			return Ok(toolbar);
		}

		let mut tera_context = tera::Context::new();
		tera_context.insert("toolbar", toolbar.as_str());
		tera_context.insert("username", &request.user().username);
		tera_context.insert("path", request.path());
		Ok(SafeString::new(
			self.tera.render(TOOLBAR_TEMPLATE_NAME, &tera_context)?,
		))
	}
}

impl fmt::Debug for Toolbar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Toolbar").field("root", &self.root).finish()
	}
}

/// The process-wide toolbar, built on first use.
pub fn get_toolbar() -> ToolbarResult<Arc<Toolbar>> {
	if let Some(toolbar) = TOOLBAR.read().as_ref() {
		return Ok(toolbar.clone());
	}

	// Only one builder at a time; readers are not blocked.
	let guard = TOOLBAR.upgradable_read();
	if let Some(toolbar) = guard.as_ref() {
		return Ok(toolbar.clone());
	}

	let toolbar = Arc::new(Toolbar::from_settings(
		&settings::configured(),
		ItemRegistry::global(),
	)?);
	let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
	*guard = Some(toolbar.clone());
	Ok(toolbar)
}

/// The process-wide root node, built on first use.
pub fn get_toolbar_root() -> ToolbarResult<Arc<RootNode>> {
	Ok(get_toolbar()?.root().clone())
}

/// Render the process-wide root node.
pub fn render_root(request: &StaffRequest, context: &RenderContext) -> ToolbarResult<SafeString> {
	get_toolbar()?.render_root(request, context)
}

/// Drop the process-wide toolbar; the next render rebuilds it.
#[doc(hidden)]
pub fn reset_toolbar_root() {
	*TOOLBAR.write() = None;
}
