//! Template entry points
//!
//! These are the functions a page template calls:
//!
//! - [`render_staff_toolbar`] renders the whole toolbar for staff users,
//! - [`set_staff_object`] and [`set_staff_url`] tell the
//!   [`ChangeObjectLink`](crate::items::ChangeObjectLink) what the page is about,
//! - [`staff_toolbar_tree`] walks the configured items for custom markup.
//!
//! The overrides must be set before the toolbar is rendered in the same pass.

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::SafeString;
use crate::items::{ItemHandle, RootNode};
use crate::loading;
use crate::object::ObjectRef;

/// Render the toolbar inside its wrapper template.
///
/// Users that are not staff get an empty string, whatever is configured.
pub fn render_staff_toolbar(
	request: &StaffRequest,
	context: &RenderContext,
) -> ToolbarResult<SafeString> {
	if !request.user().is_staff {
		return Ok(SafeString::default());
	}

	loading::get_toolbar()?.render_toolbar(request, context)
}

/// Make `object` the main object of this page.
pub fn set_staff_object(request: &mut StaffRequest, object: ObjectRef) {
	tracing::trace!(object = ?object, "staff object set");
	request.set_staff_object(object);
}

/// Make `url` the admin link of this page. Surrounding whitespace is dropped.
pub fn set_staff_url(request: &mut StaffRequest, url: impl Into<String>) {
	let url = url.into();
	request.set_staff_url(url.trim().to_string());
}

/// One entry of the toolbar tree, as seen by a [`staff_toolbar_tree`] visitor.
#[derive(Debug)]
pub struct ToolbarNode<'a> {
	/// The item.
	pub item: &'a ItemHandle,
	/// Output of the item itself, `None` if it rendered nothing.
	pub html: Option<SafeString>,
	/// Title of a group, translated.
	pub title: Option<String>,
	/// Nesting level, 0 for top-level items.
	pub depth: usize,
}

impl ToolbarNode<'_> {
	/// Returns `true` if the item has no children.
	pub fn is_leaf_node(&self) -> bool {
		self.item.as_group().is_none()
	}
}

/// Render the toolbar node by node.
///
/// The visitor is called for every configured item, children first, with
/// the concatenated output of its children. Its results are concatenated in
/// order. Users that are not staff get an empty string.
pub fn staff_toolbar_tree<F>(
	request: &StaffRequest,
	context: &RenderContext,
	mut visitor: F,
) -> ToolbarResult<SafeString>
where
	F: FnMut(&ToolbarNode<'_>, &SafeString) -> ToolbarResult<SafeString>,
{
	if !request.user().is_staff {
		return Ok(SafeString::default());
	}

	let root = loading::get_toolbar_root()?;
	render_tree(&root, request, context, &mut visitor)
}

/// [`staff_toolbar_tree`] for a given root.
pub fn render_tree<F>(
	root: &RootNode,
	request: &StaffRequest,
	context: &RenderContext,
	visitor: &mut F,
) -> ToolbarResult<SafeString>
where
	F: FnMut(&ToolbarNode<'_>, &SafeString) -> ToolbarResult<SafeString>,
{
	let bits = root
		.group()
		.children()?
		.iter()
		.map(|item| render_node(item, 0, request, context, visitor))
		.collect::<ToolbarResult<Vec<_>>>()?;
	Ok(SafeString::join(&bits, ""))
}

fn render_node<F>(
	item: &ItemHandle,
	depth: usize,
	request: &StaffRequest,
	context: &RenderContext,
	visitor: &mut F,
) -> ToolbarResult<SafeString>
where
	F: FnMut(&ToolbarNode<'_>, &SafeString) -> ToolbarResult<SafeString>,
{
	let mut bits = Vec::new();
	let mut title = None;
	if let Some(group) = item.as_group() {
		for child in group.children()? {
			bits.push(render_node(&child, depth + 1, request, context, visitor)?);
		}
		title = group
			.title()
			.filter(|title| !title.is_empty())
			.map(|title| title.to_text(context.env().translator()));
	}

	let node = ToolbarNode {
		item,
		html: item.render(request, context)?,
		title,
		depth,
	};
	visitor(&node, &SafeString::join(&bits, ""))
}
