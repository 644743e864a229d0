//! Toolbar items
//!
//! Every entry of the toolbar is a [`RenderItem`]: it renders an HTML
//! fragment for the current request, or nothing at all. Items are built once
//! per process and shared between concurrent renders, so they never hold
//! request state.
//!
//! The built-in items are registered in the `staff_toolbar.items` module of
//! the [`ItemRegistry`](crate::registry::ItemRegistry):
//!
//! | Name               | Type                                   |
//! |--------------------|----------------------------------------|
//! | `Title`            | [`Title`]                              |
//! | `Literal`          | [`Literal`]                            |
//! | `Link`             | [`Link`] with a [`StaticLink`]         |
//! | `AdminIndexLink`   | [`Link::admin_index`]                  |
//! | `ChangeObjectLink` | [`Link::change_object`]                |
//! | `LogoutLink`       | [`Link::logout`]                       |
//! | `Group`            | [`Group`]                              |
//! | `RootNode`         | [`RootNode`]                           |

pub mod change_object;
pub mod group;
pub mod link;
pub mod literal;
pub mod title;

pub use change_object::{ChangeObjectLink, get_object};
pub use group::{Group, RootNode};
pub use link::{Link, LinkData, LinkSource, StaticLink, UrlSource};
pub use literal::Literal;
pub use title::Title;

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::SafeString;
use std::fmt;
use std::sync::Arc;

/// A renderable toolbar entry.
pub trait RenderItem: fmt::Debug + Send + Sync {
	/// Render the item, or return `None` to leave it out.
	fn render(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>>;

	/// Resolve every reference the item holds, so configuration errors
	/// surface before the first render.
	fn preload(&self) -> ToolbarResult<()> {
		Ok(())
	}

	/// The item as a group, for tree traversal.
	fn as_group(&self) -> Option<&Group> {
		None
	}
}

/// Shared handle to a resolved toolbar item.
pub type ItemHandle = Arc<dyn RenderItem>;

/// Signature of a plain render function registered as a toolbar item.
pub type RenderFn = fn(&StaffRequest, &RenderContext) -> ToolbarResult<Option<SafeString>>;

/// A toolbar item backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnItem {
	name: &'static str,
	func: RenderFn,
}

impl FnItem {
	/// Wrap a render function.
	pub const fn new(name: &'static str, func: RenderFn) -> Self {
		Self { name, func }
	}
}

impl fmt::Debug for FnItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("FnItem").field(&self.name).finish()
	}
}

impl RenderItem for FnItem {
	fn render(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		(self.func)(request, context)
	}
}
