//! Groups of toolbar items

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::{HtmlArg, SafeString, format_html};
use crate::i18n::{LazyText, Translator};
use crate::items::title::TITLE_TEMPLATE;
use crate::items::{ItemHandle, RenderItem};
use crate::reference::{ItemArgs, ItemRef};
use crate::registry::ItemRegistry;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A child entry: the configured reference and, once loaded, the item.
#[derive(Debug)]
struct ChildSlot {
	reference: ItemRef,
	item: OnceCell<ItemHandle>,
}

impl ChildSlot {
	fn unresolved(reference: ItemRef) -> Self {
		Self {
			reference,
			item: OnceCell::new(),
		}
	}

	fn resolved(item: ItemHandle) -> Self {
		Self {
			reference: ItemRef::Item(item.clone()),
			item: OnceCell::with_value(item),
		}
	}
}

/// A group of items, rendered as a list.
///
/// Children may be given as unresolved references. They are loaded on first
/// render, each at most once, and kept for later renders. Children that
/// render nothing are left out; a group without output renders nothing.
#[derive(Debug)]
pub struct Group {
	title: Option<LazyText>,
	children: Vec<ChildSlot>,
	registry: Arc<ItemRegistry>,
}

impl Group {
	/// Group of references resolved through the global registry.
	pub fn new(children: impl IntoIterator<Item = ItemRef>) -> Self {
		Self::with_registry(ItemRegistry::global(), children)
	}

	/// Group of references resolved through the given registry.
	pub fn with_registry(
		registry: Arc<ItemRegistry>,
		children: impl IntoIterator<Item = ItemRef>,
	) -> Self {
		Self {
			title: None,
			children: children.into_iter().map(ChildSlot::unresolved).collect(),
			registry,
		}
	}

	/// Group of already loaded items.
	pub fn from_items(registry: Arc<ItemRegistry>, items: impl IntoIterator<Item = ItemHandle>) -> Self {
		Self {
			title: None,
			children: items.into_iter().map(ChildSlot::resolved).collect(),
			registry,
		}
	}

	/// Set the group title.
	pub fn with_title(mut self, title: impl Into<LazyText>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// The group title.
	pub fn title(&self) -> Option<&LazyText> {
		self.title.as_ref()
	}

	/// Number of children, rendered or not.
	pub fn len(&self) -> usize {
		self.children.len()
	}

	/// Returns `true` if the group has no children.
	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// The child at `index`, loading it if needed.
	pub fn child(&self, index: usize) -> Option<ToolbarResult<ItemHandle>> {
		self.children.get(index).map(|slot| self.resolve(slot))
	}

	/// All children in declaration order, loading them if needed.
	pub fn children(&self) -> ToolbarResult<Vec<ItemHandle>> {
		self.children.iter().map(|slot| self.resolve(slot)).collect()
	}

	/// Render every child, keeping the non-empty fragments in order.
	pub fn get_rows(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Vec<SafeString>> {
		let mut rows = Vec::with_capacity(self.children.len());
		for slot in &self.children {
			let item = self.resolve(slot)?;
			match item.render(request, context)? {
				Some(html) if !html.is_empty() => rows.push(html),
				_ => continue,
			}
		}
		Ok(rows)
	}

	/// Join rendered rows into the group markup.
	pub fn render_rows(&self, rows: &[SafeString], translator: &dyn Translator) -> Option<SafeString> {
		if rows.is_empty() {
			return None;
		}

		let li_tags: Vec<SafeString> = rows
			.iter()
			.map(|row| format_html("<li>{0}</li>", &[row.into()]))
			.collect();
		let li_tags = SafeString::join(&li_tags, "\n");

		let html = match self.title.as_ref().filter(|title| !title.is_empty()) {
			Some(title) => {
				let template = format!("{}\n<ul>\n{{1}}\n</ul>", TITLE_TEMPLATE);
				format_html(
					&template,
					&[title.resolve(translator), HtmlArg::Safe(&li_tags)],
				)
			}
			None => format_html("<ul>\n{0}\n</ul>", &[(&li_tags).into()]),
		};
		Some(html)
	}

	fn resolve(&self, slot: &ChildSlot) -> ToolbarResult<ItemHandle> {
		slot.item
			.get_or_try_init(|| {
				tracing::debug!(reference = ?slot.reference, "loading toolbar group child");
				self.registry.load(&slot.reference, &ItemArgs::default())
			})
			.cloned()
	}
}

impl RenderItem for Group {
	fn render(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		let rows = self.get_rows(request, context)?;
		Ok(self.render_rows(&rows, context.env().translator()))
	}

	fn preload(&self) -> ToolbarResult<()> {
		for slot in &self.children {
			self.resolve(slot)?.preload()?;
		}
		Ok(())
	}

	fn as_group(&self) -> Option<&Group> {
		Some(self)
	}
}

/// The top level of the toolbar: a group titled "Staff features".
#[derive(Debug)]
pub struct RootNode {
	group: Group,
}

impl RootNode {
	/// Default title of the toolbar.
	pub const DEFAULT_TITLE: &'static str = "Staff features";

	/// Wrap a group, giving it the default title unless it has one.
	pub fn new(group: Group) -> Self {
		let group = match group.title {
			Some(_) => group,
			None => group.with_title(LazyText::translated(Self::DEFAULT_TITLE)),
		};
		Self { group }
	}

	/// The underlying group.
	pub fn group(&self) -> &Group {
		&self.group
	}

	/// Number of top-level items.
	pub fn len(&self) -> usize {
		self.group.len()
	}

	/// Returns `true` if the toolbar has no items.
	pub fn is_empty(&self) -> bool {
		self.group.is_empty()
	}
}

impl RenderItem for RootNode {
	fn render(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		self.group.render(request, context)
	}

	fn preload(&self) -> ToolbarResult<()> {
		self.group.preload()
	}

	fn as_group(&self) -> Option<&Group> {
		Some(&self.group)
	}
}
