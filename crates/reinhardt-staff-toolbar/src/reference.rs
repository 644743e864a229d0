//! Configuration references
//!
//! Toolbar entries are declared as [`ItemRef`]s and only turned into items
//! when the toolbar is first rendered. In settings files they are written as:
//!
//! ```toml
//! STAFF_TOOLBAR_ITEMS = [
//!     "staff_toolbar.items.AdminIndexLink",
//!     "staff_toolbar.items.ChangeObjectLink",
//!     [
//!         { title = "User" },
//!         { path = "staff_toolbar.items.Link", kwargs = { url = "/admin/password_change/", title = "Change password" } },
//!         "staff_toolbar.items.LogoutLink",
//!     ],
//! ]
//! ```
//!
//! - a string is a dotted path to a registered item,
//! - an array is an inline group,
//! - a table with `path` is a lazily constructed item with `args`/`kwargs`,
//! - a table with `title` or `literal` is a title or literal item.
//!
//! Argument values for URLs and titles may be plain strings, or tables:
//! `{ route = "admin:password_change" }` for a named route,
//! `{ translate = "Change password" }` for a translated label and
//! `{ safe = "<b>HTML</b>" }` for unescaped markup.

use crate::context::{RenderContext, StaffRequest};
use crate::error::{ToolbarError, ToolbarResult};
use crate::html::SafeString;
use crate::i18n::LazyText;
use crate::items::{ItemHandle, RenderItem, UrlSource};
use crate::registry::{ItemFactory, ItemRegistry};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// A reference to a toolbar item, as declared in settings.
#[derive(Debug, Clone)]
pub enum ItemRef {
	/// Dotted path to a registered symbol, e.g. `staff_toolbar.items.LogoutLink`.
	Path(String),
	/// A lazily constructed item with arguments.
	Lazy(Arc<LazyItem>),
	/// An item instance.
	Item(ItemHandle),
	/// An item type, constructed with the given arguments.
	Class(ItemFactory),
	/// Inline group.
	List(Vec<ItemRef>),
	/// Any other settings value. Never a valid item.
	Value(Value),
}

impl ItemRef {
	/// Reference an item instance.
	pub fn item(item: impl RenderItem + 'static) -> Self {
		ItemRef::Item(Arc::new(item))
	}

	/// Interpret a settings value.
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::String(path) => ItemRef::Path(path),
			Value::Array(items) => ItemRef::List(items.into_iter().map(ItemRef::from_value).collect()),
			Value::Object(map) => Self::from_table(map),
			other => ItemRef::Value(other),
		}
	}

	fn from_table(mut map: Map<String, Value>) -> Self {
		if let Some(Value::String(path)) = map.get("path").cloned() {
			let args = ItemArgs {
				args: match map.remove("args") {
					Some(Value::Array(args)) => args,
					Some(other) => vec![other],
					None => Vec::new(),
				},
				kwargs: match map.remove("kwargs") {
					Some(Value::Object(kwargs)) => kwargs,
					_ => Map::new(),
				},
			};
			return toolbar_item(path, args);
		}

		if map.len() == 1 {
			if let Some(title) = map.get("title") {
				return ItemRef::lazy_class(
					TITLE_PATH,
					ItemArgs::new().arg(title.clone()),
				);
			}
			if let Some(literal) = map.get("literal") {
				return ItemRef::lazy_class(
					LITERAL_PATH,
					ItemArgs::new().arg(literal.clone()),
				);
			}
		}

		ItemRef::Value(Value::Object(map))
	}

	fn lazy_class(path: &str, args: ItemArgs) -> Self {
		ItemRef::Lazy(Arc::new(LazyItem::new(ItemRef::Path(path.to_string()), args)))
	}

	/// Human readable form, used in error messages.
	pub fn describe(&self) -> String {
		match self {
			ItemRef::Path(path) => path.clone(),
			ItemRef::Lazy(lazy) => lazy.target.describe(),
			ItemRef::Item(item) => format!("{:?}", item),
			ItemRef::Class(factory) => factory.name().to_string(),
			ItemRef::List(items) => format!(
				"[{}]",
				items.iter().map(ItemRef::describe).collect::<Vec<_>>().join(", ")
			),
			ItemRef::Value(value) => value.to_string(),
		}
	}
}

impl From<&str> for ItemRef {
	fn from(path: &str) -> Self {
		ItemRef::Path(path.to_string())
	}
}

impl From<String> for ItemRef {
	fn from(path: String) -> Self {
		ItemRef::Path(path)
	}
}

impl From<Vec<ItemRef>> for ItemRef {
	fn from(items: Vec<ItemRef>) -> Self {
		ItemRef::List(items)
	}
}

impl From<ItemHandle> for ItemRef {
	fn from(item: ItemHandle) -> Self {
		ItemRef::Item(item)
	}
}

impl From<ItemFactory> for ItemRef {
	fn from(factory: ItemFactory) -> Self {
		ItemRef::Class(factory)
	}
}

impl<'de> Deserialize<'de> for ItemRef {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Value::deserialize(deserializer).map(ItemRef::from_value)
	}
}

const TITLE_PATH: &str = "staff_toolbar.items.Title";
const LITERAL_PATH: &str = "staff_toolbar.items.Literal";

/// Define a toolbar item that is constructed with arguments on first render.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::{ItemArgs, toolbar_item};
///
/// let item = toolbar_item(
///     "staff_toolbar.items.Link",
///     ItemArgs::new()
///         .kwarg("url", serde_json::json!({ "route": "admin:password_change" }))
///         .kwarg("title", "Change password"),
/// );
/// ```
pub fn toolbar_item(path: impl Into<String>, args: ItemArgs) -> ItemRef {
	ItemRef::Lazy(Arc::new(LazyItem::new(ItemRef::Path(path.into()), args)))
}

/// Define a title to be included in the toolbar.
pub fn toolbar_title(title: impl Into<LazyText>) -> ItemRef {
	ItemRef::lazy_class(TITLE_PATH, ItemArgs::new().arg(text_to_value(&title.into())))
}

/// Define literal content to be included in the toolbar.
pub fn toolbar_literal(content: impl Into<SafeString>) -> ItemRef {
	ItemRef::lazy_class(
		LITERAL_PATH,
		ItemArgs::new().arg(content.into().into_string()),
	)
}

/// Constructor arguments of a toolbar item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemArgs {
	/// Positional arguments.
	#[serde(default)]
	pub args: Vec<Value>,
	/// Keyword arguments.
	#[serde(default)]
	pub kwargs: Map<String, Value>,
}

impl ItemArgs {
	/// No arguments.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a positional argument.
	pub fn arg(mut self, value: impl Into<Value>) -> Self {
		self.args.push(value.into());
		self
	}

	/// Set a keyword argument.
	pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.kwargs.insert(name.into(), value.into());
		self
	}

	/// Returns `true` if there are no arguments.
	pub fn is_empty(&self) -> bool {
		self.args.is_empty() && self.kwargs.is_empty()
	}

	/// Argument given by keyword, or else at the positional index.
	pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
		self.kwargs
			.get(name)
			.or_else(|| self.args.get(index))
			.filter(|value| !value.is_null())
	}

	/// Text argument: a string, `{ translate = ".." }` or `{ safe = ".." }`.
	pub fn get_text(&self, index: usize, name: &str, path: &str) -> ToolbarResult<Option<LazyText>> {
		let Some(value) = self.get(index, name) else {
			return Ok(None);
		};

		match value {
			Value::String(text) => Ok(Some(LazyText::Plain(text.clone()))),
			Value::Object(map) => match single_entry(map) {
				Some(("translate", Value::String(text))) => {
					Ok(Some(LazyText::Translated(Cow::Owned(text.clone()))))
				}
				Some(("safe", Value::String(html))) => {
					Ok(Some(LazyText::Safe(SafeString::new(html.clone()))))
				}
				_ => Err(invalid_value(path, name, value)),
			},
			_ => Err(invalid_value(path, name, value)),
		}
	}

	/// URL argument: a string or `{ route = ".." }`.
	pub fn get_url(&self, index: usize, name: &str, path: &str) -> ToolbarResult<Option<UrlSource>> {
		let Some(value) = self.get(index, name) else {
			return Ok(None);
		};

		match value {
			Value::String(url) => Ok(Some(UrlSource::Path(url.clone()))),
			Value::Object(map) => match single_entry(map) {
				Some(("route", Value::String(route))) => {
					Ok(Some(UrlSource::Route(Cow::Owned(route.clone()))))
				}
				_ => Err(invalid_value(path, name, value)),
			},
			_ => Err(invalid_value(path, name, value)),
		}
	}

	/// Rejects arguments beyond the ones an item accepts.
	pub fn expect_at_most(&self, positional: usize, names: &[&str], path: &str) -> ToolbarResult<()> {
		if self.args.len() > positional {
			return Err(ToolbarError::invalid_arguments(
				path,
				format!(
					"takes at most {} positional arguments, {} given",
					positional,
					self.args.len()
				),
			));
		}
		if let Some(unknown) = self.kwargs.keys().find(|key| !names.contains(&key.as_str())) {
			return Err(ToolbarError::invalid_arguments(
				path,
				format!("unexpected keyword argument '{}'", unknown),
			));
		}
		Ok(())
	}
}

fn single_entry(map: &Map<String, Value>) -> Option<(&str, &Value)> {
	if map.len() != 1 {
		return None;
	}
	map.iter().next().map(|(key, value)| (key.as_str(), value))
}

fn invalid_value(path: &str, name: &str, value: &Value) -> ToolbarError {
	ToolbarError::invalid_arguments(path, format!("invalid value for '{}': {}", name, value))
}

fn text_to_value(text: &LazyText) -> Value {
	match text {
		LazyText::Plain(text) => Value::String(text.clone()),
		LazyText::Safe(html) => serde_json::json!({ "safe": html.as_str() }),
		LazyText::Translated(message) => serde_json::json!({ "translate": &**message }),
	}
}

/// An item constructed on first render.
///
/// The constructed item is cached in the `LazyItem` and shared by every
/// toolbar that references it.
#[derive(Debug)]
pub struct LazyItem {
	target: ItemRef,
	args: ItemArgs,
	instance: OnceCell<ItemHandle>,
}

impl LazyItem {
	/// Defer loading `target` with `args`.
	pub fn new(target: ItemRef, args: ItemArgs) -> Self {
		Self {
			target,
			args,
			instance: OnceCell::new(),
		}
	}

	/// The deferred reference.
	pub fn target(&self) -> &ItemRef {
		&self.target
	}

	/// The constructor arguments.
	pub fn args(&self) -> &ItemArgs {
		&self.args
	}

	/// Returns `true` once the item has been constructed.
	pub fn is_loaded(&self) -> bool {
		self.instance.get().is_some()
	}

	pub(crate) fn instance(&self, registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
		self.instance
			.get_or_try_init(|| {
				tracing::debug!(target_ref = %self.target.describe(), "constructing lazy toolbar item");
				registry.load(&self.target, &self.args)
			})
			.cloned()
	}
}

/// A [`LazyItem`] bound to the registry it is loaded from.
#[derive(Debug)]
pub(crate) struct BoundLazyItem {
	pub(crate) lazy: Arc<LazyItem>,
	pub(crate) registry: Arc<ItemRegistry>,
}

impl RenderItem for BoundLazyItem {
	fn render(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		self.lazy.instance(&self.registry)?.render(request, context)
	}

	fn preload(&self) -> ToolbarResult<()> {
		self.lazy.instance(&self.registry)?.preload()
	}
}
