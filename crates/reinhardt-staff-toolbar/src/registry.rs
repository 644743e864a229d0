//! Toolbar item registry
//!
//! Maps dotted paths such as `staff_toolbar.items.LogoutLink` to the symbols
//! that settings may reference. A path is split at its last dot into a module
//! and a symbol name.
//!
//! ## Registration
//!
//! Applications register their own items at compile time with
//! [`register_toolbar_item!`](crate::register_toolbar_item) and
//! [`register_toolbar_module!`](crate::register_toolbar_module); the
//! submissions are collected through `inventory` when the global registry is
//! first used. Registries can also be filled at runtime with
//! [`ItemRegistry::register`].
//!
//! ## Symbols
//!
//! - [`Symbol::Class`]: an item type, constructed with the configured arguments.
//! - [`Symbol::Function`]: a plain render function, used as-is.
//! - [`Symbol::Attribute`]: any other exported value. Referencing it as a
//!   toolbar item is a configuration error.
//!
//! A module may carry an initializer. It runs the first time a symbol of the
//! module is looked up. A successful run is remembered, a failed one is
//! retried on the next lookup. An initializer failure is returned as-is,
//! never reported as a missing module.

use crate::error::{BoxError, ConfigIssue, ToolbarError, ToolbarResult};
use crate::i18n::LazyText;
use crate::items::{FnItem, Group, ItemHandle, Link, Literal, RootNode, StaticLink, Title, UrlSource};
use crate::reference::{BoundLazyItem, ItemArgs, ItemRef};
use crate::settings::STAFF_TOOLBAR_ITEMS;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Module that holds the built-in items.
pub const BUILTIN_MODULE: &str = "staff_toolbar.items";

/// Module initializer.
pub type ModuleInit = fn() -> Result<(), BoxError>;

/// Constructor of an item type.
pub type BuildFn = fn(&ItemArgs, &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle>;

/// An item type: a named constructor.
#[derive(Clone, Copy)]
pub struct ItemFactory {
	name: &'static str,
	build: BuildFn,
}

impl ItemFactory {
	/// Create a factory.
	pub const fn new(name: &'static str, build: BuildFn) -> Self {
		Self { name, build }
	}

	/// Name of the item type.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Construct an item.
	pub fn build(&self, args: &ItemArgs, registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
		(self.build)(args, registry)
	}
}

impl fmt::Debug for ItemFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ItemFactory").field(&self.name).finish()
	}
}

/// A symbol exported by a module.
#[derive(Debug, Clone, Copy)]
pub enum Symbol {
	/// An item type.
	Class(ItemFactory),
	/// A render function.
	Function(FnItem),
	/// A value that is not a toolbar item.
	Attribute(&'static str),
}

/// Compile-time symbol registration, see [`register_toolbar_item!`](crate::register_toolbar_item).
pub struct ItemRegistration {
	/// Module path, e.g. `myapp.toolbar`.
	pub module: &'static str,
	/// Symbol name, e.g. `ClockItem`.
	pub name: &'static str,
	/// The symbol.
	pub symbol: Symbol,
}

inventory::collect!(ItemRegistration);

/// Compile-time module registration, see [`register_toolbar_module!`](crate::register_toolbar_module).
pub struct ModuleRegistration {
	/// Module path.
	pub module: &'static str,
	/// Optional initializer.
	pub init: Option<ModuleInit>,
}

inventory::collect!(ModuleRegistration);

struct ModuleEntry {
	symbols: HashMap<String, Symbol>,
	init: Option<ModuleInit>,
	state: Arc<OnceCell<()>>,
}

impl ModuleEntry {
	fn new(init: Option<ModuleInit>) -> Self {
		Self {
			symbols: HashMap::new(),
			init,
			state: Arc::new(OnceCell::new()),
		}
	}
}

/// Global registry, filled with the built-ins and all `inventory` submissions.
static GLOBAL_REGISTRY: Lazy<Arc<ItemRegistry>> = Lazy::new(|| Arc::new(ItemRegistry::discover()));

/// Registry of the symbols toolbar settings may reference.
pub struct ItemRegistry {
	modules: RwLock<HashMap<String, ModuleEntry>>,
}

impl ItemRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self {
			modules: RwLock::new(HashMap::new()),
		}
	}

	/// Create a registry holding the built-in items.
	pub fn with_builtins() -> Self {
		let registry = Self::new();
		for &(name, build) in BUILTINS {
			registry.insert(BUILTIN_MODULE, name, Symbol::Class(ItemFactory::new(name, build)));
		}
		registry
	}

	/// Create a registry holding the built-ins and every compile-time registration.
	pub fn discover() -> Self {
		let registry = Self::with_builtins();
		for module in inventory::iter::<ModuleRegistration> {
			registry.register_module(module.module, module.init);
		}
		for item in inventory::iter::<ItemRegistration> {
			registry.insert(item.module, item.name, item.symbol);
		}
		tracing::debug!(
			modules = registry.modules.read().len(),
			"discovered toolbar item registrations"
		);
		registry
	}

	/// The process-wide registry.
	pub fn global() -> Arc<ItemRegistry> {
		GLOBAL_REGISTRY.clone()
	}

	/// Register a module, optionally with an initializer.
	///
	/// Registering an initializer for a known module replaces the previous one
	/// and forgets its outcome.
	pub fn register_module(&self, module: &str, init: Option<ModuleInit>) {
		let mut modules = self.modules.write();
		let entry = modules
			.entry(module.to_string())
			.or_insert_with(|| ModuleEntry::new(None));
		if init.is_some() {
			entry.init = init;
			entry.state = Arc::new(OnceCell::new());
		}
	}

	/// Register a symbol under a dotted path.
	pub fn register(&self, path: &str, symbol: Symbol) -> ToolbarResult<()> {
		let (module, name) = split_path(path, "register")?;
		self.insert(module, name, symbol);
		Ok(())
	}

	fn insert(&self, module: &str, name: &str, symbol: Symbol) {
		self.modules
			.write()
			.entry(module.to_string())
			.or_insert_with(|| ModuleEntry::new(None))
			.symbols
			.insert(name.to_string(), symbol);
	}

	/// Returns `true` if the module is known.
	pub fn has_module(&self, module: &str) -> bool {
		self.modules.read().contains_key(module)
	}

	/// All registered symbol paths, sorted.
	pub fn symbol_paths(&self) -> Vec<String> {
		let modules = self.modules.read();
		let mut paths: Vec<String> = modules
			.iter()
			.flat_map(|(module, entry)| {
				entry
					.symbols
					.keys()
					.map(move |name| format!("{}.{}", module, name))
			})
			.collect();
		paths.sort();
		paths
	}

	/// Look up the symbol a dotted path points to.
	///
	/// A missing module or symbol is a configuration error naming `setting`.
	/// A failing module initializer is returned unchanged.
	pub fn import_symbol(&self, path: &str, setting: &str) -> ToolbarResult<Symbol> {
		let (module, name) = split_path(path, setting)?;

		let (init, state, symbol) = {
			let modules = self.modules.read();
			let entry = modules.get(module).ok_or_else(|| {
				ToolbarError::improperly_configured(setting, path, ConfigIssue::ModuleNotFound)
			})?;
			(entry.init, entry.state.clone(), entry.symbols.get(name).copied())
		};

		if let Some(init) = init {
			state.get_or_try_init(|| {
				tracing::debug!(module, "initializing toolbar module");
				init().map_err(ToolbarError::import)
			})?;
		}

		symbol.ok_or_else(|| {
			ToolbarError::improperly_configured(setting, path, ConfigIssue::SymbolNotFound)
		})
	}

	/// Turn a reference into an item.
	///
	/// Lists become groups of their loaded elements. Paths are looked up and
	/// item types constructed with `args`. Nothing is cached here.
	pub fn load(self: &Arc<Self>, reference: &ItemRef, args: &ItemArgs) -> ToolbarResult<ItemHandle> {
		match reference {
			ItemRef::List(children) => {
				let items = children
					.iter()
					.map(|child| self.load(child, &ItemArgs::default()))
					.collect::<ToolbarResult<Vec<_>>>()?;
				Ok(Arc::new(Group::from_items(self.clone(), items)))
			}
			ItemRef::Path(path) => {
				tracing::debug!(path = %path, "loading toolbar item");
				let symbol = self.import_symbol(path, STAFF_TOOLBAR_ITEMS)?;
				self.instantiate(path, symbol, args)
			}
			ItemRef::Class(factory) => factory.build(args, self),
			ItemRef::Item(item) => Ok(item.clone()),
			ItemRef::Lazy(lazy) => Ok(Arc::new(BoundLazyItem {
				lazy: lazy.clone(),
				registry: self.clone(),
			})),
			ItemRef::Value(value) => Err(ToolbarError::improperly_configured(
				STAFF_TOOLBAR_ITEMS,
				value.to_string(),
				ConfigIssue::NotCallable,
			)),
		}
	}

	fn instantiate(
		self: &Arc<Self>,
		path: &str,
		symbol: Symbol,
		args: &ItemArgs,
	) -> ToolbarResult<ItemHandle> {
		match symbol {
			Symbol::Class(factory) => factory.build(args, self),
			Symbol::Function(item) => Ok(Arc::new(item)),
			Symbol::Attribute(_) => Err(ToolbarError::improperly_configured(
				STAFF_TOOLBAR_ITEMS,
				path,
				ConfigIssue::NotCallable,
			)),
		}
	}
}

impl Default for ItemRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ItemRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ItemRegistry")
			.field("modules", &self.modules.read().len())
			.finish()
	}
}

fn split_path<'a>(path: &'a str, setting: &str) -> ToolbarResult<(&'a str, &'a str)> {
	match path.rsplit_once('.') {
		Some((module, name)) if !module.is_empty() && !name.is_empty() => Ok((module, name)),
		_ => Err(ToolbarError::improperly_configured(
			setting,
			path,
			ConfigIssue::MalformedPath,
		)),
	}
}

// ============================================================================
// Built-in items
// ============================================================================

const BUILTINS: &[(&str, BuildFn)] = &[
	("Title", build_title),
	("Literal", build_literal),
	("Link", build_link),
	("AdminIndexLink", build_admin_index_link),
	("ChangeObjectLink", build_change_object_link),
	("LogoutLink", build_logout_link),
	("Group", build_group),
	("RootNode", build_root_node),
];

fn build_title(args: &ItemArgs, _registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	const PATH: &str = "staff_toolbar.items.Title";
	args.expect_at_most(1, &["title"], PATH)?;
	let title = args
		.get_text(0, "title", PATH)?
		.ok_or_else(|| ToolbarError::invalid_arguments(PATH, "missing argument 'title'"))?;
	Ok(Arc::new(Title::new(title)))
}

fn build_literal(args: &ItemArgs, _registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	const PATH: &str = "staff_toolbar.items.Literal";
	args.expect_at_most(1, &["title", "content"], PATH)?;
	let content = args
		.get(0, "content")
		.or_else(|| args.get(0, "title"))
		.ok_or_else(|| ToolbarError::invalid_arguments(PATH, "missing argument 'content'"))?;
	match content.as_str() {
		Some(content) => Ok(Arc::new(Literal::new(content))),
		None => Err(ToolbarError::invalid_arguments(
			PATH,
			format!("content must be a string, got {}", content),
		)),
	}
}

fn static_link_args(args: &ItemArgs, path: &str) -> ToolbarResult<(Option<UrlSource>, Option<LazyText>)> {
	args.expect_at_most(2, &["url", "title"], path)?;
	Ok((args.get_url(0, "url", path)?, args.get_text(1, "title", path)?))
}

fn build_link(args: &ItemArgs, _registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	let (url, title) = static_link_args(args, "staff_toolbar.items.Link")?;
	Ok(Arc::new(Link::with_source(StaticLink::new(url, title))))
}

fn build_admin_index_link(args: &ItemArgs, _registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	let (url, title) = static_link_args(args, "staff_toolbar.items.AdminIndexLink")?;
	Ok(Arc::new(Link::with_source(StaticLink::admin_index().overridden_by(url, title))))
}

fn build_logout_link(args: &ItemArgs, _registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	let (url, title) = static_link_args(args, "staff_toolbar.items.LogoutLink")?;
	Ok(Arc::new(Link::with_source(StaticLink::logout().overridden_by(url, title))))
}

fn build_change_object_link(
	args: &ItemArgs,
	_registry: &Arc<ItemRegistry>,
) -> ToolbarResult<ItemHandle> {
	args.expect_at_most(0, &[], "staff_toolbar.items.ChangeObjectLink")?;
	Ok(Arc::new(Link::change_object()))
}

fn group_args(args: &ItemArgs, registry: &Arc<ItemRegistry>, path: &str) -> ToolbarResult<Group> {
	args.expect_at_most(usize::MAX, &["title"], path)?;
	let children = args.args.iter().cloned().map(ItemRef::from_value);
	let group = Group::with_registry(registry.clone(), children);
	Ok(match args.get_text(usize::MAX, "title", path)? {
		Some(title) => group.with_title(title),
		None => group,
	})
}

fn build_group(args: &ItemArgs, registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	Ok(Arc::new(group_args(args, registry, "staff_toolbar.items.Group")?))
}

fn build_root_node(args: &ItemArgs, registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	let group = group_args(args, registry, "staff_toolbar.items.RootNode")?;
	Ok(Arc::new(RootNode::new(group)))
}

// ============================================================================
// Registration Macros
// ============================================================================

/// Register a toolbar item under a dotted module path
///
/// # Example
///
/// ```rust,ignore
/// use reinhardt_staff_toolbar::register_toolbar_item;
///
/// register_toolbar_item!("myapp.toolbar", "Clock", class: build_clock);
/// register_toolbar_item!("myapp.toolbar", "version", function: render_version);
/// register_toolbar_item!("myapp.toolbar", "VERSION", attribute: "1.0.0");
/// ```
#[macro_export]
macro_rules! register_toolbar_item {
	($module:expr, $name:expr, class: $build:expr) => {
		$crate::inventory::submit! {
			$crate::registry::ItemRegistration {
				module: $module,
				name: $name,
				symbol: $crate::registry::Symbol::Class(
					$crate::registry::ItemFactory::new($name, $build),
				),
			}
		}
	};
	($module:expr, $name:expr, function: $render:expr) => {
		$crate::inventory::submit! {
			$crate::registry::ItemRegistration {
				module: $module,
				name: $name,
				symbol: $crate::registry::Symbol::Function(
					$crate::items::FnItem::new($name, $render),
				),
			}
		}
	};
	($module:expr, $name:expr, attribute: $value:expr) => {
		$crate::inventory::submit! {
			$crate::registry::ItemRegistration {
				module: $module,
				name: $name,
				symbol: $crate::registry::Symbol::Attribute($value),
			}
		}
	};
}

/// Register a toolbar module, optionally with an initializer
///
/// # Example
///
/// ```rust,ignore
/// use reinhardt_staff_toolbar::register_toolbar_module;
///
/// register_toolbar_module!("myapp.toolbar");
/// register_toolbar_module!("myapp.reports", init: load_report_catalog);
/// ```
#[macro_export]
macro_rules! register_toolbar_module {
	($module:expr) => {
		$crate::inventory::submit! {
			$crate::registry::ModuleRegistration {
				module: $module,
				init: None,
			}
		}
	};
	($module:expr, init: $init:expr) => {
		$crate::inventory::submit! {
			$crate::registry::ModuleRegistration {
				module: $module,
				init: Some($init),
			}
		}
	};
}
