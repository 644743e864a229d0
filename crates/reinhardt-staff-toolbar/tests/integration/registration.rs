//! Items registered by applications at compile time

use crate::common::fixtures::*;
use reinhardt_staff_toolbar::context::{RenderContext, StaffRequest};
use reinhardt_staff_toolbar::error::BoxError;
use reinhardt_staff_toolbar::html::SafeString;
use reinhardt_staff_toolbar::items::{ItemHandle, Literal};
use reinhardt_staff_toolbar::registry::ItemRegistry;
use reinhardt_staff_toolbar::{
	ConfigIssue, ItemArgs, ItemRef, StaffToolbarSettings, Toolbar, ToolbarError, ToolbarResult,
	register_toolbar_item, register_toolbar_module,
};
use rstest::*;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct MissingDependency;

impl fmt::Display for MissingDependency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("cannot import name 'Cart' from 'shop.models'")
	}
}

impl std::error::Error for MissingDependency {}

fn broken_init() -> Result<(), BoxError> {
	Err(Box::new(MissingDependency))
}

fn render_version(
	_request: &StaffRequest,
	_context: &RenderContext,
) -> ToolbarResult<Option<SafeString>> {
	Ok(Some(SafeString::escape("v0.1 <beta>")))
}

fn build_greeting(args: &ItemArgs, _registry: &Arc<ItemRegistry>) -> ToolbarResult<ItemHandle> {
	let name = args
		.get_text(0, "name", "testapp.toolbar.Greeting")?
		.map(|name| name.to_text(&reinhardt_staff_toolbar::i18n::NullTranslator))
		.unwrap_or_else(|| "staff".to_string());
	Ok(Arc::new(Literal::new(SafeString::escape(&format!("Hello {name}")))))
}

register_toolbar_module!("shop.toolbar", init: broken_init);
register_toolbar_item!("shop.toolbar", "CartLink", class: build_greeting);

register_toolbar_item!("testapp.toolbar", "version", function: render_version);
register_toolbar_item!("testapp.toolbar", "Greeting", class: build_greeting);
register_toolbar_item!("testapp.toolbar", "VERSION", attribute: "0.1");

#[rstest]
fn test_module_init_error_propagates_unchanged() {
	let settings = StaffToolbarSettings::with_items([ItemRef::from("shop.toolbar.CartLink")]);

	let err = Toolbar::from_settings(&settings, ItemRegistry::global()).unwrap_err();

	assert!(!err.is_configuration());
	assert_eq!(err.to_string(), "cannot import name 'Cart' from 'shop.models'");
	match err {
		ToolbarError::Import(inner) => assert!(inner.downcast_ref::<MissingDependency>().is_some()),
		other => panic!("unexpected error: {other:?}"),
	}
}

#[rstest]
fn test_registered_items_render(staff_request: StaffRequest, context: RenderContext) {
	let settings = StaffToolbarSettings::with_items([
		ItemRef::from("testapp.toolbar.version"),
		ItemRef::from("testapp.toolbar.Greeting"),
		reinhardt_staff_toolbar::toolbar_item(
			"testapp.toolbar.Greeting",
			ItemArgs::new().kwarg("name", "Ada"),
		),
	]);
	let toolbar = Toolbar::from_settings(&settings, ItemRegistry::global()).unwrap();

	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert!(html.as_str().contains(
		"<li>v0.1 &lt;beta&gt;</li>\n<li>Hello staff</li>\n<li>Hello Ada</li>"
	));
}

#[rstest]
fn test_registered_attribute_is_not_an_item() {
	let settings = StaffToolbarSettings::with_items([ItemRef::from("testapp.toolbar.VERSION")]);

	let err = Toolbar::from_settings(&settings, ItemRegistry::global()).unwrap_err();

	assert!(matches!(
		err,
		ToolbarError::ImproperlyConfigured {
			reason: ConfigIssue::NotCallable,
			..
		}
	));
}

#[rstest]
fn test_global_registry_contains_builtins_and_registrations() {
	let paths = ItemRegistry::global().symbol_paths();

	assert!(paths.contains(&"staff_toolbar.items.LogoutLink".to_string()));
	assert!(paths.contains(&"testapp.toolbar.Greeting".to_string()));
	assert!(ItemRegistry::global().has_module("shop.toolbar"));
}
