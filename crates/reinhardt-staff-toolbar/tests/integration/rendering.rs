//! Rendering of configured toolbars

use crate::common::fixtures::*;
use crate::common::objects::*;
use reinhardt_staff_toolbar::context::{Environment, RenderContext, StaffRequest};
use reinhardt_staff_toolbar::i18n::{CatalogTranslator, LazyText};
use reinhardt_staff_toolbar::registry::ItemRegistry;
use reinhardt_staff_toolbar::urls::RouteTable;
use reinhardt_staff_toolbar::views::{DetailView, StaffUrlMixin};
use reinhardt_staff_toolbar::{
	ConfigIssue, ItemArgs, ItemRef, StaffToolbarSettings, Toolbar, ToolbarError, set_staff_object,
	set_staff_url, toolbar_item, toolbar_literal, toolbar_title,
};
use rstest::*;
use serde_json::json;
use std::sync::Arc;

const ADMIN_ROW: &str = "<li><a href=\"/admin/\">Admin dashboard</a></li>";
const LOGOUT_ROW: &str = "<li><a href=\"/admin/logout/\">Logout</a></li>";
const ROOT_TITLE: &str = "<div class=\"toolbar-title\">Staff features</div>";

fn user_group() -> ItemRef {
	ItemRef::List(vec![
		toolbar_title(LazyText::translated("User")),
		toolbar_item(
			"staff_toolbar.items.Link",
			ItemArgs::new()
				.kwarg("url", json!({ "route": "admin:password_change" }))
				.kwarg("title", json!({ "translate": "Change password" })),
		),
		ItemRef::from("staff_toolbar.items.LogoutLink"),
	])
}

#[rstest]
fn test_default_configuration(
	registry: Arc<ItemRegistry>,
	staff_request: StaffRequest,
	context: RenderContext,
) {
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();

	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert_eq!(
		html.as_str(),
		format!("{ROOT_TITLE}\n<ul>\n{ADMIN_ROW}\n{LOGOUT_ROW}\n</ul>")
	);
}

#[rstest]
fn test_nested_group(registry: Arc<ItemRegistry>, staff_request: StaffRequest, context: RenderContext) {
	let settings = StaffToolbarSettings::with_items([
		ItemRef::from("staff_toolbar.items.AdminIndexLink"),
		ItemRef::from("staff_toolbar.items.ChangeObjectLink"),
		user_group(),
	]);
	let toolbar = Toolbar::from_settings(&settings, registry).unwrap();

	let html = toolbar.render_root(&staff_request, &context).unwrap();

	let nested = format!(
		"<ul>\n<li><div class=\"toolbar-title\">User</div></li>\n\
		 <li><a href=\"/admin/password_change/\">Change password</a></li>\n\
		 {LOGOUT_ROW}\n</ul>"
	);
	assert_eq!(
		html.as_str(),
		format!("{ROOT_TITLE}\n<ul>\n{ADMIN_ROW}\n<li>{nested}</li>\n</ul>")
	);
}

#[rstest]
fn test_nested_group_from_toml(
	registry: Arc<ItemRegistry>,
	staff_request: StaffRequest,
	context: RenderContext,
) {
	let settings = StaffToolbarSettings::from_toml_str(
		r#"
STAFF_TOOLBAR_ITEMS = [
    "staff_toolbar.items.AdminIndexLink",
    [
        { title = "User" },
        { path = "staff_toolbar.items.Link", kwargs = { url = "/admin/password_change/", title = "Change password" } },
        "staff_toolbar.items.LogoutLink",
    ],
]
"#,
	)
	.unwrap();
	let toolbar = Toolbar::from_settings(&settings, registry).unwrap();

	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert!(html.as_str().contains(
		"<li><ul>\n<li><div class=\"toolbar-title\">User</div></li>\n\
		 <li><a href=\"/admin/password_change/\">Change password</a></li>"
	));
}

#[rstest]
fn test_set_staff_object(registry: Arc<ItemRegistry>, mut staff_request: StaffRequest, context: RenderContext) {
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();

	set_staff_object(&mut staff_request, page(12));
	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert!(
		html.as_str()
			.contains("<li><a href=\"/admin/pages/page/12/change/\">Change page</a></li>")
	);
}

#[rstest]
fn test_set_staff_url(registry: Arc<ItemRegistry>, mut staff_request: StaffRequest, context: RenderContext) {
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();

	set_staff_url(&mut staff_request, "/admin/pages/page/3/change/");
	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert!(
		html.as_str()
			.contains("<li><a href=\"/admin/pages/page/3/change/\">Edit content</a></li>")
	);
}

#[rstest]
fn test_view_provides_object(registry: Arc<ItemRegistry>, staff_request: StaffRequest, context: RenderContext) {
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();
	let context = context.with_view(Arc::new(StaffUrlMixin::new(DetailView::for_object(page(4)))));

	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert!(html.as_str().contains("/admin/pages/page/4/change/"));
}

#[rstest]
fn test_unknown_module(registry: Arc<ItemRegistry>) {
	let settings = StaffToolbarSettings::with_items([
		ItemRef::from("staff_toolbar.items.AdminIndexLink"),
		ItemRef::from("shop.toolbar.CartLink"),
	]);

	let err = Toolbar::from_settings(&settings, registry).unwrap_err();

	match err {
		ToolbarError::ImproperlyConfigured { setting, path, reason } => {
			assert_eq!(setting, "STAFF_TOOLBAR_ITEMS");
			assert_eq!(path, "shop.toolbar.CartLink");
			assert_eq!(reason, ConfigIssue::ModuleNotFound);
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[rstest]
fn test_unknown_symbol_in_nested_group(registry: Arc<ItemRegistry>) {
	let settings = StaffToolbarSettings::with_items([ItemRef::List(vec![ItemRef::from(
		"staff_toolbar.items.AdminLink",
	)])]);

	let err = Toolbar::from_settings(&settings, registry).unwrap_err();

	assert!(err.to_string().contains("staff_toolbar.items.AdminLink"));
}

#[rstest]
fn test_child_count_matches_configuration(registry: Arc<ItemRegistry>) {
	let settings = StaffToolbarSettings::with_items([
		ItemRef::from("staff_toolbar.items.ChangeObjectLink"),
		user_group(),
		toolbar_literal("<hr>"),
		ItemRef::from("staff_toolbar.items.LogoutLink"),
	]);

	let toolbar = Toolbar::from_settings(&settings, registry).unwrap();

	assert_eq!(toolbar.root().len(), 4);
	assert_eq!(toolbar.root().group().children().unwrap().len(), 4);
}

#[rstest]
fn test_overrides_do_not_leak(registry: Arc<ItemRegistry>, staff_request: StaffRequest, context: RenderContext) {
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();
	let mut first = staff_request.clone();
	set_staff_object(&mut first, page(1));

	let with_object = toolbar.render_root(&first, &context).unwrap();
	let without_object = toolbar.render_root(&staff_request, &context).unwrap();

	assert!(with_object.as_str().contains("Change page"));
	assert!(!without_object.as_str().contains("Change page"));
	assert_eq!(
		without_object.as_str(),
		format!("{ROOT_TITLE}\n<ul>\n{ADMIN_ROW}\n{LOGOUT_ROW}\n</ul>")
	);
}

#[rstest]
fn test_all_empty_renders_nothing(registry: Arc<ItemRegistry>, staff_request: StaffRequest, context: RenderContext) {
	let settings = StaffToolbarSettings::with_items([
		ItemRef::from("staff_toolbar.items.ChangeObjectLink"),
		ItemRef::List(vec![ItemRef::from("staff_toolbar.items.ChangeObjectLink")]),
	]);
	let toolbar = Toolbar::from_settings(&settings, registry).unwrap();

	assert!(toolbar.render_root(&staff_request, &context).unwrap().is_empty());
	assert!(toolbar.render_toolbar(&staff_request, &context).unwrap().is_empty());
}

#[rstest]
fn test_translated_labels(registry: Arc<ItemRegistry>, staff_request: StaffRequest, routes: RouteTable) {
	let translator = CatalogTranslator::new("nl")
		.with_translation("Staff features", "Beheerfuncties")
		.with_translation("Admin dashboard", "Beheeroverzicht")
		.with_translation("Logout", "Uitloggen");
	let context = RenderContext::new(Environment::new(Arc::new(routes), Arc::new(translator)));
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();

	let html = toolbar.render_root(&staff_request, &context).unwrap();

	assert_eq!(
		html.as_str(),
		"<div class=\"toolbar-title\">Beheerfuncties</div>\n<ul>\n\
		 <li><a href=\"/admin/\">Beheeroverzicht</a></li>\n\
		 <li><a href=\"/admin/logout/\">Uitloggen</a></li>\n</ul>"
	);
}

#[rstest]
fn test_wrapper_template(registry: Arc<ItemRegistry>, staff_request: StaffRequest, context: RenderContext) {
	let toolbar = Toolbar::from_settings(&StaffToolbarSettings::default(), registry).unwrap();

	let html = toolbar.render_toolbar(&staff_request, &context).unwrap();

	assert!(html.as_str().starts_with("<div id=\"staff-toolbar\" class=\"staff-toolbar\">\n"));
	assert!(html.as_str().contains(ADMIN_ROW));
}
