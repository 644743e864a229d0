//! The process-wide toolbar root

use crate::common::fixtures::*;
use crate::common::objects::*;
use reinhardt_staff_toolbar::context::{RenderContext, StaffRequest};
use reinhardt_staff_toolbar::html::format_html;
use reinhardt_staff_toolbar::{
	ItemRef, StaffToolbarSettings, configure, get_toolbar_root, render_root, render_staff_toolbar,
	set_staff_object, staff_toolbar_tree,
};
use rstest::*;
use serial_test::serial;
use std::sync::Arc;
use std::thread;

#[rstest]
#[serial]
fn test_root_is_built_once() {
	configure(StaffToolbarSettings::default());

	let first = get_toolbar_root().unwrap();
	let second = get_toolbar_root().unwrap();

	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(first.len(), 3);
}

#[rstest]
#[serial]
fn test_concurrent_first_access() {
	configure(StaffToolbarSettings::default());

	let roots: Vec<_> = (0..8)
		.map(|_| thread::spawn(|| get_toolbar_root().unwrap()))
		.collect::<Vec<_>>()
		.into_iter()
		.map(|handle| handle.join().unwrap())
		.collect();

	assert!(roots.iter().all(|root| Arc::ptr_eq(root, &roots[0])));
}

#[rstest]
#[serial]
fn test_failed_build_is_retried() {
	configure(StaffToolbarSettings::with_items([ItemRef::from("nope.items.Missing")]));
	assert!(get_toolbar_root().unwrap_err().is_configuration());
	assert!(get_toolbar_root().is_err());

	configure(StaffToolbarSettings::default());
	assert!(get_toolbar_root().is_ok());
}

#[rstest]
#[serial]
fn test_non_staff_see_nothing(anonymous_request: StaffRequest, context: RenderContext) {
	configure(StaffToolbarSettings::with_items([ItemRef::from("nope.items.Missing")]));

	// Not even a configuration error.
	let html = render_staff_toolbar(&anonymous_request, &context).unwrap();
	assert!(html.is_empty());
	let tree = staff_toolbar_tree(&anonymous_request, &context, |_, _| unreachable!()).unwrap();
	assert!(tree.is_empty());
}

#[rstest]
#[serial]
fn test_render_staff_toolbar(mut staff_request: StaffRequest, context: RenderContext) {
	configure(StaffToolbarSettings::default());
	set_staff_object(&mut staff_request, page(9));

	let html = render_staff_toolbar(&staff_request, &context).unwrap();

	assert!(html.as_str().starts_with("<div id=\"staff-toolbar\""));
	assert!(html.as_str().contains("<a href=\"/admin/pages/page/9/change/\">Change page</a>"));
	assert_eq!(
		render_root(&staff_request, &context).unwrap().as_str().matches("<li>").count(),
		3
	);
}

#[rstest]
#[serial]
fn test_staff_toolbar_tree(staff_request: StaffRequest, context: RenderContext) {
	configure(StaffToolbarSettings::from_toml_str(
		r#"
STAFF_TOOLBAR_ITEMS = [
    "staff_toolbar.items.AdminIndexLink",
    [{ title = "User" }, "staff_toolbar.items.LogoutLink"],
]
"#,
	)
	.unwrap());

	let html = staff_toolbar_tree(&staff_request, &context, |node, children| {
		Ok(match (&node.html, node.is_leaf_node()) {
			(Some(html), true) => format_html("<li>{0}</li>", &[html.into()]),
			(None, true) => Default::default(),
			(_, false) => format_html("<li><ul>{0}</ul></li>", &[children.into()]),
		})
	})
	.unwrap();

	assert_eq!(
		html.as_str(),
		"<li><a href=\"/admin/\">Admin dashboard</a></li>\
		 <li><ul><li><div class=\"toolbar-title\">User</div></li>\
		 <li><a href=\"/admin/logout/\">Logout</a></li></ul></li>"
	);
}
