//! Common test fixtures for reinhardt-staff-toolbar tests
//!
//! This module provides reusable test fixtures using rstest framework.

use reinhardt_staff_toolbar::context::{Environment, RenderContext, StaffRequest, StaffUser};
use reinhardt_staff_toolbar::i18n::NullTranslator;
use reinhardt_staff_toolbar::registry::ItemRegistry;
use reinhardt_staff_toolbar::urls::RouteTable;
use rstest::*;
use std::sync::Arc;

/// Registry holding only the built-in items
#[fixture]
pub fn registry() -> Arc<ItemRegistry> {
	Arc::new(ItemRegistry::with_builtins())
}

/// Request of a logged-in staff member
#[fixture]
pub fn staff_request() -> StaffRequest {
	StaffRequest::new(StaffUser::staff("editor")).with_path("/about/")
}

/// Request of an anonymous visitor
#[fixture]
pub fn anonymous_request() -> StaffRequest {
	StaffRequest::new(StaffUser::anonymous()).with_path("/about/")
}

/// Route table with the admin site and the `pages.page` model
#[fixture]
pub fn routes() -> RouteTable {
	RouteTable::with_admin("/admin/").with_model("pages", "page")
}

/// Render context without a view or variables
#[fixture]
pub fn context(routes: RouteTable) -> RenderContext {
	RenderContext::new(Environment::new(Arc::new(routes), Arc::new(NullTranslator)))
}
