//! Domain objects and views used by the integration tests

use reinhardt_staff_toolbar::object::{ModelMeta, ObjectRef, StaffObject};
use std::sync::Arc;

/// A CMS page.
#[derive(Debug, Clone)]
pub struct Page {
	pub id: u32,
	pub language: Option<&'static str>,
}

impl StaffObject for Page {
	fn meta(&self) -> ModelMeta {
		ModelMeta::new("pages", "page", "page")
	}

	fn pk(&self) -> String {
		self.id.to_string()
	}

	fn current_language(&self) -> Option<String> {
		self.language.map(str::to_string)
	}
}

/// Shared handle to a page without translations.
pub fn page(id: u32) -> ObjectRef {
	Arc::new(Page { id, language: None })
}
