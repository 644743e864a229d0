//! Request and render context passed to toolbar items
//!
//! [`StaffRequest`] carries what belongs to the current request: the user's
//! staff flag and the per-request overrides set by
//! [`set_staff_object`](crate::tags::set_staff_object) and
//! [`set_staff_url`](crate::tags::set_staff_url). It is owned by the request
//! and never stored on shared toolbar items.
//!
//! [`RenderContext`] is the template context of the page being rendered: the
//! active view, template variables and the host services in [`Environment`].

use crate::i18n::{NullTranslator, Translator};
use crate::object::ObjectRef;
use crate::urls::{RouteTable, UrlResolver};
use crate::views::ViewRef;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The user viewing the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffUser {
	/// Username.
	pub username: String,
	/// Whether the user may see the staff toolbar.
	pub is_staff: bool,
}

impl StaffUser {
	/// A staff member.
	pub fn staff(username: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			is_staff: true,
		}
	}

	/// An anonymous, non-staff visitor.
	pub fn anonymous() -> Self {
		Self::default()
	}
}

/// Request-scoped toolbar state.
#[derive(Debug, Clone, Default)]
pub struct StaffRequest {
	user: StaffUser,
	path: String,
	staff_object: Option<ObjectRef>,
	staff_url: Option<String>,
}

impl StaffRequest {
	/// Create request state for a user.
	pub fn new(user: StaffUser) -> Self {
		Self {
			user,
			path: "/".to_string(),
			staff_object: None,
			staff_url: None,
		}
	}

	/// Set the request path.
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// The user viewing the page.
	pub fn user(&self) -> &StaffUser {
		&self.user
	}

	/// The request path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Object override set earlier in this render pass.
	pub fn staff_object(&self) -> Option<&ObjectRef> {
		self.staff_object.as_ref()
	}

	/// URL override set earlier in this render pass.
	pub fn staff_url(&self) -> Option<&str> {
		self.staff_url.as_deref()
	}

	pub(crate) fn set_staff_object(&mut self, object: ObjectRef) {
		self.staff_object = Some(object);
	}

	pub(crate) fn set_staff_url(&mut self, url: String) {
		self.staff_url = Some(url);
	}
}

/// Host services used while rendering.
#[derive(Clone)]
pub struct Environment {
	urls: Arc<dyn UrlResolver>,
	translator: Arc<dyn Translator>,
}

impl Environment {
	/// Create an environment from a URL resolver and a translator.
	pub fn new(urls: Arc<dyn UrlResolver>, translator: Arc<dyn Translator>) -> Self {
		Self { urls, translator }
	}

	/// Replace the translator.
	pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
		self.translator = translator;
		self
	}

	/// URL reversal service.
	pub fn urls(&self) -> &dyn UrlResolver {
		self.urls.as_ref()
	}

	/// Translation service.
	pub fn translator(&self) -> &dyn Translator {
		self.translator.as_ref()
	}
}

impl Default for Environment {
	/// Admin routes under `/admin/`, no translations.
	fn default() -> Self {
		Self::new(
			Arc::new(RouteTable::with_admin("/admin/")),
			Arc::new(NullTranslator),
		)
	}
}

impl fmt::Debug for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Environment").finish_non_exhaustive()
	}
}

/// A template context variable.
#[derive(Debug, Clone)]
pub enum ContextValue {
	/// A domain object.
	Object(ObjectRef),
	/// Any other template value.
	Value(serde_json::Value),
}

impl From<ObjectRef> for ContextValue {
	fn from(object: ObjectRef) -> Self {
		ContextValue::Object(object)
	}
}

impl From<serde_json::Value> for ContextValue {
	fn from(value: serde_json::Value) -> Self {
		ContextValue::Value(value)
	}
}

/// Template context of the page being rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
	env: Environment,
	view: Option<ViewRef>,
	variables: HashMap<String, ContextValue>,
}

impl RenderContext {
	/// Create a context with the given host services.
	pub fn new(env: Environment) -> Self {
		Self {
			env,
			view: None,
			variables: HashMap::new(),
		}
	}

	/// Set the active view.
	pub fn with_view(mut self, view: ViewRef) -> Self {
		self.view = Some(view);
		self
	}

	/// Set a template variable.
	pub fn with_var(mut self, name: impl Into<String>, value: impl Into<ContextValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Set a template variable.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ContextValue>) {
		self.variables.insert(name.into(), value.into());
	}

	/// Look up a template variable.
	pub fn get(&self, name: &str) -> Option<&ContextValue> {
		self.variables.get(name)
	}

	/// Look up a template variable holding a domain object.
	pub fn get_object(&self, name: &str) -> Option<&ObjectRef> {
		match self.variables.get(name) {
			Some(ContextValue::Object(object)) => Some(object),
			_ => None,
		}
	}

	/// The active view.
	pub fn view(&self) -> Option<&ViewRef> {
		self.view.as_ref()
	}

	/// Host services.
	pub fn env(&self) -> &Environment {
		&self.env
	}
}
