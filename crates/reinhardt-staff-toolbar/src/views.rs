//! View hooks consulted by the change-object link
//!
//! A page view can tell the toolbar which object it displays, or which admin
//! URL should be offered, by implementing [`StaffView`]. Every hook is
//! optional; a view that does not override a hook is treated as not exposing
//! it.
//!
//! [`StaffUrlMixin`] wraps a view and fills in the usual defaults: the staff
//! object is the view's bound object, and the staff URL is that object's admin
//! change page, or the admin changelist of the view's model.

use crate::error::ToolbarResult;
use crate::object::{ModelMeta, ObjectRef};
use crate::urls::{UrlResolver, admin_urlname};
use std::fmt;
use std::sync::Arc;

/// A page view as seen by the staff toolbar.
pub trait StaffView: fmt::Debug + Send + Sync {
	/// The single object the view operates on, if any.
	fn object(&self) -> Option<ObjectRef> {
		None
	}

	/// The model the view lists or displays, if known.
	fn model(&self) -> Option<ModelMeta> {
		None
	}

	/// Object the toolbar should offer to edit.
	fn get_staff_object(&self) -> Option<ObjectRef> {
		None
	}

	/// Admin URL the toolbar should link to.
	fn get_staff_url(&self, _urls: &dyn UrlResolver) -> ToolbarResult<Option<String>> {
		Ok(None)
	}
}

/// Shared handle to a [`StaffView`].
pub type ViewRef = Arc<dyn StaffView>;

/// Wraps a view and provides default staff object and staff URL hooks.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::object::ModelMeta;
/// use reinhardt_staff_toolbar::urls::RouteTable;
/// use reinhardt_staff_toolbar::views::{DetailView, StaffUrlMixin, StaffView};
///
/// let routes = RouteTable::with_admin("/admin/").with_model("blog", "post");
/// let view = StaffUrlMixin::new(DetailView::for_model(ModelMeta::new("blog", "post", "post")));
///
/// assert_eq!(
///     view.get_staff_url(&routes).unwrap().as_deref(),
///     Some("/admin/blog/post/")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StaffUrlMixin<V> {
	inner: V,
}

impl<V: StaffView> StaffUrlMixin<V> {
	/// Wrap a view.
	pub fn new(inner: V) -> Self {
		Self { inner }
	}

	/// The wrapped view.
	pub fn inner(&self) -> &V {
		&self.inner
	}
}

impl<V: StaffView> StaffView for StaffUrlMixin<V> {
	fn object(&self) -> Option<ObjectRef> {
		self.inner.object()
	}

	fn model(&self) -> Option<ModelMeta> {
		self.inner.model()
	}

	fn get_staff_object(&self) -> Option<ObjectRef> {
		self.inner.get_staff_object().or_else(|| self.object())
	}

	fn get_staff_url(&self, urls: &dyn UrlResolver) -> ToolbarResult<Option<String>> {
		if let Some(url) = self.inner.get_staff_url(urls)? {
			return Ok(Some(url));
		}

		if let Some(object) = self.get_staff_object() {
			// Detail page
			let pk = object.pk();
			return urls
				.reverse(&admin_urlname(&object.meta(), "change"), &[pk.as_str()])
				.map(Some);
		}

		match view_model(self) {
			// List page
			Some(meta) => urls.reverse(&admin_urlname(&meta, "changelist"), &[]).map(Some),
			None => Ok(None),
		}
	}
}

/// Model of a view: the explicit model, else the model of its bound object.
fn view_model(view: &dyn StaffView) -> Option<ModelMeta> {
	view.model().or_else(|| view.object().map(|object| object.meta()))
}

/// Minimal view holding an optional object and model.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
	object: Option<ObjectRef>,
	model: Option<ModelMeta>,
}

impl DetailView {
	/// View bound to a single object.
	pub fn for_object(object: ObjectRef) -> Self {
		Self {
			model: Some(object.meta()),
			object: Some(object),
		}
	}

	/// View over a model without a bound object.
	pub fn for_model(model: ModelMeta) -> Self {
		Self {
			object: None,
			model: Some(model),
		}
	}
}

impl StaffView for DetailView {
	fn object(&self) -> Option<ObjectRef> {
		self.object.clone()
	}

	fn model(&self) -> Option<ModelMeta> {
		self.model.clone()
	}
}
