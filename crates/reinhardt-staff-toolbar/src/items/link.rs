//! Links
//!
//! A [`Link`] renders an anchor tag from the `(url, title)` pair produced by
//! its [`LinkSource`]. The source decides what to link to: a fixed URL or
//! route ([`StaticLink`]), or the object shown on the current page
//! ([`ChangeObjectLink`](crate::items::ChangeObjectLink)).

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::{SafeString, format_html};
use crate::i18n::LazyText;
use crate::items::RenderItem;
use crate::items::change_object::ChangeObjectLink;
use std::borrow::Cow;
use std::fmt;

const LINK_TEMPLATE: &str = r#"<a href="{0}">{1}</a>"#;

/// Link target and label resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkData {
	/// Target URL.
	pub url: String,
	/// Link label.
	pub title: LazyText,
}

impl LinkData {
	/// Create link data.
	pub fn new(url: impl Into<String>, title: impl Into<LazyText>) -> Self {
		Self {
			url: url.into(),
			title: title.into(),
		}
	}
}

/// Strategy that decides where a [`Link`] points for the current request.
pub trait LinkSource: fmt::Debug + Send + Sync {
	/// Return the link to render, or `None` to render nothing.
	fn get_link(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<LinkData>>;
}

/// Where a static link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
	/// A literal URL.
	Path(String),
	/// A named route, reversed on every render.
	Route(Cow<'static, str>),
}

impl UrlSource {
	/// A named route.
	pub const fn route(name: &'static str) -> Self {
		UrlSource::Route(Cow::Borrowed(name))
	}

	fn resolve(&self, context: &RenderContext) -> ToolbarResult<String> {
		match self {
			UrlSource::Path(url) => Ok(url.clone()),
			UrlSource::Route(name) => context.env().urls().reverse(name, &[]),
		}
	}
}

impl From<&str> for UrlSource {
	fn from(url: &str) -> Self {
		UrlSource::Path(url.to_string())
	}
}

impl From<String> for UrlSource {
	fn from(url: String) -> Self {
		UrlSource::Path(url)
	}
}

/// A link with a fixed URL and title.
///
/// Without a URL the link renders nothing. Without a title the URL is used
/// as the label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLink {
	url: Option<UrlSource>,
	title: Option<LazyText>,
}

impl StaticLink {
	/// Create a static link.
	pub fn new(url: Option<UrlSource>, title: Option<LazyText>) -> Self {
		Self { url, title }
	}

	/// Link to the admin index.
	pub fn admin_index() -> Self {
		Self::new(
			Some(UrlSource::route("admin:index")),
			Some(LazyText::translated("Admin dashboard")),
		)
	}

	/// Link to the logout view.
	pub fn logout() -> Self {
		Self::new(
			Some(UrlSource::route("admin:logout")),
			Some(LazyText::translated("Logout")),
		)
	}

	/// Replace the URL and title with the given values, where set.
	pub fn overridden_by(self, url: Option<UrlSource>, title: Option<LazyText>) -> Self {
		Self {
			url: url.or(self.url),
			title: title.or(self.title),
		}
	}
}

impl LinkSource for StaticLink {
	fn get_link(
		&self,
		_request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<LinkData>> {
		let Some(url) = &self.url else {
			return Ok(None);
		};
		let url = url.resolve(context)?;
		let title = self
			.title
			.clone()
			.unwrap_or_else(|| LazyText::Plain(url.clone()));

		Ok(Some(LinkData { url, title }))
	}
}

/// An anchor tag in the toolbar.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::context::{RenderContext, StaffRequest};
/// use reinhardt_staff_toolbar::items::{Link, RenderItem};
///
/// let link = Link::new("/admin/password_change/", "Change password");
/// let html = link
///     .render(&StaffRequest::default(), &RenderContext::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(html.as_str(), r#"<a href="/admin/password_change/">Change password</a>"#);
/// ```
#[derive(Debug)]
pub struct Link {
	source: Box<dyn LinkSource>,
}

impl Link {
	/// Link with a fixed URL and title.
	pub fn new(url: impl Into<UrlSource>, title: impl Into<LazyText>) -> Self {
		Self::with_source(StaticLink::new(Some(url.into()), Some(title.into())))
	}

	/// Link whose target is decided by a custom source.
	pub fn with_source(source: impl LinkSource + 'static) -> Self {
		Self {
			source: Box::new(source),
		}
	}

	/// Link to the admin index, labelled "Admin dashboard".
	pub fn admin_index() -> Self {
		Self::with_source(StaticLink::admin_index())
	}

	/// Link to the admin change page of the current page's object.
	pub fn change_object() -> Self {
		Self::with_source(ChangeObjectLink)
	}

	/// Link to the logout view, labelled "Logout".
	pub fn logout() -> Self {
		Self::with_source(StaticLink::logout())
	}

	/// The `(url, title)` pair for this request.
	pub fn get_link(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<LinkData>> {
		self.source.get_link(request, context)
	}
}

impl RenderItem for Link {
	fn render(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		let Some(link) = self.get_link(request, context)? else {
			return Ok(None);
		};

		let title = link.title.resolve(context.env().translator());
		Ok(Some(format_html(
			LINK_TEMPLATE,
			&[link.url.as_str().into(), title],
		)))
	}
}
