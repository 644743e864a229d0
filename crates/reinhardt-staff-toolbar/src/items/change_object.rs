//! "Change this object" link
//!
//! [`ChangeObjectLink`] looks for the main object of the current page, and
//! links to its admin change page. It tries, in order:
//!
//! 1. the object set with [`set_staff_object`](crate::tags::set_staff_object),
//! 2. the URL set with [`set_staff_url`](crate::tags::set_staff_url),
//! 3. the view's `get_staff_url()` and `get_staff_object()` hooks,
//! 4. the view's bound object, or a template variable named `object`.
//!
//! The `object` variable is a naming convention of detail templates, not a
//! reliable discovery mechanism. Pages that render something else under that
//! name should set the staff object explicitly.

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::i18n::{LazyText, change_label};
use crate::items::link::{LinkData, LinkSource};
use crate::object::ObjectRef;
use crate::urls::admin_urlname;

/// Link source pointing at the admin page of the current page's object.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeObjectLink;

impl LinkSource for ChangeObjectLink {
	fn get_link(
		&self,
		request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<LinkData>> {
		let mut object = request.staff_object().cloned();
		let mut url = request
			.staff_url()
			.filter(|url| !url.is_empty())
			.map(str::to_string);

		if object.is_none() && url.is_none() {
			// Nothing set by the template, ask the view.
			if let Some(view) = context.view() {
				url = view
					.get_staff_url(context.env().urls())?
					.filter(|url| !url.is_empty());
				object = view.get_staff_object();
			}

			if object.is_none() {
				object = get_object(context);
			}
		}

		let translator = context.env().translator();
		let link = match (object, url) {
			(Some(object), Some(url)) => Some(LinkData::new(url, admin_title(context, &object))),
			(Some(object), None) => Some(LinkData::new(
				admin_url(context, &object)?,
				admin_title(context, &object),
			)),
			(None, Some(url)) => Some(LinkData::new(url, translator.gettext("Edit content"))),
			(None, None) => None,
		};

		Ok(link)
	}
}

/// Find the main object of the page in the view or the template context.
///
/// The view's bound object takes precedence over the `object` variable.
pub fn get_object(context: &RenderContext) -> Option<ObjectRef> {
	context
		.view()
		.and_then(|view| view.object())
		.or_else(|| context.get_object("object").cloned())
}

/// Admin change URL of an object.
///
/// Translatable objects open on the tab of their current language.
fn admin_url(context: &RenderContext, object: &ObjectRef) -> ToolbarResult<String> {
	let pk = object.pk();
	let url = context
		.env()
		.urls()
		.reverse(&admin_urlname(&object.meta(), "change"), &[pk.as_str()])?;

	Ok(match object.current_language() {
		Some(language) => format!("{}?language={}", url, language),
		None => url,
	})
}

fn admin_title(context: &RenderContext, object: &ObjectRef) -> LazyText {
	LazyText::Plain(change_label(
		context.env().translator(),
		&object.meta().verbose_name,
	))
}
