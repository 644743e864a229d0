//! Section titles

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::{SafeString, format_html};
use crate::i18n::LazyText;
use crate::items::RenderItem;

pub(crate) const TITLE_TEMPLATE: &str = r#"<div class="toolbar-title">{0}</div>"#;

/// A title in the toolbar.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::context::{RenderContext, StaffRequest};
/// use reinhardt_staff_toolbar::items::{RenderItem, Title};
///
/// let html = Title::new("Tom & Jerry")
///     .render(&StaffRequest::default(), &RenderContext::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(html.as_str(), r#"<div class="toolbar-title">Tom &amp; Jerry</div>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
	title: LazyText,
}

impl Title {
	/// Create a title. Plain strings are escaped, [`SafeString`]s are not.
	pub fn new(title: impl Into<LazyText>) -> Self {
		Self {
			title: title.into(),
		}
	}

	/// The title text.
	pub fn title(&self) -> &LazyText {
		&self.title
	}
}

impl RenderItem for Title {
	fn render(
		&self,
		_request: &StaffRequest,
		context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		let title = self.title.resolve(context.env().translator());
		Ok(Some(format_html(TITLE_TEMPLATE, &[title])))
	}
}
