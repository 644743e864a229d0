//! Literal content

use crate::context::{RenderContext, StaffRequest};
use crate::error::ToolbarResult;
use crate::html::SafeString;
use crate::items::RenderItem;

/// Content that is output as-is.
///
/// The content is not escaped. Escape untrusted text with
/// [`SafeString::escape`] before passing it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
	content: SafeString,
}

impl Literal {
	/// Create a literal item.
	pub fn new(content: impl Into<SafeString>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl RenderItem for Literal {
	fn render(
		&self,
		_request: &StaffRequest,
		_context: &RenderContext,
	) -> ToolbarResult<Option<SafeString>> {
		Ok(Some(self.content.clone()))
	}
}
