//! HTML escaping for toolbar fragments
//!
//! Toolbar items build their markup from small fixed fragments. Every value
//! interpolated into a fragment is escaped unless it is already a
//! [`SafeString`].
//!
//! Escaped characters:
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `&` → `&amp;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`

use std::borrow::Cow;
use std::fmt;

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::html::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// assert_eq!(escape_html("it's"), "it&#x27;s");
/// ```
pub fn escape_html(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'&' => out.push_str("&amp;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	out
}

/// A string that is already safe to emit as HTML.
///
/// Values of this type are never escaped again when interpolated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeString(String);

impl SafeString {
	/// Mark a string as safe HTML.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_staff_toolbar::html::SafeString;
	///
	/// let safe = SafeString::new("<b>Bold</b>");
	/// assert_eq!(safe.as_str(), "<b>Bold</b>");
	/// ```
	pub fn new(s: impl Into<String>) -> Self {
		SafeString(s.into())
	}

	/// Escape plain text into a safe string.
	pub fn escape(s: &str) -> Self {
		SafeString(escape_html(s))
	}

	/// Get the inner string
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Convert to String
	pub fn into_string(self) -> String {
		self.0
	}

	/// Returns `true` if the string is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Join safe fragments with a separator.
	pub fn join<'a>(parts: impl IntoIterator<Item = &'a SafeString>, sep: &str) -> Self {
		let parts: Vec<&str> = parts.into_iter().map(SafeString::as_str).collect();
		SafeString(parts.join(sep))
	}
}

impl From<String> for SafeString {
	fn from(s: String) -> Self {
		SafeString(s)
	}
}

impl From<&str> for SafeString {
	fn from(s: &str) -> Self {
		SafeString(s.to_string())
	}
}

impl AsRef<str> for SafeString {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SafeString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A value interpolated into an HTML fragment.
///
/// Plain text is escaped, safe strings pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlArg<'a> {
	/// Untrusted text.
	Text(Cow<'a, str>),
	/// Already escaped markup.
	Safe(&'a SafeString),
}

impl HtmlArg<'_> {
	fn render(&self) -> Cow<'_, str> {
		match self {
			HtmlArg::Text(text) => Cow::Owned(escape_html(text)),
			HtmlArg::Safe(safe) => Cow::Borrowed(safe.as_str()),
		}
	}
}

impl<'a> From<&'a str> for HtmlArg<'a> {
	fn from(s: &'a str) -> Self {
		HtmlArg::Text(Cow::Borrowed(s))
	}
}

impl<'a> From<&'a String> for HtmlArg<'a> {
	fn from(s: &'a String) -> Self {
		HtmlArg::Text(Cow::Borrowed(s.as_str()))
	}
}

impl<'a> From<&'a SafeString> for HtmlArg<'a> {
	fn from(s: &'a SafeString) -> Self {
		HtmlArg::Safe(s)
	}
}

/// Fill the positional `{0}`, `{1}`, ... placeholders of a trusted template.
///
/// Arguments are escaped according to their [`HtmlArg`] kind. Placeholders
/// without a matching argument are left untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::html::{format_html, SafeString};
///
/// let html = format_html(r#"<a href="{0}">{1}</a>"#, &["/admin/".into(), "<Admin>".into()]);
/// assert_eq!(html, SafeString::new(r#"<a href="/admin/">&lt;Admin&gt;</a>"#));
/// ```
pub fn format_html(template: &str, args: &[HtmlArg<'_>]) -> SafeString {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(start) = rest.find('{') {
		out.push_str(&rest[..start]);
		let after = &rest[start + 1..];
		let parsed = after
			.find('}')
			.and_then(|end| after[..end].parse::<usize>().ok().map(|idx| (idx, end)));

		match parsed {
			Some((idx, end)) if idx < args.len() => {
				out.push_str(&args[idx].render());
				rest = &after[end + 1..];
			}
			_ => {
				out.push('{');
				rest = after;
			}
		}
	}
	out.push_str(rest);

	SafeString(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("plain", "plain")]
	#[case("<script>", "&lt;script&gt;")]
	#[case(r#"a "b" 'c'"#, "a &quot;b&quot; &#x27;c&#x27;")]
	fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_html(input), expected);
	}

	#[rstest]
	fn test_format_html_keeps_safe_args() {
		let inner = SafeString::new("<li>x</li>");
		let html = format_html("<ul>\n{0}\n</ul>", &[(&inner).into()]);

		assert_eq!(html.as_str(), "<ul>\n<li>x</li>\n</ul>");
	}

	#[rstest]
	fn test_format_html_leaves_unknown_placeholders() {
		let html = format_html("{0} {name} {5}", &["a&b".into()]);

		assert_eq!(html.as_str(), "a&amp;b {name} {5}");
	}

	#[rstest]
	fn test_join() {
		let parts = [SafeString::new("a"), SafeString::new("b")];

		assert_eq!(SafeString::join(&parts, "\n").as_str(), "a\nb");
	}
}
