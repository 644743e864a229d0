//! Translation of toolbar labels
//!
//! Labels such as "Staff features" are stored untranslated and looked up
//! through a [`Translator`] each time they are rendered, so the active
//! language of the current request is honored.

use crate::html::{HtmlArg, SafeString};
use std::borrow::Cow;
use std::collections::HashMap;

/// Translation backend supplied by the host application.
pub trait Translator: Send + Sync {
	/// Translate a message, returning the message itself when no translation exists.
	fn gettext(&self, message: &str) -> String;
}

/// Translator that returns every message unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
	fn gettext(&self, message: &str) -> String {
		message.to_string()
	}
}

/// Translator backed by an in-memory message catalog for one locale.
///
/// # Example
/// ```
/// use reinhardt_staff_toolbar::i18n::{CatalogTranslator, Translator};
///
/// let mut nl = CatalogTranslator::new("nl");
/// nl.add_translation("Logout", "Uitloggen");
///
/// assert_eq!(nl.gettext("Logout"), "Uitloggen");
/// assert_eq!(nl.gettext("Admin dashboard"), "Admin dashboard");
/// ```
#[derive(Debug, Clone)]
pub struct CatalogTranslator {
	locale: String,
	messages: HashMap<String, String>,
}

impl CatalogTranslator {
	/// Create an empty catalog for the given locale
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
		}
	}

	/// Get the locale for this catalog
	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Add a simple translation
	pub fn add_translation(&mut self, message: impl Into<String>, translation: impl Into<String>) {
		self.messages.insert(message.into(), translation.into());
	}

	/// Builder-style variant of [`CatalogTranslator::add_translation`].
	pub fn with_translation(
		mut self,
		message: impl Into<String>,
		translation: impl Into<String>,
	) -> Self {
		self.add_translation(message, translation);
		self
	}
}

impl Translator for CatalogTranslator {
	fn gettext(&self, message: &str) -> String {
		self.messages
			.get(message)
			.cloned()
			.unwrap_or_else(|| message.to_string())
	}
}

/// Display text whose final form is decided at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyText {
	/// Plain text, escaped on output.
	Plain(String),
	/// Markup that is emitted as-is.
	Safe(SafeString),
	/// A message id translated on every render, escaped on output.
	Translated(Cow<'static, str>),
}

impl LazyText {
	/// Text translated when rendered.
	pub const fn translated(message: &'static str) -> Self {
		LazyText::Translated(Cow::Borrowed(message))
	}

	/// Evaluate into an interpolation argument.
	pub fn resolve<'a>(&'a self, translator: &dyn Translator) -> HtmlArg<'a> {
		match self {
			LazyText::Plain(text) => HtmlArg::Text(Cow::Borrowed(text.as_str())),
			LazyText::Safe(safe) => HtmlArg::Safe(safe),
			LazyText::Translated(message) => HtmlArg::Text(Cow::Owned(translator.gettext(message))),
		}
	}

	/// Evaluate into a plain string, without escaping.
	pub fn to_text(&self, translator: &dyn Translator) -> String {
		match self {
			LazyText::Plain(text) => text.clone(),
			LazyText::Safe(safe) => safe.as_str().to_string(),
			LazyText::Translated(message) => translator.gettext(message),
		}
	}

	/// Returns `true` if the text is empty before translation.
	pub fn is_empty(&self) -> bool {
		match self {
			LazyText::Plain(text) => text.is_empty(),
			LazyText::Safe(safe) => safe.is_empty(),
			LazyText::Translated(message) => message.is_empty(),
		}
	}
}

impl From<&str> for LazyText {
	fn from(s: &str) -> Self {
		LazyText::Plain(s.to_string())
	}
}

impl From<String> for LazyText {
	fn from(s: String) -> Self {
		LazyText::Plain(s)
	}
}

impl From<SafeString> for LazyText {
	fn from(s: SafeString) -> Self {
		LazyText::Safe(s)
	}
}

/// Translate `"Change %s"` and substitute the given name.
pub(crate) fn change_label(translator: &dyn Translator, verbose_name: &str) -> String {
	translator
		.gettext("Change %s")
		.replacen("%s", verbose_name, 1)
}
