//! URL reversal used by toolbar links
//!
//! The toolbar never hard-codes admin URLs. Links name a route (for example
//! `admin:index`) and the host's [`UrlResolver`] turns it into a path.

use crate::error::{ToolbarError, ToolbarResult};
use crate::object::ModelMeta;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::HashMap;

/// URL reversal service supplied by the host application.
pub trait UrlResolver: Send + Sync {
	/// Reverse a named route with positional arguments.
	fn reverse(&self, name: &str, args: &[&str]) -> ToolbarResult<String>;
}

/// Route name of an admin view for a model, e.g. `admin:blog_post_change`.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::object::ModelMeta;
/// use reinhardt_staff_toolbar::urls::admin_urlname;
///
/// let meta = ModelMeta::new("blog", "post", "blog post");
/// assert_eq!(admin_urlname(&meta, "change"), "admin:blog_post_change");
/// ```
pub fn admin_urlname(meta: &ModelMeta, action: &str) -> String {
	format!("admin:{}_{}_{}", meta.app_label, meta.model_name, action)
}

/// In-memory route table with positional `{0}`, `{1}`, ... placeholders.
///
/// # Examples
///
/// ```
/// use reinhardt_staff_toolbar::urls::{RouteTable, UrlResolver};
///
/// let routes = RouteTable::with_admin("/admin/").with_model("blog", "post");
///
/// assert_eq!(routes.reverse("admin:index", &[]).unwrap(), "/admin/");
/// assert_eq!(
///     routes.reverse("admin:blog_post_change", &["7"]).unwrap(),
///     "/admin/blog/post/7/change/"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: HashMap<String, String>,
	admin_prefix: String,
}

impl RouteTable {
	/// Create an empty route table
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a route table with the admin index, logout and password change
	/// routes mounted under `prefix`.
	pub fn with_admin(prefix: &str) -> Self {
		let prefix = normalize_prefix(prefix);
		let mut table = Self {
			routes: HashMap::new(),
			admin_prefix: prefix.clone(),
		};
		table.register("admin:index", prefix.clone());
		table.register("admin:logout", format!("{}logout/", prefix));
		table.register("admin:password_change", format!("{}password_change/", prefix));
		table
	}

	/// Register a route pattern under a name.
	pub fn register(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
		self.routes.insert(name.into(), pattern.into());
	}

	/// Builder-style variant of [`RouteTable::register`].
	pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.register(name, pattern);
		self
	}

	/// Register the admin changelist and change routes of a model.
	pub fn with_model(mut self, app_label: &str, model_name: &str) -> Self {
		let base = format!("{}{}/{}/", self.admin_prefix, app_label, model_name);
		self.register(format!("admin:{}_{}_changelist", app_label, model_name), base.clone());
		self.register(
			format!("admin:{}_{}_change", app_label, model_name),
			format!("{}{{0}}/change/", base),
		);
		self
	}

	/// Check if a route name is registered
	pub fn has_route(&self, name: &str) -> bool {
		self.routes.contains_key(name)
	}
}

impl UrlResolver for RouteTable {
	fn reverse(&self, name: &str, args: &[&str]) -> ToolbarResult<String> {
		let pattern = self.routes.get(name).ok_or_else(|| ToolbarError::UrlReverse {
			name: name.to_string(),
			message: "no such route".to_string(),
		})?;

		let error = |message: String| ToolbarError::UrlReverse {
			name: name.to_string(),
			message,
		};

		// Single pass over the pattern, arguments are never rescanned.
		let mut url = String::with_capacity(pattern.len());
		let mut used = vec![false; args.len()];
		let mut rest = pattern.as_str();
		while let Some(start) = rest.find('{') {
			url.push_str(&rest[..start]);
			let end = rest[start..]
				.find('}')
				.ok_or_else(|| error("unterminated placeholder".to_string()))?;
			let idx: usize = rest[start + 1..start + end]
				.parse()
				.map_err(|_| error(format!("bad placeholder {}", &rest[start..=start + end])))?;
			let arg = args
				.get(idx)
				.ok_or_else(|| error("missing arguments".to_string()))?;
			url.extend(utf8_percent_encode(arg, PATH_ARG));
			used[idx] = true;
			rest = &rest[start + end + 1..];
		}
		url.push_str(rest);

		if let Some(idx) = used.iter().position(|used| !used) {
			return Err(error(format!("unexpected argument {}", idx)));
		}

		Ok(url)
	}
}

/// Characters escaped in reversed URL arguments. `/` is kept as is.
const PATH_ARG: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'[')
	.add(b'\\')
	.add(b']')
	.add(b'^')
	.add(b'`')
	.add(b'{')
	.add(b'|')
	.add(b'}');

fn normalize_prefix(prefix: &str) -> String {
	let trimmed = prefix.trim_matches('/');
	if trimmed.is_empty() {
		"/".to_string()
	} else {
		format!("/{}/", trimmed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/admin/", "/admin/logout/")]
	#[case("staff", "/staff/logout/")]
	#[case("/", "/logout/")]
	fn test_admin_prefix(#[case] prefix: &str, #[case] logout: &str) {
		let routes = RouteTable::with_admin(prefix);

		assert_eq!(routes.reverse("admin:logout", &[]).unwrap(), logout);
	}

	#[rstest]
	fn test_reverse_unknown_route() {
		let routes = RouteTable::new();

		let err = routes.reverse("admin:index", &[]).unwrap_err();
		assert!(matches!(err, ToolbarError::UrlReverse { ref name, .. } if name == "admin:index"));
	}

	#[rstest]
	fn test_reverse_missing_argument() {
		let routes = RouteTable::with_admin("/admin/").with_model("pages", "page");

		assert!(routes.reverse("admin:pages_page_change", &[]).is_err());
		assert!(routes.reverse("admin:pages_page_changelist", &["1"]).is_err());
	}

	#[rstest]
	#[case("{0}", "%7B0%7D")]
	#[case("a{b", "a%7Bb")]
	#[case("en/about us?x#y", "en/about%20us%3Fx%23y")]
	fn test_reverse_encodes_arguments(#[case] pk: &str, #[case] encoded: &str) {
		let routes = RouteTable::with_admin("/admin/").with_model("pages", "page");

		assert_eq!(
			routes.reverse("admin:pages_page_change", &[pk]).unwrap(),
			format!("/admin/pages/page/{}/change/", encoded)
		);
	}

	#[rstest]
	fn test_reverse_repeated_placeholder() {
		let routes = RouteTable::new().with_route("pair", "/{0}/{1}/{0}/");

		assert_eq!(routes.reverse("pair", &["a", "b"]).unwrap(), "/a/b/a/");
	}
}
