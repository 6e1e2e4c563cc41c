use serde::Serialize;

/// Name of the site definition file looked up in the site directory.
pub const GENERATOR_FILE_NAME: &str = ".generator";

/// A redirect template placed at the site root overrides
/// [`DEFAULT_REDIRECT_TEMPLATE`].
pub const REDIRECT_TEMPLATE_FILE: &str = "redirect.html";

/// Property substituted into the redirect template with the target url.
pub const REDIRECT_URL_PROPERTY: &str = "url";

/// Size of the read buffer used by the streaming formatter (8 KiB).
pub const STREAM_BUFFER_SIZE: usize = 8 * 1024;

/// Built-in page written by `:redirect` directives.
pub const DEFAULT_REDIRECT_TEMPLATE: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<meta http-equiv=\"refresh\" content=\"0; url=&{url}\">
<link rel=\"canonical\" href=\"&{url}\">
<title>Redirecting</title>
</head>
<body>
<a href=\"&{url}\">&{url}</a>
</body>
</html>
";

/// Build settings resolved from the immediate directives of a site
/// definition (`:build`, `:source` and `:ignore_rules`).
///
/// ```text
/// :build public
/// :source src
/// :ignore_rules .buildignore
/// ```
///
/// Every field is a site-relative path. An empty string means the setting
/// was never declared: the site root is used for `source_dir` and
/// `build_dir`, and no ignore rules are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
	/// Directory holding templates, content files and included assets.
	pub source_dir: String,
	/// Directory the site is generated into.
	pub build_dir: String,
	/// Path of the ignore file applied to `:include_dir` copies.
	pub ignore_rules: String,
}

impl Settings {
	/// Returns the ignore file path, if one was declared.
	pub fn ignore_file(&self) -> Option<&str> {
		(!self.ignore_rules.is_empty()).then_some(self.ignore_rules.as_str())
	}
}
