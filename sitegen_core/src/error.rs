use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SiteError {
	#[error(transparent)]
	#[diagnostic(code(sitegen::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to access `{path}`: {source}")]
	#[diagnostic(
		code(sitegen::file_access),
		help("check that the path exists relative to the site or source directory")
	)]
	FileAccess {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("no site definition found at `{0}`")]
	#[diagnostic(
		code(sitegen::missing_generator),
		help("create a `.generator` file in the site directory")
	)]
	MissingGenerator(PathBuf),

	#[error("directive `:{name}` on line {line} expects {expected} parameter(s), got {got}")]
	#[diagnostic(code(sitegen::missing_parameter))]
	MissingParameter {
		name: String,
		line: usize,
		expected: usize,
		got: usize,
	},

	#[error("malformed line {line} in page `{url}`: `{text}`")]
	#[diagnostic(
		code(sitegen::malformed_page_line),
		help("page entries use the form `key = value`; end a page block with a blank line")
	)]
	MalformedPageLine {
		url: String,
		line: usize,
		text: String,
	},

	#[error("property `{key}` on line {line} of page `{url}` is declared before any `file`")]
	#[diagnostic(
		code(sitegen::property_before_file),
		help("add a `file = <path>` entry before `{key}`")
	)]
	PropertyBeforeFile {
		url: String,
		key: String,
		line: usize,
	},

	#[error("missing `:end` for definition `{0}`")]
	#[diagnostic(
		code(sitegen::unterminated_definition),
		help("close the definition with a line containing `:end`")
	)]
	UnterminatedDefinition(String),

	#[error("invalid ignore pattern `{pattern}`: {reason}")]
	#[diagnostic(code(sitegen::invalid_ignore_pattern))]
	InvalidIgnorePattern { pattern: String, reason: String },

	#[error("refusing to clear build directory `{0}`: it contains the site or source files")]
	#[diagnostic(
		code(sitegen::unsafe_build_dir),
		help("declare a dedicated build directory with `:build <dir>` or pass `--no-clean`")
	)]
	UnsafeBuildDir(PathBuf),

	#[error("file `{file}` in page `{url}` has no template")]
	#[diagnostic(
		code(sitegen::missing_template),
		help("add a `template = <path>` entry under `file = {file}`")
	)]
	MissingTemplate { url: String, file: String },
}

impl SiteError {
	/// Wrap an I/O error with the path that produced it.
	pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::FileAccess {
			path: path.into(),
			source,
		}
	}
}

pub type SiteResult<T> = Result<T, SiteError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
