use std::collections::BTreeMap;

use serde::Serialize;

use crate::SiteError;
use crate::SiteResult;

/// Marks a directive line in a site definition.
pub const DIRECTIVE_MARKER: char = ':';
/// Marks the first line of a page block.
pub const PAGE_MARKER: char = '/';

/// A directive line such as `:include assets/logo.png logo.png`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
	/// The directive name without its leading `:`.
	pub name: String,
	/// Parameters split on single spaces. No quoting is supported.
	pub params: Vec<String>,
	/// 1-indexed line of the directive in the site definition.
	pub line: usize,
}

impl Command {
	pub fn param(&self, index: usize) -> Option<&str> {
		self.params.get(index).map(String::as_str)
	}
}

/// A page block: a url followed by one or more file entries.
///
/// ```text
/// /blog
/// file = index.html
/// template = templates/post.html
/// content = content/post.txt
/// author = Jane
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
	/// The page url, exactly as written on the opening line.
	pub url: String,
	pub files: Vec<PageFile>,
}

/// One output file of a [`Page`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageFile {
	/// Output path relative to the page url.
	pub path: String,
	/// Source-relative path of the template.
	pub template: String,
	/// Source-relative path of the content file.
	pub content: String,
	/// Inline `key = value` properties declared under the file entry.
	pub props: BTreeMap<String, String>,
}

impl PageFile {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}
}

/// Extract every directive from a site definition, in declaration order.
pub fn extract_commands(content: &str) -> Vec<Command> {
	content
		.lines()
		.enumerate()
		.filter_map(|(index, line)| {
			let line = line.trim();
			let rest = line.strip_prefix(DIRECTIVE_MARKER)?;
			let (name, params) = match rest.split_once(' ') {
				Some((name, params)) => (name, params.split(' ').map(String::from).collect()),
				None => (rest, vec![]),
			};

			Some(Command {
				name: name.to_string(),
				params,
				line: index + 1,
			})
		})
		.collect()
}

/// Extract every page block from a site definition, in declaration order.
///
/// A block opens on a line starting with `/` and closes at the next blank
/// line (or the end of input). Entries before the first `file` key and lines
/// without `=` are rejected rather than dropped.
pub fn extract_pages(content: &str) -> SiteResult<Vec<Page>> {
	let mut pages = vec![];
	let mut lines = content.lines().enumerate();

	while let Some((_, line)) = lines.next() {
		let line = line.trim();
		if !line.starts_with(PAGE_MARKER) {
			continue;
		}

		let mut page = Page {
			url: line.to_string(),
			files: vec![],
		};
		let mut current: Option<PageFile> = None;

		for (index, line) in lines.by_ref() {
			let line = line.trim();
			if line.is_empty() {
				break;
			}

			let Some((key, value)) = line.split_once('=') else {
				return Err(SiteError::MalformedPageLine {
					url: page.url,
					line: index + 1,
					text: line.to_string(),
				});
			};
			let key = key.trim().to_lowercase();
			let value = value.trim().to_string();

			if key == "file" {
				page.files.extend(current.replace(PageFile::new(value)));
				continue;
			}

			let Some(file) = current.as_mut() else {
				return Err(SiteError::PropertyBeforeFile {
					url: page.url,
					key,
					line: index + 1,
				});
			};

			match key.as_str() {
				"template" => file.template = value,
				"content" => file.content = value,
				_ => {
					file.props.insert(key, value);
				}
			}
		}

		page.files.extend(current);
		pages.push(page);
	}

	Ok(pages)
}
