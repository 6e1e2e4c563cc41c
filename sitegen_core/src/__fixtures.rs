use std::io::Read;
use std::path::Path;

use crate::Properties;
use crate::formatter::format_chunk;

pub const BLOG_PAGE: &str = "/blog\nfile = index.html\ntemplate = tpl.html\ncontent = post.txt\nauthor = Jane\n";

pub const SITE_DEFINITION: &str = "\
:build public
:source src
:ignore_rules .buildignore
:include robots.txt
:include_dir assets static
:content site.txt
:redirect /old /blog

/blog
file = index.html
template = templates/post.html
content = posts/first.txt
author = Jane
file = feed.xml
template = templates/feed.xml
";

/// Write `files` (site-relative path, content) below `root`.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
	for (path, content) in files {
		let path = root.join(path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
		}
		std::fs::write(&path, content).unwrap_or_else(|e| panic!("write: {e}"));
	}
}

pub fn read_file(path: impl AsRef<Path>) -> String {
	let path = path.as_ref();
	std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// A complete site matching [`SITE_DEFINITION`].
pub fn write_sample_site(root: &Path) {
	write_files(
		root,
		&[
			(".generator", SITE_DEFINITION),
			(".buildignore", "# editor files\n*.swp\n\n/assets/private/**\n"),
			("src/robots.txt", "User-agent: *\n"),
			("src/assets/css/site.css", "body {}\n"),
			("src/assets/css/site.css.swp", "swap\n"),
			("src/assets/private/notes.txt", "secret\n"),
			("src/assets/logo.svg", "<svg/>\n"),
			("src/site.txt", ":def title\nMy Site\n:end\n:def author\nNobody\n:end\n"),
			(
				"src/templates/post.html",
				"<h1>&{title}</h1><p>&{heading}</p><p>by &{author}</p>&{missing}",
			),
			("src/templates/feed.xml", "<feed>&{title}</feed>"),
			(
				"src/posts/first.txt",
				"Intro text is ignored.\n:def heading\n  First post  \n:end\n",
			),
		],
	);
}

pub fn props(entries: &[(&str, &str)]) -> Properties {
	entries.iter().copied().collect()
}

/// Feed `text` through [`format_chunk`] split at `splits` and flush the held
/// back tail at the end, as the stream formatter does.
pub fn format_in_chunks(text: &[u8], splits: &[usize], props: &Properties) -> Vec<u8> {
	let mut output = vec![];
	let mut pending = None;
	let mut start = 0;

	for &end in splits.iter().chain(std::iter::once(&text.len())) {
		let chunk = format_chunk(&text[start..end], pending.take(), props);
		output.extend(chunk.output);
		pending = chunk.pending;
		start = end;
	}

	output.extend(pending.unwrap_or_default());
	output
}

/// A reader that returns at most one byte per call.
pub struct TrickleReader<'a>(pub &'a [u8]);

impl Read for TrickleReader<'_> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		match (self.0.split_first(), buf.first_mut()) {
			(Some((&byte, rest)), Some(slot)) => {
				*slot = byte;
				self.0 = rest;
				Ok(1)
			}
			_ => Ok(0),
		}
	}
}
