use regex::Regex;

use crate::SiteError;
use crate::SiteResult;

/// Regex fragment for a `**` wildcard: any characters including `/`.
const ANY_PATH: &str = ".*";
/// Regex fragment for a `?` wildcard: one character within a segment.
const ONE_CHAR: &str = "[^/]";
/// Regex fragment for a lone `*` wildcard: a non-empty segment run.
const SEGMENT: &str = "[^/]+";

/// A single compiled line of an ignore file.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
	/// The trimmed source line the pattern was compiled from.
	pub source: String,
	regex: Regex,
}

impl IgnorePattern {
	/// Compile one ignore line. The line must already be trimmed and must not
	/// be blank or a comment.
	pub fn new(line: &str) -> SiteResult<Self> {
		let translated = translate_pattern(line);
		let regex = Regex::new(&format!("^(?:{translated})$")).map_err(|e| {
			SiteError::InvalidIgnorePattern {
				pattern: line.to_string(),
				reason: e.to_string(),
			}
		})?;

		Ok(Self {
			source: line.to_string(),
			regex,
		})
	}

	/// Returns true when the whole of `path` matches this pattern.
	pub fn matches(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}
}

/// The compiled contents of an ignore file.
///
/// ```text
/// # comments and blank lines are skipped
/// *.psd
/// /drafts/**
/// notes-??.txt
/// ```
///
/// Patterns without a leading `/` match at any depth. Only full-path matches
/// count, so `foo.txt` ignores `/a/foo.txt` but not `/a/barfoo.txt`.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
	patterns: Vec<IgnorePattern>,
}

impl IgnoreRules {
	/// Compile every pattern line of an ignore file.
	pub fn compile(content: &str) -> SiteResult<Self> {
		let patterns = content
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.map(IgnorePattern::new)
			.collect::<SiteResult<Vec<_>>>()?;

		Ok(Self { patterns })
	}

	/// Returns true if any pattern matches the full `path`.
	pub fn is_ignored(&self, path: &str) -> bool {
		self.patterns.iter().any(|pattern| pattern.matches(path))
	}

	pub fn patterns(&self) -> &[IgnorePattern] {
		&self.patterns
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}
}

/// Translate a glob-like ignore line into the body of an anchored regex.
///
/// Lines not rooted at `/` get a `**/` prefix. Regex metacharacters are
/// escaped, then `**`, `?` and lone `*` are rewritten in that order. A `*`
/// that directly follows a `.` (either the one produced for `**` or an
/// escaped literal dot) is left as a regex repetition.
pub fn translate_pattern(line: &str) -> String {
	let rooted = if line.starts_with('/') {
		line.to_string()
	} else {
		format!("**/{line}")
	};

	let mut escaped = String::with_capacity(rooted.len() * 2);
	for ch in rooted.chars() {
		match ch {
			'*' | '?' | '/' => escaped.push(ch),
			_ => escaped.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
		}
	}

	let with_any = escaped.replace("**", ANY_PATH);
	let with_one = with_any.replace('?', ONE_CHAR);

	let mut translated = String::with_capacity(with_one.len() + 8);
	let mut previous = None;
	for (index, ch) in with_one.chars().enumerate() {
		if ch == '*' && index > 0 && previous != Some('.') {
			translated.push_str(SEGMENT);
		} else {
			translated.push(ch);
		}
		previous = Some(ch);
	}

	translated
}
