use serde::Serialize;

use crate::Command;
use crate::FileManager;
use crate::IgnoreRules;
use crate::Properties;
use crate::SiteError;
use crate::SiteResult;
use crate::config::REDIRECT_URL_PROPERTY;
use crate::config::Settings;
use crate::content::parse_content;
use crate::formatter::format_stream;

/// A queued directive, executed after settings are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "directive", rename_all = "snake_case")]
pub enum Directive {
	/// `:include <src> [dst]` copies one file into the build tree.
	Include { source: String, destination: String },
	/// `:include_dir <src> [dst]` copies a directory tree, honouring ignore
	/// rules.
	IncludeDir { source: String, destination: String },
	/// `:redirect <url> <target>` writes `<url>/index.html` pointing at
	/// `target`.
	Redirect { url: String, target: String },
	/// `:content <path>` merges a content file into the global properties.
	Content { path: String },
}

impl Directive {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Include { .. } => "include",
			Self::IncludeDir { .. } => "include_dir",
			Self::Redirect { .. } => "redirect",
			Self::Content { .. } => "content",
		}
	}
}

/// The resolved directive list of a site definition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resolution {
	pub settings: Settings,
	/// Deferred directives in declaration order.
	pub queue: Vec<Directive>,
	/// Directives with a name this build does not know. They are reported
	/// and skipped.
	pub unrecognized: Vec<Command>,
}

/// Split `commands` into settings and an ordered queue.
pub fn resolve(commands: &[Command]) -> SiteResult<Resolution> {
	let settings = resolve_settings(commands)?;
	let (queue, unrecognized) = build_queue(commands)?;

	Ok(Resolution {
		settings,
		queue,
		unrecognized,
	})
}

/// Fold the `build`, `source` and `ignore_rules` directives into
/// [`Settings`]. The last occurrence of each wins.
pub fn resolve_settings(commands: &[Command]) -> SiteResult<Settings> {
	let mut settings = Settings::default();

	for command in commands {
		let field = match command.name.as_str() {
			"build" => &mut settings.build_dir,
			"source" => &mut settings.source_dir,
			"ignore_rules" => &mut settings.ignore_rules,
			_ => continue,
		};
		*field = required(command, 0, 1)?.to_string();
	}

	Ok(settings)
}

/// Collect the deferred directives in declaration order. Settings
/// directives are skipped; unknown names are returned separately.
pub fn build_queue(commands: &[Command]) -> SiteResult<(Vec<Directive>, Vec<Command>)> {
	let mut queue = vec![];
	let mut unrecognized = vec![];

	for command in commands {
		let directive = match command.name.as_str() {
			"build" | "source" | "ignore_rules" => continue,
			"include" => {
				let (source, destination) = copy_params(command)?;
				Directive::Include {
					source,
					destination,
				}
			}
			"include_dir" => {
				let (source, destination) = copy_params(command)?;
				Directive::IncludeDir {
					source,
					destination,
				}
			}
			"redirect" => {
				Directive::Redirect {
					url: required(command, 0, 2)?.to_string(),
					target: required(command, 1, 2)?.to_string(),
				}
			}
			"content" => {
				Directive::Content {
					path: required(command, 0, 1)?.to_string(),
				}
			}
			name => {
				tracing::warn!(name, line = command.line, "unknown command");
				unrecognized.push(command.clone());
				continue;
			}
		};
		queue.push(directive);
	}

	Ok((queue, unrecognized))
}

fn required(command: &Command, index: usize, expected: usize) -> SiteResult<&str> {
	command
		.param(index)
		.filter(|param| !param.is_empty())
		.ok_or_else(|| {
			SiteError::MissingParameter {
				name: command.name.clone(),
				line: command.line,
				expected,
				got: command.params.iter().filter(|p| !p.is_empty()).count(),
			}
		})
}

/// Source and destination of a copy directive. The destination defaults to
/// the source path.
fn copy_params(command: &Command) -> SiteResult<(String, String)> {
	let source = required(command, 0, 1)?;
	let destination = command
		.param(1)
		.filter(|param| !param.is_empty())
		.unwrap_or(source);
	Ok((source.to_string(), destination.to_string()))
}

/// Counters reported after the queue ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueReport {
	pub files_copied: usize,
	pub redirects: usize,
	pub content_files: usize,
}

/// State the queue runs against: the file manager and ignore rules it reads,
/// and the global properties it is the only writer of.
pub struct QueueContext<'a> {
	pub files: &'a FileManager,
	pub ignore: &'a IgnoreRules,
	pub redirect_template: &'a str,
	pub global: &'a mut Properties,
}

/// Run the queue strictly in order. The first failure aborts the remaining
/// directives.
pub fn execute_queue(queue: &[Directive], ctx: &mut QueueContext<'_>) -> SiteResult<QueueReport> {
	let mut report = QueueReport::default();

	for directive in queue {
		tracing::debug!(directive = directive.name(), "executing directive");
		match directive {
			Directive::Include {
				source,
				destination,
			} => {
				ctx.files.copy_file(source, destination)?;
				report.files_copied += 1;
			}
			Directive::IncludeDir {
				source,
				destination,
			} => {
				report.files_copied += ctx.files.copy_dir(source, destination, ctx.ignore)?;
			}
			Directive::Redirect { url, target } => {
				write_redirect(ctx, url, target)?;
				report.redirects += 1;
			}
			Directive::Content { path } => {
				let path = ctx.files.source_path(path);
				let content = ctx.files.read_to_string(&path)?;
				let props = parse_content(&content)?;
				ctx.global.merge(&props);
				report.content_files += 1;
			}
		}
	}

	Ok(report)
}

fn write_redirect(ctx: &QueueContext<'_>, url: &str, target: &str) -> SiteResult<()> {
	let destination = ctx.files.build_path(url).join("index.html");
	let props: Properties = [(REDIRECT_URL_PROPERTY, target)].into_iter().collect();
	let writer = ctx.files.open_write(&destination)?;

	format_stream(ctx.redirect_template.as_bytes(), writer, &props)?;
	tracing::debug!(url, target, "wrote redirect");
	Ok(())
}
