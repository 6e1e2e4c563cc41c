use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate a static site from a `.generator` site definition.",
	long_about = "sitegen builds a static site in place from the `.generator` file found in the \
	              target directory.\n\nThe site definition declares build settings (`:build`, \
	              `:source`, `:ignore_rules`), queued directives (`:include`, `:include_dir`, \
	              `:redirect`, `:content`) and page blocks whose templates are filled with \
	              `&{name}` placeholders.\n\nQuick start:\n  sitegen my-site          Build the \
	              site\n  sitegen my-site --plan   Print what would be built"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct SitegenCli {
	/// Directory containing the `.generator` site definition.
	pub dir: Option<PathBuf>,

	/// Print the resolved settings, directive queue and pages without
	/// building anything.
	#[arg(long, default_value_t = false)]
	pub plan: bool,

	/// Output format for `--plan`. Use `text` for human-readable output or
	/// `json` for programmatic consumption.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Keep the existing contents of the build directory instead of clearing
	/// it before the build.
	#[arg(long, default_value_t = false)]
	pub no_clean: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
