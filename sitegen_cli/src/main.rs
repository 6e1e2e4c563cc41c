use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;
use owo_colors::OwoColorize;
use sitegen_cli::OutputFormat;
use sitegen_cli::SitegenCli;
use sitegen_core::BuildPlan;
use sitegen_core::BuildReport;
use sitegen_core::Directive;
use sitegen_core::Generator;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SitegenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let Some(dir) = args.dir.as_deref() else {
		eprintln!(
			"{} Missing the target directory. Run `sitegen --help` for usage.",
			colored!("error:", red)
		);
		process::exit(1);
	};

	let result = if args.plan {
		run_plan(dir, args.format)
	} else {
		run_build(dir, args.no_clean)
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<sitegen_core::SiteError>() {
			Ok(site_err) => {
				let report: miette::Report = (*site_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let level = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn run_build(dir: &Path, no_clean: bool) -> sitegen_core::AnyEmptyResult {
	let started = Instant::now();
	let generator = Generator::load(dir)?;
	println!("Loaded generator: {}", dir.display());

	if no_clean {
		tracing::info!("keeping existing build output");
	} else {
		generator.clear_build()?;
		tracing::info!(
			build_dir = %generator.files().build_dir().display(),
			"cleared build directory"
		);
	}

	println!("Started generating pages");
	let generation = Instant::now();
	let report = generator.start()?;
	let generation_ms = generation.elapsed().as_millis();
	tracing::info!(?report, generation_ms, "build finished");

	println!("{}", colored!("Finished generating pages", green));
	print_report(&report);
	println!("Total time taken: {} ms", started.elapsed().as_millis());
	println!("Page generation time: {generation_ms} ms");

	Ok(())
}

fn print_report(report: &BuildReport) {
	println!(
		"  {} file(s) copied, {} redirect(s), {} content file(s), {} page file(s) across {} \
		 page(s)",
		report.queue.files_copied,
		report.queue.redirects,
		report.queue.content_files,
		report.pages.files,
		report.pages.pages
	);
}

fn run_plan(dir: &Path, format: OutputFormat) -> sitegen_core::AnyEmptyResult {
	let generator = Generator::load(dir)?;
	let plan = generator.plan();

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(plan)?);
		}
		OutputFormat::Text => print_plan(plan, generator.ignore_rules().len()),
	}

	Ok(())
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<20} {value}");
}

fn or_default(value: &str) -> &str {
	if value.is_empty() { "(site root)" } else { value }
}

fn print_plan(plan: &BuildPlan, ignore_patterns: usize) {
	let settings = &plan.resolution.settings;

	println!("{}", colored!("Site:", bold));
	print_field("Directory", plan.site_dir.display());
	print_field("Source", or_default(&settings.source_dir));
	print_field("Build", or_default(&settings.build_dir));
	match settings.ignore_file() {
		Some(file) => print_field("Ignore rules", format!("{file} ({ignore_patterns} pattern(s))")),
		None => print_field("Ignore rules", "none"),
	}

	print_section("Queue:");
	if plan.resolution.queue.is_empty() {
		println!("  (empty)");
	}
	for (index, directive) in plan.resolution.queue.iter().enumerate() {
		let detail = match directive {
			Directive::Include {
				source,
				destination,
			}
			| Directive::IncludeDir {
				source,
				destination,
			} => format!("{source} -> {destination}"),
			Directive::Redirect { url, target } => format!("{url} -> {target}"),
			Directive::Content { path } => path.clone(),
		};
		println!("  {}. {} {detail}", index + 1, directive.name());
	}

	if !plan.resolution.unrecognized.is_empty() {
		print_section("Unrecognized:");
		for command in &plan.resolution.unrecognized {
			println!(
				"  {} :{} (line {})",
				colored!("!", yellow),
				command.name,
				command.line
			);
		}
	}

	print_section("Pages:");
	if plan.pages.is_empty() {
		println!("  (none)");
	}
	for page in &plan.pages {
		println!("  {}", page.url);
		for file in &page.files {
			let content = if file.content.is_empty() {
				"no content"
			} else {
				file.content.as_str()
			};
			let template = if file.template.is_empty() {
				"missing"
			} else {
				file.template.as_str()
			};
			println!("    {} (template {template}, {content})", file.path);
		}
	}
}
