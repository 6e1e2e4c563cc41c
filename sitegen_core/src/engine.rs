use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::FileManager;
use crate::IgnoreRules;
use crate::Page;
use crate::Properties;
use crate::SiteError;
use crate::SiteResult;
use crate::config::DEFAULT_REDIRECT_TEMPLATE;
use crate::config::GENERATOR_FILE_NAME;
use crate::config::REDIRECT_TEMPLATE_FILE;
use crate::directives::QueueContext;
use crate::directives::QueueReport;
use crate::directives::Resolution;
use crate::directives::execute_queue;
use crate::directives::resolve;
use crate::files::resolve_path;
use crate::pages::RenderReport;
use crate::pages::render_pages;
use crate::sdl::extract_commands;
use crate::sdl::extract_pages;

/// Everything resolved from a site definition before any output is written.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
	/// The site directory the definition was loaded from.
	pub site_dir: PathBuf,
	#[serde(flatten)]
	pub resolution: Resolution,
	pub pages: Vec<Page>,
}

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
	pub queue: QueueReport,
	pub pages: RenderReport,
}

/// Drives one build of a site: parse, resolve, execute the queue, render.
///
/// ```rust,no_run
/// use std::path::Path;
/// use sitegen_core::Generator;
///
/// let generator = Generator::load(Path::new("site")).unwrap();
/// generator.clear_build().unwrap();
/// let report = generator.start().unwrap();
/// println!("{} page file(s) rendered", report.pages.files);
/// ```
#[derive(Debug)]
pub struct Generator {
	plan: BuildPlan,
	files: FileManager,
	ignore: IgnoreRules,
}

impl Generator {
	/// Load `<site_dir>/.generator` and resolve it.
	pub fn load(site_dir: &Path) -> SiteResult<Self> {
		let definition = site_dir.join(GENERATOR_FILE_NAME);
		if !definition.is_file() {
			return Err(SiteError::MissingGenerator(definition));
		}

		let content = std::fs::read_to_string(&definition)
			.map_err(|e| SiteError::file_access(&definition, e))?;
		Self::from_definition(site_dir, &content)
	}

	/// Resolve a site definition whose paths are relative to `site_dir`.
	///
	/// Settings are fully resolved and the ignore file is compiled before
	/// this returns.
	pub fn from_definition(site_dir: &Path, content: &str) -> SiteResult<Self> {
		let commands = extract_commands(content);
		let pages = extract_pages(content)?;
		let resolution = resolve(&commands)?;

		let files = FileManager::with_settings(site_dir, &resolution.settings);
		let ignore = match resolution.settings.ignore_file() {
			Some(path) => IgnoreRules::compile(&files.read_to_string(&files.main_path(path))?)?,
			None => IgnoreRules::default(),
		};

		tracing::info!(
			directives = resolution.queue.len(),
			pages = pages.len(),
			ignore_patterns = ignore.len(),
			"loaded site definition"
		);

		Ok(Self {
			plan: BuildPlan {
				site_dir: site_dir.to_path_buf(),
				resolution,
				pages,
			},
			files,
			ignore,
		})
	}

	pub fn plan(&self) -> &BuildPlan {
		&self.plan
	}

	pub fn files(&self) -> &FileManager {
		&self.files
	}

	pub fn ignore_rules(&self) -> &IgnoreRules {
		&self.ignore
	}

	/// Remove the contents of the build directory.
	///
	/// Fails when the build directory, once `..` is resolved, is the site
	/// root or contains the site or source directory.
	pub fn clear_build(&self) -> SiteResult<()> {
		let build_dir = resolve_path(self.files.build_dir())?;
		let site_dir = resolve_path(self.files.site_dir())?;
		let source_dir = resolve_path(self.files.source_dir())?;

		if site_dir.starts_with(&build_dir) || source_dir.starts_with(&build_dir) {
			return Err(SiteError::UnsafeBuildDir(build_dir));
		}

		self.files.clear_dir(&build_dir)
	}

	/// Execute the directive queue, then render every page.
	///
	/// The global content is written only while the queue runs and is
	/// read-only while pages render.
	pub fn start(&self) -> SiteResult<BuildReport> {
		let redirect_template = self.redirect_template()?;
		let mut global = Properties::new();

		let queue = execute_queue(
			&self.plan.resolution.queue,
			&mut QueueContext {
				files: &self.files,
				ignore: &self.ignore,
				redirect_template: &redirect_template,
				global: &mut global,
			},
		)?;
		tracing::info!(?queue, "executed directive queue");

		let pages = render_pages(&self.plan.pages, &self.files, &global)?;
		tracing::info!(?pages, "rendered pages");

		Ok(BuildReport { queue, pages })
	}

	/// The site's `redirect.html`, or the built-in template.
	fn redirect_template(&self) -> SiteResult<String> {
		let custom = self.files.main_path(REDIRECT_TEMPLATE_FILE);
		if self.files.exists(&custom) {
			self.files.read_to_string(&custom)
		} else {
			Ok(DEFAULT_REDIRECT_TEMPLATE.to_string())
		}
	}
}
