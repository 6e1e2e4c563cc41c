use serde::Serialize;

use crate::FileManager;
use crate::Page;
use crate::PageFile;
use crate::Properties;
use crate::SiteError;
use crate::SiteResult;
use crate::content::parse_content;
use crate::formatter::format_stream;

/// Counters reported after pages were rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
	pub pages: usize,
	pub files: usize,
}

/// Build the substitution map for one page file.
///
/// Precedence, highest first: the file's own content definitions, its inline
/// properties from the site definition, then the global content.
pub fn page_properties(global: &Properties, file: &PageFile, local: &Properties) -> Properties {
	let inline: Properties = file.props.clone().into();
	global.merged_with(&inline).merged_with(local)
}

/// Render every file of every page into the build tree.
pub fn render_pages(pages: &[Page], files: &FileManager, global: &Properties) -> SiteResult<RenderReport> {
	let mut report = RenderReport::default();

	for page in pages {
		let folder = files.build_path(&page.url);
		files.make_dir(&folder)?;

		for file in &page.files {
			render_file(page, file, files, global)?;
			report.files += 1;
		}

		report.pages += 1;
		tracing::debug!(url = %page.url, files = page.files.len(), "rendered page");
	}

	Ok(report)
}

fn render_file(page: &Page, file: &PageFile, files: &FileManager, global: &Properties) -> SiteResult<()> {
	if file.template.is_empty() {
		return Err(SiteError::MissingTemplate {
			url: page.url.clone(),
			file: file.path.clone(),
		});
	}

	let local = if file.content.is_empty() {
		Properties::new()
	} else {
		let content_path = files.source_path(&file.content);
		parse_content(&files.read_to_string(&content_path)?)?
	};
	let props = page_properties(global, file, &local);

	let template = files.source_path(&file.template);
	let destination = files
		.build_path(&page.url)
		.join(file.path.replace('\\', "/").trim_start_matches('/'));

	let reader = files.open_read(&template)?;
	let writer = files.open_write(&destination)?;
	format_stream(reader, writer, &props)?;

	tracing::debug!(
		template = %template.display(),
		destination = %destination.display(),
		"formatted page file"
	);
	Ok(())
}
