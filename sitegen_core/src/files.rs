use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::IgnoreRules;
use crate::SiteError;
use crate::SiteResult;
use crate::config::Settings;

/// Normalise a site path: backslashes become `/`, a leading `/` is implied
/// (unless the path is relative with `.`) and a trailing `/` is dropped.
///
/// The result is the form ignore rules are matched against.
pub fn format_path(path: &str) -> String {
	let mut path = path.replace('\\', "/");
	if !path.starts_with('/') && !path.starts_with('.') {
		path.insert(0, '/');
	}
	while path.len() > 1 && path.ends_with('/') {
		path.pop();
	}
	path
}

/// Make `path` absolute and fold its `.` and `..` components without
/// touching the filesystem.
pub fn resolve_path(path: &Path) -> SiteResult<PathBuf> {
	let absolute = std::path::absolute(path).map_err(|e| SiteError::file_access(path, e))?;
	let mut resolved = PathBuf::new();

	for component in absolute.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				resolved.pop();
			}
			other => resolved.push(other),
		}
	}

	Ok(resolved)
}

/// Join a normalised site path onto `base`.
fn join_site_path(base: &Path, path: &str) -> PathBuf {
	let formatted = format_path(path);
	let relative = formatted.trim_start_matches('/');
	if relative.is_empty() || relative == "." {
		base.to_path_buf()
	} else {
		base.join(relative)
	}
}

/// Resolves site, source and build paths and performs the file operations
/// the build needs.
#[derive(Debug, Clone)]
pub struct FileManager {
	site_dir: PathBuf,
	source_dir: PathBuf,
	build_dir: PathBuf,
}

impl FileManager {
	/// A manager whose source and build directories are the site root.
	pub fn new(site_dir: impl Into<PathBuf>) -> Self {
		let site_dir = site_dir.into();
		Self {
			source_dir: site_dir.clone(),
			build_dir: site_dir.clone(),
			site_dir,
		}
	}

	/// A manager using the directories declared in `settings`.
	pub fn with_settings(site_dir: impl Into<PathBuf>, settings: &Settings) -> Self {
		let site_dir = site_dir.into();
		Self {
			source_dir: join_site_path(&site_dir, &settings.source_dir),
			build_dir: join_site_path(&site_dir, &settings.build_dir),
			site_dir,
		}
	}

	pub fn site_dir(&self) -> &Path {
		&self.site_dir
	}

	pub fn source_dir(&self) -> &Path {
		&self.source_dir
	}

	pub fn build_dir(&self) -> &Path {
		&self.build_dir
	}

	/// Path of a file relative to the site root.
	pub fn main_path(&self, path: &str) -> PathBuf {
		join_site_path(&self.site_dir, path)
	}

	/// Path of a file relative to the source directory.
	pub fn source_path(&self, path: &str) -> PathBuf {
		join_site_path(&self.source_dir, path)
	}

	/// Path of a file relative to the build directory.
	pub fn build_path(&self, path: &str) -> PathBuf {
		join_site_path(&self.build_dir, path)
	}

	pub fn exists(&self, path: &Path) -> bool {
		path.exists()
	}

	pub fn read_to_string(&self, path: &Path) -> SiteResult<String> {
		std::fs::read_to_string(path).map_err(|e| SiteError::file_access(path, e))
	}

	pub fn open_read(&self, path: &Path) -> SiteResult<BufReader<File>> {
		let file = File::open(path).map_err(|e| SiteError::file_access(path, e))?;
		Ok(BufReader::new(file))
	}

	/// Write `contents` to `path`, creating its parent directories.
	pub fn write_file(&self, path: &Path, contents: &str) -> SiteResult<()> {
		if let Some(parent) = path.parent() {
			self.make_dir(parent)?;
		}
		std::fs::write(path, contents).map_err(|e| SiteError::file_access(path, e))
	}

	/// Create (or truncate) a file for writing, creating its parent
	/// directories.
	pub fn open_write(&self, path: &Path) -> SiteResult<BufWriter<File>> {
		if let Some(parent) = path.parent() {
			self.make_dir(parent)?;
		}
		let file = File::create(path).map_err(|e| SiteError::file_access(path, e))?;
		Ok(BufWriter::new(file))
	}

	/// Create a directory and its parents. Existing directories are fine.
	pub fn make_dir(&self, path: &Path) -> SiteResult<()> {
		std::fs::create_dir_all(path).map_err(|e| SiteError::file_access(path, e))
	}

	/// Remove everything inside `path`, keeping (or creating) the directory
	/// itself.
	pub fn clear_dir(&self, path: &Path) -> SiteResult<()> {
		if !self.exists(path) {
			return self.make_dir(path);
		}

		let entries = std::fs::read_dir(path).map_err(|e| SiteError::file_access(path, e))?;
		for entry in entries {
			let entry_path = entry?.path();
			let removed = if entry_path.is_dir() {
				std::fs::remove_dir_all(&entry_path)
			} else {
				std::fs::remove_file(&entry_path)
			};
			removed.map_err(|e| SiteError::file_access(&entry_path, e))?;
		}

		tracing::debug!(path = %path.display(), "cleared directory");
		Ok(())
	}

	/// Copy one source file into the build tree.
	pub fn copy_file(&self, source: &str, destination: &str) -> SiteResult<()> {
		let from = self.source_path(source);
		let to = self.build_path(destination);
		if let Some(parent) = to.parent() {
			self.make_dir(parent)?;
		}

		std::fs::copy(&from, &to).map_err(|e| SiteError::file_access(&from, e))?;
		tracing::debug!(from = %from.display(), to = %to.display(), "copied file");
		Ok(())
	}

	/// Recursively copy a source directory into the build tree and return the
	/// number of files copied.
	///
	/// Directories are always traversed; only files are checked against
	/// `ignore`, using their normalised source-relative path.
	pub fn copy_dir(&self, source: &str, destination: &str, ignore: &IgnoreRules) -> SiteResult<usize> {
		let source = format_path(source);
		let destination = format_path(destination);
		self.make_dir(&self.build_path(&destination))?;

		let from = self.source_path(&source);
		let mut entries = std::fs::read_dir(&from)
			.map_err(|e| SiteError::file_access(&from, e))?
			.collect::<Result<Vec<_>, _>>()?;
		// Sort for deterministic ordering.
		entries.sort_by_key(std::fs::DirEntry::file_name);

		let mut copied = 0;
		for entry in entries {
			let name = entry.file_name().to_string_lossy().into_owned();
			let item_source = format!("{}/{name}", source.trim_end_matches('/'));
			let item_destination = format!("{}/{name}", destination.trim_end_matches('/'));

			if entry.file_type()?.is_dir() {
				copied += self.copy_dir(&item_source, &item_destination, ignore)?;
			} else if ignore.is_ignored(&item_source) {
				tracing::debug!(path = %item_source, "skipped ignored file");
			} else {
				self.copy_file(&item_source, &item_destination)?;
				copied += 1;
			}
		}

		Ok(copied)
	}
}
