#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub fn sitegen_cmd() -> Command {
	let mut cmd = Command::cargo_bin("sitegen").unwrap_or_else(|e| panic!("cargo_bin: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `files` (site-relative path, content) below `root`.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
	for (path, content) in files {
		let path = root.join(path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}
	Ok(())
}

pub fn write_blog_site(root: &Path) -> std::io::Result<()> {
	write_files(
		root,
		&[
			(
				".generator",
				":build public\n:source src\n:include robots.txt\n:content site.txt\n:redirect \
				 /old /blog\n\n/blog\nfile = index.html\ntemplate = post.html\ncontent = \
				 post.txt\n",
			),
			("src/robots.txt", "User-agent: *\n"),
			("src/site.txt", ":def title\nMy Site\n:end\n"),
			("src/post.html", "<h1>&{title}</h1><p>&{body}</p>"),
			("src/post.txt", ":def body\nHello\n:end\n"),
		],
	)
}
