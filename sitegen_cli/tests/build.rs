mod common;

use common::sitegen_cmd;
use common::write_blog_site;
use common::write_files;
use sitegen_core::AnyEmptyResult;

#[test]
fn builds_site_in_place() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_blog_site(tmp.path())?;

	sitegen_cmd()
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Loaded generator"))
		.stdout(predicates::str::contains("Started generating pages"))
		.stdout(predicates::str::contains("Finished generating pages"))
		.stdout(predicates::str::contains("Total time taken:"))
		.stdout(predicates::str::contains("Page generation time:"));

	let public = tmp.path().join("public");
	assert_eq!(
		std::fs::read_to_string(public.join("blog/index.html"))?,
		"<h1>My Site</h1><p>Hello</p>"
	);
	assert_eq!(
		std::fs::read_to_string(public.join("robots.txt"))?,
		"User-agent: *\n"
	);
	assert!(std::fs::read_to_string(public.join("old/index.html"))?.contains("url=/blog"));

	Ok(())
}

#[test]
fn build_clears_stale_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_blog_site(tmp.path())?;
	write_files(tmp.path(), &[("public/stale.html", "old")])?;

	sitegen_cmd().arg(tmp.path()).assert().success();
	assert!(!tmp.path().join("public/stale.html").exists());

	Ok(())
}

#[test]
fn no_clean_keeps_existing_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_blog_site(tmp.path())?;
	write_files(tmp.path(), &[("public/stale.html", "old")])?;

	sitegen_cmd()
		.arg(tmp.path())
		.arg("--no-clean")
		.assert()
		.success();
	assert!(tmp.path().join("public/stale.html").exists());
	assert!(tmp.path().join("public/blog/index.html").exists());

	Ok(())
}

#[test]
fn missing_directory_argument_exits_with_one() {
	sitegen_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Missing the target directory"));
}

#[test]
fn missing_generator_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	sitegen_cmd()
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no site definition found"));

	Ok(())
}

#[test]
fn missing_template_fails_build() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_files(
		tmp.path(),
		&[(".generator", ":build out\n\n/blog\nfile = index.html\n")],
	)?;

	sitegen_cmd()
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("has no template"));

	Ok(())
}

#[test]
fn unknown_directive_is_logged_and_skipped() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_files(tmp.path(), &[(".generator", ":build out\n:minify all\n")])?;

	sitegen_cmd()
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("unknown command"));

	Ok(())
}

#[test]
fn verbose_build_logs_phases() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_blog_site(tmp.path())?;

	sitegen_cmd()
		.arg(tmp.path())
		.arg("--verbose")
		.assert()
		.success()
		.stderr(predicates::str::contains("cleared build directory"))
		.stderr(predicates::str::contains("build finished"));

	sitegen_cmd()
		.arg(tmp.path())
		.args(["--no-clean", "--verbose"])
		.assert()
		.success()
		.stderr(predicates::str::contains("keeping existing build output"));

	Ok(())
}
