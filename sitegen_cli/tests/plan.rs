mod common;

use common::sitegen_cmd;
use common::write_blog_site;
use sitegen_core::AnyEmptyResult;

#[test]
fn plan_prints_text_without_building() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_blog_site(tmp.path())?;

	sitegen_cmd()
		.arg(tmp.path())
		.arg("--plan")
		.assert()
		.success()
		.stdout(predicates::str::contains("Queue:"))
		.stdout(predicates::str::contains("1. include robots.txt -> robots.txt"))
		.stdout(predicates::str::contains("3. redirect /old -> /blog"))
		.stdout(predicates::str::contains("index.html (template post.html, post.txt)"));

	assert!(!tmp.path().join("public").exists());

	Ok(())
}

#[test]
fn plan_prints_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_blog_site(tmp.path())?;

	let output = sitegen_cmd()
		.arg(tmp.path())
		.args(["--plan", "--format", "json"])
		.output()?;
	assert!(output.status.success());

	let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(plan["settings"]["build_dir"], "public");
	assert_eq!(plan["queue"][0]["directive"], "include");
	assert_eq!(plan["queue"][2]["target"], "/blog");
	assert_eq!(plan["pages"][0]["url"], "/blog");
	assert_eq!(plan["pages"][0]["files"][0]["template"], "post.html");

	Ok(())
}
