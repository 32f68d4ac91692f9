use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SITE: &str = r#"
users:
  alice:
    home:
      title: Home
      content: "Welcome to [[sandbox]]. {{badge}}"
    sandbox:
      title: Sandbox
      content: "Scratch space."
    badge:
      title: Badge
      content: "a badge"
"#;

#[test]
fn render_page_resolves_links_and_templates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let site = dir.path().join("site.yml");
    fs::write(&site, SITE)?;

    Command::cargo_bin("userwiki")?
        .args(["--site", site.to_str().unwrap(), "render", "alice", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<a href="/sandbox.html" data-wiki-link="sandbox" class="wiki-link-valid">sandbox</a>"#,
        ))
        .stdout(predicate::str::contains("a badge"));
    Ok(())
}

#[test]
fn render_missing_page_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let site = dir.path().join("site.yml");
    fs::write(&site, SITE)?;

    Command::cargo_bin("userwiki")?
        .args(["--site", site.to_str().unwrap(), "render", "alice", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No page"));
    Ok(())
}

#[test]
fn preview_reads_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let site = dir.path().join("site.yml");
    fs::write(&site, SITE)?;

    Command::cargo_bin("userwiki")?
        .args(["--site", site.to_str().unwrap(), "preview", "--user", "alice"])
        .write_stdin("Look at [[sandbox]].")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"class="wiki-link-valid""#));
    Ok(())
}

#[test]
fn summary_strips_template_syntax() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let site = dir.path().join("site.yml");
    fs::write(&site, SITE)?;

    Command::cargo_bin("userwiki")?
        .args(["--site", site.to_str().unwrap(), "summary", "alice", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to [[sandbox]]."))
        .stdout(predicate::str::contains("{{badge}}").not());
    Ok(())
}
