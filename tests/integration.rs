use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_extdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn source_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".js").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

// -- outputs --

#[test]
fn writes_tree_and_one_page_per_class() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("component.js"))
        .arg(fixture_path("panel.js"))
        .assert()
        .success();

    let tree = read(dir.path(), "tree.js");
    assert!(tree.starts_with("Docs.classData = {"));
    assert!(tree.ends_with(";Docs.icons = {};"));
    assert!(tree.contains("\"pkg-Ext.Panel\""));
    assert!(tree.contains("\"href\":\"Ext.Panel.Header.html\""));

    assert!(dir.path().join("Ext.Component.html").exists());
    assert!(dir.path().join("Ext.Panel.html").exists());
    assert!(dir.path().join("Ext.Panel.Header.html").exists());
}

#[test]
fn page_includes_inherited_members() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("component.js"))
        .arg(fixture_path("panel.js"))
        .assert()
        .success();

    let page = read(dir.path(), "Ext.Panel.html");
    assert!(page.contains("<strong>Ext.Panel</strong>"));
    assert!(page.contains("<code>title</code> : String"));
    // @method without a name takes it from the code
    assert!(page.contains("<code>collapse</code>( animate ) : void"));
    assert!(page.contains("<tr id=\"method-render\" class=\"inherited\">"));
    assert!(page.contains("<code>render</code>( Element container, [Number position] ) : Ext.Component"));
    assert!(page.contains("<a href=\"Ext.Component.html\">Ext.Component</a>"));
    assert!(!page.contains("cleanup"));

    let base = read(dir.path(), "Ext.Component.html");
    assert!(base.contains("<h2>Constructor</h2>"));
    assert!(base.contains("<a href=\"Ext.Panel.html\">Ext.Panel</a>"));
    assert!(base.contains("<h2>Public Events</h2>"));
}

#[test]
fn show_private_includes_private_members() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--show-private")
        .arg(fixture_path("component.js"))
        .assert()
        .success();

    let page = read(dir.path(), "Ext.Component.html");
    assert!(page.contains("<code>cleanup</code>"));
}

#[test]
fn json_format() {
    let dir = TempDir::new().unwrap();
    let unit = source_file("/**\n * @class Foo\n */\n/**\n * @cfg {String} bar\n */\n");
    let other = source_file("/**\n * @cfg {String} baz\n */\n");

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "json"])
        .arg(unit.path())
        .arg(other.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring cfg: baz"));

    let page: serde_json::Value = serde_json::from_str(&read(dir.path(), "Foo.json")).unwrap();
    let cfgs = page["cfgs"].as_array().unwrap();
    assert_eq!(cfgs.len(), 1);
    assert_eq!(cfgs[0]["name"], "bar");
}

#[test]
fn creates_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("docs");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("component.js"))
        .assert()
        .success();

    assert!(out.join("tree.js").exists());
}

#[test]
fn accepts_directory_input() {
    let dir = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    std::fs::copy(fixture_path("panel.js"), src.path().join("panel.js")).unwrap();
    std::fs::write(src.path().join("notes.txt"), "/** @class Ignored */").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(src.path())
        .assert()
        .success();

    assert!(dir.path().join("Ext.Panel.html").exists());
    assert!(!dir.path().join("Ignored.html").exists());
}

// -- diagnostics --

#[test]
fn orphan_is_reported_on_stdout() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("component.js"))
        .arg(fixture_path("orphan.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring cfg: baz"));

    let page = read(dir.path(), "Ext.Component.html");
    assert!(!page.contains("baz"));
}

#[test]
fn verbose_reports_progress() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("-v")
        .arg(fixture_path("panel.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsing"))
        .stdout(predicate::str::contains("Writing to"));
}

#[test]
fn dangling_extends_is_reported() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("panel.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Class Ext.Panel extends unknown class Ext.Component",
        ));
}

// -- failures --

#[test]
fn requires_input_files() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no input files"));
}

#[test]
fn requires_output() {
    cmd()
        .arg(fixture_path("panel.js"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn output_must_be_directory() {
    let file = NamedTempFile::new().unwrap();

    cmd()
        .args(["-o", file.path().to_str().unwrap()])
        .arg(fixture_path("panel.js"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn unterminated_doc_comment_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let broken = source_file("/** @class Broken */\nBroken = {};\n/** never closed\n");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("panel.js"))
        .arg(broken.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated doc comment starting at line 3"));

    assert!(!out.exists());
}

#[test]
fn inheritance_cycle_is_fatal() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let cyclic = source_file("/**\n * @class A\n * @extends B\n */\n/**\n * @class B\n * @extends A\n */\n");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(cyclic.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("inheritance cycle"));

    assert!(!out.exists());
}

#[test]
fn invalid_format_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "xml"])
        .arg(fixture_path("panel.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
