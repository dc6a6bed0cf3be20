use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn notepad_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_notepad"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    notepad_cmd().current_dir(dir).args(args).output().unwrap()
}

fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["init"]);
    assert!(output.status.success());
    tmp
}

fn list_json(dir: &Path) -> Vec<serde_json::Value> {
    let output = run(dir, &["list", "--json"]);
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn add_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["add"];
    full.extend_from_slice(args);
    full.push("--json");
    let output = run(dir, &full);
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_init_creates_notepad_directory() {
    let tmp = init_project();

    assert!(tmp.path().join(".notepad").exists());
    assert!(tmp.path().join(".notepad/loro.db").exists());
    assert!(tmp.path().join(".notepad/config.json").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = init_project();

    let output = run(tmp.path(), &["init"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Already initialized"));
}

#[test]
fn test_add_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Groceries"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not in a notepad project"));
}

#[test]
fn test_add_and_list() {
    let tmp = init_project();

    let note = add_json(
        tmp.path(),
        &[
            "Groceries",
            "-c",
            "milk, eggs",
            "--color",
            "#FF4CAF50",
            "-t",
            "home, errands",
            "-t",
            "weekly",
        ],
    );
    assert!(!note["id"].as_str().unwrap().is_empty());
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["content"], "milk, eggs");
    assert_eq!(note["colorHex"], "#FF4CAF50");
    assert_eq!(note["tags"], serde_json::json!(["home", "errands", "weekly"]));

    let notes = list_json(tmp.path());
    assert_eq!(notes, vec![note]);

    let output = run(tmp.path(), &["list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Groceries"));
    assert!(stdout.contains("#home #errands #weekly"));
}

#[test]
fn test_add_reads_content_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let tmp = init_project();

    let mut child = notepad_cmd()
        .current_dir(tmp.path())
        .args(["add", "Piped", "--stdin", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"from a pipe")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["content"], "from a pipe");
}

#[test]
fn test_duplicate_title_is_skipped_silently() {
    let tmp = init_project();
    add_json(tmp.path(), &["Shopping"]);

    let output = run(tmp.path(), &["add", "Shopping", "-c", "second"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    assert_eq!(list_json(tmp.path()).len(), 1);
}

#[test]
fn test_invalid_color_blocks_add() {
    let tmp = init_project();

    let output = run(tmp.path(), &["add", "Colorful", "--color", "not-a-color"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid hex color"));

    assert!(list_json(tmp.path()).is_empty());
}

#[test]
fn test_blank_title_blocks_add() {
    let tmp = init_project();

    let output = run(tmp.path(), &["add", "   "]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Title is required"));
}

#[test]
fn test_search() {
    let tmp = init_project();
    add_json(tmp.path(), &["Groceries", "-t", "home"]);
    add_json(tmp.path(), &["Work plan", "-t", "urgent"]);

    let output = run(tmp.path(), &["search", "gro", "--json"]);
    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Groceries");

    let output = run(tmp.path(), &["search", "URGENT", "--json"]);
    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Work plan");

    let output = run(tmp.path(), &["search", "--json"]);
    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.len(), 2);

    let output = run(tmp.path(), &["search", "nothing-here"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No notes match"));
}

#[test]
fn test_edit_replaces_note() {
    let tmp = init_project();
    let note = add_json(tmp.path(), &["Plan", "-c", "draft", "-t", "a,b"]);
    let id = note["id"].as_str().unwrap().to_string();

    let output = run(
        tmp.path(),
        &["edit", &id[..8], "--title", "Plan v2", "--clear-tags", "--json"],
    );
    assert!(output.status.success());
    let edited: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(edited["id"], id.as_str());
    assert_eq!(edited["title"], "Plan v2");
    assert_eq!(edited["content"], "draft");
    assert_eq!(edited["tags"], serde_json::json!([]));

    let notes = list_json(tmp.path());
    assert_eq!(notes, vec![edited]);
}

#[test]
fn test_edit_rejects_invalid_color() {
    let tmp = init_project();
    let note = add_json(tmp.path(), &["Plan"]);
    let id = note["id"].as_str().unwrap();

    let output = run(tmp.path(), &["edit", id, "--color", "#12345"]);
    assert!(!output.status.success());

    assert_eq!(list_json(tmp.path()), vec![note]);
}

#[test]
fn test_edit_unknown_id_fails() {
    let tmp = init_project();

    let output = run(tmp.path(), &["edit", "missing", "--title", "x"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Note not found"));
    assert!(list_json(tmp.path()).is_empty());
}

#[test]
fn test_show() {
    let tmp = init_project();
    let note = add_json(tmp.path(), &["Trip", "-c", "passport", "--color", "#1E88E5"]);
    let id = note["id"].as_str().unwrap();

    let output = run(tmp.path(), &["show", id]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Title:   Trip"));
    assert!(stdout.contains("Color:   #1E88E5"));
    assert!(stdout.contains("passport"));
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let tmp = init_project();
    let note = add_json(tmp.path(), &["Keep me"]);
    let id = note["id"].as_str().unwrap();

    let output = run(tmp.path(), &["delete", id]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--force"));

    assert_eq!(list_json(tmp.path()).len(), 1);
}

#[test]
fn test_delete_with_force() {
    let tmp = init_project();
    let keep = add_json(tmp.path(), &["Keep"]);
    let gone = add_json(tmp.path(), &["Gone"]);
    let gone_id = gone["id"].as_str().unwrap();

    let output = run(tmp.path(), &["delete", gone_id, "--force"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted note"));

    assert_eq!(list_json(tmp.path()), vec![keep]);

    let output = run(tmp.path(), &["delete", gone_id, "--force"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Note not found"));
}

#[test]
fn test_custom_collection() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["init", "--collection", "journal"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("collection 'journal'"));

    add_json(tmp.path(), &["Day one"]);
    assert_eq!(list_json(tmp.path()).len(), 1);
}
