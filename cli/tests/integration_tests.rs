//! End-to-end tests driving the `bookstore` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn bookstore() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bookstore"))
}

fn migrate(db: &Path, args: &[&str]) -> std::process::Output {
    bookstore()
        .arg("--db")
        .arg(db)
        .arg("migrate")
        .args(args)
        .output()
        .expect("failed to run bookstore")
}

#[test]
fn test_migrate_up_then_status() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");

    let out = migrate(&db, &["up"]);
    assert!(out.status.success());

    let out = migrate(&db, &["status"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Table exists: yes"));
    assert!(stdout.contains("Book count: 0"));
}

#[test]
fn test_migrate_seed_is_idempotent_from_the_outside() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");
    assert!(migrate(&db, &["up"]).status.success());

    let out = migrate(&db, &["seed"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("5 book(s) inserted"));

    // Second run hits the conflict and rolls back the batch.
    let out = migrate(&db, &["seed"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("batch rolled back"));

    let out = migrate(&db, &["status"]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("Book count: 5"));
}

#[test]
fn test_migrate_seed_from_json_source() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");
    assert!(migrate(&db, &["up"]).status.success());

    let source = dir.path().join("books.json");
    std::fs::write(
        &source,
        r#"[{"id": 7001, "title": "Persuasion", "author": "Jane Austen", "quantity": 9}]"#,
    )
    .unwrap();

    let out = migrate(&db, &["seed", "--source", source.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("1 book(s) inserted"));
}

#[test]
fn test_migrate_seed_rejects_invalid_source() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");
    assert!(migrate(&db, &["up"]).status.success());

    let source = dir.path().join("bad.json");
    std::fs::write(
        &source,
        r#"[{"id": 12, "title": "Short id", "author": "x", "quantity": 1}]"#,
    )
    .unwrap();

    let out = migrate(&db, &["seed", "--source", source.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[test]
fn test_migrate_refresh_resets_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");
    assert!(migrate(&db, &["up"]).status.success());
    assert!(migrate(&db, &["seed"]).status.success());

    let out = migrate(&db, &["refresh"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Refresh complete"));
    assert!(stdout.contains("5 book(s) inserted"));
}

#[test]
fn test_invalid_prefix_fails_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");

    let out = bookstore()
        .arg("--db")
        .arg(&db)
        .arg("--prefix")
        .arg("drop;--")
        .arg("migrate")
        .arg("up")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid prefix"));
}

#[test]
fn test_interactive_clerk_session() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");

    let mut child = bookstore()
        .arg("--db")
        .arg(&db)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn bookstore");

    // Enter a book, search for it, delete it, exit.
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"1\n4006\nEmma\nJane Austen\n5\n4\n4006\n3\n4006\n0\n")
        .unwrap();

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Emma by Jane Austen successfully added!"));
    assert!(stdout.contains("Title:\tEmma"));
    assert!(stdout.contains("4006 record deleted from database."));
    assert!(stdout.contains("Closing Bookstore program."));
}

#[test]
fn test_interactive_session_reports_already_seeded_store() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ebookstore.db");
    assert!(migrate(&db, &["up"]).status.success());
    assert!(migrate(&db, &["seed"]).status.success());

    let mut child = bookstore()
        .arg("--db")
        .arg(&db)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.as_mut().unwrap().write_all(b"0\n").unwrap();

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Data already exists in the table."));
}
