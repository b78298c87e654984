//! Integration tests for wiki storage
//!
//! Each test works in its own temporary storage directory.

use std::fs;

use markwiki::{GitIdentity, WikiError, WikiStore};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn identity() -> GitIdentity {
    GitIdentity::new("Wiki Author", "author@example.com")
}

fn store() -> (TempDir, WikiStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = WikiStore::open(dir.path().join("wiki")).unwrap();
    (dir, store)
}

// ============================================================================
// Listing and lifecycle
// ============================================================================

#[test]
fn test_open_creates_storage_dir() {
    let (_dir, store) = store();
    assert!(store.root().is_dir());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_create_then_list() {
    let (_dir, store) = store();
    store.create_local("zettel", &identity()).unwrap();
    let notes = store.create_local("notes", &identity()).unwrap();

    assert_eq!(notes.name, "notes");
    assert!(!notes.has_remote_repo);
    assert!(notes.path.join(".git").is_dir());

    let names: Vec<String> = store.list().unwrap().into_iter().map(|w| w.name).collect();
    assert_eq!(names, vec!["notes", "zettel"]);
}

#[test]
fn test_list_skips_plain_directories_and_files() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    fs::create_dir(store.root().join("not-a-repo")).unwrap();
    fs::write(store.root().join("config.json"), "{}").unwrap();

    let wikis = store.list().unwrap();
    assert_eq!(wikis.len(), 1);
    assert!(matches!(
        store.get("not-a-repo"),
        Err(WikiError::NotARepository(name)) if name == "not-a-repo"
    ));
}

#[test]
fn test_create_existing_wiki_fails() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    assert!(matches!(
        store.create_local("notes", &identity()),
        Err(WikiError::AlreadyExists(name)) if name == "notes"
    ));
}

#[rstest]
#[case("")]
#[case("../escape")]
#[case(".git")]
fn test_create_rejects_bad_names(#[case] name: &str) {
    let (_dir, store) = store();
    assert!(matches!(
        store.create_local(name, &identity()),
        Err(WikiError::InvalidName(_))
    ));
}

#[test]
fn test_remote_is_reported() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    store
        .repository("notes")
        .unwrap()
        .set_remote("origin", "https://example.com/notes.git")
        .unwrap();
    assert!(store.get("notes").unwrap().has_remote_repo);
}

#[test]
fn test_delete() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    store.delete("notes").unwrap();
    assert!(!store.exists("notes"));
    assert!(matches!(store.delete("notes"), Err(WikiError::NotFound(_))));
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn test_create_file_and_folder() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();

    store.create_folder("notes", "", "daily").unwrap();
    store.create_file("notes", "/daily/", "today.md").unwrap();
    store.create_file("notes", "drafts", "idea.md").unwrap();

    let tree = store.file_tree("notes").unwrap();
    assert_eq!(tree.name, "notes");
    assert_eq!(tree.files(), vec!["daily/today.md", "drafts/idea.md"]);
    assert_eq!(store.read_file("notes", "daily/today.md").unwrap(), "");
}

#[test]
fn test_create_file_requires_markdown() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    assert!(matches!(
        store.create_file("notes", "", "image.png"),
        Err(WikiError::NotMarkdown(_))
    ));
}

#[test]
fn test_create_file_twice_fails() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    store.create_file("notes", "daily", "today.md").unwrap();
    assert!(matches!(
        store.create_file("notes", "daily", "today.md"),
        Err(WikiError::FileExists(path)) if path == "daily/today.md"
    ));
}

#[test]
fn test_save_then_read_round_trip() {
    let (_dir, store) = store();
    store.create_local("笔记", &identity()).unwrap();
    store.save_file("笔记", "目录/文件.md", "# 标题\n").unwrap();
    assert_eq!(store.read_file("笔记", "/目录/文件.md").unwrap(), "# 标题\n");
}

#[rstest]
#[case("../outside.md")]
#[case("daily/../../outside.md")]
#[case(".git/config")]
#[case("")]
fn test_document_paths_stay_inside_wiki(#[case] file_path: &str) {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    assert!(matches!(
        store.save_file("notes", file_path, "x"),
        Err(WikiError::InvalidPath(_))
    ));
    assert!(!store.root().join("outside.md").exists());
}

#[test]
fn test_read_missing_file() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    assert!(matches!(
        store.read_file("notes", "missing.md"),
        Err(WikiError::FileNotFound(path)) if path == "missing.md"
    ));
}

// ============================================================================
// Git status
// ============================================================================

#[test]
fn test_saved_document_is_pending_until_committed() {
    let (_dir, store) = store();
    store.create_local("notes", &identity()).unwrap();
    store.save_file("notes", "a.md", "a").unwrap();

    let repo = store.repository("notes").unwrap();
    assert!(repo.has_uncommitted_changes().unwrap());
    repo.commit_all("Add a.md").unwrap();
    assert!(!repo.has_uncommitted_changes().unwrap());
    assert_eq!(repo.user_config().unwrap(), Some(identity()));
}
