//! Repository integration tests against the local filesystem

use fvcs_core::{LocalFs, ReadPolicy, Repository, RepositoryConfig, RepositoryError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_commit_and_revert_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("example.txt");
    let path = path.to_str().unwrap();

    let repo = Repository::new(LocalFs::new());
    repo.initialize();

    fs::write(path, "This is the initial content.").unwrap();
    let first = repo.commit(path, "Initial commit").unwrap();

    fs::write(path, "This is the initial content. Additional content.").unwrap();
    repo.commit(path, "Second commit").unwrap();

    let log = repo.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].message(), "Initial commit");
    assert_eq!(log[1].message(), "Second commit");

    repo.revert(path, &first.to_hex()).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "This is the initial content.");
}

#[test]
fn test_rooted_backend_resolves_relative_paths() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"hello").unwrap();

    let repo = Repository::new(LocalFs::with_root(temp_dir.path()));
    let id = repo.commit("a.txt", "init").unwrap();

    fs::write(temp_dir.path().join("a.txt"), b"hello world").unwrap();
    let outcome = repo.revert("a.txt", &id.to_hex()).unwrap();

    assert_eq!(outcome.bytes_written, 5);
    assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"hello");
}

#[test]
fn test_not_found_leaves_file_alone() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"keep me").unwrap();

    let repo = Repository::new(LocalFs::with_root(temp_dir.path()));
    repo.commit("a.txt", "init").unwrap();

    let err = repo
        .revert("a.txt", "0000000000000000000000000000000000000000000000000000000000000000")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"keep me");
    assert_eq!(repo.len(), 1);
}

#[test]
fn test_strict_policy_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = RepositoryConfig::default().with_read_policy(ReadPolicy::Strict);
    let repo = Repository::with_config(LocalFs::with_root(temp_dir.path()), config);

    let err = repo.commit("missing.txt", "init").unwrap_err();
    assert!(matches!(err, RepositoryError::ReadFailure { .. }));
    assert!(repo.log().is_empty());
}

#[test]
fn test_lenient_policy_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::new(LocalFs::with_root(temp_dir.path()));

    let id = repo.commit("missing.txt", "init").unwrap();
    assert_eq!(repo.log()[0].content().len(), 0);

    // Reverting to the empty snapshot creates the file
    repo.revert("missing.txt", &id.to_hex()).unwrap();
    assert_eq!(fs::read(temp_dir.path().join("missing.txt")).unwrap(), b"");
}

#[test]
fn test_write_failure_surfaces() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::new(LocalFs::with_root(temp_dir.path()));

    fs::write(temp_dir.path().join("a.txt"), b"hello").unwrap();
    let id = repo.commit("a.txt", "init").unwrap();

    // Replace the file with a directory so the write cannot succeed
    fs::remove_file(temp_dir.path().join("a.txt")).unwrap();
    fs::create_dir(temp_dir.path().join("a.txt")).unwrap();

    let err = repo.revert("a.txt", &id.to_hex()).unwrap_err();
    assert!(matches!(err, RepositoryError::WriteFailure { .. }));
    assert_eq!(repo.len(), 1);
}
