use super::*;
use std::fs;

fn fixture() -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp.path().join("doc/articles")).unwrap();
    fs::write(temp.path().join("doc/go_spec.html"), "spec body").unwrap();
    fs::write(temp.path().join("doc/go_mem.html"), "mem body").unwrap();
    fs::write(temp.path().join("README"), "readme").unwrap();
    temp
}

#[test]
fn test_local_read_file() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    assert_eq!(backend.read("doc/go_spec.html").unwrap(), b"spec body");
}

#[test]
fn test_local_open_reports_metadata() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    let file = backend.open("doc/go_mem.html").unwrap();
    assert_eq!(file.name(), "go_mem.html");
    assert_eq!(file.metadata().size, 8);
    assert!(!file.is_dir());
}

#[test]
fn test_local_open_directory() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    let file = backend.open("doc").unwrap();
    assert!(file.is_dir());
}

#[test]
fn test_local_missing_file_is_not_found() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    let err = backend.open("nope.html").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "open nope.html: file does not exist");
}

#[test]
fn test_local_read_dir_sorted() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    let entries = backend.read_dir("doc").unwrap();
    assert_eq!(
        entries,
        vec![
            DirEntry::dir("articles"),
            DirEntry::file("go_mem.html"),
            DirEntry::file("go_spec.html"),
        ]
    );
}

#[test]
fn test_local_read_dir_root() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    let names: Vec<_> = backend
        .read_dir(".")
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["README", "doc"]);
}

#[test]
fn test_local_read_dir_missing() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path());

    assert!(backend.read_dir("missing").unwrap_err().is_not_found());
}

#[test]
fn test_local_rejects_escape() {
    let temp = fixture();
    let backend = LocalDir::new(temp.path().join("doc"));

    let err = backend.open("../README").unwrap_err();
    assert!(matches!(err, FsError::InvalidPath(_)));
}

#[test]
fn test_blanket_impls_delegate() {
    let temp = fixture();
    let shared: Arc<dyn Backend> = Arc::new(LocalDir::new(temp.path()));
    let boxed: Box<dyn Backend> = Box::new(LocalDir::new(temp.path()));

    assert_eq!(shared.read("README").unwrap(), b"readme");
    assert_eq!((&boxed).read("README").unwrap(), b"readme");
}

#[test]
fn test_base_name() {
    assert_eq!(base_name("doc/go_mem.html"), "go_mem.html");
    assert_eq!(base_name("README"), "README");
    assert_eq!(base_name("doc/"), "doc");
    assert_eq!(base_name(""), ".");
}
