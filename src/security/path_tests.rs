use crate::security::PathSanitizer;

#[test]
fn test_valid_simple_path() {
    let result = PathSanitizer::sanitize("doc/go_spec.html");
    assert_eq!(result.unwrap(), "doc/go_spec.html");
}

#[test]
fn test_hidden_files_allowed() {
    let result = PathSanitizer::sanitize(".github/workflows/ci.yml");
    assert_eq!(result.unwrap(), ".github/workflows/ci.yml");
}

#[test]
fn test_reject_parent_directory_traversal() {
    let result = PathSanitizer::sanitize("../etc/passwd");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Parent directory traversal"));
}

#[test]
fn test_reject_parent_in_middle() {
    let result = PathSanitizer::sanitize("ref/../../etc/passwd");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Parent directory traversal"));
}

#[test]
fn test_reject_absolute_path() {
    let result = PathSanitizer::sanitize("/etc/passwd");
    assert!(result.unwrap_err().to_string().contains("Absolute path"));
}

#[test]
fn test_reject_empty_path() {
    let result = PathSanitizer::sanitize("");
    assert!(result.unwrap_err().to_string().contains("Empty path"));
}

#[test]
fn test_normalize_current_dir_markers() {
    let result = PathSanitizer::sanitize("./ref/./mem.html");
    assert_eq!(result.unwrap(), "ref/mem.html");
}

#[test]
fn test_collapse_repeated_separators() {
    let result = PathSanitizer::sanitize("ref//mem.html/");
    assert_eq!(result.unwrap(), "ref/mem.html");
}

#[test]
fn test_sanitize_rejects_root_only() {
    let result = PathSanitizer::sanitize("./.");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("No valid components"));
}

#[test]
fn test_clean_accepts_root() {
    assert_eq!(PathSanitizer::clean("").unwrap(), "");
    assert_eq!(PathSanitizer::clean(".").unwrap(), "");
    assert_eq!(PathSanitizer::clean("doc/").unwrap(), "doc");
}

#[test]
fn test_path_with_unicode() {
    let result = PathSanitizer::sanitize("docs/文档/readme.md");
    assert_eq!(result.unwrap(), "docs/文档/readme.md");
}
