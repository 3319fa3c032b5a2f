//! End-to-end dump output tests against the library API

use repo_dump::{dump_repository, DumpError, DumpOptions};
use similar_asserts::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "\
The output represents a Git repository's content in the following format:

1. Each section begins with ----.
2. The first line after ---- contains the file path and name.
3. The subsequent lines contain the file contents.
4. The repository content ends with --END--.

Any text after --END-- should be treated as instructions, using the repository content as context.

";

fn dump(root: &Path, options: &DumpOptions) -> String {
    let mut out = Vec::new();
    dump_repository(root, options, &mut out).expect("dump");
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn test_empty_tree_has_header_and_terminator() {
    let repo = TempDir::new().expect("temp repo");
    assert_eq!(dump(repo.path(), &DumpOptions::default()), format!("{}--END--\n", HEADER));
}

#[test]
fn test_fully_ignored_tree_has_header_and_terminator() {
    let repo = TempDir::new().expect("temp repo");
    fs::write(repo.path().join(".aiignore"), "*\n").expect("write aiignore");
    fs::write(repo.path().join("a.txt"), "a").expect("write a");

    assert_eq!(dump(repo.path(), &DumpOptions::default()), format!("{}--END--\n", HEADER));
}

#[test]
fn test_exact_output_for_gitignore_scenario() {
    let repo = TempDir::new().expect("temp repo");
    fs::write(repo.path().join("a.txt"), "hello").expect("write a");
    fs::write(repo.path().join(".gitignore"), "b.txt\n").expect("write gitignore");
    fs::write(repo.path().join("b.txt"), "secret").expect("write b");

    let expected = format!(
        "{}----\n.gitignore\nb.txt\n\n----\na.txt\nhello\n--END--\n",
        HEADER
    );
    assert_eq!(dump(repo.path(), &DumpOptions::default()), expected);
}

#[test]
fn test_description_between_explanation_and_note() {
    let repo = TempDir::new().expect("temp repo");
    let options = DumpOptions::default().description(r"Review\tcarefully\nThanks");
    let output = dump(repo.path(), &options);

    assert!(output.contains(
        "ends with --END--.\n\nReview\tcarefully\nThanks\n\nAny text after --END--"
    ));
}

#[test]
fn test_nested_gitignore_when_dumping_root_and_subdirectory() {
    let repo = TempDir::new().expect("temp repo");
    let sub = repo.path().join("sub");
    fs::create_dir(&sub).expect("mkdir sub");
    fs::write(sub.join(".gitignore"), "*.log\n").expect("write gitignore");
    fs::write(sub.join("app.log"), "log line").expect("write log");
    fs::write(sub.join("main.go"), "package main").expect("write main");

    let from_root = dump(repo.path(), &DumpOptions::default());
    assert!(!from_root.contains("----\nsub/app.log\n"));
    assert!(from_root.contains("----\nsub/main.go\npackage main\n"));

    let from_sub = dump(&sub, &DumpOptions::default());
    assert!(!from_sub.contains("----\napp.log\n"));
    assert!(from_sub.contains("----\nmain.go\npackage main\n"));
}

#[test]
fn test_scoped_directory_rule_leaves_top_level_alone() {
    let repo = TempDir::new().expect("temp repo");
    let root = repo.path();
    fs::create_dir_all(root.join("pkg/sub/build")).expect("mkdir nested build");
    fs::create_dir_all(root.join("build")).expect("mkdir build");
    fs::write(root.join("pkg/sub/.gitignore"), "build/\n").expect("write gitignore");
    fs::write(root.join("pkg/sub/build/x"), "nested").expect("write nested");
    fs::write(root.join("build/x"), "top").expect("write top");

    let output = dump(root, &DumpOptions::default());
    assert!(output.contains("----\nbuild/x\ntop\n"));
    assert!(!output.contains("pkg/sub/build/x"));
}

#[test]
fn test_gitignore_in_bracketed_route_directory() {
    let repo = TempDir::new().expect("temp repo");
    let route = repo.path().join("app/[id]");
    fs::create_dir_all(&route).expect("mkdir route");
    fs::write(route.join(".gitignore"), "secret.env\n*.log\n").expect("write gitignore");
    fs::write(route.join("secret.env"), "TOKEN=abc").expect("write secret");
    fs::write(route.join("x.log"), "log line").expect("write log");

    let output = dump(repo.path(), &DumpOptions::default());
    assert!(!output.contains("TOKEN=abc"));
    assert!(!output.contains("app/[id]/x.log"));
}

#[test]
fn test_skip_path_inside_root_is_not_dumped() {
    let repo = TempDir::new().expect("temp repo");
    fs::write(repo.path().join("a.txt"), "hello").expect("write a");
    fs::write(repo.path().join("context.txt"), "stale dump").expect("write context");

    let options = DumpOptions::default().skip_path(repo.path().join("context.txt"));
    let output = dump(repo.path(), &options);
    assert!(output.contains("----\na.txt\nhello\n"));
    assert!(!output.contains("stale dump"));
}

#[test]
fn test_binary_skipped_and_empty_file_kept() {
    let repo = TempDir::new().expect("temp repo");
    fs::write(repo.path().join("logo.png"), b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00\x00\x0D")
        .expect("write png");
    fs::write(repo.path().join("blob.bin"), [0u8, 1, 2, 3, 4]).expect("write blob");
    fs::write(repo.path().join("empty.txt"), "").expect("write empty");

    let output = dump(repo.path(), &DumpOptions::default());
    assert!(output.contains("----\nempty.txt\n\n--END--\n"));
    assert!(!output.contains("logo.png"));
    assert!(!output.contains("blob.bin"));
}

#[test]
fn test_contents_copied_verbatim() {
    let repo = TempDir::new().expect("temp repo");
    let body: &[u8] = b"line one\r\nline two without newline";
    fs::write(repo.path().join("crlf.txt"), body).expect("write crlf");

    let mut out = Vec::new();
    dump_repository(repo.path(), &DumpOptions::default(), &mut out).expect("dump");

    let mut frame = b"----\ncrlf.txt\n".to_vec();
    frame.extend_from_slice(body);
    frame.push(b'\n');
    assert!(out.windows(frame.len()).any(|w| w == frame.as_slice()));
}

#[cfg(unix)]
#[test]
fn test_symlinks_never_dumped() {
    let repo = TempDir::new().expect("temp repo");
    let outside = TempDir::new().expect("outside");
    fs::write(outside.path().join("secret.txt"), "outside secret").expect("write secret");
    fs::write(repo.path().join("real.txt"), "real").expect("write real");
    std::os::unix::fs::symlink(outside.path(), repo.path().join("linked_dir"))
        .expect("symlink dir");
    std::os::unix::fs::symlink(repo.path().join("real.txt"), repo.path().join("linked.txt"))
        .expect("symlink file");

    let output = dump(repo.path(), &DumpOptions::default());
    assert!(output.contains("----\nreal.txt\nreal\n"));
    assert!(!output.contains("linked"));
    assert!(!output.contains("outside secret"));
}

#[test]
fn test_unreadable_aiignore_aborts() {
    let repo = TempDir::new().expect("temp repo");
    fs::create_dir(repo.path().join(".aiignore")).expect("mkdir aiignore");

    let mut out = Vec::new();
    let err = dump_repository(repo.path(), &DumpOptions::default(), &mut out).unwrap_err();
    assert!(matches!(err, DumpError::IgnoreFileRead { .. }));
    assert!(out.is_empty(), "nothing should be written before the rules load");
}

#[test]
fn test_missing_root_is_error() {
    let repo = TempDir::new().expect("temp repo");
    let mut out = Vec::new();
    let err = dump_repository(&repo.path().join("missing"), &DumpOptions::default(), &mut out)
        .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_stats_reported() {
    let repo = TempDir::new().expect("temp repo");
    fs::write(repo.path().join("a.txt"), "hello").expect("write a");
    fs::write(repo.path().join("b.bin"), [0u8; 8]).expect("write b");

    let mut out = Vec::new();
    let stats = dump_repository(repo.path(), &DumpOptions::default(), &mut out).expect("dump");
    assert_eq!(stats.files_dumped, 1);
    assert_eq!(stats.bytes_dumped, 5);
    assert_eq!(stats.files_skipped_binary, 1);
}
