use std::fs;

use crate::common::{output, shell};

#[test]
fn test_definitions_visible_to_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.rpl");
    fs::write(&path, "base = 40\nif (base > 0) {\n  base = base + 1\n}\n").unwrap();

    let (mut repl, captured) = shell(&["base + 1"]);
    repl.interpreter_mut().read_include_file(&path);
    repl.run();

    assert_eq!(output(&captured), "# 42\n# ");
}

#[test]
fn test_definition_errors_reported_like_interactive_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.rpl");
    fs::write(&path, "ok = 1\nbad = nope\n").unwrap();

    let (mut repl, captured) = shell(&["ok"]);
    repl.interpreter_mut().read_include_file(&path);
    repl.run();

    assert_eq!(output(&captured), "error: unknown name 'nope'\n# 1\n# ");
}

#[test]
fn test_missing_default_file_is_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let (mut repl, captured) = shell(&[]);
    repl.interpreter_mut()
        .read_include_file(&dir.path().join("absent.rpl"));

    assert_eq!(output(&captured), "");
    assert_eq!(repl.block_level(), 0);
}

#[test]
fn test_unterminated_block_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("open.rpl");
    fs::write(&path, "if (true) {\n  x = 1\n").unwrap();

    let (mut repl, captured) = shell(&[]);
    repl.interpreter_mut().read_include_file(&path);

    assert_eq!(repl.block_level(), 0);
    assert_eq!(
        output(&captured),
        format!("unterminated block at end of {} discarded\n", path.display())
    );
}

#[test]
fn test_load_include_counts_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("three.rpl");
    fs::write(&path, "a = 1\nb = 2\nc = 3\n").unwrap();

    let (mut repl, _) = shell(&[]);
    assert_eq!(repl.interpreter_mut().load_include(&path).unwrap(), 3);
}
