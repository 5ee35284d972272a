use std::fs;

use ripple::repl::Prompts;
use ripple::util::config::{load_config_from, parse_config};

#[test]
fn test_partial_config_keeps_defaults() {
    let config = parse_config(
        r#"
[repl]
prompt = "ripple> "
exit_commands = ["bye"]
"#,
    )
    .unwrap();

    assert_eq!(config.repl.prompt, "ripple> ");
    assert_eq!(config.repl.continuation_prompt, ". ");
    assert_eq!(config.repl.exit_commands, vec!["bye".to_string()]);
    assert_eq!(config.i18n.lang, "en");
    assert_eq!(Prompts::stream(&config.repl).select(1), ". ");
    assert_eq!(Prompts::widget(&config.repl).select(0), "> ");
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[i18n]\nlang = \"zh\"\n[repl]\nline_editing = false\n").unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.i18n.lang, "zh");
    assert!(!config.repl.line_editing);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("none.toml")).unwrap();
    assert_eq!(config.repl.prompt, "# ");
}

#[test]
fn test_invalid_config_is_an_error() {
    assert!(parse_config("[repl]\nhistory_size = \"lots\"\n").is_err());
}
