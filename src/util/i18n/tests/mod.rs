//! i18n 测试

use super::*;

#[test]
fn test_msg_key() {
    assert_eq!(MSG::IncludeMissing.key(), "include_missing");
    assert_eq!(MSG::ReplHelp.key(), "repl_help");
}

#[test]
fn test_available_langs() {
    let langs = available_langs();
    assert!(langs.contains(&"en"));
}

#[test]
fn test_positional_args() {
    let text = t(MSG::IncludeLoaded, "en", Some(&[&3 as &dyn std::fmt::Display, &"defs.rpl"]));
    assert_eq!(text, "loaded 3 lines from defs.rpl");
}

#[test]
fn test_unknown_lang_falls_back_to_builtin() {
    let text = t(MSG::ReplCleared, "xx-unknown", None);
    assert_eq!(text, "pending input discarded");
}

#[test]
fn test_help_lists_exit() {
    assert!(MSG::ReplHelp.default_text().contains("exit"));
}

#[test]
fn test_locale_file_overrides_builtin() {
    // `cargo test` runs from the package root, where `locales/` lives
    if !available_langs().contains(&"zh") {
        return;
    }
    assert_eq!(t(MSG::ReplReset, "zh", None), "环境已清空");
    assert_eq!(
        t(MSG::IncludeMissing, "zh", Some(&[&"a.rpl"])),
        "未找到定义文件 a.rpl"
    );
}
