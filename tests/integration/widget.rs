use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ripple::engine::ScriptEngine;
use ripple::repl::ReplState;
use ripple::tui::{self, Action};
use ripple::util::config::ReplConfig;

fn window() -> (ripple::tui::App, ripple::repl::Repl<ScriptEngine>) {
    tui::session(ScriptEngine::new(), &ReplConfig::default(), "Ripple")
}

fn surface_text(app: &ripple::tui::App) -> String {
    app.surface().borrow().text()
}

#[test]
fn test_submit_writes_to_surface() {
    let (mut app, mut repl) = window();
    repl.start();

    assert!(app.apply(Action::Submit("1 + 1".into()), &mut repl));
    assert_eq!(surface_text(&app), "> 1 + 1\n2\n> ");
}

#[test]
fn test_block_uses_continuation_prompt() {
    let (mut app, mut repl) = window();
    repl.start();

    app.apply(Action::Submit("if (true) {".into()), &mut repl);
    assert_eq!(repl.block_level(), 1);
    app.apply(Action::Submit("print(\"in\")".into()), &mut repl);
    app.apply(Action::Submit("}".into()), &mut repl);

    assert_eq!(repl.block_level(), 0);
    assert_eq!(
        surface_text(&app),
        "> if (true) {\n. print(\"in\")\n. }\nin\n> "
    );
}

#[test]
fn test_host_objects_bound_before_first_line() {
    let (mut app, mut repl) = window();
    repl.start();

    app.apply(Action::Submit("form.title(\"Calc\")".into()), &mut repl);
    app.apply(Action::Submit("form.status(\"ready\")".into()), &mut repl);
    app.apply(Action::Submit("text.append(\"hello \")".into()), &mut repl);

    let window = app.window().borrow().clone();
    assert_eq!(window.title, "Calc");
    assert_eq!(window.status, "ready");
    assert!(surface_text(&app).ends_with("hello > "));
}

#[test]
fn test_bindings_listing() {
    let (mut app, mut repl) = window();
    repl.start();
    app.apply(Action::Submit(":bindings".into()), &mut repl);

    let text = surface_text(&app);
    assert!(text.contains("  form = <Form \"Ripple\">  [title, status, clear, close]\n"));
    assert!(text.contains("  text = <TextBox>  [append, clear, lines]\n"));
}

#[test]
fn test_form_close_ends_event_loop() {
    let (mut app, mut repl) = window();
    repl.start();

    assert!(!app.apply(Action::Submit("form.close()".into()), &mut repl));
    assert_eq!(repl.state(), ReplState::AwaitingInput);
}

#[test]
fn test_exit_command_terminates() {
    let (mut app, mut repl) = window();
    repl.start();

    assert!(!app.apply(Action::Submit("exit".into()), &mut repl));
    assert_eq!(repl.state(), ReplState::Terminated);
}

#[test]
fn test_keys_drive_submission() {
    let (mut app, mut repl) = window();
    repl.start();

    for c in "2 * 21".chars() {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    let action = app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(action, Action::Submit("2 * 21".into()));

    app.apply(action, &mut repl);
    assert_eq!(surface_text(&app), "> 2 * 21\n42\n> ");
}
