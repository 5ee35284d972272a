//! REPL 单元测试
//!
//! The engine here is a recording mock: depth comes from the delimiter policy,
//! and executing a chunk writes `ok` when every identifier it uses is known.

use std::any::Any;
use std::cell::RefCell;
use std::io::{Cursor, Write};
use std::rc::Rc;

use proptest::prelude::*;

use crate::console::{Console, SharedConsole, StreamConsole};
use crate::repl::{
    BlockPolicy, DelimiterPolicy, Evaluator, HostData, HostError, HostObject, HostRef,
    Interpreter, Prompts, Repl, ReplState,
};

#[derive(Debug, Default)]
struct MockEngine {
    executed: Vec<String>,
    bound: Vec<String>,
    defined: Vec<String>,
    resets: usize,
}

impl Evaluator for MockEngine {
    fn nesting_depth(
        &self,
        source: &str,
    ) -> usize {
        DelimiterPolicy.depth(source)
    }

    fn execute(
        &mut self,
        source: &str,
        console: &dyn Console,
    ) {
        self.executed.push(source.to_string());
        let source = source.trim();
        if let Some((name, _)) = source.split_once('=') {
            self.defined.push(name.trim().to_string());
            return;
        }
        let ident: String = source
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if self.bound.contains(&ident) || self.defined.contains(&ident) {
            console.writeln("ok");
        } else {
            console.writeln(&format!("error: unknown name '{}'", ident));
        }
    }

    fn bind(
        &mut self,
        name: &str,
        _value: HostRef,
    ) {
        self.bound.push(name.to_string());
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.bound.clear();
        self.defined.clear();
    }
}

#[derive(Debug)]
struct Gadget;

impl HostObject for Gadget {
    fn type_name(&self) -> &'static str {
        "Gadget"
    }

    fn methods(&self) -> &'static [&'static str] {
        &["spin"]
    }

    fn invoke(
        &self,
        method: &str,
        _args: &[HostData],
    ) -> Result<HostData, HostError> {
        Err(HostError::UnknownMethod {
            type_name: self.type_name().to_string(),
            method: method.to_string(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Writer shared between the test and the console
#[derive(Clone, Default)]
struct Captured(Rc<RefCell<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Captured {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn console(input: &[&str]) -> (SharedConsole, Captured) {
    let captured = Captured::default();
    let mut text = input.join("\n");
    if !input.is_empty() {
        text.push('\n');
    }
    let console: SharedConsole = Rc::new(StreamConsole::new(
        Cursor::new(text.into_bytes()),
        captured.clone(),
    ));
    (console, captured)
}

fn interpreter() -> (Interpreter<MockEngine>, Captured) {
    let (console, captured) = console(&[]);
    (Interpreter::new(console, MockEngine::default()), captured)
}

#[test]
fn test_single_line_statements_stay_at_depth_zero() {
    let (mut interp, _) = interpreter();
    for line in ["x = 1", "y = 2", "x", "print(x)"] {
        assert!(interp.process_line(Some(line)));
        assert_eq!(interp.block_level(), 0);
    }
    assert_eq!(interp.engine().executed.len(), 4);
}

#[test]
fn test_block_is_buffered_until_closed() {
    let (mut interp, _) = interpreter();
    let mut depths = Vec::new();
    for line in ["if (true) {", "doSomething();", "}"] {
        assert!(interp.process_line(Some(line)));
        depths.push(interp.block_level());
    }
    assert_eq!(depths, vec![1, 1, 0]);
    assert_eq!(
        interp.engine().executed,
        vec!["if (true) {\ndoSomething();\n}\n".to_string()]
    );
    assert_eq!(interp.session().buffer(), "");
}

#[test]
fn test_exit_ends_session_with_pending_buffer() {
    let (mut interp, _) = interpreter();
    assert!(interp.process_line(Some("while (x) {")));
    assert_eq!(interp.block_level(), 1);
    assert!(!interp.process_line(Some("exit")));
    assert_eq!(interp.block_level(), 0);
    assert!(interp.engine().executed.is_empty());
}

#[test]
fn test_end_of_input_ends_session() {
    let (mut interp, _) = interpreter();
    assert!(interp.process_line(Some("{")));
    assert!(!interp.process_line(None));
}

#[test]
fn test_custom_exit_commands() {
    let (console, _) = console(&[]);
    let mut interp =
        Interpreter::with_exit_commands(console, MockEngine::default(), vec!["bye".to_string()]);
    assert!(interp.process_line(Some("exit = 3")));
    assert!(!interp.process_line(Some("  bye  ")));
}

#[test]
fn test_blank_lines_at_top_level_are_ignored() {
    let (mut interp, _) = interpreter();
    assert!(interp.process_line(Some("   ")));
    assert!(interp.engine().executed.is_empty());

    assert!(interp.process_line(Some("f(")));
    assert!(interp.process_line(Some("")));
    assert_eq!(interp.session().buffer(), "f(\n\n");
}

#[test]
fn test_engine_error_does_not_stop_session() {
    let (mut interp, captured) = interpreter();
    assert!(interp.process_line(Some("nope + 1")));
    assert_eq!(interp.block_level(), 0);
    assert!(interp.process_line(Some("x = 1")));
    assert!(captured.text().contains("error: unknown name 'nope'"));
}

#[test]
fn test_stray_closer_is_handed_to_engine() {
    let (mut interp, _) = interpreter();
    assert!(interp.process_line(Some("}")));
    assert_eq!(interp.block_level(), 0);
    assert_eq!(interp.engine().executed, vec!["}\n".to_string()]);
}

#[test]
fn test_bind_reaches_engine_before_any_line() {
    let (mut interp, captured) = interpreter();
    interp.bind("gadget", Rc::new(Gadget));
    assert_eq!(interp.engine().bound, vec!["gadget".to_string()]);

    assert!(interp.process_line(Some("gadget.spin()")));
    assert_eq!(captured.text(), "ok\n");
    assert!(interp.session().bindings().contains_key("gadget"));
}

#[test]
fn test_rebinding_replaces_value() {
    let (mut interp, _) = interpreter();
    interp.bind("g", Rc::new(Gadget));
    interp.bind("g", Rc::new(Gadget));
    assert_eq!(interp.session().bindings().len(), 1);
}

#[test]
fn test_missing_include_file_is_not_fatal() {
    let (mut interp, captured) = interpreter();
    let dir = tempfile::tempdir().unwrap();
    interp.read_include_file(&dir.path().join("absent.rpl"));
    assert_eq!(captured.text(), "");

    assert!(interp.process_line(Some("x = 1")));
    assert_eq!(interp.engine().executed.len(), 1);
}

#[test]
fn test_unreadable_include_is_reported() {
    let (mut interp, captured) = interpreter();
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file
    interp.read_include_file(dir.path());
    assert!(captured.text().contains("cannot read definitions file"));
    assert!(interp.process_line(Some("x = 1")));
}

#[test]
fn test_include_file_uses_line_path() {
    let (mut interp, _) = interpreter();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "x = 1").unwrap();
    writeln!(file, "if (x) {{").unwrap();
    writeln!(file, "  y = 2").unwrap();
    writeln!(file, "}}").unwrap();

    let count = interp.load_include(file.path()).unwrap();
    assert_eq!(count, 4);
    assert_eq!(interp.engine().executed.len(), 2);
    assert_eq!(interp.block_level(), 0);
}

#[test]
fn test_include_unterminated_block_is_discarded() {
    let (mut interp, captured) = interpreter();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "if (x) {{").unwrap();

    interp.read_include_file(file.path());
    assert_eq!(interp.block_level(), 0);
    assert!(interp.engine().executed.is_empty());
    assert!(captured.text().contains("unterminated block"));
}

#[test]
fn test_exit_in_include_stops_file_only() {
    let (mut interp, _) = interpreter();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "a = 1\nexit\nb = 2").unwrap();

    assert_eq!(interp.load_include(file.path()).unwrap(), 2);
    assert_eq!(interp.engine().executed, vec!["a = 1\n".to_string()]);
    assert!(interp.process_line(Some("c = 3")));
}

#[test]
fn test_default_include_file_uses_engine_name() {
    let (interp, _) = interpreter();
    let path = interp.default_include_file();
    if std::env::var("RIPPLE_INIT").is_err() {
        assert!(path.ends_with("init.rpl"));
    }
}

#[test]
fn test_meta_commands() {
    let (mut interp, captured) = interpreter();
    assert!(interp.process_line(Some(":help")));
    assert!(captured.text().contains(":clear"));

    assert!(interp.process_line(Some("f(")));
    assert!(interp.process_line(Some(":clear")));
    assert_eq!(interp.block_level(), 0);
    assert!(interp.engine().executed.is_empty());

    assert!(interp.process_line(Some(":nonsense")));
    assert!(captured.text().contains("unknown command: :nonsense"));
}

#[test]
fn test_colon_lines_inside_block_are_input() {
    let (mut interp, captured) = interpreter();
    assert!(interp.process_line(Some("{")));
    assert!(interp.process_line(Some(":b")));
    assert_eq!(interp.block_level(), 1);
    assert!(interp.process_line(Some("}")));

    assert_eq!(interp.engine().executed, vec!["{\n:b\n}\n".to_string()]);
    assert!(!captured.text().contains("unknown command"));

    assert!(interp.process_line(Some("{")));
    assert!(interp.process_line(Some("  :c")));
    assert_eq!(interp.block_level(), 0);
    assert_eq!(interp.engine().executed.len(), 1);
}

#[test]
fn test_bindings_listing() {
    let (mut interp, captured) = interpreter();
    assert!(interp.process_line(Some(":bindings")));
    assert!(captured.text().contains("no host bindings"));

    interp.bind("gadget", Rc::new(Gadget));
    assert!(interp.process_line(Some(":bindings")));
    assert!(captured.text().contains("gadget = <Gadget>  [spin]"));
}

#[test]
fn test_reset_rebinds_host_objects() {
    let (mut interp, _) = interpreter();
    interp.bind("gadget", Rc::new(Gadget));
    assert!(interp.process_line(Some("x = 1")));
    assert!(interp.process_line(Some(":reset")));

    let engine = interp.engine();
    assert_eq!(engine.resets, 1);
    assert!(engine.defined.is_empty());
    assert_eq!(engine.bound, vec!["gadget".to_string()]);
}

#[test]
fn test_stats_counts_statements() {
    let (mut interp, captured) = interpreter();
    interp.process_line(Some("x = 1"));
    interp.process_line(Some("{"));
    interp.process_line(Some("}"));
    interp.process_line(Some(":stats"));
    assert!(captured.text().contains("statements executed: 2, lines read: 4"));
}

#[test]
fn test_prompts_select() {
    let prompts = Prompts::new("# ", ". ");
    assert_eq!(prompts.select(0), "# ");
    assert_eq!(prompts.select(1), ". ");
    assert_eq!(prompts.select(7), ". ");
    assert_eq!(Prompts::default(), prompts);
}

#[test]
fn test_run_prompts_primary_then_terminates() {
    let (console, captured) = console(&["x = 1", "x + 1", "exit"]);
    let interp = Interpreter::new(console.clone(), MockEngine::default());
    let mut repl = Repl::new(console, interp, Prompts::new("# ", ". "));

    repl.run();
    assert_eq!(repl.state(), ReplState::Terminated);
    assert_eq!(captured.text(), "# # ok\n# ");
    assert_eq!(repl.interpreter().engine().executed.len(), 2);
}

#[test]
fn test_run_stops_at_end_of_stream() {
    let (console, captured) = console(&["x = 1"]);
    let interp = Interpreter::new(console.clone(), MockEngine::default());
    let mut repl = Repl::new(console, interp, Prompts::new("# ", ". ")).with_caption("hello");

    repl.run();
    assert_eq!(repl.state(), ReplState::Terminated);
    assert_eq!(captured.text(), "hello\n# # ");
}

#[test]
fn test_block_continuation_prompts() {
    let (console, captured) = console(&[]);
    let interp = Interpreter::new(console.clone(), MockEngine::default());
    let mut repl = Repl::new(console, interp, Prompts::new("# ", ". "));
    repl.start();

    let mut depths = Vec::new();
    let mut prompts = Vec::new();
    for line in ["if (true) {", "doSomething();", "}"] {
        let before = captured.text().len();
        assert_eq!(repl.submit(line), ReplState::AwaitingInput);
        depths.push(repl.block_level());
        let written = captured.text()[before..].to_string();
        prompts.push(written.rsplit('\n').next().unwrap_or("").to_string());
    }

    assert_eq!(depths, vec![1, 1, 0]);
    assert_eq!(prompts, vec![". ", ". ", "# "]);
}

#[test]
fn test_terminated_is_terminal() {
    let (console, captured) = console(&[]);
    let interp = Interpreter::new(console.clone(), MockEngine::default());
    let mut repl = Repl::new(console, interp, Prompts::new("# ", ". "));
    repl.start();

    assert_eq!(repl.submit("quit"), ReplState::Terminated);
    let after_quit = captured.text();
    assert_eq!(repl.submit("x = 1"), ReplState::Terminated);
    assert_eq!(repl.step(None), ReplState::Terminated);
    assert_eq!(captured.text(), after_quit);
    assert!(repl.interpreter().engine().executed.is_empty());
}

proptest! {
    #[test]
    fn prop_open_then_close_returns_to_zero(n in 1usize..12) {
        let (mut interp, _) = interpreter();
        let opener = "{".repeat(n);
        prop_assert!(interp.process_line(Some(opener.as_str())));
        prop_assert_eq!(interp.block_level(), n);

        for i in 0..n {
            let alive = interp.process_line(Some("}"));
            prop_assert!(alive);
            if i + 1 < n {
                prop_assert!(interp.block_level() > 0);
            }
        }
        prop_assert_eq!(interp.block_level(), 0);
        prop_assert_eq!(interp.engine().executed.len(), 1);
    }

    #[test]
    fn prop_complete_lines_keep_depth_zero(names in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
        let (mut interp, _) = interpreter();
        for (i, name) in names.iter().enumerate() {
            let line = format!("{} = {}", name, i);
            prop_assert!(interp.process_line(Some(line.as_str())));
            prop_assert_eq!(interp.block_level(), 0);
        }
    }
}
