use ripple::repl::ReplState;

use crate::common::{output, shell};

#[test]
fn test_session_ends_on_exit() {
    let (mut repl, captured) = shell(&["x = 1", "x + 1", "exit"]);
    repl.run();

    assert_eq!(repl.state(), ReplState::Terminated);
    assert_eq!(output(&captured), "# # 2\n# ");
}

#[test]
fn test_block_continuation() {
    let (mut repl, captured) = shell(&[]);
    repl.start();

    let mut depths = Vec::new();
    for line in ["if (true) {", "doSomething();", "}"] {
        assert_eq!(repl.submit(line), ReplState::AwaitingInput);
        depths.push(repl.block_level());
    }

    assert_eq!(depths, vec![1, 1, 0]);
    assert_eq!(
        output(&captured),
        "# . . error: unknown function 'doSomething'\n# "
    );
}

#[test]
fn test_errors_do_not_stop_the_loop() {
    let (mut repl, captured) = shell(&["1 / 0", "y = 2", "y * 3"]);
    repl.run();

    assert_eq!(
        output(&captured),
        "# error: division by zero\n# # 6\n# "
    );
    assert_eq!(repl.state(), ReplState::Terminated);
}

#[test]
fn test_multi_line_block_runs_once_complete() {
    let (mut repl, captured) = shell(&[
        "n = 0",
        "while (n < 3) {",
        "  print(\"tick\", n)",
        "  n = n + 1",
        "}",
        "n",
    ]);
    repl.run();

    assert_eq!(
        output(&captured),
        "# # . . . tick 0\ntick 1\ntick 2\n# 3\n# "
    );
}

#[test]
fn test_exit_inside_block_discards_it() {
    let (mut repl, captured) = shell(&["if (true) {", "print(1)", "quit", "}"]);
    repl.run();

    assert_eq!(output(&captured), "# . . ");
    assert_eq!(repl.interpreter().session().buffer(), "");
}

#[test]
fn test_clear_meta_command_drops_pending_block() {
    let (mut repl, captured) = shell(&["if (true) {", ":clear", "7"]);
    repl.run();

    assert_eq!(output(&captured), "# . pending input discarded\n# 7\n# ");
}

#[test]
fn test_reset_forgets_variables() {
    let (mut repl, captured) = shell(&["a = 1", ":reset", "a"]);
    repl.run();

    assert_eq!(
        output(&captured),
        "# # environment cleared\n# error: unknown name 'a'\n# "
    );
}

#[test]
fn test_caption_before_first_prompt() {
    let (repl, captured) = shell(&["exit"]);
    let mut repl = repl.with_caption(ripple::caption());
    repl.run();

    let text = output(&captured);
    assert!(text.starts_with("Ripple interactive shell v"));
    assert!(text.ends_with("\n# "));
}

#[test]
fn test_vars_lists_defined_names() {
    let (mut repl, captured) = shell(&[":vars", "b = 1", "a = 2", ":vars"]);
    repl.run();

    assert_eq!(output(&captured), "# nothing defined\n# # # a b\n# ");
}

#[test]
fn test_stats_counts_chunks_and_lines() {
    let (mut repl, captured) = shell(&["if (true) {", "1", "}", ":stats"]);
    repl.run();

    assert_eq!(
        output(&captured),
        "# . . # statements executed: 1, lines read: 4\n# "
    );
}

#[test]
fn test_string_spanning_lines_keeps_colon_line() {
    let (mut repl, captured) = shell(&["s = \"a", ":b\"", "s"]);
    repl.run();

    assert_eq!(output(&captured), "# . # \"a\\n:b\"\n# ");
}

#[test]
fn test_backslash_joins_lines() {
    let (mut repl, captured) = shell(&["x = 1 + \\", "2", "x"]);
    repl.run();

    assert_eq!(output(&captured), "# . # 3\n# ");
}
