//! Block-depth tracking
//!
//! How "complete" is decided belongs to the language, so it is a pluggable
//! [`BlockPolicy`]. Engines pick one and report its answer as their nesting depth.

/// Completeness rule for accumulated input
pub trait BlockPolicy {
    /// Nesting depth of `source`; 0 means complete
    fn depth(
        &self,
        source: &str,
    ) -> usize;
}

/// Counts unclosed `{`, `(` and `[` outside string literals and comments.
///
/// An unterminated string or block comment, or a trailing `\`, keeps the chunk
/// open at depth at least 1. A stray closer makes the chunk complete so the
/// engine gets to report the error instead of the prompt hanging open.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterPolicy;

#[derive(Clone, Copy, PartialEq)]
enum Scan {
    Code,
    Str(char),
    LineComment,
    BlockComment,
}

impl BlockPolicy for DelimiterPolicy {
    fn depth(
        &self,
        source: &str,
    ) -> usize {
        let mut depth = 0usize;
        let mut state = Scan::Code;
        let mut escaped = false;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                Scan::Str(quote) => {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == quote {
                        state = Scan::Code;
                    }
                }
                Scan::LineComment => {
                    if c == '\n' {
                        state = Scan::Code;
                    }
                }
                Scan::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        state = Scan::Code;
                    }
                }
                Scan::Code => match c {
                    '"' | '\'' => state = Scan::Str(c),
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        state = Scan::LineComment;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        state = Scan::BlockComment;
                    }
                    '{' | '(' | '[' => depth += 1,
                    '}' | ')' | ']' => {
                        if depth == 0 {
                            return 0;
                        }
                        depth -= 1;
                    }
                    _ => {}
                },
            }
        }

        let dangling = matches!(state, Scan::Str(_) | Scan::BlockComment)
            || source.trim_end().ends_with('\\');
        if dangling {
            depth.max(1)
        } else {
            depth
        }
    }
}
