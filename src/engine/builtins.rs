//! Builtin functions: `print`, `len`, `str`, `type`

use super::error::EngineError;
use super::value::Value;
use crate::console::Console;

/// Call builtin `name`
pub fn call(
    name: &str,
    args: &[Value],
    console: &dyn Console,
) -> Result<Value, EngineError> {
    match name {
        "print" => {
            let text = args
                .iter()
                .map(|arg| arg.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            console.writeln(&text);
            Ok(Value::Nil)
        }
        "len" => match one_arg(name, args)? {
            Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
            other => Err(EngineError::runtime(format!(
                "len() does not accept {}",
                other.type_name()
            ))),
        },
        "str" => Ok(Value::str(one_arg(name, args)?.to_string())),
        "type" => Ok(Value::str(one_arg(name, args)?.type_name())),
        _ => Err(EngineError::runtime(format!("unknown function '{}'", name))),
    }
}

fn one_arg<'v>(
    name: &str,
    args: &'v [Value],
) -> Result<&'v Value, EngineError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EngineError::runtime(format!(
            "{}() expects 1 argument, got {}",
            name,
            args.len()
        ))),
    }
}
