//! Tree-walking evaluator

use super::builtins;
use super::context::Context;
use super::error::EngineError;
use super::parser::{BinOp, Expr, Stmt, UnaryOp};
use super::value::Value;
use crate::console::Console;

type EvalResult<T> = Result<T, EngineError>;

/// Evaluates statements against a context, writing output to a console
pub struct TreeWalker<'a> {
    ctx: &'a mut Context,
    console: &'a dyn Console,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        ctx: &'a mut Context,
        console: &'a dyn Console,
    ) -> Self {
        Self { ctx, console }
    }

    /// Run top-level statements; non-nil expression results are echoed
    pub fn run(
        &mut self,
        stmts: &[Stmt],
    ) -> EvalResult<()> {
        for stmt in stmts {
            if let Stmt::Expr(expr) = stmt {
                let value = self.eval(expr)?;
                if !matches!(value, Value::Nil) {
                    self.console.writeln(&value.repr());
                }
            } else {
                self.exec(stmt)?;
            }
        }
        Ok(())
    }

    fn exec_block(
        &mut self,
        stmts: &[Stmt],
    ) -> EvalResult<()> {
        stmts.iter().try_for_each(|stmt| self.exec(stmt))
    }

    fn exec(
        &mut self,
        stmt: &Stmt,
    ) -> EvalResult<()> {
        match stmt {
            Stmt::Assign(name, expr) => {
                let value = self.eval(expr)?;
                self.ctx.define_var(name, value);
            }
            Stmt::Expr(expr) => {
                self.eval(expr)?;
            }
            Stmt::If(cond, then_branch, else_branch) => {
                if self.eval(cond)?.is_truthy() {
                    self.exec_block(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch)?;
                }
            }
            Stmt::While(cond, body) => {
                while self.eval(cond)?.is_truthy() {
                    self.exec_block(body)?;
                }
            }
            Stmt::Block(stmts) => self.exec_block(stmts)?,
        }
        Ok(())
    }

    fn eval(
        &mut self,
        expr: &Expr,
    ) -> EvalResult<Value> {
        match expr {
            Expr::Int(i) => Ok(Value::Int(*i)),
            Expr::Float(x) => Ok(Value::Float(*x)),
            Expr::Str(s) => Ok(Value::str(s.as_str())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Nil => Ok(Value::Nil),
            Expr::Var(name) => self
                .ctx
                .get_var(name)
                .cloned()
                .ok_or_else(|| EngineError::runtime(format!("unknown name '{}'", name))),
            Expr::Unary(op, operand) => {
                let value = self.eval(operand)?;
                unary(*op, value)
            }
            Expr::Binary(left, BinOp::And, right) => {
                let left = self.eval(left)?.is_truthy();
                Ok(Value::Bool(left && self.eval(right)?.is_truthy()))
            }
            Expr::Binary(left, BinOp::Or, right) => {
                let left = self.eval(left)?.is_truthy();
                Ok(Value::Bool(left || self.eval(right)?.is_truthy()))
            }
            Expr::Binary(left, op, right) => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*op, left, right)
            }
            Expr::Call(name, args) => {
                let args = self.eval_args(args)?;
                builtins::call(name, &args, self.console)
            }
            Expr::Method(target, method, args) => {
                let target = self.eval(target)?;
                let args = self.eval_args(args)?;
                call_method(&target, method, &args)
            }
        }
    }

    fn eval_args(
        &mut self,
        args: &[Expr],
    ) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }
}

fn call_method(
    target: &Value,
    method: &str,
    args: &[Value],
) -> EvalResult<Value> {
    let Value::Host(host) = target else {
        return Err(EngineError::runtime(format!(
            "{} has no method '{}'",
            target.type_name(),
            method
        )));
    };

    let data = args
        .iter()
        .map(|arg| {
            arg.to_host_data().ok_or_else(|| {
                EngineError::runtime(format!(
                    "cannot pass {} to {}.{}",
                    arg.type_name(),
                    host.type_name(),
                    method
                ))
            })
        })
        .collect::<EvalResult<Vec<_>>>()?;

    Ok(host.invoke(method, &data)?.into())
}

fn unary(
    op: UnaryOp,
    value: Value,
) -> EvalResult<Value> {
    match (op, value) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EngineError::runtime("integer overflow")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Neg, v) => Err(EngineError::runtime(format!(
            "cannot negate {}",
            v.type_name()
        ))),
    }
}

fn binary(
    op: BinOp,
    left: Value,
    right: Value,
) -> EvalResult<Value> {
    match op {
        BinOp::Eq => return Ok(Value::Bool(left == right)),
        BinOp::Ne => return Ok(Value::Bool(left != right)),
        BinOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            return Ok(Value::str(format!("{}{}", left, right)));
        }
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => return compare(op, &left, &right),
        _ => {}
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => int_arith(op, *a, *b),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            float_arith(op, as_float(&left), as_float(&right))
        }
        _ => Err(type_mismatch(op, &left, &right)),
    }
}

fn int_arith(
    op: BinOp,
    a: i64,
    b: i64,
) -> EvalResult<Value> {
    if matches!(op, BinOp::Div | BinOp::Rem) && b == 0 {
        return Err(EngineError::runtime("division by zero"));
    }
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => a.checked_div(b),
        BinOp::Rem => a.checked_rem(b),
        _ => None,
    };
    result
        .map(Value::Int)
        .ok_or_else(|| EngineError::runtime("integer overflow"))
}

fn float_arith(
    op: BinOp,
    a: f64,
    b: f64,
) -> EvalResult<Value> {
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div if b == 0.0 => return Err(EngineError::runtime("division by zero")),
        BinOp::Div => a / b,
        BinOp::Rem if b == 0.0 => return Err(EngineError::runtime("division by zero")),
        BinOp::Rem => a % b,
        _ => return Err(EngineError::runtime("invalid numeric operation")),
    };
    Ok(Value::Float(result))
}

fn compare(
    op: BinOp,
    left: &Value,
    right: &Value,
) -> EvalResult<Value> {
    use std::cmp::Ordering;

    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            as_float(left).partial_cmp(&as_float(right))
        }
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(type_mismatch(op, left, right)),
    };

    // NaN compares false every way
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinOp::Lt => ordering == Ordering::Less,
        BinOp::Le => ordering != Ordering::Greater,
        BinOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

fn as_float(value: &Value) -> f64 {
    match value {
        Value::Int(i) => *i as f64,
        Value::Float(x) => *x,
        _ => f64::NAN,
    }
}

fn type_mismatch(
    op: BinOp,
    left: &Value,
    right: &Value,
) -> EngineError {
    let symbol = match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Rem => "%",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
    };
    EngineError::runtime(format!(
        "cannot apply '{}' to {} and {}",
        symbol,
        left.type_name(),
        right.type_name()
    ))
}
