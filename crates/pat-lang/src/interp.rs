//! Tree-walking interpreter.
//!
//! The interpreter owns the variable store and nothing else: output goes
//! through an injected `fmt::Write` sink, and `ask` statements resolve
//! through an injected [`InputProvider`]. The caller decides what those
//! seams are - the studio wires a modal prompt and a capture buffer, tests
//! wire closures and plain `String`s.

use std::collections::HashMap;
use std::fmt;

use crate::ast::{Expr, ExprKind, Literal, Stmt};
use crate::error::RuntimeError;
use crate::value::Value;

/// Resolves an `ask` statement's input request to raw text.
///
/// Exactly one request is in flight at a time; the call blocks the run
/// until text is available. A dismissed request resolves to the empty
/// string - that is the provider's concern, not the interpreter's.
pub trait InputProvider {
    fn request(&mut self, name: &str) -> String;
}

impl<F: FnMut(&str) -> String> InputProvider for F {
    fn request(&mut self, name: &str) -> String {
        self(name)
    }
}

/// Interpreter state for one run.
pub struct Interpreter<'a> {
    vars: HashMap<String, Value>,
    out: &'a mut dyn fmt::Write,
    input: &'a mut dyn InputProvider,
    steps: u64,
    max_steps: u64,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        out: &'a mut dyn fmt::Write,
        input: &'a mut dyn InputProvider,
        max_steps: u64,
    ) -> Self {
        Self {
            vars: HashMap::new(),
            out,
            input,
            steps: 0,
            max_steps,
        }
    }

    /// Execute every top-level statement in order.
    pub fn run(&mut self, program: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in program {
            self.exec(stmt)?;
        }
        Ok(())
    }

    /// The variable store, keyed by name. Mutated directly by `ask` and
    /// binding statements; last write wins.
    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.vars
    }

    fn tick(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.max_steps {
            return Err(RuntimeError::StepLimit(self.max_steps));
        }
        Ok(())
    }

    fn exec(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        self.tick()?;
        match stmt {
            Stmt::Plot { value, .. } => {
                let value = self.eval(value)?;
                writeln!(self.out, "{}", value)?;
                Ok(())
            }
            Stmt::Ask { name, .. } => {
                let text = self.input.request(name);
                self.vars.insert(name.clone(), Value::from_input(&text));
                Ok(())
            }
            Stmt::Bind { value, name, .. } => {
                let value = self.eval(value)?;
                self.vars.insert(name.clone(), value);
                Ok(())
            }
            Stmt::Loop {
                var,
                from,
                to,
                body,
                ..
            } => {
                let from = self.eval_int(from)?;
                let to = self.eval_int(to)?;
                let mut i = from;
                while i < to {
                    self.tick()?;
                    self.vars.insert(var.clone(), Value::Int(i));
                    for stmt in body {
                        self.exec(stmt)?;
                    }
                    i += 1;
                }
                Ok(())
            }
            Stmt::Check {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let branch = if self.eval(cond)?.is_truthy() {
                    Some(then_body)
                } else {
                    else_body.as_ref()
                };
                if let Some(branch) = branch {
                    for stmt in branch {
                        self.exec(stmt)?;
                    }
                }
                Ok(())
            }
            Stmt::Choose {
                subject,
                arms,
                default,
                ..
            } => {
                let subject = self.eval(subject)?;
                let arm = arms.iter().find(|arm| pattern_matches(&arm.pattern, &subject));
                let body = match arm {
                    Some(arm) => Some(&arm.body),
                    None => default.as_ref(),
                };
                if let Some(body) = body {
                    for stmt in body {
                        self.exec(stmt)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Var(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable(name.clone())),
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                Value::binary(*op, &lhs, &rhs)
            }
        }
    }

    fn eval_int(&mut self, expr: &Expr) -> Result<i64, RuntimeError> {
        match self.eval(expr)? {
            Value::Int(n) => Ok(n),
            Value::Str(_) => Err(RuntimeError::NonIntegerBounds),
        }
    }
}

fn pattern_matches(pattern: &Literal, subject: &Value) -> bool {
    match (pattern, subject) {
        (Literal::Int(a), Value::Int(b)) => a == b,
        (Literal::Str(a), Value::Str(b)) => a == b,
        _ => false,
    }
}
