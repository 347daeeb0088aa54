//! AST-level optimizer: constant folding and dead-branch elimination.
//!
//! Folding reuses the runtime's own operator semantics ([`Value::binary`]),
//! so a folded program can never produce a different value than the
//! unfolded one. Two runtime failures get special handling at fold time:
//! integer overflow in a constant expression is reported as an
//! [`OptimizationError`], while constant division by zero and constant type
//! mismatches are deliberately left un-folded for the runtime to report
//! through its own error taxonomy.

use crate::ast::{ChooseArm, Expr, ExprKind, Stmt};
use crate::error::{OptimizationError, RuntimeError};
use crate::value::Value;

/// Fold a whole program, consuming the input AST.
pub fn optimize(program: Vec<Stmt>) -> Result<Vec<Stmt>, OptimizationError> {
    fold_block(program)
}

fn fold_block(block: Vec<Stmt>) -> Result<Vec<Stmt>, OptimizationError> {
    let mut folded = Vec::with_capacity(block.len());
    for stmt in block {
        folded.extend(fold_stmt(stmt)?);
    }
    Ok(folded)
}

/// Fold one statement. A `check` with a constant condition dissolves into
/// its surviving branch, so the result is zero or more statements.
fn fold_stmt(stmt: Stmt) -> Result<Vec<Stmt>, OptimizationError> {
    match stmt {
        Stmt::Plot { value, span } => Ok(vec![Stmt::Plot {
            value: fold_expr(value)?,
            span,
        }]),
        Stmt::Ask { .. } => Ok(vec![stmt]),
        Stmt::Bind { value, name, span } => Ok(vec![Stmt::Bind {
            value: fold_expr(value)?,
            name,
            span,
        }]),
        Stmt::Loop {
            var,
            from,
            to,
            body,
            span,
        } => Ok(vec![Stmt::Loop {
            var,
            from: fold_expr(from)?,
            to: fold_expr(to)?,
            body: fold_block(body)?,
            span,
        }]),
        Stmt::Check {
            cond,
            then_body,
            else_body,
            span,
        } => {
            let cond = fold_expr(cond)?;
            match literal_value(&cond) {
                Some(value) if value.is_truthy() => fold_block(then_body),
                Some(_) => match else_body {
                    Some(else_body) => fold_block(else_body),
                    None => Ok(Vec::new()),
                },
                None => Ok(vec![Stmt::Check {
                    cond,
                    then_body: fold_block(then_body)?,
                    else_body: else_body.map(fold_block).transpose()?,
                    span,
                }]),
            }
        }
        Stmt::Choose {
            subject,
            arms,
            default,
            span,
        } => {
            let arms = arms
                .into_iter()
                .map(|arm| {
                    Ok(ChooseArm {
                        pattern: arm.pattern,
                        body: fold_block(arm.body)?,
                        span: arm.span,
                    })
                })
                .collect::<Result<Vec<_>, OptimizationError>>()?;
            Ok(vec![Stmt::Choose {
                subject: fold_expr(subject)?,
                arms,
                default: default.map(fold_block).transpose()?,
                span,
            }])
        }
    }
}

fn fold_expr(expr: Expr) -> Result<Expr, OptimizationError> {
    let Expr { kind, span } = expr;
    match kind {
        ExprKind::Int(_) | ExprKind::Str(_) | ExprKind::Var(_) => Ok(Expr { kind, span }),
        ExprKind::Binary { op, lhs, rhs } => {
            let lhs = fold_expr(*lhs)?;
            let rhs = fold_expr(*rhs)?;
            if let (Some(a), Some(b)) = (literal_value(&lhs), literal_value(&rhs)) {
                match Value::binary(op, &a, &b) {
                    Ok(Value::Int(n)) => {
                        return Ok(Expr {
                            kind: ExprKind::Int(n),
                            span,
                        });
                    }
                    Ok(Value::Str(s)) => {
                        return Ok(Expr {
                            kind: ExprKind::Str(s),
                            span,
                        });
                    }
                    Err(RuntimeError::Overflow) => return Err(OptimizationError::Overflow),
                    // Leave the expression for the runtime to report.
                    Err(_) => {}
                }
            }
            Ok(Expr {
                kind: ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            })
        }
    }
}

fn literal_value(expr: &Expr) -> Option<Value> {
    match &expr.kind {
        ExprKind::Int(n) => Some(Value::Int(*n)),
        ExprKind::Str(s) => Some(Value::Str(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn folded(source: &str) -> Vec<Stmt> {
        optimize(parse(source).unwrap()).unwrap()
    }

    fn plot_value(stmt: &Stmt) -> &Expr {
        match stmt {
            Stmt::Plot { value, .. } => value,
            other => panic!("expected plot, got {:?}", other),
        }
    }

    #[test]
    fn folds_integer_arithmetic() {
        let program = folded("plot 2 + 3 * 4:");
        assert_eq!(plot_value(&program[0]).kind, ExprKind::Int(14));
    }

    #[test]
    fn folds_string_concatenation() {
        let program = folded("plot \"Hello \" ~ \"World\":");
        assert_eq!(
            plot_value(&program[0]).kind,
            ExprKind::Str("Hello World".into())
        );
    }

    #[test]
    fn folds_comparisons_to_zero_or_one() {
        let program = folded("plot 3 > 2:");
        assert_eq!(plot_value(&program[0]).kind, ExprKind::Int(1));
    }

    #[test]
    fn variables_block_folding() {
        let program = folded("plot x + 1:");
        assert!(matches!(
            plot_value(&program[0]).kind,
            ExprKind::Binary { .. }
        ));
    }

    #[test]
    fn constant_true_check_keeps_then_branch() {
        let program = folded("check 1 { plot 1: } else { plot 2: }");
        assert_eq!(program.len(), 1);
        assert_eq!(plot_value(&program[0]).kind, ExprKind::Int(1));
    }

    #[test]
    fn constant_false_check_without_else_vanishes() {
        let program = folded("check 0 { plot 1: }");
        assert!(program.is_empty());
    }

    #[test]
    fn constant_false_check_keeps_else_branch() {
        let program = folded("check 2 > 5 { plot 1: } else { plot 2: }");
        assert_eq!(program.len(), 1);
        assert_eq!(plot_value(&program[0]).kind, ExprKind::Int(2));
    }

    #[test]
    fn division_by_constant_zero_is_left_for_the_runtime() {
        let program = folded("plot 1 / 0:");
        assert!(matches!(
            plot_value(&program[0]).kind,
            ExprKind::Binary { .. }
        ));
    }

    #[test]
    fn constant_overflow_is_reported() {
        let program = parse(&format!("plot {} + 1:", i64::MAX)).unwrap();
        assert_eq!(optimize(program), Err(OptimizationError::Overflow));
    }

    #[test]
    fn folds_inside_loops_and_choose() {
        let program = folded("loop i in 0..2+3 { choose i { 1 -> { plot 2*2: } } }");
        match &program[0] {
            Stmt::Loop { to, body, .. } => {
                assert_eq!(to.kind, ExprKind::Int(5));
                match &body[0] {
                    Stmt::Choose { arms, .. } => {
                        assert_eq!(plot_value(&arms[0].body[0]).kind, ExprKind::Int(4));
                    }
                    other => panic!("expected choose, got {:?}", other),
                }
            }
            other => panic!("expected loop, got {:?}", other),
        }
    }
}
