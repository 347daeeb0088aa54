//! Three-address code generation.
//!
//! The generator walks the AST once and emits textual instructions over
//! virtual temporaries `t1, t2, ...` and labels `L1, L2, ...`. The output is
//! purely informational: the interpreter runs the AST directly, and the
//! studio shows these lines in the console as the pipeline's intermediate
//! stage.
//!
//! Instruction forms:
//!
//! ```text
//! t1 = a + b          binary operation
//! x = t1              binding
//! param t1            plot argument
//! call plot, 1        plot invocation
//! ask name            input request
//! ifz t1 goto L1      branch if zero (false)
//! goto L2             unconditional branch
//! L1:                 label
//! ```

use crate::ast::{ChooseArm, Expr, ExprKind, Literal, Stmt};
use crate::error::GenerationError;

/// Emits TAC instruction lines, bounded by an instruction cap.
pub struct TacGenerator {
    lines: Vec<String>,
    next_temp: u32,
    next_label: u32,
    limit: usize,
}

impl TacGenerator {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: Vec::new(),
            next_temp: 0,
            next_label: 0,
            limit,
        }
    }

    /// Generate instructions for a whole program.
    pub fn generate(mut self, program: &[Stmt]) -> Result<Vec<String>, GenerationError> {
        for stmt in program {
            self.gen_stmt(stmt)?;
        }
        Ok(self.lines)
    }

    fn emit(&mut self, line: String) -> Result<(), GenerationError> {
        if self.lines.len() >= self.limit {
            return Err(GenerationError::TooManyInstructions { limit: self.limit });
        }
        self.lines.push(line);
        Ok(())
    }

    fn fresh_temp(&mut self) -> String {
        self.next_temp += 1;
        format!("t{}", self.next_temp)
    }

    fn fresh_label(&mut self) -> String {
        self.next_label += 1;
        format!("L{}", self.next_label)
    }

    fn gen_stmt(&mut self, stmt: &Stmt) -> Result<(), GenerationError> {
        match stmt {
            Stmt::Plot { value, .. } => {
                let operand = self.gen_expr(value)?;
                self.emit(format!("param {}", operand))?;
                self.emit("call plot, 1".to_string())
            }
            Stmt::Ask { name, .. } => self.emit(format!("ask {}", name)),
            Stmt::Bind { value, name, .. } => {
                let operand = self.gen_expr(value)?;
                self.emit(format!("{} = {}", name, operand))
            }
            Stmt::Loop {
                var,
                from,
                to,
                body,
                ..
            } => {
                let from_op = self.gen_expr(from)?;
                let to_op = self.gen_expr(to)?;
                self.emit(format!("{} = {}", var, from_op))?;
                let start = self.fresh_label();
                let end = self.fresh_label();
                self.emit(format!("{}:", start))?;
                let cond = self.fresh_temp();
                self.emit(format!("{} = {} < {}", cond, var, to_op))?;
                self.emit(format!("ifz {} goto {}", cond, end))?;
                for stmt in body {
                    self.gen_stmt(stmt)?;
                }
                let step = self.fresh_temp();
                self.emit(format!("{} = {} + 1", step, var))?;
                self.emit(format!("{} = {}", var, step))?;
                self.emit(format!("goto {}", start))?;
                self.emit(format!("{}:", end))
            }
            Stmt::Check {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let cond_op = self.gen_expr(cond)?;
                let end = self.fresh_label();
                match else_body {
                    Some(else_body) => {
                        let else_label = self.fresh_label();
                        self.emit(format!("ifz {} goto {}", cond_op, else_label))?;
                        for stmt in then_body {
                            self.gen_stmt(stmt)?;
                        }
                        self.emit(format!("goto {}", end))?;
                        self.emit(format!("{}:", else_label))?;
                        for stmt in else_body {
                            self.gen_stmt(stmt)?;
                        }
                    }
                    None => {
                        self.emit(format!("ifz {} goto {}", cond_op, end))?;
                        for stmt in then_body {
                            self.gen_stmt(stmt)?;
                        }
                    }
                }
                self.emit(format!("{}:", end))
            }
            Stmt::Choose {
                subject,
                arms,
                default,
                ..
            } => {
                let subject_op = self.gen_expr(subject)?;
                let end = self.fresh_label();
                for ChooseArm { pattern, body, .. } in arms {
                    let next = self.fresh_label();
                    let matched = self.fresh_temp();
                    self.emit(format!(
                        "{} = {} == {}",
                        matched,
                        subject_op,
                        literal_operand(pattern),
                    ))?;
                    self.emit(format!("ifz {} goto {}", matched, next))?;
                    for stmt in body {
                        self.gen_stmt(stmt)?;
                    }
                    self.emit(format!("goto {}", end))?;
                    self.emit(format!("{}:", next))?;
                }
                if let Some(default) = default {
                    for stmt in default {
                        self.gen_stmt(stmt)?;
                    }
                }
                self.emit(format!("{}:", end))
            }
        }
    }

    /// Generate an expression; returns the operand naming its result.
    fn gen_expr(&mut self, expr: &Expr) -> Result<String, GenerationError> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(n.to_string()),
            ExprKind::Str(s) => Ok(format!("\"{}\"", s)),
            ExprKind::Var(name) => Ok(name.clone()),
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_op = self.gen_expr(lhs)?;
                let rhs_op = self.gen_expr(rhs)?;
                let temp = self.fresh_temp();
                self.emit(format!("{} = {} {} {}", temp, lhs_op, op.symbol(), rhs_op))?;
                Ok(temp)
            }
        }
    }
}

fn literal_operand(literal: &Literal) -> String {
    match literal {
        Literal::Int(n) => n.to_string(),
        Literal::Str(s) => format!("\"{}\"", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn tac_for(source: &str) -> Vec<String> {
        let program = parse(source).unwrap();
        TacGenerator::new(10_000).generate(&program).unwrap()
    }

    #[test]
    fn plot_emits_param_and_call() {
        let tac = tac_for("plot \"Hello \" ~ \"World\":");
        assert_eq!(
            tac,
            vec![
                "t1 = \"Hello \" ~ \"World\"",
                "param t1",
                "call plot, 1",
            ]
        );
    }

    #[test]
    fn ask_emits_ask() {
        assert_eq!(tac_for("ask name:"), vec!["ask name"]);
    }

    #[test]
    fn bind_of_simple_operand_skips_temp() {
        assert_eq!(tac_for("5 -> x:"), vec!["x = 5"]);
    }

    #[test]
    fn loop_emits_labels_and_branches() {
        let tac = tac_for("loop i in 1..3 { plot i: }");
        assert_eq!(
            tac,
            vec![
                "i = 1",
                "L1:",
                "t1 = i < 3",
                "ifz t1 goto L2",
                "param i",
                "call plot, 1",
                "t2 = i + 1",
                "i = t2",
                "goto L1",
                "L2:",
            ]
        );
    }

    #[test]
    fn check_without_else_branches_to_end() {
        let tac = tac_for("check x > 2 { plot x: }");
        assert_eq!(
            tac,
            vec![
                "t1 = x > 2",
                "ifz t1 goto L1",
                "param x",
                "call plot, 1",
                "L1:",
            ]
        );
    }

    #[test]
    fn choose_tests_arms_in_order() {
        let tac = tac_for("choose x { 1 -> { plot 1: } default -> { plot 0: } }");
        assert_eq!(
            tac,
            vec![
                "t1 = x == 1",
                "ifz t1 goto L2",
                "param 1",
                "call plot, 1",
                "goto L1",
                "L2:",
                "param 0",
                "call plot, 1",
                "L1:",
            ]
        );
    }

    #[test]
    fn instruction_cap_is_enforced() {
        let program = parse("plot 1 + 2 + 3:").unwrap();
        let err = TacGenerator::new(2).generate(&program).unwrap_err();
        assert_eq!(err, GenerationError::TooManyInstructions { limit: 2 });
    }
}
