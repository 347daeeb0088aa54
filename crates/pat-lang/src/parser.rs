//! Recursive descent parser for PatternScript.
//!
//! Grammar, statements first:
//!
//! ```text
//! program   := stmt*
//! stmt      := "plot" expr ":"
//!            | "ask" IDENT ":"
//!            | expr "->" IDENT ":"
//!            | "loop" IDENT "in" expr ".." expr block
//!            | "check" expr block ("else" block)?
//!            | "choose" expr "{" arm* ("default" "->" block)? "}"
//! arm       := literal "->" block
//! block     := "{" stmt* "}"
//! expr      := concat
//! concat    := cmp ("~" cmp)*
//! cmp       := add (("<"|">"|"<="|">="|"=="|"!=") add)*
//! add       := mul (("+"|"-") mul)*
//! mul       := primary (("*"|"/") primary)*
//! primary   := INT | STRING | IDENT | "(" expr ")"
//! ```

use crate::ast::{BinOp, ChooseArm, Expr, ExprKind, Literal, Span, Stmt};
use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// Parse a token stream into top-level statements.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, SyntaxError> {
    let mut parser = Parser { tokens, pos: 0 };
    let mut program = Vec::new();
    while !parser.at(&TokenKind::Eof) {
        program.push(parser.stmt()?);
    }
    Ok(program)
}

impl Parser {
    fn peek(&self) -> &Token {
        // The token stream always ends with Eof, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, SyntaxError> {
        if self.at(&kind) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!(
                "expected {} {}, found {}",
                kind.describe(),
                context,
                self.peek().kind.describe(),
            )))
        }
    }

    fn error_here(&self, message: String) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(message, token.line, token.col)
    }

    fn expect_ident(&mut self, context: &str) -> Result<(String, Span), SyntaxError> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                let token = self.bump();
                Ok((name, token.span))
            }
            other => Err(self.error_here(format!(
                "expected a variable name {}, found {}",
                context,
                other.describe(),
            ))),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn stmt(&mut self) -> Result<Stmt, SyntaxError> {
        match self.peek().kind {
            TokenKind::Plot => self.plot_stmt(),
            TokenKind::Ask => self.ask_stmt(),
            TokenKind::Loop => self.loop_stmt(),
            TokenKind::Check => self.check_stmt(),
            TokenKind::Choose => self.choose_stmt(),
            _ => self.bind_stmt(),
        }
    }

    fn plot_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.bump().span;
        let value = self.expr()?;
        let end = self.expect(TokenKind::Colon, "after 'plot' expression")?.span;
        Ok(Stmt::Plot {
            value,
            span: start.merge(end),
        })
    }

    fn ask_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.bump().span;
        let (name, _) = self.expect_ident("after 'ask'")?;
        let end = self.expect(TokenKind::Colon, "after 'ask' variable")?.span;
        Ok(Stmt::Ask {
            name,
            span: start.merge(end),
        })
    }

    fn bind_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let value = self.expr()?;
        self.expect(TokenKind::Arrow, "after expression in a binding")?;
        let (name, _) = self.expect_ident("after '->'")?;
        let end = self.expect(TokenKind::Colon, "after binding target")?.span;
        let span = value.span.merge(end);
        Ok(Stmt::Bind { value, name, span })
    }

    fn loop_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.bump().span;
        let (var, _) = self.expect_ident("after 'loop'")?;
        self.expect(TokenKind::In, "after loop variable")?;
        let from = self.expr()?;
        self.expect(TokenKind::DotDot, "in loop range")?;
        let to = self.expr()?;
        let (body, end) = self.block("loop body")?;
        Ok(Stmt::Loop {
            var,
            from,
            to,
            body,
            span: start.merge(end),
        })
    }

    fn check_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.bump().span;
        let cond = self.expr()?;
        let (then_body, mut end) = self.block("check body")?;
        let else_body = if self.eat(&TokenKind::Else) {
            let (body, else_end) = self.block("else body")?;
            end = else_end;
            Some(body)
        } else {
            None
        };
        Ok(Stmt::Check {
            cond,
            then_body,
            else_body,
            span: start.merge(end),
        })
    }

    fn choose_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.bump().span;
        let subject = self.expr()?;
        self.expect(TokenKind::LBrace, "to open 'choose' arms")?;
        let mut arms = Vec::new();
        let mut default = None;
        loop {
            if self.at(&TokenKind::RBrace) {
                break;
            }
            if self.eat(&TokenKind::Default) {
                self.expect(TokenKind::Arrow, "after 'default'")?;
                let (body, _) = self.block("default body")?;
                default = Some(body);
                // default closes the arm list; only '}' may follow.
                break;
            }
            arms.push(self.choose_arm()?);
        }
        let end = self.expect(TokenKind::RBrace, "to close 'choose'")?.span;
        Ok(Stmt::Choose {
            subject,
            arms,
            default,
            span: start.merge(end),
        })
    }

    fn choose_arm(&mut self) -> Result<ChooseArm, SyntaxError> {
        let token = self.peek().clone();
        let pattern = match token.kind {
            TokenKind::Int(n) => {
                self.bump();
                Literal::Int(n)
            }
            TokenKind::Str(s) => {
                self.bump();
                Literal::Str(s)
            }
            other => {
                return Err(self.error_here(format!(
                    "expected a literal 'choose' pattern, found {}",
                    other.describe(),
                )));
            }
        };
        self.expect(TokenKind::Arrow, "after 'choose' pattern")?;
        let (body, end) = self.block("choose arm body")?;
        Ok(ChooseArm {
            pattern,
            body,
            span: token.span.merge(end),
        })
    }

    /// Parse `{ stmt* }`, returning the statements and the closing brace span.
    fn block(&mut self, what: &str) -> Result<(Vec<Stmt>, Span), SyntaxError> {
        self.expect(TokenKind::LBrace, &format!("to open {}", what))?;
        let mut body = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            if self.at(&TokenKind::Eof) {
                return Err(self.error_here(format!("unclosed brace in {}", what)));
            }
            body.push(self.stmt()?);
        }
        let end = self.bump().span;
        Ok((body, end))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self) -> Result<Expr, SyntaxError> {
        self.concat()
    }

    fn concat(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.cmp()?;
        while self.eat(&TokenKind::Tilde) {
            let rhs = self.cmp()?;
            lhs = binary(BinOp::Concat, lhs, rhs);
        }
        Ok(lhs)
    }

    fn cmp(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.add()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Ge => BinOp::Ge,
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::Ne => BinOp::Ne,
                _ => break,
            };
            self.bump();
            let rhs = self.add()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn add(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.mul()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.mul()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn mul(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.primary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.primary()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int(n) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Int(n),
                    span: token.span,
                })
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Str(s),
                    span: token.span,
                })
            }
            TokenKind::Ident(name) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Var(name),
                    span: token.span,
                })
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.expr()?;
                let end = self.expect(TokenKind::RParen, "to close '('")?.span;
                Ok(Expr {
                    span: token.span.merge(end),
                    ..inner
                })
            }
            other => Err(self.error_here(format!(
                "expected an expression, found {}",
                other.describe(),
            ))),
        }
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.merge(rhs.span);
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    }
}
