//! Static reader for Python tool sources.
//!
//! Tool modules are untrusted, so they are parsed but never executed or
//! imported. A file that does not parse as Python is rejected; otherwise the
//! module docstring and the docstring of the `run` entry point are extracted.

use rustpython_parser::ast::{self, Constant, ExceptHandler, Expr, MatchCase, Stmt};
use rustpython_parser::{Parse, ParseError};
use std::collections::VecDeque;

/// Name of the entry point every tool module exposes.
const ENTRY_POINT: &str = "run";

/// A source file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    fn from_parse(source: &str, err: &ParseError) -> Self {
        let offset = usize::from(err.offset).min(source.len());
        let line = source.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        Self {
            line,
            message: err.error.to_string(),
        }
    }
}

/// Documentation extracted from a tool source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutline {
    /// Module-level docstring, cleaned
    pub module_doc: Option<String>,
    /// Docstring of the shallowest `def run`, cleaned
    pub run_doc: Option<String>,
}

/// Parse a Python source file and extract its documentation outline.
pub fn outline(source: &str) -> Result<SourceOutline, SyntaxError> {
    let suite = parse(source)?;
    Ok(SourceOutline {
        module_doc: docstring(&suite),
        run_doc: find_function(&suite, ENTRY_POINT).and_then(docstring),
    })
}

/// Check that a source file parses as Python.
pub fn check(source: &str) -> Result<(), SyntaxError> {
    parse(source).map(|_| ())
}

fn parse(source: &str) -> Result<ast::Suite, SyntaxError> {
    ast::Suite::parse(source, "<tool>").map_err(|e| SyntaxError::from_parse(source, &e))
}

/// Docstring of a block: a leading expression statement holding a plain string.
fn docstring(body: &[Stmt]) -> Option<String> {
    let Some(Stmt::Expr(ast::StmtExpr { value, .. })) = body.first() else {
        return None;
    };
    let Expr::Constant(ast::ExprConstant {
        value: Constant::Str(text),
        ..
    }) = value.as_ref()
    else {
        return None;
    };
    let cleaned = clean_docstring(text);
    (!cleaned.is_empty()).then_some(cleaned)
}

#[derive(Clone, Copy)]
enum Node<'a> {
    Stmt(&'a Stmt),
    Handler(&'a ExceptHandler),
    Case(&'a MatchCase),
}

/// Body of the first function named `name`, searched breadth first.
///
/// Module-level definitions are seen before anything nested in classes or
/// other blocks; within one depth, declaration order wins.
fn find_function<'a>(suite: &'a [Stmt], name: &str) -> Option<&'a [Stmt]> {
    let mut queue: VecDeque<Node<'a>> = suite.iter().map(Node::Stmt).collect();

    while let Some(node) = queue.pop_front() {
        match node {
            Node::Stmt(Stmt::FunctionDef(def)) if def.name.as_str() == name => {
                return Some(&def.body[..]);
            }
            Node::Stmt(Stmt::AsyncFunctionDef(def)) if def.name.as_str() == name => {
                return Some(&def.body[..]);
            }
            _ => queue.extend(children(node)),
        }
    }
    None
}

/// Statement-bearing children of a node, in field order.
fn children(node: Node<'_>) -> Vec<Node<'_>> {
    fn stmts<'a>(blocks: &[&'a [Stmt]]) -> Vec<Node<'a>> {
        blocks.iter().flat_map(|b| b.iter().map(Node::Stmt)).collect()
    }

    match node {
        Node::Stmt(stmt) => match stmt {
            Stmt::FunctionDef(s) => stmts(&[&s.body[..]]),
            Stmt::AsyncFunctionDef(s) => stmts(&[&s.body[..]]),
            Stmt::ClassDef(s) => stmts(&[&s.body[..]]),
            Stmt::For(s) => stmts(&[&s.body[..], &s.orelse[..]]),
            Stmt::AsyncFor(s) => stmts(&[&s.body[..], &s.orelse[..]]),
            Stmt::While(s) => stmts(&[&s.body[..], &s.orelse[..]]),
            Stmt::If(s) => stmts(&[&s.body[..], &s.orelse[..]]),
            Stmt::With(s) => stmts(&[&s.body[..]]),
            Stmt::AsyncWith(s) => stmts(&[&s.body[..]]),
            Stmt::Match(s) => s.cases.iter().map(Node::Case).collect(),
            Stmt::Try(s) => try_children(&s.body, &s.handlers, &s.orelse, &s.finalbody),
            Stmt::TryStar(s) => try_children(&s.body, &s.handlers, &s.orelse, &s.finalbody),
            _ => Vec::new(),
        },
        Node::Handler(ExceptHandler::ExceptHandler(handler)) => stmts(&[&handler.body[..]]),
        Node::Case(case) => stmts(&[&case.body[..]]),
    }
}

fn try_children<'a>(
    body: &'a [Stmt],
    handlers: &'a [ExceptHandler],
    orelse: &'a [Stmt],
    finalbody: &'a [Stmt],
) -> Vec<Node<'a>> {
    body.iter()
        .map(Node::Stmt)
        .chain(handlers.iter().map(Node::Handler))
        .chain(orelse.iter().map(Node::Stmt))
        .chain(finalbody.iter().map(Node::Stmt))
        .collect()
}

/// Normalize docstring indentation the way Python's `inspect.cleandoc` does.
pub fn clean_docstring(raw: &str) -> String {
    let expanded: Vec<String> = raw.split('\n').map(expand_tabs).collect();

    let margin = expanded
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = Vec::with_capacity(expanded.len());
    for (idx, line) in expanded.iter().enumerate() {
        if idx == 0 {
            lines.push(line.trim_start().to_string());
        } else {
            let dedented: String = line.chars().skip(margin).collect();
            lines.push(dedented.trim_end_matches('\r').to_string());
        }
    }

    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let pad = 8 - column % 8;
            out.push_str(&" ".repeat(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
