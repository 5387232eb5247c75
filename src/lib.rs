//! Lox is a small dynamically typed scripting language with C-style syntax,
//! first-class functions, lexical closures and single-inheritance classes.
//! This crate is a tree-walk interpreter for it: a hand-written recursive
//! descent parser builds an AST which is evaluated directly, without a
//! bytecode stage. The language and the overall architecture come from the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob
//! Nystrom.
//!
//! ## Scanning
//! The [`scanner`](scanner) turns source text into a flat list of
//! [`Token`](token::Token)s in one left-to-right pass. Lexical problems such
//! as an unterminated string are reported as a [`ScanError`](error::ScanError)
//! and scanning continues, so a single run surfaces every lexical error in
//! the file.
//!
//! ## Parsing
//! The [`parser`](parser) turns the token list into statements and
//! expressions. [`Expr`](expr::Expr) nodes produce a value when evaluated,
//! an [`Object`](object::Object); [`Stmt`](stmt::Stmt) nodes perform an
//! action. On a [`ParseError`](error::ParseError) the parser synchronizes to
//! the next statement boundary and keeps going, again to report as many
//! errors as possible in one run.
//!
//! ## Resolving
//! The [`resolver`](resolver) is a static pass over the finished AST. It
//! computes, for every variable reference, how many lexical scopes lie
//! between the reference and the declaration it refers to, which is what
//! makes closures capture the binding that was visible where they were
//! written rather than whatever happens to be in scope when they run. It
//! also rejects programs that are syntactically fine but semantically
//! ill-formed, as a [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) walks the AST and evaluates it against a
//! chain of [`Environment`](environment::Environment)s, one frame per scope.
//! Type mismatches and other dynamic failures surface as a
//! [`RuntimeError`](error::RuntimeError) with the offending source line.

use std::{fs, process};
use std::io::Write;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub mod error;
pub mod token;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod ast;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod function;
pub mod resolver;
pub mod class;

use interpreter::Interpreter;
use parser::Parser;
use scanner::Scanner;
use resolver::Resolver;

/// The driver tying the pipeline together. Program output (the `print`
/// statement) goes to the given writer so embedders and tests can capture it.
pub struct Lox<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Lox<'a> {
    pub fn new(writer: &'a mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(writer),
        }
    }

    /// Runs a script file. Exits with 65 after a compile-time error and 70
    /// after a runtime error; a compile-time error wins if both occurred.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("to be able to read the script file");

        self.run(&contents);

        if error::did_compile_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs an interactive session. An erroneous line does not end the
    /// session; the error flags are reset before the next prompt.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("to be able to open a prompt");

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.is_empty() {
                        break;
                    }

                    let _ = editor.add_history_entry(line.as_str());

                    self.run(&line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs a chunk of source. Each stage only runs if the previous one got
    /// through without errors; nothing is ever executed after a compile-time
    /// error.
    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
