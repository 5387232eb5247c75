use std::mem;
use std::collections::HashMap;

use crate::error::{Error, ResolveError};
use crate::expr::Expr;
use crate::stmt::{ClassData, FunctionData, Stmt};
use crate::interpreter::Interpreter;
use crate::token::Token;

#[derive(Clone, Copy)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// A static pass between parsing and evaluation. For every variable-referring
/// expression it records how many scopes lie between the reference and the
/// declaration, and it rejects the handful of programs that are syntactically
/// valid but semantically ill-formed (`return` at top level, `this` outside a
/// class, and so on). The AST itself is never mutated; depths are deposited
/// into the interpreter's side-table keyed by node id.
pub struct Resolver<'i, 'w> {
    interpreter: &'i mut Interpreter<'w>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'i, 'w> Resolver<'i, 'w> {
    pub fn new(interpreter: &'i mut Interpreter<'w>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks a name as existing but not yet usable. Redeclaring a name in the
    /// same local scope is an error; the global scope allows it.
    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            }.throw();
        }

        scope.insert(name.lexeme.to_owned(), false);
    }

    /// Marks a declared name as fully initialized and usable.
    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        scope.insert(name.lexeme.to_owned(), true);
    }

    /// Records the number of scopes between the reference and the matching
    /// declaration. Names that match no scope are left for the globals.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => (),
            Expr::Unary(unary) => self.resolve_expr(&unary.expr),
            Expr::Binary(binary) => {
                self.resolve_expr(&binary.left);
                self.resolve_expr(&binary.right);
            },
            Expr::Grouping(grouping) => self.resolve_expr(&grouping.expr),
            Expr::Logical(logical) => {
                self.resolve_expr(&logical.left);
                self.resolve_expr(&logical.right);
            },
            Expr::Variable(variable) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&variable.name.lexeme) == Some(&false) {
                        ResolveError {
                            token: variable.name.to_owned(),
                            message: "Can't read local variable in its own initializer.".to_string(),
                        }.throw();
                    }
                }

                self.resolve_local(variable.id, &variable.name);
            },
            Expr::Assign(assign) => {
                self.resolve_expr(&assign.value);
                self.resolve_local(assign.id, &assign.name);
            },
            Expr::Call(call) => {
                self.resolve_expr(&call.callee);

                for argument in &call.arguments {
                    self.resolve_expr(argument);
                }
            },
            Expr::Get(get) => self.resolve_expr(&get.object),
            Expr::Set(set) => {
                self.resolve_expr(&set.value);
                self.resolve_expr(&set.object);
            },
            Expr::This(this) => {
                if let ClassType::None = self.current_class {
                    ResolveError {
                        token: this.keyword.clone(),
                        message: "Can't use 'this' outside of a class.".to_string(),
                    }.throw();

                    return;
                }

                self.resolve_local(this.id, &this.keyword);
            },
            Expr::Super(super_expr) => {
                match self.current_class {
                    ClassType::Subclass => (),
                    ClassType::None => ResolveError {
                        token: super_expr.keyword.clone(),
                        message: "Can't use 'super' outside of a class.".to_string(),
                    }.throw(),
                    ClassType::Class => ResolveError {
                        token: super_expr.keyword.clone(),
                        message: "Can't use 'super' in a class with no superclass.".to_string(),
                    }.throw(),
                }

                self.resolve_local(super_expr.id, &super_expr.keyword);
            },
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),
            Stmt::Print(data) => self.resolve_expr(&data.expr),
            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            },
            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);

                self.resolve_function(data, FunctionType::Function);
            },
            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't return from top-level code.".to_string(),
                    }.throw();
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: "Can't return a value from an initializer.".to_string(),
                        }.throw();
                        return;
                    }

                    self.resolve_expr(value);
                }
            },
            Stmt::Class(data) => self.resolve_class(data),
        }
    }

    fn resolve_class(&mut self, class: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!() };

            if class.name.lexeme == variable.name.lexeme {
                ResolveError {
                    token: variable.name.clone(),
                    message: "A class can't inherit from itself.".to_string(),
                }.throw();
            }

            self.current_class = ClassType::Subclass;

            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("scope stack to not be empty")
                .insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to not be empty")
            .insert("this".to_string(), true);

        for method in &class.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let declaration = if function.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(function, declaration);
        }

        self.end_scope();

        if class.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }
}
