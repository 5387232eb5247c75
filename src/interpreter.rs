use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// Evaluates the resolved AST against a chain of environments. Owns the
/// global frame, the resolver's depth table and the output sink that `print`
/// writes to.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    pub(crate) locals: HashMap<usize, usize>,
    writer: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(writer: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.clone();
            globals.borrow_mut().define(&name, Object::NativeFunction(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            writer,
        }
    }

    /// Executes the statements in order. The first runtime error is reported
    /// and stops execution; everything already printed or assigned stands.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Unwind::Error(error)) => {
                    error.throw();
                    return;
                },
                // The resolver rejects top-level returns before execution.
                Err(Unwind::Return(_)) => unreachable!("return outside of a function"),
            }
        }
    }

    /// Records the scope depth of a variable-referring expression.
    /// Called by the resolver.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes the statements inside the given environment, restoring the
    /// previous one on every exit path (completion, return or error).
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);
        let result = statements.iter().try_for_each(|statement| self.execute(statement));
        self.environment = previous;

        result
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(())
            },
            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                writeln!(self.writer, "{value}").expect("to be able to write program output");
                Ok(())
            },
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::Literal(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            },
            Stmt::Block(data) => {
                let environment = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
            },
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.body)?;
                }
                Ok(())
            },
            Stmt::Function(data) => {
                let function = Function {
                    name: data.name.clone(),
                    params: data.params.clone(),
                    body: data.body.clone(),
                    closure: Rc::clone(&self.environment),
                    is_initializer: false,
                };

                self.environment.borrow_mut().define(&data.name.lexeme, Object::Function(function));
                Ok(())
            },
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(value) => self.evaluate(value)?,
                    None => Object::Literal(Literal::Nil),
                };

                Err(Unwind::Return(value))
            },
            Stmt::Class(data) => self.visit_class_stmt(data),
        }
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> Result<(), Unwind> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let Expr::Variable(variable) = expr else { unreachable!() };

                match self.evaluate(expr)? {
                    Object::Class(class) => Some(class),
                    _ => return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    }.into()),
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::Literal(Literal::Nil));

        // Methods of a subclass close over an extra frame holding `super`.
        if let Some(superclass) = &superclass {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::Class(Rc::clone(superclass)));
            self.environment = Rc::new(RefCell::new(environment));
        }

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let function = Function {
                name: function.name.clone(),
                params: function.params.clone(),
                body: function.body.clone(),
                closure: Rc::clone(&self.environment),
                is_initializer: function.name.lexeme == "init",
            };
            methods.insert(function.name.lexeme.clone(), function);
        }

        let class = Class::new(data.name.lexeme.clone(), superclass.clone(), methods);

        if superclass.is_some() {
            let enclosing = self.environment.borrow().enclosing.clone()
                .expect("the 'super' frame to have an enclosing environment");
            self.environment = enclosing;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Object::Literal(literal.clone())),
            Expr::Unary(data) => self.visit_unary_expr(data),
            Expr::Binary(data) => self.visit_binary_expr(data),
            Expr::Grouping(data) => self.evaluate(&data.expr),
            Expr::Logical(data) => self.visit_logical_expr(data),
            Expr::Variable(data) => self.lookup_variable(&data.name, data.id),
            Expr::Assign(data) => self.visit_assign_expr(data),
            Expr::Call(data) => self.visit_call_expr(data),
            Expr::Get(data) => self.visit_get_expr(data),
            Expr::Set(data) => self.visit_set_expr(data),
            Expr::This(data) => self.lookup_variable(&data.keyword, data.id),
            Expr::Super(data) => self.visit_super_expr(data),
        }
    }

    /// Reads through the resolver's recorded depth when there is one;
    /// unresolved names live in the globals.
    fn lookup_variable(&self, name: &Token, id: usize) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => {
                let number = Self::check_number_operand(&data.operator, &right)?;
                Ok(Object::from(-number))
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let operator = &data.operator;

        match operator.r#type {
            Type::Greater => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left > right))
            },
            Type::GreaterEqual => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left >= right))
            },
            Type::Less => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left < right))
            },
            Type::LessEqual => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left <= right))
            },
            Type::Minus => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left - right))
            },
            // Division by zero is not an error; it follows IEEE-754.
            Type::Slash => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left / right))
            },
            Type::Star => {
                let (left, right) = Self::check_number_operands(operator, &left, &right)?;
                Ok(Object::from(left * right))
            },
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                    Ok(Object::from(left + right))
                },
                (Object::Literal(Literal::String(left)), Object::Literal(Literal::String(right))) => {
                    Ok(Object::from(format!("{left}{right}")))
                },
                _ => Err(RuntimeError {
                    token: operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }),
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    /// Short-circuits and yields one of the operand values untouched.
    fn visit_logical_expr(&mut self, data: &LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;

        match data.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> Result<Object, RuntimeError> {
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &data.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&data.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(native) => native,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: data.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len(),
                ),
            });
        }

        callable.call(self, arguments)
    }

    fn visit_get_expr(&mut self, data: &GetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&data.name, &object),
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, data: &SetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;

        match object {
            Object::Instance(instance) => {
                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value.clone());
                Ok(value)
            },
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have fields.".to_string(),
            }),
        }
    }

    /// Looks the method up on the resolved superclass and binds it to the
    /// `this` of the surrounding method, one frame below the `super` frame.
    fn visit_super_expr(&mut self, data: &SuperData) -> Result<Object, RuntimeError> {
        let distance = *self.locals.get(&data.id).expect("'super' to have a resolved depth");

        let superclass = match self.environment.borrow().get_at(distance, &Token::from("super"))? {
            Object::Class(class) => class,
            _ => unreachable!(),
        };
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let result = match superclass.borrow().find_method(&data.method.lexeme) {
            Some(method) => Ok(Object::from(method.bind(object))),
            None => Err(RuntimeError {
                token: data.method.clone(),
                message: format!("Undefined property '{}'.", data.method.lexeme),
            }),
        };
        result
    }

    fn check_number_operand(operator: &Token, operand: &Object) -> Result<f64, RuntimeError> {
        match operand {
            Object::Literal(Literal::Number(number)) => Ok(*number),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operand must be a number.".to_string(),
            }),
        }
    }

    fn check_number_operands(
        operator: &Token,
        left: &Object,
        right: &Object,
    ) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                Ok((*left, *right))
            },
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
        }
    }
}
