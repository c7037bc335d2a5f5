use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::{Instance, LoxClass};
use crate::diagnostics::{Diagnostics, RuntimeError};
use crate::environment::{self, Environment};
use crate::expr::{Expr, LiteralValue, NodeId};
use crate::function::{LoxFunction, NativeFunction};
use crate::stmt::Stmt;
use crate::token::{Token, TokenKind};
use crate::value::{Callable, Value};

/// Non-local control flow a statement can raise: a `return`, a `break`, or
/// a runtime error. Propagated through `Result` instead of unwinding with
/// Rust panics or exceptions.
pub enum Signal {
    Return(Value),
    Break,
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}

pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    stdout: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(stdout: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        for native in NativeFunction::globals() {
            globals.borrow_mut().define(&native.name.clone(), Value::Native(Rc::new(native)));
        }

        Interpreter { environment: Rc::clone(&globals), globals, locals: HashMap::new(), stdout }
    }

    /// Installs the scope-distance table the resolver computed for this
    /// program. Must be called once, after resolving and before
    /// interpreting.
    pub fn set_locals(&mut self, locals: HashMap<NodeId, usize>) {
        self.locals = locals;
    }

    pub fn interpret(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Signal::Error(error)) => {
                    diagnostics.runtime_error(&error);
                    return;
                }
                // A top-level `return`/`break` can't happen: the resolver
                // rejects `return` outside a function and the parser
                // rejects `break` outside a loop.
                Err(_) => return,
            }
        }
    }

    /// Like `interpret`, but a program that is a single bare expression
    /// statement has its result printed after it runs, the way a REPL
    /// echoes back what you typed.
    pub fn interpret_repl(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        if let [Stmt::Expression(expr)] = statements {
            match self.evaluate(expr) {
                Ok(value) => {
                    let _ = writeln!(self.stdout, "{value}");
                }
                Err(error) => diagnostics.runtime_error(&error),
            }
            return;
        }

        self.interpret(statements, diagnostics);
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Signal> {
        let previous = mem::replace(&mut self.environment, environment);

        for statement in statements {
            if let Err(signal) = self.execute(statement) {
                self.environment = previous;
                return Err(signal);
            }
        }

        self.environment = previous;
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Signal> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.stdout, "{value}");
                Ok(())
            }
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            }
            Stmt::Block(statements) => {
                let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                self.execute_block(statements, scope)
            }
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    match self.execute(&data.body) {
                        Ok(()) => {}
                        Err(Signal::Break) => break,
                        Err(other) => return Err(other),
                    }
                }
                Ok(())
            }
            Stmt::Break(_) => Err(Signal::Break),
            Stmt::Function(declaration) => {
                let function = LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(())
            }
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(Signal::Return(value))
            }
            Stmt::Class(declaration) => self.execute_class(declaration),
        }
    }

    fn execute_class(&mut self, declaration: &Rc<crate::stmt::ClassDecl>) -> Result<(), Signal> {
        let superclass = match &declaration.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Value::Class(class) => Some(class),
                    _ => {
                        let token = match expr {
                            Expr::Variable(data) => data.name.clone(),
                            _ => declaration.name.clone(),
                        };
                        return Err(Signal::Error(RuntimeError {
                            token,
                            message: "Superclass must be a class.".to_string(),
                        }));
                    }
                }
            }
            None => None,
        };

        self.environment.borrow_mut().define(&declaration.name.lexeme, Value::Nil);

        let previous_environment = superclass.as_ref().map(|superclass| {
            let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
            scope.borrow_mut().define("super", Value::Class(Rc::clone(superclass)));
            mem::replace(&mut self.environment, scope)
        });

        let mut methods = HashMap::new();
        for method in &declaration.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = LoxFunction::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        if let Some(previous) = previous_environment {
            self.environment = previous;
        }

        let class = LoxClass::new(declaration.name.lexeme.clone(), superclass, methods);
        self.environment.borrow_mut().assign(&declaration.name, Value::Class(Rc::new(class)))?;
        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(data) => Ok(literal_value(&data.value)),
            Expr::Grouping(data) => self.evaluate(&data.expression),
            Expr::Unary(data) => self.evaluate_unary(data),
            Expr::Binary(data) => self.evaluate_binary(data),
            Expr::Logical(data) => self.evaluate_logical(data),
            Expr::Variable(data) => self.look_up_variable(data.id, &data.name),
            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;
                if let Some(&distance) = self.locals.get(&data.id) {
                    environment::assign_at(&self.environment, distance, &data.name, value.clone());
                } else {
                    self.globals.borrow_mut().assign(&data.name, value.clone())?;
                }
                Ok(value)
            }
            Expr::Call(data) => self.evaluate_call(data),
            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;
                match object {
                    Value::Instance(instance) => Instance::get(&instance, &data.name),
                    _ => Err(RuntimeError { token: data.name.clone(), message: "Only instances have properties.".to_string() }),
                }
            }
            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;
                match object {
                    Value::Instance(instance) => {
                        let value = self.evaluate(&data.value)?;
                        instance.borrow_mut().set(&data.name, value.clone());
                        Ok(value)
                    }
                    _ => Err(RuntimeError { token: data.name.clone(), message: "Only instances have fields.".to_string() }),
                }
            }
            Expr::This(data) => self.look_up_variable(data.id, &data.keyword),
            Expr::Super(data) => self.evaluate_super(data),
        }
    }

    fn evaluate_unary(&mut self, data: &crate::expr::UnaryData) -> Result<Value, RuntimeError> {
        let right = self.evaluate(&data.right)?;

        match data.operator.kind {
            TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
            TokenKind::Minus => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError { token: data.operator.clone(), message: "Operand must be a number.".to_string() }),
            },
            _ => unreachable!("parser only produces '!' and '-' unary operators"),
        }
    }

    fn evaluate_binary(&mut self, data: &crate::expr::BinaryData) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let operator = &data.operator;

        match operator.kind {
            TokenKind::Minus => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Slash => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                if b == 0.0 {
                    return Err(RuntimeError { token: operator.clone(), message: "Division by zero.".to_string() });
                }
                Ok(Value::Number(a / b))
            }
            TokenKind::Star => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                Ok(Value::Number(a * b))
            }
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!("{left}{right}"))),
                _ => Err(RuntimeError { token: operator.clone(), message: "Operands must be two numbers or two strings.".to_string() }),
            },
            TokenKind::Greater => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::GreaterEqual => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                Ok(Value::Bool(a >= b))
            }
            TokenKind::Less => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::LessEqual => {
                let (a, b) = expect_numbers(&left, &right, operator)?;
                Ok(Value::Bool(a <= b))
            }
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            _ => unreachable!("parser only produces these operators for Binary"),
        }
    }

    fn evaluate_logical(&mut self, data: &crate::expr::LogicalData) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&data.left)?;

        if data.operator.kind == TokenKind::Or {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(&data.right)
    }

    fn evaluate_call(&mut self, data: &crate::expr::CallData) -> Result<Value, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = callee.arity().ok_or_else(|| RuntimeError {
            token: data.paren.clone(),
            message: "Can only call functions and classes.".to_string(),
        })?;

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!("Expected {arity} arguments but got {}.", arguments.len()),
            });
        }

        match callee {
            Value::Function(function) => function.call(self, arguments),
            Value::Native(function) => function.call(self, arguments),
            Value::Class(class) => LoxClass::instantiate(&class, self, arguments),
            _ => unreachable!("arity() only returns Some for callable values"),
        }
    }

    fn evaluate_super(&mut self, data: &crate::expr::SuperData) -> Result<Value, RuntimeError> {
        let distance = *self.locals.get(&data.id).expect("resolver always resolves 'super' to a local");

        let superclass = match environment::get_name_at(&self.environment, distance, "super") {
            Some(Value::Class(class)) => class,
            _ => unreachable!("the resolver only places 'super' in a scope that defines it"),
        };

        let instance = match environment::get_name_at(&self.environment, distance - 1, "this") {
            Some(Value::Instance(instance)) => instance,
            _ => unreachable!("'this' is always bound one scope inside 'super'"),
        };

        let method = superclass.find_method(&data.method.lexeme).ok_or_else(|| RuntimeError {
            token: data.method.clone(),
            message: format!("Undefined property '{}'.", data.method.lexeme),
        })?;

        Ok(Value::Function(Rc::new(method.bind(instance))))
    }

    fn look_up_variable(&mut self, id: NodeId, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(&distance) = self.locals.get(&id) {
            environment::get_at(&self.environment, distance, name)
        } else {
            self.globals.borrow().get(name)
        }
    }
}

fn literal_value(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::Nil => Value::Nil,
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(s) => Value::String(s.clone()),
    }
}

fn expect_numbers(left: &Value, right: &Value, operator: &Token) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError { token: operator.clone(), message: "Operands must be numbers.".to_string() }),
    }
}
