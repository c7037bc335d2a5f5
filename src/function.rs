use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::class::Instance;
use crate::diagnostics::RuntimeError;
use crate::environment::Environment;
use crate::interpreter::{Interpreter, Signal};
use crate::stmt::FunctionDecl;
use crate::value::{Callable, Value};

/// A user-defined function or method, paired with the environment it
/// closed over at the point of declaration.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        LoxFunction { declaration, closure, is_initializer }
    }

    /// Produces a copy of this function whose closure additionally binds
    /// `this` to `instance`. Used to turn an unbound method into the value
    /// a `Get` expression on an instance should evaluate to.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> LoxFunction {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));
        environment.borrow_mut().define("this", Value::Instance(instance));
        LoxFunction::new(Rc::clone(&self.declaration), environment, self.is_initializer)
    }
}

impl Callable for LoxFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));

        for (param, argument) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => {
                if self.is_initializer {
                    self.this_value()
                } else {
                    Ok(Value::Nil)
                }
            }
            Err(Signal::Return(value)) => {
                if self.is_initializer {
                    self.this_value()
                } else {
                    Ok(value)
                }
            }
            Err(Signal::Error(error)) => Err(error),
            Err(Signal::Break) => Ok(Value::Nil),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl LoxFunction {
    fn this_value(&self) -> Result<Value, RuntimeError> {
        Ok(self.closure.borrow().get_name("this").unwrap_or(Value::Nil))
    }
}

impl Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A function implemented in the host language rather than in Lox.
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Value>) -> Result<Value, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The natives bound into every global environment.
    pub fn globals() -> Vec<NativeFunction> {
        vec![NativeFunction {
            name: "clock".to_string(),
            arity: 0,
            function: |_, _| {
                let seconds = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);
                Ok(Value::Number(seconds))
            },
        }]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
