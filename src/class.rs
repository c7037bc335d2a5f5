use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::diagnostics::RuntimeError;
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::{Callable, Value};

pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    pub methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(name: String, superclass: Option<Rc<LoxClass>>, methods: HashMap<String, Rc<LoxFunction>>) -> Self {
        LoxClass { name, superclass, methods }
    }

    /// Looks up a method on this class, falling back to the superclass
    /// chain if it isn't declared directly here.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass.as_ref().and_then(|superclass| superclass.find_method(name))
    }
}

impl LoxClass {
    pub fn arity(&self) -> usize {
        self.find_method("init").map(|init| init.arity()).unwrap_or(0)
    }

    /// Constructs a new instance of this class, running `init` (if any)
    /// with `arguments`. Takes the class by `Rc` rather than through the
    /// usual `Callable` dispatch because the instance needs to hold a
    /// reference to the exact class it was constructed from.
    pub fn instantiate(self_rc: &Rc<LoxClass>, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(self_rc))));

        if let Some(initializer) = self_rc.find_method("init") {
            initializer.bind(Rc::clone(&instance)).call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Display for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

pub struct Instance {
    pub class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn get(this: &Rc<RefCell<Instance>>, name: &Token) -> Result<Value, RuntimeError> {
        let instance = this.borrow();

        if let Some(field) = instance.fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = instance.class.find_method(&name.lexeme) {
            return Ok(Value::Function(Rc::new(method.bind(Rc::clone(this)))));
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined property '{}'.", name.lexeme),
        })
    }

    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<instance {}>", self.class.name)
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<instance {}>", self.class.name)
    }
}
