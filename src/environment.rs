use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::diagnostics::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// A single lexical frame: a mapping from name to value, linked to the
/// frame it was created inside of. The global environment has no parent.
#[derive(Default)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment { enclosing, values: HashMap::new() }
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    fn ancestor(&self, distance: usize, this: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        let mut environment = Rc::clone(this);
        for _ in 0..distance {
            let parent = environment.borrow().enclosing.clone()
                .expect("resolver guarantees an ancestor exists at this distance");
            environment = parent;
        }
        environment
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    pub fn get_name(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }
}

/// Free functions so callers can walk a shared `Rc<RefCell<Environment>>`
/// chain without first borrowing it immutably and mutably at once.
pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
    let target = env.borrow().ancestor(distance, env);
    let found = target.borrow().values.get(&name.lexeme).cloned();
    found.ok_or_else(|| RuntimeError {
        token: name.clone(),
        message: format!("Undefined variable '{}'.", name.lexeme),
    })
}

pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token, value: Value) {
    let target = env.borrow().ancestor(distance, env);
    target.borrow_mut().values.insert(name.lexeme.clone(), value);
}

/// Looks up a plain name (rather than a token) at a fixed scope distance.
/// Used for `super`/`this`, which the resolver places in synthetic scopes
/// that have no token of their own.
pub fn get_name_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Option<Value> {
    let target = env.borrow().ancestor(distance, env);
    let value = target.borrow().get_name(name);
    value
}
