use std::collections::HashMap;
use std::mem;

use crate::diagnostics::{Diagnostics, ResolveError};
use crate::expr::{Expr, NodeId};
use crate::stmt::Stmt;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Walks the AST once, statically, to work out how many scopes separate
/// each variable reference from the scope that declares it. The result is
/// a table the interpreter consults instead of doing that walk itself on
/// every evaluation.
pub struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    locals: HashMap<NodeId, usize>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) -> HashMap<NodeId, usize> {
        self.resolve_statements(statements, diagnostics);
        self.locals
    }

    fn resolve_statements(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            self.resolve_stmt(statement, diagnostics);
        }
    }

    fn resolve_function(&mut self, declaration: &crate::stmt::FunctionDecl, kind: FunctionType, diagnostics: &mut Diagnostics) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &declaration.params {
            self.declare(param, diagnostics);
            self.define(param);
        }
        self.resolve_statements(&declaration.body, diagnostics);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token, diagnostics: &mut Diagnostics) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            diagnostics.resolution_error(&ResolveError {
                token: name.clone(),
                message: format!("Already a variable with name '{}' in this scope.", name.lexeme),
            });
        }

        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.locals.insert(id, depth);
                return;
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr, diagnostics: &mut Diagnostics) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Grouping(data) => self.resolve_expr(&data.expression, diagnostics),
            Expr::Unary(data) => self.resolve_expr(&data.right, diagnostics),
            Expr::Binary(data) => {
                self.resolve_expr(&data.left, diagnostics);
                self.resolve_expr(&data.right, diagnostics);
            }
            Expr::Logical(data) => {
                self.resolve_expr(&data.left, diagnostics);
                self.resolve_expr(&data.right, diagnostics);
            }
            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&data.name.lexeme) == Some(&false) {
                        diagnostics.resolution_error(&ResolveError {
                            token: data.name.clone(),
                            message: "Can't read local variable in its own initializer.".to_string(),
                        });
                    }
                }
                self.resolve_local(data.id, &data.name);
            }
            Expr::Assign(data) => {
                self.resolve_expr(&data.value, diagnostics);
                self.resolve_local(data.id, &data.name);
            }
            Expr::Call(data) => {
                self.resolve_expr(&data.callee, diagnostics);
                for argument in &data.arguments {
                    self.resolve_expr(argument, diagnostics);
                }
            }
            Expr::Get(data) => self.resolve_expr(&data.object, diagnostics),
            Expr::Set(data) => {
                self.resolve_expr(&data.value, diagnostics);
                self.resolve_expr(&data.object, diagnostics);
            }
            Expr::This(data) => {
                if self.current_class == ClassType::None {
                    diagnostics.resolution_error(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'this' outside of a class.".to_string(),
                    });
                    return;
                }
                self.resolve_local(data.id, &data.keyword);
            }
            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => {}
                    ClassType::None => diagnostics.resolution_error(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'super' outside of a class.".to_string(),
                    }),
                    ClassType::Class => diagnostics.resolution_error(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'super' in a class with no superclass.".to_string(),
                    }),
                }
                self.resolve_local(data.id, &data.keyword);
            }
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt, diagnostics: &mut Diagnostics) {
        match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr, diagnostics),
            Stmt::Var(data) => {
                self.declare(&data.name, diagnostics);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer, diagnostics);
                }
                self.define(&data.name);
            }
            Stmt::Block(statements) => {
                self.begin_scope();
                self.resolve_statements(statements, diagnostics);
                self.end_scope();
            }
            Stmt::If(data) => {
                self.resolve_expr(&data.condition, diagnostics);
                self.resolve_stmt(&data.then_branch, diagnostics);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch, diagnostics);
                }
            }
            Stmt::While(data) => {
                self.resolve_expr(&data.condition, diagnostics);
                self.resolve_stmt(&data.body, diagnostics);
            }
            Stmt::Break(_) => {}
            Stmt::Function(declaration) => {
                self.declare(&declaration.name, diagnostics);
                self.define(&declaration.name);
                self.resolve_function(declaration, FunctionType::Function, diagnostics);
            }
            Stmt::Return(data) => {
                if self.current_function == FunctionType::None {
                    diagnostics.resolution_error(&ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't return from top-level code.".to_string(),
                    });
                }

                if let Some(value) = &data.value {
                    if self.current_function == FunctionType::Initializer {
                        diagnostics.resolution_error(&ResolveError {
                            token: data.keyword.clone(),
                            message: "Can't return a value from an initializer.".to_string(),
                        });
                        return;
                    }
                    self.resolve_expr(value, diagnostics);
                }
            }
            Stmt::Class(declaration) => {
                let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(&declaration.name, diagnostics);
                self.define(&declaration.name);

                if let Some(superclass) = &declaration.superclass {
                    if let Expr::Variable(data) = superclass {
                        if data.name.lexeme == declaration.name.lexeme {
                            diagnostics.resolution_error(&ResolveError {
                                token: data.name.clone(),
                                message: "A class can't inherit from itself.".to_string(),
                            });
                        }
                    }

                    self.current_class = ClassType::Subclass;
                    self.resolve_expr(superclass, diagnostics);

                    self.begin_scope();
                    self.scopes.last_mut().expect("scope just pushed").insert("super".to_string(), true);
                }

                self.begin_scope();
                self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

                for method in &declaration.methods {
                    let kind = if method.name.lexeme == "init" {
                        FunctionType::Initializer
                    } else {
                        FunctionType::Method
                    };
                    self.resolve_function(method, kind, diagnostics);
                }

                self.end_scope();

                if declaration.superclass.is_some() {
                    self.end_scope();
                }

                self.current_class = enclosing_class;
            }
        }
    }
}
