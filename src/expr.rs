use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

/// Identifies a single expression node for the resolver's scope-distance
/// table. Assigned once, at parse time, and never reused.
pub type NodeId = usize;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> NodeId {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The value a literal expression denotes. Distinct from `TokenLiteral`
/// because `true`, `false` and `nil` are literals too, even though they
/// aren't carried on any token's `literal` field.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, PartialEq)]
pub struct LiteralData {
    pub id: NodeId,
    pub value: LiteralValue,
}

#[derive(Debug, PartialEq)]
pub struct GroupingData {
    pub id: NodeId,
    pub expression: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct UnaryData {
    pub id: NodeId,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct BinaryData {
    pub id: NodeId,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct LogicalData {
    pub id: NodeId,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct VariableData {
    pub id: NodeId,
    pub name: Token,
}

#[derive(Debug, PartialEq)]
pub struct AssignData {
    pub id: NodeId,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct CallData {
    pub id: NodeId,
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct GetData {
    pub id: NodeId,
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, PartialEq)]
pub struct SetData {
    pub id: NodeId,
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, PartialEq)]
pub struct ThisData {
    pub id: NodeId,
    pub keyword: Token,
}

#[derive(Debug, PartialEq)]
pub struct SuperData {
    pub id: NodeId,
    pub keyword: Token,
    pub method: Token,
}

/// An expression in the language, tagged by variant rather than dispatched
/// through a visitor trait. Every node carries a `NodeId` so the resolver
/// can record "this node resolves to a variable N scopes up" without
/// needing a stable identity from the token or structural equality.
#[derive(Debug, PartialEq)]
pub enum Expr {
    Literal(LiteralData),
    Grouping(GroupingData),
    Unary(UnaryData),
    Binary(BinaryData),
    Logical(LogicalData),
    Variable(VariableData),
    Assign(AssignData),
    Call(CallData),
    Get(GetData),
    Set(SetData),
    This(ThisData),
    Super(SuperData),
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Literal(d) => d.id,
            Expr::Grouping(d) => d.id,
            Expr::Unary(d) => d.id,
            Expr::Binary(d) => d.id,
            Expr::Logical(d) => d.id,
            Expr::Variable(d) => d.id,
            Expr::Assign(d) => d.id,
            Expr::Call(d) => d.id,
            Expr::Get(d) => d.id,
            Expr::Set(d) => d.id,
            Expr::This(d) => d.id,
            Expr::Super(d) => d.id,
        }
    }

    pub fn literal(value: LiteralValue) -> Expr {
        Expr::Literal(LiteralData { id: next_id(), value })
    }

    pub fn grouping(expression: Expr) -> Expr {
        Expr::Grouping(GroupingData { id: next_id(), expression: Box::new(expression) })
    }

    pub fn unary(operator: Token, right: Expr) -> Expr {
        Expr::Unary(UnaryData { id: next_id(), operator, right: Box::new(right) })
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Expr {
        Expr::Binary(BinaryData { id: next_id(), left: Box::new(left), operator, right: Box::new(right) })
    }

    pub fn logical(left: Expr, operator: Token, right: Expr) -> Expr {
        Expr::Logical(LogicalData { id: next_id(), left: Box::new(left), operator, right: Box::new(right) })
    }

    pub fn variable(name: Token) -> Expr {
        Expr::Variable(VariableData { id: next_id(), name })
    }

    pub fn assign(name: Token, value: Expr) -> Expr {
        Expr::Assign(AssignData { id: next_id(), name, value: Box::new(value) })
    }

    pub fn call(callee: Expr, paren: Token, arguments: Vec<Expr>) -> Expr {
        Expr::Call(CallData { id: next_id(), callee: Box::new(callee), paren, arguments })
    }

    pub fn get(object: Expr, name: Token) -> Expr {
        Expr::Get(GetData { id: next_id(), object: Box::new(object), name })
    }

    pub fn set(object: Expr, name: Token, value: Expr) -> Expr {
        Expr::Set(SetData { id: next_id(), object: Box::new(object), name, value: Box::new(value) })
    }

    pub fn this(keyword: Token) -> Expr {
        Expr::This(ThisData { id: next_id(), keyword })
    }

    pub fn super_(keyword: Token, method: Token) -> Expr {
        Expr::Super(SuperData { id: next_id(), keyword, method })
    }
}
