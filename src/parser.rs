use std::rc::Rc;

use crate::diagnostics::{Diagnostics, ParseError};
use crate::expr::{Expr, LiteralValue};
use crate::stmt::{ClassDecl, FunctionDecl, IfData, ReturnData, Stmt, VarData, WhileData};
use crate::token::{Token, TokenKind, TokenLiteral};

type ParseResult<T> = Result<T, ParseError>;

/// Returns whether the next token is any of the given kinds, consuming it
/// if so.
macro_rules! matches {
    ( $self:ident, $( $kind:expr ),+ ) => {
        {
            if $( $self.check($kind) )||+ {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Recursive-descent parser.
///
/// - Program       -> Declaration* EOF ;
/// - Block         -> "{" Declaration* "}" ;
/// - Declaration   -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl     -> "class" IDENTIFIER ( "<" IDENTIFIER )? "{" Function* "}" ;
/// - FunDecl       -> "fun" Function ;
/// - VarDecl       -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Function      -> IDENTIFIER "(" Parameters? ")" Block ;
/// - Parameters    -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement     -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt
///                   | BreakStmt | WhileStmt | Block ;
/// - ExprStmt      -> Expression ";" ;
/// - ForStmt       -> "for" "(" ( VarDecl | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt        -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt     -> "print" Expression ";" ;
/// - ReturnStmt    -> "return" Expression? ";" ;
/// - BreakStmt     -> "break" ";" ;
/// - WhileStmt     -> "while" "(" Expression ")" Statement ;
/// - Expression    -> Assignment ;
/// - Assignment    -> ( Call "." )? IDENTIFIER "=" Assignment | LogicOr ;
/// - LogicOr       -> LogicAnd ( "or" LogicAnd )* ;
/// - LogicAnd      -> Equality ( "and" Equality )* ;
/// - Equality      -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison    -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term          -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor        -> Unary ( ( "*" | "/" ) Unary )* ;
/// - Unary         -> ( "!" | "-" ) Unary | Call ;
/// - Arguments     -> Expression ( "," Expression )* ;
/// - Call          -> Primary ( "(" Arguments? ")" | "." IDENTIFIER )* ;
/// - Primary       -> NUMBER | STRING | "false" | "true" | "nil" | "this"
///                   | "(" Expression ")" | IDENTIFIER | "super" "." IDENTIFIER ;
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    loop_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0, loop_depth: 0 }
    }

    pub fn parse(&mut self, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration(diagnostics) {
                statements.push(stmt);
            }
        }

        statements
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EOF
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(ParseError { token: self.peek().clone(), message: message.to_string() })
    }

    fn declaration(&mut self, diagnostics: &mut Diagnostics) -> Option<Stmt> {
        let result = if matches!(self, TokenKind::Class) {
            self.class_declaration(diagnostics)
        } else if matches!(self, TokenKind::Fun) {
            self.function("function", diagnostics).map(Stmt::Function)
        } else if matches!(self, TokenKind::Var) {
            self.var_declaration(diagnostics)
        } else {
            self.statement(diagnostics)
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                diagnostics.parse_error(&error);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.")?.clone();

        let superclass = if matches!(self, TokenKind::Less) {
            self.consume(TokenKind::Identifier, "Expect superclass name.")?;
            Some(Expr::variable(self.previous().clone()))
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method", diagnostics)?);
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(Rc::new(ClassDecl { name, superclass, methods })))
    }

    fn var_declaration(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?.clone();

        let initializer = if matches!(self, TokenKind::Equal) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        if matches!(self, TokenKind::For) {
            return self.for_statement(diagnostics);
        }

        if matches!(self, TokenKind::If) {
            return self.if_statement(diagnostics);
        }

        if matches!(self, TokenKind::Print) {
            return self.print_statement(diagnostics);
        }

        if matches!(self, TokenKind::Return) {
            return self.return_statement(diagnostics);
        }

        if matches!(self, TokenKind::Break) {
            return self.break_statement(diagnostics);
        }

        if matches!(self, TokenKind::While) {
            return self.while_statement(diagnostics);
        }

        if matches!(self, TokenKind::LeftBrace) {
            return Ok(Stmt::Block(self.block(diagnostics)?));
        }

        self.expression_statement(diagnostics)
    }

    fn for_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if matches!(self, TokenKind::Semicolon) {
            None
        } else if matches!(self, TokenKind::Var) {
            Some(self.var_declaration(diagnostics)?)
        } else {
            Some(self.expression_statement(diagnostics)?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        self.loop_depth += 1;
        let body = self.statement(diagnostics);
        self.loop_depth -= 1;
        let mut body = body?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        body = Stmt::While(WhileData {
            condition: condition.unwrap_or_else(|| Expr::literal(LiteralValue::Bool(true))),
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn if_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression(diagnostics)?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement(diagnostics)?);
        let else_branch = if matches!(self, TokenKind::Else) {
            Some(Box::new(self.statement(diagnostics)?))
        } else {
            None
        };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        let expr = self.expression(diagnostics)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(expr))
    }

    fn return_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    /// A `break` outside any loop is reported but doesn't abort parsing of
    /// the rest of the file, matching how an over-long parameter list is
    /// handled.
    fn break_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        if self.loop_depth == 0 {
            diagnostics.parse_error(&ParseError {
                token: keyword.clone(),
                message: "Cannot use 'break' outside of a loop.".to_string(),
            });
        }

        self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
        Ok(Stmt::Break(keyword))
    }

    fn while_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression(diagnostics)?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;

        self.loop_depth += 1;
        let body = self.statement(diagnostics);
        self.loop_depth -= 1;

        Ok(Stmt::While(WhileData { condition, body: Box::new(body?) }))
    }

    fn expression_statement(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Stmt> {
        let expr = self.expression(diagnostics)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    fn function(&mut self, kind: &str, diagnostics: &mut Diagnostics) -> ParseResult<Rc<FunctionDecl>> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {kind} name."))?.clone();
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= 255 {
                    self.report_inline(diagnostics, "Cannot have more than 255 parameters.");
                }

                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?.clone());

                if !matches!(self, TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.consume(TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body."))?;

        let body = self.block(diagnostics)?;

        Ok(Rc::new(FunctionDecl { name, params, body }))
    }

    fn block(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration(diagnostics) {
                statements.push(stmt);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        self.assignment(diagnostics)
    }

    fn assignment(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let expr = self.or(diagnostics)?;

        if matches!(self, TokenKind::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment(diagnostics)?;

            return match expr {
                Expr::Variable(data) => Ok(Expr::assign(data.name, value)),
                Expr::Get(data) => Ok(Expr::set(*data.object, data.name, value)),
                _ => {
                    diagnostics.parse_error(&ParseError { token: equals, message: "Invalid assignment target.".to_string() });
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.and(diagnostics)?;

        while matches!(self, TokenKind::Or) {
            let operator = self.previous().clone();
            let right = self.and(diagnostics)?;
            expr = Expr::logical(expr, operator, right);
        }

        Ok(expr)
    }

    fn and(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.equality(diagnostics)?;

        while matches!(self, TokenKind::And) {
            let operator = self.previous().clone();
            let right = self.equality(diagnostics)?;
            expr = Expr::logical(expr, operator, right);
        }

        Ok(expr)
    }

    fn equality(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.comparison(diagnostics)?;

        while matches!(self, TokenKind::BangEqual, TokenKind::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison(diagnostics)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.term(diagnostics)?;

        while matches!(self, TokenKind::Greater, TokenKind::GreaterEqual, TokenKind::Less, TokenKind::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term(diagnostics)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.factor(diagnostics)?;

        while matches!(self, TokenKind::Minus, TokenKind::Plus) {
            let operator = self.previous().clone();
            let right = self.factor(diagnostics)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.unary(diagnostics)?;

        while matches!(self, TokenKind::Slash, TokenKind::Star) {
            let operator = self.previous().clone();
            let right = self.unary(diagnostics)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        if matches!(self, TokenKind::Bang, TokenKind::Minus) {
            let operator = self.previous().clone();
            let right = self.unary(diagnostics)?;
            return Ok(Expr::unary(operator, right));
        }

        self.call(diagnostics)
    }

    fn finish_call(&mut self, callee: Expr, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    self.report_inline(diagnostics, "Cannot have more than 255 arguments.");
                }

                arguments.push(self.expression(diagnostics)?);

                if !matches!(self, TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?.clone();
        Ok(Expr::call(callee, paren, arguments))
    }

    fn call(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        let mut expr = self.primary(diagnostics)?;

        loop {
            if matches!(self, TokenKind::LeftParen) {
                expr = self.finish_call(expr, diagnostics)?;
            } else if matches!(self, TokenKind::Dot) {
                let name = self.consume(TokenKind::Identifier, "Expect property name after '.'.")?.clone();
                expr = Expr::get(expr, name);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self, diagnostics: &mut Diagnostics) -> ParseResult<Expr> {
        if matches!(self, TokenKind::False) {
            return Ok(Expr::literal(LiteralValue::Bool(false)));
        }

        if matches!(self, TokenKind::True) {
            return Ok(Expr::literal(LiteralValue::Bool(true)));
        }

        if matches!(self, TokenKind::Nil) {
            return Ok(Expr::literal(LiteralValue::Nil));
        }

        if matches!(self, TokenKind::Number, TokenKind::String) {
            let literal = self.previous().literal.clone().expect("number or string token to carry a literal");
            let value = match literal {
                TokenLiteral::Number(n) => LiteralValue::Number(n),
                TokenLiteral::String(s) => LiteralValue::String(s),
            };
            return Ok(Expr::literal(value));
        }

        if matches!(self, TokenKind::Super) {
            let keyword = self.previous().clone();
            self.consume(TokenKind::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(TokenKind::Identifier, "Expect superclass method name.")?.clone();
            return Ok(Expr::super_(keyword, method));
        }

        if matches!(self, TokenKind::This) {
            return Ok(Expr::this(self.previous().clone()));
        }

        if matches!(self, TokenKind::Identifier) {
            return Ok(Expr::variable(self.previous().clone()));
        }

        if matches!(self, TokenKind::LeftParen) {
            let expr = self.expression(diagnostics)?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::grouping(expr));
        }

        Err(ParseError { token: self.peek().clone(), message: "Expect expression.".to_string() })
    }

    /// Reports a non-fatal parse error without unwinding the current
    /// production, for limits that shouldn't stop the rest of the file
    /// from parsing.
    fn report_inline(&self, diagnostics: &mut Diagnostics, message: &str) {
        diagnostics.parse_error(&ParseError { token: self.peek().clone(), message: message.to_string() });
    }

    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
