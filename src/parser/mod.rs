pub mod ast;
pub mod precedence;

use crate::diagnostics::Diagnostic;
use crate::lexer::{Token, TokenKind, Tokenizer, integer_value};
use crate::position::Position;
use ast::*;
use precedence::{Precedence, is_assignment};

type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> Option<Expression>;
type InfixParseFn<'src> = fn(&mut Parser<'src>, Expression) -> Option<Expression>;

/// Pratt parser over a token stream with two tokens of lookahead.
///
/// Every production starts with `cur` on its first token and leaves `cur`
/// on its last. A production that fails records a syntax diagnostic and
/// returns `None`; the caller decides how far to skip.
pub struct Parser<'src> {
    tokenizer: Tokenizer<'src>,
    cur: Token,
    peek: Token,
    errors: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(tokenizer: Tokenizer<'src>) -> Self {
        let mut parser = Self {
            tokenizer,
            cur: Token::eof(Position::default()),
            peek: Token::eof(Position::default()),
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    pub fn from_source(source: &'src str) -> Self {
        Self::new(Tokenizer::new(source))
    }

    /// Lexical and syntax diagnostics, in the order they were found.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }

    fn next_token(&mut self) {
        let next = self.tokenizer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
        self.errors.extend(self.tokenizer.take_diagnostics());
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance if the next token is `kind`, otherwise record a diagnostic.
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(kind);
            None
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let msg = format!("expected next token to be {expected}, got {}", self.peek.kind);
        self.errors.push(Diagnostic::syntax(msg, self.peek.position.clone()));
    }

    fn error_at_cur(&mut self, msg: String) {
        self.errors.push(Diagnostic::syntax(msg, self.cur.position.clone()));
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur.kind)
    }

    fn peek_starts_type(&self) -> bool {
        matches!(
            self.peek.kind,
            TokenKind::Ident | TokenKind::LBracket | TokenKind::Map | TokenKind::Struct | TokenKind::Interface
        )
    }

    // ── Program ─────────────────────────────────────────────────────

    pub fn parse_program(&mut self) -> Program {
        let position = self.cur.position.clone();
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => self.synchronize(),
            }
            self.next_token();
        }
        Program { statements, position }
    }

    /// Skip the rest of a failed statement. Outside any braces opened since
    /// the failure, the statement ends at a line break, after a `;`, or
    /// before a declaration keyword. Leaves `cur` on its last token.
    fn synchronize(&mut self) {
        let mut depth = match self.cur.kind {
            TokenKind::LBrace => 1usize,
            _ => 0,
        };
        while !self.peek_is(TokenKind::Eof) {
            if depth == 0 {
                let line_ended = self.peek.position.line != self.cur.position.line;
                if line_ended || self.cur_is(TokenKind::Semicolon) || self.peek.kind.starts_declaration() {
                    return;
                }
            }
            match self.peek.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.next_token();
        }
    }

    // ── Statements ──────────────────────────────────────────────────

    fn parse_statement(&mut self) -> Option<Statement> {
        let stmt = match self.cur.kind {
            TokenKind::Package => self.parse_package_statement().map(Statement::Package)?,
            TokenKind::Import => self.parse_import_statement()?,
            TokenKind::Func | TokenKind::SaikaFunc => self.parse_function_statement().map(Statement::Function)?,
            TokenKind::Let | TokenKind::Var | TokenKind::Const => {
                self.parse_variable_statement().map(Statement::Variable)?
            }
            TokenKind::Return => self.parse_return_statement().map(Statement::Return)?,
            TokenKind::If => self.parse_if_statement().map(Statement::If)?,
            TokenKind::For => self.parse_for_statement()?,
            TokenKind::Break | TokenKind::Continue => {
                Statement::Branch(BranchStatement { token: self.cur.clone() })
            }
            TokenKind::Struct => self.parse_struct_statement().map(Statement::Struct)?,
            TokenKind::Type => self.parse_type_declaration().map(Statement::Struct)?,
            TokenKind::LBrace => self.parse_block_statement().map(Statement::Block)?,
            _ => self.parse_simple_statement()?,
        };
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(stmt)
    }

    /// Short variable declaration or expression statement. Does not consume
    /// a trailing `;`, so it can serve as a for-clause.
    fn parse_simple_statement(&mut self) -> Option<Statement> {
        if self.cur_is(TokenKind::Ident) && self.peek_is(TokenKind::Define) {
            return self.parse_short_variable().map(Statement::Variable);
        }
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        Some(Statement::Expression(ExpressionStatement { token, expression }))
    }

    fn parse_package_statement(&mut self) -> Option<PackageStatement> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::from_token(self.cur.clone());
        Some(PackageStatement { token, name })
    }

    fn parse_import_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if !self.peek_is(TokenKind::LParen) {
            return self.parse_import_spec(token).map(Statement::Import);
        }

        self.next_token();
        let mut imports = Vec::new();
        while !self.peek_is(TokenKind::RParen) {
            if self.peek_is(TokenKind::Semicolon) {
                self.next_token();
                continue;
            }
            let spec_token = self.peek.clone();
            imports.push(self.parse_import_spec(spec_token)?);
        }
        self.expect_peek(TokenKind::RParen)?;
        Some(Statement::ImportGroup(ImportGroup { token, imports }))
    }

    /// `[alias] "path"` with `cur` just before it.
    fn parse_import_spec(&mut self, token: Token) -> Option<ImportStatement> {
        let alias = if self.peek_is(TokenKind::Ident) {
            self.next_token();
            Some(Identifier::from_token(self.cur.clone()))
        } else {
            None
        };
        self.expect_peek(TokenKind::Str)?;
        let path = self.cur.literal.clone();
        Some(ImportStatement { token, alias, path })
    }

    fn parse_function_statement(&mut self) -> Option<FunctionStatement> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::from_token(self.cur.clone());
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        let return_type = if self.peek_starts_type() {
            self.next_token();
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;
        Some(FunctionStatement { token, name, parameters, return_type, body })
    }

    /// Parameters after `(`, through the closing `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<Parameter>> {
        let mut parameters = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }
        if !self.peek_is(TokenKind::Ident) {
            self.peek_error(TokenKind::RParen);
            return None;
        }

        self.next_token();
        parameters.push(self.parse_parameter()?);
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.parse_parameter()?);
        }
        self.expect_peek(TokenKind::RParen)?;
        Some(parameters)
    }

    fn parse_parameter(&mut self) -> Option<Parameter> {
        let name = Identifier::from_token(self.cur.clone());
        let ty = if self.peek_starts_type() {
            self.next_token();
            Some(self.parse_type()?)
        } else {
            None
        };
        Some(Parameter { name, ty })
    }

    fn parse_variable_statement(&mut self) -> Option<VariableStatement> {
        let token = self.cur.clone();
        let is_const = self.cur_is(TokenKind::Const);
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::from_token(self.cur.clone());

        let ty = if self.peek_starts_type() {
            self.next_token();
            Some(self.parse_type()?)
        } else {
            None
        };

        let value = if self.peek_is(TokenKind::Assign) {
            self.next_token();
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        } else {
            None
        };

        Some(VariableStatement { token, name, ty, value, is_const, short: false })
    }

    /// `name := value` with `cur` on the name.
    fn parse_short_variable(&mut self) -> Option<VariableStatement> {
        let token = self.cur.clone();
        let name = Identifier::from_token(self.cur.clone());
        self.expect_peek(TokenKind::Define)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some(VariableStatement { token, name, ty: None, value: Some(value), is_const: false, short: true })
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.cur.clone();
        let bare = matches!(self.peek.kind, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof)
            || self.peek.position.line != token.position.line;
        if bare {
            return Some(ReturnStatement { token, value: None });
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some(ReturnStatement { token, value: Some(value) })
    }

    fn parse_if_statement(&mut self) -> Option<IfStatement> {
        let token = self.cur.clone();
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let mut alternative = None;
        if self.peek_is(TokenKind::Else) {
            self.next_token();
            if self.peek_is(TokenKind::If) {
                self.next_token();
                let nested = self.parse_if_statement()?;
                alternative = Some(BlockStatement {
                    token: nested.token.clone(),
                    statements: vec![Statement::If(nested)],
                });
            } else {
                self.expect_peek(TokenKind::LBrace)?;
                alternative = Some(self.parse_block_statement()?);
            }
        }

        Some(IfStatement { token, condition, consequence, alternative })
    }

    fn parse_for_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.next_token();

        match self.cur.kind {
            TokenKind::LBrace => {
                let body = self.parse_block_statement()?;
                return Some(Statement::For(ForStatement { token, init: None, condition: None, post: None, body }));
            }
            TokenKind::Range => return self.parse_range_rest(token, None, None).map(Statement::Range),
            TokenKind::Ident if self.peek_is(TokenKind::Comma) => {
                let key = Identifier::from_token(self.cur.clone());
                self.next_token();
                self.expect_peek(TokenKind::Ident)?;
                let value = Identifier::from_token(self.cur.clone());
                self.expect_peek(TokenKind::Define)?;
                self.expect_peek(TokenKind::Range)?;
                return self.parse_range_rest(token, Some(key), Some(value)).map(Statement::Range);
            }
            _ => {}
        }

        let mut init = None;
        if !self.cur_is(TokenKind::Semicolon) {
            if matches!(self.cur.kind, TokenKind::Let | TokenKind::Var) {
                init = Some(Box::new(Statement::Variable(self.parse_variable_statement()?)));
            } else if self.cur_is(TokenKind::Const) {
                self.error_at_cur("constant declarations are not allowed in a for clause".to_string());
                return None;
            } else if self.cur_is(TokenKind::Ident) && self.peek_is(TokenKind::Define) {
                let name = Identifier::from_token(self.cur.clone());
                self.next_token();
                if self.peek_is(TokenKind::Range) {
                    self.next_token();
                    return self.parse_range_rest(token, None, Some(name)).map(Statement::Range);
                }
                let decl_token = name.token.clone();
                self.next_token();
                let value = self.parse_expression(Precedence::Lowest)?;
                init = Some(Box::new(Statement::Variable(VariableStatement {
                    token: decl_token,
                    name,
                    ty: None,
                    value: Some(value),
                    is_const: false,
                    short: true,
                })));
            } else {
                match self.parse_simple_statement()? {
                    Statement::Expression(cond) if self.peek_is(TokenKind::LBrace) => {
                        self.next_token();
                        let body = self.parse_block_statement()?;
                        return Some(Statement::For(ForStatement {
                            token,
                            init: None,
                            condition: Some(cond.expression),
                            post: None,
                            body,
                        }));
                    }
                    clause => init = Some(Box::new(clause)),
                }
            }
            self.expect_peek(TokenKind::Semicolon)?;
        }

        let condition = if self.peek_is(TokenKind::Semicolon) {
            None
        } else {
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        self.expect_peek(TokenKind::Semicolon)?;

        let post = if self.peek_is(TokenKind::LBrace) {
            None
        } else {
            self.next_token();
            Some(Box::new(self.parse_simple_statement()?))
        };

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;
        Some(Statement::For(ForStatement { token, init, condition, post, body }))
    }

    /// Collection and body of a range loop, with `cur` on `range`.
    fn parse_range_rest(
        &mut self,
        token: Token,
        key: Option<Identifier>,
        value: Option<Identifier>,
    ) -> Option<RangeStatement> {
        self.next_token();
        let collection = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;
        Some(RangeStatement { token, key, value, collection, body })
    }

    /// `{ stmt* }` with `cur` on `{`. Leaves `cur` on `}`.
    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let token = self.cur.clone();
        let mut statements = Vec::new();
        self.next_token();
        while !self.cur_is(TokenKind::RBrace) {
            if self.cur_is(TokenKind::Eof) {
                self.error_at_cur(format!("expected next token to be }}, got {}", TokenKind::Eof));
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Some(BlockStatement { token, statements })
    }

    fn parse_struct_statement(&mut self) -> Option<StructLiteral> {
        let token = self.cur.clone();
        let name = if self.peek_is(TokenKind::Ident) {
            self.next_token();
            Some(Identifier::from_token(self.cur.clone()))
        } else {
            None
        };
        self.parse_struct_body(token, name)
    }

    /// `type Name struct { ... }`. Other type declarations are rejected.
    fn parse_type_declaration(&mut self) -> Option<StructLiteral> {
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::from_token(self.cur.clone());
        if !self.peek_is(TokenKind::Struct) {
            let msg = format!("only struct type declarations are supported, got {}", self.peek.kind);
            self.errors.push(Diagnostic::syntax(msg, self.peek.position.clone()));
            return None;
        }
        self.next_token();
        let token = self.cur.clone();
        self.parse_struct_body(token, Some(name))
    }

    /// Field list starting at the `{` after `peek`. Fields may be separated
    /// by commas, semicolons or nothing at all.
    fn parse_struct_body(&mut self, token: Token, name: Option<Identifier>) -> Option<StructLiteral> {
        self.expect_peek(TokenKind::LBrace)?;
        self.next_token();
        let mut fields = Vec::new();
        while !self.cur_is(TokenKind::RBrace) {
            match self.cur.kind {
                TokenKind::Comma | TokenKind::Semicolon => {}
                TokenKind::Ident => {
                    let field_name = Identifier::from_token(self.cur.clone());
                    if !self.peek_starts_type() {
                        self.peek_error(TokenKind::Ident);
                        return None;
                    }
                    self.next_token();
                    let ty = self.parse_type()?;
                    fields.push(StructField { name: field_name, ty });
                }
                TokenKind::Eof => {
                    self.error_at_cur(format!("expected next token to be }}, got {}", TokenKind::Eof));
                    return None;
                }
                other => {
                    self.error_at_cur(format!("expected field name, got {other}"));
                    return None;
                }
            }
            self.next_token();
        }
        Some(StructLiteral { token, name, fields })
    }

    // ── Types ───────────────────────────────────────────────────────

    fn parse_type(&mut self) -> Option<TypeExpression> {
        let token = self.cur.clone();
        match self.cur.kind {
            TokenKind::Ident => {
                let mut name = token.literal.clone();
                while self.peek_is(TokenKind::Dot) {
                    self.next_token();
                    self.expect_peek(TokenKind::Ident)?;
                    name.push('.');
                    name.push_str(&self.cur.literal);
                }
                Some(TypeExpression::Named(NamedType { token, name }))
            }
            TokenKind::LBracket => {
                self.expect_peek(TokenKind::RBracket)?;
                self.next_token();
                let element = Box::new(self.parse_type()?);
                Some(TypeExpression::Array(ArrayType { token, element }))
            }
            TokenKind::Map => {
                self.expect_peek(TokenKind::LBracket)?;
                self.next_token();
                let key = Box::new(self.parse_type()?);
                self.expect_peek(TokenKind::RBracket)?;
                self.next_token();
                let value = Box::new(self.parse_type()?);
                Some(TypeExpression::Map(MapType { token, key, value }))
            }
            TokenKind::Struct => self.parse_struct_body(token, None).map(TypeExpression::Struct),
            TokenKind::Interface => {
                self.expect_peek(TokenKind::LBrace)?;
                self.expect_peek(TokenKind::RBrace)?;
                Some(TypeExpression::Named(NamedType { token, name: "interface{}".to_string() }))
            }
            other => {
                self.error_at_cur(format!("expected type, got {other}"));
                None
            }
        }
    }

    // ── Expressions ─────────────────────────────────────────────────

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = Self::prefix_parse_fn(self.cur.kind) else {
            self.error_at_cur(format!("no prefix parse function for {} found", self.cur.kind));
            return None;
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_parse_fn(self.peek.kind) else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }
        Some(left)
    }

    fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn<'src>> {
        let f: PrefixParseFn<'src> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::Float => Self::parse_float_literal,
            TokenKind::Str => Self::parse_string_literal,
            TokenKind::Char => Self::parse_char_literal,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::LParen => Self::parse_grouped_expression,
            TokenKind::LBracket => Self::parse_array_literal,
            TokenKind::LBrace => Self::parse_hash_literal,
            TokenKind::Map => Self::parse_map_literal,
            TokenKind::Bang | TokenKind::Minus | TokenKind::Plus => Self::parse_prefix_expression,
            _ => return None,
        };
        Some(f)
    }

    fn infix_parse_fn(kind: TokenKind) -> Option<InfixParseFn<'src>> {
        let f: InfixParseFn<'src> = match kind {
            k if is_assignment(k) => Self::parse_assignment_expression,
            TokenKind::PlusPlus | TokenKind::MinusMinus => Self::parse_postfix_expression,
            TokenKind::LParen => Self::parse_call_expression,
            TokenKind::LBracket => Self::parse_index_expression,
            TokenKind::Dot => Self::parse_member_expression,
            k if Precedence::of(k) > Precedence::Assign => Self::parse_binary_expression,
            _ => return None,
        };
        Some(f)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::from_token(self.cur.clone())))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match integer_value(&token.literal) {
            Some(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            None => {
                self.error_at_cur(format!("could not parse {} as integer", token.literal));
                None
            }
        }
    }

    fn parse_float_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        match token.literal.parse::<f64>() {
            Ok(value) => Some(Expression::Float(FloatLiteral { token, value })),
            Err(_) => {
                self.error_at_cur(format!("could not parse {} as float", token.literal));
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let value = token.literal.clone();
        Some(Expression::String(StringLiteral { token, value }))
    }

    fn parse_char_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let value = token.literal.clone();
        Some(Expression::Char(CharLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let value = token.kind == TokenKind::True;
        Some(Expression::Boolean(BooleanLiteral { token, value }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Some(expr)
    }

    /// `[a, b]`, or the typed form `[]T{a, b}` when an element type follows
    /// `[]` on the same line.
    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        if self.peek_is(TokenKind::RBracket) {
            self.next_token();
            if !self.peek_starts_type() || self.peek.position.line != self.cur.position.line {
                return Some(Expression::Array(ArrayLiteral { token, elements: Vec::new() }));
            }
            self.next_token();
            self.parse_type()?;
            self.expect_peek(TokenKind::LBrace)?;
            let elements = self.parse_expression_list(TokenKind::RBrace)?;
            return Some(Expression::Array(ArrayLiteral { token, elements }));
        }
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// `map[K]V{k: v}`. The written types are dropped like any other
    /// composite literal's.
    fn parse_map_literal(&mut self) -> Option<Expression> {
        self.parse_type()?;
        self.expect_peek(TokenKind::LBrace)?;
        self.parse_hash_literal()
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let mut pairs = Vec::new();
        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::RBrace)?;
        Some(Expression::Hash(HashLiteral { token, pairs }))
    }

    /// Comma separated expressions through `end`. A trailing comma is allowed.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            if self.peek_is(end) {
                break;
            }
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;
        Some(list)
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal.clone();
        self.next_token();
        let operand = Box::new(self.parse_expression(Precedence::Prefix)?);
        Some(Expression::Unary(UnaryExpression { token, operator, operand, postfix: false }))
    }

    fn parse_postfix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal.clone();
        Some(Expression::Unary(UnaryExpression { token, operator, operand: Box::new(left), postfix: true }))
    }

    /// Left-associative: the right operand binds at the operator's own level.
    fn parse_binary_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal.clone();
        let precedence = self.cur_precedence();
        self.next_token();
        let right = Box::new(self.parse_expression(precedence)?);
        Some(Expression::Binary(BinaryExpression { token, operator, left: Box::new(left), right }))
    }

    fn parse_assignment_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = token.literal.clone();
        self.next_token();
        let right = Box::new(self.parse_expression(Precedence::Lowest)?);
        Some(Expression::Assignment(AssignmentExpression { token, operator, left: Box::new(left), right }))
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression { token, callee: Box::new(callee), arguments }))
    }

    fn parse_index_expression(&mut self, base: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        self.next_token();
        let index = Box::new(self.parse_expression(Precedence::Lowest)?);
        self.expect_peek(TokenKind::RBracket)?;
        Some(Expression::Index(IndexExpression { token, base: Box::new(base), index }))
    }

    fn parse_member_expression(&mut self, object: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        self.expect_peek(TokenKind::Ident)?;
        let property = Identifier::from_token(self.cur.clone());
        Some(Expression::Member(MemberExpression { token, object: Box::new(object), property }))
    }
}
