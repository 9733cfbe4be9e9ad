use std::fmt;

use crate::lexer::Token;
use crate::position::Position;

/// Common capabilities of every syntax tree node.
pub trait Node: fmt::Display {
    /// Text of the token that introduced the node.
    fn token_literal(&self) -> &str;
    fn position(&self) -> &Position;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Package(PackageStatement),
    Import(ImportStatement),
    ImportGroup(ImportGroup),
    Function(FunctionStatement),
    Variable(VariableStatement),
    Return(ReturnStatement),
    If(IfStatement),
    For(ForStatement),
    Range(RangeStatement),
    Branch(BranchStatement),
    Block(BlockStatement),
    Struct(StructLiteral),
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageStatement {
    pub token: Token,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub token: Token,
    pub alias: Option<Identifier>,
    /// Import path without surrounding quotes.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportGroup {
    pub token: Token,
    pub imports: Vec<ImportStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub token: Token,
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpression>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub ty: Option<TypeExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableStatement {
    pub token: Token,
    pub name: Identifier,
    pub ty: Option<TypeExpression>,
    pub value: Option<Expression>,
    pub is_const: bool,
    /// Written as `name := value`.
    pub short: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub token: Token,
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub token: Token,
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub post: Option<Box<Statement>>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStatement {
    pub token: Token,
    pub key: Option<Identifier>,
    pub value: Option<Identifier>,
    pub collection: Expression,
    pub body: BlockStatement,
}

/// `break` or `continue`, told apart by the token kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchStatement {
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructLiteral {
    pub token: Token,
    pub name: Option<Identifier>,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: Identifier,
    pub ty: TypeExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Boolean(BooleanLiteral),
    String(StringLiteral),
    Char(CharLiteral),
    Array(ArrayLiteral),
    Hash(HashLiteral),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Assignment(AssignmentExpression),
    Member(MemberExpression),
    Index(IndexExpression),
    Call(CallExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn from_token(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

/// `value` is parsed; the token keeps the source spelling for output.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// Raw text between the quotes, escapes untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

/// Pairs keep source order.
#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub token: Token,
    pub operator: String,
    pub operand: Box<Expression>,
    /// `x++` / `x--`
    pub postfix: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub token: Token,
    pub object: Box<Expression>,
    pub property: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub base: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// Type references: named, `[]T`, `map[K]V`, or an inline struct.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpression {
    Named(NamedType),
    Array(ArrayType),
    Map(MapType),
    Struct(StructLiteral),
}

/// A possibly qualified type name such as `int` or `http.Request`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub token: Token,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub token: Token,
    pub element: Box<TypeExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub token: Token,
    pub key: Box<TypeExpression>,
    pub value: Box<TypeExpression>,
}

macro_rules! token_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn token_literal(&self) -> &str {
                    &self.token.literal
                }

                fn position(&self) -> &Position {
                    &self.token.position
                }
            }
        )*
    };
}

token_node!(
    PackageStatement,
    ImportStatement,
    ImportGroup,
    FunctionStatement,
    VariableStatement,
    ReturnStatement,
    IfStatement,
    ForStatement,
    RangeStatement,
    BranchStatement,
    BlockStatement,
    StructLiteral,
    ExpressionStatement,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    BooleanLiteral,
    StringLiteral,
    CharLiteral,
    ArrayLiteral,
    HashLiteral,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    MemberExpression,
    IndexExpression,
    CallExpression,
    NamedType,
    ArrayType,
    MapType,
);

macro_rules! dispatch_node {
    ($enum:ident { $($variant:ident),* $(,)? }) => {
        impl Node for $enum {
            fn token_literal(&self) -> &str {
                match self {
                    $($enum::$variant(n) => n.token_literal(),)*
                }
            }

            fn position(&self) -> &Position {
                match self {
                    $($enum::$variant(n) => n.position(),)*
                }
            }
        }

        impl fmt::Display for $enum {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($enum::$variant(n) => fmt::Display::fmt(n, f),)*
                }
            }
        }
    };
}

dispatch_node!(Statement {
    Package,
    Import,
    ImportGroup,
    Function,
    Variable,
    Return,
    If,
    For,
    Range,
    Branch,
    Block,
    Struct,
    Expression,
});

dispatch_node!(Expression {
    Identifier,
    Integer,
    Float,
    Boolean,
    String,
    Char,
    Array,
    Hash,
    Unary,
    Binary,
    Assignment,
    Member,
    Index,
    Call,
});

dispatch_node!(TypeExpression { Named, Array, Map, Struct });

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements.first().map_or("", |s| s.token_literal())
    }

    fn position(&self) -> &Position {
        &self.position
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(sep)
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PackageStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package {}", self.name)
    }
}

impl fmt::Display for ImportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "import {alias} \"{}\"", self.path),
            None => write!(f, "import \"{}\"", self.path),
        }
    }
}

impl fmt::Display for ImportGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import (")?;
        for (i, import) in self.imports.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            if let Some(alias) = &import.alias {
                write!(f, "{alias} ")?;
            }
            write!(f, "\"{}\"", import.path)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{} {ty}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for FunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}({})", self.token.literal, self.name, join(&self.parameters, ", "))?;
        if let Some(ret) = &self.return_type {
            write!(f, " {ret}")?;
        }
        write!(f, " {}", self.body)
    }
}

impl fmt::Display for VariableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.short {
            write!(f, "{} := ", self.name)?;
            if let Some(value) = &self.value {
                write!(f, "{value}")?;
            }
            return Ok(());
        }
        let keyword = if self.is_const { "const" } else { "var" };
        write!(f, "{keyword} {}", self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, " {ty}")?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {value}"),
            None => write!(f, "return"),
        }
    }
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} {}", self.condition, self.consequence)?;
        if let Some(alt) = &self.alternative {
            write!(f, " else {alt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ForStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for ")?;
        if self.init.is_none() && self.post.is_none() {
            if let Some(cond) = &self.condition {
                write!(f, "{cond} ")?;
            }
            return write!(f, "{}", self.body);
        }
        if let Some(init) = &self.init {
            write!(f, "{init}")?;
        }
        write!(f, "; ")?;
        if let Some(cond) = &self.condition {
            write!(f, "{cond}")?;
        }
        write!(f, "; ")?;
        if let Some(post) = &self.post {
            write!(f, "{post}")?;
        }
        write!(f, " {}", self.body)
    }
}

impl fmt::Display for RangeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for ")?;
        match (&self.key, &self.value) {
            (Some(key), Some(value)) => write!(f, "{key}, {value} := ")?,
            (Some(only), None) | (None, Some(only)) => write!(f, "{only} := ")?,
            (None, None) => {}
        }
        write!(f, "range {} {}", self.collection, self.body)
    }
}

impl fmt::Display for BranchStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.literal)
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ {} }}", join(&self.statements, "; "))
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

impl fmt::Display for StructLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "type {name} ")?;
        }
        if self.fields.is_empty() {
            return write!(f, "struct {{}}");
        }
        write!(f, "struct {{ {} }}", join(&self.fields, "; "))
    }
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.literal)
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

impl fmt::Display for CharLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.value)
    }
}

impl fmt::Display for ArrayLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join(&self.elements, ", "))
    }
}

impl fmt::Display for HashLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.pairs.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.postfix {
            write!(f, "({}{})", self.operand, self.operator)
        } else {
            write!(f, "({}{})", self.operator, self.operand)
        }
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

impl fmt::Display for AssignmentExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl fmt::Display for MemberExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

impl fmt::Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.base, self.index)
    }
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.callee, join(&self.arguments, ", "))
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[]{}", self.element)
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map[{}]{}", self.key, self.value)
    }
}
