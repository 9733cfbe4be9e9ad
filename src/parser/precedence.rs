use crate::lexer::TokenKind;

/// Binding strength of infix and postfix operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Assign,
    LogicalOr,
    LogicalAnd,
    Equals,
    LessGreater,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Sum,
    Product,
    Prefix,
    Postfix,
    Call,
    Index,
    Member,
}

impl Precedence {
    /// Precedence of `kind` when it appears in infix or postfix position.
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Assign
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::AmpEq
            | TokenKind::PipeEq
            | TokenKind::CaretEq
            | TokenKind::ShlEq
            | TokenKind::ShrEq => Precedence::Assign,
            TokenKind::PipePipe => Precedence::LogicalOr,
            TokenKind::AmpAmp => Precedence::LogicalAnd,
            TokenKind::EqEq | TokenKind::BangEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => Precedence::LessGreater,
            TokenKind::Pipe => Precedence::BitOr,
            TokenKind::Caret => Precedence::BitXor,
            TokenKind::Amp => Precedence::BitAnd,
            TokenKind::Shl | TokenKind::Shr => Precedence::Shift,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
            TokenKind::PlusPlus | TokenKind::MinusMinus => Precedence::Postfix,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            TokenKind::Dot => Precedence::Member,
            _ => Precedence::Lowest,
        }
    }
}

pub fn is_assignment(kind: TokenKind) -> bool {
    Precedence::of(kind) == Precedence::Assign
}
