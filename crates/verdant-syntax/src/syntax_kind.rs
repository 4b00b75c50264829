use crate::SyntaxSet;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    WHITESPACE_TRIVIA,
    END_OF_LINE_TRIVIA,
    SINGLE_LINE_COMMENT_TRIVIA,
    MULTI_LINE_COMMENT_TRIVIA,
    DOCUMENTATION_COMMENT_TRIVIA,
    DISABLED_TEXT_TRIVIA,
    SKIPPED_TOKENS_TRIVIA,
    PREPROCESSING_MESSAGE_TRIVIA,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    SEMICOLON,
    DOT,
    EQ,
    PLUS,
    MINUS,
    STAR,
    SLASH,

    FUN_KW,
    VAL_KW,
    IF_KW,
    ELSE_KW,
    RETURN_KW,
    IDENT,
    NUMBER,
    STRING,

    UNKNOWN,
    EOF,

    MODULE,
    LIST,
    FUNCTION,
    PARAM_LIST,
    BLOCK,
    VAL_DECL,
    EXPR_STMT,
    RETURN_STMT,
    IF_EXPR,
    BINARY_EXPR,
    PREFIX_EXPR,
    CALL_EXPR,
    ARG_LIST,
    PAREN_EXPR,
    LITERAL,
    NAME_REF,
    ERROR,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Every kind, indexed by its wire tag.
    pub const ALL: [Self; 47] = [
        WHITESPACE_TRIVIA,
        END_OF_LINE_TRIVIA,
        SINGLE_LINE_COMMENT_TRIVIA,
        MULTI_LINE_COMMENT_TRIVIA,
        DOCUMENTATION_COMMENT_TRIVIA,
        DISABLED_TEXT_TRIVIA,
        SKIPPED_TOKENS_TRIVIA,
        PREPROCESSING_MESSAGE_TRIVIA,
        LEFT_PAREN,
        RIGHT_PAREN,
        LEFT_BRACE,
        RIGHT_BRACE,
        COMMA,
        SEMICOLON,
        DOT,
        EQ,
        PLUS,
        MINUS,
        STAR,
        SLASH,
        FUN_KW,
        VAL_KW,
        IF_KW,
        ELSE_KW,
        RETURN_KW,
        IDENT,
        NUMBER,
        STRING,
        UNKNOWN,
        EOF,
        MODULE,
        LIST,
        FUNCTION,
        PARAM_LIST,
        BLOCK,
        VAL_DECL,
        EXPR_STMT,
        RETURN_STMT,
        IF_EXPR,
        BINARY_EXPR,
        PREFIX_EXPR,
        CALL_EXPR,
        ARG_LIST,
        PAREN_EXPR,
        LITERAL,
        NAME_REF,
        ERROR,
    ];

    /// Decodes a wire tag.
    pub const fn from_raw(raw: u16) -> Option<Self> {
        let index = raw as usize;
        if index < Self::ALL.len() { Some(Self::ALL[index]) } else { None }
    }

    pub const fn to_raw(self) -> u16 {
        self as u16
    }

    pub const fn is_trivia(self) -> bool {
        SyntaxSet::TRIVIA.contains(self)
    }

    pub const fn is_token(self) -> bool {
        SyntaxSet::TOKENS.contains(self)
    }

    /// Composite kinds: everything that is neither trivia nor a token.
    pub const fn is_node(self) -> bool {
        SyntaxSet::NODES.contains(self)
    }
}
