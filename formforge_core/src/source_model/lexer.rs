//! Java declaration lexer using the logos crate.
//!
//! Tokenizes just enough of the language to recover declaration structure:
//! bodies, initializers and annotation element expressions are consumed as
//! balanced token runs and sliced back out of the original source by span.

use logos::Logos;

/// Tokens for Java compilation units.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,

    #[token("import")]
    Import,

    #[token("class")]
    Class,

    #[token("interface")]
    Interface,

    #[token("enum")]
    Enum,

    #[token("extends")]
    Extends,

    #[token("implements")]
    Implements,

    #[token("throws")]
    Throws,

    #[token("public")]
    Public,

    #[token("protected")]
    Protected,

    #[token("private")]
    Private,

    #[token("static")]
    Static,

    #[token("final")]
    Final,

    #[token("abstract")]
    Abstract,

    #[token("native")]
    Native,

    #[token("synchronized")]
    Synchronized,

    #[token("transient")]
    Transient,

    #[token("volatile")]
    Volatile,

    #[token("strictfp")]
    Strictfp,

    #[token("default")]
    Default,

    // Punctuation
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("=")]
    Equals,

    #[token(".")]
    Dot,

    #[token("@")]
    At,

    #[token("?")]
    Question,

    #[token("&")]
    Amp,

    #[token("...")]
    Ellipsis,

    // Anything operator-like inside expressions that the structural parser
    // only ever skips over while balancing delimiters.
    #[regex(r"[+\-*/%!^|~]", |lex| lex.slice().to_string())]
    Operator(String),

    // Literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_string())]
    StringLiteral(String),

    #[regex(r"'([^'\\]|\\.)*'", |lex| lex.slice().to_string())]
    CharLiteral(String),

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[fFdD]?", |lex| lex.slice().to_string())]
    FloatLiteral(String),

    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9][0-9_]*[lLfFdD]?", |lex| lex.slice().to_string())]
    IntegerLiteral(String),

    // Identifiers (must come after keywords)
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Comments
    #[regex(r"//[^\n]*", |lex| lex.slice().to_string(), allow_greedy = true)]
    LineComment(String),

    #[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", |lex| lex.slice().to_string(), priority = 10)]
    DocComment(String),

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| lex.slice().to_string())]
    BlockComment(String),
}

/// A token with its span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a Java compilation unit.
///
/// Line and plain block comments are dropped; doc comments are kept so the
/// parser can attach them to the following declaration.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => {
                if !matches!(token, Token::LineComment(_) | Token::BlockComment(_)) {
                    tokens.push(SpannedToken {
                        token,
                        span: lexer.span(),
                    });
                }
            }
            Err(()) => {
                return Err(LexError {
                    span: lexer.span(),
                    message: format!(
                        "Unexpected token: '{}'",
                        &source[lexer.span().start..lexer.span().end.min(source.len())]
                    ),
                });
            }
        }
    }

    Ok(tokens)
}

/// Lexer error.
#[derive(Debug, Clone)]
pub struct LexError {
    pub span: std::ops::Range<usize>,
    pub message: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lex error at {:?}: {}", self.span, self.message)
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_class_declaration() {
        let source = r#"
            public class Person extends AbstractEntity {
                private String m_name;
            }
        "#;

        let tokens = tokenize(source).unwrap();
        assert!(tokens.iter().any(|t| matches!(&t.token, Token::Class)));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::Identifier(s) if s == "Person")));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::Identifier(s) if s == "m_name")));
    }

    #[test]
    fn test_tokenize_annotation_with_elements() {
        let source = r#"@FormData(value = PersonFormData.class, sdkCommand = SdkCommand.CREATE)"#;

        let tokens = tokenize(source).unwrap();
        assert!(matches!(&tokens[0].token, Token::At));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::Identifier(s) if s == "sdkCommand")));
    }

    #[test]
    fn test_doc_comments_kept_plain_comments_dropped() {
        let source = "/** docs */\n// line\n/* block */\nclass A {}";

        let tokens = tokenize(source).unwrap();
        assert!(matches!(&tokens[0].token, Token::DocComment(_)));
        assert!(!tokens
            .iter()
            .any(|t| matches!(&t.token, Token::LineComment(_) | Token::BlockComment(_))));
    }

    #[test]
    fn test_tokenize_generic_signature() {
        let source = "HashMap<String, List<IService>> getMap();";

        let tokens = tokenize(source).unwrap();
        let lt = tokens.iter().filter(|t| t.token == Token::Lt).count();
        let gt = tokens.iter().filter(|t| t.token == Token::Gt).count();
        assert_eq!(lt, 2);
        assert_eq!(gt, 2);
    }

    #[test]
    fn test_tokenize_literals() {
        let source = r#"int a = 0x1F; long b = 42L; double c = 3.5; String d = "x\"y"; char e = '\u0000';"#;

        let tokens = tokenize(source).unwrap();
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::IntegerLiteral(s) if s == "0x1F")));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::IntegerLiteral(s) if s == "42L")));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::FloatLiteral(s) if s == "3.5")));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::StringLiteral(s) if s == "\"x\\\"y\"")));
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::CharLiteral(s) if s == "'\\u0000'")));
    }
}
