//! Recursive-descent parser for the expression grammar
//!
//! The grammar is deliberately small and fixed. A program is a sequence of
//! expression statements, separated by `;` or ends of line. An expression is
//! an identifier, an integer or string literal, a member access `expr.Name`,
//! or a call `expr(arg, ...)`.

use crate::error::ParseError;
use crate::syntax::{CallExpr, Expr, IdentExpr, LiteralExpr, MemberExpr, Span};

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Ident(String),
    Int(String),
    Str(String),
    Dot,
    Comma,
    LParen,
    RParen,
    Semi,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{}`", name),
            TokenKind::Int(text) => format!("number `{}`", text),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Dot => "`.`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Semi => "`;`".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    span: Span,
}

fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        match byte {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
            }
            b'.' | b',' | b'(' | b')' | b';' => {
                let kind = match byte {
                    b'.' => TokenKind::Dot,
                    b',' => TokenKind::Comma,
                    b'(' => TokenKind::LParen,
                    b')' => TokenKind::RParen,
                    _ => TokenKind::Semi,
                };
                tokens.push(Token {
                    kind,
                    span: Span::new(pos, 1),
                });
                pos += 1;
            }
            b'"' => {
                let start = pos;
                pos += 1;
                while pos < bytes.len() && bytes[pos] != b'"' {
                    pos += 1;
                }
                if pos == bytes.len() {
                    return Err(ParseError::new(start, "unterminated string literal"));
                }
                pos += 1; // closing quote
                tokens.push(Token {
                    kind: TokenKind::Str(source[start..pos].to_string()),
                    span: Span::new(start, pos - start),
                });
            }
            b'0'..=b'9' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Int(source[start..pos].to_string()),
                    span: Span::new(start, pos - start),
                });
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                let start = pos;
                while pos < bytes.len()
                    && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(source[start..pos].to_string()),
                    span: Span::new(start, pos - start),
                });
            }
            _ => {
                return Err(ParseError::new(
                    pos,
                    format!("unexpected character `{}`", source[pos..].chars().next().unwrap_or('?')),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Parse source text into expression statements.
pub fn parse(source: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        eof: source.len(),
    };
    parser.program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: usize,
}

impl Parser {
    fn program(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut statements = Vec::new();
        while self.eat(&TokenKind::Semi) {}
        while self.peek().is_some() {
            statements.push(self.expr()?);
            while self.eat(&TokenKind::Semi) {}
        }
        Ok(statements)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let (member, member_span) = self.ident("expected member name after `.`")?;
                let span = Span::cover(expr.span(), member_span);
                expr = Expr::Member(MemberExpr {
                    base: Box::new(expr),
                    member,
                    member_span,
                    span,
                });
            } else if self.eat(&TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        args.push(self.expr()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                let close = self.expect(&TokenKind::RParen, "expected `)` after arguments")?;
                let span = Span::cover(expr.span(), close);
                expr = Expr::Call(CallExpr {
                    callee: Box::new(expr),
                    args,
                    span,
                });
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) => Ok(Expr::Ident(IdentExpr { name, span })),
            Some(Token {
                kind: TokenKind::Int(text),
                span,
            })
            | Some(Token {
                kind: TokenKind::Str(text),
                span,
            }) => Ok(Expr::Literal(LiteralExpr { text, span })),
            Some(token) => Err(ParseError::new(
                token.span.start,
                format!("expected expression, found {}", token.kind.describe()),
            )),
            None => Err(ParseError::new(self.eof, "unexpected end of input")),
        }
    }

    fn ident(&mut self, message: &str) -> Result<(String, Span), ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) => Ok((name, span)),
            Some(token) => Err(ParseError::new(token.span.start, message)),
            None => Err(ParseError::new(self.eof, message)),
        }
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<Span, ParseError> {
        match self.advance() {
            Some(token) if token.kind == *kind => Ok(token.span),
            Some(token) => Err(ParseError::new(
                token.span.start,
                format!("{}, found {}", message, token.kind.describe()),
            )),
            None => Err(ParseError::new(self.eof, message)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == *kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxTree;

    #[test]
    fn test_parse_identifier() {
        let tree = SyntaxTree::parse("message").unwrap();
        assert_eq!(tree.statements().len(), 1);
        let ident = tree.statements()[0].as_ident().unwrap();
        assert_eq!(ident.name, "message");
        assert_eq!(ident.span, Span::new(0, 7));
    }

    #[test]
    fn test_parse_member_chain() {
        let tree = SyntaxTree::parse("message.Chat.Id").unwrap();
        let id = tree.statements()[0].as_member().unwrap();
        assert_eq!(id.member, "Id");
        assert_eq!(id.span, Span::new(0, 15));

        let chat = id.base.as_member().unwrap();
        assert_eq!(chat.member, "Chat");
        assert_eq!(chat.span, Span::new(0, 12));
        assert_eq!(chat.base.as_ident().unwrap().name, "message");
    }

    #[test]
    fn test_parse_call_with_arguments() {
        let tree = SyntaxTree::parse("edit(message.Chat, 123, \"text\")").unwrap();
        let call = tree.statements()[0].as_call().unwrap();
        assert_eq!(call.method_name(), Some("edit"));
        assert_eq!(call.args.len(), 3);
        assert_eq!(tree.text(call.args[0].span()), "message.Chat");
        assert_eq!(tree.text(call.args[1].span()), "123");
        assert_eq!(tree.text(call.args[2].span()), "\"text\"");
        assert_eq!(call.span, Span::new(0, 31));
    }

    #[test]
    fn test_parse_method_call_on_receiver() {
        let tree = SyntaxTree::parse("bot.DeleteMessageAsync(message.Chat, message.MessageId)").unwrap();
        let call = tree.statements()[0].as_call().unwrap();
        assert_eq!(call.method_name(), Some("DeleteMessageAsync"));
        assert_eq!(call.args.len(), 2);
    }

    #[test]
    fn test_parse_empty_argument_list() {
        let tree = SyntaxTree::parse("poll()").unwrap();
        let call = tree.statements()[0].as_call().unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_parse_nested_call() {
        let tree = SyntaxTree::parse("outer(inner(x), y)").unwrap();
        let call = tree.statements()[0].as_call().unwrap();
        assert_eq!(call.args.len(), 2);
        assert!(call.args[0].as_call().is_some());
    }

    #[test]
    fn test_parse_multiple_statements() {
        let tree = SyntaxTree::parse("send(1);\nedit(2)\n").unwrap();
        assert_eq!(tree.statements().len(), 2);
    }

    #[test]
    fn test_parse_spans_account_for_whitespace() {
        let source = "edit( message.Chat ,  message.MessageId )";
        let tree = SyntaxTree::parse(source).unwrap();
        let call = tree.statements()[0].as_call().unwrap();
        assert_eq!(tree.text(call.args[0].span()), "message.Chat");
        assert_eq!(tree.text(call.args[1].span()), "message.MessageId");
    }

    #[test]
    fn test_parse_error_unterminated_string() {
        let err = SyntaxTree::parse("send(\"oops").unwrap_err();
        assert_eq!(err.offset, 5);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_parse_error_missing_member_name() {
        let err = SyntaxTree::parse("message.").unwrap_err();
        assert!(err.message.contains("member name"));
    }

    #[test]
    fn test_parse_error_unexpected_character() {
        let err = SyntaxTree::parse("send(1) @").unwrap_err();
        assert_eq!(err.offset, 8);
    }

    #[test]
    fn test_parse_error_unclosed_call() {
        let err = SyntaxTree::parse("send(1").unwrap_err();
        assert!(err.message.contains("`)`"));
    }
}
