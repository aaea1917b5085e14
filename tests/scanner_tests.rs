//! End-to-end tests for the S-expression scanner

use sexpr_scan::{
    CharSource, Position, SExprScanner, Scanner, SourceError, Token, TokenKind, Value,
};

fn scan_all(source: &str) -> Vec<Token> {
    Scanner::new(source).tokens().collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|t| t.kind).collect()
}

// ====================
// Structural tokens
// ====================

#[test]
fn test_empty_input() {
    let tokens = scan_all("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
    assert_eq!(tokens[0].position(), Position::new(1, 1));
    assert_eq!(tokens[0].raw, "");
}

#[test]
fn test_nested_parens() {
    let tokens = scan_all("((()))");
    assert_eq!(tokens.len(), 7);
    for (i, token) in tokens[..3].iter().enumerate() {
        assert_eq!(token.kind, TokenKind::OpenParen);
        assert_eq!(token.col, i + 1);
    }
    for (i, token) in tokens[3..6].iter().enumerate() {
        assert_eq!(token.kind, TokenKind::CloseParen);
        assert_eq!(token.col, i + 4);
    }
    assert_eq!(tokens[6].kind, TokenKind::EndOfInput);
}

#[test]
fn test_comment_inside_list() {
    let source = "(;This is my opening comment\n\t\t\t))))";
    let tokens = scan_all(source);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::OpenParen,
            TokenKind::Comment,
            TokenKind::CloseParen,
            TokenKind::CloseParen,
            TokenKind::CloseParen,
            TokenKind::CloseParen,
            TokenKind::EndOfInput,
        ]
    );
    assert_eq!(tokens[1].raw, ";This is my opening comment");
    assert_eq!(tokens[1].position(), Position::new(1, 2));
    assert_eq!(tokens[2].position(), Position::new(2, 4));
}

// ====================
// Comments and line counting
// ====================

#[test]
fn test_comment_then_list() {
    let tokens = scan_all("; a comment\n(next)");
    assert_eq!(tokens.len(), 5);

    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].raw, "; a comment");
    assert_eq!(tokens[0].position(), Position::new(1, 1));

    assert_eq!(tokens[1].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].position(), Position::new(2, 1));

    assert_eq!(tokens[2].value, Value::String("next".to_string()));
    assert_eq!(tokens[2].position(), Position::new(2, 2));

    assert_eq!(tokens[3].kind, TokenKind::CloseParen);
    assert_eq!(tokens[4].kind, TokenKind::EndOfInput);
}

#[test]
fn test_comment_block() {
    let source = "; This is a comment\n; This too is a comment\n;;;;\n";
    let tokens = scan_all(source);
    let raws: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .map(|t| t.raw.as_str())
        .collect();
    assert_eq!(
        raws,
        vec!["; This is a comment", "; This too is a comment", ";;;;"]
    );
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
    assert_eq!(tokens[2].row, 3);
}

// ====================
// Atoms
// ====================

#[test]
fn test_atom_alone() {
    let tokens = scan_all("test");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Atom);
    assert_eq!(tokens[0].value, Value::String("test".to_string()));
    assert_eq!(tokens[0].raw, "test");
    assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
}

#[test]
fn test_atom_trailing_underscore() {
    let tokens = scan_all("test_");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].raw, "test_");
    assert_eq!(tokens[0].error_message(), Some("Invalid Atom[test_]"));
}

#[test]
fn test_atom_followed_by_unexpected() {
    // The atom is complete; `#` is reported by the next call
    assert_eq!(kinds("abc#"), vec![TokenKind::Atom, TokenKind::Error]);
}

// ====================
// Numbers
// ====================

#[test]
fn test_integer_literals() {
    let tokens = scan_all("123");
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, Value::Int(123));
    assert_eq!(tokens[1].kind, TokenKind::EndOfInput);

    assert_eq!(scan_all("-123")[0].value, Value::Int(-123));
}

#[test]
fn test_float_literals() {
    assert_eq!(scan_all(".05")[0].value, Value::Float(0.05));
    assert_eq!(scan_all("-.05")[0].value, Value::Float(-0.05));
    assert_eq!(scan_all("(3.25)")[1].value, Value::Float(3.25));
}

#[test]
fn test_digit_followed_by_letter() {
    let tokens = scan_all("4s4");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].raw, "4");
}

#[test]
fn test_tab_does_not_terminate_number() {
    // Only a newline, a parenthesis, a plain space or end of input may follow
    let tokens = scan_all("12\t");
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].error_message(), Some("Invalid Number[12]"));

    assert_eq!(
        kinds("12 \t"),
        vec![TokenKind::Number, TokenKind::EndOfInput]
    );
}

#[test]
fn test_list_of_numbers() {
    let tokens = scan_all("(1 -2 3.5\n4)");
    let values: Vec<&Value> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| &t.value)
        .collect();
    assert_eq!(
        values,
        vec![
            &Value::Int(1),
            &Value::Int(-2),
            &Value::Float(3.5),
            &Value::Int(4)
        ]
    );
    assert_eq!(tokens[4].position(), Position::new(2, 1));
}

// ====================
// Sources
// ====================

struct FlakySource {
    chars: Vec<char>,
    fail_at: usize,
    index: usize,
}

impl CharSource for FlakySource {
    fn fetch(&mut self) -> Result<Option<char>, SourceError> {
        let i = self.index;
        self.index += 1;
        if i == self.fail_at {
            return Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "device gone",
            )));
        }
        Ok(self.chars.get(i).copied())
    }
}

#[test]
fn test_source_failure_mid_comment() {
    let mut source = FlakySource {
        chars: "; abc".chars().collect(),
        fail_at: 3,
        index: 0,
    };
    let mut scanner = SExprScanner::from_source(&mut source);
    let token = scanner.next_token();
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.error_message(), Some("Rune Error"));
    assert_eq!(token.raw, "; a");
}

#[test]
fn test_source_failure_after_number() {
    let source = FlakySource {
        chars: "42".chars().collect(),
        fail_at: 2,
        index: 0,
    };
    let token = SExprScanner::from_source(source).next_token();
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.error_message(), Some("Rune Error"));
    assert_eq!(token.raw, "42");
}

#[test]
fn test_source_failure_after_atom() {
    let mut source = FlakySource {
        chars: "ab".chars().collect(),
        fail_at: 2,
        index: 0,
    };
    let mut scanner = SExprScanner::from_source(&mut source);
    let atom = scanner.next_token();
    assert_eq!(atom.kind, TokenKind::Atom);
    assert_eq!(atom.value, Value::String("ab".to_string()));

    let err = scanner.next_token();
    assert_eq!(err.kind, TokenKind::Error);
    assert_eq!(err.error_message(), Some("Rune Error"));
    assert_eq!(err.raw, "");
    assert_eq!(err.position(), Position::new(1, 3));
}

#[test]
fn test_borrowed_source_stays_with_caller() {
    let mut chars = "a b".chars();
    {
        let mut scanner = SExprScanner::from_source(&mut chars);
        assert_eq!(scanner.next_token().as_atom(), Some("a"));
    }
    // The scanner peeked the space; the rest is still ours
    assert_eq!(chars.as_str(), "b");
}

#[test]
fn test_reader_matches_str() {
    let source = "(λ (x) 'x) ; id\n(1.5 -3)";
    let from_str = scan_all(source);
    let from_reader: Vec<Token> = SExprScanner::from_reader(source.as_bytes())
        .tokens()
        .collect();
    assert_eq!(from_str, from_reader);
}

// ====================
// Serialization
// ====================

#[test]
fn test_token_serializes() {
    let token = scan_all("(x")[1].clone();
    let json = serde_json::to_string(&token).unwrap();
    let back: Token = serde_json::from_str(&json).unwrap();
    assert_eq!(back, token);
    assert!(json.contains("\"Atom\""));
}
