//! C# lexer.
//!
//! Produces tokens with attached trivia. A token's trailing trivia runs up to
//! and including the first end of line; everything else leads the next token.
//! Conditional-compilation directives are evaluated while lexing so inactive
//! regions come out as disabled text.

use std::collections::HashSet;

use unicode_xid::UnicodeXID;

use crate::domain::syntax::{Diagnostic, SyntaxKind, TextRange, Trivia, TriviaKind};

#[derive(Debug, Clone)]
pub struct LexedToken {
    pub kind: SyntaxKind,
    pub text: String,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
    /// Offset of the token text, after its leading trivia.
    pub offset: usize,
}

impl LexedToken {
    pub fn span(&self) -> TextRange {
        TextRange::new(self.offset, self.offset + self.text.len())
    }

    pub fn has_leading_newline(&self) -> bool {
        self.leading.iter().any(|t| t.kind == TriviaKind::EndOfLine)
    }
}

#[derive(Debug)]
pub struct Lexed {
    /// Always ends with an `EndOfFile` token.
    pub tokens: Vec<LexedToken>,
    pub diagnostics: Vec<Diagnostic>,
}

enum Piece {
    Trivia(Trivia),
    Token(SyntaxKind, String, usize),
}

struct Frame {
    parent_active: bool,
    taken: bool,
    active: bool,
}

struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    at_line_start: bool,
    symbols: HashSet<String>,
    frames: Vec<Frame>,
    pieces: Vec<Piece>,
    diagnostics: Vec<Diagnostic>,
}

pub fn lex(src: &str, symbols: &[String]) -> Lexed {
    let mut lexer = Lexer {
        src,
        pos: 0,
        at_line_start: true,
        symbols: symbols.iter().cloned().collect(),
        frames: Vec::new(),
        pieces: Vec::new(),
        diagnostics: Vec::new(),
    };
    lexer.run();
    if !lexer.frames.is_empty() {
        lexer
            .diagnostics
            .push(Diagnostic::new("#endif directive expected", TextRange::empty(src.len())));
    }
    Lexed {
        tokens: attach(lexer.pieces, src.len()),
        diagnostics: lexer.diagnostics,
    }
}

fn attach(pieces: Vec<Piece>, end: usize) -> Vec<LexedToken> {
    let mut tokens = Vec::new();
    let mut leading = Vec::new();
    let mut iter = pieces.into_iter().peekable();
    while let Some(piece) = iter.next() {
        match piece {
            Piece::Trivia(t) => leading.push(t),
            Piece::Token(kind, text, offset) => {
                let mut trailing = Vec::new();
                while let Some(Piece::Trivia(next)) = iter.peek() {
                    if matches!(next.kind, TriviaKind::Directive | TriviaKind::DisabledText) {
                        break;
                    }
                    let is_eol = next.kind == TriviaKind::EndOfLine;
                    if let Some(Piece::Trivia(t)) = iter.next() {
                        trailing.push(t);
                    }
                    if is_eol {
                        break;
                    }
                }
                tokens.push(LexedToken {
                    kind,
                    text,
                    leading: std::mem::take(&mut leading),
                    trailing,
                    offset,
                });
            }
        }
    }
    tokens.push(LexedToken {
        kind: SyntaxKind::EndOfFile,
        text: String::new(),
        leading,
        trailing: Vec::new(),
        offset: end,
    });
    tokens
}

impl<'s> Lexer<'s> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn active(&self) -> bool {
        self.frames.last().map(|f| f.active).unwrap_or(true)
    }

    fn trivia(&mut self, kind: TriviaKind, start: usize) {
        let text = &self.src[start..self.pos];
        if kind == TriviaKind::DisabledText {
            if let Some(Piece::Trivia(last)) = self.pieces.last_mut() {
                if last.kind == TriviaKind::DisabledText {
                    last.text.push_str(text);
                    return;
                }
            }
        }
        self.pieces.push(Piece::Trivia(Trivia::new(kind, text)));
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.diagnostics
            .push(Diagnostic::new(message, TextRange::new(start, self.pos)));
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            if self.at_line_start && !self.active() {
                self.disabled_line();
                continue;
            }
            let start = self.pos;
            match c {
                '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}' => {
                    self.bump();
                    if c == '\r' && self.peek() == Some('\n') {
                        self.bump();
                    }
                    self.trivia(TriviaKind::EndOfLine, start);
                    self.at_line_start = true;
                }
                c if is_whitespace(c) => {
                    while self.peek().is_some_and(is_whitespace) {
                        self.bump();
                    }
                    self.trivia(TriviaKind::Whitespace, start);
                }
                '/' if self.peek_at(1) == Some('/') => {
                    let doc = self.rest().starts_with("///") && !self.rest().starts_with("////");
                    self.skip_to_line_end();
                    let kind = if doc {
                        TriviaKind::DocumentationComment
                    } else {
                        TriviaKind::SingleLineComment
                    };
                    self.trivia(kind, start);
                    self.at_line_start = false;
                }
                '/' if self.peek_at(1) == Some('*') => {
                    self.pos += 2;
                    match self.rest().find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => {
                            self.pos = self.src.len();
                            self.error("End-of-file found, '*/' expected", start);
                        }
                    }
                    self.trivia(TriviaKind::MultiLineComment, start);
                    self.at_line_start = false;
                }
                '#' if self.at_line_start => self.directive(),
                _ => {
                    let kind = self.token();
                    let text = self.src[start..self.pos].to_string();
                    self.pieces.push(Piece::Token(kind, text, start));
                    self.at_line_start = false;
                }
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        while let Some(c) = self.peek() {
            if is_newline(c) {
                break;
            }
            self.bump();
        }
    }

    /// One line inside an inactive conditional region.
    fn disabled_line(&mut self) {
        let start = self.pos;
        let indent = self.rest().len() - self.rest().trim_start_matches(is_whitespace).len();
        if self.rest()[indent..].starts_with('#') {
            if indent > 0 {
                self.pos += indent;
                self.trivia(TriviaKind::Whitespace, start);
            }
            self.directive();
            return;
        }
        self.skip_to_line_end();
        if let Some(c) = self.bump() {
            if c == '\r' && self.peek() == Some('\n') {
                self.bump();
            }
        }
        self.trivia(TriviaKind::DisabledText, start);
    }

    fn directive(&mut self) {
        let start = self.pos;
        self.skip_to_line_end();
        let line = &self.src[start..self.pos];
        self.trivia(TriviaKind::Directive, start);
        self.at_line_start = false;

        let body = line[1..].trim_start();
        let name_len = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (name, args) = body.split_at(name_len);
        let args = strip_directive_comment(args).trim();
        match name {
            "if" => {
                let parent_active = self.active();
                let cond = parent_active && self.evaluate(args, start);
                self.frames.push(Frame { parent_active, taken: cond, active: cond });
            }
            "elif" => {
                let cond_needed = self
                    .frames
                    .last()
                    .map(|f| f.parent_active && !f.taken)
                    .unwrap_or(false);
                let cond = cond_needed && self.evaluate(args, start);
                match self.frames.last_mut() {
                    Some(frame) => {
                        frame.active = cond;
                        frame.taken |= cond;
                    }
                    None => self.error("Unexpected preprocessor directive", start),
                }
            }
            "else" => match self.frames.last_mut() {
                Some(frame) => {
                    frame.active = frame.parent_active && !frame.taken;
                    frame.taken = true;
                }
                None => self.error("Unexpected preprocessor directive", start),
            },
            "endif" => {
                if self.frames.pop().is_none() {
                    self.error("Unexpected preprocessor directive", start);
                }
            }
            "define" if self.active() => {
                self.symbols.insert(args.to_string());
            }
            "undef" if self.active() => {
                self.symbols.remove(args);
            }
            _ => {}
        }
    }

    fn evaluate(&mut self, expr: &str, start: usize) -> bool {
        let mut eval = CondEval { chars: expr.chars().collect(), pos: 0, symbols: &self.symbols };
        match eval.or() {
            Some(value) if eval.at_end() => value,
            _ => {
                self.error("Invalid preprocessor expression", start);
                false
            }
        }
    }

    fn token(&mut self) -> SyntaxKind {
        let start = self.pos;
        let c = match self.peek() {
            Some(c) => c,
            None => return SyntaxKind::EndOfFile,
        };
        match c {
            '@' if self.peek_at(1) == Some('"') => {
                self.bump();
                self.verbatim_string(start)
            }
            '@' if self.peek_at(1).is_some_and(is_ident_start) => {
                self.bump();
                self.identifier_tail();
                SyntaxKind::Identifier
            }
            c if is_ident_start(c) => {
                self.identifier_tail();
                SyntaxKind::from_keyword(&self.src[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
            }
            '0'..='9' => self.number(),
            '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.number(),
            '"' => self.string(start),
            '\'' => self.char_literal(start),
            _ => {
                for len in [3, 2, 1] {
                    if let Some(candidate) = self.rest().get(..len) {
                        if let Some((_, kind)) = SyntaxKind::punctuation_table()
                            .iter()
                            .find(|(text, _)| *text == candidate)
                        {
                            self.pos += len;
                            return *kind;
                        }
                    }
                }
                self.bump();
                self.error(format!("Unexpected character '{}'", c), start);
                SyntaxKind::BadToken
            }
        }
    }

    fn identifier_tail(&mut self) {
        self.bump();
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
    }

    fn number(&mut self) -> SyntaxKind {
        let hex = self.rest().starts_with("0x") || self.rest().starts_with("0X");
        if hex {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
        } else {
            self.digits();
            if self.peek() == Some('.') && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
                self.bump();
                self.digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                let sign = matches!(self.peek_at(1), Some('+' | '-'));
                let digit_at = if sign { 2 } else { 1 };
                if self.peek_at(digit_at).is_some_and(|d| d.is_ascii_digit()) {
                    self.pos += digit_at;
                    self.digits();
                }
            }
            if matches!(self.peek(), Some('f' | 'F' | 'd' | 'D' | 'm' | 'M')) {
                self.bump();
                return SyntaxKind::NumericLiteral;
            }
        }
        let mut suffix = 0;
        while suffix < 2 && matches!(self.peek(), Some('u' | 'U' | 'l' | 'L')) {
            self.bump();
            suffix += 1;
        }
        SyntaxKind::NumericLiteral
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn string(&mut self, start: usize) -> SyntaxKind {
        self.bump();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) if !is_newline(c) => {
                    self.bump();
                }
                _ => {
                    self.error("Newline in constant", start);
                    break;
                }
            }
        }
        SyntaxKind::StringLiteral
    }

    fn verbatim_string(&mut self, start: usize) -> SyntaxKind {
        self.bump();
        loop {
            match self.bump() {
                Some('"') if self.peek() == Some('"') => {
                    self.bump();
                }
                Some('"') => break,
                Some(_) => {}
                None => {
                    self.error("Unterminated string literal", start);
                    break;
                }
            }
        }
        SyntaxKind::StringLiteral
    }

    fn char_literal(&mut self, start: usize) -> SyntaxKind {
        self.bump();
        loop {
            match self.peek() {
                Some('\'') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) if !is_newline(c) => {
                    self.bump();
                }
                _ => {
                    self.error("Newline in constant", start);
                    break;
                }
            }
        }
        SyntaxKind::CharacterLiteral
    }
}

fn strip_directive_comment(args: &str) -> &str {
    match args.find("//") {
        Some(i) => &args[..i],
        None => args,
    }
}

/// `#if` condition grammar: `||`, `&&`, `==`, `!=`, `!`, parentheses,
/// `true`, `false` and symbols.
struct CondEval<'a> {
    chars: Vec<char>,
    pos: usize,
    symbols: &'a HashSet<String>,
}

impl CondEval<'_> {
    fn skip_ws(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.chars.len()
    }

    fn eat(&mut self, op: &str) -> bool {
        self.skip_ws();
        let op: Vec<char> = op.chars().collect();
        if self.chars[self.pos..].starts_with(&op) {
            self.pos += op.len();
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.eat("||") {
            let rhs = self.and()?;
            value = value || rhs;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.equality()?;
        while self.eat("&&") {
            let rhs = self.equality()?;
            value = value && rhs;
        }
        Some(value)
    }

    fn equality(&mut self) -> Option<bool> {
        let mut value = self.unary()?;
        loop {
            if self.eat("==") {
                value = value == self.unary()?;
            } else if self.eat("!=") {
                value = value != self.unary()?;
            } else {
                return Some(value);
            }
        }
    }

    fn unary(&mut self) -> Option<bool> {
        if self.eat("!") {
            return self.unary().map(|v| !v);
        }
        if self.eat("(") {
            let value = self.or()?;
            return self.eat(")").then_some(value);
        }
        self.skip_ws();
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| c.is_alphanumeric() || *c == '_')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        Some(match word.as_str() {
            "true" => true,
            "false" => false,
            symbol => self.symbols.contains(symbol),
        })
    }
}

fn is_newline(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn is_whitespace(c: char) -> bool {
    !is_newline(c) && c.is_whitespace()
}

fn is_ident_start(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    UnicodeXID::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<SyntaxKind> {
        lex(src, &[]).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_operators() {
        assert_eq!(
            kinds("if (a >= b) x <<= 2;"),
            vec![
                SyntaxKind::IfKw,
                SyntaxKind::OpenParen,
                SyntaxKind::Identifier,
                SyntaxKind::GtEq,
                SyntaxKind::Identifier,
                SyntaxKind::CloseParen,
                SyntaxKind::Identifier,
                SyntaxKind::LtLtEq,
                SyntaxKind::NumericLiteral,
                SyntaxKind::Semicolon,
                SyntaxKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_shift_right_is_two_tokens() {
        assert_eq!(
            kinds("a >> b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Gt,
                SyntaxKind::Gt,
                SyntaxKind::Identifier,
                SyntaxKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let lexed = lex(r#"0x1Fu 1.5e3f 10UL 'a' "x\"y" @"a""b""#, &[]);
        let texts: Vec<&str> = lexed.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["0x1Fu", "1.5e3f", "10UL", "'a'", r#""x\"y""#, r#"@"a""b""#, ""]);
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_trivia_attachment() {
        let lexed = lex("a; // note\n\n  b;", &[]);
        let semi = &lexed.tokens[1];
        assert_eq!(semi.trailing.len(), 3);
        assert_eq!(semi.trailing[1].kind, TriviaKind::SingleLineComment);
        assert_eq!(semi.trailing[2].kind, TriviaKind::EndOfLine);
        let b = &lexed.tokens[2];
        assert_eq!(b.leading.len(), 2);
        assert_eq!(b.leading[0].kind, TriviaKind::EndOfLine);
        assert_eq!(b.offset, 14);
    }

    #[test]
    fn test_doc_comment_trivia() {
        let lexed = lex("/// <summary>x</summary>\nclass C {}", &[]);
        assert_eq!(lexed.tokens[0].leading[0].kind, TriviaKind::DocumentationComment);
        assert_eq!(lexed.tokens[0].leading[0].text, "/// <summary>x</summary>");
    }

    #[test]
    fn test_inactive_region_is_disabled_text() {
        let src = "#if DEBUG\nint a;\n#else\nint b;\n#endif\n";
        let lexed = lex(src, &[]);
        let idents: Vec<&str> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::Identifier)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(idents, vec!["b"]);
        let disabled: Vec<&Trivia> = lexed.tokens[0]
            .leading
            .iter()
            .filter(|t| t.kind == TriviaKind::DisabledText)
            .collect();
        assert_eq!(disabled[0].text, "int a;\n");

        let lexed = lex(src, &["DEBUG".to_string()]);
        assert!(lexed.tokens.iter().any(|t| t.text == "a"));
        assert!(!lexed.tokens.iter().any(|t| t.text == "b"));
    }

    #[test]
    fn test_define_and_expressions() {
        let src = "#define X\n#if X && !(Y || false)\nint a;\n#endif\n";
        let lexed = lex(src, &[]);
        assert!(lexed.tokens.iter().any(|t| t.text == "a"));
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_full_text_is_preserved() {
        let src = "class C\r\n{\r\n    /* c */ int x = @\"a\nb\";\r\n}\r\n";
        let lexed = lex(src, &[]);
        let mut rebuilt = String::new();
        for t in &lexed.tokens {
            for tr in &t.leading {
                rebuilt.push_str(&tr.text);
            }
            rebuilt.push_str(&t.text);
            for tr in &t.trailing {
                rebuilt.push_str(&tr.text);
            }
        }
        assert_eq!(rebuilt, src);
    }
}
