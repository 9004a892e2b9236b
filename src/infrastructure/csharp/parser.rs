//! Recursive-descent C# parser: token cursor, names, types and the
//! speculative scans that disambiguate generics, casts and declarations.
//! Expressions, statements and declarations live in sibling modules as
//! further `impl Parser` blocks.

use crate::domain::syntax::{
    Diagnostic, GreenElement, GreenNode, GreenToken, SyntaxKind, SyntaxTree, TextRange, Trivia,
    TriviaKind,
};

use super::lexer::{lex, LexedToken};

pub struct Parser {
    tokens: Vec<LexedToken>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    pending: Vec<Trivia>,
}

pub fn parse_compilation_unit(text: &str, symbols: &[String]) -> SyntaxTree {
    let mut parser = Parser::new(text, symbols);
    let root = parser.compilation_unit();
    parser.finish(root, true)
}

/// Parses a single expression. Input left over after it is not part of the tree.
pub fn parse_expression(text: &str, symbols: &[String]) -> SyntaxTree {
    let mut parser = Parser::new(text, symbols);
    let root = parser.expression();
    parser.finish_fragment(root)
}

/// Parses a single statement. Input left over after it is not part of the tree.
pub fn parse_statement(text: &str, symbols: &[String]) -> SyntaxTree {
    let mut parser = Parser::new(text, symbols);
    let root = parser.statement();
    parser.finish_fragment(root)
}

pub(super) fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind, children)
}

impl Parser {
    pub fn new(text: &str, symbols: &[String]) -> Self {
        let lexed = lex(text, symbols);
        Parser {
            tokens: lexed.tokens,
            pos: 0,
            diagnostics: lexed.diagnostics,
            pending: Vec::new(),
        }
    }

    fn finish(self, root: GreenNode, consumed_all: bool) -> SyntaxTree {
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by_key(|d| d.span.start);
        SyntaxTree::new(root, diagnostics).with_consumed_all(consumed_all)
    }

    fn finish_fragment(mut self, mut root: GreenNode) -> SyntaxTree {
        let consumed_all = self.at(SyntaxKind::EndOfFile);
        if consumed_all {
            let eof = self.bump_token();
            let mut rest = eof.leading;
            rest.extend(eof.trailing);
            match root.last_token_mut() {
                Some(last) => last.trailing.extend(rest),
                None => root.children.push(GreenElement::Token(GreenToken {
                    kind: SyntaxKind::EndOfFile,
                    text: String::new(),
                    leading: rest,
                    trailing: Vec::new(),
                    missing: false,
                })),
            }
        }
        self.finish(root, consumed_all)
    }

    // ── Token cursor ──────────────────────────────────────────────────

    fn index(&self, n: usize) -> usize {
        (self.pos + n).min(self.tokens.len() - 1)
    }

    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.index(n)].kind
    }

    pub(super) fn nth_text(&self, n: usize) -> &str {
        &self.tokens[self.index(n)].text
    }

    pub(super) fn kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    /// Current token is an identifier spelled `word`.
    pub(super) fn at_contextual(&self, word: &str) -> bool {
        self.nth_is_contextual(0, word)
    }

    pub(super) fn nth_is_contextual(&self, n: usize, word: &str) -> bool {
        self.nth(n) == SyntaxKind::Identifier && self.nth_text(n) == word
    }

    /// Tokens `n` and `n + 1` touch with no trivia between them.
    pub(super) fn adjacent(&self, n: usize) -> bool {
        let a = &self.tokens[self.index(n)];
        let b = &self.tokens[self.index(n + 1)];
        a.trailing.is_empty() && b.leading.is_empty()
    }

    fn bump_token(&mut self) -> GreenToken {
        let token = &self.tokens[self.pos];
        let mut leading = std::mem::take(&mut self.pending);
        leading.extend(token.leading.iter().cloned());
        let green = GreenToken {
            kind: token.kind,
            text: token.text.clone(),
            leading,
            trailing: token.trailing.clone(),
            missing: false,
        };
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        green
    }

    pub(super) fn bump(&mut self) -> GreenElement {
        GreenElement::Token(self.bump_token())
    }

    /// Consumes the current token under a contextual keyword kind.
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) -> GreenElement {
        let mut token = self.bump_token();
        token.kind = kind;
        GreenElement::Token(token)
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> Option<GreenElement> {
        self.at(kind).then(|| self.bump())
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind) -> GreenElement {
        if self.at(kind) {
            return self.bump();
        }
        let expected = kind.fixed_text().map(|t| format!("'{}'", t)).unwrap_or_else(|| {
            match kind {
                SyntaxKind::Identifier => "Identifier".to_string(),
                other => other.to_string(),
            }
        });
        self.error_here(format!("{} expected", expected));
        GreenElement::Token(GreenToken::missing(kind))
    }

    pub(super) fn expect_identifier(&mut self) -> GreenElement {
        self.expect(SyntaxKind::Identifier)
    }

    pub(super) fn error_here(&mut self, message: impl Into<String>) {
        let span = if self.at(SyntaxKind::EndOfFile) {
            TextRange::empty(self.tokens[self.pos].offset)
        } else {
            self.tokens[self.pos].span()
        };
        self.diagnostics.push(Diagnostic::new(message, span));
    }

    /// Turns the current token into skipped-token trivia of the next one.
    pub(super) fn skip(&mut self) {
        if self.at(SyntaxKind::EndOfFile) {
            return;
        }
        let message = format!("Unexpected token '{}'", self.nth_text(0));
        self.error_here(message);
        let token = &self.tokens[self.pos];
        self.pending.extend(token.leading.iter().cloned());
        self.pending
            .push(Trivia::new(TriviaKind::SkippedTokens, token.text.clone()));
        self.pending.extend(token.trailing.iter().cloned());
        self.pos += 1;
    }

    /// Turns elements a production consumed but could not use into
    /// skipped-token trivia of the next token, keeping their text in the tree.
    pub(super) fn abandon(&mut self, elements: Vec<GreenElement>) {
        let later = std::mem::take(&mut self.pending);
        for element in elements {
            flatten_into(element, &mut self.pending);
        }
        self.pending.extend(later);
    }

    /// Skips one token when a list element consumed nothing, so loops always progress.
    pub(super) fn ensure_progress(&mut self, start: usize) {
        if self.pos == start {
            self.skip();
        }
    }

    // ── Names ─────────────────────────────────────────────────────────

    pub(super) fn identifier_name(&mut self) -> GreenNode {
        let id = self.expect_identifier();
        node(SyntaxKind::IdentifierName, vec![id])
    }

    /// `Identifier [TypeArgumentList]`. In expressions a `<` only opens type
    /// arguments when the scan says so.
    pub(super) fn simple_name(&mut self, in_expression: bool) -> GreenNode {
        let id = self.expect_identifier();
        let generic = self.at(SyntaxKind::Lt)
            && (!in_expression || self.is_type_argument_list_in_expression(self.pos));
        if generic {
            let args = self.type_argument_list();
            node(SyntaxKind::GenericName, vec![id, args.into()])
        } else {
            node(SyntaxKind::IdentifierName, vec![id])
        }
    }

    /// Dotted name as used by namespaces, usings and attributes.
    pub(super) fn name(&mut self) -> GreenNode {
        let mut left = if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::ColonColon {
            let alias = self.identifier_name();
            let colons = self.bump();
            let right = self.simple_name(false);
            node(SyntaxKind::AliasQualifiedName, vec![alias.into(), colons, right.into()])
        } else {
            self.simple_name(false)
        };
        while self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Identifier {
            let dot = self.bump();
            let right = self.simple_name(false);
            left = node(SyntaxKind::QualifiedName, vec![left.into(), dot, right.into()]);
        }
        left
    }

    pub(super) fn type_argument_list(&mut self) -> GreenNode {
        let mut children = vec![self.expect(SyntaxKind::Lt)];
        // List<> and Dictionary<,> leave their arguments out
        if !matches!(self.kind(), SyntaxKind::Gt | SyntaxKind::Comma) {
            children.push(self.parse_type().into());
        }
        while let Some(comma) = self.eat(SyntaxKind::Comma) {
            children.push(comma);
            if !matches!(self.kind(), SyntaxKind::Comma | SyntaxKind::Gt) {
                children.push(self.parse_type().into());
            }
        }
        children.push(self.expect(SyntaxKind::Gt));
        node(SyntaxKind::TypeArgumentList, children)
    }

    // ── Types ─────────────────────────────────────────────────────────

    pub(super) fn parse_type(&mut self) -> GreenNode {
        self.type_core(false, true)
    }

    /// Type operand of `is` / `as`: `?` only means nullable when no
    /// conditional expression could follow it.
    pub(super) fn parse_type_after_is_as(&mut self) -> GreenNode {
        self.type_core(true, true)
    }

    /// Element type of an array creation: rank specifiers are left to the caller.
    pub(super) fn parse_type_without_ranks(&mut self) -> GreenNode {
        self.type_core(false, false)
    }

    fn type_core(&mut self, guard_nullable: bool, ranks: bool) -> GreenNode {
        let mut ty = if self.kind().is_predefined_type_keyword() {
            let kw = self.bump();
            node(SyntaxKind::PredefinedType, vec![kw])
        } else if self.at(SyntaxKind::Identifier) {
            self.name()
        } else {
            self.error_here("Type expected");
            node(
                SyntaxKind::IdentifierName,
                vec![GreenElement::Token(GreenToken::missing(SyntaxKind::Identifier))],
            )
        };
        loop {
            match self.kind() {
                SyntaxKind::Question => {
                    if guard_nullable && can_start_expression(self.nth(1)) {
                        break;
                    }
                    let q = self.bump();
                    ty = node(SyntaxKind::NullableType, vec![ty.into(), q]);
                }
                SyntaxKind::Star => {
                    let star = self.bump();
                    ty = node(SyntaxKind::PointerType, vec![ty.into(), star]);
                }
                _ => break,
            }
        }
        if ranks && self.at_omitted_rank() {
            let mut children = vec![GreenElement::Node(ty)];
            while self.at_omitted_rank() {
                children.push(self.rank_specifier(false).into());
            }
            ty = node(SyntaxKind::ArrayType, children);
        }
        ty
    }

    fn at_omitted_rank(&self) -> bool {
        if !self.at(SyntaxKind::OpenBracket) {
            return false;
        }
        let mut n = 1;
        while self.nth(n) == SyntaxKind::Comma {
            n += 1;
        }
        self.nth(n) == SyntaxKind::CloseBracket
    }

    /// `[ , , ]` or, with sizes, `[ e, e ]`.
    pub(super) fn rank_specifier(&mut self, sizes: bool) -> GreenNode {
        let mut children = vec![self.expect(SyntaxKind::OpenBracket)];
        loop {
            if sizes && !matches!(self.kind(), SyntaxKind::Comma | SyntaxKind::CloseBracket) {
                children.push(self.expression().into());
            } else {
                children.push(node(SyntaxKind::OmittedArraySizeExpression, Vec::new()).into());
            }
            match self.eat(SyntaxKind::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        children.push(self.expect(SyntaxKind::CloseBracket));
        node(SyntaxKind::ArrayRankSpecifier, children)
    }

    // ── Speculative scans (token indices, nothing consumed) ───────────

    fn kind_at(&self, i: usize) -> SyntaxKind {
        self.tokens[i.min(self.tokens.len() - 1)].kind
    }

    /// Index just past a type starting at `i`, if one is there.
    pub(super) fn scan_type(&self, i: usize) -> Option<usize> {
        let mut i = if self.kind_at(i).is_predefined_type_keyword() {
            i + 1
        } else if self.kind_at(i) == SyntaxKind::Identifier {
            self.scan_named(i)?
        } else {
            return None;
        };
        loop {
            match self.kind_at(i) {
                SyntaxKind::Question | SyntaxKind::Star => i += 1,
                SyntaxKind::OpenBracket => {
                    let mut j = i + 1;
                    while self.kind_at(j) == SyntaxKind::Comma {
                        j += 1;
                    }
                    if self.kind_at(j) != SyntaxKind::CloseBracket {
                        return Some(i);
                    }
                    i = j + 1;
                }
                _ => return Some(i),
            }
        }
    }

    fn scan_named(&self, mut i: usize) -> Option<usize> {
        i += 1;
        if self.kind_at(i) == SyntaxKind::ColonColon {
            if self.kind_at(i + 1) != SyntaxKind::Identifier {
                return None;
            }
            i += 2;
        }
        loop {
            if self.kind_at(i) == SyntaxKind::Lt {
                i = self.scan_type_args(i)?;
            }
            if self.kind_at(i) == SyntaxKind::Dot && self.kind_at(i + 1) == SyntaxKind::Identifier {
                i += 2;
            } else {
                return Some(i);
            }
        }
    }

    fn scan_type_args(&self, mut i: usize) -> Option<usize> {
        i += 1;
        loop {
            if matches!(self.kind_at(i), SyntaxKind::Comma | SyntaxKind::Gt) {
                // unbound generic argument
            } else {
                i = self.scan_type(i)?;
            }
            match self.kind_at(i) {
                SyntaxKind::Comma => i += 1,
                SyntaxKind::Gt => return Some(i + 1),
                _ => return None,
            }
        }
    }

    /// `<` at token `i` opens type arguments in an expression when the
    /// closing `>` is followed by a token that cannot continue a comparison.
    pub(super) fn is_type_argument_list_in_expression(&self, ident_pos: usize) -> bool {
        let lt = ident_pos + 1;
        if self.kind_at(lt) != SyntaxKind::Lt {
            return false;
        }
        match self.scan_type_args(lt) {
            Some(after) => matches!(
                self.kind_at(after),
                SyntaxKind::OpenParen
                    | SyntaxKind::CloseParen
                    | SyntaxKind::CloseBracket
                    | SyntaxKind::CloseBrace
                    | SyntaxKind::Colon
                    | SyntaxKind::Semicolon
                    | SyntaxKind::Comma
                    | SyntaxKind::Dot
                    | SyntaxKind::Question
                    | SyntaxKind::EqEq
                    | SyntaxKind::BangEq
                    | SyntaxKind::Bar
                    | SyntaxKind::Caret
                    | SyntaxKind::AmpAmp
                    | SyntaxKind::BarBar
                    | SyntaxKind::Amp
                    | SyntaxKind::OpenBracket
                    | SyntaxKind::EndOfFile
            ),
            None => false,
        }
    }

    /// Offset helper for sibling modules.
    pub(super) fn scan_type_from_current(&self, n: usize) -> Option<usize> {
        self.scan_type(self.pos + n).map(|end| end - self.pos)
    }

    /// Relative index of the `)` matching the `(` at relative index `n`.
    pub(super) fn matching_paren(&self, n: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = n;
        loop {
            match self.nth(i) {
                SyntaxKind::OpenParen => depth += 1,
                SyntaxKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                SyntaxKind::EndOfFile => return None,
                _ => {}
            }
            i += 1;
        }
    }

    // ── Entry ─────────────────────────────────────────────────────────

    fn compilation_unit(&mut self) -> GreenNode {
        let mut children = Vec::new();
        self.namespace_body(&mut children, SyntaxKind::EndOfFile);
        while !self.at(SyntaxKind::EndOfFile) {
            self.skip();
        }
        children.push(self.bump());
        node(SyntaxKind::CompilationUnit, children)
    }
}

fn flatten_into(element: GreenElement, out: &mut Vec<Trivia>) {
    match element {
        GreenElement::Node(node) => {
            for child in node.children {
                flatten_into(child, out);
            }
        }
        GreenElement::Token(token) => {
            out.extend(token.leading);
            if !token.missing {
                out.push(Trivia::new(TriviaKind::SkippedTokens, token.text));
            }
            out.extend(token.trailing);
        }
    }
}

/// Tokens that can begin an expression.
pub(super) fn can_start_expression(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        Identifier
            | NumericLiteral
            | StringLiteral
            | CharacterLiteral
            | OpenParen
            | Bang
            | Tilde
            | Plus
            | Minus
            | PlusPlus
            | MinusMinus
            | Amp
            | Star
            | NewKw
            | ThisKw
            | BaseKw
            | TrueKw
            | FalseKw
            | NullKw
            | TypeOfKw
            | DefaultKw
            | SizeOfKw
            | CheckedKw
            | UncheckedKw
            | DelegateKw
            | StackAllocKw
            | ArgListKw
            | MakeRefKw
            | RefTypeKw
            | RefValueKw
    ) || kind.is_predefined_type_keyword()
}
