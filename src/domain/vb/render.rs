//! Whitespace-normalizing printer for the VB model.
//!
//! Four-space indentation, one statement per line, a blank line after the
//! Imports group and around block members of types and namespaces. Lines
//! are joined with `\n` and the result has no trailing newline.

use super::*;

const INDENT: &str = "    ";

/// Stands for a line break inside an XML literal. Those lines must not be
/// indented, so they are only expanded once the whole text is assembled.
const XML_NEWLINE: char = '\u{1}';

struct Writer {
    lines: Vec<String>,
    indent: usize,
}

impl Writer {
    fn new() -> Self {
        Writer { lines: Vec::new(), indent: 0 }
    }

    /// Writes `text` at the current indentation. Embedded newlines come from
    /// multi-line lambdas and are indented relative to the first line.
    fn line(&mut self, text: &str) {
        for part in text.split('\n') {
            let mut line = INDENT.repeat(self.indent);
            line.push_str(part);
            self.lines.push(line);
        }
    }

    /// Writes `text` at column zero.
    fn raw(&mut self, text: &str) {
        for part in text.lines() {
            self.lines.push(part.to_string());
        }
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn append(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(last) => last.push_str(text),
            None => self.lines.push(text.to_string()),
        }
    }

    fn indented(&mut self, f: impl FnOnce(&mut Writer)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    fn finish(self) -> String {
        self.lines
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
            .replace(XML_NEWLINE, "\n")
    }
}

pub fn render_compilation_unit(unit: &CompilationUnit) -> String {
    let mut w = Writer::new();
    for import in &unit.imports {
        write_statement(&mut w, import);
    }
    if !unit.imports.is_empty() && !(unit.attributes.is_empty() && unit.members.is_empty()) {
        w.blank();
    }
    for attributes in &unit.attributes {
        write_statement(&mut w, attributes);
    }
    if !unit.attributes.is_empty() && !unit.members.is_empty() {
        w.blank();
    }
    write_members(&mut w, &unit.members);
    write_trivia_lines(&mut w, &unit.trailing);
    w.finish()
}

pub fn render_statements(statements: &[Statement]) -> String {
    let mut w = Writer::new();
    write_body(&mut w, statements);
    w.finish()
}

pub fn render_statement(statement: &Statement) -> String {
    let mut w = Writer::new();
    write_statement(&mut w, statement);
    w.finish()
}

pub fn render_expression(expr: &Expr) -> String {
    expression(expr).replace(XML_NEWLINE, "\n")
}

pub fn render_type(ty: &TypeRef) -> String {
    type_ref(ty)
}

fn write_body(w: &mut Writer, statements: &[Statement]) {
    for statement in statements {
        write_statement(w, statement);
    }
}

/// Declarations get a blank line between them whenever one side is a block.
fn write_members(w: &mut Writer, members: &[Statement]) {
    let mut previous_block: Option<bool> = None;
    for member in members {
        let is_block = member.is_block();
        if previous_block.is_some_and(|prev| prev || is_block) {
            w.blank();
        }
        write_statement(w, member);
        previous_block = Some(is_block);
    }
}

fn write_trivia_lines(w: &mut Writer, trivia: &[Trivia]) {
    for t in trivia {
        match t {
            Trivia::Comment(text) => w.line(text),
            Trivia::Directive(text) => w.raw(text),
            Trivia::Disabled(text) => w.raw(text),
        }
    }
}

fn write_statement(w: &mut Writer, statement: &Statement) {
    write_trivia_lines(w, &statement.leading);
    let before = w.lines.len();
    write_kind(w, &statement.kind);
    let mut trailing = statement.trailing.iter().peekable();
    if w.lines.len() > before {
        while let Some(Trivia::Comment(text)) = trailing.peek() {
            w.append(&format!(" {}", text));
            trailing.next();
        }
    }
    let rest: Vec<Trivia> = trailing.cloned().collect();
    write_trivia_lines(w, &rest);
}

fn write_kind(w: &mut Writer, kind: &StatementKind) {
    match kind {
        StatementKind::Empty => {}
        StatementKind::Call(expr) => w.line(&expression(expr)),
        StatementKind::Assign { target, op, value } => {
            w.line(&format!("{} {} {}", expression(target), op.text(), expression(value)))
        }
        StatementKind::Declare { attributes, modifiers, declarators } => {
            let mut text = attribute_prefix(attributes);
            text.push_str(&modifiers.join(" "));
            text.push(' ');
            text.push_str(&join(declarators, declarator));
            w.line(&text);
        }
        StatementKind::Return(value) => w.line(&keyword_with("Return", value.as_ref())),
        StatementKind::Throw(value) => w.line(&keyword_with("Throw", value.as_ref())),
        StatementKind::Exit(target) => w.line(&format!("Exit {}", target.keyword())),
        StatementKind::Continue(target) => w.line(&format!("Continue {}", target.keyword())),
        StatementKind::GoTo(label) => w.line(&format!("GoTo {}", ident(label))),
        StatementKind::Label(name) => w.line(&format!("{}:", ident(name))),
        StatementKind::If { condition, then, else_ifs, otherwise } => {
            w.line(&format!("If {} Then", expression(condition)));
            w.indented(|w| write_body(w, then));
            for (condition, body) in else_ifs {
                w.line(&format!("ElseIf {} Then", expression(condition)));
                w.indented(|w| write_body(w, body));
            }
            if let Some(body) = otherwise {
                w.line("Else");
                w.indented(|w| write_body(w, body));
            }
            w.line("End If");
        }
        StatementKind::Select { expr, cases } => {
            w.line(&format!("Select Case {}", expression(expr)));
            w.indented(|w| {
                for case in cases {
                    if case.is_else {
                        w.line("Case Else");
                    } else {
                        w.line(&format!("Case {}", join(&case.values, expression)));
                    }
                    w.indented(|w| write_body(w, &case.body));
                }
            });
            w.line("End Select");
        }
        StatementKind::While { condition, body } => {
            w.line(&format!("While {}", expression(condition)));
            w.indented(|w| write_body(w, body));
            w.line("End While");
        }
        StatementKind::DoLoopWhile { body, condition } => {
            w.line("Do");
            w.indented(|w| write_body(w, body));
            w.line(&format!("Loop While {}", expression(condition)));
        }
        StatementKind::For { variable, from, to, step, body } => {
            let mut header = format!("For {} = {} To {}", ident(variable), expression(from), expression(to));
            if let Some(step) = step {
                header.push_str(&format!(" Step {}", expression(step)));
            }
            w.line(&header);
            w.indented(|w| write_body(w, body));
            w.line("Next");
        }
        StatementKind::ForEach { variable, ty, collection, body } => {
            w.line(&format!(
                "For Each {}{} In {}",
                ident(variable),
                as_clause(ty.as_ref()),
                expression(collection)
            ));
            w.indented(|w| write_body(w, body));
            w.line("Next");
        }
        StatementKind::Using { resource, body } => {
            let resource = match resource {
                UsingResource::Expression(expr) => expression(expr),
                UsingResource::Variables(vars) => join(vars, declarator),
            };
            w.line(&format!("Using {}", resource));
            w.indented(|w| write_body(w, body));
            w.line("End Using");
        }
        StatementKind::SyncLock { expr, body } => {
            w.line(&format!("SyncLock {}", expression(expr)));
            w.indented(|w| write_body(w, body));
            w.line("End SyncLock");
        }
        StatementKind::Try { body, catches, finally } => {
            w.line("Try");
            w.indented(|w| write_body(w, body));
            for catch in catches {
                let mut header = "Catch".to_string();
                if let Some(variable) = &catch.variable {
                    header.push(' ');
                    header.push_str(&ident(variable));
                }
                header.push_str(&as_clause(catch.ty.as_ref()));
                w.line(&header);
                w.indented(|w| write_body(w, &catch.body));
            }
            if let Some(body) = finally {
                w.line("Finally");
                w.indented(|w| write_body(w, body));
            }
            w.line("End Try");
        }
        StatementKind::Imports { alias, name } => match alias {
            Some(alias) => w.line(&format!("Imports {} = {}", ident(alias), type_ref(name))),
            None => w.line(&format!("Imports {}", type_ref(name))),
        },
        StatementKind::Attributes(blocks) => {
            for block in blocks {
                w.line(&attribute_block(block));
            }
        }
        StatementKind::Namespace { name, members } => {
            w.line(&format!("Namespace {}", type_ref(name)));
            w.indented(|w| write_members(w, members));
            w.line("End Namespace");
        }
        StatementKind::Type(block) => write_type(w, block),
        StatementKind::Enum(block) => {
            let mut header = attribute_prefix(&block.attributes);
            header.push_str(&modifier_prefix(&block.modifiers));
            header.push_str("Enum ");
            header.push_str(&ident(&block.name));
            header.push_str(&as_clause(block.underlying.as_ref()));
            w.line(&header);
            w.indented(|w| write_body(w, &block.members));
            w.line("End Enum");
        }
        StatementKind::EnumMember(member) => {
            let mut text = attribute_prefix(&member.attributes);
            text.push_str(&ident(&member.name));
            if let Some(value) = &member.value {
                text.push_str(&format!(" = {}", expression(value)));
            }
            w.line(&text);
        }
        StatementKind::Method(method) => write_method(w, method),
        StatementKind::Property(property) => {
            let mut header = attribute_prefix(&property.attributes);
            header.push_str(&modifier_prefix(&property.modifiers));
            header.push_str("Property ");
            header.push_str(&ident(&property.name));
            if let Some(params) = &property.params {
                header.push_str(&parameter_list(params));
            }
            header.push_str(&as_clause(Some(&property.ty)));
            if let Some(implements) = &property.implements {
                header.push_str(&format!(" Implements {}", type_ref(implements)));
            }
            w.line(&header);
            if let Some(accessors) = &property.accessors {
                w.indented(|w| {
                    for accessor in accessors {
                        write_method(w, accessor);
                    }
                });
                w.line("End Property");
            }
        }
        StatementKind::Event(event) => {
            let mut header = attribute_prefix(&event.attributes);
            header.push_str(&modifier_prefix(&event.modifiers));
            if event.accessors.is_some() {
                header.push_str("Custom ");
            }
            header.push_str("Event ");
            header.push_str(&ident(&event.name));
            header.push_str(&as_clause(Some(&event.ty)));
            w.line(&header);
            if let Some(accessors) = &event.accessors {
                w.indented(|w| {
                    for accessor in accessors {
                        write_method(w, accessor);
                    }
                });
                w.line("End Event");
            }
        }
    }
}

fn write_type(w: &mut Writer, block: &TypeBlock) {
    let mut header = attribute_prefix(&block.attributes);
    header.push_str(&modifier_prefix(&block.modifiers));
    header.push_str(block.kind.keyword());
    header.push(' ');
    header.push_str(&ident(&block.name));
    header.push_str(&type_parameter_list(&block.type_params));
    w.line(&header);
    w.indented(|w| {
        if !block.inherits.is_empty() {
            w.line(&format!("Inherits {}", join(&block.inherits, type_ref)));
        }
        if !block.implements.is_empty() {
            w.line(&format!("Implements {}", join(&block.implements, type_ref)));
        }
        if !(block.inherits.is_empty() && block.implements.is_empty()) && !block.members.is_empty() {
            w.blank();
        }
        write_members(w, &block.members);
    });
    w.line(&format!("End {}", block.kind.keyword()));
}

fn write_method(w: &mut Writer, method: &Method) {
    w.line(&method_header(method));
    if let Some(body) = &method.body {
        w.indented(|w| write_body(w, body));
        w.line(&format!("End {}", method.kind.end_keyword()));
    }
}

fn method_header(method: &Method) -> String {
    let mut header = attribute_prefix(&method.attributes);
    header.push_str(&modifier_prefix(&method.modifiers));
    header.push_str(method.kind.keyword());
    match (method.kind, &method.name) {
        (MethodKind::Constructor, _) => header.push_str(" New"),
        (_, Some(name)) => {
            header.push(' ');
            header.push_str(&ident(name));
        }
        (_, None) => {}
    }
    header.push_str(&type_parameter_list(&method.type_params));
    match &method.params {
        Some(params) => header.push_str(&parameter_list(params)),
        None if matches!(
            method.kind,
            MethodKind::Sub
                | MethodKind::Function
                | MethodKind::Constructor
                | MethodKind::Operator
                | MethodKind::DelegateSub
                | MethodKind::DelegateFunction
        ) =>
        {
            header.push_str("()")
        }
        None => {}
    }
    if let Some(returns) = &method.returns {
        header.push_str(" As ");
        header.push_str(&attribute_prefix(&method.return_attributes));
        header.push_str(&type_ref(returns));
    }
    if let Some(implements) = &method.implements {
        header.push_str(&format!(" Implements {}", type_ref(implements)));
    }
    header
}

fn keyword_with(keyword: &str, value: Option<&Expr>) -> String {
    match value {
        Some(value) => format!("{} {}", keyword, expression(value)),
        None => keyword.to_string(),
    }
}

fn join<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(", ")
}

fn ident(name: &Ident) -> String {
    if name.escaped {
        format!("[{}]", name.text)
    } else {
        name.text.clone()
    }
}

fn modifier_prefix(modifiers: &[String]) -> String {
    modifiers.iter().map(|m| format!("{} ", m)).collect()
}

fn as_clause(ty: Option<&TypeRef>) -> String {
    ty.map(|t| format!(" As {}", type_ref(t))).unwrap_or_default()
}

fn declarator(d: &Declarator) -> String {
    let mut text = ident(&d.name);
    if let Some(bounds) = &d.bounds {
        text.push_str(&format!("({})", join(bounds, expression)));
    }
    text.push_str(&as_clause(d.ty.as_ref()));
    if let Some(value) = &d.value {
        text.push_str(&format!(" = {}", expression(value)));
    }
    text
}

fn attribute_prefix(blocks: &[AttributeBlock]) -> String {
    blocks.iter().map(|b| format!("{} ", attribute_block(b))).collect()
}

fn attribute_block(block: &AttributeBlock) -> String {
    let target = block.target.map(|t| format!("{}: ", t)).unwrap_or_default();
    let attributes = join(&block.attributes, |a| {
        let mut text = type_ref(&a.name);
        if let Some(args) = &a.args {
            text.push_str(&argument_list(args));
        }
        text
    });
    format!("<{}{}>", target, attributes)
}

fn argument_list(args: &[Argument]) -> String {
    let args = join(args, |a| match &a.name {
        Some(name) => format!("{}:={}", ident(name), expression(&a.value)),
        None => expression(&a.value),
    });
    format!("({})", args)
}

fn parameter_list(params: &[Param]) -> String {
    format!("({})", join(params, parameter))
}

fn parameter(p: &Param) -> String {
    let mut text = attribute_prefix(&p.attributes);
    text.push_str(&modifier_prefix(&p.modifiers));
    text.push_str(&ident(&p.name));
    text.push_str(&as_clause(p.ty.as_ref()));
    if let Some(default) = &p.default {
        text.push_str(&format!(" = {}", expression(default)));
    }
    text
}

fn type_parameter_list(params: &[TypeParam]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let params = join(params, |p| {
        let mut text = p.variance.map(|v| format!("{} ", v)).unwrap_or_default();
        text.push_str(&ident(&p.name));
        let constraints: Vec<String> = p.constraints.iter().map(constraint).collect();
        match constraints.len() {
            0 => {}
            1 => text.push_str(&format!(" As {}", constraints[0])),
            _ => text.push_str(&format!(" As {{{}}}", constraints.join(", "))),
        }
        text
    });
    format!("(Of {})", params)
}

fn constraint(c: &Constraint) -> String {
    match c {
        Constraint::Class => "Class".to_string(),
        Constraint::Structure => "Structure".to_string(),
        Constraint::New => "New".to_string(),
        Constraint::Type(t) => type_ref(t),
    }
}

fn type_ref(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named { qualifier, name, args } => {
            let mut text = qualifier
                .as_ref()
                .map(|q| format!("{}.", type_ref(q)))
                .unwrap_or_default();
            text.push_str(&ident(name));
            text.push_str(&type_argument_list(args));
            text
        }
        TypeRef::Predefined(name) => name.to_string(),
        TypeRef::Global => "Global".to_string(),
        TypeRef::Array(element, ranks) => {
            let mut text = type_ref(element);
            for commas in ranks {
                text.push_str(&format!("({})", ",".repeat(*commas)));
            }
            text
        }
        TypeRef::Nullable(inner) => format!("{}?", type_ref(inner)),
    }
}

fn type_argument_list(args: &[TypeRef]) -> String {
    if args.is_empty() {
        String::new()
    } else {
        format!("(Of {})", join(args, type_ref))
    }
}

// ── Expressions ───────────────────────────────────────────────────────

const PRIMARY: u8 = 12;

fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Multiply | BinaryOp::Divide => 9,
        BinaryOp::Modulo => 8,
        BinaryOp::Add | BinaryOp::Subtract => 7,
        BinaryOp::LeftShift | BinaryOp::RightShift => 6,
        BinaryOp::Equals
        | BinaryOp::NotEquals
        | BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual
        | BinaryOp::Is
        | BinaryOp::IsNot => 5,
        BinaryOp::And | BinaryOp::AndAlso => 3,
        BinaryOp::Or | BinaryOp::OrElse => 2,
        BinaryOp::Xor => 1,
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary { op, .. } => binary_precedence(*op),
        Expr::Unary { op: UnaryOp::Not, .. } => 4,
        Expr::Unary { op: UnaryOp::Negate | UnaryOp::Plus, .. } => 10,
        Expr::TypeOfIs { .. } => 5,
        // "a" & vbLf concatenates, which binds looser than arithmetic
        Expr::Str(value) if value.chars().any(char::is_control) => 6,
        Expr::Lambda(_) | Expr::Query(_) => 0,
        _ => PRIMARY,
    }
}

fn operand(expr: &Expr, min: u8) -> String {
    if precedence(expr) < min {
        format!("({})", expression(expr))
    } else {
        expression(expr)
    }
}

fn expression(expr: &Expr) -> String {
    match expr {
        Expr::Literal(text) => text.clone(),
        Expr::Str(value) => string_literal(value),
        Expr::Char(c) => char_literal(*c),
        Expr::XmlText(value) => xml_text(value),
        Expr::Name { name, type_args } => format!("{}{}", ident(name), type_argument_list(type_args)),
        Expr::Type(ty) => type_ref(ty),
        Expr::Me => "Me".to_string(),
        Expr::MyBase => "MyBase".to_string(),
        Expr::MyClass => "MyClass".to_string(),
        Expr::Member { target, name, type_args } => format!(
            "{}.{}{}",
            operand(target, PRIMARY),
            ident(name),
            type_argument_list(type_args)
        ),
        Expr::Invoke { target, args } => {
            format!("{}{}", operand(target, PRIMARY), argument_list(args))
        }
        Expr::Binary { op, left, right } => {
            let prec = binary_precedence(*op);
            format!("{} {} {}", operand(left, prec), op.text(), operand(right, prec + 1))
        }
        Expr::Unary { op, operand: inner } => match op {
            UnaryOp::Not => format!("Not {}", operand(inner, 5)),
            UnaryOp::Negate => format!("-{}", operand(inner, 10)),
            UnaryOp::Plus => format!("+{}", operand(inner, 10)),
            UnaryOp::AddressOf => format!("AddressOf {}", operand(inner, PRIMARY)),
        },
        Expr::Paren(inner) => format!("({})", expression(inner)),
        Expr::Cast { kind, expr, ty } => {
            let keyword = match kind {
                CastKind::CType => "CType",
                CastKind::DirectCast => "DirectCast",
                CastKind::TryCast => "TryCast",
            };
            format!("{}({}, {})", keyword, expression(expr), type_ref(ty))
        }
        Expr::TypeOfIs { expr, ty } => format!("TypeOf {} Is {}", operand(expr, 6), type_ref(ty)),
        Expr::GetType(ty) => format!("GetType({})", type_ref(ty)),
        Expr::New { ty, args, init } => {
            let mut text = format!("New {}", type_ref(ty));
            if let Some(args) = args {
                text.push_str(&argument_list(args));
            }
            match init {
                Some(ObjectInit::With(fields)) => {
                    text.push_str(&format!(" With {{{}}}", join(fields, field_init)))
                }
                Some(ObjectInit::From(items)) => {
                    text.push_str(&format!(" From {{{}}}", join(items, expression)))
                }
                None => {}
            }
            text
        }
        Expr::NewAnonymous(fields) => format!("New With {{{}}}", join(fields, field_init)),
        Expr::NewArray { element, bounds, first_rank, ranks, items } => {
            let first = if bounds.is_empty() {
                ",".repeat(*first_rank)
            } else {
                join(bounds, expression)
            };
            let mut text = format!("New {}({})", type_ref(element), first);
            for commas in ranks {
                text.push_str(&format!("({})", ",".repeat(*commas)));
            }
            text.push_str(&format!(" {{{}}}", join(items, expression)));
            text
        }
        Expr::Collection(items) => format!("{{{}}}", join(items, expression)),
        Expr::Lambda(lambda) => lambda_text(lambda),
        Expr::Query(clauses) => clauses.iter().map(query_clause).collect::<Vec<_>>().join(" "),
    }
}

fn field_init(field: &FieldInit) -> String {
    match &field.name {
        Some(name) => format!(".{} = {}", ident(name), expression(&field.value)),
        None => expression(&field.value),
    }
}

fn lambda_text(lambda: &Lambda) -> String {
    let keyword = match lambda.kind {
        LambdaKind::Function => "Function",
        LambdaKind::Sub => "Sub",
    };
    let header = format!("{}{}", keyword, parameter_list(&lambda.params));
    match &lambda.body {
        LambdaBody::Expression(body) => format!("{} {}", header, expression(body)),
        LambdaBody::Statement(statement) => format!("{} {}", header, render_statement(statement)),
        LambdaBody::Block(body) => {
            let mut w = Writer::new();
            w.line(&header);
            w.indented(|w| write_body(w, body));
            w.line(&format!("End {}", keyword));
            w.lines.join("\n")
        }
    }
}

fn range_variable(keyword: &str, v: &RangeVariable) -> String {
    format!(
        "{} {}{} In {}",
        keyword,
        ident(&v.name),
        as_clause(v.ty.as_ref()),
        expression(&v.source)
    )
}

fn query_clause(clause: &QueryClause) -> String {
    match clause {
        QueryClause::From(v) => range_variable("From", v),
        QueryClause::Let { name, value } => format!("Let {} = {}", ident(name), expression(value)),
        QueryClause::Where(condition) => format!("Where {}", expression(condition)),
        QueryClause::Join { variable, left, right, into } => {
            let keyword = if into.is_some() { "Group Join" } else { "Join" };
            let mut text = format!(
                "{} On {} Equals {}",
                range_variable(keyword, variable),
                expression(left),
                expression(right)
            );
            if let Some(into) = into {
                text.push_str(&format!(" Into {} = Group", ident(into)));
            }
            text
        }
        QueryClause::OrderBy(orderings) => {
            let keys = join(orderings, |o| match o.direction {
                Some(direction) => format!("{} {}", expression(&o.key), direction),
                None => expression(&o.key),
            });
            format!("Order By {}", keys)
        }
        QueryClause::Select(value) => format!("Select {}", expression(value)),
        QueryClause::GroupBy { element, key, into } => {
            let into = match into {
                Some(name) => format!("{} = Group", ident(name)),
                None => "Group".to_string(),
            };
            format!("Group {} By {} Into {}", expression(element), expression(key), into)
        }
    }
}

/// VB string literal. Control characters cannot appear inside quotes, so
/// they are spliced in with `&` as the matching VB constants.
pub fn string_literal(value: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        let splice = match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                Some("vbCrLf".to_string())
            }
            '\r' => Some("vbCr".to_string()),
            '\n' => Some("vbLf".to_string()),
            '\t' => Some("vbTab".to_string()),
            c if c.is_control() => Some(format!("ChrW({})", c as u32)),
            '"' => {
                current.push_str("\"\"");
                None
            }
            c => {
                current.push(c);
                None
            }
        };
        if let Some(splice) = splice {
            if !current.is_empty() {
                parts.push(format!("\"{}\"", current));
                current.clear();
            }
            parts.push(splice);
        }
    }
    if !current.is_empty() || parts.is_empty() {
        parts.push(format!("\"{}\"", current));
    }
    parts.join(" & ")
}

pub fn char_literal(c: char) -> String {
    match c {
        '"' => "\"\"\"\"c".to_string(),
        c if c.is_control() => format!("ChrW({})", c as u32),
        c => format!("\"{}\"c", c),
    }
}

fn xml_text(value: &str) -> String {
    let mut text = String::with_capacity(value.len() + 20);
    text.push_str("<text>");
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' => text.push_str("&amp;"),
            '<' => text.push_str("&lt;"),
            '>' => text.push_str("&gt;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                text.push(XML_NEWLINE);
            }
            '\n' => text.push(XML_NEWLINE),
            '\t' => text.push('\t'),
            c if c.is_control() => text.push_str(&format!("&#{};", c as u32)),
            c => text.push(c),
        }
    }
    text.push_str("</text>.Value");
    text
}
