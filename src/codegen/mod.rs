pub mod translate;

use crate::diagnostics::Diagnostic;
use crate::parser::ast::*;
pub use translate::GeneratorOptions;
use translate::quote_import_path;

/// Render a `Program` as Go source with default options.
pub fn generate(program: &Program) -> (String, Vec<Diagnostic>) {
    let mut generator = Generator::new();
    let code = generator.generate(program);
    (code, generator.errors)
}

/// Emits Go source text from a syntax tree.
///
/// Unsupported constructs are recorded as generation diagnostics and
/// contribute no text; the rest of the program is still emitted.
pub struct Generator {
    options: GeneratorOptions,
    buf: String,
    indent: usize,
    errors: Vec<Diagnostic>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options, buf: String::new(), indent: 0, errors: Vec::new() }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn generate(&mut self, program: &Program) -> String {
        self.buf.clear();
        self.errors.clear();
        self.indent = 0;
        for stmt in &program.statements {
            self.emit_statement(stmt);
            self.newline();
        }
        std::mem::take(&mut self.buf)
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push('\t');
        }
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn unsupported(&mut self, stmt: &Statement, context: &str) {
        let msg = format!("unsupported node type {} {context}", statement_kind(stmt));
        self.errors.push(Diagnostic::generation(msg, stmt.position().clone()));
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_block(&mut self, block: &BlockStatement) {
        self.write("{");
        self.newline();
        self.indent();
        for stmt in &block.statements {
            if matches!(
                stmt,
                Statement::Package(_) | Statement::Import(_) | Statement::ImportGroup(_) | Statement::Function(_)
            ) {
                self.unsupported(stmt, "inside a block");
                continue;
            }
            self.write_indent();
            self.emit_statement(stmt);
            self.newline();
        }
        self.dedent();
        self.write_indent();
        self.write("}");
    }

    fn emit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Package(pkg) => {
                self.write("package ");
                self.write(&pkg.name.value);
            }
            Statement::Import(imp) => {
                self.write("import ");
                self.emit_import_spec(imp);
            }
            Statement::ImportGroup(group) => {
                if group.imports.is_empty() {
                    self.write("import ()");
                    return;
                }
                self.write("import (");
                self.newline();
                self.indent();
                for imp in &group.imports {
                    self.write_indent();
                    self.emit_import_spec(imp);
                    self.newline();
                }
                self.dedent();
                self.write_indent();
                self.write(")");
            }
            Statement::Function(func) => self.emit_function(func),
            Statement::Variable(var) => self.emit_variable(var),
            Statement::Return(ret) => {
                self.write("return");
                if let Some(value) = &ret.value {
                    self.write(" ");
                    self.emit_expression(value);
                }
            }
            Statement::If(stmt) => self.emit_if(stmt),
            Statement::For(stmt) => self.emit_for(stmt),
            Statement::Range(stmt) => {
                self.write("for ");
                match (&stmt.key, &stmt.value) {
                    (Some(key), Some(value)) => {
                        self.write(&key.value);
                        self.write(", ");
                        self.write(&value.value);
                        self.write(" := ");
                    }
                    (Some(only), None) | (None, Some(only)) => {
                        self.write(&only.value);
                        self.write(" := ");
                    }
                    (None, None) => {}
                }
                self.write("range ");
                self.emit_expression(&stmt.collection);
                self.write(" ");
                self.emit_block(&stmt.body);
            }
            Statement::Branch(branch) => self.write(&branch.token.literal),
            Statement::Block(block) => self.emit_block(block),
            Statement::Struct(lit) => self.emit_struct(lit),
            Statement::Expression(stmt) => self.emit_expression(&stmt.expression),
        }
    }

    fn emit_import_spec(&mut self, imp: &ImportStatement) {
        if let Some(alias) = &imp.alias {
            self.write(&alias.value);
            self.write(" ");
        }
        let path = quote_import_path(&imp.path);
        self.write(&path);
    }

    fn emit_function(&mut self, func: &FunctionStatement) {
        self.write("func ");
        let name = self.options.function_name(&func.name.value);
        self.buf.push_str(name);
        self.write("(");
        for (i, param) in func.parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&param.name.value);
            if let Some(ty) = &param.ty {
                self.write(" ");
                self.emit_type(ty);
            }
        }
        self.write(")");
        if let Some(ret) = &func.return_type {
            self.write(" ");
            self.emit_type(ret);
        }
        self.write(" ");
        self.emit_block(&func.body);
    }

    fn emit_variable(&mut self, var: &VariableStatement) {
        self.write(if var.is_const { "const " } else { "var " });
        self.write(&var.name.value);
        if let Some(ty) = &var.ty {
            self.write(" ");
            self.emit_type(ty);
        }
        if let Some(value) = &var.value {
            self.write(" = ");
            self.emit_expression(value);
        }
    }

    fn emit_if(&mut self, stmt: &IfStatement) {
        self.write("if ");
        self.emit_expression(&stmt.condition);
        self.write(" ");
        self.emit_block(&stmt.consequence);
        if let Some(alt) = &stmt.alternative {
            self.write(" else ");
            // Collapse else { if ... } into else if
            if let [Statement::If(nested)] = alt.statements.as_slice() {
                self.emit_if(nested);
            } else {
                self.emit_block(alt);
            }
        }
    }

    fn emit_for(&mut self, stmt: &ForStatement) {
        self.write("for ");
        match (&stmt.init, &stmt.condition, &stmt.post) {
            (None, None, None) => {}
            (None, Some(cond), None) => {
                self.emit_expression(cond);
                self.write(" ");
            }
            (init, cond, post) => {
                if let Some(init) = init {
                    self.emit_for_clause(init);
                }
                self.write("; ");
                if let Some(cond) = cond {
                    self.emit_expression(cond);
                }
                self.write("; ");
                if let Some(post) = post {
                    self.emit_for_clause(post);
                }
                self.write(" ");
            }
        }
        self.emit_block(&stmt.body);
    }

    /// Init and post clauses: a short declaration or a bare expression.
    fn emit_for_clause(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Variable(var) if !var.is_const => {
                let Some(value) = &var.value else {
                    self.unsupported(stmt, "in for clause: declaration without a value");
                    return;
                };
                self.write(&var.name.value);
                self.write(" := ");
                match &var.ty {
                    Some(ty) => {
                        self.emit_type(ty);
                        self.write("(");
                        self.emit_expression(value);
                        self.write(")");
                    }
                    None => self.emit_expression(value),
                }
            }
            Statement::Expression(expr) => self.emit_expression(&expr.expression),
            other => self.unsupported(other, "in for clause"),
        }
    }

    fn emit_struct(&mut self, lit: &StructLiteral) {
        if let Some(name) = &lit.name {
            self.write("type ");
            self.write(&name.value);
            self.write(" ");
        }
        if lit.fields.is_empty() {
            self.write("struct{}");
            return;
        }
        self.write("struct {");
        self.newline();
        self.indent();
        for field in &lit.fields {
            self.write_indent();
            self.write(&field.name.value);
            self.write(" ");
            self.emit_type(&field.ty);
            self.newline();
        }
        self.dedent();
        self.write_indent();
        self.write("}");
    }

    // ── Types ────────────────────────────────────────────────────────

    fn emit_type(&mut self, ty: &TypeExpression) {
        match ty {
            TypeExpression::Named(named) => {
                let name = self.options.translate_type(&named.name);
                self.buf.push_str(name);
            }
            TypeExpression::Array(arr) => {
                self.write("[]");
                self.emit_type(&arr.element);
            }
            TypeExpression::Map(map) => {
                self.write("map[");
                self.emit_type(&map.key);
                self.write("]");
                self.emit_type(&map.value);
            }
            TypeExpression::Struct(lit) => self.emit_struct(lit),
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn emit_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Identifier(ident) => self.write(&ident.value),
            Expression::Integer(int) => self.write(&int.value.to_string()),
            Expression::Float(float) => self.write(&float.token.literal),
            Expression::Boolean(b) => self.write(if b.value { "true" } else { "false" }),
            Expression::String(s) => {
                self.write("\"");
                self.write(&s.value);
                self.write("\"");
            }
            Expression::Char(c) => {
                self.write("'");
                self.write(&c.value);
                self.write("'");
            }
            Expression::Array(arr) => {
                self.write("[]");
                self.buf.push_str(&self.options.placeholder_type);
                self.write("{");
                self.emit_expression_list(&arr.elements);
                self.write("}");
            }
            Expression::Hash(hash) => {
                self.write("map[string]");
                self.buf.push_str(&self.options.placeholder_type);
                self.write("{");
                for (i, (key, value)) in hash.pairs.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(key);
                    self.write(": ");
                    self.emit_expression(value);
                }
                self.write("}");
            }
            Expression::Unary(unary) if unary.postfix => {
                self.emit_operand(&unary.operand);
                self.write(&unary.operator);
            }
            Expression::Unary(unary) => {
                self.write(&unary.operator);
                // -(-x) must not collapse into --x
                if matches!(*unary.operand, Expression::Unary(ref inner) if !inner.postfix) {
                    self.write("(");
                    self.emit_expression(&unary.operand);
                    self.write(")");
                } else {
                    self.emit_expression(&unary.operand);
                }
            }
            Expression::Binary(bin) => {
                self.write("(");
                self.emit_expression(&bin.left);
                self.write(" ");
                self.write(&bin.operator);
                self.write(" ");
                self.emit_expression(&bin.right);
                self.write(")");
            }
            Expression::Assignment(assign) => {
                self.emit_expression(&assign.left);
                self.write(" ");
                self.write(&assign.operator);
                self.write(" ");
                self.emit_expression(&assign.right);
            }
            Expression::Member(member) => {
                self.emit_operand(&member.object);
                self.write(".");
                self.write(&member.property.value);
            }
            Expression::Index(index) => {
                self.emit_operand(&index.base);
                self.write("[");
                self.emit_expression(&index.index);
                self.write("]");
            }
            Expression::Call(call) => {
                self.emit_operand(&call.callee);
                self.write("(");
                self.emit_expression_list(&call.arguments);
                self.write(")");
            }
        }
    }

    /// Left side of member, index, call and postfix: prefix and assignment
    /// forms need parentheses to keep their grouping.
    fn emit_operand(&mut self, expr: &Expression) {
        let wrap = match expr {
            Expression::Unary(unary) => !unary.postfix,
            Expression::Assignment(_) => true,
            _ => false,
        };
        if wrap {
            self.write("(");
            self.emit_expression(expr);
            self.write(")");
        } else {
            self.emit_expression(expr);
        }
    }

    fn emit_expression_list(&mut self, exprs: &[Expression]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(expr);
        }
    }
}

fn statement_kind(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Package(_) => "package",
        Statement::Import(_) => "import",
        Statement::ImportGroup(_) => "import group",
        Statement::Function(_) => "function",
        Statement::Variable(_) => "variable",
        Statement::Return(_) => "return",
        Statement::If(_) => "if",
        Statement::For(_) => "for",
        Statement::Range(_) => "range",
        Statement::Branch(_) => "branch",
        Statement::Block(_) => "block",
        Statement::Struct(_) => "struct",
        Statement::Expression(_) => "expression",
    }
}
