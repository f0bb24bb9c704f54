//! Tree traversal.
//!
//! [`code_units`] lists every piece of executable code in the workspace with
//! the context it runs in. [`AstVisitor`] walks a unit; its default methods
//! walk into children, so implementors override only the nodes they need.

use crate::decl::MethodLike;
use crate::expr::ExprKind;
use crate::ids::*;
use crate::stmt::{Block, StmtKind};
use crate::workspace::Workspace;

/// The syntactic root of a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRoot {
    Method(MethodId),
    Constructor(ConstructorId),
    Function(FunctionId),
    FieldInitializer(FieldId),
    PropertyGetter(PropertyId),
    PropertySetter(PropertyId),
    MainBlock(FileId),
}

/// Executable code together with its enclosing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeUnit {
    pub file: FileId,
    pub class: Option<ClassId>,
    pub is_static: bool,
    /// Type `return` statements must produce.
    pub returns: Option<TypeId>,
    pub root: CodeRoot,
}

/// All code units in file order.
pub fn code_units(ws: &Workspace) -> Vec<CodeUnit> {
    let mut units = Vec::new();
    for (file_id, file) in ws.files.iter() {
        for &func in &file.funcs {
            units.push(CodeUnit {
                file: file_id,
                class: None,
                is_static: true,
                returns: Some(ws.functions[func].returns),
                root: CodeRoot::Function(func),
            });
        }
        for &c in &file.classes {
            let cls = &ws.classes[c];
            let unit = |is_static, returns, root| CodeUnit {
                file: file_id,
                class: Some(c),
                is_static,
                returns,
                root,
            };
            for &f in &cls.fields {
                if ws.fields[f].initializer.is_some() {
                    units.push(unit(ws.fields[f].is_static, None, CodeRoot::FieldInitializer(f)));
                }
            }
            if let Some(ctor) = cls.constructor {
                units.push(unit(false, None, CodeRoot::Constructor(ctor)));
            }
            for &p in &cls.properties {
                let prop = &ws.properties[p];
                if prop.getter.is_some() {
                    units.push(unit(prop.is_static, Some(prop.ty), CodeRoot::PropertyGetter(p)));
                }
                if prop.setter.is_some() {
                    units.push(unit(prop.is_static, None, CodeRoot::PropertySetter(p)));
                }
            }
            for &m in &cls.methods {
                let method = &ws.methods[m];
                if method.body.is_some() {
                    units.push(unit(method.is_static, Some(method.returns), CodeRoot::Method(m)));
                }
            }
        }
        if file.main_block.is_some() {
            units.push(CodeUnit {
                file: file_id,
                class: None,
                is_static: true,
                returns: None,
                root: CodeRoot::MainBlock(file_id),
            });
        }
    }
    units
}

/// Parameters declared by the unit's root.
pub fn unit_params(ws: &Workspace, root: CodeRoot) -> &[ParamId] {
    match root {
        CodeRoot::Method(m) => ws.methods[m].parameters(),
        CodeRoot::Constructor(c) => ws.constructors[c].parameters(),
        CodeRoot::Function(f) => ws.functions[f].parameters(),
        _ => &[],
    }
}

/// Body block of the unit's root, if it has one.
pub fn unit_body(ws: &Workspace, root: CodeRoot) -> Option<&Block> {
    match root {
        CodeRoot::Method(m) => ws.methods[m].body.as_ref(),
        CodeRoot::Constructor(c) => Some(&ws.constructors[c].body),
        CodeRoot::Function(f) => Some(&ws.functions[f].body),
        CodeRoot::PropertyGetter(p) => ws.properties[p].getter.as_ref(),
        CodeRoot::PropertySetter(p) => ws.properties[p].setter.as_ref(),
        CodeRoot::MainBlock(f) => ws.files[f].main_block.as_ref(),
        CodeRoot::FieldInitializer(_) => None,
    }
}

/// A visitor over code units. Default implementations walk into children.
pub trait AstVisitor {
    fn visit_unit(&mut self, ws: &Workspace, unit: &CodeUnit) {
        walk_unit(self, ws, unit);
    }

    fn visit_block(&mut self, ws: &Workspace, block: &Block) {
        for &stmt in &block.statements {
            self.visit_stmt(ws, stmt);
        }
    }

    fn visit_stmt(&mut self, ws: &Workspace, stmt: StmtId) {
        walk_stmt(self, ws, stmt);
    }

    fn visit_expr(&mut self, ws: &Workspace, expr: ExprId) {
        walk_expr(self, ws, expr);
    }

    fn visit_lambda(&mut self, ws: &Workspace, lambda: LambdaId) {
        walk_lambda(self, ws, lambda);
    }
}

pub fn walk_unit<V: AstVisitor + ?Sized>(v: &mut V, ws: &Workspace, unit: &CodeUnit) {
    for &p in unit_params(ws, unit.root) {
        if let Some(init) = ws.params[p].initializer {
            v.visit_expr(ws, init);
        }
    }
    match unit.root {
        CodeRoot::FieldInitializer(f) => {
            if let Some(init) = ws.fields[f].initializer {
                v.visit_expr(ws, init);
            }
        }
        CodeRoot::Constructor(c) => {
            if let Some(args) = &ws.constructors[c].super_call_args {
                for &arg in args {
                    v.visit_expr(ws, arg);
                }
            }
        }
        _ => {}
    }
    if let Some(body) = unit_body(ws, unit.root) {
        v.visit_block(ws, body);
    }
}

pub fn walk_stmt<V: AstVisitor + ?Sized>(v: &mut V, ws: &Workspace, stmt: StmtId) {
    match &ws.stmts[stmt].kind {
        StmtKind::Expression(e) | StmtKind::Throw(e) => v.visit_expr(ws, *e),
        StmtKind::Variable(var) => {
            if let Some(init) = ws.variables[*var].initializer {
                v.visit_expr(ws, init);
            }
        }
        StmtKind::Return(e) => {
            if let Some(e) = e {
                v.visit_expr(ws, *e);
            }
        }
        StmtKind::If { condition, then, else_ } => {
            v.visit_expr(ws, *condition);
            v.visit_block(ws, then);
            if let Some(else_) = else_ {
                v.visit_block(ws, else_);
            }
        }
        StmtKind::While { condition, body } => {
            v.visit_expr(ws, *condition);
            v.visit_block(ws, body);
        }
        StmtKind::For { var, condition, incrementor, body } => {
            if let Some(init) = var.and_then(|var| ws.variables[var].initializer) {
                v.visit_expr(ws, init);
            }
            if let Some(c) = condition {
                v.visit_expr(ws, *c);
            }
            if let Some(i) = incrementor {
                v.visit_expr(ws, *i);
            }
            v.visit_block(ws, body);
        }
        StmtKind::Foreach { items, body, .. } => {
            v.visit_expr(ws, *items);
            v.visit_block(ws, body);
        }
        StmtKind::Block(block) => v.visit_block(ws, block),
        StmtKind::Try { try_body, catch_body, finally_body, .. } => {
            v.visit_block(ws, try_body);
            if let Some(b) = catch_body {
                v.visit_block(ws, b);
            }
            if let Some(b) = finally_body {
                v.visit_block(ws, b);
            }
        }
        StmtKind::Break | StmtKind::Continue => {}
    }
}

pub fn walk_expr<V: AstVisitor + ?Sized>(v: &mut V, ws: &Workspace, expr: ExprId) {
    let kind = &ws.exprs[expr].kind;
    for child in kind.children() {
        v.visit_expr(ws, child);
    }
    if let ExprKind::Lambda(lambda) = kind {
        v.visit_lambda(ws, *lambda);
    }
}

pub fn walk_lambda<V: AstVisitor + ?Sized>(v: &mut V, ws: &Workspace, lambda: LambdaId) {
    let lambda = &ws.lambdas[lambda];
    for &p in &lambda.parameters {
        if let Some(init) = ws.params[p].initializer {
            v.visit_expr(ws, init);
        }
    }
    v.visit_block(ws, &lambda.body);
}

/// Every expression reachable from code units, in post-order.
pub fn reachable_exprs(ws: &Workspace) -> Vec<ExprId> {
    struct Collector(Vec<ExprId>);
    impl AstVisitor for Collector {
        fn visit_expr(&mut self, ws: &Workspace, expr: ExprId) {
            walk_expr(self, ws, expr);
            self.0.push(expr);
        }
    }

    let mut collector = Collector(Vec::new());
    for unit in code_units(ws) {
        collector.visit_unit(ws, &unit);
    }
    collector.0
}
