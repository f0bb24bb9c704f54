//! Construction helpers for front-ends and tests.

use crate::decl::{VariableDecl, VariableKind};
use crate::expr::{BinaryOp, ExprKind, UnaryOp};
use crate::ids::*;
use crate::stmt::{Block, StmtKind};
use crate::workspace::{ExportScopeRef, SourceFile, SourcePath, Workspace};

/// Collects the declarations of one file and adds it to the workspace.
pub struct FileBuilder<'a> {
    pub ws: &'a mut Workspace,
    file: SourceFile,
}

impl<'a> FileBuilder<'a> {
    /// Start a file at `path` in `package`, exporting into `scope`.
    pub fn new(ws: &'a mut Workspace, package: PackageId, path: &str, scope: &str) -> Self {
        let scope_ref = ExportScopeRef::new(ws.packages[package].name, ws.intern(scope));
        let file = SourceFile::new(
            SourcePath {
                package,
                path: path.to_string(),
            },
            scope_ref,
        );
        Self { ws, file }
    }

    pub fn import(&mut self, import: ImportId) -> &mut Self {
        self.file.imports.push(import);
        self
    }

    pub fn class(&mut self, class: ClassId) -> &mut Self {
        self.file.classes.push(class);
        self
    }

    pub fn interface(&mut self, intf: InterfaceId) -> &mut Self {
        self.file.interfaces.push(intf);
        self
    }

    pub fn enum_decl(&mut self, en: EnumId) -> &mut Self {
        self.file.enums.push(en);
        self
    }

    pub fn function(&mut self, func: FunctionId) -> &mut Self {
        self.file.funcs.push(func);
        self
    }

    pub fn main_block(&mut self, block: Block) -> &mut Self {
        self.file.main_block = Some(block);
        self
    }

    pub fn finish(self) -> FileId {
        self.ws.add_file(self.file)
    }
}

// ============================================================================
// Expression and statement shorthands
// ============================================================================

impl Workspace {
    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.intern(name);
        self.alloc_expr(ExprKind::Identifier(name))
    }

    pub fn this_expr(&mut self) -> ExprId {
        self.alloc_expr(ExprKind::This)
    }

    pub fn num(&mut self, value: &str) -> ExprId {
        self.alloc_expr(ExprKind::NumericLiteral(value.to_string()))
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        self.alloc_expr(ExprKind::StringLiteral(value.to_string()))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.alloc_expr(ExprKind::BooleanLiteral(value))
    }

    pub fn null(&mut self) -> ExprId {
        self.alloc_expr(ExprKind::NullLiteral)
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Unary {
            op,
            prefix: true,
            operand,
        })
    }

    pub fn prop(&mut self, object: ExprId, name: &str) -> ExprId {
        let name = self.intern(name);
        self.alloc_expr(ExprKind::PropertyAccess { object, name })
    }

    pub fn call(&mut self, func: ExprId, args: Vec<ExprId>) -> ExprId {
        self.alloc_expr(ExprKind::UnresolvedCall {
            func,
            type_args: Vec::new(),
            args,
        })
    }

    pub fn conditional(&mut self, condition: ExprId, when_true: ExprId, when_false: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Conditional {
            condition,
            when_true,
            when_false,
        })
    }

    pub fn coalesce(&mut self, default_expr: ExprId, expr_if_null: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::NullCoalesce {
            default_expr,
            expr_if_null,
        })
    }

    pub fn new_object(&mut self, cls: TypeId, args: Vec<ExprId>) -> ExprId {
        self.alloc_expr(ExprKind::New { cls, args })
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.alloc_stmt(StmtKind::Expression(expr))
    }

    pub fn return_stmt(&mut self, expr: Option<ExprId>) -> StmtId {
        self.alloc_stmt(StmtKind::Return(expr))
    }

    /// A local variable declaration statement.
    pub fn var_stmt(&mut self, name: &str, ty: Option<TypeId>, init: Option<ExprId>) -> (StmtId, VariableId) {
        let name = self.intern(name);
        let var = self.add_variable(VariableDecl::new(name, VariableKind::Local, ty, init));
        (self.alloc_stmt(StmtKind::Variable(var)), var)
    }
}
