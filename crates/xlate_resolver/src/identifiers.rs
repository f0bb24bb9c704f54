//! Identifier resolution.
//!
//! Walks every code unit with a lexical scope chain and rewrites each
//! `Identifier`, `this` and `super` node in place into a reference, which
//! registers it in the declaration's reference list. Locals and parameters
//! are searched innermost first, then the file's available symbols.
//! Nodes that already are references are left alone, so the pass can be
//! re-run without registering any occurrence twice.

use crate::scope::{LocalSymbol, ScopeChain};
use tracing::{debug, trace};
use xlate_ast::references::bind_reference;
use xlate_ast::visitor::{code_units, unit_body, unit_params, CodeRoot, CodeUnit};
use xlate_ast::{
    AvailableSymbol, Block, ClassId, ExprId, ExprKind, FileId, Importable, LambdaId, Reference,
    Result, StmtId, StmtKind, VariableId, Workspace,
};
use xlate_core::Name;
use xlate_diagnostics::CompileError;

/// Resolve identifiers in every code unit.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_identifiers(ws: &mut Workspace) -> Result<()> {
    let units = code_units(ws);
    let mut resolved = 0;
    for unit in &units {
        let mut resolver = IdentifierResolver::new(unit);
        resolver.resolve_unit(ws)?;
        resolved += resolver.resolved;
    }
    debug!(units = units.len(), resolved, "identifiers resolved");
    Ok(())
}

struct IdentifierResolver {
    file: FileId,
    class: Option<ClassId>,
    is_static: bool,
    root: CodeRoot,
    scopes: ScopeChain,
    resolved: usize,
}

impl IdentifierResolver {
    fn new(unit: &CodeUnit) -> Self {
        Self {
            file: unit.file,
            class: unit.class,
            is_static: unit.is_static,
            root: unit.root,
            scopes: ScopeChain::new(),
            resolved: 0,
        }
    }

    fn resolve_unit(&mut self, ws: &mut Workspace) -> Result<()> {
        let params = unit_params(ws, self.root).to_vec();
        for p in params {
            if let Some(init) = ws.params[p].initializer {
                self.resolve_expr(ws, init)?;
            }
            let name = ws.params[p].name;
            self.scopes.declare(name, LocalSymbol::Param(p));
        }
        match self.root {
            CodeRoot::FieldInitializer(f) => {
                if let Some(init) = ws.fields[f].initializer {
                    self.resolve_expr(ws, init)?;
                }
            }
            CodeRoot::Constructor(c) => {
                for arg in ws.constructors[c].super_call_args.clone().unwrap_or_default() {
                    self.resolve_expr(ws, arg)?;
                }
            }
            _ => {}
        }
        if let Some(body) = unit_body(ws, self.root).cloned() {
            self.resolve_block(ws, &body)?;
        }
        Ok(())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn resolve_block(&mut self, ws: &mut Workspace, block: &Block) -> Result<()> {
        self.scopes.push();
        for &stmt in &block.statements {
            self.resolve_stmt(ws, stmt)?;
        }
        self.scopes.pop();
        Ok(())
    }

    fn declare_variable(&mut self, ws: &mut Workspace, var: VariableId) -> Result<()> {
        if let Some(init) = ws.variables[var].initializer {
            self.resolve_expr(ws, init)?;
        }
        let name = ws.variables[var].name;
        self.scopes.declare(name, LocalSymbol::Variable(var));
        Ok(())
    }

    fn resolve_stmt(&mut self, ws: &mut Workspace, stmt: StmtId) -> Result<()> {
        match ws.stmts[stmt].kind.clone() {
            StmtKind::Expression(e) | StmtKind::Throw(e) => self.resolve_expr(ws, e),
            StmtKind::Return(e) => match e {
                Some(e) => self.resolve_expr(ws, e),
                None => Ok(()),
            },
            StmtKind::Variable(var) => self.declare_variable(ws, var),
            StmtKind::If { condition, then, else_ } => {
                self.resolve_expr(ws, condition)?;
                self.resolve_block(ws, &then)?;
                match else_ {
                    Some(b) => self.resolve_block(ws, &b),
                    None => Ok(()),
                }
            }
            StmtKind::While { condition, body } => {
                self.resolve_expr(ws, condition)?;
                self.resolve_block(ws, &body)
            }
            StmtKind::For { var, condition, incrementor, body } => {
                self.scopes.push();
                if let Some(var) = var {
                    self.declare_variable(ws, var)?;
                }
                if let Some(c) = condition {
                    self.resolve_expr(ws, c)?;
                }
                if let Some(i) = incrementor {
                    self.resolve_expr(ws, i)?;
                }
                self.resolve_block(ws, &body)?;
                self.scopes.pop();
                Ok(())
            }
            StmtKind::Foreach { var, items, body } => {
                self.resolve_expr(ws, items)?;
                self.scopes.push();
                self.declare_variable(ws, var)?;
                self.resolve_block(ws, &body)?;
                self.scopes.pop();
                Ok(())
            }
            StmtKind::Block(block) => self.resolve_block(ws, &block),
            StmtKind::Try { try_body, catch_var, catch_body, finally_body } => {
                self.resolve_block(ws, &try_body)?;
                if let Some(catch_body) = catch_body {
                    self.scopes.push();
                    if let Some(var) = catch_var {
                        self.declare_variable(ws, var)?;
                    }
                    self.resolve_block(ws, &catch_body)?;
                    self.scopes.pop();
                }
                match finally_body {
                    Some(b) => self.resolve_block(ws, &b),
                    None => Ok(()),
                }
            }
            StmtKind::Break | StmtKind::Continue => Ok(()),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn resolve_expr(&mut self, ws: &mut Workspace, expr: ExprId) -> Result<()> {
        match ws.exprs[expr].kind.clone() {
            ExprKind::Identifier(name) => {
                let reference = self.lookup(ws, name)?;
                self.bind(ws, expr, reference);
                Ok(())
            }
            ExprKind::This => {
                let cls = self.enclosing_class(ws, "this")?;
                let reference = if self.is_static {
                    Reference::StaticThis(cls)
                } else {
                    Reference::This(cls)
                };
                self.bind(ws, expr, reference);
                Ok(())
            }
            ExprKind::Super => {
                let cls = self.enclosing_class(ws, "super")?;
                self.bind(ws, expr, Reference::Super(cls));
                Ok(())
            }
            ExprKind::PropertyAccess { object, name } => {
                if let Some(reference) = self.scoped_export(ws, object, name)? {
                    self.bind(ws, expr, reference);
                    return Ok(());
                }
                self.resolve_expr(ws, object)
            }
            ExprKind::Lambda(lambda) => self.resolve_lambda(ws, lambda),
            kind => {
                for child in kind.children() {
                    self.resolve_expr(ws, child)?;
                }
                Ok(())
            }
        }
    }

    fn resolve_lambda(&mut self, ws: &mut Workspace, lambda: LambdaId) -> Result<()> {
        self.scopes.push();
        for p in ws.lambdas[lambda].parameters.clone() {
            if let Some(init) = ws.params[p].initializer {
                self.resolve_expr(ws, init)?;
            }
            let name = ws.params[p].name;
            self.scopes.declare(name, LocalSymbol::Param(p));
        }
        let body = ws.lambdas[lambda].body.clone();
        self.resolve_block(ws, &body)?;
        self.scopes.pop();
        Ok(())
    }

    fn bind(&mut self, ws: &mut Workspace, expr: ExprId, reference: Reference) {
        if bind_reference(ws, expr, reference) {
            trace!(?expr, ?reference, "resolved identifier");
            self.resolved += 1;
        }
    }

    fn lookup(&self, ws: &Workspace, name: Name) -> Result<Reference> {
        if let Some(local) = self.scopes.lookup(name) {
            return Ok(match local {
                LocalSymbol::Param(p) => Reference::MethodParameter(p),
                LocalSymbol::Variable(v) => Reference::Variable(v),
            });
        }
        match ws.files[self.file].available_symbols.get(&name) {
            Some(AvailableSymbol::Decl(Importable::Class(c))) => Ok(Reference::Class(*c)),
            Some(AvailableSymbol::Decl(Importable::Enum(e))) => Ok(Reference::Enum(*e)),
            Some(AvailableSymbol::Decl(Importable::Function(f))) => Ok(Reference::GlobalFunction(*f)),
            _ => Err(self.not_found(ws, ws.names.resolve(name))),
        }
    }

    /// `Alias.Name` where `Alias` is a whole-scope import alias.
    fn scoped_export(&self, ws: &Workspace, object: ExprId, name: Name) -> Result<Option<Reference>> {
        let ExprKind::Identifier(alias) = ws.exprs[object].kind else {
            return Ok(None);
        };
        if self.scopes.lookup(alias).is_some() {
            return Ok(None);
        }
        let Some(AvailableSymbol::Scope(scope_ref)) = ws.files[self.file].available_symbols.get(&alias) else {
            return Ok(None);
        };
        let pkg = ws.get_package(scope_ref.package_name)?;
        let scope = ws.packages[pkg].get_exported_scope(&ws.names, scope_ref.scope_name)?;
        match scope.get_export(&ws.names, name)? {
            Importable::Class(c) => Ok(Some(Reference::Class(c))),
            Importable::Enum(e) => Ok(Some(Reference::Enum(e))),
            Importable::Function(f) => Ok(Some(Reference::GlobalFunction(f))),
            Importable::Interface(_) => {
                let text = format!("{}.{}", ws.names.resolve(alias), ws.names.resolve(name));
                Err(self.not_found(ws, &text))
            }
        }
    }

    fn enclosing_class(&self, ws: &Workspace, keyword: &str) -> Result<ClassId> {
        self.class.ok_or_else(|| self.not_found(ws, keyword))
    }

    fn not_found(&self, ws: &Workspace, name: &str) -> CompileError {
        CompileError::SymbolNotFound {
            name: name.to_string(),
            file: ws.file_name(self.file),
        }
    }
}
