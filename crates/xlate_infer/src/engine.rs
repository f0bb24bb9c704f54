//! The fixpoint inference engine.
//!
//! Each sweep walks every code unit. On the way down, contextual types are
//! pushed to children; on the way up, an untyped expression whose
//! dependencies are typed is offered to the plugin pipeline. Declarations
//! without a declared type (locals, loop and catch variables) take their
//! type from their initializer or collection as soon as it is known.
//!
//! A `null` with no contextual type is held back so later sweeps can still
//! give it one. Only when a sweep makes no progress does a relaxed sweep
//! let such literals become ambiguous. Sweeping stops when a relaxed sweep
//! also makes no progress, or after the configured number of sweeps. Any
//! expression left untyped or ambiguous is a fatal `UnresolvedType`.

use crate::expected::{collection_item, propagate_expected, set_expected};
use crate::plugin::{InferContext, InferTypesPlugin};
use crate::plugins::default_plugins;
use crate::signature::{bound_parameters, super_call_parameters};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use xlate_ast::display::{expr_repr, type_repr};
use xlate_ast::relations::is_assignable_to;
use xlate_ast::visitor::{code_units, unit_body, unit_params, walk_expr, AstVisitor, CodeRoot, CodeUnit};
use xlate_ast::{
    Block, ExprId, ExprKind, FileId, LambdaId, LiteralTypes, Result, StmtId, StmtKind, TypeId, TypeKind,
    VariableId, Workspace,
};
use xlate_diagnostics::CompileError;

/// Default bound on the number of sweeps.
pub const DEFAULT_MAX_SWEEPS: usize = 64;

/// Counters of one inference run.
#[derive(Debug, Clone, Default)]
pub struct InferStats {
    pub sweeps: usize,
    /// Expressions typed, per plugin name, in pipeline order of first use.
    pub typed_by: IndexMap<&'static str, usize>,
    /// Variables and lambda parameters whose type was inferred.
    pub declarations: usize,
}

impl InferStats {
    pub fn typed(&self) -> usize {
        self.typed_by.values().sum()
    }
}

/// Runs the plugin pipeline over the workspace until a fixpoint.
pub struct TypeInferrer {
    plugins: Vec<Box<dyn InferTypesPlugin>>,
    max_sweeps: usize,
}

impl TypeInferrer {
    pub fn new(max_sweeps: usize) -> Self {
        Self::with_plugins(max_sweeps, default_plugins())
    }

    pub fn with_plugins(max_sweeps: usize, plugins: Vec<Box<dyn InferTypesPlugin>>) -> Self {
        Self { plugins, max_sweeps }
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Type every reachable expression in the workspace.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, ws: &mut Workspace) -> Result<InferStats> {
        let units = code_units(ws);
        let mut literals = FxHashMap::default();
        for unit in &units {
            let Some(lit) = ws.files[unit.file].literal_types else {
                return Err(CompileError::MissingLiteralTypes { file: ws.file_name(unit.file) });
            };
            literals.insert(unit.file, lit);
        }

        let mut stats = InferStats::default();
        while stats.sweeps < self.max_sweeps {
            stats.sweeps += 1;
            let mut progress = self.sweep(ws, &units, &literals, false, &mut stats)?;
            if progress == 0 {
                progress = self.sweep(ws, &units, &literals, true, &mut stats)?;
            }
            debug!(sweep = stats.sweeps, progress, "inference sweep");
            if progress == 0 {
                break;
            }
        }

        verify(ws, &units)?;
        debug!(
            sweeps = stats.sweeps,
            typed = stats.typed(),
            declarations = stats.declarations,
            "types inferred"
        );
        Ok(stats)
    }

    fn sweep(
        &mut self,
        ws: &mut Workspace,
        units: &[CodeUnit],
        literals: &FxHashMap<FileId, LiteralTypes>,
        relaxed: bool,
        stats: &mut InferStats,
    ) -> Result<usize> {
        let mut progress = 0;
        for unit in units {
            let mut sweep = Sweep {
                plugins: &mut self.plugins,
                file: unit.file,
                literals: literals[&unit.file],
                relaxed,
                returns: Vec::new(),
                progress: 0,
                stats: &mut *stats,
            };
            sweep.unit(ws, unit)?;
            progress += sweep.progress;
        }
        Ok(progress)
    }
}

impl Default for TypeInferrer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SWEEPS)
    }
}

/// One sweep over one code unit.
struct Sweep<'a> {
    plugins: &'a mut [Box<dyn InferTypesPlugin>],
    file: FileId,
    literals: LiteralTypes,
    relaxed: bool,
    /// Return type of the innermost enclosing method or lambda.
    returns: Vec<Option<TypeId>>,
    progress: usize,
    stats: &'a mut InferStats,
}

impl Sweep<'_> {
    fn unit(&mut self, ws: &mut Workspace, unit: &CodeUnit) -> Result<()> {
        for p in unit_params(ws, unit.root).to_vec() {
            if let Some(init) = ws.params[p].initializer {
                let declared = ws.params[p].ty;
                self.expect(ws, init, declared);
                self.expr(ws, init)?;
            }
        }
        match unit.root {
            CodeRoot::FieldInitializer(f) => {
                if let Some(init) = ws.fields[f].initializer {
                    let declared = ws.fields[f].ty;
                    self.expect(ws, init, Some(declared));
                    self.expr(ws, init)?;
                }
            }
            CodeRoot::Constructor(c) => {
                for (arg, ty) in super_call_parameters(ws, c) {
                    self.expect(ws, arg, Some(ty));
                }
                for arg in ws.constructors[c].super_call_args.clone().unwrap_or_default() {
                    self.expr(ws, arg)?;
                }
            }
            _ => {}
        }
        if let Some(body) = unit_body(ws, unit.root).cloned() {
            self.returns.push(unit.returns);
            self.block(ws, &body)?;
            self.returns.pop();
        }
        Ok(())
    }

    fn expect(&mut self, ws: &mut Workspace, expr: ExprId, ty: Option<TypeId>) {
        if set_expected(ws, expr, ty) {
            self.progress += 1;
        }
    }

    fn declare(&mut self, ws: &mut Workspace, var: VariableId, ty: TypeId) {
        trace!(var = ws.names.resolve(ws.variables[var].name), ty = %type_repr(ws, ty), "inferred variable type");
        ws.variables[var].ty = Some(ty);
        self.stats.declarations += 1;
        self.progress += 1;
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn block(&mut self, ws: &mut Workspace, block: &Block) -> Result<()> {
        for &stmt in &block.statements {
            self.stmt(ws, stmt)?;
        }
        Ok(())
    }

    fn stmt(&mut self, ws: &mut Workspace, stmt: StmtId) -> Result<()> {
        match ws.stmts[stmt].kind.clone() {
            StmtKind::Expression(e) | StmtKind::Throw(e) => self.expr(ws, e),
            StmtKind::Return(Some(e)) => {
                let void = ws.types.void_type;
                let returns = self.returns.last().copied().flatten().filter(|t| *t != void);
                self.expect(ws, e, returns);
                self.expr(ws, e)
            }
            StmtKind::Return(None) | StmtKind::Break | StmtKind::Continue => Ok(()),
            StmtKind::Variable(var) => self.variable(ws, var),
            StmtKind::If { condition, then, else_ } => {
                self.expr(ws, condition)?;
                self.block(ws, &then)?;
                match else_ {
                    Some(b) => self.block(ws, &b),
                    None => Ok(()),
                }
            }
            StmtKind::While { condition, body } => {
                self.expr(ws, condition)?;
                self.block(ws, &body)
            }
            StmtKind::For { var, condition, incrementor, body } => {
                if let Some(var) = var {
                    self.variable(ws, var)?;
                }
                if let Some(c) = condition {
                    self.expr(ws, c)?;
                }
                if let Some(i) = incrementor {
                    self.expr(ws, i)?;
                }
                self.block(ws, &body)
            }
            StmtKind::Foreach { var, items, body } => {
                self.expr(ws, items)?;
                if ws.variables[var].ty.is_none() {
                    if let Some(element) = self.element_type(ws, items) {
                        self.declare(ws, var, element);
                    }
                }
                self.block(ws, &body)
            }
            StmtKind::Block(block) => self.block(ws, &block),
            StmtKind::Try { try_body, catch_var, catch_body, finally_body } => {
                self.block(ws, &try_body)?;
                if let Some(var) = catch_var {
                    if ws.variables[var].ty.is_none() {
                        self.declare(ws, var, self.literals.error);
                    }
                }
                if let Some(b) = catch_body {
                    self.block(ws, &b)?;
                }
                match finally_body {
                    Some(b) => self.block(ws, &b),
                    None => Ok(()),
                }
            }
        }
    }

    /// A local or for variable: its initializer gets the declared type as
    /// context, an undeclared variable takes the initializer's type.
    fn variable(&mut self, ws: &mut Workspace, var: VariableId) -> Result<()> {
        let Some(init) = ws.variables[var].initializer else {
            return Ok(());
        };
        let declared = ws.variables[var].ty;
        self.expect(ws, init, declared);
        self.expr(ws, init)?;
        if declared.is_none() {
            if let Some(ty) = ws.exprs[init].actual_type {
                self.declare(ws, var, ty);
            }
        }
        Ok(())
    }

    /// Element type of a foreach collection: the item type of the literal
    /// array class, `any` for an `any` collection.
    fn element_type(&self, ws: &Workspace, items: ExprId) -> Option<TypeId> {
        let ty = ws.exprs[items].actual_type?;
        if ws.types.is_any(ty) {
            return Some(ty);
        }
        collection_item(ws, ty, self.literals.array)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self, ws: &mut Workspace, expr: ExprId) -> Result<()> {
        self.progress += propagate_expected(ws, expr, &self.literals);

        let kind = ws.exprs[expr].kind.clone();
        for child in typing_children(ws, &kind) {
            self.expr(ws, child)?;
        }
        if let ExprKind::Lambda(lambda) = kind {
            self.lambda(ws, expr, lambda)?;
        }

        if ws.exprs[expr].actual_type.is_none() && dependencies_typed(ws, expr) {
            self.offer(ws, expr)?;
        }
        Ok(())
    }

    fn lambda(&mut self, ws: &mut Workspace, expr: ExprId, lambda: LambdaId) -> Result<()> {
        for p in ws.lambdas[lambda].parameters.clone() {
            if let Some(init) = ws.params[p].initializer {
                let declared = ws.params[p].ty;
                self.expect(ws, init, declared);
                self.expr(ws, init)?;
            }
        }
        let expected_returns = match ws.exprs[expr].expected_type.map(|t| ws.types.get(t)) {
            Some(TypeKind::Lambda { returns, .. }) => Some(*returns),
            _ => None,
        };
        let body = ws.lambdas[lambda].body.clone();
        self.returns.push(ws.lambdas[lambda].returns.or(expected_returns));
        self.block(ws, &body)?;
        self.returns.pop();
        Ok(())
    }

    /// Offer `expr` to the plugins in order until one types it.
    fn offer(&mut self, ws: &mut Workspace, expr: ExprId) -> Result<()> {
        let mut ctx = InferContext {
            ws,
            file: self.file,
            literals: self.literals,
            relaxed: self.relaxed,
        };
        for plugin in self.plugins.iter_mut() {
            if !plugin.can_detect_type(ctx.ws, expr) {
                continue;
            }
            if plugin.detect_type(&mut ctx, expr)? {
                trace!(plugin = plugin.name(), expr = %expr_repr(ctx.ws, expr), "typed expression");
                *self.stats.typed_by.entry(plugin.name()).or_insert(0) += 1;
                self.progress += 1;
                return Ok(());
            }
        }
        Ok(())
    }
}

/// Children visited while typing. The callee of an unresolved method call
/// is not an expression of its own, so only its receiver is visited.
fn typing_children(ws: &Workspace, kind: &ExprKind) -> Vec<ExprId> {
    match kind {
        ExprKind::UnresolvedCall { func, args, .. } => {
            let callee = match ws.exprs[*func].kind {
                ExprKind::PropertyAccess { object, .. } => object,
                _ => *func,
            };
            std::iter::once(callee).chain(args.iter().copied()).collect()
        }
        _ => kind.children(),
    }
}

/// Whether the expressions `expr`'s type depends on are typed. Call
/// arguments never are dependencies; a call only needs its callee.
fn dependencies_typed(ws: &Workspace, expr: ExprId) -> bool {
    let typed = |e: ExprId| ws.exprs[e].actual_type.is_some();
    match &ws.exprs[expr].kind {
        ExprKind::UnresolvedCall { func, .. } => match ws.exprs[*func].kind {
            ExprKind::PropertyAccess { object, .. } => typed(object),
            _ => typed(*func),
        },
        ExprKind::InstanceMethodCall { object, .. } => typed(*object),
        ExprKind::LambdaCall { lambda, .. } => typed(*lambda),
        ExprKind::StaticMethodCall { .. }
        | ExprKind::GlobalFunctionCall { .. }
        | ExprKind::New { .. }
        | ExprKind::Lambda(_) => true,
        kind => kind.children().into_iter().all(typed),
    }
}

// ============================================================================
// Verification
// ============================================================================

/// Collects the expressions of one code unit in post-order.
struct UnitExprs(Vec<ExprId>);

impl AstVisitor for UnitExprs {
    fn visit_expr(&mut self, ws: &Workspace, expr: ExprId) {
        walk_expr(self, ws, expr);
        self.0.push(expr);
    }
}

/// Every expression must carry a concrete type and every argument must be
/// assignable to the parameter it binds to.
fn verify(ws: &mut Workspace, units: &[CodeUnit]) -> Result<()> {
    for unit in units {
        let mut collector = UnitExprs(Vec::new());
        collector.visit_unit(ws, unit);
        for expr in collector.0 {
            match ws.exprs[expr].actual_type {
                Some(t) if !ws.types.is_ambiguous(t) => {}
                _ => {
                    return Err(CompileError::UnresolvedType {
                        expr: expr_repr(ws, expr),
                        file: ws.file_name(unit.file),
                    })
                }
            }
            check_arguments(ws, expr)?;
        }
    }
    Ok(())
}

fn check_arguments(ws: &mut Workspace, call: ExprId) -> Result<()> {
    for (arg, param) in bound_parameters(ws, call) {
        let Some(arg_type) = ws.exprs[arg].actual_type else {
            continue;
        };
        if ws.types.contains_generic(param) || is_assignable_to(ws, arg_type, param)? {
            continue;
        }
        return Err(CompileError::TypeMismatch {
            expr: expr_repr(ws, call),
            left: type_repr(ws, param),
            right: type_repr(ws, arg_type),
        });
    }
    Ok(())
}
