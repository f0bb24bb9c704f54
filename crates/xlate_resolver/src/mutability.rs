//! Mutability analysis.
//!
//! Runs after inference, when every reference in the program is known, and
//! stores a [`MutabilityInfo`] on every field, property, parameter and
//! variable.

use rustc_hash::FxHashMap;
use tracing::debug;
use xlate_ast::visitor::{code_units, walk_expr, AstVisitor};
use xlate_ast::{ExprId, ExprKind, MutabilityInfo, Reference, UnaryOp, Workspace};

/// Fill `mutability` on every variable-like declaration.
#[tracing::instrument(level = "debug", skip_all)]
pub fn fill_mutability(ws: &mut Workspace) {
    let parents = ParentMap::build(ws);

    let classify = |ws: &Workspace, refs: &[ExprId]| {
        let mut info = MutabilityInfo::empty();
        if refs.is_empty() {
            info |= MutabilityInfo::UNUSED;
        }
        for &r in refs {
            if parents.is_reassigned(ws, r) {
                info |= MutabilityInfo::REASSIGNED;
            }
            if parents.is_mutated(ws, r) {
                info |= MutabilityInfo::MUTATED;
            }
        }
        info
    };

    let fields: Vec<_> = ws
        .fields
        .iter()
        .map(|(id, f)| {
            let refs: Vec<ExprId> = f.static_references.iter().chain(&f.instance_references).copied().collect();
            (id, classify(ws, &refs))
        })
        .collect();
    let properties: Vec<_> = ws
        .properties
        .iter()
        .map(|(id, p)| {
            let refs: Vec<ExprId> = p.static_references.iter().chain(&p.instance_references).copied().collect();
            (id, classify(ws, &refs))
        })
        .collect();
    let params: Vec<_> = ws.params.iter().map(|(id, p)| (id, classify(ws, &p.references))).collect();
    let variables: Vec<_> = ws.variables.iter().map(|(id, v)| (id, classify(ws, &v.references))).collect();

    let unused = fields
        .iter()
        .map(|(_, i)| *i)
        .chain(properties.iter().map(|(_, i)| *i))
        .chain(params.iter().map(|(_, i)| *i))
        .chain(variables.iter().map(|(_, i)| *i))
        .filter(|i| i.unused())
        .count();

    for (id, info) in fields {
        ws.fields[id].mutability = Some(info);
    }
    for (id, info) in properties {
        ws.properties[id].mutability = Some(info);
    }
    for (id, info) in params {
        ws.params[id].mutability = Some(info);
    }
    for (id, info) in variables {
        ws.variables[id].mutability = Some(info);
    }
    debug!(unused, "mutability computed");
}

/// Parent expression of every reachable expression.
struct ParentMap {
    parents: FxHashMap<ExprId, ExprId>,
}

impl AstVisitor for ParentMap {
    fn visit_expr(&mut self, ws: &Workspace, expr: ExprId) {
        for child in ws.exprs[expr].kind.children() {
            self.parents.insert(child, expr);
        }
        walk_expr(self, ws, expr);
    }
}

impl ParentMap {
    fn build(ws: &Workspace) -> Self {
        let mut map = Self {
            parents: FxHashMap::default(),
        };
        for unit in code_units(ws) {
            map.visit_unit(ws, &unit);
        }
        map
    }

    /// Target of `=`, a compound assignment, `++` or `--`.
    fn is_reassigned(&self, ws: &Workspace, expr: ExprId) -> bool {
        let Some(&parent) = self.parents.get(&expr) else {
            return false;
        };
        match ws.exprs[parent].kind {
            ExprKind::Binary { op, left, .. } => op.is_assignment() && left == expr,
            ExprKind::Unary { op, .. } => matches!(op, UnaryOp::Increment | UnaryOp::Decrement),
            _ => false,
        }
    }

    /// Receiver of an instance method call, or of a member that is assigned.
    fn is_mutated(&self, ws: &Workspace, expr: ExprId) -> bool {
        let Some(&parent) = self.parents.get(&expr) else {
            return false;
        };
        match &ws.exprs[parent].kind {
            ExprKind::InstanceMethodCall { object, .. } => *object == expr,
            ExprKind::Reference(Reference::InstanceField { object, .. })
            | ExprKind::Reference(Reference::InstanceProperty { object, .. }) => {
                *object == expr && self.is_reassigned(ws, parent)
            }
            _ => false,
        }
    }
}
