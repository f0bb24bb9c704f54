//! Textual rendering of types and expressions for diagnostics.

use crate::expr::{ExprKind, Reference, TemplatePart};
use crate::ids::{ExprId, TypeId};
use crate::types::TypeKind;
use crate::workspace::Workspace;

pub fn type_repr(ws: &Workspace, ty: TypeId) -> String {
    let args = |ws: &Workspace, args: &[TypeId]| {
        if args.is_empty() {
            String::new()
        } else {
            let inner: Vec<String> = args.iter().map(|a| type_repr(ws, *a)).collect();
            format!("<{}>", inner.join(", "))
        }
    };
    match ws.types.get(ty) {
        TypeKind::Any => "any".to_string(),
        TypeKind::Ambiguous => "ambiguous".to_string(),
        TypeKind::Void => "void".to_string(),
        TypeKind::Class { decl, type_args } => {
            format!("{}{}", ws.names.resolve(ws.classes[*decl].name), args(ws, type_args))
        }
        TypeKind::Interface { decl, type_args } => {
            format!("{}{}", ws.names.resolve(ws.interfaces[*decl].name), args(ws, type_args))
        }
        TypeKind::Enum { decl } => ws.names.resolve(ws.enums[*decl].name).to_string(),
        TypeKind::Generic { name } => ws.names.resolve(*name).to_string(),
        TypeKind::Lambda { params, returns } => {
            let params: Vec<String> = params.iter().map(|p| type_repr(ws, *p)).collect();
            format!("({}) => {}", params.join(", "), type_repr(ws, *returns))
        }
    }
}

/// Render the types of `exprs`, `?` for untyped ones.
pub fn types_repr(ws: &Workspace, exprs: &[ExprId]) -> String {
    exprs
        .iter()
        .map(|e| match ws.exprs[*e].actual_type {
            Some(t) => type_repr(ws, t),
            None => "?".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Source-like rendering of an expression.
pub fn expr_repr(ws: &Workspace, expr: ExprId) -> String {
    let name = |n| ws.names.resolve(n).to_string();
    let list = |items: &[ExprId]| items.iter().map(|e| expr_repr(ws, *e)).collect::<Vec<_>>().join(", ");

    match &ws.exprs[expr].kind {
        ExprKind::Identifier(n) => name(*n),
        ExprKind::This => "this".to_string(),
        ExprKind::Super => "super".to_string(),
        ExprKind::PropertyAccess { object, name: member } => {
            format!("{}.{}", expr_repr(ws, *object), name(*member))
        }
        ExprKind::UnresolvedCall { func, args, .. } => format!("{}({})", expr_repr(ws, *func), list(args)),
        ExprKind::BooleanLiteral(b) => b.to_string(),
        ExprKind::NumericLiteral(n) => n.clone(),
        ExprKind::StringLiteral(s) => format!("{s:?}"),
        ExprKind::TemplateString(parts) => {
            let body: String = parts
                .iter()
                .map(|p| match p {
                    TemplatePart::Literal(s) => s.clone(),
                    TemplatePart::Expr(e) => format!("${{{}}}", expr_repr(ws, *e)),
                })
                .collect();
            format!("`{body}`")
        }
        ExprKind::RegexLiteral { pattern, modifiers } => format!("/{pattern}/{modifiers}"),
        ExprKind::NullLiteral => "null".to_string(),
        ExprKind::ArrayLiteral(items) => format!("[{}]", list(items)),
        ExprKind::MapLiteral(items) => {
            let entries: Vec<String> = items
                .iter()
                .map(|(k, v)| format!("{k}: {}", expr_repr(ws, *v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        ExprKind::Cast { expr, new_type } => {
            format!("<{}>{}", type_repr(ws, *new_type), expr_repr(ws, *expr))
        }
        ExprKind::Parenthesized(inner) => format!("({})", expr_repr(ws, *inner)),
        ExprKind::InstanceOf { expr, check_type } => {
            format!("{} instanceof {}", expr_repr(ws, *expr), type_repr(ws, *check_type))
        }
        ExprKind::Unary { op, prefix, operand } => {
            if *prefix {
                format!("{}{}", op.as_str(), expr_repr(ws, *operand))
            } else {
                format!("{}{}", expr_repr(ws, *operand), op.as_str())
            }
        }
        ExprKind::Binary { op, left, right } => {
            format!("{} {} {}", expr_repr(ws, *left), op.as_str(), expr_repr(ws, *right))
        }
        ExprKind::Conditional { condition, when_true, when_false } => format!(
            "{} ? {} : {}",
            expr_repr(ws, *condition),
            expr_repr(ws, *when_true),
            expr_repr(ws, *when_false)
        ),
        ExprKind::NullCoalesce { default_expr, expr_if_null } => {
            format!("{} ?? {}", expr_repr(ws, *default_expr), expr_repr(ws, *expr_if_null))
        }
        ExprKind::New { cls, args } => format!("new {}({})", type_repr(ws, *cls), list(args)),
        ExprKind::Lambda(_) => "(...) => { ... }".to_string(),
        ExprKind::InstanceMethodCall { object, method, args, .. } => format!(
            "{}.{}({})",
            expr_repr(ws, *object),
            name(ws.methods[*method].name),
            list(args)
        ),
        ExprKind::StaticMethodCall { method, args, .. } => {
            let owner = ws.methods[*method]
                .parent_interface
                .map(|p| name(ws.interface_decl(p).name()))
                .unwrap_or_default();
            format!("{}.{}({})", owner, name(ws.methods[*method].name), list(args))
        }
        ExprKind::GlobalFunctionCall { func, args } => {
            format!("{}({})", name(ws.functions[*func].name), list(args))
        }
        ExprKind::LambdaCall { lambda, args } => format!("{}({})", expr_repr(ws, *lambda), list(args)),
        ExprKind::Reference(r) => reference_repr(ws, r),
    }
}

fn reference_repr(ws: &Workspace, r: &Reference) -> String {
    let name = |n| ws.names.resolve(n).to_string();
    match r {
        Reference::Class(c) => name(ws.classes[*c].name),
        Reference::Enum(e) => name(ws.enums[*e].name),
        Reference::EnumMember(m) => {
            let member = &ws.enum_members[*m];
            match member.parent_enum {
                Some(e) => format!("{}.{}", name(ws.enums[e].name), name(member.name)),
                None => name(member.name),
            }
        }
        Reference::GlobalFunction(f) => name(ws.functions[*f].name),
        Reference::MethodParameter(p) => name(ws.params[*p].name),
        Reference::Variable(v) => name(ws.variables[*v].name),
        Reference::StaticField(f) => static_member(ws, ws.fields[*f].parent_interface, ws.fields[*f].name),
        Reference::InstanceField { object, field } => {
            format!("{}.{}", expr_repr(ws, *object), name(ws.fields[*field].name))
        }
        Reference::StaticProperty(p) => {
            let prop = &ws.properties[*p];
            static_member(ws, prop.parent_class.map(crate::decl::InterfaceLike::Class), prop.name)
        }
        Reference::InstanceProperty { object, property } => {
            format!("{}.{}", expr_repr(ws, *object), name(ws.properties[*property].name))
        }
        Reference::This(_) | Reference::StaticThis(_) => "this".to_string(),
        Reference::Super(_) => "super".to_string(),
    }
}

fn static_member(ws: &Workspace, owner: Option<crate::decl::InterfaceLike>, member: xlate_core::Name) -> String {
    let member = ws.names.resolve(member);
    match owner {
        Some(o) => format!("{}.{}", ws.names.resolve(ws.interface_decl(o).name()), member),
        None => member.to_string(),
    }
}
