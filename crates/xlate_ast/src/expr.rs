//! Expression nodes.
//!
//! Expressions live in the workspace's expression arena. Resolution passes
//! rewrite a node's [`ExprKind`] in place (an `Identifier` becomes a
//! `Reference`, an `UnresolvedCall` becomes a concrete call) so the id seen
//! by the parent never changes.

use crate::ids::{
    ClassId, EnumId, EnumMemberId, ExprId, FieldId, FunctionId, LambdaId, MethodId, ParamId,
    PropertyId, TypeId, VariableId,
};
use xlate_core::Name;

/// An expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    /// Type the surrounding context requires, if it requires one.
    pub expected_type: Option<TypeId>,
    /// Type assigned by inference.
    pub actual_type: Option<TypeId>,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            expected_type: None,
            actual_type: None,
        }
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self.kind, ExprKind::NullLiteral)
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match &self.kind {
            ExprKind::Reference(r) => Some(r),
            _ => None,
        }
    }
}

/// A piece of a template string.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Expr(ExprId),
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    // -- Produced by the parser, resolved by later passes --
    Identifier(Name),
    This,
    Super,
    PropertyAccess {
        object: ExprId,
        name: Name,
    },
    UnresolvedCall {
        func: ExprId,
        type_args: Vec<TypeId>,
        args: Vec<ExprId>,
    },

    // -- Literals --
    BooleanLiteral(bool),
    NumericLiteral(String),
    StringLiteral(String),
    TemplateString(Vec<TemplatePart>),
    RegexLiteral {
        pattern: String,
        modifiers: String,
    },
    NullLiteral,
    ArrayLiteral(Vec<ExprId>),
    MapLiteral(Vec<(String, ExprId)>),

    // -- Operators --
    Cast {
        expr: ExprId,
        new_type: TypeId,
    },
    Parenthesized(ExprId),
    InstanceOf {
        expr: ExprId,
        check_type: TypeId,
    },
    Unary {
        op: UnaryOp,
        prefix: bool,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Conditional {
        condition: ExprId,
        when_true: ExprId,
        when_false: ExprId,
    },
    NullCoalesce {
        default_expr: ExprId,
        expr_if_null: ExprId,
    },

    // -- Construction and calls --
    New {
        cls: TypeId,
        args: Vec<ExprId>,
    },
    Lambda(LambdaId),
    InstanceMethodCall {
        object: ExprId,
        method: MethodId,
        type_args: Vec<TypeId>,
        args: Vec<ExprId>,
    },
    StaticMethodCall {
        method: MethodId,
        type_args: Vec<TypeId>,
        args: Vec<ExprId>,
    },
    GlobalFunctionCall {
        func: FunctionId,
        args: Vec<ExprId>,
    },
    LambdaCall {
        lambda: ExprId,
        args: Vec<ExprId>,
    },

    /// A resolved use of a declaration.
    Reference(Reference),
}

impl ExprKind {
    /// Direct child expressions in evaluation order.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Identifier(_)
            | ExprKind::This
            | ExprKind::Super
            | ExprKind::BooleanLiteral(_)
            | ExprKind::NumericLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::RegexLiteral { .. }
            | ExprKind::NullLiteral
            | ExprKind::Lambda(_) => Vec::new(),
            ExprKind::PropertyAccess { object, .. } => vec![*object],
            ExprKind::UnresolvedCall { func, args, .. } => {
                std::iter::once(*func).chain(args.iter().copied()).collect()
            }
            ExprKind::TemplateString(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    TemplatePart::Expr(e) => Some(*e),
                    TemplatePart::Literal(_) => None,
                })
                .collect(),
            ExprKind::ArrayLiteral(items) => items.clone(),
            ExprKind::MapLiteral(items) => items.iter().map(|(_, e)| *e).collect(),
            ExprKind::Cast { expr, .. } | ExprKind::InstanceOf { expr, .. } => vec![*expr],
            ExprKind::Parenthesized(inner) => vec![*inner],
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Binary { left, right, .. } => vec![*left, *right],
            ExprKind::Conditional { condition, when_true, when_false } => {
                vec![*condition, *when_true, *when_false]
            }
            ExprKind::NullCoalesce { default_expr, expr_if_null } => vec![*default_expr, *expr_if_null],
            ExprKind::New { args, .. }
            | ExprKind::StaticMethodCall { args, .. }
            | ExprKind::GlobalFunctionCall { args, .. } => args.clone(),
            ExprKind::InstanceMethodCall { object, args, .. } => {
                std::iter::once(*object).chain(args.iter().copied()).collect()
            }
            ExprKind::LambdaCall { lambda, args } => {
                std::iter::once(*lambda).chain(args.iter().copied()).collect()
            }
            ExprKind::Reference(r) => r.object().into_iter().collect(),
        }
    }
}

/// A resolved reference to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    Class(ClassId),
    Enum(EnumId),
    EnumMember(EnumMemberId),
    GlobalFunction(FunctionId),
    MethodParameter(ParamId),
    /// Local, for, foreach or catch variable.
    Variable(VariableId),
    StaticField(FieldId),
    InstanceField { object: ExprId, field: FieldId },
    StaticProperty(PropertyId),
    InstanceProperty { object: ExprId, property: PropertyId },
    This(ClassId),
    StaticThis(ClassId),
    Super(ClassId),
}

impl Reference {
    /// Receiver expression of an instance member reference.
    pub fn object(&self) -> Option<ExprId> {
        match self {
            Reference::InstanceField { object, .. } | Reference::InstanceProperty { object, .. } => {
                Some(*object)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }

    /// `=` and the compound assignments.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::AddAssign
                | BinaryOp::SubAssign
                | BinaryOp::MulAssign
                | BinaryOp::DivAssign
        )
    }

    pub fn is_equality(self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::NotEq)
    }
}
