//! Statement nodes.

use crate::ids::{ExprId, StmtId, VariableId};

/// An ordered list of statements forming one lexical scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<StmtId>,
}

impl Block {
    pub fn new(statements: Vec<StmtId>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub leading_trivia: String,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            leading_trivia: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Expression(ExprId),
    Variable(VariableId),
    Return(Option<ExprId>),
    If {
        condition: ExprId,
        then: Block,
        else_: Option<Block>,
    },
    While {
        condition: ExprId,
        body: Block,
    },
    For {
        var: Option<VariableId>,
        condition: Option<ExprId>,
        incrementor: Option<ExprId>,
        body: Block,
    },
    Foreach {
        var: VariableId,
        items: ExprId,
        body: Block,
    },
    Throw(ExprId),
    Break,
    Continue,
    Block(Block),
    Try {
        try_body: Block,
        catch_var: Option<VariableId>,
        catch_body: Option<Block>,
        finally_body: Option<Block>,
    },
}
