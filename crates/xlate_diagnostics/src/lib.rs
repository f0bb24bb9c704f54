//! xlate_diagnostics: Error taxonomy and diagnostic records.
//!
//! Every failure in the resolution and inference core is fatal to the
//! compilation unit, so passes return [`CompileError`] and stop at the first
//! one. Tooling that wants a flat record (code, category, text) converts the
//! error with [`CompileError::to_diagnostic`].

use std::fmt;
use thiserror::Error;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// The input program is wrong.
    Error,
    /// The compiler met a construct its rules do not cover.
    Internal,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Internal => write!(f, "internal error"),
        }
    }
}

/// A diagnostic message entry with a stable code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// Short title of the failure kind.
    pub message: &'static str,
}

/// A realized diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub title: &'static str,
    /// Full message including symbol identities and type representations.
    pub message_text: String,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, message_text: String) -> Self {
        Self {
            code: message.code,
            category: message.category,
            title: message.message,
            message_text,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.category == DiagnosticCategory::Internal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} XL{}: {}", self.category, self.code, self.message_text)
    }
}

/// Fatal errors raised by the resolution and inference passes.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum CompileError {
    #[error("Package was not found: \"{package}\"")]
    #[diagnostic(code(xlate::package_not_found))]
    PackageNotFound { package: String },

    #[error("Scope \"{scope}\" was not found in package \"{package}\"")]
    #[diagnostic(code(xlate::scope_not_found))]
    ScopeNotFound { package: String, scope: String },

    #[error("Export {symbol} was not found in exported symbols")]
    #[diagnostic(code(xlate::export_not_found))]
    ExportNotFound { symbol: String },

    #[error("File {file} belongs to package \"{owner}\", it cannot be added to \"{package}\"")]
    #[diagnostic(code(xlate::file_belongs_to_other_package))]
    FileBelongsToOtherPackage {
        file: String,
        owner: String,
        package: String,
    },

    #[error("Import of {scope} is aliased as \"{alias}\" but does not import the whole scope")]
    #[diagnostic(code(xlate::invalid_import_alias))]
    InvalidImportAlias { scope: String, alias: String },

    #[error("Identifier \"{name}\" was not found in {file}")]
    #[diagnostic(code(xlate::symbol_not_found))]
    SymbolNotFound { name: String, file: String },

    #[error("Member \"{member}\" was not found on {owner}")]
    #[diagnostic(code(xlate::member_not_found))]
    MemberNotFound { member: String, owner: String },

    #[error("Cyclic inheritance: {cycle}")]
    #[diagnostic(code(xlate::cyclic_inheritance))]
    CyclicInheritance { cycle: String },

    #[error("Right-side expression ({right}) is not assignable to left-side ({left}) in `{expr}`")]
    #[diagnostic(code(xlate::type_mismatch))]
    TypeMismatch {
        expr: String,
        left: String,
        right: String,
    },

    #[error("Different types in the whenTrue ({when_true}) and whenFalse ({when_false}) expressions of `{expr}`")]
    #[diagnostic(code(xlate::branch_type_mismatch))]
    BranchTypeMismatch {
        expr: String,
        when_true: String,
        when_false: String,
    },

    #[error("Null-coalescing operator tried to assign incompatible type \"{if_null}\" to \"{default}\" in `{expr}`")]
    #[diagnostic(code(xlate::coalesce_type_mismatch))]
    CoalesceTypeMismatch {
        expr: String,
        default: String,
        if_null: String,
    },

    #[error("Could not infer the type of `{expr}` in {file}")]
    #[diagnostic(code(xlate::unresolved_type))]
    UnresolvedType { expr: String, file: String },

    #[error("{plugin} has no rule for `{expr}` with operand types {operands}")]
    #[diagnostic(
        code(xlate::unhandled_inference_case),
        help("this is a gap in the inference rules, not an error in the input")
    )]
    UnhandledInferenceCase {
        plugin: &'static str,
        expr: String,
        operands: String,
    },

    #[error("Literal types are not configured for {file}")]
    #[diagnostic(code(xlate::missing_literal_types))]
    MissingLiteralTypes { file: String },
}

impl CompileError {
    /// The message table entry for this error kind.
    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            CompileError::PackageNotFound { .. } => &messages::PACKAGE_NOT_FOUND,
            CompileError::ScopeNotFound { .. } => &messages::SCOPE_NOT_FOUND,
            CompileError::ExportNotFound { .. } => &messages::EXPORT_NOT_FOUND,
            CompileError::FileBelongsToOtherPackage { .. } => &messages::FILE_BELONGS_TO_OTHER_PACKAGE,
            CompileError::InvalidImportAlias { .. } => &messages::INVALID_IMPORT_ALIAS,
            CompileError::SymbolNotFound { .. } => &messages::SYMBOL_NOT_FOUND,
            CompileError::MemberNotFound { .. } => &messages::MEMBER_NOT_FOUND,
            CompileError::CyclicInheritance { .. } => &messages::CYCLIC_INHERITANCE,
            CompileError::TypeMismatch { .. } => &messages::TYPE_MISMATCH,
            CompileError::BranchTypeMismatch { .. } => &messages::BRANCH_TYPE_MISMATCH,
            CompileError::CoalesceTypeMismatch { .. } => &messages::COALESCE_TYPE_MISMATCH,
            CompileError::UnresolvedType { .. } => &messages::UNRESOLVED_TYPE,
            CompileError::UnhandledInferenceCase { .. } => &messages::UNHANDLED_INFERENCE_CASE,
            CompileError::MissingLiteralTypes { .. } => &messages::MISSING_LITERAL_TYPES,
        }
    }

    pub fn code(&self) -> u32 {
        self.message().code
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.message(), self.to_string())
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Internal, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Internal, message: $msg }
        };
    }

    // ========================================================================
    // Workspace and import resolution (1000-1099)
    // ========================================================================
    pub const PACKAGE_NOT_FOUND: DiagnosticMessage = diag!(1001, Error, "Package not found.");
    pub const SCOPE_NOT_FOUND: DiagnosticMessage = diag!(1002, Error, "Export scope not found.");
    pub const EXPORT_NOT_FOUND: DiagnosticMessage = diag!(1003, Error, "Export not found.");
    pub const FILE_BELONGS_TO_OTHER_PACKAGE: DiagnosticMessage = diag!(1004, Error, "File belongs to another package.");
    pub const INVALID_IMPORT_ALIAS: DiagnosticMessage = diag!(1005, Error, "Import alias requires a whole-scope import.");

    // ========================================================================
    // Identifier and member resolution (1100-1199)
    // ========================================================================
    pub const SYMBOL_NOT_FOUND: DiagnosticMessage = diag!(1101, Error, "Identifier not found.");
    pub const MEMBER_NOT_FOUND: DiagnosticMessage = diag!(1102, Error, "Member not found.");

    // ========================================================================
    // Inheritance (1200-1299)
    // ========================================================================
    pub const CYCLIC_INHERITANCE: DiagnosticMessage = diag!(1201, Error, "Cyclic inheritance.");

    // ========================================================================
    // Type inference (2000-2099)
    // ========================================================================
    pub const TYPE_MISMATCH: DiagnosticMessage = diag!(2001, Error, "Type mismatch in assignment.");
    pub const BRANCH_TYPE_MISMATCH: DiagnosticMessage = diag!(2002, Error, "Conditional branches have different types.");
    pub const COALESCE_TYPE_MISMATCH: DiagnosticMessage = diag!(2003, Error, "Null-coalescing operands are incompatible.");
    pub const UNRESOLVED_TYPE: DiagnosticMessage = diag!(2004, Error, "Expression type could not be inferred.");
    pub const MISSING_LITERAL_TYPES: DiagnosticMessage = diag!(2005, Error, "Literal types are not configured.");
    pub const UNHANDLED_INFERENCE_CASE: DiagnosticMessage = diag!(2099, Internal, "Unhandled inference case.");
}
