//! xlate_compiler: Compilation pipeline orchestration.
//!
//! A [`Compilation`] owns the workspace a front-end fills with packages and
//! files, and runs the core passes over it in dependency order: literal
//! type assignment, import resolution, inheritance resolution, identifier
//! resolution, type inference and mutability analysis. The first failure
//! aborts the run.

use tracing::{debug, trace};
use xlate_ast::{FileId, Importable, LiteralTypes, PackageId, Result, TypeId, Workspace};
use xlate_diagnostics::{CompileError, Diagnostic};
use xlate_infer::{InferStats, TypeInferrer};
use xlate_options::CompilerOptions;

/// The whole compilation unit.
pub struct Compilation {
    pub options: CompilerOptions,
    pub workspace: Workspace,
}

/// Summary of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub files: usize,
    pub inference: InferStats,
}

impl Compilation {
    pub fn new(options: CompilerOptions) -> Self {
        Self::with_workspace(Workspace::new(), options)
    }

    pub fn with_workspace(workspace: Workspace, options: CompilerOptions) -> Self {
        Self { options, workspace }
    }

    /// Register a parsed file with the package it was parsed for. Files of
    /// definition-only packages export everything when the options say so.
    pub fn add_file(&mut self, file: FileId) -> Result<()> {
        let package = self.workspace.files[file].source_path.package;
        let export_all = self.workspace.packages[package].definition_only && self.options.export_all_definition_only;
        self.workspace.add_file_to_package(package, file, export_all)
    }

    /// Run every pass over the workspace.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn compile(&mut self) -> Result<CompileOutput> {
        let ws = &mut self.workspace;
        assign_literal_types(ws, &self.options)?;
        xlate_resolver::resolve_imports(ws)?;
        xlate_resolver::resolve_inheritance(ws)?;
        xlate_resolver::resolve_identifiers(ws)?;
        let inference = TypeInferrer::new(self.options.max_inference_sweeps).run(ws)?;
        xlate_resolver::fill_mutability(ws);

        let output = CompileOutput {
            files: ws.files.len(),
            inference,
        };
        debug!(files = output.files, sweeps = output.inference.sweeps, "compilation finished");
        Ok(output)
    }

    /// Like [`Compilation::compile`], with a failure turned into a diagnostic record.
    pub fn compile_to_diagnostic(&mut self) -> std::result::Result<CompileOutput, Diagnostic> {
        self.compile().map_err(|e| e.to_diagnostic())
    }
}

/// Look the literal classes up in the configured stdlib scope and attach
/// them to every file. Without a stdlib package nothing is attached and
/// inference reports the first file that needs them.
pub fn assign_literal_types(ws: &mut Workspace, options: &CompilerOptions) -> Result<()> {
    let package = ws
        .names
        .get(&options.stdlib_package)
        .and_then(|name| ws.get_package(name).ok());
    let Some(package) = package else {
        debug!(package = %options.stdlib_package, "no stdlib package, literal types left unset");
        return Ok(());
    };

    let mut types = [ws.types.any_type; 8];
    for (slot, (kind, name)) in types.iter_mut().zip(options.literal_types.entries()) {
        *slot = literal_class(ws, package, options, name)?;
        trace!(kind, class = name, "literal class");
    }
    let [boolean, numeric, string, regex, array, map, error, promise] = types;
    let literals = LiteralTypes { boolean, numeric, string, regex, array, map, error, promise };
    let files: Vec<FileId> = ws.files.ids().collect();
    for file in &files {
        ws.files[*file].literal_types = Some(literals);
    }
    debug!(files = files.len(), "literal types assigned");
    Ok(())
}

/// Self type of the class exported as `name` from the stdlib scope.
fn literal_class(ws: &Workspace, package: PackageId, options: &CompilerOptions, name: &str) -> Result<TypeId> {
    let scope_name = ws.intern(&options.stdlib_scope);
    let scope = ws.packages[package].get_exported_scope(&ws.names, scope_name)?;
    let export = ws.intern(name);
    match scope.get_export(&ws.names, export)? {
        Importable::Class(c) => Ok(ws.classes[c].self_type),
        _ => Err(CompileError::ExportNotFound {
            symbol: ws.names.dotted(&[ws.packages[package].name, scope_name, export]),
        }),
    }
}
