//! Import resolution.
//!
//! Binds every import to the declarations of the export scope it names and
//! extends the importing file's available symbols. A name that is already
//! visible is overwritten by the import that binds it last.

use tracing::{debug, trace};
use xlate_ast::{AvailableSymbol, FileId, ImportItem, Importable, Result, Workspace};

/// Resolve the imports of every file in the workspace.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_imports(ws: &mut Workspace) -> Result<()> {
    let files: Vec<FileId> = ws.files.ids().collect();
    for file in files {
        resolve_file_imports(ws, file)?;
    }
    debug!(files = ws.files.len(), imports = ws.imports.len(), "imports resolved");
    Ok(())
}

/// Resolve the imports of one file in declaration order.
pub fn resolve_file_imports(ws: &mut Workspace, file: FileId) -> Result<()> {
    for import_id in ws.files[file].imports.clone() {
        let import = ws.imports[import_id].clone();
        let pkg = ws.get_package(import.export_scope.package_name)?;
        let scope = ws.packages[pkg].get_exported_scope(&ws.names, import.export_scope.scope_name)?;

        let bound: Vec<(xlate_core::Name, Importable)> = if import.import_all {
            scope.all_exports().collect()
        } else {
            let mut items = Vec::with_capacity(import.imports.len());
            for item in &import.imports {
                let resolved = match *item {
                    ImportItem::Unresolved(name) => (name, scope.get_export(&ws.names, name)?),
                    ImportItem::Resolved(decl) => (ws.importable_name(decl), decl),
                };
                items.push(resolved);
            }
            items
        };

        trace!(
            file = %ws.file_name(file),
            scope = %import.export_scope.id(&ws.names),
            count = bound.len(),
            "bound import"
        );
        ws.imports[import_id].imports = bound.iter().map(|(_, d)| ImportItem::Resolved(*d)).collect();

        let target = &mut ws.files[file];
        match import.import_as {
            Some(alias) => {
                target
                    .available_symbols
                    .insert(alias, AvailableSymbol::Scope(import.export_scope));
            }
            None => target.add_available_symbols(bound),
        }
    }
    Ok(())
}
