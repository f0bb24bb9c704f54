//! Workspace, packages, source files and export scopes.
//!
//! The [`Workspace`] owns every arena of the compilation. Passes receive it
//! explicitly, so two compilations never share state.

use crate::decl::*;
use crate::expr::{Expr, ExprKind};
use crate::ids::*;
use crate::stmt::{Block, Stmt, StmtKind};
use crate::types::{LiteralTypes, TypeKind, TypeTable};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;
use xlate_core::{Arena, Name, NameTable};
use xlate_diagnostics::CompileError;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Logical namespace a file exports into: `<package>.<scope>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportScopeRef {
    pub package_name: Name,
    pub scope_name: Name,
}

impl ExportScopeRef {
    pub fn new(package_name: Name, scope_name: Name) -> Self {
        Self {
            package_name,
            scope_name,
        }
    }

    pub fn id(&self, names: &NameTable) -> String {
        names.dotted(&[self.package_name, self.scope_name])
    }
}

/// Physical location of a file: its package and relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePath {
    pub package: PackageId,
    pub path: String,
}

/// What a name visible in a file denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailableSymbol {
    Decl(Importable),
    /// An aliased whole-scope import.
    Scope(ExportScopeRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportItem {
    /// Placeholder left by the parser.
    Unresolved(Name),
    Resolved(Importable),
}

#[derive(Debug, Clone)]
pub struct Import {
    pub export_scope: ExportScopeRef,
    pub import_all: bool,
    pub imports: Vec<ImportItem>,
    pub import_as: Option<Name>,
    pub leading_trivia: String,
    pub attributes: Option<Attributes>,
    pub parent_file: Option<FileId>,
}

impl Import {
    /// Create an import. An alias is only legal on a whole-scope import.
    pub fn new(
        names: &NameTable,
        export_scope: ExportScopeRef,
        import_all: bool,
        imports: Vec<ImportItem>,
        import_as: Option<Name>,
    ) -> Result<Self> {
        if let Some(alias) = import_as {
            if !import_all {
                return Err(CompileError::InvalidImportAlias {
                    scope: export_scope.id(names),
                    alias: names.resolve(alias).to_string(),
                });
            }
        }
        Ok(Self {
            export_scope,
            import_all,
            imports,
            import_as,
            leading_trivia: String::new(),
            attributes: None,
            parent_file: None,
        })
    }
}

/// Named symbol table a package exposes to importers.
#[derive(Debug, Clone)]
pub struct ExportedScope {
    pub id: ExportScopeRef,
    exports: IndexMap<Name, Importable>,
}

impl ExportedScope {
    pub fn new(id: ExportScopeRef) -> Self {
        Self {
            id,
            exports: IndexMap::new(),
        }
    }

    pub fn add_export(&mut self, name: Name, value: Importable) {
        self.exports.insert(name, value);
    }

    pub fn get_export(&self, names: &NameTable, name: Name) -> Result<Importable> {
        self.exports
            .get(&name)
            .copied()
            .ok_or_else(|| CompileError::ExportNotFound {
                symbol: names.dotted(&[self.id.package_name, self.id.scope_name, name]),
            })
    }

    pub fn all_exports(&self) -> impl Iterator<Item = (Name, Importable)> + '_ {
        self.exports.iter().map(|(n, i)| (*n, *i))
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Package {
    pub name: Name,
    /// Packages that only describe declarations (native libraries).
    pub definition_only: bool,
    pub files: IndexMap<String, FileId>,
    pub exported_scopes: IndexMap<Name, ExportedScope>,
}

impl Package {
    pub fn new(name: Name, definition_only: bool) -> Self {
        Self {
            name,
            definition_only,
            files: IndexMap::new(),
            exported_scopes: IndexMap::new(),
        }
    }

    pub fn get_exported_scope(&self, names: &NameTable, scope: Name) -> Result<&ExportedScope> {
        self.exported_scopes
            .get(&scope)
            .ok_or_else(|| CompileError::ScopeNotFound {
                package: names.resolve(self.name).to_string(),
                scope: names.resolve(scope).to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub imports: Vec<ImportId>,
    pub interfaces: Vec<InterfaceId>,
    pub classes: Vec<ClassId>,
    pub enums: Vec<EnumId>,
    pub funcs: Vec<FunctionId>,
    pub main_block: Option<Block>,
    pub source_path: SourcePath,
    pub export_scope: ExportScopeRef,
    /// Every name usable in this file: its own declarations, then imports.
    pub available_symbols: IndexMap<Name, AvailableSymbol>,
    pub literal_types: Option<LiteralTypes>,
}

impl SourceFile {
    pub fn new(source_path: SourcePath, export_scope: ExportScopeRef) -> Self {
        Self {
            imports: Vec::new(),
            interfaces: Vec::new(),
            classes: Vec::new(),
            enums: Vec::new(),
            funcs: Vec::new(),
            main_block: None,
            source_path,
            export_scope,
            available_symbols: IndexMap::new(),
            literal_types: None,
        }
    }

    pub fn add_available_symbols(&mut self, items: impl IntoIterator<Item = (Name, Importable)>) {
        for (name, item) in items {
            self.available_symbols.insert(name, AvailableSymbol::Decl(item));
        }
    }
}

// ============================================================================
// Workspace
// ============================================================================

#[derive(Debug, Default)]
pub struct Workspace {
    pub names: NameTable,
    pub types: TypeTable,
    pub packages: Arena<PackageId, Package>,
    package_index: FxHashMap<Name, PackageId>,
    pub files: Arena<FileId, SourceFile>,
    pub imports: Arena<ImportId, Import>,
    pub classes: Arena<ClassId, Class>,
    pub interfaces: Arena<InterfaceId, Interface>,
    pub enums: Arena<EnumId, Enum>,
    pub enum_members: Arena<EnumMemberId, EnumMember>,
    pub functions: Arena<FunctionId, GlobalFunction>,
    pub methods: Arena<MethodId, Method>,
    pub constructors: Arena<ConstructorId, Constructor>,
    pub fields: Arena<FieldId, Field>,
    pub properties: Arena<PropertyId, Property>,
    pub params: Arena<ParamId, Param>,
    pub variables: Arena<VariableId, VariableDecl>,
    pub lambdas: Arena<LambdaId, Lambda>,
    pub exprs: Arena<ExprId, Expr>,
    pub stmts: Arena<StmtId, Stmt>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Name {
        self.names.intern(s)
    }

    // ========================================================================
    // Packages
    // ========================================================================

    /// Register a package. A package with the same name is replaced.
    pub fn add_package(&mut self, name: &str, definition_only: bool) -> PackageId {
        let name = self.names.intern(name);
        let id = self.packages.alloc(Package::new(name, definition_only));
        self.package_index.insert(name, id);
        id
    }

    pub fn get_package(&self, name: Name) -> Result<PackageId> {
        self.package_index
            .get(&name)
            .copied()
            .ok_or_else(|| CompileError::PackageNotFound {
                package: self.names.resolve(name).to_string(),
            })
    }

    /// Add a file to `package`, merging its exports into its export scope.
    pub fn add_file_to_package(&mut self, package: PackageId, file: FileId, export_all: bool) -> Result<()> {
        let pkg_name = self.packages[package].name;
        let (path, scope_ref) = {
            let f = &self.files[file];
            if f.source_path.package != package || f.export_scope.package_name != pkg_name {
                let owner = self.packages[f.source_path.package].name;
                return Err(CompileError::FileBelongsToOtherPackage {
                    file: self.file_name(file),
                    owner: self.names.resolve(owner).to_string(),
                    package: self.names.resolve(pkg_name).to_string(),
                });
            }
            (f.source_path.path.clone(), f.export_scope)
        };

        let exports = self.collect_exports(file, export_all);
        let pkg = &mut self.packages[package];
        pkg.files.insert(path, file);
        let scope = pkg
            .exported_scopes
            .entry(scope_ref.scope_name)
            .or_insert_with(|| ExportedScope::new(scope_ref));
        for (name, item) in exports {
            scope.add_export(name, item);
        }
        debug!(file = %self.file_name(file), export_all, "added file to package");
        Ok(())
    }

    /// Declarations of `file` that are exported, or all of them.
    pub fn collect_exports(&self, file: FileId, export_all: bool) -> Vec<(Name, Importable)> {
        let f = &self.files[file];
        let mut out = Vec::new();
        for &c in &f.classes {
            let cls = &self.classes[c];
            if cls.is_exported || export_all {
                out.push((cls.name, Importable::Class(c)));
            }
        }
        for &i in &f.interfaces {
            let intf = &self.interfaces[i];
            if intf.is_exported || export_all {
                out.push((intf.name, Importable::Interface(i)));
            }
        }
        for &e in &f.enums {
            let en = &self.enums[e];
            if en.is_exported || export_all {
                out.push((en.name, Importable::Enum(e)));
            }
        }
        for &func in &f.funcs {
            let fun = &self.functions[func];
            if fun.is_exported || export_all {
                out.push((fun.name, Importable::Function(func)));
            }
        }
        out
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Add a parsed file: fills parent pointers and builds the file's own
    /// symbol table before any cross-file resolution runs.
    pub fn add_file(&mut self, file: SourceFile) -> FileId {
        let id = self.files.alloc(file);
        self.fill_parents(id);
        let own = self.collect_exports(id, true);
        self.files[id].add_available_symbols(own);
        id
    }

    fn fill_parents(&mut self, file: FileId) {
        let f = self.files[file].clone();
        for &i in &f.imports {
            self.imports[i].parent_file = Some(file);
        }
        for &e in &f.enums {
            self.enums[e].parent_file = Some(file);
        }
        for &func in &f.funcs {
            self.functions[func].parent_file = Some(file);
            for p in self.functions[func].parameters.clone() {
                self.params[p].parent_method = Some(MethodLikeId::Function(func));
            }
        }
        for &i in &f.interfaces {
            self.interfaces[i].parent_file = Some(file);
            let owner = InterfaceLike::Interface(i);
            for fld in self.interfaces[i].fields.clone() {
                self.fields[fld].parent_interface = Some(owner);
            }
            for m in self.interfaces[i].methods.clone() {
                self.fill_method_parent(m, owner);
            }
        }
        for &c in &f.classes {
            self.classes[c].parent_file = Some(file);
            let owner = InterfaceLike::Class(c);
            let cls = &self.classes[c];
            let (fields, props, methods, ctor) =
                (cls.fields.clone(), cls.properties.clone(), cls.methods.clone(), cls.constructor);
            for fld in fields {
                self.fields[fld].parent_interface = Some(owner);
            }
            for p in props {
                self.properties[p].parent_class = Some(c);
            }
            for m in methods {
                self.fill_method_parent(m, owner);
            }
            if let Some(ctor) = ctor {
                self.constructors[ctor].parent_class = Some(c);
                for p in self.constructors[ctor].parameters.clone() {
                    self.params[p].parent_method = Some(MethodLikeId::Constructor(ctor));
                }
            }
        }
    }

    fn fill_method_parent(&mut self, method: MethodId, owner: InterfaceLike) {
        self.methods[method].parent_interface = Some(owner);
        for p in self.methods[method].parameters.clone() {
            self.params[p].parent_method = Some(MethodLikeId::Method(method));
        }
    }

    /// `<package>/<path>` of a file.
    pub fn file_name(&self, file: FileId) -> String {
        let path = &self.files[file].source_path;
        format!("{}/{}", self.names.resolve(self.packages[path.package].name), path.path)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn add_class(&mut self, mut class: Class) -> ClassId {
        let id = self.classes.next_id();
        let args = class.type_arguments.iter().map(|n| self.types.generic(*n)).collect();
        class.self_type = self.types.class(id, args);
        self.classes.alloc(class)
    }

    pub fn add_interface(&mut self, mut intf: Interface) -> InterfaceId {
        let id = self.interfaces.next_id();
        let args = intf.type_arguments.iter().map(|n| self.types.generic(*n)).collect();
        intf.self_type = self.types.interface(id, args);
        self.interfaces.alloc(intf)
    }

    pub fn add_enum(&mut self, mut en: Enum) -> EnumId {
        let id = self.enums.next_id();
        en.ty = self.types.enum_type(id);
        for &m in &en.values {
            self.enum_members[m].parent_enum = Some(id);
        }
        self.enums.alloc(en)
    }

    pub fn add_enum_member(&mut self, name: &str) -> EnumMemberId {
        let name = self.names.intern(name);
        self.enum_members.alloc(EnumMember::new(name))
    }

    pub fn add_import(&mut self, import: Import) -> ImportId {
        self.imports.alloc(import)
    }

    pub fn add_function(&mut self, func: GlobalFunction) -> FunctionId {
        self.functions.alloc(func)
    }

    pub fn add_method(&mut self, method: Method) -> MethodId {
        self.methods.alloc(method)
    }

    pub fn add_constructor(&mut self, ctor: Constructor) -> ConstructorId {
        self.constructors.alloc(ctor)
    }

    pub fn add_field(&mut self, field: Field) -> FieldId {
        self.fields.alloc(field)
    }

    pub fn add_property(&mut self, prop: Property) -> PropertyId {
        self.properties.alloc(prop)
    }

    pub fn add_param(&mut self, param: Param) -> ParamId {
        self.params.alloc(param)
    }

    pub fn add_variable(&mut self, var: VariableDecl) -> VariableId {
        self.variables.alloc(var)
    }

    pub fn add_lambda(&mut self, lambda: Lambda) -> LambdaId {
        let id = self.lambdas.next_id();
        for &p in &lambda.parameters {
            self.params[p].parent_method = Some(MethodLikeId::Lambda(id));
        }
        self.lambdas.alloc(lambda)
    }

    pub fn alloc_expr(&mut self, kind: ExprKind) -> ExprId {
        self.exprs.alloc(Expr::new(kind))
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind) -> StmtId {
        self.stmts.alloc(Stmt::new(kind))
    }

    // ========================================================================
    // Uniform access
    // ========================================================================

    pub fn interface_decl(&self, x: InterfaceLike) -> &dyn InterfaceDecl {
        match x {
            InterfaceLike::Class(c) => &self.classes[c],
            InterfaceLike::Interface(i) => &self.interfaces[i],
        }
    }

    /// The class or interface a type denotes.
    pub fn interface_like_of(&self, ty: TypeId) -> Option<InterfaceLike> {
        match self.types.get(ty) {
            TypeKind::Class { decl, .. } => Some(InterfaceLike::Class(*decl)),
            TypeKind::Interface { decl, .. } => Some(InterfaceLike::Interface(*decl)),
            _ => None,
        }
    }

    pub fn importable_name(&self, item: Importable) -> Name {
        match item {
            Importable::Class(c) => self.classes[c].name,
            Importable::Interface(i) => self.interfaces[i].name,
            Importable::Enum(e) => self.enums[e].name,
            Importable::Function(f) => self.functions[f].name,
        }
    }

    pub fn importable_file(&self, item: Importable) -> Option<FileId> {
        match item {
            Importable::Class(c) => self.classes[c].parent_file,
            Importable::Interface(i) => self.interfaces[i].parent_file,
            Importable::Enum(e) => self.enums[e].parent_file,
            Importable::Function(f) => self.functions[f].parent_file,
        }
    }

    /// `<package>.<scope>.<symbol>` identity of an importable declaration.
    pub fn symbol_id(&self, item: Importable) -> String {
        let name = self.importable_name(item);
        match self.importable_file(item) {
            Some(file) => {
                let scope = self.files[file].export_scope;
                self.names.dotted(&[scope.package_name, scope.scope_name, name])
            }
            None => self.names.resolve(name).to_string(),
        }
    }

    pub fn interface_like_id(&self, x: InterfaceLike) -> String {
        match x {
            InterfaceLike::Class(c) => self.symbol_id(Importable::Class(c)),
            InterfaceLike::Interface(i) => self.symbol_id(Importable::Interface(i)),
        }
    }

    pub fn method_like(&self, id: MethodLikeId) -> &dyn MethodLike {
        match id {
            MethodLikeId::Method(m) => &self.methods[m],
            MethodLikeId::Constructor(c) => &self.constructors[c],
            MethodLikeId::Function(f) => &self.functions[f],
            MethodLikeId::Lambda(l) => &self.lambdas[l],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_in(ws: &mut Workspace, pkg: PackageId, path: &str, scope: &str) -> SourceFile {
        let pkg_name = ws.packages[pkg].name;
        let scope = ws.intern(scope);
        SourceFile::new(
            SourcePath { package: pkg, path: path.to_string() },
            ExportScopeRef::new(pkg_name, scope),
        )
    }

    #[test]
    fn test_file_sees_its_unexported_declarations() {
        let mut ws = Workspace::new();
        let pkg = ws.add_package("app", false);
        let name = ws.intern("Hidden");
        let cls = ws.add_class(Class::new(name, vec![], false));
        let mut file = file_in(&mut ws, pkg, "a.ts", "a");
        file.classes.push(cls);
        let file = ws.add_file(file);

        assert_eq!(
            ws.files[file].available_symbols.get(&name),
            Some(&AvailableSymbol::Decl(Importable::Class(cls)))
        );
        assert_eq!(ws.classes[cls].parent_file, Some(file));
    }

    #[test]
    fn test_add_file_merges_exports() {
        let mut ws = Workspace::new();
        let pkg = ws.add_package("app", false);
        let a = ws.intern("A");
        let b = ws.intern("B");
        let cls_a = ws.add_class(Class::new(a, vec![], true));
        let cls_b = ws.add_class(Class::new(b, vec![], false));

        let mut f1 = file_in(&mut ws, pkg, "one.ts", "index");
        f1.classes.push(cls_a);
        let f1 = ws.add_file(f1);
        let mut f2 = file_in(&mut ws, pkg, "two.ts", "index");
        f2.classes.push(cls_b);
        let f2 = ws.add_file(f2);

        ws.add_file_to_package(pkg, f1, false).unwrap();
        ws.add_file_to_package(pkg, f2, true).unwrap();
        ws.add_file_to_package(pkg, f1, false).unwrap();

        let index = ws.intern("index");
        let scope = ws.packages[pkg].get_exported_scope(&ws.names, index).unwrap();
        assert_eq!(scope.len(), 2);
        assert_eq!(scope.get_export(&ws.names, b).unwrap(), Importable::Class(cls_b));
    }

    #[test]
    fn test_file_from_other_package_is_rejected() {
        let mut ws = Workspace::new();
        let app = ws.add_package("app", false);
        let lib = ws.add_package("lib", false);
        let file = file_in(&mut ws, lib, "x.ts", "x");
        let file = ws.add_file(file);
        let err = ws.add_file_to_package(app, file, false).unwrap_err();
        assert!(matches!(err, CompileError::FileBelongsToOtherPackage { .. }));
    }

    #[test]
    fn test_missing_lookups() {
        let mut ws = Workspace::new();
        let pkg = ws.add_package("app", false);
        let missing = ws.intern("missing");
        assert!(matches!(ws.get_package(missing), Err(CompileError::PackageNotFound { .. })));

        let err = ws.packages[pkg].get_exported_scope(&ws.names, missing).unwrap_err();
        assert_eq!(err.to_string(), "Scope \"missing\" was not found in package \"app\"");

        let scope = ExportedScope::new(ExportScopeRef::new(ws.intern("app"), ws.intern("index")));
        let err = scope.get_export(&ws.names, ws.intern("Nope")).unwrap_err();
        assert_eq!(err, CompileError::ExportNotFound { symbol: "app.index.Nope".to_string() });
    }

    #[test]
    fn test_alias_requires_import_all() {
        let ws = Workspace::new();
        let scope = ExportScopeRef::new(ws.intern("lib"), ws.intern("index"));
        let alias = Some(ws.intern("L"));
        assert!(Import::new(&ws.names, scope, true, vec![], alias).is_ok());
        let err = Import::new(&ws.names, scope, false, vec![], alias).unwrap_err();
        assert!(matches!(err, CompileError::InvalidImportAlias { .. }));
    }

    #[test]
    fn test_generic_class_self_type() {
        let mut ws = Workspace::new();
        let t = ws.intern("T");
        let cls = ws.add_class(Class::new(ws.intern("List"), vec![t], true));
        let self_type = ws.classes[cls].self_type;
        let generic = ws.types.generic(t);
        assert_eq!(ws.types.get(self_type), &TypeKind::Class { decl: cls, type_args: vec![generic] });
    }
}
