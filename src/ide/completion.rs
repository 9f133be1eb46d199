//! Completion items and the candidate sets offered at each completion point.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::metadata::{
    Catalog, FieldDef, Found, MemberFilter, MemberRef, MethodDef, PropertyDef, ResolutionContext,
    TypeId, TypeRef, Visibility,
};
use crate::parser::keywords::keywords_starting_with;
use crate::parser::CompletionRequest;
use crate::resolve::{NamespaceId, Symbol, SymbolTables};
use crate::validation::{constructor_signatures, method_signatures};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Namespace,
    Type,
    Field,
    Property,
    Method,
    Constructor,
    Keyword,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Namespace => 9,   // Module
            CompletionKind::Type => 7,        // Class
            CompletionKind::Field => 5,       // Field
            CompletionKind::Property => 10,   // Property
            CompletionKind::Method => 2,      // Method
            CompletionKind::Constructor => 4, // Constructor
            CompletionKind::Keyword => 14,    // Keyword
        }
    }
}

/// What a completion item stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionTarget {
    Namespace(NamespaceId),
    Type(TypeRef),
    Member(MemberRef),
    Keyword,
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// Type or signature, shown after the label.
    pub detail: Option<String>,
    pub target: CompletionTarget,
}

impl CompletionItem {
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind, target: CompletionTarget) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            target,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn keyword(word: &str) -> Self {
        Self::new(word, CompletionKind::Keyword, CompletionTarget::Keyword)
    }
}

/// Builds completion sets against one resolution context.
pub struct Completions<'a> {
    context: &'a ResolutionContext,
    tables: &'a SymbolTables,
}

impl<'a> Completions<'a> {
    pub fn new(context: &'a ResolutionContext, tables: &'a SymbolTables) -> Self {
        Self { context, tables }
    }

    fn catalog(&self) -> &'a Catalog {
        &self.context.catalog
    }

    /// Candidates for a completion point reached by the parser.
    pub fn for_request(&self, request: &CompletionRequest) -> Vec<CompletionItem> {
        match request {
            CompletionRequest::TypeMembers { ty, is_static } => self.type_members(ty, *is_static),
            CompletionRequest::Methods {
                ty,
                name,
                include_static,
                include_instance,
            } => self.methods(ty, name, *include_static, *include_instance),
            CompletionRequest::Constructors { ty } => self.constructors(ty),
            CompletionRequest::NestedTypes { ty } => self.nested_types(ty),
            CompletionRequest::Namespace(ns) => self.namespace_members(*ns),
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    fn same_assembly(&self, ty: &TypeRef) -> bool {
        let catalog = self.catalog();
        catalog
            .definition_of(ty)
            .is_some_and(|id| catalog.get(id).assembly == self.context.this_assembly())
    }

    /// Members of "this" are always visible; others only when non-private.
    fn member_visible(&self, owner: TypeId, visibility: Visibility) -> bool {
        self.context.is_this(owner)
            || visibility
                .is_non_private(&self.catalog().get(owner).assembly, self.context.this_assembly())
    }

    fn nested_visible(&self, nested: TypeId) -> bool {
        let def = self.catalog().get(nested);
        def.declaring_type == Some(self.context.this_type)
            || def
                .visibility
                .type_is_non_private(&def.assembly, self.context.this_assembly())
    }

    // =========================================================================
    // Completion sets
    // =========================================================================

    /// Members after `expr.`. A type target offers its static members and
    /// nested types, an instance target its instance and extension methods.
    pub fn type_members(&self, ty: &TypeRef, is_static: bool) -> Vec<CompletionItem> {
        let catalog = self.catalog();
        let mut filter = MemberFilter::PUBLIC;
        filter |= if is_static {
            MemberFilter::STATIC | MemberFilter::FLATTEN_HIERARCHY
        } else {
            MemberFilter::INSTANCE
        };
        if self.same_assembly(ty) {
            filter |= MemberFilter::NON_PUBLIC;
        }

        let mut receivers = vec![ty.clone()];
        if catalog.is_interface(ty) {
            receivers.extend(catalog.interfaces_of(ty));
            receivers.push(TypeRef::OBJECT);
        }

        let mut items: IndexMap<SmolStr, CompletionItem> = IndexMap::new();
        let mut add = |item: CompletionItem| {
            items.insert(item.label.clone(), item);
        };
        for receiver in &receivers {
            for field in catalog.fields(receiver, filter) {
                if self.member_visible(field.owner, field.def.visibility) {
                    add(self.field_item(&field));
                }
            }
            for property in catalog.properties(receiver, filter) {
                if property.def.is_indexed() {
                    self.indexed_accessors(receiver, &property, filter)
                        .into_iter()
                        .for_each(&mut add);
                } else if self.property_visible(&property) {
                    add(self.property_item(&property));
                }
            }
            for method in catalog.methods(receiver, filter) {
                if !method.def.is_special_name
                    && method.def.generic_arity == 0
                    && self.member_visible(method.owner, method.def.visibility)
                {
                    add(self.method_item(
                        MemberRef::Method {
                            owner: method.owner,
                            index: method.index,
                        },
                        method.def,
                        &method.close(&method.def.return_type),
                    ));
                }
            }
            if is_static {
                for nested in catalog.nested_types(receiver, filter) {
                    if self.nested_visible(nested) {
                        add(self.type_item(nested));
                    }
                }
            }
        }
        if !is_static {
            for (index, ext) in catalog.extensions_for(ty) {
                let member = MemberRef::Extension(index);
                add(self.method_item(member, &ext.method, &ext.method.return_type));
            }
        }
        items.into_values().collect()
    }

    fn property_visible(&self, property: &Found<'_, PropertyDef>) -> bool {
        if self.context.is_this(property.owner) {
            return true;
        }
        let assembly = &self.catalog().get(property.owner).assembly;
        [property.def.getter, property.def.setter]
            .into_iter()
            .flatten()
            .any(|a| a.visibility.is_non_private(assembly, self.context.this_assembly()))
    }

    /// Indexed properties are only reachable through their accessor methods.
    fn indexed_accessors(
        &self,
        receiver: &TypeRef,
        property: &Found<'_, PropertyDef>,
        filter: MemberFilter,
    ) -> Vec<CompletionItem> {
        let names = [property.def.getter_name(), property.def.setter_name()];
        self.catalog()
            .methods(receiver, filter)
            .into_iter()
            .filter(|m| {
                m.owner == property.owner
                    && m.def.is_special_name
                    && names.iter().any(|n| m.def.name == n.as_str())
                    && self.member_visible(m.owner, m.def.visibility)
            })
            .map(|m| {
                self.method_item(
                    MemberRef::Method {
                        owner: m.owner,
                        index: m.index,
                    },
                    m.def,
                    &m.close(&m.def.return_type),
                )
            })
            .collect()
    }

    /// Overloads of `name` after `expr.name(`.
    pub fn methods(
        &self,
        ty: &TypeRef,
        name: &str,
        include_static: bool,
        include_instance: bool,
    ) -> Vec<CompletionItem> {
        let mut scope = MemberFilter::empty();
        if include_static {
            scope |= MemberFilter::STATIC;
        }
        if include_instance {
            scope |= MemberFilter::INSTANCE;
        }
        let catalog = self.catalog();
        method_signatures(self.context, ty, name, scope)
            .into_iter()
            .filter_map(|sig| {
                let def = method_def(catalog, &sig.key.member)?;
                Some(self.method_item(sig.key.member, def, &sig.key.return_type))
            })
            .collect()
    }

    /// Constructors after `new T(`.
    pub fn constructors(&self, ty: &TypeRef) -> Vec<CompletionItem> {
        let catalog = self.catalog();
        let Some(owner) = catalog.definition_of(ty) else {
            return Vec::new();
        };
        let def = catalog.get(owner);
        constructor_signatures(self.context, ty)
            .into_iter()
            .filter_map(|sig| {
                let ctor = def.constructors.get(sig.key)?;
                let signature = MethodDef {
                    name: def.name.clone(),
                    ..ctor.clone()
                }
                .signature();
                Some(
                    CompletionItem::new(
                        def.name.clone(),
                        CompletionKind::Constructor,
                        CompletionTarget::Member(MemberRef::Constructor {
                            owner,
                            index: sig.key,
                        }),
                    )
                    .with_detail(signature),
                )
            })
            .collect()
    }

    /// Nested types after `new T`.
    pub fn nested_types(&self, ty: &TypeRef) -> Vec<CompletionItem> {
        let mut filter = MemberFilter::PUBLIC | MemberFilter::INSTANCE;
        if self.same_assembly(ty) {
            filter |= MemberFilter::NON_PUBLIC;
        }
        self.catalog()
            .nested_types(ty, filter)
            .into_iter()
            .filter(|id| self.nested_visible(*id))
            .map(|id| self.type_item(id))
            .collect()
    }

    /// Everything directly inside a namespace.
    pub fn namespace_members(&self, ns: NamespaceId) -> Vec<CompletionItem> {
        self.tables
            .namespace(ns)
            .members()
            .flat_map(|(name, symbol)| self.symbol_items(name, symbol))
            .collect()
    }

    /// Names starting with `first`, ignoring case: global namespaces and
    /// types not hidden by a member of "this", members of "this", keywords.
    pub fn root(&self, first: char) -> Vec<CompletionItem> {
        let first = first.to_ascii_uppercase();
        let matches = |name: &str| {
            name.chars()
                .next()
                .is_some_and(|c| c.to_ascii_uppercase() == first)
        };

        let mut items = Vec::new();
        for (name, symbol) in self.tables.global() {
            if matches(name) && !self.tables.local().contains_key(name) {
                items.extend(self.symbol_items(name, symbol));
            }
        }
        for (name, symbol) in self.tables.local() {
            if matches(name) {
                items.extend(self.symbol_items(name, symbol));
            }
        }
        items.extend(keywords_starting_with(first).map(CompletionItem::keyword));
        items
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn symbol_items(&self, name: &SmolStr, symbol: &Symbol) -> Vec<CompletionItem> {
        match symbol {
            Symbol::Namespace(ns) => vec![
                CompletionItem::new(
                    name.clone(),
                    CompletionKind::Namespace,
                    CompletionTarget::Namespace(*ns),
                )
                .with_detail(format!("namespace {}", self.tables.qualified_name(*ns))),
            ],
            Symbol::Type(ty) => vec![self.type_item(ty.ty)],
            Symbol::OverloadedType(types) => {
                types.candidates.iter().map(|c| self.type_item(c.ty)).collect()
            }
            Symbol::Member(member) => self.member_item(&member.member).into_iter().collect(),
        }
    }

    fn member_item(&self, member: &MemberRef) -> Option<CompletionItem> {
        let catalog = self.catalog();
        let item = match *member {
            MemberRef::Field { owner, index } => {
                let def = catalog.get(owner).fields.get(index)?;
                field_item(def, *member, &def.ty, catalog)
            }
            MemberRef::Property { owner, index } => {
                let def = catalog.get(owner).properties.get(index)?;
                property_item(def, *member, &def.ty, catalog)
            }
            MemberRef::Method { .. } | MemberRef::Extension(_) => {
                let def = method_def(catalog, member)?;
                self.method_item(*member, def, &def.return_type)
            }
            MemberRef::NestedType(id) => self.type_item(id),
            MemberRef::Constructor { .. } => return None,
        };
        Some(item)
    }

    fn type_item(&self, id: TypeId) -> CompletionItem {
        let catalog = self.catalog();
        CompletionItem::new(
            catalog.get(id).name.clone(),
            CompletionKind::Type,
            CompletionTarget::Type(TypeRef::Named(id)),
        )
        .with_detail(catalog.full_name(id))
    }

    fn field_item(&self, field: &Found<'_, FieldDef>) -> CompletionItem {
        let member = MemberRef::Field {
            owner: field.owner,
            index: field.index,
        };
        field_item(field.def, member, &field.close(&field.def.ty), self.catalog())
    }

    fn property_item(&self, property: &Found<'_, PropertyDef>) -> CompletionItem {
        let member = MemberRef::Property {
            owner: property.owner,
            index: property.index,
        };
        property_item(property.def, member, &property.close(&property.def.ty), self.catalog())
    }

    fn method_item(&self, member: MemberRef, def: &MethodDef, returns: &TypeRef) -> CompletionItem {
        CompletionItem::new(
            def.name.clone(),
            CompletionKind::Method,
            CompletionTarget::Member(member),
        )
        .with_detail(format!(
            "{} {}",
            self.catalog().display(returns),
            def.signature()
        ))
    }
}

fn field_item(
    def: &FieldDef,
    member: MemberRef,
    ty: &TypeRef,
    catalog: &Catalog,
) -> CompletionItem {
    CompletionItem::new(def.name.clone(), CompletionKind::Field, CompletionTarget::Member(member))
        .with_detail(catalog.display(ty))
}

fn property_item(
    def: &PropertyDef,
    member: MemberRef,
    ty: &TypeRef,
    catalog: &Catalog,
) -> CompletionItem {
    CompletionItem::new(
        def.name.clone(),
        CompletionKind::Property,
        CompletionTarget::Member(member),
    )
    .with_detail(catalog.display(ty))
}

fn method_def<'c>(catalog: &'c Catalog, member: &MemberRef) -> Option<&'c MethodDef> {
    match *member {
        MemberRef::Method { owner, index } => catalog.try_get(owner)?.methods.get(index),
        MemberRef::Extension(index) => catalog.extension(index).map(|e| &e.method),
        _ => None,
    }
}
