//! Type definitions, the catalogue that owns them, and member lookup.

use std::sync::Arc;

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::conversions;
use super::members::{FieldDef, MethodDef, ParamDef, PropertyDef, Visibility};
use super::types::{PrimitiveType, TypeId, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
}

bitflags! {
    /// Rule-specific roles a type can play. Inherited along the base chain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Can be constructed as a custom rule action: `MyAction(args)`.
        const RULE_ACTION = 1 << 0;
        /// A user-defined expression node type.
        const RULE_EXPRESSION = 1 << 1;
    }
}

bitflags! {
    /// Which members a lookup returns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFilter: u8 {
        const PUBLIC = 1 << 0;
        const NON_PUBLIC = 1 << 1;
        const INSTANCE = 1 << 2;
        const STATIC = 1 << 3;
        /// Also return static members declared on base types.
        const FLATTEN_HIERARCHY = 1 << 4;
        /// Only members declared on the type itself.
        const DECLARED_ONLY = 1 << 5;

        const PUBLIC_INSTANCE = Self::PUBLIC.bits() | Self::INSTANCE.bits();
        const PUBLIC_STATIC = Self::PUBLIC.bits()
            | Self::STATIC.bits()
            | Self::FLATTEN_HIERARCHY.bits();
        const ALL = Self::PUBLIC.bits()
            | Self::NON_PUBLIC.bits()
            | Self::INSTANCE.bits()
            | Self::STATIC.bits()
            | Self::FLATTEN_HIERARCHY.bits();
    }
}

/// A catalogue type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: SmolStr,
    /// Dotted namespace path; `None` for the global namespace.
    pub namespace: Option<SmolStr>,
    pub assembly: SmolStr,
    pub generic_arity: u16,
    pub visibility: Visibility,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub declaring_type: Option<TypeId>,
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub capabilities: Capabilities,
    pub fields: Vec<FieldDef>,
    pub properties: Vec<PropertyDef>,
    pub methods: Vec<MethodDef>,
    pub constructors: Vec<MethodDef>,
    pub nested_types: Vec<TypeId>,
}

impl TypeDef {
    fn with_kind(name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            assembly: SmolStr::default(),
            generic_arity: 0,
            visibility: Visibility::Public,
            kind,
            is_abstract: false,
            declaring_type: None,
            base_type: None,
            interfaces: Vec::new(),
            capabilities: Capabilities::empty(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            nested_types: Vec::new(),
        }
    }

    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self::with_kind(name, TypeKind::Class)
    }

    pub fn structure(name: impl Into<SmolStr>) -> Self {
        Self::with_kind(name, TypeKind::Struct)
    }

    pub fn interface(name: impl Into<SmolStr>) -> Self {
        Self {
            is_abstract: true,
            ..Self::with_kind(name, TypeKind::Interface)
        }
    }

    pub fn enumeration(name: impl Into<SmolStr>) -> Self {
        Self::with_kind(name, TypeKind::Enum)
    }

    pub fn in_namespace(mut self, namespace: impl Into<SmolStr>) -> Self {
        let ns: SmolStr = namespace.into();
        self.namespace = (!ns.is_empty()).then_some(ns);
        self
    }

    pub fn in_assembly(mut self, assembly: impl Into<SmolStr>) -> Self {
        self.assembly = assembly.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn generic(mut self, arity: u16) -> Self {
        self.generic_arity = arity;
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_base(mut self, base: impl Into<TypeRef>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<TypeRef>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds the property together with its `get_`/`set_` accessor methods.
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        if let Some(getter) = property.getter {
            self.methods.push(MethodDef {
                name: property.getter_name().into(),
                parameters: property.parameters.clone(),
                return_type: property.ty.clone(),
                visibility: getter.visibility,
                is_static: property.is_static,
                is_special_name: true,
                generic_arity: 0,
            });
        }
        if let Some(setter) = property.setter {
            let mut parameters = property.parameters.clone();
            parameters.push(ParamDef::new("value", property.ty.clone()));
            self.methods.push(MethodDef {
                name: property.setter_name().into(),
                parameters,
                return_type: TypeRef::VOID,
                visibility: setter.visibility,
                is_static: property.is_static,
                is_special_name: true,
                generic_arity: 0,
            });
        }
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: MethodDef) -> Self {
        self.constructors.push(MethodDef {
            name: ".ctor".into(),
            is_special_name: true,
            ..constructor
        });
        self
    }

    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    pub fn is_generic(&self) -> bool {
        self.generic_arity > 0
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }
}

/// An extension method: a static method callable as if it were an instance
/// method of every type assignable to `receiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMethod {
    pub declaring: TypeId,
    /// Type of the receiver (the implicit first parameter).
    pub receiver: TypeRef,
    /// The method without its receiver parameter.
    pub method: MethodDef,
}

/// A member found by a lookup, together with the type arguments of its
/// declaring type (used to close member types over generic parameters).
#[derive(Debug, Clone)]
pub struct Found<'a, T> {
    pub owner: TypeId,
    pub index: usize,
    pub def: &'a T,
    pub owner_args: Vec<TypeRef>,
    /// Whether the member is declared on the queried type rather than a base.
    pub declared: bool,
}

impl<T> Found<'_, T> {
    pub fn close(&self, ty: &TypeRef) -> TypeRef {
        ty.substitute(&self.owner_args)
    }
}

/// The catalogue of every type visible to rules.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    types: Vec<TypeDef>,
    primitives: FxHashMap<PrimitiveType, TypeId>,
    extensions: Vec<ExtensionMethod>,
}

impl Catalog {
    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    pub fn try_get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId::new(i as u32), def))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn extension_methods(&self) -> &[ExtensionMethod] {
        &self.extensions
    }

    pub fn extension(&self, index: usize) -> Option<&ExtensionMethod> {
        self.extensions.get(index)
    }

    /// Type that carries the members of a primitive.
    pub fn primitive_binding(&self, primitive: PrimitiveType) -> Option<TypeId> {
        self.primitives.get(&primitive).copied()
    }

    /// Find a top-level or nested type by dotted name, e.g. `Shop.Order.Line`.
    pub fn find_type(&self, full_name: &str) -> Option<TypeId> {
        self.types()
            .find(|(id, _)| self.full_name(*id) == full_name)
            .map(|(id, _)| id)
    }

    pub fn full_name(&self, id: TypeId) -> String {
        let def = self.get(id);
        match def.declaring_type {
            Some(outer) => format!("{}.{}", self.full_name(outer), def.name),
            None => match &def.namespace {
                Some(ns) => format!("{}.{}", ns, def.name),
                None => def.name.to_string(),
            },
        }
    }

    /// Human readable spelling of a type reference.
    pub fn display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(p) => p.keyword().to_string(),
            TypeRef::Named(id) => self.full_name(*id),
            TypeRef::Generic { definition, args } => {
                let args: Vec<String> = args.iter().map(|a| self.display(a)).collect();
                format!("{}<{}>", self.full_name(*definition), args.join(", "))
            }
            TypeRef::Array { element, rank } => {
                let commas = ",".repeat(usize::from(rank.saturating_sub(1)));
                format!("{}[{}]", self.display(element), commas)
            }
            TypeRef::Param(index) => format!("T{index}"),
            TypeRef::Null => "null".to_string(),
        }
    }

    /// The catalogue definition that carries members for `ty`.
    pub fn definition_of(&self, ty: &TypeRef) -> Option<TypeId> {
        match ty {
            TypeRef::Primitive(p) => self.primitive_binding(*p),
            _ => ty.definition(),
        }
    }

    pub fn is_value_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Primitive(p) => !p.is_reference() && *p != PrimitiveType::Void,
            TypeRef::Named(id) | TypeRef::Generic { definition: id, .. } => {
                self.get(*id).is_value_type()
            }
            _ => false,
        }
    }

    pub fn is_abstract(&self, ty: &TypeRef) -> bool {
        ty.definition()
            .is_some_and(|id| self.get(id).is_abstract || self.get(id).kind == TypeKind::Interface)
    }

    pub fn is_interface(&self, ty: &TypeRef) -> bool {
        ty.definition()
            .is_some_and(|id| self.get(id).kind == TypeKind::Interface)
    }

    /// Whether `ty` or any of its bases carries the capability.
    pub fn has_capability(&self, ty: &TypeRef, capability: Capabilities) -> bool {
        self.type_chain(ty)
            .iter()
            .any(|(id, _)| self.get(*id).capabilities.contains(capability))
    }

    /// The type followed by its base types, each with its type arguments.
    /// Classes without an explicit base end in the `object` binding.
    pub fn type_chain(&self, ty: &TypeRef) -> Vec<(TypeId, Vec<TypeRef>)> {
        let mut chain: Vec<(TypeId, Vec<TypeRef>)> = Vec::new();
        let Some(start) = self.definition_of(ty) else {
            return self
                .primitive_binding(PrimitiveType::Object)
                .map(|object| vec![(object, Vec::new())])
                .unwrap_or_default();
        };
        let mut current = Some((start, ty.generic_args().to_vec()));
        while let Some((id, args)) = current.take() {
            if chain.iter().any(|(seen, _)| *seen == id) {
                break;
            }
            let def = self.get(id);
            current = match &def.base_type {
                Some(base) => {
                    let closed = base.substitute(&args);
                    self.definition_of(&closed)
                        .map(|base_id| (base_id, closed.generic_args().to_vec()))
                }
                None if def.kind != TypeKind::Interface => self
                    .primitive_binding(PrimitiveType::Object)
                    .map(|object| (object, Vec::new())),
                None => None,
            };
            chain.push((id, args));
        }
        chain
    }

    /// Every interface implemented by `ty`, transitively, closed over its arguments.
    pub fn interfaces_of(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut found: Vec<TypeRef> = Vec::new();
        let mut pending: Vec<TypeRef> = self
            .type_chain(ty)
            .into_iter()
            .flat_map(|(id, args)| {
                self.get(id)
                    .interfaces
                    .iter()
                    .map(move |i| i.substitute(&args))
                    .collect::<Vec<_>>()
            })
            .collect();
        while let Some(interface) = pending.pop() {
            if found.contains(&interface) {
                continue;
            }
            if let Some(id) = interface.definition() {
                let args = interface.generic_args().to_vec();
                pending.extend(self.get(id).interfaces.iter().map(|i| i.substitute(&args)));
            }
            found.push(interface);
        }
        found
    }

    fn levels(&self, ty: &TypeRef, filter: MemberFilter) -> Vec<(usize, TypeId, Vec<TypeRef>)> {
        let mut chain = self.type_chain(ty);
        if filter.contains(MemberFilter::DECLARED_ONLY) {
            chain.truncate(1);
        }
        chain
            .into_iter()
            .enumerate()
            .map(|(depth, (id, args))| (depth, id, args))
            .collect()
    }

    fn admits(filter: MemberFilter, depth: usize, visibility: Visibility, is_static: bool) -> bool {
        let visible = if visibility == Visibility::Public {
            filter.contains(MemberFilter::PUBLIC)
        } else {
            filter.contains(MemberFilter::NON_PUBLIC)
                && (depth == 0 || visibility != Visibility::Private)
        };
        let scoped = if is_static {
            filter.contains(MemberFilter::STATIC)
                && (depth == 0 || filter.contains(MemberFilter::FLATTEN_HIERARCHY))
        } else {
            filter.contains(MemberFilter::INSTANCE)
        };
        visible && scoped
    }

    pub fn fields<'a>(&'a self, ty: &TypeRef, filter: MemberFilter) -> Vec<Found<'a, FieldDef>> {
        let mut out = Vec::new();
        for (depth, id, args) in self.levels(ty, filter) {
            for (index, def) in self.get(id).fields.iter().enumerate() {
                if Self::admits(filter, depth, def.visibility, def.is_static) {
                    out.push(Found {
                        owner: id,
                        index,
                        def,
                        owner_args: args.clone(),
                        declared: depth == 0,
                    });
                }
            }
        }
        out
    }

    pub fn properties<'a>(
        &'a self,
        ty: &TypeRef,
        filter: MemberFilter,
    ) -> Vec<Found<'a, PropertyDef>> {
        let mut out = Vec::new();
        for (depth, id, args) in self.levels(ty, filter) {
            for (index, def) in self.get(id).properties.iter().enumerate() {
                if Self::admits(filter, depth, def.visibility(), def.is_static) {
                    out.push(Found {
                        owner: id,
                        index,
                        def,
                        owner_args: args.clone(),
                        declared: depth == 0,
                    });
                }
            }
        }
        out
    }

    pub fn methods<'a>(&'a self, ty: &TypeRef, filter: MemberFilter) -> Vec<Found<'a, MethodDef>> {
        let mut out = Vec::new();
        for (depth, id, args) in self.levels(ty, filter) {
            for (index, def) in self.get(id).methods.iter().enumerate() {
                if Self::admits(filter, depth, def.visibility, def.is_static) {
                    out.push(Found {
                        owner: id,
                        index,
                        def,
                        owner_args: args.clone(),
                        declared: depth == 0,
                    });
                }
            }
        }
        out
    }

    /// Methods with the given name, most derived first.
    pub fn methods_named<'a>(
        &'a self,
        ty: &TypeRef,
        name: &str,
        filter: MemberFilter,
    ) -> Vec<Found<'a, MethodDef>> {
        let mut out = self.methods(ty, filter);
        out.retain(|m| m.def.name == name);
        out
    }

    /// Constructors declared on the type itself.
    pub fn constructors<'a>(
        &'a self,
        ty: &TypeRef,
        filter: MemberFilter,
    ) -> Vec<Found<'a, MethodDef>> {
        let Some(id) = self.definition_of(ty) else {
            return Vec::new();
        };
        let args = ty.generic_args().to_vec();
        self.get(id)
            .constructors
            .iter()
            .enumerate()
            .filter(|(_, def)| Self::admits(filter, 0, def.visibility, false))
            .map(|(index, def)| Found {
                owner: id,
                index,
                def,
                owner_args: args.clone(),
                declared: true,
            })
            .collect()
    }

    /// Nested types declared directly on `ty`.
    pub fn nested_types(&self, ty: &TypeRef, filter: MemberFilter) -> Vec<TypeId> {
        let Some(id) = self.definition_of(ty) else {
            return Vec::new();
        };
        self.get(id)
            .nested_types
            .iter()
            .copied()
            .filter(|nested| {
                let vis = self.get(*nested).visibility;
                if vis == Visibility::Public {
                    filter.contains(MemberFilter::PUBLIC)
                } else {
                    filter.contains(MemberFilter::NON_PUBLIC)
                }
            })
            .collect()
    }

    /// Nested type `name` of `ty`. A generic outer re-binds a nested generic
    /// of the same arity to its own arguments.
    pub fn nested_type(&self, ty: &TypeRef, name: &str, filter: MemberFilter) -> Option<TypeRef> {
        let nested = self
            .nested_types(ty, filter)
            .into_iter()
            .find(|id| self.get(*id).name == name)?;
        let outer_args = ty.generic_args();
        let def = self.get(nested);
        if def.is_generic() && usize::from(def.generic_arity) == outer_args.len() {
            Some(TypeRef::Generic {
                definition: nested,
                args: outer_args.to_vec(),
            })
        } else {
            Some(TypeRef::Named(nested))
        }
    }

    /// First field or property named `name`, searching from the most derived type.
    pub fn field_or_property<'a>(
        &'a self,
        ty: &TypeRef,
        name: &str,
        filter: MemberFilter,
    ) -> Option<FieldOrProperty<'a>> {
        let fields = self.fields(ty, filter);
        if let Some(field) = fields.into_iter().find(|f| f.def.name == name) {
            return Some(FieldOrProperty::Field(field));
        }
        self.properties(ty, filter)
            .into_iter()
            .find(|p| p.def.name == name && !p.def.is_indexed())
            .map(FieldOrProperty::Property)
    }

    /// Extension methods whose receiver accepts `ty`.
    pub fn extensions_for<'a>(
        &'a self,
        ty: &'a TypeRef,
    ) -> impl Iterator<Item = (usize, &'a ExtensionMethod)> + 'a {
        self.extensions
            .iter()
            .enumerate()
            .filter(move |(_, ext)| conversions::is_assignable(self, ty, &ext.receiver))
    }

    pub fn member_name(&self, member: &super::MemberRef) -> SmolStr {
        use super::MemberRef;
        match *member {
            MemberRef::Field { owner, index } => self.get(owner).fields[index].name.clone(),
            MemberRef::Property { owner, index } => self.get(owner).properties[index].name.clone(),
            MemberRef::Method { owner, index } => self.get(owner).methods[index].name.clone(),
            MemberRef::Constructor { owner, .. } => self.get(owner).name.clone(),
            MemberRef::NestedType(id) => self.get(id).name.clone(),
            MemberRef::Extension(index) => self
                .extensions
                .get(index)
                .map(|e| e.method.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Result of [`Catalog::field_or_property`].
#[derive(Debug, Clone)]
pub enum FieldOrProperty<'a> {
    Field(Found<'a, FieldDef>),
    Property(Found<'a, PropertyDef>),
}

impl FieldOrProperty<'_> {
    pub fn is_static(&self) -> bool {
        match self {
            Self::Field(f) => f.def.is_static,
            Self::Property(p) => p.def.is_static,
        }
    }

    /// The member type closed over the owner's type arguments.
    pub fn member_type(&self) -> TypeRef {
        match self {
            Self::Field(f) => f.close(&f.def.ty),
            Self::Property(p) => p.close(&p.def.ty),
        }
    }
}

/// Builds a [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    catalog: Catalog,
    default_assembly: SmolStr,
}

impl CatalogBuilder {
    /// Types added without an explicit assembly land in `default_assembly`.
    pub fn new(default_assembly: impl Into<SmolStr>) -> Self {
        Self {
            catalog: Catalog::default(),
            default_assembly: default_assembly.into(),
        }
    }

    pub fn add_type(&mut self, mut def: TypeDef) -> TypeId {
        if def.assembly.is_empty() {
            def.assembly = self.default_assembly.clone();
        }
        let id = TypeId::new(self.catalog.types.len() as u32);
        self.catalog.types.push(def);
        id
    }

    /// Add `def` as a nested type of `outer`; it inherits the outer namespace
    /// and assembly.
    pub fn add_nested_type(&mut self, outer: TypeId, mut def: TypeDef) -> TypeId {
        let outer_def = self.catalog.get(outer);
        def.namespace = outer_def.namespace.clone();
        if def.assembly.is_empty() {
            def.assembly = outer_def.assembly.clone();
        }
        def.declaring_type = Some(outer);
        let id = self.add_type(def);
        self.catalog.types[outer.index()].nested_types.push(id);
        id
    }

    pub fn type_mut(&mut self, id: TypeId) -> &mut TypeDef {
        &mut self.catalog.types[id.index()]
    }

    /// Let `id` carry the members of a primitive (e.g. `string.Length`).
    pub fn bind_primitive(&mut self, primitive: PrimitiveType, id: TypeId) -> &mut Self {
        self.catalog.primitives.insert(primitive, id);
        self
    }

    pub fn add_extension_method(
        &mut self,
        declaring: TypeId,
        receiver: impl Into<TypeRef>,
        method: MethodDef,
    ) -> usize {
        self.catalog.extensions.push(ExtensionMethod {
            declaring,
            receiver: receiver.into(),
            method: MethodDef {
                is_static: false,
                ..method
            },
        });
        self.catalog.extensions.len() - 1
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

/// The "this" type plus the catalogue bare identifiers are resolved against.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub catalog: Arc<Catalog>,
    pub this_type: TypeId,
}

impl ResolutionContext {
    pub fn new(catalog: Arc<Catalog>, this_type: TypeId) -> Self {
        Self { catalog, this_type }
    }

    pub fn this_def(&self) -> &TypeDef {
        self.catalog.get(self.this_type)
    }

    pub fn this_ref(&self) -> TypeRef {
        TypeRef::Named(self.this_type)
    }

    pub fn this_assembly(&self) -> &str {
        &self.this_def().assembly
    }

    /// Whether `owner` is the "this" type itself.
    pub fn is_this(&self, owner: TypeId) -> bool {
        owner == self.this_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Catalog, TypeId, TypeId) {
        let mut b = CatalogBuilder::new("App");
        let object = b.add_type(
            TypeDef::class("Object")
                .in_namespace("System")
                .with_method(MethodDef::new("ToString", TypeRef::STRING)),
        );
        b.bind_primitive(PrimitiveType::Object, object);
        let base = b.add_type(
            TypeDef::class("Base")
                .with_field(
                    FieldDef::new("secret", TypeRef::INT).with_visibility(Visibility::Private),
                )
                .with_field(FieldDef::new("Shared", TypeRef::INT).as_static())
                .with_property(PropertyDef::read_write("Name", TypeRef::STRING)),
        );
        let derived = b.add_type(TypeDef::class("Derived").with_base(base));
        (b.build(), base, derived)
    }

    #[test]
    fn test_type_chain_ends_in_object() {
        let (catalog, base, derived) = sample();
        let chain: Vec<TypeId> = catalog
            .type_chain(&TypeRef::Named(derived))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[1], base);
    }

    #[test]
    fn test_private_base_members_are_hidden() {
        let (catalog, _, derived) = sample();
        let fields = catalog.fields(&TypeRef::Named(derived), MemberFilter::ALL);
        let names: Vec<&str> = fields.iter().map(|f| f.def.name.as_str()).collect();
        assert_eq!(names, vec!["Shared"]);
    }

    #[test]
    fn test_static_base_members_need_flatten() {
        let (catalog, _, derived) = sample();
        let filter = MemberFilter::PUBLIC | MemberFilter::STATIC;
        assert!(catalog.fields(&TypeRef::Named(derived), filter).is_empty());
        let flat = catalog.fields(&TypeRef::Named(derived), MemberFilter::PUBLIC_STATIC);
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_property_accessors_are_synthesised() {
        let (catalog, base, _) = sample();
        let methods = catalog.methods(&TypeRef::Named(base), MemberFilter::ALL);
        let specials: Vec<&str> = methods
            .iter()
            .filter(|m| m.def.is_special_name)
            .map(|m| m.def.name.as_str())
            .collect();
        assert_eq!(specials, vec!["get_Name", "set_Name"]);
    }

    #[test]
    fn test_full_name_and_display() {
        let (catalog, base, _) = sample();
        assert_eq!(catalog.full_name(base), "Base");
        assert_eq!(
            catalog.display(&TypeRef::array_of(TypeRef::Named(base), 2)),
            "Base[,]"
        );
    }
}
