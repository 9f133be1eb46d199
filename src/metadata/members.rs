//! Member descriptors: fields, properties, methods and their parameters.

use smol_str::SmolStr;

use super::types::{TypeId, TypeRef};

/// Accessibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// `protected`
    Family,
    /// `protected internal`
    FamilyOrAssembly,
    /// `internal`
    Assembly,
    /// `private protected`
    FamilyAndAssembly,
    Private,
}

impl Visibility {
    /// Whether a member with this visibility, declared in `declaring_assembly`,
    /// can be seen from code compiled into `from_assembly`.
    pub fn is_non_private(self, declaring_assembly: &str, from_assembly: &str) -> bool {
        match self {
            Self::Public | Self::Family | Self::FamilyOrAssembly => true,
            Self::Assembly | Self::FamilyAndAssembly => declaring_assembly == from_assembly,
            Self::Private => false,
        }
    }

    /// Same check for (nested) types, where `protected` alone does not qualify.
    pub fn type_is_non_private(self, declaring_assembly: &str, from_assembly: &str) -> bool {
        match self {
            Self::Public => true,
            Self::Assembly | Self::FamilyAndAssembly | Self::FamilyOrAssembly => {
                declaring_assembly == from_assembly
            }
            Self::Family | Self::Private => false,
        }
    }
}

/// How an argument is passed to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamDirection {
    #[default]
    In,
    Out,
    Ref,
}

impl ParamDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Ref => "ref",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    pub name: SmolStr,
    pub ty: TypeRef,
    pub direction: ParamDirection,
    /// Trailing array parameter that may absorb a variable number of arguments.
    pub is_params: bool,
}

impl ParamDef {
    pub fn new(name: impl Into<SmolStr>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            direction: ParamDirection::In,
            is_params: false,
        }
    }

    /// A variadic parameter; `element` is the type of each absorbed argument.
    pub fn params(name: impl Into<SmolStr>, element: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::array_of(element.into(), 1),
            direction: ParamDirection::In,
            is_params: true,
        }
    }

    pub fn with_direction(mut self, direction: ParamDirection) -> Self {
        self.direction = direction;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: SmolStr,
    pub ty: TypeRef,
    pub visibility: Visibility,
    pub is_static: bool,
    /// `readonly` fields and constants cannot be assigned.
    pub is_readonly: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<SmolStr>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }
}

/// A property accessor (`get` or `set`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    pub visibility: Visibility,
}

impl Accessor {
    pub fn new(visibility: Visibility) -> Self {
        Self { visibility }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: SmolStr,
    pub ty: TypeRef,
    pub is_static: bool,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
    /// Non-empty for indexed properties.
    pub parameters: Vec<ParamDef>,
}

impl PropertyDef {
    pub fn read_only(name: impl Into<SmolStr>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_static: false,
            getter: Some(Accessor::new(Visibility::Public)),
            setter: None,
            parameters: Vec::new(),
        }
    }

    pub fn read_write(name: impl Into<SmolStr>, ty: impl Into<TypeRef>) -> Self {
        Self {
            setter: Some(Accessor::new(Visibility::Public)),
            ..Self::read_only(name, ty)
        }
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_setter(mut self, visibility: Visibility) -> Self {
        self.setter = Some(Accessor::new(visibility));
        self
    }

    pub fn with_getter(mut self, visibility: Visibility) -> Self {
        self.getter = Some(Accessor::new(visibility));
        self
    }

    pub fn indexed_by(mut self, param: ParamDef) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_indexed(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn getter_name(&self) -> String {
        format!("get_{}", self.name)
    }

    pub fn setter_name(&self) -> String {
        format!("set_{}", self.name)
    }

    /// The most visible of the two accessors.
    pub fn visibility(&self) -> Visibility {
        [self.getter, self.setter]
            .into_iter()
            .flatten()
            .map(|a| a.visibility)
            .min_by_key(|v| *v as u8)
            .unwrap_or(Visibility::Private)
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: SmolStr,
    pub parameters: Vec<ParamDef>,
    pub return_type: TypeRef,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Compiler-generated members such as property accessors.
    pub is_special_name: bool,
    pub generic_arity: u16,
}

impl MethodDef {
    pub fn new(name: impl Into<SmolStr>, return_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: return_type.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_special_name: false,
            generic_arity: 0,
        }
    }

    pub fn constructor() -> Self {
        Self {
            is_special_name: true,
            ..Self::new(".ctor", TypeRef::VOID)
        }
    }

    pub fn param(mut self, param: ParamDef) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn generic(mut self, arity: u16) -> Self {
        self.generic_arity = arity;
        self
    }

    /// The variadic trailing parameter, if any.
    pub fn params_parameter(&self) -> Option<&ParamDef> {
        self.parameters.last().filter(|p| p.is_params)
    }

    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match (p.direction, p.is_params) {
                (_, true) => format!("params {}", p.name),
                (ParamDirection::In, false) => p.name.to_string(),
                (dir, false) => format!("{} {}", dir.keyword(), p.name),
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// A reference to a member of some catalogue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberRef {
    Field { owner: TypeId, index: usize },
    Property { owner: TypeId, index: usize },
    Method { owner: TypeId, index: usize },
    Constructor { owner: TypeId, index: usize },
    NestedType(TypeId),
    /// Index into the catalogue's extension method registry.
    Extension(usize),
}

impl MemberRef {
    pub fn owner(&self) -> Option<TypeId> {
        match self {
            Self::Field { owner, .. }
            | Self::Property { owner, .. }
            | Self::Method { owner, .. }
            | Self::Constructor { owner, .. } => Some(*owner),
            Self::NestedType(_) | Self::Extension(_) => None,
        }
    }
}
