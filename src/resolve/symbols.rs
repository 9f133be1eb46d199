//! Symbols bare identifiers resolve to.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::metadata::{MemberRef, TypeId};

/// Handle into the namespace arena of a [`SymbolTables`](super::SymbolTables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u32);

impl NamespaceId {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A non-generic or generic top-level type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub name: SmolStr,
    pub ty: TypeId,
    pub generic_arity: u16,
}

/// Same-named types that differ only in generic arity, e.g. `Pair` and `Pair<T, U>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadedTypeSymbol {
    pub name: SmolStr,
    pub candidates: Vec<TypeSymbol>,
}

impl OverloadedTypeSymbol {
    pub fn non_generic(&self) -> Option<&TypeSymbol> {
        self.candidates.iter().find(|c| c.generic_arity == 0)
    }

    pub fn with_arity(&self, arity: usize) -> Option<&TypeSymbol> {
        self.candidates
            .iter()
            .find(|c| usize::from(c.generic_arity) == arity && arity > 0)
    }
}

/// A field, property or method of the "this" type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol {
    pub name: SmolStr,
    pub member: MemberRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Namespace(NamespaceId),
    Type(TypeSymbol),
    OverloadedType(OverloadedTypeSymbol),
    Member(MemberSymbol),
}

impl Symbol {
    pub fn is_namespace(&self) -> bool {
        matches!(self, Symbol::Namespace(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Symbol::Type(_) | Symbol::OverloadedType(_))
    }

    fn type_candidates(&self) -> Option<Vec<TypeSymbol>> {
        match self {
            Symbol::Type(t) => Some(vec![t.clone()]),
            Symbol::OverloadedType(o) => Some(o.candidates.clone()),
            Symbol::Namespace(_) | Symbol::Member(_) => None,
        }
    }

    /// Merge two same-named type symbols. `None` when either is not a type or
    /// two candidates share a generic arity.
    pub fn overload_with(&self, other: &Symbol) -> Option<Symbol> {
        let mut candidates = self.type_candidates()?;
        for incoming in other.type_candidates()? {
            if candidates
                .iter()
                .any(|c| c.generic_arity == incoming.generic_arity)
            {
                return None;
            }
            candidates.push(incoming);
        }
        candidates.sort_by_key(|c| c.generic_arity);
        let name = candidates.first()?.name.clone();
        Some(Symbol::OverloadedType(OverloadedTypeSymbol { name, candidates }))
    }
}

/// A namespace and the namespaces and types directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSymbol {
    pub name: SmolStr,
    pub parent: Option<NamespaceId>,
    /// Depth below the root namespace; roots are level 0.
    pub level: u32,
    members: IndexMap<SmolStr, Symbol>,
    ambiguous: FxHashSet<SmolStr>,
}

impl NamespaceSymbol {
    pub(crate) fn new(name: SmolStr, parent: Option<NamespaceId>, level: u32) -> Self {
        Self {
            name,
            parent,
            level,
            members: IndexMap::new(),
            ambiguous: FxHashSet::default(),
        }
    }

    pub fn find_member(&self, name: &str) -> Option<&Symbol> {
        self.members.get(name)
    }

    pub fn members(&self) -> impl Iterator<Item = (&SmolStr, &Symbol)> {
        self.members.iter()
    }

    pub(crate) fn child_namespace(&self, name: &str) -> Option<NamespaceId> {
        match self.members.get(name) {
            Some(Symbol::Namespace(id)) => Some(*id),
            _ => None,
        }
    }

    /// A namespace displaces any type of the same name.
    pub(crate) fn add_namespace(&mut self, name: SmolStr, id: NamespaceId) {
        self.ambiguous.remove(&name);
        self.members.insert(name, Symbol::Namespace(id));
    }

    pub(crate) fn add_type(&mut self, ty: TypeSymbol) {
        if self.ambiguous.contains(&ty.name) {
            return;
        }
        let name = ty.name.clone();
        let incoming = Symbol::Type(ty);
        match self.members.get(&name) {
            Some(Symbol::Namespace(_)) => {}
            Some(existing) => match existing.overload_with(&incoming) {
                Some(merged) => {
                    self.members.insert(name, merged);
                }
                None => {
                    tracing::debug!(%name, "dropping ambiguous type name");
                    self.members.shift_remove(&name);
                    self.ambiguous.insert(name);
                }
            },
            None => {
                self.members.insert(name, incoming);
            }
        }
    }
}
