//! The global and local unique symbol tables.
//!
//! Built once per [`ResolutionContext`]; read-only afterwards, so one set of
//! tables can be shared (behind an `Arc`) by any number of parses.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::symbols::{MemberSymbol, NamespaceId, NamespaceSymbol, Symbol, TypeSymbol};
use crate::metadata::{MemberFilter, MemberRef, ResolutionContext, TypeId};

#[derive(Debug, Clone, Default)]
pub struct SymbolTables {
    namespaces: Vec<NamespaceSymbol>,
    /// Root namespaces in discovery order. The global namespace (types
    /// without a namespace) is stored under the empty name.
    roots: Vec<NamespaceId>,
    global: FxHashMap<SmolStr, Symbol>,
    local: FxHashMap<SmolStr, Symbol>,
}

impl SymbolTables {
    pub fn build(context: &ResolutionContext) -> Self {
        let mut tables = Self::default();
        tables.collect_namespaces(context);
        tables.collect_types();
        tables.collect_this_members(context);
        tracing::debug!(
            namespaces = tables.namespaces.len(),
            global = tables.global.len(),
            local = tables.local.len(),
            "built symbol tables"
        );
        tables
    }

    /// Resolve a bare identifier: members of "this" shadow global names.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.local.get(name).or_else(|| self.global.get(name))
    }

    /// Namespaces and types only, ignoring members of "this".
    pub fn lookup_type_or_namespace(&self, name: &str) -> Option<&Symbol> {
        self.global.get(name)
    }

    pub fn global(&self) -> &FxHashMap<SmolStr, Symbol> {
        &self.global
    }

    pub fn local(&self) -> &FxHashMap<SmolStr, Symbol> {
        &self.local
    }

    pub fn namespace(&self, id: NamespaceId) -> &NamespaceSymbol {
        &self.namespaces[id.index()]
    }

    /// Dotted name of a namespace, e.g. `Shop.Billing`.
    pub fn qualified_name(&self, id: NamespaceId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(ns) = current {
            let data = self.namespace(ns);
            if !data.name.is_empty() {
                segments.push(data.name.as_str());
            }
            current = data.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    pub fn root_namespaces(&self) -> impl Iterator<Item = NamespaceId> + '_ {
        self.roots.iter().copied()
    }

    fn alloc(&mut self, name: SmolStr, parent: Option<NamespaceId>, level: u32) -> NamespaceId {
        let id = NamespaceId::new(self.namespaces.len() as u32);
        self.namespaces.push(NamespaceSymbol::new(name, parent, level));
        id
    }

    fn root(&mut self, name: &str) -> NamespaceId {
        if let Some(id) = self
            .roots
            .iter()
            .copied()
            .find(|id| self.namespaces[id.index()].name == name)
        {
            return id;
        }
        let id = self.alloc(name.into(), None, 0);
        self.roots.push(id);
        id
    }

    fn child(&mut self, parent: NamespaceId, name: &str, level: u32) -> NamespaceId {
        if let Some(id) = self.namespaces[parent.index()].child_namespace(name) {
            return id;
        }
        let id = self.alloc(name.into(), Some(parent), level);
        self.namespaces[parent.index()].add_namespace(name.into(), id);
        id
    }

    /// Bucket every visible top-level type into the namespace tree and
    /// publish namespace names in the global table.
    fn collect_namespaces(&mut self, context: &ResolutionContext) {
        let catalog = &context.catalog;
        let this_assembly = context.this_assembly();
        let mut duplicates: FxHashSet<SmolStr> = FxHashSet::default();
        let mut root_names: FxHashSet<SmolStr> = FxHashSet::default();

        for (id, def) in catalog.types() {
            let hidden = !def.visibility.type_is_non_private(&def.assembly, this_assembly);
            if def.is_nested() || hidden {
                continue;
            }
            let ns = match &def.namespace {
                None => self.root(""),
                Some(path) => {
                    let mut segments = path.split('.');
                    let first = segments.next().unwrap_or_default();
                    let root = self.root(first);
                    self.global.insert(first.into(), Symbol::Namespace(root));
                    root_names.insert(first.into());
                    let mut current = root;
                    for (depth, segment) in segments.enumerate() {
                        let level = depth as u32 + 1;
                        current = self.child(current, segment, level);
                        self.publish_sub_namespace(segment, current, level, &mut duplicates);
                    }
                    current
                }
            };
            self.namespaces[ns.index()].add_type(TypeSymbol {
                name: def.name.clone(),
                ty: id,
                generic_arity: def.generic_arity,
            });
        }

        for name in duplicates.difference(&root_names) {
            tracing::debug!(%name, "dropping ambiguous namespace name");
            self.global.remove(name);
        }
    }

    fn publish_sub_namespace(
        &mut self,
        name: &str,
        id: NamespaceId,
        level: u32,
        duplicates: &mut FxHashSet<SmolStr>,
    ) {
        match self.global.get(name) {
            Some(Symbol::Namespace(existing)) if *existing != id => {
                let existing_level = self.namespaces[existing.index()].level;
                if existing_level == level {
                    duplicates.insert(name.into());
                } else if level < existing_level {
                    duplicates.remove(name);
                    self.global.insert(name.into(), Symbol::Namespace(id));
                }
            }
            Some(_) => {}
            None => {
                self.global.insert(name.into(), Symbol::Namespace(id));
            }
        }
    }

    /// Breadth-first walk publishing type names: shallower names come first,
    /// namespaces always win, same-arity clashes drop the name.
    fn collect_types(&mut self) {
        let mut queue: VecDeque<NamespaceId> = self.roots.iter().copied().collect();
        let mut clashes: FxHashSet<SmolStr> = FxHashSet::default();

        while let Some(ns) = queue.pop_front() {
            let members: Vec<(SmolStr, Symbol)> = self.namespaces[ns.index()]
                .members()
                .map(|(name, sym)| (name.clone(), sym.clone()))
                .collect();
            for (name, sym) in members {
                if let Symbol::Namespace(child) = sym {
                    queue.push_back(child);
                    continue;
                }
                if clashes.contains(&name) {
                    continue;
                }
                match self.global.get(&name) {
                    Some(Symbol::Namespace(_)) => {}
                    Some(existing) => match existing.overload_with(&sym) {
                        Some(merged) => {
                            self.global.insert(name, merged);
                        }
                        None => {
                            self.global.remove(&name);
                            clashes.insert(name);
                        }
                    },
                    None => {
                        self.global.insert(name, sym);
                    }
                }
            }
        }
    }

    /// Members of "this" visible without qualification, and its nested types.
    fn collect_this_members(&mut self, context: &ResolutionContext) {
        let catalog = &context.catalog;
        let this = context.this_ref();
        let this_assembly = context.this_assembly();
        let visible = |owner: TypeId, declared: bool, vis: crate::metadata::Visibility| {
            declared || vis.is_non_private(&catalog.get(owner).assembly, this_assembly)
        };

        for f in catalog.fields(&this, MemberFilter::ALL) {
            if visible(f.owner, f.declared, f.def.visibility) {
                self.add_local(
                    f.def.name.clone(),
                    MemberRef::Field {
                        owner: f.owner,
                        index: f.index,
                    },
                );
            }
        }

        for p in catalog.properties(&this, MemberFilter::ALL) {
            if p.def.is_indexed() {
                let accessors = [
                    (p.def.getter, p.def.getter_name()),
                    (p.def.setter, p.def.setter_name()),
                ];
                for (accessor, name) in accessors {
                    let Some(accessor) = accessor else { continue };
                    if !visible(p.owner, p.declared, accessor.visibility) {
                        continue;
                    }
                    let index = catalog
                        .get(p.owner)
                        .methods
                        .iter()
                        .position(|m| m.name == name);
                    if let Some(index) = index {
                        self.add_local(
                            name.into(),
                            MemberRef::Method {
                                owner: p.owner,
                                index,
                            },
                        );
                    }
                }
            } else if visible(p.owner, p.declared, p.def.visibility()) {
                self.add_local(
                    p.def.name.clone(),
                    MemberRef::Property {
                        owner: p.owner,
                        index: p.index,
                    },
                );
            }
        }

        for m in catalog.methods(&this, MemberFilter::ALL) {
            if m.def.is_special_name || m.def.generic_arity > 0 {
                continue;
            }
            if visible(m.owner, m.declared, m.def.visibility) {
                self.add_local(
                    m.def.name.clone(),
                    MemberRef::Method {
                        owner: m.owner,
                        index: m.index,
                    },
                );
            }
        }

        for nested in catalog.nested_types(&this, MemberFilter::PUBLIC | MemberFilter::NON_PUBLIC) {
            let def = catalog.get(nested);
            let sym = Symbol::Type(TypeSymbol {
                name: def.name.clone(),
                ty: nested,
                generic_arity: def.generic_arity,
            });
            let merged = match self.global.get(&def.name) {
                Some(existing) if existing.is_type() => existing.overload_with(&sym),
                _ => None,
            };
            self.global.insert(def.name.clone(), merged.unwrap_or(sym));
        }
    }

    /// Members found first (the most derived) win.
    fn add_local(&mut self, name: SmolStr, member: MemberRef) {
        self.local
            .entry(name.clone())
            .or_insert(Symbol::Member(MemberSymbol { name, member }));
    }
}
