//! Reflection-style metadata catalogue.
//!
//! The rule front end never inspects real runtime types. Instead it works
//! against a [`Catalog`]: an enumerable set of [`TypeDef`]s, each describing
//! its namespace, generic arity, visibility and members, plus a registry of
//! extension methods. Hosts build one with [`CatalogBuilder`].
//!
//! - [`types`] - [`PrimitiveType`], [`TypeRef`], [`TypeId`]
//! - [`members`] - field, property, method and parameter descriptors
//! - [`catalog`] - [`TypeDef`], [`Catalog`], member lookup with [`MemberFilter`]
//! - [`conversions`] - assignability and literal coercion rules

pub mod catalog;
pub mod conversions;
pub mod members;
pub mod types;

pub use catalog::{
    Capabilities, Catalog, CatalogBuilder, ExtensionMethod, FieldOrProperty, Found, MemberFilter,
    ResolutionContext, TypeDef, TypeKind,
};
pub use members::{
    Accessor, FieldDef, MemberRef, MethodDef, ParamDef, ParamDirection, PropertyDef, Visibility,
};
pub use types::{PrimitiveType, TypeId, TypeRef};
