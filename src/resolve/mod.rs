//! Identifier resolution: the symbol tables bare names are looked up in, and
//! overload resolution for calls and constructors.

pub mod overload;
mod symbols;
mod tables;

pub use overload::{ArgBinding, ArgumentInfo, Candidate, OverloadError, Signature};
pub use symbols::{
    MemberSymbol, NamespaceId, NamespaceSymbol, OverloadedTypeSymbol, Symbol, TypeSymbol,
};
pub use tables::SymbolTables;
