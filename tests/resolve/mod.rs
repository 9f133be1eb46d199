//! Symbol resolution and overload tests

pub mod tests_overloads;
pub mod tests_symbols;
