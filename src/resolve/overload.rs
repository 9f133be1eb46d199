//! Overload resolution for methods and constructors.
//!
//! A candidate matches in *normal* form when every argument converts to its
//! parameter, or in *expanded* form when the trailing arguments are collected
//! into a `params` array. Normal form beats expanded form; between two
//! expanded matches the one with more declared parameters wins. Anything
//! else is a tie, and a tie among the best candidates is an error.

use std::cmp::Ordering;

use thiserror::Error;

use crate::ast::Literal;
use crate::metadata::{conversions, Catalog, ParamDef, ParamDirection, TypeRef};

/// What the resolver knows about one call argument.
#[derive(Debug, Clone)]
pub struct ArgumentInfo<'a> {
    pub ty: TypeRef,
    /// Set when the argument is a literal, which may convert more freely.
    pub literal: Option<&'a Literal>,
    pub direction: ParamDirection,
}

impl<'a> ArgumentInfo<'a> {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            literal: None,
            direction: ParamDirection::In,
        }
    }

    pub fn literal(literal: &'a Literal) -> Self {
        Self {
            ty: literal.type_ref(),
            literal: Some(literal),
            direction: ParamDirection::In,
        }
    }

    pub fn with_direction(mut self, direction: ParamDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// A signature offered to the resolver. `params` must already be closed over
/// the declaring type's generic arguments.
#[derive(Debug, Clone)]
pub struct Signature<K> {
    pub key: K,
    pub params: Vec<ParamDef>,
}

/// How one argument binds to the chosen signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgBinding {
    /// Argument `i` passes through unchanged.
    Value(usize),
    /// Literal argument `i` converts to the parameter type.
    Coerced(usize),
    /// A trailing `null` supplies the whole `params` array.
    NullArray(usize),
    /// Arguments collected into the `params` array.
    Params(Vec<ArgBinding>),
}

#[derive(Debug, Clone)]
pub struct Candidate<K> {
    pub key: K,
    pub param_count: usize,
    pub expanded: bool,
    pub bindings: Vec<ArgBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverloadError {
    #[error("no overload matches the arguments")]
    NotFound,
    #[error("{0} overloads match the arguments equally well")]
    Ambiguous(usize),
}

/// Whether a literal converts to `to` where its type alone would not.
pub fn literal_coercible(catalog: &Catalog, literal: &Literal, to: &TypeRef) -> bool {
    match literal {
        Literal::Null => conversions::is_reference_type(catalog, to),
        Literal::Int(v) => conversions::constant_fits(v.as_i128(), to),
        _ => false,
    }
}

fn bind_one(
    catalog: &Catalog,
    arg: &ArgumentInfo<'_>,
    index: usize,
    param_ty: &TypeRef,
    param_direction: ParamDirection,
) -> Option<ArgBinding> {
    if arg.direction != param_direction {
        return None;
    }
    if param_direction != ParamDirection::In {
        return (arg.ty == *param_ty).then_some(ArgBinding::Value(index));
    }
    if conversions::is_assignable(catalog, &arg.ty, param_ty) {
        return Some(ArgBinding::Value(index));
    }
    arg.literal
        .filter(|lit| literal_coercible(catalog, lit, param_ty))
        .map(|_| ArgBinding::Coerced(index))
}

fn normal_form(
    catalog: &Catalog,
    params: &[ParamDef],
    args: &[ArgumentInfo<'_>],
) -> Option<Vec<ArgBinding>> {
    if params.len() != args.len() {
        return None;
    }
    params
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (param, arg))| {
            let last = i + 1 == params.len();
            if last && param.is_params && arg.literal.is_some_and(Literal::is_null) {
                return Some(ArgBinding::NullArray(i));
            }
            bind_one(catalog, arg, i, &param.ty, param.direction)
        })
        .collect()
}

fn expanded_form(
    catalog: &Catalog,
    params: &[ParamDef],
    args: &[ArgumentInfo<'_>],
) -> Option<Vec<ArgBinding>> {
    let (rest, fixed) = params.split_last()?;
    if !rest.is_params || args.len() < fixed.len() {
        return None;
    }
    let element = rest.ty.element_type()?;
    let mut bindings: Vec<ArgBinding> = fixed
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (param, arg))| bind_one(catalog, arg, i, &param.ty, param.direction))
        .collect::<Option<_>>()?;
    let collected = args[fixed.len()..]
        .iter()
        .enumerate()
        .map(|(offset, arg)| {
            bind_one(catalog, arg, fixed.len() + offset, element, ParamDirection::In)
        })
        .collect::<Option<Vec<_>>>()?;
    bindings.push(ArgBinding::Params(collected));
    Some(bindings)
}

/// Every signature the arguments can bind to.
pub fn candidates<K: Clone>(
    catalog: &Catalog,
    signatures: &[Signature<K>],
    args: &[ArgumentInfo<'_>],
) -> Vec<Candidate<K>> {
    signatures
        .iter()
        .filter_map(|sig| {
            let (bindings, expanded) = match normal_form(catalog, &sig.params, args) {
                Some(bindings) => (bindings, false),
                None => (expanded_form(catalog, &sig.params, args)?, true),
            };
            Some(Candidate {
                key: sig.key.clone(),
                param_count: sig.params.len(),
                expanded,
                bindings,
            })
        })
        .collect()
}

/// `Greater` when `a` is the better candidate.
pub fn compare<K>(a: &Candidate<K>, b: &Candidate<K>) -> Ordering {
    match (a.expanded, b.expanded) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => a.param_count.cmp(&b.param_count),
        (false, false) => Ordering::Equal,
    }
}

/// The unique best candidate.
pub fn select_best<K>(candidates: Vec<Candidate<K>>) -> Result<Candidate<K>, OverloadError> {
    let mut best: Vec<Candidate<K>> = Vec::new();
    for candidate in candidates {
        match best.first().map(|b| compare(&candidate, b)) {
            None | Some(Ordering::Equal) => best.push(candidate),
            Some(Ordering::Greater) => best = vec![candidate],
            Some(Ordering::Less) => {}
        }
    }
    tracing::trace!(remaining = best.len(), "overload ranking");
    match best.len() {
        0 => Err(OverloadError::NotFound),
        1 => best.pop().ok_or(OverloadError::NotFound),
        n => Err(OverloadError::Ambiguous(n)),
    }
}

/// Generate candidates and pick the best in one go.
pub fn resolve<K: Clone>(
    catalog: &Catalog,
    signatures: &[Signature<K>],
    args: &[ArgumentInfo<'_>],
) -> Result<Candidate<K>, OverloadError> {
    select_best(candidates(catalog, signatures, args))
}
