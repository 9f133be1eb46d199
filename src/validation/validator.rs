//! The default [`TypeOracle`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{Diagnostic, TypeOracle};
use crate::ast::{
    ActionKind, BinaryOp, CustomConstruction, Expr, ExprKind, RuleAction, Stmt, StmtKind,
};
use crate::base::NodeId;
use crate::errors::ErrorCode;
use crate::metadata::{
    conversions, Capabilities, Catalog, FieldOrProperty, MemberFilter, MemberRef, ParamDef,
    ParamDirection, PrimitiveType, ResolutionContext, TypeId, TypeRef, Visibility,
};
use crate::resolve::overload::{self, ArgumentInfo, OverloadError, Signature};

/// A method a call can bind to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTarget {
    pub member: MemberRef,
    /// Closed over the receiver's generic arguments.
    pub return_type: TypeRef,
    pub is_static: bool,
}

fn accessible(context: &ResolutionContext, owner: TypeId, visibility: Visibility) -> bool {
    context.is_this(owner)
        || visibility.is_non_private(&context.catalog.get(owner).assembly, context.this_assembly())
}

fn closed_params(params: &[ParamDef], close: impl Fn(&TypeRef) -> TypeRef) -> Vec<ParamDef> {
    params
        .iter()
        .map(|p| ParamDef {
            ty: close(&p.ty),
            ..p.clone()
        })
        .collect()
}

/// Accessible, non-generic methods called `name` on `target`, with `scope`
/// picking static and/or instance methods. Instance scope adds extension
/// methods whose receiver accepts `target`.
pub fn method_signatures(
    context: &ResolutionContext,
    target: &TypeRef,
    name: &str,
    scope: MemberFilter,
) -> Vec<Signature<MethodTarget>> {
    let catalog = &context.catalog;
    let filter = MemberFilter::PUBLIC
        | MemberFilter::NON_PUBLIC
        | MemberFilter::FLATTEN_HIERARCHY
        | (scope & (MemberFilter::STATIC | MemberFilter::INSTANCE));

    let mut receivers = vec![target.clone()];
    if catalog.is_interface(target) {
        receivers.extend(catalog.interfaces_of(target));
    }

    let mut out = Vec::new();
    for receiver in &receivers {
        for m in catalog.methods_named(receiver, name, filter) {
            if m.def.generic_arity > 0 || !accessible(context, m.owner, m.def.visibility) {
                continue;
            }
            out.push(Signature {
                key: MethodTarget {
                    member: MemberRef::Method {
                        owner: m.owner,
                        index: m.index,
                    },
                    return_type: m.close(&m.def.return_type),
                    is_static: m.def.is_static,
                },
                params: closed_params(&m.def.parameters, |t| m.close(t)),
            });
        }
    }

    if scope.contains(MemberFilter::INSTANCE) {
        for (index, ext) in catalog.extensions_for(target) {
            if ext.method.name == name {
                out.push(Signature {
                    key: MethodTarget {
                        member: MemberRef::Extension(index),
                        return_type: ext.method.return_type.clone(),
                        is_static: false,
                    },
                    params: ext.method.parameters.clone(),
                });
            }
        }
    }
    out
}

/// Constructors of `ty` callable from the "this" assembly, keyed by index.
pub fn constructor_signatures(context: &ResolutionContext, ty: &TypeRef) -> Vec<Signature<usize>> {
    let catalog = &context.catalog;
    let same_assembly = catalog
        .definition_of(ty)
        .is_some_and(|id| catalog.get(id).assembly == context.this_assembly());
    let mut filter = MemberFilter::PUBLIC | MemberFilter::INSTANCE;
    if same_assembly {
        filter |= MemberFilter::NON_PUBLIC;
    }
    catalog
        .constructors(ty, filter)
        .into_iter()
        .map(|c| Signature {
            key: c.index,
            params: closed_params(&c.def.parameters, |t| c.close(t)),
        })
        .collect()
}

fn is_index_type(ty: &TypeRef) -> bool {
    ty.as_primitive().is_some_and(PrimitiveType::is_integral)
}

fn numeric_like(ty: &TypeRef) -> Option<PrimitiveType> {
    ty.as_primitive()
        .filter(|p| p.is_numeric() || *p == PrimitiveType::Char)
}

/// Type checker over a [`ResolutionContext`].
#[derive(Debug, Clone)]
pub struct RuleValidator {
    context: ResolutionContext,
    types: FxHashMap<NodeId, TypeRef>,
    errors: Vec<Diagnostic>,
}

impl RuleValidator {
    pub fn new(context: ResolutionContext) -> Self {
        Self {
            context,
            types: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.context.catalog)
    }

    fn display(&self, ty: &TypeRef) -> String {
        self.context.catalog.display(ty)
    }

    fn fail(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        node: NodeId,
    ) -> Option<TypeRef> {
        let diagnostic = Diagnostic::new(code, message, node);
        tracing::debug!(
            code = %diagnostic.code,
            message = %diagnostic.message,
            "validation failed"
        );
        self.errors.push(diagnostic);
        None
    }

    /// The recorded type of a child, validating it first if needed.
    fn type_of(&mut self, expr: &Expr) -> Option<TypeRef> {
        if let Some(ty) = self.types.get(&expr.id) {
            return Some(ty.clone());
        }
        self.validate_expression(expr, false)
    }

    fn argument_info<'e>(&mut self, arg: &'e Expr) -> Option<ArgumentInfo<'e>> {
        match &arg.kind {
            ExprKind::Direction { direction, expr } => {
                Some(ArgumentInfo::new(self.type_of(expr)?).with_direction(*direction))
            }
            ExprKind::Primitive(lit) => Some(ArgumentInfo::literal(lit)),
            _ => Some(ArgumentInfo::new(self.type_of(arg)?)),
        }
    }

    fn argument_infos<'e>(&mut self, args: &'e [Expr]) -> Option<Vec<ArgumentInfo<'e>>> {
        let mut infos = Vec::with_capacity(args.len());
        for arg in args {
            infos.push(self.argument_info(arg)?);
        }
        Some(infos)
    }

    fn describe_args(&self, args: &[ArgumentInfo<'_>]) -> String {
        args.iter()
            .map(|a| match a.direction {
                ParamDirection::In => self.display(&a.ty),
                dir => format!("{} {}", dir.keyword(), self.display(&a.ty)),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn check(&mut self, expr: &Expr, written: bool) -> Option<TypeRef> {
        if written && !Self::is_assignable_form(expr) {
            return self.fail(
                ErrorCode::E0403,
                format!("'{}' cannot be assigned to", expr.render(&self.catalog())),
                expr.id,
            );
        }
        match &expr.kind {
            ExprKind::Primitive(lit) => Some(lit.type_ref()),
            ExprKind::This => Some(self.context.this_ref()),
            ExprKind::TypeReference(ty) => Some(ty.clone()),
            ExprKind::FieldReference { target, name } => {
                self.check_member(expr, target, name, written, false)
            }
            ExprKind::PropertyReference { target, name } => {
                self.check_member(expr, target, name, written, true)
            }
            ExprKind::MethodInvoke {
                target,
                method,
                args,
            } => self.check_call(expr, target, method, args),
            ExprKind::ObjectCreate { ty, args } => self.check_create(expr, ty, args),
            ExprKind::ArrayCreate {
                element,
                size,
                initializers,
            } => self.check_array_create(element, size.as_deref(), initializers),
            ExprKind::Binary { left, op, right } => self.check_binary(expr, left, *op, right),
            ExprKind::Cast { ty, expr: inner } => self.check_cast(expr, ty, inner),
            ExprKind::ArrayIndexer { target, indices } => {
                self.check_array_index(expr, target, indices)
            }
            ExprKind::Indexer { target, indices } => {
                self.check_indexer(expr, target, indices, written)
            }
            ExprKind::Direction { expr: inner, .. } => self.type_of(inner),
            ExprKind::Custom(custom) => self.check_custom_expression(expr, custom),
        }
    }

    fn is_assignable_form(expr: &Expr) -> bool {
        matches!(
            expr.kind,
            ExprKind::FieldReference { .. }
                | ExprKind::PropertyReference { .. }
                | ExprKind::ArrayIndexer { .. }
                | ExprKind::Indexer { .. }
        )
    }

    fn check_member(
        &mut self,
        expr: &Expr,
        target: &Expr,
        name: &SmolStr,
        written: bool,
        want_property: bool,
    ) -> Option<TypeRef> {
        let target_ty = self.type_of(target)?;
        let through_type = matches!(target.kind, ExprKind::TypeReference(_));
        let catalog = self.catalog();
        let context = self.context.clone();

        let field = catalog
            .fields(&target_ty, MemberFilter::ALL)
            .into_iter()
            .find(|f| f.def.name == *name && accessible(&context, f.owner, f.def.visibility));
        let property = catalog
            .properties(&target_ty, MemberFilter::ALL)
            .into_iter()
            .find(|p| {
                p.def.name == *name
                    && !p.def.is_indexed()
                    && accessible(&context, p.owner, p.def.visibility())
            });
        let member = match (field, property, want_property) {
            (Some(f), _, false) => FieldOrProperty::Field(f),
            (_, Some(p), true) => FieldOrProperty::Property(p),
            _ => {
                let kind = if want_property { "property" } else { "field" };
                return self.fail(
                    ErrorCode::E0303,
                    format!(
                        "'{name}' is not a {kind} of '{}'",
                        self.display(&target_ty)
                    ),
                    expr.id,
                );
            }
        };

        if member.is_static() != through_type {
            let message = if member.is_static() {
                format!("static member '{name}' cannot be accessed through an instance")
            } else {
                format!("instance member '{name}' cannot be accessed through a type name")
            };
            return self.fail(ErrorCode::E0404, message, expr.id);
        }

        match &member {
            FieldOrProperty::Field(f) if written && f.def.is_readonly => {
                return self.fail(
                    ErrorCode::E0403,
                    format!("field '{name}' is read-only"),
                    expr.id,
                );
            }
            FieldOrProperty::Property(p) => {
                let accessor = if written { p.def.setter } else { p.def.getter };
                let usable = accessor.is_some_and(|a| accessible(&context, p.owner, a.visibility));
                if !usable {
                    let (code, message) = if written {
                        (ErrorCode::E0403, format!("property '{name}' cannot be assigned to"))
                    } else {
                        (ErrorCode::E0303, format!("property '{name}' cannot be read"))
                    };
                    return self.fail(code, message, expr.id);
                }
            }
            FieldOrProperty::Field(_) => {}
        }
        Some(member.member_type())
    }

    fn check_call(
        &mut self,
        expr: &Expr,
        target: &Expr,
        name: &SmolStr,
        args: &[Expr],
    ) -> Option<TypeRef> {
        let target_ty = self.type_of(target)?;
        let infos = self.argument_infos(args)?;
        let scope = if matches!(target.kind, ExprKind::TypeReference(_)) {
            MemberFilter::STATIC
        } else {
            MemberFilter::INSTANCE
        };
        let signatures = method_signatures(&self.context, &target_ty, name, scope);
        if signatures.is_empty() {
            let message = format!("'{name}' is not a method of '{}'", self.display(&target_ty));
            return self.fail(ErrorCode::E0307, message, expr.id);
        }
        match overload::resolve(&self.context.catalog, &signatures, &infos) {
            Ok(best) => Some(best.key.return_type),
            Err(OverloadError::NotFound) => {
                let message = format!(
                    "no overload of '{name}' takes arguments ({})",
                    self.describe_args(&infos)
                );
                self.fail(ErrorCode::E0307, message, expr.id)
            }
            Err(OverloadError::Ambiguous(_)) => self.fail(
                ErrorCode::E0308,
                format!("call to '{name}' is ambiguous"),
                expr.id,
            ),
        }
    }

    fn check_create(&mut self, expr: &Expr, ty: &TypeRef, args: &[Expr]) -> Option<TypeRef> {
        let catalog = self.catalog();
        let infos = self.argument_infos(args)?;
        if catalog.is_value_type(ty) && args.is_empty() {
            return Some(ty.clone());
        }
        if catalog.is_abstract(ty) {
            return self.fail(
                ErrorCode::E0310,
                format!("cannot create an instance of abstract type '{}'", self.display(ty)),
                expr.id,
            );
        }
        let signatures = constructor_signatures(&self.context, ty);
        match overload::resolve(&catalog, &signatures, &infos) {
            Ok(_) => Some(ty.clone()),
            Err(OverloadError::NotFound) => {
                let message = format!(
                    "'{}' has no constructor taking ({})",
                    self.display(ty),
                    self.describe_args(&infos)
                );
                self.fail(ErrorCode::E0309, message, expr.id)
            }
            Err(OverloadError::Ambiguous(_)) => self.fail(
                ErrorCode::E0308,
                format!("constructor call for '{}' is ambiguous", self.display(ty)),
                expr.id,
            ),
        }
    }

    /// A constructed custom expression evaluates to its own type.
    fn check_custom_expression(
        &mut self,
        expr: &Expr,
        custom: &CustomConstruction,
    ) -> Option<TypeRef> {
        for arg in custom.expressions() {
            self.type_of(arg)?;
        }
        let ty = TypeRef::Named(custom.ty);
        if !self.context.catalog.has_capability(&ty, Capabilities::RULE_EXPRESSION) {
            let message = format!("'{}' is not a custom expression", self.display(&ty));
            return self.fail(ErrorCode::E0503, message, expr.id);
        }
        Some(ty)
    }

    fn check_array_create(
        &mut self,
        element: &TypeRef,
        size: Option<&Expr>,
        initializers: &[Expr],
    ) -> Option<TypeRef> {
        let catalog = self.catalog();
        if let Some(size) = size {
            let size_ty = self.type_of(size)?;
            if !is_index_type(&size_ty) {
                return self.fail(
                    ErrorCode::E0406,
                    format!("array size must be an integer, not '{}'", self.display(&size_ty)),
                    size.id,
                );
            }
        }
        for init in initializers {
            let init_ty = self.type_of(init)?;
            let fits = conversions::is_assignable(&catalog, &init_ty, element)
                || init
                    .literal()
                    .is_some_and(|lit| overload::literal_coercible(&catalog, lit, element));
            if !fits {
                let message = format!(
                    "cannot convert '{}' to array element type '{}'",
                    self.display(&init_ty),
                    self.display(element)
                );
                return self.fail(ErrorCode::E0401, message, init.id);
            }
        }
        Some(TypeRef::array_of(element.clone(), 1))
    }

    fn check_binary(
        &mut self,
        expr: &Expr,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
    ) -> Option<TypeRef> {
        let lhs = self.type_of(left)?;
        let rhs = self.type_of(right)?;
        let catalog = self.catalog();
        let promoted = numeric_like(&lhs)
            .zip(numeric_like(&rhs))
            .and_then(|(l, r)| conversions::binary_numeric_promotion(l, r));
        let integral = |t: &TypeRef| t.as_primitive().is_some_and(PrimitiveType::is_integral);

        let result = match op {
            BinaryOp::ValueEquality => {
                let comparable = lhs == rhs
                    || promoted.is_some()
                    || conversions::is_assignable(&catalog, &lhs, &rhs)
                    || conversions::is_assignable(&catalog, &rhs, &lhs);
                comparable.then_some(TypeRef::BOOL)
            }
            _ if op.is_relational() => promoted.map(|_| TypeRef::BOOL),
            BinaryOp::Add if lhs == TypeRef::STRING || rhs == TypeRef::STRING => {
                let void = |t: &TypeRef| *t == TypeRef::VOID;
                (!void(&lhs) && !void(&rhs)).then_some(TypeRef::STRING)
            }
            _ if op.is_arithmetic() => promoted.map(TypeRef::Primitive),
            _ if op.is_logical() => (lhs.is_bool() && rhs.is_bool()).then_some(TypeRef::BOOL),
            _ if op.is_bitwise() => {
                if lhs.is_bool() && rhs.is_bool() {
                    Some(TypeRef::BOOL)
                } else if integral(&lhs) && integral(&rhs) {
                    promoted.map(TypeRef::Primitive)
                } else {
                    None
                }
            }
            _ => None,
        };

        match result {
            Some(ty) => Some(ty),
            None => {
                let message = format!(
                    "operator '{}' cannot be applied to '{}' and '{}'",
                    op.symbol(),
                    self.display(&lhs),
                    self.display(&rhs)
                );
                self.fail(ErrorCode::E0401, message, expr.id)
            }
        }
    }

    fn check_cast(&mut self, expr: &Expr, to: &TypeRef, inner: &Expr) -> Option<TypeRef> {
        let from = self.type_of(inner)?;
        let catalog = self.catalog();
        let allowed = conversions::is_assignable(&catalog, &from, to)
            || conversions::is_assignable(&catalog, to, &from)
            || (numeric_like(&from).is_some() && numeric_like(to).is_some())
            || from == TypeRef::OBJECT
            || catalog.is_interface(to)
            || catalog.is_interface(&from);
        if allowed {
            Some(to.clone())
        } else {
            let message = format!(
                "cannot cast '{}' to '{}'",
                self.display(&from),
                self.display(to)
            );
            self.fail(ErrorCode::E0405, message, expr.id)
        }
    }

    fn check_array_index(
        &mut self,
        expr: &Expr,
        target: &Expr,
        indices: &[Expr],
    ) -> Option<TypeRef> {
        let target_ty = self.type_of(target)?;
        let TypeRef::Array { element, rank } = &target_ty else {
            let message = format!("'{}' is not an array", self.display(&target_ty));
            return self.fail(ErrorCode::E0406, message, expr.id);
        };
        if usize::from(*rank) != indices.len() {
            let message = format!("array of rank {rank} indexed with {} indices", indices.len());
            return self.fail(ErrorCode::E0406, message, expr.id);
        }
        for index in indices {
            let ty = self.type_of(index)?;
            if !is_index_type(&ty) {
                let message =
                    format!("array index must be an integer, not '{}'", self.display(&ty));
                return self.fail(ErrorCode::E0406, message, index.id);
            }
        }
        Some((**element).clone())
    }

    fn check_indexer(
        &mut self,
        expr: &Expr,
        target: &Expr,
        indices: &[Expr],
        written: bool,
    ) -> Option<TypeRef> {
        let target_ty = self.type_of(target)?;
        let infos = self.argument_infos(indices)?;
        let catalog = self.catalog();
        let context = self.context.clone();
        let signatures: Vec<Signature<TypeRef>> = catalog
            .properties(&target_ty, MemberFilter::PUBLIC_INSTANCE | MemberFilter::NON_PUBLIC)
            .into_iter()
            .filter(|p| p.def.is_indexed())
            .filter(|p| {
                let accessor = if written { p.def.setter } else { p.def.getter };
                accessor.is_some_and(|a| accessible(&context, p.owner, a.visibility))
            })
            .map(|p| Signature {
                key: p.close(&p.def.ty),
                params: closed_params(&p.def.parameters, |t| p.close(t)),
            })
            .collect();
        match overload::resolve(&catalog, &signatures, &infos) {
            Ok(best) => Some(best.key),
            Err(OverloadError::NotFound) => {
                let message = format!(
                    "'{}' has no indexer taking ({})",
                    self.display(&target_ty),
                    self.describe_args(&infos)
                );
                self.fail(ErrorCode::E0406, message, expr.id)
            }
            Err(OverloadError::Ambiguous(_)) => self.fail(
                ErrorCode::E0308,
                format!("indexer on '{}' is ambiguous", self.display(&target_ty)),
                expr.id,
            ),
        }
    }
}

impl TypeOracle for RuleValidator {
    fn reset(&mut self) {
        self.types.clear();
        self.errors.clear();
    }

    fn validate_expression(&mut self, expr: &Expr, is_written: bool) -> Option<TypeRef> {
        let ty = self.check(expr, is_written)?;
        self.types.insert(expr.id, ty.clone());
        Some(ty)
    }

    fn validate_statement(&mut self, stmt: &Stmt) -> bool {
        match &stmt.kind {
            StmtKind::Expression(expr) => self.type_of(expr).is_some(),
            StmtKind::Assign { lhs, rhs } => {
                let recorded = self.types.get(&lhs.id).cloned();
                let Some(target) = recorded.or_else(|| self.validate_expression(lhs, true)) else {
                    return false;
                };
                let Some(value) = self.type_of(rhs) else {
                    return false;
                };
                let catalog = self.catalog();
                let fits = conversions::is_assignable(&catalog, &value, &target)
                    || rhs
                        .literal()
                        .is_some_and(|lit| overload::literal_coercible(&catalog, lit, &target));
                if !fits {
                    let message = format!(
                        "cannot assign '{}' to '{}'",
                        self.display(&value),
                        self.display(&target)
                    );
                    self.fail(ErrorCode::E0403, message, stmt.id);
                }
                fits
            }
        }
    }

    fn validate_action(&mut self, action: &RuleAction) -> bool {
        match &action.kind {
            ActionKind::Halt => true,
            ActionKind::Update { path } if path.is_empty() => {
                self.fail(ErrorCode::E0501, "update path is empty", action.id);
                false
            }
            ActionKind::Update { .. } => true,
            ActionKind::Statement(stmt) => self.validate_statement(stmt),
            ActionKind::Custom(custom) => {
                let ty = TypeRef::Named(custom.ty);
                if self.context.catalog.has_capability(&ty, Capabilities::RULE_ACTION) {
                    true
                } else {
                    let message = format!("'{}' is not a rule action", self.display(&ty));
                    self.fail(ErrorCode::E0504, message, action.id);
                    false
                }
            }
        }
    }

    fn expression_type(&self, id: NodeId) -> Option<&TypeRef> {
        self.types.get(&id)
    }

    fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    fn written_paths(&self, expr: &Expr) -> Vec<String> {
        super::written_paths(&self.context.catalog, expr)
    }
}
