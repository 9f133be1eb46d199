//! Expression nodes.

use smol_str::SmolStr;

use super::literal::Literal;
use crate::base::NodeId;
use crate::metadata::{Catalog, ParamDirection, TypeId, TypeRef};

/// Binary operators of the host representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    ValueEquality,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    BitwiseOr,
    BitwiseAnd,
    BooleanOr,
    BooleanAnd,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::ValueEquality => "==",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::BitwiseOr => "|",
            Self::BitwiseAnd => "&",
            Self::BooleanOr => "||",
            Self::BooleanAnd => "&&",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulus
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, Self::BooleanOr | Self::BooleanAnd)
    }

    pub fn is_bitwise(self) -> bool {
        matches!(self, Self::BitwiseOr | Self::BitwiseAnd)
    }
}

/// An argument bound to a constructor parameter of a custom type.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundArgument {
    /// The argument expression, passed as is.
    Expr(Expr),
    /// A literal converted to the parameter type.
    Constant(Literal),
    /// Arguments collected into a variadic trailing parameter.
    Params(Vec<BoundArgument>),
}

impl BoundArgument {
    fn collect<'a>(&'a self, out: &mut Vec<&'a Expr>) {
        match self {
            BoundArgument::Expr(e) => out.push(e),
            BoundArgument::Constant(_) => {}
            BoundArgument::Params(args) => args.iter().for_each(|a| a.collect(out)),
        }
    }

    fn render(&self, catalog: &Catalog) -> String {
        match self {
            BoundArgument::Expr(e) => e.render(catalog),
            BoundArgument::Constant(lit) => lit.to_string(),
            BoundArgument::Params(args) => args
                .iter()
                .map(|a| a.render(catalog))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// A user-defined action or expression constructed from `TypeName(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomConstruction {
    pub ty: TypeId,
    /// Index into the type's constructors.
    pub constructor: usize,
    pub arguments: Vec<BoundArgument>,
}

impl CustomConstruction {
    /// Argument expressions in source order, skipping folded constants.
    pub fn expressions(&self) -> Vec<&Expr> {
        let mut out = Vec::new();
        self.arguments.iter().for_each(|a| a.collect(&mut out));
        out
    }

    pub fn render(&self, catalog: &Catalog) -> String {
        let args = self
            .arguments
            .iter()
            .map(|a| a.render(catalog))
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", catalog.display(&TypeRef::Named(self.ty)), args)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Primitive(Literal),
    This,
    /// A type used as an expression, the target of static member access.
    TypeReference(TypeRef),
    FieldReference {
        target: Box<Expr>,
        name: SmolStr,
    },
    PropertyReference {
        target: Box<Expr>,
        name: SmolStr,
    },
    MethodInvoke {
        target: Box<Expr>,
        method: SmolStr,
        args: Vec<Expr>,
    },
    ObjectCreate {
        ty: TypeRef,
        args: Vec<Expr>,
    },
    ArrayCreate {
        element: TypeRef,
        size: Option<Box<Expr>>,
        initializers: Vec<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Cast {
        ty: TypeRef,
        expr: Box<Expr>,
    },
    ArrayIndexer {
        target: Box<Expr>,
        indices: Vec<Expr>,
    },
    Indexer {
        target: Box<Expr>,
        indices: Vec<Expr>,
    },
    /// An `out`/`ref`/`in` call argument.
    Direction {
        direction: ParamDirection,
        expr: Box<Expr>,
    },
    /// A custom expression type constructed in place.
    Custom(CustomConstruction),
}

impl Expr {
    pub fn new(id: NodeId, kind: ExprKind) -> Self {
        Self { id, kind }
    }

    pub fn literal(&self) -> Option<&Literal> {
        match &self.kind {
            ExprKind::Primitive(lit) => Some(lit),
            _ => None,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Primitive(_) | ExprKind::This | ExprKind::TypeReference(_) => Vec::new(),
            ExprKind::FieldReference { target, .. }
            | ExprKind::PropertyReference { target, .. } => vec![target.as_ref()],
            ExprKind::MethodInvoke { target, args, .. } => {
                std::iter::once(&**target).chain(args.iter()).collect()
            }
            ExprKind::ObjectCreate { args, .. } => args.iter().collect(),
            ExprKind::ArrayCreate {
                size, initializers, ..
            } => size.iter().map(|s| &**s).chain(initializers.iter()).collect(),
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Cast { expr, .. } | ExprKind::Direction { expr, .. } => vec![expr.as_ref()],
            ExprKind::ArrayIndexer { target, indices } | ExprKind::Indexer { target, indices } => {
                std::iter::once(&**target).chain(indices.iter()).collect()
            }
            ExprKind::Custom(custom) => custom.expressions(),
        }
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&Expr)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Structural equality that ignores node ids.
    pub fn same_shape(&self, other: &Expr) -> bool {
        use ExprKind::*;
        let kinds_match = match (&self.kind, &other.kind) {
            (Primitive(a), Primitive(b)) => a == b,
            (This, This) => true,
            (TypeReference(a), TypeReference(b)) => a == b,
            (FieldReference { name: a, .. }, FieldReference { name: b, .. })
            | (PropertyReference { name: a, .. }, PropertyReference { name: b, .. })
            | (MethodInvoke { method: a, .. }, MethodInvoke { method: b, .. }) => a == b,
            (ObjectCreate { ty: a, .. }, ObjectCreate { ty: b, .. })
            | (Cast { ty: a, .. }, Cast { ty: b, .. }) => a == b,
            (
                ArrayCreate {
                    element: a,
                    size: sa,
                    initializers: ia,
                },
                ArrayCreate {
                    element: b,
                    size: sb,
                    initializers: ib,
                },
            ) => a == b && sa.is_some() == sb.is_some() && ia.len() == ib.len(),
            (Binary { op: a, .. }, Binary { op: b, .. }) => a == b,
            (ArrayIndexer { .. }, ArrayIndexer { .. }) | (Indexer { .. }, Indexer { .. }) => true,
            (Direction { direction: a, .. }, Direction { direction: b, .. }) => a == b,
            (Custom(a), Custom(b)) => a.ty == b.ty && a.constructor == b.constructor,
            _ => false,
        };
        let (mine, theirs) = (self.children(), other.children());
        kinds_match
            && mine.len() == theirs.len()
            && mine.iter().zip(theirs.iter()).all(|(a, b)| a.same_shape(b))
    }

    /// Render as fully parenthesised rule text, mostly for tests and logs.
    pub fn render(&self, catalog: &Catalog) -> String {
        let list = |exprs: &[Expr]| {
            exprs
                .iter()
                .map(|e| e.render(catalog))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match &self.kind {
            ExprKind::Primitive(lit) => lit.to_string(),
            ExprKind::This => "this".to_string(),
            ExprKind::TypeReference(ty) => catalog.display(ty),
            ExprKind::FieldReference { target, name }
            | ExprKind::PropertyReference { target, name } => {
                format!("{}.{}", target.render(catalog), name)
            }
            ExprKind::MethodInvoke {
                target,
                method,
                args,
            } => format!("{}.{}({})", target.render(catalog), method, list(args)),
            ExprKind::ObjectCreate { ty, args } => {
                format!("new {}({})", catalog.display(ty), list(args))
            }
            ExprKind::ArrayCreate {
                element,
                size,
                initializers,
            } => {
                let size = size.as_ref().map(|s| s.render(catalog)).unwrap_or_default();
                let mut out = format!("new {}[{}]", catalog.display(element), size);
                if !initializers.is_empty() {
                    out.push_str(&format!(" {{ {} }}", list(initializers)));
                } else if size.is_empty() {
                    out.push_str(" {}");
                }
                out
            }
            ExprKind::Binary { left, op, right } => format!(
                "({} {} {})",
                left.render(catalog),
                op.symbol(),
                right.render(catalog)
            ),
            ExprKind::Cast { ty, expr } => {
                format!("(({}){})", catalog.display(ty), expr.render(catalog))
            }
            ExprKind::ArrayIndexer { target, indices } | ExprKind::Indexer { target, indices } => {
                format!("{}[{}]", target.render(catalog), list(indices))
            }
            ExprKind::Direction { direction, expr } => {
                format!("{} {}", direction.keyword(), expr.render(catalog))
            }
            ExprKind::Custom(custom) => custom.render(catalog),
        }
    }
}
