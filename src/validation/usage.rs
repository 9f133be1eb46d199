//! Write-target analysis for `update(expr)`.

use crate::ast::{Expr, ExprKind};
use crate::metadata::{Catalog, ParamDirection};

/// Paths written by `expr`: a member chain names itself, a call names the
/// paths of its `out` and `ref` arguments.
pub fn written_paths(catalog: &Catalog, expr: &Expr) -> Vec<String> {
    match &expr.kind {
        ExprKind::MethodInvoke { args, .. } => args
            .iter()
            .filter_map(|arg| match &arg.kind {
                ExprKind::Direction { direction, expr }
                    if *direction != ParamDirection::In =>
                {
                    member_path(catalog, expr)
                }
                _ => None,
            })
            .collect(),
        ExprKind::Direction { expr, .. } => written_paths(catalog, expr),
        _ => member_path(catalog, expr).into_iter().collect(),
    }
}

fn member_path(catalog: &Catalog, expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::This => Some("this".to_string()),
        ExprKind::TypeReference(ty) => Some(catalog.display(ty)),
        ExprKind::FieldReference { target, name }
        | ExprKind::PropertyReference { target, name } => {
            let mut path = member_path(catalog, target)?;
            path.push('/');
            path.push_str(name);
            Some(path)
        }
        ExprKind::ArrayIndexer { target, .. } | ExprKind::Indexer { target, .. } => {
            member_path(catalog, target)
        }
        ExprKind::Cast { expr, .. } => member_path(catalog, expr),
        _ => None,
    }
}
