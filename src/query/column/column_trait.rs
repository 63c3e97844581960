//! Column trait for type-safe filter expressions.
//!
//! Attribute handles ([`Column`](super::Column)) implement `ColumnTrait`, so a
//! handle resolved through the field introspector can be handed straight to a
//! `sea_query` statement.

use sea_query::{Expr, ExprTrait, IntoColumnRef};

/// Filter-expression helpers for column handles
///
/// # Example
///
/// ```no_run
/// use activebase::{ColumnTrait, Column};
///
/// let total = Column::new("orders", "total");
/// let filter = total.gt(100i64);
/// ```
pub trait ColumnTrait: IntoColumnRef + Sized {
    /// `column = value`
    fn eq<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        let value: sea_query::Value = value.into();
        Expr::col(self).eq(value)
    }

    /// `column != value`
    fn ne<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        let value: sea_query::Value = value.into();
        Expr::col(self).ne(value)
    }

    /// `column > value`
    fn gt<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        let value: sea_query::Value = value.into();
        Expr::col(self).gt(value)
    }

    /// `column < value`
    fn lt<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        let value: sea_query::Value = value.into();
        Expr::col(self).lt(value)
    }

    /// `column IN (values)`
    #[allow(clippy::wrong_self_convention)]
    fn is_in<T, I>(self, values: I) -> Expr
    where
        T: Into<sea_query::Value>,
        I: IntoIterator<Item = T>,
    {
        Expr::col(self).is_in(values.into_iter().map(Into::<sea_query::Value>::into))
    }

    /// `column IS NULL`
    #[allow(clippy::wrong_self_convention)]
    fn is_null(self) -> Expr {
        Expr::col(self).is_null()
    }
}
