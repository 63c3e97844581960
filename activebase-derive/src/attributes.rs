//! Attribute parsing utilities

use syn::{Attribute, ExprLit, Field, Lit};

/// Relationship kinds accepted on entity fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsTo,
}

/// Read a `#[name = "value"]` string attribute
fn extract_str(attrs: &[Attribute], name: &str) -> Option<String> {
    for attr in attrs {
        if attr.path().is_ident(name) {
            if let Ok(meta) = attr.meta.require_name_value() {
                if let syn::Expr::Lit(ExprLit {
                    lit: Lit::Str(s),
                    ..
                }) = &meta.value
                {
                    return Some(s.value());
                }
            }
        }
    }
    None
}

/// Extract table name from struct attributes
pub fn extract_table_name(attrs: &[Attribute]) -> Option<String> {
    extract_str(attrs, "table_name")
}

/// Extract the declared column type override from field attributes
pub fn extract_column_type(field: &Field) -> Option<String> {
    extract_str(&field.attrs, "column_type")
}

/// Check if field has a specific attribute
pub fn has_attribute(field: &Field, attr_name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// Relationship kind declared on a field, if any
pub fn relation_kind(field: &Field) -> Option<RelationKind> {
    if has_attribute(field, "has_one") {
        Some(RelationKind::HasOne)
    } else if has_attribute(field, "has_many") {
        Some(RelationKind::HasMany)
    } else if has_attribute(field, "belongs_to") {
        Some(RelationKind::BelongsTo)
    } else {
        None
    }
}

/// Column flags parsed from a field
#[derive(Debug, Default)]
pub struct ColumnAttributes {
    pub is_primary_key: bool,
    pub is_unique: bool,
    pub is_nullable: bool,
    pub is_protected: bool,
    pub column_type: Option<String>,
}

/// Parse all column attributes from a field
pub fn parse_column_attributes(field: &Field) -> ColumnAttributes {
    ColumnAttributes {
        is_primary_key: has_attribute(field, "primary_key"),
        is_unique: has_attribute(field, "unique"),
        is_nullable: has_attribute(field, "nullable"),
        is_protected: has_attribute(field, "protected"),
        column_type: extract_column_type(field),
    }
}
