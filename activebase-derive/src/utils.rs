//! Utility functions for code generation

use syn::{GenericArgument, PathArguments, Type};

/// Convert string to snake_case
pub fn snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Convert a snake_case field name to the SCREAMING_CASE of its column constant
pub fn screaming_case(s: &str) -> String {
    s.to_uppercase()
}

/// Last path segment of a type, e.g. `Option` for `std::option::Option<T>`
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

/// First generic type argument of a type path, e.g. `T` for `Vec<T>`
fn first_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

/// Whether the type is `Option<..>`
pub fn is_option(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == "Option")
}

/// Whether the type is exactly `Option<i64>`
pub fn is_option_i64(ty: &Type) -> bool {
    last_segment(ty)
        .filter(|segment| segment.ident == "Option")
        .and_then(first_type_argument)
        .and_then(last_segment)
        .is_some_and(|inner| inner.ident == "i64")
}

/// Name of the entity behind a relationship field: the `T` of `Option<T>`,
/// `Box<T>` or `Vec<T>`, or the type itself
pub fn related_type_name(ty: &Type) -> String {
    let Some(segment) = last_segment(ty) else {
        return type_string(ty);
    };
    let wrapped = ["Option", "Box", "Vec"].iter().any(|w| segment.ident == w);
    match first_type_argument(segment) {
        Some(inner) if wrapped => related_type_name(inner),
        _ => segment.ident.to_string(),
    }
}

/// Compact source form of a type, e.g. `Option<NaiveDate>`
pub fn type_string(ty: &Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}
