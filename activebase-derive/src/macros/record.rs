//! Record derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, Ident, LitStr};

use crate::attributes::{self, RelationKind};
use crate::utils;

/// Derive macro for `Record` - generates the entity field registry and lifecycle
///
/// This macro generates:
/// - A `static` `EntityDescriptor` (columns, constraints, relationships)
/// - `Record` implementation (name-based `get`/`set`, `related`, identity, status)
/// - `Entity` implementation (introspection and lifecycle operations)
/// - One `Column` handle constant per column (`Order::TOTAL`)
///
/// The struct must have named fields including `id: Option<i64>` and
/// `active: Status`.
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct ColumnField<'a> {
    ident: &'a Ident,
    name: String,
    definition: TokenStream2,
}

struct RelationField<'a> {
    ident: &'a Ident,
    name: String,
    kind: RelationKind,
    target: String,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Record can only be derived for structs with named fields",
            ));
        }
    };

    let table_name = attributes::extract_table_name(&input.attrs)
        .unwrap_or_else(|| utils::snake_case(&struct_name.to_string()));

    let mut columns = Vec::new();
    let mut relations = Vec::new();
    let mut has_id = false;
    let mut has_active = false;

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = ident.unraw().to_string();

        if attributes::has_attribute(field, "skip") {
            continue;
        }

        if let Some(kind) = attributes::relation_kind(field) {
            relations.push(RelationField {
                ident,
                name,
                kind,
                target: utils::related_type_name(&field.ty),
            });
            continue;
        }

        let attrs = attributes::parse_column_attributes(field);
        match name.as_str() {
            "id" => {
                if !utils::is_option_i64(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "the `id` field of a Record must be `Option<i64>`",
                    ));
                }
                has_id = true;
            }
            "active" => has_active = true,
            _ if attrs.is_primary_key => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[primary_key] is only allowed on the `id` field",
                ));
            }
            _ => {}
        }

        let column_type = attrs
            .column_type
            .unwrap_or_else(|| utils::type_string(&field.ty));
        let is_primary_key = name == "id";
        let is_nullable = is_primary_key || attrs.is_nullable || utils::is_option(&field.ty);

        let mut definition = quote! {
            ::activebase::ColumnDefinition::new(#name, #column_type)
        };
        if is_primary_key {
            definition = quote!(#definition.primary_key());
        }
        if is_nullable {
            definition = quote!(#definition.nullable());
        }
        if attrs.is_unique {
            definition = quote!(#definition.unique());
        }
        if attrs.is_protected {
            definition = quote!(#definition.protected());
        }

        columns.push(ColumnField {
            ident,
            name,
            definition,
        });
    }

    if !has_id {
        return Err(syn::Error::new(
            struct_name.span(),
            "Record requires an `id: Option<i64>` field",
        ));
    }
    if !has_active {
        return Err(syn::Error::new(
            struct_name.span(),
            "Record requires an `active: Status` field",
        ));
    }

    let type_name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let column_count = columns.len();
    let column_defs = columns.iter().map(|c| &c.definition);

    let relation_count = relations.len();
    let relation_defs = relations.iter().map(|r| {
        let name = &r.name;
        let target = &r.target;
        let kind = match r.kind {
            RelationKind::HasOne => quote!(::activebase::RelationType::HasOne),
            RelationKind::HasMany => quote!(::activebase::RelationType::HasMany),
            RelationKind::BelongsTo => quote!(::activebase::RelationType::BelongsTo),
        };
        quote! {
            ::activebase::RelationDef::new(#name, #kind, #target)
        }
    });

    let column_consts = columns.iter().map(|c| {
        let const_name = Ident::new(&utils::screaming_case(&c.name), c.ident.span());
        let name = &c.name;
        let doc = LitStr::new(&format!("Handle of the `{}` column", name), c.ident.span());
        quote! {
            #[doc = #doc]
            pub const #const_name: ::activebase::Column = ::activebase::Column::new(#table_name, #name);
        }
    });

    let getters = columns.iter().map(|c| {
        let ident = c.ident;
        let name = &c.name;
        quote! {
            #name => ::core::option::Option::Some(::activebase::value::ValueType::into_value(
                ::core::clone::Clone::clone(&self.#ident),
            )),
        }
    });

    let setters = columns.iter().map(|c| {
        let ident = c.ident;
        let name = &c.name;
        quote! {
            #name => {
                self.#ident = ::activebase::value::convert(field, value)?;
                ::core::result::Result::Ok(true)
            }
        }
    });

    let related_arms = relations.iter().map(|r| {
        let ident = r.ident;
        let name = &r.name;
        quote! {
            #name => ::activebase::relation::IntoRelated::related(&self.#ident, name),
        }
    });

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#column_consts)*
        }

        impl #impl_generics ::activebase::Entity for #struct_name #ty_generics #where_clause {
            fn entity_descriptor() -> &'static ::activebase::EntityDescriptor {
                static COLUMNS: [::activebase::ColumnDefinition; #column_count] = [#(#column_defs),*];
                static RELATIONS: [::activebase::RelationDef; #relation_count] = [#(#relation_defs),*];
                static DESCRIPTOR: ::activebase::EntityDescriptor =
                    ::activebase::EntityDescriptor::new(#type_name, #table_name, &COLUMNS, &RELATIONS);
                &DESCRIPTOR
            }
        }

        impl #impl_generics ::activebase::Record for #struct_name #ty_generics #where_clause {
            fn descriptor(&self) -> &'static ::activebase::EntityDescriptor {
                <Self as ::activebase::Entity>::entity_descriptor()
            }

            fn get(&self, field: &str) -> ::core::option::Option<::activebase::Value> {
                match field {
                    #(#getters)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set(
                &mut self,
                field: &str,
                value: ::activebase::Value,
            ) -> ::core::result::Result<bool, ::activebase::RecordError> {
                match field {
                    #(#setters)*
                    _ => ::core::result::Result::Ok(false),
                }
            }

            fn related(
                &self,
                name: &str,
            ) -> ::core::result::Result<::activebase::Related<'_>, ::activebase::relation::RelationError> {
                match name {
                    #(#related_arms)*
                    _ => ::core::result::Result::Err(
                        ::activebase::relation::RelationError::Unknown(name.to_string()),
                    ),
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn id(&self) -> ::core::option::Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: ::core::option::Option<i64>) {
                self.id = id;
            }

            fn status(&self) -> ::activebase::Status {
                self.active
            }

            fn set_status(&mut self, status: ::activebase::Status) {
                self.active = status;
            }
        }
    })
}
