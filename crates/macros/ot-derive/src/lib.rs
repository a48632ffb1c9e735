//! Derive macros for operation shapes and the visitor protocol
//!
//! `#[derive(Shape)]` turns a shape struct into a slot table: which fields are
//! child slots, in which order they are exposed, which kinds the shape may
//! report and how its plain attributes are described.
//!
//! `#[derive(Visitor)]` turns the payload enum into the dispatch layer: the
//! side-effecting visitor trait, the argument/result folder trait, `From`
//! conversions, typed casts and the static shape table. Every trait method is
//! generated from the variant list, so adding a variant adds exactly one
//! method to each visitor and the dispatch `match` stays exhaustive.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Path, Type};

/// Field type names recognised as child slots
const SLOT_TYPES: &[&str] = &["Child", "OptionalChild", "ChildList"];

/// Derive the `Shape` implementation for an operation shape struct
///
/// # Attributes
///
/// - `#[shape(kind = Binary)]` - the single kind this shape reports
/// - `#[shape(kinds(Return, YieldReturn))]` - shape shared by several kinds;
///   the struct must carry a `kind: OperationKind` field
/// - `#[shape(order = method)]` - `fn method(&self, index: usize) -> Option<SlotView<'_>>`
///   overrides declaration order for `slot`
/// - `#[shape(validate = method)]` - `fn method(&self, header: &OperationHeader) -> Result<(), ConstructionError>`
/// - `#[slot(detached)]` on a field - slot is neither a child nor stamped
///
/// # Example
///
/// ```ignore
/// #[derive(Shape)]
/// #[shape(kind = Binary)]
/// pub struct BinaryOperation {
///     pub left_operand: Child,
///     pub right_operand: Child,
///     pub operator_kind: BinaryOperatorKind,
/// }
/// ```
#[proc_macro_derive(Shape, attributes(shape, slot))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_shape(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Derive the dispatch layer for the operation payload enum
///
/// # Attributes
///
/// - `#[visitor(node = path::Operation)]` - the node type handed to visitors
/// - `#[visitor(visitor = OperationVisitor, folder = OperationFolder)]` - names
///   of the generated traits
#[proc_macro_derive(Visitor, attributes(visitor))]
pub fn derive_visitor(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_visitor(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Parsed `#[shape(...)]` options
struct ShapeOptions {
    kinds: Vec<Ident>,
    shared: bool,
    order: Option<Ident>,
    validate: Option<Ident>,
}

/// One child-slot field
struct SlotField {
    ident: Ident,
    detached: bool,
}

fn parse_shape_options(input: &DeriveInput) -> syn::Result<ShapeOptions> {
    let mut options = ShapeOptions {
        kinds: Vec::new(),
        shared: false,
        order: None,
        validate: None,
    };

    for attr in &input.attrs {
        if !attr.path().is_ident("shape") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let kind: Ident = meta.value()?.parse()?;
                options.kinds.push(kind);
                Ok(())
            } else if meta.path.is_ident("kinds") {
                options.shared = true;
                meta.parse_nested_meta(|inner| {
                    let kind = inner
                        .path
                        .get_ident()
                        .cloned()
                        .ok_or_else(|| inner.error("expected an operation kind name"))?;
                    options.kinds.push(kind);
                    Ok(())
                })
            } else if meta.path.is_ident("order") {
                options.order = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("validate") {
                options.validate = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported shape option"))
            }
        })?;
    }

    if options.kinds.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "a shape needs #[shape(kind = ..)] or #[shape(kinds(..))]",
        ));
    }
    if !options.shared && options.kinds.len() > 1 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "use #[shape(kinds(..))] for shapes shared by several kinds",
        ));
    }
    Ok(options)
}

fn is_slot_type(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path
        .path
        .segments
        .last()
        .is_some_and(|segment| SLOT_TYPES.iter().any(|name| segment.ident == name))
}

fn is_detached(field: &syn::Field) -> syn::Result<bool> {
    let mut detached = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("slot") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("detached") {
                detached = true;
                Ok(())
            } else {
                Err(meta.error("unsupported slot option"))
            }
        })?;
    }
    Ok(detached)
}

fn expand_shape(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.to_string();
    let options = parse_shape_options(input)?;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "Shape can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(input, "Shape needs named fields"));
    };

    let mut slots = Vec::new();
    let mut attributes = Vec::new();
    let mut has_kind_field = false;

    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        if is_slot_type(&field.ty) {
            slots.push(SlotField {
                detached: is_detached(field)?,
                ident,
            });
        } else if ident == "kind" {
            has_kind_field = true;
        } else {
            attributes.push(ident);
        }
    }

    if options.shared && !has_kind_field {
        return Err(syn::Error::new_spanned(
            name,
            "shapes shared by several kinds need a `kind: OperationKind` field",
        ));
    }

    let kinds = &options.kinds;
    let kind_body = if options.shared {
        quote! { self.kind }
    } else {
        let kind = &kinds[0];
        quote! { crate::OperationKind::#kind }
    };

    let attached: Vec<&SlotField> = slots.iter().filter(|slot| !slot.detached).collect();
    let slot_names: Vec<String> = attached.iter().map(|slot| slot.ident.to_string()).collect();

    let slot_body = if let Some(order) = &options.order {
        quote! { self.#order(index) }
    } else if attached.is_empty() {
        quote! {
            let _ = index;
            ::core::option::Option::None
        }
    } else {
        let arms = attached.iter().enumerate().map(|(position, slot)| {
            let ident = &slot.ident;
            let label = ident.to_string();
            quote! {
                #position => ::core::option::Option::Some(
                    crate::slot::SlotView::new(#label, self.#ident.as_slice()),
                ),
            }
        });
        quote! {
            match index {
                #(#arms)*
                _ => ::core::option::Option::None,
            }
        }
    };

    let install_calls = slots.iter().map(|slot| {
        let ident = &slot.ident;
        let linkage = if slot.detached {
            quote! { crate::slot::Linkage::Detached }
        } else {
            quote! { crate::slot::Linkage::Attached }
        };
        quote! { visit(&self.#ident, #linkage); }
    });
    let install_body = if slots.is_empty() {
        quote! { let _ = visit; }
    } else {
        quote! { #(#install_calls)* }
    };

    let membership_check = if options.shared {
        quote! {
            if !<Self as crate::shape::Shape>::KINDS.contains(&self.kind) {
                return ::core::result::Result::Err(crate::ConstructionError::KindMismatch {
                    shape: #name_str,
                    kind: self.kind,
                });
            }
        }
    } else {
        quote! {}
    };
    let validate_tail = if let Some(validate) = &options.validate {
        quote! { self.#validate(header) }
    } else {
        quote! {
            let _ = header;
            ::core::result::Result::Ok(())
        }
    };

    let describe_calls = attributes.iter().map(|ident| {
        let label = ident.to_string();
        quote! { visit(#label, &self.#ident); }
    });
    let describe_body = if attributes.is_empty() {
        quote! { let _ = visit; }
    } else {
        quote! { #(#describe_calls)* }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics crate::shape::Shape for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;
            const KINDS: &'static [crate::OperationKind] = &[#(crate::OperationKind::#kinds),*];
            const SLOT_NAMES: &'static [&'static str] = &[#(#slot_names),*];

            fn kind(&self) -> crate::OperationKind {
                #kind_body
            }

            fn slot(&self, index: usize) -> ::core::option::Option<crate::slot::SlotView<'_>> {
                #slot_body
            }

            fn for_each_slot(
                &self,
                visit: &mut dyn FnMut(&dyn crate::slot::InstallSlot, crate::slot::Linkage),
            ) {
                #install_body
            }

            fn validate(
                &self,
                header: &crate::OperationHeader,
            ) -> ::core::result::Result<(), crate::ConstructionError> {
                #membership_check
                #validate_tail
            }

            fn describe(&self, visit: &mut dyn FnMut(&'static str, &dyn ::core::fmt::Debug)) {
                #describe_body
            }
        }
    })
}

/// Parsed `#[visitor(...)]` options
struct VisitorOptions {
    node: Path,
    visitor: Ident,
    folder: Ident,
}

fn parse_visitor_options(input: &DeriveInput) -> syn::Result<VisitorOptions> {
    let mut node: Option<Path> = None;
    let mut visitor = format_ident!("{}Visitor", input.ident);
    let mut folder = format_ident!("{}Folder", input.ident);

    for attr in &input.attrs {
        if !attr.path().is_ident("visitor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("node") {
                node = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("visitor") {
                visitor = meta.value()?.parse()?;
                Ok(())
            } else if meta.path.is_ident("folder") {
                folder = meta.value()?.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported visitor option"))
            }
        })?;
    }

    let node = node.ok_or_else(|| {
        syn::Error::new_spanned(&input.ident, "missing #[visitor(node = ..)]")
    })?;
    Ok(VisitorOptions { node, visitor, folder })
}

fn expand_visitor(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;
    let options = parse_visitor_options(input)?;
    let node = &options.node;
    let visitor_name = &options.visitor;
    let folder_name = &options.folder;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "Visitor can only be derived for enums"));
    };

    let mut variants = Vec::new();
    let mut shapes = Vec::new();
    for variant in &data.variants {
        let Fields::Unnamed(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "each variant must wrap exactly one shape",
            ));
        };
        if fields.unnamed.len() != 1 {
            return Err(syn::Error::new_spanned(
                variant,
                "each variant must wrap exactly one shape",
            ));
        }
        variants.push(variant.ident.clone());
        shapes.push(fields.unnamed[0].ty.clone());
    }

    let methods: Vec<Ident> = variants
        .iter()
        .map(|variant| format_ident!("visit_{}", to_snake_case(&variant.to_string())))
        .collect();
    let method_names: Vec<LitStr> = methods
        .iter()
        .map(|method| LitStr::new(&method.to_string(), method.span()))
        .collect();
    let visit_docs: Vec<String> = shapes
        .iter()
        .map(|shape| format!("Visits a [`{}`] node", quote!(#shape)))
        .collect();

    let visitor_methods = methods.iter().zip(&shapes).zip(&visit_docs).map(|((method, shape), doc)| {
        quote! {
            #[doc = #doc]
            fn #method(&mut self, operation: &#node, shape: &#shape) {
                let _ = shape;
                self.default_visit(operation);
            }
        }
    });

    let folder_methods = methods.iter().zip(&shapes).zip(&visit_docs).map(|((method, shape), doc)| {
        quote! {
            #[doc = #doc]
            fn #method(&mut self, operation: &#node, shape: &#shape, argument: A) -> Self::Output {
                let _ = shape;
                self.default_visit(operation, argument)
            }
        }
    });

    let from_impls = variants.iter().zip(&shapes).map(|(variant, shape)| {
        quote! {
            impl ::core::convert::From<#shape> for #enum_name {
                fn from(shape: #shape) -> Self {
                    Self::#variant(shape)
                }
            }

            impl crate::shape::ShapeCast for #shape {
                fn cast(payload: &#enum_name) -> ::core::option::Option<&Self> {
                    match payload {
                        #enum_name::#variant(shape) => ::core::option::Option::Some(shape),
                        _ => ::core::option::Option::None,
                    }
                }
            }
        }
    });

    let descriptors = shapes.iter().zip(&method_names).map(|(shape, method)| {
        quote! {
            crate::shape::ShapeDescriptor {
                name: <#shape as crate::shape::Shape>::NAME,
                kinds: <#shape as crate::shape::Shape>::KINDS,
                slot_names: <#shape as crate::shape::Shape>::SLOT_NAMES,
                visit_method: #method,
            }
        }
    });

    Ok(quote! {
        /// Side-effecting visitor: one method per shape
        ///
        /// Every method falls back to [`Self::default_visit`]; overriding a
        /// method is how a consumer handles one kind of node.
        pub trait #visitor_name {
            #(#visitor_methods)*

            /// Fallback for every shape the visitor does not handle itself
            fn default_visit(&mut self, operation: &#node);
        }

        /// Argument/result visitor: one method per shape
        ///
        /// Used for folds and transforms where each node produces a value.
        pub trait #folder_name<A> {
            /// Value produced for each visited node
            type Output;

            #(#folder_methods)*

            /// Fallback for every shape the folder does not handle itself
            fn default_visit(&mut self, operation: &#node, argument: A) -> Self::Output;
        }

        #(#from_impls)*

        impl #enum_name {
            /// Static table of every shape, in declaration order
            pub const SHAPES: &'static [crate::shape::ShapeDescriptor] = &[#(#descriptors),*];

            /// Kind reported by the wrapped shape
            #[must_use]
            pub fn kind(&self) -> crate::OperationKind {
                match self {
                    #(Self::#variants(shape) => crate::shape::Shape::kind(shape),)*
                }
            }

            /// Name of the wrapped shape
            #[must_use]
            pub fn shape_name(&self) -> &'static str {
                match self {
                    #(Self::#variants(_) => <#shapes as crate::shape::Shape>::NAME,)*
                }
            }

            /// Child slot at `index`, materializing it if it is lazy
            #[must_use]
            pub fn slot(&self, index: usize) -> ::core::option::Option<crate::slot::SlotView<'_>> {
                match self {
                    #(Self::#variants(shape) => crate::shape::Shape::slot(shape, index),)*
                }
            }

            /// Every slot field, attached or detached
            pub fn for_each_slot(
                &self,
                visit: &mut dyn FnMut(&dyn crate::slot::InstallSlot, crate::slot::Linkage),
            ) {
                match self {
                    #(Self::#variants(shape) => crate::shape::Shape::for_each_slot(shape, visit),)*
                }
            }

            /// Shape-specific construction checks
            ///
            /// # Errors
            ///
            /// Returns the first inconsistency the wrapped shape reports
            pub fn validate(
                &self,
                header: &crate::OperationHeader,
            ) -> ::core::result::Result<(), crate::ConstructionError> {
                match self {
                    #(Self::#variants(shape) => crate::shape::Shape::validate(shape, header),)*
                }
            }

            /// Plain (non-child) attributes of the wrapped shape
            pub fn describe(&self, visit: &mut dyn FnMut(&'static str, &dyn ::core::fmt::Debug)) {
                match self {
                    #(Self::#variants(shape) => crate::shape::Shape::describe(shape, visit),)*
                }
            }

            /// Routes `operation` to the visitor method of its shape
            pub fn dispatch<V: #visitor_name + ?Sized>(&self, operation: &#node, visitor: &mut V) {
                match self {
                    #(Self::#variants(shape) => visitor.#methods(operation, shape),)*
                }
            }

            /// Routes `operation` and `argument` to the folder method of its shape
            pub fn dispatch_with<A, V: #folder_name<A> + ?Sized>(
                &self,
                operation: &#node,
                visitor: &mut V,
                argument: A,
            ) -> V::Output {
                match self {
                    #(Self::#variants(shape) => visitor.#methods(operation, shape, argument),)*
                }
            }
        }
    })
}

/// Convert PascalCase to snake_case
fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            if !result.is_empty() {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
