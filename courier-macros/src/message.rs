//! Message-related derives.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Ident, Type, parse_macro_input};

fn message_impl(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::courier::Message for #name #ty_generics #where_clause {}
    }
}

/// Implementation of `#[derive(Message)]`.
pub fn derive_message_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(message_impl(&input))
}

/// Implementation of `#[derive(Notification)]`.
pub fn derive_notification_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let message = message_impl(&input);

    let expanded = quote! {
        #message
        impl #impl_generics ::courier::Notification for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// Implementation of `#[derive(Request)]`.
pub fn derive_request_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match request_impl(&input, "request") {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Implementation of `#[derive(Command)]`.
pub fn derive_command_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    marked_request(&input, "command", quote! { ::courier::Command })
}

/// Implementation of `#[derive(Query)]`.
pub fn derive_query_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    marked_request(&input, "query", quote! { ::courier::Query })
}

/// `Message` and `Request` impls, reading the output from `#[<attr>(output = T)]`.
fn request_impl(input: &DeriveInput, attr: &str) -> syn::Result<TokenStream2> {
    let output = request_output(input, attr)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let message = message_impl(input);

    Ok(quote! {
        #message
        impl #impl_generics ::courier::Request for #name #ty_generics #where_clause {
            type Output = #output;
        }
    })
}

fn marked_request(input: &DeriveInput, attr: &str, marker: TokenStream2) -> TokenStream {
    let request = match request_impl(input, attr) {
        Ok(request) => request,
        Err(err) => return err.to_compile_error().into(),
    };
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #request
        impl #impl_generics #marker for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// Read `#[<name>(output = T)]`, defaulting to `()`.
fn request_output(input: &DeriveInput, name: &str) -> syn::Result<TokenStream2> {
    let mut output: Option<Type> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident(name)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("output") {
                if output.is_some() {
                    return Err(meta.error("duplicate `output`"));
                }
                output = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                let ident = meta
                    .path
                    .get_ident()
                    .map(Ident::to_string)
                    .unwrap_or_default();
                Err(meta.error(format!("unknown attribute: {}", ident)))
            }
        })?;
    }

    Ok(match output {
        Some(ty) => quote! { #ty },
        None => quote! { () },
    })
}

