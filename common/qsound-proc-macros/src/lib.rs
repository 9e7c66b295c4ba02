//! Derive macros for config enums and for state that is left out of save states

mod encode;
mod enums;

use proc_macro::TokenStream;

/// Implement `Display` and a `to_str()` method that return the variant name.
///
/// Only fieldless enums are supported.
#[proc_macro_derive(EnumDisplay)]
pub fn enum_display(input: TokenStream) -> TokenStream {
    enums::enum_display(input)
}

/// Implement `FromStr`, matching variant names case-insensitively.
///
/// Only fieldless enums are supported.
#[proc_macro_derive(EnumFromStr)]
pub fn enum_from_str(input: TokenStream) -> TokenStream {
    enums::enum_from_str(input)
}

/// Add an `ALL` constant holding every variant in declaration order.
#[proc_macro_derive(EnumAll)]
pub fn enum_all(input: TokenStream) -> TokenStream {
    enums::enum_all(input)
}

/// Implement `clap::ValueEnum` using `ALL` and `to_str()`, so command-line values are spelled the
/// same way as `Display` output. Requires `EnumAll` and `EnumDisplay`.
#[proc_macro_derive(CustomValueEnum)]
pub fn custom_value_enum(input: TokenStream) -> TokenStream {
    enums::custom_value_enum(input)
}

/// Implement `bincode::Encode` by writing nothing.
#[proc_macro_derive(FakeEncode)]
pub fn fake_encode(input: TokenStream) -> TokenStream {
    encode::fake_encode(input)
}

/// Implement `bincode::Decode` and `bincode::BorrowDecode` by reading nothing and returning
/// `Self::default()`.
#[proc_macro_derive(FakeDecode)]
pub fn fake_decode(input: TokenStream) -> TokenStream {
    encode::fake_decode(input)
}
