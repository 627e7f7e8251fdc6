//! Accessor generation macros
//!
//! These macros eliminate repetitive match code when working with `Block`.
//! They use `paste` internally for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// Boxed variants are exposed as plain references through deref coercion.
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Block {
///     // stem -> Stem(StemBlock), table -> Table(Box<Table>)
///     impl_enum_accessors!(stem => StemBlock, table => Table);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " block"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&$ty> {
                    match self {
                        Self::[<$variant:camel>](v) => {
                            let v: &$ty = v;
                            Some(v)
                        }
                        _ => None,
                    }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut $ty> {
                    match self {
                        Self::[<$variant:camel>](v) => {
                            let v: &mut $ty = v;
                            Some(v)
                        }
                        _ => None,
                    }
                }
            )*
        }
    };
}

/// Generate a method that reads an `Option<String>` field from every
/// variant as `Option<&str>`.
///
/// # Example
/// ```ignore
/// impl_variant_field_get!(id, id, Stem, Paragraph, Image);
/// // Expands to: pub fn id(&self) -> Option<&str> { match self { ... e.id.as_deref() ... } }
/// ```
#[macro_export]
macro_rules! impl_variant_field_get {
    ($method:ident, $field:ident, $($variant:ident),* $(,)?) => {
        #[doc = concat!("Get `", stringify!($field), "` from any variant")]
        pub fn $method(&self) -> Option<&str> {
            match self {
                $(Self::$variant(e) => e.$field.as_deref(),)*
            }
        }
    };
}
