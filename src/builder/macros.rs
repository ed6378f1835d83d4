//! Macros for ergonomic state and trigger declarations.

/// Declare a unit enum usable as a state or trigger.
///
/// Derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug` and serde's
/// `Serialize`/`Deserialize`, implements `Display` with the variant name,
/// and adds an `ALL` constant listing every variant in declaration order.
///
/// # Example
///
/// ```
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum Light {
///         Off,
///         On,
///     }
/// }
///
/// assert_eq!(Light::On.to_string(), "On");
/// assert_eq!(Light::ALL, &[Light::Off, Light::On]);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
