//! Helper macro for generating domain port error enums.

/// Define a port error enum whose variants each carry a failure message.
///
/// Generates a `thiserror` enum plus an `Into<String>` constructor per
/// variant, keeping adapter error mapping terse and uniform across ports.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($ctor:ident) => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Failure description reported by the adapter.
                    message: String,
                },
            )*
        }

        impl $name {
            $(
                #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
                pub fn $ctor(message: impl Into<String>) -> Self {
                    Self::$variant { message: message.into() }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
