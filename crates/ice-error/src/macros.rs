/// Declare an error code enum and implement [`ErrorCodeType`] for it.
///
/// Every variant needs an explicit discriminant, and the zero variant (if
/// any) is the success value. The type's canonical name, and so its
/// [`ErrorType`], is `module_path!()::Name`.
///
/// ```
/// ice_error::error_code_type! {
///     /// Errors of the storage layer.
///     pub enum StorageErrc: u16 {
///         Success = 0,
///         Corrupted = 1,
///         Full = 2,
///     }
/// }
///
/// use ice_error::{Error, ErrorCodeType};
/// let e = Error::from(StorageErrc::Full);
/// assert_eq!(e.code(), 2);
/// assert_eq!(e.error_type(), StorageErrc::TYPE);
/// ```
///
/// [`ErrorCodeType`]: crate::ErrorCodeType
/// [`ErrorType`]: crate::ErrorType
#[macro_export]
macro_rules! error_code_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $crate::ErrorCodeType for $name {
            type Repr = $repr;

            const NAME: &'static str = concat!(module_path!(), "::", stringify!($name));

            #[inline]
            fn into_repr(self) -> $repr {
                self as $repr
            }

            #[inline]
            fn from_repr(repr: $repr) -> ::core::option::Option<Self> {
                $(
                    if repr == $name::$variant as $repr {
                        return ::core::option::Option::Some($name::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }
    };
}
