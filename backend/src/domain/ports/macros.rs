//! Macro for declaring port error enums with snake_case constructors.
//!
//! Every field of a variant becomes an `impl Into<T>` parameter, so adapters
//! can pass `&str` where the variant stores a `String`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoreError {
            Offline => "store offline",
            Rejected { table: String, row: u32 } => "{table} row {row} rejected",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::offline(), StoreError::Offline);
        assert_eq!(StoreError::offline().to_string(), "store offline");
    }

    #[test]
    fn field_constructors_convert_their_arguments() {
        let err = StoreError::rejected("recipe_steps", 3_u32);
        assert_eq!(
            err,
            StoreError::Rejected {
                table: "recipe_steps".to_owned(),
                row: 3,
            }
        );
        assert_eq!(err.to_string(), "recipe_steps row 3 rejected");
    }
}
