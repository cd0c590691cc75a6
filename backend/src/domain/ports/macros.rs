//! Helper macro generating port error enums with snake_case constructors.

/// Declare a `thiserror` enum plus one constructor per variant.
///
/// Constructors take `impl Into<T>` for every field so callers can pass
/// `&str` where the variant stores a `String`.
macro_rules! define_port_error {
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
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Broken { message: String } => "broken: {message}",
            Clash { day: NaiveDate, attempts: u32 } => "clash on {day} after {attempts}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::broken("pool closed");
        assert_eq!(err.to_string(), "broken: pool closed");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        let err = SamplePortError::clash(day, 3_u32);
        assert_eq!(err.to_string(), "clash on 2024-01-02 after 3");
    }
}
