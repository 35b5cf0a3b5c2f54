//! Wire-format enums
//!
//! Every status/kind column is stored and serialized as its
//! SCREAMING_SNAKE_CASE name. Parsing ignores case and treats `-` and
//! spaces as `_`.

/// Declares a fieldless enum with `as_str`, `from_str`, `parse`, `ALL`
/// and `Display`.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $( $wire => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Like `from_str`, but an unknown value is a validation error.
            pub fn parse(s: &str) -> $crate::domain::DomainResult<Self> {
                Self::from_str(s).ok_or_else(|| {
                    $crate::domain::DomainError::Validation(format!(
                        "Invalid {}: {}",
                        $label, s
                    ))
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::DomainError;

    wire_enum! {
        enum Colour("colour") {
            DeepRed => "DEEP_RED",
            Blue => "BLUE",
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_separators() {
        assert_eq!(Colour::from_str("deep-red"), Some(Colour::DeepRed));
        assert_eq!(Colour::from_str(" Deep Red "), Some(Colour::DeepRed));
        assert_eq!(Colour::from_str("blue"), Some(Colour::Blue));
        assert_eq!(Colour::from_str("green"), None);
        assert_eq!(Colour::ALL.len(), 2);
        assert_eq!(Colour::DeepRed.to_string(), "DEEP_RED");
    }

    #[test]
    fn unknown_value_is_a_validation_error() {
        match Colour::parse("green") {
            Err(DomainError::Validation(msg)) => assert_eq!(msg, "Invalid colour: green"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
