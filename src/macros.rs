#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a closed set of named operations.
///
/// Each variant lists its canonical descriptor name followed by any accepted
/// aliases. Name lookup is ASCII case-insensitive and ignores surrounding
/// whitespace.
///
/// ```ignore
/// operations! {
///     pub enum Operation {
///         Upper => "uppercase" | "upper",
///     }
/// }
/// ```
macro_rules! operations {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $canonical:literal $(| $alias:literal)*
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $name {
            /// Every operation, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

            /// Canonical descriptor name.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $canonical ),*
                }
            }

            /// Resolve a descriptor name (canonical or alias).
            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.trim();
                $(
                    if name.eq_ignore_ascii_case($canonical) $(|| name.eq_ignore_ascii_case($alias))* {
                        return Some($name::$variant);
                    }
                )*
                None
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
