//! Macros for ergonomic state definitions.

/// Generate a closed state enum with its `State` and `Default` impls.
///
/// The first variant is the default, which is where machines start when
/// no initial state is configured.
///
/// # Example
///
/// ```
/// use rapport::core::State;
/// use rapport::state_enum;
///
/// state_enum! {
///     pub enum MatchState {
///         NotAvailable,
///         Preparation,
///         Running,
///         Result,
///     }
/// }
///
/// assert_eq!(MatchState::default(), MatchState::NotAvailable);
/// assert_eq!(MatchState::Running.name(), "Running");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident
            $(,
                $(#[$variant_meta:meta])*
                $variant:ident
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first,
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
