/// String mapping for closed enums: canonical wire name first, then accepted aliases.
///
/// Also emits `ALL`, listing variants in declaration order.
#[macro_export]
macro_rules! enum_str {
    (
        impl $name:ident {
            $as_vis:vis fn as_str(&self) -> &'static str;
            $parse_vis:vis fn parse_str($raw:ident : &str) -> Option<Self>;
            variants {
                $($variant:ident => [$first:expr $(, $alias:expr)*]),+ $(,)?
            }
        }
    ) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant,)+];

            $as_vis fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $first,)+
                }
            }

            #[allow(dead_code)]
            $parse_vis fn parse_str($raw: &str) -> Option<Self> {
                match $raw {
                    $($first $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// True when `raw` is the canonical name rather than an alias.
            #[allow(dead_code)]
            $parse_vis fn is_canonical(raw: &str) -> bool {
                match raw {
                    $($first => true,)+
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
