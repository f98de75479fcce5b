//! Error classification for retry decisions and side-effect reporting.

/// Whether retrying this operation may succeed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transience {
    /// Retry will never help without changing inputs/state.
    Permanent,
    /// Retry may help (network outage, server hiccup).
    Retryable,
    /// Unknown if retry will help.
    Unknown,
}

impl Transience {
    pub fn is_retryable(self) -> bool {
        matches!(self, Transience::Retryable)
    }
}

/// What we know about side effects when an error is returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    /// Nothing was written anywhere.
    None,
    /// Something was written (locally or remotely).
    Some,
    /// A write may or may not have landed.
    Unknown,
}

crate::enum_str! {
    impl Effect {
        pub fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            None => ["none"],
            Some => ["some"],
            Unknown => ["unknown"],
        }
    }
}
