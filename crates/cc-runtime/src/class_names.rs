//! Class-list composer
//!
//! Joins conditional class tokens into a single `class` string:
//!
//! ```
//! use cc_runtime::cn;
//!
//! let open = false;
//! let class = cn!("cb-control", open.then_some("is-open"), [("ring-2", true), ("hidden", open)]);
//! assert_eq!(class, "cb-control ring-2");
//! ```

/// One argument to [`class_names`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassToken {
    /// A class (or several, space separated) included as-is
    Name(String),
    /// Classes keyed by whether they are enabled
    Conditional(Vec<(String, bool)>),
    /// Contributes nothing
    Skip,
}

impl From<&str> for ClassToken {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Skip
        } else {
            Self::Name(s.to_string())
        }
    }
}

impl From<String> for ClassToken {
    fn from(s: String) -> Self {
        if s.is_empty() { Self::Skip } else { Self::Name(s) }
    }
}

impl<T: Into<ClassToken>> From<Option<T>> for ClassToken {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Skip, Into::into)
    }
}

impl<const N: usize> From<[(&str, bool); N]> for ClassToken {
    fn from(pairs: [(&str, bool); N]) -> Self {
        Self::Conditional(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

impl From<&[(&str, bool)]> for ClassToken {
    fn from(pairs: &[(&str, bool)]) -> Self {
        Self::Conditional(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

/// Join tokens with single spaces, dropping skipped tokens and disabled
/// conditional classes
pub fn class_names<I>(tokens: I) -> String
where
    I: IntoIterator,
    I::Item: Into<ClassToken>,
{
    let mut parts: Vec<String> = Vec::new();
    for token in tokens {
        match token.into() {
            ClassToken::Name(name) => parts.push(name),
            ClassToken::Conditional(pairs) => {
                parts.extend(pairs.into_iter().filter(|(_, on)| *on).map(|(k, _)| k));
            }
            ClassToken::Skip => {}
        }
    }
    parts.join(" ")
}

/// Variadic form of [`class_names`]
#[macro_export]
macro_rules! cn {
    ($($token:expr),* $(,)?) => {
        $crate::class_names(::std::vec::Vec::<$crate::ClassToken>::from([$($crate::ClassToken::from($token)),*]))
    };
}
