//! Child values accepted by the construction runtime

use cc_dom::NodeId;

/// One entry of an element's child list
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Rendered as a text node
    Text(String),
    /// Rendered as a text node using script number formatting
    Number(f64),
    /// `false` is skipped (conditional rendering); `true` renders as text
    Bool(bool),
    /// An already constructed node (element, text or fragment)
    Node(NodeId),
    /// Nested child list
    List(Vec<Child>),
    /// Nothing to render (`null` / `undefined`)
    Empty,
}

impl Child {
    /// Whether this child is skipped entirely when appended
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Empty | Self::Bool(false))
    }

    /// Node ID if this child is a constructed node
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// Text a scalar child coerces to. Nodes, lists and empty children
    /// have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Node(_) | Self::List(_) | Self::Empty => None,
        }
    }
}

/// Number to string the way script engines print them: `1`, `1.5`,
/// `NaN`, `Infinity`, and exponent form (`1e+21`, `1e-7`) outside
/// `1e-6 <= |n| < 1e21`
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        n.to_string()
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Child {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<()> for Child {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_conditional_child() {
        let shown = true;
        let hidden = false;
        assert_eq!(Child::from(shown.then_some("x")), Child::Text("x".into()));
        assert!(Child::from(hidden.then_some("x")).is_skipped());
        assert!(Child::from(false).is_skipped());
        assert!(!Child::from(true).is_skipped());
    }
}
