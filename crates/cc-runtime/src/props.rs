//! Property bags and how each key is applied to a node

use std::fmt;
use std::rc::Rc;

use cc_dom::{Document, Event, Listener, Namespace};

use crate::Child;

/// SVG presentation attributes applied through the namespace-less setter
pub const SVG_PRESENTATION_ATTRS: &[&str] =
    &["stroke-width", "fill-rule", "clip-rule", "fill", "stroke", "viewBox"];

/// Value stored under a property key
#[derive(Clone)]
pub enum PropValue {
    Str(String),
    Number(f64),
    Bool(bool),
    /// Callable; registered as an event listener under `on*` keys
    Listener(Listener),
    /// Style object; each declaration is copied onto `element.style`
    Style(Vec<(String, String)>),
    /// Node-valued prop, meaningful to components (e.g. a rich description)
    Child(Child),
}

impl PropValue {
    /// String form used when the value lands in a plain attribute.
    /// Listeners and node children have none.
    fn attribute_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Number(n) => Some(crate::child::format_number(*n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Child(child) => child.to_text(),
            Self::Listener(_) | Self::Style(_) => None,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Listener(_) => f.write_str("Listener(..)"),
            Self::Style(decls) => f.debug_tuple("Style").field(decls).finish(),
            Self::Child(c) => f.debug_tuple("Child").field(c).finish(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Child> for PropValue {
    fn from(c: Child) -> Self {
        Self::Child(c)
    }
}

impl From<Listener> for PropValue {
    fn from(l: Listener) -> Self {
        Self::Listener(l)
    }
}

/// How a single property is applied, resolved once per key
#[derive(Debug, PartialEq)]
pub enum PropKind<'a> {
    /// `className` -> `class` attribute
    ClassName(&'a str),
    /// `onClick` -> listener for `click`
    EventListener(String),
    /// `style` object -> live style declarations
    StyleObject(&'a [(String, String)]),
    /// SVG presentation attribute, set namespace-less
    PresentationAttribute(String),
    /// Anything else; `None` when the value has no string form
    Attribute(Option<String>),
}

impl<'a> PropKind<'a> {
    /// Classify a key/value pair for an element in namespace `ns`
    pub fn classify(key: &str, value: &'a PropValue, ns: Namespace) -> Self {
        match (key, value) {
            ("className", PropValue::Str(class)) => Self::ClassName(class),
            (_, PropValue::Listener(_)) if key.len() > 2 && key.starts_with("on") => {
                Self::EventListener(key[2..].to_lowercase())
            }
            ("style", PropValue::Style(decls)) => Self::StyleObject(decls),
            _ if ns == Namespace::Svg && SVG_PRESENTATION_ATTRS.contains(&key) => {
                Self::PresentationAttribute(value.attribute_text().unwrap_or_default())
            }
            _ => Self::Attribute(value.attribute_text()),
        }
    }
}

/// Property bag: unique keys plus the `children` slot components receive
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: Vec<(String, PropValue)>,
    /// Set by the runtime when a component is called with children
    pub children: Option<Vec<Child>>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::insert`]
    pub fn with(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an event handler under an `on*` key
    pub fn on(self, key: &str, handler: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.with(key, PropValue::Listener(Rc::new(handler)))
    }

    /// Add a style object
    pub fn style(self, decls: &[(&str, &str)]) -> Self {
        let decls = decls
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.with("style", PropValue::Style(decls))
    }

    /// Set a key, replacing any previous value
    pub fn insert(&mut self, key: &str, value: impl Into<PropValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String value of a key, if it holds one
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value of a key, if it holds one
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Listener stored under a key
    pub fn get_listener(&self, key: &str) -> Option<&Listener> {
        match self.get(key)? {
            PropValue::Listener(l) => Some(l),
            _ => None,
        }
    }

    /// Take the children slot, leaving it unset
    pub fn take_children(&mut self) -> Vec<Child> {
        self.children.take().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
