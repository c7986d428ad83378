//! Inline style declaration (`element.style`)

/// Ordered list of inline CSS declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    props: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property. Accepts scripting names (`backgroundColor`) or CSS
    /// names (`background-color`); an empty value removes the property.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = css_property_name(name);
        if value.is_empty() {
            self.remove_property(&name);
            return;
        }

        match self.props.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.props.push((name, value.to_string())),
        }
    }

    /// Get a property value by either spelling
    pub fn get_property(&self, name: &str) -> Option<&str> {
        let name = css_property_name(name);
        self.props
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = css_property_name(name);
        let pos = self.props.iter().position(|(n, _)| *n == name)?;
        Some(self.props.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Serialized form used for the `style` attribute
    pub fn css_text(&self) -> String {
        self.props
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `backgroundColor` -> `background-color`. Custom properties and names
/// that are already hyphenated pass through.
fn css_property_name(name: &str) -> String {
    if name.starts_with("--") || !name.bytes().any(|b| b.is_ascii_uppercase()) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
