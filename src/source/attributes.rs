//! Root attribute filtering and namespace propagation

/// Attributes the engine writes itself. Compared case-insensitively.
pub const RESERVED_ATTRIBUTES: [&str; 5] = ["viewbox", "width", "height", "id", "xmlns"];

const NAMESPACE_PREFIX: &str = "xmlns:";

/// A single name/value pair, value already unescaped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether the engine controls this attribute
    pub fn is_reserved(&self) -> bool {
        let name = self.name.to_ascii_lowercase();
        RESERVED_ATTRIBUTES.contains(&name.as_str())
    }

    /// Whether this is an `xmlns:*` declaration
    pub fn is_namespace_declaration(&self) -> bool {
        self.name.starts_with(NAMESPACE_PREFIX)
    }
}

/// Ordered attribute collection with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by exact name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert unless the name is already declared. Returns whether it was inserted.
    pub fn set_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.attributes.push(Attribute::new(name, value));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Drop every attribute the engine controls, keeping the rest in order
pub fn filter_transferable(attributes: &[Attribute]) -> Vec<Attribute> {
    attributes
        .iter()
        .filter(|a| !a.is_reserved())
        .cloned()
        .collect()
}

/// Copy `xmlns:*` declarations onto `destination`, first declaration wins
pub fn propagate_namespaces(source: &[Attribute], destination: &mut AttributeSet) {
    for attribute in source.iter().filter(|a| a.is_namespace_declaration()) {
        destination.set_if_absent(&attribute.name, &attribute.value);
    }
}
