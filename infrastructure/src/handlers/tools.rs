//! Data-source descriptions attached to a prompted handler

use crate::config::FileToolConfig;

/// A named data source a handler's model can rely on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl From<&FileToolConfig> for ToolDescriptor {
    fn from(config: &FileToolConfig) -> Self {
        Self::new(config.name.trim(), config.description.trim())
    }
}

/// Ordered set of tools, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool; a later registration with the same name replaces the earlier one.
    pub fn register(mut self, tool: ToolDescriptor) -> Self {
        if tool.name.is_empty() {
            return self;
        }
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// `(name, description)` pairs in registration order, as the prompt template expects.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|t| (t.name.clone(), t.description.clone()))
            .collect()
    }
}

impl<'a> FromIterator<&'a FileToolConfig> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = &'a FileToolConfig>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |registry, tool| registry.register(tool.into()))
    }
}
