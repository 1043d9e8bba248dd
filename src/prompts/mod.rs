//! Prompt templates, compiled into the binary and resolved by name.

use crate::error::{CopilotError, CopilotResult};

/// Known template names.
pub const BUSINESS_DRIVER_EXTRACTION: &str = "business-driver-extraction";
/// Template for deriving a utility tree from approved business drivers.
pub const UTILITY_TREE_GENERATION: &str = "utility-tree-generation";
/// Template for architecture approach analysis.
pub const ARCHITECTURE_ANALYSIS: &str = "architecture-analysis";

/// Resolves prompt templates by name.
///
/// Templates are embedded at compile time, so loading never performs
/// I/O and the same name always yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptStore;

impl PromptStore {
    /// Create a prompt store.
    pub fn new() -> Self {
        Self
    }

    /// Load a template by name.
    pub fn load(&self, name: &str) -> CopilotResult<&'static str> {
        match name {
            BUSINESS_DRIVER_EXTRACTION => {
                Ok(include_str!("../../prompts/business-driver-extraction.md"))
            }
            UTILITY_TREE_GENERATION => {
                Ok(include_str!("../../prompts/utility-tree-generation.md"))
            }
            ARCHITECTURE_ANALYSIS => Ok(include_str!("../../prompts/architecture-analysis.md")),
            _ => Err(CopilotError::TemplateNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Append caller-supplied context to a template under a named
    /// heading, separated by a horizontal rule.
    pub fn assemble_with_context(&self, template: &str, heading: &str, context: &str) -> String {
        format!("{template}\n\n---\n\n## {heading}\n\n{context}")
    }
}
