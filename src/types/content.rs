//! Content types sent to the generation endpoints.

use serde::{Deserialize, Serialize};

/// A part of a content message: instruction text or a reference to a
/// previously uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Reference to file data held by the provider's file store.
    FileData {
        /// The file data reference.
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

impl Part {
    /// Text part constructor.
    pub fn from_text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// File reference part constructor.
    pub fn from_uri(file_uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Part::FileData {
            file_data: FileData {
                mime_type: Some(mime_type.into()),
                file_uri: file_uri.into(),
            },
        }
    }

    /// The text of this part, if it is a text part.
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::FileData { .. } => None,
        }
    }
}

/// Reference to a file in the provider's file store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// The MIME type of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// The full file URI (not the short resource name).
    pub file_uri: String,
}

/// A content message with a role and ordered parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content, in submission order.
    pub parts: Vec<Part>,
}

impl Content {
    /// A user-role content message from ordered parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::User),
            parts,
        }
    }
}

/// The role of a message author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
}
