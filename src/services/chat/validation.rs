//! Generation input validation.

use super::GenerationInput;
use crate::error::{CopilotResult, InvalidArgumentError};

/// Validate a generation input before any network call.
///
/// An input must carry instruction text or at least one file
/// reference, and every file reference must have a non-blank URI.
pub fn validate_generation_input(input: &GenerationInput) -> CopilotResult<()> {
    if input.prompt.trim().is_empty() && input.files.is_empty() {
        return Err(InvalidArgumentError::EmptyGenerationRequest.into());
    }

    for file in &input.files {
        if file.uri.trim().is_empty() {
            return Err(InvalidArgumentError::BlankFileUri.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CopilotError;
    use crate::types::UploadedFileRef;

    #[test]
    fn test_text_only_input_is_valid() {
        assert!(validate_generation_input(&GenerationInput::text_only("analyze")).is_ok());
    }

    #[test]
    fn test_files_without_prompt_are_valid() {
        let input = GenerationInput::with_files(
            "  ",
            vec![UploadedFileRef::from_uri("https://example.com/files/a")],
        );
        assert!(validate_generation_input(&input).is_ok());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let err = validate_generation_input(&GenerationInput::text_only("  \n")).unwrap_err();
        assert!(matches!(
            err,
            CopilotError::InvalidArgument(InvalidArgumentError::EmptyGenerationRequest)
        ));
    }

    #[test]
    fn test_blank_file_uri_is_rejected() {
        let mut file = UploadedFileRef::from_uri("https://example.com/files/a");
        file.uri = "   ".to_string();
        let input = GenerationInput::with_files("analyze", vec![file]);
        assert!(matches!(
            validate_generation_input(&input).unwrap_err(),
            CopilotError::InvalidArgument(InvalidArgumentError::BlankFileUri)
        ));
    }
}
