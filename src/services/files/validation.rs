//! Upload validation. Every file in a request is checked before any
//! network call is made, so a single bad file fails the whole batch
//! without touching the provider.

use crate::config::GeminiConfig;
use crate::error::{CopilotResult, InvalidArgumentError};
use crate::services::files::RawUpload;

/// Magic prefix of a PDF document.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Whether the content looks like a PDF document.
pub fn is_pdf(content: &[u8]) -> bool {
    content.starts_with(PDF_MAGIC)
}

/// Validate the number of files in one upload request.
pub fn validate_upload_count(count: usize, config: &GeminiConfig) -> CopilotResult<()> {
    if count == 0 {
        return Err(InvalidArgumentError::NoFilesProvided.into());
    }
    if count > config.max_files_per_request {
        return Err(InvalidArgumentError::TooManyFiles {
            count,
            max: config.max_files_per_request,
        }
        .into());
    }
    Ok(())
}

/// Validate one caller-supplied upload: non-empty, within the size
/// ceiling, declared as PDF, and carrying PDF content.
pub fn validate_raw_upload(upload: &RawUpload, config: &GeminiConfig) -> CopilotResult<()> {
    if upload.content.is_empty() {
        return Err(InvalidArgumentError::EmptyFile {
            name: upload.file_name.clone(),
        }
        .into());
    }

    let size = upload.content.len() as u64;
    if size > config.max_file_size {
        return Err(InvalidArgumentError::FileTooLarge {
            name: upload.file_name.clone(),
            size_bytes: size,
            max_bytes: config.max_file_size,
        }
        .into());
    }

    if upload.mime_type != mime::APPLICATION_PDF.to_string() {
        return Err(InvalidArgumentError::UnsupportedMediaType {
            name: upload.file_name.clone(),
            detected: upload.mime_type.clone(),
        }
        .into());
    }

    if !is_pdf(&upload.content) {
        return Err(InvalidArgumentError::UnsupportedMediaType {
            name: upload.file_name.clone(),
            detected: "unrecognized content".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CopilotError;
    use crate::fixtures;
    use secrecy::SecretString;

    fn config() -> GeminiConfig {
        GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap()
    }

    fn pdf_upload(name: &str) -> RawUpload {
        RawUpload {
            file_name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            content: fixtures::pdf_bytes(),
        }
    }

    #[test]
    fn test_pdf_sniffing() {
        assert!(is_pdf(b"%PDF-1.4 rest"));
        assert!(!is_pdf(b"PK\x03\x04zip"));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn test_count_bounds() {
        let config = config();
        assert!(validate_upload_count(1, &config).is_ok());
        assert!(validate_upload_count(5, &config).is_ok());
        assert!(matches!(
            validate_upload_count(0, &config),
            Err(CopilotError::InvalidArgument(
                InvalidArgumentError::NoFilesProvided
            ))
        ));
        assert!(matches!(
            validate_upload_count(6, &config),
            Err(CopilotError::InvalidArgument(
                InvalidArgumentError::TooManyFiles { count: 6, max: 5 }
            ))
        ));
    }

    #[test]
    fn test_valid_pdf_passes() {
        assert!(validate_raw_upload(&pdf_upload("doc.pdf"), &config()).is_ok());
    }

    #[test]
    fn test_empty_file_names_the_file() {
        let mut upload = pdf_upload("empty.pdf");
        upload.content.clear();
        let err = validate_raw_upload(&upload, &config()).unwrap_err();
        assert!(err.to_string().contains("empty.pdf"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_oversize_file_is_rejected() {
        let mut upload = pdf_upload("big.pdf");
        upload.content = vec![0u8; 16];
        upload.content[..5].copy_from_slice(b"%PDF-");
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("k".into()))
            .max_file_size(8)
            .build()
            .unwrap();
        assert!(matches!(
            validate_raw_upload(&upload, &config),
            Err(CopilotError::InvalidArgument(
                InvalidArgumentError::FileTooLarge { .. }
            ))
        ));
    }

    #[test]
    fn test_non_pdf_mime_is_rejected() {
        let mut upload = pdf_upload("doc.docx");
        upload.mime_type = "application/msword".to_string();
        assert!(matches!(
            validate_raw_upload(&upload, &config()),
            Err(CopilotError::InvalidArgument(
                InvalidArgumentError::UnsupportedMediaType { .. }
            ))
        ));
    }

    #[test]
    fn test_non_pdf_content_is_rejected() {
        let mut upload = pdf_upload("fake.pdf");
        upload.content = b"<html>not a pdf</html>".to_vec();
        assert!(matches!(
            validate_raw_upload(&upload, &config()),
            Err(CopilotError::InvalidArgument(
                InvalidArgumentError::UnsupportedMediaType { .. }
            ))
        ));
    }
}
