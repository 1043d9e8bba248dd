//! Endpoint path builders for the provider API.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Path for the synchronous generateContent endpoint.
pub fn generate_content(model: &str) -> String {
    format!("{MODELS}/{model}:generateContent")
}

/// Path for the streamGenerateContent endpoint.
pub fn stream_generate_content(model: &str) -> String {
    format!("{MODELS}/{model}:streamGenerateContent")
}

/// Full URL for the file upload endpoint.
///
/// Uploads go through the `/upload` prefix rather than the versioned API
/// root, so this builds a complete URL instead of a path.
pub fn upload_files(base_url: &str, api_version: &str) -> String {
    format!(
        "{}/upload/{}/files",
        base_url.trim_end_matches('/'),
        api_version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_content_path() {
        assert_eq!(
            generate_content("gemini-2.5-flash"),
            "/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_stream_generate_content_path() {
        assert_eq!(
            stream_generate_content("gemini-2.5-flash"),
            "/models/gemini-2.5-flash:streamGenerateContent"
        );
    }

    #[test]
    fn test_upload_files_url() {
        assert_eq!(
            upload_files("https://generativelanguage.googleapis.com/", "v1beta"),
            "https://generativelanguage.googleapis.com/upload/v1beta/files"
        );
    }
}
