use thiserror::Error;

/// Main error type for the striplog tool
#[derive(Error, Debug)]
pub enum StripError {
    #[error("PDF rendering failed: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File I/O error: {path}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Page {page} is out of range: document has {page_count} pages")]
    PageOutOfRange { page: u32, page_count: u32 },

    #[error("Selection abandoned before both corners were chosen")]
    SelectionIncomplete,

    #[error("Image encoding failed: {path}")]
    ImageEncoding {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("General error: {0}")]
    General(#[from] anyhow::Error),
}

impl StripError {
    /// Create a rendering error with context
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
            source: None,
        }
    }

    /// Create a rendering error with source
    pub fn render_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a file I/O error
    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an image encoding error
    pub fn image_encoding(path: impl Into<String>, source: image::ImageError) -> Self {
        Self::ImageEncoding {
            path: path.into(),
            source,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StripError::Render { .. } => {
                "📄 Couldn't render this PDF. It might be encrypted or corrupted.".to_string()
            }
            StripError::FileIo { .. } => {
                "📁 File access error. Check the path, permissions and disk space.".to_string()
            }
            StripError::PageOutOfRange { page, page_count } => {
                format!(
                    "📄 Page {} doesn't exist: this document has {} pages.",
                    page, page_count
                )
            }
            StripError::SelectionIncomplete => {
                "🖱️ The window was closed before both corners were clicked.".to_string()
            }
            _ => "Something went wrong. Check the logs for details.".to_string(),
        }
    }
}

/// Result type alias for convenience
pub type StripResult<T> = Result<T, StripError>;
