//! Error types for folio.
//!
//! Every failure path in the page ends in a local recovery: contact errors
//! become an inline message, asset errors become a placeholder block. Only
//! startup failures (config, GPU, window) reach the binary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the JSON config or content files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but is not valid JSON for the expected type.
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed but a value is out of range.
    #[error("invalid {what}: {reason}")]
    Invalid { what: String, reason: String },
}

/// Errors from a contact form submission.
///
/// Each variant maps onto one inline message shown beside the form; see
/// [`ContactError::user_message`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A submission is already outstanding.
    #[error("a message is already being sent")]
    AlreadySending,
    /// A required form field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The endpoint answered but reported `success: false`.
    #[error("submission rejected: {0}")]
    Rejected(String),
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a body that is not the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ContactError {
    /// Message shown to the visitor for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::AlreadySending => "Still sending your message...",
            ContactError::MissingField(_) => "Please fill in every field.",
            ContactError::Rejected(_) => "Failed to send message. Please try again.",
            ContactError::Transport(_) | ContactError::InvalidResponse(_) => {
                "Error sending message. Please try again."
            }
        }
    }
}

/// Errors loading an image asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Failed to read file from disk.
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to decode the image data.
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; ensure your system supports Vulkan, Metal, DX12 or WebGPU")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
}

/// Errors that can occur when starting the window.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Config or content could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_messages() {
        assert_eq!(
            ContactError::Rejected("bad key".into()).user_message(),
            "Failed to send message. Please try again."
        );
        assert_eq!(
            ContactError::Transport("timeout".into()).user_message(),
            "Error sending message. Please try again."
        );
        assert_eq!(
            ContactError::InvalidResponse("not json".into()).user_message(),
            "Error sending message. Please try again."
        );
    }

    #[test]
    fn test_config_error_display_names_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("folio.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("folio.json"));
    }
}
