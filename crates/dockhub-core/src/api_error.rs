//! Registry-reported errors.
//!
//! Registries report failures on non-2xx responses with a JSON body of the
//! form:
//!
//! ```json
//! {"errors": [{"code": "NAME_UNKNOWN", "message": "repository name not known", "detail": {}}]}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Error code reported by the registry.
///
/// Codes the client does not recognize decode as [`ErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Blob unknown to registry.
    BlobUnknown,
    /// Blob upload invalid.
    BlobUploadInvalid,
    /// Blob upload unknown to registry.
    BlobUploadUnknown,
    /// Provided digest did not match uploaded content.
    DigestInvalid,
    /// Blob referenced by a manifest is unknown to the registry.
    ManifestBlobUnknown,
    /// Manifest invalid.
    ManifestInvalid,
    /// Manifest unknown.
    ManifestUnknown,
    /// Manifest failed signature verification.
    ManifestUnverified,
    /// Invalid repository name.
    NameInvalid,
    /// Repository name not known to registry.
    NameUnknown,
    /// Provided length did not match content length.
    SizeInvalid,
    /// Manifest tag did not match URI.
    TagInvalid,
    /// Authentication required.
    Unauthorized,
    /// Requested access to the resource is denied.
    Denied,
    /// The operation is unsupported.
    Unsupported,
    /// Any code not listed above.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    /// Returns the code as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlobUnknown => "BLOB_UNKNOWN",
            Self::BlobUploadInvalid => "BLOB_UPLOAD_INVALID",
            Self::BlobUploadUnknown => "BLOB_UPLOAD_UNKNOWN",
            Self::DigestInvalid => "DIGEST_INVALID",
            Self::ManifestBlobUnknown => "MANIFEST_BLOB_UNKNOWN",
            Self::ManifestInvalid => "MANIFEST_INVALID",
            Self::ManifestUnknown => "MANIFEST_UNKNOWN",
            Self::ManifestUnverified => "MANIFEST_UNVERIFIED",
            Self::NameInvalid => "NAME_INVALID",
            Self::NameUnknown => "NAME_UNKNOWN",
            Self::SizeInvalid => "SIZE_INVALID",
            Self::TagInvalid => "TAG_INVALID",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Denied => "DENIED",
            Self::Unsupported => "UNSUPPORTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single registry-reported error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    #[serde(default)]
    pub code: ErrorCode,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,

    /// Opaque, code-specific detail.
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// The error list carried in a registry error body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorList {
    /// Reported errors, in server order.
    #[serde(default)]
    pub errors: Vec<ErrorInfo>,
}

impl ErrorList {
    /// Decodes an error list from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON error list.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_core::{ErrorCode, ErrorList};
    ///
    /// let list = ErrorList::from_json(br#"{"errors":[{"code":"DENIED","message":"no"}]}"#).unwrap();
    /// assert_eq!(list.errors[0].code, ErrorCode::Denied);
    /// ```
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Returns the first error with the given code.
    #[must_use]
    pub fn find(&self, code: ErrorCode) -> Option<&ErrorInfo> {
        self.errors.iter().find(|error| error.code == code)
    }

    /// Returns true if no errors were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
