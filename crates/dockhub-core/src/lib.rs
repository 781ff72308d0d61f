//! # Dockhub Core
//!
//! Grammar and data types for the container registry HTTP API (Registry V2).
//!
//! This crate has no network dependencies. It provides:
//!
//! - [`name`] - repository name validation and [`RepositoryName`]
//! - [`digest`] - content digest parsing and [`Digest`]
//! - [`api_error`] - registry-reported error payloads ([`ErrorList`])
//!
//! ## Example
//!
//! ```rust
//! use dockhub_core::{Digest, RepositoryName};
//!
//! let name = RepositoryName::new("library/ubuntu")?;
//! assert_eq!(name.components().count(), 2);
//!
//! let digest: Digest =
//!     "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".parse()?;
//! assert!(digest.matches(b""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api_error;
pub mod digest;
pub mod error;
pub mod name;


pub use api_error::{ErrorCode, ErrorInfo, ErrorList};
pub use digest::{Digest, DigestAlgorithm};
pub use error::{Error, InvalidDigestError, InvalidNameError, Result};
pub use name::RepositoryName;
