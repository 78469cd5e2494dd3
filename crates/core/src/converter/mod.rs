//! Converter module for turning the ticket's primary document into a PDF.
//!
//! [`DocumentConverter`] runs the fallback chain: convert with a local
//! [`PdfConverter`] when one is available, otherwise (or when conversion
//! fails) move the original document into the investigation directory.
//!
//! # Example
//!
//! ```ignore
//! use ticketdl_core::converter::{DocumentConverter, LibreOfficeConverter};
//!
//! let documents = DocumentConverter::new(
//!     Arc::new(LibreOfficeConverter::with_defaults()),
//!     placer,
//!     clock,
//!     Duration::from_secs(2),
//! );
//! let outcome = documents
//!     .process("T-1.doc", Path::new("/downloads"), Path::new("/out/T-1/Investigation"))
//!     .await;
//! ```

mod config;
mod document;
mod error;
mod libreoffice;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use document::DocumentConverter;
pub use error::ConverterError;
pub use libreoffice::{find_in_path, LibreOfficeConverter};
pub use traits::PdfConverter;
pub use types::DocumentOutcome;
