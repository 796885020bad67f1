//! Mockdown Core
//!
//! This crate provides the document model, presentation variants, and
//! error definitions shared by every stage of the mockdown pipeline.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Block`], [`BlockContent`] - Block-level document structure
//! - [`Span`] - Inline content produced from a block's text
//! - [`outline`] - Textual outline of a segmented document
//! - [`BlockKind`], [`SpanKind`], [`Variant`] - Enumerations
//! - [`MockdownError`] - Error types

pub mod enums;
pub mod error;
pub mod types;

pub use enums::{BlockKind, SpanKind, Variant};
pub use error::{MockdownError, Result};
pub use types::{outline, plain_text, Block, BlockContent, Span, PLAIN_LANGUAGE};
