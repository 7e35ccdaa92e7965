#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Servo Nomenclature
//!
//! Encoding, decoding and description of servomotor part numbers for the
//! Sigma-X and Sigma-7 platforms.

pub mod catalogue;
pub mod decode;
pub mod describe;
pub mod encode;
pub mod error;
pub mod options;
pub mod session;

mod proptests;

// Re-exports for convenience
pub use catalogue::{
    Catalogue, CatalogueSet, CatalogueSource, DirectorySource, EmbeddedSource, Platform, Segment,
    Series, TemplateKind, ValueTable, load_catalogue,
};
pub use decode::{DecodedResult, DecodedSegment, decode, normalize};
pub use describe::describe;
pub use encode::{PartCode, Selections, build_code};
pub use error::{Error, Result};
pub use options::{Choices, SegmentChoices, SegmentOption};
pub use session::{Session, SummaryEntry, TemplateEntry};
