//! Source engine BSP lump decoding.
//!
//! The map format kept its container layout for a decade while the
//! per-lump binary record layouts drifted per game and per version, often
//! without a version bump. This crate decodes lump bytes into structured
//! data, resolving which record layout applies from the file format
//! version, the per-lump sub-version and the identified game title.
//!
//! Container concerns (header parsing, lump offsets, decompression) stay
//! outside; decoders consume fully materialized bytes through the
//! [`lump::LumpSource`] trait.

pub mod bsp;
pub mod content;
pub mod error;
pub mod lump;
pub mod reader;
pub mod structs;
pub mod title;
pub mod variant;

pub use bsp::{BspData, BspReader, LumpState};
pub use content::{Entity, OcclusionData, StaticPropData};
pub use error::{Error, Result};
pub use lump::{LumpInfo, LumpSource, LumpType, MemBspFile};
pub use reader::LumpReader;
pub use title::{NullTitleResolver, TitleId, TitleResolver};
