//! harwin-footprints: KiCad footprint generator for Harwin connectors
//!
//! Computes pad positions, outlines and text placement for each supported
//! connector family from a handful of datasheet formulas, and writes one
//! `.kicad_mod` file per variant into a `<library>.pretty` directory.
//!
//! # Architecture
//!
//! - **Geometry**: pure functions from pin count (and row count) to named
//!   reference coordinates
//! - **Assembly**: geometry plus style configuration become a [`kicad::Footprint`]
//! - **Output**: [`kicad::writer`] serialises footprints, [`kicad::FootprintLibrary`]
//!   places them on disk
//!
//! # Modules
//!
//! - [`config`] - Style configuration loading and validation
//! - [`connectors`] - Connector families and the generation driver
//! - [`error`] - Configuration error types
//! - [`kicad`] - Footprint model and `.kicad_mod` output

pub mod config;
pub mod connectors;
pub mod error;
pub mod kicad;
