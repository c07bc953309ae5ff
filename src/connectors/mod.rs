//! Connector footprint generation.
//!
//! Each family sweeps its parameter table, turns every combination into a
//! [`Footprint`](crate::kicad::Footprint) and hands it to a
//! [`FootprintLibrary`] for writing.
//!
//! # Supported Families
//!
//! | Family | Id | Parameters |
//! |--------|----|------------|
//! | Harwin M80 (540xxyy), dual row horizontal | `m80` | total pins |
//! | Harwin LTek male vertical | `ltek` | rows, pins per row, strain relief |

pub mod families;
pub mod geometry;
pub mod naming;
pub mod text_fields;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::kicad::{FootprintLibrary, KicadResult, WriteOptions};

use families::harwin_ltek::HarwinLtek;
use families::harwin_m80::{HarwinM80, PinRange};
pub use families::FootprintFamily;

/// Which families a run generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilySelection {
    /// Harwin M80 only.
    M80,
    /// Harwin LTek only.
    Ltek,
    /// Every family.
    #[default]
    All,
}

/// Returns the generators for a selection.
///
/// `extended` switches M80 to the full semi-custom pin range.
#[must_use]
pub fn select_families(selection: FamilySelection, extended: bool) -> Vec<Box<dyn FootprintFamily>> {
    let range = if extended {
        PinRange::Extended
    } else {
        PinRange::Standard
    };
    let m80: Box<dyn FootprintFamily> = Box::new(HarwinM80::new(range));
    let ltek: Box<dyn FootprintFamily> = Box::new(HarwinLtek);

    match selection {
        FamilySelection::M80 => vec![m80],
        FamilySelection::Ltek => vec![ltek],
        FamilySelection::All => vec![m80, ltek],
    }
}

/// Generates every footprint of `families` below `output_dir`.
///
/// Returns the written file paths in generation order. Existing files are
/// overwritten.
///
/// # Errors
///
/// Returns the first template or I/O error; footprints already written stay
/// on disk.
pub fn generate(
    families: &[Box<dyn FootprintFamily>],
    config: &Config,
    output_dir: &Path,
    options: WriteOptions,
) -> KicadResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for family in families {
        let library = FootprintLibrary::new(output_dir, family.library_name(config)?);
        let footprints = family.footprints(config)?;
        info!(
            family = family.id(),
            library = library.name(),
            count = footprints.len(),
            "Generating footprints"
        );

        for footprint in &footprints {
            let path = library.write(footprint, options)?;
            info!(name = %footprint.name, "Footprint generated");
            written.push(path);
        }
    }

    Ok(written)
}
