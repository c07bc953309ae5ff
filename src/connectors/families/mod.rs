//! Connector family implementations.
//!
//! Each family module holds its fixed constants, a pure geometry
//! calculation per parameter combination, and the assembler that turns the
//! geometry into a [`Footprint`].

pub mod harwin_ltek;
pub mod harwin_m80;

use crate::config::Config;
use crate::connectors::naming::{render, Fields};
use crate::kicad::{Footprint, KicadResult, Model};

/// Manufacturer shared by every family in this crate.
pub const MANUFACTURER: &str = "Harwin";

/// A connector family that produces one footprint per parameter combination.
pub trait FootprintFamily {
    /// Short identifier, e.g. `m80`.
    fn id(&self) -> &'static str;

    /// Renders the library name from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the library name template cannot be rendered.
    fn library_name(&self, config: &Config) -> KicadResult<String>;

    /// Builds every footprint of the family, in parameter-table order.
    ///
    /// # Errors
    ///
    /// Returns an error if a name template cannot be rendered.
    fn footprints(&self, config: &Config) -> KicadResult<Vec<Footprint>>;
}

/// Renders the configured library name for a manufacturer and series.
pub(crate) fn library_name(config: &Config, series: &str) -> KicadResult<String> {
    let fields = Fields::new()
        .with("man", MANUFACTURER)
        .with("series", series);
    render(&config.lib_name_format_string, &fields)
}

/// Builds the 3D model reference `<prefix><lib>.3dshapes/<name>.wrl`.
pub(crate) fn model_for(config: &Config, library: &str, footprint_name: &str) -> Model {
    Model::new(format!(
        "{}{library}.3dshapes/{footprint_name}.wrl",
        config.model_3d_prefix
    ))
}
