//! Reference and value text placement from the style configuration.

use tracing::warn;

use crate::config::{Config, TextFieldConfig, TextFont, TextPosition};
use crate::kicad::{Footprint, Point, Text, TextKind};

use super::geometry::{round_to_base, BodyEdges};

/// Body-scaled text aims to fit this many characters along the longer side.
const SCALED_TEXT_CHARACTERS: f64 = 3.0;

/// Reference designator placeholder.
pub const REFERENCE_TEXT: &str = "REF**";

/// Where text fields are placed relative to the part.
#[derive(Debug, Clone, Copy)]
pub struct TextPlacement {
    /// Body outline; centre fields sit at its centre.
    pub body: BodyEdges,
    /// Y of the courtyard's top edge.
    pub courtyard_top: f64,
    /// Y of the courtyard's bottom edge.
    pub courtyard_bottom: f64,
    /// Rotate centre fields by 90° when the body is taller than wide.
    pub allow_rotation: bool,
}

/// Adds the configured reference, value and user text fields.
///
/// The first `references` entry becomes the `REF**` reference and the
/// first `values` entry the value (the footprint name); any further entries
/// are `%R` / `%V` user texts.
pub fn add_text_fields(
    footprint: &mut Footprint,
    config: &Config,
    placement: &TextPlacement,
    value: &str,
) {
    for (i, field) in config.references.iter().enumerate() {
        let (kind, text) = if i == 0 {
            (TextKind::Reference, REFERENCE_TEXT)
        } else {
            (TextKind::User, "%R")
        };
        footprint.append(build_field(field, placement, kind, text));
    }

    for (i, field) in config.values.iter().enumerate() {
        let (kind, text) = if i == 0 {
            (TextKind::Value, value)
        } else {
            (TextKind::User, "%V")
        };
        footprint.append(build_field(field, placement, kind, text));
    }
}

/// Resolves a font definition to (size, thickness) for a body.
///
/// Scaled fonts take a third of the longer body side, clamped to
/// `size_max` and raised to `size_min`; thickness is rounded to 0.01 mm.
#[must_use]
pub fn resolve_font(font: &TextFont, body: &BodyEdges) -> ([f64; 2], f64) {
    match *font {
        TextFont::Fixed { size, fontwidth } => (size, fontwidth),
        TextFont::Scaled {
            size_min,
            size_max,
            thickness_factor,
        } => {
            let target = body.width().max(body.height()) / SCALED_TEXT_CHARACTERS;
            let mut size = [target.min(size_max[0]), target.min(size_max[1])];
            if size[0] < size_min[0] {
                warn!(
                    target_size = target,
                    "Body too small for scaled text, using minimum size"
                );
                size = size_min;
            }
            (size, round_to_base(size[0] * thickness_factor, 0.01))
        }
    }
}

fn build_field(field: &TextFieldConfig, placement: &TextPlacement, kind: TextKind, text: &str) -> Text {
    let center = placement.body.center();
    let (size, thickness) = resolve_font(&field.font, &placement.body);
    let text_height = size[1];

    let y = match field.position_y {
        TextPosition::OutsideTop => placement.courtyard_top - text_height,
        TextPosition::OutsideBottom => placement.courtyard_bottom + text_height,
        TextPosition::Center => center.y,
    };

    let mut out = Text::new(kind, text, Point::new(center.x, y), field.layer);
    out.size = (size[0], size[1]);
    out.thickness = thickness;
    if field.position_y == TextPosition::Center
        && placement.allow_rotation
        && placement.body.width() < placement.body.height()
    {
        out.rotation = 90.0;
    }
    out
}
