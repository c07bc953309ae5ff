//! S-expression writer for `.kicad_mod` footprint files.
//!
//! Primitives are grouped by kind in the order KiCad itself writes them:
//! texts, graphic lines, pads, then 3D models. Within a group the insertion
//! order of the [`Footprint`] is kept, so output is fully deterministic.

use std::borrow::Cow;
use std::fmt::Write;

use super::primitives::{Layer, Line, Model, Pad, Point, Text};
use super::{Attribute, Footprint, Primitive};

/// Output switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write 3D model placement with the KiCad 4 `at` keyword instead of `offset`.
    pub kicad4_compatible: bool,
}

/// Formats a coordinate or size the way KiCad files expect.
///
/// At most six decimals, no trailing zeros, and no negative zero.
#[must_use]
pub fn format_float(value: f64) -> String {
    let fixed = format!("{value:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Quotes a token only if KiCad would otherwise misparse it.
fn quote(token: &str) -> Cow<'_, str> {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));
    if needs_quotes {
        Cow::Owned(quote_always(token))
    } else {
        Cow::Borrowed(token)
    }
}

fn quote_always(token: &str) -> String {
    let escaped = token.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn xy(point: Point) -> String {
    format!("{} {}", format_float(point.x), format_float(point.y))
}

fn xyz(values: [f64; 3]) -> String {
    format!(
        "{} {} {}",
        format_float(values[0]),
        format_float(values[1]),
        format_float(values[2])
    )
}

/// Serialises a footprint to `.kicad_mod` text.
#[must_use]
pub fn to_kicad_mod(footprint: &Footprint, options: WriteOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "(module {} (layer {})",
        quote(&footprint.name),
        Layer::FrontCopper
    );
    if !footprint.description.is_empty() {
        let _ = writeln!(out, "  (descr {})", quote_always(&footprint.description));
    }
    if !footprint.tags.is_empty() {
        let _ = writeln!(out, "  (tags {})", quote_always(&footprint.tags));
    }
    match footprint.attribute {
        Attribute::ThroughHole => {}
        Attribute::Smd => out.push_str("  (attr smd)\n"),
    }

    for text in footprint.texts() {
        write_text(&mut out, text);
    }

    for primitive in &footprint.primitives {
        match primitive {
            Primitive::Line(line) => write_line(&mut out, line),
            Primitive::PolyLine(polyline) => {
                for segment in polyline.segments() {
                    write_line(&mut out, &segment);
                }
            }
            _ => {}
        }
    }

    for pad in footprint.pads() {
        write_pad(&mut out, pad);
    }

    for model in footprint.models() {
        write_model(&mut out, model, options);
    }

    out.push_str(")\n");
    out
}

fn write_text(out: &mut String, text: &Text) {
    let at = if text.rotation.abs() < f64::EPSILON {
        xy(text.at)
    } else {
        format!("{} {}", xy(text.at), format_float(text.rotation))
    };
    let _ = writeln!(
        out,
        "  (fp_text {} {} (at {at}) (layer {})",
        text.kind.keyword(),
        quote(&text.text),
        text.layer
    );
    let _ = writeln!(
        out,
        "    (effects (font (size {} {}) (thickness {})))",
        format_float(text.size.0),
        format_float(text.size.1),
        format_float(text.thickness)
    );
    out.push_str("  )\n");
}

fn write_line(out: &mut String, line: &Line) {
    let _ = writeln!(
        out,
        "  (fp_line (start {}) (end {}) (layer {}) (width {}))",
        xy(line.start),
        xy(line.end),
        line.layer,
        format_float(line.width)
    );
}

fn write_pad(out: &mut String, pad: &Pad) {
    let _ = writeln!(
        out,
        "  (pad {} {} circle (at {}) (size {d} {d}) (drill {}) (layers {}))",
        quote(&pad.number),
        pad.pad_type.keyword(),
        xy(pad.at),
        format_float(pad.drill),
        pad.layers.names().join(" "),
        d = format_float(pad.diameter),
    );
}

fn write_model(out: &mut String, model: &Model, options: WriteOptions) {
    let placement = if options.kicad4_compatible {
        "at"
    } else {
        "offset"
    };
    let _ = writeln!(out, "  (model {}", quote(&model.path));
    let _ = writeln!(out, "    ({placement} (xyz {}))", xyz(model.offset));
    let _ = writeln!(out, "    (scale (xyz {}))", xyz(model.scale));
    let _ = writeln!(out, "    (rotate (xyz {}))", xyz(model.rotate));
    out.push_str("  )\n");
}
