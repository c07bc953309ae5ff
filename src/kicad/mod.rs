//! KiCad footprint model and `.kicad_mod` output.
//!
//! A [`Footprint`] is an ordered list of drawing primitives plus metadata.
//! The [`writer`] turns it into the s-expression text KiCad reads, and
//! [`FootprintLibrary`] places the result inside a `<lib>.pretty` directory.
//!
//! # File Structure
//!
//! ```text
//! (module <name> (layer F.Cu)
//!   (descr "...")
//!   (tags "...")
//!   (attr smd)
//!   (fp_text reference REF** (at x y) (layer F.SilkS) ...)
//!   (fp_line (start x y) (end x y) (layer F.Fab) (width 0.1))
//!   (pad 1 thru_hole circle (at x y) (size d d) (drill d) (layers *.Cu *.Mask))
//!   (model <path> (offset ...) (scale ...) (rotate ...))
//! )
//! ```

pub mod error;
mod library;
pub mod primitives;
pub mod writer;

pub use error::{KicadError, KicadResult};
pub use library::{FootprintLibrary, FOOTPRINT_EXTENSION};
pub use primitives::{
    Layer, LayerSet, Line, Model, Pad, PadArray, PadType, Point, PolyLine, Text,
    TextKind,
};
pub use writer::WriteOptions;

/// Footprint placement attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attribute {
    /// Through-hole part (KiCad's default, written without an `attr` entry).
    #[default]
    ThroughHole,
    /// Surface-mount part, included in placement files.
    Smd,
}

/// A single drawing element of a footprint.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Text field.
    Text(Text),
    /// Line segment.
    Line(Line),
    /// Chain of line segments.
    PolyLine(PolyLine),
    /// Pad.
    Pad(Pad),
    /// 3D model reference.
    Model(Model),
}

impl From<Text> for Primitive {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<PolyLine> for Primitive {
    fn from(polyline: PolyLine) -> Self {
        Self::PolyLine(polyline)
    }
}

impl From<Pad> for Primitive {
    fn from(pad: Pad) -> Self {
        Self::Pad(pad)
    }
}

impl From<Model> for Primitive {
    fn from(model: Model) -> Self {
        Self::Model(model)
    }
}

/// A complete KiCad footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Footprint name, also used as the file stem.
    pub name: String,

    /// Description (`descr`).
    pub description: String,

    /// Space separated keywords (`tags`).
    pub tags: String,

    /// Placement attribute.
    pub attribute: Attribute,

    /// Primitives in insertion order.
    pub primitives: Vec<Primitive>,
}

impl Footprint {
    /// Creates a new empty footprint with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: String::new(),
            attribute: Attribute::default(),
            primitives: Vec::new(),
        }
    }

    /// Appends a primitive.
    pub fn append(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Appends several primitives.
    pub fn extend<P: Into<Primitive>>(&mut self, primitives: impl IntoIterator<Item = P>) {
        self.primitives
            .extend(primitives.into_iter().map(Into::into));
    }

    /// Iterates over the pads.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    /// Iterates over the text fields.
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Iterates over the single line segments.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Iterates over the polylines.
    pub fn polylines(&self) -> impl Iterator<Item = &PolyLine> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::PolyLine(polyline) => Some(polyline),
            _ => None,
        })
    }

    /// Iterates over the 3D model references.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Model(model) => Some(model),
            _ => None,
        })
    }

    /// Returns the numbered pads' numbers, sorted ascending.
    #[must_use]
    pub fn pad_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.pads().filter_map(Pad::numeric).collect();
        numbers.sort_unstable();
        numbers
    }

    /// Returns `true` if the numbered pads are exactly `1..=n` with no repeats.
    #[must_use]
    pub fn has_contiguous_pad_numbers(&self) -> bool {
        self.pad_numbers()
            .iter()
            .zip(1u32..)
            .all(|(number, expected)| *number == expected)
    }
}
