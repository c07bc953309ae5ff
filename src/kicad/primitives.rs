//! Footprint primitive types for `.kicad_mod` files.
//!
//! These types represent the drawing elements that make up a footprint:
//! pads, lines, polylines, text and the 3D model reference.

use std::fmt;

use bitflags::bitflags;
use serde::Deserialize;

/// Default stroke width for silkscreen drawings (mm).
pub const DEFAULT_LINE_WIDTH: f64 = 0.15;

/// Default text size (mm).
pub const DEFAULT_TEXT_SIZE: f64 = 1.0;

/// Default text stroke thickness (mm).
pub const DEFAULT_TEXT_THICKNESS: f64 = 0.15;

/// A 2D point in footprint coordinates (mm, Y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflects the point across the vertical line `x = axis`.
    #[must_use]
    pub fn mirror_x(self, axis: f64) -> Self {
        Self::new(2.0f64.mul_add(axis, -self.x), self.y)
    }
}

/// Board layer for graphic primitives and text.
///
/// Deserialises from the KiCad layer name, e.g. `F.SilkS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Layer {
    /// Front copper.
    #[serde(rename = "F.Cu")]
    FrontCopper,
    /// Front silkscreen.
    #[default]
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
    /// Front fabrication drawing.
    #[serde(rename = "F.Fab")]
    FrontFab,
    /// Front courtyard.
    #[serde(rename = "F.CrtYd")]
    FrontCourtyard,
}

impl Layer {
    /// Returns the KiCad layer name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FrontCopper => "F.Cu",
            Self::FrontSilkscreen => "F.SilkS",
            Self::FrontFab => "F.Fab",
            Self::FrontCourtyard => "F.CrtYd",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Copper and mask layers a pad is present on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerSet: u8 {
        /// All copper layers (`*.Cu`).
        const ALL_CU = 1;
        /// Both solder mask layers (`*.Mask`).
        const ALL_MASK = 1 << 1;

        /// Through-hole layers, plated or not.
        const THT = Self::ALL_CU.bits() | Self::ALL_MASK.bits();
    }
}

/// Layer names in the order KiCad writes them.
const LAYER_NAMES: [(LayerSet, &str); 2] = [
    (LayerSet::ALL_CU, "*.Cu"),
    (LayerSet::ALL_MASK, "*.Mask"),
];

impl LayerSet {
    /// Returns the KiCad names of the layers in this set, in canonical order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        LAYER_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Pad type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadType {
    /// Plated through-hole.
    ThruHole,
    /// Non-plated through-hole (mounting hole).
    NpThruHole,
}

impl PadType {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::ThruHole => "thru_hole",
            Self::NpThruHole => "np_thru_hole",
        }
    }
}

/// A circular footprint pad.
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Pad number. Empty for mounting holes and mechanical pads.
    pub number: String,
    /// Pad type.
    pub pad_type: PadType,
    /// Centre position.
    pub at: Point,
    /// Copper diameter in mm.
    pub diameter: f64,
    /// Drill diameter in mm.
    pub drill: f64,
    /// Layers the pad occupies.
    pub layers: LayerSet,
}

impl Pad {
    /// Creates a circular plated through-hole pad.
    #[must_use]
    pub fn through_hole(number: impl Into<String>, at: Point, diameter: f64, drill: f64) -> Self {
        Self {
            number: number.into(),
            pad_type: PadType::ThruHole,
            at,
            diameter,
            drill,
            layers: LayerSet::THT,
        }
    }

    /// Creates an unnumbered non-plated hole where the pad matches the drill.
    #[must_use]
    pub fn npth(at: Point, drill: f64) -> Self {
        Self {
            number: String::new(),
            pad_type: PadType::NpThruHole,
            at,
            diameter: drill,
            drill,
            layers: LayerSet::THT,
        }
    }

    /// Returns the pad number as an integer, if it has one.
    #[must_use]
    pub fn numeric(&self) -> Option<u32> {
        self.number.parse().ok()
    }
}

/// A linear run of equally spaced, consecutively numbered pads.
#[derive(Debug, Clone, Copy)]
pub struct PadArray {
    /// Position of the first pad.
    pub start: Point,
    /// Offset between neighbouring pads.
    pub spacing: Point,
    /// Number given to the first pad.
    pub initial: u32,
    /// Number of pads in the array.
    pub pin_count: u32,
}

impl PadArray {
    /// Expands the array into pads cloned from `template`.
    ///
    /// The template's number and position are replaced for each pad.
    #[must_use]
    pub fn pads(&self, template: &Pad) -> Vec<Pad> {
        (0..self.pin_count)
            .map(|i| {
                let step = f64::from(i);
                let mut pad = template.clone();
                pad.number = (self.initial + i).to_string();
                pad.at = Point::new(
                    self.spacing.x.mul_add(step, self.start.x),
                    self.spacing.y.mul_add(step, self.start.y),
                );
                pad
            })
            .collect()
    }
}

/// A single line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl Line {
    /// Creates a line on the given layer.
    #[must_use]
    pub const fn new(start: Point, end: Point, layer: Layer, width: f64) -> Self {
        Self {
            start,
            end,
            layer,
            width,
        }
    }

    /// Creates a silkscreen line with the default width.
    #[must_use]
    pub const fn silk(start: Point, end: Point) -> Self {
        Self::new(start, end, Layer::FrontSilkscreen, DEFAULT_LINE_WIDTH)
    }
}

/// An open or closed chain of line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyLine {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl PolyLine {
    /// Creates a polyline on the given layer.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point>, layer: Layer, width: f64) -> Self {
        Self {
            points: points.into_iter().collect(),
            layer,
            width,
        }
    }

    /// Creates a silkscreen polyline with the default width.
    #[must_use]
    pub fn silk(points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(points, Layer::FrontSilkscreen, DEFAULT_LINE_WIDTH)
    }

    /// Creates a closed rectangle through two opposite corners, drawn from
    /// `start` along the Y edge first.
    #[must_use]
    pub fn rect(start: Point, end: Point, layer: Layer, width: f64) -> Self {
        Self::new(
            [
                start,
                Point::new(start.x, end.y),
                end,
                Point::new(end.x, start.y),
                start,
            ],
            layer,
            width,
        )
    }

    /// Returns `true` if the first and last vertex coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 2 && first == last,
            _ => false,
        }
    }

    /// Returns a copy reflected across the vertical line `x = axis`.
    #[must_use]
    pub fn mirrored_x(&self, axis: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.mirror_x(axis)).collect(),
            layer: self.layer,
            width: self.width,
        }
    }

    /// Iterates over the segments between consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points
            .windows(2)
            .map(|pair| Line::new(pair[0], pair[1], self.layer, self.width))
    }
}

/// Role of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Reference designator (`REF**`).
    Reference,
    /// Value (normally the footprint name).
    Value,
    /// Free user text such as `%R`.
    User,
}

impl TextKind {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Value => "value",
            Self::User => "user",
        }
    }
}

/// A text field.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Text role.
    pub kind: TextKind,
    /// Content.
    pub text: String,
    /// Anchor position.
    pub at: Point,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Layer.
    pub layer: Layer,
    /// Font size (width, height) in mm.
    pub size: (f64, f64),
    /// Stroke thickness in mm.
    pub thickness: f64,
}

impl Text {
    /// Creates a text field with the default font.
    #[must_use]
    pub fn new(kind: TextKind, text: impl Into<String>, at: Point, layer: Layer) -> Self {
        Self {
            kind,
            text: text.into(),
            at,
            rotation: 0.0,
            layer,
            size: (DEFAULT_TEXT_SIZE, DEFAULT_TEXT_SIZE),
            thickness: DEFAULT_TEXT_THICKNESS,
        }
    }
}

/// Reference to an external 3D model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Model file path (may contain environment variables).
    pub path: String,
    /// Offset (x, y, z) in mm.
    pub offset: [f64; 3],
    /// Scale factors.
    pub scale: [f64; 3],
    /// Rotation (x, y, z) in degrees.
    pub rotate: [f64; 3],
}

impl Model {
    /// Creates a model reference with identity placement.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            offset: [0.0; 3],
            scale: [1.0; 3],
            rotate: [0.0; 3],
        }
    }
}
