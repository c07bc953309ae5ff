//! Harwin M80 (540xxyy) connectors.
//!
//! Male, horizontal, through-hole, double row, 2.00 mm pitch. Two pad
//! columns run along Y with the body to the right of them and a non-plated
//! mounting hole above and below the pad field.
//!
//! Datasheet: <https://cdn.harwin.com/pdfs/M80-540.pdf>

use tracing::debug;

use crate::config::Config;
use crate::connectors::geometry::{round_to_base, BodyEdges};
use crate::connectors::naming::{render, Fields};
use crate::connectors::text_fields::{add_text_fields, TextPlacement};
use crate::kicad::{
    Attribute, Footprint, KicadResult, Layer, Pad, PadArray, Point, PolyLine,
};

use super::{library_name, model_for, FootprintFamily, MANUFACTURER};

/// Series name.
pub const SERIES: &str = "M80";
const SERIES_LONG: &str = "Male Horizontal Through Hole Double Row 2.00mm Pitch PCB Connector";
const DATASHEET: &str = "https://cdn.harwin.com/pdfs/M80-540.pdf";
const ORIENTATION: &str = "H";

/// Number of pad rows.
pub const NUMBER_OF_ROWS: u32 = 2;
/// Pin pitch (mm).
pub const PITCH: f64 = 2.0;
/// Pin drill diameter (mm).
pub const PAD_DRILL: f64 = 0.8;
/// Pin pad diameter (mm).
pub const PAD_SIZE: f64 = 1.35;
/// Mounting hole diameter (mm).
pub const MOUNT_DRILL: f64 = 2.4;

const BODY_LEFT: f64 = 2.4;
const BODY_RIGHT: f64 = 8.0;
const MOUNT_HOLE_INSET: f64 = 0.15;
const ARROW_SIZE: f64 = 0.4;
const ARROW_OFFSET: f64 = -1.5;
// Overhang on the sides of the housing.
const SILK_BODY_INDENT: f64 = 0.615;
const TEXT_BOTTOM_EXTRA: f64 = 0.2;

/// Standard, generally available pin counts.
pub const PIN_COUNTS_STANDARD: [u32; 11] = [4, 6, 8, 10, 12, 14, 20, 26, 34, 42, 50];

/// Extended pin counts: every even count from 4 to 50, including
/// semi-custom variants with valid part numbers.
#[must_use]
pub fn pin_counts_extended() -> Vec<u32> {
    (4..=50).step_by(2).collect()
}

/// Which pin-count table to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinRange {
    /// Standard product variants.
    #[default]
    Standard,
    /// Standard plus semi-custom variants.
    Extended,
}

/// Geometry of one M80 footprint, derived from the pin count alone.
#[derive(Debug, Clone, PartialEq)]
pub struct M80Geometry {
    /// Total pin count.
    pub pins: u32,
    /// Pins in each column.
    pub pins_per_row: u32,
    /// Datasheet dimension A: distance from first to last pin of a column.
    pub a: f64,
    /// Datasheet dimension B: distance between the mounting holes.
    pub b: f64,
    /// Datasheet dimension C: body length.
    pub c: f64,
    /// Housing outline.
    pub body: BodyEdges,
    /// Mounting hole centres (top, bottom).
    pub mount_holes: [Point; 2],
}

impl M80Geometry {
    /// Calculates the geometry for `pins` total pins.
    #[must_use]
    pub fn new(pins: u32) -> Self {
        let pins_per_row = pins / NUMBER_OF_ROWS;
        let n = f64::from(pins);
        let a = n - 2.0;
        let b = n + 5.0;
        let c = n + 10.0;

        let body = BodyEdges {
            left: BODY_LEFT,
            right: BODY_RIGHT,
            top: -((c - a) / 2.0),
            bottom: a + (c - a) / 2.0,
        };

        let hole_x = PITCH / 2.0 - MOUNT_HOLE_INSET;
        let mount_holes = [
            Point::new(hole_x, -(b - a) / 2.0),
            Point::new(hole_x, a + (b - a) / 2.0),
        ];

        Self {
            pins,
            pins_per_row,
            a,
            b,
            c,
            body,
            mount_holes,
        }
    }

    /// Manufacturer part number pattern, e.g. `54004xx`.
    #[must_use]
    pub fn mpn(&self) -> String {
        format!("540{:02}xx", self.pins)
    }

    /// Courtyard outline. The pad side is rounded to `grid`.
    #[must_use]
    pub fn courtyard(&self, offset: f64, grid: f64) -> BodyEdges {
        BodyEdges {
            left: -round_to_base(PAD_SIZE / 2.0 + offset, grid),
            right: self.body.right + offset,
            top: self.body.top - offset,
            bottom: self.body.bottom + offset,
        }
    }
}

/// Generator for the M80 family.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarwinM80 {
    range: PinRange,
}

impl HarwinM80 {
    /// Creates a generator sweeping the given pin-count table.
    #[must_use]
    pub const fn new(range: PinRange) -> Self {
        Self { range }
    }

    /// Pin counts in generation order.
    #[must_use]
    pub fn pin_counts(&self) -> Vec<u32> {
        match self.range {
            PinRange::Standard => PIN_COUNTS_STANDARD.to_vec(),
            PinRange::Extended => pin_counts_extended(),
        }
    }

    /// Renders the footprint name for a geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured name template cannot be rendered.
    pub fn footprint_name(geometry: &M80Geometry, config: &Config) -> KicadResult<String> {
        let fields = Fields::new()
            .with("man", MANUFACTURER)
            .with("series", SERIES)
            .with("mpn", geometry.mpn())
            .with("num_rows", NUMBER_OF_ROWS)
            .with("pins_per_row", geometry.pins_per_row)
            .with("mounting_pad", "")
            .with("pitch", PITCH)
            .with("orientation", config.orientation(ORIENTATION));
        render(&config.fp_name_format_string, &fields)
    }

    /// Builds the footprint for `pins` total pins.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured template cannot be rendered.
    pub fn footprint(&self, pins: u32, config: &Config, library: &str) -> KicadResult<Footprint> {
        let geometry = M80Geometry::new(pins);
        let name = Self::footprint_name(&geometry, config)?;
        debug!(
            name = %name,
            a = geometry.a,
            b = geometry.b,
            c = geometry.c,
            "M80 geometry"
        );

        let mut fp = Footprint::new(&name);
        fp.description = format!(
            "{MANUFACTURER} {SERIES_LONG}, {}, {} Pins per row ({DATASHEET}), generated with kicad-footprint-generator",
            geometry.mpn(),
            geometry.pins_per_row
        );
        let tag_fields = Fields::new()
            .with("series", SERIES)
            .with("orientation", config.orientation(ORIENTATION))
            .with("man", MANUFACTURER)
            .with("entry", config.entry(ORIENTATION));
        fp.tags = render(&config.keyword_fp_string, &tag_fields)?;
        fp.attribute = Attribute::Smd;

        Self::add_pads(&mut fp, &geometry);
        Self::add_fab(&mut fp, &geometry, config);
        Self::add_silkscreen(&mut fp, &geometry, config);

        let offset = config.courtyard_offset.connector;
        let courtyard = geometry.courtyard(offset, config.courtyard_grid);
        fp.append(PolyLine::new(
            courtyard.outline(),
            Layer::FrontCourtyard,
            config.courtyard_line_width,
        ));

        let placement = TextPlacement {
            body: geometry.body,
            courtyard_top: geometry.body.top - offset,
            courtyard_bottom: geometry.body.bottom + offset + TEXT_BOTTOM_EXTRA,
            allow_rotation: true,
        };
        add_text_fields(&mut fp, config, &placement, &name);

        fp.append(model_for(config, library, &name));

        Ok(fp)
    }

    fn add_pads(fp: &mut Footprint, geometry: &M80Geometry) {
        for hole in geometry.mount_holes {
            fp.append(Pad::npth(hole, MOUNT_DRILL));
        }

        let template = Pad::through_hole("", Point::default(), PAD_SIZE, PAD_DRILL);
        let columns = [
            (0.0, 1),
            (PITCH, geometry.pins_per_row + 1),
        ];
        for (x, initial) in columns {
            let array = PadArray {
                start: Point::new(x, 0.0),
                spacing: Point::new(0.0, PITCH),
                initial,
                pin_count: geometry.pins_per_row,
            };
            fp.extend(array.pads(&template));
        }
    }

    fn add_fab(fp: &mut Footprint, geometry: &M80Geometry, config: &Config) {
        fp.append(PolyLine::new(
            geometry.body.outline(),
            Layer::FrontFab,
            config.fab_line_width,
        ));

        // Pin 1 arrow.
        fp.append(PolyLine::new(
            [
                Point::new(ARROW_OFFSET - ARROW_SIZE, -0.4),
                Point::new(ARROW_OFFSET, 0.0),
                Point::new(ARROW_OFFSET - ARROW_SIZE, 0.4),
            ],
            Layer::FrontFab,
            config.fab_line_width,
        ));
    }

    fn add_silkscreen(fp: &mut Footprint, geometry: &M80Geometry, config: &Config) {
        let width = config.silk_line_width;
        let pad_offset = (PAD_SIZE + width) / 2.0 + config.silk_pad_clearance;
        let outline = geometry.body.expanded(config.silk_fab_offset);
        let top = outline.top + SILK_BODY_INDENT;
        let bottom = outline.bottom - SILK_BODY_INDENT;

        // Open towards the pad field on the left.
        fp.append(PolyLine::new(
            [
                Point::new(outline.left, -pad_offset),
                Point::new(outline.left, top),
                Point::new(outline.right, top),
                Point::new(outline.right, bottom),
                Point::new(outline.left, bottom),
                Point::new(outline.left, geometry.a + pad_offset),
            ],
            Layer::FrontSilkscreen,
            width,
        ));

        let tick = (PAD_SIZE - width) / 2.0;
        fp.append(PolyLine::new(
            [Point::new(-pad_offset, tick), Point::new(-pad_offset, -tick)],
            Layer::FrontSilkscreen,
            width,
        ));
    }
}

impl FootprintFamily for HarwinM80 {
    fn id(&self) -> &'static str {
        "m80"
    }

    fn library_name(&self, config: &Config) -> KicadResult<String> {
        library_name(config, SERIES)
    }

    fn footprints(&self, config: &Config) -> KicadResult<Vec<Footprint>> {
        let library = self.library_name(config)?;
        self.pin_counts()
            .into_iter()
            .map(|pins| self.footprint(pins, config, &library))
            .collect()
    }
}
