//! Harwin LTek male connectors, vertical, 2.00 mm pitch.
//!
//! Single and dual row variants, each with and without the strain relief
//! clip. Row 1 sits on y = 0 and further rows stack towards negative Y.

use tracing::debug;

use crate::config::Config;
use crate::connectors::geometry::BodyEdges;
use crate::connectors::naming::{render, Fields};
use crate::connectors::text_fields::REFERENCE_TEXT;
use crate::kicad::primitives::DEFAULT_LINE_WIDTH;
use crate::kicad::{
    Footprint, KicadResult, Layer, Line, Pad, PadArray, Point, PolyLine, Text, TextKind,
};

use super::{library_name, model_for, FootprintFamily};

/// Series name.
pub const SERIES: &str = "LTek";

const NAME_TEMPLATE: &str = "Harwin_LTek-Male_{r}{n:02}_P{p:.2f}mm_Vertical{supports}";
const TAGS: &str = "connector harwin ltek M80";

/// Pin pitch within a row (mm).
pub const PITCH: f64 = 2.0;
/// Distance between rows (mm).
pub const ROW_PITCH: f64 = 2.0;
/// Pin pad diameter (mm).
pub const PIN_PAD: f64 = 1.35;
/// Pin drill diameter (mm).
pub const PIN_DRILL: f64 = 0.8;
/// Strain relief pad diameter (mm).
pub const STRAIN_RELIEF_PAD: f64 = 1.25;
/// Strain relief drill diameter (mm).
pub const STRAIN_RELIEF_DRILL: f64 = 0.95;

const FAB_LINE_WIDTH: f64 = 0.1;
const COURTYARD_LINE_WIDTH: f64 = 0.05;
const SILK_OFFSET: f64 = 0.1;
const COURTYARD_OFFSET: f64 = 0.5;
const OUTLINE_GRID: f64 = 0.05;

const STRAIN_RELIEF_X: f64 = 2.25;
const STRAIN_RELIEF_SPAN: f64 = 4.75;
const STRAIN_RELIEF_CLEARANCE: f64 = 0.5;

const WALL: f64 = 0.5;
const WALL_X: f64 = 1.75;
const BEVEL_OFFSET: f64 = 0.15;

const MARKER_OFFSET: f64 = 0.45;
const MARKER_SIZE: f64 = 1.0;
const FAB_MARKER_Y: f64 = 0.75;
const FAB_MARKER_SIZE: f64 = 0.25;

const REFERENCE_GAP: f64 = 1.5;
const VALUE_GAP: f64 = 2.0;

/// Pins per row and body width for single row parts.
const SINGLE_ROW: ([u32; 8], f64) = ([2, 3, 4, 5, 6, 7, 17, 22], 4.0);
/// Pins per row and body width for dual row parts.
const DUAL_ROW: ([u32; 12], f64) = ([2, 3, 4, 5, 6, 7, 8, 9, 10, 13, 17, 22], 6.0);

/// One LTek product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LtekVariant {
    /// Number of rows (1 or 2).
    pub rows: u32,
    /// Pins in each row.
    pub pins: u32,
    /// Whether the strain relief clip is fitted.
    pub strain_relief: bool,
}

impl LtekVariant {
    /// Body width across the rows (mm).
    #[must_use]
    pub const fn body_width(&self) -> f64 {
        if self.rows == 2 {
            DUAL_ROW.1
        } else {
            SINGLE_ROW.1
        }
    }

    /// Total pin count.
    #[must_use]
    pub const fn total_pins(&self) -> u32 {
        self.pins * self.rows
    }
}

/// Every variant in generation order: rows, then pins, then strain relief
/// before plain.
#[must_use]
pub fn variants() -> Vec<LtekVariant> {
    let single = SINGLE_ROW.0.iter().map(|&pins| (1, pins));
    let dual = DUAL_ROW.0.iter().map(|&pins| (2, pins));
    single
        .chain(dual)
        .flat_map(|(rows, pins)| {
            [true, false].into_iter().map(move |strain_relief| LtekVariant {
                rows,
                pins,
                strain_relief,
            })
        })
        .collect()
}

/// Geometry of one LTek footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct LtekGeometry {
    /// Distance from first to last pin of a row.
    pub a: f64,
    /// Body length.
    pub b: f64,
    /// Body outline.
    pub body: BodyEdges,
    /// Y of the body centre line.
    pub ymid: f64,
}

impl LtekGeometry {
    /// Calculates the geometry of a variant.
    #[must_use]
    pub fn new(variant: &LtekVariant) -> Self {
        let pins = f64::from(variant.pins);
        let a = (pins - 1.0) * PITCH;
        let b = pins.mul_add(PITCH, 4.10);
        let x1 = a / 2.0 - b / 2.0;
        let ymid = -(f64::from(variant.rows.saturating_sub(1)) * ROW_PITCH / 2.0);
        let half_width = variant.body_width() / 2.0;

        Self {
            a,
            b,
            body: BodyEdges {
                left: x1,
                right: x1 + b,
                top: ymid - half_width,
                bottom: ymid + half_width,
            },
            ymid,
        }
    }

    /// Strain relief pad centres.
    #[must_use]
    pub fn strain_relief_pads(&self) -> [Point; 4] {
        let sx1 = -STRAIN_RELIEF_X;
        let sx2 = self.a + STRAIN_RELIEF_X;
        let sy1 = self.ymid - STRAIN_RELIEF_SPAN / 2.0;
        let sy2 = self.ymid + STRAIN_RELIEF_SPAN / 2.0;
        [
            Point::new(sx1, sy1),
            Point::new(sx1, sy2),
            Point::new(sx2, sy1),
            Point::new(sx2, sy2),
        ]
    }
}

/// Generator for the LTek family.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarwinLtek;

impl HarwinLtek {
    /// Renders the footprint name of a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the name template cannot be rendered.
    pub fn footprint_name(variant: &LtekVariant) -> KicadResult<String> {
        let fields = Fields::new()
            .with("r", if variant.rows == 2 { "2x" } else { "" })
            .with("n", variant.pins)
            .with("p", PITCH)
            .with(
                "supports",
                if variant.strain_relief {
                    "_StrainRelief"
                } else {
                    ""
                },
            );
        render(NAME_TEMPLATE, &fields)
    }

    /// Builds the footprint of one variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the name template cannot be rendered.
    pub fn footprint(
        &self,
        variant: &LtekVariant,
        config: &Config,
        library: &str,
    ) -> KicadResult<Footprint> {
        let geometry = LtekGeometry::new(variant);
        let name = Self::footprint_name(variant)?;
        debug!(name = %name, a = geometry.a, b = geometry.b, "LTek geometry");

        let mut fp = Footprint::new(&name);
        fp.description = format!(
            "Harwin LTek Connector, {} pins, single row male, vertical entry{}",
            variant.total_pins(),
            if variant.strain_relief {
                ", strain relief clip"
            } else {
                ""
            }
        );
        fp.tags = TAGS.to_string();

        let center_x = geometry.a / 2.0;
        fp.append(Text::new(
            TextKind::Reference,
            REFERENCE_TEXT,
            Point::new(center_x, geometry.body.top - REFERENCE_GAP),
            Layer::FrontSilkscreen,
        ));
        fp.append(Text::new(
            TextKind::Value,
            name.as_str(),
            Point::new(center_x, geometry.body.bottom + VALUE_GAP),
            Layer::FrontFab,
        ));

        let template = Pad::through_hole("", Point::default(), PIN_PAD, PIN_DRILL);
        for row in 0..variant.rows {
            let array = PadArray {
                start: Point::new(0.0, -f64::from(row) * ROW_PITCH),
                spacing: Point::new(PITCH, 0.0),
                initial: row * variant.pins + 1,
                pin_count: variant.pins,
            };
            fp.extend(array.pads(&template));
        }

        if variant.strain_relief {
            Self::add_strain_relief(&mut fp, &geometry);
        } else {
            fp.append(rect_line(
                &geometry.body,
                SILK_OFFSET,
                Layer::FrontSilkscreen,
                DEFAULT_LINE_WIDTH,
            ));
        }

        fp.append(rect_line(
            &geometry.body,
            COURTYARD_OFFSET,
            Layer::FrontCourtyard,
            COURTYARD_LINE_WIDTH,
        ));
        fp.append(rect_line(
            &geometry.body,
            0.0,
            Layer::FrontFab,
            FAB_LINE_WIDTH,
        ));

        Self::add_inner_drawing(&mut fp, &geometry);
        Self::add_pin1_markers(&mut fp, &geometry);

        fp.append(Text::new(
            TextKind::User,
            "%R",
            Point::new(center_x, geometry.ymid),
            Layer::FrontFab,
        ));

        fp.append(model_for(config, library, &name));

        Ok(fp)
    }

    fn add_strain_relief(fp: &mut Footprint, geometry: &LtekGeometry) {
        let pads = geometry.strain_relief_pads();
        for at in pads {
            fp.append(Pad::through_hole("", at, STRAIN_RELIEF_PAD, STRAIN_RELIEF_DRILL));
        }

        let sx1 = pads[0].x;
        let sx2 = pads[2].x;
        let top = geometry.body.top - SILK_OFFSET;
        let bottom = geometry.body.bottom + SILK_OFFSET;
        let inner_left = sx1 + STRAIN_RELIEF_CLEARANCE;
        let inner_right = sx2 - STRAIN_RELIEF_CLEARANCE;

        fp.append(Line::silk(
            Point::new(inner_left, top),
            Point::new(inner_right, top),
        ));
        fp.append(Line::silk(
            Point::new(inner_left, bottom),
            Point::new(inner_right, bottom),
        ));

        let outer = sx1 - STRAIN_RELIEF_CLEARANCE;
        let edge = geometry.body.left - SILK_OFFSET;
        let end_cap = PolyLine::silk([
            Point::new(outer, bottom),
            Point::new(edge, bottom),
            Point::new(edge, top),
            Point::new(outer, top),
        ]);
        let mirrored = end_cap.mirrored_x(geometry.a / 2.0);
        fp.append(end_cap);
        fp.append(mirrored);
    }

    fn add_inner_drawing(fp: &mut Footprint, geometry: &LtekGeometry) {
        let a = geometry.a;
        let y1 = geometry.body.top;
        let y2 = geometry.body.bottom;

        fp.append(PolyLine::new(
            [
                Point::new(-WALL_X, y1 + WALL),
                Point::new(-WALL_X, 2.5f64.mul_add(-WALL, y2)),
                Point::new(1.5f64.mul_add(WALL, -WALL_X), y2 - WALL),
                Point::new(1.5f64.mul_add(-WALL, a + WALL_X), y2 - WALL),
                Point::new(a + WALL_X, 2.5f64.mul_add(-WALL, y2)),
                Point::new(a + WALL_X, y1 + WALL),
                Point::new(-WALL_X, y1 + WALL),
            ],
            Layer::FrontFab,
            FAB_LINE_WIDTH,
        ));

        let bevel = PolyLine::silk([
            Point::new(-WALL_X + BEVEL_OFFSET, y1 + y2),
            Point::new(-WALL_X + BEVEL_OFFSET, 2.5f64.mul_add(-WALL, y2)),
            Point::new(1.5f64.mul_add(WALL, -WALL_X), y2 - WALL - BEVEL_OFFSET),
            Point::new(a / 2.0, y2 - WALL - BEVEL_OFFSET),
        ]);
        let mirrored = bevel.mirrored_x(a / 2.0);
        fp.append(bevel);
        fp.append(mirrored);
    }

    fn add_pin1_markers(fp: &mut Footprint, geometry: &LtekGeometry) {
        let x = geometry.body.left - MARKER_OFFSET;
        let y = geometry.body.bottom + MARKER_OFFSET;
        fp.append(PolyLine::silk([
            Point::new(x + MARKER_SIZE, y),
            Point::new(x, y),
            Point::new(x, y - MARKER_SIZE),
        ]));

        let m = FAB_MARKER_SIZE;
        fp.append(PolyLine::new(
            [
                Point::new(0.0, FAB_MARKER_Y),
                Point::new(-m, 2.0f64.mul_add(m, FAB_MARKER_Y)),
                Point::new(m, 2.0f64.mul_add(m, FAB_MARKER_Y)),
                Point::new(0.0, FAB_MARKER_Y),
            ],
            Layer::FrontFab,
            FAB_LINE_WIDTH,
        ));
    }
}

/// Rectangle around `body` grown by `offset`. Grown rectangles are snapped
/// outward to the outline grid.
fn rect_line(body: &BodyEdges, offset: f64, layer: Layer, width: f64) -> PolyLine {
    let edges = if offset > 0.0 {
        body.expanded(offset).snapped_outward(OUTLINE_GRID)
    } else {
        *body
    };
    PolyLine::rect(
        Point::new(edges.left, edges.top),
        Point::new(edges.right, edges.bottom),
        layer,
        width,
    )
}

impl FootprintFamily for HarwinLtek {
    fn id(&self) -> &'static str {
        "ltek"
    }

    fn library_name(&self, config: &Config) -> KicadResult<String> {
        library_name(config, SERIES)
    }

    fn footprints(&self, config: &Config) -> KicadResult<Vec<Footprint>> {
        let library = self.library_name(config)?;
        variants()
            .iter()
            .map(|variant| self.footprint(variant, config, &library))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kicad::PadType;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn variant(rows: u32, pins: u32, strain_relief: bool) -> LtekVariant {
        LtekVariant {
            rows,
            pins,
            strain_relief,
        }
    }

    fn build(v: &LtekVariant) -> Footprint {
        HarwinLtek
            .footprint(v, &Config::default(), "Connector_Harwin")
            .unwrap()
    }

    #[test]
    fn variant_table() {
        let all = variants();
        assert_eq!(all.len(), 40);
        assert_eq!(all[0], variant(1, 2, true));
        assert_eq!(all[1], variant(1, 2, false));
        assert_eq!(all[16], variant(2, 2, true));
        assert_eq!(all.last(), Some(&variant(2, 22, false)));
    }

    #[test]
    fn single_row_geometry() {
        let g = LtekGeometry::new(&variant(1, 2, false));
        assert!(approx_eq(g.a, 2.0));
        assert!(approx_eq(g.b, 8.1));
        assert!(approx_eq(g.body.left, -3.05));
        assert!(approx_eq(g.body.right, 5.05));
        assert!(approx_eq(g.ymid, 0.0));
        assert!(approx_eq(g.body.top, -2.0));
        assert!(approx_eq(g.body.bottom, 2.0));
    }

    #[test]
    fn dual_row_geometry() {
        let g = LtekGeometry::new(&variant(2, 5, true));
        assert!(approx_eq(g.a, 8.0));
        assert!(approx_eq(g.ymid, -1.0));
        assert!(approx_eq(g.body.top, -4.0));
        assert!(approx_eq(g.body.bottom, 2.0));
        let pads = g.strain_relief_pads();
        assert!(approx_eq(pads[0].x, -2.25));
        assert!(approx_eq(pads[0].y, -3.375));
        assert!(approx_eq(pads[3].x, 10.25));
        assert!(approx_eq(pads[3].y, 1.375));
    }

    #[test]
    fn names() {
        assert_eq!(
            HarwinLtek::footprint_name(&variant(1, 2, true)).unwrap(),
            "Harwin_LTek-Male_02_P2.00mm_Vertical_StrainRelief"
        );
        assert_eq!(
            HarwinLtek::footprint_name(&variant(2, 13, false)).unwrap(),
            "Harwin_LTek-Male_2x13_P2.00mm_Vertical"
        );
    }

    #[test]
    fn dual_row_pad_numbering() {
        let fp = build(&variant(2, 3, false));
        assert_eq!(fp.pad_numbers(), vec![1, 2, 3, 4, 5, 6]);
        let pin4 = fp.pads().find(|p| p.number == "4").unwrap();
        assert!(approx_eq(pin4.at.x, 0.0));
        assert!(approx_eq(pin4.at.y, -2.0));
        let pin3 = fp.pads().find(|p| p.number == "3").unwrap();
        assert!(approx_eq(pin3.at.x, 4.0));
        assert!(approx_eq(pin3.at.y, 0.0));
    }

    #[test]
    fn strain_relief_pads_are_unnumbered() {
        let fp = build(&variant(1, 4, true));
        assert_eq!(fp.pads().count(), 8);
        let relief: Vec<&Pad> = fp.pads().filter(|p| p.number.is_empty()).collect();
        assert_eq!(relief.len(), 4);
        assert!(relief.iter().all(|p| p.pad_type == PadType::ThruHole));
        assert!(relief
            .iter()
            .all(|p| (p.drill - STRAIN_RELIEF_DRILL).abs() < 1e-9));
        assert!(fp.has_contiguous_pad_numbers());
    }

    #[test]
    fn end_caps_are_mirrored() {
        let fp = build(&variant(1, 2, true));
        let caps: Vec<&PolyLine> = fp
            .polylines()
            .filter(|p| p.layer == Layer::FrontSilkscreen && p.points.len() == 4)
            .filter(|p| approx_eq(p.points[1].x, p.points[2].x))
            .collect();
        assert_eq!(caps.len(), 2);
        assert!(approx_eq(caps[0].points[1].x, -3.15));
        assert!(approx_eq(caps[1].points[1].x, 5.15));
        assert_eq!(fp.lines().count(), 2);
    }

    #[test]
    fn plain_variant_has_closed_silk_outline() {
        let fp = build(&variant(1, 3, false));
        let silk = fp
            .polylines()
            .find(|p| p.layer == Layer::FrontSilkscreen && p.points.len() == 5)
            .unwrap();
        assert!(silk.is_closed());
        assert_eq!(fp.lines().count(), 0);
    }

    #[test]
    fn rectangles_snap_outward() {
        let fp = build(&variant(1, 2, false));
        let courtyard = fp
            .polylines()
            .find(|p| p.layer == Layer::FrontCourtyard)
            .unwrap();
        // Body -3.05..5.05 x -2..2, grown by 0.5.
        assert!(approx_eq(courtyard.points[0].x, -3.55));
        assert!(approx_eq(courtyard.points[0].y, -2.5));
        assert!(approx_eq(courtyard.points[2].x, 5.55));
        assert!(approx_eq(courtyard.points[2].y, 2.5));

        let fab = fp
            .polylines()
            .find(|p| p.layer == Layer::FrontFab && p.points.len() == 5)
            .unwrap();
        assert!(approx_eq(fab.points[0].x, -3.05));
        assert!(approx_eq(fab.points[1].y, 2.0));
    }

    #[test]
    fn outlines_closed() {
        let fp = build(&variant(2, 7, true));
        let courtyard = fp
            .polylines()
            .find(|p| p.layer == Layer::FrontCourtyard)
            .unwrap();
        assert!(courtyard.is_closed());
        assert!(fp
            .polylines()
            .filter(|p| p.layer == Layer::FrontFab)
            .all(PolyLine::is_closed));
    }

    #[test]
    fn texts_and_metadata() {
        let v = variant(2, 4, true);
        let fp = build(&v);
        let reference = fp.texts().find(|t| t.kind == TextKind::Reference).unwrap();
        assert_eq!(reference.text, "REF**");
        assert!(approx_eq(reference.at.x, 3.0));
        assert!(approx_eq(reference.at.y, -5.5));
        let value = fp.texts().find(|t| t.kind == TextKind::Value).unwrap();
        assert_eq!(value.text, fp.name);
        assert!(approx_eq(value.at.y, 4.0));
        let user = fp.texts().find(|t| t.kind == TextKind::User).unwrap();
        assert!(approx_eq(user.at.y, -1.0));

        assert_eq!(
            fp.description,
            "Harwin LTek Connector, 8 pins, single row male, vertical entry, strain relief clip"
        );
        assert_eq!(fp.tags, "connector harwin ltek M80");
        assert_eq!(fp.attribute, crate::kicad::Attribute::ThroughHole);
    }
}
