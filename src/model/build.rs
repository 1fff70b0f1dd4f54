//
// Build step: RadarInput (host JSON) -> RadarModel (layout-ready geometry)
//
// What this does:
// - Splits the radius into equal ring bands and the circle into equal sectors
// - Derives the blip radius limits of every ring (ring 0 is inset by the
//   sector half-angle so blips cannot drift across the center)
// - Creates one segment per sector × ring with its color and bounds
// - Buckets entries into segments and numbers them sector by sector,
//   ring by ring, in input order within a segment
// - Gives every entry a seeded random starting point inside its segment
//
// Everything is validated before any geometry is produced: a bad input never
// yields a partial model.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use crate::layout::bounds::{clip, random_init};
use crate::layout::geometry::angular_offset_for_radius;
use crate::layout::random::RandomSource;
use super::color::SectorPalette;
use super::input::RadarInput;
use super::types::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The input is not valid JSON for a radar document.
    Malformed(String),
    NoRings,
    NoSectors,
    InvalidDimension { field: &'static str, value: f64 },
    EntryOutOfRange { name: String, sector_id: i64, ring_id: i64 },
    /// The ring is too thin for a blip: its minimum radius exceeds its maximum.
    DegenerateRing { ring: usize, min_radius: f64, max_radius: f64 },
    /// The sector is too narrow for a blip at the ring's inner edge.
    DegenerateSegment { ring: usize, required_angle: f64, sector_span: f64 },
    InvalidColor { context: String, color: String },
}

impl ConfigError {
    /// Short machine-readable tag, used in the JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::Malformed(_) => "malformed",
            ConfigError::NoRings | ConfigError::NoSectors => "configuration",
            ConfigError::InvalidDimension { .. } => "configuration",
            ConfigError::EntryOutOfRange { .. } => "configuration",
            ConfigError::DegenerateRing { .. } | ConfigError::DegenerateSegment { .. } => {
                "numeric_degeneracy"
            }
            ConfigError::InvalidColor { .. } => "configuration",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Malformed(msg) => write!(f, "Malformed radar input: {}", msg),
            ConfigError::NoRings => write!(f, "Radar needs at least one ring"),
            ConfigError::NoSectors => write!(f, "Radar needs at least one sector"),
            ConfigError::InvalidDimension { field, value } => {
                write!(f, "Invalid value {} for '{}'", value, field)
            }
            ConfigError::EntryOutOfRange { name, sector_id, ring_id } => write!(
                f,
                "Entry '{}' references sector {} / ring {} which does not exist",
                name, sector_id, ring_id
            ),
            ConfigError::DegenerateRing { ring, min_radius, max_radius } => write!(
                f,
                "Ring {} is too thin for blips (min radius {:.3} > max radius {:.3})",
                ring, min_radius, max_radius
            ),
            ConfigError::DegenerateSegment { ring, required_angle, sector_span } => write!(
                f,
                "Sectors are too narrow for blips in ring {} (need {:.4} rad, have {:.4} rad)",
                ring, required_angle, sector_span
            ),
            ConfigError::InvalidColor { context, color } => {
                write!(f, "Cannot parse color '{}' of {}", color, context)
            }
        }
    }
}
impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Malformed(e.to_string())
    }
}

/// Parse a host JSON document and build the model.
pub fn build_radar_from_json(input: &str) -> Result<RadarModel, ConfigError> {
    let input: RadarInput = serde_json::from_str(input)?;
    build_radar(&input)
}

pub fn build_radar(input: &RadarInput) -> Result<RadarModel, ConfigError> {
    let config = &input.config;
    let structure = &input.structure;

    check_dimension("radar.renderResolution", config.radar.render_resolution, false)?;
    check_dimension("blip.size", config.blip.size, true)?;
    check_dimension("blip.margin", config.blip.margin, true)?;
    check_dimension("blip.padding", config.blip.padding, true)?;
    check_dimension("segment.colorGradientLimit", config.segment.color_gradient_limit, true)?;

    let ring_count = structure.rings.len();
    let sector_count = structure.sectors.len();
    if ring_count == 0 {
        return Err(ConfigError::NoRings);
    }
    if sector_count == 0 {
        return Err(ConfigError::NoSectors);
    }

    // Bucket entries by segment before anything else so bad references fail fast.
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); ring_count * sector_count];
    for (i, entry) in input.entries.iter().enumerate() {
        let sector = usize::try_from(entry.sector_id).ok().filter(|&s| s < sector_count);
        let ring = usize::try_from(entry.ring_id).ok().filter(|&r| r < ring_count);
        match (sector, ring) {
            (Some(s), Some(r)) => buckets[s * ring_count + r].push(i),
            _ => {
                return Err(ConfigError::EntryOutOfRange {
                    name: entry.name.clone(),
                    sector_id: entry.sector_id,
                    ring_id: entry.ring_id,
                });
            }
        }
    }

    let diameter = config.radar.render_resolution;
    let radius = diameter / 2.0;
    let ring_thickness = radius / ring_count as f64;
    let sector_span = TAU / sector_count as f64;
    let blip_half_size = config.blip.size / 2.0 + config.blip.padding;
    let first_ring_min_radius = first_ring_blip_min_radius(blip_half_size, sector_span);

    let rings = build_rings(input, ring_thickness, blip_half_size, first_ring_min_radius)?;
    check_segment_width(&rings, sector_span, blip_half_size)?;

    let radar_id = config.radar.id.as_str();
    let mut sectors = Vec::with_capacity(sector_count);
    let mut segments = Vec::with_capacity(sector_count * ring_count);

    for (s, sector_input) in structure.sectors.iter().enumerate() {
        let palette = SectorPalette::for_sector(config, &sector_input.color, ring_count)
            .map_err(|color| ConfigError::InvalidColor {
                context: format!("sector '{}'", sector_input.name),
                color,
            })?;
        let id_text = format!("{}_sector{}", radar_id, s);
        let start_angle = sector_span * s as f64;
        // The last sector closes exactly at 2π.
        let end_angle = if s + 1 == sector_count { TAU } else { sector_span * (s + 1) as f64 };

        let mut segment_ids = Vec::with_capacity(ring_count);
        for ring in &rings {
            let sid = SegmentId(segments.len());
            segment_ids.push(sid);
            segments.push(Segment {
                sid,
                sector: SectorId(s),
                ring: ring.index,
                id_text: format!("{}_segment{}", id_text, ring.index.0),
                start_angle,
                end_angle,
                inner_radius: ring.inner_radius,
                outer_radius: ring.outer_radius,
                blip_min_radius: ring.blip_min_radius,
                blip_max_radius: ring.blip_max_radius,
                blip_half_size,
                color: palette.color_at(ring.index.0).to_css(),
                entries: Vec::new(),
            });
        }

        sectors.push(Sector {
            index: SectorId(s),
            name: sector_input.name.clone(),
            color: sector_input.color.clone(),
            id_text,
            start_angle,
            end_angle,
            palette,
            segments: segment_ids,
        });
    }

    let mut rng = RandomSource::new(config.radar.seed);
    let mut entries = Vec::with_capacity(input.entries.len());

    for segment in segments.iter_mut() {
        for &input_index in &buckets[segment.sid.0] {
            let source = &input.entries[input_index];
            let id = EntryId(entries.len() as u32 + 1);
            // Fresh points are uniform over the full span; clipping applies the
            // radius-dependent angular inset.
            let position = clip(segment, random_init(segment, &mut rng));
            segment.entries.push(entries.len());
            entries.push(Entry {
                id,
                id_text: format!("{}_blip{}", segment.id_text, id.0),
                name: source.name.clone(),
                link: source.link.clone(),
                sector: segment.sector,
                ring: segment.ring,
                segment: segment.sid,
                state_id: source.state_id,
                moved: source.moved,
                position,
            });
        }
    }

    tracing::debug!(
        radar = radar_id,
        rings = ring_count,
        sectors = sector_count,
        entries = entries.len(),
        "radar structure built"
    );

    Ok(RadarModel {
        id: config.radar.id.clone(),
        name: config.radar.name.clone(),
        show_name: config.radar.show_name,
        show_sector_names: config.sector.show_name,
        diameter,
        radius,
        ring_thickness,
        sector_span,
        blip_half_size,
        collision_radius: config.blip.size / 2.0 + config.blip.margin,
        default_blip_color: config.blip.default_color.clone(),
        blip_style: BlipStyle::from_size(config.blip.size),
        seed: config.radar.seed,
        rings,
        sectors,
        segments,
        entries,
        entry_states: structure.entry_states.clone(),
        entry_movement: structure.entry_movement.clone(),
    })
}

fn check_dimension(field: &'static str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

/// Inner blip limit of ring 0.
///
/// A blip of half-size `h` touching both borders of a wedge with half-angle
/// `a` sits at distance `h / sin(a)` from the apex. Wedges of a half-circle or
/// wider have no such pinch point; there the plain inset `h` applies.
pub fn first_ring_blip_min_radius(blip_half_size: f64, sector_span: f64) -> f64 {
    let half = sector_span / 2.0;
    if half >= FRAC_PI_2 {
        blip_half_size
    } else {
        blip_half_size / half.sin()
    }
}

fn build_rings(
    input: &RadarInput,
    ring_thickness: f64,
    blip_half_size: f64,
    first_ring_min_radius: f64,
) -> Result<Vec<Ring>, ConfigError> {
    let ring_count = input.structure.rings.len();
    let mut rings = Vec::with_capacity(ring_count);
    for (i, ring) in input.structure.rings.iter().enumerate() {
        let inner_radius = ring_thickness * i as f64;
        let outer_radius = ring_thickness * (i + 1) as f64;
        let blip_min_radius = if i == 0 {
            first_ring_min_radius
        } else {
            inner_radius + blip_half_size
        };
        let blip_max_radius = outer_radius - blip_half_size;
        if blip_min_radius > blip_max_radius {
            return Err(ConfigError::DegenerateRing {
                ring: i,
                min_radius: blip_min_radius,
                max_radius: blip_max_radius,
            });
        }
        rings.push(Ring {
            index: RingId(i),
            name: ring.name.clone(),
            color: ring.color.clone(),
            inner_radius,
            outer_radius,
            blip_min_radius,
            blip_max_radius,
        });
    }
    Ok(rings)
}

/// The angular inset is largest at a ring's minimum radius; if it eats the
/// whole sector there, no legal position exists.
fn check_segment_width(rings: &[Ring], sector_span: f64, blip_half_size: f64) -> Result<(), ConfigError> {
    for ring in rings {
        let required_angle = 2.0 * angular_offset_for_radius(ring.blip_min_radius, blip_half_size);
        if required_angle > sector_span {
            return Err(ConfigError::DegenerateSegment {
                ring: ring.index.0,
                required_angle,
                sector_span,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::bounds::{angle_bounds, contains};
    use crate::layout::geometry::to_polar;
    use crate::model::input::{EntryInput, NamedColor};
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn named(name: &str, color: &str) -> NamedColor {
        NamedColor { name: name.to_string(), color: color.to_string() }
    }

    fn entry(name: &str, sector_id: i64, ring_id: i64) -> EntryInput {
        EntryInput {
            name: name.to_string(),
            link: format!("https://example.com/{}", name),
            sector_id,
            ring_id,
            state_id: 0,
            moved: 0,
        }
    }

    fn make_input(sectors: usize, rings: usize, entries: Vec<EntryInput>) -> RadarInput {
        let mut input = RadarInput::default();
        input.config.radar.id = "r".to_string();
        input.config.radar.render_resolution = 800.0;
        input.config.blip.size = 16.0;
        input.config.blip.padding = 2.0;
        input.structure.rings = (0..rings).map(|i| named(&format!("ring{}", i), "#ffffff")).collect();
        input.structure.sectors = (0..sectors).map(|i| named(&format!("sector{}", i), "#336699")).collect();
        input.structure.entry_states = vec![named("new", "#00ff00"), named("old", "#0000ff")];
        input.entries = entries;
        input
    }

    #[test]
    fn test_sector_partition_is_exhaustive() {
        for count in 1..=9 {
            let model = build_radar(&make_input(count, 2, vec![])).unwrap();
            assert_eq!(model.sectors[0].start_angle, 0.0);
            assert_eq!(model.sectors[count - 1].end_angle, TAU);
            for w in model.sectors.windows(2) {
                assert_eq!(w[0].end_angle, w[1].start_angle);
                assert!(w[0].end_angle > w[0].start_angle);
            }
        }
    }

    #[test]
    fn test_rings_are_contiguous_and_increasing() {
        let model = build_radar(&make_input(4, 5, vec![])).unwrap();
        assert_eq!(model.rings[0].inner_radius, 0.0);
        assert!((model.rings[4].outer_radius - 400.0).abs() < EPS);
        for w in model.rings.windows(2) {
            assert_eq!(w[0].outer_radius, w[1].inner_radius);
            assert!(w[1].outer_radius > w[0].outer_radius);
        }
        for ring in &model.rings[1..] {
            assert!((ring.blip_min_radius - (ring.inner_radius + 10.0)).abs() < EPS);
            assert!((ring.blip_max_radius - (ring.outer_radius - 10.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_first_ring_uses_sector_half_angle() {
        let model = build_radar(&make_input(4, 4, vec![])).unwrap();
        let expected = 10.0 / (PI / 4.0).sin();
        assert!((model.rings[0].blip_min_radius - expected).abs() < EPS);
        assert_eq!(first_ring_blip_min_radius(10.0, TAU), 10.0);
        assert_eq!(first_ring_blip_min_radius(10.0, PI), 10.0);
    }

    #[test]
    fn test_single_entry_in_first_segment() {
        let model = build_radar(&make_input(4, 4, vec![entry("a", 0, 0)])).unwrap();
        let e = &model.entries[0];
        let polar = to_polar(e.position);
        let ring0 = &model.rings[0];

        assert!(polar.angle >= 0.0 && polar.angle <= PI / 2.0);
        let (min_angle, max_angle) = angle_bounds(model.segment_of(e), polar.radius);
        assert!(polar.angle >= min_angle - EPS && polar.angle <= max_angle + EPS);
        assert!(polar.radius >= ring0.blip_min_radius - EPS);
        assert!(polar.radius <= ring0.outer_radius - model.blip_half_size + EPS);
    }

    #[test]
    fn test_ids_are_sequential_sector_major() {
        let entries = vec![
            entry("late", 1, 0),
            entry("outer", 0, 2),
            entry("first", 0, 0),
            entry("second", 0, 0),
        ];
        let model = build_radar(&make_input(2, 3, entries)).unwrap();
        let names: Vec<&str> = model.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "outer", "late"]);
        let ids: Vec<u32> = model.entries.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(model.entries[2].id_text, "r_sector0_segment2_blip3");
        assert_eq!(model.entries[3].id_text, "r_sector1_segment0_blip4");

        let seg = model.segment(model.segment_id(SectorId(0), RingId(0)));
        assert_eq!(seg.entries, vec![0, 1]);
        assert_eq!(seg.id_text, "r_sector0_segment0");
    }

    #[test]
    fn test_build_is_deterministic() {
        let entries: Vec<EntryInput> = (0..30).map(|i| entry(&format!("e{}", i), i % 4, (i / 4) % 3)).collect();
        let a = build_radar(&make_input(4, 3, entries.clone())).unwrap();
        let b = build_radar(&make_input(4, 3, entries)).unwrap();
        for (ea, eb) in a.entries.iter().zip(&b.entries) {
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.position.x.to_bits(), eb.position.x.to_bits());
            assert_eq!(ea.position.y.to_bits(), eb.position.y.to_bits());
        }
    }

    #[test]
    fn test_seed_changes_positions() {
        let mut input = make_input(4, 3, vec![entry("a", 1, 1)]);
        let a = build_radar(&input).unwrap();
        input.config.radar.seed = 1234;
        let b = build_radar(&input).unwrap();
        assert_ne!(a.entries[0].position, b.entries[0].position);
    }

    #[test]
    fn test_initial_positions_in_bounds() {
        let entries: Vec<EntryInput> = (0..60).map(|i| entry(&format!("e{}", i), i % 6, i % 4)).collect();
        let model = build_radar(&make_input(6, 4, entries)).unwrap();
        for e in &model.entries {
            assert!(contains(model.segment_of(e), e.position, 1e-9), "{}", e.id_text);
        }
    }

    #[test]
    fn test_unknown_state_uses_default_color() {
        let mut input = make_input(2, 2, vec![entry("a", 0, 0), entry("b", 0, 1), entry("c", 1, 1)]);
        input.config.blip.default_color = "#abcdef".to_string();
        input.entries[1].state_id = 7;
        input.entries[2].state_id = -1;
        let model = build_radar(&input).unwrap();
        assert_eq!(model.entry_color(&model.entries[0]), "#00ff00");
        assert_eq!(model.entry_color(&model.entries[1]), "#abcdef");
        assert_eq!(model.entry_color(&model.entries[2]), "#abcdef");
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(build_radar(&make_input(3, 0, vec![])).unwrap_err(), ConfigError::NoRings);
        assert_eq!(build_radar(&make_input(0, 3, vec![])).unwrap_err(), ConfigError::NoSectors);

        let err = build_radar(&make_input(3, 3, vec![entry("x", 3, 0)])).unwrap_err();
        assert!(matches!(err, ConfigError::EntryOutOfRange { sector_id: 3, .. }));
        let err = build_radar(&make_input(3, 3, vec![entry("x", 0, -1)])).unwrap_err();
        assert!(matches!(err, ConfigError::EntryOutOfRange { ring_id: -1, .. }));
        assert_eq!(err.kind(), "configuration");

        let mut input = make_input(3, 3, vec![]);
        input.config.radar.render_resolution = 0.0;
        assert!(matches!(
            build_radar(&input).unwrap_err(),
            ConfigError::InvalidDimension { field: "radar.renderResolution", .. }
        ));
    }

    #[test]
    fn test_too_many_rings_is_degenerate() {
        let err = build_radar(&make_input(4, 50, vec![])).unwrap_err();
        assert!(matches!(err, ConfigError::DegenerateRing { .. }));
        assert_eq!(err.kind(), "numeric_degeneracy");
    }

    #[test]
    fn test_too_many_sectors_is_degenerate() {
        // 400 sectors: span ≈ 0.0157 rad, ring 1 starts at radius 200 + 10,
        // needing 2·atan(10/210) ≈ 0.095 rad.
        let err = build_radar(&make_input(400, 2, vec![])).unwrap_err();
        assert!(matches!(err, ConfigError::DegenerateSegment { ring: 1, .. }
            | ConfigError::DegenerateRing { ring: 0, .. }));
    }

    #[test]
    fn test_segment_colors_follow_palette() {
        let mut input = make_input(2, 3, vec![]);
        input.config.sector.use_color = true;
        input.config.segment.color_gradient = false;
        let model = build_radar(&input).unwrap();
        assert!(model.segments.iter().all(|s| s.color == "rgb(51, 102, 153)"));

        input.structure.sectors[1].color = "bogus".to_string();
        assert!(matches!(build_radar(&input).unwrap_err(), ConfigError::InvalidColor { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = build_radar_from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
        assert_eq!(err.kind(), "malformed");
    }
}
