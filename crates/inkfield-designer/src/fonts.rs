//! System font lookup and text measurement.
//!
//! Faces are resolved once per [`FontFamily`] through the system font
//! database and kept for the life of the process. When no face can be
//! loaded at all, measurement falls back to the family's average advance
//! ratio so bounds stay defined on font-less hosts.

use std::collections::HashMap;
use std::fs;
use std::sync::{Mutex, OnceLock};

use fontdb::{Database, FaceInfo, Family, Query, Source, Stretch, Style, Weight};
use inkfield_core::constants::TEXT_LINE_HEIGHT;
use inkfield_core::FontFamily;
use rusttype::{point as rt_point, Font, Scale};

/// Ascent used when no face is available, as a fraction of the size.
const FALLBACK_ASCENT: f64 = 0.8;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        db
    })
}

/// Face used to lay out and draw `family`, if the host has any usable font.
pub fn font_for(family: FontFamily) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontFamily, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&family) {
        return *font;
    }

    let loaded: Option<&'static Font<'static>> =
        load_family(family).map(|font| &*Box::leak(Box::new(font)));
    if loaded.is_none() {
        tracing::warn!(%family, "no usable font face, text uses estimated metrics");
    }
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(family, loaded);
    loaded
}

fn load_family(family: FontFamily) -> Option<Font<'static>> {
    let (generic, monospaced) = match family {
        FontFamily::Code | FontFamily::Minecraft => (Family::Monospace, true),
        FontFamily::Hand => (Family::Cursive, false),
    };
    let families = [Family::Name(family.face_name()), generic, Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    // Generic families map to Windows/macOS names by default, so a bare
    // Linux install may match none of them; any upright face beats a guess.
    let face = match db().query(&query) {
        Some(id) => db().face(id),
        None => {
            let upright = || {
                db().faces()
                    .filter(|face| face.style == Style::Normal && face.weight == Weight::NORMAL)
            };
            upright()
                .find(|face| face.monospaced == monospaced)
                .or_else(|| upright().next())
        }
    }?;
    tracing::debug!(%family, face = ?face.families.first().map(|(name, _)| name.as_str()), "resolved font face");
    load_face(face)
}

fn load_face(face: &FaceInfo) -> Option<Font<'static>> {
    let bytes = match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => fs::read(path).ok()?,
        Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec_and_index(bytes, face.index)
}

/// Vertical metrics of one text line, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f64,
    /// Distance between consecutive baselines.
    pub line_height: f64,
}

/// Line metrics for `size` with `font`, or estimated ones without it.
pub fn line_metrics(font: Option<&Font<'_>>, size: f64) -> LineMetrics {
    let ascent = match font {
        Some(font) => f64::from(font.v_metrics(Scale::uniform(size as f32)).ascent),
        None => size * FALLBACK_ASCENT,
    };
    LineMetrics {
        ascent,
        line_height: size * TEXT_LINE_HEIGHT,
    }
}

/// Advance width of a single line, kerning included.
///
/// Without a face every character advances by the family's average ratio.
pub fn line_width(font: Option<&Font<'_>>, family: FontFamily, size: f64, line: &str) -> f64 {
    let Some(font) = font else {
        return line.chars().count() as f64 * size * family.advance_ratio();
    };
    font.layout(line, Scale::uniform(size as f32), rt_point(0.0, 0.0))
        .last()
        .map(|glyph| {
            f64::from(glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        })
        .unwrap_or(0.0)
}

/// Width and height of a block of lines stacked at the line height.
pub fn measure_lines<'a>(
    font: Option<&Font<'_>>,
    family: FontFamily,
    size: f64,
    lines: impl IntoIterator<Item = &'a str>,
) -> (f64, f64) {
    let metrics = line_metrics(font, size);
    let (count, widest) = lines.into_iter().fold((0usize, 0.0f64), |(n, w), line| {
        (n + 1, w.max(line_width(font, family, size, line)))
    });
    (widest, count as f64 * metrics.line_height)
}
