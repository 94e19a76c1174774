use std::str::FromStr;

use crate::{
    foundation::error::{MotionError, MotionResult},
    foundation::math,
};

/// Progress through `[start, end]`, clamped to `[0, 1]`. Never extrapolates.
pub fn scroll_progress(start: f64, end: f64, scroll: f64) -> MotionResult<f64> {
    let span = end - start;
    if span <= 0.0 {
        return Err(MotionError::degenerate(format!(
            "scroll region [{start}, {end}] is empty"
        )));
    }
    math::ratio(scroll - start, span)
        .map(math::clamp01)
        .ok_or_else(|| MotionError::degenerate("scroll offset is not finite"))
}

/// Translation keeping a pinned element in place while the region scrolls past.
pub fn pin_offset(start: f64, end: f64, scroll: f64) -> f64 {
    (scroll - start).clamp(0.0, (end - start).max(0.0))
}

/// A position along an element's or the viewport's vertical extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Px(f64),
    Percent(f64),
}

impl Edge {
    fn offset_within(self, extent: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent / 2.0,
            Self::Bottom => extent,
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl FromStr for Edge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "top" => return Ok(Self::Top),
            "center" => return Ok(Self::Center),
            "bottom" => return Ok(Self::Bottom),
            _ => {}
        }
        let parse = |num: &str| {
            num.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MotionError::configuration(format!("unrecognized edge '{s}'")))
        };
        if let Some(pct) = s.strip_suffix('%') {
            return parse(pct).map(Self::Percent);
        }
        parse(s.strip_suffix("px").unwrap_or(s)).map(Self::Px)
    }
}

/// `"<element edge> <viewport edge>"`: the region boundary is reached when the element edge
/// meets the viewport edge, e.g. `"top center"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMarker {
    pub element: Edge,
    pub viewport: Edge,
}

impl FromStr for ScrollMarker {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let element = parts
            .next()
            .ok_or_else(|| MotionError::configuration("empty scroll marker"))?
            .parse()?;
        let viewport = match parts.next() {
            Some(v) => v.parse()?,
            None => Edge::Top,
        };
        if parts.next().is_some() {
            return Err(MotionError::configuration(format!(
                "scroll marker '{s}' has more than two parts"
            )));
        }
        Ok(Self { element, viewport })
    }
}

/// End of a region: another marker, or a distance past the start (`"+=800"`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionEnd {
    Marker(ScrollMarker),
    Relative(f64),
}

impl FromStr for RegionEnd {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(rest) = s.strip_prefix("+=") else {
            return s.parse().map(Self::Marker);
        };
        // A trailing viewport edge ("+=800 center") does not move a relative end.
        let distance = rest.split_whitespace().next().unwrap_or_default();
        distance
            .strip_suffix("px")
            .unwrap_or(distance)
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(Self::Relative)
            .ok_or_else(|| MotionError::configuration(format!("bad relative end '{s}'")))
    }
}

/// Geometry needed to turn markers into scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionGeometry {
    /// Element top in document coordinates.
    pub element_top: f64,
    pub element_height: f64,
    pub viewport_height: f64,
}

impl RegionGeometry {
    fn offset_for(&self, marker: ScrollMarker) -> f64 {
        self.element_top + marker.element.offset_within(self.element_height)
            - marker.viewport.offset_within(self.viewport_height)
    }

    /// Resolve `start`/`end` markers into `(start, end)` scroll offsets.
    pub fn resolve(&self, start: ScrollMarker, end: RegionEnd) -> MotionResult<(f64, f64)> {
        let s = self.offset_for(start);
        let e = match end {
            RegionEnd::Marker(m) => self.offset_for(m),
            RegionEnd::Relative(d) => s + d,
        };
        if !(s.is_finite() && e.is_finite()) || e <= s {
            return Err(MotionError::configuration(format!(
                "markers resolve to an empty region [{s}, {e}]"
            )));
        }
        Ok((s, e))
    }

    pub fn resolve_str(&self, start: &str, end: &str) -> MotionResult<(f64, f64)> {
        self.resolve(start.parse()?, end.parse()?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/scroll.rs"]
mod tests;
