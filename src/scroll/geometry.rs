use std::collections::BTreeMap;

use crate::foundation::core::Rect;

/// Host-side element measurement, in document coordinates.
///
/// Returning `None` means "not mounted / not measurable yet"; callers degrade instead of failing.
pub trait GeometrySource {
    fn rect(&self, id: &str) -> Option<Rect>;
}

/// Fixed geometry table, used by the CLI and tests.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StaticGeometry {
    rects: BTreeMap<String, Rect>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.insert(id, rect);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.rects.insert(id.into(), rect);
    }

    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        self.rects.remove(id)
    }
}

impl GeometrySource for StaticGeometry {
    fn rect(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }
}

/// Geometry source that never measures anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGeometry;

impl GeometrySource for NoGeometry {
    fn rect(&self, _id: &str) -> Option<Rect> {
        None
    }
}

/// Usable measurement: finite with non-negative size.
pub(crate) fn measured(rect: Option<Rect>) -> Option<Rect> {
    let r = rect?;
    let finite = [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
    if finite && r.x1 >= r.x0 && r.y1 >= r.y0 {
        Some(r)
    } else {
        None
    }
}
