use crate::{
    foundation::core::Rect,
    runtime::scheduler::{ScheduledTask, Scheduler, TaskId},
    scroll::geometry::{GeometrySource, measured},
};

/// Bubble placement relative to the menu group's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BubblePosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BubblePosition {
    fn relative(item: Rect, group: Rect) -> Self {
        Self {
            x: item.x0 - group.x0,
            y: item.y0 - group.y0,
            width: item.width(),
            height: item.height(),
        }
    }
}

/// Highlight pill that slides under the current navigation target.
///
/// Measurement happens on the next paint so the host has applied layout. Retargeting again
/// before that paint replaces the pending measurement.
#[derive(Debug)]
pub struct BubbleIndicator {
    group: String,
    target: Option<String>,
    pending: Option<ScheduledTask>,
    position: Option<BubblePosition>,
}

impl BubbleIndicator {
    /// `group` is the geometry id of the element the bubble is positioned within.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            target: None,
            pending: None,
            position: None,
        }
    }

    /// Geometry id of the item the bubble is heading for.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn position(&self) -> Option<BubblePosition> {
        self.position
    }

    pub fn has_pending_measurement(&self) -> bool {
        self.pending.as_ref().is_some_and(ScheduledTask::is_pending)
    }

    /// Point the bubble at `item`, measuring on the next paint.
    ///
    /// Retargeting the same item is a no-op once it has been measured or while a measurement
    /// is pending; an unmeasured target asks for another paint.
    pub fn retarget(&mut self, item: Option<&str>, scheduler: &Scheduler) {
        if self.target.as_deref() == item
            && (self.has_pending_measurement() || self.position.is_some() || item.is_none())
        {
            return;
        }
        self.target = item.map(str::to_owned);
        // Replacing the guard cancels a superseded measurement.
        self.pending = Some(scheduler.request_paint());
    }

    /// Measure if our pending paint task fired. Returns whether the position changed.
    pub fn on_paint(&mut self, fired: &[TaskId], geometry: &dyn GeometrySource) -> bool {
        if !self.pending.as_ref().is_some_and(|t| t.fired_in(fired)) {
            return false;
        }
        self.pending = None;

        let Some(item) = self.target.as_deref() else {
            let changed = self.position.is_some();
            self.position = None;
            return changed;
        };
        let rects = measured(geometry.rect(item)).zip(measured(geometry.rect(&self.group)));
        let Some((item_rect, group_rect)) = rects else {
            tracing::trace!(item, "bubble target not measurable; keeping last position");
            return false;
        };
        let next = BubblePosition::relative(item_rect, group_rect);
        let changed = self.position != Some(next);
        self.position = Some(next);
        changed
    }

    /// Drop any pending measurement.
    pub fn teardown(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/bubble.rs"]
mod tests;
