use crate::{
    animation::style::StyleValues,
    effects::typewriter::TypewriterPhase,
    foundation::core::ScrollObservation,
    nav::bubble::BubblePosition,
    scatter::choreographer::GlyphStyle,
};

/// Input from the host surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Scroll(ScrollObservation),
    /// Pointer over the menu item of nav section `item`.
    PointerEnter { item: String },
    /// Pointer left a menu item or a tilting card.
    PointerLeave { item: String },
    /// Pointer position over tilting card `item`, in document coordinates.
    PointerMove { item: String, x: f64, y: f64 },
    Paint,
    /// Host clock in milliseconds.
    Tick { now_ms: f64 },
    Mount,
    Unmount,
}

/// Everything the host needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameOutput {
    pub now_ms: f64,
    pub scroll: Option<ScrollObservation>,
    pub page_progress: f64,
    pub sections: Vec<SectionFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<NavFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderFrame>,
    pub glyphs: Vec<GlyphStyle>,
    pub reveals: Vec<RevealFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typewriter: Option<TypewriterFrame>,
    pub tilts: Vec<TiltFrame>,
}

impl FrameOutput {
    pub fn section(&self, id: &str) -> Option<&SectionFrame> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionFrame {
    pub id: String,
    pub progress: f64,
    pub style: StyleValues,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavFrame {
    pub active: Option<String>,
    pub hovered: Option<String>,
    pub bubble: Option<BubblePosition>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeaderFrame {
    pub hidden: bool,
    pub at_top: bool,
    pub style: StyleValues,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealFrame {
    pub target: String,
    pub in_view: bool,
    /// One entry per staggered child, or a single entry for the target.
    pub styles: Vec<StyleValues>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TypewriterFrame {
    pub snippet: usize,
    pub text: String,
    pub cursor_visible: bool,
    pub phase: TypewriterPhase,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TiltFrame {
    pub target: String,
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
}
