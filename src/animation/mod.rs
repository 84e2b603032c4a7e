pub(crate) mod ease;
pub(crate) mod reveal;
pub(crate) mod style;
pub(crate) mod track;
