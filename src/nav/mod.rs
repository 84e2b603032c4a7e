pub(crate) mod bubble;
pub(crate) mod header;
pub(crate) mod tracker;
