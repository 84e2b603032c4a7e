pub(crate) mod geometry;
pub(crate) mod sampler;
pub(crate) mod viewport;
pub(crate) mod window;
