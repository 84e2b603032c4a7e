pub(crate) mod tilt;
pub(crate) mod typewriter;
