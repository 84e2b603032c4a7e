pub(crate) mod assignment;
pub(crate) mod choreographer;
