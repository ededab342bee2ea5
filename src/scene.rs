pub(crate) mod background;
pub(crate) mod celestial;
pub(crate) mod model;
pub(crate) mod objects;
pub(crate) mod solar;
