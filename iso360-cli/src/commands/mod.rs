pub(crate) mod analyze;
pub(crate) mod cache;
pub(crate) mod extract;
pub(crate) mod lookup;
