pub(crate) mod none;
pub(crate) mod strategy;
pub(crate) mod tail;
pub(crate) mod wake;
