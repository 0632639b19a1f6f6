pub(crate) mod find;
pub(crate) mod meta;
pub(crate) mod raw;
pub(crate) mod shared;
