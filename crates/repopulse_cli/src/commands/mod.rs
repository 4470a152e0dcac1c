pub(crate) mod database;
pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod output;

#[cfg(feature = "github")]
pub(crate) mod sync;
