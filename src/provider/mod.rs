mod banidb;
mod traits;
mod wire;

#[cfg(test)]
pub(crate) mod stub;

pub use banidb::BaniDbProvider;
pub use traits::{ContentProvider, VerseDetail, VerseRef};
