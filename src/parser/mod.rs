pub mod detail;
pub mod dom;
pub mod listing;
pub mod names;

pub use detail::normalize;
pub use listing::index_members;
