pub mod google_search;

pub use google_search::*;
