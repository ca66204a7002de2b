pub mod extraction;
pub mod profile_url;
pub mod search_result;
pub mod structured_profile;

pub use extraction::*;
pub use profile_url::*;
pub use search_result::*;
pub use structured_profile::*;
