pub mod default_route;
pub mod docs_route;
pub mod extract_route;
