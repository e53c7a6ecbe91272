pub mod config;
pub mod geo;
mod header_tools;
pub mod resolver;
pub mod service;
pub mod summary;
#[cfg(test)]
mod test_tools;
mod unavailable;
pub mod uri_tools;
