pub mod config;
pub mod logging;

pub mod devotional;
pub mod feed;
pub mod fetch;
pub mod locator;
pub mod url_model;
