pub mod config;
pub mod contact;
pub mod escape;
pub mod form;
pub mod geo;
pub mod i18n;
pub mod server;
pub mod sitemap;
