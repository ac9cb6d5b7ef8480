pub mod cache;
pub mod coverage_config;
pub mod employee;
pub mod farmacy;
pub mod membership;
pub mod shift_template;
