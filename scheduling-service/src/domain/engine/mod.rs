//! The constraint model builder and result reducer: calendar → catalog →
//! coverage → variables → constraints → objective → solver → reducer,
//! wired together by [`model::build_and_solve`].

pub mod calendar;
pub mod catalog;
pub mod constraints;
pub mod coverage;
pub mod model;
pub mod objective;
pub mod reducer;
pub mod solver;
pub mod variables;
