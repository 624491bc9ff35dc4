#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::correctness)]
#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod config;
pub mod icy;
pub mod poll;
pub mod sink;
pub mod station;
pub mod transport;

#[macro_use]
extern crate log;
