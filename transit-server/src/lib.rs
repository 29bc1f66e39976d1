//! Transit schedule server.
//!
//! Projects a municipal bus route's published timetable (first and last
//! departure, headway, per-stop travel offsets) onto the arrivals a rider
//! will see at each stop, and picks the stop nearest the rider.

pub mod cache;
pub mod config;
pub mod domain;
pub mod schedule;
pub mod store;
pub mod web;
