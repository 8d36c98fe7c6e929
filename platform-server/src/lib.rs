//! Platform carriage locator server.
//!
//! A web application that answers: "where along this platform will each
//! carriage of the next train stop?" It combines OpenStreetMap platform
//! markers and stop signals with iRail departure boards and train
//! compositions.

pub mod cache;
pub mod domain;
pub mod irail;
pub mod locate;
pub mod overpass;
pub mod snapshot;
pub mod web;
