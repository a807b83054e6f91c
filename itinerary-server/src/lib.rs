//! Rail itinerary planner server.
//!
//! Answers: "how do I get from this station to that one, leaving after
//! this time?" over a timetable of scheduled services, and lets the
//! passenger commit to one of the ranked itineraries.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod passengers;
pub mod planner;
pub mod sessions;
pub mod web;
