//! Application core — door logic behind port traits.
//!
//! [`controller`] composes the state resolver, transition tracker, operator
//! and relay into the two calls the bridge uses.  [`service`] owns a
//! controller and serializes polls and commands on one loop.  All
//! interaction with hardware happens through the traits in [`ports`].

pub mod channels;
pub mod commands;
pub mod controller;
pub mod events;
pub mod ports;
pub mod service;
