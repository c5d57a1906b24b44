//! Domain models for Launchpad.
//!
//! # Core Concepts
//!
//! - [`Rocket`]: A vehicle template with a [`RocketRange`] and a passenger capacity.
//! - [`Launch`]: A scheduled flight of one rocket. Its passenger bounds and seat
//!   count are derived from the rocket's capacity at validation time.
//! - [`Customer`]: A contact record keyed by email.
//!
//! Request bodies ([`RocketInput`], [`LaunchInput`], [`CustomerInput`]) are built
//! from [`Field`] values so that one type serves both create and partial update.
//! Rejected requests carry [`ValidationErrors`].

mod customer;
mod field;
mod launch;
mod rocket;
mod validation;

pub use customer::*;
pub use field::*;
pub use launch::*;
pub use rocket::*;
pub use validation::*;
