//! Pure trail simulation logic for TrailBot.
//!
//! This crate holds the data and arithmetic behind a journey down the trail.
//! Nothing here knows about windows, forms, sessions or transports: functions
//! take plain data plus a random source and return results, so every rule can
//! be unit-tested on its own and driven by any front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`calendar`] | Trail calendar, starting months, day advancement |
//! | [`climate`] | Climate zones and the daily weather roll |
//! | [`entities`] | Inventory items, prices, carry limits |
//! | [`events`] | Random event catalogue, execution, and the event director |
//! | [`hunt`] | Prey generation and shooting for the hunting forms |
//! | [`person`] | Party members, professions, health |
//! | [`river`] | River crossing parameters and crossing choices |
//! | [`scoring`] | Points awarded on arriving in Oregon |
//! | [`store`] | Pending store transactions |
//! | [`toll`] | Toll road cost generation |
//! | [`trade`] | Emigrant trade offers |
//! | [`trail`] | Locations, trail registries, distance bookkeeping |
//! | [`vehicle`] | The wagon: pace, rations, mileage, odometer, status |

pub mod calendar;
pub mod climate;
pub mod entities;
pub mod events;
pub mod hunt;
pub mod person;
pub mod river;
pub mod scoring;
pub mod store;
pub mod toll;
pub mod trade;
pub mod trail;
pub mod vehicle;
