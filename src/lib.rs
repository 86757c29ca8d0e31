//! splashfx
//!
//! Terminal rendition of the CNJP Input landing page and its real-time
//! effects: a pointer broadcaster feeding a cursor indicator and glowing
//! titles, a character-scramble hero title, a sequential paragraph reveal and a
//! typing simulation.
//!
//! Pure Core / Impure Shell: [`anim`], [`pointer`], [`schedule`] and [`state`]
//! never touch the terminal; [`view`] owns it.

pub mod anim;
pub mod config;
pub mod logging;
pub mod model;
pub mod pointer;
pub mod schedule;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
