//! Audio I/O boundary
//!
//! The engine does not decode audio or track pitch itself. Those primitives
//! come from a [`SignalProvider`](provider::SignalProvider) implementation;
//! this module defines that contract and the duration-guarded loading built
//! on top of it.

pub mod loader;
pub mod provider;
