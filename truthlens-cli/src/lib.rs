//! TruthLens CLI - submit text to the gateway and print the analysis.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod client;
pub mod render;

pub use client::{ClientConfig, ClientError, GatewayClient, DEFAULT_ENDPOINT};
pub use render::{submit_and_render, Rendered};
