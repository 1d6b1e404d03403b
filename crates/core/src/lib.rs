// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverbot core types shared by the bot and the game engine.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod action;
#[cfg(feature = "connection")]
pub mod connection;
pub mod error;
pub mod message;
pub mod poker;
pub mod round_state;

pub use error::Error;
