// SPDX-License-Identifier: MPL-2.0
//! `folio_flip` is a portfolio gallery whose tiles flip between a primary
//! image and a description, built with the Iced GUI framework.
//!
//! Opening a tile flips it to its description while the other tiles of its
//! row reveal secondary images and the remaining rows fade. The choreography
//! lives in [`gallery::Orchestrator`]; [`app`] renders it.

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod source;
