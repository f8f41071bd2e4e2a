//! openclaw-manager: runs several isolated OpenClaw gateways side by side
//! under one user's systemd, each in its own podman container.
//!
//! The binary is a thin shell over these modules; tests link against them.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod app;
pub mod application;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod output;
