//! Command implementations

pub mod config;
pub mod create;
pub mod destroy;
pub mod lifecycle;
pub mod list;
pub mod logs;
pub mod status;

use clap::Args;

/// Arguments shared by commands that act on one registered instance.
#[derive(Args)]
pub struct InstanceArgs {
    /// Instance name (`default` for the original instance)
    pub name: String,
}
