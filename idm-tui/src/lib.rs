//! IDM console library exports.

pub mod actions;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod keys;
pub mod logging;
pub mod model;
pub mod nav;
pub mod notifications;
pub mod persistence;
pub mod rpc;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
