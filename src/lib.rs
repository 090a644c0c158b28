//! Client core for the GPU lab portal: session handling, catalog loading,
//! request and change-request drafting, and admin review over the portal's
//! REST API.

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
