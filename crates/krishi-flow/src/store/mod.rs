//! Location acquisition, store search and on-demand place details.

mod controller;
mod resolver;

pub use controller::StoreResolverController;
pub use resolver::{DetailPhase, ResolverPhase, StoreEffect, StoreEvent, StoreResolver};
