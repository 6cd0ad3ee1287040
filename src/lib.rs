// Suzaku CDN Edge Image Transformer Library

pub mod config;
pub mod constants;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod handler;
pub mod logging;
pub mod metrics;
pub mod storage;
pub mod transform;
