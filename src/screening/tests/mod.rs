mod common;
mod fraud;
mod metrics;
