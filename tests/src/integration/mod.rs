//! Integration flows exercising the whole pipeline end to end.

pub mod e2e_deployment;
pub mod failure_modes;
