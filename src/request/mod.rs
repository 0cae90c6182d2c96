// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request configuration layer
//!
//! Accumulates declarative request intent (params, headers, cookies,
//! file attachments, body) without performing any I/O. The client facade
//! consumes the finished configuration at dispatch time.

mod config;
mod mapping;

pub use config::{Body, ConfigState, RequestConfig, ReusePolicy, DEFAULT_TIMEOUT};
pub use mapping::Mapping;
