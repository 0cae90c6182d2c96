// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Body encoding layer
//!
//! Turns accumulated, loosely-typed configuration into exactly one
//! correctly-encoded wire payload: the encoder picks the representation
//! from the declared content-type, the assembler builds multipart
//! uploads from file attachments.

pub mod encoder;
pub mod multipart;

pub use multipart::MultipartBody;
