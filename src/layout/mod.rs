//! Fixed binary layout of the positional link region
//!
//! The region is a flat little-endian record:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐  offset
//! │ ui_version: u32 │ ui_tick: u32                 │  0
//! │ avatar position / front / top: 3 x [f32; 3]    │  8
//! │ name: [u16; 256]   (producer marker)           │  44
//! │ camera position / front / top: 3 x [f32; 3]    │  556
//! │ identity: [u16; 256]   (JSON)                  │  592
//! │ context_len: u32                               │  1104
//! │ context: [u8; 256]   (sockaddr + session ids)  │  1108
//! │ description: [u16; 2048]                       │  1364
//! └────────────────────────────────────────────────┘  5460
//! ```
//!
//! Offsets are constants; the only content-dependent bound is the NUL
//! search inside each text field, which stops at the field width.

pub mod constants;
pub mod fields;
pub mod text;
pub(crate) mod wire;

pub use constants::*;
pub use fields::{RawFields, Vector3};
pub use text::Utf16Field;
