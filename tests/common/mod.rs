//! Test helpers for building region images

#![allow(dead_code)]

use gw2link::layout::*;

pub const SAMPLE_IDENTITY: &str = r#"{"name":"Foo","profession":1,"race":0,"map_id":15,"world_id":1001,"team_color_id":0,"commander":false,"fov":1.222}"#;

/// Builds a region image the way the producer lays it out
pub struct ImageBuilder {
    image: Vec<u8>,
}

impl ImageBuilder {
    /// Empty (all zero) image
    pub fn empty() -> Self {
        Self {
            image: vec![0u8; LINK_SIZE],
        }
    }

    /// Image with the Guild Wars 2 marker, sample identity and an IPv4 context
    pub fn producer() -> Self {
        Self::empty()
            .version(2)
            .name(PRODUCER_MARKER)
            .identity(SAMPLE_IDENTITY)
            .context(&ipv4_context(24000, [0, 0, 0, 0]))
    }

    pub fn version(mut self, version: u32) -> Self {
        self.put(VERSION_OFFSET, &version.to_le_bytes());
        self
    }

    pub fn tick(mut self, tick: u32) -> Self {
        self.put(TICK_OFFSET, &tick.to_le_bytes());
        self
    }

    pub fn vector(mut self, offset: usize, v: [f32; 3]) -> Self {
        for (i, c) in v.iter().enumerate() {
            self.put(offset + i * 4, &c.to_le_bytes());
        }
        self
    }

    pub fn avatar_position(self, v: [f32; 3]) -> Self {
        self.vector(AVATAR_POSITION_OFFSET, v)
    }

    pub fn name(mut self, text: &str) -> Self {
        self.text(NAME_OFFSET, NAME_UNITS, text);
        self
    }

    pub fn identity(mut self, text: &str) -> Self {
        self.text(IDENTITY_OFFSET, IDENTITY_UNITS, text);
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.text(DESCRIPTION_OFFSET, DESCRIPTION_UNITS, text);
        self
    }

    /// Write the blob and declare its length
    pub fn context(self, blob: &[u8]) -> Self {
        let len = blob.len() as u32;
        self.context_with_len(blob, len)
    }

    pub fn context_with_len(mut self, blob: &[u8], declared: u32) -> Self {
        self.put(CONTEXT_LEN_OFFSET, &declared.to_le_bytes());
        self.image[CONTEXT_OFFSET..CONTEXT_OFFSET + CONTEXT_CAPACITY].fill(0);
        self.put(CONTEXT_OFFSET, blob);
        self
    }

    /// Overwrite arbitrary bytes
    pub fn put(&mut self, offset: usize, bytes: &[u8]) {
        self.image[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn text(&mut self, offset: usize, units: usize, text: &str) {
        let field = &mut self.image[offset..offset + units * 2];
        field.fill(0);
        for (i, unit) in text.encode_utf16().take(units).enumerate() {
            field[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.image
    }

    pub fn build(self) -> [u8; LINK_SIZE] {
        let mut out = [0u8; LINK_SIZE];
        out.copy_from_slice(&self.image);
        out
    }
}

/// 48-byte legacy context: sockaddr_in followed by the five session ids
pub fn ipv4_context(port: u16, ip: [u8; 4]) -> Vec<u8> {
    let mut blob = vec![0u8; 48];
    blob[0..2].copy_from_slice(&2u16.to_le_bytes());
    blob[2..4].copy_from_slice(&port.to_be_bytes());
    blob[4..8].copy_from_slice(&ip);
    blob
}

/// Set map id, map type, shard id, instance and build id
pub fn with_session_ids(mut blob: Vec<u8>, ids: [u32; 5]) -> Vec<u8> {
    for (i, id) in ids.iter().enumerate() {
        blob[28 + i * 4..32 + i * 4].copy_from_slice(&id.to_le_bytes());
    }
    blob
}
