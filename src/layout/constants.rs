//! Constants and field table for the positional link layout

/// Name of the shared mapping the game client publishes
pub const LINK_NAME: &str = "MumbleLink";

/// Value of the name field when Guild Wars 2 is the producer
pub const PRODUCER_MARKER: &str = "Guild Wars 2";

/// Width of one UTF-16 code unit
pub const WCHAR_SIZE: usize = 2;

/// Width of a 3 x f32 vector
pub const VECTOR_SIZE: usize = 3 * 4;

/// Capacity of the name field in UTF-16 units
pub const NAME_UNITS: usize = 256;

/// Capacity of the identity field in UTF-16 units
pub const IDENTITY_UNITS: usize = 256;

/// Capacity of the context blob in bytes
pub const CONTEXT_CAPACITY: usize = 256;

/// Capacity of the description field in UTF-16 units
pub const DESCRIPTION_UNITS: usize = 2048;

pub const VERSION_OFFSET: usize = 0;
pub const TICK_OFFSET: usize = VERSION_OFFSET + 4;
pub const AVATAR_POSITION_OFFSET: usize = TICK_OFFSET + 4;
pub const AVATAR_FRONT_OFFSET: usize = AVATAR_POSITION_OFFSET + VECTOR_SIZE;
pub const AVATAR_TOP_OFFSET: usize = AVATAR_FRONT_OFFSET + VECTOR_SIZE;
pub const NAME_OFFSET: usize = AVATAR_TOP_OFFSET + VECTOR_SIZE;
pub const CAMERA_POSITION_OFFSET: usize = NAME_OFFSET + NAME_UNITS * WCHAR_SIZE;
pub const CAMERA_FRONT_OFFSET: usize = CAMERA_POSITION_OFFSET + VECTOR_SIZE;
pub const CAMERA_TOP_OFFSET: usize = CAMERA_FRONT_OFFSET + VECTOR_SIZE;
pub const IDENTITY_OFFSET: usize = CAMERA_TOP_OFFSET + VECTOR_SIZE;
pub const CONTEXT_LEN_OFFSET: usize = IDENTITY_OFFSET + IDENTITY_UNITS * WCHAR_SIZE;
pub const CONTEXT_OFFSET: usize = CONTEXT_LEN_OFFSET + 4;
pub const DESCRIPTION_OFFSET: usize = CONTEXT_OFFSET + CONTEXT_CAPACITY;

/// Total size of the region. Producer and consumer agree on it out of band.
pub const LINK_SIZE: usize = DESCRIPTION_OFFSET + DESCRIPTION_UNITS * WCHAR_SIZE;

const _: () = assert!(LINK_SIZE == 5460);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_offsets() {
        assert_eq!(NAME_OFFSET, 44);
        assert_eq!(CAMERA_POSITION_OFFSET, 556);
        assert_eq!(IDENTITY_OFFSET, 592);
        assert_eq!(CONTEXT_LEN_OFFSET, 1104);
        assert_eq!(CONTEXT_OFFSET, 1108);
        assert_eq!(DESCRIPTION_OFFSET, 1364);
        assert_eq!(LINK_SIZE, 5460);
    }
}
