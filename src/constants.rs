/// Magic number for the encrypted container.
/// "FCF1" = FileCrypt Format v1
// A protocol magic field is `[u8; 4]` so the type itself enforces "exactly
// 4 bytes" and matches the header struct field.
pub const MAGIC_FCF1: [u8; 4] = *b"FCF1";
pub const FORMAT_V1: u8 = 1;

/// Fixed container header size in bytes (magic + version + tag + reserve).
pub const HEADER_LEN: usize = 16;

/// Normalized key length. Every cipher in the catalog takes 32-byte keys.
pub const KEY_LEN: usize = 32;

/// Mask applied when short keys are extended to [`KEY_LEN`] bytes.
pub const KEY_EXTEND_MASK: u8 = 0x5C;

/// Default I/O buffer (also the whole-file threshold for tail reconciliation).
pub const DEFAULT_BUFFER_SIZE: usize = 80 * 1024; // 80 KiB

/// Mode dispatch thresholds on payload length.
pub const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10 MiB
pub const VERY_LARGE_FILE_THRESHOLD: u64 = 1024 * 1024 * 1024; // 1 GiB

/// Fixed segment stride in very-large mode.
pub const SEGMENT_SIZE: u64 = 64 * 1024 * 1024; // 64 MiB

/// Worst-case per-segment ciphertext expansion reserved at pre-allocation.
pub const SEGMENT_SLACK: u64 = 32;

/// Chunk size ladder for the streaming (large) mode, keyed on payload length.
pub const CHUNK_SIZE_HUGE: usize = 4 * 1024 * 1024; //  4 MiB, payload > 1 GiB
pub const CHUNK_SIZE_BIG: usize = 1024 * 1024; //  1 MiB, payload > 100 MiB
pub const CHUNK_SIZE_DEFAULT: usize = 256 * 1024; // 256 KiB, otherwise
pub const CHUNK_LADDER_BIG_THRESHOLD: u64 = 100 * 1024 * 1024;
