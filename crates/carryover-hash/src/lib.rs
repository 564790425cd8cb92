//! Line and block content fingerprints for carryover.
//!
//! A [`LineHashSequence`] holds one whitespace-insensitive fingerprint per
//! source line. A [`BlockHashSequence`] fingerprints, for each line, the
//! window of line hashes around it, so a block of code can be recognised
//! after it moved.
//!
//! All fingerprints are domain-separated BLAKE3 digests (see [`LineHasher`]).

pub mod block;
pub mod hasher;
pub mod line;

pub use block::{BlockHash, BlockHashSequence};
pub use hasher::LineHasher;
pub use line::LineHashSequence;
