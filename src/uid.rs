//! Metadata UID generation
//!
//! Metadata UIDs are 11 characters: a letter followed by ten letters or
//! digits. Generation sits behind [`UidGenerator`] so callers can supply
//! their own source (a server-side id endpoint, a fixed sequence in tests).

use uuid::Uuid;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a metadata UID
pub const UID_LENGTH: usize = 11;

/// Source of fresh metadata UIDs
pub trait UidGenerator {
    fn next_uid(&mut self) -> String;
}

impl<F: FnMut() -> String> UidGenerator for F {
    fn next_uid(&mut self) -> String {
        self()
    }
}

/// Random UIDs drawn from UUIDv4 bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUidGenerator;

impl RandomUidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl UidGenerator for RandomUidGenerator {
    fn next_uid(&mut self) -> String {
        let bytes = Uuid::new_v4().into_bytes();
        let mut uid = String::with_capacity(UID_LENGTH);
        uid.push(LETTERS[bytes[0] as usize % LETTERS.len()] as char);
        for byte in &bytes[1..UID_LENGTH] {
            uid.push(ALPHANUMERIC[*byte as usize % ALPHANUMERIC.len()] as char);
        }
        uid
    }
}

/// Deterministic UIDs (`u0000000001`, `u0000000002`, ...)
#[derive(Debug, Clone)]
pub struct SequenceUidGenerator {
    prefix: char,
    next: u64,
}

impl SequenceUidGenerator {
    /// `prefix` must be an ASCII letter for the result to be a valid UID
    pub fn new(prefix: char) -> Self {
        Self { prefix, next: 1 }
    }
}

impl Default for SequenceUidGenerator {
    fn default() -> Self {
        Self::new('u')
    }
}

impl UidGenerator for SequenceUidGenerator {
    fn next_uid(&mut self) -> String {
        let uid = format!("{}{:010}", self.prefix, self.next);
        self.next += 1;
        uid
    }
}
