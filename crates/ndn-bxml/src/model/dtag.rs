//! Dictionary-tag numbers.
//!
//! A dictionary tag is a small integer standing in for a named element, so
//! the wire format never carries textual element names. The numbers are
//! fixed by the ccnb dictionary and shared by every implementation; this is
//! the subset the name codec and the packet helpers use.

pub const NAME: u64 = 14;
pub const COMPONENT: u64 = 15;
pub const CONTENT: u64 = 19;
pub const SIGNED_INFO: u64 = 20;
pub const INTEREST: u64 = 26;
pub const KEY: u64 = 27;
pub const KEY_LOCATOR: u64 = 28;
pub const KEY_NAME: u64 = 29;
pub const TIMESTAMP: u64 = 39;
pub const NONCE: u64 = 41;
pub const SCOPE: u64 = 42;
pub const INTEREST_LIFETIME: u64 = 48;
pub const FRESHNESS_SECONDS: u64 = 58;
pub const FINAL_BLOCK_ID: u64 = 59;
pub const CONTENT_OBJECT: u64 = 64;
