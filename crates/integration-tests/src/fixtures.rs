//! Ids and media shared by the scenarios.

use std::time::Duration;

/// a 64x64 grayscale baseline jpeg
pub const GRAY_JPEG: &[u8] = include_bytes!("../data/gray-64.jpg");

/// the time the backend takes to fan out follows, blocks and feed updates
pub const FANOUT_SETTLE: Duration = Duration::from_secs(2);

/// a client assigned id for a new post, album, comment, chat or message
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// a username no other test account uses
pub fn new_username() -> String {
    format!("it-{}", uuid::Uuid::new_v4().simple())
}
