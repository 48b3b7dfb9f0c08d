//! Move requests arriving as issue titles, and the comments sent back.

use turn_resolver::{TurnError, TurnOutcome};

/// Extracts the move from an issue title such as `Chess Move: e2e4`.
///
/// Returns `None` when the title does not start with `prefix`, meaning the
/// issue is not a move request at all. Whatever follows the prefix is
/// returned trimmed, even if empty, so a malformed request still gets a reply.
#[must_use]
pub fn parse_title<'a>(title: &'a str, prefix: &str) -> Option<&'a str> {
    title.trim_start().strip_prefix(prefix).map(str::trim)
}

/// The comment explaining why a move was refused.
///
/// Returns `None` for errors that are not the requester's fault.
#[must_use]
pub fn rejection_reply(error: &TurnError, prefix: &str) -> Option<String> {
    match error {
        TurnError::InvalidFormat(_) => Some(format!(
            "Invalid move format. Please use '{} e2e4'.",
            prefix
        )),
        TurnError::IllegalMove(m) => Some(format!("Illegal move: {}. Please try again.", m)),
        TurnError::Store(_) => None,
    }
}

/// Links added under a successful turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyLinks {
    /// Public URL of the board image.
    pub board_image: Option<String>,
    /// Page for picking the next move.
    pub play: Option<String>,
}

/// The comment posted after a resolved turn.
///
/// `cache_bust` is appended to the image URL so GitHub's image proxy
/// fetches the new board.
#[must_use]
pub fn turn_reply(outcome: &TurnOutcome, links: &ReplyLinks, cache_bust: i64) -> String {
    let mut body = format!("Move processed! {}", outcome.summary());
    if let Some(url) = &links.board_image {
        body.push_str(&format!("\n\n![Chess board]({}?t={})", url, cache_bust));
    }
    if let Some(url) = &links.play {
        body.push_str(&format!("\n\n[Make the next move]({})", url));
    }
    body
}
