//! Marker-delimited block replacement in the README.
//!
//! A block is everything from a start marker through its end marker. The
//! replacement text carries its own markers so the next run finds them
//! again. Documents without both markers are left alone.

use std::io::ErrorKind;
use std::path::Path;

use turn_resolver::Stats;

/// Marker opening the chess stats block.
pub const CHESS_START: &str = "<!-- CHESS_STATS_START -->";
/// Marker closing the chess stats block.
pub const CHESS_END: &str = "<!-- CHESS_STATS_END -->";

/// What happened to the README.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadmeUpdate {
    /// The block was replaced and the file rewritten.
    Updated,
    /// The block already had the new content.
    Unchanged,
    /// There is no README.
    MissingFile,
    /// The README has no complete marker pair.
    MissingMarkers,
}

/// Replaces the first `start`..`end` block of `doc` with `block`.
///
/// Returns `None` if `start` is missing or is not followed by `end`.
#[must_use]
pub fn splice(doc: &str, start: &str, end: &str, block: &str) -> Option<String> {
    let from = doc.find(start)?;
    let to = from + start.len() + doc[from + start.len()..].find(end)? + end.len();

    let mut out = String::with_capacity(doc.len() - (to - from) + block.len());
    out.push_str(&doc[..from]);
    out.push_str(block);
    out.push_str(&doc[to..]);
    Some(out)
}

/// Replaces a marker block in the file at `path`.
///
/// # Errors
///
/// Returns an I/O error if the README exists but cannot be read or written.
pub fn update_file(
    path: &Path,
    start: &str,
    end: &str,
    block: &str,
) -> std::io::Result<ReadmeUpdate> {
    let doc = match std::fs::read_to_string(path) {
        Ok(doc) => doc,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No README at {}, skipping update", path.display());
            return Ok(ReadmeUpdate::MissingFile);
        }
        Err(e) => return Err(e),
    };

    let Some(updated) = splice(&doc, start, end, block) else {
        tracing::warn!(
            "Markers {} / {} not found in {}, skipping update",
            start,
            end,
            path.display()
        );
        return Ok(ReadmeUpdate::MissingMarkers);
    };

    if updated == doc {
        return Ok(ReadmeUpdate::Unchanged);
    }

    std::fs::write(path, updated)?;
    tracing::info!("Updated {}", path.display());
    Ok(ReadmeUpdate::Updated)
}

/// The chess stats block, markers included.
#[must_use]
pub fn chess_block(stats: &Stats, last_move: &str) -> String {
    format!(
        "{CHESS_START}\n\
         **Community Wins**: {} 🏆 | **Bot Wins**: {} 🤖 | **Draws**: {} 🤝\n\
         *Last Move*: {}\n\
         {CHESS_END}",
        stats.community_wins, stats.bot_wins, stats.draws, last_move
    )
}
