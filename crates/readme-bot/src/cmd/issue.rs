use chrono::Utc;
use turn_resolver::{JsonFileStore, TurnOutcome};

use crate::cmd::{publish, resolver};
use crate::config::BotConfig;
use crate::github::{self, GitHubConfig, Notifier};
use crate::issue::{parse_title, rejection_reply, turn_reply, ReplyLinks};

/// What became of an issue.
#[derive(Debug)]
pub enum IssueResult {
    /// The title is not a move request.
    Ignored,
    /// The move was refused; carries the reply that was posted.
    Rejected(String),
    /// The move was played.
    Played(Box<TurnOutcome>),
}

/// Handles an issue opened with a move request in its title.
///
/// Refused moves are answered on the issue and are not errors. Failing to
/// reach GitHub is logged and does not undo a played turn. A played turn
/// that cannot be published is still answered, then reported as an error.
pub fn run(config: &BotConfig, github: &GitHubConfig, title: &str) -> anyhow::Result<IssueResult> {
    let Some(mv) = parse_title(title, &config.issue_prefix) else {
        tracing::info!("Issue '{}' is not a move request, ignoring", title);
        return Ok(IssueResult::Ignored);
    };

    let notifier = github::notifier(github);
    let store = JsonFileStore::new(&config.state_path);

    let outcome = match resolver(config).play(&store, mv) {
        Ok(outcome) => outcome,
        Err(e) => match rejection_reply(&e, &config.issue_prefix) {
            Some(reply) => {
                tracing::info!("Rejected move '{}': {}", mv, e);
                reply_and_close(notifier.as_ref(), &reply);
                return Ok(IssueResult::Rejected(reply));
            }
            None => return Err(e.into()),
        },
    };

    // The turn is already saved, so the issue is answered either way
    let published = publish(config, &outcome);
    let mut body = turn_reply(&outcome, &links(config, github), Utc::now().timestamp());
    if let Err(e) = &published {
        tracing::error!("Turn saved but not published: {:#}", e);
        body.push_str(PUBLISH_FAILED);
    }
    reply_and_close(notifier.as_ref(), &body);

    published?;
    Ok(IssueResult::Played(Box::new(outcome)))
}

const PUBLISH_FAILED: &str =
    "\n\nThe move was saved, but the board image and README could not be updated.";

fn reply_and_close(notifier: &dyn Notifier, body: &str) {
    if let Err(e) = notifier.comment(body) {
        tracing::warn!("Failed to comment on issue: {}", e);
    }
    if let Err(e) = notifier.close() {
        tracing::warn!("Failed to close issue: {}", e);
    }
}

/// Board and play links, derived from the repository when not configured.
fn links(config: &BotConfig, github: &GitHubConfig) -> ReplyLinks {
    let repository = github.repository.as_deref();
    let board_file = config
        .board_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("chess_board.svg");

    ReplyLinks {
        board_image: config.github.board_image_url.clone().or_else(|| {
            repository.map(|r| format!("https://raw.githubusercontent.com/{}/main/{}", r, board_file))
        }),
        play: config
            .github
            .play_url
            .clone()
            .or_else(|| repository.map(|r| format!("https://github.com/{}", r))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn github(repository: Option<&str>) -> GitHubConfig {
        GitHubConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            repository: repository.map(str::to_string),
            token: None,
            issue: None,
        }
    }

    #[test]
    fn test_links_derived_from_repository() {
        let config = BotConfig {
            board_path: PathBuf::from("/tmp/x/board.svg"),
            ..BotConfig::default()
        };

        let links = links(&config, &github(Some("octocat/octocat")));

        assert_eq!(
            links.board_image.as_deref(),
            Some("https://raw.githubusercontent.com/octocat/octocat/main/board.svg")
        );
        assert_eq!(links.play.as_deref(), Some("https://github.com/octocat/octocat"));
    }

    #[test]
    fn test_configured_links_win() {
        let mut config = BotConfig::default();
        config.github.board_image_url = Some("https://cdn.example.com/b.svg".to_string());
        config.github.play_url = Some("https://example.com/play".to_string());

        let links = links(&config, &github(Some("octocat/octocat")));

        assert_eq!(links.board_image.as_deref(), Some("https://cdn.example.com/b.svg"));
        assert_eq!(links.play.as_deref(), Some("https://example.com/play"));
    }

    #[test]
    fn test_no_links_without_repository() {
        assert_eq!(links(&BotConfig::default(), &github(None)), ReplyLinks::default());
    }
}
