//! Command-line tokenizing and parsing
//!
//! Parsing is a separate step: a line either becomes a complete `Command`
//! or a `ParseError`, and nothing runs in the second case.

use thiserror::Error;

/// A fully parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play(String),
    PlayRandom,
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist(String),
    AddToPlaylist { playlist: String, video_id: String },
    PlayPlaylist(String),
    Next,
    Previous,
    ShowCurrentPlaylist,
    ClosePlaylist,
    RemoveFromPlaylist { playlist: String, video_id: String },
    ClearPlaylist(String),
    DeletePlaylist(String),
    ShowPlaylist(String),
    ShowAllPlaylists,
    SearchVideos(String),
    SearchVideosWithTag(String),
    FlagVideo { video_id: String, reason: Option<String> },
    AllowVideo(String),
    RateVideo { video_id: String, score: i64 },
    Help,
    Undo,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Please enter a valid command, type HELP for a list of available commands.")]
    Empty,

    #[error("Unknown command {0}, type HELP for a list of available commands.")]
    UnknownCommand(String),

    #[error("Missing argument. Usage: {usage}")]
    MissingArgument { action: &'static str, usage: String },

    #[error("Too many arguments. Usage: {usage}")]
    TooManyArguments { action: &'static str, usage: String },

    #[error("Score should be an integer, got {0:?}")]
    InvalidScore(String),
}

/// Registry entry: verb, positional arguments and help text
pub(crate) struct CommandSpec {
    pub verb: &'static str,
    /// Phrase for failure messages when no arguments are known
    pub action: &'static str,
    pub args: &'static [&'static str],
    /// Trailing free-text argument that may span several tokens
    pub rest: Option<&'static str>,
    pub summary: &'static str,
}

impl CommandSpec {
    pub fn usage(&self) -> String {
        let mut usage = self.verb.to_string();
        for arg in self.args {
            usage.push_str(&format!(" <{}>", arg));
        }
        if let Some(rest) = self.rest {
            usage.push_str(&format!(" [{}]", rest));
        }
        usage
    }
}

pub(crate) static COMMANDS: &[CommandSpec] = &[
    CommandSpec { verb: "NUMBER_OF_VIDEOS", action: "run command", args: &[], rest: None, summary: "Shows how many videos are in the library." },
    CommandSpec { verb: "SHOW_ALL_VIDEOS", action: "run command", args: &[], rest: None, summary: "Lists all videos in the library as TITLE (ID) [TAGS] RATING." },
    CommandSpec { verb: "PLAY", action: "play video", args: &["video_id"], rest: None, summary: "Plays the specified video." },
    CommandSpec { verb: "PLAY_RANDOM", action: "play video", args: &[], rest: None, summary: "Plays a random video from the library." },
    CommandSpec { verb: "STOP", action: "stop video", args: &[], rest: None, summary: "Stops the current video." },
    CommandSpec { verb: "PAUSE", action: "pause video", args: &[], rest: None, summary: "Pauses the current video." },
    CommandSpec { verb: "CONTINUE", action: "continue video", args: &[], rest: None, summary: "Resumes the current paused video." },
    CommandSpec { verb: "SHOW_PLAYING", action: "run command", args: &[], rest: None, summary: "Displays the video that is currently playing (or paused)." },
    CommandSpec { verb: "CREATE_PLAYLIST", action: "create playlist", args: &["playlist_name"], rest: None, summary: "Creates a new (empty) playlist with the provided name." },
    CommandSpec { verb: "ADD_TO_PLAYLIST", action: "add video to playlist", args: &["playlist_name", "video_id"], rest: None, summary: "Adds the requested video to the playlist." },
    CommandSpec { verb: "PLAY_PLAYLIST", action: "play playlist", args: &["playlist_name"], rest: None, summary: "Plays a playlist, starting with its first video." },
    CommandSpec { verb: "NEXT", action: "play next video", args: &[], rest: None, summary: "Plays the next video in the current playlist." },
    CommandSpec { verb: "PREVIOUS", action: "play previous video", args: &[], rest: None, summary: "Plays the previous video in the current playlist." },
    CommandSpec { verb: "SHOW_CURRENT_PLAYLIST", action: "run command", args: &[], rest: None, summary: "Shows the playlist playing now." },
    CommandSpec { verb: "CLOSE_PLAYLIST", action: "close playlist", args: &[], rest: None, summary: "Closes the current playlist." },
    CommandSpec { verb: "REMOVE_FROM_PLAYLIST", action: "remove video from playlist", args: &["playlist_name", "video_id"], rest: None, summary: "Removes the specified video from the specified playlist." },
    CommandSpec { verb: "CLEAR_PLAYLIST", action: "clear playlist", args: &["playlist_name"], rest: None, summary: "Removes all the videos from the playlist." },
    CommandSpec { verb: "DELETE_PLAYLIST", action: "delete playlist", args: &["playlist_name"], rest: None, summary: "Deletes the playlist." },
    CommandSpec { verb: "SHOW_PLAYLIST", action: "show playlist", args: &["playlist_name"], rest: None, summary: "Lists all the videos in the playlist." },
    CommandSpec { verb: "SHOW_ALL_PLAYLISTS", action: "run command", args: &[], rest: None, summary: "Displays all the available playlists." },
    CommandSpec { verb: "SEARCH_VIDEOS", action: "search videos", args: &["search_term"], rest: None, summary: "Displays all videos whose titles contain the search term." },
    CommandSpec { verb: "SEARCH_VIDEOS_WITH_TAG", action: "search videos", args: &["tag_name"], rest: None, summary: "Displays all videos carrying the provided tag." },
    CommandSpec { verb: "FLAG_VIDEO", action: "flag video", args: &["video_id"], rest: Some("flag_reason"), summary: "Marks a video as flagged." },
    CommandSpec { verb: "ALLOW_VIDEO", action: "remove flag from video", args: &["video_id"], rest: None, summary: "Removes a flag from a video." },
    CommandSpec { verb: "RATE_VIDEO", action: "rate video", args: &["video_id", "score"], rest: None, summary: "Rates a video with an integer from 1 to 5." },
    CommandSpec { verb: "UNDO", action: "undo", args: &[], rest: None, summary: "Undoes the last command that changed something." },
    CommandSpec { verb: "HELP", action: "run command", args: &[], rest: None, summary: "Displays help." },
    CommandSpec { verb: "EXIT", action: "run command", args: &[], rest: None, summary: "Terminates the program." },
];

impl ParseError {
    /// Phrase used in failure messages: `Cannot <operation>: ...`
    pub fn operation(&self) -> &'static str {
        match self {
            ParseError::Empty | ParseError::UnknownCommand(_) => "run command",
            ParseError::MissingArgument { action, .. }
            | ParseError::TooManyArguments { action, .. } => *action,
            ParseError::InvalidScore(_) => "rate video",
        }
    }
}

fn find_spec(verb: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.verb == verb)
}

impl Command {
    /// Tokenize on whitespace and parse
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        Self::from_tokens(&tokens)
    }

    /// Parse already-tokenized input; the verb is case-insensitive
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ParseError> {
        let (verb, args) = tokens.split_first().ok_or(ParseError::Empty)?;
        let verb = verb.to_uppercase();
        let spec = find_spec(&verb).ok_or_else(|| ParseError::UnknownCommand(verb.clone()))?;

        if args.len() < spec.args.len() {
            return Err(ParseError::MissingArgument {
                action: spec.action,
                usage: spec.usage(),
            });
        }
        if args.len() > spec.args.len() && spec.rest.is_none() {
            return Err(ParseError::TooManyArguments {
                action: spec.action,
                usage: spec.usage(),
            });
        }

        let arg = |i: usize| args[i].to_string();
        let command = match spec.verb {
            "NUMBER_OF_VIDEOS" => Command::NumberOfVideos,
            "SHOW_ALL_VIDEOS" => Command::ShowAllVideos,
            "PLAY" => Command::Play(arg(0)),
            "PLAY_RANDOM" => Command::PlayRandom,
            "STOP" => Command::Stop,
            "PAUSE" => Command::Pause,
            "CONTINUE" => Command::Continue,
            "SHOW_PLAYING" => Command::ShowPlaying,
            "CREATE_PLAYLIST" => Command::CreatePlaylist(arg(0)),
            "ADD_TO_PLAYLIST" => Command::AddToPlaylist {
                playlist: arg(0),
                video_id: arg(1),
            },
            "PLAY_PLAYLIST" => Command::PlayPlaylist(arg(0)),
            "NEXT" => Command::Next,
            "PREVIOUS" => Command::Previous,
            "SHOW_CURRENT_PLAYLIST" => Command::ShowCurrentPlaylist,
            "CLOSE_PLAYLIST" => Command::ClosePlaylist,
            "REMOVE_FROM_PLAYLIST" => Command::RemoveFromPlaylist {
                playlist: arg(0),
                video_id: arg(1),
            },
            "CLEAR_PLAYLIST" => Command::ClearPlaylist(arg(0)),
            "DELETE_PLAYLIST" => Command::DeletePlaylist(arg(0)),
            "SHOW_PLAYLIST" => Command::ShowPlaylist(arg(0)),
            "SHOW_ALL_PLAYLISTS" => Command::ShowAllPlaylists,
            "SEARCH_VIDEOS" => Command::SearchVideos(arg(0)),
            "SEARCH_VIDEOS_WITH_TAG" => Command::SearchVideosWithTag(arg(0)),
            "FLAG_VIDEO" => {
                let reason = args[1..].join(" ");
                Command::FlagVideo {
                    video_id: arg(0),
                    reason: (!reason.is_empty()).then_some(reason),
                }
            }
            "ALLOW_VIDEO" => Command::AllowVideo(arg(0)),
            "RATE_VIDEO" => Command::RateVideo {
                video_id: arg(0),
                score: args[1]
                    .parse()
                    .map_err(|_| ParseError::InvalidScore(arg(1)))?,
            },
            "HELP" => Command::Help,
            "UNDO" => Command::Undo,
            "EXIT" => Command::Exit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }

    /// Playlist that may be created when this command finds it missing
    pub fn creatable_playlist(&self) -> Option<&str> {
        match self {
            Command::AddToPlaylist { playlist, .. } => Some(playlist.as_str()),
            Command::PlayPlaylist(name) | Command::ShowPlaylist(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Phrase used in failure messages: `Cannot <operation>: ...`
    pub fn operation(&self) -> String {
        match self {
            Command::Play(_) | Command::PlayRandom => "play video".to_string(),
            Command::Stop => "stop video".to_string(),
            Command::Pause => "pause video".to_string(),
            Command::Continue => "continue video".to_string(),
            Command::CreatePlaylist(_) => "create playlist".to_string(),
            Command::AddToPlaylist { playlist, .. } => format!("add video to {}", playlist),
            Command::PlayPlaylist(name) => format!("play playlist {}", name),
            Command::Next => "play next video".to_string(),
            Command::Previous => "play previous video".to_string(),
            Command::ClosePlaylist => "close playlist".to_string(),
            Command::RemoveFromPlaylist { playlist, .. } => {
                format!("remove video from {}", playlist)
            }
            Command::ClearPlaylist(name) => format!("clear playlist {}", name),
            Command::DeletePlaylist(name) => format!("delete playlist {}", name),
            Command::ShowPlaylist(name) => format!("show playlist {}", name),
            Command::FlagVideo { .. } => "flag video".to_string(),
            Command::AllowVideo(_) => "remove flag from video".to_string(),
            Command::RateVideo { .. } => "rate video".to_string(),
            Command::Undo => "undo".to_string(),
            Command::SearchVideos(_) | Command::SearchVideosWithTag(_) => {
                "search videos".to_string()
            }
            Command::NumberOfVideos
            | Command::ShowAllVideos
            | Command::ShowPlaying
            | Command::ShowCurrentPlaylist
            | Command::ShowAllPlaylists
            | Command::Help
            | Command::Exit => "run command".to_string(),
        }
    }
}
