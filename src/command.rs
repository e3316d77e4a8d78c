//! Motor commands carried by the request path of the control page's polls.

use crate::chassis::MotorState;

/// One of the five drive commands the control page can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

impl Command {
    /// Match order: the first command whose token appears in a request wins.
    pub const ALL: [Self; 5] = [
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::Stop,
    ];

    /// The path token the control page requests for this command.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Forward => "/f",
            Self::Backward => "/b",
            Self::Left => "/l",
            Self::Right => "/r",
            Self::Stop => "/s",
        }
    }

    /// Classifies raw request text.
    ///
    /// Headers, method and any trailing garbage are not parsed; the whole buffer is
    /// scanned. A token counts only when it is followed by a path delimiter or by the end
    /// of the data, so `/favicon.ico` is not read as `/f` but a truncated `GET /f` still
    /// is.
    #[must_use]
    pub fn from_request(request: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| contains_token(request, command.token().as_bytes()))
    }
}

impl From<Command> for MotorState {
    fn from(command: Command) -> Self {
        match command {
            Command::Forward => Self::Forward,
            Command::Backward => Self::Backward,
            Command::Left => Self::Left,
            Command::Right => Self::Right,
            Command::Stop => Self::Stop,
        }
    }
}

fn contains_token(haystack: &[u8], token: &[u8]) -> bool {
    haystack
        .windows(token.len())
        .enumerate()
        .filter(|(_, window)| *window == token)
        .any(|(start, _)| {
            haystack
                .get(start + token.len())
                .is_none_or(|&next| is_delimiter(next))
        })
}

const fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b' ' | b'?' | b'#' | b'/' | b'\r' | b'\n' | b'\t')
}
