//! Outbound command path grammar.
//!
//! Commands are sent to the control API as plain GET paths of the form
//! `/{room}/{command}[/{argument}...]`. This module knows the command
//! vocabulary and how each command shapes its path.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use bridge_state::ZoneName;

/// Percent-encoding set for spoken text: everything except unreserved
/// characters and `/`.
const SAY_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Commands the control API understands.
pub const COMMANDS: &[&str] = &[
    "play",
    "pause",
    "playpause",
    "volume",
    "groupVolume",
    "mute",
    "unmute",
    "groupMute",
    "groupUnmute",
    "togglemute",
    "trackseek",
    "timeseek",
    "next",
    "previous",
    "state",
    "favorite",
    "favorites",
    "playlist",
    "lockvolumes",
    "unlockvolumes",
    "repeat",
    "shuffle",
    "crossfade",
    "pauseall",
    "resumeall",
    "say",
    "sayall",
    "saypreset",
    "queue",
    "clearqueue",
    "sleep",
    "linein",
    "clip",
    "clipall",
    "clippreset",
    "join",
    "leave",
    "sub",
    "nightmode",
    "speechenhancement",
    "bass",
    "treble",
];

/// Commands sent bare, without a value segment.
const BARE_COMMANDS: &[&str] = &[
    "play",
    "pause",
    "playpause",
    "mute",
    "unmute",
    "groupMute",
    "groupUnmute",
    "togglemute",
    "next",
    "previous",
    "state",
];

/// True if `command` is part of the known vocabulary.
pub fn is_known_command(command: &str) -> bool {
    COMMANDS.contains(&command)
}

/// Build the request path for one command against one zone.
///
/// Four shapes:
///
/// - `volume_up`/`volume_down` become relative volume steps.
/// - Bare commands drop the value segment entirely.
/// - `say`-family commands carry the percent-encoded text plus a
///   language segment.
/// - Everything else appends the value verbatim.
pub fn command_path(zone: &ZoneName, command: &str, value: &str) -> String {
    let room = zone.as_str();
    match command {
        "volume_up" => format!("{room}/volume/+1"),
        "volume_down" => format!("{room}/volume/-1"),
        _ if BARE_COMMANDS.contains(&command) => format!("{room}/{command}"),
        _ if command.contains("say") => {
            let text = utf8_percent_encode(value, SAY_TEXT);
            format!("{room}/{command}/{text}/de")
        }
        _ => format!("{room}/{command}/{value}"),
    }
}
