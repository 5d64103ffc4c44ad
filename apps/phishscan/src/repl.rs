use std::path::PathBuf;

use shared::domain::InputMode;

pub const HELP: &str = "\
commands:
  :text | :url | :qr   switch input mode
  :file <path>         select the QR code image
  :scan                scan the current input
  :clear               clear the text input
  :help                show this help
  :quit                exit
any other line is appended to the text input";

/// One line typed into the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Mode(InputMode),
    File(PathBuf),
    Scan,
    Clear,
    Help,
    Quit,
    Input(String),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return ReplCommand::Input(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "scan" | "s" => ReplCommand::Scan,
            "clear" => ReplCommand::Clear,
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "q" | "exit" => ReplCommand::Quit,
            "file" if !arg.is_empty() => ReplCommand::File(PathBuf::from(arg)),
            other => other
                .parse::<InputMode>()
                .map(ReplCommand::Mode)
                .unwrap_or_else(|_| ReplCommand::Unknown(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_switches() {
        assert_eq!(ReplCommand::parse(":url"), ReplCommand::Mode(InputMode::Url));
        assert_eq!(ReplCommand::parse("  :QR "), ReplCommand::Mode(InputMode::Qr));
        assert_eq!(ReplCommand::parse(":text"), ReplCommand::Mode(InputMode::Text));
    }

    #[test]
    fn parses_file_with_spaces_in_path() {
        assert_eq!(
            ReplCommand::parse(":file  /tmp/my codes/qr.png "),
            ReplCommand::File(PathBuf::from("/tmp/my codes/qr.png"))
        );
        assert_eq!(
            ReplCommand::parse(":file"),
            ReplCommand::Unknown(":file".into())
        );
    }

    #[test]
    fn plain_lines_become_input() {
        assert_eq!(
            ReplCommand::parse("  Click here to claim\r\n"),
            ReplCommand::Input("  Click here to claim".into())
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(ReplCommand::parse(":scan"), ReplCommand::Scan);
        assert_eq!(ReplCommand::parse(":q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse(":clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse(":?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse(":nope"), ReplCommand::Unknown(":nope".into()));
    }
}
