#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Translate,
    HistoryList,
    SetApiKey,
    SettingsStatus,
    ClipboardPaste,
    ClipboardCopy,
    SpeechSpeak,
    OutputClear,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "translate" => Command::Translate,
            "history.list" => Command::HistoryList,
            "settings.set_api_key" => Command::SetApiKey,
            "settings.status" => Command::SettingsStatus,
            "clipboard.paste" => Command::ClipboardPaste,
            "clipboard.copy" => Command::ClipboardCopy,
            "speech.speak" => Command::SpeechSpeak,
            "output.clear" => Command::OutputClear,
            _ => Command::Unknown,
        }
    }
}
