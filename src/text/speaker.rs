use std::sync::LazyLock;

use regex::Regex;

/// `NAME:rest` on a single line.
static SPEAKER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+):(.*)$").expect("speaker regex is valid"));

/// `NAME:rest` where `rest` may span newlines.
static SPEAKER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Z]+):(.*)$").expect("speaker regex is valid"));

/// How revealed text is cut before speaker labels are matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Split on `\n` and match each line on its own.
    #[default]
    PerLine,
    /// Match the whole text once; the body may contain newlines.
    Block,
}

/// Styling classification of already revealed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealedLine<'a> {
    /// Upper-case speaker name followed by a colon, e.g. `ROMEO:`.
    Speaker { label: &'a str, body: &'a str },
    Plain(&'a str),
}

/// Classify one visible fragment. Partially typed labels (`"ROM"`) stay plain until
/// the colon is revealed.
pub fn split_speaker(text: &str, mode: LabelMode) -> RevealedLine<'_> {
    let re = match mode {
        LabelMode::PerLine => &*SPEAKER_LINE,
        LabelMode::Block => &*SPEAKER_BLOCK,
    };
    match re.captures(text) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(label), Some(body)) => RevealedLine::Speaker {
                label: label.as_str(),
                body: body.as_str(),
            },
            _ => RevealedLine::Plain(text),
        },
        None => RevealedLine::Plain(text),
    }
}

/// Classify revealed text according to `mode`.
pub fn classify_revealed(text: &str, mode: LabelMode) -> Vec<RevealedLine<'_>> {
    match mode {
        LabelMode::PerLine => text.split('\n').map(|l| split_speaker(l, mode)).collect(),
        LabelMode::Block => vec![split_speaker(text, mode)],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/speaker.rs"]
mod tests;
