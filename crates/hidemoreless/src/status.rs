//! Status bar messages

use serde::Serialize;

use crate::hider::Depth;
use crate::i18n::t;
use crate::menu::MenuCommand;
use crate::state::AppSettings;

/// Outcome of a command or callback, rendered into the host's status bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    /// A command changed the depth
    Depth {
        command: MenuCommand,
        depth: usize,
        hide_rest_disabled: bool,
    },
    Disabled,
    AtMaximumDepth { depth: usize },
    NothingHidden,
    NothingToHide,
    /// The top-level context closed and hiding was recomputed
    Reapplied { depth: Depth },
    /// The depth from before a save was restored
    ReappliedAfterSave { depth: Depth },
}

impl Status {
    /// Human-readable text in the configured language
    pub fn render(&self, settings: &AppSettings) -> String {
        let lang = settings.language;
        let fill = |key: &str, n: Option<usize>| {
            let text = t(lang, key).replace("{prefix}", &settings.hider.status_prefix);
            match n {
                Some(n) => text.replace("{n}", &n.to_string()),
                None => text,
            }
        };
        match self {
            Status::Depth {
                command,
                depth,
                hide_rest_disabled,
            } => {
                let key = match command {
                    MenuCommand::HideMore => "status.more_depth",
                    MenuCommand::HideLess => "status.less_depth",
                };
                let mut text = fill(key, Some(*depth));
                if *hide_rest_disabled {
                    text.push_str(t(lang, "status.hide_rest_disabled"));
                }
                text
            }
            Status::Disabled => fill("status.disabled", None),
            Status::AtMaximumDepth { depth } => fill("status.at_max", Some(*depth)),
            Status::NothingHidden => fill("status.nothing_hidden", None),
            Status::NothingToHide => fill("status.nothing_to_hide", None),
            Status::Reapplied { depth } => match depth.level() {
                Some(n) => fill("status.reapplied", Some(n)),
                None => fill("status.disabled", None),
            },
            Status::ReappliedAfterSave { depth } => match depth.level() {
                Some(n) => fill("status.reapplied_after_save", Some(n)),
                None => fill("status.disabled", None),
            },
        }
    }
}
