//! "Hide More" / "Hide Less" commands and their menu validation

use serde::{Deserialize, Serialize};

use crate::hider::Depth;
use crate::host::SceneHost;
use crate::i18n::t;
use crate::state::AppSettings;
use crate::status::Status;
use crate::tracker::Tracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCommand {
    HideMore,
    HideLess,
}

impl MenuCommand {
    /// Menu label, also used as the undo operation name
    pub fn label(self, settings: &AppSettings) -> &'static str {
        match self {
            MenuCommand::HideMore => t(settings.language, "menu.hide_more"),
            MenuCommand::HideLess => t(settings.language, "menu.hide_less"),
        }
    }
}

/// Menu item state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    Enabled,
    Grayed,
}

/// Whether `command` is applicable to the document right now
pub fn validate(tracker: &mut Tracker, host: &mut dyn SceneHost, command: MenuCommand) -> MenuState {
    let depth = tracker.get(host).depth();
    let path_len = host.active_path().len();
    let applicable = path_len > 1
        && match (command, depth) {
            (MenuCommand::HideMore, Depth::Disabled) => true,
            (MenuCommand::HideMore, Depth::Level(d)) => d < path_len - 1,
            (MenuCommand::HideLess, depth) => !depth.is_disabled(),
        };
    if applicable {
        MenuState::Enabled
    } else {
        MenuState::Grayed
    }
}

/// Run `command` against the document and show the outcome in its status bar.
pub fn run(tracker: &mut Tracker, host: &mut dyn SceneHost, command: MenuCommand) -> Status {
    let status = match command {
        MenuCommand::HideMore => hide_more(tracker, host),
        MenuCommand::HideLess => hide_less(tracker, host),
    };
    host.set_status_text(&status.render(tracker.settings()));
    status
}

/// Hide one more level of non-ancestors.
pub fn hide_more(tracker: &mut Tracker, host: &mut dyn SceneHost) -> Status {
    let settings = tracker.settings().clone();
    let hider = tracker.get(host);
    hider.observer_mut().reset();
    if hider.depth().is_disabled() {
        hider.deregister_all(host);
    }

    let path_len = host.active_path().len();
    if path_len <= 1 {
        return Status::NothingToHide;
    }
    // A close below the top level can leave the depth past the shorter path
    hider.set_depth(hider.depth().clamp_to(path_len - 1));
    if let Depth::Level(depth) = hider.depth() {
        if depth >= path_len - 1 {
            return Status::AtMaximumDepth { depth };
        }
    }

    host.start_operation(MenuCommand::HideMore.label(&settings));
    hider.unhide_all(host);
    hider.set_depth(hider.depth().deeper());
    hider.hide(host);
    let hide_rest_disabled = disable_hide_rest(host, &settings);
    host.commit_operation();

    let depth = hider.depth().level().unwrap_or_default();
    tracing::info!("hide more: depth {depth}");
    Status::Depth {
        command: MenuCommand::HideMore,
        depth,
        hide_rest_disabled,
    }
}

/// Hide one level less; from level 0 this disables hiding.
pub fn hide_less(tracker: &mut Tracker, host: &mut dyn SceneHost) -> Status {
    let settings = tracker.settings().clone();
    let hider = tracker.get(host);
    hider.observer_mut().reset();
    if hider.depth().is_disabled() {
        hider.deregister_all(host);
        return Status::NothingHidden;
    }

    let path_len = host.active_path().len();
    if path_len <= 1 {
        return Status::NothingHidden;
    }
    hider.set_depth(hider.depth().clamp_to(path_len - 1));

    host.start_operation(MenuCommand::HideLess.label(&settings));
    hider.unhide_all(host);
    let status = if hider.depth() == Depth::Level(0) {
        hider.set_depth(Depth::Disabled);
        hider.deregister_all(host);
        tracing::info!("hide less: disabled");
        Status::Disabled
    } else {
        hider.set_depth(hider.depth().shallower());
        hider.hide(host);
        let hide_rest_disabled = disable_hide_rest(host, &settings);
        let depth = hider.depth().level().unwrap_or_default();
        tracing::info!("hide less: depth {depth}");
        Status::Depth {
            command: MenuCommand::HideLess,
            depth,
            hide_rest_disabled,
        }
    };
    host.commit_operation();
    status
}

/// Switch off "hide rest of model" if it is on; it would hide the very
/// ancestors we keep visible.
fn disable_hide_rest(host: &mut dyn SceneHost, settings: &AppSettings) -> bool {
    if settings.hider.disable_hide_rest && host.hide_rest_of_model() {
        host.set_hide_rest_of_model(false);
        true
    } else {
        false
    }
}
