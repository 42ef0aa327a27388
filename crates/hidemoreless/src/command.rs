//! JSON command protocol for scripted sessions.
//!
//! Each command drives the [`TestHarness`] the way the host would: navigate,
//! save, run menu commands, inspect visibility.

use serde::{Deserialize, Serialize};
use shared::SceneModel;

use crate::harness::TestHarness;
use crate::menu::MenuCommand;

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Open a scene as a new document
    LoadScene { scene: SceneModel },
    /// Make an open document active
    Activate { document: u64 },
    /// Close a document
    CloseDocument { document: u64 },
    /// Enter a container inside the current context
    Open { id: String },
    /// Enter each container of a path in turn
    OpenPath { ids: Vec<String> },
    /// Leave the innermost context
    Close,
    /// Leave every context
    CloseAll,
    /// Save the active document
    Save,
    HideMore,
    HideLess,
    /// Menu state of both commands
    MenuState,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Tear down and restart the tracker
    Reload,
    /// Inspect the active document: path, depth, hidden entities
    Inspect,
    /// Export the active document as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn from_result(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::err(e),
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::LoadScene { scene } => match scene.validate() {
            Ok(()) => {
                let id = harness.load_scene(scene);
                CommandResponse::ok_with_data(serde_json::json!({ "document": id }))
            }
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Activate { document } => {
            CommandResponse::from_result(harness.activate(document))
        }

        AgentCommand::CloseDocument { document } => {
            let closed = harness.close_document(document);
            CommandResponse::ok_with_data(serde_json::json!({ "closed": closed }))
        }

        AgentCommand::Open { id } => CommandResponse::from_result(harness.open(&id)),

        AgentCommand::OpenPath { ids } => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            CommandResponse::from_result(harness.open_path(&ids))
        }

        AgentCommand::Close => {
            let closed = harness.close();
            CommandResponse::ok_with_data(serde_json::json!({ "closed": closed }))
        }

        AgentCommand::CloseAll => {
            let closed = harness.close_all();
            CommandResponse::ok_with_data(serde_json::json!({ "closed": closed }))
        }

        AgentCommand::Save => CommandResponse::from_result(harness.save()),

        AgentCommand::HideMore => run_menu(harness, MenuCommand::HideMore),

        AgentCommand::HideLess => run_menu(harness, MenuCommand::HideLess),

        AgentCommand::MenuState => {
            let more = harness.menu_state(MenuCommand::HideMore);
            let less = harness.menu_state(MenuCommand::HideLess);
            CommandResponse::ok_with_data(serde_json::json!({
                "hide_more": more,
                "hide_less": less,
            }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Reload => {
            harness.reload_extension();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            if harness.document().is_none() {
                return CommandResponse::err("No active document");
            }
            CommandResponse::ok_with_data(serde_json::json!({
                "document": harness.active_document(),
                "active_path": harness.active_path(),
                "depth": harness.depth(),
                "hidden": harness.hidden(),
                "hidden_by_hider": harness.hidden_by_hider(),
                "status": harness.status(),
            }))
        }

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

fn run_menu(harness: &mut TestHarness, command: MenuCommand) -> CommandResponse {
    match harness.command(command) {
        Ok(status) => CommandResponse::ok_with_data(serde_json::json!({
            "status": status,
            "message": harness.status(),
        })),
        Err(e) => CommandResponse::err(e),
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::nested_scene;

    #[test]
    fn test_command_serde_hide_more() {
        let json = r#"{"command": "hide_more"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::HideMore));
    }

    #[test]
    fn test_command_serde_open_path() {
        let json = r#"{"command": "open_path", "ids": ["A", "B"]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::OpenPath { ids } => assert_eq!(ids, vec!["A", "B"]),
            _ => panic!("Expected OpenPath"),
        }
    }

    #[test]
    fn test_execute_open_and_hide() {
        let mut h = TestHarness::new();
        h.load_scene(nested_scene());

        let resp = execute_json(&mut h, r#"{"command": "open_path", "ids": ["A", "B"]}"#).unwrap();
        assert!(resp.success);
        let resp = execute_json(&mut h, r#"{"command": "hide_more"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["status"]["status"], "depth");
        assert_eq!(data["message"], "HideMore: Depth 0");
    }

    #[test]
    fn test_execute_open_invalid_child() {
        let mut h = TestHarness::new();
        h.load_scene(nested_scene());
        let resp = execute_json(&mut h, r#"{"command": "open", "id": "C"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("not inside"));
    }

    #[test]
    fn test_execute_inspect_without_document() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_menu_state() {
        let mut h = TestHarness::new();
        h.load_scene(nested_scene());
        h.open_path(&["A", "B"]).unwrap();
        let resp = execute_json(&mut h, r#"{"command": "menu_state"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["hide_more"], "enabled");
        assert_eq!(data["hide_less"], "grayed");
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
