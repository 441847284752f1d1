//! Registration payload of the application commands, for the relay to
//! overwrite the global commands with.

use serde_json::{json, Value};

use crate::api::payload::{CHAT_INPUT, MESSAGE_CONTEXT_MENU};
use crate::search::validate::MAX_NAME_LENGTH;

const OPTION_STRING: u8 = 3;
const OPTION_BOOLEAN: u8 = 5;

/// Installable to users, usable in guilds, bot DMs and private channels.
const INTEGRATION_TYPES: [u8; 1] = [1];
const CONTEXTS: [u8; 3] = [0, 1, 2];

fn bookmark_option() -> Value {
    json!({
        "type": OPTION_STRING,
        "name": "bookmark",
        "description": "Bookmark id or alias",
        "required": true,
        "max_length": MAX_NAME_LENGTH,
    })
}

fn chat_input(name: &str, description: &str, options: Vec<Value>) -> Value {
    json!({
        "name": name,
        "description": description,
        "type": CHAT_INPUT,
        "integration_types": INTEGRATION_TYPES,
        "contexts": CONTEXTS,
        "options": options,
    })
}

pub fn command_definitions() -> Vec<Value> {
    vec![
        chat_input(
            "search",
            "Search for a bookmark.",
            vec![
                json!({
                    "type": OPTION_STRING,
                    "name": "query",
                    "description": "The search query to use.",
                    "required": false,
                    "max_length": 300,
                }),
                json!({
                    "type": OPTION_STRING,
                    "name": "tags",
                    "description": "The tags to filter by (space separated)",
                    "required": false,
                    "max_length": 300,
                }),
            ],
        ),
        chat_input(
            "show",
            "Show a bookmark.",
            vec![
                bookmark_option(),
                json!({
                    "type": OPTION_BOOLEAN,
                    "name": "show_others",
                    "description": "Let others see the bookmark.",
                    "required": false,
                }),
            ],
        ),
        chat_input(
            "tag",
            "Tag a bookmark.",
            vec![
                bookmark_option(),
                json!({
                    "type": OPTION_STRING,
                    "name": "tag",
                    "description": "Tag to toggle",
                    "required": true,
                    "max_length": MAX_NAME_LENGTH,
                }),
            ],
        ),
        chat_input(
            "alias",
            "Alias a bookmark.",
            vec![
                bookmark_option(),
                json!({
                    "type": OPTION_STRING,
                    "name": "new_alias",
                    "description": "Alias to set, ignore to unset",
                    "required": false,
                    "max_length": MAX_NAME_LENGTH,
                }),
            ],
        ),
        chat_input("delete", "Delete a bookmark.", vec![bookmark_option()]),
        json!({
            "name": "Bookmark",
            "type": MESSAGE_CONTEXT_MENU,
            "integration_types": INTEGRATION_TYPES,
            "contexts": CONTEXTS,
        }),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::commands::Command;
    use crate::api::payload::Interaction;

    /// Every registered command must resolve to a handler.
    #[test]
    fn definitions_resolve() {
        for definition in command_definitions() {
            let raw = json!({
                "type": crate::api::payload::APPLICATION_COMMAND,
                "data": {"name": definition["name"], "type": definition["type"]},
                "user": {"id": "1", "username": "someone"}
            });
            let interaction: Interaction = serde_json::from_value(raw).unwrap();
            assert!(
                Command::resolve(&interaction).is_some(),
                "{}",
                definition["name"]
            );
        }
    }
}
