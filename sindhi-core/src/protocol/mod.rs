use serde_json::{json, Map, Value};

use crate::error::TranslateError;
use crate::services::session::Session;

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> Map<String, Value> {
    let mut resp = Map::new();
    resp.insert("id".into(), id);
    resp.insert("status".into(), json!("ok"));
    resp.insert("payload".into(), payload);
    resp
}

fn err(id: Value, message: impl Into<String>) -> Map<String, Value> {
    let mut resp = Map::new();
    resp.insert("id".into(), id);
    resp.insert("status".into(), json!("error"));
    resp.insert("message".into(), json!(message.into()));
    resp
}

/// Reply for a request whose handler panicked, carrying the request's id if it has one.
pub fn internal_error(input: &str) -> String {
    let id = serde_json::from_str::<Value>(input)
        .map(|req| get_id(&req))
        .unwrap_or(Value::Null);
    Value::Object(err(id, "internal core error")).to_string()
}

/// Handles one JSON request line and returns one JSON response line.
pub async fn handle(session: &Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);
    let issued = session.notifications_issued();

    let mut resp = match Command::from(get_cmd(&req)) {
        Command::Ping => ok(id, json!({ "message": "sindhi-core alive" })),

        Command::Translate => {
            let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");
            match session.translate_text(text).await {
                Ok(t) => ok(
                    id,
                    json!({
                        "translation": t.text,
                        "source": t.source,
                        "output": session.output(),
                    }),
                ),
                Err(TranslateError::Busy) => ok(id, json!({ "dropped": true })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::HistoryList => ok(id, json!({ "history": session.history() })),

        // Only an explicit null or empty string clears the stored key.
        Command::SetApiKey => match payload.get("api_key") {
            Some(Value::String(key)) => {
                let configured = session.configure_api_key(Some(key));
                ok(id, json!({ "has_api_key": configured }))
            }
            Some(Value::Null) => {
                let configured = session.configure_api_key(None);
                ok(id, json!({ "has_api_key": configured }))
            }
            _ => err(id, "payload.api_key is required"),
        },

        Command::SettingsStatus => ok(
            id,
            json!({ "has_api_key": session.resolver().credential().is_some() }),
        ),

        Command::ClipboardPaste => match session.paste_text().await {
            Ok(text) => ok(id, json!({ "text": text })),
            Err(e) => err(id, e.to_string()),
        },

        Command::ClipboardCopy => match session.copy_translation().await {
            Ok(()) => ok(id, json!({ "copied": true })),
            Err(e) => err(id, e.to_string()),
        },

        Command::SpeechSpeak => match session.speak_translation() {
            Ok(()) => ok(id, json!({ "spoken": true })),
            Err(e) => err(id, e.to_string()),
        },

        Command::OutputClear => {
            session.clear();
            ok(id, json!({ "output": session.output() }))
        }

        Command::Unknown => err(id, "unknown command"),
    };

    // Attach only what this command raised, not a message still on screen.
    if session.notifications_issued() != issued {
        if let Some(n) = session.notification() {
            resp.insert("notification".into(), json!(n));
        }
    }

    Value::Object(resp).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::capabilities::{MemoryClipboard, Unsupported};
    use crate::services::delay::{Delay, GateDelay, NoDelay};
    use crate::services::resolver::Resolver;
    use crate::services::session::Output;
    use crate::services::storage::{KeyValueStore, MemoryStore, API_KEY_KEY};
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn session_with(store: Arc<MemoryStore>, delay: Arc<dyn Delay>) -> Session {
        let cfg = Config {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
            ..Config::default()
        };
        let resolver = Resolver::with_delay(&cfg, store, delay).unwrap();
        Session::new(
            resolver,
            Arc::new(MemoryClipboard::default()),
            Arc::new(Unsupported),
        )
    }

    fn session() -> Session {
        session_with(Arc::new(MemoryStore::new()), Arc::new(NoDelay))
    }

    async fn call(s: &Session, req: Value) -> Value {
        serde_json::from_str(&handle(s, &req.to_string()).await).unwrap()
    }

    #[tokio::test]
    async fn ping() {
        let s = session();
        let resp = call(&s, json!({ "id": 1, "cmd": "ping" })).await;
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["message"], "sindhi-core alive");
        assert!(resp.get("notification").is_none());
    }

    #[tokio::test]
    async fn invalid_json_and_unknown_command() {
        let s = session();
        let resp: Value = serde_json::from_str(&handle(&s, "{oops").await).unwrap();
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid json");

        let resp = call(&s, json!({ "id": "x", "cmd": "project.open" })).await;
        assert_eq!(resp["id"], "x");
        assert_eq!(resp["message"], "unknown command");
    }

    #[tokio::test]
    async fn translate_then_list_history() {
        let s = session();
        let resp = call(
            &s,
            json!({ "id": 2, "cmd": "translate", "payload": { "text": "Hello" } }),
        )
        .await;
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["translation"], "سلام");
        assert_eq!(resp["payload"]["source"], "fallback");
        assert_eq!(resp["payload"]["output"]["kind"], "translation");
        assert_eq!(resp["notification"]["severity"], "success");

        let resp = call(&s, json!({ "id": 3, "cmd": "history.list" })).await;
        let history = resp["payload"]["history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["original"], "Hello");
    }

    #[tokio::test]
    async fn empty_text_is_an_error_with_warning() {
        let s = session();
        let resp = call(&s, json!({ "id": 4, "cmd": "translate", "payload": {} })).await;
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "Please enter text to translate");
        assert_eq!(resp["notification"]["severity"], "warning");
    }

    #[tokio::test]
    async fn api_key_round_trip() {
        let s = session();
        let resp = call(
            &s,
            json!({ "id": 5, "cmd": "settings.set_api_key", "payload": { "api_key": "sk-1" } }),
        )
        .await;
        assert_eq!(resp["payload"]["has_api_key"], true);

        let resp = call(&s, json!({ "id": 6, "cmd": "settings.status" })).await;
        assert_eq!(resp["payload"]["has_api_key"], true);

        let resp = call(
            &s,
            json!({ "id": 7, "cmd": "settings.set_api_key", "payload": { "api_key": null } }),
        )
        .await;
        assert_eq!(resp["payload"]["has_api_key"], false);
    }

    #[tokio::test]
    async fn copy_clear_and_speak() {
        let s = session();
        let resp = call(&s, json!({ "id": 8, "cmd": "clipboard.copy" })).await;
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["notification"]["message"], "No translation to copy");

        call(&s, json!({ "id": 9, "cmd": "translate", "payload": { "text": "book" } })).await;
        let resp = call(&s, json!({ "id": 10, "cmd": "clipboard.copy" })).await;
        assert_eq!(resp["payload"]["copied"], true);

        let resp = call(&s, json!({ "id": 11, "cmd": "clipboard.paste" })).await;
        assert_eq!(resp["payload"]["text"], "ڪتاب");

        let resp = call(&s, json!({ "id": 12, "cmd": "speech.speak" })).await;
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["notification"]["message"], "Speech synthesis not supported");

        let resp = call(&s, json!({ "id": 13, "cmd": "output.clear" })).await;
        assert_eq!(resp["payload"]["output"]["kind"], "empty");
    }

    #[tokio::test]
    async fn malformed_api_key_payload_keeps_stored_key() {
        let store = Arc::new(MemoryStore::with_value(API_KEY_KEY, "sk-live"));
        let s = session_with(store.clone(), Arc::new(NoDelay));

        for payload in [
            json!({ "apiKey": "sk-typo" }),
            json!({ "api_key": 42 }),
            json!({ "api_key": ["sk-1"] }),
            json!({}),
        ] {
            let resp = call(
                &s,
                json!({ "id": 20, "cmd": "settings.set_api_key", "payload": payload.clone() }),
            )
            .await;
            assert_eq!(resp["status"], "error", "payload: {payload}");
            assert_eq!(resp["message"], "payload.api_key is required");
        }

        let resp = call(&s, json!({ "id": 21, "cmd": "settings.set_api_key" })).await;
        assert_eq!(resp["message"], "payload.api_key is required");

        assert_eq!(store.get(API_KEY_KEY).unwrap().as_deref(), Some("sk-live"));
        assert_eq!(s.resolver().credential().as_deref(), Some("sk-live"));
    }

    #[tokio::test]
    async fn empty_string_api_key_clears() {
        let store = Arc::new(MemoryStore::with_value(API_KEY_KEY, "sk-live"));
        let s = session_with(store.clone(), Arc::new(NoDelay));

        let resp = call(
            &s,
            json!({ "id": 22, "cmd": "settings.set_api_key", "payload": { "api_key": "" } }),
        )
        .await;
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["has_api_key"], false);
        assert_eq!(store.get(API_KEY_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn translate_while_pending_is_dropped() {
        let gate = Arc::new(Notify::new());
        let s = session_with(Arc::new(MemoryStore::new()), Arc::new(GateDelay(gate.clone())));

        let (first, second) = tokio::join!(
            call(
                &s,
                json!({ "id": 30, "cmd": "translate", "payload": { "text": "hello" } }),
            ),
            async {
                tokio::task::yield_now().await;
                let resp = call(
                    &s,
                    json!({ "id": 31, "cmd": "translate", "payload": { "text": "water" } }),
                )
                .await;
                assert_eq!(s.output(), Output::Empty);
                assert!(s.notification().is_none());
                gate.notify_one();
                resp
            }
        );

        assert_eq!(second["id"], 31);
        assert_eq!(second["status"], "ok");
        assert_eq!(second["payload"], json!({ "dropped": true }));
        assert!(second.get("notification").is_none());

        assert_eq!(first["id"], 30);
        assert_eq!(first["payload"]["translation"], "سلام");
        assert_eq!(first["notification"]["severity"], "success");
        assert_eq!(s.history().len(), 1);
    }

    #[tokio::test]
    async fn notification_is_not_repeated_on_later_commands() {
        let s = session();
        let resp = call(
            &s,
            json!({ "id": 40, "cmd": "translate", "payload": { "text": "sun" } }),
        )
        .await;
        assert_eq!(
            resp["notification"]["message"],
            "Translation completed successfully!"
        );

        let resp = call(&s, json!({ "id": 41, "cmd": "settings.status" })).await;
        assert!(resp.get("notification").is_none());
        let resp = call(&s, json!({ "id": 42, "cmd": "history.list" })).await;
        assert!(resp.get("notification").is_none());

        // the same message raised again is still delivered
        let resp = call(
            &s,
            json!({ "id": 43, "cmd": "translate", "payload": { "text": "sun" } }),
        )
        .await;
        assert_eq!(
            resp["notification"]["message"],
            "Translation completed successfully!"
        );
    }

    #[test]
    fn internal_error_keeps_request_id() {
        let resp: Value =
            serde_json::from_str(&internal_error(r#"{"id":7,"cmd":"translate"}"#)).unwrap();
        assert_eq!(resp["id"], 7);
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "internal core error");

        let resp: Value = serde_json::from_str(&internal_error("{oops")).unwrap();
        assert_eq!(resp["id"], Value::Null);
    }
}
