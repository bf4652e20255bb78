//! Notification events decoded from the notification socket.

use serde_json::{Map, Value};

/// Key carrying the event discriminator.
pub const EVENT_NAME: &str = "EventName";

/// Heartbeat event emitted by the window manager; never forwarded.
pub const NOOP: &str = "Noop";

/// One decoded notification.
///
/// Only [`name`](Self::name) is interpreted.  Every other key of the
/// decoded object is kept in [`extra`](Self::extra), in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub name: String,
    pub extra: Map<String, Value>,
}

impl NotificationEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Decode a frame payload.
    ///
    /// * `Err(_)` — the payload is not a JSON object.
    /// * `Ok(None)` — a JSON object without a string `EventName`.
    /// * `Ok(Some(_))` — a well-formed event.
    pub fn from_payload(payload: &str) -> Result<Option<Self>, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_str(payload)?;
        let Some(name) = object.get(EVENT_NAME).and_then(Value::as_str) else {
            return Ok(None);
        };
        let name = name.to_string();
        let extra = object
            .into_iter()
            .filter(|(key, _)| key != EVENT_NAME)
            .collect();
        Ok(Some(Self { name, extra }))
    }

    /// Whether this is the protocol heartbeat.
    pub fn is_noop(&self) -> bool {
        self.name == NOOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_name_and_keeps_extra_fields_in_order() {
        let ev = NotificationEvent::from_payload(
            r#"{"EventName":"ManagedClient","Id":4194307,"Title":"xterm","Nested":{"a":true}}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(ev.name, "ManagedClient");
        let keys: Vec<&str> = ev.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Id", "Title", "Nested"]);
        assert_eq!(ev.extra["Nested"], json!({"a": true}));
    }

    #[test]
    fn missing_event_name_is_none() {
        assert_eq!(NotificationEvent::from_payload(r#"{"Id":1}"#).unwrap(), None);
        assert_eq!(
            NotificationEvent::from_payload(r#"{"EventName":7}"#).unwrap(),
            None
        );
    }

    #[test]
    fn non_object_is_a_decode_error() {
        assert!(NotificationEvent::from_payload("[1,2]").is_err());
        assert!(NotificationEvent::from_payload("{not json").is_err());
    }

    #[test]
    fn noop_is_recognised() {
        let ev = NotificationEvent::from_payload(r#"{"EventName":"Noop"}"#)
            .unwrap()
            .unwrap();
        assert!(ev.is_noop());
        assert!(!NotificationEvent::new("ChangedWorkspace").is_noop());
    }
}
