use anyhow::Context;
use serde::{Deserialize, Serialize};
use shipping_common::{
    RequestId, ShipmentRequest, ShipmentRequestTrack, ShipmentStatus, ShippingError,
    ShippingService,
};
use tracing::debug;

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    RegisterRequest {
        receiver_name: String,
        sender_name: String,
        destination_address: String,
        send_cost: i64,
        #[serde(default)]
        observations: Option<String>,
    },
    RegisterStatus {
        /// Literal id, or `$N` for the N-th request registered in this run.
        request_id: String,
        location: String,
        status: String,
        #[serde(default)]
        observations: Option<String>,
    },
    Track {
        request_id: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Success {
    Request(ShipmentRequest),
    Status(ShipmentStatus),
    Track(Vec<ShipmentRequestTrack>),
}

/// Printed as `{"ok": ...}` or `{"error": ...}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok(Success),
    Error(ShippingError),
}

impl From<Result<Success, ShippingError>> for Outcome {
    fn from(result: Result<Success, ShippingError>) -> Self {
        match result {
            Ok(success) => Outcome::Ok(success),
            Err(e) => Outcome::Error(e),
        }
    }
}

/// Parse a JSON Lines script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> anyhow::Result<Vec<Command>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("invalid command on line {}", idx + 1))
        })
        .collect()
}

/// A single in-memory manager plus the ids it has handed out, in order.
#[derive(Default)]
pub struct Replay {
    service: ShippingService,
    registered: Vec<RequestId>,
}

impl Replay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        debug!(?command, "Applying command");
        let result = match command {
            Command::RegisterRequest {
                receiver_name,
                sender_name,
                destination_address,
                send_cost,
                observations,
            } => self
                .service
                .register_request(
                    &receiver_name,
                    &sender_name,
                    &destination_address,
                    send_cost,
                    observations.as_deref(),
                )
                .map(|request| {
                    self.registered.push(request.id.clone());
                    Success::Request(request)
                }),
            Command::RegisterStatus {
                request_id,
                location,
                status,
                observations,
            } => {
                let request_id = self.resolve(&request_id);
                self.service
                    .register_status(&request_id, &location, &status, observations.as_deref())
                    .map(Success::Status)
            }
            Command::Track { request_id } => {
                let request_id = self.resolve(&request_id);
                self.service.track_status_of(&request_id).map(Success::Track)
            }
        };
        result.into()
    }

    /// Expand a `$N` back-reference; anything else is returned unchanged.
    fn resolve(&self, request_id: &str) -> String {
        request_id
            .strip_prefix('$')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.registered.get(idx))
            .map(|id| id.0.clone())
            .unwrap_or_else(|| request_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
# one shipment held at customs, then released
{"op":"register_request","receiver_name":"Alice","sender_name":"Bob","destination_address":"Addr","send_cost":50}
{"op":"register_status","request_id":"$1","location":"Callao","status":"internal"}
{"op":"register_status","request_id":"$1","location":"Callao","status":"on hold","observations":"customs"}
{"op":"register_status","request_id":"$1","location":"Callao","status":"delivered"}
{"op":"register_status","request_id":"$1","location":"Lima","status":"in transit"}
{"op":"track","request_id":"$1"}
{"op":"track","request_id":"$2"}
"#;

    #[test]
    fn parses_commands_skipping_comments() {
        let commands = parse_script(SCRIPT).unwrap();
        assert_eq!(commands.len(), 7);
        assert_eq!(
            commands[5],
            Command::Track {
                request_id: "$1".into()
            }
        );
        match &commands[0] {
            Command::RegisterRequest {
                send_cost,
                observations,
                ..
            } => {
                assert_eq!(*send_cost, 50);
                assert!(observations.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reports_line_number_of_bad_command() {
        let err = parse_script("\n{\"op\":\"track\",\"request_id\":\"x\"}\n{\"op\":\"fly\"}\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid command on line 3");
    }

    #[test]
    fn replays_script() {
        let mut replay = Replay::new();
        let outcomes: Vec<Outcome> = parse_script(SCRIPT)
            .unwrap()
            .into_iter()
            .map(|c| replay.apply(c))
            .collect();

        assert!(matches!(outcomes[0], Outcome::Ok(Success::Request(_))));
        assert!(matches!(outcomes[1], Outcome::Ok(Success::Status(_))));
        assert!(matches!(outcomes[2], Outcome::Ok(Success::Status(_))));
        assert!(matches!(
            outcomes[3],
            Outcome::Error(ShippingError::InvalidTransition { .. })
        ));
        assert!(matches!(outcomes[4], Outcome::Ok(Success::Status(_))));
        match &outcomes[5] {
            Outcome::Ok(Success::Track(tracks)) => {
                let statuses: Vec<&str> = tracks.iter().map(|t| t.status.as_str()).collect();
                assert_eq!(statuses, vec!["on hold", "in transit"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        // "$2" was never registered, so it is looked up literally.
        match &outcomes[6] {
            Outcome::Error(ShippingError::NotFound(id)) => assert_eq!(id.as_str(), "$2"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn outcome_json_shape() {
        let mut replay = Replay::new();
        let outcome = replay.apply(Command::Track {
            request_id: "missing".into(),
        });
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"error":{"NotFound":"missing"}}"#);

        let outcome = replay.apply(Command::RegisterRequest {
            receiver_name: "Alice".into(),
            sender_name: "Bob".into(),
            destination_address: "Addr".into(),
            send_cost: 50,
            observations: None,
        });
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["ok"]["total_cost"], "68.44");
        assert_eq!(value["ok"]["status_history"], serde_json::json!([]));
    }
}
