use std::collections::BTreeSet;

use actix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::entities::Piece;
use crate::game::error::Rejection;
use crate::game::permissions::Capabilities;
use crate::game::state::{ActionOutcome, HealthView};
use crate::game::turn::TurnState;
use crate::game::types::{ActionKind, ConnectionId, PieceId, PieceKind, Position, Side};

pub type ObserverId = u64;

// ---- client -> engine ----

/// A request as it arrives from a remote client. The caller's identity is
/// never part of the payload; the transport supplies it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "data")]
pub enum ClientRequest {
    Act {
        piece: PieceId,
        kind: ActionKind,
        x: i32,
        y: i32,
    },
    Skip,
}

/// Fire-and-forget form used by transports: the result is dropped so the
/// client learns nothing about why a request failed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientMessage {
    pub connection: ConnectionId,
    pub request: ClientRequest,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<ActionOutcome, Rejection>")]
pub struct SubmitAction {
    pub connection: ConnectionId,
    pub piece: PieceId,
    pub kind: ActionKind,
    pub target: Position,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<TurnState, Rejection>")]
pub struct SkipTurn {
    pub connection: ConnectionId,
}

// ---- setup collaborator -> engine ----

#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<PieceId>")]
pub struct CreatePiece {
    pub kind: PieceKind,
    pub side: Side,
    pub pos: Position,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SetPermissions {
    pub connection: ConnectionId,
    pub side: Side,
    pub capabilities: Capabilities,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ClearPermissions {
    pub connection: ConnectionId,
    pub side: Side,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct DeclareWinner {
    pub side: Side,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Restart;

// ---- queries ----

#[derive(Message, Debug, Clone)]
#[rtype(result = "TurnState")]
pub struct CurrentTurn;

#[derive(Message, Debug, Clone)]
#[rtype(result = "bool")]
pub struct IsGameOver;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<Piece>")]
pub struct PieceAt {
    pub pos: Position,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "BTreeSet<Position>")]
pub struct LegalTargets {
    pub piece: PieceId,
    pub kind: ActionKind,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<HealthView>")]
pub struct ViewHealth {
    pub connection: ConnectionId,
    pub piece: PieceId,
}

// ---- observers ----

#[derive(Message)]
#[rtype(result = "ObserverId")]
pub struct Subscribe {
    pub observer: Recipient<GameEvent>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Unsubscribe {
    pub id: ObserverId,
}

/// Engine -> observers. Sent only after a request has been applied.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
#[serde(tag = "event", content = "data")]
pub enum GameEvent {
    /// Presentation should drop highlights and re-read state.
    TurnCleared,
    TurnChanged { turn: TurnState },
    GameOver { winner: Side },
}

impl GameEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_wire_format() {
        let raw = r#"{"action":"Act","data":{"piece":3,"kind":"attack","x":0,"y":4}}"#;
        let request: ClientRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(
            request,
            ClientRequest::Act { piece: PieceId(3), kind: ActionKind::Attack, x: 0, y: 4 }
        );

        let skip: ClientRequest = serde_json::from_str(r#"{"action":"Skip"}"#).unwrap();
        assert_eq!(skip, ClientRequest::Skip);
    }

    #[test]
    fn test_event_wire_format() {
        let event = GameEvent::TurnChanged { turn: TurnState::BlackMove };
        assert_eq!(
            event.to_json().unwrap(),
            r#"{"event":"TurnChanged","data":{"turn":"blackMove"}}"#
        );
        assert_eq!(GameEvent::TurnCleared.to_json().unwrap(), r#"{"event":"TurnCleared"}"#);
    }

    #[test]
    fn test_unknown_action_kind_is_refused() {
        let raw = r#"{"action":"Act","data":{"piece":3,"kind":"teleport","x":0,"y":4}}"#;
        assert!(serde_json::from_str::<ClientRequest>(raw).is_err());
    }
}
