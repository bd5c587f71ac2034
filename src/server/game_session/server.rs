use actix::prelude::*;
use actix::MessageResult;
use std::collections::HashMap;
use uuid::Uuid;
use log::{debug, info, warn};

use crate::game::entities::Layout;
use crate::game::state::{ActionOutcome, GameState};
use crate::game::error::Rejection;
use crate::game::turn::TurnState;
use crate::game::types::Position;
use crate::server::error::SessionError;
use crate::server::game_session::messages::{
    ClearPermissions, ClientRequest, CreatePiece, CurrentTurn, DeclareWinner, GameEvent, IsGameOver,
    LegalTargets, ObserverId, PieceAt, ProcessClientMessage, Restart, SetPermissions, SkipTurn,
    SubmitAction, Subscribe, Unsubscribe, ViewHealth,
};

/// One game instance. The actor mailbox is the request queue: messages are
/// handled one at a time in arrival order, so each action runs validate ->
/// mutate -> advance -> notify before the next one is looked at.
pub struct GameSession {
    pub game_id: Uuid,
    game_state: GameState,
    observers: HashMap<ObserverId, Recipient<GameEvent>>,
    next_observer_id: ObserverId,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!(
            "[GameSession] Started game_id={} turn={:?}",
            self.game_id,
            self.game_state.current_turn()
        );
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        info!("[GameSession] Stopped game_id={}", self.game_id);
    }
}

impl GameSession {
    pub fn new(game_id: Uuid, game_state: GameState) -> Self {
        Self {
            game_id,
            game_state,
            observers: HashMap::new(),
            next_observer_id: 1,
        }
    }

    fn broadcast(&self, event: GameEvent) {
        debug!(
            "[GameSession] Broadcast {:?}: game_id={} observers={}",
            event,
            self.game_id,
            self.observers.len()
        );
        for observer in self.observers.values() {
            observer.do_send(event.clone());
        }
    }

    /// Tell observers the turn moved on after an accepted request.
    fn send_turn_update(&self) {
        self.broadcast(GameEvent::TurnCleared);
        self.broadcast(GameEvent::TurnChanged { turn: self.game_state.current_turn() });
    }

    fn submit_action(&mut self, msg: SubmitAction) -> Result<ActionOutcome, Rejection> {
        let outcome = self
            .game_state
            .submit_action(msg.connection, msg.piece, msg.kind, msg.target)?;
        self.send_turn_update();
        Ok(outcome)
    }

    fn skip_turn(&mut self, msg: SkipTurn) -> Result<TurnState, Rejection> {
        let turn = self.game_state.skip(msg.connection)?;
        self.send_turn_update();
        Ok(turn)
    }
}

impl Handler<ProcessClientMessage> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientMessage, _: &mut Context<Self>) -> Self::Result {
        // Rejections are already logged by the engine; the client gets nothing back.
        let _ = match msg.request {
            ClientRequest::Act { piece, kind, x, y } => self
                .submit_action(SubmitAction {
                    connection: msg.connection,
                    piece,
                    kind,
                    target: Position::new(x, y),
                })
                .map(|_| ()),
            ClientRequest::Skip => self
                .skip_turn(SkipTurn { connection: msg.connection })
                .map(|_| ()),
        };
    }
}

impl Handler<SubmitAction> for GameSession {
    type Result = Result<ActionOutcome, Rejection>;

    fn handle(&mut self, msg: SubmitAction, _: &mut Context<Self>) -> Self::Result {
        self.submit_action(msg)
    }
}

impl Handler<SkipTurn> for GameSession {
    type Result = Result<TurnState, Rejection>;

    fn handle(&mut self, msg: SkipTurn, _: &mut Context<Self>) -> Self::Result {
        self.skip_turn(msg)
    }
}

impl Handler<CreatePiece> for GameSession {
    type Result = MessageResult<CreatePiece>;

    fn handle(&mut self, msg: CreatePiece, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.game_state.create_piece(msg.kind, msg.side, msg.pos))
    }
}

impl Handler<SetPermissions> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: SetPermissions, _: &mut Context<Self>) -> Self::Result {
        debug!(
            "[GameSession] Permissions connection={} side={:?} bits={:#06b}",
            msg.connection,
            msg.side,
            msg.capabilities.bits()
        );
        self.game_state.set_permissions(msg.connection, msg.side, msg.capabilities);
    }
}

impl Handler<ClearPermissions> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: ClearPermissions, _: &mut Context<Self>) -> Self::Result {
        self.game_state.clear_permissions(msg.connection, msg.side);
    }
}

impl Handler<DeclareWinner> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: DeclareWinner, _: &mut Context<Self>) -> Self::Result {
        if self.game_state.is_game_over() {
            warn!("[GameSession] Winner already declared for game_id={}", self.game_id);
            return;
        }
        self.game_state.declare_winner(msg.side);
        self.broadcast(GameEvent::GameOver { winner: msg.side });
    }
}

impl Handler<Restart> for GameSession {
    type Result = ();

    fn handle(&mut self, _: Restart, _: &mut Context<Self>) -> Self::Result {
        self.game_state.restart();
        self.send_turn_update();
    }
}

impl Handler<CurrentTurn> for GameSession {
    type Result = MessageResult<CurrentTurn>;

    fn handle(&mut self, _: CurrentTurn, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.game_state.current_turn())
    }
}

impl Handler<IsGameOver> for GameSession {
    type Result = bool;

    fn handle(&mut self, _: IsGameOver, _: &mut Context<Self>) -> Self::Result {
        self.game_state.is_game_over()
    }
}

impl Handler<PieceAt> for GameSession {
    type Result = MessageResult<PieceAt>;

    fn handle(&mut self, msg: PieceAt, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.game_state.piece_at(msg.pos))
    }
}

impl Handler<LegalTargets> for GameSession {
    type Result = MessageResult<LegalTargets>;

    fn handle(&mut self, msg: LegalTargets, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.game_state.legal_targets(msg.piece, msg.kind))
    }
}

impl Handler<ViewHealth> for GameSession {
    type Result = MessageResult<ViewHealth>;

    fn handle(&mut self, msg: ViewHealth, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.game_state.view_health(msg.connection, msg.piece))
    }
}

impl Handler<Subscribe> for GameSession {
    type Result = MessageResult<Subscribe>;

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        let id = self.next_observer_id;
        self.next_observer_id += 1;
        self.observers.insert(id, msg.observer);
        debug!("[GameSession] Observer {} subscribed to game_id={}", id, self.game_id);
        MessageResult(id)
    }
}

impl Handler<Unsubscribe> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: Unsubscribe, _: &mut Context<Self>) -> Self::Result {
        if self.observers.remove(&msg.id).is_none() {
            warn!("[GameSession] Unknown observer {} for game_id={}", msg.id, self.game_id);
        }
    }
}

#[derive(Message)]
#[rtype(result = "()")]
struct StopSession;

impl Handler<StopSession> for GameSession {
    type Result = ();

    fn handle(&mut self, _: StopSession, ctx: &mut Context<Self>) -> Self::Result {
        ctx.stop();
    }
}

/// Owns every running game, keyed by game id. Games never share state.
pub struct GameSessionManager {
    sessions: HashMap<Uuid, Addr<GameSession>>,
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn create_game(&mut self, layout: Layout) -> Uuid {
        let game_id = Uuid::new_v4();
        let session = GameSession::new(game_id, GameState::new(layout)).start();
        self.sessions.insert(game_id, session);
        info!("[GameSessionManager] Game created game_id={} layout={:?}", game_id, layout);
        game_id
    }
}

impl Actor for GameSessionManager {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "Uuid")]
pub struct CreateGame {
    pub layout: Layout,
}

impl Handler<CreateGame> for GameSessionManager {
    type Result = MessageResult<CreateGame>;

    fn handle(&mut self, msg: CreateGame, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.create_game(msg.layout))
    }
}

#[derive(Message)]
#[rtype(result = "Result<Addr<GameSession>, SessionError>")]
pub struct GetGameSession {
    pub game_id: Uuid,
}

impl Handler<GetGameSession> for GameSessionManager {
    type Result = Result<Addr<GameSession>, SessionError>;

    fn handle(&mut self, msg: GetGameSession, _: &mut Context<Self>) -> Self::Result {
        self.sessions
            .get(&msg.game_id)
            .cloned()
            .ok_or(SessionError::GameNotFound(msg.game_id))
    }
}

#[derive(Message)]
#[rtype(result = "Result<(), SessionError>")]
pub struct CloseGame {
    pub game_id: Uuid,
}

impl Handler<CloseGame> for GameSessionManager {
    type Result = Result<(), SessionError>;

    fn handle(&mut self, msg: CloseGame, _: &mut Context<Self>) -> Self::Result {
        let session = self
            .sessions
            .remove(&msg.game_id)
            .ok_or(SessionError::GameNotFound(msg.game_id))?;
        session.do_send(StopSession);
        info!("[GameSessionManager] Game closed game_id={}", msg.game_id);
        Ok(())
    }
}
