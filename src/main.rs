//! Local driver for the engine.
//!
//! Boots one game with the standard layout, gives each side's driver
//! connection full permissions, then reads JSON lines from stdin of the form
//! `{"connection":1,"request":{"action":"Act","data":{...}}}` and prints every
//! game event to stdout as a JSON line.

use actix::prelude::*;
use log::{info, warn};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use tactics_grid::config::session::{DRIVER_BLACK_CONNECTION, DRIVER_WHITE_CONNECTION};
use tactics_grid::game::entities::Layout;
use tactics_grid::game::permissions::Capabilities;
use tactics_grid::game::types::{ConnectionId, Side};
use tactics_grid::server::game_session::messages::{
    ClientRequest, CurrentTurn, GameEvent, ProcessClientMessage, SetPermissions, Subscribe,
};
use tactics_grid::server::game_session::server::{CreateGame, GameSessionManager, GetGameSession};

#[derive(Deserialize)]
struct DriverLine {
    connection: ConnectionId,
    request: ClientRequest,
}

/// Prints each event it receives as one JSON line.
struct EventPrinter;

impl Actor for EventPrinter {
    type Context = Context<Self>;
}

impl Handler<GameEvent> for EventPrinter {
    type Result = ();

    fn handle(&mut self, msg: GameEvent, _: &mut Context<Self>) -> Self::Result {
        match msg.to_json() {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("[Driver] Failed to serialize event {:?}: {}", msg, e),
        }
    }
}

/// Answered after every event queued before it has been printed.
#[derive(Message)]
#[rtype(result = "()")]
struct Flush;

impl Handler<Flush> for EventPrinter {
    type Result = ();

    fn handle(&mut self, _: Flush, _: &mut Context<Self>) -> Self::Result {}
}

async fn run() -> std::io::Result<()> {
    let manager = GameSessionManager::new().start();
    let game_id = manager
        .send(CreateGame { layout: Layout::Standard })
        .await
        .map_err(std::io::Error::other)?;
    let session = manager
        .send(GetGameSession { game_id })
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;

    for (connection, side) in [
        (DRIVER_WHITE_CONNECTION, Side::White),
        (DRIVER_BLACK_CONNECTION, Side::Black),
    ] {
        session.do_send(SetPermissions {
            connection,
            side,
            capabilities: Capabilities::FULL_INTERACT,
        });
    }

    let printer = EventPrinter.start();
    session
        .send(Subscribe { observer: printer.clone().recipient() })
        .await
        .map_err(std::io::Error::other)?;

    let turn = session.send(CurrentTurn).await.map_err(std::io::Error::other)?;
    info!("[Driver] game_id={} ready, turn={:?}", game_id, turn);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: DriverLine = match serde_json::from_str(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("[Driver] Ignoring malformed line: {}", e);
                continue;
            }
        };
        session
            .send(ProcessClientMessage {
                connection: parsed.connection,
                request: parsed.request,
            })
            .await
            .map_err(std::io::Error::other)?;
    }

    printer.send(Flush).await.map_err(std::io::Error::other)?;
    Ok(())
}

fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let system = actix::System::new();
    system.block_on(run())
}
