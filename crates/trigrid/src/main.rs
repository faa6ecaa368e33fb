//! Demo bootstrap: wires the service from an in-memory store and plays a
//! scripted single-player and multiplayer game, printing the hub events
//! as they arrive.
//!
//! Run with `RUST_LOG=debug` for the full engine/store/hub trace.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use trigrid::prelude::*;

/// Accepts credentials of the form `id:name`. Anything else resolves to
/// no identity. Stands in for a real token validator.
struct ColonCredentials;

impl IdentityProvider for ColonCredentials {
    async fn resolve(&self, credential: &str) -> Option<Player> {
        let (id, name) = credential.split_once(':')?;
        if id.is_empty() || name.is_empty() {
            return None;
        }
        Some(Player {
            id: PlayerId(id.into()),
            name: name.into(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let service = GameService::new(
        ColonCredentials,
        Arc::new(MemoryStore::new()),
        Arc::new(NotificationHub::default()),
    );
    tracing::info!("service assembled over an in-memory store");

    let ada = "ada:Ada Lovelace";
    let bert = "bert:Bert Bos";

    // -- Single-player: Ada against the automated opponent ----------------

    let solo = service.create_game(ada, GameType::SinglePlayer).await?;
    println!("single-player game {} created, Ada to move", solo.id);

    let mut state = solo;
    for label in [1u8, 3, 5, 9] {
        state = service
            .make_move_in_single_player_game(ada, &state.id, Square(label))
            .await?;
        println!(
            "  Ada played {label}, board now {:?} ({})",
            state.all_moves, state.status
        );
    }
    println!(
        "single-player outcome: {} via {:?}",
        state.winner, state.winning_line
    );

    // -- Multiplayer: Ada against Bert, with live subscribers --------------

    let mut joins = service.subscribe(Topic::PlayerJoined).await;
    let mut moves = service.subscribe(Topic::MoveMade).await;
    let mut ends = service.subscribe(Topic::GameEnded).await;

    let game = service.create_game(ada, GameType::MultiPlayer).await?;
    println!("multiplayer game {} waiting for an opponent", game.id);

    let open = service.open_multi_player_games(bert).await?;
    println!("Bert sees {} open game(s)", open.len());

    service.join_multi_player_game(bert, &game.id).await?;
    let joined = joins.recv().await.expect("join event");
    println!(
        "event: {} joined game {}",
        joined.second.as_ref().map_or("?", |s| s.name.as_str()),
        joined.id
    );

    // Ada takes the top row while Bert works on the middle one.
    let script = [(ada, 1u8), (bert, 4), (ada, 2), (bert, 5), (ada, 3)];
    let mut last = joined;
    for (credential, label) in script {
        last = service
            .make_move_in_multi_player_game(credential, &game.id, Square(label))
            .await?;
        let event = moves.recv().await.expect("move event");
        println!(
            "event: move {label} in game {}, {} squares played",
            event.id,
            event.all_moves.len()
        );
    }
    println!(
        "multiplayer outcome: {} via {:?}",
        last.winner, last.winning_line
    );

    // Terminal games need no explicit end; start one more and abandon it.
    let abandoned = service.create_game(ada, GameType::MultiPlayer).await?;
    service.join_multi_player_game(bert, &abandoned.id).await?;
    let _ = joins.recv().await;
    service.end_game(bert, &abandoned.id).await?;
    let ended = ends.recv().await.expect("end event");
    println!("event: game {} ended ({})", ended.id, ended.winner);

    let history = service.user_inactive_games(ada).await?;
    println!("Ada's finished games: {}", history.len());

    Ok(())
}
