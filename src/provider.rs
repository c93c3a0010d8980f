use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::api::{ApiClient, PropsSource};
use crate::config::{Settings, SourceMode};
use crate::demo::DemoSource;
use crate::state::{Delta, ProviderCommand};

pub fn build_source(settings: &Settings) -> anyhow::Result<Box<dyn PropsSource>> {
    match settings.source {
        SourceMode::Api => Ok(Box::new(ApiClient::new(settings)?)),
        SourceMode::Demo => Ok(Box::new(DemoSource::new())),
    }
}

/// Serves fetch commands on a worker thread until either channel end is dropped.
pub fn spawn_provider(
    source: Box<dyn PropsSource>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let delta = handle_command(source.as_ref(), cmd);
            if tx.send(delta).is_err() {
                break;
            }
        }
        tracing::debug!("provider stopped");
    })
}

pub fn handle_command(source: &dyn PropsSource, cmd: ProviderCommand) -> Delta {
    tracing::debug!(?cmd, "provider command");
    match cmd {
        ProviderCommand::FetchGames { id } => Delta::Games {
            id,
            result: source.games_today(),
        },
        ProviderCommand::FetchPlayers { id, today_only } => Delta::Players {
            id,
            result: source.players(today_only),
        },
        ProviderCommand::FetchPlayerIds { id } => Delta::PlayerIds {
            id,
            result: source.players(false),
        },
        ProviderCommand::FetchPlayerPicks { id, player } => Delta::PlayerPicks {
            id,
            result: source.player_picks(&player),
        },
        ProviderCommand::FetchTopPicks {
            id,
            limit,
            min_confidence,
        } => Delta::TopPicks {
            id,
            result: source.top_picks(limit, min_confidence),
        },
    }
}
