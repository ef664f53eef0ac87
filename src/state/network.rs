use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use scorebox_api::client::ScoresApi;
use tokio::sync::mpsc;

pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub indicator: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, indicator: ' ' }
    }
}

/// Serializes all network traffic onto one task: requests in, responses out.
/// Situation-fetch failures are swallowed here (logged, no response sent) so
/// they can never replace the main game display.
pub struct NetworkWorker {
    client: ScoresApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: ScoresApi::new(),
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let response = match request {
                NetworkRequest::LoadScoreboard { league, date } => {
                    self.set_loading(true, ' ').await;
                    debug!("loading {} scoreboard for {date}", league.code());
                    let result = self.client.fetch_scoreboard(league, date).await;
                    self.set_loading(false, if result.is_ok() { ' ' } else { ERROR_CHAR })
                        .await;
                    match result {
                        Ok(games) => NetworkResponse::ScoreboardLoaded { league, date, games },
                        Err(err) => NetworkResponse::ScoreboardFailed {
                            message: err.to_string(),
                        },
                    }
                }
                NetworkRequest::LoadSituation { league, game_id } => {
                    debug!("loading {} situation for game {game_id}", league.code());
                    match self.client.fetch_situation(league, &game_id).await {
                        Ok(situation) => NetworkResponse::SituationLoaded {
                            league,
                            game_id,
                            situation,
                        },
                        Err(err) => {
                            // Non-fatal: the renderer keeps whatever it last
                            // showed and the next render cycle may retry.
                            debug!("situation fetch failed for {game_id}: {err}");
                            continue;
                        }
                    }
                }
            };

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn set_loading(&self, is_loading: bool, indicator: char) {
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading, indicator },
            })
            .await;
    }
}
