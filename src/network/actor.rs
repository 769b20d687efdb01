//! Network actor - runs API requests in Tokio async runtime

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::ApiError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::BlogClient;

/// Network actor that executes API commands.
///
/// Each command runs in its own task; nothing is cancelled; the App layer
/// decides by request id whether a completion is still relevant.
pub struct NetworkActor {
    client: Arc<BlogClient>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: BlogClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: Arc::new(client),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.dispatch(cmd),
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Request task failed");
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        match cmd {
            NetworkCommand::FetchPosts { id, query } => {
                tracing::info!(
                    id,
                    page = query.page,
                    sort = %query.sort,
                    category = ?query.category_id,
                    tag = ?query.tag_id,
                    status = query.status.as_str(),
                    "Fetching posts"
                );
                self.spawn(id, async move {
                    let start = Instant::now();
                    client.get_posts(&query).await.map(|result| NetworkResponse::Posts {
                        id,
                        result,
                        time_ms: start.elapsed().as_millis() as u64,
                    })
                });
            }
            NetworkCommand::FetchPost { id, post_id } => {
                tracing::info!(id, post_id = %post_id, "Fetching post");
                self.spawn(id, async move {
                    client
                        .get_post(&post_id)
                        .await
                        .map(|post| NetworkResponse::Post { id, post })
                });
            }
            NetworkCommand::FetchTaxonomy { id } => {
                tracing::info!(id, "Fetching categories and tags");
                self.spawn(id, async move {
                    client
                        .get_taxonomy()
                        .await
                        .map(|(categories, tags)| NetworkResponse::Taxonomy {
                            id,
                            categories,
                            tags,
                        })
                });
            }
            NetworkCommand::Login { id, request } => {
                tracing::info!(id, email = %request.email, "Logging in");
                self.spawn(id, async move {
                    client
                        .login(&request)
                        .await
                        .map(|auth| NetworkResponse::Authenticated { id, token: auth.token })
                });
            }
            NetworkCommand::Signup { id, request } => {
                tracing::info!(id, email = %request.email, "Signing up");
                self.spawn(id, async move {
                    client
                        .signup(&request)
                        .await
                        .map(|auth| NetworkResponse::Authenticated { id, token: auth.token })
                });
            }
            NetworkCommand::FetchProfile { id } => {
                tracing::info!(id, "Fetching user profile");
                self.spawn(id, async move {
                    client
                        .get_user_profile()
                        .await
                        .map(|user| NetworkResponse::Profile { id, user })
                });
            }
            NetworkCommand::Shutdown => {}
        }
    }

    /// Run `request` in the background and report its outcome
    fn spawn<F>(&mut self, id: u64, request: F)
    where
        F: Future<Output = Result<NetworkResponse, ApiError>> + Send + 'static,
    {
        let response_tx = self.response_tx.clone();
        self.active_requests.spawn(async move {
            let start = Instant::now();
            let response = match request.await {
                Ok(response) => {
                    tracing::info!(id, "Request completed");
                    response
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "Request failed");
                    NetworkResponse::Error {
                        id,
                        message: e.user_message(),
                        unauthorized: e.is_unauthorized(),
                        time_ms: start.elapsed().as_millis() as u64,
                    }
                }
            };
            let _ = response_tx.send(response);
        });
    }
}
