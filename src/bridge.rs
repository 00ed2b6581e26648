//! Runs a [`FindEngine`] on its own thread and exposes it through async
//! request/reply messages.

use std::thread;

use findlight_search::{DocumentTree, FindEngine, HighlightSink, ScrollSink, SearchOptions};
use flume::{Receiver, Sender, bounded, unbounded};

enum Request {
    Search {
        options: SearchOptions,
        reply: Sender<usize>,
    },
    RemoveHighlights {
        reply: Sender<()>,
    },
    Navigate {
        target: i64,
        reply: Sender<usize>,
    },
    MatchedTexts {
        reply: Sender<Vec<String>>,
    },
    Shutdown {
        reply: Sender<()>,
    },
}

pub struct FindWorker;

impl FindWorker {
    /// Moves `engine` onto a dedicated thread. Requests are served one at a
    /// time in arrival order, so two searches never overlap.
    pub fn spawn<T, H, S>(engine: FindEngine<T, H, S>) -> anyhow::Result<FindClient>
    where
        T: DocumentTree + Send + 'static,
        T::NodeId: Send,
        H: HighlightSink<T::NodeId> + Send + 'static,
        S: ScrollSink<T::NodeId> + Send + 'static,
    {
        let (requests_tx, requests_rx) = unbounded();
        thread::Builder::new()
            .name("findlight-worker".to_string())
            .spawn(move || serve(engine, requests_rx))?;

        Ok(FindClient {
            requests: requests_tx,
        })
    }
}

fn serve<T, H, S>(mut engine: FindEngine<T, H, S>, requests: Receiver<Request>)
where
    T: DocumentTree,
    H: HighlightSink<T::NodeId>,
    S: ScrollSink<T::NodeId>,
{
    while let Ok(request) = requests.recv() {
        match request {
            Request::Search { options, reply } => {
                let _ = reply.send(engine.execute_search(options));
            }
            Request::RemoveHighlights { reply } => {
                engine.clear_highlights();
                let _ = reply.send(());
            }
            Request::Navigate { target, reply } => {
                let _ = reply.send(engine.navigate(target));
            }
            Request::MatchedTexts { reply } => {
                let _ = reply.send(engine.matched_texts().to_vec());
            }
            Request::Shutdown { reply } => {
                engine.clear_highlights();
                let _ = reply.send(());
                break;
            }
        }
    }
    log::debug!("Find worker stopped");
}

/// Cloneable handle to a running [`FindWorker`].
///
/// Every call degrades to `0` or an empty result when the worker is gone.
#[derive(Clone)]
pub struct FindClient {
    requests: Sender<Request>,
}

impl FindClient {
    pub async fn search(&self, options: SearchOptions) -> usize {
        self.request("search", |reply| Request::Search { options, reply })
            .await
            .unwrap_or(0)
    }

    pub async fn remove_highlights(&self) {
        let _ = self
            .request("remove highlights", |reply| Request::RemoveHighlights { reply })
            .await;
    }

    pub async fn go_next(&self, current: usize) -> usize {
        self.navigate(current as i64 + 1).await
    }

    pub async fn go_prev(&self, current: usize) -> usize {
        self.navigate(current as i64 - 1).await
    }

    pub async fn navigate(&self, target: i64) -> usize {
        self.request("navigate", |reply| Request::Navigate { target, reply })
            .await
            .unwrap_or(0)
    }

    pub async fn matched_texts(&self) -> Vec<String> {
        self.request("matched texts", |reply| Request::MatchedTexts { reply })
            .await
            .unwrap_or_default()
    }

    pub async fn shutdown(&self) {
        let _ = self
            .request("shutdown", |reply| Request::Shutdown { reply })
            .await;
    }

    async fn request<R>(&self, label: &str, make: impl FnOnce(Sender<R>) -> Request) -> Option<R> {
        let (reply_tx, reply_rx) = bounded(1);
        if self.requests.send_async(make(reply_tx)).await.is_err() {
            log::warn!("Find worker is gone; dropping {} request", label);
            return None;
        }

        match reply_rx.recv_async().await {
            Ok(value) => Some(value),
            Err(error) => {
                log::warn!("No reply to {} request: {}", label, error);
                None
            }
        }
    }
}
