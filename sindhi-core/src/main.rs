use std::io::ErrorKind;
use std::rc::Rc;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{self, LocalSet};
use tracing::{error, info, warn};

use sindhi_core::config::Config;
use sindhi_core::error::TranslateResult;
use sindhi_core::logging;
use sindhi_core::protocol;
use sindhi_core::services::capabilities::Unsupported;
use sindhi_core::services::resolver::Resolver;
use sindhi_core::services::session::Session;
use sindhi_core::services::storage::FileStore;

fn build_session(cfg: &Config) -> TranslateResult<Session> {
    let store = Arc::new(FileStore::new(&cfg.data_dir));
    let resolver = Resolver::from_config(cfg, store)?;
    Ok(Session::new(resolver, Arc::new(Unsupported), Arc::new(Unsupported)))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let cfg = Config::from_env();
    info!(data_dir = %cfg.data_dir.display(), endpoint = %cfg.endpoint, "starting sindhi-core");

    let session = match build_session(&cfg) {
        Ok(s) => Rc::new(s),
        Err(e) => {
            error!("failed to start: {e}");
            std::process::exit(1);
        }
    };

    LocalSet::new().run_until(serve(session)).await;
}

/// Requests run concurrently on this thread; responses are written as they finish
/// and carry the request `id` so the host can match them up.
async fn serve(session: Rc<Session>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = task::spawn_local(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(response) = rx.recv().await {
            if stdout.write_all(response.as_bytes()).await.is_err()
                || stdout.write_all(b"\n").await.is_err()
            {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("skipping unreadable request line: {e}");
                continue;
            }
            Err(e) => {
                error!("stdin closed: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let session = session.clone();
        let tx = tx.clone();
        let on_panic = protocol::internal_error(&line);

        task::spawn_local(async move {
            let handled = task::spawn_local({
                let session = session.clone();
                async move { protocol::handle(&session, &line).await }
            });

            let response = match handled.await {
                Ok(resp) => resp,
                Err(e) => {
                    error!("request handler failed: {e}");
                    on_panic
                }
            };

            let _ = tx.send(response);
        });
    }

    // The writer ends once every in-flight request has replied.
    drop(tx);
    let _ = writer.await;
}
