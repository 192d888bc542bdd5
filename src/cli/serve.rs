use std::sync::Arc;

use crate::{config, error, info, server, store::ShowStore, warning};

pub async fn serve(store: Arc<ShowStore>, open_browser: bool) {
    let addr = config::server_addr();
    let server_addr = addr.clone();
    let server_handle =
        tokio::spawn(async move { server::start_api_server(store, &server_addr).await });

    info!("Serving views on http://{}/", addr);
    if open_browser {
        if let Err(e) = webbrowser::open(&format!("http://{}/", addr)) {
            warning!("Cannot open browser: {}", e);
        }
    }

    match server_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server stopped: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }
}
