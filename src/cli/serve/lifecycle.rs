//! Server binding and shutdown.

use crate::log;
use anyhow::Result;
use crossbeam::channel::Receiver;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    thread::{self, JoinHandle},
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, trying the next ports when
/// the requested one is taken.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Unblock `server` once a shutdown signal arrives.
///
/// The watcher also exits when every sender is dropped.
pub fn spawn_shutdown_watcher(server: Arc<Server>, shutdown_rx: Receiver<()>) -> JoinHandle<()> {
    thread::spawn(move || {
        if shutdown_rx.recv().is_ok() {
            log!("serve"; "shutting down...");
            server.unblock();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_retries_next_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let (first, addr) = bind_with_retry(localhost, 0).unwrap();
        let taken = first.server_addr().to_ip().unwrap().port();
        assert_eq!(addr.port(), 0);

        let (_second, addr) = bind_with_retry(localhost, taken).unwrap();
        assert_ne!(addr.port(), taken);
    }

    #[test]
    fn test_watcher_unblocks_server() {
        let (server, _) = bind_with_retry(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        let server = Arc::new(server);
        let (tx, rx) = channel::unbounded();
        let watcher = spawn_shutdown_watcher(Arc::clone(&server), rx);

        tx.send(()).unwrap();
        watcher.join().unwrap();
        // unblocked: the accept loop ends immediately
        assert!(server.incoming_requests().next().is_none());
    }
}
