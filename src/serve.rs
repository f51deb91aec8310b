//! Development server that renders pages on request.
//!
//! Every request path is resolved against the blueprint at request time:
//! found pages answer `200`, unknown paths answer `404` with the not-found
//! view. A fixed pool of workers shares the listener and the immutable site.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::config::ServeConfig;
use crate::Site;

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Request-handling threads per server
const WORKERS: usize = 4;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid interface address '{0}'")]
    Interface(String),

    #[error("failed to bind after {attempts} attempts (ports {first}-{last}): {message}")]
    Bind {
        attempts: u16,
        first: u16,
        last: u16,
        message: String,
    },

    #[error("failed to send response")]
    Io(#[from] std::io::Error),
}

/// A response before it is written to the socket
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// A bound server with its worker threads
pub struct Running {
    server: Arc<Server>,
    addr: SocketAddr,
    workers: Vec<JoinHandle<()>>,
}

impl Running {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until every worker has exited
    pub fn wait(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                warn!("serve worker panicked");
            }
        }
    }

    /// Wake the workers, let them finish the request in hand, and wait
    pub fn shutdown(self) {
        for _ in &self.workers {
            self.server.unblock();
        }
        self.wait();
    }
}

/// Start the server and handle requests until the listener shuts down.
pub fn serve_site(site: Arc<Site>, config: &ServeConfig) -> Result<(), ServeError> {
    start(site, config)?.wait();
    Ok(())
}

/// Bind the listener and spawn the worker pool without blocking
pub fn start(site: Arc<Site>, config: &ServeConfig) -> Result<Running, ServeError> {
    let interface: IpAddr = config
        .interface
        .parse()
        .map_err(|_| ServeError::Interface(config.interface.clone()))?;

    let (server, addr) = try_bind_port(interface, config.port, MAX_PORT_RETRIES)?;
    info!(
        "serving '{}' ({} pages) at http://{}",
        site.blueprint.client_name,
        site.blueprint.pages.len(),
        addr
    );

    let server = Arc::new(server);
    let mut workers = Vec::with_capacity(WORKERS);
    for id in 0..WORKERS {
        let server = Arc::clone(&server);
        let site = Arc::clone(&site);
        let worker = thread::Builder::new()
            .name(format!("serve-{}", id))
            .spawn(move || run_worker(&server, &site));
        match worker {
            Ok(handle) => workers.push(handle),
            Err(err) if workers.is_empty() => return Err(err.into()),
            Err(err) => warn!("could not spawn serve worker {}: {}", id, err),
        }
    }
    debug!("{} serve workers", workers.len());

    Ok(Running {
        server,
        addr,
        workers,
    })
}

fn run_worker(server: &Server, site: &Site) {
    loop {
        match server.recv() {
            Ok(request) => {
                if let Err(err) = handle_request(request, site) {
                    warn!("request error: {}", err);
                }
            }
            Err(err) => {
                debug!("serve worker stopping: {}", err);
                break;
            }
        }
    }
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr), ServeError> {
    let mut last_error = String::new();
    let mut last_port = base_port;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);
        last_port = port;

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    info!("port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(err) => {
                debug!("cannot bind {}: {}", addr, err);
                last_error = err.to_string();
            }
        }
    }

    Err(ServeError::Bind {
        attempts: max_retries,
        first: base_port,
        last: last_port,
        message: last_error,
    })
}

fn handle_request(request: Request, site: &Site) -> Result<(), ServeError> {
    let reply = respond(site, request.method(), request.url());
    debug!("{} {} -> {}", request.method(), request.url(), reply.status);

    let mut response =
        Response::from_string(reply.body).with_status_code(StatusCode(reply.status));
    if let Ok(header) = Header::from_bytes("Content-Type", reply.content_type) {
        response.add_header(header);
    }
    if reply.status == 405 {
        if let Ok(header) = Header::from_bytes("Allow", "GET, HEAD") {
            response.add_header(header);
        }
    }

    request.respond(response)?;
    Ok(())
}

/// Decide the response for a request without touching the network
pub fn respond(site: &Site, method: &Method, url: &str) -> Reply {
    if !matches!(method, Method::Get | Method::Head) {
        return Reply {
            status: 405,
            content_type: "text/plain; charset=utf-8",
            body: "405 Method Not Allowed".to_string(),
        };
    }

    let page = site.render(url);
    Reply {
        status: page.status.code(),
        content_type: "text/html; charset=utf-8",
        body: page.html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{Ipv4Addr, TcpListener, TcpStream};

    fn site() -> Site {
        Site::new(
            crate::parse(
                r#"{
                    "client_name": "Acme",
                    "pages": [
                        { "page_name": "Home", "page_path": "/" },
                        { "page_name": "Pricing", "page_path": "/pricing" }
                    ]
                }"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_found_page() {
        let reply = respond(&site(), &Method::Get, "/pricing/?utm_source=mail");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "text/html; charset=utf-8");
        assert!(reply.body.contains("<title>Pricing | Acme</title>"));
    }

    #[test]
    fn test_unknown_path_is_404_with_view() {
        let reply = respond(&site(), &Method::Get, "/does-not-exist");
        assert_eq!(reply.status, 404);
        assert!(reply.body.contains("404 Not Found"));
        assert!(reply.body.contains("/does-not-exist"));
    }

    #[test]
    fn test_head_is_allowed() {
        assert_eq!(respond(&site(), &Method::Head, "/").status, 200);
    }

    #[test]
    fn test_post_is_rejected() {
        let reply = respond(&site(), &Method::Post, "/");
        assert_eq!(reply.status, 405);
    }

    #[test]
    fn test_bind_retries_next_port() {
        let taken = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = taken.local_addr().unwrap().port();

        let (_server, addr) =
            try_bind_port(IpAddr::V4(Ipv4Addr::LOCALHOST), port, MAX_PORT_RETRIES).unwrap();
        assert_ne!(addr.port(), port);
    }

    fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        )
        .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn test_worker_pool_answers_concurrent_requests() {
        let free = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let config = ServeConfig {
            interface: "127.0.0.1".to_string(),
            port: free.local_addr().unwrap().port(),
        };
        drop(free);

        let running = start(Arc::new(site()), &config).unwrap();
        let addr = running.addr();

        let clients: Vec<_> = (0..WORKERS * 2)
            .map(|i| {
                let path = if i % 2 == 0 { "/pricing" } else { "/missing" };
                thread::spawn(move || (path, get(addr, path)))
            })
            .collect();
        for client in clients {
            let (path, response) = client.join().unwrap();
            if path == "/pricing" {
                assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
                assert!(response.contains("<title>Pricing | Acme</title>"));
            } else {
                assert!(response.starts_with("HTTP/1.1 404"), "{}", response);
            }
        }

        running.shutdown();
    }

    #[test]
    fn test_invalid_interface() {
        let config = ServeConfig {
            interface: "not-an-ip".to_string(),
            port: 5277,
        };
        let err = serve_site(Arc::new(site()), &config).unwrap_err();
        assert!(matches!(err, ServeError::Interface(_)));
    }
}
