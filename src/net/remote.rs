//! src/net/remote.rs
//!
//! Tiny line-based TCP control server. Each client gets a thread; parsed
//! commands are forwarded to the main loop over a channel, so the loop stays
//! the only owner of application state.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::gesture::ViewState;

/// What the main loop receives from a remote client.
#[derive(Debug)]
pub enum RemoteCommand {
    Tap,
    Refresh,
    /// Stop the application.
    Exit,
    /// Report the active view on the enclosed channel.
    Status(Sender<ViewState>),
}

/// A parsed request line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Tap,
    Refresh,
    Status,
    Exit,
    /// Close this connection.
    Quit,
}

/// Parse one whitespace-trimmed ASCII command.
pub fn parse_request(raw: &str) -> Result<Request, String> {
    let parts: Vec<_> = raw.split_whitespace().collect();
    if parts.is_empty() {
        return Err("empty".to_string());
    }
    if parts.len() > 1 {
        return Err(format!("unexpected argument {}", parts[1..].join(" ")));
    }
    match parts[0].to_lowercase().as_str() {
        "tap" => Ok(Request::Tap),
        "refresh" => Ok(Request::Refresh),
        "status" => Ok(Request::Status),
        "exit" => Ok(Request::Exit),
        "quit" => Ok(Request::Quit),
        other => Err(format!("unknown {}", other)),
    }
}

/// Bind `addr` and spawn the accept loop on its own thread.
pub fn spawn_remote_server(addr: &str, commands: Sender<RemoteCommand>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr)?;
    info!(%addr, "remote control listening");
    thread::spawn(move || remote_server(listener, commands));
    Ok(())
}

/// How long a `status` request waits for the main loop, which may be busy
/// in a fetch.
const STATUS_TIMEOUT: Duration = Duration::from_secs(2);

/// Forwarding failure that ends the session.
const APP_CLOSED: &str = "app_closed";

fn remote_server(listener: TcpListener, commands: Sender<RemoteCommand>) {
    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let tx = commands.clone();
                thread::spawn(move || handle_remote_client(s, tx, STATUS_TIMEOUT));
            }
            Err(e) => {
                warn!(error = %e, "remote_server: accept error");
            }
        }
    }
}

/// Serve one client until it disconnects, sends `quit` or `exit`, or the
/// main loop has gone away. A `status` the loop does not answer within
/// `status_timeout` gets `ERR timeout` and the session continues.
///
/// Commands: `tap`, `refresh`, `status`, `exit`, `quit`.
pub fn handle_remote_client(
    mut s: TcpStream,
    commands: Sender<RemoteCommand>,
    status_timeout: Duration,
) {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    debug!(%peer, "remote client connected");

    let reader = match s.try_clone() {
        Ok(r) => r,
        Err(e) => {
            warn!(%peer, error = %e, "cannot clone client stream");
            return;
        }
    };
    let mut rdr = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        if rdr.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let (reply, close) = match parse_request(raw) {
            Ok(Request::Quit) => ("OK bye\n".to_string(), true),
            Ok(request) => match forward(request, &commands, status_timeout) {
                Ok(reply) => (reply, request == Request::Exit),
                Err(msg) => (format!("ERR {}\n", msg), msg == APP_CLOSED),
            },
            Err(msg) => (format!("ERR {}\n", msg), false),
        };
        let _ = s.write_all(reply.as_bytes());
        if close {
            break;
        }
    }

    debug!(%peer, "remote client disconnected");
    let _ = s.shutdown(Shutdown::Both);
}

fn forward(
    request: Request,
    commands: &Sender<RemoteCommand>,
    status_timeout: Duration,
) -> Result<String, &'static str> {
    let closed = |_| APP_CLOSED;
    match request {
        Request::Tap => commands.send(RemoteCommand::Tap).map_err(closed)?,
        Request::Refresh => commands.send(RemoteCommand::Refresh).map_err(closed)?,
        Request::Exit => commands.send(RemoteCommand::Exit).map_err(closed)?,
        Request::Status => {
            let (tx, rx) = mpsc::channel();
            commands.send(RemoteCommand::Status(tx)).map_err(closed)?;
            let view = rx.recv_timeout(status_timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => "timeout",
                RecvTimeoutError::Disconnected => APP_CLOSED,
            })?;
            return Ok(format!("OK {}\n", view.label()));
        }
        Request::Quit => {}
    }
    Ok("OK\n".to_string())
}
