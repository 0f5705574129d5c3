//! TCP Tests
//!
//! End-to-end exchanges against a daemon stand-in on a loopback socket.

#[path = "../common/mod.rs"]
mod common;

use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::DaemonState;
use crossbeam::channel::{unbounded, Receiver};
use parking_lot::Mutex;
use pigwire::client::{Level, Mode};
use pigwire::error::{Error, TransportError};
use pigwire::protocol::{read_request, write_packet};
use pigwire::{Config, Pigpio};

/// Serve one connection from `daemon`, reporting each opcode received
fn spawn_daemon(daemon: Arc<Mutex<DaemonState>>) -> (u16, Receiver<u32>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = unbounded();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        while let Ok(request) = read_request(&mut stream) {
            let response = daemon.lock().handle(&request);
            if write_packet(&mut stream, &response).is_err() {
                break;
            }
            let _ = tx.send(request.command);
        }
    });

    (port, rx)
}

/// Accept one connection and hand it to `serve`
fn spawn_peer<F>(serve: F) -> u16
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve(stream);
    });

    port
}

fn config(port: u16) -> Config {
    Config::builder().host("127.0.0.1").port(port).build()
}

#[test]
fn test_gpio_round_trip_over_tcp() {
    let daemon = Arc::new(Mutex::new(DaemonState::new()));
    let (port, opcodes) = spawn_daemon(Arc::clone(&daemon));

    let pi = Pigpio::connect(&config(port)).unwrap();
    pi.set_mode(17, Mode::Output).unwrap();
    pi.write(17, Level::High).unwrap();
    assert_eq!(pi.read(17).unwrap(), Level::High);
    pi.close().unwrap();

    let seen: Vec<u32> = opcodes.iter().take(3).collect();
    assert_eq!(seen, vec![0, 4, 3]);
    assert_eq!(daemon.lock().modes[17], 1);
}

#[test]
fn test_extended_response_over_tcp() {
    let daemon = Arc::new(Mutex::new(DaemonState::new()));
    let (port, _) = spawn_daemon(daemon);

    let pi = Pigpio::connect(&config(port)).unwrap();
    let handle = pi.spi_open(0, 1_000_000, 0).unwrap();
    let reply = pi.spi_xfer(handle, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();

    assert_eq!(&reply[..], &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_concurrent_callers_share_session() {
    let daemon = Arc::new(Mutex::new(DaemonState::new()));
    let (port, _) = spawn_daemon(Arc::clone(&daemon));
    let pi = Arc::new(Pigpio::connect(&config(port)).unwrap());

    let workers: Vec<_> = (0..4u32)
        .map(|i| {
            let pi = Arc::clone(&pi);
            thread::spawn(move || {
                let pin = 20 + i;
                for n in 0..25 {
                    let level = if n % 2 == 0 { Level::High } else { Level::Low };
                    pi.write(pin, level).unwrap();
                    assert_eq!(pi.read(pin).unwrap(), level);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(daemon.lock().requests.len(), 4 * 25 * 2);
}

#[test]
fn test_connect_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    match Pigpio::connect(&config(port)) {
        Err(Error::Transport(TransportError::Connect { addr, .. })) => {
            assert_eq!(addr, format!("127.0.0.1:{}", port));
        }
        Err(other) => panic!("Expected Connect error, got {:?}", other),
        Ok(_) => panic!("Expected Connect error"),
    }
}

#[test]
fn test_unresponsive_daemon_times_out() {
    let (hold_tx, hold_rx) = unbounded::<()>();
    let port = spawn_peer(move |_stream| {
        // Keep the socket open until the test is done
        let _ = hold_rx.recv_timeout(Duration::from_secs(5));
    });

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .response_timeout_ms(60)
        .poll_interval_ms(5)
        .build();
    let pi = Pigpio::connect(&config).unwrap();

    let started = Instant::now();
    match pi.version() {
        Err(Error::Transport(TransportError::Timeout { .. })) => {}
        other => panic!("Expected timeout, got {:?}", other),
    }
    assert!(started.elapsed() >= Duration::from_millis(60));
    assert!(pi.transport().is_broken());

    drop(hold_tx);
}

#[test]
fn test_daemon_hang_up_is_transport_error() {
    let port = spawn_peer(|stream| drop(stream));

    let pi = Pigpio::connect(&config(port)).unwrap();
    thread::sleep(Duration::from_millis(50));

    let err = pi.version().unwrap_err();
    assert!(err.is_transport(), "unexpected error: {:?}", err);
}
