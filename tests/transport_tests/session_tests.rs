//! Session Tests
//!
//! Exchange semantics over in-memory channels: polling, timeouts, state
//! transitions and response matching.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::{loopback_session, ScriptedChannel};
use pigwire::error::{Error, TransportError};
use pigwire::protocol::{encode, Command, Packet, MAX_EXTENSION_SIZE};
use pigwire::transport::{ManualClock, SessionOptions};
use pigwire::Session;

fn options(timeout_ms: u64, poll_ms: u64) -> SessionOptions {
    SessionOptions {
        response_timeout: Duration::from_millis(timeout_ms),
        poll_interval: Duration::from_millis(poll_ms),
    }
}

// =============================================================================
// Successful Exchanges
// =============================================================================

#[test]
fn test_exchange_returns_matching_response() {
    let (session, daemon, _) = loopback_session();

    let response = session.exchange(&Packet::request(Command::Version, 0, 0)).unwrap();

    assert_eq!(response.command, Command::Version.opcode());
    assert_eq!(response.result(), common::DAEMON_VERSION as i32);
    assert_eq!(daemon.lock().opcodes(), vec![26]);
    assert!(session.is_open());
}

#[test]
fn test_exchange_passes_negative_results_through() {
    let (session, _, _) = loopback_session();

    let response = session.exchange(&Packet::request(Command::SetMode, 99, 0)).unwrap();

    assert_eq!(response.result(), -3);
    assert!(session.is_open());
}

#[test]
fn test_exchange_reads_extension_for_extended_commands() {
    let reply = Packet::response_with_data(Command::SpiXfer.opcode(), 0, 0, vec![7, 8, 9]);
    let session = Session::from_channel(ScriptedChannel::new(&encode(&reply)), options(500, 5))
        .unwrap();

    let request = Packet::request_with_extension(Command::SpiXfer, 0, 0, vec![1, 2, 3]);
    let response = session.exchange(&request).unwrap();

    assert_eq!(&response.extension[..], &[7, 8, 9]);
}

#[test]
fn test_request_bytes_reach_channel() {
    let reply = Packet::response(Command::Write.opcode(), 17, 1, 0);
    let channel = ScriptedChannel::new(&encode(&reply));
    let written = channel.written();
    let session = Session::from_channel(channel, options(500, 5)).unwrap();

    let request = Packet::request(Command::Write, 17, 1);
    session.exchange(&request).unwrap();

    assert_eq!(&written.lock()[..], &encode(&request)[..]);
}

// =============================================================================
// Timeouts
// =============================================================================

#[test]
fn test_silent_peer_times_out_deterministically() {
    let clock = Arc::new(ManualClock::new());
    let session = Session::from_channel(ScriptedChannel::silent(), options(500, 5))
        .unwrap()
        .with_clock(clock.clone());

    let err = session.exchange(&Packet::request(Command::Read, 4, 0)).unwrap_err();

    match err {
        Error::Transport(TransportError::Timeout { waited }) => {
            assert!(waited >= Duration::from_millis(500));
            assert!(waited <= Duration::from_millis(505));
        }
        other => panic!("Expected timeout, got {:?}", other),
    }
    assert!(clock.elapsed() >= Duration::from_millis(500));
    assert!(clock.elapsed() <= Duration::from_millis(505));
}

#[test]
fn test_last_poll_is_clamped_to_timeout() {
    let clock = Arc::new(ManualClock::new());
    let session = Session::from_channel(ScriptedChannel::silent(), options(500, 7))
        .unwrap()
        .with_clock(clock.clone());

    assert!(session.exchange(&Packet::request(Command::Tick, 0, 0)).is_err());
    assert_eq!(clock.elapsed(), Duration::from_millis(500));
}

#[test]
fn test_timeout_breaks_session() {
    let clock = Arc::new(ManualClock::new());
    let session = Session::from_channel(ScriptedChannel::silent(), options(50, 5))
        .unwrap()
        .with_clock(clock);

    assert!(session.exchange(&Packet::request(Command::Read, 4, 0)).is_err());
    assert!(session.is_broken());

    match session.exchange(&Packet::request(Command::Read, 4, 0)) {
        Err(Error::Transport(TransportError::Broken)) => {}
        other => panic!("Expected Broken, got {:?}", other),
    }
}

// =============================================================================
// Failure Modes
// =============================================================================

#[test]
fn test_mismatched_opcode_is_desynchronized() {
    let stray = Packet::response(Command::Read.opcode(), 4, 0, 1);
    let session = Session::from_channel(ScriptedChannel::new(&encode(&stray)), options(500, 5))
        .unwrap();

    match session.exchange(&Packet::request(Command::Version, 0, 0)) {
        Err(Error::Transport(TransportError::Desynchronized { expected, received })) => {
            assert_eq!(expected, 26);
            assert_eq!(received, 3);
        }
        other => panic!("Expected Desynchronized, got {:?}", other),
    }
    assert!(session.is_broken());
}

#[test]
fn test_peer_hang_up_is_connection_closed() {
    let session = Session::from_channel(ScriptedChannel::hung_up(), options(500, 5)).unwrap();

    match session.exchange(&Packet::request(Command::Version, 0, 0)) {
        Err(Error::Transport(TransportError::ConnectionClosed)) => {}
        other => panic!("Expected ConnectionClosed, got {:?}", other),
    }
}

#[test]
fn test_truncated_extension_is_connection_closed() {
    let reply = Packet::response_with_data(Command::SerialRead.opcode(), 0, 8, vec![1, 2, 3, 4]);
    let bytes = encode(&reply);
    let session = Session::from_channel(ScriptedChannel::new(&bytes[..18]), options(500, 5))
        .unwrap();

    match session.exchange(&Packet::request(Command::SerialRead, 0, 8)) {
        Err(Error::Transport(TransportError::ConnectionClosed)) => {}
        other => panic!("Expected ConnectionClosed, got {:?}", other),
    }
}

#[test]
fn test_oversized_request_is_rejected_before_writing() {
    let (session, daemon, writes) = loopback_session();
    let huge = vec![0u8; MAX_EXTENSION_SIZE as usize + 1];

    match session.exchange(&Packet::request_with_extension(Command::SpiWrite, 0, 0, huge)) {
        Err(Error::Transport(TransportError::Frame(msg))) => {
            assert!(msg.contains("Extension too large"))
        }
        other => panic!("Expected frame error, got {:?}", other),
    }
    assert_eq!(writes.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(daemon.lock().requests.is_empty());

    // Nothing reached the wire, so the session is still usable
    assert!(session.is_open());
    assert!(session.exchange(&Packet::request(Command::Version, 0, 0)).is_ok());
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_zero_poll_interval_is_rejected() {
    match Session::from_channel(ScriptedChannel::silent(), options(500, 0)) {
        Err(Error::Config(msg)) => assert!(msg.contains("poll interval")),
        Err(other) => panic!("Expected config error, got {:?}", other),
        Ok(_) => panic!("Expected config error"),
    }
}

#[test]
fn test_timeout_shorter_than_poll_is_rejected() {
    assert!(options(3, 5).validate().is_err());
    assert!(options(5, 5).validate().is_ok());
    assert!(SessionOptions::default().validate().is_ok());
    assert!(Session::from_channel(ScriptedChannel::silent(), options(3, 5)).is_err());
}

// =============================================================================
// Close
// =============================================================================

#[test]
fn test_exchange_after_close_fails_fast() {
    let (session, daemon, writes) = loopback_session();

    session.close().unwrap();
    assert!(!session.is_open());

    match session.exchange(&Packet::request(Command::Version, 0, 0)) {
        Err(Error::Transport(TransportError::Closed)) => {}
        other => panic!("Expected Closed, got {:?}", other),
    }
    assert_eq!(writes.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(daemon.lock().requests.is_empty());
}

#[test]
fn test_close_is_idempotent() {
    let (session, _, _) = loopback_session();
    session.close().unwrap();
    session.close().unwrap();
}

#[test]
fn test_close_from_broken_state() {
    let clock = Arc::new(ManualClock::new());
    let session = Session::from_channel(ScriptedChannel::silent(), options(20, 5))
        .unwrap()
        .with_clock(clock);

    assert!(session.exchange(&Packet::request(Command::Tick, 0, 0)).is_err());
    session.close().unwrap();

    match session.exchange(&Packet::request(Command::Tick, 0, 0)) {
        Err(Error::Transport(TransportError::Closed)) => {}
        other => panic!("Expected Closed, got {:?}", other),
    }
}

#[test]
fn test_close_interrupts_pending_exchange() {
    let session = Arc::new(
        Session::from_channel(ScriptedChannel::silent(), options(10_000, 5)).unwrap(),
    );

    let waiter = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            let started = Instant::now();
            let outcome = session.exchange(&Packet::request(Command::Read, 4, 0));
            (outcome, started.elapsed())
        })
    };

    thread::sleep(Duration::from_millis(50));
    session.close().unwrap();

    let (outcome, elapsed) = waiter.join().unwrap();
    match outcome {
        Err(Error::Transport(TransportError::Closed)) => {}
        other => panic!("Expected Closed, got {:?}", other),
    }
    assert!(elapsed < Duration::from_secs(5));
}
