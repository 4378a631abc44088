/*
 *  main.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Desktop shell: runs the face against the wall clock, reads phone
 *	messages as JSON lines on stdin and writes outbound ones to stdout
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::RgbColor;
use env_logger::Env;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

#[cfg(unix)] // Only compile this block on Unix-like systems
use tokio::signal::unix::{signal, SignalKind}; // Import specific Unix signals

use shards::clock::TickUnit;
use shards::config;
use shards::vframebuf::VarFrameBuf;
use shards::{FileStore, InboundMessage, OutboundMessage, TransportError, WatchFace, WatchHost};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Platform stand-in. Sends are written out immediately; their results are
/// queued and fed back to the face as outbox callbacks.
struct SimHost {
    unit: Option<TickUnit>,
    dirty: bool,
    clock_24h: bool,
    connected: bool,
    outbox_results: Vec<Result<(), TransportError>>,
}

impl SimHost {
    fn new(clock_24h: bool, connected: bool) -> Self {
        Self { unit: None, dirty: false, clock_24h, connected, outbox_results: Vec::new() }
    }
}

impl WatchHost for SimHost {
    fn subscribe_ticks(&mut self, unit: TickUnit) {
        debug!("ticks: {:?}", unit);
        self.unit = Some(unit);
    }

    fn unsubscribe_ticks(&mut self) {
        self.unit = None;
    }

    fn send_message(&mut self, message: &OutboundMessage) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        let json = message.to_json().map_err(|e| TransportError::Encode(e.to_string()))?;
        println!("{json}");
        self.outbox_results.push(Ok(()));
        Ok(())
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }

    fn vibrate_double_pulse(&mut self) {
        info!("bzz-bzz");
    }

    fn clock_is_24h_style(&self) -> bool {
        self.clock_24h
    }
}

fn deliver_outbox(face: &mut WatchFace<FileStore>, host: &mut SimHost) {
    for result in host.outbox_results.drain(..) {
        match result {
            Ok(()) => face.on_outbox_sent(),
            Err(e) => face.on_outbox_failed(&e),
        }
    }
}

/// Platform events typed on stdin: `!battery 40`, `!connected false`.
fn simulate_event(face: &mut WatchFace<FileStore>, host: &mut SimHost, command: &str) {
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("battery"), Some(v)) => match v.parse::<u8>() {
            Ok(p) if p <= 100 => face.on_battery(host, p),
            _ => warn!("battery wants 0..=100, got {}", v),
        },
        (Some("connected"), Some(v)) => match v.parse::<bool>() {
            Ok(up) => {
                host.connected = up;
                face.on_connectivity(host, up);
            }
            Err(_) => warn!("connected wants true|false, got {}", v),
        },
        _ => warn!("unknown command '{}'", command),
    }
}

fn dump_frame(fb: &VarFrameBuf<Rgb888>, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    fb.write_ppm(&mut out).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(unix)]
async fn signal_handler() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load().context("loading configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("This {} keeps the hours", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let caps = cfg.capabilities();
    let store = FileStore::new(cfg.storage_path());
    info!("settings at {}", store.path().display());

    let mut face = WatchFace::new(caps, store);
    let mut host = SimHost::new(cfg.clock_24h(), cfg.connected());
    let mut fb = VarFrameBuf::new(caps.width, caps.height, Rgb888::BLACK);

    face.start(&mut host, &Local::now(), cfg.battery_percent(), cfg.connected());
    deliver_outbox(&mut face, &mut host);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last_minute = Local::now().minute();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = &mut shutdown => {
                if let Err(e) = res {
                    warn!("signal handler failed: {}", e);
                }
                break;
            }

            _ = ticker.tick() => {
                let now = Local::now();
                let due = match host.unit {
                    Some(TickUnit::Second) => true,
                    Some(TickUnit::Minute) => now.minute() != last_minute,
                    None => false,
                };
                last_minute = now.minute();
                if due {
                    face.on_tick(&mut host, &now);
                }
            }

            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(text)) if text.trim().is_empty() => {}
                    Ok(Some(text)) if text.starts_with('!') => {
                        simulate_event(&mut face, &mut host, text[1..].trim());
                    }
                    Ok(Some(text)) => match InboundMessage::from_json(&text) {
                        Ok(msg) => { face.on_message(&mut host, &msg); }
                        Err(e) => face.on_message_dropped(&TransportError::Decode(e.to_string())),
                    },
                    Ok(None) => {
                        info!("stdin closed, no more phone messages");
                        stdin_open = false;
                    }
                    Err(e) => {
                        face.on_message_dropped(&TransportError::Decode(e.to_string()));
                        stdin_open = false;
                    }
                }
            }
        }

        deliver_outbox(&mut face, &mut host);

        if host.dirty {
            host.dirty = false;
            let source = face.draw(&mut fb);
            debug!("frame drawn ({:?})", source);
            if let Some(path) = cfg.frame_dump() {
                if let Err(e) = dump_frame(&fb, path) {
                    warn!("frame dump failed: {:#}", e);
                }
            }
        }
    }

    face.stop(&mut host);
    info!("bye");
    Ok(())
}
