//! Transport scripts
//!
//! A script is one command per line, the same intents a user issues from the
//! pages and the transport bar:
//!
//! ```text
//! # comments and blank lines are skipped
//! play-album dark-side 0
//! play dsotm3
//! toggle
//! seek 0.5
//! volume 65
//! mute
//! next
//! previous
//! shuffle
//! repeat
//! enqueue dsotm1
//! skip 2
//! position 42
//! ended
//! stop
//! clear
//! ```

use crate::{
    catalog::Catalog,
    config::OutputFormat,
    error::{Result, TransportError},
};
use cadence_playback::{PlaybackController, Snapshot, TransportBar, TransportView};
use serde::Serialize;
use std::io::Write;
use std::sync::mpsc;

/// One parsed script command
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Play(String),
    PlayAlbum { album: String, start: usize },
    TogglePlayPause,
    Seek(f64),
    Volume(i32),
    ToggleMute,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,
    Enqueue(String),
    SkipTo(usize),
    Stop,
    ClearQueue,
    TrackEnded,
    Position(f64),
}

/// A step with the line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub text: String,
    pub step: Step,
}

/// Parse a whole script, failing on the first bad line
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step =
            parse_step(trimmed).map_err(|message| TransportError::Script { line, message })?;
        lines.push(ScriptLine {
            line,
            text: trimmed.to_string(),
            step,
        });
    }

    Ok(lines)
}

fn parse_step(text: &str) -> std::result::Result<Step, String> {
    let mut words = text.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let step = match (keyword.as_str(), args.as_slice()) {
        ("play", [id]) => Step::Play((*id).to_string()),
        ("play-album", [album]) => Step::PlayAlbum {
            album: (*album).to_string(),
            start: 0,
        },
        ("play-album", [album, start]) => Step::PlayAlbum {
            album: (*album).to_string(),
            start: parse_arg(start, "start index")?,
        },
        ("toggle", []) => Step::TogglePlayPause,
        ("seek", [fraction]) => Step::Seek(parse_arg(fraction, "seek fraction")?),
        ("volume", [percent]) => Step::Volume(parse_arg(percent, "volume")?),
        ("mute", []) => Step::ToggleMute,
        ("next", []) => Step::Next,
        ("previous" | "prev", []) => Step::Previous,
        ("shuffle", []) => Step::ToggleShuffle,
        ("repeat", []) => Step::CycleRepeat,
        ("enqueue", [id]) => Step::Enqueue((*id).to_string()),
        ("skip", [index]) => Step::SkipTo(parse_arg(index, "queue index")?),
        ("stop", []) => Step::Stop,
        ("clear", []) => Step::ClearQueue,
        ("ended", []) => Step::TrackEnded,
        ("position", [seconds]) => Step::Position(parse_arg(seconds, "position")?),
        (keyword, _) if is_known(keyword) => {
            return Err(format!("wrong number of arguments for {:?}", keyword))
        }
        (keyword, _) => return Err(format!("unknown command {:?}", keyword)),
    };

    Ok(step)
}

fn is_known(keyword: &str) -> bool {
    matches!(
        keyword,
        "play"
            | "play-album"
            | "toggle"
            | "seek"
            | "volume"
            | "mute"
            | "next"
            | "previous"
            | "prev"
            | "shuffle"
            | "repeat"
            | "enqueue"
            | "skip"
            | "stop"
            | "clear"
            | "ended"
            | "position"
    )
}

fn parse_arg<T: std::str::FromStr>(text: &str, what: &str) -> std::result::Result<T, String> {
    text.parse().map_err(|_| format!("invalid {}: {:?}", what, text))
}

/// How a script run went
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub commands: usize,
    pub ignored: usize,
    pub published: usize,
}

#[derive(Serialize)]
struct Record<'a, T: Serialize> {
    line: usize,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignored: Option<String>,
    state: T,
}

/// Runs scripts against one controller and prints what subscribers see
pub struct ScriptRunner<'a> {
    catalog: &'a Catalog,
    format: OutputFormat,
    pretty: bool,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(catalog: &'a Catalog, format: OutputFormat, pretty: bool) -> Self {
        Self {
            catalog,
            format,
            pretty,
        }
    }

    /// Apply every line in order, writing one JSON record per published
    /// snapshot
    pub fn run(
        &self,
        controller: &mut PlaybackController,
        script: &[ScriptLine],
        out: &mut dyn Write,
    ) -> Result<RunSummary> {
        let (tx, rx) = mpsc::channel::<Snapshot>();
        let subscription = controller.subscribe(move |snapshot| {
            // Receiver lives until the end of this run
            let _ = tx.send(snapshot.clone());
        });

        let result = self.run_lines(controller, script, &rx, out);
        controller.unsubscribe(subscription);
        result
    }

    fn run_lines(
        &self,
        controller: &mut PlaybackController,
        script: &[ScriptLine],
        rx: &mpsc::Receiver<Snapshot>,
        out: &mut dyn Write,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for line in script {
            self.dispatch(controller, line)?;
            summary.commands += 1;

            let ignored = controller.last_condition().map(ToString::to_string);
            if let Some(reason) = &ignored {
                summary.ignored += 1;
                tracing::warn!(line = line.line, command = %line.text, "ignored: {}", reason);
            }

            for event in controller.drain_events() {
                tracing::debug!(line = line.line, ?event, "playback event");
            }

            for snapshot in rx.try_iter() {
                summary.published += 1;
                self.write_record(out, line, ignored.clone(), &snapshot)?;
            }
        }

        tracing::info!(
            commands = summary.commands,
            ignored = summary.ignored,
            "script finished"
        );
        Ok(summary)
    }

    fn dispatch(&self, controller: &mut PlaybackController, line: &ScriptLine) -> Result<()> {
        let resolve = |id: &str| {
            self.catalog.track(id).map_err(|e| TransportError::Script {
                line: line.line,
                message: e.to_string(),
            })
        };

        // Page and transport bar intents go through the view boundary
        let view: &mut dyn TransportView = &mut *controller;
        match &line.step {
            Step::Play(id) => {
                view.play(resolve(id)?);
            }
            Step::PlayAlbum { album, start } => {
                let tracks = self
                    .catalog
                    .album_tracks(album)
                    .map_err(|e| TransportError::Script {
                        line: line.line,
                        message: e.to_string(),
                    })?;
                view.play_collection(tracks, *start);
            }
            Step::TogglePlayPause => {
                view.toggle_play_pause();
            }
            Step::Seek(fraction) => {
                view.seek(*fraction);
            }
            Step::Volume(percent) => {
                view.set_volume(*percent);
            }
            Step::ToggleMute => {
                view.toggle_mute();
            }
            Step::Next => {
                view.next();
            }
            Step::Previous => {
                view.previous();
            }
            Step::ToggleShuffle => {
                view.toggle_shuffle();
            }
            Step::CycleRepeat => {
                view.cycle_repeat();
            }
            Step::Enqueue(id) => {
                view.enqueue(resolve(id)?);
            }
            // Queue view and device reports
            Step::SkipTo(index) => {
                controller.skip_to(*index);
            }
            Step::Stop => {
                controller.stop();
            }
            Step::ClearQueue => {
                controller.clear_queue();
            }
            Step::TrackEnded => {
                controller.track_ended();
            }
            Step::Position(seconds) => {
                controller.update_position(*seconds);
            }
        }

        Ok(())
    }

    fn write_record(
        &self,
        out: &mut dyn Write,
        line: &ScriptLine,
        ignored: Option<String>,
        snapshot: &Snapshot,
    ) -> Result<()> {
        let json = match self.format {
            OutputFormat::Snapshot => self.to_json(&Record {
                line: line.line,
                command: &line.text,
                ignored,
                state: &**snapshot,
            })?,
            OutputFormat::Bar => self.to_json(&Record {
                line: line.line,
                command: &line.text,
                ignored,
                state: TransportBar::from_snapshot(snapshot),
            })?,
        };
        writeln!(out, "{}", json)?;
        Ok(())
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}
