use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::library::Track;

use super::sink::{create_sink_at, seek_position};
use super::types::{AudioCmd, PlaybackHandle, PlayerEvent};

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    events: Sender<PlayerEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        // At most one track's audio is loaded at a time; loading a new one
        // discards the previous sink.
        let mut index: Option<usize> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;
        let mut looping = false;

        // Spawn a ticker thread to update playback_info.elapsed periodically.
        let info_for_ticker_clone = playback_info.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(250));
            let mut info = info_for_ticker_clone.lock().unwrap();
            if info.playing {
                info.elapsed = info.elapsed + Duration::from_millis(250);
            }
        });

        fn do_load(
            i: usize,
            at: Duration,
            stream: &rodio::OutputStream,
            tracks: &[Track],
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }

            let new_sink = create_sink_at(stream, &tracks[i], at);
            *sink = Some(new_sink);
            *index = Some(i);
            *paused = true;

            if let Ok(mut info) = playback_info.lock() {
                info.index = Some(i);
                info.elapsed = at;
                info.playing = false;
            }
        }

        fn do_play(sink: &Option<Sink>, paused: &mut bool, playback_info: &PlaybackHandle) {
            if let Some(s) = sink {
                s.play();
                if *paused {
                    *paused = false;
                    if let Ok(mut info) = playback_info.lock() {
                        info.playing = true;
                    }
                }
            }
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            sink.set_volume(1.0);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(1.0 - t);
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(i) => {
                        if i >= tracks.len() {
                            continue;
                        }
                        do_load(
                            i,
                            Duration::ZERO,
                            &stream,
                            &tracks,
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &playback_info,
                        );
                    }

                    AudioCmd::Play => {
                        let Some(i) = index else {
                            continue;
                        };
                        // The sink may be gone after a natural end; rebuild it
                        // from the top so Play always has something to resume.
                        if sink.is_none() {
                            do_load(
                                i,
                                Duration::ZERO,
                                &stream,
                                &tracks,
                                &mut sink,
                                &mut index,
                                &mut paused,
                                &playback_info,
                            );
                        }
                        do_play(&sink, &mut paused, &playback_info);
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                paused = true;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                        }
                    }

                    AudioCmd::SeekToFraction(f) => {
                        let Some(i) = index else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }
                        // Unknown duration: skip the seek entirely.
                        let Some(new_elapsed) = seek_position(tracks[i].duration, f) else {
                            continue;
                        };

                        let was_paused = paused;
                        do_load(
                            i,
                            new_elapsed,
                            &stream,
                            &tracks,
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &playback_info,
                        );
                        if !was_paused {
                            do_play(&sink, &mut paused, &playback_info);
                        }
                    }

                    AudioCmd::SetLooping(on) => {
                        looping = on;
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                            s.stop();
                        }
                        // Update shared state so UI/MPRIS don't keep showing Playing.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic end-of-track check.
                    if let Some(ref s) = sink {
                        if !paused && s.empty() {
                            if looping {
                                // Native repeat: restart the same track without
                                // reporting anything upstream.
                                if let Some(i) = index {
                                    do_load(
                                        i,
                                        Duration::ZERO,
                                        &stream,
                                        &tracks,
                                        &mut sink,
                                        &mut index,
                                        &mut paused,
                                        &playback_info,
                                    );
                                    do_play(&sink, &mut paused, &playback_info);
                                }
                            } else {
                                // Drop the spent sink so the event fires once;
                                // `index` keeps naming the loaded track.
                                sink = None;
                                paused = true;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                    info.elapsed = Duration::ZERO;
                                }
                                let _ = events.send(PlayerEvent::TrackEnded);
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
