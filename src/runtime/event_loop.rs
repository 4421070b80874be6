use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlayerState};
use crate::audio::{AudioCmd, AudioPlayer, PlayerEvent};
use crate::config;
use crate::download::DownloadManager;
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last player state as emitted to MPRIS, to avoid re-publishing.
    pub last_mpris_state: PlayerState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_mpris_state: app.state,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread, download timers and MPRIS. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    downloads: &mut DownloadManager,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    event_rx: &mpsc::Receiver<PlayerEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let playback = audio_player.playback_handle();

    loop {
        // Expire download progress affordances whose delay has passed.
        downloads.tick(Instant::now());

        // End-of-track notifications drive auto-advance; with looping on the
        // engine repeats natively and never sends one.
        while let Ok(PlayerEvent::TrackEnded) = event_rx.try_recv() {
            if app.has_tracks() && app.on_track_ended() {
                engine_start_current(app, audio_player);
            }
        }

        // Sync playing flag and the seek gauge from the audio thread.
        let mut elapsed = Duration::ZERO;
        if let Ok(info) = playback.lock() {
            elapsed = info.elapsed;
            // Only trust the engine once it has caught up with the loaded track.
            if info.index == app.state.current {
                app.state.playing = info.playing;
            }
        }
        let duration = app.current_track().and_then(|t| t.duration);
        app.set_progress(elapsed, duration);

        // Keep MPRIS in sync even when changes come from media keys or auto-advance.
        if app.state != state.last_mpris_state {
            update_mpris(mpris, app);
            state.last_mpris_state = app.state;
        }

        terminal.draw(|f| {
            ui::draw(f, app, downloads, elapsed, &settings.ui, &settings.controls)
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player, mpris)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(
                    key,
                    settings,
                    app,
                    audio_player,
                    downloads,
                    mpris,
                    control_tx,
                    state,
                )? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Shared play/pause toggle used by the transport key, the inline row action
/// and MPRIS PlayPause. Starts the selected track from idle.
fn toggle_play(app: &mut App, audio_player: &AudioPlayer) {
    match (app.state.current, app.state.playing) {
        (None, _) => {
            if app.has_tracks() {
                start_track(app, audio_player, app.selected);
            }
        }
        (Some(_), true) => {
            let _ = audio_player.send(AudioCmd::Pause);
            app.toggle_play();
        }
        (Some(_), false) => {
            let _ = audio_player.send(AudioCmd::Play);
            app.toggle_play();
        }
    }
}

/// Load track `i` and start playback: the inline-row path.
fn start_track(app: &mut App, audio_player: &AudioPlayer, i: usize) {
    app.play_now(i);
    engine_start_current(app, audio_player);
}

/// Tell the engine to load and play whatever the controller just made current.
fn engine_start_current(app: &App, audio_player: &AudioPlayer) {
    if let Some(i) = app.state.current {
        let _ = audio_player.send(AudioCmd::Load(i));
        let _ = audio_player.send(AudioCmd::Play);
    }
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => {
            match (app.state.current, app.state.playing) {
                (None, _) => {
                    if app.has_tracks() {
                        start_track(app, audio_player, app.selected);
                    }
                }
                (Some(_), false) => {
                    let _ = audio_player.send(AudioCmd::Play);
                    app.toggle_play();
                }
                (Some(_), true) => {}
            }
            update_mpris(mpris, app);
        }
        ControlCmd::Pause => {
            if app.state.playing {
                let _ = audio_player.send(AudioCmd::Pause);
                app.toggle_play();
            }
            update_mpris(mpris, app);
        }
        ControlCmd::PlayPause => {
            toggle_play(app, audio_player);
            update_mpris(mpris, app);
        }
        ControlCmd::Next => {
            if app.has_tracks() {
                app.next_track();
                engine_start_current(app, audio_player);
                update_mpris(mpris, app);
            }
        }
        ControlCmd::Prev => {
            if app.has_tracks() {
                app.prev_track();
                engine_start_current(app, audio_player);
                update_mpris(mpris, app);
            }
        }
    }

    Ok(false)
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    downloads: &mut DownloadManager,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                if app.has_tracks() {
                    app.set_selected(0);
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            if app.has_tracks() {
                app.set_selected(app.tracks.len() - 1);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            // The inline row action: a different row loads and plays it; the
            // current row just toggles.
            state.pending_gg = false;
            if app.has_tracks() {
                let i = app.selected;
                if app.state.current != Some(i) {
                    start_track(app, audio_player, i);
                } else {
                    toggle_play(app, audio_player);
                }
                update_mpris(mpris, app);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            let looping = app.toggle_loop();
            let _ = audio_player.send(AudioCmd::SetLooping(looping));
            update_mpris(mpris, app);
        }
        KeyCode::Char('L') | KeyCode::Right => {
            state.pending_gg = false;
            if app.state.current.is_some() {
                app.nudge_seek(settings.controls.seek_step_percent as f64);
                let _ = audio_player.send(AudioCmd::SeekToFraction(app.seek_target_fraction()));
            }
        }
        KeyCode::Char('H') | KeyCode::Left => {
            state.pending_gg = false;
            if app.state.current.is_some() {
                app.nudge_seek(-(settings.controls.seek_step_percent as f64));
                let _ = audio_player.send(AudioCmd::SeekToFraction(app.seek_target_fraction()));
            }
        }
        KeyCode::Char('d') => {
            state.pending_gg = false;
            if app.has_tracks() {
                let i = app.selected;
                // The disabled-state guard makes repeat presses no-ops.
                downloads.trigger(&app.tracks[i], i, Instant::now());
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}
