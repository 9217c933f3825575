use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, terminal,
};

use flappy_term::audio::Audio;
use flappy_term::render::{self, Hud, PixelBuf};
use flappy_term::store;
use flappy_term::{GameConfig, InputEvent, Mode, Session};

fn main() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let result = run(&mut out);
    cleanup(&mut out)?;
    result
}

fn run(out: &mut io::Stdout) -> io::Result<()> {
    let mut settings = store::load_settings();
    let scoreboard = store::load_scoreboard();
    let mut audio = Audio::new(settings.sound_enabled);

    let mut session = Session::new(
        GameConfig::default(),
        scoreboard,
        settings.player_name.clone(),
    )
    .map_err(io::Error::other)?;

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut hud = Hud {
        frame: 0,
        sound_enabled: settings.sound_enabled,
    };

    let frame_dur = Duration::from_millis(33); // ~30 fps, one tick per frame

    loop {
        let frame_start = Instant::now();
        let mut inputs: Vec<InputEvent> = Vec::new();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') if session.mode() == Mode::Menu => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        // One action key; its meaning depends on the mode.
                        inputs.push(match session.mode() {
                            Mode::Menu => InputEvent::Start,
                            Mode::Playing => InputEvent::Flap,
                            Mode::Paused => InputEvent::PauseToggle,
                            Mode::GameOver => InputEvent::Restart,
                            _ => InputEvent::Return,
                        });
                    }
                    KeyCode::Char('p') => inputs.push(InputEvent::PauseToggle),
                    KeyCode::Char('l') => inputs.push(InputEvent::NavigateTo(Mode::Leaderboard)),
                    KeyCode::Char('s') => inputs.push(InputEvent::NavigateTo(Mode::Settings)),
                    KeyCode::Char('c') => inputs.push(InputEvent::NavigateTo(Mode::Credits)),
                    KeyCode::Char('m') | KeyCode::Esc => inputs.push(InputEvent::Return),
                    KeyCode::Char('t') if session.mode() == Mode::Settings => {
                        settings.sound_enabled = !settings.sound_enabled;
                        audio.set_enabled(settings.sound_enabled);
                        hud.sound_enabled = settings.sound_enabled;
                        // Best-effort; a read-only disk never stops play.
                        store::save_settings(&settings).ok();
                    }
                    _ => {}
                },
                Event::Resize(c, r) => {
                    buf.resize(c as usize, r as usize * 2);
                }
                _ => {}
            }
        }

        let report = session.tick(&inputs);
        for cue in &report.cues {
            audio.play(*cue);
        }
        if report.finalized.is_some() {
            store::save_scoreboard(session.snapshot().scoreboard).ok();
        }

        hud.frame += 1;
        render::draw(&session.snapshot(), &hud, &mut buf);
        buf.render(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
