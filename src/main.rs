#[cfg(not(all(feature = "rollup", feature = "visualization")))]
fn main() {
    eprintln!(
        "The runmap CLI requires the \"rollup\" and \"visualization\" features. Rebuild with `--features rollup,visualization` to enable playback."
    );
}

#[cfg(all(feature = "rollup", feature = "visualization"))]
mod cli {
    use std::env;
    use std::io::{self, Read, Write};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::Context;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    use runmap::playback::{PlaybackController, TickDriver};
    use runmap::visualization::TerminalRenderer;
    use runmap::{read_rollup_file, AnimationConfig, Player, TrackStore};

    const DEFAULT_GRID_WIDTH: usize = 72;
    const DEFAULT_GRID_HEIGHT: usize = 20;

    fn parse_grid_size(value: &str) -> Option<(usize, usize)> {
        let (width, height) = value.split_once('x')?;
        Some((width.parse().ok()?, height.parse().ok()?))
    }

    #[cfg(unix)]
    fn restore_terminal_mode() {
        let _ = std::process::Command::new("stty")
            .arg("echo")
            .arg("-raw")
            .status();
    }

    #[cfg(not(unix))]
    fn restore_terminal_mode() {}

    pub fn run() -> anyhow::Result<()> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .try_init();

        println!("runmap - Synchronized GPS Track Replay");
        println!("======================================\n");

        let mut config_path: Option<String> = None;
        let mut fps_override: Option<u32> = None;
        let mut grid = (DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT);
        let mut file_arg: Option<String> = None;
        let mut show_help = false;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    show_help = true;
                }
                "--config" => {
                    if let Some(value) = args.next() {
                        config_path = Some(value);
                    } else {
                        eprintln!("--config requires a file argument");
                        show_help = true;
                    }
                }
                _ if arg.starts_with("--config=") => {
                    config_path = Some(arg["--config=".len()..].to_string());
                }
                "--fps" => {
                    if let Some(value) = args.next() {
                        match value.parse() {
                            Ok(fps) => fps_override = Some(fps),
                            Err(_) => {
                                eprintln!("Invalid --fps value: {}", value);
                                show_help = true;
                            }
                        }
                    } else {
                        eprintln!("--fps requires a number");
                        show_help = true;
                    }
                }
                _ if arg.starts_with("--fps=") => match arg["--fps=".len()..].parse() {
                    Ok(fps) => fps_override = Some(fps),
                    Err(_) => {
                        eprintln!("Invalid --fps value: {}", &arg["--fps=".len()..]);
                        show_help = true;
                    }
                },
                "--size" => {
                    if let Some(value) = args.next() {
                        match parse_grid_size(&value) {
                            Some(size) => grid = size,
                            None => {
                                eprintln!("Invalid --size value: {} (expected WxH)", value);
                                show_help = true;
                            }
                        }
                    } else {
                        eprintln!("--size requires an argument (WxH)");
                        show_help = true;
                    }
                }
                _ if arg.starts_with("--size=") => {
                    let value = &arg["--size=".len()..];
                    match parse_grid_size(value) {
                        Some(size) => grid = size,
                        None => {
                            eprintln!("Invalid --size value: {} (expected WxH)", value);
                            show_help = true;
                        }
                    }
                }
                _ if arg.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    show_help = true;
                }
                _ => {
                    file_arg = Some(arg);
                }
            }
        }

        if show_help || file_arg.is_none() {
            eprintln!(
                "Usage:\n  runmap [--config <file.json>] [--fps <n>] [--size <WxH>] <rollup.csv>\n\nFlags:\n  --config <file>   JSON animation configuration (defaults built in)\n  --fps <n>         Override ticksPerSecond from the configuration\n  --size <WxH>      Terminal grid size (default {}x{})\n  -h, --help        Show this help\n\nKeys during playback:\n  space             Pause / resume\n  r                 Restart from the beginning\n  q                 Quit\n\nExample:\n  runmap --fps 30 data/gpx_rollup.csv\n",
                DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT
            );
        }
        let file_path = match file_arg {
            Some(path) => path,
            None => return Ok(()),
        };

        let mut config = match &config_path {
            Some(path) => AnimationConfig::from_json_file(path)
                .with_context(|| format!("loading configuration '{}'", path))?,
            None => AnimationConfig::default(),
        };
        if let Some(fps) = fps_override {
            config.ticks_per_second = fps;
        }

        info!(file = %file_path, "loading rollup");
        let rows = read_rollup_file(&file_path)
            .with_context(|| format!("loading rollup '{}'", file_path))?;
        let store = TrackStore::load(rows).context("building track store")?;
        info!(
            tracks = store.track_count(),
            max_tick = store.max_tick(),
            "rollup loaded"
        );

        println!(
            "Loaded {} tracks, {} frames per loop",
            store.track_count(),
            store.max_tick() + 1
        );
        println!(
            "Animation: {} ticks/s, {}s of recording per tick",
            config.ticks_per_second, config.resample_interval_seconds
        );
        println!("Keys: [space]=pause/resume, [r]=restart, [q]=quit\n");

        let (width, height) = grid;
        let renderer = TerminalRenderer::new(
            width,
            height,
            store.bounds(),
            config.resample_interval_seconds,
            store.max_tick(),
        )?;
        let driver = TickDriver::from_rate(config.ticks_per_second)?;
        let mut player = Player::new(store, &config, renderer)?;

        // Raw-mode key reader feeding the control loop
        let (tx, rx) = mpsc::channel::<u8>();
        let input_running = Arc::new(AtomicBool::new(true));
        let input_running_clone = Arc::clone(&input_running);
        std::thread::spawn(move || {
            #[cfg(unix)]
            let _ = std::process::Command::new("stty")
                .arg("-echo")
                .arg("raw")
                .status();
            let mut stdin = io::stdin();
            let mut buf = [0u8; 1];
            while input_running_clone.load(Ordering::Relaxed) {
                if stdin.read_exact(&mut buf).is_ok() {
                    let _ = tx.send(buf[0]);
                    if buf[0] == b'\x03' {
                        break;
                    }
                }
            }
            #[cfg(unix)]
            let _ = std::process::Command::new("stty")
                .arg("echo")
                .arg("-raw")
                .status();
        });

        print!("\x1B[?25l");
        io::stdout().flush().ok();

        let playback_start = Instant::now();
        player.play()?;

        let run_result = driver.run(&mut player, |player| {
            let mut keep_going = true;
            while let Ok(key) = rx.try_recv() {
                match key {
                    b' ' => {
                        let _ = player.toggle();
                    }
                    b'r' | b'R' => {
                        let _ = player.restart();
                    }
                    b'q' | b'Q' | b'\x03' => {
                        keep_going = false;
                    }
                    _ => {}
                }
            }
            keep_going
        });

        input_running.store(false, Ordering::Relaxed);
        restore_terminal_mode();
        println!("\x1B[?25h");
        io::stdout().flush().ok();
        run_result.context("animation loop failed")?;

        let total_time = playback_start.elapsed();
        let stats = player.stats();
        let progress = player.progress();

        println!("\n=== Playback Statistics ===");
        println!("Wall time:        {:.2} seconds", total_time.as_secs_f32());
        println!("Frames drawn:     {}", stats.frames_drawn);
        println!("Loops completed:  {}", stats.loops_completed);
        println!("Final position:   {}%", progress.percent);
        println!("\nPlayback complete!");

        Ok(())
    }
}

#[cfg(all(feature = "rollup", feature = "visualization"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}
