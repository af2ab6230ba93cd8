//! Cubeguide CLI
//!
//! Usage:
//!   cubeguide --replay frames.txt                 # Replay a recorded frame script
//!   cubeguide --interactive                       # Type frames on stdin
//!   cubeguide --serve                             # HTTP API server
//!   cubeguide --replay frames.txt --json          # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cubeguide::core::{parse_script, run_server, FrameCommand, Instruction, PhaseController, ScriptedSolver};
use cubeguide::types::{ControllerConfig, FrameOutput, GuideError};
use cubeguide::{GOT_IT_DWELL_FRAMES, MATCH_THRESHOLD, REQUIRED_PRUNE_TABLES, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "cubeguide",
    version = VERSION,
    about = "Guide a cube scan and solve from per-frame face recognitions",
    long_about = "Cubeguide turns a noisy stream of per-frame face recognitions into\n\
                  a guided workflow: scan all six faces, verify, solve, then walk\n\
                  the user through each move.\n\n\
                  Frame script lines:\n  \
                  solved WWWWWWWWW  Face recognized (nine tile codes ROYGBW)\n  \
                  invalid           Nothing recognized\n  \
                  reset             Request a reset at the next frame\n  \
                  ready 12          Set solver readiness count\n  \
                  {\"status\":...}    JSON recognition result"
)]
struct Args {
    /// Replay a frame script file
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Interactive mode - read frame commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Consecutive frames that must be exceeded to accept or drop a face
    #[arg(long, default_value_t = MATCH_THRESHOLD)]
    match_threshold: u32,

    /// Frames to stay in GOT_IT before prompting a rotation
    #[arg(long, default_value_t = GOT_IT_DWELL_FRAMES)]
    dwell_frames: u32,

    /// Solver readiness count that releases WAITING
    #[arg(long, default_value_t = REQUIRED_PRUNE_TABLES)]
    prune_tables: usize,

    /// Verify result the scripted solver returns (0 = solvable)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    verify_code: i32,

    /// Solution the scripted solver returns
    #[arg(long, default_value = "")]
    solution: String,
}

impl Args {
    fn config(&self) -> ControllerConfig {
        ControllerConfig {
            match_threshold: self.match_threshold,
            got_it_dwell_frames: self.dwell_frames,
            required_prune_tables: self.prune_tables,
            ..ControllerConfig::default()
        }
    }

    fn controller(&self) -> PhaseController<ScriptedSolver> {
        PhaseController::with_config(
            ScriptedSolver::new(self.verify_code, self.solution.clone()),
            self.config(),
        )
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let code = if args.serve {
        run_serve(&args).await
    } else if let Some(ref path) = args.replay {
        run_replay(path, &args)
    } else {
        if !args.interactive {
            info!("no mode given, starting interactive mode");
        }
        run_interactive(&args)
    };
    std::process::exit(code);
}

/// Replay a frame script
fn run_replay(path: &Path, args: &Args) -> i32 {
    let script = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            error!(path = %path.display(), error = %e, "cannot read frame script");
            return 1;
        }
    };
    let commands = match parse_script(&script) {
        Ok(commands) => commands,
        Err(e) => {
            error!(error = %e, "bad frame script");
            return 1;
        }
    };

    let mut controller = args.controller();
    for cmd in commands {
        if let Err(e) = apply(&mut controller, cmd, args) {
            print_contract_violation(&e);
            return 2;
        }
    }

    let snapshot = controller.snapshot();
    if !args.json {
        println!();
        println!(
            "Replay finished. Frames: {} | Phase: {}",
            snapshot.frame, snapshot.phase
        );
    }
    info!(frames = snapshot.frame, phase = %snapshot.phase, "replay finished");
    0
}

/// Run interactive mode
fn run_interactive(args: &Args) -> i32 {
    let mut controller = args.controller();

    print_header("Interactive Mode");
    println!("Type frame commands (solved/invalid/reset/ready). Type 'quit' to exit.");
    println!("Goal: scan six faces, then follow the moves until DONE");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line_no = 0;

    loop {
        print!("{}", format_prompt(&controller));
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        line_no += 1;

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Frames: {}", controller.frame_count());
            break;
        }

        let cmd = match FrameCommand::parse(line_no, line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };
        if let Err(e) = apply(&mut controller, cmd, args) {
            print_contract_violation(&e);
            return 2;
        }
    }
    0
}

/// Apply one script command
fn apply(
    controller: &mut PhaseController<ScriptedSolver>,
    cmd: FrameCommand,
    args: &Args,
) -> Result<(), GuideError> {
    match cmd {
        FrameCommand::Frame(result) => {
            let output = controller.process_face(&result)?;
            print_output(controller, &output, args);
        }
        FrameCommand::Reset => controller.request_reset(),
        FrameCommand::Ready(count) => controller.readiness().set(count),
    }
    Ok(())
}

/// Print one frame's output
fn print_output(controller: &PhaseController<ScriptedSolver>, output: &FrameOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "cannot serialize frame output"),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
    print_feedback(controller, output);
}

/// One-shot feedback and instructions after a frame
fn print_feedback(controller: &PhaseController<ScriptedSolver>, output: &FrameOutput) {
    if output.new_face_accepted() {
        println!("{}", "  ✓ Face recognized".green());
    }
    if output.face_lost() {
        println!("{}", "  … Face lost".bright_black());
    }
    if !output.phase_changed() {
        return;
    }

    let snapshot = controller.snapshot();
    match Instruction::from_snapshot(&snapshot) {
        Instruction::FullRotation { variant } => {
            println!("{}", format!("  ↻ Rotate the whole cube ({:?})", variant).yellow());
        }
        Instruction::EdgeRotation { mv, amount, direction, tint, .. } => {
            let tint = tint.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string());
            println!(
                "{}",
                format!("  ➜ Turn {} ({:?}, {:?}, tint {})", mv, amount, direction, tint).magenta()
            );
        }
        Instruction::None => {}
    }
    if let Some(err) = snapshot.error() {
        println!("{}", format!("  ⚠ {} - reset and rescan", err).red());
    }
}

fn print_contract_violation(err: &GuideError) {
    eprintln!("{}", format!("Fatal: {}", err).red().bold());
}

/// Print header
fn print_header(mode: &str) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  Cubeguide v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}

/// Format prompt
fn format_prompt(controller: &PhaseController<ScriptedSolver>) -> String {
    let phase = controller.phase();
    format!("{} [{}] > ", phase.emoji(), phase.to_string().color(phase.color()))
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> i32 {
    print_header("API Server");
    if let Err(e) = run_server(&args.addr).await {
        error!(error = %e, "server error");
        return 1;
    }
    0
}
