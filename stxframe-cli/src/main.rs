mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use stxframe_lib::display::status_line;
use stxframe_lib::export::{export_frame, load_export};
use stxframe_lib::{Corruption, Frame, FrameError, Session, TransmitConfig};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const PROGRESS_WIDTH: usize = 30;

/// Build, damage, validate and export STX/ETX framed packets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(short, long, global = true)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a message and print the packet
    Encode {
        message: String,
    },
    /// Decode 37 wire bytes given as hex and validate them
    Validate {
        hex: String,
    },
    /// Encode a message, damage one field and validate the result
    Corrupt {
        message: String,
        /// checksum, start_byte or end_byte (random when omitted)
        #[arg(short, long)]
        field: Option<Corruption>,
    },
    /// Parse a <COMMAND> string and show how the firmware would react
    Command {
        text: String,
    },
    /// Simulate transmitting an encoded message
    Transmit {
        message: String,
        /// Number of progress steps
        #[arg(short, long, default_value_t = 50)]
        steps: u32,
        /// Delay between progress steps in milliseconds
        #[arg(long, default_value_t = 20)]
        step_ms: u64,
        /// Corrupt a random field before sending
        #[arg(short, long)]
        corrupt: bool,
    },
    /// Write a JSON snapshot of an encoded message
    Export {
        message: String,
        /// Directory to write the snapshot into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Load a JSON snapshot and validate it
    Inspect {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let guard = logging::setup_logging(cli.log_file, &cli.verbose)?;

    let code = match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    };

    // Flush the log file before the process exits.
    drop(guard);
    Ok(code)
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Encode { message } => {
            let frame = Frame::encode(&message);
            if frame.length as usize != message.len() {
                info!("Message truncated from {} to {} bytes", message.len(), frame.length);
            }
            print_frame(&frame);
            println!("Wire: {}", hex::encode_upper(frame.to_wire_bytes()));
        }
        Commands::Validate { hex } => {
            let bytes = hex::decode(hex.trim()).context("Input is not valid hex")?;
            let frame = Frame::from_wire_bytes(&bytes)?;
            print_frame(&frame);
            frame.check().map_err(FrameError::from)?;
        }
        Commands::Corrupt { message, field } => {
            let mut frame = Frame::encode(&message);
            let kind = match field {
                Some(kind) => {
                    frame.corrupt(kind);
                    kind
                }
                None => frame.corrupt_random(),
            };
            println!("Corrupted field: {}", kind);
            print_frame(&frame);
        }
        Commands::Command { text } => {
            let frame = Frame::from_text_command(&text)?;
            print_frame(&frame);
            let command = frame.command();
            println!("Command: {}", command);
            println!("Response: {}", command.response());
        }
        Commands::Transmit {
            message,
            steps,
            step_ms,
            corrupt,
        } => {
            let config = TransmitConfig {
                steps,
                step_delay: Duration::from_millis(step_ms),
                ..TransmitConfig::default()
            };
            transmit(config, &message, corrupt).await?;
        }
        Commands::Export { message, dir } => {
            let frame = Frame::encode(&message);
            let path = export_frame(&frame, &dir)
                .with_context(|| format!("Failed to export packet into {}", dir.display()))?;
            println!("Exported to {}", path.display());
        }
        Commands::Inspect { file } => {
            let frame = load_export(&file).with_context(|| format!("Failed to load {}", file.display()))?;
            print_frame(&frame);
        }
    }
    Ok(())
}

fn print_frame(frame: &Frame) {
    println!("{}", frame);
    println!("Status: {}", status_line(&frame.validate()));
}

async fn transmit(config: TransmitConfig, message: &str, corrupt: bool) -> Result<()> {
    let mut session = Session::new(config);
    session.generate(message);
    if corrupt {
        let kind = session.corrupt_random();
        info!("Corrupted {} before transmission", kind);
    }

    let transmission = session.begin_transmission()?;
    debug!("Transmitting snapshot: {:?}", transmission.frame());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(transmission.run(Some(tx)));

    let mut stderr = std::io::stderr();
    while let Some(progress) = rx.recv().await {
        let filled = (progress.fraction() * PROGRESS_WIDTH as f64).round() as usize;
        write!(
            stderr,
            "\r[{}{}] {:3.0}%",
            "#".repeat(filled),
            " ".repeat(PROGRESS_WIDTH - filled),
            progress.fraction() * 100.0
        )?;
        stderr.flush()?;
    }
    writeln!(stderr)?;

    let entry = handle.await.context("Transmission task failed")?;
    session.record(entry);

    for entry in session.history() {
        println!("{}", entry);
    }
    Ok(())
}
