//! One-shot UDP probe and payload encoder for operators.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tracing_subscriber::EnvFilter;

use udp_health::config::ProbeConfig;
use udp_health::probe::payload::{encode, render};
use udp_health::probe::{self, ProbeError, ProbeOutcome};

#[derive(Parser)]
#[command(name = "udp-probe")]
#[command(about = "Send a single UDP health probe from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe a UDP service once and report the outcome
    Probe {
        #[arg(long, default_value = "localhost")]
        host: String,

        #[arg(short, long)]
        port: u16,

        /// Payload, text with \xHH escapes
        #[arg(long, default_value = "ping")]
        payload: String,

        #[arg(short, long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_ms: u64,
    },
    /// Show the bytes a payload spec encodes to
    Encode {
        spec: String,
    },
}

impl Commands {
    /// Build the probe target from `probe` arguments.
    fn probe_config(self) -> Option<ProbeConfig> {
        match self {
            Commands::Probe {
                host,
                port,
                payload,
                timeout_ms,
            } => Some(ProbeConfig {
                host,
                port,
                payload,
                timeout_ms,
                caller_timeout_secs: 0,
            }),
            Commands::Encode { .. } => None,
        }
    }
}

fn run_probe(config: &ProbeConfig) -> Result<ProbeOutcome, ProbeError> {
    probe::probe(config, &encode(&config.payload))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Probe logs go to stderr, only when RUST_LOG asks for them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Encode { spec } = &cli.command {
        println!("{}", render(&encode(spec)));
        return ExitCode::SUCCESS;
    }

    let Some(config) = cli.command.probe_config() else {
        return ExitCode::FAILURE;
    };

    match run_probe(&config) {
        Ok(outcome) => {
            println!("{}", outcome);
            if outcome.is_up() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::UdpSocket;

    #[test]
    fn test_target_defaults() {
        let cli = Cli::try_parse_from(["udp-probe", "probe", "--port", "27015"]).unwrap();
        let config = cli.command.probe_config().unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 27015);
        assert_eq!(config.payload, "ping");
        assert_eq!(config.timeout_ms, 5000);
    }

    #[test]
    fn test_port_and_positive_timeout_required() {
        assert!(Cli::try_parse_from(["udp-probe", "probe"]).is_err());
        assert!(Cli::try_parse_from(["udp-probe", "probe", "-p", "9", "-t", "0"]).is_err());
    }

    #[test]
    fn test_encode_subcommand() {
        let cli = Cli::try_parse_from(["udp-probe", "encode", r"\xFF\xFFTSource"]).unwrap();
        match cli.command {
            Commands::Encode { spec } => {
                assert_eq!(render(&encode(&spec)), "FF FF 54 53 6F 75 72 63 65");
            }
            Commands::Probe { .. } => panic!("expected encode"),
        }
    }

    #[test]
    fn test_run_against_responder() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = server.local_addr().unwrap().port();
        let handle = std::thread::spawn(move || {
            let mut buf = [0u8; 64];
            let (len, peer) = server.recv_from(&mut buf).unwrap();
            server.send_to(b"pong", peer).unwrap();
            buf[..len].to_vec()
        });

        let port_arg = port.to_string();
        let cli = Cli::try_parse_from([
            "udp-probe",
            "probe",
            "--host",
            "127.0.0.1",
            "--port",
            port_arg.as_str(),
            "--payload",
            r"\x01hi",
        ])
        .unwrap();
        let config = cli.command.probe_config().unwrap();

        assert_eq!(run_probe(&config).unwrap(), ProbeOutcome::Responded);
        assert_eq!(handle.join().unwrap(), vec![0x01u8, b'h', b'i']);
    }
}
