use std::process::ExitCode;
use std::time::Duration;

use argh::FromArgs;
use ping_probe::{ProbeLine, ProbeReport, Prober, RunConfig, SendFailurePolicy, SocketType};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(FromArgs, Debug)]
/// ping-probe - send ICMP ECHO_REQUEST packets to a host and report loss and latency
struct Args {
    /// host name or IPv4 address to probe
    #[argh(option)]
    ip: String,

    /// number of echo requests to send (0 selects the default of 5)
    #[argh(option, short = 't', default = "0")]
    count: u16,

    /// per-probe timeout in milliseconds (0 selects the default of 3000)
    #[argh(option, default = "0")]
    timeout: u64,

    /// pause between probes in seconds (0 selects the default of 1)
    #[argh(option, default = "0")]
    interval: u64,

    /// use an unprivileged ICMP datagram socket instead of a raw socket
    #[argh(switch)]
    dgram: bool,

    /// count failed sends as lost probes instead of aborting the run
    #[argh(switch)]
    tolerate_send_errors: bool,

    /// log debug output to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let socket_type = if self.dgram { SocketType::Dgram } else { SocketType::Raw };
        let send_failure_policy = if self.tolerate_send_errors {
            SendFailurePolicy::CountAsLost
        } else {
            SendFailurePolicy::Abort
        };
        RunConfig::new(self.ip.clone())
            .with_count(self.count)
            .with_timeout(Duration::from_millis(self.timeout))
            .with_interval(Duration::from_secs(self.interval))
            .with_socket_type(socket_type)
            .with_send_failure_policy(send_failure_policy)
    }
}

/// Rewrites `key=value` tokens (`ip=`, `t=`, `timeout=`, `interval=`) into the
/// equivalent flag and value. Keys must match exactly.
fn normalize_args(args: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(args.len() * 2);
    for arg in args {
        let rewritten = arg.trim_start_matches('-').split_once('=').and_then(|(key, value)| {
            let flag = match key {
                "ip" => "--ip",
                "t" | "count" => "--count",
                "timeout" => "--timeout",
                "interval" => "--interval",
                _ => return None,
            };
            Some((flag, value))
        });
        match rewritten {
            Some((flag, value)) => {
                normalized.push(flag.to_owned());
                normalized.push(value.to_owned());
            }
            None => normalized.push(arg.clone()),
        }
    }
    normalized
}

fn parse_args(command: &str, args: &[String]) -> Result<Args, argh::EarlyExit> {
    let normalized = normalize_args(args);
    let normalized: Vec<&str> = normalized.iter().map(String::as_str).collect();
    Args::from_args(&[command], &normalized)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
    }
}

fn main() -> ExitCode {
    let mut env_args = std::env::args();
    let command = env_args.next().unwrap_or_else(|| "ping-probe".to_owned());
    let rest: Vec<String> = env_args.collect();

    let args = match parse_args(&command, &rest) {
        Ok(args) => args,
        Err(early_exit) => {
            return match early_exit.status {
                Ok(()) => {
                    println!("{}", early_exit.output);
                    ExitCode::SUCCESS
                }
                Err(()) => {
                    eprintln!("{}", early_exit.output);
                    ExitCode::FAILURE
                }
            };
        }
    };
    init_tracing(args.verbose);

    let config = args.run_config();
    let target = config.target().to_owned();
    let timeout = config.timeout();
    tracing::debug!("{:?}", config);

    println!("PING {target}: 32 bytes of data");
    let mut prober = Prober::new(config);
    match prober.run(|record| println!("{}", ProbeLine { target: &target, record })) {
        Ok(statistics) => {
            println!();
            println!("{}", ProbeReport { target: &target, timeout, statistics: &statistics });
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("run aborted in state {:?}", prober.states().last());
            eprintln!("ping-probe: {e}");
            ExitCode::FAILURE
        }
    }
}
