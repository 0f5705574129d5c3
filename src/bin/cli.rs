//! pigwire CLI Client
//!
//! One-shot commands against a running pigpio daemon.

use clap::{Parser, Subcommand, ValueEnum};
use pigwire::client::{Level, Mode, Pull};
use pigwire::device::I2cDevice;
use pigwire::{Config, Pigpio};
use tracing_subscriber::{fmt, EnvFilter};

/// pigwire CLI
#[derive(Parser, Debug)]
#[command(name = "pigwire-cli")]
#[command(about = "Talk to a pigpio daemon over its socket interface")]
#[command(version)]
struct Args {
    /// Daemon host (defaults to $PIGPIO_ADDR or 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Daemon port (defaults to $PIGPIO_PORT or 8888)
    #[arg(short, long)]
    port: Option<u16>,

    /// Response timeout in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the daemon version
    Version,

    /// Print the board hardware revision
    Hwrev,

    /// Print the daemon's microsecond tick
    Tick,

    /// Get or set a pin mode
    Mode {
        pin: u32,

        /// Mode to set; omit to print the current mode
        #[arg(value_enum)]
        mode: Option<ModeArg>,
    },

    /// Set a pin's pull resistor
    Pud {
        pin: u32,

        #[arg(value_enum)]
        pull: PullArg,
    },

    /// Read a pin level
    Read { pin: u32 },

    /// Write a pin level (0 or 1)
    Write {
        pin: u32,

        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        level: u8,
    },

    /// Get or set a PWM duty cycle
    Pwm { pin: u32, duty: Option<u32> },

    /// Get or set a PWM duty-cycle range
    PwmRange { pin: u32, range: Option<u32> },

    /// Read a byte register from an I2C device
    I2cGet {
        bus: u32,
        #[arg(value_parser = parse_u8)]
        address: u8,
        #[arg(value_parser = parse_u8)]
        register: u8,
    },

    /// Write a byte register on an I2C device
    I2cSet {
        bus: u32,
        #[arg(value_parser = parse_u8)]
        address: u8,
        #[arg(value_parser = parse_u8)]
        register: u8,
        #[arg(value_parser = parse_u8)]
        value: u8,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Input,
    Output,
    Alt0,
    Alt1,
    Alt2,
    Alt3,
    Alt4,
    Alt5,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Input => Mode::Input,
            ModeArg::Output => Mode::Output,
            ModeArg::Alt0 => Mode::Alt0,
            ModeArg::Alt1 => Mode::Alt1,
            ModeArg::Alt2 => Mode::Alt2,
            ModeArg::Alt3 => Mode::Alt3,
            ModeArg::Alt4 => Mode::Alt4,
            ModeArg::Alt5 => Mode::Alt5,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PullArg {
    Off,
    Down,
    Up,
}

impl From<PullArg> for Pull {
    fn from(arg: PullArg) -> Self {
        match arg {
            PullArg::Off => Pull::Off,
            PullArg::Down => Pull::Down,
            PullArg::Up => Pull::Up,
        }
    }
}

/// Accept decimal or 0x-prefixed hex
fn parse_u8(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid byte {:?}: {}", s, e))
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pigwire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> pigwire::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(ms) = args.timeout_ms {
        config.response_timeout_ms = ms;
    }

    tracing::debug!("Connecting to {}", config.addr());
    let pi = Pigpio::connect(&config)?;

    let outcome = execute(&pi, args.command);
    let closed = pi.close();
    outcome.and(closed)
}

fn execute(pi: &Pigpio, command: Commands) -> pigwire::Result<()> {
    match command {
        Commands::Version => println!("{}", pi.version()?),
        Commands::Hwrev => println!("{:x}", pi.hardware_revision()?),
        Commands::Tick => println!("{}", pi.tick()?),
        Commands::Mode { pin, mode: Some(mode) } => pi.set_mode(pin, mode.into())?,
        Commands::Mode { pin, mode: None } => println!("{:?}", pi.get_mode(pin)?),
        Commands::Pud { pin, pull } => pi.set_pull_up_down(pin, pull.into())?,
        Commands::Read { pin } => println!("{}", pi.read(pin)?.raw()),
        Commands::Write { pin, level } => pi.write(pin, Level::from(level == 1))?,
        Commands::Pwm { pin, duty: Some(duty) } => pi.set_pwm_duty_cycle(pin, duty)?,
        Commands::Pwm { pin, duty: None } => println!("{}", pi.get_pwm_duty_cycle(pin)?),
        Commands::PwmRange { pin, range: Some(range) } => {
            println!("{}", pi.set_pwm_range(pin, range)?)
        }
        Commands::PwmRange { pin, range: None } => println!("{}", pi.get_pwm_range(pin)?),
        Commands::I2cGet { bus, address, register } => {
            let device = I2cDevice::open(pi, bus, u32::from(address))?;
            let value = device.read_byte_register(register)?;
            device.close()?;
            println!("0x{:02x}", value);
        }
        Commands::I2cSet { bus, address, register, value } => {
            let device = I2cDevice::open(pi, bus, u32::from(address))?;
            device.write_byte_register(register, value)?;
            device.close()?;
        }
    }
    Ok(())
}
