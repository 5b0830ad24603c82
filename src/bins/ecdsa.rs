use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use secp256k1_playground::{
    format::{
        format_bigint, parse_bigint, parse_public_key, parse_signature, render_point,
        render_signature, DisplayFormat,
    },
    message::{message_digest, MessageMode},
    private_key::PrivateKey,
    Ecdsa,
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecdsa", about = "secp256k1 上的 ECDSA：导出公钥、签名、验证")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 由私钥导出公钥
    PublicKey {
        #[arg(long, required_unless_present = "random", help = "十进制或 0x 十六进制")]
        private_key: Option<String>,

        #[arg(long, conflicts_with = "private_key", help = "随机生成私钥")]
        random: bool,

        #[arg(long, value_enum, env = "ECDSA_FORMAT", default_value_t = FormatArg::Dec)]
        format: FormatArg,
    },
    /// 用私钥签名消息
    Sign {
        #[arg(long)]
        private_key: String,

        #[arg(long)]
        message: String,

        #[arg(long, value_enum, env = "ECDSA_MESSAGE_MODE", default_value_t = ModeArg::Hashed)]
        mode: ModeArg,

        #[arg(long, help = "使用 RFC 6979 确定性 nonce")]
        deterministic: bool,

        #[arg(long, env = "ECDSA_MAX_ATTEMPTS", default_value_t = secp256k1_playground::ecdsa::DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,

        #[arg(long, value_enum, env = "ECDSA_FORMAT", default_value_t = FormatArg::Dec)]
        format: FormatArg,
    },
    /// 用公钥验证签名
    Verify {
        #[arg(long, help = "JSON: {\"x\": .., \"y\": ..}")]
        public_key: String,

        #[arg(long, help = "JSON: {\"r\": .., \"s\": ..}")]
        signature: String,

        #[arg(long)]
        message: String,

        #[arg(long, value_enum, env = "ECDSA_MESSAGE_MODE", default_value_t = ModeArg::Hashed)]
        mode: ModeArg,
    },
    /// 输出消息对应的待签名整数
    Digest {
        #[arg(long)]
        message: String,

        #[arg(long, value_enum, env = "ECDSA_MESSAGE_MODE", default_value_t = ModeArg::Hashed)]
        mode: ModeArg,

        #[arg(long, value_enum, env = "ECDSA_FORMAT", default_value_t = FormatArg::Dec)]
        format: FormatArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Dec,
    Hex,
}

impl From<FormatArg> for DisplayFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Dec => DisplayFormat::Decimal,
            FormatArg::Hex => DisplayFormat::Hex,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Hashed,
    Integer,
}

impl From<ModeArg> for MessageMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Hashed => MessageMode::Hashed,
            ModeArg::Integer => MessageMode::Integer,
        }
    }
}

fn setup_tracing_with_log_level(level: Level) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing_with_log_level(Level::WARN);

    match cli.command {
        Command::PublicKey {
            private_key,
            random,
            format,
        } => {
            let ecdsa = Ecdsa::secp256k1();
            let secret = match private_key {
                Some(s) if !random => parse_bigint(&s).context("私钥格式错误")?,
                _ => {
                    let secret = ecdsa.random_private_key(&mut rand::thread_rng());
                    println!("private key: {}", format_bigint(&secret, format.into()));
                    secret
                }
            };
            let key = PrivateKey::new(secret, &ecdsa)?;
            println!("{}", render_point(&key.point, format.into()));
        }
        Command::Sign {
            private_key,
            message,
            mode,
            deterministic,
            max_attempts,
            format,
        } => {
            let ecdsa = Ecdsa::secp256k1().with_max_attempts(max_attempts);
            let secret = parse_bigint(&private_key).context("私钥格式错误")?;
            let z = message_digest(&message, mode.into()).context("消息格式错误")?;
            info!(z = %format_bigint(&z, DisplayFormat::Hex), "signing");

            let key = PrivateKey::new(secret, &ecdsa)?;
            let sig = if deterministic {
                key.sign_deterministic(&z)?
            } else {
                key.sign(&z)?
            };
            println!("{}", render_signature(&sig, format.into()));
        }
        Command::Verify {
            public_key,
            signature,
            message,
            mode,
        } => {
            let ecdsa = Ecdsa::secp256k1();
            let point =
                parse_public_key(&public_key, &ecdsa.group().curve).context("公钥格式错误")?;
            let sig = parse_signature(&signature).context("签名格式错误")?;
            let z = message_digest(&message, mode.into()).context("消息格式错误")?;

            if ecdsa.verify(&z, &sig, &point) {
                println!("签名有效");
            } else {
                println!("签名无效");
            }
        }
        Command::Digest {
            message,
            mode,
            format,
        } => {
            let z = message_digest(&message, mode.into()).context("消息格式错误")?;
            println!("{}", format_bigint(&z, format.into()));
        }
    }

    Ok(())
}
