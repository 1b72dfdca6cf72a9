//! UDP Scatter 송출기
//!
//! 랜덤 페이로드를 무작위 순서의 조각으로 나눠 UDP로 전송
//! - 메시지마다 크기와 SHA-256 출력 (수신측 검증용)
//! - 전송 실패 시 즉시 비정상 종료
//!
//! 사용법:
//!   cargo run --release --bin scatter-emitter -- [OPTIONS]
//!
//! 예시:
//!   # 기본 (127.0.0.1:6789, 메시지 10개)
//!   cargo run --release --bin scatter-emitter
//!
//!   # 작은 조각 + 재현 가능한 분할
//!   cargo run --release --bin scatter-emitter -- --profile small --seed 42

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scatter::{Config, Runner, UdpTransport};

/// 설정 프리셋
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Default,
    Small,
    Jumbo,
}

impl Profile {
    fn config(self) -> Config {
        match self {
            Profile::Default => Config::default(),
            Profile::Small => Config::small_fragments(),
            Profile::Jumbo => Config::jumbo(),
        }
    }
}

/// 수신측 재조립 테스트용 랜덤 UDP 조각 송출기
#[derive(Debug, Parser)]
#[command(name = "scatter-emitter", version, about)]
struct Args {
    /// 설정 프리셋 (개별 옵션이 우선)
    #[arg(long, value_enum, default_value = "default", env = "SCATTER_PROFILE")]
    profile: Profile,

    /// 목적지 호스트
    #[arg(long, env = "SCATTER_HOST")]
    host: Option<String>,

    /// 목적지 포트
    #[arg(short, long, env = "SCATTER_PORT")]
    port: Option<u16>,

    /// 최대 데이터그램 크기 (헤더 12바이트 포함)
    #[arg(long, env = "SCATTER_MAX_DATAGRAM_SIZE")]
    max_datagram_size: Option<usize>,

    /// 최대 페이로드 크기 (바이트)
    #[arg(long, env = "SCATTER_MAX_PAYLOAD_SIZE")]
    max_payload_size: Option<usize>,

    /// 보낼 메시지 수
    #[arg(short = 'n', long = "messages", env = "SCATTER_MESSAGES")]
    messages: Option<u32>,

    /// 조각 전송 간격 (마이크로초)
    #[arg(long, env = "SCATTER_INTERVAL_US")]
    interval_us: Option<u64>,

    /// 분할/크기 RNG 시드
    #[arg(long, env = "SCATTER_SEED")]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Config {
        let mut config = self.profile.config();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(size) = self.max_datagram_size {
            config.max_datagram_size = size;
        }
        if let Some(size) = self.max_payload_size {
            config.max_payload_size = size;
        }
        if let Some(count) = self.messages {
            config.message_count = count;
        }
        if let Some(interval) = self.interval_us {
            config.send_interval_us = interval;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 로깅 설정
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Args::parse().into_config();
    config.validate()?;

    let destination = config.resolve_destination().await?;
    info!("UDP Scatter starting...");
    info!("Destination: {}", destination);
    info!(
        "Messages: {}, max datagram: {} bytes, max payload: {} bytes",
        config.message_count, config.max_datagram_size, config.max_payload_size
    );
    if let Some(seed) = config.seed {
        info!("Seed: {}", seed);
    }

    let transport = UdpTransport::bind(destination).await?;
    let stats = Runner::new(config, transport)?.run().await?;
    info!("Done: {} messages", stats.messages.len());

    Ok(())
}
