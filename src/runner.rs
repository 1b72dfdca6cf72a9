//! 실행 제어기
//!
//! 메시지를 하나씩 순차적으로 생성/분할/송출하고, 마지막에 전송자를 닫음.
//! 메시지 사이에 겹침이 없으므로 트랜잭션 ID와 로그 순서가 결정적임.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::emitter::Emitter;
use crate::fragment::FragmentCodec;
use crate::partition::partition_with;
use crate::payload::PayloadGenerator;
use crate::stats::{MessageSummary, RunStats};
use crate::transport::Transport;
use crate::{Config, Result};

/// 간격 경고 기준 조각 수
const PACING_WARN_FRAGMENTS: usize = 1000;

/// 실행 제어기
pub struct Runner<T: Transport> {
    config: Config,
    transport: T,
    codec: FragmentCodec,
    generator: PayloadGenerator,
    rng: StdRng,

    /// 다음 트랜잭션 ID
    next_transaction_id: u32,
}

impl<T: Transport> Runner<T> {
    /// 새 실행 제어기 생성 (설정 검증 포함)
    pub fn new(config: Config, transport: T) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            codec: FragmentCodec::new(config.max_datagram_size),
            generator: PayloadGenerator::new(config.max_payload_size),
            config,
            transport,
            rng,
            next_transaction_id: 1,
        })
    }

    /// 전체 실행
    ///
    /// 실행기를 소비하므로 트랜잭션 ID는 항상 1부터 시작하고 전송자는 한 번만 닫힘.
    /// 실패 시 전송자는 닫지 않고 해제됨.
    pub async fn run(mut self) -> Result<RunStats> {
        let mut stats = RunStats::new();
        let send_interval = Duration::from_micros(self.config.send_interval_us);

        for _ in 0..self.config.message_count {
            let transaction_id = self.next_transaction_id;
            self.next_transaction_id += 1;

            let payload = self.generator.generate_with(transaction_id, &mut self.rng);
            info!(
                "Emitting message #{} of size:{} sha256:{}",
                transaction_id,
                payload.len(),
                payload.checksum_hex()
            );

            let partition =
                partition_with(payload.len(), self.codec.max_chunk_size(), &mut self.rng);
            if !send_interval.is_zero() && partition.len() > PACING_WARN_FRAGMENTS {
                warn!(
                    "message #{} has {} fragments with {}us pacing",
                    transaction_id,
                    partition.len(),
                    self.config.send_interval_us
                );
            }

            let report = Emitter::new(&mut self.transport, &self.codec)
                .with_send_interval(send_interval)
                .emit(&payload, &partition)
                .await;

            match report {
                Ok(report) => {
                    stats.record(MessageSummary::new(&payload, &partition, &report));
                }
                Err(e) => {
                    error!("Fail: message #{}: {}", transaction_id, e);
                    return Err(e);
                }
            }
        }

        self.transport.close().await?;
        stats.finish();
        info!("Run complete: {}", stats.summary());

        Ok(stats)
    }
}
