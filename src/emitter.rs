//! 조각 송출기
//!
//! - 분할 순서대로 조각을 인코딩해 전송
//! - 한 번에 하나의 전송만 진행 (이전 전송 완료 후 다음 전송)
//! - 첫 전송 실패에서 즉시 중단

use std::time::Duration;

use tracing::debug;

use crate::fragment::{Fragment, FragmentCodec};
use crate::partition::Partition;
use crate::payload::Payload;
use crate::transport::Transport;
use crate::{Error, Result};

/// 메시지 하나의 송출 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// 보낸 조각 수
    pub fragments: usize,

    /// 보낸 데이터그램 바이트 합 (헤더 포함)
    pub bytes: usize,
}

/// 송출기
pub struct Emitter<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    codec: &'a FragmentCodec,
    send_interval: Duration,
}

impl<'a, T: Transport + ?Sized> Emitter<'a, T> {
    pub fn new(transport: &'a mut T, codec: &'a FragmentCodec) -> Self {
        Self {
            transport,
            codec,
            send_interval: Duration::ZERO,
        }
    }

    /// 조각 사이 전송 간격
    pub fn with_send_interval(mut self, interval: Duration) -> Self {
        self.send_interval = interval;
        self
    }

    /// 페이로드를 분할 순서대로 전송
    ///
    /// # Panics
    ///
    /// 분할 범위가 페이로드 밖을 가리키면 패닉 (분할은 같은 페이로드 길이로 만들어야 함)
    pub async fn emit(&mut self, payload: &Payload, partition: &Partition) -> Result<EmitReport> {
        debug_assert!(
            partition.total_len() == payload.len(),
            "partition covers {} bytes but payload has {}",
            partition.total_len(),
            payload.len()
        );
        let transaction_id = payload.transaction_id;
        let mut report = EmitReport::default();

        for range in &partition.sequence {
            let offset = u32::try_from(range.offset)
                .map_err(|_| Error::OffsetOverflow { offset: range.offset })?;
            let is_terminal = range.offset == partition.terminal_offset;

            let fragment = Fragment::new(
                transaction_id,
                offset,
                &payload.bytes[range.offset..range.end()],
                is_terminal,
            );
            let datagram = self.codec.encode(&fragment);

            if let Err(source) = self.transport.send(&datagram).await {
                return Err(Error::Transport {
                    transaction_id,
                    offset,
                    source,
                });
            }

            report.fragments += 1;
            report.bytes += datagram.len();
            debug!(
                "fragment sent: transaction_id={} offset={} len={} terminal={}",
                transaction_id, offset, range.length, is_terminal
            );

            // 전송 간격
            if !self.send_interval.is_zero() && report.fragments < partition.len() {
                tokio::time::sleep(self.send_interval).await;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::testing::decode;
    use crate::partition::{partition_with, Range};
    use crate::transport::testing::RecordingTransport;
    use bytes::Bytes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn payload(len: usize) -> Payload {
        let bytes: Vec<u8> = (0..len).map(|i| (i * 31 % 256) as u8).collect();
        Payload::new(9, Bytes::from(bytes))
    }

    fn five_ranges() -> Partition {
        Partition {
            sequence: vec![
                Range::new(3, 1),
                Range::new(0, 3),
                Range::new(7, 2),
                Range::new(9, 1),
                Range::new(4, 3),
            ],
            terminal_offset: 9,
        }
    }

    #[tokio::test]
    async fn test_sends_in_sequence_order() {
        let payload = payload(10);
        let partition = five_ranges();
        let codec = FragmentCodec::new(15);
        let mut transport = RecordingTransport::new();

        let report = Emitter::new(&mut transport, &codec)
            .emit(&payload, &partition)
            .await
            .unwrap();

        assert_eq!(report.fragments, 5);
        assert_eq!(report.bytes, 5 * 12 + 10);
        assert_eq!(transport.attempts, 5);

        let decoded: Vec<_> = transport.sent.iter().map(|d| decode(d).unwrap()).collect();
        let offsets: Vec<u32> = decoded.iter().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![3, 0, 7, 9, 4]);

        for (frame, range) in decoded.iter().zip(&partition.sequence) {
            assert_eq!(frame.transaction_id, 9);
            assert_eq!(frame.data, &payload.bytes[range.offset..range.end()]);
            assert_eq!(frame.is_terminal(), range.offset == 9);
        }
        assert_eq!(decoded.iter().filter(|d| d.is_terminal()).count(), 1);
    }

    #[tokio::test]
    async fn test_failure_short_circuits() {
        let payload = payload(10);
        let partition = five_ranges();
        let codec = FragmentCodec::new(15);
        let mut transport = RecordingTransport::failing_on(2);

        let err = Emitter::new(&mut transport, &codec)
            .emit(&payload, &partition)
            .await
            .unwrap_err();

        match err {
            Error::Transport {
                transaction_id,
                offset,
                ..
            } => {
                assert_eq!(transaction_id, 9);
                assert_eq!(offset, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // 3~5번째 전송은 시도하지 않음
        assert_eq!(transport.attempts, 2);
        assert_eq!(transport.sent.len(), 1);
    }

    #[tokio::test]
    async fn test_reassembles_random_partition() {
        let payload = payload(5000);
        let codec = FragmentCodec::default();
        let partition =
            partition_with(payload.len(), codec.max_chunk_size(), &mut StdRng::seed_from_u64(3));
        let mut transport = RecordingTransport::new();

        Emitter::new(&mut transport, &codec)
            .emit(&payload, &partition)
            .await
            .unwrap();

        let mut rebuilt = vec![0u8; payload.len()];
        for datagram in &transport.sent {
            assert!(datagram.len() <= 512);
            let frame = decode(datagram).unwrap();
            let start = frame.offset as usize;
            rebuilt[start..start + frame.data.len()].copy_from_slice(&frame.data);
        }
        assert_eq!(rebuilt, &payload.bytes[..]);
        assert_eq!(transport.sent.len(), partition.len());
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    #[should_panic(expected = "partition covers 10 bytes but payload has 8")]
    async fn test_mismatched_partition_panics() {
        let payload = payload(8);
        let codec = FragmentCodec::new(15);
        let mut transport = RecordingTransport::new();

        let _ = Emitter::new(&mut transport, &codec)
            .emit(&payload, &five_ranges())
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_interval_paces() {
        let payload = payload(10);
        let partition = five_ranges();
        let codec = FragmentCodec::new(15);
        let mut transport = RecordingTransport::new();

        let started = tokio::time::Instant::now();
        Emitter::new(&mut transport, &codec)
            .with_send_interval(Duration::from_millis(10))
            .emit(&payload, &partition)
            .await
            .unwrap();

        // 마지막 조각 뒤에는 대기하지 않음
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_millis(50));
    }
}
