//! 송출 통계

use std::time::{Duration, Instant};

use crate::emitter::EmitReport;
use crate::partition::Partition;
use crate::payload::{Checksum, Payload};

/// 메시지 하나의 요약
#[derive(Debug, Clone)]
pub struct MessageSummary {
    /// 메시지 식별자
    pub transaction_id: u32,

    /// 페이로드 크기 (바이트)
    pub payload_size: usize,

    /// 페이로드 SHA-256
    pub checksum: Checksum,

    /// 보낸 조각 수
    pub fragments: usize,

    /// 종단 조각 오프셋
    pub terminal_offset: usize,

    /// 보낸 데이터그램 바이트 합 (헤더 포함)
    pub datagram_bytes: usize,
}

impl MessageSummary {
    pub fn new(payload: &Payload, partition: &Partition, report: &EmitReport) -> Self {
        Self {
            transaction_id: payload.transaction_id,
            payload_size: payload.len(),
            checksum: payload.checksum,
            fragments: report.fragments,
            terminal_offset: partition.terminal_offset,
            datagram_bytes: report.bytes,
        }
    }

    pub fn checksum_hex(&self) -> String {
        hex::encode(self.checksum)
    }

    /// 헤더가 차지하는 비율
    pub fn header_overhead(&self) -> f64 {
        if self.datagram_bytes == 0 {
            return 0.0;
        }
        (self.datagram_bytes - self.payload_size) as f64 / self.datagram_bytes as f64
    }
}

/// 실행 전체 통계
#[derive(Debug, Clone)]
pub struct RunStats {
    /// 시작 시간
    pub start_time: Instant,

    /// 완료 시점 경과 시간 (진행 중이면 None)
    pub finished: Option<Duration>,

    /// 완료된 메시지 요약
    pub messages: Vec<MessageSummary>,

    /// 총 조각 수
    pub total_fragments: u64,

    /// 총 전송 바이트 (헤더 포함)
    pub total_bytes: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            finished: None,
            messages: Vec::new(),
            total_fragments: 0,
            total_bytes: 0,
        }
    }

    /// 메시지 완료 기록
    pub fn record(&mut self, summary: MessageSummary) {
        self.total_fragments += summary.fragments as u64;
        self.total_bytes += summary.datagram_bytes as u64;
        self.messages.push(summary);
    }

    /// 실행 종료 표시
    pub fn finish(&mut self) {
        self.finished = Some(self.start_time.elapsed());
    }

    /// 경과 시간
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.start_time.elapsed())
    }

    /// 총 페이로드 바이트 (헤더 제외)
    pub fn payload_bytes(&self) -> u64 {
        self.messages.iter().map(|m| m.payload_size as u64).sum()
    }

    /// 전체 처리율 (bytes/sec)
    pub fn throughput(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            return 0.0;
        }
        self.total_bytes as f64 / elapsed
    }

    /// 통계 요약 문자열
    pub fn summary(&self) -> String {
        format!(
            "Elapsed: {:.2}s | Messages: {} | Fragments: {} | Bytes: {} (payload {}) | Throughput: {:.2} MB/s",
            self.elapsed().as_secs_f64(),
            self.messages.len(),
            self.total_fragments,
            self.total_bytes,
            self.payload_bytes(),
            self.throughput() / 1_000_000.0,
        )
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
