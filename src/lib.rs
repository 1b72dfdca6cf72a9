//! # UDP Scatter
//!
//! 수신측 재조립 로직 검증용 UDP 조각 생성기
//!
//! ## 핵심 특징
//! - **랜덤 분할**: 페이로드 `[0, N)`을 겹치지 않는 범위로 무작위 분할
//! - **순서 섞기**: 오프셋 순서와 무관한 전송 순서로 재정렬 상황 재현
//! - **고정 헤더**: 12바이트 빅엔디언 헤더 + 데이터
//! - **종단 조각 표시**: 가장 큰 오프셋의 조각에 EOF 플래그
//! - **순차 전송**: 한 번에 하나의 전송만 진행, 첫 실패에서 중단
//! - **SHA-256 체크섬**: 수신측 검증용 기준값 출력

pub mod config;
pub mod emitter;
pub mod error;
pub mod fragment;
pub mod partition;
pub mod payload;
pub mod runner;
pub mod stats;
pub mod transport;

pub use config::Config;
pub use emitter::{EmitReport, Emitter};
pub use error::{Error, Result};
pub use fragment::{Fragment, FragmentCodec};
pub use partition::{partition, Partition, Range};
pub use payload::{Payload, PayloadGenerator};
pub use runner::Runner;
pub use stats::{MessageSummary, RunStats};
pub use transport::{Transport, UdpTransport};

/// 기본 목적지 호스트
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// 기본 목적지 포트
pub const DEFAULT_PORT: u16 = 6789;

/// 조각 헤더 크기 (바이트)
pub const HEADER_SIZE: usize = 12;

/// 기본 최대 데이터그램 크기 (바이트)
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 512;

/// 기본 최대 페이로드 크기 (바이트)
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 1024 * 1024; // 1MiB

/// 기본 메시지 수
pub const DEFAULT_MESSAGE_COUNT: u32 = 10;

/// 종단 조각 플래그 (Flags 필드 bit 15)
pub const TERMINAL_FLAG: u16 = 0x8000;

/// UDP 데이터그램 최대 페이로드 (IPv4)
pub const MAX_UDP_PAYLOAD: usize = 65507;
