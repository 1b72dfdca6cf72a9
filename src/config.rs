//! 생성기 설정

use std::net::SocketAddr;

use crate::{
    Error, Result, DEFAULT_HOST, DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_MAX_PAYLOAD_SIZE,
    DEFAULT_MESSAGE_COUNT, DEFAULT_PORT, HEADER_SIZE, MAX_UDP_PAYLOAD,
};

/// UDP scatter 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 목적지 호스트
    pub host: String,

    /// 목적지 포트
    pub port: u16,

    /// 최대 데이터그램 크기 (헤더 포함, 바이트)
    pub max_datagram_size: usize,

    /// 최대 페이로드 크기 (바이트)
    /// 메시지마다 `[1, max_payload_size]`에서 크기를 고름
    pub max_payload_size: usize,

    /// 실행당 메시지 수
    pub message_count: u32,

    /// 조각 전송 간격 (마이크로초)
    /// 0이면 최대 속도로 전송
    pub send_interval_us: u64,

    /// 분할/크기 RNG 시드 (None이면 엔트로피 사용)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            message_count: DEFAULT_MESSAGE_COUNT,
            send_interval_us: 0,
            seed: None,
        }
    }
}

impl Config {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 조각당 최대 데이터 크기
    pub fn max_chunk_size(&self) -> usize {
        self.max_datagram_size.saturating_sub(HEADER_SIZE)
    }

    /// 설정 검증
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host가 비어 있음".into()));
        }
        if self.max_datagram_size <= HEADER_SIZE {
            return Err(Error::InvalidConfig(format!(
                "max_datagram_size({})는 헤더 크기({})보다 커야 함",
                self.max_datagram_size, HEADER_SIZE
            )));
        }
        if self.max_datagram_size > MAX_UDP_PAYLOAD {
            return Err(Error::InvalidConfig(format!(
                "max_datagram_size({})가 UDP 최대 크기({})를 초과",
                self.max_datagram_size, MAX_UDP_PAYLOAD
            )));
        }
        if self.max_payload_size == 0 {
            return Err(Error::InvalidConfig("max_payload_size는 1 이상이어야 함".into()));
        }
        if u32::try_from(self.max_payload_size).is_err() {
            return Err(Error::InvalidConfig(format!(
                "max_payload_size({})가 32비트 오프셋 범위를 초과",
                self.max_payload_size
            )));
        }
        Ok(())
    }

    /// 목적지 주소 해석 (첫 번째 결과 사용)
    pub async fn resolve_destination(&self) -> Result<SocketAddr> {
        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port)).await?;
        addrs
            .next()
            .ok_or_else(|| Error::AddressResolution(format!("{}:{}", self.host, self.port)))
    }

    /// 작은 조각용 설정
    /// 조각 수가 많아져 재정렬이 심해짐
    pub fn small_fragments() -> Self {
        Self {
            max_datagram_size: 64,
            max_payload_size: 64 * 1024, // 64KiB
            ..Self::default()
        }
    }

    /// 점보 프레임용 설정
    pub fn jumbo() -> Self {
        Self {
            max_datagram_size: 9000,
            max_payload_size: 4 * 1024 * 1024, // 4MiB
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6789);
        assert_eq!(config.max_datagram_size, 512);
        assert_eq!(config.max_chunk_size(), 500);
        assert_eq!(config.max_payload_size, 1024 * 1024);
        assert_eq!(config.message_count, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(Config::small_fragments().validate().is_ok());
        assert!(Config::jumbo().validate().is_ok());
        assert_eq!(Config::small_fragments().max_chunk_size(), 52);
    }

    #[rstest]
    #[case::header_only(12, 1024)]
    #[case::too_small(0, 1024)]
    #[case::over_udp_limit(65508, 1024)]
    #[case::empty_payload(512, 0)]
    fn test_invalid_sizes_rejected(#[case] datagram: usize, #[case] payload: usize) {
        let config = Config {
            max_datagram_size: datagram,
            max_payload_size: payload,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_host_rejected() {
        let config = Config {
            host: "  ".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_resolve_loopback() {
        let config = Config::default();
        let addr = config.resolve_destination().await.unwrap();
        assert_eq!(addr.port(), 6789);
        assert!(addr.ip().is_loopback());
    }
}
