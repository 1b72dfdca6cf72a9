//! 에러 타입 정의

use thiserror::Error;

/// UDP scatter 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO 에러: {0}")]
    Io(#[from] std::io::Error),

    #[error("전송 실패: transaction_id={transaction_id}, offset={offset}: {source}")]
    Transport {
        transaction_id: u32,
        offset: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("유효하지 않은 설정: {0}")]
    InvalidConfig(String),

    #[error("주소 해석 실패: {0}")]
    AddressResolution(String),

    #[error("오프셋이 32비트 범위를 벗어남: {offset}")]
    OffsetOverflow { offset: usize },
}

impl Error {
    /// 전송 실패인 경우 해당 트랜잭션 ID
    pub fn transaction_id(&self) -> Option<u32> {
        match self {
            Error::Transport { transaction_id, .. } => Some(*transaction_id),
            _ => None,
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
