//! 조각 프레임 인코딩
//!
//! 와이어 레이아웃 (빅엔디언, 12바이트 헤더):
//!
//! ```text
//! offset  size  field
//! 0       2     Flags (bit15 = 종단 조각)
//! 2       2     DataSize
//! 4       4     Offset
//! 8       4     TransactionId
//! 12      N     Data
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::{HEADER_SIZE, MAX_UDP_PAYLOAD, TERMINAL_FLAG};

/// 조각 (데이터그램 하나의 내용)
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    /// 메시지 식별자
    pub transaction_id: u32,

    /// 원본 페이로드 내 시작 오프셋
    pub offset: u32,

    /// 페이로드 조각
    pub data: &'a [u8],

    /// 가장 큰 오프셋의 조각 여부
    pub is_terminal: bool,
}

impl<'a> Fragment<'a> {
    pub fn new(transaction_id: u32, offset: u32, data: &'a [u8], is_terminal: bool) -> Self {
        Self {
            transaction_id,
            offset,
            data,
            is_terminal,
        }
    }

    /// Flags 필드 값
    pub fn flags(&self) -> u16 {
        if self.is_terminal {
            TERMINAL_FLAG
        } else {
            0
        }
    }

    /// 인코딩 후 크기
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.data.len()
    }
}

/// 조각 인코더
#[derive(Debug, Clone, Copy)]
pub struct FragmentCodec {
    max_datagram_size: usize,
}

impl FragmentCodec {
    /// # Panics
    ///
    /// `max_datagram_size`가 헤더보다 작거나 같거나, UDP 최대 크기를 넘으면 패닉
    pub fn new(max_datagram_size: usize) -> Self {
        assert!(
            max_datagram_size > HEADER_SIZE,
            "max_datagram_size must exceed the {HEADER_SIZE}-byte header"
        );
        assert!(
            max_datagram_size <= MAX_UDP_PAYLOAD,
            "max_datagram_size {max_datagram_size} exceeds the UDP limit {MAX_UDP_PAYLOAD}"
        );
        Self { max_datagram_size }
    }

    pub fn max_datagram_size(&self) -> usize {
        self.max_datagram_size
    }

    /// 조각당 최대 데이터 크기
    pub fn max_chunk_size(&self) -> usize {
        self.max_datagram_size - HEADER_SIZE
    }

    /// 조각을 데이터그램으로 직렬화
    ///
    /// # Panics
    ///
    /// 데이터가 `max_chunk_size()`를 넘으면 패닉 (호출자 버그)
    pub fn encode(&self, fragment: &Fragment<'_>) -> Bytes {
        assert!(
            fragment.data.len() <= self.max_chunk_size(),
            "fragment data of {} bytes exceeds max chunk size {}",
            fragment.data.len(),
            self.max_chunk_size()
        );

        let mut buf = BytesMut::with_capacity(fragment.encoded_len());
        buf.put_u16(fragment.flags());
        // new()에서 상한을 검사하므로 항상 u16에 들어감
        buf.put_u16(fragment.data.len() as u16);
        buf.put_u32(fragment.offset);
        buf.put_u32(fragment.transaction_id);
        buf.put_slice(fragment.data);
        buf.freeze()
    }
}

impl Default for FragmentCodec {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_DATAGRAM_SIZE)
    }
}
