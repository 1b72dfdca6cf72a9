//! 랜덤 범위 분할
//!
//! `[0, total)`을 `max_chunk` 이하 길이의 겹치지 않는 범위들로 분해.
//! 작업 목록에서 범위를 무작위로 골라 무작위 지점에서 자르고,
//! 잘린 뒷부분을 내보내는 과정을 작업 목록이 빌 때까지 반복함.
//! 결과 순서는 오프셋 순서와 무관함.

use rand::Rng;

/// 바이트 범위 `[offset, offset + length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// 시작 오프셋
    pub offset: usize,

    /// 길이 (항상 > 0)
    pub length: usize,
}

impl Range {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// 끝 오프셋 (미포함)
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// 분할 결과
#[derive(Debug, Clone)]
pub struct Partition {
    /// 전송 순서대로 나열된 범위
    pub sequence: Vec<Range>,

    /// 가장 큰 오프셋 (종단 조각 표시용)
    pub terminal_offset: usize,
}

impl Partition {
    /// 범위 수
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// 범위 길이 합
    pub fn total_len(&self) -> usize {
        self.sequence.iter().map(|r| r.length).sum()
    }
}

/// 스레드 로컬 RNG로 분할
pub fn partition(total: usize, max_chunk: usize) -> Partition {
    partition_with(total, max_chunk, &mut rand::thread_rng())
}

/// 주어진 RNG로 분할
///
/// # Panics
///
/// `total` 또는 `max_chunk`가 0이면 패닉
pub fn partition_with<R: Rng + ?Sized>(total: usize, max_chunk: usize, rng: &mut R) -> Partition {
    assert!(total > 0, "partition total must be non-zero");
    assert!(max_chunk > 0, "partition max_chunk must be non-zero");

    let mut ranges = vec![Range::new(0, total)];
    let mut sequence = Vec::with_capacity(total.div_ceil(max_chunk));
    let mut terminal_offset = 0;

    while !ranges.is_empty() {
        let idx = rng.gen_range(0..ranges.len());
        let node = ranges[idx];

        // 범위 안의 임의 지점에서 자름
        let split = rng.gen_range(0..node.length);
        let mut piece = Range::new(node.offset + split, node.length - split);

        // 초과분은 작업 목록으로 되돌림
        if piece.length > max_chunk {
            ranges.insert(
                idx + 1,
                Range::new(piece.offset + max_chunk, piece.length - max_chunk),
            );
            piece.length = max_chunk;
        }

        terminal_offset = terminal_offset.max(piece.offset);
        sequence.push(piece);

        if split == 0 {
            ranges.remove(idx);
        } else {
            ranges[idx].length = split;
        }
    }

    Partition {
        sequence,
        terminal_offset,
    }
}
