//! 랜덤 페이로드 생성
//!
//! 페이로드와 SHA-256은 수신측이 재조립 후 검증할 기준값

use bytes::Bytes;
use rand::Rng;
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

/// SHA-256 다이제스트
pub type Checksum = [u8; 32];

/// 메시지 하나의 페이로드
#[derive(Debug, Clone)]
pub struct Payload {
    /// 메시지 식별자
    pub transaction_id: u32,

    /// 페이로드 바이트
    pub bytes: Bytes,

    /// `bytes`의 SHA-256
    pub checksum: Checksum,
}

impl Payload {
    /// 바이트로부터 페이로드 생성 (체크섬 계산)
    pub fn new(transaction_id: u32, bytes: Bytes) -> Self {
        let checksum = Sha256::digest(&bytes).into();
        Self {
            transaction_id,
            bytes,
            checksum,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 체크섬 16진 문자열
    pub fn checksum_hex(&self) -> String {
        hex::encode(self.checksum)
    }
}

/// 페이로드 생성기
#[derive(Debug, Clone, Copy)]
pub struct PayloadGenerator {
    max_payload_size: usize,
}

impl PayloadGenerator {
    /// # Panics
    ///
    /// `max_payload_size`가 0이면 패닉
    pub fn new(max_payload_size: usize) -> Self {
        assert!(max_payload_size > 0, "max_payload_size must be non-zero");
        Self { max_payload_size }
    }

    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    /// 스레드 로컬 RNG로 크기를 골라 생성
    pub fn generate(&self, transaction_id: u32) -> Payload {
        self.generate_with(transaction_id, &mut rand::thread_rng())
    }

    /// 주어진 RNG로 크기를 고르고, 내용은 OS 난수로 채움
    pub fn generate_with<R: Rng + ?Sized>(&self, transaction_id: u32, rng: &mut R) -> Payload {
        let size = rng.gen_range(1..=self.max_payload_size);
        let mut buf = vec![0u8; size];
        OsRng.fill_bytes(&mut buf);

        Payload::new(transaction_id, Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_size_within_bounds() {
        let generator = PayloadGenerator::new(300);
        for id in 1..=200 {
            let payload = generator.generate(id);
            assert_eq!(payload.transaction_id, id);
            assert!((1..=300).contains(&payload.len()));
        }
    }

    #[test]
    fn test_single_byte_bound() {
        let payload = PayloadGenerator::new(1).generate(1);
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_checksum_matches_bytes() {
        let payload = PayloadGenerator::new(4096).generate(3);
        let expected: Checksum = Sha256::digest(&payload.bytes).into();
        assert_eq!(payload.checksum, expected);
        assert_eq!(payload.checksum_hex().len(), 64);
    }

    #[test]
    fn test_known_digest() {
        let payload = Payload::new(1, Bytes::from_static(b"abc"));
        assert_eq!(
            payload.checksum_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_seeded_size_reproducible_content_random() {
        let generator = PayloadGenerator::new(1 << 16);
        let pair = |seed| {
            (
                generator.generate_with(1, &mut StdRng::seed_from_u64(seed)),
                generator.generate_with(1, &mut StdRng::seed_from_u64(seed)),
            )
        };
        // 내용 비교가 의미 있도록 64바이트 이상 나오는 시드 선택
        let (a, b) = (0u64..).map(pair).find(|(a, _)| a.len() >= 64).unwrap();

        assert_eq!(a.len(), b.len());
        // 내용은 OS 난수
        assert_ne!(a.bytes, b.bytes);
    }
}
